//! Markdown to Typst conversion pipeline
//!
//! split frontmatter -> decode -> preamble -> parse body -> render body

use std::io::Write;

use tracing::debug;

use crate::error::Result;
use crate::frontmatter::{parse_frontmatter, split_frontmatter};
use crate::parser::parse_body;
use crate::writer::{PageSetup, write_body, write_preamble};

/// Options for a conversion run
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Values for the page setup rules
    pub page: PageSetup,
}

/// Convert a full document (frontmatter and body) and write Typst to `out`.
///
/// Frontmatter is decoded before anything is written, so a frontmatter
/// error leaves `out` untouched.
pub fn convert<W: Write>(input: &[u8], out: &mut W, options: &ConvertOptions) -> Result<()> {
    let (metadata, body) = split_frontmatter(input);
    match metadata {
        Some(block) => debug!(
            frontmatter_bytes = block.len(),
            body_bytes = body.len(),
            "found frontmatter"
        ),
        None => debug!(body_bytes = body.len(), "no frontmatter"),
    }

    let frontmatter = parse_frontmatter(metadata)?;
    debug!(title = %frontmatter.title, "decoded frontmatter");

    write_preamble(out, &frontmatter, &options.page)?;

    let root = parse_body(body);
    debug!(blocks = root.children.len(), "parsed body");

    write_body(out, &root)?;
    Ok(())
}

/// Convert a full document into a `String`
pub fn convert_to_string(input: &[u8], options: &ConvertOptions) -> Result<String> {
    let mut buffer = Vec::with_capacity(input.len() * 2);
    convert(input, &mut buffer, options)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
