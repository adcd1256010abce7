//! YAML frontmatter handling
//!
//! Splits a leading `---` delimited block off the document and decodes the
//! fields md2typst cares about. An unterminated block is not an error: the
//! whole input is treated as body. A terminated block that is not valid YAML
//! is.

use saphyr::{Yaml, YamlLoader};
use saphyr_parser::Parser;
use thiserror::Error;

const OPENING_LF: &[u8] = b"---\n";
const OPENING_CRLF: &[u8] = b"---\r\n";
const CLOSING: &[u8] = b"\n---";

/// Frontmatter decoding errors
#[derive(Debug, Error)]
pub enum FrontmatterError {
    #[error("frontmatter is not valid UTF-8")]
    InvalidUtf8,
    #[error("invalid YAML: {0}")]
    Yaml(String),
    #[error("frontmatter must be a mapping of keys to values")]
    NotAMapping,
    #[error("`title` must be a scalar value")]
    InvalidTitle,
}

/// Fields read from the frontmatter block
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frontmatter {
    /// Document title; empty when absent
    pub title: String,
}

/// Split raw input into `(frontmatter, body)`.
///
/// The block must open with a first line that is exactly `---` (LF or CRLF)
/// and closes at the next line starting with `---`. Exactly one line ending
/// after the closing dashes is consumed. Without a closing line the input
/// is returned untouched as body.
pub fn split_frontmatter(input: &[u8]) -> (Option<&[u8]>, &[u8]) {
    let open_len = if input.starts_with(OPENING_LF) {
        OPENING_LF.len()
    } else if input.starts_with(OPENING_CRLF) {
        OPENING_CRLF.len()
    } else {
        return (None, input);
    };

    // Start at the newline ending the opening line, so a closing line
    // directly after it is found too.
    let search_from = open_len - 1;
    let Some(offset) = find(&input[search_from..], CLOSING) else {
        return (None, input);
    };
    let newline = search_from + offset;

    let mut metadata = &input[open_len..newline.max(open_len)];
    if let Some(stripped) = metadata.strip_suffix(b"\r") {
        metadata = stripped;
    }

    let mut body_start = newline + CLOSING.len();
    match input.get(body_start) {
        Some(b'\n') => body_start += 1,
        Some(b'\r') => {
            body_start += 1;
            if input.get(body_start) == Some(&b'\n') {
                body_start += 1;
            }
        }
        _ => {}
    }

    (Some(metadata), &input[body_start..])
}

/// Decode an optional frontmatter block.
///
/// Absent or empty blocks yield the default record without invoking the
/// YAML parser.
pub fn parse_frontmatter(metadata: Option<&[u8]>) -> Result<Frontmatter, FrontmatterError> {
    match metadata {
        Some(bytes) if !bytes.is_empty() => decode_frontmatter(bytes),
        _ => Ok(Frontmatter::default()),
    }
}

/// Decode a frontmatter block as YAML.
///
/// Only the first document is read. Unknown keys are ignored. Scalar titles
/// keep their source text, so `1.50` stays `1.50`.
pub fn decode_frontmatter(bytes: &[u8]) -> Result<Frontmatter, FrontmatterError> {
    let content = std::str::from_utf8(bytes).map_err(|_| FrontmatterError::InvalidUtf8)?;
    let docs = load_documents(content)?;

    let mapping = match docs.first() {
        None | Some(Yaml::BadValue) => return Ok(Frontmatter::default()),
        Some(Yaml::Mapping(mapping)) => mapping,
        Some(doc) if resolves_to_null(doc) => return Ok(Frontmatter::default()),
        Some(_) => return Err(FrontmatterError::NotAMapping),
    };

    let title = match mapping.iter().find(|(key, _)| scalar_source(key) == Some("title")) {
        Some((_, value)) => scalar_text(value)?,
        None => String::new(),
    };

    Ok(Frontmatter { title })
}

/// Load every document with scalars left as written
fn load_documents(content: &str) -> Result<Vec<Yaml<'_>>, FrontmatterError> {
    let mut loader: YamlLoader<Yaml> = YamlLoader::default();
    loader.early_parse(false);
    Parser::new_from_str(content)
        .load(&mut loader, true)
        .map_err(|e| FrontmatterError::Yaml(e.to_string()))?;
    Ok(loader.into_documents())
}

fn scalar_source<'a>(node: &'a Yaml<'_>) -> Option<&'a str> {
    match node {
        Yaml::Representation(text, _, _) => Some(&**text),
        _ => None,
    }
}

fn resolves_to_null(node: &Yaml<'_>) -> bool {
    let mut resolved = node.clone();
    resolved.parse_representation() && resolved.is_null()
}

/// Source text of a scalar; null reads as empty
fn scalar_text(value: &Yaml<'_>) -> Result<String, FrontmatterError> {
    match value {
        Yaml::Representation(..) if resolves_to_null(value) => Ok(String::new()),
        Yaml::Representation(text, _, _) => Ok(text.to_string()),
        Yaml::BadValue => Ok(String::new()),
        _ => Err(FrontmatterError::InvalidTitle),
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
