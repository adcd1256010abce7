//! Typst writer
//!
//! Emits the page-setup preamble and renders a body tree as Typst markup.
//! Everything is written straight to the output stream in traversal order.

use std::borrow::Cow;
use std::io::{self, Write};

use md2typst_ast::{Node, Root, Visit, walk};

use crate::frontmatter::Frontmatter;

/// Values for the fixed `#set` rules at the top of every document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSetup {
    pub paper: String,
    pub font: String,
    pub font_size: String,
    pub lang: String,
    pub leading: String,
    pub first_line_indent: String,
}

impl Default for PageSetup {
    fn default() -> Self {
        Self {
            paper: "a4".to_string(),
            font: "SimSun".to_string(),
            font_size: "12pt".to_string(),
            lang: "zh".to_string(),
            leading: "1.5em".to_string(),
            first_line_indent: "2em".to_string(),
        }
    }
}

/// Write the page setup, then the title block when the title is non-empty.
pub fn write_preamble<W: Write>(
    out: &mut W,
    frontmatter: &Frontmatter,
    page: &PageSetup,
) -> io::Result<()> {
    writeln!(out, r#"#set page(paper: "{}")"#, escape_string(&page.paper))?;
    writeln!(
        out,
        r#"#set text(font: "{}", size: {}, lang: "{}")"#,
        escape_string(&page.font),
        page.font_size,
        escape_string(&page.lang)
    )?;
    writeln!(
        out,
        "#set par(leading: {}, first-line-indent: {})",
        page.leading, page.first_line_indent
    )?;
    writeln!(out)?;

    if !frontmatter.title.is_empty() {
        writeln!(out, r#"#let title = "{}""#, escape_string(&frontmatter.title))?;
        writeln!(out)?;
        writeln!(
            out,
            r#"#align(center, text(size: 22pt, weight: "bold")[{}])"#,
            frontmatter.title
        )?;
        writeln!(out, "#v(1em)")?;
        writeln!(out)?;
    }

    Ok(())
}

/// Render a body tree.
///
/// Node kinds without a Typst mapping produce no output of their own; their
/// children are still rendered.
pub fn write_body<W: Write>(out: &mut W, root: &Root) -> io::Result<()> {
    walk(root, |node, visit| write_node(out, node, visit))
}

fn write_node<W: Write>(out: &mut W, node: &Node, visit: Visit) -> io::Result<()> {
    match (node, visit) {
        (Node::Heading(h), Visit::Enter) => write!(out, "#heading(level: {})[", h.level),
        (Node::Heading(_), Visit::Exit) => out.write_all(b"]\n\n"),

        (Node::Paragraph(_), Visit::Enter) => Ok(()),
        (Node::Paragraph(_), Visit::Exit) => out.write_all(b"\n\n"),

        (Node::Text(t), Visit::Enter) => {
            out.write_all(t.value.as_bytes())?;
            if t.soft_break {
                out.write_all(b"\n")?;
            }
            Ok(())
        }
        (Node::Text(_), Visit::Exit) => Ok(()),

        (Node::List(_), Visit::Enter) => Ok(()),
        (Node::List(_), Visit::Exit) => out.write_all(b"\n"),

        (Node::ListItem(_), Visit::Enter) => out.write_all(b"- "),
        (Node::ListItem(_), Visit::Exit) => out.write_all(b"\n"),

        (Node::Emphasis(e), Visit::Enter) if e.strong => out.write_all(b"#strong["),
        (Node::Emphasis(_), Visit::Enter) => out.write_all(b"#emph["),
        (Node::Emphasis(_), Visit::Exit) => out.write_all(b"]"),

        (Node::ThematicBreak, Visit::Enter) => out.write_all(b"#line(length: 100%)\n\n"),
        (Node::ThematicBreak, Visit::Exit) => Ok(()),

        (Node::CodeSpan(c), Visit::Enter) => {
            write!(out, r#"#raw("{}")"#, escape_string(&c.value))
        }
        (Node::CodeSpan(_), Visit::Exit) => Ok(()),

        (Node::FencedCodeBlock(c), Visit::Enter) => {
            let content = c.lines.concat();
            let content = content.trim_end_matches('\n');
            let fence = "`".repeat(calculate_fence_length(content));
            write!(out, "{fence}\n{content}\n{fence}\n\n")
        }
        (Node::FencedCodeBlock(_), Visit::Exit) => Ok(()),

        // Links, images, block quotes, HTML and the like: no directive.
        (Node::Unsupported(_), _) => Ok(()),
    }
}

/// Escape text for use inside a Typst string literal.
///
/// Borrows the input when nothing needs escaping.
pub fn escape_string(content: &str) -> Cow<'_, str> {
    if !content.contains(['\\', '"', '\n', '\r', '\t']) {
        return Cow::Borrowed(content);
    }

    let mut escaped = String::with_capacity(content.len() + 8);
    for c in content.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

/// Calculate the minimum fence length needed for a raw block.
///
/// The fence must be longer than any sequence of consecutive backticks in the content.
/// Returns at least 3.
fn calculate_fence_length(content: &str) -> usize {
    let mut max_backticks = 0;
    let mut current_run = 0;

    for c in content.chars() {
        if c == '`' {
            current_run += 1;
            max_backticks = max_backticks.max(current_run);
        } else {
            current_run = 0;
        }
    }

    3.max(max_backticks + 1)
}
