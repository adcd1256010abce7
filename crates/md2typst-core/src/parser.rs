//! Markdown body parser
//!
//! Folds the `pulldown-cmark` event stream into an [`md2typst_ast::Root`].
//! Plain CommonMark only; no GFM extensions are enabled. Constructs the
//! Typst writer has no mapping for are kept as `Unsupported` nodes so the
//! writer can drop them explicitly.
//!
//! Text runs hold their source bytes: backslash escapes and entity
//! references are not resolved.

use std::ops::Range;

use md2typst_ast::{Node, Root};
use pulldown_cmark::{CodeBlockKind, Event, LinkType, Options, Parser, Tag};

/// Parse a Markdown body into a node tree.
///
/// Never fails: invalid UTF-8 is replaced and every byte sequence is some
/// CommonMark document.
pub fn parse_body(body: &[u8]) -> Root {
    let source = String::from_utf8_lossy(body);
    let mut builder = TreeBuilder::new(&source);

    for (event, range) in Parser::new_ext(&source, Options::empty()).into_offset_iter() {
        builder.process_event(event, range);
    }

    builder.finish()
}

/// A container that has been opened but not yet closed
enum Frame {
    /// Regular node collecting children
    Container(Node),
    /// Fenced code block collecting its text
    Code(String),
    /// Construct whose content is discarded (indented code, HTML blocks, autolinks)
    Opaque(&'static str),
}

struct TreeBuilder<'s> {
    source: &'s str,
    root: Vec<Node>,
    /// Open containers, innermost last
    stack: Vec<Frame>,
}

impl<'s> TreeBuilder<'s> {
    fn new(source: &'s str) -> Self {
        Self {
            source,
            root: Vec::new(),
            stack: Vec::new(),
        }
    }

    fn process_event(&mut self, event: Event<'_>, range: Range<usize>) {
        match event {
            Event::Start(tag) => self.open(tag),
            Event::End(_) => self.close(),
            Event::Text(text) => match self.stack.last_mut() {
                Some(Frame::Code(content)) => content.push_str(&text),
                Some(Frame::Opaque(_)) => {}
                _ => {
                    let raw = source_text(self.source, range, &text).to_string();
                    self.append(Node::text(raw));
                }
            },
            Event::Code(code) => self.append(Node::code_span(code.into_string())),
            Event::SoftBreak | Event::HardBreak => self.line_break(),
            Event::Rule => self.append(Node::thematic_break()),
            Event::Html(_) | Event::InlineHtml(_) => self.append(Node::unsupported("html", vec![])),
            Event::InlineMath(_) | Event::DisplayMath(_) => {
                self.append(Node::unsupported("math", vec![]))
            }
            Event::FootnoteReference(_) => {
                self.append(Node::unsupported("footnote_reference", vec![]))
            }
            _ => self.append(Node::unsupported("other", vec![])),
        }
    }

    fn open(&mut self, tag: Tag<'_>) {
        let frame = match tag {
            Tag::Paragraph => Frame::Container(Node::paragraph(vec![])),
            Tag::Heading { level, .. } => Frame::Container(Node::heading(level as u8, vec![])),
            Tag::List(Some(start)) => Frame::Container(Node::ordered_list_from(start, vec![])),
            Tag::List(None) => Frame::Container(Node::list(vec![])),
            Tag::Item => Frame::Container(Node::list_item(vec![])),
            Tag::Emphasis => Frame::Container(Node::emphasis(vec![])),
            Tag::Strong => Frame::Container(Node::strong(vec![])),
            Tag::CodeBlock(CodeBlockKind::Fenced(_)) => Frame::Code(String::new()),
            Tag::CodeBlock(CodeBlockKind::Indented) => Frame::Opaque("indented_code"),
            Tag::HtmlBlock => Frame::Opaque("html"),
            Tag::Link {
                link_type: LinkType::Autolink | LinkType::Email,
                ..
            } => Frame::Opaque("autolink"),
            other => Frame::Container(Node::unsupported(unsupported_kind(&other), vec![])),
        };
        self.stack.push(frame);
    }

    fn close(&mut self) {
        let Some(frame) = self.stack.pop() else {
            return;
        };
        let node = match frame {
            Frame::Container(node) => node,
            Frame::Code(content) => Node::fenced_code(content.split_inclusive('\n')),
            Frame::Opaque(kind) => Node::unsupported(kind, vec![]),
        };
        self.append(node);
    }

    fn append(&mut self, node: Node) {
        match self.stack.last_mut() {
            Some(Frame::Container(parent)) => {
                if let Some(children) = parent.children_mut() {
                    children.push(node);
                }
            }
            Some(Frame::Code(_) | Frame::Opaque(_)) => {}
            None => self.root.push(node),
        }
    }

    /// Attach a line break to the text run it follows
    fn line_break(&mut self) {
        let last = match self.stack.last_mut() {
            Some(Frame::Container(parent)) => {
                parent.children_mut().and_then(|children| children.last_mut())
            }
            Some(Frame::Code(_) | Frame::Opaque(_)) => return,
            None => self.root.last_mut(),
        };
        let attached = match last {
            Some(Node::Text(text)) if !text.soft_break => {
                text.soft_break = true;
                true
            }
            _ => false,
        };
        if !attached {
            self.append(Node::text_line(""));
        }
    }

    fn finish(mut self) -> Root {
        while !self.stack.is_empty() {
            self.close();
        }
        Root::new(self.root)
    }
}

/// Source slice of a text event.
///
/// An escaped character starts its own run right after the backslash, so
/// the backslash is taken back in. Runs with no source span of their own
/// fall back to the decoded text.
fn source_text<'a>(source: &'a str, range: Range<usize>, decoded: &'a str) -> &'a str {
    let bytes = source.as_bytes();
    let mut start = range.start;
    if start > 0
        && bytes[start - 1] == b'\\'
        && bytes.get(start).is_some_and(u8::is_ascii_punctuation)
    {
        start -= 1;
    }
    match source.get(start..range.end) {
        Some(raw) if !raw.is_empty() => raw,
        _ => decoded,
    }
}

fn unsupported_kind(tag: &Tag<'_>) -> &'static str {
    match tag {
        Tag::BlockQuote(_) => "blockquote",
        Tag::Link { .. } => "link",
        Tag::Image { .. } => "image",
        Tag::Table(_) | Tag::TableHead | Tag::TableRow | Tag::TableCell => "table",
        Tag::FootnoteDefinition(_) => "footnote_definition",
        Tag::Strikethrough => "strikethrough",
        Tag::MetadataBlock(_) => "metadata",
        _ => "other",
    }
}
