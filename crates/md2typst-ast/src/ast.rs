//! Markdown body tree types
//!
//! The subset of node kinds the Typst writer knows how to render, plus an
//! `Unsupported` kind that carries everything else the parser produces.

use serde::{Deserialize, Serialize};

/// Root node of a parsed body (the implicit document node)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Root {
    pub children: Vec<Node>,
}

/// A body node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Node {
    // Block nodes
    Heading(Heading),
    Paragraph(Paragraph),
    List(List),
    ListItem(ListItem),
    ThematicBreak,
    FencedCodeBlock(FencedCodeBlock),

    // Inline nodes
    Text(Text),
    Emphasis(Emphasis),
    CodeSpan(CodeSpan),

    // Anything without a Typst mapping (links, images, block quotes, HTML...)
    Unsupported(Unsupported),
}

/// Heading node (# to ######)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Heading {
    pub level: u8,
    pub children: Vec<Node>,
}

/// Paragraph node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    pub children: Vec<Node>,
}

/// List node
///
/// `ordered` and `start` describe the source list; the writer renders
/// every list with the same bullet marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct List {
    pub ordered: bool,
    pub start: Option<u64>,
    pub children: Vec<Node>,
}

/// List item node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListItem {
    pub children: Vec<Node>,
}

/// Fenced code block, one entry per source line (terminators included)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FencedCodeBlock {
    pub lines: Vec<String>,
}

/// Text run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    pub value: String,
    /// The run is followed by a line break inside the same paragraph
    #[serde(default)]
    pub soft_break: bool,
}

/// Emphasis node: `*text*` or, when `strong`, `**text**`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Emphasis {
    pub strong: bool,
    pub children: Vec<Node>,
}

/// Inline code span (`code`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeSpan {
    pub value: String,
}

/// A construct the writer has no directive for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unsupported {
    /// Name of the source construct, e.g. "link" or "html"
    pub kind: String,
    pub children: Vec<Node>,
}

// Convenience constructors
impl Node {
    pub fn text(s: impl Into<String>) -> Self {
        Node::Text(Text {
            value: s.into(),
            soft_break: false,
        })
    }

    /// Text run followed by a soft line break
    pub fn text_line(s: impl Into<String>) -> Self {
        Node::Text(Text {
            value: s.into(),
            soft_break: true,
        })
    }

    pub fn paragraph(children: Vec<Node>) -> Self {
        Node::Paragraph(Paragraph { children })
    }

    pub fn heading(level: u8, children: Vec<Node>) -> Self {
        Node::Heading(Heading { level, children })
    }

    pub fn list(children: Vec<Node>) -> Self {
        Node::List(List {
            ordered: false,
            start: None,
            children,
        })
    }

    pub fn ordered_list_from(start: u64, children: Vec<Node>) -> Self {
        Node::List(List {
            ordered: true,
            start: Some(start),
            children,
        })
    }

    pub fn list_item(children: Vec<Node>) -> Self {
        Node::ListItem(ListItem { children })
    }

    pub fn emphasis(children: Vec<Node>) -> Self {
        Node::Emphasis(Emphasis {
            strong: false,
            children,
        })
    }

    pub fn strong(children: Vec<Node>) -> Self {
        Node::Emphasis(Emphasis {
            strong: true,
            children,
        })
    }

    pub fn code_span(value: impl Into<String>) -> Self {
        Node::CodeSpan(CodeSpan {
            value: value.into(),
        })
    }

    pub fn fenced_code<S: Into<String>>(lines: impl IntoIterator<Item = S>) -> Self {
        Node::FencedCodeBlock(FencedCodeBlock {
            lines: lines.into_iter().map(Into::into).collect(),
        })
    }

    pub fn thematic_break() -> Self {
        Node::ThematicBreak
    }

    pub fn unsupported(kind: impl Into<String>, children: Vec<Node>) -> Self {
        Node::Unsupported(Unsupported {
            kind: kind.into(),
            children,
        })
    }

    /// Child nodes in document order; empty for leaf kinds
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Heading(h) => &h.children,
            Node::Paragraph(p) => &p.children,
            Node::List(l) => &l.children,
            Node::ListItem(li) => &li.children,
            Node::Emphasis(e) => &e.children,
            Node::Unsupported(u) => &u.children,
            Node::ThematicBreak | Node::FencedCodeBlock(_) | Node::Text(_) | Node::CodeSpan(_) => {
                &[]
            }
        }
    }

    /// Mutable access to the child list of container kinds
    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Heading(h) => Some(&mut h.children),
            Node::Paragraph(p) => Some(&mut p.children),
            Node::List(l) => Some(&mut l.children),
            Node::ListItem(li) => Some(&mut li.children),
            Node::Emphasis(e) => Some(&mut e.children),
            Node::Unsupported(u) => Some(&mut u.children),
            Node::ThematicBreak | Node::FencedCodeBlock(_) | Node::Text(_) | Node::CodeSpan(_) => {
                None
            }
        }
    }
}

impl Root {
    pub fn new(children: Vec<Node>) -> Self {
        Self { children }
    }
}

/// Frees the tree with an explicit stack so nesting depth is not bounded
/// by the call stack.
impl Drop for Root {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            if let Some(children) = node.children_mut() {
                pending.append(children);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_constructors() {
        let text = Node::text("hello");
        assert!(matches!(text, Node::Text(Text { value, soft_break: false }) if value == "hello"));

        let line = Node::text_line("hello");
        assert!(matches!(line, Node::Text(Text { soft_break: true, .. })));

        let heading = Node::heading(2, vec![Node::text("Title")]);
        assert!(matches!(heading, Node::Heading(Heading { level: 2, .. })));

        let para = Node::paragraph(vec![Node::text("content")]);
        assert!(matches!(para, Node::Paragraph(_)));
    }

    #[test]
    fn test_emphasis_constructors() {
        assert!(matches!(
            Node::emphasis(vec![]),
            Node::Emphasis(Emphasis { strong: false, .. })
        ));
        assert!(matches!(
            Node::strong(vec![]),
            Node::Emphasis(Emphasis { strong: true, .. })
        ));
    }

    #[test]
    fn test_list_constructors() {
        let unordered = Node::list(vec![Node::list_item(vec![Node::text("item")])]);
        if let Node::List(l) = unordered {
            assert!(!l.ordered);
            assert_eq!(l.start, None);
        } else {
            panic!("Expected List node");
        }

        let ordered = Node::ordered_list_from(5, vec![Node::list_item(vec![Node::text("item")])]);
        if let Node::List(l) = ordered {
            assert!(l.ordered);
            assert_eq!(l.start, Some(5));
        } else {
            panic!("Expected List node");
        }
    }

    #[test]
    fn test_fenced_code_constructor() {
        let code = Node::fenced_code(["fn main() {}\n"]);
        if let Node::FencedCodeBlock(c) = code {
            assert_eq!(c.lines, vec!["fn main() {}\n".to_string()]);
        } else {
            panic!("Expected FencedCodeBlock node");
        }
    }

    #[test]
    fn test_leaf_kinds_have_no_children() {
        for leaf in [
            Node::text("x"),
            Node::code_span("x"),
            Node::thematic_break(),
            Node::fenced_code(["x\n"]),
        ] {
            assert!(leaf.children().is_empty());
        }

        let mut text = Node::text("x");
        assert!(text.children_mut().is_none());
    }

    #[test]
    fn test_unsupported_keeps_children() {
        let mut link = Node::unsupported("link", vec![Node::text("here")]);
        assert_eq!(link.children().len(), 1);

        link.children_mut().unwrap().push(Node::text(" too"));
        assert_eq!(link.children().len(), 2);
    }

    #[test]
    fn test_serde_roundtrip() {
        let root = Root::new(vec![
            Node::heading(1, vec![Node::text("Title")]),
            Node::paragraph(vec![
                Node::text_line("Hello "),
                Node::emphasis(vec![Node::text("world")]),
            ]),
            Node::thematic_break(),
        ]);

        let json = serde_json::to_string(&root).unwrap();
        let parsed: Root = serde_json::from_str(&json).unwrap();
        assert_eq!(root, parsed);
    }

    #[test]
    fn test_drop_deep_tree() {
        let mut node = Node::text("leaf");
        for _ in 0..200_000 {
            node = Node::unsupported("blockquote", vec![Node::paragraph(vec![node])]);
        }
        drop(Root::new(vec![node]));
    }

    #[test]
    fn test_serde_tagging() {
        let json = serde_json::to_value(Node::code_span("x")).unwrap();
        assert_eq!(json["type"], "codeSpan");
        assert_eq!(json["value"], "x");
    }
}
