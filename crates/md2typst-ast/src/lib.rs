//! md2typst-ast: body tree types for md2typst
//!
//! This crate provides:
//! - The node tree a Markdown body is parsed into
//! - A pre-order enter/exit traversal over that tree
//!
//! ## Example
//!
//! ```rust
//! use md2typst_ast::{Node, Root, Visit, walk};
//!
//! let doc = Root::new(vec![
//!     Node::heading(1, vec![Node::text("Hello")]),
//!     Node::paragraph(vec![Node::text("World")]),
//! ]);
//!
//! let mut entered = 0;
//! walk(&doc, |_, visit| {
//!     if visit == Visit::Enter {
//!         entered += 1;
//!     }
//!     Ok::<(), std::convert::Infallible>(())
//! })
//! .unwrap();
//! assert_eq!(entered, 4);
//! ```

pub mod ast;
pub mod walk;

pub use ast::{
    CodeSpan, Emphasis, FencedCodeBlock, Heading, List, ListItem, Node, Paragraph, Root, Text,
    Unsupported,
};
pub use walk::{Visit, walk};
