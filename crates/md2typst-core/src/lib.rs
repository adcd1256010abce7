//! md2typst-core: Core library for converting Markdown to Typst
//!
//! This crate provides:
//! - YAML frontmatter splitting and decoding
//! - Markdown body parsing into an [`md2typst_ast::Root`]
//! - Typst preamble and body writer
//! - The `convert` pipeline tying them together
//!
//! # Example
//!
//! ```
//! use md2typst_core::{ConvertOptions, convert_to_string};
//!
//! let input = b"---\ntitle: Report\n---\n# Hi\n\nWorld\n";
//! let typst = convert_to_string(input, &ConvertOptions::default()).unwrap();
//! assert!(typst.contains("#heading(level: 1)[Hi]"));
//! ```

pub mod convert;
pub mod error;
pub mod frontmatter;
pub mod parser;
pub mod writer;

pub use convert::{ConvertOptions, convert, convert_to_string};
pub use error::{Error, Result};
pub use frontmatter::{
    Frontmatter, FrontmatterError, decode_frontmatter, parse_frontmatter, split_frontmatter,
};
pub use md2typst_ast::{Node, Root};
pub use parser::parse_body;
pub use writer::{PageSetup, escape_string, write_body, write_preamble};
