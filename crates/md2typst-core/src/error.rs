//! Error types

use thiserror::Error;

use crate::frontmatter::FrontmatterError;

/// Conversion errors
#[derive(Debug, Error)]
pub enum Error {
    #[error("error parsing frontmatter: {0}")]
    Frontmatter(#[from] FrontmatterError),
    #[error("error writing output: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
