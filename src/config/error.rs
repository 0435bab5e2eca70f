use thiserror::Error;

/// Describes the potential error conditions that might arise while loading
/// or saving a repository configuration file.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    #[error("line {line}: key/value pair appears before any section header")]
    MissingSection { line: usize },

    #[error("line {line}: malformed section header")]
    BadSectionHeader { line: usize },

    #[error("line {line}: invalid key {key:?}")]
    BadKey { line: usize, key: String },

    #[error("line {line}: unsupported escape sequence in value")]
    BadEscape { line: usize },

    #[error("line {line}: unterminated quoted value")]
    UnterminatedQuote { line: usize },

    #[error(transparent)]
    OtherError(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// A specialized `Result` type for configuration operations.
pub type Result<T> = std::result::Result<T, Error>;
