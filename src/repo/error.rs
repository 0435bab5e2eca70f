use std::path::PathBuf;

use thiserror::Error;

use crate::config;

/// Describes the potential error conditions that might arise while opening,
/// validating, or initializing a `Repository`.
#[derive(Debug, Error)]
pub enum Error {
    #[error("not a repository (no control directory at {0})")]
    NotARepository(PathBuf),

    #[error("configuration file missing at {0}")]
    ConfigurationMissing(PathBuf),

    #[error("configuration file {path} could not be read: {source}")]
    ConfigurationUnreadable {
        path: PathBuf,
        #[source]
        source: config::Error,
    },

    #[error("configuration file {path} could not be written: {source}")]
    ConfigurationUnwritable {
        path: PathBuf,
        #[source]
        source: config::Error,
    },

    #[error("unsupported repositoryformatversion {}", .0.as_deref().unwrap_or("(missing)"))]
    UnsupportedFormatVersion(Option<String>),

    #[error("{0} exists but is not a directory")]
    PathConflict(PathBuf),

    #[error("{0} does not exist")]
    PathMissing(PathBuf),

    #[error("{0} is not a directory")]
    NotADirectory(PathBuf),

    #[error("{0} is not empty")]
    DirectoryNotEmpty(PathBuf),

    #[error("no file name given")]
    EmptyFilePath,

    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

/// A specialized `Result` type for `Repository` operations.
pub type Result<T> = std::result::Result<T, Error>;
