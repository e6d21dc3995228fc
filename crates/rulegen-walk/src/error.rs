//! Error types for rulegen-walk

use std::path::PathBuf;

/// Result type for rulegen-walk operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while configuring or walking a repository
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} exists but couldn't be read: {source}")]
    IgnoreFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("visitor failed in {dir:?}: {message}")]
    Visit { dir: String, message: String },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn visit(dir: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Self::Visit {
            dir: dir.into(),
            message: message.to_string(),
        }
    }
}
