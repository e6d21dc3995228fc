//! Error types for rulegen-rule

use std::path::PathBuf;

/// Result type for rulegen-rule operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading or editing build files
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse build file: {message}")]
    Parse { message: String },

    #[error("Malformed rule #{index}: {message}")]
    MalformedRule { index: usize, message: String },

    #[error("`rule` must be an array of tables")]
    NotARuleList,
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    pub fn malformed(index: usize, message: impl Into<String>) -> Self {
        Self::MalformedRule {
            index,
            message: message.into(),
        }
    }
}
