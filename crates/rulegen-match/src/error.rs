//! Error types for rulegen-match

/// Result type for rulegen-match operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while compiling patterns
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid glob pattern {pattern:?}: {message}")]
    InvalidGlob { pattern: String, message: String },
}

impl Error {
    pub fn invalid_glob(pattern: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::InvalidGlob {
            pattern: pattern.into(),
            message: err.to_string(),
        }
    }
}
