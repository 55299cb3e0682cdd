//! # Quote Store Errors

use thiserror::Error;

/// Result type for quote store operations
pub type QuoteResult<T> = Result<T, QuoteError>;

/// Quote store errors
#[derive(Debug, Clone, Error)]
pub enum QuoteError {
    // Validation errors
    #[error("quote text is required")]
    EmptyText,

    // Persistence errors
    #[error("Corrupt quote file: {0}")]
    Corrupt(String),

    #[error("I/O error: {0}")]
    Io(String),

    // Id space
    #[error("No quote ids left to assign")]
    IdsExhausted,
}

impl QuoteError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            QuoteError::EmptyText => 400,
            QuoteError::Corrupt(_) => 500,
            QuoteError::Io(_) => 500,
            QuoteError::IdsExhausted => 500,
        }
    }
}

impl From<std::io::Error> for QuoteError {
    fn from(e: std::io::Error) -> Self {
        QuoteError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for QuoteError {
    fn from(e: serde_json::Error) -> Self {
        if e.is_io() {
            QuoteError::Io(e.to_string())
        } else {
            QuoteError::Corrupt(e.to_string())
        }
    }
}
