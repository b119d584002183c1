//! Feeding engine error types

use thiserror::Error;

/// Feeding calculation error types
#[derive(Debug, Error)]
pub enum FeedingError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unknown {field} '{value}'")]
    InvalidEnum { field: &'static str, value: String },

    #[error("Invalid product {product_id}: {reason}")]
    InvalidProduct { product_id: i64, reason: String },

    #[error("Feeding tables error: {0}")]
    Config(String),

    #[error("Feeding tables file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Feeding tables parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result type for feeding calculations
pub type FeedingResult<T> = Result<T, FeedingError>;
