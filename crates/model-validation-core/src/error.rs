use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelValidationError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Degenerate grouping: {0}")]
    DegenerateGrouping(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for ModelValidationError {
    fn from(e: serde_json::Error) -> Self {
        ModelValidationError::SerializationError(e.to_string())
    }
}
