pub mod error;
pub mod types;

#[cfg(feature = "goodness_of_fit")]
pub mod goodness_of_fit;

#[cfg(feature = "classification")]
pub mod classification;

#[cfg(feature = "selection")]
pub mod selection;

pub use error::ModelValidationError;
pub use types::*;

/// Standard result type for all model-validation operations
pub type ModelValidationResult<T> = Result<T, ModelValidationError>;
