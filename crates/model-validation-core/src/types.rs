use serde::{Deserialize, Serialize};

use crate::error::ModelValidationError;
use crate::ModelValidationResult;

/// A single scored observation (predicted probability, actual 0/1 outcome).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Observation {
    /// Model-predicted probability of the positive class.
    pub predicted: f64,
    /// Actual outcome: 0 = negative, 1 = positive.
    pub actual: u8,
}

impl Observation {
    pub fn new(predicted: f64, actual: u8) -> Self {
        Observation { predicted, actual }
    }
}

/// Validate an observation slice: non-empty, outcomes in {0, 1},
/// probabilities finite and in [0, 1].
pub fn validate_observations(observations: &[Observation]) -> ModelValidationResult<()> {
    if observations.is_empty() {
        return Err(ModelValidationError::InsufficientData(
            "At least one observation is required.".into(),
        ));
    }
    for o in observations {
        if o.actual > 1 {
            return Err(ModelValidationError::InvalidInput {
                field: "actual".into(),
                reason: "Actual outcome must be 0 or 1.".into(),
            });
        }
        if !o.predicted.is_finite() || !(0.0..=1.0).contains(&o.predicted) {
            return Err(ModelValidationError::InvalidInput {
                field: "predicted".into(),
                reason: "Predicted probability must be finite and in [0, 1].".into(),
            });
        }
    }
    Ok(())
}
