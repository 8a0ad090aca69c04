//! ROC curve and AUC via trapezoidal integration.
//!
//! Observations are swept in descending order of predicted probability;
//! tied probabilities advance the sweep together, which makes the result
//! independent of the input order of ties.

use serde::{Deserialize, Serialize};

use crate::types::{validate_observations, Observation};
use crate::ModelValidationResult;

/// Input for the ROC computation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RocInput {
    pub observations: Vec<Observation>,
}

/// One point of the ROC curve: the rates obtained by classifying positive
/// at `predicted >= threshold`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RocPoint {
    pub threshold: f64,
    pub false_positive_rate: f64,
    pub true_positive_rate: f64,
}

/// Output of the ROC computation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RocOutput {
    /// Area under the curve. 0.5 when either class is absent.
    pub auc: f64,
    /// `2 * auc - 1`.
    pub gini: f64,
    /// Curve points at each distinct predicted probability, descending in
    /// threshold; the implicit origin (0, 0) is not emitted.
    pub points: Vec<RocPoint>,
}

/// Compute the ROC curve and its area.
pub fn calculate_roc(input: &RocInput) -> ModelValidationResult<RocOutput> {
    validate_observations(&input.observations)?;

    let total_positive = input.observations.iter().filter(|o| o.actual == 1).count() as u32;
    let total_negative = input.observations.len() as u32 - total_positive;

    // A single-class sample carries no discrimination signal.
    if total_positive == 0 || total_negative == 0 {
        return Ok(RocOutput {
            auc: 0.5,
            gini: 0.0,
            points: Vec::new(),
        });
    }

    let mut scored: Vec<(f64, u8)> = input
        .observations
        .iter()
        .map(|o| (o.predicted, o.actual))
        .collect();
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));

    let mut auc = 0.0;
    let mut true_positive = 0u32;
    let mut false_positive = 0u32;
    let mut prev_tpr = 0.0;
    let mut prev_fpr = 0.0;
    let mut points = Vec::new();

    let mut i = 0usize;
    while i < scored.len() {
        let threshold = scored[i].0;
        while i < scored.len() && scored[i].0 == threshold {
            if scored[i].1 == 1 {
                true_positive += 1;
            } else {
                false_positive += 1;
            }
            i += 1;
        }
        let tpr = f64::from(true_positive) / f64::from(total_positive);
        let fpr = f64::from(false_positive) / f64::from(total_negative);
        auc += (fpr - prev_fpr) * (tpr + prev_tpr) / 2.0;
        points.push(RocPoint {
            threshold,
            false_positive_rate: fpr,
            true_positive_rate: tpr,
        });
        prev_tpr = tpr;
        prev_fpr = fpr;
    }

    Ok(RocOutput {
        auc,
        gini: 2.0 * auc - 1.0,
        points,
    })
}
