//! Confusion matrix and per-class precision/recall/F1 report.
//!
//! Observations are classified positive when the predicted probability
//! reaches the threshold. Ratios with a zero denominator report 0.0, the
//! convention of the usual machine-learning report tooling.

use serde::{Deserialize, Serialize};

use crate::error::ModelValidationError;
use crate::types::{validate_observations, Observation};
use crate::ModelValidationResult;

/// Input for the classification report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationInput {
    pub observations: Vec<Observation>,
    /// Decision threshold: predicted class is 1 iff `predicted >= threshold`.
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

fn default_threshold() -> f64 {
    0.5
}

/// 2x2 contingency table of predicted vs actual classes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    pub true_positive: u32,
    pub false_positive: u32,
    pub true_negative: u32,
    pub false_negative: u32,
}

/// Precision/recall/F1 for one class (or an average row).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
    /// Number of observations whose actual class this row describes
    /// (total count for the average rows).
    pub support: u32,
}

/// Output of the classification report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationReport {
    pub accuracy: f64,
    pub confusion: ConfusionMatrix,
    /// Metrics treating class 0 as the class of interest.
    pub negative: ClassMetrics,
    /// Metrics treating class 1 as the class of interest.
    pub positive: ClassMetrics,
    /// Unweighted mean of the per-class rows.
    pub macro_avg: ClassMetrics,
    /// Support-weighted mean of the per-class rows.
    pub weighted_avg: ClassMetrics,
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

fn f1(precision: f64, recall: f64) -> f64 {
    ratio(2.0 * precision * recall, precision + recall)
}

/// Build the classification report at the input threshold.
pub fn calculate_classification_report(
    input: &ClassificationInput,
) -> ModelValidationResult<ClassificationReport> {
    validate_observations(&input.observations)?;
    if !input.threshold.is_finite() || !(0.0..=1.0).contains(&input.threshold) {
        return Err(ModelValidationError::InvalidInput {
            field: "threshold".into(),
            reason: "Decision threshold must be finite and in [0, 1].".into(),
        });
    }

    let mut confusion = ConfusionMatrix {
        true_positive: 0,
        false_positive: 0,
        true_negative: 0,
        false_negative: 0,
    };
    for o in &input.observations {
        let predicted_positive = o.predicted >= input.threshold;
        match (predicted_positive, o.actual == 1) {
            (true, true) => confusion.true_positive += 1,
            (true, false) => confusion.false_positive += 1,
            (false, false) => confusion.true_negative += 1,
            (false, true) => confusion.false_negative += 1,
        }
    }

    let n = input.observations.len() as f64;
    let tp = f64::from(confusion.true_positive);
    let fp = f64::from(confusion.false_positive);
    let tn = f64::from(confusion.true_negative);
    let fn_ = f64::from(confusion.false_negative);

    let accuracy = (tp + tn) / n;

    let positive = {
        let precision = ratio(tp, tp + fp);
        let recall = ratio(tp, tp + fn_);
        ClassMetrics {
            precision,
            recall,
            f1_score: f1(precision, recall),
            support: confusion.true_positive + confusion.false_negative,
        }
    };
    let negative = {
        let precision = ratio(tn, tn + fn_);
        let recall = ratio(tn, tn + fp);
        ClassMetrics {
            precision,
            recall,
            f1_score: f1(precision, recall),
            support: confusion.true_negative + confusion.false_positive,
        }
    };

    let total = positive.support + negative.support;
    let macro_avg = ClassMetrics {
        precision: (positive.precision + negative.precision) / 2.0,
        recall: (positive.recall + negative.recall) / 2.0,
        f1_score: (positive.f1_score + negative.f1_score) / 2.0,
        support: total,
    };
    let weight = |pos: f64, neg: f64| {
        ratio(
            pos * f64::from(positive.support) + neg * f64::from(negative.support),
            f64::from(total),
        )
    };
    let weighted_avg = ClassMetrics {
        precision: weight(positive.precision, negative.precision),
        recall: weight(positive.recall, negative.recall),
        f1_score: weight(positive.f1_score, negative.f1_score),
        support: total,
    };

    Ok(ClassificationReport {
        accuracy,
        confusion,
        negative,
        positive,
        macro_avg,
        weighted_avg,
    })
}
