//! Backward stepwise elimination over an external model-fitting seam.
//!
//! The procedure owns the elimination *policy* only. Each candidate model is
//! fitted by a caller-supplied closure that returns a [`FitSummary`]; no
//! parameter estimation happens here. One round drops the unprotected
//! feature with the highest p-value, and the criterion decides whether the
//! round stands: under [`EliminationCriterion::PValue`] the feature must
//! exceed `alpha`, under [`EliminationCriterion::Bic`] the refit BIC must
//! not increase.

use serde::{Deserialize, Serialize};

use crate::error::ModelValidationError;
use crate::ModelValidationResult;

/// Summary of one fitted model, produced by the caller's fitter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitSummary {
    /// Bayesian information criterion of the fit (lower is better).
    pub bic: f64,
    /// Per-feature p-values, aligned with the feature order given to the
    /// fitter.
    pub p_values: Vec<f64>,
}

/// Stopping rule for the elimination loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EliminationCriterion {
    /// Keep dropping the weakest feature while the refit BIC does not
    /// increase.
    Bic,
    /// Drop features whose p-value exceeds `alpha`.
    PValue { alpha: f64 },
}

/// Elimination policy: criterion plus guard rails.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EliminationPolicy {
    pub criterion: EliminationCriterion,
    /// Features that are never dropped (typically the intercept column).
    #[serde(default)]
    pub protected: Vec<String>,
    /// Upper bound on elimination rounds. Defaults to the feature count.
    #[serde(default)]
    pub max_steps: Option<u32>,
}

/// One accepted elimination round.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EliminationStep {
    pub dropped: String,
    /// p-value of the dropped feature in the model it was dropped from.
    pub p_value: f64,
    /// BIC of the refit without the dropped feature.
    pub bic: f64,
    pub remaining: Vec<String>,
}

/// Output of the elimination procedure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EliminationOutput {
    pub steps: Vec<EliminationStep>,
    pub selected: Vec<String>,
    pub final_bic: f64,
}

fn check_summary(summary: &FitSummary, features: &[String]) -> ModelValidationResult<()> {
    if summary.p_values.len() != features.len() {
        return Err(ModelValidationError::InvalidInput {
            field: "p_values".into(),
            reason: format!(
                "Fitter returned {} p-values for {} features.",
                summary.p_values.len(),
                features.len()
            ),
        });
    }
    if summary.p_values.iter().any(|p| !p.is_finite()) {
        return Err(ModelValidationError::InvalidInput {
            field: "p_values".into(),
            reason: "Fitter returned a non-finite p-value.".into(),
        });
    }
    Ok(())
}

/// Run backward elimination from the full feature set.
pub fn backward_eliminate<F>(
    features: &[String],
    policy: &EliminationPolicy,
    mut fit: F,
) -> ModelValidationResult<EliminationOutput>
where
    F: FnMut(&[String]) -> ModelValidationResult<FitSummary>,
{
    if features.is_empty() {
        return Err(ModelValidationError::InsufficientData(
            "At least one feature is required.".into(),
        ));
    }
    if let EliminationCriterion::PValue { alpha } = policy.criterion {
        if !alpha.is_finite() || !(0.0..=1.0).contains(&alpha) {
            return Err(ModelValidationError::InvalidInput {
                field: "alpha".into(),
                reason: "Significance level must be finite and in [0, 1].".into(),
            });
        }
    }

    let mut current: Vec<String> = features.to_vec();
    let mut summary = fit(&current)?;
    check_summary(&summary, &current)?;

    let max_steps = policy.max_steps.unwrap_or(features.len() as u32);
    let mut steps = Vec::new();

    while (steps.len() as u32) < max_steps && current.len() > 1 {
        let weakest = current
            .iter()
            .enumerate()
            .filter(|&(_, f)| !policy.protected.contains(f))
            .max_by(|a, b| summary.p_values[a.0].total_cmp(&summary.p_values[b.0]));
        let Some((index, _)) = weakest else {
            break;
        };
        let p_value = summary.p_values[index];

        if let EliminationCriterion::PValue { alpha } = policy.criterion {
            if p_value <= alpha {
                break;
            }
        }

        let mut reduced = current.clone();
        let dropped = reduced.remove(index);
        let refit = fit(&reduced)?;
        check_summary(&refit, &reduced)?;

        if let EliminationCriterion::Bic = policy.criterion {
            if refit.bic > summary.bic {
                break;
            }
        }

        steps.push(EliminationStep {
            dropped,
            p_value,
            bic: refit.bic,
            remaining: reduced.clone(),
        });
        current = reduced;
        summary = refit;
    }

    Ok(EliminationOutput {
        steps,
        selected: current,
        final_bic: summary.bic,
    })
}
