//! Hosmer-Lemeshow goodness-of-fit test for binary classifier calibration.
//!
//! Partitions observations into equal-frequency groups of predicted
//! probability, compares the observed outcome counts in each group against
//! the probability mass the model assigned to it, and scores the total
//! discrepancy against a chi-square distribution with `num_groups - 2`
//! degrees of freedom. A small p-value indicates miscalibration.
//!
//! Grouping is by *value*: cut points are interpolated quantiles of the
//! predicted probabilities (see [`super::quantile`]), and every observation
//! is assigned by which interval its probability falls into. Observations
//! with identical probabilities therefore always share a group, even when
//! that makes group sizes unequal.

use serde::{Deserialize, Serialize};
use statrs::distribution::{ChiSquared, ContinuousCDF};

use crate::error::ModelValidationError;
use crate::types::{validate_observations, Observation};
use crate::ModelValidationResult;

use super::quantile::quantile_cut_points;

/// Which outcome classes contribute terms to the chi-square sum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatisticVariant {
    /// Textbook Hosmer-Lemeshow: one term per class per group.
    #[default]
    BothClasses,
    /// Negative-class terms only. Kept for compatibility with older
    /// decile-of-risk reports that summed a single class.
    NegativeClassOnly,
}

/// Input for the Hosmer-Lemeshow test.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HosmerLemeshowInput {
    /// Scored observations, one per subject, in dataset row order.
    pub observations: Vec<Observation>,
    /// Number of equal-frequency groups (at least 3; conventionally 10).
    #[serde(default = "default_num_groups")]
    pub num_groups: u32,
    /// Chi-square variant.
    #[serde(default)]
    pub statistic: StatisticVariant,
}

fn default_num_groups() -> u32 {
    10
}

/// One probability band of the decile-of-risk table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuantileGroup {
    /// Lower edge of the band (the sample minimum for the first band;
    /// exclusive otherwise).
    pub lower: f64,
    /// Inclusive upper edge of the band.
    pub upper: f64,
    /// Observations in the band.
    pub n: u32,
    pub observed_positive: u32,
    pub observed_negative: u32,
    /// Sum of predicted probabilities in the band (a mass, not a count).
    pub expected_positive: f64,
    /// `n - expected_positive`.
    pub expected_negative: f64,
}

/// Output of the Hosmer-Lemeshow test.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HosmerLemeshowOutput {
    pub chi_square: f64,
    pub p_value: f64,
    pub degrees_of_freedom: u32,
    /// Per-group diagnostic table, ascending in predicted probability.
    pub groups: Vec<QuantileGroup>,
}

/// Run the Hosmer-Lemeshow test.
///
/// Pure and deterministic: identical input produces identical output, and
/// the input is never mutated.
pub fn calculate_hosmer_lemeshow(
    input: &HosmerLemeshowInput,
) -> ModelValidationResult<HosmerLemeshowOutput> {
    validate_observations(&input.observations)?;
    if input.num_groups < 3 {
        return Err(ModelValidationError::InvalidInput {
            field: "num_groups".into(),
            reason: "At least 3 groups are required for num_groups - 2 degrees of freedom.".into(),
        });
    }
    let n = input.observations.len();
    if input.num_groups as usize > n {
        return Err(ModelValidationError::DegenerateGrouping(format!(
            "{} groups requested for {} observations",
            input.num_groups, n
        )));
    }

    let mut sorted: Vec<f64> = input.observations.iter().map(|o| o.predicted).collect();
    sorted.sort_by(f64::total_cmp);
    let cuts = quantile_cut_points(&sorted, input.num_groups)?;

    let num_groups = input.num_groups as usize;
    let mut counts = vec![0u32; num_groups];
    let mut positives = vec![0u32; num_groups];
    let mut masses = vec![0f64; num_groups];

    for o in &input.observations {
        // Interior boundaries are right-closed, so a probability equal to a
        // cut point belongs to the band below it.
        let g = cuts.partition_point(|c| *c < o.predicted);
        counts[g] += 1;
        positives[g] += u32::from(o.actual);
        masses[g] += o.predicted;
    }

    let mut chi_square = 0.0;
    let mut groups = Vec::with_capacity(num_groups);
    for g in 0..num_groups {
        let band_n = counts[g];
        if band_n == 0 {
            return Err(ModelValidationError::DegenerateGrouping(format!(
                "group {} of {} is empty",
                g + 1,
                num_groups
            )));
        }
        let observed_positive = positives[g];
        let observed_negative = band_n - observed_positive;
        let expected_positive = masses[g];
        let expected_negative = f64::from(band_n) - expected_positive;

        if expected_negative <= 0.0 {
            return Err(ModelValidationError::DegenerateGrouping(format!(
                "group {} has zero expected negatives; its chi-square term is undefined",
                g + 1
            )));
        }
        let neg_diff = f64::from(observed_negative) - expected_negative;
        let mut term = neg_diff * neg_diff / expected_negative;

        if input.statistic == StatisticVariant::BothClasses {
            if expected_positive <= 0.0 {
                return Err(ModelValidationError::DegenerateGrouping(format!(
                    "group {} has zero expected positives; its chi-square term is undefined",
                    g + 1
                )));
            }
            let pos_diff = f64::from(observed_positive) - expected_positive;
            term += pos_diff * pos_diff / expected_positive;
        }
        chi_square += term;

        groups.push(QuantileGroup {
            lower: if g == 0 { sorted[0] } else { cuts[g - 1] },
            upper: if g == num_groups - 1 { sorted[n - 1] } else { cuts[g] },
            n: band_n,
            observed_positive,
            observed_negative,
            expected_positive,
            expected_negative,
        });
    }

    let degrees_of_freedom = input.num_groups - 2;
    let distribution =
        ChiSquared::new(f64::from(degrees_of_freedom)).map_err(|e| {
            ModelValidationError::InvalidInput {
                field: "num_groups".into(),
                reason: e.to_string(),
            }
        })?;
    // Right-tail survival function: P(X > chi_square).
    let p_value = distribution.sf(chi_square);

    Ok(HosmerLemeshowOutput {
        chi_square,
        p_value,
        degrees_of_freedom,
        groups,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spread_observations(n: usize, positives: usize) -> Vec<Observation> {
        // Distinct probabilities spread over (0, 1); the highest-ranked
        // `positives` observations get the positive label.
        (0..n)
            .map(|i| {
                let p = (i as f64 + 0.5) / n as f64;
                Observation::new(p, u8::from(i >= n - positives))
            })
            .collect()
    }

    fn base_input() -> HosmerLemeshowInput {
        HosmerLemeshowInput {
            observations: spread_observations(100, 60),
            num_groups: 10,
            statistic: StatisticVariant::BothClasses,
        }
    }

    #[test]
    fn test_statistic_finite_and_non_negative() {
        let out = calculate_hosmer_lemeshow(&base_input()).unwrap();
        assert!(out.chi_square.is_finite());
        assert!(out.chi_square >= 0.0);
    }

    #[test]
    fn test_p_value_in_unit_interval() {
        let out = calculate_hosmer_lemeshow(&base_input()).unwrap();
        assert!((0.0..=1.0).contains(&out.p_value));
    }

    #[test]
    fn test_ten_groups_of_ten() {
        let out = calculate_hosmer_lemeshow(&base_input()).unwrap();
        assert_eq!(out.groups.len(), 10);
        assert!(out.groups.iter().all(|g| g.n == 10));
        assert_eq!(out.degrees_of_freedom, 8);
    }

    #[test]
    fn test_groups_ascending_in_probability() {
        let out = calculate_hosmer_lemeshow(&base_input()).unwrap();
        for pair in out.groups.windows(2) {
            assert!(pair[0].upper <= pair[1].lower + 1e-12);
        }
    }

    #[test]
    fn test_tied_probabilities_share_a_group() {
        let observations: Vec<Observation> = [
            0.1, 0.1, 0.2, 0.3, 0.45, 0.45, 0.5, 0.55, 0.8, 0.8, 0.9, 0.95,
        ]
        .iter()
        .map(|&p| Observation::new(p, u8::from(p > 0.5)))
        .collect();
        let input = HosmerLemeshowInput {
            observations,
            num_groups: 3,
            statistic: StatisticVariant::BothClasses,
        };
        let out = calculate_hosmer_lemeshow(&input).unwrap();
        assert!(out.groups.iter().all(|g| g.n == 4));
        // Each run of ties (0.1, 0.45, 0.8) sits inside a single band: no
        // band boundary may fall strictly inside a tied value.
        for tied in [0.1, 0.45, 0.8] {
            let containing = out
                .groups
                .iter()
                .filter(|g| tied >= g.lower && tied <= g.upper)
                .count();
            assert_eq!(containing, 1, "tied value {} split across bands", tied);
        }
    }

    #[test]
    fn test_two_point_distribution_cannot_fill_three_groups() {
        // Two distinct values cannot populate three bands: the upper cut
        // lands on the maximum and leaves the last band empty.
        let mut observations = vec![Observation::new(0.2, 0); 5];
        observations.extend(vec![Observation::new(0.8, 1); 5]);
        let input = HosmerLemeshowInput {
            observations,
            num_groups: 3,
            statistic: StatisticVariant::BothClasses,
        };
        let err = calculate_hosmer_lemeshow(&input).unwrap_err();
        assert!(matches!(err, ModelValidationError::DegenerateGrouping(_)));
    }

    #[test]
    fn test_identical_probabilities_degenerate() {
        let input = HosmerLemeshowInput {
            observations: vec![Observation::new(0.5, 1); 50],
            num_groups: 10,
            statistic: StatisticVariant::BothClasses,
        };
        let err = calculate_hosmer_lemeshow(&input).unwrap_err();
        assert!(matches!(err, ModelValidationError::DegenerateGrouping(_)));
    }

    #[test]
    fn test_too_few_groups_rejected() {
        let mut input = base_input();
        input.num_groups = 2;
        let err = calculate_hosmer_lemeshow(&input).unwrap_err();
        assert!(matches!(err, ModelValidationError::InvalidInput { .. }));
    }

    #[test]
    fn test_more_groups_than_observations_rejected() {
        let input = HosmerLemeshowInput {
            observations: spread_observations(5, 2),
            num_groups: 10,
            statistic: StatisticVariant::BothClasses,
        };
        let err = calculate_hosmer_lemeshow(&input).unwrap_err();
        assert!(matches!(err, ModelValidationError::DegenerateGrouping(_)));
    }

    #[test]
    fn test_empty_observations_rejected() {
        let input = HosmerLemeshowInput {
            observations: vec![],
            num_groups: 10,
            statistic: StatisticVariant::BothClasses,
        };
        let err = calculate_hosmer_lemeshow(&input).unwrap_err();
        assert!(matches!(err, ModelValidationError::InsufficientData(_)));
    }

    #[test]
    fn test_out_of_range_probability_rejected() {
        let mut input = base_input();
        input.observations[0].predicted = 1.5;
        assert!(calculate_hosmer_lemeshow(&input).is_err());
    }

    #[test]
    fn test_negative_only_statistic_is_smaller() {
        let both = calculate_hosmer_lemeshow(&base_input()).unwrap();
        let mut input = base_input();
        input.statistic = StatisticVariant::NegativeClassOnly;
        let neg_only = calculate_hosmer_lemeshow(&input).unwrap();
        // Every per-class term is non-negative, so dropping the positive
        // terms can only shrink the sum.
        assert!(neg_only.chi_square <= both.chi_square);
        assert!(neg_only.p_value >= both.p_value);
    }

    #[test]
    fn test_deterministic() {
        let a = calculate_hosmer_lemeshow(&base_input()).unwrap();
        let b = calculate_hosmer_lemeshow(&base_input()).unwrap();
        assert_eq!(a.chi_square.to_bits(), b.chi_square.to_bits());
        assert_eq!(a.p_value.to_bits(), b.p_value.to_bits());
        assert_eq!(a.groups.len(), b.groups.len());
    }

    #[test]
    fn test_input_not_mutated() {
        let input = base_input();
        let before = input.observations.clone();
        let _ = calculate_hosmer_lemeshow(&input).unwrap();
        for (a, b) in input.observations.iter().zip(&before) {
            assert_eq!(a.predicted.to_bits(), b.predicted.to_bits());
            assert_eq!(a.actual, b.actual);
        }
    }

    #[test]
    fn test_default_num_groups_deserializes_to_ten() {
        let input: HosmerLemeshowInput =
            serde_json::from_str(r#"{"observations":[{"predicted":0.5,"actual":1}]}"#).unwrap();
        assert_eq!(input.num_groups, 10);
        assert_eq!(input.statistic, StatisticVariant::BothClasses);
    }
}
