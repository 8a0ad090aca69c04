//! Sample quantiles with linear interpolation between order statistics.
//!
//! Uses the Hyndman & Fan (1996) type 7 rule: for a sorted sample `v` of
//! size `n` at probability `p`,
//!
//! ```text
//! h = (n - 1) * p
//! q = v[floor(h)] + (h - floor(h)) * (v[floor(h) + 1] - v[floor(h)])
//! ```
//!
//! This is the default rule in pandas and numpy, and therefore the rule
//! historical decile-of-risk tables were produced with. Equal-frequency cut
//! points computed this way fall *between* order statistics, so observations
//! with identical values always land on the same side of every cut.

use crate::error::ModelValidationError;
use crate::ModelValidationResult;

/// Type 7 sample quantile of an ascending-sorted slice.
///
/// Callers guarantee `sorted` is non-empty, finite, and sorted; `p` in [0, 1].
pub fn interpolated_quantile(sorted: &[f64], p: f64) -> f64 {
    debug_assert!(!sorted.is_empty(), "quantile of an empty sample");
    debug_assert!((0.0..=1.0).contains(&p), "quantile probability outside [0, 1]");

    let n = sorted.len();
    let h = (n - 1) as f64 * p;
    let lo = h.floor() as usize;
    if lo + 1 >= n {
        return sorted[n - 1];
    }
    sorted[lo] + (h - lo as f64) * (sorted[lo + 1] - sorted[lo])
}

/// Interior cut points at probabilities `k / num_groups` for
/// `k = 1 .. num_groups`, defining `num_groups` equal-frequency intervals.
///
/// Errors with `DegenerateGrouping` when two cut points coincide: the sample
/// has too few distinct values to form `num_groups` intervals with distinct
/// boundaries.
pub fn quantile_cut_points(sorted: &[f64], num_groups: u32) -> ModelValidationResult<Vec<f64>> {
    let mut cuts = Vec::with_capacity(num_groups as usize - 1);
    for k in 1..num_groups {
        cuts.push(interpolated_quantile(
            sorted,
            f64::from(k) / f64::from(num_groups),
        ));
    }
    for pair in cuts.windows(2) {
        if pair[0] >= pair[1] {
            return Err(ModelValidationError::DegenerateGrouping(format!(
                "quantile cut points coincide at {}; too few distinct values for {} groups",
                pair[0], num_groups
            )));
        }
    }
    Ok(cuts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_median_of_even_sample_interpolates() {
        let v = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(interpolated_quantile(&v, 0.5), 2.5);
    }

    #[test]
    fn test_median_of_odd_sample_is_middle_value() {
        let v = [1.0, 2.0, 3.0];
        assert_eq!(interpolated_quantile(&v, 0.5), 2.0);
    }

    #[test]
    fn test_extremes_are_min_and_max() {
        let v = [0.1, 0.4, 0.9];
        assert_eq!(interpolated_quantile(&v, 0.0), 0.1);
        assert_eq!(interpolated_quantile(&v, 1.0), 0.9);
    }

    #[test]
    fn test_quartiles_of_integer_run() {
        // 0..=10: type 7 quartiles are 2.5 and 7.5
        let v: Vec<f64> = (0..=10).map(f64::from).collect();
        assert_eq!(interpolated_quantile(&v, 0.25), 2.5);
        assert_eq!(interpolated_quantile(&v, 0.75), 7.5);
    }

    #[test]
    fn test_cut_points_are_strictly_increasing() {
        let v: Vec<f64> = (0..100).map(|i| f64::from(i) / 100.0).collect();
        let cuts = quantile_cut_points(&v, 10).unwrap();
        assert_eq!(cuts.len(), 9);
        for pair in cuts.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn test_constant_sample_is_degenerate() {
        let v = [0.5; 20];
        let err = quantile_cut_points(&v, 10).unwrap_err();
        assert!(matches!(err, ModelValidationError::DegenerateGrouping(_)));
    }

    #[test]
    fn test_single_element_sample() {
        let v = [0.3];
        assert_eq!(interpolated_quantile(&v, 0.5), 0.3);
    }
}
