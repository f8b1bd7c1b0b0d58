//! Sliding-window population variance.

use crate::constants::EXPLORATORY_WINDOW;

/// Compute the population variance of a window: the mean squared deviation
/// of each element from the window mean, divided by the window length
/// (not `n - 1`).
///
/// Returns 0.0 for an empty window.
pub fn population_variance(window: &[f64]) -> f64 {
    if window.is_empty() {
        return 0.0;
    }
    let n = window.len() as f64;
    let mean = window.iter().sum::<f64>() / n;
    window.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n
}

/// Compute the population variance of every full `w`-element window of
/// `series`, sliding by one element per step.
///
/// No output is produced until the window first fills, so the result holds
/// `series.len() - w + 1` values (empty when the series is shorter than
/// `w`). This is a pure function of the trailing window; it holds no state
/// across separate series.
///
/// # Panics
///
/// Panics if `w` is zero.
pub fn sliding_window_variance(series: &[f64], w: usize) -> Vec<f64> {
    assert!(w > 0, "window size must be positive");
    if series.len() < w {
        return Vec::new();
    }
    series
        .windows(w)
        .map(population_variance)
        .collect()
}

/// The lowest windowed variance found in a series and where it occurs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LowestVariance {
    /// The minimum windowed population variance.
    pub variance: f64,
    /// Index of the first element of the winning window.
    pub start: usize,
    /// Index of the last element of the winning window.
    pub end: usize,
}

/// Find the 5-element window of `series` with the lowest population
/// variance. Exploratory companion to the production stopping rule: useful
/// for eyeballing where a sample's noise settles.
///
/// Returns `None` if the series holds fewer than 5 values.
pub fn lowest_variance(series: &[f64]) -> Option<LowestVariance> {
    let variances = sliding_window_variance(series, EXPLORATORY_WINDOW);
    let (start, &variance) = variances
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.total_cmp(b))?;
    Some(LowestVariance {
        variance,
        start,
        end: start + EXPLORATORY_WINDOW - 1,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variance_of_constant_window_is_zero() {
        assert_eq!(population_variance(&[3.0; 10]), 0.0);
    }

    #[test]
    fn variance_matches_hand_computation() {
        // mean = 2, deviations 1, 0, 1 -> (1 + 0 + 1) / 3
        let var = population_variance(&[1.0, 2.0, 3.0]);
        assert!((var - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn sliding_produces_one_value_per_full_window() {
        let series = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let out = sliding_window_variance(&series, 5);
        assert_eq!(out.len(), 2);
        // Both windows are arithmetic sequences with the same spread.
        assert!((out[0] - out[1]).abs() < 1e-12);
    }

    #[test]
    fn sliding_is_empty_below_window_size() {
        assert!(sliding_window_variance(&[1.0, 2.0], 10).is_empty());
    }

    #[test]
    fn lowest_variance_finds_flat_stretch() {
        // Noisy head, flat tail: the winning window must be the tail.
        let series = [9.0, 1.0, 8.0, 2.0, 7.0, 4.0, 4.0, 4.0, 4.0, 4.0];
        let low = lowest_variance(&series).unwrap();
        assert_eq!(low.variance, 0.0);
        assert_eq!(low.start, 5);
        assert_eq!(low.end, 9);
    }

    #[test]
    fn lowest_variance_needs_five_values() {
        assert!(lowest_variance(&[1.0, 2.0, 3.0, 4.0]).is_none());
    }
}
