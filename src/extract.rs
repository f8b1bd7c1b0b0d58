//! Noise-Signal Extractor.
//!
//! Turns a sequence of aligned per-scan detector matrices into a scalar
//! noise-difference series: for each scan beyond the first, the population
//! variance of the element-wise difference between the running mean with
//! and without that scan. Scans whose difference-variance jumps by more
//! than [`OUTLIER_DROP_THRESHOLD`] over the previous entry are treated as
//! anomalous reads and excluded from both the running mean and the output.

use crate::constants::OUTLIER_DROP_THRESHOLD;
use crate::error::InputError;
use crate::statistics::population_variance;
use crate::types::{NoiseSeries, ScanMatrix};

/// Extract the noise-difference series from an ordered scan batch.
///
/// The output is finite (non-finite variances from degenerate, constant
/// matrices are replaced with zero) and deterministic: the same input
/// always produces a bit-identical series.
///
/// Index `k` in the output refers to the `k`-th scan beyond the first,
/// counted over the input order; gaps mark discarded outliers.
///
/// # Errors
///
/// [`InputError::TooFewScans`] if fewer than two scans are supplied
/// ([`InputError::EmptyScanSet`] for none at all).
///
/// # Panics
///
/// Panics if the scans are not all of identical shape; alignment onto a
/// common grid is the interpolation collaborator's contract.
pub fn extract_noise_series(scans: &[ScanMatrix]) -> Result<NoiseSeries, InputError> {
    if scans.is_empty() {
        return Err(InputError::EmptyScanSet);
    }
    if scans.len() < 2 {
        return Err(InputError::TooFewScans {
            available: scans.len(),
        });
    }
    let shape = scans[0].shape();
    assert!(
        scans.iter().all(|s| s.shape() == shape),
        "all scans must share the interpolated grid shape"
    );

    let mut series = NoiseSeries::with_capacity(scans.len() - 1);
    let mut retained_sum = scans[0].clone();
    let mut retained_count = 1usize;
    let mut prev_mean = scans[0].clone();

    for (i, scan) in scans[1..].iter().enumerate() {
        let candidate_mean = (&retained_sum + scan) / (retained_count + 1) as f64;
        let diff = &candidate_mean - &prev_mean;
        let mut variance = population_variance(diff.as_slice());
        if !variance.is_finite() {
            variance = 0.0;
        }

        // The first two entries are always accepted: with fewer than two
        // values there is no trend to compare a jump against.
        if series.len() >= 2 {
            let prev = series.values()[series.len() - 1];
            if prev - variance < -OUTLIER_DROP_THRESHOLD {
                // Anomalous read: the running mean does not advance and
                // neither value nor index is recorded.
                continue;
            }
        }

        series.push(variance, i);
        retained_sum += scan;
        retained_count += 1;
        prev_mean = candidate_mean;
    }

    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::DMatrix;

    fn constant_scan(value: f64) -> ScanMatrix {
        DMatrix::from_element(8, 3, value)
    }

    #[test]
    fn too_few_scans_is_an_error() {
        assert_eq!(
            extract_noise_series(&[]),
            Err(InputError::EmptyScanSet)
        );
        assert_eq!(
            extract_noise_series(&[constant_scan(1.0)]),
            Err(InputError::TooFewScans { available: 1 })
        );
    }

    #[test]
    fn series_and_indices_stay_parallel() {
        let scans: Vec<ScanMatrix> = (0..6).map(|i| constant_scan(i as f64)).collect();
        let series = extract_noise_series(&scans).unwrap();
        assert_eq!(series.values().len(), series.indices().len());
    }

    #[test]
    fn constant_scans_yield_zero_noise() {
        let scans = vec![constant_scan(2.0); 5];
        let series = extract_noise_series(&scans).unwrap();
        assert_eq!(series.values(), &[0.0, 0.0, 0.0, 0.0]);
        assert_eq!(series.indices(), &[0, 1, 2, 3]);
    }

    /// Scan whose elements alternate between +v and -v, so differences
    /// against a flat running mean carry spread, not just a shift.
    fn split_scan(v: f64) -> ScanMatrix {
        DMatrix::from_fn(8, 3, |r, c| if (r + c) % 2 == 0 { v } else { -v })
    }

    #[test]
    fn outlier_scan_is_dropped_with_its_index() {
        // Steady scans, then one wildly divergent read, then steady again.
        // The divergent scan sits at position 3 of the enumeration (scan 4
        // overall), so index 3 must be missing from the output.
        let mut scans = vec![constant_scan(0.0); 4];
        scans.push(split_scan(1000.0));
        scans.extend(vec![constant_scan(0.0); 3]);

        let series = extract_noise_series(&scans).unwrap();
        assert!(!series.indices().contains(&3));
        assert_eq!(series.values().len(), series.indices().len());
        // Later well-behaved scans are still recorded under their original
        // positions.
        assert!(series.indices().contains(&4));
    }

    #[test]
    fn extraction_is_idempotent() {
        let scans: Vec<ScanMatrix> = (0..8)
            .map(|i| DMatrix::from_fn(6, 2, |r, c| ((i + r * 2 + c) % 7) as f64))
            .collect();
        let first = extract_noise_series(&scans).unwrap();
        let second = extract_noise_series(&scans).unwrap();
        assert_eq!(first, second);
    }
}
