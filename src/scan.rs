//! Scan collaborator surface.
//!
//! Loading, alignment, and interpolation of raw beamline files happen
//! upstream; this module is the narrow seam those collaborators hand their
//! output through. A [`RawScan`] carries typed, labelled columns, so the
//! detector channels are selected by an explicit accessor rather than by
//! structural discovery of the loaded object graph.

use nalgebra::DMatrix;

use crate::error::InputError;
use crate::types::ScanMatrix;

/// One loaded, interpolated scan as delivered by the acquisition pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct RawScan {
    /// Identity of the sample this scan was taken from.
    pub sample: String,
    /// Column labels, one per column of `data`.
    pub labels: Vec<String>,
    /// Interpolated data on the common grid: rows are grid points,
    /// columns correspond to `labels`.
    pub data: DMatrix<f64>,
}

impl RawScan {
    /// Create a scan from its parts.
    ///
    /// # Panics
    ///
    /// Panics if the number of labels does not match the number of data
    /// columns.
    pub fn new(sample: impl Into<String>, labels: Vec<String>, data: DMatrix<f64>) -> Self {
        assert_eq!(
            labels.len(),
            data.ncols(),
            "one label per data column is required"
        );
        Self {
            sample: sample.into(),
            labels,
            data,
        }
    }
}

/// Extract the detector-channel columns of a scan: every column whose label
/// contains `pattern`, in their original order.
///
/// # Errors
///
/// [`InputError::MissingChannelColumns`] if no label matches.
pub fn get_channel_columns(scan: &RawScan, pattern: &str) -> Result<ScanMatrix, InputError> {
    let selected: Vec<usize> = scan
        .labels
        .iter()
        .enumerate()
        .filter(|(_, label)| label.contains(pattern))
        .map(|(i, _)| i)
        .collect();

    if selected.is_empty() {
        return Err(InputError::MissingChannelColumns {
            pattern: pattern.to_string(),
        });
    }

    let mut out = DMatrix::zeros(scan.data.nrows(), selected.len());
    for (k, &col) in selected.iter().enumerate() {
        out.set_column(k, &scan.data.column(col));
    }
    Ok(out)
}

/// Validate a scan batch before any statistics are computed.
///
/// # Errors
///
/// - [`InputError::EmptyScanSet`] if the batch is empty.
/// - [`InputError::TooFewScans`] if only one scan was supplied.
/// - [`InputError::MissingChannelColumns`] if any scan lacks a column
///   matching `pattern`.
/// - [`InputError::MixedSamples`] if the batch mixes sample identities.
///   A heterogeneous batch must surface here, never be silently averaged.
pub fn validate_batch(scans: &[RawScan], pattern: &str) -> Result<(), InputError> {
    if scans.is_empty() {
        return Err(InputError::EmptyScanSet);
    }
    if scans.len() < 2 {
        return Err(InputError::TooFewScans {
            available: scans.len(),
        });
    }

    let expected = &scans[0].sample;
    for scan in scans {
        if !scan.labels.iter().any(|label| label.contains(pattern)) {
            return Err(InputError::MissingChannelColumns {
                pattern: pattern.to_string(),
            });
        }
        if &scan.sample != expected {
            return Err(InputError::MixedSamples {
                expected: expected.clone(),
                found: scan.sample.clone(),
            });
        }
    }
    Ok(())
}

/// Extract the detector-channel matrices for a whole validated batch.
pub fn channel_matrices(
    scans: &[RawScan],
    pattern: &str,
) -> Result<Vec<ScanMatrix>, InputError> {
    validate_batch(scans, pattern)?;
    scans
        .iter()
        .map(|scan| get_channel_columns(scan, pattern))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(sample: &str, labels: &[&str]) -> RawScan {
        let data = DMatrix::from_fn(4, labels.len(), |r, c| (r * labels.len() + c) as f64);
        RawScan::new(
            sample,
            labels.iter().map(|s| s.to_string()).collect(),
            data,
        )
    }

    #[test]
    fn selects_only_matching_columns() {
        let s = scan("Imidazole - C", &["energy", "sdd1", "tey", "sdd2"]);
        let channels = get_channel_columns(&s, "sdd").unwrap();
        assert_eq!(channels.ncols(), 2);
        // Column order is preserved: sdd1 then sdd2.
        assert_eq!(channels[(0, 0)], s.data[(0, 1)]);
        assert_eq!(channels[(0, 1)], s.data[(0, 3)]);
    }

    #[test]
    fn missing_channels_are_an_error() {
        let s = scan("Imidazole - C", &["energy", "tey"]);
        assert_eq!(
            get_channel_columns(&s, "sdd"),
            Err(InputError::MissingChannelColumns {
                pattern: "sdd".to_string()
            })
        );
    }

    #[test]
    fn empty_batch_is_rejected() {
        assert_eq!(validate_batch(&[], "sdd"), Err(InputError::EmptyScanSet));
    }

    #[test]
    fn single_scan_is_rejected() {
        let batch = [scan("A", &["sdd1"])];
        assert_eq!(
            validate_batch(&batch, "sdd"),
            Err(InputError::TooFewScans { available: 1 })
        );
    }

    #[test]
    fn mixed_samples_are_rejected() {
        let batch = [scan("A", &["sdd1"]), scan("B", &["sdd1"])];
        assert_eq!(
            validate_batch(&batch, "sdd"),
            Err(InputError::MixedSamples {
                expected: "A".to_string(),
                found: "B".to_string()
            })
        );
    }

    #[test]
    fn homogeneous_batch_passes() {
        let batch = [scan("A", &["sdd1"]), scan("A", &["sdd1"])];
        assert!(validate_batch(&batch, "sdd").is_ok());
        assert_eq!(channel_matrices(&batch, "sdd").unwrap().len(), 2);
    }
}
