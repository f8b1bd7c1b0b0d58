//! Core data types: scan matrices and the noise-difference series.

use nalgebra::DMatrix;

/// One interpolated scan: rows are samples on the common coordinate grid,
/// columns are detector channels. Produced by an external interpolation
/// step; read-only to this crate.
pub type ScanMatrix = DMatrix<f64>;

/// The noise-difference series and the scan indices it was computed from.
///
/// `values[k]` is the variance of the element-wise difference between the
/// running mean after scan `indices[k]` was folded in and the running mean
/// just before it. The two vectors are parallel: gaps in `indices` mark
/// scans that were discarded as anomalous reads.
///
/// The invariant `values.len() == indices.len()` holds at all times; the
/// only mutator is [`NoiseSeries::push`], which extends both vectors in
/// lockstep.
#[derive(Debug, Clone, PartialEq)]
pub struct NoiseSeries {
    values: Vec<f64>,
    indices: Vec<usize>,
}

impl NoiseSeries {
    /// Create an empty series.
    pub fn new() -> Self {
        Self {
            values: Vec::new(),
            indices: Vec::new(),
        }
    }

    /// Create an empty series with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: Vec::with_capacity(capacity),
            indices: Vec::with_capacity(capacity),
        }
    }

    /// Build a series from parallel vectors.
    ///
    /// # Panics
    ///
    /// Panics if the vectors differ in length.
    pub fn from_parts(values: Vec<f64>, indices: Vec<usize>) -> Self {
        assert_eq!(
            values.len(),
            indices.len(),
            "noise values and scan indices must be parallel"
        );
        Self { values, indices }
    }

    /// Append one (value, scan index) entry.
    pub fn push(&mut self, value: f64, index: usize) {
        self.values.push(value);
        self.indices.push(index);
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the series holds no entries.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The noise-difference values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// The scan indices, parallel to [`NoiseSeries::values`].
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// The most recent scan index, if any.
    pub fn last_index(&self) -> Option<usize> {
        self.indices.last().copied()
    }

    /// Truncate to the first `n` entries (used to clip the series to the
    /// configured initial batch). No-op if `n >= len`.
    pub fn truncate(&mut self, n: usize) {
        self.values.truncate(n);
        self.indices.truncate(n);
    }
}

impl Default for NoiseSeries {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_keeps_vectors_parallel() {
        let mut series = NoiseSeries::new();
        series.push(1.5, 0);
        series.push(0.5, 2);
        assert_eq!(series.len(), 2);
        assert_eq!(series.values(), &[1.5, 0.5]);
        assert_eq!(series.indices(), &[0, 2]);
        assert_eq!(series.last_index(), Some(2));
    }

    #[test]
    #[should_panic]
    fn from_parts_rejects_length_mismatch() {
        NoiseSeries::from_parts(vec![1.0, 2.0], vec![0]);
    }

    #[test]
    fn truncate_clips_both_vectors() {
        let mut series = NoiseSeries::from_parts(vec![1.0, 2.0, 3.0], vec![0, 1, 2]);
        series.truncate(2);
        assert_eq!(series.values().len(), 2);
        assert_eq!(series.indices().len(), 2);
    }
}
