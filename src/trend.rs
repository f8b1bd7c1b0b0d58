//! Trend Predictor seam.
//!
//! The stopping-rule engine treats the curve-fitting step as a black box:
//! anything implementing [`TrendModel`] can drive it. Latency is
//! unspecified and the engine assumes determinism only within a single run
//! for identical inputs.

use nalgebra::{Cholesky, Matrix2, Vector2};

use crate::error::TrendError;

/// A model that fits the noise-difference history and forecasts the next
/// value.
pub trait TrendModel {
    /// Fit the (index, value) history and return the fitted sequence; the
    /// last element is the one-step-ahead forecast at `max(indices) + 1`.
    ///
    /// `values` and `indices` are parallel slices of equal length.
    fn fit_and_forecast(&self, values: &[f64], indices: &[usize]) -> Result<Vec<f64>, TrendError>;
}

/// Ordinary least-squares line through the (index, value) history.
///
/// Solves the 2x2 normal equations with a Cholesky factorization. Noise
/// trends at the beamline decay slowly enough over a 10-scan horizon that
/// a local linear extrapolation is a serviceable default; callers with a
/// better model for their detector plug it in through [`TrendModel`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearTrend;

impl TrendModel for LinearTrend {
    fn fit_and_forecast(&self, values: &[f64], indices: &[usize]) -> Result<Vec<f64>, TrendError> {
        debug_assert_eq!(values.len(), indices.len());
        let n = values.len();
        if n < 2 {
            return Err(TrendError::DegenerateFit { points: n });
        }

        // Normal equations for y = intercept + slope * x.
        let mut xtx = Matrix2::<f64>::zeros();
        let mut xty = Vector2::<f64>::zeros();
        for (&y, &i) in values.iter().zip(indices) {
            let x = i as f64;
            xtx[(0, 0)] += 1.0;
            xtx[(0, 1)] += x;
            xtx[(1, 0)] += x;
            xtx[(1, 1)] += x * x;
            xty[0] += y;
            xty[1] += x * y;
        }

        // Cholesky fails iff the design is rank-deficient (all indices equal).
        let chol = Cholesky::new(xtx).ok_or(TrendError::DegenerateFit { points: n })?;
        let beta = chol.solve(&xty);
        let (intercept, slope) = (beta[0], beta[1]);

        let next = indices.iter().max().copied().unwrap_or(0) + 1;
        let mut fitted: Vec<f64> = indices
            .iter()
            .map(|&i| intercept + slope * i as f64)
            .collect();
        fitted.push(intercept + slope * next as f64);
        Ok(fitted)
    }
}
