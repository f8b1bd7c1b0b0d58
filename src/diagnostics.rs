//! Structured diagnostic payload for verbose predictions.
//!
//! The core never prints or plots. When verbose mode is on, the prediction
//! carries this record instead, and callers feed it to whatever output
//! medium they use (notebook plot, log line, JSON report).

use serde::Serialize;

use crate::cutoff::CutoffInfo;

/// Everything a caller needs to visualize how a prediction was reached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostics {
    /// How the cutoff was derived from the initial noise average, when the
    /// log-domain path was used. `None` for explicit and default targets.
    pub cutoff_derivation: Option<CutoffInfo>,

    /// The windowed-variance target the stopping rule compared against.
    pub cutoff: f64,

    /// Trailing-window variance at every engine evaluation, starting with
    /// the initial window.
    pub window_variances: Vec<f64>,

    /// The windowed variance at the stopping point.
    pub value_at_cutoff: f64,

    /// Scan index at which the cutoff was reached.
    pub cutoff_scan: usize,

    /// Indices the trend model forecast for, parallel to
    /// [`Diagnostics::forecast_values`]. Empty when the initial batch
    /// already satisfied the target.
    pub forecast_indices: Vec<usize>,

    /// Forecast noise-difference values appended by the engine.
    pub forecast_values: Vec<f64>,
}
