//! Empirical constants shared across the crate.
//!
//! The default variance target was calibrated against historical beamline
//! data and is carried as an opaque value; there is no closed-form
//! derivation for it.

/// Default target for the windowed population variance of the
/// noise-difference series. A sample whose trailing window drops to or
/// below this level is considered sufficiently averaged.
pub const DEFAULT_DESIRED_DIFFERENCE: f64 = 0.179_619_43;

/// Default scale factor for the log-domain cutoff derivation.
///
/// When the cutoff is derived rather than given, it is
/// `DEFAULT_PERCENT_OF_LOG * ln(mean of the initial noise values)`.
pub const DEFAULT_PERCENT_OF_LOG: f64 = 0.4;

/// Size of the production decision window (entries averaged by the
/// stopping rule).
pub const DECISION_WINDOW: usize = 10;

/// Size of the exploratory window used by [`crate::statistics::lowest_variance`].
pub const EXPLORATORY_WINDOW: usize = 5;

/// Drop in difference-variance between consecutive scans beyond which the
/// newer scan is treated as an anomalous read and discarded.
pub const OUTLIER_DROP_THRESHOLD: f64 = 50.0;

/// Default size of the initial scan batch consumed by the predictor.
pub const DEFAULT_NUM_SCANS: usize = 10;

/// Value the engine's iteration counter starts at, reflecting the initial
/// batch of scans already consumed before any forecasting happens.
pub const INITIAL_ITERATION_COUNT: usize = 9;

/// Hard cap on the engine's iteration counter. Reaching it without
/// satisfying the threshold is a terminal failure, never a retry.
pub const MAX_ITERATIONS: usize = 60;

/// Minimum number of series entries required before prediction is possible.
pub const MIN_SERIES_LEN: usize = 9;

/// Column-label pattern identifying detector-channel columns by default.
pub const DEFAULT_CHANNEL_PATTERN: &str = "sdd";
