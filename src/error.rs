//! Error types for scan-count prediction.
//!
//! Failures are terminal: the engine performs no retries (re-fitting the
//! same series is deterministic) and never returns a partial or best-effort
//! count. Each variant maps to one condition a caller can act on.

/// Error returned when validating the input scan batch.
///
/// These originate at the collaborator surface ([`crate::scan`]) before any
/// statistics are computed, and are passed through unchanged by the
/// predictor: a bad batch must never be silently averaged.
#[derive(Debug, Clone, PartialEq)]
pub enum InputError {
    /// The batch contained no scans at all.
    EmptyScanSet,

    /// Fewer than two scans were supplied; no difference series can be
    /// formed from a single scan.
    TooFewScans {
        /// Number of scans actually supplied.
        available: usize,
    },

    /// No column label matched the detector-channel pattern.
    MissingChannelColumns {
        /// The pattern that failed to match.
        pattern: String,
    },

    /// The batch mixes scans of different samples.
    MixedSamples {
        /// Sample identity of the first scan.
        expected: String,
        /// Conflicting sample identity encountered later in the batch.
        found: String,
    },
}

impl std::fmt::Display for InputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyScanSet => {
                write!(f, "scan batch is empty - nothing to predict from")
            }
            Self::TooFewScans { available } => write!(
                f,
                "at least 2 scans are required to form a noise-difference series, got {available}"
            ),
            Self::MissingChannelColumns { pattern } => write!(
                f,
                "no column label matches detector-channel pattern {pattern:?}"
            ),
            Self::MixedSamples { expected, found } => write!(
                f,
                "scan batch mixes samples: expected {expected:?}, found {found:?}"
            ),
        }
    }
}

impl std::error::Error for InputError {}

/// Error returned by a trend model's fit step.
#[derive(Debug, Clone, PartialEq)]
pub enum TrendError {
    /// The design matrix was singular or too short to fit.
    DegenerateFit {
        /// Number of points the fit was attempted on.
        points: usize,
    },
}

impl std::fmt::Display for TrendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DegenerateFit { points } => {
                write!(f, "trend fit is degenerate with {points} points")
            }
        }
    }
}

impl std::error::Error for TrendError {}

/// Error returned by the stopping-rule engine and the predictor entry point.
#[derive(Debug, Clone, PartialEq)]
pub enum PredictError {
    /// Fewer than 9 noise-difference entries exist; prediction needs an
    /// initial batch of at least 10 scans. Raised before the trend model
    /// is ever invoked.
    InsufficientData {
        /// Number of series entries actually available.
        available: usize,
    },

    /// The iteration cap was reached while using the default threshold:
    /// the model/threshold combination cannot produce a confident
    /// prediction for this sample.
    Nonconvergence {
        /// Value of the iteration counter when the cap was hit.
        iterations: usize,
    },

    /// The iteration cap was reached with a user-supplied or derived
    /// threshold: the requested noise target is infeasible given the
    /// observed trend.
    UnreachableThreshold {
        /// The threshold that could not be reached.
        threshold: f64,
        /// Value of the iteration counter when the cap was hit.
        iterations: usize,
    },

    /// Input validation failed at the scan collaborator surface.
    Input(InputError),

    /// The trend model failed to fit the series.
    Trend(TrendError),
}

impl std::fmt::Display for PredictError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InsufficientData { available } => write!(
                f,
                "prediction requires an initial batch of at least 10 scans \
                 (9 noise differences), got {available} differences"
            ),
            Self::Nonconvergence { iterations } => write!(
                f,
                "no sufficiently accurate prediction after {iterations} iterations \
                 at the default threshold"
            ),
            Self::UnreachableThreshold {
                threshold,
                iterations,
            } => write!(
                f,
                "desired variance level {threshold} not reachable within {iterations} iterations"
            ),
            Self::Input(err) => write!(f, "invalid scan batch: {err}"),
            Self::Trend(err) => write!(f, "trend model failed: {err}"),
        }
    }
}

impl std::error::Error for PredictError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Input(err) => Some(err),
            Self::Trend(err) => Some(err),
            _ => None,
        }
    }
}

impl From<InputError> for PredictError {
    fn from(err: InputError) -> Self {
        Self::Input(err)
    }
}

impl From<TrendError> for PredictError {
    fn from(err: TrendError) -> Self {
        Self::Trend(err)
    }
}
