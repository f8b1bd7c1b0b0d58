//! Stopping-Rule Engine.
//!
//! Drives the trend model over the noise-difference history until the
//! trailing-window variance drops to the target, or the iteration cap
//! proves it never will. The machine moves through
//! `INITIAL_CHECK -> PREDICTING -> {SATISFIED, FAILED}`; both terminal
//! states are reached within at most 51 forecast iterations, so a
//! non-converging model cannot loop forever.
//!
//! The engine works on a private copy of the series: caller-owned inputs
//! are never mutated, and each window is recomputed from the working copy
//! rather than aliased across iterations.

use crate::constants::{
    DECISION_WINDOW, DEFAULT_DESIRED_DIFFERENCE, INITIAL_ITERATION_COUNT, MAX_ITERATIONS,
    MIN_SERIES_LEN,
};
use crate::error::{PredictError, TrendError};
use crate::statistics::population_variance;
use crate::trend::TrendModel;
use crate::types::NoiseSeries;

/// The variance target the stopping rule compares windows against,
/// tagged with its provenance.
///
/// Provenance decides the failure type when the iteration cap is hit:
/// only the untouched empirical default reports
/// [`PredictError::Nonconvergence`]; a target the caller asked for,
/// directly or via the log-domain derivation, reports
/// [`PredictError::UnreachableThreshold`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Threshold {
    /// The empirical default target.
    Default,
    /// A target supplied explicitly by the caller.
    Explicit(f64),
    /// A target derived from the initial noise average (see [`crate::cutoff`]).
    Derived(f64),
}

impl Threshold {
    /// The numeric target value.
    pub fn value(&self) -> f64 {
        match self {
            Self::Default => DEFAULT_DESIRED_DIFFERENCE,
            Self::Explicit(v) | Self::Derived(v) => *v,
        }
    }

    fn failure(&self, iterations: usize) -> PredictError {
        match self {
            Self::Default => PredictError::Nonconvergence { iterations },
            Self::Explicit(v) | Self::Derived(v) => PredictError::UnreachableThreshold {
                threshold: *v,
                iterations,
            },
        }
    }
}

/// What the engine did on the way to SATISFIED.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineReport {
    /// Final value of the iteration counter: 0 when the initial window
    /// already satisfied the target, otherwise 9 plus the number of
    /// forecast iterations performed.
    pub counter: usize,

    /// Trailing-window variance at every evaluation, starting with the
    /// initial window.
    pub window_variances: Vec<f64>,

    /// Working copy of the series, extended with the forecast values the
    /// machine appended. Indices stay parallel to values throughout.
    pub series: NoiseSeries,
}

impl EngineReport {
    /// The windowed variance at the stopping point.
    pub fn final_variance(&self) -> f64 {
        *self
            .window_variances
            .last()
            .expect("engine evaluates at least the initial window")
    }
}

enum State {
    InitialCheck,
    Predicting,
    Satisfied(usize),
}

/// Run the stopping rule over a noise-difference history.
///
/// The trend model is only invoked once the history has been checked:
/// fewer than 9 entries fail fast with
/// [`PredictError::InsufficientData`] and no fit is attempted.
///
/// # Errors
///
/// - [`PredictError::InsufficientData`] for a history shorter than 9.
/// - [`PredictError::Nonconvergence`] / [`PredictError::UnreachableThreshold`]
///   when the counter reaches 60 unsatisfied (see [`Threshold`]).
/// - [`PredictError::Trend`] if the model cannot fit the series.
pub fn determine_num_scans(
    series: &NoiseSeries,
    threshold: Threshold,
    model: &dyn TrendModel,
) -> Result<EngineReport, PredictError> {
    if series.len() < MIN_SERIES_LEN {
        return Err(PredictError::InsufficientData {
            available: series.len(),
        });
    }

    let target = threshold.value();
    let mut working = series.clone();
    let mut window_variances = Vec::new();
    let mut counter = INITIAL_ITERATION_COUNT;
    let mut state = State::InitialCheck;

    loop {
        state = match state {
            // The initial batch may already be quiet enough: evaluate the
            // first decision window (clipped to the history when a
            // 10-scan batch yields only 9 differences).
            State::InitialCheck => {
                let window_len = DECISION_WINDOW.min(working.len());
                let variance = population_variance(&working.values()[..window_len]);
                window_variances.push(variance);
                if variance <= target {
                    State::Satisfied(0)
                } else {
                    State::Predicting
                }
            }

            // Forecast one scan ahead, fold it into the history, and
            // re-evaluate the trailing window. Each pass stands for one
            // additional scan.
            State::Predicting => {
                let fitted = model.fit_and_forecast(working.values(), working.indices())?;
                let forecast = *fitted.last().ok_or(PredictError::Trend(
                    TrendError::DegenerateFit {
                        points: working.len(),
                    },
                ))?;
                let next_index = working
                    .last_index()
                    .expect("history is non-empty past the initial check")
                    + 1;
                working.push(forecast, next_index);
                counter += 1;

                let values = working.values();
                let window = &values[values.len() - DECISION_WINDOW.min(values.len())..];
                let variance = population_variance(window);
                window_variances.push(variance);

                if variance <= target {
                    State::Satisfied(counter)
                } else if counter >= MAX_ITERATIONS {
                    return Err(threshold.failure(counter));
                } else {
                    State::Predicting
                }
            }

            State::Satisfied(counter) => {
                return Ok(EngineReport {
                    counter,
                    window_variances,
                    series: working,
                });
            }
        };
    }
}
