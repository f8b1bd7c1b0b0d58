//! Main `ScanPredictor` entry point and builder.

use crate::config::Config;
use crate::cutoff::derive_cutoff;
use crate::diagnostics::Diagnostics;
use crate::engine::{determine_num_scans, Threshold};
use crate::error::PredictError;
use crate::extract::extract_noise_series;
use crate::scan::{channel_matrices, RawScan};
use crate::trend::{LinearTrend, TrendModel};

/// Outcome of a prediction: how many scans to take beyond the initial
/// batch, plus the diagnostic payload in verbose mode.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    /// Number of additional scans recommended. Zero means the initial
    /// batch already satisfied the noise target.
    pub additional_scans: usize,

    /// Structured diagnostic record, present only when
    /// [`Config::verbose`] is set.
    pub diagnostics: Option<Diagnostics>,
}

/// Main entry point for scan-count prediction.
///
/// Use the builder pattern to configure and run a prediction over a batch
/// of loaded, interpolated scans.
///
/// # Example
///
/// ```ignore
/// use scantrend::ScanPredictor;
///
/// let prediction = ScanPredictor::new()
///     .desired_difference(0.05)
///     .verbose(true)
///     .predict(&scans)?;
/// println!("take {} more scans", prediction.additional_scans);
/// ```
#[derive(Debug, Clone)]
pub struct ScanPredictor {
    config: Config,
}

impl Default for ScanPredictor {
    fn default() -> Self {
        Self::new()
    }
}

impl ScanPredictor {
    /// Create with default configuration.
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Create from an existing configuration.
    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    /// Set an explicit windowed-variance target.
    pub fn desired_difference(mut self, target: f64) -> Self {
        self.config = self.config.desired_difference(target);
        self
    }

    /// Derive the target from the log of the initial noise average.
    pub fn percent_of_log(mut self, factor: f64) -> Self {
        self.config = self.config.percent_of_log(factor);
        self
    }

    /// Set the size of the initial batch to use.
    pub fn num_scans(mut self, n: usize) -> Self {
        self.config = self.config.num_scans(n);
        self
    }

    /// Set the detector-channel column pattern.
    pub fn channel_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.config = self.config.channel_pattern(pattern);
        self
    }

    /// Enable the diagnostic payload.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.config = self.config.verbose(verbose);
        self
    }

    /// Get the current configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the prediction with the default linear trend model.
    pub fn predict(&self, scans: &[RawScan]) -> Result<Prediction, PredictError> {
        self.predict_with_model(scans, &LinearTrend)
    }

    /// Run the prediction with a caller-supplied trend model.
    ///
    /// The model is treated as a black box: it is only required to return
    /// a sequence whose last element is the one-step-ahead forecast.
    pub fn predict_with_model(
        &self,
        scans: &[RawScan],
        model: &dyn TrendModel,
    ) -> Result<Prediction, PredictError> {
        let matrices = channel_matrices(scans, &self.config.channel_pattern)?;

        // Clip the initial batch to the data actually available.
        let num_scans = self.config.num_scans.min(matrices.len());
        let mut series = extract_noise_series(&matrices[..num_scans])?;
        series.truncate(num_scans - 1);

        let (threshold, derivation) = match (
            self.config.desired_difference,
            self.config.percent_of_log,
        ) {
            (Some(target), _) => (Threshold::Explicit(target), None),
            (None, Some(factor)) => {
                let info = derive_cutoff(series.values(), factor);
                (Threshold::Derived(info.cutoff), Some(info))
            }
            (None, None) => (Threshold::Default, None),
        };

        let report = determine_num_scans(&series, threshold, model)?;

        // The counter folds in the initial batch; report only the scans
        // beyond it. A counter of zero means the batch was already quiet.
        let additional_scans = if report.counter == 0 {
            0
        } else {
            (report.counter + 1).saturating_sub(num_scans)
        };

        let diagnostics = self.config.verbose.then(|| {
            let forecast_indices = report.series.indices()[series.len()..].to_vec();
            let forecast_values = report.series.values()[series.len()..].to_vec();
            Diagnostics {
                cutoff_derivation: derivation,
                cutoff: threshold.value(),
                value_at_cutoff: report.final_variance(),
                cutoff_scan: report.series.last_index().unwrap_or(0),
                window_variances: report.window_variances.clone(),
                forecast_indices,
                forecast_values,
            }
        });

        Ok(Prediction {
            additional_scans,
            diagnostics,
        })
    }
}

/// Convenience wrapper: predict with an explicit configuration and the
/// default trend model.
pub fn predict_num_scans(scans: &[RawScan], config: &Config) -> Result<Prediction, PredictError> {
    ScanPredictor::with_config(config.clone()).predict(scans)
}
