//! Configuration for scan-count prediction.

use crate::constants::{DEFAULT_CHANNEL_PATTERN, DEFAULT_NUM_SCANS, DEFAULT_PERCENT_OF_LOG};

/// Configuration options for [`crate::ScanPredictor`].
///
/// The threshold the stopping rule compares windowed variances against is
/// resolved once, up front, in this order of precedence:
///
/// 1. an explicit [`Config::desired_difference`],
/// 2. a cutoff derived from [`Config::percent_of_log`] and the initial
///    noise values (see [`crate::cutoff`]),
/// 3. the empirical default ([`crate::constants::DEFAULT_DESIRED_DIFFERENCE`]).
///
/// Only the empirical default maps cap-exhaustion to
/// [`crate::PredictError::Nonconvergence`]; the other two are reported as
/// [`crate::PredictError::UnreachableThreshold`].
#[derive(Debug, Clone)]
pub struct Config {
    // =========================================================================
    // Threshold selection
    // =========================================================================
    /// Explicit target for the windowed population variance of the
    /// noise-difference series. Takes precedence over `percent_of_log`.
    ///
    /// Default: None (threshold is derived or defaulted).
    pub desired_difference: Option<f64>,

    /// Scale factor for the log-domain cutoff derivation: the cutoff is
    /// `percent_of_log * ln(mean of the initial noise values)`.
    ///
    /// Default: None. [`Config::with_log_cutoff`] enables the derivation
    /// at the conventional factor of 0.4.
    pub percent_of_log: Option<f64>,

    // =========================================================================
    // Batch selection
    // =========================================================================
    /// Number of scans from the supplied batch to base the prediction on.
    /// Clipped to the number of scans actually available.
    ///
    /// Default: 10.
    pub num_scans: usize,

    /// Column-label pattern identifying detector-channel columns.
    ///
    /// Default: "sdd".
    pub channel_pattern: String,

    // =========================================================================
    // Diagnostics
    // =========================================================================
    /// When true, the prediction carries a structured diagnostic payload
    /// (window-by-window variances, resolved cutoff, forecast values)
    /// suitable for external plotting. The core never renders anything.
    ///
    /// Default: false.
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            desired_difference: None,
            percent_of_log: None,
            num_scans: DEFAULT_NUM_SCANS,
            channel_pattern: DEFAULT_CHANNEL_PATTERN.to_string(),
            verbose: false,
        }
    }
}

impl Config {
    /// Create a new configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration that derives the cutoff from the log of the
    /// initial noise average, at the conventional factor of 0.4.
    pub fn with_log_cutoff() -> Self {
        Self {
            percent_of_log: Some(DEFAULT_PERCENT_OF_LOG),
            ..Default::default()
        }
    }

    // =========================================================================
    // Builder methods
    // =========================================================================

    /// Set an explicit windowed-variance target.
    pub fn desired_difference(mut self, target: f64) -> Self {
        assert!(
            target.is_finite() || target == f64::NEG_INFINITY,
            "desired_difference must not be NaN"
        );
        self.desired_difference = Some(target);
        self
    }

    /// Set the log-domain cutoff scale factor.
    pub fn percent_of_log(mut self, factor: f64) -> Self {
        assert!(factor.is_finite(), "percent_of_log must be finite");
        self.percent_of_log = Some(factor);
        self
    }

    /// Set the size of the initial batch to use.
    pub fn num_scans(mut self, n: usize) -> Self {
        assert!(n >= 2, "num_scans must be at least 2");
        self.num_scans = n;
        self
    }

    /// Set the detector-channel column pattern.
    pub fn channel_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.channel_pattern = pattern.into();
        self
    }

    /// Enable or disable the diagnostic payload.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Check if the configuration is valid.
    ///
    /// Returns an error message if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(target) = self.desired_difference {
            if target.is_nan() {
                return Err("desired_difference must not be NaN".to_string());
            }
        }
        if let Some(factor) = self.percent_of_log {
            if !factor.is_finite() {
                return Err("percent_of_log must be finite".to_string());
            }
        }
        if self.num_scans < 2 {
            return Err("num_scans must be at least 2".to_string());
        }
        if self.channel_pattern.is_empty() {
            return Err("channel_pattern must not be empty".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.desired_difference, None);
        assert_eq!(config.percent_of_log, None);
        assert_eq!(config.num_scans, 10);
        assert_eq!(config.channel_pattern, "sdd");
        assert!(!config.verbose);
    }

    #[test]
    fn test_builder_methods() {
        let config = Config::new()
            .desired_difference(0.05)
            .num_scans(12)
            .channel_pattern("sdd3")
            .verbose(true);

        assert_eq!(config.desired_difference, Some(0.05));
        assert_eq!(config.num_scans, 12);
        assert_eq!(config.channel_pattern, "sdd3");
        assert!(config.verbose);
    }

    #[test]
    fn test_log_cutoff_preset() {
        let config = Config::with_log_cutoff();
        assert_eq!(config.percent_of_log, Some(0.4));
        assert_eq!(config.desired_difference, None);
    }

    #[test]
    fn test_validation() {
        assert!(Config::default().validate().is_ok());

        let mut invalid = Config::default();
        invalid.num_scans = 1;
        assert!(invalid.validate().is_err());

        let mut invalid = Config::default();
        invalid.channel_pattern.clear();
        assert!(invalid.validate().is_err());
    }

    #[test]
    #[should_panic]
    fn test_invalid_num_scans() {
        Config::new().num_scans(1);
    }
}
