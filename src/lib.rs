//! # scantrend
//!
//! Predict how many additional beamline scans a sample needs before its
//! detector noise averages out below a target level.
//!
//! Scans of a sample are noisy; stacking enough of them cancels the noise,
//! but noisier samples need more passes. Given an initial batch of
//! interpolated scans, this crate:
//!
//! 1. reduces the batch to a scalar noise-difference series (the variance
//!    of the change each new scan makes to the running mean), discarding
//!    anomalous reads along the way,
//! 2. checks whether the trailing window of that series is already quiet
//!    enough, and if not,
//! 3. extrapolates the trend one scan at a time until the windowed
//!    variance reaches the target, with a hard iteration cap as the
//!    bounded-runtime guarantee.
//!
//! Loading, alignment/interpolation, and plotting live upstream and
//! downstream of this crate; see [`scan`] for the input seam and
//! [`Diagnostics`] for the plottable output record.
//!
//! ## Quick start
//!
//! ```ignore
//! use scantrend::ScanPredictor;
//!
//! let prediction = ScanPredictor::new()
//!     .percent_of_log(0.4)
//!     .verbose(true)
//!     .predict(&scans)?;
//!
//! match prediction.additional_scans {
//!     0 => println!("initial batch is sufficient"),
//!     n => println!("take {n} more scans"),
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Core modules
mod config;
mod diagnostics;
mod error;
mod extract;
mod predictor;
mod types;

// Functional modules
pub mod constants;
pub mod cutoff;
pub mod engine;
pub mod scan;
pub mod statistics;
pub mod trend;

// Re-exports for public API
pub use config::Config;
pub use diagnostics::Diagnostics;
pub use error::{InputError, PredictError, TrendError};
pub use extract::extract_noise_series;
pub use predictor::{predict_num_scans, Prediction, ScanPredictor};
pub use types::{NoiseSeries, ScanMatrix};

// Re-export the collaborator seam types for convenience
pub use scan::{get_channel_columns, RawScan};
pub use trend::{LinearTrend, TrendModel};
