//! Windowed variance statistics for noise-difference series.
//!
//! Everything here is a pure function of its input slice: no state is held
//! across series, and callers own the buffers.

mod window;

pub use window::{lowest_variance, population_variance, sliding_window_variance, LowestVariance};
