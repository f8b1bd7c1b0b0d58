//! Log-domain cutoff derivation.
//!
//! Alternate threshold path: instead of an explicit variance target, the
//! target is derived from the sample itself by scaling the log of the
//! initial noise average. A sample that starts noisy earns a looser
//! cutoff; a sample that starts clean earns a tighter one.

use serde::Serialize;

/// How a derived cutoff was computed, kept for the diagnostic payload.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CutoffInfo {
    /// Mean of the initial noise-difference values.
    pub initial_average: f64,
    /// Natural log of that mean.
    pub log_average: f64,
    /// The derived cutoff: `exp(percent_of_log * log_average)`, i.e. the
    /// threshold whose log is `percent_of_log` times the log of the
    /// initial average.
    pub cutoff: f64,
}

/// Derive a windowed-variance cutoff from the initial noise values.
///
/// The scaling happens in log domain: `ln(cutoff) = percent_of_log *
/// ln(mean(values))`. A factor of 1.0 reproduces the initial average
/// itself; smaller factors tighten the cutoff for averages above one and
/// loosen it below.
pub fn derive_cutoff(values: &[f64], percent_of_log: f64) -> CutoffInfo {
    let initial_average = if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    };
    let log_average = initial_average.ln();
    let cutoff = (percent_of_log * log_average).exp();
    CutoffInfo {
        initial_average,
        log_average,
        cutoff,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_factor_reproduces_the_average() {
        let info = derive_cutoff(&[2.0, 4.0, 6.0], 1.0);
        assert!((info.initial_average - 4.0).abs() < 1e-12);
        assert!((info.cutoff - 4.0).abs() < 1e-12);
    }

    #[test]
    fn factor_scales_in_log_domain() {
        let info = derive_cutoff(&[10.0, 10.0], 0.5);
        // ln(cutoff) = 0.5 * ln(10)  =>  cutoff = sqrt(10)
        assert!((info.cutoff - 10.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn zero_average_gives_zero_cutoff() {
        let info = derive_cutoff(&[0.0, 0.0], 0.4);
        assert_eq!(info.cutoff, 0.0);
    }
}
