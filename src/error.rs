//! Error types.
//!
//! Failing to find a solution is never an error. Solvers report it through
//! the `bool` returned by [`NQueensSolver::solve`](crate::NQueensSolver::solve).
//! The errors below cover construction only.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building a solver.
#[derive(Debug, Error)]
pub enum Error {
    /// The board must hold at least one queen.
    #[error("invalid board size {0}: at least one queen is required")]
    InvalidBoardSize(usize),

    /// A configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The mutation-rate calibration could not produce a rate.
    #[error(transparent)]
    Calibration(#[from] CalibrationError),
}

/// Errors raised by a [`MutationRateModel`](crate::genetic::MutationRateModel).
#[derive(Debug, Error)]
pub enum CalibrationError {
    /// The calibration dataset could not be read.
    #[error("failed to read calibration data from {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The calibration dataset is not valid TOML or has the wrong shape.
    #[error("failed to parse calibration data: {0}")]
    Parse(#[from] toml::de::Error),

    /// A sample in the dataset is malformed.
    #[error("calibration sample for n = {n} is malformed: {reason}")]
    InvalidSample { n: usize, reason: String },

    /// A mutation rate fell outside `[0, 1]`.
    #[error("mutation rate {0} is outside [0, 1]")]
    RateOutOfRange(f64),

    /// No mutation rate has enough samples to interpolate.
    #[error("no mutation rate has at least two calibration samples (requested n = {n})")]
    NoData { n: usize },
}

/// Result alias for solver construction.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            Error::InvalidBoardSize(0).to_string(),
            "invalid board size 0: at least one queen is required"
        );
        assert_eq!(
            Error::InvalidConfig("population_size must be at least 2".into()).to_string(),
            "invalid configuration: population_size must be at least 2"
        );
    }

    #[test]
    fn test_calibration_is_transparent() {
        let err: Error = CalibrationError::RateOutOfRange(1.5).into();
        assert_eq!(err.to_string(), "mutation rate 1.5 is outside [0, 1]");
        assert!(matches!(
            err,
            Error::Calibration(CalibrationError::RateOutOfRange(_))
        ));
    }
}
