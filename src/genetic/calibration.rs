//! Mutation-rate calibration.
//!
//! The genetic solver asks a [`MutationRateModel`] for its mutation rate
//! exactly once, at construction. Two models are provided:
//!
//! - [`FixedMutationRate`]: a constant.
//! - [`CalibrationTable`]: a dataset of measured average generations per
//!   `(n, rate)`, interpolated piecewise-linearly in `n`.
//!
//! # Dataset format
//!
//! ```toml
//! [[sample]]
//! n = 4
//! mutation_rates = [0.1, 0.5]
//! average_generations = [107.3, 11.3]
//!
//! [[sample]]
//! n = 8
//! mutation_rates = [0.1, 0.5]
//! average_generations = [2935.8, 365.8]
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CalibrationError;

/// Maps a board size to the mutation rate the genetic solver should use.
///
/// Implementations must be deterministic for a given dataset and `n`, and
/// return a probability in `[0, 1]`.
pub trait MutationRateModel {
    /// Recommended mutation rate for an `n × n` board.
    fn best_mutation_rate(&self, n: usize) -> Result<f64, CalibrationError>;
}

impl<M: MutationRateModel + ?Sized> MutationRateModel for &M {
    fn best_mutation_rate(&self, n: usize) -> Result<f64, CalibrationError> {
        (**self).best_mutation_rate(n)
    }
}

impl<M: MutationRateModel + ?Sized> MutationRateModel for Box<M> {
    fn best_mutation_rate(&self, n: usize) -> Result<f64, CalibrationError> {
        (**self).best_mutation_rate(n)
    }
}

/// The same rate for every board size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedMutationRate(f64);

impl FixedMutationRate {
    /// Wraps `rate`, rejecting values outside `[0, 1]`.
    pub fn new(rate: f64) -> Result<Self, CalibrationError> {
        if !(0.0..=1.0).contains(&rate) {
            return Err(CalibrationError::RateOutOfRange(rate));
        }
        Ok(Self(rate))
    }

    /// The wrapped rate.
    pub fn rate(&self) -> f64 {
        self.0
    }
}

impl MutationRateModel for FixedMutationRate {
    fn best_mutation_rate(&self, _n: usize) -> Result<f64, CalibrationError> {
        Ok(self.0)
    }
}

/// Measurements for one board size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationSample {
    /// Board size.
    pub n: usize,
    /// Mutation rates tried at this size.
    pub mutation_rates: Vec<f64>,
    /// Average generations to a solution, parallel to `mutation_rates`.
    pub average_generations: Vec<f64>,
}

impl CalibrationSample {
    fn generations_for(&self, rate: f64) -> Option<f64> {
        self.mutation_rates
            .iter()
            .position(|&r| r == rate)
            .and_then(|i| self.average_generations.get(i).copied())
    }
}

/// A mutation-rate model backed by measurements.
///
/// For every distinct rate measured at two or more board sizes, the
/// average generation count is interpolated linearly in `n` (and
/// extrapolated past either end of the data). The rate with the fewest
/// predicted generations wins; ties go to the smaller rate.
///
/// # Examples
///
/// ```
/// use u_nqueens::genetic::{CalibrationTable, MutationRateModel};
///
/// let table = CalibrationTable::from_toml_str(r#"
///     [[sample]]
///     n = 4
///     mutation_rates = [0.1, 0.5]
///     average_generations = [20.0, 40.0]
///
///     [[sample]]
///     n = 8
///     mutation_rates = [0.1, 0.5]
///     average_generations = [400.0, 100.0]
/// "#).unwrap();
///
/// assert_eq!(table.best_mutation_rate(4).unwrap(), 0.1);
/// assert_eq!(table.best_mutation_rate(8).unwrap(), 0.5);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CalibrationData")]
pub struct CalibrationTable {
    #[serde(rename = "sample", default)]
    samples: Vec<CalibrationSample>,
}

/// Unvalidated dataset as it appears on disk.
#[derive(Deserialize)]
struct CalibrationData {
    #[serde(rename = "sample", default)]
    samples: Vec<CalibrationSample>,
}

impl TryFrom<CalibrationData> for CalibrationTable {
    type Error = CalibrationError;

    fn try_from(data: CalibrationData) -> Result<Self, Self::Error> {
        Self::new(data.samples)
    }
}

impl CalibrationTable {
    /// Builds a table from samples, validating each one.
    pub fn new(samples: Vec<CalibrationSample>) -> Result<Self, CalibrationError> {
        let table = Self { samples };
        table.validate()?;
        Ok(table)
    }

    /// Parses a TOML dataset.
    pub fn from_toml_str(s: &str) -> Result<Self, CalibrationError> {
        let data: CalibrationData = toml::from_str(s)?;
        Self::try_from(data)
    }

    /// Reads a TOML dataset from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CalibrationError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| CalibrationError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// The samples, in dataset order.
    pub fn samples(&self) -> &[CalibrationSample] {
        &self.samples
    }

    /// Distinct mutation rates across all samples, ascending.
    pub fn rates(&self) -> Vec<f64> {
        let mut rates: Vec<f64> = self
            .samples
            .iter()
            .flat_map(|s| s.mutation_rates.iter().copied())
            .collect();
        rates.sort_by(f64::total_cmp);
        rates.dedup();
        rates
    }

    /// Interpolated average generations for `rate` at board size `n`.
    ///
    /// `None` if fewer than two samples measured `rate`.
    pub fn predict_generations(&self, rate: f64, n: usize) -> Option<f64> {
        let mut points: Vec<(f64, f64)> = self
            .samples
            .iter()
            .filter_map(|s| s.generations_for(rate).map(|g| (s.n as f64, g)))
            .collect();
        if points.len() < 2 {
            return None;
        }
        points.sort_by(|a, b| a.0.total_cmp(&b.0));
        Some(interpolate(&points, n as f64))
    }

    /// Checks every sample for consistency.
    pub fn validate(&self) -> Result<(), CalibrationError> {
        for (i, sample) in self.samples.iter().enumerate() {
            let invalid = |reason: String| CalibrationError::InvalidSample {
                n: sample.n,
                reason,
            };
            if sample.mutation_rates.len() != sample.average_generations.len() {
                return Err(invalid(format!(
                    "{} mutation rates but {} averages",
                    sample.mutation_rates.len(),
                    sample.average_generations.len()
                )));
            }
            if let Some(&rate) = sample
                .mutation_rates
                .iter()
                .find(|r| !(0.0..=1.0).contains(*r))
            {
                return Err(CalibrationError::RateOutOfRange(rate));
            }
            if sample.average_generations.iter().any(|g| !g.is_finite()) {
                return Err(invalid("average generations must be finite".into()));
            }
            if self.samples[..i].iter().any(|s| s.n == sample.n) {
                return Err(invalid("duplicate board size".into()));
            }
        }
        Ok(())
    }
}

impl MutationRateModel for CalibrationTable {
    fn best_mutation_rate(&self, n: usize) -> Result<f64, CalibrationError> {
        let best = self
            .rates()
            .into_iter()
            .filter_map(|rate| self.predict_generations(rate, n).map(|g| (rate, g)))
            .min_by(|a, b| a.1.total_cmp(&b.1));

        match best {
            Some((rate, generations)) => {
                debug!(
                    event = "mutation_rate_calibrated",
                    n,
                    rate,
                    predicted_generations = generations,
                );
                Ok(rate)
            }
            None => Err(CalibrationError::NoData { n }),
        }
    }
}

/// Piecewise-linear interpolation over points sorted by `x` with distinct
/// `x` values. Outside the data the nearest segment is extended.
fn interpolate(points: &[(f64, f64)], x: f64) -> f64 {
    let segment = points
        .windows(2)
        .find(|w| x <= w[1].0)
        .unwrap_or(&points[points.len() - 2..]);
    let (x0, y0) = segment[0];
    let (x1, y1) = segment[1];
    y0 + (x - x0) * (y1 - y0) / (x1 - x0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(n: usize, rates: &[f64], generations: &[f64]) -> CalibrationSample {
        CalibrationSample {
            n,
            mutation_rates: rates.to_vec(),
            average_generations: generations.to_vec(),
        }
    }

    fn two_rate_table() -> CalibrationTable {
        CalibrationTable::new(vec![
            sample(4, &[0.1, 0.5], &[20.0, 40.0]),
            sample(8, &[0.1, 0.5], &[400.0, 100.0]),
        ])
        .unwrap()
    }

    #[test]
    fn test_fixed_rate() {
        let model = FixedMutationRate::new(0.25).unwrap();
        assert_eq!(model.best_mutation_rate(4).unwrap(), 0.25);
        assert_eq!(model.best_mutation_rate(100).unwrap(), 0.25);
    }

    #[test]
    fn test_fixed_rate_rejects_out_of_range() {
        assert!(matches!(
            FixedMutationRate::new(1.01),
            Err(CalibrationError::RateOutOfRange(_))
        ));
        assert!(FixedMutationRate::new(-0.1).is_err());
        assert!(FixedMutationRate::new(0.0).is_ok());
        assert!(FixedMutationRate::new(1.0).is_ok());
    }

    #[test]
    fn test_interpolate_inside_and_outside() {
        let points = [(4.0, 20.0), (8.0, 400.0), (10.0, 500.0)];
        assert!((interpolate(&points, 6.0) - 210.0).abs() < 1e-9);
        assert!((interpolate(&points, 9.0) - 450.0).abs() < 1e-9);
        assert!((interpolate(&points, 8.0) - 400.0).abs() < 1e-9);
        // Left of the data: first segment extended.
        assert!((interpolate(&points, 2.0) + 170.0).abs() < 1e-9);
        // Right of the data: last segment extended.
        assert!((interpolate(&points, 12.0) - 600.0).abs() < 1e-9);
    }

    #[test]
    fn test_prediction_requires_two_points() {
        let table = CalibrationTable::new(vec![
            sample(4, &[0.1, 0.9], &[20.0, 5.0]),
            sample(8, &[0.1], &[400.0]),
        ])
        .unwrap();
        assert!(table.predict_generations(0.1, 6).is_some());
        assert!(table.predict_generations(0.9, 6).is_none());
        // 0.9 looks best at n = 4 but cannot be interpolated.
        assert_eq!(table.best_mutation_rate(4).unwrap(), 0.1);
    }

    #[test]
    fn test_best_rate_crosses_over() {
        let table = two_rate_table();
        // At n = 4 the low rate wins, at n = 8 the high rate wins.
        assert_eq!(table.best_mutation_rate(4).unwrap(), 0.1);
        assert_eq!(table.best_mutation_rate(8).unwrap(), 0.5);
        // Beyond the data the trend continues.
        assert_eq!(table.best_mutation_rate(16).unwrap(), 0.5);
    }

    #[test]
    fn test_ties_prefer_smaller_rate() {
        let table = CalibrationTable::new(vec![
            sample(4, &[0.3, 0.2], &[10.0, 10.0]),
            sample(6, &[0.3, 0.2], &[10.0, 10.0]),
        ])
        .unwrap();
        assert_eq!(table.best_mutation_rate(5).unwrap(), 0.2);
    }

    #[test]
    fn test_is_deterministic() {
        let table = two_rate_table();
        let a = table.best_mutation_rate(7).unwrap();
        let b = table.best_mutation_rate(7).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_no_data() {
        let table = CalibrationTable::default();
        assert!(matches!(
            table.best_mutation_rate(8),
            Err(CalibrationError::NoData { n: 8 })
        ));
    }

    #[test]
    fn test_rates_sorted_and_distinct() {
        let table = CalibrationTable::new(vec![
            sample(4, &[0.5, 0.1], &[1.0, 2.0]),
            sample(5, &[0.1, 0.3], &[1.0, 2.0]),
        ])
        .unwrap();
        assert_eq!(table.rates(), vec![0.1, 0.3, 0.5]);
    }

    #[test]
    fn test_validate_length_mismatch() {
        let err = CalibrationTable::new(vec![sample(4, &[0.1, 0.2], &[1.0])]).unwrap_err();
        assert!(matches!(err, CalibrationError::InvalidSample { n: 4, .. }));
    }

    #[test]
    fn test_validate_rate_out_of_range() {
        let err = CalibrationTable::new(vec![sample(4, &[1.5], &[1.0])]).unwrap_err();
        assert!(matches!(err, CalibrationError::RateOutOfRange(_)));
    }

    #[test]
    fn test_validate_duplicate_size() {
        let err = CalibrationTable::new(vec![
            sample(4, &[0.1], &[1.0]),
            sample(4, &[0.1], &[2.0]),
        ])
        .unwrap_err();
        assert!(matches!(err, CalibrationError::InvalidSample { n: 4, .. }));
    }

    #[test]
    fn test_validate_non_finite() {
        let err = CalibrationTable::new(vec![sample(4, &[0.1], &[f64::NAN])]).unwrap_err();
        assert!(matches!(err, CalibrationError::InvalidSample { .. }));
    }

    #[test]
    fn test_from_toml_str() {
        let table = CalibrationTable::from_toml_str(
            r#"
            [[sample]]
            n = 4
            mutation_rates = [0.1, 0.5]
            average_generations = [20.0, 40.0]

            [[sample]]
            n = 8
            mutation_rates = [0.1, 0.5]
            average_generations = [400.0, 100.0]
            "#,
        )
        .unwrap();
        assert_eq!(table, two_rate_table());
    }

    #[test]
    fn test_from_toml_str_reports_malformed_sample() {
        let err = CalibrationTable::from_toml_str(
            "[[sample]]\nn = 6\nmutation_rates = [0.1, 0.2]\naverage_generations = [1.0]\n",
        )
        .unwrap_err();
        assert!(matches!(err, CalibrationError::InvalidSample { n: 6, .. }));
    }

    #[test]
    fn test_deserialize_validates() {
        let text = "[[sample]]\nn = 6\nmutation_rates = [0.1, 0.2]\naverage_generations = [1.0]\n";
        let err = toml::from_str::<CalibrationTable>(text).unwrap_err();
        assert!(err.to_string().contains("2 mutation rates but 1 averages"));

        let text = "[[sample]]\nn = 4\nmutation_rates = [0.1]\naverage_generations = [3.0]\n";
        let table: CalibrationTable = toml::from_str(text).unwrap();
        assert_eq!(table.samples().len(), 1);
    }

    #[test]
    fn test_mismatched_sample_has_no_prediction() {
        let short = sample(6, &[0.1, 0.2], &[1.0]);
        assert_eq!(short.generations_for(0.1), Some(1.0));
        assert_eq!(short.generations_for(0.2), None);
    }

    #[test]
    fn test_from_toml_str_parse_error() {
        let err = CalibrationTable::from_toml_str("[[sample]]\nn = \"four\"\n").unwrap_err();
        assert!(matches!(err, CalibrationError::Parse(_)));
    }

    #[test]
    fn test_from_path_missing_file() {
        let err = CalibrationTable::from_path("does/not/exist.toml").unwrap_err();
        assert!(matches!(err, CalibrationError::Io { .. }));
        assert!(err.to_string().contains("does/not/exist.toml"));
    }

    #[test]
    fn test_bundled_dataset() {
        let table = CalibrationTable::from_path(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/data/mutation_rates.toml"
        ))
        .unwrap();
        assert_eq!(table.samples().len(), 5);
        for n in [4, 8, 12, 30] {
            let rate = table.best_mutation_rate(n).unwrap();
            assert!((0.0..=1.0).contains(&rate));
        }
    }

    #[test]
    fn test_model_through_reference_and_box() {
        let fixed = FixedMutationRate::new(0.4).unwrap();
        let by_ref: &dyn MutationRateModel = &fixed;
        let boxed: Box<dyn MutationRateModel> = Box::new(fixed);
        assert_eq!(by_ref.best_mutation_rate(3).unwrap(), 0.4);
        assert_eq!(boxed.best_mutation_rate(3).unwrap(), 0.4);
    }
}
