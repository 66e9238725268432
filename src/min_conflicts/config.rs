//! Min-conflicts configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the min-conflicts local search.
///
/// # Examples
///
/// ```
/// use u_nqueens::min_conflicts::MinConflictsConfig;
///
/// let config = MinConflictsConfig::default()
///     .with_max_steps(5_000)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinConflictsConfig {
    /// Maximum number of queen relocations when step limiting is enabled.
    pub max_steps: usize,

    /// Whether [`max_steps`](Self::max_steps) is enforced.
    ///
    /// Without a limit the search runs until it finds a solution, which
    /// never happens for `n = 2` or `n = 3`.
    pub limit_steps: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for MinConflictsConfig {
    fn default() -> Self {
        Self {
            max_steps: Self::DEFAULT_MAX_STEPS,
            limit_steps: true,
            seed: None,
        }
    }
}

impl MinConflictsConfig {
    /// Step budget used when none is given.
    pub const DEFAULT_MAX_STEPS: usize = 1000;

    /// Sets the step budget.
    pub fn with_max_steps(mut self, steps: usize) -> Self {
        self.max_steps = steps;
        self
    }

    /// Enables or disables the step budget.
    pub fn with_step_limit(mut self, enabled: bool) -> Self {
        self.limit_steps = enabled;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    ///
    /// Returns `Err` with a description if any parameter is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.limit_steps && self.max_steps == 0 {
            return Err("max_steps must be at least 1 when the step limit is enabled".into());
        }
        Ok(())
    }
}
