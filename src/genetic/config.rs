//! Genetic algorithm configuration.
//!
//! [`GeneticConfig`] holds the parameters of the evolutionary loop. They
//! are all derived from the board size, except the mutation rate, which
//! comes from a calibration model.

use serde::{Deserialize, Serialize};

/// Configuration for the genetic algorithm.
///
/// # Defaults
///
/// ```
/// use u_nqueens::genetic::GeneticConfig;
///
/// let config = GeneticConfig::for_board(8, 0.3);
/// assert_eq!(config.population_size, 10);
/// assert_eq!(config.max_generations, 6_400);
/// assert_eq!(config.tournament_size, 5);
///
/// let config = GeneticConfig::for_board(20, 0.3);
/// assert_eq!(config.population_size, 20);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_nqueens::genetic::GeneticConfig;
///
/// let config = GeneticConfig::for_board(8, 0.5)
///     .with_population_size(40)
///     .with_max_generations(1_000)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneticConfig {
    /// Number of candidates per generation.
    pub population_size: usize,

    /// Generation budget.
    pub max_generations: usize,

    /// Candidates sampled (with replacement) per tournament.
    pub tournament_size: usize,

    /// Probability of mutating a child (0.0–1.0).
    pub mutation_rate: f64,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl GeneticConfig {
    /// Lower bound on the population size.
    pub const MIN_POPULATION_SIZE: usize = 10;

    /// Tournament size used by [`for_board`](Self::for_board).
    pub const DEFAULT_TOURNAMENT_SIZE: usize = 5;

    /// Generations allowed per board cell.
    pub const GENERATIONS_PER_CELL: usize = 100;

    /// Standard parameters for an `n × n` board.
    ///
    /// - population: `max(10, n)`
    /// - generations: `100 · n²`
    /// - tournament size: 5
    pub fn for_board(n: usize, mutation_rate: f64) -> Self {
        Self {
            population_size: n.max(Self::MIN_POPULATION_SIZE),
            max_generations: Self::GENERATIONS_PER_CELL * n * n,
            tournament_size: Self::DEFAULT_TOURNAMENT_SIZE,
            mutation_rate,
            seed: None,
        }
    }

    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the generation budget.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the tournament size.
    pub fn with_tournament_size(mut self, k: usize) -> Self {
        self.tournament_size = k;
        self
    }

    /// Sets the mutation rate, clamped to `[0, 1]`.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
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
        if self.population_size == 0 {
            return Err("population_size must be at least 1".into());
        }
        if self.max_generations == 0 {
            return Err("max_generations must be at least 1".into());
        }
        if self.tournament_size == 0 {
            return Err("tournament_size must be at least 1".into());
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(format!(
                "mutation_rate must be within [0, 1], got {}",
                self.mutation_rate
            ));
        }
        Ok(())
    }
}
