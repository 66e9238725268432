//! Genetic algorithm for N-Queens.
//!
//! Candidates are permutation-form boards whose columns may repeat. The
//! fitness of a board is its number of non-attacking pairs, so a solution
//! scores `n·(n−1)/2`.
//!
//! # Key Types
//!
//! - [`GeneticConfig`]: population size, generation budget, tournament size,
//!   mutation rate
//! - [`GeneticSolver`]: runs the generational loop
//! - [`Candidate`]: a board with its fitness
//! - [`MutationRateModel`]: source of the mutation rate, queried once per
//!   solver
//!
//! # Submodules
//!
//! - [`operators`]: tournament selection, single-point crossover,
//!   random-reset mutation
//! - [`calibration`]: fixed and data-driven mutation-rate models
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and
//!   Machine Learning*

pub mod calibration;
mod config;
pub mod operators;
mod runner;
mod types;

pub use calibration::{CalibrationSample, CalibrationTable, FixedMutationRate, MutationRateModel};
pub use config::GeneticConfig;
pub use runner::GeneticSolver;
pub use types::Candidate;
