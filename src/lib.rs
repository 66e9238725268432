//! N-Queens solvers behind one contract.
//!
//! Three interchangeable strategies implement [`NQueensSolver`]:
//!
//! - **Exhaustive search** ([`ExhaustiveSolver`]): lexicographic permutation
//!   enumeration with a diagonal check. Deterministic; small boards only.
//! - **Min-conflicts** ([`min_conflicts`]): local search that repeatedly
//!   moves the most-attacked queen to its least-attacked cell, keeping the
//!   best board seen.
//! - **Genetic algorithm** ([`genetic`]): tournament selection,
//!   single-point crossover and random-reset mutation with full
//!   generational replacement.
//!
//! Every strategy is single-threaded and owns its random source. Seed the
//! configs (or inject a generator) for reproducible runs.
//!
//! # Example
//!
//! ```
//! use u_nqueens::min_conflicts::{MinConflictsConfig, MinConflictsSolver};
//! use u_nqueens::NQueensSolver;
//!
//! let mut solver = MinConflictsSolver::new(8, MinConflictsConfig::default().with_seed(1)).unwrap();
//! let solved = solver.solve();
//! let report = solver.report();
//! assert_eq!(report.solved, solved);
//! println!("{report}");
//! ```

pub mod board;
pub mod error;
pub mod exhaustive;
pub mod genetic;
pub mod min_conflicts;
pub mod random;
pub mod report;
pub mod solver;

pub use error::{CalibrationError, Error, Result};
pub use exhaustive::ExhaustiveSolver;
pub use genetic::GeneticSolver;
pub use min_conflicts::MinConflictsSolver;
pub use report::{Progress, SolverReport};
pub use solver::NQueensSolver;
