//! Solver reports and their text rendering.

use std::fmt;

use serde::Serialize;

use crate::board::{Grid, Placement};

/// Search effort spent by a solver, in the unit natural to its strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Progress {
    /// Permutations examined by exhaustive search.
    Permutations { checked: u64 },

    /// Queen relocations made by local search.
    Steps {
        /// Total steps executed.
        taken: usize,
        /// Step at which the reported board was reached.
        best_at: usize,
    },

    /// Generations evolved by the genetic algorithm.
    Generations { taken: usize },
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Progress::Permutations { checked } => write!(f, "Permutations checked: {checked}"),
            Progress::Steps { taken, best_at } => {
                write!(f, "Steps: {taken} (best board reached at step {best_at})")
            }
            Progress::Generations { taken } => write!(f, "Generations: {taken}"),
        }
    }
}

/// Final state of a solver after [`solve`](crate::NQueensSolver::solve).
///
/// `board` is `None` when the solver has nothing to show: exhaustive search
/// on an unsolvable size, or any solver queried before it ran.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolverReport {
    /// Strategy identifier, e.g. `"min-conflicts"`.
    pub strategy: String,

    /// Board size.
    pub n: usize,

    /// Whether the reported board is a solution.
    pub solved: bool,

    /// Permutation form of the reported board, for strategies that use it.
    pub placement: Option<Placement>,

    /// The reported board.
    pub board: Option<Grid>,

    /// Attacking pairs on the reported board.
    pub conflicts: Option<usize>,

    /// Search effort.
    pub progress: Progress,
}

impl SolverReport {
    /// Report for a permutation-form board.
    pub fn from_placement(
        strategy: &str,
        n: usize,
        placement: Option<&Placement>,
        progress: Progress,
    ) -> Self {
        let conflicts = placement.map(Placement::attacking_pairs);
        Self {
            strategy: strategy.to_string(),
            n,
            solved: conflicts == Some(0),
            placement: placement.cloned(),
            board: placement.map(Placement::to_grid),
            conflicts,
            progress,
        }
    }

    /// Report for an occupancy-grid board.
    pub fn from_grid(strategy: &str, n: usize, grid: Option<&Grid>, progress: Progress) -> Self {
        let conflicts = grid.map(Grid::total_conflicts);
        Self {
            strategy: strategy.to_string(),
            n,
            solved: grid.is_some_and(Grid::is_solution),
            placement: None,
            board: grid.cloned(),
            conflicts,
            progress,
        }
    }
}

impl fmt::Display for SolverReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.solved { "solved" } else { "not solved" };
        writeln!(f, "{} on {}-queens: {status}", self.strategy, self.n)?;
        match &self.board {
            Some(board) => {
                if let Some(placement) = &self.placement {
                    writeln!(f, "Board: {:?}", placement.columns())?;
                }
                write!(f, "{board}")?;
            }
            None => writeln!(f, "No board to show.")?,
        }
        writeln!(f, "{}", self.progress)?;
        if let Some(conflicts) = self.conflicts {
            writeln!(f, "Conflicts: {conflicts}")?;
        }
        Ok(())
    }
}
