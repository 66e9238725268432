//! Exhaustive permutation search.
//!
//! Enumerates column permutations in lexicographic order and stops at the
//! first one with no shared diagonal. Rows and columns cannot collide in a
//! permutation, so only diagonals are checked.
//!
//! # Complexity
//!
//! O(n! · n²) in the worst case. Intended for small boards only.

use itertools::Itertools;
use tracing::info;

use crate::board::Placement;
use crate::error::{Error, Result};
use crate::report::{Progress, SolverReport};
use crate::solver::NQueensSolver;

/// Deterministic brute-force solver.
///
/// # Examples
///
/// ```
/// use u_nqueens::{ExhaustiveSolver, NQueensSolver};
///
/// let mut solver = ExhaustiveSolver::new(4).unwrap();
/// assert!(solver.solve());
/// assert_eq!(solver.solution().unwrap().columns(), &[1, 3, 0, 2]);
///
/// let mut solver = ExhaustiveSolver::new(3).unwrap();
/// assert!(!solver.solve());
/// assert!(solver.solution().is_none());
/// ```
#[derive(Debug, Clone)]
pub struct ExhaustiveSolver {
    n: usize,
    solution: Option<Placement>,
    checked: u64,
}

impl ExhaustiveSolver {
    /// Strategy identifier.
    pub const NAME: &'static str = "naive";

    /// Creates a solver for an `n × n` board.
    pub fn new(n: usize) -> Result<Self> {
        if n == 0 {
            return Err(Error::InvalidBoardSize(n));
        }
        Ok(Self {
            n,
            solution: None,
            checked: 0,
        })
    }

    /// The first valid permutation, if one was found.
    pub fn solution(&self) -> Option<&Placement> {
        self.solution.as_ref()
    }

    /// Number of permutations examined by the last [`solve`](NQueensSolver::solve).
    pub fn permutations_checked(&self) -> u64 {
        self.checked
    }
}

impl NQueensSolver for ExhaustiveSolver {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn board_size(&self) -> usize {
        self.n
    }

    fn solve(&mut self) -> bool {
        info!(event = "solve_start", strategy = Self::NAME, n = self.n);

        self.solution = None;
        self.checked = 0;

        for columns in (0..self.n).permutations(self.n) {
            self.checked += 1;
            let candidate = Placement::new(columns);
            if !candidate.has_diagonal_conflict() {
                self.solution = Some(candidate);
                break;
            }
        }

        let solved = self.solution.is_some();
        info!(
            event = "solve_end",
            strategy = Self::NAME,
            solved,
            permutations = self.checked,
        );
        solved
    }

    fn report(&self) -> SolverReport {
        SolverReport::from_placement(
            Self::NAME,
            self.n,
            self.solution.as_ref(),
            Progress::Permutations {
                checked: self.checked,
            },
        )
    }
}
