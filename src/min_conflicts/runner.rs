//! Min-conflicts execution loop.

use std::cmp::{Ordering, Reverse};

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::Rng;
use serde::Serialize;
use tracing::{debug, info};

use super::config::MinConflictsConfig;
use crate::board::{Cell, Grid};
use crate::error::{Error, Result};
use crate::random::rng_from_seed;
use crate::report::{Progress, SolverReport};
use crate::solver::NQueensSolver;

/// A strict improvement of the best board during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Improvement {
    /// Step at which the board was reached (0 = initial placement).
    pub step: usize,
    /// Attacking pairs on that board.
    pub conflicts: usize,
}

#[derive(Debug, Clone)]
struct BestBoard {
    grid: Grid,
    conflicts: usize,
    step: usize,
}

/// Min-conflicts solver over an occupancy grid.
///
/// Generic over its random source so tests can inject a seeded generator.
///
/// # Examples
///
/// ```
/// use u_nqueens::min_conflicts::{MinConflictsConfig, MinConflictsSolver};
/// use u_nqueens::NQueensSolver;
///
/// let config = MinConflictsConfig::default().with_seed(7);
/// let mut solver = MinConflictsSolver::new(1, config).unwrap();
/// assert!(solver.solve());
/// assert_eq!(solver.best_conflicts(), Some(0));
/// ```
#[derive(Debug, Clone)]
pub struct MinConflictsSolver<R = StdRng> {
    n: usize,
    config: MinConflictsConfig,
    rng: R,
    board: Grid,
    steps: usize,
    best: Option<BestBoard>,
    improvements: Vec<Improvement>,
}

impl MinConflictsSolver<StdRng> {
    /// Creates a solver seeded from [`MinConflictsConfig::seed`].
    pub fn new(n: usize, config: MinConflictsConfig) -> Result<Self> {
        let rng = rng_from_seed(config.seed);
        Self::with_rng(n, config, rng)
    }
}

impl<R: Rng> MinConflictsSolver<R> {
    /// Strategy identifier.
    pub const NAME: &'static str = "min-conflicts";

    /// Creates a solver drawing from `rng`. The config seed is ignored.
    pub fn with_rng(n: usize, config: MinConflictsConfig, rng: R) -> Result<Self> {
        if n == 0 {
            return Err(Error::InvalidBoardSize(n));
        }
        config.validate().map_err(Error::InvalidConfig)?;
        Ok(Self {
            n,
            config,
            rng,
            board: Grid::new(n),
            steps: 0,
            best: None,
            improvements: Vec::new(),
        })
    }

    /// The configuration in use.
    pub fn config(&self) -> &MinConflictsConfig {
        &self.config
    }

    /// Steps executed by the last run.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Lowest-conflict board seen by the last run.
    pub fn best_board(&self) -> Option<&Grid> {
        self.best.as_ref().map(|b| &b.grid)
    }

    /// Attacking pairs on [`best_board`](Self::best_board).
    pub fn best_conflicts(&self) -> Option<usize> {
        self.best.as_ref().map(|b| b.conflicts)
    }

    /// Step at which [`best_board`](Self::best_board) was reached.
    pub fn best_step(&self) -> Option<usize> {
        self.best.as_ref().map(|b| b.step)
    }

    /// Every strict improvement of the best board, in order.
    pub fn improvements(&self) -> &[Improvement] {
        &self.improvements
    }

    /// Puts `n` queens on distinct random cells.
    fn place_initial_queens(&mut self) {
        let mut placed = 0;
        while placed < self.n {
            let row = self.rng.random_range(0..self.n);
            let col = self.rng.random_range(0..self.n);
            if !self.board.is_occupied(row, col) {
                self.board.place(row, col);
                placed += 1;
            }
        }
    }

    fn should_stop(&self, conflicts: usize) -> bool {
        conflicts == 0 || (self.config.limit_steps && self.steps >= self.config.max_steps)
    }

    /// A uniformly random queen among those with the most conflicts.
    fn most_conflicted_queen(&mut self) -> Cell {
        let board = &self.board;
        let ties = argmax_ties(board.queens(), |(r, c)| board.conflicts_at(r, c));
        *ties
            .choose(&mut self.rng)
            .expect("board holds at least one queen")
    }

    /// A uniformly random empty cell among those with the fewest conflicts.
    fn best_position(&mut self) -> Cell {
        let board = &self.board;
        let ties = argmax_ties(board.empty_cells(), |(r, c)| {
            Reverse(board.conflicts_at(r, c))
        });
        *ties
            .choose(&mut self.rng)
            .expect("board has at least one empty cell")
    }

    fn record_if_better(&mut self, conflicts: usize) {
        if self.best.as_ref().is_some_and(|b| conflicts >= b.conflicts) {
            return;
        }
        debug!(
            event = "best_improved",
            strategy = Self::NAME,
            step = self.steps,
            conflicts,
        );
        self.best = Some(BestBoard {
            grid: self.board.clone(),
            conflicts,
            step: self.steps,
        });
        self.improvements.push(Improvement {
            step: self.steps,
            conflicts,
        });
    }
}

impl<R: Rng> NQueensSolver for MinConflictsSolver<R> {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn board_size(&self) -> usize {
        self.n
    }

    fn solve(&mut self) -> bool {
        info!(
            event = "solve_start",
            strategy = Self::NAME,
            n = self.n,
            max_steps = self.config.max_steps,
            limit_steps = self.config.limit_steps,
        );

        self.board = Grid::new(self.n);
        self.steps = 0;
        self.best = None;
        self.improvements.clear();

        self.place_initial_queens();
        let mut conflicts = self.board.total_conflicts();
        self.record_if_better(conflicts);

        while !self.should_stop(conflicts) {
            let (row, col) = self.most_conflicted_queen();
            self.board.remove(row, col);
            let (row, col) = self.best_position();
            self.board.place(row, col);
            self.steps += 1;

            conflicts = self.board.total_conflicts();
            self.record_if_better(conflicts);
        }

        let solved = self.best_conflicts() == Some(0);
        info!(
            event = "solve_end",
            strategy = Self::NAME,
            solved,
            steps = self.steps,
            best_conflicts = self.best_conflicts(),
            best_step = self.best_step(),
        );
        solved
    }

    fn report(&self) -> SolverReport {
        SolverReport::from_grid(
            Self::NAME,
            self.n,
            self.best_board(),
            Progress::Steps {
                taken: self.steps,
                best_at: self.best_step().unwrap_or(0),
            },
        )
    }
}

/// Every item whose key equals the maximum key, in iteration order.
fn argmax_ties<K: Ord>(
    cells: impl Iterator<Item = Cell>,
    mut key: impl FnMut(Cell) -> K,
) -> Vec<Cell> {
    let mut best: Option<K> = None;
    let mut ties = Vec::new();
    for cell in cells {
        let k = key(cell);
        match best.as_ref().map(|b| k.cmp(b)) {
            None | Some(Ordering::Greater) => {
                best = Some(k);
                ties.clear();
                ties.push(cell);
            }
            Some(Ordering::Equal) => ties.push(cell),
            Some(Ordering::Less) => {}
        }
    }
    ties
}
