//! The contract shared by every strategy.

use crate::report::SolverReport;

/// An N-Queens solving strategy.
///
/// Strategies share nothing beyond this contract. Each one owns its board,
/// population and random source exclusively.
///
/// The intended sequence is [`solve`](Self::solve) once, then
/// [`report`](Self::report). Calling `report` first is harmless: it returns
/// a report with no board.
///
/// The trait is object safe, so callers can pick a strategy at runtime:
///
/// ```
/// use u_nqueens::{ExhaustiveSolver, NQueensSolver};
///
/// let mut solver: Box<dyn NQueensSolver> = Box::new(ExhaustiveSolver::new(6).unwrap());
/// assert!(solver.solve());
/// assert_eq!(solver.report().conflicts, Some(0));
/// ```
pub trait NQueensSolver {
    /// Short strategy identifier used in logs and reports.
    fn name(&self) -> &'static str;

    /// Board size `n`.
    fn board_size(&self) -> usize;

    /// Runs the search to completion.
    ///
    /// Returns `true` iff a board with zero attacking pairs was found within
    /// the strategy's budget. Running out of budget is a normal outcome.
    fn solve(&mut self) -> bool;

    /// The final board and diagnostic counters.
    fn report(&self) -> SolverReport;
}
