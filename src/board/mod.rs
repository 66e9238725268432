//! Board model shared by every strategy.
//!
//! Two contractually equivalent representations are provided:
//!
//! - [`Placement`]: permutation form, one column per row. Used by the
//!   exhaustive and genetic strategies.
//! - [`Grid`]: occupancy form, an `n × n` matrix of cells. Used by the
//!   min-conflicts strategy, which may transiently hold several queens in
//!   one row.
//!
//! Conflict counts are always derived from the board on demand. Nothing in
//! this module caches a count across a mutation.

mod grid;
mod placement;

pub use grid::Grid;
pub use placement::{max_fitness, Placement};

/// A board cell as `(row, column)`.
pub type Cell = (usize, usize);

/// Returns `true` if queens on `a` and `b` attack each other.
///
/// Two distinct cells attack when they share a row, a column, or either
/// diagonal. A cell does not attack itself.
pub fn attacks(a: Cell, b: Cell) -> bool {
    if a == b {
        return false;
    }
    a.0 == b.0 || a.1 == b.1 || a.0.abs_diff(b.0) == a.1.abs_diff(b.1)
}
