//! Min-conflicts local search.
//!
//! A single-board trajectory method. Each step removes the queen involved in
//! the most attacking pairs and puts it back on the empty cell where it would
//! be attacked least. Ties on both sides are broken uniformly at random, so
//! the trajectory has no directional bias from scan order.
//!
//! The search is not monotonic: a step can raise the conflict count. The
//! runner therefore keeps the best board seen and reports that one, even
//! when the step budget runs out first.
//!
//! # Complexity
//!
//! O(n³) per step (every empty cell is rescored over the full board),
//! O(steps · n³) in total.
//!
//! # References
//!
//! - Minton et al. (1992), "Minimizing conflicts: a heuristic repair method
//!   for constraint satisfaction and scheduling problems"

mod config;
mod runner;

pub use config::MinConflictsConfig;
pub use runner::{Improvement, MinConflictsSolver};
