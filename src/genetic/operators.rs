//! Genetic operators for column-vector boards.
//!
//! # Selection
//!
//! - [`tournament`]: keep the fittest of `k` uniform draws, with replacement
//!
//! # Crossover
//!
//! - [`single_point_crossover`]: prefix of one parent, suffix of the other
//!
//! # Mutation
//!
//! - [`random_reset_mutation`]: with some probability, overwrite one gene
//!
//! None of these operators repair duplicate columns. Collisions are left
//! for the fitness function to penalise.
//!
//! # References
//!
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and
//!   Machine Learning*
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"

use rand::Rng;

use super::types::Candidate;
use crate::board::Placement;

/// A uniformly random board; columns may repeat.
pub fn random_placement<R: Rng>(n: usize, rng: &mut R) -> Placement {
    Placement::new((0..n).map(|_| rng.random_range(0..n)).collect())
}

/// Tournament selection.
///
/// Draws `k` candidates uniformly at random with replacement and returns
/// the one with the highest fitness. The earliest draw wins ties.
///
/// # Complexity
/// O(k)
///
/// # Panics
/// Panics if `population` is empty.
pub fn tournament<'a, R: Rng>(
    population: &'a [Candidate],
    k: usize,
    rng: &mut R,
) -> &'a Candidate {
    assert!(
        !population.is_empty(),
        "cannot select from empty population"
    );
    let n = population.len();

    let mut best = &population[rng.random_range(0..n)];
    for _ in 1..k.max(1) {
        let contender = &population[rng.random_range(0..n)];
        if contender.fitness() > best.fitness() {
            best = contender;
        }
    }
    best
}

/// Single-point crossover.
///
/// Picks a cut in `[0, n)` and returns `parent1[..cut] ++ parent2[cut..]`
/// as a fresh vector. Neither parent is touched.
///
/// # Panics
/// Panics if parents have different lengths or are empty.
pub fn single_point_crossover<R: Rng>(
    parent1: &[usize],
    parent2: &[usize],
    rng: &mut R,
) -> Vec<usize> {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");
    assert!(n > 0, "parents must not be empty");

    let cut = rng.random_range(0..n);
    parent1[..cut]
        .iter()
        .chain(&parent2[cut..])
        .copied()
        .collect()
}

/// Random-reset mutation.
///
/// With probability `rate`, sets one random position to a uniformly random
/// value in `[0, n)`. Returns whether a mutation happened; the new value may
/// equal the old one.
pub fn random_reset_mutation<R: Rng>(genes: &mut [usize], rate: f64, rng: &mut R) -> bool {
    if genes.is_empty() || rng.random_range(0.0..1.0) >= rate {
        return false;
    }
    let n = genes.len();
    let idx = rng.random_range(0..n);
    genes[idx] = rng.random_range(0..n);
    true
}
