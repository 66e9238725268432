//! Population members.

use serde::Serialize;

use crate::board::Placement;

/// A candidate board and its fitness.
///
/// Fitness is computed once, when the candidate is built. Candidates are
/// never modified afterwards: offspring are assembled and mutated as plain
/// column vectors and only then wrapped, so the stored fitness always
/// matches the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    placement: Placement,
    fitness: usize,
}

impl Candidate {
    /// Wraps a board and evaluates it.
    pub fn new(placement: Placement) -> Self {
        let fitness = placement.fitness();
        Self { placement, fitness }
    }

    /// The board.
    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    /// Non-attacking pairs on the board. Higher is better.
    pub fn fitness(&self) -> usize {
        self.fitness
    }

    /// Unwraps the board.
    pub fn into_placement(self) -> Placement {
        self.placement
    }
}

impl From<Placement> for Candidate {
    fn from(placement: Placement) -> Self {
        Self::new(placement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fitness_matches_board() {
        let candidate = Candidate::new(Placement::new(vec![0, 2, 0]));
        assert_eq!(candidate.fitness(), 2);
        assert_eq!(candidate.fitness(), candidate.placement().fitness());
    }

    #[test]
    fn test_perfect_candidate() {
        let candidate: Candidate = Placement::new(vec![2, 0, 3, 1]).into();
        assert_eq!(candidate.fitness(), 6);
        assert_eq!(candidate.into_placement().columns(), &[2, 0, 3, 1]);
    }
}
