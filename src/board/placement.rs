//! Permutation-form board.

use serde::{Deserialize, Serialize};

use super::Grid;

/// Number of distinct queen pairs on an `n`-queen board, `n·(n−1)/2`.
///
/// This is the fitness of a solved board.
pub fn max_fitness(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}

/// A board in permutation form: `columns[row]` is the column of the queen
/// on `row`.
///
/// Values need not be distinct. Boards produced by crossover and mutation
/// routinely share columns; those collisions count as attacking pairs.
///
/// # Examples
///
/// ```
/// use u_nqueens::board::Placement;
///
/// let board = Placement::new(vec![1, 3, 0, 2]);
/// assert!(board.is_solution());
/// assert_eq!(board.fitness(), 6);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<usize>", into = "Vec<usize>")]
pub struct Placement(Vec<usize>);

impl Placement {
    /// Wraps a column vector.
    ///
    /// # Panics
    /// Panics if any column is outside `[0, columns.len())`.
    pub fn new(columns: Vec<usize>) -> Self {
        match Self::try_from(columns) {
            Ok(placement) => placement,
            Err(msg) => panic!("{msg}"),
        }
    }

    /// Board size `n`.
    pub fn size(&self) -> usize {
        self.0.len()
    }

    /// Column assignment per row.
    pub fn columns(&self) -> &[usize] {
        &self.0
    }

    /// Column of the queen on `row`.
    pub fn column(&self, row: usize) -> usize {
        self.0[row]
    }

    /// Moves the queen on `row` to `column`.
    ///
    /// # Panics
    /// Panics if `column` is outside the board.
    pub fn set_column(&mut self, row: usize, column: usize) {
        assert!(column < self.size(), "column {column} out of range");
        self.0[row] = column;
    }

    /// Number of attacking pairs.
    ///
    /// Rows `i < j` attack when they hold the same column or when their
    /// column distance equals their row distance. O(n²).
    pub fn attacking_pairs(&self) -> usize {
        let cols = &self.0;
        let mut pairs = 0;
        for i in 0..cols.len() {
            for j in (i + 1)..cols.len() {
                if cols[i] == cols[j] || cols[i].abs_diff(cols[j]) == j - i {
                    pairs += 1;
                }
            }
        }
        pairs
    }

    /// Number of non-attacking pairs. Higher is better.
    pub fn fitness(&self) -> usize {
        max_fitness(self.size()) - self.attacking_pairs()
    }

    /// Returns `true` when no two queens attack each other.
    pub fn is_solution(&self) -> bool {
        self.attacking_pairs() == 0
    }

    /// Returns `true` if any two rows share a diagonal.
    ///
    /// Column collisions are ignored; callers that enumerate true
    /// permutations cannot produce them.
    pub fn has_diagonal_conflict(&self) -> bool {
        let cols = &self.0;
        (0..cols.len()).any(|i| {
            ((i + 1)..cols.len()).any(|j| cols[i].abs_diff(cols[j]) == j - i)
        })
    }

    /// The same board with the row order reversed.
    pub fn reversed(&self) -> Self {
        Self(self.0.iter().rev().copied().collect())
    }

    /// Occupancy-grid form of this board.
    pub fn to_grid(&self) -> Grid {
        let mut grid = Grid::new(self.size());
        for (row, &col) in self.0.iter().enumerate() {
            grid.place(row, col);
        }
        grid
    }

    /// Consumes the board and returns the column vector.
    pub fn into_inner(self) -> Vec<usize> {
        self.0
    }
}

impl From<Placement> for Vec<usize> {
    fn from(p: Placement) -> Self {
        p.0
    }
}

impl TryFrom<Vec<usize>> for Placement {
    type Error = String;

    fn try_from(columns: Vec<usize>) -> Result<Self, Self::Error> {
        let n = columns.len();
        if columns.iter().any(|&c| c >= n) {
            return Err(format!(
                "column out of range for a {n}x{n} board: {columns:?}"
            ));
        }
        Ok(Self(columns))
    }
}
