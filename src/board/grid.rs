//! Occupancy-grid board.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{attacks, Cell};

/// An `n × n` board of occupied and empty cells.
///
/// Unlike [`Placement`](super::Placement), a grid may hold several queens on
/// one row or column. The min-conflicts search relies on this while it
/// relocates queens one at a time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "GridData")]
pub struct Grid {
    n: usize,
    cells: Vec<bool>,
}

#[derive(Deserialize)]
struct GridData {
    n: usize,
    cells: Vec<bool>,
}

impl TryFrom<GridData> for Grid {
    type Error = String;

    fn try_from(data: GridData) -> Result<Self, Self::Error> {
        let GridData { n, cells } = data;
        if cells.len() != n * n {
            return Err(format!(
                "a {n}x{n} grid needs {} cells, got {}",
                n * n,
                cells.len()
            ));
        }
        Ok(Self { n, cells })
    }
}

impl Grid {
    /// Creates an empty `n × n` grid.
    pub fn new(n: usize) -> Self {
        Self {
            n,
            cells: vec![false; n * n],
        }
    }

    /// Board size `n`.
    pub fn size(&self) -> usize {
        self.n
    }

    /// Returns `true` if a queen stands on `(row, col)`.
    pub fn is_occupied(&self, row: usize, col: usize) -> bool {
        self.cells[self.index(row, col)]
    }

    /// Puts a queen on `(row, col)`.
    pub fn place(&mut self, row: usize, col: usize) {
        let idx = self.index(row, col);
        self.cells[idx] = true;
    }

    /// Removes the queen from `(row, col)`, if any.
    pub fn remove(&mut self, row: usize, col: usize) {
        let idx = self.index(row, col);
        self.cells[idx] = false;
    }

    /// Number of queens on the board.
    pub fn queen_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Occupied cells in row-major order.
    pub fn queens(&self) -> impl Iterator<Item = Cell> + '_ {
        let n = self.n;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, occupied)| **occupied)
            .map(move |(i, _)| (i / n, i % n))
    }

    /// Empty cells in row-major order.
    pub fn empty_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        let n = self.n;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, occupied)| !**occupied)
            .map(move |(i, _)| (i / n, i % n))
    }

    /// Number of queens attacking `(row, col)`, excluding the cell itself.
    ///
    /// Works for empty cells too, giving the conflicts a queen would have if
    /// placed there. Each of the four lines through the cell is scanned
    /// independently, so the cost is O(n).
    pub fn conflicts_at(&self, row: usize, col: usize) -> usize {
        self.row_conflicts(row, col)
            + self.column_conflicts(row, col)
            + self.main_diagonal_conflicts(row, col)
            + self.anti_diagonal_conflicts(row, col)
    }

    /// Total attacking pairs on the board.
    ///
    /// Sums [`conflicts_at`](Self::conflicts_at) over every queen and
    /// halves the result, since each pair is seen from both ends. O(n²).
    pub fn total_conflicts(&self) -> usize {
        self.queens()
            .map(|(row, col)| self.conflicts_at(row, col))
            .sum::<usize>()
            / 2
    }

    /// Attacking pairs counted directly over every pair of queens. O(q²).
    ///
    /// Independent of the line scans behind
    /// [`total_conflicts`](Self::total_conflicts); use it to cross-check.
    pub fn attacking_pairs(&self) -> usize {
        let queens: Vec<Cell> = self.queens().collect();
        let mut pairs = 0;
        for (i, &a) in queens.iter().enumerate() {
            for &b in &queens[i + 1..] {
                if attacks(a, b) {
                    pairs += 1;
                }
            }
        }
        pairs
    }

    /// Returns `true` if the grid holds exactly `n` mutually non-attacking
    /// queens.
    pub fn is_solution(&self) -> bool {
        self.queen_count() == self.n && self.attacking_pairs() == 0
    }

    fn index(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.n && col < self.n,
            "cell ({row}, {col}) outside a {n}x{n} board",
            n = self.n
        );
        row * self.n + col
    }

    fn row_conflicts(&self, row: usize, col: usize) -> usize {
        (0..self.n)
            .filter(|&c| c != col && self.is_occupied(row, c))
            .count()
    }

    fn column_conflicts(&self, row: usize, col: usize) -> usize {
        (0..self.n)
            .filter(|&r| r != row && self.is_occupied(r, col))
            .count()
    }

    // Top-left to bottom-right: col - row is constant.
    fn main_diagonal_conflicts(&self, row: usize, col: usize) -> usize {
        (0..self.n)
            .filter(|&r| r != row)
            .filter_map(|r| (col + r).checked_sub(row).map(|c| (r, c)))
            .filter(|&(r, c)| c < self.n && self.is_occupied(r, c))
            .count()
    }

    // Top-right to bottom-left: col + row is constant.
    fn anti_diagonal_conflicts(&self, row: usize, col: usize) -> usize {
        (0..self.n)
            .filter(|&r| r != row)
            .filter_map(|r| (col + row).checked_sub(r).map(|c| (r, c)))
            .filter(|&(r, c)| c < self.n && self.is_occupied(r, c))
            .count()
    }
}

impl fmt::Display for Grid {
    /// One line per row, `Q` for a queen and `.` for an empty cell.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.n {
            let line = (0..self.n)
                .map(|col| if self.is_occupied(row, col) { "Q" } else { "." })
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_with(n: usize, queens: &[Cell]) -> Grid {
        let mut grid = Grid::new(n);
        for &(r, c) in queens {
            grid.place(r, c);
        }
        grid
    }

    #[test]
    fn test_empty_grid() {
        let grid = Grid::new(4);
        assert_eq!(grid.queen_count(), 0);
        assert_eq!(grid.total_conflicts(), 0);
        assert_eq!(grid.empty_cells().count(), 16);
        assert!(!grid.is_solution());
    }

    #[test]
    fn test_place_and_remove() {
        let mut grid = Grid::new(3);
        grid.place(1, 2);
        assert!(grid.is_occupied(1, 2));
        assert_eq!(grid.queens().collect::<Vec<_>>(), vec![(1, 2)]);
        grid.remove(1, 2);
        assert!(!grid.is_occupied(1, 2));
    }

    #[test]
    fn test_conflicts_each_line() {
        // Centre queen on a 5x5 board with one attacker per line.
        let grid = grid_with(5, &[(2, 2), (2, 0), (4, 2), (0, 0), (0, 4)]);
        assert_eq!(grid.row_conflicts(2, 2), 1);
        assert_eq!(grid.column_conflicts(2, 2), 1);
        assert_eq!(grid.main_diagonal_conflicts(2, 2), 1);
        assert_eq!(grid.anti_diagonal_conflicts(2, 2), 1);
        assert_eq!(grid.conflicts_at(2, 2), 4);
    }

    #[test]
    fn test_conflicts_at_empty_cell() {
        let grid = grid_with(4, &[(0, 0), (3, 3)]);
        // (1, 1) sits on the main diagonal between both queens.
        assert_eq!(grid.conflicts_at(1, 1), 2);
        // (1, 2) is attacked by nobody.
        assert_eq!(grid.conflicts_at(1, 2), 0);
    }

    #[test]
    fn test_no_blocking_along_lines() {
        // Three queens on one row: every pair counts.
        let grid = grid_with(4, &[(0, 0), (0, 1), (0, 3)]);
        assert_eq!(grid.total_conflicts(), 3);
        assert_eq!(grid.attacking_pairs(), 3);
    }

    #[test]
    fn test_total_conflicts_matches_pairwise() {
        let grid = grid_with(6, &[(0, 1), (1, 3), (2, 3), (3, 0), (4, 4), (5, 5)]);
        assert_eq!(grid.total_conflicts(), grid.attacking_pairs());
    }

    #[test]
    fn test_solution_grid() {
        let grid = grid_with(4, &[(0, 2), (1, 0), (2, 3), (3, 1)]);
        assert!(grid.is_solution());
        assert_eq!(grid.total_conflicts(), 0);
    }

    #[test]
    fn test_measurement_is_idempotent() {
        let grid = grid_with(5, &[(0, 0), (1, 1), (2, 4), (3, 2), (4, 2)]);
        let before = grid.clone();
        let first = grid.total_conflicts();
        let second = grid.total_conflicts();
        assert_eq!(first, second);
        assert_eq!(grid, before);
    }

    #[test]
    fn test_display() {
        let grid = grid_with(2, &[(0, 1), (1, 0)]);
        assert_eq!(grid.to_string(), ". Q\nQ .\n");
    }

    #[test]
    fn test_deserialize_checks_cell_count() {
        let err = toml::from_str::<Grid>("n = 2\ncells = [true, false, false]\n").unwrap_err();
        assert!(err.to_string().contains("a 2x2 grid needs 4 cells, got 3"));

        let grid: Grid = toml::from_str("n = 2\ncells = [false, true, true, false]\n").unwrap();
        assert_eq!(grid, grid_with(2, &[(0, 1), (1, 0)]));
    }

    #[test]
    #[should_panic(expected = "outside a 3x3 board")]
    fn test_out_of_bounds_panics() {
        Grid::new(3).place(3, 0);
    }
}
