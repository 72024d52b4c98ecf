//! Rectangular grid of cell symbols.

use std::fmt;
use serde::{Serialize, Deserialize};
use super::automaton::CellularError;

/// Placeholder used for cells that have not been seeded yet.
pub const UNINITIALIZED_CELL: char = '?';

/// A `rows × cols` block of single-character cell symbols, stored row-major.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawGrid")]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<char>,
}

/// Unchecked wire form of a [`Grid`].
#[derive(Deserialize)]
struct RawGrid {
    rows: usize,
    cols: usize,
    cells: Vec<char>,
}

impl TryFrom<RawGrid> for Grid {
    type Error = CellularError;

    fn try_from(raw: RawGrid) -> Result<Self, Self::Error> {
        let expected = raw.rows.saturating_mul(raw.cols);
        if raw.cells.len() != expected {
            return Err(CellularError::GridShape {
                rows: raw.rows,
                cols: raw.cols,
                expected,
                found: raw.cells.len(),
            });
        }
        Ok(Self {
            rows: raw.rows,
            cols: raw.cols,
            cells: raw.cells,
        })
    }
}

impl Grid {
    /// Create a grid with every cell set to `fill`.
    pub fn new(rows: usize, cols: usize, fill: char) -> Self {
        Self {
            rows,
            cols,
            cells: vec![fill; rows * cols],
        }
    }

    /// Create a grid of [`UNINITIALIZED_CELL`] placeholders.
    pub fn uninitialized(rows: usize, cols: usize) -> Self {
        Self::new(rows, cols, UNINITIALIZED_CELL)
    }

    /// Build a grid by evaluating `f(row, col)` for every cell.
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> char) -> Self {
        let mut cells = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                cells.push(f(row, col));
            }
        }
        Self { rows, cols, cells }
    }

    /// Parse a block of text where each line is one row.
    ///
    /// A single trailing newline is accepted and `\r\n` line endings are
    /// normalized. Every row must hold the same number of symbols.
    pub fn parse(text: &str) -> Result<Self, CellularError> {
        let body = text.strip_suffix('\n').unwrap_or(text);
        if body.is_empty() {
            return Err(CellularError::MalformedGrid { row: 0, expected: 1, found: 0 });
        }

        let lines: Vec<Vec<char>> = body
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line).chars().collect())
            .collect();

        let cols = lines[0].len();
        if cols == 0 {
            return Err(CellularError::MalformedGrid { row: 0, expected: 1, found: 0 });
        }

        let mut cells = Vec::with_capacity(lines.len() * cols);
        for (row, line) in lines.iter().enumerate() {
            if line.len() != cols {
                return Err(CellularError::MalformedGrid {
                    row,
                    expected: cols,
                    found: line.len(),
                });
            }
            cells.extend_from_slice(line);
        }

        Ok(Self {
            rows: lines.len(),
            cols,
            cells,
        })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Read a cell inside the grid.
    ///
    /// # Panics
    /// Panics if the coordinate is out of range.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> char {
        assert!(
            row < self.rows && col < self.cols,
            "cell ({}, {}) out of range ({}x{})",
            row, col, self.rows, self.cols
        );
        self.cells[row * self.cols + col]
    }

    /// Write a cell inside the grid.
    ///
    /// # Panics
    /// Panics if the coordinate is out of range.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, symbol: char) {
        assert!(
            row < self.rows && col < self.cols,
            "cell ({}, {}) out of range ({}x{})",
            row, col, self.rows, self.cols
        );
        self.cells[row * self.cols + col] = symbol;
    }

    /// Iterate over the rows as slices.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[char]> {
        // chunks() rejects a zero size; a zero-width grid has no cells anyway.
        self.cells.chunks(self.cols.max(1))
    }

    /// Iterate over `(row, col, symbol)` triples in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, char)> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &symbol)| (i / cols, i % cols, symbol))
    }

    /// Number of cells holding `symbol`.
    pub fn count(&self, symbol: char) -> usize {
        self.cells.iter().filter(|&&c| c == symbol).count()
    }
}

impl fmt::Display for Grid {
    /// One line per row, each terminated by a newline.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.iter_rows() {
            for symbol in row {
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grid")
            .field("rows", &self.rows)
            .field("cols", &self.cols)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rectangular() {
        let grid = Grid::parse(".X.\n.X.\n").unwrap();
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.cols(), 3);
        assert_eq!(grid.get(0, 1), 'X');
        assert_eq!(grid.get(1, 2), '.');
    }

    #[test]
    fn test_parse_without_trailing_newline() {
        let grid = Grid::parse("ab\ncd").unwrap();
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.get(1, 0), 'c');
    }

    #[test]
    fn test_parse_crlf() {
        let grid = Grid::parse("ab\r\ncd\r\n").unwrap();
        assert_eq!(grid.cols(), 2);
        assert_eq!(grid.to_string(), "ab\ncd\n");
    }

    #[test]
    fn test_parse_ragged_rows() {
        let err = Grid::parse("...\n..\n...\n").unwrap_err();
        assert_eq!(err, CellularError::MalformedGrid { row: 1, expected: 3, found: 2 });
    }

    #[test]
    fn test_parse_ragged_last_row() {
        let err = Grid::parse("...\n...\n.").unwrap_err();
        assert_eq!(err, CellularError::MalformedGrid { row: 2, expected: 3, found: 1 });
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(Grid::parse(""), Err(CellularError::MalformedGrid { .. })));
        assert!(matches!(Grid::parse("\n"), Err(CellularError::MalformedGrid { .. })));
    }

    #[test]
    fn test_display() {
        let grid = Grid::from_fn(2, 3, |r, c| if (r + c) % 2 == 0 { 'X' } else { '.' });
        assert_eq!(grid.to_string(), "X.X\n.X.\n");
    }

    #[test]
    fn test_cells_iter_and_count() {
        let mut grid = Grid::new(2, 2, '.');
        grid.set(1, 0, 'X');
        let found: Vec<_> = grid.cells().filter(|&(_, _, s)| s == 'X').collect();
        assert_eq!(found, vec![(1, 0, 'X')]);
        assert_eq!(grid.count('.'), 3);
    }

    #[test]
    fn test_deserialize_checks_shape() {
        let grid: Grid = serde_json::from_str(r#"{"rows":1,"cols":2,"cells":[".","X"]}"#).unwrap();
        assert_eq!(grid.get(0, 1), 'X');

        let err = serde_json::from_str::<Grid>(r#"{"rows":3,"cols":3,"cells":["."]}"#).unwrap_err();
        assert!(err.to_string().contains("needs 9 cells"), "{}", err);
    }

    #[test]
    fn test_serialize_roundtrip() {
        let grid = Grid::parse(".X
X.
").unwrap();
        let back: Grid = serde_json::from_str(&serde_json::to_string(&grid).unwrap()).unwrap();
        assert_eq!(back, grid);
    }

    #[test]
    #[should_panic]
    fn test_get_out_of_range() {
        Grid::new(2, 2, '.').get(2, 0);
    }
}
