//! Neighbor counting and per-cell transition functions.
//!
//! Every transition reads only the pre-step grid, so the order in which
//! cells are visited during a step never changes the result.

use super::grid::Grid;
use super::kind::{AutomatonKind, Boundary};

/// Offsets of the 3x3 block around a cell, center excluded.
pub const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    (0, -1),           (0, 1),
    (1, -1),  (1, 0),  (1, 1),
];

/// Read-only view of a grid that resolves out-of-range coordinates
/// through a [`Boundary`] policy.
#[derive(Debug, Clone, Copy)]
pub struct Lookup<'a> {
    grid: &'a Grid,
    boundary: Boundary,
    background: char,
}

impl<'a> Lookup<'a> {
    /// `background` is returned for coordinates outside a truncated grid.
    pub fn new(grid: &'a Grid, boundary: Boundary, background: char) -> Self {
        Self { grid, boundary, background }
    }

    pub fn grid(&self) -> &'a Grid {
        self.grid
    }

    /// Symbol at a possibly out-of-range coordinate.
    pub fn get(&self, row: isize, col: isize) -> char {
        let rows = self.grid.rows() as isize;
        let cols = self.grid.cols() as isize;
        match self.boundary {
            Boundary::Truncate => {
                if row < 0 || col < 0 || row >= rows || col >= cols {
                    self.background
                } else {
                    self.grid.get(row as usize, col as usize)
                }
            }
            Boundary::WrapAround => {
                if rows == 0 || cols == 0 {
                    return self.background;
                }
                self.grid.get(row.rem_euclid(rows) as usize, col.rem_euclid(cols) as usize)
            }
        }
    }

    /// Number of neighbors of `(row, col)` holding `target`.
    ///
    /// Orthogonal neighbors always count; diagonal ones only when
    /// `diagonals` is set.
    pub fn count_neighbors(&self, row: usize, col: usize, target: char, diagonals: bool) -> usize {
        self.count_with_offsets(&NEIGHBOR_OFFSETS, row, col, target, diagonals)
    }

    fn count_with_offsets(
        &self,
        offsets: &[(isize, isize)],
        row: usize,
        col: usize,
        target: char,
        diagonals: bool,
    ) -> usize {
        offsets
            .iter()
            .filter(|(dr, dc)| {
                let dist = dr.abs() + dc.abs();
                dist == 1 || (dist == 2 && diagonals)
            })
            .filter(|(dr, dc)| self.get(row as isize + dr, col as isize + dc) == target)
            .count()
    }
}

/// Next symbol of a cell under the epidemic rule.
///
/// Alphabet order: `[empty, infected, healthy]`.
///
/// An empty cell with exactly three occupied neighbors is born infected when
/// infected neighbors strictly outnumber healthy ones, healthy otherwise. An
/// occupied cell with two or three occupied neighbors becomes infected when
/// infected neighbors are at least as many as healthy ones, and keeps its
/// state otherwise. Every other cell becomes empty.
pub fn next_epidemic(view: &Lookup<'_>, alphabet: &[char], row: usize, col: usize) -> char {
    let (empty, infected, healthy) = (alphabet[0], alphabet[1], alphabet[2]);
    let num_infected = view.count_neighbors(row, col, infected, true);
    let num_healthy = view.count_neighbors(row, col, healthy, true);
    let num_alive = num_infected + num_healthy;
    let current = view.grid().get(row, col);

    if current == empty && num_alive == 3 {
        if num_infected > num_healthy { infected } else { healthy }
    } else if current != empty && (num_alive == 2 || num_alive == 3) {
        if num_infected >= num_healthy { infected } else { current }
    } else {
        empty
    }
}

/// Next symbol of a cell under Conway's rule (B3/S23).
///
/// Alphabet order: `[dead, live]`.
pub fn next_life(view: &Lookup<'_>, alphabet: &[char], row: usize, col: usize) -> char {
    let (dead, live) = (alphabet[0], alphabet[1]);
    let num_live = view.count_neighbors(row, col, live, true);

    if view.grid().get(row, col) == live {
        if num_live == 2 || num_live == 3 { live } else { dead }
    } else if num_live == 3 {
        live
    } else {
        dead
    }
}

/// Next symbol of a cell under the fire rule.
///
/// Alphabet order: `[growing, ignitable, burning, burnt]`.
///
/// An ignitable cell catches fire from any burning neighbor; every other
/// state advances unconditionally: burning to burnt, burnt to growing,
/// growing to ignitable.
pub fn next_fire(view: &Lookup<'_>, alphabet: &[char], row: usize, col: usize) -> char {
    let (growing, ignitable, burning, burnt) = (alphabet[0], alphabet[1], alphabet[2], alphabet[3]);
    let current = view.grid().get(row, col);

    if current == ignitable {
        if view.count_neighbors(row, col, burning, true) >= 1 { burning } else { ignitable }
    } else if current == burning {
        burnt
    } else if current == burnt {
        growing
    } else {
        ignitable
    }
}

/// Next symbol of a cell for the given rule family.
pub fn next_cell(kind: AutomatonKind, view: &Lookup<'_>, alphabet: &[char], row: usize, col: usize) -> char {
    match kind {
        AutomatonKind::Epidemic => next_epidemic(view, alphabet, row, col),
        AutomatonKind::Life => next_life(view, alphabet, row, col),
        AutomatonKind::Fire => next_fire(view, alphabet, row, col),
    }
}

/// Apply one global step: every cell of the result is computed from `grid`.
pub fn step_grid(kind: AutomatonKind, boundary: Boundary, alphabet: &[char], grid: &Grid) -> Grid {
    let view = Lookup::new(grid, boundary, alphabet[0]);
    Grid::from_fn(grid.rows(), grid.cols(), |row, col| {
        next_cell(kind, &view, alphabet, row, col)
    })
}
