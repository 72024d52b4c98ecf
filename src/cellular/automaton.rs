//! Immutable automaton snapshots.
//!
//! An [`Automaton`] is a grid together with the rule family, boundary
//! policy and alphabet it runs under. Stepping never mutates a snapshot;
//! [`Automaton::next`] returns a fresh one.

use std::fmt;
use rand::Rng;
use serde::{Serialize, Deserialize};
use thiserror::Error;
use tracing::{info, warn};
use super::grid::Grid;
use super::kind::{AutomatonKind, Boundary};
use super::random::sample_index;
use super::rules;

/// One grid state plus the configuration it evolves under.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawAutomaton")]
pub struct Automaton {
    kind: AutomatonKind,
    boundary: Boundary,
    alphabet: Vec<char>,
    grid: Grid,
}

/// Unchecked wire form of an [`Automaton`]; validated through [`Automaton::new`].
#[derive(Deserialize)]
struct RawAutomaton {
    kind: AutomatonKind,
    boundary: Boundary,
    alphabet: Vec<char>,
    grid: Grid,
}

impl TryFrom<RawAutomaton> for Automaton {
    type Error = CellularError;

    fn try_from(raw: RawAutomaton) -> Result<Self, Self::Error> {
        let alphabet: String = raw.alphabet.into_iter().collect();
        Automaton::new(raw.kind, raw.boundary, &alphabet, raw.grid)
    }
}

impl Automaton {
    /// Create an automaton from an explicit grid.
    ///
    /// Fails if the alphabet size does not match `kind` or if any cell holds
    /// a symbol outside the alphabet.
    pub fn new(
        kind: AutomatonKind,
        boundary: Boundary,
        alphabet: &str,
        grid: Grid,
    ) -> Result<Self, CellularError> {
        let alphabet = check_alphabet(kind, alphabet)?;
        if let Some((row, col, symbol)) = grid.cells().find(|(_, _, s)| !alphabet.contains(s)) {
            return Err(CellularError::DisallowedCell { symbol, row, col });
        }

        info!(%kind, %boundary, rows = grid.rows(), cols = grid.cols(), "loaded automaton");
        Ok(Self { kind, boundary, alphabet, grid })
    }

    /// Create an automaton whose cells are drawn independently at random.
    ///
    /// `weights[k]` is the relative frequency of `alphabet[k]`. Weights past
    /// the alphabet length are ignored.
    pub fn random<R: Rng + ?Sized>(
        rows: usize,
        cols: usize,
        kind: AutomatonKind,
        boundary: Boundary,
        alphabet: &str,
        weights: &[u32],
        rng: &mut R,
    ) -> Result<Self, CellularError> {
        let alphabet = check_alphabet(kind, alphabet)?;
        if weights.len() < alphabet.len() {
            return Err(CellularError::DistributionTooShort {
                expected: alphabet.len(),
                found: weights.len(),
            });
        }
        if weights.len() > alphabet.len() {
            warn!(
                ignored = weights.len() - alphabet.len(),
                "distribution has more weights than allowed cells"
            );
        }

        let weights = &weights[..alphabet.len()];
        if weights.iter().all(|&w| w == 0) {
            return Err(CellularError::DegenerateDistribution);
        }

        let mut grid = Grid::uninitialized(rows, cols);
        for row in 0..rows {
            for col in 0..cols {
                grid.set(row, col, alphabet[sample_index(weights, rng)?]);
            }
        }

        info!(%kind, %boundary, rows, cols, ?weights, "seeded random automaton");
        Ok(Self { kind, boundary, alphabet, grid })
    }

    /// The automaton one step later.
    pub fn next(&self) -> Self {
        Self {
            kind: self.kind,
            boundary: self.boundary,
            alphabet: self.alphabet.clone(),
            grid: rules::step_grid(self.kind, self.boundary, &self.alphabet, &self.grid),
        }
    }

    #[inline]
    pub fn kind(&self) -> AutomatonKind {
        self.kind
    }

    #[inline]
    pub fn boundary(&self) -> Boundary {
        self.boundary
    }

    #[inline]
    pub fn alphabet(&self) -> &[char] {
        &self.alphabet
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.grid.cols()
    }

    /// Number of cells holding `symbol`.
    pub fn population(&self, symbol: char) -> usize {
        self.grid.count(symbol)
    }

    /// Description of what each symbol of the alphabet means.
    pub fn legend(&self) -> String {
        self.kind.legend(&self.alphabet)
    }
}

impl fmt::Display for Automaton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.grid, f)
    }
}

impl fmt::Debug for Automaton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Automaton")
            .field("kind", &self.kind)
            .field("boundary", &self.boundary)
            .field("alphabet", &self.alphabet.iter().collect::<String>())
            .field("rows", &self.grid.rows())
            .field("cols", &self.grid.cols())
            .finish()
    }
}

/// Returns true if `alphabet` has the number of symbols `kind` requires.
pub fn is_valid_alphabet(kind: AutomatonKind, alphabet: &str) -> bool {
    alphabet.chars().count() == kind.expected_symbols()
}

fn check_alphabet(kind: AutomatonKind, alphabet: &str) -> Result<Vec<char>, CellularError> {
    let symbols: Vec<char> = alphabet.chars().collect();
    if symbols.len() != kind.expected_symbols() {
        return Err(CellularError::InvalidAlphabetLength {
            kind,
            expected: kind.expected_symbols(),
            found: symbols.len(),
        });
    }
    Ok(symbols)
}

/// Errors raised while building an automaton.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CellularError {
    #[error("the {kind} simulation needs {expected} allowed cells, got {found}")]
    InvalidAlphabetLength { kind: AutomatonKind, expected: usize, found: usize },

    #[error("the cell state '{symbol}' is not allowed (row {row}, column {col})")]
    DisallowedCell { symbol: char, row: usize, col: usize },

    #[error("all rows should be of the same length: row {row} has {found} cells, expected {expected}")]
    MalformedGrid { row: usize, expected: usize, found: usize },

    #[error("a {rows}x{cols} grid needs {expected} cells, got {found}")]
    GridShape { rows: usize, cols: usize, expected: usize, found: usize },

    #[error("the distribution must contain at least one positive weight")]
    DegenerateDistribution,

    #[error("the distribution has {found} weights but there are {expected} allowed cells")]
    DistributionTooShort { expected: usize, found: usize },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cellular::random::seeded_rng;

    #[test]
    fn test_alphabet_length_checked() {
        let cases = [
            (AutomatonKind::Life, ".XH"),
            (AutomatonKind::Epidemic, ".X"),
            (AutomatonKind::Fire, "._B"),
        ];
        for (kind, alphabet) in cases {
            let err = Automaton::new(kind, Boundary::Truncate, alphabet, Grid::new(1, 1, '.')).unwrap_err();
            assert!(matches!(err, CellularError::InvalidAlphabetLength { .. }), "{:?}", err);
        }
        assert!(is_valid_alphabet(AutomatonKind::Life, "ab"));
        assert!(is_valid_alphabet(AutomatonKind::Epidemic, "abc"));
        assert!(is_valid_alphabet(AutomatonKind::Fire, "abcd"));
    }

    #[test]
    fn test_disallowed_cell_reported() {
        let grid = Grid::parse("..\n.Z\n").unwrap();
        let err = Automaton::new(AutomatonKind::Life, Boundary::Truncate, ".X", grid).unwrap_err();
        assert_eq!(err, CellularError::DisallowedCell { symbol: 'Z', row: 1, col: 1 });
        assert!(err.to_string().contains("'Z'"));
    }

    #[test]
    fn test_random_cells_in_alphabet() {
        let mut rng = seeded_rng(Some(3));
        let cases = [
            (AutomatonKind::Life, ".X", vec![1, 1]),
            (AutomatonKind::Epidemic, ".XH", vec![1, 1, 1]),
            (AutomatonKind::Fire, "._Bb", vec![1, 1, 1, 1]),
        ];
        for (kind, alphabet, weights) in cases {
            let automaton = Automaton::random(20, 30, kind, Boundary::WrapAround, alphabet, &weights, &mut rng).unwrap();
            assert_eq!(automaton.rows(), 20);
            assert_eq!(automaton.cols(), 30);
            assert!(automaton.grid().cells().all(|(_, _, s)| alphabet.contains(s)));
        }
    }

    #[test]
    fn test_random_ignores_extra_weights() {
        let mut rng = seeded_rng(Some(3));
        let automaton = Automaton::random(4, 4, AutomatonKind::Life, Boundary::Truncate, ".X", &[5, 1, 1, 1], &mut rng);
        assert!(automaton.is_ok());
    }

    #[test]
    fn test_random_rejects_bad_distributions() {
        let mut rng = seeded_rng(Some(3));
        let err = Automaton::random(2, 2, AutomatonKind::Fire, Boundary::Truncate, "._Bb", &[1, 1], &mut rng).unwrap_err();
        assert_eq!(err, CellularError::DistributionTooShort { expected: 4, found: 2 });

        let err = Automaton::random(2, 2, AutomatonKind::Life, Boundary::Truncate, ".X", &[0, 0], &mut rng).unwrap_err();
        assert_eq!(err, CellularError::DegenerateDistribution);
    }

    #[test]
    fn test_next_leaves_snapshot_untouched() {
        let grid = Grid::parse("...\n.X.\n...\n").unwrap();
        let automaton = Automaton::new(AutomatonKind::Life, Boundary::Truncate, ".X", grid.clone()).unwrap();
        let next = automaton.next();
        assert_eq!(automaton.grid(), &grid);
        assert_eq!(next.population('X'), 0);
        assert_eq!(next.kind(), AutomatonKind::Life);
        assert_eq!(next.alphabet(), automaton.alphabet());
    }

    #[test]
    fn test_deserialize_revalidates() {
        let grid = Grid::parse("._\nBb\n").unwrap();
        let automaton = Automaton::new(AutomatonKind::Fire, Boundary::WrapAround, "._Bb", grid).unwrap();
        let json = serde_json::to_string(&automaton).unwrap();
        assert_eq!(serde_json::from_str::<Automaton>(&json).unwrap(), automaton);

        let short_alphabet = r#"{"kind":"fire","boundary":"truncate","alphabet":["."],"grid":{"rows":1,"cols":1,"cells":["."]}}"#;
        let err = serde_json::from_str::<Automaton>(short_alphabet).unwrap_err();
        assert!(err.to_string().contains("needs 4 allowed cells"), "{}", err);

        let stray_cell = r#"{"kind":"game-of-life","boundary":"truncate","alphabet":[".","X"],"grid":{"rows":1,"cols":2,"cells":[".","Q"]}}"#;
        let err = serde_json::from_str::<Automaton>(stray_cell).unwrap_err();
        assert!(err.to_string().contains("'Q'"), "{}", err);

        let short_grid = r#"{"kind":"game-of-life","boundary":"truncate","alphabet":[".","X"],"grid":{"rows":3,"cols":3,"cells":["."]}}"#;
        assert!(serde_json::from_str::<Automaton>(short_grid).is_err());
    }

    #[test]
    fn test_epidemic_reference_scenario() {
        let grid = Grid::parse(".X.\n.X.\n.X.\n").unwrap();
        let automaton = Automaton::new(AutomatonKind::Epidemic, Boundary::Truncate, ".XH", grid).unwrap();
        assert_eq!(automaton.next().to_string(), "...\nXXX\n...\n");
    }

    #[test]
    fn test_fire_cycle_after_ignition() {
        let grid = Grid::parse("B_\n__\n").unwrap();
        let automaton = Automaton::new(AutomatonKind::Fire, Boundary::Truncate, "._Bb", grid).unwrap();
        let mut history = vec![automaton.grid().get(0, 0)];
        let mut current = automaton;
        for _ in 0..4 {
            current = current.next();
            history.push(current.grid().get(0, 0));
        }
        // No burning neighbor is left by then, so the cell waits as ignitable.
        assert_eq!(history, vec!['B', 'b', '.', '_', '_']);
    }
}
