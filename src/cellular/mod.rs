//! Cellular automaton rule engine.
//!
//! This module provides:
//! - [`AutomatonKind`] and [`Boundary`] - which rule family runs and how edges resolve
//! - [`Grid`] - a rectangular block of cell symbols
//! - [`Automaton`] - an immutable snapshot that steps into a new snapshot
//! - [`rules`] - neighbor counting and the per-cell transition functions
//! - [`random`] - weighted random seeding

mod kind;
mod grid;
mod automaton;
pub mod rules;
pub mod random;

pub use kind::{AutomatonKind, Boundary};
pub use grid::Grid;
pub use automaton::{Automaton, CellularError, is_valid_alphabet};
pub use random::{sample_index, seeded_rng};
