//! Simulation configuration.
//!
//! A [`SimulationConfig`] can be loaded from a JSON file and then overridden
//! field by field from the command line. Missing fields take the defaults
//! below.

use std::path::Path;
use serde::{Serialize, Deserialize};
use thiserror::Error;
use tracing::info;
use crate::cellular::{seeded_rng, Automaton, AutomatonKind, Boundary, CellularError, Grid};

pub const DEFAULT_ROWS: usize = 5;
pub const DEFAULT_COLS: usize = 5;
pub const DEFAULT_STEPS: usize = 5;
pub const DEFAULT_WEIGHTS: [u32; 4] = [5, 1, 1, 1];

/// Process exit statuses, one per failure class.
pub mod exit_status {
    pub const WRONG_VALUE: i32 = 1;
    pub const WRONG_TYPE: i32 = 2;
    pub const WRONG_BOUNDARY: i32 = 3;
    pub const WRONG_DISTRIBUTION: i32 = 4;
    pub const INCONSISTENT_ARGS: i32 = 6;
    pub const BAD_OPTION: i32 = 7;
    pub const STDIN_WITH_ROW_COL: i32 = 8;
    pub const DISALLOWED_CELL: i32 = 9;
    pub const MALFORMED_GRID: i32 = 10;
}

/// Everything needed to build and run one simulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub rows: usize,
    pub cols: usize,
    /// Number of frames to print or to browse interactively.
    pub steps: usize,
    pub kind: AutomatonKind,
    pub boundary: Boundary,
    /// Allowed cells; `None` means the default alphabet of `kind`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alphabet: Option<String>,
    /// Relative frequency of each allowed cell in a random seed.
    pub weights: Vec<u32>,
    pub interactive: bool,
    /// Fixed RNG seed for reproducible random grids.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            steps: DEFAULT_STEPS,
            kind: AutomatonKind::default(),
            boundary: Boundary::default(),
            alphabet: None,
            weights: DEFAULT_WEIGHTS.to_vec(),
            interactive: false,
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Parse a configuration from JSON text.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load a configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;
        let config = Self::from_json(&text)?;
        info!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Override the rule family and alphabet together.
    ///
    /// Both must be given or neither; the alphabet of one family is
    /// meaningless for another.
    pub fn set_kind(&mut self, kind: Option<AutomatonKind>, alphabet: Option<String>) -> Result<(), ConfigError> {
        match (kind, alphabet) {
            (Some(kind), Some(alphabet)) => {
                self.kind = kind;
                self.alphabet = Some(alphabet);
                Ok(())
            }
            (None, None) => Ok(()),
            _ => Err(ConfigError::InconsistentKind),
        }
    }

    /// The allowed cells in effect.
    pub fn alphabet(&self) -> &str {
        self.alphabet.as_deref().unwrap_or(self.kind.default_alphabet())
    }

    /// Build the seed automaton, from `initial` when given, otherwise at random.
    pub fn build_seed(&self, initial: Option<Grid>) -> Result<Automaton, ConfigError> {
        let automaton = match initial {
            Some(grid) => Automaton::new(self.kind, self.boundary, self.alphabet(), grid)?,
            None => {
                let mut rng = seeded_rng(self.seed);
                Automaton::random(
                    self.rows,
                    self.cols,
                    self.kind,
                    self.boundary,
                    self.alphabet(),
                    &self.weights,
                    &mut rng,
                )?
            }
        };
        Ok(automaton)
    }
}

/// Errors raised while loading or applying a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("invalid configuration: {0}")]
    Parse(String),

    #[error("the type and the allowed cells must be set at the same time")]
    InconsistentKind,

    #[error(transparent)]
    Cellular(#[from] CellularError),
}

impl ConfigError {
    /// Status the CLI exits with when this error ends the run.
    pub fn exit_status(&self) -> i32 {
        match self {
            ConfigError::Io(_) | ConfigError::Parse(_) => exit_status::WRONG_VALUE,
            ConfigError::InconsistentKind => exit_status::INCONSISTENT_ARGS,
            ConfigError::Cellular(e) => match e {
                CellularError::InvalidAlphabetLength { .. } => exit_status::INCONSISTENT_ARGS,
                CellularError::DisallowedCell { .. } => exit_status::DISALLOWED_CELL,
                CellularError::MalformedGrid { .. } | CellularError::GridShape { .. } => {
                    exit_status::MALFORMED_GRID
                }
                CellularError::DegenerateDistribution | CellularError::DistributionTooShort { .. } => {
                    exit_status::WRONG_DISTRIBUTION
                }
            },
        }
    }
}
