//! Automaton families and boundary policies.

use std::fmt;
use std::str::FromStr;
use serde::{Serialize, Deserialize};

/// The rule family an automaton runs.
///
/// Each family fixes the size of its alphabet and the meaning of each
/// position in it:
/// - `Epidemic`: `[empty, infected, healthy]`
/// - `Life`: `[dead, live]`
/// - `Fire`: `[growing, ignitable, burning, burnt]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AutomatonKind {
    /// Virus propagation among occupied cells.
    #[serde(rename = "pandemy", alias = "epidemic")]
    Epidemic,
    /// Conway's game of life.
    #[serde(rename = "game-of-life", alias = "life")]
    Life,
    /// Forest fire propagation.
    #[serde(rename = "fire")]
    Fire,
}

impl AutomatonKind {
    /// All kinds, in the order they are listed to the user.
    pub const ALL: [AutomatonKind; 3] = [
        AutomatonKind::Life,
        AutomatonKind::Epidemic,
        AutomatonKind::Fire,
    ];

    /// Number of symbols the alphabet of this kind must hold.
    pub const fn expected_symbols(self) -> usize {
        match self {
            AutomatonKind::Life => 2,
            AutomatonKind::Epidemic => 3,
            AutomatonKind::Fire => 4,
        }
    }

    /// Alphabet used when the user only picks a kind.
    pub const fn default_alphabet(self) -> &'static str {
        match self {
            AutomatonKind::Life => ".X",
            AutomatonKind::Epidemic => ".XH",
            AutomatonKind::Fire => "._Bb",
        }
    }

    /// Name accepted on the command line and in config files.
    pub const fn name(self) -> &'static str {
        match self {
            AutomatonKind::Life => "game-of-life",
            AutomatonKind::Epidemic => "pandemy",
            AutomatonKind::Fire => "fire",
        }
    }

    /// Semantic role of each alphabet position.
    pub const fn roles(self) -> &'static [&'static str] {
        match self {
            AutomatonKind::Life => &["dead", "live"],
            AutomatonKind::Epidemic => &["unoccupied", "sick", "healthy"],
            AutomatonKind::Fire => &["growing", "ignitable", "burning", "burnt"],
        }
    }

    /// Human readable description of what each symbol stands for.
    ///
    /// `alphabet` is expected to match [`expected_symbols`](Self::expected_symbols);
    /// extra symbols are ignored and missing ones are shown as `?`.
    pub fn legend(self, alphabet: &[char]) -> String {
        let title = match self {
            AutomatonKind::Life => "Game-of-life-type cellular automaton",
            AutomatonKind::Epidemic => "Pandemy-type cellular automaton",
            AutomatonKind::Fire => "Fire-type cellular automaton",
        };
        let mut out = String::from(title);
        for (i, role) in self.roles().iter().enumerate() {
            let symbol = alphabet.get(i).copied().unwrap_or('?');
            out.push_str(&format!("\n  {} -> {}", symbol, role));
        }
        out
    }
}

impl Default for AutomatonKind {
    fn default() -> Self {
        AutomatonKind::Life
    }
}

impl fmt::Display for AutomatonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AutomatonKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "game-of-life" | "life" => Ok(AutomatonKind::Life),
            "pandemy" | "epidemic" => Ok(AutomatonKind::Epidemic),
            "fire" => Ok(AutomatonKind::Fire),
            other => Err(format!(
                "unrecognized simulation type '{}' (supported: \"game-of-life\", \"pandemy\" and \"fire\")",
                other
            )),
        }
    }
}

/// How neighbor lookups outside the grid are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Boundary {
    /// Cells outside the grid read as the background symbol (`alphabet[0]`).
    #[serde(rename = "truncate")]
    Truncate,
    /// The grid is a torus: coordinates wrap modulo rows and columns.
    #[serde(rename = "periodic", alias = "wrap")]
    WrapAround,
}

impl Boundary {
    pub const fn name(self) -> &'static str {
        match self {
            Boundary::Truncate => "truncate",
            Boundary::WrapAround => "periodic",
        }
    }
}

impl Default for Boundary {
    fn default() -> Self {
        Boundary::Truncate
    }
}

impl fmt::Display for Boundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Boundary {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "truncate" => Ok(Boundary::Truncate),
            "periodic" | "wrap" => Ok(Boundary::WrapAround),
            other => Err(format!(
                "unrecognized boundary '{}' (supported: \"truncate\" and \"periodic\")",
                other
            )),
        }
    }
}
