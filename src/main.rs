//! cellsim - CLI Entry Point
//!
//! Prints a simulation as a list of states, or replays it interactively:
//! - `cellsim -t pandemy -a .XH -r 20 -c 40 -n 50` - random pandemy trace
//! - `cellsim -s -t pandemy -a .XH < state.txt` - start from a given grid
//! - `cellsim -i -t fire -a ._Bb -b periodic` - interactive fire viewer

use std::io::{self, Read, Write};
use std::path::PathBuf;
use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::{ArgAction, Parser};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use cellsim::config::exit_status;
use cellsim::{Automaton, AutomatonKind, Boundary, ConfigError, Grid, SimulationConfig, write_trace};

#[derive(Parser)]
#[command(name = "cellsim")]
#[command(version)]
#[command(about = "Simulates a cellular automaton")]
struct Cli {
    /// The number of rows [default: 5]
    #[arg(short = 'r', long, value_parser = parse_positive)]
    num_rows: Option<usize>,

    /// The number of columns [default: 5]
    #[arg(short = 'c', long, value_parser = parse_positive)]
    num_cols: Option<usize>,

    /// The number of steps in the simulation [default: 5]
    #[arg(short = 'n', long, value_parser = parse_positive)]
    num_steps: Option<usize>,

    /// The type of simulation: "game-of-life", "pandemy" or "fire"
    #[arg(short = 't', long = "type")]
    kind: Option<AutomatonKind>,

    /// The boundary type: "truncate" or "periodic" [default: truncate]
    #[arg(short = 'b', long)]
    boundary: Option<Boundary>,

    /// The allowed cells, as characters; must match the type of simulation
    #[arg(short = 'a', long)]
    allowed_cells: Option<String>,

    /// The initial probability distribution, as comma-separated non-negative
    /// weights (e.g. with cells "abc", "1,1,2" makes 'c' twice as frequent)
    #[arg(short = 'd', long, value_delimiter = ',')]
    distribution: Option<Vec<u32>>,

    /// Enables interactive simulation
    #[arg(short = 'i', long)]
    interactive: bool,

    /// Reads the initial state of the automaton from stdin
    #[arg(short = 's', long, conflicts_with_all = ["num_rows", "num_cols"])]
    stdin: bool,

    /// Seed for the random initial state
    #[arg(long)]
    seed: Option<u64>,

    /// Loads settings from a JSON file; flags override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Prints the meaning of each allowed cell before the simulation
    #[arg(long)]
    describe: bool,

    /// Prints the effective configuration as JSON and exits
    #[arg(long)]
    dump_config: bool,

    /// Increases log verbosity (-v info, -vv debug)
    #[arg(short = 'v', long, action = ArgAction::Count)]
    verbose: u8,
}

fn parse_positive(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) | Err(_) => Err(format!("'{}' is not a positive integer", s)),
        Ok(value) => Ok(value),
    }
}

/// Exit status for a command line that clap rejected.
fn usage_status(error: &clap::Error) -> i32 {
    match error.kind() {
        ErrorKind::ArgumentConflict => exit_status::STDIN_WITH_ROW_COL,
        ErrorKind::UnknownArgument => exit_status::BAD_OPTION,
        ErrorKind::InvalidValue | ErrorKind::ValueValidation => match error.get(ContextKind::InvalidArg) {
            Some(ContextValue::String(arg)) if arg.contains("--type") => exit_status::WRONG_TYPE,
            Some(ContextValue::String(arg)) if arg.contains("--boundary") => exit_status::WRONG_BOUNDARY,
            Some(ContextValue::String(arg)) if arg.contains("--distribution") => {
                exit_status::WRONG_DISTRIBUTION
            }
            _ => exit_status::WRONG_VALUE,
        },
        _ => exit_status::WRONG_VALUE,
    }
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if e.use_stderr() => {
            let _ = e.print();
            std::process::exit(usage_status(&e));
        }
        // --help and --version
        Err(e) => e.exit(),
    };

    let config = build_config(&cli);
    init_logging(cli.verbose, config.interactive);

    if cli.dump_config {
        match config.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => fail(&e),
        }
        return;
    }

    let initial = if cli.stdin { Some(read_initial_state()) } else { None };
    let seed = match config.build_seed(initial) {
        Ok(seed) => seed,
        Err(e) => fail(&e),
    };

    if cli.describe {
        println!("{}", seed.legend());
    }

    if config.interactive {
        run_interactive(seed, config.steps);
    } else {
        run_batch(seed, config.steps);
    }
}

/// Merge the optional config file with command line flags.
fn build_config(cli: &Cli) -> SimulationConfig {
    let mut config = match &cli.config {
        Some(path) => SimulationConfig::load(path).unwrap_or_else(|e| fail(&e)),
        None => SimulationConfig::default(),
    };

    if let Some(rows) = cli.num_rows {
        config.rows = rows;
    }
    if let Some(cols) = cli.num_cols {
        config.cols = cols;
    }
    if let Some(steps) = cli.num_steps {
        config.steps = steps;
    }
    if let Some(boundary) = cli.boundary {
        config.boundary = boundary;
    }
    if let Some(weights) = &cli.distribution {
        config.weights = weights.clone();
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    config.interactive |= cli.interactive;

    if let Err(e) = config.set_kind(cli.kind, cli.allowed_cells.clone()) {
        fail(&e);
    }
    config
}

/// Install the stderr log subscriber.
///
/// `RUST_LOG` wins when set. Otherwise interactive runs stay silent so log
/// lines never land on top of the viewer.
fn init_logging(verbose: u8, interactive: bool) {
    let default_level = match (verbose, interactive) {
        (0, true) => "off",
        (0, false) => "warn",
        (1, _) => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("cellsim={}", default_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn read_initial_state() -> Grid {
    let mut text = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut text) {
        fail(&ConfigError::Io(format!("failed to read initial state: {}", e)));
    }
    match Grid::parse(&text) {
        Ok(grid) => grid,
        Err(e) => fail(&e.into()),
    }
}

fn run_batch(seed: Automaton, num_steps: usize) {
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    if let Err(e) = write_trace(&mut out, seed, num_steps).and_then(|_| out.flush()) {
        // A closed pipe (e.g. `| head`) is not worth reporting.
        if e.kind() != io::ErrorKind::BrokenPipe {
            eprintln!("❌ Failed to write trace: {}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(feature = "tui")]
fn run_interactive(seed: Automaton, num_steps: usize) {
    use cellsim::{FrameSequence, run_viewer};

    if let Err(e) = run_viewer(FrameSequence::new(seed, num_steps)) {
        eprintln!("❌ Viewer error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(not(feature = "tui"))]
fn run_interactive(_seed: Automaton, _num_steps: usize) {
    eprintln!("❌ Interactive mode needs the `tui` feature");
    std::process::exit(1);
}

fn fail(error: &ConfigError) -> ! {
    eprintln!("❌ {}", error);
    std::process::exit(error.exit_status());
}
