use std::fs;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use owo_colors::OwoColorize;
use roomsort::diagram::{self, Diagram};
use roomsort::{ConfigError, Move, Puzzle, RoomsortError, Solution, SolverConfig};
use serde::Serialize;
use thiserror::Error;

/// Find the cheapest way to sort every token of a burrow diagram into its
/// own room.
#[derive(Parser, Debug)]
#[command(name = "roomsort", author, version, about, long_about = None)]
struct Args {
    /// Burrow diagram to solve
    file: PathBuf,

    /// Solver configuration (TOML, or YAML with a .yaml/.yml extension)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Room row to insert below the first one; repeat for several rows
    #[arg(long = "unfold", value_name = "ROW")]
    unfold: Vec<String>,

    /// Print every move and the burrow after it
    #[arg(long)]
    path: bool,

    /// Print the solution as JSON
    #[arg(long, conflicts_with = "path")]
    json: bool,

    /// Log search events to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("cannot read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Solve(#[from] RoomsortError),

    #[error("cannot encode solution: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Serialize)]
struct Report {
    cost: u64,
    moves: Vec<StepReport>,
    explored: u64,
    elapsed_ms: u64,
}

#[derive(Debug, Serialize)]
struct StepReport {
    #[serde(rename = "move")]
    mv: Move,
    cost: u64,
    total: u64,
}

impl From<&Solution> for Report {
    fn from(solution: &Solution) -> Self {
        Report {
            cost: solution.cost(),
            moves: solution
                .path()
                .iter()
                .map(|step| StepReport {
                    mv: step.mv,
                    cost: step.cost,
                    total: step.total,
                })
                .collect(),
            explored: solution.stats().states_expanded,
            elapsed_ms: solution.stats().elapsed().as_millis() as u64,
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<SolverConfig, CliError> {
    let Some(path) = path else {
        return Ok(SolverConfig::default());
    };
    let yaml = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"));
    let config = if yaml {
        SolverConfig::from_yaml_file(path)?
    } else {
        SolverConfig::load(path)?
    };
    Ok(config)
}

fn print_path(puzzle: &Puzzle, solution: &Solution) -> Result<(), CliError> {
    let color = io::stdout().is_terminal();
    let states = solution.states(puzzle.initial())?;
    println!("{}", Diagram::initial(puzzle));
    for (i, (step, state)) in solution.path().iter().zip(&states[1..]).enumerate() {
        let header = format!(
            "{:>3}. {} │ cost {} │ total {}",
            i + 1,
            step.mv,
            step.cost,
            step.total
        );
        if color {
            println!("{}", header.bright_cyan());
        } else {
            println!("{header}");
        }
        println!("{}", Diagram::new(puzzle.topology(), state));
    }
    Ok(())
}

fn run(args: &Args) -> Result<(), CliError> {
    roomsort::console::init_with(if args.verbose {
        "roomsort_solver=debug"
    } else {
        "roomsort_solver=warn"
    });
    let config = load_config(args.config.as_deref())?;
    let text = fs::read_to_string(&args.file).map_err(|source| CliError::Read {
        path: args.file.clone(),
        source,
    })?;
    let text = if args.unfold.is_empty() {
        text
    } else {
        let rows: Vec<&str> = args.unfold.iter().map(String::as_str).collect();
        diagram::unfold(&text, &rows)?
    };

    let (puzzle, solution) = roomsort::solve_diagram(&text, &config)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&Report::from(&solution))?);
        return Ok(());
    }
    if args.path {
        print_path(&puzzle, &solution)?;
    }
    println!("{}", solution.cost());
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e}", "error:".bright_red().bold());
            ExitCode::FAILURE
        }
    }
}
