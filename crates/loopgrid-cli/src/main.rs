//! Command-line tool for inspecting and checking loop puzzle codes.
//!
//! # Usage
//!
//! Show a puzzle's size, clues, and canonical code:
//!
//! ```sh
//! loopgrid inspect 5x5:c3u
//! ```
//!
//! Check a solution code against a puzzle's clues:
//!
//! ```sh
//! loopgrid verify 5x5:c3u aacia...
//! ```
//!
//! Print the code of an empty grid (dimensions are clamped to the configured
//! range):
//!
//! ```sh
//! loopgrid encode-empty 7 7
//! ```
//!
//! Pick a stored puzzle from a JSON catalog:
//!
//! ```sh
//! loopgrid pick --catalog puzzles.json --size 6 --difficulty medium
//! ```
//!
//! Set `RUST_LOG=debug` to see library events.

use std::{fs, io, path::PathBuf, process};

use clap::{Parser, Subcommand, ValueEnum};
use loopgrid_core::{GridState, PuzzleCodeError, SolutionCodeError};
use loopgrid_game::{
    CatalogEntry, Difficulty, PuzzleCatalog, PuzzleLoadError, PuzzleSession, Settings,
    SettingsError,
};
use rand::SeedableRng as _;
use rand_pcg::Pcg64;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DifficultyArg {
    Easy,
    Medium,
    Hard,
}

impl From<DifficultyArg> for Difficulty {
    fn from(value: DifficultyArg) -> Self {
        match value {
            DifficultyArg::Easy => Self::Easy,
            DifficultyArg::Medium => Self::Medium,
            DifficultyArg::Hard => Self::Hard,
        }
    }
}

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// JSON settings file; missing fields use defaults.
    #[arg(long, value_name = "PATH", global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print a puzzle's dimensions, clues, and canonical code.
    Inspect {
        /// Puzzle code, e.g. `5x5:c3u`.
        puzzle: String,
    },
    /// Check that a solution code satisfies every clue of a puzzle.
    Verify {
        /// Puzzle code.
        puzzle: String,
        /// Solution code, one character per cell.
        solution: String,
    },
    /// Print the puzzle code of an empty grid.
    EncodeEmpty {
        /// Number of rows.
        rows: usize,
        /// Number of columns.
        cols: usize,
    },
    /// Pick a random puzzle from a JSON catalog.
    Pick {
        /// JSON array of catalog entries.
        #[arg(long, value_name = "PATH")]
        catalog: PathBuf,
        /// Grid side length.
        #[arg(long, default_value_t = 5)]
        size: usize,
        /// Difficulty bucket.
        #[arg(long, value_name = "LEVEL", default_value = "easy")]
        difficulty: DifficultyArg,
        /// Seed for reproducible picks.
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
enum CliError {
    #[display("failed to read {}: {source}", path.display())]
    #[from(skip)]
    Read { path: PathBuf, source: io::Error },
    #[display("failed to parse {}: {source}", path.display())]
    #[from(skip)]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[display("invalid settings: {_0}")]
    Settings(SettingsError),
    #[display("invalid puzzle code: {_0}")]
    Puzzle(PuzzleCodeError),
    #[display("invalid solution code: {_0}")]
    Solution(SolutionCodeError),
    #[display("invalid catalog entry: {_0}")]
    CatalogEntry(PuzzleLoadError),
    #[display("no {size}x{size} {difficulty} puzzle in catalog")]
    #[from(skip)]
    NoMatchingEntry { size: usize, difficulty: Difficulty },
}

fn main() {
    better_panic::install();
    env_logger::init();

    let args = Args::parse();
    match run(args) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(err) => {
            eprintln!("error: {err}");
            process::exit(2);
        }
    }
}

/// Runs a command, returning `false` when a check fails.
fn run(args: Args) -> Result<bool, CliError> {
    let settings = load_settings(args.settings)?;

    match args.command {
        Command::Inspect { puzzle } => {
            let grid = GridState::from_puzzle_code(&puzzle)?;
            inspect(&grid);
            Ok(true)
        }
        Command::Verify { puzzle, solution } => {
            let mut grid = GridState::from_puzzle_code(&puzzle)?;
            grid.apply_solution_code(&solution)?;
            Ok(verify(&grid))
        }
        Command::EncodeEmpty { rows, cols } => {
            let mut session = PuzzleSession::new(&settings);
            session.resize(rows, cols);
            println!("{}", session.puzzle_code());
            Ok(true)
        }
        Command::Pick {
            catalog,
            size,
            difficulty,
            seed,
        } => {
            let entries: Vec<CatalogEntry> = read_json(catalog)?;
            log::info!("loaded catalog with {} entries", entries.len());
            let mut catalog = PuzzleCatalog::new(entries);
            let mut rng = match seed {
                Some(seed) => Pcg64::seed_from_u64(seed),
                None => Pcg64::from_rng(&mut rand::rng()),
            };
            let difficulty = Difficulty::from(difficulty);
            let entry = catalog
                .pick(size, difficulty, &mut rng)
                .ok_or(CliError::NoMatchingEntry { size, difficulty })?;
            log::debug!("picked {size}x{size} {difficulty} puzzle {}", entry.puzzle);

            let mut session = PuzzleSession::new(&settings);
            session.load_catalog_entry(entry)?;
            println!("{}", session.puzzle_code());
            if let Some(solution) = session.solution() {
                println!("{solution}");
            }
            Ok(true)
        }
    }
}

fn load_settings(path: Option<PathBuf>) -> Result<Settings, CliError> {
    let settings = match path {
        Some(path) => {
            log::debug!("loading settings from {}", path.display());
            read_json(path)?
        }
        None => Settings::default(),
    };
    settings.validate()?;
    Ok(settings)
}

fn read_json<T>(path: PathBuf) -> Result<T, CliError>
where
    T: serde::de::DeserializeOwned,
{
    let text = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(source) => return Err(CliError::Read { path, source }),
    };
    serde_json::from_str(&text).map_err(|source| CliError::Parse { path, source })
}

fn inspect(grid: &GridState) {
    let clue_count = grid.clues().iter().filter(|clue| !clue.is_none()).count();
    println!("size: {} rows x {} cols", grid.rows(), grid.cols());
    println!("clues: {clue_count}");
    for row in 0..grid.rows() {
        let line = (0..grid.cols())
            .map(|col| grid.clue(row, col).to_string())
            .collect::<Vec<_>>()
            .join(" ");
        println!("  {line}");
    }
    println!("code: {}", grid.puzzle_code());
}

fn verify(grid: &GridState) -> bool {
    let mut ok = true;
    for (row, col) in grid.unsatisfied_clues() {
        ok = false;
        println!(
            "cell ({row}, {col}): clue {} but {} edges drawn",
            grid.clue(row, col),
            grid.present_count_around(row, col)
        );
    }
    if ok {
        println!("all clues satisfied");
    }
    ok
}
