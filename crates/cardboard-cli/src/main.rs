//! Command-line driver for Cardboard boards.

mod runner;
mod script;

use cardboard_core::{Board, BoardConfig, FileStorage, Storage};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "cardboard", version, about = "Run and inspect Cardboard boards")]
struct Cli {
    /// Directory holding saved board slots (defaults to the user data dir)
    #[arg(long, global = true)]
    dir: Option<PathBuf>,
    /// JSON board config
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Slot to save to and load from (overrides the config)
    #[arg(long, global = true)]
    slot: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a board script
    Run {
        /// Path to the script file
        script: PathBuf,
        /// Load the saved board before running
        #[arg(long)]
        resume: bool,
        /// Save the board after running
        #[arg(long)]
        save: bool,
    },
    /// Print a saved board as JSON
    Show,
    /// List saved slots
    Slots,
}

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => BoardConfig::from_file(path)?,
        None => BoardConfig::default(),
    };
    if let Some(slot) = cli.slot {
        config.storage_key = slot;
    }

    let storage = match cli.dir {
        Some(dir) => FileStorage::new(dir)?,
        None => FileStorage::default_location()?,
    };
    log::info!("Using board storage at {}", storage.base_path().display());

    match cli.command {
        Commands::Run {
            script: script_path,
            resume,
            save,
        } => {
            let source = std::fs::read_to_string(&script_path)
                .map_err(|e| format!("Failed to read {}: {}", script_path.display(), e))?;
            let commands = script::parse_script(&source)?;

            let mut board = Board::new(config, Arc::new(storage))?;
            if resume {
                board.load()?;
                board.drain_events();
            }

            let report = runner::run_commands(&mut board, &commands);
            for notice in &report.notices {
                println!("{}", notice);
            }
            for (line, error) in &report.failures {
                eprintln!("line {}: {}", line, error);
            }

            if save {
                board.save()?;
            }
            println!("{}", serde_json::to_string_pretty(board.snapshot())?);

            if report.failures.is_empty() {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::FAILURE)
            }
        }
        Commands::Show => {
            let snapshot = storage.load(&config.storage_key)?;
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Slots => {
            for slot in storage.list()? {
                println!("{}", slot);
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}
