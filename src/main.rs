//! Laser Arena CLI - play, script, replay and soak-test laser arena matches.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

/// Laser Arena - a deterministic four-player laser duel
#[derive(Parser, Debug)]
#[command(name = "laser-arena")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Play a hot-seat match on stdin
    Play {
        /// Save recording to file on exit
        #[arg(long)]
        save: Option<PathBuf>,
    },

    /// Apply a script of text commands to a fresh match
    Run {
        /// Script file (one `<actor> <action> <direction>` per line)
        #[arg(required = true)]
        script: PathBuf,

        /// Output format: text, json, or report
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// Save recording to file
        #[arg(long)]
        save: Option<PathBuf>,

        /// Suppress command-by-command output
        #[arg(short, long)]
        quiet: bool,
    },

    /// Replay a recorded match
    Replay {
        /// Recording file (.json)
        #[arg(required = true)]
        recording: PathBuf,

        /// Output format: text, report, or json
        #[arg(short, long, default_value = "text")]
        format: cli::ReplayFormat,

        /// Stop at a specific step (default: end of recording)
        #[arg(short, long)]
        step: Option<usize>,
    },

    /// Interactive TUI to step through a recording
    Watch {
        /// Recording file (.json)
        #[arg(required = true)]
        recording: PathBuf,

        /// Step delay in milliseconds (default: 500)
        #[arg(long, default_value = "500")]
        speed: u64,
    },

    /// Run mass parallel random matches and check invariants
    Soak {
        /// Number of matches to run (default: 1000)
        #[arg(short, long, default_value = "1000")]
        games: u64,

        /// Starting seed (increments for each match)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Parallel threads (default: CPU count)
        #[arg(short = 'j', long)]
        threads: Option<usize>,

        /// Command budget per match (default: 5000)
        #[arg(short, long)]
        max_commands: Option<u32>,

        /// Output format: text, json, or csv
        #[arg(short, long, default_value = "text")]
        format: cli::SoakFormat,

        /// Show progress bar
        #[arg(short, long)]
        progress: bool,
    },

    /// Check that every line of a script parses
    Validate {
        /// Script file to validate
        #[arg(required = true)]
        script: PathBuf,
    },
}

fn main() -> ExitCode {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .try_init();

    let args = Args::parse();

    let result = match args.command {
        Commands::Play { save } => cli::play::execute(save),

        Commands::Run {
            script,
            format,
            save,
            quiet,
        } => cli::run::execute(&script, format, save, quiet),

        Commands::Replay {
            recording,
            format,
            step,
        } => cli::replay::execute(&recording, format, step),

        Commands::Watch { recording, speed } => cli::watch::execute(&recording, speed),

        Commands::Soak {
            games,
            seed,
            threads,
            max_commands,
            format,
            progress,
        } => cli::soak::execute(games, seed, threads, max_commands, format, progress),

        Commands::Validate { script } => cli::validate::execute(&script),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
