//! quizdeck CLI — the user-facing terminal quiz player.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "quizdeck", version, about = "Terminal multiple-choice quiz player")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a quiz interactively
    Play {
        /// Path to a quiz JSON file; prompts for pasted JSON when omitted
        quiz: Option<PathBuf>,

        /// Enable the countdown timer without prompting
        #[arg(long, conflicts_with = "no_timer")]
        timer: bool,

        /// Disable the countdown timer without prompting
        #[arg(long)]
        no_timer: bool,

        /// Countdown duration in minutes (implies --timer)
        #[arg(long)]
        minutes: Option<u32>,

        /// Write a JSON attempt report to this path after each finished session
        #[arg(long)]
        output: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate a quiz JSON file
    Validate {
        /// Path to a quiz JSON file
        quiz: PathBuf,
    },

    /// Create starter config and example quiz
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quizdeck=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            quiz,
            timer,
            no_timer,
            minutes,
            output,
            config,
        } => commands::play::execute(quiz, timer, no_timer, minutes, output, config).await,
        Commands::Validate { quiz } => commands::validate::execute(quiz),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
