//! upwind CLI: terminal front-end for FAR Part 103 ground-school quizzes.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(
    name = "upwind",
    version,
    about = "Ultralight ground-school quiz for FAR Part 103 prep"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Take an interactive quiz
    Quiz {
        /// Question bank .toml file or directory (default: built-in bank)
        #[arg(long)]
        bank: Option<PathBuf>,

        /// Number of questions (default: 20)
        #[arg(long)]
        count: Option<usize>,

        /// Seed for question sampling and option order
        #[arg(long)]
        seed: Option<u64>,

        /// Restrict to topics (comma-separated)
        #[arg(long)]
        topic: Option<String>,

        /// Output format for the results: text, markdown, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate question bank TOML files
    Validate {
        /// Path to bank file or directory (default: built-in bank)
        #[arg(long)]
        bank: Option<PathBuf>,
    },

    /// List study categories, topics, and question counts
    Topics {
        /// Path to bank file or directory (default: built-in bank)
        #[arg(long)]
        bank: Option<PathBuf>,
    },

    /// Create starter config and example question bank
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("upwind=warn,upwind_core=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Quiz {
            bank,
            count,
            seed,
            topic,
            format,
            config,
        } => commands::quiz::execute(bank, count, seed, topic, format, config),
        Commands::Validate { bank } => commands::validate::execute(bank),
        Commands::Topics { bank } => commands::topics::execute(bank),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
