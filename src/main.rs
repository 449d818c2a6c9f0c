mod cli;
mod config;
mod display;
mod error;
mod formatter;
mod history;
mod inference;
mod logging;
mod models;
mod revealer;

use clap::{Parser, Subcommand};
use std::future::Future;
use std::path::PathBuf;

use crate::error::Result;

#[derive(Parser)]
#[command(name = "verion")]
#[command(about = "Terminal client for the Verion AI legal document assistant", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Configuration commands
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Ask a single question and print the reply
    Ask {
        /// The question (read from stdin when omitted and stdin is piped)
        prompt: Option<String>,

        /// Attach a document (repeatable)
        #[arg(short, long = "file")]
        files: Vec<PathBuf>,

        /// Path to config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print the reply at once instead of typing it out
        #[arg(long)]
        no_animate: bool,
    },
    /// Start an interactive chat
    Chat {
        /// Path to config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print replies at once instead of typing them out
        #[arg(long)]
        no_animate: bool,
    },
    /// Format a reply from a file or stdin without contacting the backend
    Format {
        /// Input file (defaults to stdin)
        file: Option<PathBuf>,

        /// Path to config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Type the text out
        #[arg(long)]
        animate: bool,

        /// Delay between characters when animating
        #[arg(long)]
        cadence_ms: Option<u64>,
    },
    /// Saved chat commands
    History {
        #[command(subcommand)]
        command: HistoryCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Initialize verion.toml configuration file
    Init {
        /// Path where to create the config file
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum HistoryCommands {
    /// Display the most recent saved chat
    Latest {
        /// Path to config file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

/// Drive an async command on a single-threaded runtime
fn block_on<F: Future<Output = Result<()>>>(future: F) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(future)
}

fn main() {
    let cli = Cli::parse();
    logging::init_tracing();

    let result = match cli.command {
        Commands::Config { command } => match command {
            ConfigCommands::Init { path } => cli::config::init(path),
        },
        Commands::Ask {
            prompt,
            files,
            config,
            no_animate,
        } => block_on(cli::ask::run(config, prompt, files, no_animate)),
        Commands::Chat { config, no_animate } => block_on(cli::chat::run(config, no_animate)),
        Commands::Format {
            file,
            config,
            animate,
            cadence_ms,
        } => block_on(cli::format::run(config, file, animate, cadence_ms)),
        Commands::History { command } => match command {
            HistoryCommands::Latest { config } => cli::history::latest(config),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
