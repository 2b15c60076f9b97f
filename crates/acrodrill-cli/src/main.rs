//! acrodrill CLI, the interactive acronym quiz.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "acrodrill", version, about = "Interactive acronym quiz")]
struct Cli {
    /// Acronym store JSON file (overrides config and ACRODRILL_STORE)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Add acronyms and take quizzes interactively (default)
    Play,

    /// Create an empty acronym store if none exists
    Init,

    /// List all acronyms and their terms
    List,

    /// Check the acronym store for suspicious entries
    Validate,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("acrodrill=warn")),
        )
        .init();

    let cli = Cli::parse();

    let result = commands::resolve_store_path(cli.store, cli.config).and_then(|store_path| {
        match cli.command.unwrap_or(Commands::Play) {
            Commands::Play => commands::play::execute(store_path),
            Commands::Init => commands::init::execute(store_path),
            Commands::List => commands::list::execute(store_path),
            Commands::Validate => commands::validate::execute(store_path),
        }
    });

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
