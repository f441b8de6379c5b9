pub mod commands;

use clap::{Parser, Subcommand};

use commands::cache::CacheCommand;
use commands::config::ConfigCommand;

/// Korean statutory amendment drafter
#[derive(Parser, Debug)]
#[command(
    name = "amendlaw",
    about = "Drafts Korean legislative amendment clauses for a word replacement across a law corpus",
    version,
    author,
    long_about = None
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable cache for this operation
    #[arg(long, global = true)]
    pub no_cache: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Draft amendment clauses for replacing one word with another
    Amend {
        /// The word to find
        find: String,
        /// The word to replace it with
        replace: String,
    },

    /// Search the corpus for a word, with highlighted snippets
    Search {
        /// The search query
        query: String,
        /// Render snippets as one <br>-joined HTML block per law
        #[arg(long)]
        html: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// Manage cache
    Cache {
        #[command(subcommand)]
        command: CacheCommand,
    },
}

impl Cli {
    /// Run the CLI application
    pub async fn run() -> crate::error::Result<()> {
        let cli = Self::parse();

        if cli.verbose {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
        } else {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
        }

        let result = match cli.command {
            Commands::Amend { find, replace } => commands::amend::execute(find, replace, cli.no_cache).await,
            Commands::Search { query, html } => commands::search::execute(query, html, cli.no_cache).await,
            Commands::Config { command } => commands::config::execute(command).await,
            Commands::Cache { command } => commands::cache::execute(command).await,
        };

        match result {
            Ok(()) => Ok(()),
            Err(e) => {
                eprintln!("\n{e}");
                if let Some(hint) = e.hint() {
                    eprintln!("\n{hint}");
                }
                Err(e)
            }
        }
    }
}
