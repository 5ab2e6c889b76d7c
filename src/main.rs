//! # Lawbot CLI (`lawbot`)
//!
//! ## Usage
//!
//! ```bash
//! lawbot --config ./config/lawbot.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `lawbot search "<question>"` | Print the most relevant cases |
//! | `lawbot get <index>` | Print one case as JSON |
//! | `lawbot stats` | Summarize the loaded corpus and index |
//! | `lawbot serve` | Start the JSON HTTP server |

use clap::{Parser, Subcommand};
use lawbot::config::{self, Config};
use lawbot::service::CaseService;
use lawbot::{get, search, server, stats};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Lawbot — retrieval of prior legal Q&A cases.
#[derive(Parser)]
#[command(
    name = "lawbot",
    about = "Lawbot — find prior legal Q&A cases related to a question",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// If the file does not exist, built-in defaults are used.
    #[arg(long, global = true, default_value = "./config/lawbot.toml")]
    config: PathBuf,

    /// Corpus file to load instead of `[corpus].path`.
    #[arg(long, global = true)]
    corpus: Option<PathBuf>,

    /// Log at debug level.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the corpus for cases related to a question.
    Search {
        /// The question text.
        query: String,

        /// Maximum number of cases to return.
        #[arg(long)]
        top_k: Option<usize>,

        /// Show the terms that contributed to each score.
        #[arg(long)]
        explain: bool,

        /// Print results as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Print a case by its position in the corpus.
    Get {
        /// Zero-based corpus position.
        index: usize,
    },

    /// Show corpus and index statistics.
    Stats,

    /// Start the JSON HTTP server.
    ///
    /// Binds to the address configured in `[server].bind`.
    Serve {
        /// Override `[server].bind`.
        #[arg(long)]
        bind: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "lawbot=debug,tower_http=debug"
    } else {
        "lawbot=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let mut cfg = if cli.config.exists() {
        config::load_config(&cli.config)?
    } else {
        tracing::debug!(
            "No config file at {}, using defaults",
            cli.config.display()
        );
        Config::minimal()
    };
    if let Some(path) = cli.corpus {
        cfg = cfg.with_corpus_path(path);
    }

    // Built once; every command and handler borrows this instance.
    let service = Arc::new(CaseService::from_config(&cfg));

    match cli.command {
        Commands::Search {
            query,
            top_k,
            explain,
            json,
        } => {
            search::run_search(&service, &query, top_k, explain, json)?;
        }
        Commands::Get { index } => {
            get::run_get(&service, index)?;
        }
        Commands::Stats => {
            stats::run_stats(&service)?;
        }
        Commands::Serve { bind } => {
            let bind = bind.unwrap_or_else(|| cfg.server.bind.clone());
            server::run_server(&bind, service).await?;
        }
    }

    Ok(())
}
