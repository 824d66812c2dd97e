//! Literature Explorer Ingestion CLI
//!
//! Populates and inspects the record store from the command line:
//! - `seed`: ingest paper payloads from a JSON file
//! - `discover`: search, extract, and store one paper for a query
//! - `list`: print every stored paper as JSON

mod errors;
mod loader;

use clap::{Parser, Subcommand};
use errors::IngestionError;
use litexplorer_common::{config::AppConfig, Explorer, VERSION};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Command-line tool for the paper record store
#[derive(Parser, Debug)]
#[command(
    name = "ingestion",
    version,
    about = "Seed, discover, and list papers in the record store",
    long_about = "Ingestion CLI for the Literature Explorer record store.

EXAMPLES:
  Load the demonstration papers:
    ingestion seed --input data/sample_papers.json

  Discover a paper through the research model:
    CEREBRAS_API_KEY=... ingestion discover \"graph attention networks\"

  Use another database file:
    ingestion --database-url sqlite://other.db?mode=rwc list"
)]
struct Cli {
    /// Configuration file, instead of the layered config/ directory
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<String>,

    /// Database URL, overriding configuration
    #[arg(long, global = true, value_name = "URL", env = "APP__DATABASE__URL")]
    database_url: Option<String>,

    /// Logging verbosity level
    #[arg(long, global = true, value_name = "LEVEL", default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Ingest paper payloads from a JSON file (array or single object)
    Seed {
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,
    },

    /// Discover and store one paper, falling back to a placeholder
    Discover {
        /// Free-text research query
        query: String,
    },

    /// Print every stored paper as JSON
    List,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&cli.log_level))
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    info!("Literature Explorer ingestion v{}", VERSION);

    let mut config = match cli.config.as_deref() {
        Some(path) => AppConfig::from_file(path),
        None => AppConfig::load(),
    }
    .map_err(IngestionError::from)?;
    if let Some(url) = cli.database_url {
        config.database.url = url;
    }

    let explorer = Explorer::from_config(&config)
        .await
        .map_err(IngestionError::from)?;

    match cli.command {
        Command::Seed { input } => seed(&explorer, &input).await?,
        Command::Discover { query } => {
            let outcome = explorer.fetch_and_ingest(&query).await;
            println!("{}", serde_json::to_string(&outcome)?);
        }
        Command::List => {
            let papers = explorer.load_all().await.map_err(IngestionError::from)?;
            println!("{}", serde_json::to_string_pretty(&papers)?);
        }
    }

    Ok(())
}

/// Ingest every payload in `input`, printing one outcome per line
async fn seed(explorer: &Explorer, input: &std::path::Path) -> Result<(), IngestionError> {
    let papers = loader::load_papers(input)?;
    info!(count = papers.len(), path = %input.display(), "Seeding papers");

    let mut stored = 0usize;
    for paper in &papers {
        let outcome = explorer.ingest(paper).await;
        if outcome.is_success() {
            stored += 1;
        } else {
            warn!(title = ?paper.title, "Paper not stored");
        }
        match serde_json::to_string(&outcome) {
            Ok(line) => println!("{}", line),
            Err(e) => warn!(error = %e, "Failed to serialize outcome"),
        }
    }

    info!(stored, total = papers.len(), "Seeding finished");
    Ok(())
}
