use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use textdex_engine::{EngineConfig, SearchEngine, Strategy};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Local full-text search over a directory of text files")]
struct Cli {
    /// Directory of .txt documents to search.
    #[arg(long)]
    corpus: PathBuf,

    /// Directory holding the persisted index artifacts. Defaults to the
    /// corpus directory.
    #[arg(long)]
    index_dir: Option<PathBuf>,

    /// Skip a cached index and always rebuild from the corpus.
    #[arg(long)]
    no_cache: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build (or load) the index and report how many documents it covers.
    Index,
    /// Build (or load) the index, then run a query against it.
    Search {
        query: String,
        /// Require every query term to appear in a result document.
        #[arg(long)]
        and: bool,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let mut config = EngineConfig::new(&cli.corpus);
    if let Some(index_dir) = &cli.index_dir {
        config = config.with_index_dir(index_dir);
    }

    match run(config, !cli.no_cache, cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "textdex failed");
            ExitCode::FAILURE
        }
    }
}

fn run(config: EngineConfig, use_cache: bool, command: Command) -> textdex_engine::Result<()> {
    let mut engine = SearchEngine::new(config)?;
    let indexed = engine.index_corpus(use_cache)?;
    tracing::info!(documents = indexed, "index ready");

    if let Command::Search { query, and } = command {
        let strategy = if and { Strategy::And } else { Strategy::Or };
        let results = engine.search(&query, strategy);
        if results.is_empty() {
            println!("no matches for {query:?}");
        }
        for result in results {
            let path = engine.document_path(result.document_id)?;
            println!(
                "{:.4}  {}  ({} hit{})",
                result.relevance_score,
                path.display(),
                result.occurrences.len(),
                if result.occurrences.len() == 1 { "" } else { "s" }
            );
            for occurrence in &result.occurrences {
                println!(
                    "    line {}, col {}: {:?}",
                    occurrence.line, occurrence.index, occurrence.original
                );
            }
        }
    }

    Ok(())
}
