use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use rmcp::{ServiceExt, transport::stdio};
use tracing_subscriber::EnvFilter;

use rustdoc_search_index::config::IndexSources;
use rustdoc_search_index::search::SearchTools;
use rustdoc_search_index::search::tools::SearchItemsParams;
use rustdoc_search_index::{IndexStore, SearchIndexService};

/// Search generated rustdoc search indices over MCP or from the command line
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Additional search-index.js or JSON index files to load
    #[arg(long = "index", env = "RUSTDOC_SEARCH_INDEX", value_delimiter = ',')]
    index_files: Vec<PathBuf>,

    /// Do not load the search index compiled into the binary
    #[arg(long)]
    no_bundled: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Search the loaded index and print the results as JSON
    Search {
        /// Text to look for in item names and module paths
        query: String,
        /// Restrict the search to one crate
        #[arg(long = "crate")]
        crate_name: Option<String>,
        /// Only return items of this kind (e.g. fn, enum, variant)
        #[arg(long)]
        kind: Option<String>,
        /// Maximum number of results
        #[arg(long)]
        limit: Option<usize>,
    },
    /// List the loaded crates as JSON
    Crates,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize tracing to stderr to avoid conflicts with stdio transport
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let sources = IndexSources {
        files: args.index_files,
        include_bundled: !args.no_bundled,
    };
    let store = IndexStore::new(sources.load()?);

    if let Some(command) = args.command {
        return handle_command(command, store);
    }

    tracing::info!("Starting MCP search index server on stdio...");

    let search_service = SearchIndexService::new(store);

    // Serve using stdio transport
    let service = search_service.serve(stdio()).await.inspect_err(|e| {
        tracing::error!("serving error: {:?}", e);
    })?;

    // Wait for the service to complete
    service.waiting().await?;
    Ok(())
}

fn handle_command(command: Commands, store: IndexStore) -> Result<()> {
    let tools = SearchTools::new(store);
    match command {
        Commands::Search {
            query,
            crate_name,
            kind,
            limit,
        } => {
            let output = tools.run_search(&SearchItemsParams {
                query,
                crate_name,
                kind_filter: kind,
                limit,
            })?;
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Commands::Crates => {
            println!("{}", tools.list_crates());
        }
    }
    Ok(())
}
