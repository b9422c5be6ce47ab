//! Civic Lens API server & CLI
//!
//! Dual-mode application:
//! - Server Mode (default): HTTP JSON API over the politician dataset
//! - CLI Mode: one-shot search, lookup, compare and map queries printed as JSON

mod api;
mod cache;
mod cli;
mod config;
mod error;
mod search;
mod store;

use anyhow::Result;
use api::responses::{
    summaries, ImpactResponse, MapLocation, MapResponse, PoliciesResponse, PoliticianSummary,
    ScoredSummary, SummariesResponse, VotesResponse,
};
use cache::ResultCache;
use clap::Parser;
use cli::{Cli, Commands, DetailView};
use config::ServerConfig;
use error::{parse_id_list, validate_query, AppError};
use search::SearchEngine;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use store::PoliticianStore;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Exit code for data files that cannot be loaded
const EXIT_LOAD_FAILURE: i32 = 5;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    match cli.command {
        None => run_server(cli::ServeArgs::parse_from(["civic-lens"]), &cli.data).await,
        Some(Commands::Serve(args)) => run_server(args, &cli.data).await,
        Some(command) => run_cli_mode(command, &cli.data),
    }
}

fn init_logging(cli: &Cli) {
    // Logs go to stderr to keep stdout clean for JSON output
    let filter = if cli.quiet {
        EnvFilter::new("error")
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Run in server mode
async fn run_server(args: cli::ServeArgs, data_path: &Path) -> Result<()> {
    let config = args.into_config(data_path.to_path_buf());
    info!("Starting Civic Lens API (data: {})", config.data_path.display());

    if let Err(e) = api::serve(config).await {
        error!("{:#}", e);
        std::process::exit(EXIT_LOAD_FAILURE);
    }
    Ok(())
}

/// Run a single CLI command and exit with the matching code
fn run_cli_mode(command: Commands, data_path: &Path) -> Result<()> {
    let store = match PoliticianStore::load(data_path) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(EXIT_LOAD_FAILURE);
        }
    };

    let result = match command {
        Commands::Search(args) => execute_search_cli(args, store),
        Commands::Show(args) => execute_show_cli(args, &store),
        Commands::Compare(args) => execute_compare_cli(args, &store),
        Commands::Map(args) => execute_map_cli(args, &store),
        Commands::Serve(_) => Err(AppError::Internal("serve is not a one-shot command".to_string())),
    };

    match result {
        Ok(output) => {
            println!("{}", output);
            Ok(())
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(e.exit_code());
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, AppError> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn execute_search_cli(args: cli::SearchArgs, store: PoliticianStore) -> Result<String, AppError> {
    validate_query(&args.name)?;
    let limit = ServerConfig::default().clamp_limit(args.limit);
    let engine = SearchEngine::new(Arc::new(store), ResultCache::default());

    if args.scores {
        let scored: Vec<ScoredSummary> = engine
            .search_scored(&args.name, limit)
            .iter()
            .map(ScoredSummary::from)
            .collect();
        return to_json(&scored);
    }

    let zip = args.zip.as_deref().map(str::trim).filter(|z| !z.is_empty());
    to_json(&SummariesResponse {
        politician_summaries: summaries(engine.search(&args.name, zip, limit)),
    })
}

fn execute_show_cli(args: cli::ShowArgs, store: &PoliticianStore) -> Result<String, AppError> {
    let record = store.require(args.id)?;
    match args.view {
        DetailView::Summary => to_json(&PoliticianSummary::from(record)),
        DetailView::Votes => to_json(&VotesResponse::from(record)),
        DetailView::Policies => to_json(&PoliciesResponse::from(record)),
        DetailView::Impact => to_json(&ImpactResponse::from(record)),
    }
}

fn execute_compare_cli(args: cli::CompareArgs, store: &PoliticianStore) -> Result<String, AppError> {
    let ids = parse_id_list(&args.ids)?;
    to_json(&SummariesResponse {
        politician_summaries: summaries(store.get_many(&ids)?),
    })
}

fn execute_map_cli(args: cli::MapArgs, store: &PoliticianStore) -> Result<String, AppError> {
    let response = if args.national {
        MapResponse::build(store.national(), MapLocation::national())
    } else {
        MapResponse::build(
            store.by_location(args.lat, args.lng, args.state.as_deref()),
            MapLocation::unknown(),
        )
    };
    to_json(&response)
}
