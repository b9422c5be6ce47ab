//! CLI mode implementation
//!
//! `serve` runs the HTTP API; the other commands answer a single query
//! against the data file and print JSON to stdout.

use crate::cache::{CachePolicy, DEFAULT_CAPACITY};
use crate::config::{ServerConfig, DEFAULT_BIND_ADDR, DEFAULT_DATA_PATH, DEFAULT_LIMIT, MAX_LIMIT};
use clap::{Parser, Subcommand, ValueEnum};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Civic Lens CLI
#[derive(Parser, Debug)]
#[command(name = "civic-lens")]
#[command(about = "Politician lookup API with fuzzy name search", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Politician data file (JSON array)
    #[arg(long, global = true, env = "CIVIC_LENS_DATA", default_value = DEFAULT_DATA_PATH)]
    pub data: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the HTTP API (default)
    Serve(ServeArgs),
    /// Search politicians by name
    Search(SearchArgs),
    /// Show one politician
    Show(ShowArgs),
    /// Show several politicians side by side
    Compare(CompareArgs),
    /// List politicians for a state, or national officials
    Map(MapArgs),
}

/// Server arguments
#[derive(Parser, Debug, Clone)]
pub struct ServeArgs {
    /// Address to listen on
    #[arg(short = 'b', long, env = "CIVIC_LENS_BIND", default_value = DEFAULT_BIND_ADDR)]
    pub bind: SocketAddr,

    /// Maximum number of cached searches
    #[arg(long, default_value_t = DEFAULT_CAPACITY)]
    pub cache_capacity: usize,

    /// Behaviour once the search cache is full
    #[arg(long, value_enum, default_value_t = CachePolicyArg::Reject)]
    pub cache_policy: CachePolicyArg,
}

/// `--cache-policy` values
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicyArg {
    /// Skip new searches once the cache is full
    Reject,
    /// Drop the oldest cached search to make room
    EvictOldest,
}

impl From<CachePolicyArg> for CachePolicy {
    fn from(arg: CachePolicyArg) -> Self {
        match arg {
            CachePolicyArg::Reject => CachePolicy::RejectWhenFull,
            CachePolicyArg::EvictOldest => CachePolicy::EvictOldest,
        }
    }
}

impl ServeArgs {
    pub fn into_config(self, data_path: PathBuf) -> ServerConfig {
        ServerConfig {
            data_path,
            bind_addr: self.bind,
            cache_capacity: self.cache_capacity,
            cache_policy: self.cache_policy.into(),
            ..ServerConfig::default()
        }
    }
}

/// Search arguments
#[derive(Parser, Debug, Clone)]
pub struct SearchArgs {
    /// Name or fragment of a name (case-insensitive)
    #[arg(short = 'n', long)]
    pub name: String,

    /// ZIP code (accepted, not yet used for filtering)
    #[arg(short = 'z', long)]
    pub zip: Option<String>,

    /// Maximum number of results
    #[arg(short = 'l', long, allow_negative_numbers = true, help = format!("Maximum number of results (default {}, max {})", DEFAULT_LIMIT, MAX_LIMIT))]
    pub limit: Option<i64>,

    /// Include the score breakdown of each match
    #[arg(long)]
    pub scores: bool,
}

/// Which part of a politician's record to show
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DetailView {
    #[default]
    Summary,
    Votes,
    Policies,
    Impact,
}

/// Show arguments
#[derive(Parser, Debug, Clone)]
pub struct ShowArgs {
    /// Politician id
    #[arg(short = 'i', long)]
    pub id: u32,

    #[arg(long, value_enum, default_value_t = DetailView::Summary)]
    pub view: DetailView,
}

/// Compare arguments
#[derive(Parser, Debug, Clone)]
pub struct CompareArgs {
    /// Comma-separated politician ids, e.g. "1,2,3"
    #[arg(long)]
    pub ids: String,
}

/// Map arguments
#[derive(Parser, Debug, Clone)]
pub struct MapArgs {
    /// Two-letter state code
    #[arg(short = 's', long, conflicts_with = "national")]
    pub state: Option<String>,

    /// List national officials instead
    #[arg(long)]
    pub national: bool,

    #[arg(long, allow_negative_numbers = true)]
    pub lat: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    pub lng: Option<f64>,
}
