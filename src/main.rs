mod cli;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use robokop_pairs::config::RobokopConfig;

#[derive(Parser)]
#[command(
    name = "robokop-pairs",
    version,
    about = "Drug-disease association query service for ROBOKOP"
)]
struct Cli {
    /// Config file (defaults to ~/.robokop/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the HTTP API server
    Serve,
    /// Replace the pair table from a scored-prediction dataset (JSON keyed by record id)
    Load {
        /// Local dataset file
        file: Option<PathBuf>,
        /// Download the dataset from this URL instead
        #[arg(long, conflicts_with = "file")]
        url: Option<String>,
        /// Drop predictions scoring below this (defaults to pairs.min_score)
        #[arg(long)]
        min_score: Option<f64>,
    },
    /// Query pairs and print the JSON result
    Query {
        /// Substring filter, e.g. drug_name=aspirin (repeatable)
        #[arg(long = "filter", value_parser = cli::query::parse_key_value)]
        filters: Vec<(String, String)>,
        /// Sort key, e.g. score=desc (repeatable, first is primary)
        #[arg(long = "sort", value_parser = cli::query::parse_key_value)]
        sort: Vec<(String, String)>,
        #[arg(long, default_value_t = 20)]
        limit: i64,
        #[arg(long, default_value_t = 0)]
        offset: i64,
    },
    /// Print all stored pairs as a loadable dataset
    Export,
    /// Show pair table statistics
    Stats,
    /// Check database health
    Doctor,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => RobokopConfig::load_from(path)?,
        None => RobokopConfig::load()?,
    };

    // Log to stderr so stdout stays clean for JSON output.
    let filter = EnvFilter::try_new(&config.server.log_level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Serve => robokop_pairs::server::serve(config).await?,
        Command::Load {
            file,
            url,
            min_score,
        } => cli::load::load(&config, file.as_deref(), url.as_deref(), min_score).await?,
        Command::Query {
            filters,
            sort,
            limit,
            offset,
        } => cli::query::query(&config, filters, sort, limit, offset)?,
        Command::Export => cli::export::export(&config)?,
        Command::Stats => cli::stats::stats(&config)?,
        Command::Doctor => cli::doctor::doctor(&config)?,
    }

    Ok(())
}
