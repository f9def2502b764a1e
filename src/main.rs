use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use feedsearch::config::Config;
use feedsearch::feed::load_feeds;
use feedsearch::search::{self, write_results};

/// Get the default config file path (~/.config/feedsearch/config.toml)
fn default_config_path() -> Option<PathBuf> {
    let home = std::env::var_os("HOME")?;
    Some(
        PathBuf::from(home)
            .join(".config")
            .join("feedsearch")
            .join("config.toml"),
    )
}

#[derive(Parser, Debug)]
#[command(
    name = "feedsearch",
    about = "Search RSS feeds for a regular expression in item titles and descriptions"
)]
struct Args {
    /// Regular expression to look for
    term: String,

    /// Feed descriptor file (overrides `feeds_file` from the config)
    #[arg(long, value_name = "FILE")]
    feeds: Option<PathBuf>,

    /// Config file (defaults to ~/.config/feedsearch/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout carries only results
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match args.config.clone().or_else(default_config_path) {
        Some(path) => Config::load(&path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => {
            tracing::debug!("HOME not set and no --config given, using defaults");
            Config::default()
        }
    };

    // Every matcher would reject a bad pattern after fetching; fail before any request
    regex::Regex::new(&args.term)
        .with_context(|| format!("Invalid search pattern: {}", args.term))?;

    let feeds_path = args.feeds.unwrap_or_else(|| config.feeds_file.clone());
    let feeds = load_feeds(&feeds_path)
        .with_context(|| format!("Failed to load feeds from {}", feeds_path.display()))?;

    if feeds.is_empty() {
        eprintln!("Warning: No feeds found in {}", feeds_path.display());
        return Ok(());
    }

    let mut builder = reqwest::Client::builder().user_agent(config.user_agent.as_str());
    if let Some(timeout) = config.request_timeout() {
        builder = builder.timeout(timeout);
    }
    let client = builder.build().context("Failed to build HTTP client")?;

    let outcomes = search::run(&client, &feeds, &args.term, &config.search_options()).await;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let matches = write_results(&mut out, &outcomes).context("Failed to write results")?;

    let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
    tracing::info!(
        feeds = outcomes.len(),
        failed = failed,
        matches = matches,
        "Search complete"
    );

    Ok(())
}
