use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use newsfetch::config::DEFAULT_TIMEOUT_SECS;
use newsfetch::{SearchConfig, SearchFetcher};
use serde::Serialize;
use tracing_subscriber::EnvFilter;
use url::Url;

#[derive(Debug, Parser)]
#[command(name = "newsfetch", version, about = "Print news result URLs for a query")]
struct Cli {
    /// Search query
    #[arg(default_value = "Kurt Cobain")]
    query: String,

    /// Results page to query instead of Bing News
    #[arg(long)]
    endpoint: Option<Url>,

    /// Request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,

    /// Print a JSON object instead of one URL per line
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct SearchOutput<'a> {
    query: &'a str,
    urls: &'a [String],
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = SearchConfig::default().with_timeout(Duration::from_secs(cli.timeout));
    if let Some(endpoint) = cli.endpoint {
        config = config.with_endpoint(endpoint);
    }

    let fetcher = match SearchFetcher::new(config) {
        Ok(fetcher) => fetcher,
        Err(e) => {
            tracing::error!(error = %e, "Failed to build search fetcher");
            return ExitCode::FAILURE;
        }
    };

    let Some(urls) = fetcher.search(&cli.query).await else {
        return ExitCode::FAILURE;
    };

    if cli.json {
        let output = SearchOutput {
            query: cli.query.trim(),
            urls: &urls,
        };
        match serde_json::to_string_pretty(&output) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                tracing::error!(error = %e, "Failed to serialize results");
                return ExitCode::FAILURE;
            }
        }
    } else {
        for url in &urls {
            println!("{url}");
        }
    }

    ExitCode::SUCCESS
}
