// Repository census CLI
//
// Reads a JSON config, searches GitHub for every configured term across the
// configured year window, and writes the result tables to the output directory.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use repo_census::{Collector, Config, GitHubClient};

/// Gather information about GitHub repositories.
#[derive(Parser)]
#[command(name = "repo-census")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the JSON config file
    #[arg(value_name = "config_json")]
    config: PathBuf,

    /// GitHub token, overrides the token in the config file
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?
        .with_overrides(cli.token, cli.verbose);
    init_logging(config.verbose);

    let mut builder = GitHubClient::builder().personal_token(config.token()?);
    if let Some(base) = &config.api_base {
        builder = builder.base_uri(base);
    }
    let client = builder.build().context("creating GitHub client")?;

    let summary = Collector::new(client, config)
        .run()
        .await
        .context("collecting repositories")?;

    for report in &summary.terms {
        match (&report.error, &report.truncated) {
            (Some(error), _) => warn!("`{}` failed: {error}", report.term),
            (None, Some(cut)) => warn!(
                "`{}`: {} repositories, stopped at {} ({} results) with {} ranges unfetched",
                report.term, report.records, cut.range, cut.total_count, cut.skipped_ranges
            ),
            (None, None) => info!(
                "`{}`: {} repositories from {} ranges",
                report.term, report.records, report.planned_ranges
            ),
        }
    }
    if summary.malformed_licenses > 0 {
        warn!("{} license values could not be normalized", summary.malformed_licenses);
    }
    info!(
        "{} repositories, {} duplicates",
        summary.rows, summary.duplicates
    );
    for path in &summary.written {
        info!("wrote {}", path.display());
    }

    Ok(())
}
