mod cli;
mod config;
mod domain;
mod error;
mod infra;
mod workflows;

use anyhow::{Context, Result};
use clap::Parser;

use cli::Cli;
use infra::history::HistoryStore;
use infra::site::HttpSite;
use workflows::sync::{self, RunReport};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = config::load(cli.config.as_deref())?;
    sync::prepare_directory(&config.directory)?;

    let store = HistoryStore::new(&config.history);
    let site = HttpSite::new(&config.base_url, config.request_timeout())
        .context("Failed to build HTTP client")?;

    let report = sync::run(&site, &config, &store, cli.dry_run)?;
    print_summary(&report, cli.dry_run);

    Ok(())
}

/// Failures were already logged while syncing; only the totals are printed here.
fn print_summary(report: &RunReport, dry_run: bool) {
    if dry_run {
        for (show, episode) in &report.pending {
            println!(
                "{show} {}x{} {} ({})",
                episode.season, episode.episode, episode.version, episode.url
            );
        }
        println!("{} file(s) would be downloaded", report.pending.len());
        return;
    }

    println!(
        "{} file downloaded ({} show(s) skipped, {} episode(s) failed)",
        report.downloaded.len(),
        report.skipped_shows.len(),
        report.failed_episodes.len()
    );
}
