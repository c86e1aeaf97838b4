use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "subtitle-sync")]
#[command(about = "Download new completed subtitles for the shows on your watch-list")]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// List the episodes that would be downloaded without fetching them
    #[arg(long)]
    pub dry_run: bool,
}
