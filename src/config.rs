use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://www.addic7ed.com";

const CONFIG_ENV: &str = "SUBTITLE_SYNC_CONFIG";

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Exact display names of the shows to track
    pub shows: Vec<String>,
    pub language: String,
    /// Where downloaded subtitle files are written
    pub directory: PathBuf,
    /// Location of the JSON download history
    pub history: PathBuf,
    pub base_url: String,
    pub request_timeout_secs: u64,
    pub run_deadline_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            shows: Vec::new(),
            language: "English".to_string(),
            directory: PathBuf::from("."),
            history: PathBuf::from("history.json"),
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: 30,
            run_deadline_secs: None,
        }
    }
}

impl Config {
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()
    }

    fn validate(mut self) -> Result<Self> {
        if self.language.trim().is_empty() {
            bail!("`language` must not be empty");
        }
        let trimmed = self.base_url.trim_end_matches('/');
        if trimmed.is_empty() {
            bail!("`base_url` must not be empty");
        }
        self.base_url = trimmed.to_string();
        if self.request_timeout_secs == 0 {
            bail!("`request_timeout_secs` must be greater than zero");
        }
        if self.shows.is_empty() {
            log::warn!("Watch-list is empty, nothing will be downloaded");
        }
        Ok(self)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn run_deadline(&self) -> Option<Duration> {
        self.run_deadline_secs.map(Duration::from_secs)
    }
}

/// Reads and validates the configuration, looking it up when no path is given.
pub fn load(explicit: Option<&Path>) -> Result<Config> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => find_config_path(),
    };
    log::info!("Using config path: {}", path.display());

    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    Config::from_toml(&content).with_context(|| format!("Invalid config file {}", path.display()))
}

fn find_config_path() -> PathBuf {
    if let Ok(path) = env::var(CONFIG_ENV) {
        return PathBuf::from(path);
    }

    let local = PathBuf::from("config.toml");
    if local.exists() {
        return local;
    }

    get_config_dir_path().join("config.toml")
}

fn get_config_dir_path() -> PathBuf {
    xdir::config()
        .map(|path| path.join("subtitle-sync"))
        // If the standard path could not be found (e.g.`$HOME` is not set),
        // default to the current directory.
        .unwrap_or_default()
}
