use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::config::Config;
use crate::domain::models::{Episode, HistoryEntry, Show};
use crate::error::SiteError;
use crate::infra::history::{History, HistoryStore};
use crate::infra::site::SubtitleSite;
use crate::workflows::downloader::download_episode;
use crate::workflows::episodes::fetch_episodes;
use crate::workflows::filter::{filter_new, select_shows};

#[derive(Debug)]
pub struct ShowFailure {
    pub show: String,
    pub error: SiteError,
}

#[derive(Debug)]
pub struct EpisodeFailure {
    pub show: String,
    pub url: String,
    pub error: SiteError,
}

/// What a sync run did.
#[derive(Debug, Default)]
pub struct RunReport {
    pub shows_available: usize,
    pub shows_selected: usize,
    pub downloaded: Vec<PathBuf>,
    /// Episodes found but not fetched because of `--dry-run`
    pub pending: Vec<(String, Episode)>,
    pub skipped_shows: Vec<ShowFailure>,
    pub failed_episodes: Vec<EpisodeFailure>,
    pub deadline_reached: bool,
    pub history_saved: bool,
}

/// Per-run state: the site, the settings and the history being extended.
pub struct SyncRun<'a, S: SubtitleSite + ?Sized> {
    site: &'a S,
    config: &'a Config,
    history: History,
    dry_run: bool,
    deadline: Option<Instant>,
    report: RunReport,
}

impl<'a, S: SubtitleSite + ?Sized> SyncRun<'a, S> {
    pub fn new(site: &'a S, config: &'a Config, history: History, dry_run: bool) -> Self {
        Self {
            site,
            config,
            history,
            dry_run,
            deadline: config.run_deadline().map(|limit| Instant::now() + limit),
            report: RunReport::default(),
        }
    }

    fn deadline_passed(&mut self) -> bool {
        let passed = self
            .deadline
            .is_some_and(|deadline| Instant::now() >= deadline);
        if passed && !self.report.deadline_reached {
            log::warn!("Run deadline reached, skipping remaining work");
            self.report.deadline_reached = true;
        }
        passed
    }

    /// Fetches the catalog and syncs every watched show.
    /// Only a catalog failure aborts; show and episode failures are collected.
    pub fn sync_all(&mut self) -> Result<()> {
        let catalog = self
            .site
            .fetch_show_list()
            .context("Failed to fetch the show catalog")?;
        if catalog.is_empty() {
            log::warn!("Catalog page listed no shows, the page layout may have changed");
        }
        self.report.shows_available = catalog.len();
        println!("{} shows available", catalog.len());

        let shows = select_shows(catalog, &self.config.shows);
        self.report.shows_selected = shows.len();
        println!("{} filtered shows", shows.len());

        for show in &shows {
            if self.deadline_passed() {
                break;
            }
            match self.sync_show(show) {
                Ok(count) => println!("  {count} file(s) downloaded from {}", show.name),
                Err(error) => {
                    log::warn!(
                        "Skipping {}: {error} ({})",
                        show.name,
                        if error.is_transient() { "transient" } else { "permanent" }
                    );
                    self.report.skipped_shows.push(ShowFailure {
                        show: show.name.clone(),
                        error,
                    });
                }
            }
        }

        Ok(())
    }

    /// Returns how many episodes of the show were downloaded.
    fn sync_show(&mut self, show: &Show) -> Result<usize, SiteError> {
        println!("Download from {}", show.name);

        let found = fetch_episodes(self.site, show, &self.config.language)?;
        println!("  season {}", found.season);

        let episodes = filter_new(found.episodes, &self.history);
        let mut downloaded = 0;
        for episode in episodes {
            if self.deadline_passed() {
                break;
            }
            println!(
                "  download episode {} version {}",
                episode.episode, episode.version
            );

            if self.dry_run {
                self.report.pending.push((show.name.clone(), episode));
                continue;
            }

            match download_episode(self.site, show, &episode, &self.config.directory) {
                Ok(path) => {
                    log::debug!("Wrote {}", path.display());
                    self.history.record(HistoryEntry {
                        show: show.name.clone(),
                        url: episode.url.clone(),
                    });
                    self.report.downloaded.push(path);
                    downloaded += 1;
                }
                Err(error) => {
                    log::warn!("Failed to download {}: {error}", episode.url);
                    self.report.failed_episodes.push(EpisodeFailure {
                        show: show.name.clone(),
                        url: episode.url,
                        error,
                    });
                }
            }
        }

        Ok(downloaded)
    }

    pub fn into_parts(self) -> (History, RunReport) {
        (self.history, self.report)
    }
}

/// One full sync cycle: load history, sync, save history.
pub fn run<S: SubtitleSite + ?Sized>(
    site: &S,
    config: &Config,
    store: &HistoryStore,
    dry_run: bool,
) -> Result<RunReport> {
    let history = store.load();
    log::info!(
        "Loaded {} history entries from {}",
        history.len(),
        store.path().display()
    );

    let mut sync = SyncRun::new(site, config, history, dry_run);
    sync.sync_all()?;
    let (history, mut report) = sync.into_parts();

    if dry_run {
        return Ok(report);
    }

    match store.save(&history) {
        Ok(()) => report.history_saved = true,
        Err(e) => log::error!(
            "Failed to save history to {}: {e:#}",
            store.path().display()
        ),
    }

    Ok(report)
}

/// Creates the output directory when it does not exist yet.
pub fn prepare_directory(directory: &Path) -> Result<()> {
    std::fs::create_dir_all(directory)
        .with_context(|| format!("Failed to create output directory {}", directory.display()))
}
