use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use crate::domain::models::{Episode, Show};
use crate::error::SiteError;
use crate::infra::site::{Attachment, SubtitleSite};

/// In-memory site used by the workflow tests.
#[derive(Default)]
pub struct MockSite {
    pub shows: Vec<Show>,
    /// show id -> latest season label
    pub seasons: HashMap<String, String>,
    /// (show id, season) -> table rows
    pub tables: HashMap<(String, String), Vec<Episode>>,
    /// download url -> attachment
    pub attachments: HashMap<String, Attachment>,
    /// show ids whose pages answer with a server error
    pub broken_shows: HashSet<String>,
    pub catalog_down: bool,
    pub requested_attachments: RefCell<Vec<String>>,
}

impl MockSite {
    pub fn show(id: &str, name: &str) -> Show {
        Show {
            id: id.to_string(),
            name: name.to_string(),
            url: format!("http://x/show/{id}"),
        }
    }

    pub fn episode(season: &str, number: &str, language: &str, url: &str) -> Episode {
        Episode {
            season: season.to_string(),
            episode: number.to_string(),
            language: language.to_string(),
            version: "WEB".to_string(),
            completed: true,
            url: url.to_string(),
        }
    }

    pub fn add_show(&mut self, show: Show, season: &str, episodes: Vec<Episode>) {
        self.seasons.insert(show.id.clone(), season.to_string());
        self.tables
            .insert((show.id.clone(), season.to_string()), episodes);
        self.shows.push(show);
    }

    pub fn add_attachment(&mut self, url: &str, filename: &str, body: &[u8]) {
        self.attachments.insert(
            url.to_string(),
            Attachment {
                content_disposition: Some(format!("attachment; filename=\"{filename}\"")),
                body: body.to_vec(),
            },
        );
    }

    fn server_error(url: &str) -> SiteError {
        SiteError::HttpStatus {
            status: 503,
            url: url.to_string(),
        }
    }
}

impl SubtitleSite for MockSite {
    fn fetch_show_list(&self) -> Result<Vec<Show>, SiteError> {
        if self.catalog_down {
            return Err(Self::server_error("http://x/shows.php"));
        }
        Ok(self.shows.clone())
    }

    fn fetch_latest_season(&self, show: &Show) -> Result<String, SiteError> {
        if self.broken_shows.contains(&show.id) {
            return Err(Self::server_error(&show.url));
        }
        self.seasons
            .get(&show.id)
            .cloned()
            .ok_or_else(|| SiteError::NoSeason(show.url.clone()))
    }

    fn fetch_episode_table(&self, show: &Show, season: &str) -> Result<Vec<Episode>, SiteError> {
        Ok(self
            .tables
            .get(&(show.id.clone(), season.to_string()))
            .cloned()
            .unwrap_or_default())
    }

    fn fetch_attachment(&self, _show: &Show, episode: &Episode) -> Result<Attachment, SiteError> {
        self.requested_attachments
            .borrow_mut()
            .push(episode.url.clone());
        self.attachments
            .get(&episode.url)
            .cloned()
            .ok_or_else(|| SiteError::HttpStatus {
                status: 404,
                url: episode.url.clone(),
            })
    }
}
