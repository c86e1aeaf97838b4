use reqwest::blocking::Client;
use reqwest::header::{
    HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONTENT_DISPOSITION, REFERER, USER_AGENT,
};
use std::time::Duration;

use crate::domain::models::{Episode, Show};
use crate::error::SiteError;
use crate::infra::scrape;

const BROWSER_ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,image/apng,*/*;q=0.8";
const BROWSER_ACCEPT_LANGUAGE: &str = "fr,en-US;q=0.9,en;q=0.8";
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/62.0.3202.45 Safari/537.36";

/// Raw response of a subtitle download.
#[derive(Debug, Clone)]
pub struct Attachment {
    pub content_disposition: Option<String>,
    pub body: Vec<u8>,
}

/// The pages and files the sync needs from a subtitle site.
pub trait SubtitleSite {
    fn fetch_show_list(&self) -> Result<Vec<Show>, SiteError>;

    /// Label of the most recent season listed for the show.
    fn fetch_latest_season(&self, show: &Show) -> Result<String, SiteError>;

    /// All completed rows of the season's subtitle table, any language.
    fn fetch_episode_table(&self, show: &Show, season: &str) -> Result<Vec<Episode>, SiteError>;

    fn fetch_attachment(&self, show: &Show, episode: &Episode) -> Result<Attachment, SiteError>;
}

/// Addic7ed-style site accessed over HTTP with a session cookie jar.
pub struct HttpSite {
    client: Client,
    base_url: String,
}

impl HttpSite {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, SiteError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(BROWSER_ACCEPT));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(BROWSER_ACCEPT_LANGUAGE));
        headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));

        let client = Client::builder()
            .cookie_store(true)
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn fetch_html(&self, url: &str) -> Result<String, SiteError> {
        log::debug!("GET {url}");
        let response = self.client.get(url).send()?;

        if !response.status().is_success() {
            return Err(SiteError::HttpStatus {
                status: response.status().as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.text()?)
    }
}

pub fn episode_table_url(base_url: &str, show: &Show, season: &str) -> String {
    format!(
        "{base_url}/ajax_loadShow.php?show={}&season={season}&langs=&hd=undefined&hi=undefined",
        show.id
    )
}

/// The site only serves a download when it appears to come from the season page.
pub fn download_referer(base_url: &str, show: &Show, episode: &Episode) -> String {
    format!("{base_url}/season/{}/{}", show.id, episode.season)
}

impl SubtitleSite for HttpSite {
    fn fetch_show_list(&self) -> Result<Vec<Show>, SiteError> {
        let html = self.fetch_html(&format!("{}/shows.php", self.base_url))?;
        scrape::parse_show_list(&html, &self.base_url)
    }

    fn fetch_latest_season(&self, show: &Show) -> Result<String, SiteError> {
        let html = self.fetch_html(&show.url)?;
        scrape::parse_latest_season(&html)?.ok_or_else(|| SiteError::NoSeason(show.url.clone()))
    }

    fn fetch_episode_table(&self, show: &Show, season: &str) -> Result<Vec<Episode>, SiteError> {
        let html = self.fetch_html(&episode_table_url(&self.base_url, show, season))?;
        scrape::parse_episode_table(&html, &self.base_url)
    }

    fn fetch_attachment(&self, show: &Show, episode: &Episode) -> Result<Attachment, SiteError> {
        log::debug!("GET {}", episode.url);
        let response = self
            .client
            .get(&episode.url)
            .header(REFERER, download_referer(&self.base_url, show, episode))
            .send()?;

        if !response.status().is_success() {
            return Err(SiteError::HttpStatus {
                status: response.status().as_u16(),
                url: episode.url.clone(),
            });
        }

        let content_disposition = response
            .headers()
            .get(CONTENT_DISPOSITION)
            // Servers send raw UTF-8 filenames, which `to_str` rejects.
            .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned());
        let body = response.bytes()?.to_vec();

        Ok(Attachment {
            content_disposition,
            body,
        })
    }
}
