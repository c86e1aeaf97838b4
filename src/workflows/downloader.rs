use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::models::{Episode, Show};
use crate::error::SiteError;
use crate::infra::site::SubtitleSite;

/// Fetches one subtitle and writes it into `directory` under the name the
/// server announces. Returns the written path.
pub fn download_episode<S: SubtitleSite + ?Sized>(
    site: &S,
    show: &Show,
    episode: &Episode,
    directory: &Path,
) -> Result<PathBuf, SiteError> {
    let attachment = site.fetch_attachment(show, episode)?;
    let header = attachment
        .content_disposition
        .as_deref()
        .ok_or(SiteError::MissingContentDisposition)?;
    let filename = filename_from_content_disposition(header)?;

    let path = directory.join(filename);
    fs::write(&path, &attachment.body).map_err(|source| SiteError::Io {
        operation: "Failed to write subtitle",
        path: path.display().to_string(),
        source,
    })?;

    Ok(path)
}

/// Extracts `<name>` from `attachment; filename=<name>`, quoted or not.
pub fn filename_from_content_disposition(header: &str) -> Result<String, SiteError> {
    let re = Regex::new(r#"(?i)^\s*attachment\s*;\s*filename\s*=\s*(?:"([^"]*)"|([^";]*))"#)
        .map_err(|e| SiteError::Parse(e.to_string()))?;
    let malformed = || SiteError::MalformedContentDisposition(header.to_string());

    let caps = re.captures(header).ok_or_else(malformed)?;
    let raw = caps
        .get(1)
        .or_else(|| caps.get(2))
        .map(|m| m.as_str())
        .ok_or_else(malformed)?;

    let name = sanitize_filename(raw);
    if name.is_empty() || name == "." || name == ".." {
        return Err(malformed());
    }
    Ok(name)
}

fn sanitize_filename(name: &str) -> String {
    // Remove or replace invalid filename characters
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '-',
            c if c.is_control() => '-',
            c => c,
        })
        .collect::<String>()
        .trim()
        .to_string()
}
