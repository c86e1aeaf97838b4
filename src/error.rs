use thiserror::Error;

/// Errors that can occur while talking to the subtitle site.
#[derive(Debug, Error)]
pub enum SiteError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP error {status} for {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Failed to parse page: {0}")]
    Parse(String),

    #[error("No season listed on {0}")]
    NoSeason(String),

    #[error("Response has no content-disposition header")]
    MissingContentDisposition,

    #[error("Malformed content-disposition header: {0}")]
    MalformedContentDisposition(String),

    #[error("{operation} '{path}': {source}")]
    Io {
        operation: &'static str,
        path: String,
        source: std::io::Error,
    },
}

impl SiteError {
    /// Whether the same request could plausibly succeed later.
    pub fn is_transient(&self) -> bool {
        match self {
            SiteError::Request(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            SiteError::HttpStatus { status, .. } => {
                *status == 408 || *status == 429 || (500..=599).contains(status)
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(status: u16) -> SiteError {
        SiteError::HttpStatus {
            status,
            url: "http://x/y".to_string(),
        }
    }

    #[test]
    fn test_transient_statuses() {
        assert!(status(503).is_transient());
        assert!(status(429).is_transient());
        assert!(status(408).is_transient());
        assert!(!status(404).is_transient());
        assert!(!status(403).is_transient());
    }

    #[test]
    fn test_format_errors_are_permanent() {
        assert!(!SiteError::MissingContentDisposition.is_transient());
        assert!(!SiteError::Parse("bad selector".to_string()).is_transient());
        assert!(!SiteError::NoSeason("http://x/show/1".to_string()).is_transient());
    }
}
