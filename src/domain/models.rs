use serde::{Deserialize, Serialize};

/// A show listed in the site catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Show {
    /// Catalog key, the part of the show link after `/show/`
    pub id: String,
    pub name: String,
    /// Absolute URL of the show's detail page
    pub url: String,
}

/// One row of a season's subtitle table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Episode {
    pub season: String,
    pub episode: String,
    pub language: String,
    pub version: String,
    pub completed: bool,
    /// Absolute download URL, also the history key
    pub url: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub show: String,
    pub url: String,
}
