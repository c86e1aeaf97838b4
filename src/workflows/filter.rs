use std::collections::HashSet;

use crate::domain::models::{Episode, Show};
use crate::infra::history::History;

/// Keeps the catalog shows whose display name is on the watch-list.
/// Matching is exact: case-sensitive and without trimming.
pub fn select_shows(catalog: Vec<Show>, watch_list: &[String]) -> Vec<Show> {
    let wanted: HashSet<&str> = watch_list.iter().map(String::as_str).collect();
    catalog
        .into_iter()
        .filter(|show| wanted.contains(show.name.as_str()))
        .collect()
}

/// Drops episodes whose download URL is already in the history.
/// A URL repeated within `candidates` is kept only once.
pub fn filter_new(candidates: Vec<Episode>, history: &History) -> Vec<Episode> {
    let downloaded = history.urls();
    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter(|episode| {
            !downloaded.contains(episode.url.as_str()) && seen.insert(episode.url.clone())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::HistoryEntry;

    fn show(id: &str, name: &str) -> Show {
        Show {
            id: id.to_string(),
            name: name.to_string(),
            url: format!("http://x/show/{id}"),
        }
    }

    fn episode(url: &str) -> Episode {
        Episode {
            season: "1".to_string(),
            episode: "1".to_string(),
            language: "English".to_string(),
            version: "WEB".to_string(),
            completed: true,
            url: url.to_string(),
        }
    }

    fn watch(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn test_select_shows_keeps_watched_only() {
        let catalog = vec![show("1", "Foo"), show("2", "Bar")];
        let selected = select_shows(catalog, &watch(&["Foo"]));
        assert_eq!(selected, vec![show("1", "Foo")]);
    }

    #[test]
    fn test_select_shows_is_exact() {
        let catalog = vec![show("1", "foo"), show("2", "Foo "), show("3", "Foo")];
        let selected = select_shows(catalog, &watch(&["Foo"]));
        assert_eq!(selected, vec![show("3", "Foo")]);
    }

    #[test]
    fn test_select_shows_is_idempotent() {
        let catalog = vec![
            show("1", "Foo"),
            show("2", "Bar"),
            show("3", "Baz"),
            show("4", "Foo"),
        ];
        let watch_list = watch(&["Foo", "Baz", "Missing"]);
        let once = select_shows(catalog, &watch_list);
        let twice = select_shows(once.clone(), &watch_list);
        assert_eq!(once, twice);
        assert_eq!(once.len(), 3);
    }

    #[test]
    fn test_select_shows_with_empty_watch_list() {
        let catalog = vec![show("1", "Foo")];
        assert!(select_shows(catalog, &[]).is_empty());
    }

    #[test]
    fn test_filter_new_drops_downloaded_urls() {
        let history = History::from(vec![HistoryEntry {
            show: "Foo".to_string(),
            url: "http://x/y".to_string(),
        }]);
        let fresh = filter_new(vec![episode("http://x/y"), episode("http://x/z")], &history);
        assert_eq!(fresh, vec![episode("http://x/z")]);
    }

    #[test]
    fn test_filter_new_ignores_show_name() {
        let history = History::from(vec![HistoryEntry {
            show: "Some Other Show".to_string(),
            url: "http://x/y".to_string(),
        }]);
        assert!(filter_new(vec![episode("http://x/y")], &history).is_empty());
    }

    #[test]
    fn test_filter_new_with_empty_history_keeps_order() {
        let candidates = vec![episode("http://x/3"), episode("http://x/1"), episode("http://x/2")];
        let fresh = filter_new(candidates.clone(), &History::default());
        assert_eq!(fresh, candidates);
    }

    #[test]
    fn test_filter_new_collapses_repeated_candidates() {
        let fresh = filter_new(
            vec![episode("http://x/a"), episode("http://x/a"), episode("http://x/b")],
            &History::default(),
        );
        assert_eq!(fresh, vec![episode("http://x/a"), episode("http://x/b")]);
    }
}
