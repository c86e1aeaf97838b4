use scraper::{ElementRef, Html, Selector};

use crate::domain::models::{Episode, Show};
use crate::error::SiteError;

const SHOW_PATH_PREFIX: &str = "/show/";
const COMPLETED_STATUS: &str = "Completed";

fn selector(css: &str) -> Result<Selector, SiteError> {
    Selector::parse(css).map_err(|e| SiteError::Parse(e.to_string()))
}

fn text_of(element: &ElementRef) -> String {
    element.text().collect::<String>()
}

/// Extracts every show link from the catalog page, in document order.
pub fn parse_show_list(html: &str, base_url: &str) -> Result<Vec<Show>, SiteError> {
    let document = Html::parse_document(html);
    let a_selector = selector("a[href]")?;

    let shows = document
        .select(&a_selector)
        .filter_map(|a| {
            let href = a.value().attr("href")?;
            let id = href.strip_prefix(SHOW_PATH_PREFIX)?;
            Some(Show {
                id: id.to_string(),
                name: text_of(&a),
                url: format!("{base_url}{href}"),
            })
        })
        .collect();

    Ok(shows)
}

/// Returns the label of the last season button on a show page.
pub fn parse_latest_season(html: &str) -> Result<Option<String>, SiteError> {
    let document = Html::parse_document(html);
    let button_selector = selector("#sl button")?;

    Ok(document
        .select(&button_selector)
        .last()
        .map(|button| text_of(&button).trim().to_string())
        .filter(|label| !label.is_empty()))
}

/// Parses the rows marked completed in a season's subtitle table.
pub fn parse_episode_table(html: &str, base_url: &str) -> Result<Vec<Episode>, SiteError> {
    let document = Html::parse_document(html);
    let row_selector = selector("#season .completed")?;
    let td_selector = selector("td")?;
    let link_selector = selector("a[href]")?;

    let mut episodes = Vec::new();
    for row in document.select(&row_selector) {
        let cells: Vec<ElementRef> = row.select(&td_selector).collect();
        if cells.len() < 10 {
            continue;
        }

        let Some(href) = cells[9]
            .select(&link_selector)
            .next()
            .and_then(|a| a.value().attr("href"))
        else {
            continue;
        };

        let cell = |index: usize| text_of(&cells[index]).trim().to_string();
        episodes.push(Episode {
            season: cell(0),
            episode: cell(1),
            language: cell(3),
            version: cell(4),
            completed: cell(5) == COMPLETED_STATUS,
            url: format!("{base_url}{href}"),
        });
    }

    Ok(episodes)
}
