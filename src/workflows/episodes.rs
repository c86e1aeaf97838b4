use crate::domain::models::{Episode, Show};
use crate::error::SiteError;
use crate::infra::site::SubtitleSite;

/// Completed episodes of the show's latest season in the wanted language.
pub struct SeasonEpisodes {
    pub season: String,
    pub episodes: Vec<Episode>,
}

pub fn fetch_episodes<S: SubtitleSite + ?Sized>(
    site: &S,
    show: &Show,
    language: &str,
) -> Result<SeasonEpisodes, SiteError> {
    let season = site.fetch_latest_season(show)?;
    let episodes = site
        .fetch_episode_table(show, &season)?
        .into_iter()
        .filter(|episode| episode.completed && episode.language == language)
        .collect();

    Ok(SeasonEpisodes { season, episodes })
}
