//! Watch-link handling for the branded player page
//!
//! Links carry the video location and some display metadata in the query
//! string. Only absolute `http`/`https` URLs survive sanitizing; anything else
//! becomes an empty string, which means "nothing playable".

use serde::{Deserialize, Serialize};
use url::Url;

/// Parameters recognized on a watch link
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchParams {
    /// Sanitized video URL, empty when missing or unsafe
    pub video_url: String,
    /// Sanitized return URL, empty when missing or unsafe
    pub home: String,
    pub title: Option<String>,
    pub episode: Option<String>,
    pub season: Option<String>,
    pub server: Option<String>,
}

/// How the page was reached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationKind {
    #[default]
    Navigate,
    Reload,
    BackForward,
}

/// Everything the player needs to render
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerPage {
    pub video_url: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub server: Option<String>,
    pub home: Option<String>,
}

/// Decision for a watch request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum WatchView {
    Redirect { to: String },
    Play(PlayerPage),
    InvalidLink,
}

const DEFAULT_TITLE: &str = "Now Playing";

/// Keep `raw` only if it is an absolute http(s) URL; otherwise return `""`
pub fn sanitize_http_url(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return String::new();
    }

    match Url::parse(raw) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.host().is_some() => url.to_string(),
        Ok(url) => {
            tracing::debug!(scheme = %url.scheme(), "Rejected watch URL with unsupported scheme");
            String::new()
        }
        Err(e) => {
            tracing::debug!(error = %e, "Rejected unparsable watch URL");
            String::new()
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

impl WatchParams {
    /// Parse a query string, with or without the leading `?`
    pub fn from_query(query: &str) -> Self {
        let query = query.trim().trim_start_matches('?');

        let mut video_url = None;
        let mut home = None;
        let mut title = None;
        let mut anime = None;
        let mut episode = None;
        let mut season = None;
        let mut server = None;
        let mut server_label = None;

        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            let slot = match key.as_ref() {
                "video_url" => &mut video_url,
                "home" => &mut home,
                "title" => &mut title,
                "anime" => &mut anime,
                "episode" => &mut episode,
                "season" => &mut season,
                "server" => &mut server,
                "server_label" => &mut server_label,
                _ => continue,
            };
            // first occurrence wins
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }

        Self {
            video_url: video_url.map(|v| sanitize_http_url(&v)).unwrap_or_default(),
            home: home.map(|v| sanitize_http_url(&v)).unwrap_or_default(),
            title: non_empty(title).or_else(|| non_empty(anime)),
            episode: non_empty(episode),
            season: non_empty(season),
            server: non_empty(server).or_else(|| non_empty(server_label)),
        }
    }

    /// Parse the query part of a full page URL
    pub fn from_page_url(page_url: &str) -> Self {
        match Url::parse(page_url) {
            Ok(url) => Self::from_query(url.query().unwrap_or_default()),
            Err(_) => Self::from_query(page_url.split_once('?').map(|(_, q)| q).unwrap_or_default()),
        }
    }

    pub fn has_playable_video(&self) -> bool {
        !self.video_url.is_empty()
    }

    /// "Season 2 · Episode 5" style line, when any episode data is present
    pub fn subtitle(&self) -> Option<String> {
        match (&self.season, &self.episode) {
            (Some(season), Some(episode)) => Some(format!("Season {} · Episode {}", season, episode)),
            (Some(season), None) => Some(format!("Season {}", season)),
            (None, Some(episode)) => Some(format!("Episode {}", episode)),
            (None, None) => None,
        }
    }

    /// Decide what the page shows.
    ///
    /// A reload never replays the link: it sends the visitor back to `home`,
    /// or to `fallback_home` when the link carried none.
    pub fn resolve(&self, navigation: NavigationKind, fallback_home: &str) -> WatchView {
        if navigation == NavigationKind::Reload {
            let to = if self.home.is_empty() {
                fallback_home.to_string()
            } else {
                self.home.clone()
            };
            tracing::info!(to = %to, "Reload detected on watch page, redirecting home");
            return WatchView::Redirect { to };
        }

        if !self.has_playable_video() {
            return WatchView::InvalidLink;
        }

        WatchView::Play(PlayerPage {
            video_url: self.video_url.clone(),
            title: self.title.clone().unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            subtitle: self.subtitle(),
            server: self.server.clone(),
            home: (!self.home.is_empty()).then(|| self.home.clone()),
        })
    }
}
