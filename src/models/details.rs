use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoStatus {
    Ongoing,
    Completed,
    Upcoming,
    #[default]
    Unknown,
}

impl VideoStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ongoing => "ongoing",
            Self::Completed => "completed",
            Self::Upcoming => "upcoming",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for VideoStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One playable unit. `url` is whatever the stream resolver of the same
/// source expects: an upstream identifier or an already resolved media URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    pub id: String,
    pub number: u32,
    pub title: String,
    pub url: String,
}

/// Only built through [`VideoDetails::new`] and [`VideoDetails::with_server`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoDetails {
    pub id: String,
    pub title: String,
    pub english_title: Option<String>,
    pub synopsis: String,
    pub cover_url: Option<String>,
    pub creator: Option<String>,
    pub rating: Option<String>,
    pub release_date: Option<String>,
    pub duration_seconds: Option<u64>,
    pub status: VideoStatus,
    pub genres: BTreeSet<String>,
    servers: BTreeMap<String, String>,
    episodes: BTreeMap<String, Vec<Episode>>,
}

impl VideoDetails {
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_genres<I, S>(mut self, genres: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.genres.extend(genres.into_iter().map(Into::into));
        self
    }

    /// Registers a server together with its episode list. Servers and
    /// episode groups are only ever inserted as a pair, so every key in
    /// `episodes` always has a display name in `servers`.
    #[must_use]
    pub fn with_server(
        mut self,
        server_id: impl Into<String>,
        display_name: impl Into<String>,
        episodes: Vec<Episode>,
    ) -> Self {
        let server_id = server_id.into();
        self.servers.insert(server_id.clone(), display_name.into());
        self.episodes.insert(server_id, episodes);
        self
    }

    #[must_use]
    pub const fn servers(&self) -> &BTreeMap<String, String> {
        &self.servers
    }

    #[must_use]
    pub const fn episodes(&self) -> &BTreeMap<String, Vec<Episode>> {
        &self.episodes
    }

    #[must_use]
    pub fn server_episodes(&self, server_id: &str) -> &[Episode] {
        self.episodes.get(server_id).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn episode_count(&self) -> usize {
        self.episodes.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn episode(number: u32) -> Episode {
        Episode {
            id: format!("ep-{number}"),
            number,
            title: format!("Episode {number}"),
            url: format!("ep-{number}"),
        }
    }

    #[test]
    fn test_every_episode_group_has_a_server() {
        let details = VideoDetails::new("popeye", "Popeye")
            .with_server("Archive.org", "Archive.org", vec![episode(1), episode(2)])
            .with_server("mirror", "Mirror", vec![episode(1)]);

        for key in details.episodes().keys() {
            assert!(details.servers().contains_key(key));
        }
        assert_eq!(details.episode_count(), 3);
        assert_eq!(details.server_episodes("Archive.org").len(), 2);
        assert!(details.server_episodes("missing").is_empty());

        let json = serde_json::to_value(&details).unwrap();
        let server_keys: Vec<&String> = json["servers"].as_object().unwrap().keys().collect();
        let episode_keys: Vec<&String> = json["episodes"].as_object().unwrap().keys().collect();
        assert_eq!(server_keys, episode_keys);
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let details = VideoDetails {
            status: VideoStatus::Completed,
            ..VideoDetails::new("1", "Launch")
        };
        let json = serde_json::to_value(&details).unwrap();
        assert_eq!(json["status"], "completed");
        assert!(json["servers"].is_object());
        assert!(json["releaseDate"].is_null());
    }

    #[test]
    fn test_genres_deduplicate() {
        let details = VideoDetails::new("1", "x").with_genres(["Space", "Science", "Space"]);
        assert_eq!(details.genres.len(), 2);
    }
}
