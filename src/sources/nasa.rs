//! NASA+ videos from the site's WordPress REST API.
//!
//! Every upstream record is one video with a single master HLS stream, so
//! details carry one synthetic episode whose url is already the media URL.

use reqwest::Client;
use tracing::{debug, info, warn};

use super::paging::{clamp_page, page_has_next};
use super::{Source, SourceError, SourceMetadata};
use crate::clients::wordpress::{SearchHit, VideoPost, WordPressClient, WpPage};
use crate::config::NasaConfig;
use crate::models::{
    CatalogEntry, Episode, SearchPage, Stream, StreamBundle, StreamType, VideoDetails,
    VideoStatus,
};
use crate::parser::{decode_entities, sanitize_html};

pub const SOURCE_ID: &str = "nasa-plus";
pub const SERVER_ID: &str = "nasa-main";
pub const SERVER_NAME: &str = "NASA+ Master Stream";
pub const GENRES: &[&str] = &["Space", "Science", "Documentary"];

pub const MAIN_EPISODE_ID: &str = "main";
pub const MAIN_EPISODE_TITLE: &str = "Full Video";
pub const AUTO_QUALITY: &str = "auto";

pub struct NasaSource {
    client: WordPressClient,
    config: NasaConfig,
    metadata: SourceMetadata,
}

impl NasaSource {
    #[must_use]
    pub fn with_shared_client(client: Client, config: NasaConfig) -> Self {
        let metadata = SourceMetadata {
            id: SOURCE_ID,
            name: "NASA+",
            version: "1.0.0",
            description: "Official streaming service from the National Aeronautics and Space Administration",
            author: "Haishin",
            base_url: config.base_url.clone(),
            icon: Some(
                "https://plus.nasa.gov/wp-content/uploads/2023/03/cropped-nasa-png-placeholder.png",
            ),
            language: "en",
            nsfw: false,
        };

        Self {
            client: WordPressClient::with_shared_client(client, &config.api_url),
            config,
            metadata,
        }
    }

    fn page_from<T>(
        &self,
        page: u32,
        wp: WpPage<T>,
        map: impl Fn(T) -> Option<CatalogEntry>,
    ) -> SearchPage {
        let count = wp.raw_len;
        let total_pages = wp.total_pages.unwrap_or(1);
        let has_next_page = page_has_next(count, self.config.page_size, page, total_pages);

        let results: Vec<CatalogEntry> = wp.items.into_iter().filter_map(map).collect();
        debug!(
            "Mapped {} of {} items, total pages {}, has next {}",
            results.len(),
            count,
            total_pages,
            has_next_page
        );

        SearchPage::new(results, has_next_page)
    }

    async fn find_video(&self, id: &str) -> Result<VideoPost, SourceError> {
        let id = id.trim();

        if is_numeric_id(id) {
            return self
                .client
                .video(id)
                .await?
                .ok_or_else(|| SourceError::not_found(format!("video {id}")));
        }

        self.client
            .videos_by_slug(id)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| SourceError::not_found(format!("video for slug: {id}")))
    }
}

#[async_trait::async_trait]
impl Source for NasaSource {
    fn metadata(&self) -> &SourceMetadata {
        &self.metadata
    }

    async fn search(&self, query: &str, page: u32) -> SearchPage {
        let page = clamp_page(page);
        match self.client.search(query, page, self.config.page_size).await {
            Ok(wp) => self.page_from(page, wp, entry_from_hit),
            Err(e) => {
                warn!("NASA+ search failed for {:?} (page {}): {}", query, page, e);
                SearchPage::empty()
            }
        }
    }

    async fn video_details(&self, id: &str, _url: &str) -> Result<VideoDetails, SourceError> {
        debug!("Fetching NASA+ video details for {}", id);
        let post = self.find_video(id).await?;
        let details = details_from_post(post);

        info!(
            "Resolved NASA+ video {} ({})",
            details.id,
            if details.server_episodes(SERVER_ID).iter().any(|e| !e.url.is_empty()) {
                "stream available"
            } else {
                "no stream url"
            }
        );
        Ok(details)
    }

    async fn episode_streams(
        &self,
        episode_id: &str,
        episode_url: &str,
    ) -> Result<StreamBundle, SourceError> {
        let url = episode_url.trim();
        if url.is_empty() {
            return Err(SourceError::MissingStreamUrl(episode_id.to_string()));
        }

        Ok(StreamBundle::new(vec![Stream {
            quality: AUTO_QUALITY.to_string(),
            url: url.to_string(),
            stream_type: StreamType::Hls,
            headers: None,
        }]))
    }

    async fn latest(&self, page: u32) -> SearchPage {
        let page = clamp_page(page);
        match self.client.list_videos(page, self.config.page_size).await {
            Ok(wp) => self.page_from(page, wp, entry_from_post),
            Err(e) => {
                warn!("NASA+ latest failed (page {}): {}", page, e);
                SearchPage::empty()
            }
        }
    }
}

fn is_numeric_id(id: &str) -> bool {
    !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit())
}

fn entry_from_hit(hit: SearchHit) -> Option<CatalogEntry> {
    let Some(url) = hit.page_url() else {
        warn!("Skipping search hit {} without a url", hit.id);
        return None;
    };

    Some(CatalogEntry {
        title: decode_entities(hit.title.as_deref().unwrap_or_default()),
        english_title: None,
        cover_url: hit.cover_url(),
        url,
        id: hit.id,
    })
}

fn entry_from_post(post: VideoPost) -> Option<CatalogEntry> {
    let Some(url) = post.link else {
        warn!("Skipping video {} without a link", post.id);
        return None;
    };

    Some(CatalogEntry {
        id: post.id,
        title: decode_entities(post.title.as_deref().unwrap_or_default()),
        english_title: None,
        cover_url: post.featured_image_url,
        url,
    })
}

/// Maps one video record into details with its single synthetic episode.
#[must_use]
pub fn details_from_post(post: VideoPost) -> VideoDetails {
    let episode = Episode {
        id: MAIN_EPISODE_ID.to_string(),
        number: 1,
        title: MAIN_EPISODE_TITLE.to_string(),
        url: post.meta.video_url.clone().unwrap_or_default(),
    };

    let title = decode_entities(post.title.as_deref().unwrap_or_default());
    let mut details = VideoDetails::new(post.id, title)
        .with_genres(GENRES.iter().copied())
        .with_server(SERVER_ID, SERVER_NAME, vec![episode]);

    details.synopsis = post.content.as_deref().map(sanitize_html).unwrap_or_default();
    details.cover_url = post.featured_image_url;
    details.rating = post.meta.rating;
    details.release_date = post.date;
    details.duration_seconds = post.meta.runtime;
    details.status = VideoStatus::Completed;

    details
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn post(value: serde_json::Value) -> VideoPost {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_numeric_id_detection() {
        assert!(is_numeric_id("12345"));
        assert!(!is_numeric_id("artemis-i-launch"));
        assert!(!is_numeric_id("12a"));
        assert!(!is_numeric_id(""));
    }

    #[test]
    fn test_details_from_post() {
        let details = details_from_post(post(json!({
            "id": 4242,
            "title": {"rendered": "Artemis I &#8211; Launch"},
            "content": {"rendered": "<p>Liftoff &amp; ascent</p>\n\n<p>Orion</p>"},
            "featured_image_url": "https://img/artemis.jpg",
            "date": "2022-11-16T06:47:44",
            "meta": {"video-url": "https://cdn/artemis/master.m3u8", "runtime": 5400, "rating": "TV-G"}
        })));

        assert_eq!(details.id, "4242");
        assert_eq!(details.title, "Artemis I - Launch");
        assert_eq!(details.synopsis, "Liftoff & ascent\nOrion");
        assert_eq!(details.duration_seconds, Some(5400));
        assert_eq!(details.rating.as_deref(), Some("TV-G"));
        assert_eq!(details.status, VideoStatus::Completed);
        assert_eq!(details.servers().get(SERVER_ID).map(String::as_str), Some(SERVER_NAME));

        let episodes = details.server_episodes(SERVER_ID);
        assert_eq!(episodes.len(), 1);
        assert_eq!(episodes[0].id, "main");
        assert_eq!(episodes[0].title, "Full Video");
        assert_eq!(episodes[0].url, "https://cdn/artemis/master.m3u8");
    }

    #[test]
    fn test_details_without_meta() {
        let bare = post(json!({"id": 1, "title": {"rendered": "Bare"}, "meta": []}));
        let details = details_from_post(bare);
        assert_eq!(details.server_episodes(SERVER_ID)[0].url, "");
        assert_eq!(details.synopsis, "");
        assert!(details.cover_url.is_none());
    }

    #[test]
    fn test_entry_from_hit_skips_missing_url() {
        let hit: SearchHit = serde_json::from_value(json!({"id": 3, "title": "No link"})).unwrap();
        assert!(entry_from_hit(hit).is_none());

        let hit: SearchHit = serde_json::from_value(json!({
            "id": 3, "title": "Webb &amp; Hubble", "url": "https://plus.nasa.gov/video/webb/"
        }))
        .unwrap();
        let entry = entry_from_hit(hit).unwrap();
        assert_eq!(entry.id, "3");
        assert_eq!(entry.title, "Webb & Hubble");
    }

    #[tokio::test]
    async fn test_stream_pass_through() {
        let source = NasaSource::with_shared_client(Client::new(), NasaConfig::default());

        let bundle = source
            .episode_streams("main", "https://cdn/x/master.m3u8")
            .await
            .unwrap();
        assert_eq!(bundle.streams.len(), 1);
        assert_eq!(bundle.streams[0].quality, "auto");
        assert_eq!(bundle.streams[0].stream_type, StreamType::Hls);
        assert!(bundle.subtitles.is_empty());

        let err = source.episode_streams("main", "  ").await.unwrap_err();
        assert!(matches!(err, SourceError::MissingStreamUrl(_)));
    }
}
