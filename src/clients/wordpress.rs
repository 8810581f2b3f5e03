use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use url::Url;

use super::{check_response, de, read_json};
use crate::error::SourceError;

const TOTAL_PAGES_HEADER: &str = "X-WP-TotalPages";

/// One page of a list endpoint. `total_pages` comes from a response header
/// that some deployments strip.
#[derive(Debug, Clone)]
pub struct WpPage<T> {
    pub items: Vec<T>,
    /// Records the upstream returned, including ones skipped while decoding.
    pub raw_len: usize,
    pub total_pages: Option<u32>,
}

/// A hit from the generic `/search` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchHit {
    #[serde(deserialize_with = "de::id_string")]
    pub id: String,
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub link: Option<String>,
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub featured_image_url: Option<String>,
    #[serde(rename = "_embedded", default, deserialize_with = "de::object_or_default")]
    pub embedded: Embedded,
}

impl SearchHit {
    /// Featured image, or the first embedded media with a source URL.
    #[must_use]
    pub fn cover_url(&self) -> Option<String> {
        self.featured_image_url.clone().or_else(|| {
            self.embedded
                .featured_media
                .iter()
                .find_map(|media| media.source_url.clone())
        })
    }

    #[must_use]
    pub fn page_url(&self) -> Option<String> {
        self.url.clone().or_else(|| self.link.clone())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Embedded {
    #[serde(rename = "wp:featuredmedia", default)]
    pub featured_media: Vec<FeaturedMedia>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeaturedMedia {
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub source_url: Option<String>,
}

/// A record of the `video` post type.
#[derive(Debug, Clone, Deserialize)]
pub struct VideoPost {
    #[serde(deserialize_with = "de::id_string")]
    pub id: String,
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub slug: Option<String>,
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub featured_image_url: Option<String>,
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub link: Option<String>,
    #[serde(default, deserialize_with = "de::object_or_default")]
    pub meta: VideoMeta,
}

/// Custom fields attached to a video post.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VideoMeta {
    #[serde(rename = "video-url", default, deserialize_with = "de::lenient_string")]
    pub video_url: Option<String>,
    #[serde(default, deserialize_with = "de::lenient_u64")]
    pub runtime: Option<u64>,
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub rating: Option<String>,
}

#[derive(Clone)]
pub struct WordPressClient {
    client: Client,
    api_url: String,
}

impl WordPressClient {
    #[must_use]
    pub fn with_shared_client(client: Client, api_url: &str) -> Self {
        Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url, SourceError> {
        Ok(Url::parse(&format!("{}/{path}", self.api_url))?)
    }

    pub async fn search(
        &self,
        query: &str,
        page: u32,
        per_page: u32,
    ) -> Result<WpPage<SearchHit>, SourceError> {
        let mut url = self.endpoint("search")?;
        url.query_pairs_mut()
            .append_pair("search", query)
            .append_pair("subtype", "video")
            .append_pair("per_page", &per_page.to_string())
            .append_pair("page", &page.to_string())
            .append_pair("_embed", "1");

        self.fetch_page(url).await
    }

    pub async fn list_videos(
        &self,
        page: u32,
        per_page: u32,
    ) -> Result<WpPage<VideoPost>, SourceError> {
        let mut url = self.endpoint("video")?;
        url.query_pairs_mut()
            .append_pair("per_page", &per_page.to_string())
            .append_pair("page", &page.to_string());

        self.fetch_page(url).await
    }

    /// `Ok(None)` when the upstream answers 404 for the id.
    pub async fn video(&self, id: &str) -> Result<Option<VideoPost>, SourceError> {
        let url = self.endpoint(&format!("video/{}", urlencoding::encode(id)))?;
        debug!("WordPress video: {}", url);

        let response = self.client.get(url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let response = check_response(response).await?;
        Ok(Some(read_json(response).await?))
    }

    pub async fn videos_by_slug(&self, slug: &str) -> Result<Vec<VideoPost>, SourceError> {
        let mut url = self.endpoint("video")?;
        url.query_pairs_mut().append_pair("slug", slug);

        Ok(self.fetch_page(url).await?.items)
    }

    async fn fetch_page<T: DeserializeOwned>(&self, url: Url) -> Result<WpPage<T>, SourceError> {
        debug!("WordPress list: {}", url);

        let response = self.client.get(url).send().await?;
        let response = check_response(response).await?;
        let total_pages = total_pages(&response);

        let body: Value = read_json(response).await?;
        let Value::Array(values) = body else {
            return Err(SourceError::shape("expected a JSON array"));
        };

        Ok(WpPage {
            raw_len: values.len(),
            items: de::decode_items(values),
            total_pages,
        })
    }
}

fn total_pages(response: &Response) -> Option<u32> {
    response
        .headers()
        .get(TOTAL_PAGES_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse().ok())
}
