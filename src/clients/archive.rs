use reqwest::Client;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use super::{check_response, de, read_json};
use crate::config::ArchiveConfig;
use crate::error::SourceError;

/// Fields requested from the advanced-search endpoint.
pub const SEARCH_FIELDS: &[&str] = &["identifier", "title", "creator", "date", "description"];
pub const FEATURED_FIELDS: &[&str] = &["identifier", "title", "creator", "date"];

#[derive(Debug, Deserialize)]
struct AdvancedSearchResponse {
    response: ResultSet,
}

#[derive(Debug, Default, Deserialize)]
pub struct ResultSet {
    #[serde(rename = "numFound", default, deserialize_with = "de::lenient_u64")]
    pub num_found: Option<u64>,
    #[serde(default, deserialize_with = "de::skip_malformed")]
    pub docs: Vec<ArchiveDoc>,
}

impl ResultSet {
    #[must_use]
    pub fn total(&self) -> u64 {
        self.num_found.unwrap_or(0)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArchiveDoc {
    #[serde(deserialize_with = "de::id_string")]
    pub identifier: String,
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub creator: Option<String>,
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ItemMetadata {
    #[serde(default)]
    pub files: Vec<ArchiveFile>,
}

/// One entry of an item's file manifest.
#[derive(Debug, Clone, Deserialize)]
pub struct ArchiveFile {
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub format: Option<String>,
    #[serde(default, deserialize_with = "de::lenient_u64")]
    pub size: Option<u64>,
    #[serde(default, deserialize_with = "de::lenient_u32")]
    pub height: Option<u32>,
}

/// Parameters of one advanced-search call.
#[derive(Debug, Clone)]
pub struct SearchRequest<'a> {
    pub query: String,
    pub rows: u32,
    pub start: u32,
    pub fields: &'a [&'a str],
    pub sort: Option<&'a str>,
}

impl<'a> SearchRequest<'a> {
    #[must_use]
    pub const fn new(query: String, rows: u32) -> Self {
        Self {
            query,
            rows,
            start: 0,
            fields: SEARCH_FIELDS,
            sort: None,
        }
    }

    #[must_use]
    pub const fn with_start(mut self, start: u32) -> Self {
        self.start = start;
        self
    }

    #[must_use]
    pub const fn with_fields(mut self, fields: &'a [&'a str]) -> Self {
        self.fields = fields;
        self
    }

    #[must_use]
    pub const fn with_sort(mut self, sort: &'a str) -> Self {
        self.sort = Some(sort);
        self
    }
}

#[derive(Clone)]
pub struct ArchiveClient {
    client: Client,
    config: ArchiveConfig,
}

impl ArchiveClient {
    #[must_use]
    pub const fn with_shared_client(client: Client, config: ArchiveConfig) -> Self {
        Self { client, config }
    }

    #[must_use]
    pub const fn config(&self) -> &ArchiveConfig {
        &self.config
    }

    /// `collection:<c>` alone, or ANDed with the user query.
    #[must_use]
    pub fn scoped_query(&self, query: &str) -> String {
        let query = query.trim();
        if query.is_empty() {
            format!("collection:{}", self.config.collection)
        } else {
            format!("collection:{} AND ({query})", self.config.collection)
        }
    }

    #[must_use]
    pub fn series_query(&self, series: &str) -> String {
        format!("collection:{} AND title:({series})", self.config.collection)
    }

    pub fn search_url(&self, request: &SearchRequest<'_>) -> Result<Url, SourceError> {
        let mut url = Url::parse(&self.config.search_url)?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("q", &request.query)
                .append_pair("output", "json")
                .append_pair("rows", &request.rows.to_string());
            if request.start > 0 {
                pairs.append_pair("start", &request.start.to_string());
            }
            pairs.append_pair("fl[]", &request.fields.join(","));
            if let Some(sort) = request.sort {
                pairs.append_pair("sort[]", sort);
            }
        }
        Ok(url)
    }

    pub async fn advanced_search(
        &self,
        request: &SearchRequest<'_>,
    ) -> Result<ResultSet, SourceError> {
        let url = self.search_url(request)?;
        debug!("Archive search: {}", url);

        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await?;
        let response = check_response(response).await?;
        let body: AdvancedSearchResponse = read_json(response).await?;

        debug!(
            "Archive search returned {} of {} docs",
            body.response.docs.len(),
            body.response.total()
        );
        Ok(body.response)
    }

    pub async fn item_metadata(&self, identifier: &str) -> Result<ItemMetadata, SourceError> {
        let url = format!(
            "{}/{}",
            self.config.metadata_url.trim_end_matches('/'),
            urlencoding::encode(identifier)
        );
        debug!("Archive metadata: {}", url);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;
        let response = check_response(response).await?;
        read_json(response).await
    }

    #[must_use]
    pub fn thumbnail_url(&self, identifier: &str) -> String {
        format!(
            "{}/services/img/{}",
            self.config.base_url.trim_end_matches('/'),
            identifier
        )
    }

    #[must_use]
    pub fn download_url(&self, identifier: &str, filename: &str) -> String {
        format!(
            "{}/download/{}/{}",
            self.config.base_url.trim_end_matches('/'),
            identifier,
            urlencoding::encode(filename)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ArchiveClient {
        ArchiveClient::with_shared_client(Client::new(), ArchiveConfig::default())
    }

    #[test]
    fn test_scoped_query() {
        let archive = client();
        assert_eq!(archive.scoped_query(""), "collection:classic_cartoons");
        assert_eq!(
            archive.scoped_query(" Popeye "),
            "collection:classic_cartoons AND (Popeye)"
        );
        assert_eq!(
            archive.series_query("Betty Boop"),
            "collection:classic_cartoons AND title:(Betty Boop)"
        );
    }

    #[test]
    fn test_search_url() {
        let archive = client();
        let request = SearchRequest::new(archive.scoped_query("Popeye"), 50).with_start(50);
        let url = archive.search_url(&request).unwrap();

        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(pairs.contains(&("q".into(), "collection:classic_cartoons AND (Popeye)".into())));
        assert!(pairs.contains(&("rows".into(), "50".into())));
        assert!(pairs.contains(&("start".into(), "50".into())));
        let fields = "identifier,title,creator,date,description";
        assert!(pairs.contains(&("fl[]".into(), fields.into())));
        assert!(pairs.iter().all(|(k, _)| k != "sort[]"));
    }

    #[test]
    fn test_download_url_encodes_filename() {
        let archive = client();
        assert_eq!(
            archive.download_url("popeye_1936", "Popeye Meets Sindbad.mp4"),
            "https://archive.org/download/popeye_1936/Popeye%20Meets%20Sindbad.mp4"
        );
        assert_eq!(
            archive.thumbnail_url("popeye_1936"),
            "https://archive.org/services/img/popeye_1936"
        );
    }

    #[test]
    fn test_manifest_decoding() {
        let metadata: ItemMetadata = serde_json::from_str(
            r#"{"files": [
                {"name": "a.mp4", "format": "h.264", "size": "1234", "height": "480"},
                {"name": "a_thumb.jpg", "format": "Thumbnail"}
            ]}"#,
        )
        .unwrap();

        assert_eq!(metadata.files.len(), 2);
        assert_eq!(metadata.files[0].size, Some(1234));
        assert_eq!(metadata.files[0].height, Some(480));
        assert_eq!(metadata.files[1].size, None);

        let empty: ItemMetadata = serde_json::from_str("{}").unwrap();
        assert!(empty.files.is_empty());
    }

    #[test]
    fn test_result_set_skips_docs_without_identifier() {
        let body: AdvancedSearchResponse = serde_json::from_str(
            r#"{"response": {"numFound": "3", "docs": [
                {"identifier": "popeye_1936", "title": "Popeye"},
                {"title": "No identifier"},
                {"identifier": 1937, "title": ["Numeric"]}
            ]}}"#,
        )
        .unwrap();

        assert_eq!(body.response.total(), 3);
        let ids: Vec<&str> = body.response.docs.iter().map(|d| d.identifier.as_str()).collect();
        assert_eq!(ids, vec!["popeye_1936", "1937"]);
        assert_eq!(body.response.docs[1].title.as_deref(), Some("Numeric"));
    }
}
