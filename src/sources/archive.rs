//! Classic cartoons from the archive.org public-domain collection.
//!
//! Upstream items are single shorts; this source presents them grouped into
//! series, each short becoming one episode.

use reqwest::Client;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, info, warn};

use super::paging::{clamp_page, offset, offset_has_next};
use super::{Source, SourceError, SourceMetadata};
use crate::clients::archive::{ArchiveClient, ArchiveDoc, FEATURED_FIELDS, SearchRequest};
use crate::config::ArchiveConfig;
use crate::models::{
    CatalogEntry, Episode, SearchPage, Stream, StreamBundle, StreamType, VideoDetails,
    VideoStatus,
};
use crate::parser::{
    decode_entities, extract_episode_title, extract_series_name, extract_year, series_slug,
};
use crate::quality::best_candidates;

pub const SOURCE_ID: &str = "archiveorg-cartoons";
pub const SERVER_ID: &str = "Archive.org";
pub const SERIES_URL_PREFIX: &str = "series:";
pub const GENRES: &[&str] = &["Animation", "Classic", "Comedy", "Public Domain"];

const FEATURED_SORT: &str = "downloads desc";
const UNKNOWN_CREATOR: &str = "Unknown";
const MISSING_DATE: &str = "9999";

pub struct ArchiveSource {
    client: ArchiveClient,
    metadata: SourceMetadata,
}

impl ArchiveSource {
    #[must_use]
    pub fn with_shared_client(client: Client, config: ArchiveConfig) -> Self {
        let metadata = SourceMetadata {
            id: SOURCE_ID,
            name: "Classic Cartoons",
            version: "1.0.1",
            description: "Public domain classic cartoons from Archive.org. Features Betty Boop, Popeye, Felix the Cat, and more!",
            author: "Haishin",
            base_url: config.base_url.clone(),
            icon: Some("https://archive.org/images/glogo.png"),
            language: "en",
            nsfw: false,
        };

        Self {
            client: ArchiveClient::with_shared_client(client, config),
            metadata,
        }
    }

    fn config(&self) -> &ArchiveConfig {
        self.client.config()
    }

    async fn try_search(&self, query: &str, page: u32) -> Result<SearchPage, SourceError> {
        let rows = self.config().page_size;
        let start = offset(page, rows);

        let request = SearchRequest::new(self.client.scoped_query(query), rows).with_start(start);
        let result = self.client.advanced_search(&request).await?;

        let mut results = group_by_series(&result.docs, |id| self.client.thumbnail_url(id));
        sort_by_title(&mut results);

        info!(
            "Found {} series from {} cartoons",
            results.len(),
            result.docs.len()
        );

        let has_next_page = offset_has_next(start, rows, result.total());
        Ok(SearchPage::new(results, has_next_page))
    }

    async fn try_featured(&self) -> Result<Vec<CatalogEntry>, SourceError> {
        let config = self.config();
        let request = SearchRequest::new(self.client.scoped_query(""), config.featured_rows)
            .with_fields(FEATURED_FIELDS)
            .with_sort(FEATURED_SORT);
        let result = self.client.advanced_search(&request).await?;

        let mut results = group_by_series(&result.docs, |id| self.client.thumbnail_url(id));
        results.truncate(config.featured_limit);

        info!("Found {} featured series", results.len());
        Ok(results)
    }

    fn episode_from(&self, index: usize, doc: &ArchiveDoc, series: &str) -> Episode {
        let raw_title = doc.title.as_deref().unwrap_or(&doc.identifier);
        let mut title = extract_episode_title(raw_title, series);
        if let Some(year) = doc.date.as_deref().and_then(extract_year) {
            title = format!("{title} ({year})");
        }

        Episode {
            id: doc.identifier.clone(),
            number: u32::try_from(index + 1).unwrap_or(u32::MAX),
            title,
            url: doc.identifier.clone(),
        }
    }
}

#[async_trait::async_trait]
impl Source for ArchiveSource {
    fn metadata(&self) -> &SourceMetadata {
        &self.metadata
    }

    async fn search(&self, query: &str, page: u32) -> SearchPage {
        let page = clamp_page(page);
        match self.try_search(query, page).await {
            Ok(results) => results,
            Err(e) => {
                warn!("Archive search failed for {:?} (page {}): {}", query, page, e);
                SearchPage::empty()
            }
        }
    }

    async fn video_details(&self, id: &str, url: &str) -> Result<VideoDetails, SourceError> {
        let series = series_identity(id, url);
        debug!("Fetching series details: {}", series);

        let request =
            SearchRequest::new(self.client.series_query(&series), self.config().series_rows);
        let mut docs = self.client.advanced_search(&request).await?.docs;

        if docs.is_empty() {
            return Err(SourceError::not_found(format!(
                "no cartoons found for series: {series}"
            )));
        }

        docs.sort_by(compare_by_date_then_title);

        let episodes: Vec<Episode> = docs
            .iter()
            .enumerate()
            .map(|(index, doc)| self.episode_from(index, doc, &series))
            .collect();

        let first = &docs[0];
        let synopsis = first.description.as_deref().map_or_else(
            || format!("Classic {series} cartoons from the golden age of animation."),
            str::to_string,
        );

        info!("Found {} episodes for {}", episodes.len(), series);

        let mut details = VideoDetails::new(id, series.clone())
            .with_genres(GENRES.iter().copied())
            .with_server(SERVER_ID, SERVER_ID, episodes);
        details.english_title = Some(series);
        details.synopsis = decode_entities(&synopsis).trim().to_string();
        details.cover_url = Some(self.client.thumbnail_url(&first.identifier));
        details.creator = Some(
            first
                .creator
                .clone()
                .unwrap_or_else(|| UNKNOWN_CREATOR.to_string()),
        );
        details.status = VideoStatus::Completed;

        Ok(details)
    }

    async fn episode_streams(
        &self,
        episode_id: &str,
        episode_url: &str,
    ) -> Result<StreamBundle, SourceError> {
        let identifier = if episode_url.trim().is_empty() {
            episode_id.trim()
        } else {
            episode_url.trim()
        };
        if identifier.is_empty() {
            return Err(SourceError::not_found("episode has no identifier"));
        }

        let manifest = self.client.item_metadata(identifier).await?;
        let candidates = best_candidates(&manifest.files);

        if candidates.is_empty() {
            return Err(SourceError::NoStreamsFound(identifier.to_string()));
        }

        debug!(
            "Found {} stream candidate(s) for {}",
            candidates.len(),
            identifier
        );

        let streams = candidates
            .into_iter()
            .map(|file| Stream {
                quality: file.quality.to_string(),
                url: self.client.download_url(identifier, &file.name),
                stream_type: StreamType::Mp4,
                headers: Some(BTreeMap::new()),
            })
            .collect();

        Ok(StreamBundle::new(streams))
    }

    async fn featured(&self) -> Vec<CatalogEntry> {
        match self.try_featured().await {
            Ok(results) => results,
            Err(e) => {
                warn!("Archive featured failed: {}", e);
                Vec::new()
            }
        }
    }
}

/// Series name carried by a details request: the percent-decoded url when it
/// has the `series:` prefix, otherwise the slug id with hyphens as spaces.
#[must_use]
pub fn series_identity(id: &str, url: &str) -> String {
    let decoded = urlencoding::decode(url).map_or_else(|_| url.to_string(), |s| s.into_owned());

    decoded.strip_prefix(SERIES_URL_PREFIX).map_or_else(
        || id.replace('-', " "),
        |series| series.trim().to_string(),
    )
}

/// Collapses upstream items into one entry per series slug, in first-seen
/// order. The cover comes from the first item of each series.
pub fn group_by_series<F>(docs: &[ArchiveDoc], thumbnail: F) -> Vec<CatalogEntry>
where
    F: Fn(&str) -> String,
{
    let mut seen = HashSet::new();
    let mut entries = Vec::new();

    for doc in docs {
        let series = extract_series_name(doc.title.as_deref().unwrap_or_default());
        let slug = series_slug(&series);

        if !seen.insert(slug.clone()) {
            continue;
        }

        entries.push(CatalogEntry {
            id: slug,
            title: series.clone(),
            english_title: Some(series.clone()),
            cover_url: Some(thumbnail(&doc.identifier)),
            url: format!("{SERIES_URL_PREFIX}{series}"),
        });
    }

    entries
}

pub fn sort_by_title(entries: &mut [CatalogEntry]) {
    entries.sort_by(|a, b| compare_titles(&a.title, &b.title));
}

fn compare_titles(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Undated items go last.
fn compare_by_date_then_title(a: &ArchiveDoc, b: &ArchiveDoc) -> Ordering {
    let date_a = a.date.as_deref().unwrap_or(MISSING_DATE);
    let date_b = b.date.as_deref().unwrap_or(MISSING_DATE);

    date_a.cmp(date_b).then_with(|| {
        compare_titles(
            a.title.as_deref().unwrap_or_default(),
            b.title.as_deref().unwrap_or_default(),
        )
    })
}
