//! Source plugins and the contract the host calls them through.

pub mod archive;
pub mod nasa;
pub mod paging;

pub use crate::error::SourceError;
pub use archive::ArchiveSource;
pub use nasa::NasaSource;

use serde::Serialize;
use std::sync::Arc;

use crate::clients::build_http_client;
use crate::config::Config;
use crate::models::{CatalogEntry, SearchPage, StreamBundle, VideoDetails};

/// Static description published next to a source. Carries no logic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceMetadata {
    pub id: &'static str,
    pub name: &'static str,
    pub version: &'static str,
    pub description: &'static str,
    pub author: &'static str,
    pub base_url: String,
    pub icon: Option<&'static str>,
    pub language: &'static str,
    pub nsfw: bool,
}

/// Operations a host invokes on a source.
///
/// Browse operations never fail: upstream errors are logged and the call
/// degrades to an empty result. Detail and stream resolution return the
/// error, since the user asked for one specific item.
///
/// # Examples
///
/// ```rust,ignore
/// use haishin_sources::sources::{Source, SourceError};
/// use std::sync::Arc;
///
/// async fn first_stream(source: Arc<dyn Source>, id: &str) -> Result<(), SourceError> {
///     let details = source.video_details(id, "").await?;
///     for episode in details.episodes().values().flatten() {
///         let bundle = source.episode_streams(&episode.id, &episode.url).await?;
///         println!("{:?}", bundle.preferred());
///     }
///     Ok(())
/// }
/// ```
#[async_trait::async_trait]
pub trait Source: Send + Sync {
    fn metadata(&self) -> &SourceMetadata;

    /// Free-text search; an empty query browses everything. `page` is
    /// 1-indexed.
    async fn search(&self, query: &str, page: u32) -> SearchPage;

    /// Resolves a catalog entry into its full episode graph.
    ///
    /// # Errors
    ///
    /// - [`SourceError::NotFound`] when the upstream has no record for the identity
    /// - [`SourceError::Http`] / [`SourceError::Status`] on transport failures
    /// - [`SourceError::Shape`] when the response cannot be decoded
    async fn video_details(&self, id: &str, url: &str) -> Result<VideoDetails, SourceError>;

    /// Resolves an episode into playable streams, best first.
    ///
    /// # Errors
    ///
    /// - [`SourceError::NoStreamsFound`] when nothing in the manifest is playable
    /// - [`SourceError::MissingStreamUrl`] when a pre-resolved URL is empty
    /// - [`SourceError::Http`] / [`SourceError::Status`] on transport failures
    async fn episode_streams(
        &self,
        episode_id: &str,
        episode_url: &str,
    ) -> Result<StreamBundle, SourceError>;

    async fn featured(&self) -> Vec<CatalogEntry> {
        Vec::new()
    }

    async fn latest(&self, _page: u32) -> SearchPage {
        SearchPage::empty()
    }

    async fn popular(&self, page: u32) -> SearchPage {
        self.latest(page).await
    }
}

/// Every built-in source, sharing one HTTP client.
///
/// # Errors
///
/// Fails only when the HTTP client cannot be built.
pub fn builtin_sources(config: &Config) -> Result<Vec<Arc<dyn Source>>, SourceError> {
    let client = build_http_client(&config.general)?;

    Ok(vec![
        Arc::new(ArchiveSource::with_shared_client(
            client.clone(),
            config.archive.clone(),
        )),
        Arc::new(NasaSource::with_shared_client(client, config.nasa.clone())),
    ])
}

#[must_use]
pub fn find_source(sources: &[Arc<dyn Source>], id: &str) -> Option<Arc<dyn Source>> {
    sources
        .iter()
        .find(|source| source.metadata().id.eq_ignore_ascii_case(id))
        .cloned()
}
