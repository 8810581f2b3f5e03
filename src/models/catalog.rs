use serde::{Deserialize, Serialize};

/// A searchable unit: a whole series for the archival source, a single
/// video for the catalog API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub id: String,
    pub title: String,
    pub english_title: Option<String>,
    pub cover_url: Option<String>,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage {
    pub results: Vec<CatalogEntry>,
    pub has_next_page: bool,
}

impl SearchPage {
    #[must_use]
    pub const fn new(results: Vec<CatalogEntry>, has_next_page: bool) -> Self {
        Self {
            results,
            has_next_page,
        }
    }

    /// The page every browse operation degrades to when the upstream fails.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            results: Vec::new(),
            has_next_page: false,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_host_field_names() {
        let page = SearchPage::new(
            vec![CatalogEntry {
                id: "betty-boop".to_string(),
                title: "Betty Boop".to_string(),
                english_title: Some("Betty Boop".to_string()),
                cover_url: None,
                url: "series:Betty Boop".to_string(),
            }],
            true,
        );

        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["hasNextPage"], true);
        assert_eq!(json["results"][0]["englishTitle"], "Betty Boop");
        assert!(json["results"][0]["coverUrl"].is_null());
    }

    #[test]
    fn test_empty_page() {
        let page = SearchPage::empty();
        assert!(page.is_empty());
        assert!(!page.has_next_page);
    }
}
