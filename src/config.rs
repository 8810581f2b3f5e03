use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// Immutable configuration handed to every source at construction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub archive: ArchiveConfig,

    pub nasa: NasaConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub log_level: String,

    /// User-Agent sent with every upstream request.
    pub user_agent: String,

    /// Per-request timeout in seconds (default: 30)
    pub request_timeout_seconds: u64,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            user_agent: "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36"
                .to_string(),
            request_timeout_seconds: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchiveConfig {
    pub base_url: String,

    pub search_url: String,

    pub metadata_url: String,

    pub collection: String,

    /// Raw items requested per search page.
    pub page_size: u32,

    /// Cap on raw items fetched when assembling one series.
    pub series_rows: u32,

    pub featured_rows: u32,

    /// Distinct series kept from the featured query.
    pub featured_limit: usize,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            base_url: "https://archive.org".to_string(),
            search_url: "https://archive.org/advancedsearch.php".to_string(),
            metadata_url: "https://archive.org/metadata".to_string(),
            collection: "classic_cartoons".to_string(),
            page_size: 50,
            series_rows: 100,
            featured_rows: 20,
            featured_limit: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NasaConfig {
    pub base_url: String,

    pub api_url: String,

    pub page_size: u32,
}

impl Default for NasaConfig {
    fn default() -> Self {
        Self {
            base_url: "https://plus.nasa.gov".to_string(),
            api_url: "https://plus.nasa.gov/wp-json/wp/v2".to_string(),
            page_size: 20,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let paths = Self::config_paths();

        for path in &paths {
            if path.exists() {
                info!("Loading config from: {}", path.display());
                return Self::load_from_path(path);
            }
        }

        info!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Config saved to: {}", path.display());
        Ok(())
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![];

        paths.push(PathBuf::from("config.toml"));

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("haishin-sources").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".haishin-sources").join("config.toml"));
        }

        paths
    }

    fn default_config_path() -> PathBuf {
        PathBuf::from("config.toml")
    }

    /// Writes the defaults to `./config.toml` unless a file is already there.
    pub fn create_default_if_missing() -> Result<bool> {
        let path = Self::default_config_path();
        if path.exists() {
            Ok(false)
        } else {
            let config = Self::default();
            config.save_to_path(&path)?;
            info!("Created default config file: {}", path.display());
            Ok(true)
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.general.request_timeout_seconds == 0 {
            anyhow::bail!("Request timeout must be > 0");
        }

        let urls = [
            ("archive.base_url", &self.archive.base_url),
            ("archive.search_url", &self.archive.search_url),
            ("archive.metadata_url", &self.archive.metadata_url),
            ("nasa.base_url", &self.nasa.base_url),
            ("nasa.api_url", &self.nasa.api_url),
        ];
        for (name, value) in urls {
            url::Url::parse(value).with_context(|| format!("Invalid URL for {name}: {value}"))?;
        }

        if self.archive.collection.trim().is_empty() {
            anyhow::bail!("Archive collection cannot be empty");
        }

        if self.archive.page_size == 0 || self.archive.series_rows == 0 || self.nasa.page_size == 0
        {
            anyhow::bail!("Page sizes must be > 0");
        }

        Ok(())
    }
}
