//! `AppConfig` struct and TOML read/write.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use cinescope_api::tmdb::{DEFAULT_BASE_URL, DiscoverTvParams, PopularParams};
use cinescope_catalog::RegionFilter;
use serde::{Deserialize, Serialize};
use url::Url;

/// Top-level application configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// TMDB endpoint and credential source.
    #[serde(default)]
    pub api: ApiConfig,
    /// Popular movies request.
    #[serde(default)]
    pub popular: PopularConfig,
    /// Region-filtered movies request.
    #[serde(default)]
    pub region: RegionConfig,
    /// Region-filtered TV request.
    #[serde(default)]
    pub tv: TvConfig,
    /// Terminal UI settings.
    #[serde(default)]
    pub ui: UiConfig,
}

/// `[api]` section.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ApiConfig {
    /// API base URL.
    pub base_url: String,
    /// Environment variable holding the bearer token. Read on every request.
    pub token_env: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: String::from(DEFAULT_BASE_URL),
            token_env: String::from("TMDB_API_TOKEN"),
        }
    }
}

/// `[popular]` section.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PopularConfig {
    /// Response language.
    pub language: String,
    /// Result page.
    pub page: u32,
}

impl Default for PopularConfig {
    fn default() -> Self {
        let params = PopularParams::default();
        Self {
            language: params.language,
            page: params.page,
        }
    }
}

/// `[region]` section.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RegionConfig {
    /// Response language.
    pub language: String,
    /// Region and origin country (ISO 3166-1).
    pub region: String,
}

impl Default for RegionConfig {
    fn default() -> Self {
        Self {
            language: String::from("en-US"),
            region: String::from("ID"),
        }
    }
}

/// `[tv]` section.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TvConfig {
    /// Response language.
    pub language: String,
    /// Origin country filter.
    pub origin_country: String,
    /// Result page.
    pub page: u32,
}

impl Default for TvConfig {
    fn default() -> Self {
        let params = DiscoverTvParams::default();
        Self {
            language: params.language,
            origin_country: params.origin_country,
            page: params.page,
        }
    }
}

/// `[ui]` section.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct UiConfig {
    /// Hero carousel auto-advance period in seconds. Zero is treated as one.
    pub carousel_interval_secs: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            carousel_interval_secs: 4,
        }
    }
}

impl AppConfig {
    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Saves config to a TOML file, creating parent directories if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation or file write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("failed to serialize config to TOML")?;
        std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
    }

    /// Parses `[api].base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is malformed.
    pub fn base_url(&self) -> Result<Url> {
        Url::parse(&self.api.base_url)
            .with_context(|| format!("invalid [api].base_url: {}", self.api.base_url))
    }

    /// Request parameters for the Popular store.
    #[must_use]
    pub fn popular_params(&self) -> PopularParams {
        PopularParams {
            language: self.popular.language.clone(),
            page: self.popular.page,
        }
    }

    /// Filter for the Region store.
    #[must_use]
    pub fn region_filter(&self) -> RegionFilter {
        RegionFilter::new(self.region.language.clone(), self.region.region.clone())
    }

    /// Request parameters for the `TvRegion` store.
    #[must_use]
    pub fn tv_params(&self) -> DiscoverTvParams {
        DiscoverTvParams {
            language: self.tv.language.clone(),
            origin_country: self.tv.origin_country.clone(),
            page: self.tv.page,
        }
    }

    /// Carousel auto-advance period.
    #[must_use]
    pub fn carousel_interval(&self) -> Duration {
        Duration::from_secs(self.ui.carousel_interval_secs.max(1))
    }
}
