//! Storefront configuration.

use anyhow::{bail, Context, Result};
use mart_observability::LoggingConfig;
use serde::{Deserialize, Serialize};

/// Catalog service used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Environment variable overriding the catalog base URL.
pub const BACKEND_URL_ENV: &str = "MART_BACKEND_URL";

/// Storefront configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    /// Where the catalog comes from.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Logging setup.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl StorefrontConfig {
    /// Load config from a TOML or JSON file (chosen by extension), then apply
    /// environment overrides.
    pub fn load(path: &str) -> Result<Self> {
        Self::load_with_backend_url(path, std::env::var(BACKEND_URL_ENV).ok())
    }

    /// Load config from a file, then apply an explicit base URL override in
    /// place of `MART_BACKEND_URL`.
    pub fn load_with_backend_url(path: &str, backend_url: Option<String>) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        let mut config: StorefrontConfig = if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))?
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))?
        };

        config.catalog.apply_backend_url(backend_url);
        config.validate()?;
        Ok(config)
    }

    /// Defaults plus environment overrides.
    pub fn from_env_or_default() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    /// Apply `MART_BACKEND_URL` if it is set.
    pub fn apply_env(&mut self) {
        self.catalog
            .apply_backend_url(std::env::var(BACKEND_URL_ENV).ok());
    }

    /// Check values that serde cannot.
    pub fn validate(&self) -> Result<()> {
        let url = &self.catalog.base_url;
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            bail!("catalog.base_url must be an http(s) URL, got {:?}", url);
        }
        Ok(())
    }
}

/// Where the product catalog is loaded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CatalogMode {
    /// Fetch from the catalog service; filtering happens server-side.
    #[default]
    Remote,
    /// Use the built-in inventory; filtering happens in memory.
    Static,
}

/// Catalog source configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Catalog mode.
    #[serde(default)]
    pub mode: CatalogMode,

    /// Base URL of the catalog service (remote mode only).
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            mode: CatalogMode::default(),
            base_url: default_base_url(),
        }
    }
}

impl CatalogConfig {
    /// Replace the base URL with an override; blank overrides are ignored.
    pub fn apply_backend_url(&mut self, url: Option<String>) {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            self.base_url = url.trim().to_string();
        }
    }
}
