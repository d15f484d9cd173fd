use serde::Deserialize;

use crate::error::SearchError;
use crate::models::{ResourceType, SearchMode, SearchQuery};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub http: Option<HttpConfig>,
}

/// Per-instance search settings: matching mode, the canonical type order,
/// the per-type result limit, and the request timeout.
#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    #[serde(default)]
    pub mode: SearchMode,
    #[serde(default = "default_types")]
    pub types: Vec<ResourceType>,
    #[serde(default = "default_limit")]
    pub limit: usize,
    /// Per-request timeout in seconds; `0` disables the timeout and restores
    /// the legacy behavior where a request that never completes wedges the
    /// instance.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            mode: SearchMode::default(),
            types: default_types(),
            limit: default_limit(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl SearchConfig {
    /// Build a query for this instance's mode and type order.
    pub fn query(&self, text: impl Into<String>) -> SearchQuery {
        SearchQuery::new(text, self.mode, self.types.clone())
    }
}

fn default_types() -> Vec<ResourceType> {
    ResourceType::CANONICAL_ORDER.to_vec()
}
fn default_limit() -> usize {
    10
}
fn default_timeout_secs() -> u64 {
    30
}

/// Settings for the HTTP search backend.
#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    /// REST API root, e.g. `https://data.example.org/api/v1`.
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Session token sent as the `Girder-Token` header when present.
    #[serde(default)]
    pub token: Option<String>,
}

/// Parse and validate a TOML configuration document.
pub fn load_config(content: &str) -> Result<Config, SearchError> {
    let config: Config =
        toml::from_str(content).map_err(|e| SearchError::InvalidConfig(e.to_string()))?;

    if config.search.limit < 1 {
        return Err(SearchError::InvalidConfig(
            "search.limit must be >= 1".to_string(),
        ));
    }

    if config.search.types.is_empty() {
        return Err(SearchError::InvalidConfig(
            "search.types must name at least one resource type".to_string(),
        ));
    }

    // A duplicated type would produce duplicate groups in the render output.
    let mut seen = Vec::with_capacity(config.search.types.len());
    for rt in &config.search.types {
        if seen.contains(rt) {
            return Err(SearchError::InvalidConfig(format!(
                "search.types lists '{}' more than once",
                rt
            )));
        }
        seen.push(*rt);
    }

    if let Some(http) = &config.http {
        if http.base_url.trim().is_empty() {
            return Err(SearchError::InvalidConfig(
                "http.base_url must not be empty".to_string(),
            ));
        }
    }

    Ok(config)
}
