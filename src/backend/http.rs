//! HTTP implementation of [`SearchBackend`].
//!
//! Talks to the platform's `GET /resource/search` endpoint: the query text,
//! matching mode, JSON-encoded type list, and per-type limit travel as query
//! parameters; an optional session token travels as the `Girder-Token`
//! header.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::config::HttpConfig;
use crate::error::SearchError;
use crate::models::{RawSearchResponse, ResourceType, SearchMode};

use super::SearchBackend;

/// Search backend backed by the platform's REST API.
pub struct HttpSearchBackend {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpSearchBackend {
    /// Build a backend from configuration.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` for a blank base URL and `Network` if the
    /// underlying client cannot be constructed.
    pub fn new(config: &HttpConfig) -> Result<Self, SearchError> {
        if config.base_url.trim().is_empty() {
            return Err(SearchError::InvalidConfig(
                "http.base_url must not be empty".to_string(),
            ));
        }

        let mut builder = reqwest::Client::builder();
        if config.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_secs));
        }
        let client = builder
            .build()
            .map_err(|e| SearchError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }
}

#[async_trait]
impl SearchBackend for HttpSearchBackend {
    async fn search(
        &self,
        query: &str,
        mode: SearchMode,
        types: &[ResourceType],
        limit: usize,
    ) -> Result<RawSearchResponse, SearchError> {
        let type_names: Vec<&str> = types.iter().map(|t| t.name()).collect();
        let types_param = serde_json::to_string(&type_names)
            .map_err(|e| SearchError::Decode(e.to_string()))?;
        let limit_param = limit.to_string();

        let url = format!("{}/resource/search", self.base_url);
        debug!(%url, query, mode = %mode, "issuing search request");

        let mut request = self.client.get(&url).query(&[
            ("q", query),
            ("mode", mode.name()),
            ("types", types_param.as_str()),
            ("limit", limit_param.as_str()),
        ]);
        if let Some(token) = &self.token {
            request = request.header("Girder-Token", token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| SearchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<RawSearchResponse>()
            .await
            .map_err(|e| SearchError::Decode(e.to_string()))
    }
}
