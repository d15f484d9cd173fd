//! Search backend abstraction.
//!
//! The [`SearchBackend`] trait is the seam between the coalescer and the
//! platform's REST search endpoint, enabling pluggable implementations
//! (HTTP, in-memory for tests and embedders).
//!
//! Implementations must be `Send + Sync` to run on the coalescer's driver
//! task.

pub mod http;
pub mod memory;

use async_trait::async_trait;

use crate::error::SearchError;
use crate::models::{RawSearchResponse, ResourceType, SearchMode};

/// Abstract search endpoint.
///
/// A backend executes exactly one search per call and reports the raw
/// per-type response; single-flight sequencing and result grouping are the
/// coalescer's concern, never the backend's.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Execute one search.
    ///
    /// # Arguments
    ///
    /// * `query` — query text as typed.
    /// * `mode` — matching strategy.
    /// * `types` — resource types to search.
    /// * `limit` — maximum results per type.
    ///
    /// # Returns
    ///
    /// A mapping from resource-type name to matched records, in endpoint
    /// order. Types without matches may be present with an empty list or
    /// absent entirely.
    async fn search(
        &self,
        query: &str,
        mode: SearchMode,
        types: &[ResourceType],
        limit: usize,
    ) -> Result<RawSearchResponse, SearchError>;
}
