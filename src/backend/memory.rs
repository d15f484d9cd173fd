//! In-memory [`SearchBackend`] implementation for testing and embedders
//! that do not speak HTTP.
//!
//! Uses a `HashMap` behind `std::sync::RwLock` for thread safety. Matching
//! is brute-force over the registered records: prefix mode matches the
//! start of whitespace-separated words, text mode matches anywhere in the
//! record's display fields. Both are case-insensitive.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::error::SearchError;
use crate::models::{RawSearchResponse, ResourceRecord, ResourceType, SearchMode};

use super::SearchBackend;

/// In-memory search backend.
pub struct MemorySearchBackend {
    records: RwLock<HashMap<ResourceType, Vec<ResourceRecord>>>,
}

impl MemorySearchBackend {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }

    /// Register a record under the given resource type.
    pub fn insert(&self, resource_type: ResourceType, record: ResourceRecord) {
        let mut records = self.records.write().unwrap();
        records.entry(resource_type).or_default().push(record);
    }
}

impl Default for MemorySearchBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// The text a record is matched against: name parts and login for users,
/// the `name` field for everything else.
fn haystack(resource_type: ResourceType, record: &ResourceRecord) -> String {
    match resource_type {
        ResourceType::User => format!(
            "{} {} {}",
            record.first_name.as_deref().unwrap_or(""),
            record.last_name.as_deref().unwrap_or(""),
            record.login.as_deref().unwrap_or(""),
        ),
        _ => record.name.clone().unwrap_or_default(),
    }
}

fn matches(mode: SearchMode, haystack: &str, query: &str) -> bool {
    let haystack = haystack.to_lowercase();
    let query = query.to_lowercase();
    match mode {
        SearchMode::Prefix => haystack
            .split_whitespace()
            .any(|word| word.starts_with(&query)),
        SearchMode::Text => haystack.contains(&query),
    }
}

#[async_trait]
impl SearchBackend for MemorySearchBackend {
    async fn search(
        &self,
        query: &str,
        mode: SearchMode,
        types: &[ResourceType],
        limit: usize,
    ) -> Result<RawSearchResponse, SearchError> {
        let records = self.records.read().unwrap();
        let mut response = RawSearchResponse::new();

        for resource_type in types {
            let candidates = match records.get(resource_type) {
                Some(candidates) => candidates,
                None => continue,
            };
            let hits: Vec<ResourceRecord> = candidates
                .iter()
                .filter(|record| matches(mode, &haystack(*resource_type, record), query))
                .take(limit)
                .cloned()
                .collect();
            if !hits.is_empty() {
                response.insert(resource_type.name().to_string(), hits);
            }
        }

        Ok(response)
    }
}
