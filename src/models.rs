//! Core data models used throughout quicksearch.
//!
//! These types represent the queries, raw matches, and grouped results that
//! flow between the coalescer, the search backend, and the render surface.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A resource kind the platform can search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Collection,
    Group,
    User,
    Folder,
    Item,
}

impl ResourceType {
    /// Canonical display order used when no per-instance order is configured.
    pub const CANONICAL_ORDER: [ResourceType; 5] = [
        ResourceType::Collection,
        ResourceType::Group,
        ResourceType::User,
        ResourceType::Folder,
        ResourceType::Item,
    ];

    /// The fixed icon identifier associated with this type.
    pub fn icon(&self) -> &'static str {
        match self {
            ResourceType::Collection => "sitemap",
            ResourceType::Group => "users",
            ResourceType::User => "user",
            ResourceType::Folder => "folder",
            ResourceType::Item => "doc-text-inv",
        }
    }

    /// The wire name of this type (`"collection"`, `"user"`, ...).
    pub fn name(&self) -> &'static str {
        match self {
            ResourceType::Collection => "collection",
            ResourceType::Group => "group",
            ResourceType::User => "user",
            ResourceType::Folder => "folder",
            ResourceType::Item => "item",
        }
    }

    /// Parse a wire name back into a type. Returns `None` for names outside
    /// the recognized set.
    pub fn from_name(name: &str) -> Option<ResourceType> {
        match name {
            "collection" => Some(ResourceType::Collection),
            "group" => Some(ResourceType::Group),
            "user" => Some(ResourceType::User),
            "folder" => Some(ResourceType::Folder),
            "item" => Some(ResourceType::Item),
            _ => None,
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Matching strategy applied by the search endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Match the query against the start of indexed tokens.
    #[default]
    Prefix,
    /// Full-text matching over indexed fields.
    Text,
}

impl SearchMode {
    /// The wire name of this mode (`"prefix"` or `"text"`).
    pub fn name(&self) -> &'static str {
        match self {
            SearchMode::Prefix => "prefix",
            SearchMode::Text => "text",
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A user-issued search, immutable once submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// The query text as typed.
    pub text: String,
    /// Matching strategy.
    pub mode: SearchMode,
    /// Resource types to search, in the instance's display order.
    pub types: Vec<ResourceType>,
}

impl SearchQuery {
    pub fn new(text: impl Into<String>, mode: SearchMode, types: Vec<ResourceType>) -> Self {
        Self {
            text: text.into(),
            mode,
            types,
        }
    }

    /// Whether the query text is empty or whitespace-only.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// One resource record as returned by the REST collaborator.
///
/// Most types carry a `name`; user records carry name parts and a login
/// instead. Fields the client does not consume are ignored on decode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRecord {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "firstName", default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(rename = "lastName", default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub login: Option<String>,
}

/// Raw search response: a mapping from type name to ordered records.
///
/// Keys stay as strings so records of unrecognized types survive decoding
/// and can be reported at grouping time instead of failing the request.
pub type RawSearchResponse = BTreeMap<String, Vec<ResourceRecord>>;

/// One matched resource, flattened from the wire response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResult {
    /// Raw type name as reported by the endpoint.
    pub type_name: String,
    /// Resource identifier.
    pub id: String,
    /// Display text derived per type (see [`crate::group::display_text`]).
    pub display_text: String,
}

/// One `{id, text}` element inside a [`ResultGroup`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultEntry {
    pub id: String,
    pub text: String,
}

/// All matches of one resource type, tagged with the type's fixed icon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultGroup {
    pub resource_type: ResourceType,
    pub icon: &'static str,
    pub elements: Vec<ResultEntry>,
}

/// Payload handed to the render collaborator on every re-render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderFrame {
    /// Grouped results in canonical type order, empty groups omitted.
    pub results: Vec<ResultGroup>,
    /// The query text the frame corresponds to.
    pub query: String,
    /// Per-type result limit the search was issued with.
    pub limit: usize,
}

/// A user selection of one rendered result, forwarded to navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceSelection {
    pub resource_type: ResourceType,
    pub id: String,
    pub text: String,
    pub icon: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_name_roundtrip() {
        for rt in ResourceType::CANONICAL_ORDER {
            assert_eq!(ResourceType::from_name(rt.name()), Some(rt));
        }
        assert_eq!(ResourceType::from_name("widget"), None);
    }

    #[test]
    fn test_type_serde_names() {
        let json = serde_json::to_string(&ResourceType::Item).unwrap();
        assert_eq!(json, "\"item\"");
        let parsed: ResourceType = serde_json::from_str("\"collection\"").unwrap();
        assert_eq!(parsed, ResourceType::Collection);
    }

    #[test]
    fn test_blank_query() {
        let types = ResourceType::CANONICAL_ORDER.to_vec();
        assert!(SearchQuery::new("", SearchMode::Prefix, types.clone()).is_blank());
        assert!(SearchQuery::new("   ", SearchMode::Prefix, types.clone()).is_blank());
        assert!(!SearchQuery::new("cat", SearchMode::Prefix, types).is_blank());
    }

    #[test]
    fn test_record_decodes_user_fields() {
        let record: ResourceRecord = serde_json::from_str(
            r#"{"_id": "u1", "firstName": "Jane", "lastName": "Doe", "login": "jdoe", "admin": false}"#,
        )
        .unwrap();
        assert_eq!(record.id, "u1");
        assert_eq!(record.first_name.as_deref(), Some("Jane"));
        assert_eq!(record.last_name.as_deref(), Some("Doe"));
        assert_eq!(record.login.as_deref(), Some("jdoe"));
        assert_eq!(record.name, None);
    }

    #[test]
    fn test_response_decodes_per_type_map() {
        let json = r#"{
            "folder": [{"_id": "f1", "name": "Reports"}],
            "user": [{"_id": "u1", "firstName": "Jane", "lastName": "Doe", "login": "jdoe"}]
        }"#;
        let response: RawSearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.len(), 2);
        assert_eq!(response["folder"][0].name.as_deref(), Some("Reports"));
        assert_eq!(response["user"][0].login.as_deref(), Some("jdoe"));
    }
}
