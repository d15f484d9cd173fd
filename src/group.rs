//! Result flattening and grouping.
//!
//! Converts the REST collaborator's raw per-type response into the grouped,
//! icon-tagged structure the render surface consumes.
//!
//! # Grouping Algorithm
//!
//! 1. Partition flattened results into buckets keyed by resource type,
//!    preserving arrival order within each bucket.
//! 2. Walk the instance's canonical type order.
//! 3. Emit one [`ResultGroup`] per non-empty bucket, carrying the type's
//!    fixed icon.
//! 4. Omit types with empty buckets; the output is sparse.
//! 5. Drop entries with unrecognized types, logging them as a data-quality
//!    signal.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::models::{
    RawResult, RawSearchResponse, ResourceRecord, ResourceType, ResultEntry, ResultGroup,
};

/// Sentinel display text for records whose type is not recognized.
pub const UNKNOWN_TYPE_TEXT: &str = "[unknown type]";

/// Derive the one-line display text for a record of the given type.
///
/// Users render as `"firstName lastName (login)"`; every other recognized
/// type renders its `name`. Records of unrecognized types get the
/// [`UNKNOWN_TYPE_TEXT`] sentinel.
pub fn display_text(type_name: &str, record: &ResourceRecord) -> String {
    match ResourceType::from_name(type_name) {
        Some(ResourceType::User) => format!(
            "{} {} ({})",
            record.first_name.as_deref().unwrap_or(""),
            record.last_name.as_deref().unwrap_or(""),
            record.login.as_deref().unwrap_or(""),
        ),
        Some(_) => record.name.clone().unwrap_or_default(),
        None => UNKNOWN_TYPE_TEXT.to_string(),
    }
}

/// Flatten a wire response into [`RawResult`]s, preserving per-type record
/// order.
pub fn flatten_response(response: &RawSearchResponse) -> Vec<RawResult> {
    let mut raw = Vec::new();
    for (type_name, records) in response {
        for record in records {
            raw.push(RawResult {
                type_name: type_name.clone(),
                id: record.id.clone(),
                display_text: display_text(type_name, record),
            });
        }
    }
    raw
}

/// Group flattened results by resource type, in the given canonical order.
pub fn group_results(raw: &[RawResult], order: &[ResourceType]) -> Vec<ResultGroup> {
    let mut buckets: HashMap<ResourceType, Vec<ResultEntry>> = HashMap::new();

    for result in raw {
        match ResourceType::from_name(&result.type_name) {
            Some(resource_type) => {
                buckets.entry(resource_type).or_default().push(ResultEntry {
                    id: result.id.clone(),
                    text: result.display_text.clone(),
                });
            }
            None => {
                warn!(
                    type_name = %result.type_name,
                    id = %result.id,
                    "dropping result with unrecognized resource type"
                );
            }
        }
    }

    let groups: Vec<ResultGroup> = order
        .iter()
        .filter_map(|resource_type| {
            buckets.remove(resource_type).map(|elements| ResultGroup {
                resource_type: *resource_type,
                icon: resource_type.icon(),
                elements,
            })
        })
        .collect();

    // Recognized types outside the configured order have no display slot.
    for resource_type in buckets.keys() {
        debug!(%resource_type, "dropping results of a type outside the configured order");
    }

    groups
}
