//! OpenSearch index configuration and mappings.
//!
//! This module ships the settings and mappings template for each entity
//! index, and the helpers used to bootstrap an index from a template.
//!
//! The templates include:
//! - **completion**: the `suggest` field backing autocomplete
//! - **Keyword fields**: IDs, tags, tier, service and owner for filtering
//! - **Text fields**: names and descriptions, including flattened columns,
//!   charts and tasks
//! - **epoch_second dates**: `last_updated_timestamp`

use serde_json::{json, Value};

use crate::errors::SearchError;
use search_sink_shared::EntityKind;

const TABLE_MAPPING: &str = include_str!("mappings/table_search_index.json");
const TOPIC_MAPPING: &str = include_str!("mappings/topic_search_index.json");
const DASHBOARD_MAPPING: &str = include_str!("mappings/dashboard_search_index.json");
const PIPELINE_MAPPING: &str = include_str!("mappings/pipeline_search_index.json");

/// Get the raw settings + mappings template for an entity kind.
pub fn mapping_template(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Table => TABLE_MAPPING,
        EntityKind::Topic => TOPIC_MAPPING,
        EntityKind::Dashboard => DASHBOARD_MAPPING,
        EntityKind::Pipeline => PIPELINE_MAPPING,
    }
}

/// Parse a settings + mappings template.
pub fn parse_template(template: &str) -> Result<Value, SearchError> {
    serde_json::from_str(template)
        .map_err(|e| SearchError::parse(format!("Invalid mapping template: {}", e)))
}

/// Build the put-mapping body for a template: its `mappings.properties`
/// block wrapped as `{"properties": ...}`.
pub fn mapping_update(template: &Value) -> Result<Value, SearchError> {
    let properties = template
        .get("mappings")
        .and_then(|mappings| mappings.get("properties"))
        .ok_or_else(|| SearchError::parse("Mapping template has no mappings.properties"))?;

    Ok(json!({ "properties": properties }))
}

/// Whether an index's `mappings` object carries no field mappings yet.
pub fn is_empty_mapping(mappings: &Value) -> bool {
    match mappings {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}
