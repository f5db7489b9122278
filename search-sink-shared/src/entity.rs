//! Metadata entities as produced by the ingestion pipeline and returned by the
//! metadata server.
//!
//! Field names follow the metadata server's camelCase JSON. Optional
//! collections deserialize to empty values when absent so that document
//! builders never have to special-case missing tags or followers.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Reference to another entity in the metadata store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityReference {
    /// Referenced entity ID.
    pub id: Uuid,
    /// Entity type, e.g. `database` or `dashboardService`.
    #[serde(rename = "type")]
    pub entity_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl EntityReference {
    /// Create a reference with only an ID and type.
    pub fn new(id: Uuid, entity_type: impl Into<String>) -> Self {
        Self {
            id,
            entity_type: entity_type.into(),
            name: None,
            display_name: None,
            description: None,
        }
    }

    /// Set the referenced entity's name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// A tag applied to an entity, column, chart or task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagLabel {
    /// Fully-qualified tag name, e.g. `Tier.Tier1` or `PII.Sensitive`.
    #[serde(rename = "tagFQN")]
    pub tag_fqn: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

impl TagLabel {
    pub fn new(tag_fqn: impl Into<String>) -> Self {
        Self {
            tag_fqn: tag_fqn.into(),
            label_type: None,
            state: None,
            href: None,
        }
    }
}

/// A table column. Struct-like columns carry nested children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<TagLabel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Column>>,
}

impl Column {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: None,
            description: None,
            tags: Vec::new(),
            children: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_tags(mut self, tags: Vec<TagLabel>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_children(mut self, children: Vec<Column>) -> Self {
        self.children = Some(children);
        self
    }
}

/// Usage count over one window, with its percentile rank among peers.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageStats {
    pub count: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentile_rank: Option<f64>,
}

/// Daily, weekly and monthly usage summary.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageDetails {
    pub daily_stats: UsageStats,
    #[serde(default)]
    pub weekly_stats: UsageStats,
    #[serde(default)]
    pub monthly_stats: UsageStats,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

/// Kind of table as reported by the source database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TableType {
    Regular,
    External,
    View,
    SecureView,
    MaterializedView,
}

impl TableType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TableType::Regular => "Regular",
            TableType::External => "External",
            TableType::View => "View",
            TableType::SecureView => "SecureView",
            TableType::MaterializedView => "MaterializedView",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fully_qualified_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_type: Option<TableType>,
    /// Owning database.
    pub database: EntityReference,
    #[serde(default)]
    pub columns: Vec<Column>,
    #[serde(default)]
    pub tags: Vec<TagLabel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_summary: Option<UsageDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<EntityReference>,
    #[serde(default)]
    pub followers: Vec<EntityReference>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fully_qualified_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Owning messaging service.
    pub service: EntityReference,
    #[serde(default)]
    pub tags: Vec<TagLabel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<EntityReference>,
    #[serde(default)]
    pub followers: Vec<EntityReference>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fully_qualified_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Owning dashboard service.
    pub service: EntityReference,
    #[serde(default)]
    pub charts: Vec<EntityReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_summary: Option<UsageDetails>,
    #[serde(default)]
    pub tags: Vec<TagLabel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<EntityReference>,
    #[serde(default)]
    pub followers: Vec<EntityReference>,
}

impl Dashboard {
    /// Display name, falling back to the entity name.
    pub fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }
}

/// A single step of a pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<TagLabel>,
}

impl Task {
    pub fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pipeline {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fully_qualified_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Owning pipeline service.
    pub service: EntityReference,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub tags: Vec<TagLabel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<EntityReference>,
    #[serde(default)]
    pub followers: Vec<EntityReference>,
}

impl Pipeline {
    pub fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }
}

/// A dashboard chart, fetched from the metadata store with its tags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chart {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<TagLabel>,
}

impl Chart {
    pub fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Database {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fully_qualified_name: Option<String>,
    /// Owning database service.
    pub service: EntityReference,
}

/// The four service families an entity can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ServiceKind {
    Database,
    Messaging,
    Dashboard,
    Pipeline,
}

impl ServiceKind {
    /// Entity type of the service, also stored as the document's service category.
    pub fn category(&self) -> &'static str {
        match self {
            ServiceKind::Database => "databaseService",
            ServiceKind::Messaging => "messagingService",
            ServiceKind::Dashboard => "dashboardService",
            ServiceKind::Pipeline => "pipelineService",
        }
    }
}

/// Any of the database, messaging, dashboard or pipeline services.
///
/// Only the name and the service type are needed for denormalization, so a
/// single shape covers all four service kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: Uuid,
    pub name: String,
    /// Vendor of the service, e.g. `MySQL`, `Kafka`, `Looker`, `Airflow`.
    pub service_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_table_defaults_for_missing_optionals() {
        let table: Table = serde_json::from_value(json!({
            "id": "550e8400-e29b-41d4-a716-446655440000",
            "name": "orders",
            "database": {
                "id": "6ba7b810-9dad-11d1-80b4-00c04fd430c8",
                "type": "database"
            }
        }))
        .unwrap();

        assert!(table.tags.is_empty());
        assert!(table.followers.is_empty());
        assert!(table.columns.is_empty());
        assert!(table.owner.is_none());
        assert!(table.usage_summary.is_none());
        assert!(table.table_type.is_none());
    }

    #[test]
    fn test_tag_label_wire_name() {
        let tag: TagLabel = serde_json::from_value(json!({
            "tagFQN": "Tier.Tier1",
            "labelType": "Manual"
        }))
        .unwrap();

        assert_eq!(tag.tag_fqn, "Tier.Tier1");
        assert_eq!(tag.label_type.as_deref(), Some("Manual"));
    }

    #[test]
    fn test_nested_columns_deserialize() {
        let column: Column = serde_json::from_value(json!({
            "name": "address",
            "dataType": "STRUCT",
            "children": [
                { "name": "street", "description": "Street line" },
                { "name": "zip", "tags": [{ "tagFQN": "PII.Sensitive" }] }
            ]
        }))
        .unwrap();

        let children = column.children.unwrap();
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].description.as_deref(), Some("Street line"));
        assert_eq!(children[1].tags[0].tag_fqn, "PII.Sensitive");
    }

    #[test]
    fn test_display_name_falls_back_to_name() {
        let chart = Chart {
            id: Uuid::new_v4(),
            name: "revenue_chart".to_string(),
            display_name: None,
            description: None,
            tags: vec![],
        };
        assert_eq!(chart.display_name(), "revenue_chart");
    }

    #[test]
    fn test_usage_details_parse() {
        let usage: UsageDetails = serde_json::from_value(json!({
            "dailyStats": { "count": 4, "percentileRank": 12.5 },
            "weeklyStats": { "count": 30 },
            "monthlyStats": { "count": 120, "percentileRank": 80.0 },
            "date": "2021-11-03"
        }))
        .unwrap();

        assert_eq!(usage.daily_stats.count, 4);
        assert_eq!(usage.weekly_stats.percentile_rank, None);
        assert_eq!(usage.monthly_stats.percentile_rank, Some(80.0));
        assert_eq!(usage.date, NaiveDate::from_ymd_opt(2021, 11, 3));
    }
}
