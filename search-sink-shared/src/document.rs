//! Search documents written into the per-kind indices.
//!
//! Each document is a flat, denormalized projection of one entity. The field
//! names here are the index field names and must stay in sync with the mapping
//! templates shipped by the repository crate.

use serde::{Deserialize, Serialize};

use crate::entity::UsageDetails;
use crate::record::EntityKind;

/// One weighted completion candidate for the `suggest` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub input: Vec<String>,
    pub weight: u32,
}

impl Suggestion {
    pub fn new(input: impl Into<String>, weight: u32) -> Self {
        Self {
            input: vec![input.into()],
            weight,
        }
    }
}

/// Usage statistics copied verbatim from the entity's usage summary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UsageFields {
    pub daily_stats: Option<i64>,
    pub daily_percentile_rank: Option<f64>,
    pub weekly_stats: Option<i64>,
    pub weekly_percentile_rank: Option<f64>,
    pub monthly_stats: Option<i64>,
    pub monthly_percentile_rank: Option<f64>,
}

impl From<Option<&UsageDetails>> for UsageFields {
    fn from(usage: Option<&UsageDetails>) -> Self {
        match usage {
            Some(usage) => Self {
                daily_stats: Some(usage.daily_stats.count),
                daily_percentile_rank: usage.daily_stats.percentile_rank,
                weekly_stats: Some(usage.weekly_stats.count),
                weekly_percentile_rank: usage.weekly_stats.percentile_rank,
                monthly_stats: Some(usage.monthly_stats.count),
                monthly_percentile_rank: usage.monthly_stats.percentile_rank,
            },
            None => Self::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableDocument {
    pub table_id: String,
    pub database: String,
    pub service: String,
    pub service_type: String,
    pub service_category: String,
    pub table_name: String,
    pub suggest: Vec<Suggestion>,
    pub description: Option<String>,
    pub table_type: Option<String>,
    /// Epoch seconds at which this document was built.
    pub last_updated_timestamp: i64,
    pub column_names: Vec<String>,
    pub column_descriptions: Vec<String>,
    pub tier: Option<String>,
    pub tags: Vec<String>,
    pub fqdn: Option<String>,
    pub schema_description: Option<String>,
    pub owner: String,
    pub followers: Vec<String>,
    #[serde(flatten)]
    pub usage: UsageFields,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicDocument {
    pub topic_id: String,
    pub service: String,
    pub service_type: String,
    pub service_category: String,
    pub topic_name: String,
    pub suggest: Vec<Suggestion>,
    pub description: Option<String>,
    pub last_updated_timestamp: i64,
    pub tier: Option<String>,
    pub tags: Vec<String>,
    pub fqdn: Option<String>,
    pub owner: String,
    pub followers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardDocument {
    pub dashboard_id: String,
    pub service: String,
    pub service_type: String,
    pub service_category: String,
    pub dashboard_name: String,
    pub chart_names: Vec<String>,
    pub chart_descriptions: Vec<String>,
    pub suggest: Vec<Suggestion>,
    pub description: Option<String>,
    pub last_updated_timestamp: i64,
    pub tier: Option<String>,
    pub tags: Vec<String>,
    pub fqdn: Option<String>,
    pub owner: String,
    pub followers: Vec<String>,
    #[serde(flatten)]
    pub usage: UsageFields,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineDocument {
    pub pipeline_id: String,
    pub service: String,
    pub service_type: String,
    pub service_category: String,
    pub pipeline_name: String,
    pub task_names: Vec<String>,
    pub task_descriptions: Vec<String>,
    pub suggest: Vec<Suggestion>,
    pub description: Option<String>,
    pub last_updated_timestamp: i64,
    pub tier: Option<String>,
    pub tags: Vec<String>,
    pub fqdn: Option<String>,
    pub owner: String,
    pub followers: Vec<String>,
}

/// A built document of any kind, ready to be indexed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SearchDocument {
    Table(TableDocument),
    Topic(TopicDocument),
    Dashboard(DashboardDocument),
    Pipeline(PipelineDocument),
}

impl SearchDocument {
    /// Document ID in the index; always the source entity's ID.
    pub fn document_id(&self) -> &str {
        match self {
            SearchDocument::Table(doc) => &doc.table_id,
            SearchDocument::Topic(doc) => &doc.topic_id,
            SearchDocument::Dashboard(doc) => &doc.dashboard_id,
            SearchDocument::Pipeline(doc) => &doc.pipeline_id,
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            SearchDocument::Table(_) => EntityKind::Table,
            SearchDocument::Topic(_) => EntityKind::Topic,
            SearchDocument::Dashboard(_) => EntityKind::Dashboard,
            SearchDocument::Pipeline(_) => EntityKind::Pipeline,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::UsageStats;
    use serde_json::json;

    #[test]
    fn test_suggestion_shape() {
        let value = serde_json::to_value(Suggestion::new("orders", 10)).unwrap();
        assert_eq!(value, json!({ "input": ["orders"], "weight": 10 }));
    }

    #[test]
    fn test_usage_fields_copied_verbatim() {
        let usage = UsageDetails {
            daily_stats: UsageStats {
                count: 3,
                percentile_rank: Some(10.0),
            },
            weekly_stats: UsageStats {
                count: 21,
                percentile_rank: None,
            },
            monthly_stats: UsageStats {
                count: 90,
                percentile_rank: Some(75.5),
            },
            date: None,
        };

        let fields = UsageFields::from(Some(&usage));
        assert_eq!(fields.daily_stats, Some(3));
        assert_eq!(fields.daily_percentile_rank, Some(10.0));
        assert_eq!(fields.weekly_stats, Some(21));
        assert_eq!(fields.weekly_percentile_rank, None);
        assert_eq!(fields.monthly_stats, Some(90));
        assert_eq!(fields.monthly_percentile_rank, Some(75.5));

        assert_eq!(UsageFields::from(None), UsageFields::default());
    }

    #[test]
    fn test_topic_document_is_flat_json() {
        let doc = SearchDocument::Topic(TopicDocument {
            topic_id: "t-1".to_string(),
            service: "kafka_prod".to_string(),
            service_type: "Kafka".to_string(),
            service_category: "messagingService".to_string(),
            topic_name: "orders_events".to_string(),
            suggest: vec![Suggestion::new("orders_events", 10)],
            description: None,
            last_updated_timestamp: 1_700_000_000,
            tier: None,
            tags: vec![],
            fqdn: None,
            owner: String::new(),
            followers: vec![],
        });

        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["topic_id"], "t-1");
        assert_eq!(value["service_category"], "messagingService");
        assert!(value["description"].is_null());
        assert_eq!(doc.document_id(), "t-1");
        assert_eq!(doc.kind(), EntityKind::Topic);
    }
}
