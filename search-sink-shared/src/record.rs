//! Records handed to the sink by the ingestion pipeline.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use uuid::Uuid;

use crate::entity::{Dashboard, Pipeline, Table, Topic};

/// Field carrying the record's entity type.
const ENTITY_TYPE_FIELD: &str = "entityType";

/// The entity kinds the sink knows how to index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntityKind {
    Table,
    Topic,
    Dashboard,
    Pipeline,
}

impl EntityKind {
    /// All indexable kinds, in bootstrap order.
    pub const ALL: [EntityKind; 4] = [
        EntityKind::Table,
        EntityKind::Topic,
        EntityKind::Dashboard,
        EntityKind::Pipeline,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Table => "table",
            EntityKind::Topic => "topic",
            EntityKind::Dashboard => "dashboard",
            EntityKind::Pipeline => "pipeline",
        }
    }

    /// Index used when the configuration does not override it.
    pub fn default_index_name(&self) -> &'static str {
        match self {
            EntityKind::Table => "table_search_index",
            EntityKind::Topic => "topic_search_index",
            EntityKind::Dashboard => "dashboard_search_index",
            EntityKind::Pipeline => "pipeline_search_index",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A record the sink does not index (users, teams, databases, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OtherRecord {
    /// Entity type as reported by the producer.
    pub kind: String,
    pub name: String,
}

/// A single record emitted by the ingestion pipeline.
///
/// Records are keyed by `entityType`. Any type other than the four indexable
/// kinds becomes [`Record::Other`] instead of failing to parse.
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Table(Table),
    Topic(Topic),
    Dashboard(Dashboard),
    Pipeline(Pipeline),
    Other(OtherRecord),
}

impl Record {
    /// The indexable kind of this record, `None` for [`Record::Other`].
    pub fn kind(&self) -> Option<EntityKind> {
        match self {
            Record::Table(_) => Some(EntityKind::Table),
            Record::Topic(_) => Some(EntityKind::Topic),
            Record::Dashboard(_) => Some(EntityKind::Dashboard),
            Record::Pipeline(_) => Some(EntityKind::Pipeline),
            Record::Other(_) => None,
        }
    }

    /// Entity name used to track written records.
    pub fn name(&self) -> &str {
        match self {
            Record::Table(table) => &table.name,
            Record::Topic(topic) => &topic.name,
            Record::Dashboard(dashboard) => &dashboard.name,
            Record::Pipeline(pipeline) => &pipeline.name,
            Record::Other(other) => &other.name,
        }
    }

    /// Source entity ID, `None` for [`Record::Other`].
    pub fn id(&self) -> Option<Uuid> {
        match self {
            Record::Table(table) => Some(table.id),
            Record::Topic(topic) => Some(topic.id),
            Record::Dashboard(dashboard) => Some(dashboard.id),
            Record::Pipeline(pipeline) => Some(pipeline.id),
            Record::Other(_) => None,
        }
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let kind = value
            .get(ENTITY_TYPE_FIELD)
            .and_then(Value::as_str)
            .ok_or_else(|| de::Error::missing_field(ENTITY_TYPE_FIELD))?
            .to_string();

        let record = match kind.as_str() {
            "table" => Record::Table(serde_json::from_value(value).map_err(de::Error::custom)?),
            "topic" => Record::Topic(serde_json::from_value(value).map_err(de::Error::custom)?),
            "dashboard" => {
                Record::Dashboard(serde_json::from_value(value).map_err(de::Error::custom)?)
            }
            "pipeline" => {
                Record::Pipeline(serde_json::from_value(value).map_err(de::Error::custom)?)
            }
            _ => Record::Other(OtherRecord {
                name: value
                    .get("name")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
                kind: kind.clone(),
            }),
        };

        Ok(record)
    }
}
