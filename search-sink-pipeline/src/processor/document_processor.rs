//! Document processor implementation.
//!
//! Transforms metadata records into denormalized search documents, resolving
//! owning services, databases and charts against the metadata store.

use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::errors::PipelineError;
use crate::processor::tags::TagSet;
use search_sink_repository::MetadataStore;
use search_sink_shared::{
    Column, Dashboard, DashboardDocument, EntityReference, Pipeline, PipelineDocument, Record,
    SearchDocument, Service, ServiceKind, Suggestion, Table, TableDocument, Topic, TopicDocument,
    UsageFields,
};

/// Suggest weight of the fully-qualified name.
const FQN_WEIGHT: u32 = 5;
/// Suggest weight of the short or display name.
const NAME_WEIGHT: u32 = 10;

/// Processor that transforms records into search documents.
///
/// Every call builds a fresh document; nothing is cached between records.
/// Lookup failures propagate and no partial document is produced.
pub struct DocumentProcessor {
    metadata: Arc<dyn MetadataStore>,
}

impl DocumentProcessor {
    /// Create a new document processor resolving references through `metadata`.
    pub fn new(metadata: Arc<dyn MetadataStore>) -> Self {
        Self { metadata }
    }

    /// Build the search document for a record.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(document))` - For tables, topics, dashboards and pipelines
    /// * `Ok(None)` - For records the sink does not index
    /// * `Err(PipelineError)` - If a metadata lookup fails
    pub async fn process(&self, record: &Record) -> Result<Option<SearchDocument>, PipelineError> {
        let document = match record {
            Record::Table(table) => SearchDocument::Table(self.table_document(table).await?),
            Record::Topic(topic) => SearchDocument::Topic(self.topic_document(topic).await?),
            Record::Dashboard(dashboard) => {
                SearchDocument::Dashboard(self.dashboard_document(dashboard).await?)
            }
            Record::Pipeline(pipeline) => {
                SearchDocument::Pipeline(self.pipeline_document(pipeline).await?)
            }
            Record::Other(other) => {
                debug!(kind = %other.kind, name = %other.name, "Skipping unsupported record");
                return Ok(None);
            }
        };

        Ok(Some(document))
    }

    /// Build a table document.
    ///
    /// Resolves the owning database and, through it, the database service.
    #[instrument(skip(self, table), fields(table_id = %table.id))]
    pub async fn table_document(&self, table: &Table) -> Result<TableDocument, PipelineError> {
        let mut tags = TagSet::from_labels(&table.tags);

        let mut column_names = Vec::new();
        let mut column_descriptions = Vec::new();
        flatten_columns(
            &table.columns,
            None,
            &mut column_names,
            &mut column_descriptions,
            &mut tags,
        );

        let database = self.metadata.get_database(&table.database.id).await?;
        let service = self
            .resolve_service(ServiceKind::Database, &database.service)
            .await?;

        let (tier, tags) = tags.into_parts();

        Ok(TableDocument {
            table_id: table.id.to_string(),
            database: database.name,
            service: service.name,
            service_type: service.service_type,
            service_category: ServiceKind::Database.category().to_string(),
            table_name: table.name.clone(),
            suggest: suggestions(table.fully_qualified_name.as_deref(), &table.name),
            description: table.description.clone(),
            table_type: table.table_type.map(|table_type| table_type.as_str().to_string()),
            last_updated_timestamp: now_timestamp(),
            column_names,
            column_descriptions,
            tier,
            tags,
            fqdn: table.fully_qualified_name.clone(),
            schema_description: None,
            owner: owner_id(table.owner.as_ref()),
            followers: follower_ids(&table.followers),
            usage: UsageFields::from(table.usage_summary.as_ref()),
        })
    }

    /// Build a topic document.
    #[instrument(skip(self, topic), fields(topic_id = %topic.id))]
    pub async fn topic_document(&self, topic: &Topic) -> Result<TopicDocument, PipelineError> {
        let service = self
            .resolve_service(ServiceKind::Messaging, &topic.service)
            .await?;
        let (tier, tags) = TagSet::from_labels(&topic.tags).into_parts();

        Ok(TopicDocument {
            topic_id: topic.id.to_string(),
            service: service.name,
            service_type: service.service_type,
            service_category: ServiceKind::Messaging.category().to_string(),
            topic_name: topic.name.clone(),
            suggest: suggestions(topic.fully_qualified_name.as_deref(), &topic.name),
            description: topic.description.clone(),
            last_updated_timestamp: now_timestamp(),
            tier,
            tags,
            fqdn: topic.fully_qualified_name.clone(),
            owner: owner_id(topic.owner.as_ref()),
            followers: follower_ids(&topic.followers),
        })
    }

    /// Build a dashboard document.
    ///
    /// Charts are fetched with their tags and merged into the dashboard's
    /// tag set.
    #[instrument(skip(self, dashboard), fields(dashboard_id = %dashboard.id))]
    pub async fn dashboard_document(
        &self,
        dashboard: &Dashboard,
    ) -> Result<DashboardDocument, PipelineError> {
        let service = self
            .resolve_service(ServiceKind::Dashboard, &dashboard.service)
            .await?;
        let mut tags = TagSet::from_labels(&dashboard.tags);

        let chart_ids: Vec<Uuid> = dashboard.charts.iter().map(|chart| chart.id).collect();
        let charts = self.metadata.get_charts(&chart_ids).await?;
        debug!(chart_count = charts.len(), "Resolved dashboard charts");

        let mut chart_names = Vec::with_capacity(charts.len());
        let mut chart_descriptions = Vec::new();
        for chart in &charts {
            chart_names.push(chart.display_name().to_string());
            if let Some(description) = &chart.description {
                chart_descriptions.push(description.clone());
            }
            tags.merge(&chart.tags);
        }

        let (tier, tags) = tags.into_parts();

        Ok(DashboardDocument {
            dashboard_id: dashboard.id.to_string(),
            service: service.name,
            service_type: service.service_type,
            service_category: ServiceKind::Dashboard.category().to_string(),
            dashboard_name: dashboard.display_name().to_string(),
            chart_names,
            chart_descriptions,
            suggest: vec![Suggestion::new(dashboard.display_name(), NAME_WEIGHT)],
            description: dashboard.description.clone(),
            last_updated_timestamp: now_timestamp(),
            tier,
            tags,
            fqdn: dashboard.fully_qualified_name.clone(),
            owner: owner_id(dashboard.owner.as_ref()),
            followers: follower_ids(&dashboard.followers),
            usage: UsageFields::from(dashboard.usage_summary.as_ref()),
        })
    }

    /// Build a pipeline document. Tasks are flattened one level deep.
    #[instrument(skip(self, pipeline), fields(pipeline_id = %pipeline.id))]
    pub async fn pipeline_document(
        &self,
        pipeline: &Pipeline,
    ) -> Result<PipelineDocument, PipelineError> {
        let service = self
            .resolve_service(ServiceKind::Pipeline, &pipeline.service)
            .await?;
        let mut tags = TagSet::from_labels(&pipeline.tags);

        let mut task_names = Vec::with_capacity(pipeline.tasks.len());
        let mut task_descriptions = Vec::new();
        for task in &pipeline.tasks {
            task_names.push(task.display_name().to_string());
            if let Some(description) = &task.description {
                task_descriptions.push(description.clone());
            }
            tags.merge(&task.tags);
        }

        let (tier, tags) = tags.into_parts();

        Ok(PipelineDocument {
            pipeline_id: pipeline.id.to_string(),
            service: service.name,
            service_type: service.service_type,
            service_category: ServiceKind::Pipeline.category().to_string(),
            pipeline_name: pipeline.display_name().to_string(),
            task_names,
            task_descriptions,
            suggest: vec![Suggestion::new(pipeline.display_name(), NAME_WEIGHT)],
            description: pipeline.description.clone(),
            last_updated_timestamp: now_timestamp(),
            tier,
            tags,
            fqdn: pipeline.fully_qualified_name.clone(),
            owner: owner_id(pipeline.owner.as_ref()),
            followers: follower_ids(&pipeline.followers),
        })
    }

    async fn resolve_service(
        &self,
        kind: ServiceKind,
        reference: &EntityReference,
    ) -> Result<Service, PipelineError> {
        Ok(self.metadata.get_service(kind, &reference.id).await?)
    }
}

/// Flatten a column tree depth-first in pre-order.
///
/// Nested names are joined to their parent's full dotted path. Descriptions
/// are collected only for columns that have one, and column tags are merged
/// into `tags`.
pub fn flatten_columns(
    columns: &[Column],
    parent: Option<&str>,
    names: &mut Vec<String>,
    descriptions: &mut Vec<String>,
    tags: &mut TagSet,
) {
    for column in columns {
        let name = match parent {
            Some(parent) => format!("{}.{}", parent, column.name),
            None => column.name.clone(),
        };

        if let Some(description) = &column.description {
            descriptions.push(description.clone());
        }
        tags.merge(&column.tags);

        if let Some(children) = &column.children {
            names.push(name.clone());
            flatten_columns(children, Some(&name), names, descriptions, tags);
        } else {
            names.push(name);
        }
    }
}

/// Suggest entries for entities addressed by both FQN and short name.
fn suggestions(fully_qualified_name: Option<&str>, name: &str) -> Vec<Suggestion> {
    let mut suggest = Vec::with_capacity(2);
    if let Some(fqn) = fully_qualified_name {
        suggest.push(Suggestion::new(fqn, FQN_WEIGHT));
    }
    suggest.push(Suggestion::new(name, NAME_WEIGHT));
    suggest
}

fn owner_id(owner: Option<&EntityReference>) -> String {
    owner.map(|owner| owner.id.to_string()).unwrap_or_default()
}

fn follower_ids(followers: &[EntityReference]) -> Vec<String> {
    followers
        .iter()
        .map(|follower| follower.id.to_string())
        .collect()
}

/// Build-time stamp in epoch seconds.
fn now_timestamp() -> i64 {
    Utc::now().timestamp()
}
