//! In-memory search engine and metadata store used by the unit tests.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Mutex;
use uuid::Uuid;

use search_sink_repository::{MetadataError, MetadataStore, SearchEngineClient, SearchError};
use search_sink_shared::{
    Chart, Column, Dashboard, Database, EntityReference, Pipeline, Service, ServiceKind, Table,
    TagLabel, Task, Topic, UsageDetails, UsageStats,
};

/// Index administration call recorded by [`MockSearchEngine`].
#[derive(Debug, Clone, PartialEq)]
pub enum AdminCall {
    Create { index: String, body: Value },
    PutMapping { index: String, body: Value },
}

#[derive(Debug, Default)]
struct MockIndex {
    mappings: Value,
    documents: HashMap<String, Value>,
}

/// Search engine keeping indices and documents in memory.
#[derive(Default)]
pub struct MockSearchEngine {
    indices: Mutex<HashMap<String, MockIndex>>,
    admin_calls: Mutex<Vec<AdminCall>>,
    pub fail_writes: bool,
    pub closed: AtomicUsize,
}

impl MockSearchEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    /// Pre-create an index with the given mappings, as an auto-created index would be.
    pub async fn with_index(self, index: &str, mappings: Value) -> Self {
        self.indices.lock().await.insert(
            index.to_string(),
            MockIndex {
                mappings,
                documents: HashMap::new(),
            },
        );
        self
    }

    pub async fn admin_calls(&self) -> Vec<AdminCall> {
        self.admin_calls.lock().await.clone()
    }

    pub async fn document_count(&self, index: &str) -> usize {
        self.indices
            .lock()
            .await
            .get(index)
            .map_or(0, |index| index.documents.len())
    }

    pub async fn document(&self, index: &str, id: &str) -> Option<Value> {
        self.indices
            .lock()
            .await
            .get(index)
            .and_then(|index| index.documents.get(id).cloned())
    }
}

#[async_trait]
impl SearchEngineClient for MockSearchEngine {
    async fn index_exists(&self, index: &str) -> Result<bool, SearchError> {
        Ok(self.indices.lock().await.contains_key(index))
    }

    async fn get_mapping(&self, index: &str) -> Result<Value, SearchError> {
        self.indices
            .lock()
            .await
            .get(index)
            .map(|index| index.mappings.clone())
            .ok_or_else(|| SearchError::mapping(format!("no such index: {}", index)))
    }

    async fn put_mapping(&self, index: &str, body: &Value) -> Result<(), SearchError> {
        let mut indices = self.indices.lock().await;
        let entry = indices
            .get_mut(index)
            .ok_or_else(|| SearchError::mapping(format!("no such index: {}", index)))?;
        entry.mappings = body.clone();

        self.admin_calls.lock().await.push(AdminCall::PutMapping {
            index: index.to_string(),
            body: body.clone(),
        });
        Ok(())
    }

    async fn create_index(&self, index: &str, body: &Value) -> Result<(), SearchError> {
        self.indices.lock().await.insert(
            index.to_string(),
            MockIndex {
                mappings: body.get("mappings").cloned().unwrap_or_else(|| json!({})),
                documents: HashMap::new(),
            },
        );

        self.admin_calls.lock().await.push(AdminCall::Create {
            index: index.to_string(),
            body: body.clone(),
        });
        Ok(())
    }

    async fn index_document(
        &self,
        index: &str,
        id: &str,
        document: &Value,
    ) -> Result<(), SearchError> {
        if self.fail_writes {
            return Err(SearchError::index("Mock failure"));
        }

        // Writing to a missing index auto-creates it without mappings.
        self.indices
            .lock()
            .await
            .entry(index.to_string())
            .or_insert_with(|| MockIndex {
                mappings: json!({}),
                documents: HashMap::new(),
            })
            .documents
            .insert(id.to_string(), document.clone());
        Ok(())
    }

    async fn close(&self) -> Result<(), SearchError> {
        self.closed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Metadata store backed by ID maps.
#[derive(Default)]
pub struct MockMetadataStore {
    pub databases: HashMap<Uuid, Database>,
    pub services: HashMap<Uuid, Service>,
    pub charts: HashMap<Uuid, Chart>,
    pub lookups: AtomicUsize,
}

impl MockMetadataStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_database(mut self, database: Database) -> Self {
        self.databases.insert(database.id, database);
        self
    }

    pub fn with_service(mut self, service: Service) -> Self {
        self.services.insert(service.id, service);
        self
    }

    pub fn with_chart(mut self, chart: Chart) -> Self {
        self.charts.insert(chart.id, chart);
        self
    }
}

#[async_trait]
impl MetadataStore for MockMetadataStore {
    async fn get_database(&self, id: &Uuid) -> Result<Database, MetadataError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.databases
            .get(id)
            .cloned()
            .ok_or_else(|| MetadataError::not_found("Database", *id))
    }

    async fn get_service(&self, kind: ServiceKind, id: &Uuid) -> Result<Service, MetadataError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.services
            .get(id)
            .cloned()
            .ok_or_else(|| MetadataError::not_found(kind.category(), *id))
    }

    async fn get_chart(&self, id: &Uuid) -> Result<Chart, MetadataError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.charts
            .get(id)
            .cloned()
            .ok_or_else(|| MetadataError::not_found("Chart", *id))
    }
}

pub fn tags(fqns: &[&str]) -> Vec<TagLabel> {
    fqns.iter().map(|fqn| TagLabel::new(*fqn)).collect()
}

pub fn service(name: &str, service_type: &str) -> Service {
    Service {
        id: Uuid::new_v4(),
        name: name.to_string(),
        service_type: service_type.to_string(),
    }
}

pub fn usage() -> UsageDetails {
    UsageDetails {
        daily_stats: UsageStats {
            count: 5,
            percentile_rank: Some(20.0),
        },
        weekly_stats: UsageStats {
            count: 35,
            percentile_rank: Some(40.0),
        },
        monthly_stats: UsageStats {
            count: 150,
            percentile_rank: Some(60.0),
        },
        date: None,
    }
}

/// The `mysql.sales.orders` table plus a store that can resolve its database
/// and service.
pub fn orders_table() -> (Table, MockMetadataStore) {
    let service = service("mysql", "MySQL");
    let database = Database {
        id: Uuid::new_v4(),
        name: "sales".to_string(),
        fully_qualified_name: Some("mysql.sales".to_string()),
        service: EntityReference::new(service.id, "databaseService").with_name("mysql"),
    };

    let table = Table {
        id: Uuid::new_v4(),
        name: "orders".to_string(),
        fully_qualified_name: Some("mysql.sales.orders".to_string()),
        description: Some("Customer orders".to_string()),
        table_type: None,
        database: EntityReference::new(database.id, "database").with_name("sales"),
        columns: vec![
            Column::new("order_id").with_description("Primary key"),
            Column::new("amount"),
        ],
        tags: tags(&["Tier.Tier1", "PII.Sensitive"]),
        usage_summary: None,
        owner: None,
        followers: vec![],
    };

    let store = MockMetadataStore::new()
        .with_service(service)
        .with_database(database);

    (table, store)
}

pub fn topic(service: &Service) -> Topic {
    Topic {
        id: Uuid::new_v4(),
        name: "orders_events".to_string(),
        fully_qualified_name: Some("kafka_prod.orders_events".to_string()),
        description: None,
        service: EntityReference::new(service.id, "messagingService"),
        tags: vec![],
        owner: None,
        followers: vec![],
    }
}

pub fn dashboard(service: &Service, charts: &[Chart]) -> Dashboard {
    Dashboard {
        id: Uuid::new_v4(),
        name: "sales_overview".to_string(),
        display_name: Some("Sales Overview".to_string()),
        fully_qualified_name: Some("looker.sales_overview".to_string()),
        description: Some("Weekly sales".to_string()),
        service: EntityReference::new(service.id, "dashboardService"),
        charts: charts
            .iter()
            .map(|chart| EntityReference::new(chart.id, "chart"))
            .collect(),
        usage_summary: Some(usage()),
        tags: vec![],
        owner: None,
        followers: vec![],
    }
}

pub fn pipeline(service: &Service) -> Pipeline {
    Pipeline {
        id: Uuid::new_v4(),
        name: "load_orders".to_string(),
        display_name: Some("Load Orders".to_string()),
        fully_qualified_name: Some("airflow.load_orders".to_string()),
        description: None,
        service: EntityReference::new(service.id, "pipelineService"),
        tasks: vec![
            Task {
                name: "extract".to_string(),
                display_name: Some("Extract".to_string()),
                description: Some("Pull from MySQL".to_string()),
                tags: tags(&["PII.Sensitive"]),
            },
            Task {
                name: "load".to_string(),
                display_name: None,
                description: None,
                tags: vec![],
            },
        ],
        tags: tags(&["Tier.Tier2"]),
        owner: None,
        followers: vec![],
    }
}
