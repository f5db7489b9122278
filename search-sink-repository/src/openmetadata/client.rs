//! Metadata server REST client.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, error, info, instrument};
use url::Url;
use uuid::Uuid;

use crate::errors::MetadataError;
use crate::interfaces::MetadataStore;
use search_sink_shared::{Chart, Database, Service, ServiceKind};

/// Client for the metadata server's entity API.
///
/// # Example
///
/// ```ignore
/// let client = OpenMetadataClient::new("http://localhost:8585/api", None)?;
/// let database = client.get_database(&database_id).await?;
/// ```
pub struct OpenMetadataClient {
    http: Client,
    base_url: Url,
    auth_token: Option<String>,
}

impl OpenMetadataClient {
    /// Create a client for the given API endpoint, e.g. `http://localhost:8585/api`.
    ///
    /// When `auth_token` is set it is sent as a bearer token.
    pub fn new(api_endpoint: &str, auth_token: Option<String>) -> Result<Self, MetadataError> {
        // Url::join drops the last path segment unless it ends with '/'.
        let endpoint = if api_endpoint.ends_with('/') {
            api_endpoint.to_string()
        } else {
            format!("{}/", api_endpoint)
        };
        let base_url = Url::parse(&endpoint).map_err(|e| MetadataError::config(e.to_string()))?;

        let http = Client::builder()
            .build()
            .map_err(|e| MetadataError::config(e.to_string()))?;

        info!(api_endpoint = %base_url, "Created metadata server client");

        Ok(Self {
            http,
            base_url,
            auth_token,
        })
    }

    /// URL of a single entity, e.g. `{base}/v1/databases/{id}`.
    fn entity_url(&self, collection: &str, id: &Uuid) -> Result<Url, MetadataError> {
        self.base_url
            .join(&format!("v1/{}/{}", collection, id))
            .map_err(|e| MetadataError::config(e.to_string()))
    }

    /// Fetch one entity by ID, optionally requesting extra fields.
    async fn get_by_id<T: DeserializeOwned>(
        &self,
        entity: &'static str,
        collection: &str,
        id: &Uuid,
        fields: Option<&str>,
    ) -> Result<T, MetadataError> {
        let url = self.entity_url(collection, id)?;

        let mut request = self.http.get(url);
        if let Some(fields) = fields {
            request = request.query(&[("fields", fields)]);
        }
        if let Some(token) = &self.auth_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| MetadataError::connection(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(MetadataError::not_found(entity, *id));
        }
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, entity, id = %id, "Metadata lookup failed");
            return Err(MetadataError::request(format!(
                "GET {} {} failed with status {}: {}",
                entity, id, status, error_body
            )));
        }

        debug!(entity, id = %id, "Resolved entity");
        response
            .json::<T>()
            .await
            .map_err(|e| MetadataError::parse(e.to_string()))
    }
}

/// Collection path of a service family under `/v1/services`.
fn service_collection(kind: ServiceKind) -> &'static str {
    match kind {
        ServiceKind::Database => "services/databaseServices",
        ServiceKind::Messaging => "services/messagingServices",
        ServiceKind::Dashboard => "services/dashboardServices",
        ServiceKind::Pipeline => "services/pipelineServices",
    }
}

#[async_trait]
impl MetadataStore for OpenMetadataClient {
    #[instrument(skip(self))]
    async fn get_database(&self, id: &Uuid) -> Result<Database, MetadataError> {
        self.get_by_id("Database", "databases", id, None).await
    }

    #[instrument(skip(self))]
    async fn get_service(&self, kind: ServiceKind, id: &Uuid) -> Result<Service, MetadataError> {
        self.get_by_id(kind.category(), service_collection(kind), id, None)
            .await
    }

    #[instrument(skip(self))]
    async fn get_chart(&self, id: &Uuid) -> Result<Chart, MetadataError> {
        self.get_by_id("Chart", "charts", id, Some("tags")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_url_keeps_api_prefix() {
        let client = OpenMetadataClient::new("http://localhost:8585/api", None).unwrap();
        let id = Uuid::parse_str("550e8400-e29b-41d4-a716-446655440000").unwrap();

        let url = client.entity_url("databases", &id).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8585/api/v1/databases/550e8400-e29b-41d4-a716-446655440000"
        );
    }

    #[test]
    fn test_service_urls() {
        let client = OpenMetadataClient::new("http://localhost:8585/api/", None).unwrap();
        let id = Uuid::parse_str("6ba7b810-9dad-11d1-80b4-00c04fd430c8").unwrap();

        let url = client
            .entity_url(service_collection(ServiceKind::Messaging), &id)
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8585/api/v1/services/messagingServices/6ba7b810-9dad-11d1-80b4-00c04fd430c8"
        );
    }

    #[test]
    fn test_invalid_endpoint() {
        assert!(matches!(
            OpenMetadataClient::new("::not a url::", None),
            Err(MetadataError::ConfigError(_))
        ));
    }
}
