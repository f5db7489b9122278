//! OpenSearch client implementation.
//!
//! This module provides the concrete implementation of `SearchEngineClient`
//! using the OpenSearch Rust client.

use async_trait::async_trait;
use opensearch::{
    auth::Credentials,
    http::{
        response::Response,
        transport::{SingleNodeConnectionPool, TransportBuilder},
    },
    indices::{
        IndicesCreateParts, IndicesExistsParts, IndicesGetMappingParts, IndicesPutMappingParts,
    },
    IndexParts, OpenSearch,
};
use serde_json::{json, Value};
use tracing::{debug, error, info, instrument};
use url::Url;

use crate::config::ConnectionConfig;
use crate::errors::SearchError;
use crate::interfaces::SearchEngineClient;

/// OpenSearch client implementation.
///
/// # Example
///
/// ```ignore
/// use search_sink_repository::{ConnectionConfig, OpenSearchClient};
///
/// let config = ConnectionConfig::new("http://localhost:9200");
/// let client = OpenSearchClient::new(&config)?;
///
/// if !client.index_exists("table_search_index").await? {
///     client.create_index("table_search_index", &body).await?;
/// }
/// ```
pub struct OpenSearchClient {
    client: OpenSearch,
}

impl OpenSearchClient {
    /// Create a new OpenSearch client for the configured cluster.
    ///
    /// No request is sent until the first call.
    ///
    /// # Returns
    ///
    /// * `Ok(OpenSearchClient)` - A new client instance
    /// * `Err(SearchError)` - If the URL is invalid or transport setup fails
    pub fn new(config: &ConnectionConfig) -> Result<Self, SearchError> {
        let parsed_url =
            Url::parse(&config.url).map_err(|e| SearchError::connection(e.to_string()))?;

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);
        let mut builder = TransportBuilder::new(conn_pool).disable_proxy();

        if let Some(auth) = &config.auth {
            builder = builder.auth(Credentials::Basic(
                auth.username.clone(),
                auth.password.clone(),
            ));
        }

        let transport = builder
            .build()
            .map_err(|e| SearchError::connection(e.to_string()))?;

        info!(
            url = %config.url,
            authenticated = config.auth.is_some(),
            "Created OpenSearch client"
        );

        Ok(Self {
            client: OpenSearch::new(transport),
        })
    }

    /// Turn a non-success response into an error built by `make_error`.
    async fn ensure_success(
        response: Response,
        operation: &str,
        make_error: fn(String) -> SearchError,
    ) -> Result<Response, SearchError> {
        let status = response.status_code();
        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();
        error!(status = %status, body = %error_body, operation, "Request failed");
        Err(make_error(format!(
            "{} failed with status {}: {}",
            operation, status, error_body
        )))
    }
}

/// Pick the `mappings` object for `index` out of a get-mapping response.
///
/// The response is keyed by concrete index name, which differs from the
/// requested name when it is an alias; a single-entry response is accepted in
/// that case.
fn extract_mappings(body: &Value, index: &str) -> Value {
    let entry = body.get(index).or_else(|| {
        body.as_object()
            .filter(|indices| indices.len() == 1)
            .and_then(|indices| indices.values().next())
    });

    entry
        .and_then(|entry| entry.get("mappings"))
        .cloned()
        .unwrap_or_else(|| json!({}))
}

#[async_trait]
impl SearchEngineClient for OpenSearchClient {
    #[instrument(skip(self))]
    async fn index_exists(&self, index: &str) -> Result<bool, SearchError> {
        let response = self
            .client
            .indices()
            .exists(IndicesExistsParts::Index(&[index]))
            .send()
            .await
            .map_err(|e| SearchError::connection(e.to_string()))?;

        let status = response.status_code();
        match status.as_u16() {
            200 => Ok(true),
            404 => Ok(false),
            _ => {
                error!(status = %status, index = %index, "Index exists check failed");
                Err(SearchError::index(format!(
                    "Index exists check for {} failed with status {}",
                    index, status
                )))
            }
        }
    }

    #[instrument(skip(self))]
    async fn get_mapping(&self, index: &str) -> Result<Value, SearchError> {
        let response = self
            .client
            .indices()
            .get_mapping(IndicesGetMappingParts::Index(&[index]))
            .send()
            .await
            .map_err(|e| SearchError::connection(e.to_string()))?;

        let response =
            Self::ensure_success(response, "Get mapping", SearchError::MappingError).await?;
        let body: Value = response
            .json()
            .await
            .map_err(|e| SearchError::parse(e.to_string()))?;

        Ok(extract_mappings(&body, index))
    }

    #[instrument(skip(self, body))]
    async fn put_mapping(&self, index: &str, body: &Value) -> Result<(), SearchError> {
        let response = self
            .client
            .indices()
            .put_mapping(IndicesPutMappingParts::Index(&[index]))
            .body(body.clone())
            .send()
            .await
            .map_err(|e| SearchError::connection(e.to_string()))?;

        Self::ensure_success(response, "Put mapping", SearchError::MappingError).await?;

        info!(index = %index, "Index mapping updated");
        Ok(())
    }

    #[instrument(skip(self, body))]
    async fn create_index(&self, index: &str, body: &Value) -> Result<(), SearchError> {
        let response = self
            .client
            .indices()
            .create(IndicesCreateParts::Index(index))
            .body(body.clone())
            .send()
            .await
            .map_err(|e| SearchError::connection(e.to_string()))?;

        Self::ensure_success(response, "Create index", SearchError::IndexCreationError).await?;

        info!(index = %index, "Index created");
        Ok(())
    }

    async fn index_document(
        &self,
        index: &str,
        id: &str,
        document: &Value,
    ) -> Result<(), SearchError> {
        let response = self
            .client
            .index(IndexParts::IndexId(index, id))
            .body(document.clone())
            .send()
            .await
            .map_err(|e| SearchError::connection(e.to_string()))?;

        Self::ensure_success(response, "Index document", SearchError::IndexError).await?;

        debug!(index = %index, doc_id = %id, "Document indexed");
        Ok(())
    }

    async fn close(&self) -> Result<(), SearchError> {
        // The transport's pool is released when the last Arc is dropped.
        debug!("Closing OpenSearch client");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_mappings_by_name() {
        let body = json!({
            "table_search_index": {
                "mappings": {
                    "properties": { "table_name": { "type": "text" } }
                }
            }
        });

        let mappings = extract_mappings(&body, "table_search_index");
        assert_eq!(mappings["properties"]["table_name"]["type"], "text");
    }

    #[test]
    fn test_extract_mappings_empty() {
        let body = json!({ "topic_search_index": { "mappings": {} } });

        let mappings = extract_mappings(&body, "topic_search_index");
        assert_eq!(mappings, json!({}));
    }

    #[test]
    fn test_extract_mappings_through_alias() {
        let body = json!({ "dashboard_search_index_v2": { "mappings": { "properties": {} } } });

        let mappings = extract_mappings(&body, "dashboard_search_index");
        assert!(mappings.get("properties").is_some());
    }

    #[test]
    fn test_extract_mappings_missing_index() {
        let body = json!({});
        assert_eq!(extract_mappings(&body, "pipeline_search_index"), json!({}));
    }

    #[test]
    fn test_new_rejects_invalid_url() {
        let config = ConnectionConfig::new("not a url");
        assert!(matches!(
            OpenSearchClient::new(&config),
            Err(SearchError::ConnectionError(_))
        ));
    }

    #[test]
    fn test_new_with_credentials() {
        let config = ConnectionConfig::new("http://localhost:9200")
            .with_basic_auth("admin", Some("admin".to_string()));
        assert!(OpenSearchClient::new(&config).is_ok());
    }
}
