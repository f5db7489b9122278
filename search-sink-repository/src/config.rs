//! Connection settings for the OpenSearch client.

/// Basic-auth credentials for the search engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicAuth {
    pub username: String,
    pub password: String,
}

/// Configuration for the OpenSearchClient.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// Base URL of the cluster, e.g. `http://localhost:9200`.
    pub url: String,
    /// Credentials sent with every request when set.
    pub auth: Option<BasicAuth>,
}

impl ConnectionConfig {
    /// Create a config for an unauthenticated cluster.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            auth: None,
        }
    }

    /// Attach basic-auth credentials.
    ///
    /// A missing password is sent as an empty string.
    pub fn with_basic_auth(mut self, username: impl Into<String>, password: Option<String>) -> Self {
        self.auth = Some(BasicAuth {
            username: username.into(),
            password: password.unwrap_or_default(),
        });
        self
    }
}
