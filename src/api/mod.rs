pub mod http;
pub mod mock;

use crate::error::Result;
use reqwest::Method;
use serde_json::Value;

/// One call against the Web API: verb, path fragment relative to the base
/// URL, ordered query pairs, optional JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    /// Set for endpoints that refuse anonymous callers.
    pub auth: bool,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            auth: false,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Append every pair produced by an options structure.
    pub fn params(mut self, options: &impl crate::options::QueryParams) -> Self {
        self.query.extend(
            options
                .query_pairs()
                .into_iter()
                .map(|(k, v)| (k.to_string(), v)),
        );
        self
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn authenticated(mut self) -> Self {
        self.auth = true;
        self
    }

    /// Value of the first query pair named `key`.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// The seam between resource handlers and the network.
/// Implementations: http::HttpTransport for the real API, mock::RecordingTransport for tests.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// Perform the request once and return the decoded JSON body.
    /// Non-2xx responses become errors carrying status and body.
    async fn execute(&self, request: ApiRequest) -> Result<Value>;

    /// Replace (or clear) the bearer token used for subsequent requests.
    async fn set_token(&self, token: Option<String>);

    /// Currently configured bearer token.
    async fn token(&self) -> Option<String>;
}
