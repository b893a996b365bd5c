use super::{ApiRequest, Transport};
use crate::error::{ApiError, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{info, warn};

/// In-memory transport used in tests and dry runs.
/// Records every request and answers from a queue of canned responses;
/// once the queue is empty it answers `Value::Null`.
///
/// Like [`HttpTransport`](super::http::HttpTransport), requests flagged
/// `auth` are refused with [`ApiError::MissingToken`] while no token is set,
/// and refused requests are not recorded.
#[derive(Default)]
pub struct RecordingTransport {
    requests: Mutex<Vec<ApiRequest>>,
    responses: Mutex<VecDeque<Result<Value>>>,
    token: Mutex<Option<String>>,
}

// A panicking test thread must not take the recorder down with it.
fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
            ..Self::default()
        }
    }

    /// Queue a successful response.
    pub fn respond_with(&self, body: Value) {
        lock(&self.responses).push_back(Ok(body));
    }

    /// Queue a failure.
    pub fn fail_with(&self, err: ApiError) {
        lock(&self.responses).push_back(Err(err));
    }

    /// Snapshot of the requests seen so far, in issue order.
    pub fn requests(&self) -> Vec<ApiRequest> {
        lock(&self.requests).clone()
    }

    pub fn last_request(&self) -> Option<ApiRequest> {
        lock(&self.requests).last().cloned()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn execute(&self, request: ApiRequest) -> Result<Value> {
        if request.auth && lock(&self.token).is_none() {
            warn!("RecordingTransport: {} {} requires an access token", request.method, request.path);
            return Err(ApiError::MissingToken { path: request.path });
        }
        info!("RecordingTransport: {} {}", request.method, request.path);
        lock(&self.requests).push(request);
        lock(&self.responses).pop_front().unwrap_or(Ok(Value::Null))
    }

    async fn set_token(&self, token: Option<String>) {
        *lock(&self.token) = token;
    }

    async fn token(&self) -> Option<String> {
        lock(&self.token).clone()
    }
}
