use thiserror::Error;

pub type Result<T> = std::result::Result<T, ApiError>;

/// Every failure a handler call can surface. Nothing here is recovered
/// locally; the caller sees the error exactly as the transport produced it.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Connection, DNS or other transport level failure.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The endpoint needs a bearer token and none is set.
    #[error("no access token set for {path}")]
    MissingToken { path: String },

    #[error("unauthorized (401): {body}")]
    Unauthorized { body: String },

    #[error("forbidden (403): {body}")]
    Forbidden { body: String },

    #[error("request failed with status {status}: {body}")]
    Http { status: u16, body: String },

    /// A 2xx response whose body is not valid JSON.
    #[error("invalid JSON in response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("collection is empty")]
    EmptyCollection,

    /// The payload lacks a field needed to address a resource or read a page.
    #[error("missing field `{0}` in payload")]
    MissingField(&'static str),

    #[error("invalid base url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl ApiError {
    /// Map a non-2xx status and its body onto the taxonomy.
    pub fn from_status(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        match status {
            401 => Self::Unauthorized { body },
            403 => Self::Forbidden { body },
            _ => Self::Http { status, body },
        }
    }

    /// HTTP status of the response that caused this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized { .. } => Some(401),
            ApiError::Forbidden { .. } => Some(403),
            ApiError::Http { status, .. } => Some(*status),
            ApiError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Response body of a failed request, if any.
    pub fn body(&self) -> Option<&str> {
        match self {
            ApiError::Unauthorized { body }
            | ApiError::Forbidden { body }
            | ApiError::Http { body, .. } => Some(body),
            _ => None,
        }
    }

    /// True for a missing token and for 401 responses.
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            ApiError::MissingToken { .. } | ApiError::Unauthorized { .. }
        )
    }
}
