use creatorfit_core::retry::Transient;
use thiserror::Error;

/// Errors returned when fetching creator data from the profile API.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// HTTP 429 from the API gateway.
    #[error("rate limited by profile API (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("endpoint not found: {url}")]
    NotFound { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The API answered but carried no profile for the URL.
    #[error("no profile found for {linkedin_url}")]
    ProfileNotFound { linkedin_url: String },

    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

impl FetchError {
    /// Returns `true` when a later attempt could plausibly succeed.
    ///
    /// Timeouts, connection failures, 429s and 5xx responses are transient.
    /// Bad URLs, missing profiles, other 4xx and malformed bodies are not.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            FetchError::Http(e) => {
                e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
            }
            FetchError::RateLimited { .. } => true,
            FetchError::UnexpectedStatus { status, .. } => *status >= 500,
            FetchError::NotFound { .. }
            | FetchError::Deserialize { .. }
            | FetchError::ProfileNotFound { .. }
            | FetchError::InvalidBaseUrl(_) => false,
        }
    }
}

impl Transient for FetchError {
    fn is_transient(&self) -> bool {
        FetchError::is_transient(self)
    }

    fn retry_after_ms(&self) -> Option<u64> {
        match self {
            FetchError::RateLimited { retry_after_secs } => {
                Some(retry_after_secs.saturating_mul(1_000))
            }
            _ => None,
        }
    }
}
