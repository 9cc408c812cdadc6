use creatorfit_core::retry::Transient;
use thiserror::Error;

/// Errors returned by the judgment service client.
#[derive(Debug, Error)]
pub enum JudgeError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("judge returned HTTP {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The completion carried no choices or an empty message.
    #[error("judge model {model} returned an empty reply")]
    EmptyReply { model: String },

    /// The call did not finish within the caller's deadline.
    #[error("judge call timed out after {secs}s")]
    Timeout { secs: u64 },

    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

impl JudgeError {
    /// Returns `true` for failures worth retrying: timeouts, connection
    /// errors, 429 and 5xx responses.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            JudgeError::Http(e) => {
                e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
            }
            JudgeError::UnexpectedStatus { status, .. } => *status == 429 || *status >= 500,
            JudgeError::Timeout { .. } => true,
            JudgeError::Deserialize { .. }
            | JudgeError::EmptyReply { .. }
            | JudgeError::InvalidBaseUrl(_) => false,
        }
    }
}

impl Transient for JudgeError {
    fn is_transient(&self) -> bool {
        JudgeError::is_transient(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn too_many_requests_is_transient() {
        assert!(JudgeError::UnexpectedStatus {
            status: 429,
            body: String::new()
        }
        .is_transient());
    }

    #[test]
    fn bad_request_is_permanent() {
        assert!(!JudgeError::UnexpectedStatus {
            status: 400,
            body: "model not found".to_owned()
        }
        .is_transient());
    }

    #[test]
    fn empty_reply_is_permanent() {
        assert!(!JudgeError::EmptyReply {
            model: "gpt-4".to_owned()
        }
        .is_transient());
    }

    #[test]
    fn timeouts_are_transient_without_a_hint() {
        let err = JudgeError::Timeout { secs: 30 };
        assert!(Transient::is_transient(&err));
        assert_eq!(err.retry_after_ms(), None);
    }
}
