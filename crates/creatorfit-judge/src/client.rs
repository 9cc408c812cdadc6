//! HTTP client for an OpenAI-compatible chat-completions endpoint.

use std::time::Duration;

use reqwest::{Client, Url};

use creatorfit_core::retry::retry_with_backoff;
use creatorfit_core::AppConfig;

use crate::error::JudgeError;
use crate::judge::{CompletionRequest, Judge};
use crate::types::{ChatMessage, ChatRequest, ChatResponse};

/// Longest error body kept in [`JudgeError::UnexpectedStatus`].
const MAX_ERROR_BODY_CHARS: usize = 500;

/// Client for the judgment service.
///
/// The API key is injected at construction and sent as a bearer token.
pub struct JudgeClient {
    client: Client,
    api_key: String,
    endpoint: Url,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl std::fmt::Debug for JudgeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JudgeClient")
            .field("api_key", &"[redacted]")
            .field("endpoint", &self.endpoint.as_str())
            .field("max_retries", &self.max_retries)
            .finish_non_exhaustive()
    }
}

impl JudgeClient {
    /// Creates a client for `{base_url}/chat/completions` with retries disabled.
    ///
    /// # Errors
    ///
    /// Returns [`JudgeError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`JudgeError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn new(api_key: &str, base_url: &str, timeout_secs: u64) -> Result<Self, JudgeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("creatorfit/0.1 (creator-analysis)")
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let endpoint = Url::parse(&normalised)
            .and_then(|base| base.join("chat/completions"))
            .map_err(|e| JudgeError::InvalidBaseUrl(format!("'{base_url}': {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            endpoint,
            max_retries: 0,
            backoff_base_ms: 0,
        })
    }

    /// Builds a client from application config, including retry policy.
    ///
    /// # Errors
    ///
    /// See [`JudgeClient::new`].
    pub fn from_app_config(config: &AppConfig) -> Result<Self, JudgeError> {
        Ok(Self::new(
            &config.llm_api_key,
            &config.llm_base_url,
            config.request_timeout_secs,
        )?
        .with_retry(config.max_retries, config.retry_backoff_base_ms))
    }

    #[must_use]
    pub fn with_retry(mut self, max_retries: u32, backoff_base_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.backoff_base_ms = backoff_base_ms;
        self
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Sends one completion and returns the first choice's text.
    ///
    /// # Errors
    ///
    /// - [`JudgeError::UnexpectedStatus`] for non-2xx responses.
    /// - [`JudgeError::Http`] on network failure after retries.
    /// - [`JudgeError::Deserialize`] if the body is not a chat completion.
    /// - [`JudgeError::EmptyReply`] if there is no non-blank choice.
    pub async fn chat(&self, request: &CompletionRequest) -> Result<String, JudgeError> {
        let body = ChatRequest {
            model: &request.model,
            messages: [ChatMessage {
                role: "user",
                content: &request.prompt,
            }],
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        retry_with_backoff("judge", self.max_retries, self.backoff_base_ms, || async {
            let response = self
                .client
                .post(self.endpoint.clone())
                .bearer_auth(&self.api_key)
                .json(&body)
                .send()
                .await?;
            let status = response.status();

            if !status.is_success() {
                let text = response.text().await.unwrap_or_default();
                return Err(JudgeError::UnexpectedStatus {
                    status: status.as_u16(),
                    body: text.chars().take(MAX_ERROR_BODY_CHARS).collect(),
                });
            }

            let text = response.text().await?;
            let parsed: ChatResponse =
                serde_json::from_str(&text).map_err(|e| JudgeError::Deserialize {
                    context: format!("chat completion from {}", request.model),
                    source: e,
                })?;

            let reply = parsed.first_content().ok_or_else(|| JudgeError::EmptyReply {
                model: request.model.clone(),
            })?;
            tracing::debug!(model = %request.model, reply_chars = reply.len(), "judge replied");
            Ok(reply)
        })
        .await
    }
}

impl Judge for JudgeClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String, JudgeError> {
        self.chat(&request).await
    }
}
