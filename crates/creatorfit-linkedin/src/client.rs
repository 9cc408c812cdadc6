//! HTTP client for the RapidAPI LinkedIn profile endpoints.
//!
//! Wraps `reqwest` with RapidAPI header auth, typed error mapping and
//! retry on transient failures. Credentials are passed in at construction;
//! the client never reads the environment itself.

use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::{Client, StatusCode, Url};

use creatorfit_core::retry::retry_with_backoff;
use creatorfit_core::{AppConfig, Post, Profile};

use crate::error::FetchError;
use crate::source::CreatorSource;
use crate::types::{PostsResponse, ProfileResponse};

const PROFILE_PATH: &str = "get-linkedin-profile";
const POSTS_PATH: &str = "get-profile-posts";

/// Client for the RapidAPI "fresh LinkedIn profile data" service.
///
/// Use [`LinkedinClient::new`] with explicit settings, or
/// [`LinkedinClient::from_app_config`] in binaries. Point `base_url` at a
/// mock server in tests.
pub struct LinkedinClient {
    client: Client,
    api_key: String,
    api_host: String,
    base_url: Url,
    max_retries: u32,
    backoff_base_ms: u64,
    posts_dump_path: Option<PathBuf>,
}

impl std::fmt::Debug for LinkedinClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinkedinClient")
            .field("api_key", &"[redacted]")
            .field("api_host", &self.api_host)
            .field("base_url", &self.base_url.as_str())
            .field("max_retries", &self.max_retries)
            .field("backoff_base_ms", &self.backoff_base_ms)
            .finish_non_exhaustive()
    }
}

impl LinkedinClient {
    /// Creates a client with retries disabled.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`FetchError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn new(
        api_key: &str,
        api_host: &str,
        base_url: &str,
        timeout_secs: u64,
    ) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("creatorfit/0.1 (creator-analysis)")
            .build()?;

        // Exactly one trailing slash so `Url::join` appends the endpoint
        // instead of replacing the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| FetchError::InvalidBaseUrl(format!("'{base_url}': {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            api_host: api_host.to_owned(),
            base_url,
            max_retries: 0,
            backoff_base_ms: 0,
            posts_dump_path: None,
        })
    }

    /// Builds a client from application config, including retry policy and
    /// the optional posts dump path.
    ///
    /// # Errors
    ///
    /// See [`LinkedinClient::new`].
    pub fn from_app_config(config: &AppConfig) -> Result<Self, FetchError> {
        Ok(Self::new(
            &config.rapidapi_key,
            &config.rapidapi_host,
            &config.rapidapi_base_url,
            config.request_timeout_secs,
        )?
        .with_retry(config.max_retries, config.retry_backoff_base_ms)
        .with_posts_dump(config.posts_dump_path.clone()))
    }

    /// Enables retry on transient errors: up to `max_retries` extra attempts
    /// with exponential back-off starting at `backoff_base_ms`.
    #[must_use]
    pub fn with_retry(mut self, max_retries: u32, backoff_base_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.backoff_base_ms = backoff_base_ms;
        self
    }

    /// Writes every raw posts response to `path` (debug aid, best effort).
    #[must_use]
    pub fn with_posts_dump(mut self, path: Option<PathBuf>) -> Self {
        self.posts_dump_path = path;
        self
    }

    /// Fetches the creator profile.
    ///
    /// # Errors
    ///
    /// - [`FetchError::ProfileNotFound`] if the response carries no `data`.
    /// - [`FetchError::RateLimited`], [`FetchError::NotFound`],
    ///   [`FetchError::UnexpectedStatus`] for non-2xx responses.
    /// - [`FetchError::Http`] on network failure after retries.
    /// - [`FetchError::Deserialize`] if the body does not match.
    pub async fn get_profile(&self, linkedin_url: &str) -> Result<Profile, FetchError> {
        let url = self.build_url(
            PROFILE_PATH,
            &[("linkedin_url", linkedin_url), ("include_skills", "false")],
        )?;
        let body = self.request_text(&url).await?;

        let envelope: ProfileResponse =
            serde_json::from_str(&body).map_err(|e| FetchError::Deserialize {
                context: format!("{PROFILE_PATH}({linkedin_url})"),
                source: e,
            })?;

        let profile = envelope.data.ok_or_else(|| FetchError::ProfileNotFound {
            linkedin_url: linkedin_url.to_owned(),
        })?;

        tracing::debug!(
            linkedin_url,
            followers = profile.followers(),
            "fetched creator profile"
        );
        Ok(profile)
    }

    /// Fetches the creator's recent posts. A response without `data` yields
    /// an empty list.
    ///
    /// # Errors
    ///
    /// Same as [`LinkedinClient::get_profile`], minus `ProfileNotFound`.
    pub async fn get_posts(&self, linkedin_url: &str) -> Result<Vec<Post>, FetchError> {
        let url = self.build_url(
            POSTS_PATH,
            &[("linkedin_url", linkedin_url), ("type", "posts")],
        )?;
        let body = self.request_text(&url).await?;

        if let Some(path) = &self.posts_dump_path {
            dump_raw_response(path, &body).await;
        }

        let envelope: PostsResponse =
            serde_json::from_str(&body).map_err(|e| FetchError::Deserialize {
                context: format!("{POSTS_PATH}({linkedin_url})"),
                source: e,
            })?;

        let posts = envelope.data.unwrap_or_default();
        tracing::debug!(linkedin_url, count = posts.len(), "fetched creator posts");
        Ok(posts)
    }

    /// Builds an endpoint URL with percent-encoded query parameters.
    fn build_url(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Url, FetchError> {
        let mut url = self
            .base_url
            .join(endpoint)
            .map_err(|e| FetchError::InvalidBaseUrl(format!("joining '{endpoint}': {e}")))?;
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    /// Sends an authenticated GET with retry, maps non-2xx statuses to typed
    /// errors, and returns the body text.
    async fn request_text(&self, url: &Url) -> Result<String, FetchError> {
        retry_with_backoff("profile API", self.max_retries, self.backoff_base_ms, || async {
            let response = self
                .client
                .get(url.clone())
                .header("X-RapidAPI-Key", &self.api_key)
                .header("X-RapidAPI-Host", &self.api_host)
                .header(reqwest::header::ACCEPT, "application/json")
                .send()
                .await?;
            let status = response.status();

            if status == StatusCode::TOO_MANY_REQUESTS {
                let retry_after_secs = response
                    .headers()
                    .get(reqwest::header::RETRY_AFTER)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|s| s.parse::<u64>().ok())
                    .unwrap_or(1);
                return Err(FetchError::RateLimited { retry_after_secs });
            }

            if status == StatusCode::NOT_FOUND {
                return Err(FetchError::NotFound {
                    url: redact(url),
                });
            }

            if !status.is_success() {
                return Err(FetchError::UnexpectedStatus {
                    status: status.as_u16(),
                    url: redact(url),
                });
            }

            Ok(response.text().await?)
        })
        .await
    }
}

impl CreatorSource for LinkedinClient {
    async fn fetch_profile(&self, linkedin_url: &str) -> Result<Profile, FetchError> {
        self.get_profile(linkedin_url).await
    }

    async fn fetch_posts(&self, linkedin_url: &str) -> Result<Vec<Post>, FetchError> {
        self.get_posts(linkedin_url).await
    }
}

/// URL without its query string, for error messages.
fn redact(url: &Url) -> String {
    let mut url = url.clone();
    url.set_query(None);
    url.to_string()
}

async fn dump_raw_response(path: &Path, body: &str) {
    match tokio::fs::write(path, body).await {
        Ok(()) => tracing::debug!(path = %path.display(), "wrote raw posts response"),
        Err(e) => tracing::warn!(
            path = %path.display(),
            error = %e,
            "could not write raw posts response"
        ),
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
