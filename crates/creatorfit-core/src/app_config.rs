use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub rapidapi_key: String,
    pub rapidapi_host: String,
    pub rapidapi_base_url: String,
    pub llm_api_key: String,
    pub llm_base_url: String,
    pub classify_model: String,
    pub scoring_model: String,
    pub narrative_model: String,
    pub request_timeout_secs: u64,
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
    /// Upper bound on in-flight per-post classification calls.
    pub classify_max_concurrency: usize,
    /// Debug-only: where to write the raw posts response, if anywhere.
    pub posts_dump_path: Option<PathBuf>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("rapidapi_key", &"[redacted]")
            .field("rapidapi_host", &self.rapidapi_host)
            .field("rapidapi_base_url", &self.rapidapi_base_url)
            .field("llm_api_key", &"[redacted]")
            .field("llm_base_url", &self.llm_base_url)
            .field("classify_model", &self.classify_model)
            .field("scoring_model", &self.scoring_model)
            .field("narrative_model", &self.narrative_model)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_base_ms", &self.retry_backoff_base_ms)
            .field("classify_max_concurrency", &self.classify_max_concurrency)
            .field("posts_dump_path", &self.posts_dump_path)
            .finish()
    }
}
