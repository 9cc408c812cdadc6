//! Shared domain records and configuration for creatorfit.

pub mod app_config;
pub mod config;
pub mod creator;
pub mod retry;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use creator::{EngagementMetric, Post, Profile};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required env var: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
