use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

pub const DEFAULT_RAPIDAPI_HOST: &str = "fresh-linkedin-profile-data.p.rapidapi.com";
pub const DEFAULT_RAPIDAPI_BASE_URL: &str = "https://fresh-linkedin-profile-data.p.rapidapi.com";
pub const DEFAULT_LLM_BASE_URL: &str = "https://api.openai.com/v1";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Parsing and validation are decoupled from the process environment so they
/// can be driven from a plain `HashMap` in tests.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        or_default(var, default)
            .parse::<SocketAddr>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let rapidapi_key = require("RAPIDAPI_KEY")?;
    let llm_api_key = require("CREATORFIT_LLM_API_KEY")?;

    let env = parse_environment(&or_default("CREATORFIT_ENV", "development"))?;
    let bind_addr = parse_addr("CREATORFIT_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("CREATORFIT_LOG_LEVEL", "info");

    let rapidapi_host = or_default("CREATORFIT_RAPIDAPI_HOST", DEFAULT_RAPIDAPI_HOST);
    let rapidapi_base_url = or_default("CREATORFIT_RAPIDAPI_BASE_URL", DEFAULT_RAPIDAPI_BASE_URL);
    let llm_base_url = or_default("CREATORFIT_LLM_BASE_URL", DEFAULT_LLM_BASE_URL);

    let classify_model = or_default("CREATORFIT_CLASSIFY_MODEL", "gpt-3.5-turbo");
    let scoring_model = or_default("CREATORFIT_SCORING_MODEL", "gpt-4");
    let narrative_model = or_default("CREATORFIT_NARRATIVE_MODEL", "gpt-4");

    let request_timeout_secs = match parse_u64("CREATORFIT_REQUEST_TIMEOUT_SECS", "30")? {
        0 => {
            return Err(invalid(
                "CREATORFIT_REQUEST_TIMEOUT_SECS",
                "timeout must be at least 1 second".to_string(),
            ))
        }
        secs => secs,
    };
    let max_retries = parse_u32("CREATORFIT_MAX_RETRIES", "2")?;
    let retry_backoff_base_ms = parse_u64("CREATORFIT_RETRY_BACKOFF_BASE_MS", "1000")?;

    let classify_max_concurrency = match lookup("CREATORFIT_CLASSIFY_MAX_CONCURRENCY") {
        Ok(raw) => parse_concurrency(&raw)
            .map_err(|reason| invalid("CREATORFIT_CLASSIFY_MAX_CONCURRENCY", reason))?,
        Err(_) => default_concurrency(),
    };

    let posts_dump_path = lookup("CREATORFIT_POSTS_DUMP_PATH")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from);

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        rapidapi_key,
        rapidapi_host,
        rapidapi_base_url,
        llm_api_key,
        llm_base_url,
        classify_model,
        scoring_model,
        narrative_model,
        request_timeout_secs,
        max_retries,
        retry_backoff_base_ms,
        classify_max_concurrency,
        posts_dump_path,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "CREATORFIT_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

fn parse_concurrency(raw: &str) -> Result<usize, String> {
    match raw.trim().parse::<usize>() {
        Ok(0) => Err("concurrency must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

/// One in-flight classification call per available CPU.
fn default_concurrency() -> usize {
    std::thread::available_parallelism().map_or(4, std::num::NonZeroUsize::get)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
