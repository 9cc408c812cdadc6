use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

/// Returns a map with all required env vars populated.
fn full_env<'a>() -> HashMap<&'a str, &'a str> {
    let mut m = HashMap::new();
    m.insert("RAPIDAPI_KEY", "rapid-test-key");
    m.insert("CREATORFIT_LLM_API_KEY", "llm-test-key");
    m
}

#[test]
fn parse_environment_development() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
}

#[test]
fn parse_environment_production() {
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "CREATORFIT_ENV"));
}

#[test]
fn build_app_config_fails_without_rapidapi_key() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "RAPIDAPI_KEY"),
        "expected MissingEnvVar(RAPIDAPI_KEY), got: {result:?}"
    );
}

#[test]
fn build_app_config_fails_without_llm_api_key() {
    let mut map: HashMap<&str, &str> = HashMap::new();
    map.insert("RAPIDAPI_KEY", "rapid-test-key");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "CREATORFIT_LLM_API_KEY"),
        "expected MissingEnvVar(CREATORFIT_LLM_API_KEY), got: {result:?}"
    );
}

#[test]
fn build_app_config_treats_blank_key_as_missing() {
    let mut map = full_env();
    map.insert("RAPIDAPI_KEY", "   ");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "RAPIDAPI_KEY"),
        "expected MissingEnvVar(RAPIDAPI_KEY), got: {result:?}"
    );
}

#[test]
fn build_app_config_succeeds_with_all_required_vars() {
    let map = full_env();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:3000");
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.rapidapi_key, "rapid-test-key");
    assert_eq!(cfg.rapidapi_host, DEFAULT_RAPIDAPI_HOST);
    assert_eq!(cfg.rapidapi_base_url, DEFAULT_RAPIDAPI_BASE_URL);
    assert_eq!(cfg.llm_api_key, "llm-test-key");
    assert_eq!(cfg.llm_base_url, DEFAULT_LLM_BASE_URL);
    assert_eq!(cfg.classify_model, "gpt-3.5-turbo");
    assert_eq!(cfg.scoring_model, "gpt-4");
    assert_eq!(cfg.narrative_model, "gpt-4");
    assert_eq!(cfg.request_timeout_secs, 30);
    assert_eq!(cfg.max_retries, 2);
    assert_eq!(cfg.retry_backoff_base_ms, 1000);
    assert!(cfg.classify_max_concurrency >= 1);
    assert!(cfg.posts_dump_path.is_none());
}

#[test]
fn build_app_config_fails_with_invalid_bind_addr() {
    let mut map = full_env();
    map.insert("CREATORFIT_BIND_ADDR", "not-a-socket-addr");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "CREATORFIT_BIND_ADDR"),
        "expected InvalidEnvVar(CREATORFIT_BIND_ADDR), got: {result:?}"
    );
}

#[test]
fn request_timeout_secs_override() {
    let mut map = full_env();
    map.insert("CREATORFIT_REQUEST_TIMEOUT_SECS", "60");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.request_timeout_secs, 60);
}

#[test]
fn request_timeout_secs_invalid() {
    let mut map = full_env();
    map.insert("CREATORFIT_REQUEST_TIMEOUT_SECS", "soon");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "CREATORFIT_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(CREATORFIT_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn request_timeout_secs_zero_is_rejected() {
    let mut map = full_env();
    map.insert("CREATORFIT_REQUEST_TIMEOUT_SECS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, ref reason }) if var == "CREATORFIT_REQUEST_TIMEOUT_SECS" && reason.contains("at least 1")),
        "expected InvalidEnvVar(CREATORFIT_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn max_retries_invalid() {
    let mut map = full_env();
    map.insert("CREATORFIT_MAX_RETRIES", "-1");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "CREATORFIT_MAX_RETRIES"),
        "expected InvalidEnvVar(CREATORFIT_MAX_RETRIES), got: {result:?}"
    );
}

#[test]
fn classify_max_concurrency_override() {
    let mut map = full_env();
    map.insert("CREATORFIT_CLASSIFY_MAX_CONCURRENCY", "3");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.classify_max_concurrency, 3);
}

#[test]
fn classify_max_concurrency_zero_is_rejected() {
    let mut map = full_env();
    map.insert("CREATORFIT_CLASSIFY_MAX_CONCURRENCY", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "CREATORFIT_CLASSIFY_MAX_CONCURRENCY"),
        "expected InvalidEnvVar(CREATORFIT_CLASSIFY_MAX_CONCURRENCY), got: {result:?}"
    );
}

#[test]
fn model_overrides_apply() {
    let mut map = full_env();
    map.insert("CREATORFIT_CLASSIFY_MODEL", "gpt-4o-mini");
    map.insert("CREATORFIT_SCORING_MODEL", "gpt-4o");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.classify_model, "gpt-4o-mini");
    assert_eq!(cfg.scoring_model, "gpt-4o");
    assert_eq!(cfg.narrative_model, "gpt-4");
}

#[test]
fn posts_dump_path_is_optional() {
    let mut map = full_env();
    map.insert("CREATORFIT_POSTS_DUMP_PATH", "/tmp/posts.json");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(
        cfg.posts_dump_path.as_deref(),
        Some(std::path::Path::new("/tmp/posts.json"))
    );
}

#[test]
fn debug_output_redacts_secrets() {
    let map = full_env();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(!rendered.contains("rapid-test-key"));
    assert!(!rendered.contains("llm-test-key"));
    assert!(rendered.contains("[redacted]"));
}
