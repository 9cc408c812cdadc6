//! Integration tests for `LinkedinClient` using wiremock HTTP mocks.

use creatorfit_core::EngagementMetric;
use creatorfit_linkedin::{CreatorSource, FetchError, LinkedinClient};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PROFILE_URL: &str = "https://www.linkedin.com/in/jane-creator/";

fn test_client(base_url: &str) -> LinkedinClient {
    LinkedinClient::new("test-key", "test-host.p.rapidapi.com", base_url, 5)
        .expect("client construction should not fail")
}

#[tokio::test]
async fn get_profile_sends_rapidapi_headers_and_parses_followers() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "data": {
            "full_name": "Jane Creator",
            "headline": "Developer advocate",
            "followers_count": 15230,
            "profile_url": PROFILE_URL,
            "skills": []
        },
        "message": "ok"
    });

    Mock::given(method("GET"))
        .and(path("/get-linkedin-profile"))
        .and(query_param("linkedin_url", PROFILE_URL))
        .and(query_param("include_skills", "false"))
        .and(header("X-RapidAPI-Key", "test-key"))
        .and(header("X-RapidAPI-Host", "test-host.p.rapidapi.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let profile = client
        .get_profile(PROFILE_URL)
        .await
        .expect("should parse profile");

    assert_eq!(profile.followers(), 15230);
    assert_eq!(profile.full_name.as_deref(), Some("Jane Creator"));
}

#[tokio::test]
async fn get_profile_without_data_is_profile_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/get-linkedin-profile"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "data": null })),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.get_profile(PROFILE_URL).await.unwrap_err();

    assert!(
        matches!(err, FetchError::ProfileNotFound { ref linkedin_url } if linkedin_url == PROFILE_URL),
        "expected ProfileNotFound, got: {err:?}"
    );
    assert!(!err.is_transient());
}

#[tokio::test]
async fn get_posts_parses_posts_in_order() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "data": [
            {
                "text": "Launch day for our open-source toolkit",
                "time": "3d",
                "num_likes": 120,
                "num_comments": 14,
                "num_reposts": 6,
                "num_empathy": 3,
                "num_interests": 2,
                "num_praises": 5,
                "url": "https://www.linkedin.com/feed/update/1"
            },
            {
                "text": "Weekend reading list",
                "time": "2w",
                "num_likes": 40
            }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/get-profile-posts"))
        .and(query_param("linkedin_url", PROFILE_URL))
        .and(query_param("type", "posts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let posts = client.fetch_posts(PROFILE_URL).await.expect("should parse posts");

    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0].metric(EngagementMetric::Comments), 14);
    assert_eq!(posts[1].text, "Weekend reading list");
    assert_eq!(posts[1].metric(EngagementMetric::Comments), 0);
}

#[tokio::test]
async fn get_posts_without_data_is_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/get-profile-posts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let posts = client.get_posts(PROFILE_URL).await.expect("empty is fine");
    assert!(posts.is_empty());
}

#[tokio::test]
async fn get_posts_writes_raw_dump_when_configured() {
    let server = MockServer::start().await;
    let body = serde_json::json!({ "data": [{ "text": "hello", "num_likes": 1 }] });

    Mock::given(method("GET"))
        .and(path("/get-profile-posts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let dump = std::env::temp_dir().join(format!("creatorfit-posts-{}.json", std::process::id()));
    let client = test_client(&server.uri()).with_posts_dump(Some(dump.clone()));
    client.get_posts(PROFILE_URL).await.expect("posts");

    let written = std::fs::read_to_string(&dump).expect("dump file should exist");
    let parsed: serde_json::Value = serde_json::from_str(&written).expect("dump is json");
    assert_eq!(parsed, body);
    let _ = std::fs::remove_file(dump);
}

#[tokio::test]
async fn not_found_status_maps_to_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.get_posts(PROFILE_URL).await.unwrap_err();
    assert!(matches!(err, FetchError::NotFound { .. }), "got: {err:?}");
}

#[tokio::test]
async fn forbidden_is_permanent_and_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri()).with_retry(3, 0);
    let err = client.get_profile(PROFILE_URL).await.unwrap_err();
    assert!(
        matches!(err, FetchError::UnexpectedStatus { status: 403, .. }),
        "got: {err:?}"
    );
}

#[tokio::test]
async fn server_error_is_retried_until_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/get-linkedin-profile"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/get-linkedin-profile"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "data": { "followers_count": 9 } })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri()).with_retry(2, 0);
    let profile = client.get_profile(PROFILE_URL).await.expect("retry succeeds");
    assert_eq!(profile.followers(), 9);
}

#[tokio::test]
async fn rate_limit_reports_retry_after() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "7"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.get_posts(PROFILE_URL).await.unwrap_err();
    assert!(
        matches!(err, FetchError::RateLimited { retry_after_secs: 7 }),
        "got: {err:?}"
    );
    assert!(err.is_transient());
}

#[tokio::test]
async fn malformed_body_is_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.get_posts(PROFILE_URL).await.unwrap_err();
    assert!(matches!(err, FetchError::Deserialize { .. }), "got: {err:?}");
}
