//! Shared fixtures for the integration tests

use leetcode_export::config::{Config, ThrottleConfig};
use leetcode_export::Credentials;
use serde_json::{json, Value};
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Configuration pointed at the mock server, with every wait removed
pub fn test_config(base_url: &str) -> Config {
    let mut config = Config::default();
    config.service.base_url = base_url.to_string();
    config.service.timeout_secs = 5;
    config.retry.backoff_base_ms = 0;
    config.throttle = ThrottleConfig::disabled();
    config
}

pub fn credentials() -> Credentials {
    Credentials::new("alice", "session-token", "csrf-token")
}

/// A 200 response wrapping `data` in the query API envelope
pub fn graphql_data(data: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "data": data }))
}

pub async fn mount_signed_in(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains("globalData"))
        .respond_with(graphql_data(json!({
            "userStatus": {"isSignedIn": true, "username": "alice"}
        })))
        .mount(server)
        .await;
}

pub async fn mount_profile(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains("userPublicProfile"))
        .respond_with(graphql_data(json!({
            "matchedUser": {
                "username": "alice",
                "submitStats": {
                    "acSubmissionNum": [
                        {"difficulty": "All", "count": 99},
                        {"difficulty": "Easy", "count": 2},
                        {"difficulty": "Medium", "count": 1},
                        {"difficulty": "Hard", "count": 0}
                    ]
                }
            }
        })))
        .mount(server)
        .await;
}

pub async fn mount_problem_list(server: &MockServer, pairs: Value) {
    Mock::given(method("GET"))
        .and(path("/api/problems/algorithms/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user_name": "alice",
            "stat_status_pairs": pairs
        })))
        .mount(server)
        .await;
}

pub async fn mount_question(server: &MockServer, slug: &str, question: Value) {
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains(format!(r#""titleSlug":"{}""#, slug)))
        .respond_with(graphql_data(json!({ "question": question })))
        .mount(server)
        .await;
}

pub async fn mount_submissions(server: &MockServer, slug: &str, dump: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/api/submissions/{}/", slug)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "submissions_dump": dump,
            "has_next": false,
            "last_key": ""
        })))
        .mount(server)
        .await;
}

/// One entry of the legacy problem list
pub fn list_entry(slug: &str, title: Option<&str>, status: Option<&str>, level: u8) -> Value {
    json!({
        "stat": {
            "question__title": title,
            "question__title_slug": slug,
            "frontend_question_id": 1
        },
        "status": status,
        "difficulty": {"level": level},
        "paid_only": false
    })
}

pub fn submission(id: u64, lang: &str, timestamp: i64, status: &str, code: Option<&str>) -> Value {
    json!({
        "id": id,
        "lang": lang,
        "timestamp": timestamp.to_string(),
        "status_display": status,
        "runtime": "4 ms",
        "memory": "2.1 MB",
        "code": code
    })
}
