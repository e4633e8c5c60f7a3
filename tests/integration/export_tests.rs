//! End-to-end export runs against a mock server

use crate::common::{
    credentials, graphql_data, list_entry, mount_problem_list, mount_profile, mount_question,
    mount_signed_in, mount_submissions, submission, test_config,
};
use leetcode_export::exporter::ProblemDetails;
use leetcode_export::model::CODE_UNAVAILABLE;
use leetcode_export::{ErrorKind, Exporter};
use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const LRU_PAGE: &str = r#"
<html>
<head><title>LRU Cache - LeetCode</title></head>
<body>
    <div diff="Medium"></div>
    <div class="question-content"><p>Design a   cache.</p><pre>Input: []</pre></div>
    <div class="tag-v2">Design</div>
    <div class="tag-v2">Hash Table</div>
</body>
</html>
"#;

const SUBMISSION_PAGE: &str = r#"
<html><body>
<div class="CodeMirror-code">
    <div><pre class="CodeMirror-line"><span>int main() {</span></pre></div>
    <div><pre class="CodeMirror-line"><span>    return 0;</span></pre></div>
    <div><pre class="CodeMirror-line"><span>}</span></pre></div>
</div>
</body></html>
"#;

#[tokio::test]
async fn test_full_export() {
    let mock_server = MockServer::start().await;
    mount_signed_in(&mock_server).await;
    mount_profile(&mock_server).await;
    mount_problem_list(
        &mock_server,
        json!([
            list_entry("two-sum", Some("Two Sum"), Some("ac"), 1),
            list_entry("median-of-two-sorted-arrays", Some("Median"), Some("notac"), 3),
            list_entry("lru-cache", Some("LRU Cache"), Some("ac"), 2),
        ]),
    )
    .await;

    mount_submissions(
        &mock_server,
        "two-sum",
        json!([
            submission(3, "python3", 300, "Wrong Answer", Some("wrong")),
            submission(2, "python3", 200, "Accepted", Some("newer python")),
            submission(1, "python3", 100, "Accepted", Some("older python")),
            submission(4, "cpp", 150, "Accepted", Some("cpp solution")),
        ]),
    )
    .await;
    mount_question(
        &mock_server,
        "two-sum",
        json!({
            "title": "Two Sum",
            "content": "<p>Given an array of   integers.</p>",
            "difficulty": "Easy",
            "isPaidOnly": false,
            "topicTags": [{"name": "Array"}, {"name": "Hash Table"}]
        }),
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/api/submissions/lru-cache/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;
    mount_question(&mock_server, "lru-cache", json!(null)).await;
    Mock::given(method("GET"))
        .and(path("/problems/lru-cache/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(LRU_PAGE))
        .mount(&mock_server)
        .await;

    let exporter = Exporter::new(test_config(&mock_server.uri()), credentials()).unwrap();
    let outcome = exporter.run().await.unwrap();
    let document = outcome.document;

    assert_eq!(document.username, "alice");
    assert_eq!(document.profile_stats.total_solved, 3);
    assert_eq!(document.profile_stats.easy, 2);
    assert_eq!(document.problems.len(), 2);

    let two_sum = &document.problems[0];
    assert_eq!(two_sum.slug, "two-sum");
    assert_eq!(two_sum.title, "Two Sum");
    assert_eq!(two_sum.difficulty, "Easy");
    assert_eq!(two_sum.description, "Given an array of integers.");
    assert_eq!(two_sum.tags, vec!["Array", "Hash Table"]);
    assert_eq!(two_sum.submissions.len(), 2);
    assert_eq!(two_sum.submissions[0].language, "python3");
    assert_eq!(two_sum.submissions[0].submission_id, "2");
    assert_eq!(two_sum.submissions[0].source_code, "newer python");
    assert_eq!(two_sum.submissions[1].language, "cpp");

    let lru = &document.problems[1];
    assert_eq!(lru.slug, "lru-cache");
    assert_eq!(lru.title, "LRU Cache");
    assert_eq!(lru.difficulty, "Medium");
    assert_eq!(lru.description, "Design a cache.");
    assert_eq!(lru.tags, vec!["Design", "Hash Table"]);
    assert!(lru.submissions.is_empty());

    let stats = outcome.stats;
    assert_eq!(stats.problems, 2);
    assert_eq!(stats.submissions, 2);
    assert_eq!(stats.submission_failures, 1);
    assert_eq!(stats.structured_details, 1);
    assert_eq!(stats.scraped_details, 1);
    assert_eq!(stats.defaulted_details, 0);
}

#[tokio::test]
async fn test_enumeration_failure_yields_empty_export() {
    let mock_server = MockServer::start().await;
    mount_signed_in(&mock_server).await;
    mount_profile(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/api/problems/algorithms/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let exporter = Exporter::new(test_config(&mock_server.uri()), credentials()).unwrap();
    let outcome = exporter.run().await.unwrap();

    assert!(outcome.document.problems.is_empty());
    assert_eq!(outcome.document.profile_stats.total_solved, 3);
    assert_eq!(outcome.document.profile_stats.medium, 1);
}

#[tokio::test]
async fn test_missing_details_use_defaults() {
    let mock_server = MockServer::start().await;
    mount_signed_in(&mock_server).await;
    mount_profile(&mock_server).await;
    mount_problem_list(
        &mock_server,
        json!([list_entry(
            "merge-k-sorted-lists",
            Some("Merge k Sorted Lists"),
            Some("ac"),
            3
        )]),
    )
    .await;
    mount_submissions(&mock_server, "merge-k-sorted-lists", json!([])).await;
    mount_question(&mock_server, "merge-k-sorted-lists", json!(null)).await;

    let exporter = Exporter::new(test_config(&mock_server.uri()), credentials()).unwrap();

    assert_eq!(
        exporter.fetch_details("merge-k-sorted-lists").await,
        ProblemDetails::Unavailable
    );

    let outcome = exporter.run().await.unwrap();
    let problem = &outcome.document.problems[0];

    assert_eq!(problem.title, "Merge K Sorted Lists");
    assert_eq!(problem.description, "");
    assert_eq!(problem.difficulty, "Unknown");
    assert!(problem.tags.is_empty());
    assert_eq!(outcome.stats.defaulted_details, 1);
}

#[tokio::test]
async fn test_empty_query_envelope_falls_back_to_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains(r#""titleSlug":"lru-cache""#))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/problems/lru-cache/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(LRU_PAGE))
        .expect(1)
        .mount(&mock_server)
        .await;

    let exporter = Exporter::new(test_config(&mock_server.uri()), credentials()).unwrap();

    match exporter.fetch_details("lru-cache").await {
        ProblemDetails::Scraped(metadata) => {
            assert_eq!(metadata.title.as_deref(), Some("LRU Cache"));
            assert_eq!(metadata.difficulty.as_deref(), Some("Medium"));
        }
        other => panic!("expected scraped details, got {other:?}"),
    }
}

#[tokio::test]
async fn test_missing_code_is_scraped_or_marked_unavailable() {
    let mock_server = MockServer::start().await;
    mount_submissions(
        &mock_server,
        "two-sum",
        json!([
            submission(501, "cpp", 100, "Accepted", None),
            submission(502, "java", 100, "Accepted", Some("   ")),
        ]),
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/submissions/detail/501/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(SUBMISSION_PAGE))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/submissions/detail/502/"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    let exporter = Exporter::new(test_config(&mock_server.uri()), credentials()).unwrap();
    let submissions = exporter.fetch_submissions("two-sum").await.unwrap();

    assert_eq!(submissions.len(), 2);
    assert_eq!(
        submissions[0].source_code,
        "int main() {\n    return 0;\n}"
    );
    assert_eq!(submissions[1].source_code, CODE_UNAVAILABLE);
}

#[tokio::test]
async fn test_submission_pages_are_followed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/submissions/two-sum/"))
        .and(query_param("offset", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "submissions_dump": [
                submission(1, "rust", 100, "Accepted", Some("first")),
                submission(2, "rust", 200, "Accepted", Some("second")),
            ],
            "has_next": true,
            "last_key": "page-2"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/submissions/two-sum/"))
        .and(query_param("offset", "2"))
        .and(query_param("lastkey", "page-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "submissions_dump": [
                submission(3, "rust", 300, "Accepted", Some("third")),
            ],
            "has_next": false,
            "last_key": null
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let exporter = Exporter::new(test_config(&mock_server.uri()), credentials()).unwrap();
    let submissions = exporter.fetch_submissions("two-sum").await.unwrap();

    assert_eq!(submissions.len(), 1);
    assert_eq!(submissions[0].source_code, "third");
    assert_eq!(submissions[0].timestamp, 300);
}

#[tokio::test]
async fn test_authentication_failure_aborts_run() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains("globalData"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/problems/algorithms/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"stat_status_pairs": []})))
        .expect(0)
        .mount(&mock_server)
        .await;

    let exporter = Exporter::new(test_config(&mock_server.uri()), credentials()).unwrap();
    let err = exporter.run().await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::AuthenticationFailure);
}

#[tokio::test]
async fn test_unknown_profile_is_fatal() {
    let mock_server = MockServer::start().await;
    mount_signed_in(&mock_server).await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains("userPublicProfile"))
        .respond_with(graphql_data(json!({ "matchedUser": null })))
        .mount(&mock_server)
        .await;

    let exporter = Exporter::new(test_config(&mock_server.uri()), credentials()).unwrap();
    let err = exporter.run().await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::AuthenticationFailure);
}
