//! Request payloads and response shapes of the remote APIs
//!
//! The structured query API answers with a `{ data, errors }` envelope; the
//! legacy REST API returns fixed-shape documents. Only the fields the export
//! needs are declared, everything else is ignored by serde.

use serde::{Deserialize, Deserializer};
use serde_json::{json, Value};

pub const USER_STATUS_QUERY: &str = r#"
query globalData {
    userStatus {
        userId
        isSignedIn
        username
    }
}
"#;

pub const PROFILE_QUERY: &str = r#"
query userPublicProfile($username: String!) {
    matchedUser(username: $username) {
        username
        submitStats: submitStatsGlobal {
            acSubmissionNum {
                difficulty
                count
            }
        }
    }
}
"#;

pub const QUESTION_QUERY: &str = r#"
query questionData($titleSlug: String!) {
    question(titleSlug: $titleSlug) {
        questionId
        questionFrontendId
        title
        content
        difficulty
        isPaidOnly
        topicTags {
            name
        }
    }
}
"#;

pub fn user_status_payload() -> Value {
    json!({ "operationName": "globalData", "query": USER_STATUS_QUERY, "variables": {} })
}

pub fn profile_payload(username: &str) -> Value {
    json!({
        "operationName": "userPublicProfile",
        "query": PROFILE_QUERY,
        "variables": { "username": username },
    })
}

pub fn question_payload(slug: &str) -> Value {
    json!({
        "operationName": "questionData",
        "query": QUESTION_QUERY,
        "variables": { "titleSlug": slug },
    })
}

/// Structured query response envelope
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

impl<T> GraphQlResponse<T> {
    /// Logs reported query errors and hands back the data part
    pub fn into_data(self, context: &str) -> Option<T> {
        for error in &self.errors {
            tracing::warn!("Query error for {}: {}", context, error.message);
        }
        self.data
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStatusData {
    pub user_status: Option<UserStatus>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStatus {
    #[serde(default)]
    pub is_signed_in: bool,
    pub username: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileData {
    pub matched_user: Option<MatchedUser>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchedUser {
    pub submit_stats: SubmitStats,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitStats {
    #[serde(default)]
    pub ac_submission_num: Vec<DifficultyCount>,
}

#[derive(Debug, Deserialize)]
pub struct DifficultyCount {
    pub difficulty: String,
    pub count: u32,
}

#[derive(Debug, Deserialize)]
pub struct QuestionData {
    pub question: Option<Question>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub title: Option<String>,
    pub content: Option<String>,
    pub difficulty: Option<String>,
    #[serde(default)]
    pub is_paid_only: bool,
    #[serde(default)]
    pub topic_tags: Vec<TopicTag>,
}

#[derive(Debug, Deserialize)]
pub struct TopicTag {
    pub name: String,
}

/// Legacy problem list
#[derive(Debug, Deserialize)]
pub struct ProblemList {
    #[serde(default)]
    pub stat_status_pairs: Vec<StatStatusPair>,
}

#[derive(Debug, Deserialize)]
pub struct StatStatusPair {
    pub stat: QuestionStat,
    pub status: Option<String>,
    #[serde(default)]
    pub difficulty: DifficultyLevel,
}

impl StatStatusPair {
    pub fn is_accepted(&self) -> bool {
        self.status.as_deref() == Some("ac")
    }
}

#[derive(Debug, Deserialize)]
pub struct QuestionStat {
    #[serde(rename = "question__title")]
    pub title: Option<String>,
    #[serde(rename = "question__title_slug")]
    pub slug: String,
    pub frontend_question_id: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DifficultyLevel {
    #[serde(default)]
    pub level: u8,
}

/// One page of the legacy submissions dump
#[derive(Debug, Deserialize)]
pub struct SubmissionPage {
    #[serde(default)]
    pub submissions_dump: Vec<RawSubmission>,
    #[serde(default)]
    pub has_next: bool,
    pub last_key: Option<String>,
}

/// A submission exactly as the legacy API reports it
#[derive(Debug, Clone, Deserialize)]
pub struct RawSubmission {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub lang: String,
    #[serde(deserialize_with = "number_or_string")]
    pub timestamp: i64,
    #[serde(default)]
    pub status_display: String,
    pub runtime: Option<String>,
    pub memory: Option<String>,
    pub code: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Loose {
    Number(i64),
    Text(String),
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Loose::deserialize(deserializer)? {
        Loose::Number(n) => n.to_string(),
        Loose::Text(s) => s,
    })
}

fn number_or_string<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match Loose::deserialize(deserializer)? {
        Loose::Number(n) => Ok(n),
        Loose::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}
