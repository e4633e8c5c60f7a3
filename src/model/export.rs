//! Exported document types
//!
//! These types form the JSON document written at the end of a run. The
//! document is assembled problem by problem and never modified after the
//! exporter hands it over.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Difficulty label used when no source could tell
pub const UNKNOWN_DIFFICULTY: &str = "Unknown";

/// Placeholder stored when a submission's source code cannot be retrieved
pub const CODE_UNAVAILABLE: &str = "// code unavailable";

/// Accepted-problem counts by difficulty tier
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProfileStats {
    pub total_solved: u32,
    pub easy: u32,
    pub medium: u32,
    pub hard: u32,
}

impl ProfileStats {
    /// Builds the stats from per-difficulty counts
    ///
    /// Only the Easy, Medium and Hard tiers are read; a pre-summed `All`
    /// entry is ignored and the total is recomputed from the tiers.
    pub fn from_counts<'a, I>(counts: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, u32)>,
    {
        let mut stats = ProfileStats::default();
        for (difficulty, count) in counts {
            match difficulty {
                "Easy" => stats.easy = count,
                "Medium" => stats.medium = count,
                "Hard" => stats.hard = count,
                _ => {}
            }
        }
        stats.total_solved = stats
            .easy
            .saturating_add(stats.medium)
            .saturating_add(stats.hard);
        stats
    }
}

/// One entry of the solved-problem enumeration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolvedQuestion {
    pub slug: String,
    pub title: Option<String>,
    pub difficulty: String,
    pub frontend_id: Option<u32>,
}

/// Latest accepted submission for one language
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionRecord {
    pub language: String,
    pub timestamp: i64,
    pub runtime: String,
    pub memory: String,
    pub submission_id: String,
    #[serde(rename = "code")]
    pub source_code: String,
    pub status: String,
}

/// Everything exported for one solved problem
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProblemDetail {
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frontend_id: Option<u32>,
    pub title: String,
    pub difficulty: String,
    pub description: String,
    pub tags: Vec<String>,
    pub submissions: Vec<SubmissionRecord>,
}

/// The complete export
#[derive(Debug, Clone, Serialize)]
pub struct ExportDocument {
    pub username: String,
    pub exported_at: DateTime<Utc>,
    pub profile_stats: ProfileStats,
    pub problems: Vec<ProblemDetail>,
}

impl ExportDocument {
    /// Total number of submissions across all problems
    pub fn submission_count(&self) -> usize {
        self.problems.iter().map(|p| p.submissions.len()).sum()
    }
}

/// Derives a display title from a slug: `two-sum` becomes `Two Sum`
pub fn title_from_slug(slug: &str) -> String {
    slug.split('-')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Maps the legacy API's numeric difficulty level onto its label
pub fn difficulty_from_level(level: u8) -> &'static str {
    match level {
        1 => "Easy",
        2 => "Medium",
        3 => "Hard",
        _ => UNKNOWN_DIFFICULTY,
    }
}

/// Treats blank and `Unknown` difficulty labels as missing
pub fn known_difficulty(label: Option<&str>) -> Option<&str> {
    label
        .map(str::trim)
        .filter(|l| !l.is_empty() && *l != UNKNOWN_DIFFICULTY)
}
