//! Latest-accepted-submission-per-language selection

use crate::client::api::RawSubmission;
use std::collections::HashMap;

/// Status label of a fully correct submission
pub const ACCEPTED: &str = "Accepted";

/// Keeps one accepted submission per language: the one with the greatest
/// timestamp
///
/// Non-accepted submissions are dropped. On equal timestamps the submission
/// encountered last wins. Languages appear in the order they were first
/// seen among accepted submissions.
pub fn latest_accepted_per_language<I>(submissions: I) -> Vec<RawSubmission>
where
    I: IntoIterator<Item = RawSubmission>,
{
    let mut kept: Vec<RawSubmission> = Vec::new();
    let mut by_language: HashMap<String, usize> = HashMap::new();

    for submission in submissions {
        if submission.status_display != ACCEPTED {
            continue;
        }

        match by_language.get(&submission.lang) {
            Some(&index) => {
                if submission.timestamp >= kept[index].timestamp {
                    kept[index] = submission;
                }
            }
            None => {
                by_language.insert(submission.lang.clone(), kept.len());
                kept.push(submission);
            }
        }
    }

    kept
}
