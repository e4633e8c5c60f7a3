//! Run summary reporting
//!
//! This module logs what a finished run produced and which records had to
//! be degraded along the way.

use crate::exporter::RunStats;
use crate::model::ExportDocument;

/// Logs the end-of-run summary
pub fn log_summary(document: &ExportDocument, stats: &RunStats) {
    tracing::info!("=== Export Summary ===");
    tracing::info!(
        "Profile: {} solved ({} easy, {} medium, {} hard)",
        document.profile_stats.total_solved,
        document.profile_stats.easy,
        document.profile_stats.medium,
        document.profile_stats.hard
    );
    tracing::info!(
        "Problems exported: {} ({} submissions)",
        document.problems.len(),
        document.submission_count()
    );
    tracing::info!(
        "Details: {} from query API, {} scraped, {} defaulted",
        stats.structured_details,
        stats.scraped_details,
        stats.defaulted_details
    );

    if stats.submission_failures > 0 {
        tracing::warn!(
            "Submissions could not be fetched for {} problem(s)",
            stats.submission_failures
        );
    }
    if stats.code_unavailable > 0 {
        tracing::warn!(
            "Source code unavailable for {} submission(s)",
            stats.code_unavailable
        );
    }

    let degraded = degraded_records(stats);
    if degraded > 0 {
        tracing::warn!("{} record(s) exported with placeholder values", degraded);
    }
}

/// Number of records that were exported with placeholder values
pub fn degraded_records(stats: &RunStats) -> usize {
    stats.submission_failures + stats.code_unavailable + stats.defaulted_details
}
