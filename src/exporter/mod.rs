//! Exporter module: the data-acquisition and reconciliation pipeline
//!
//! This module contains the run coordinator and the merge step that
//! reduces a problem's submissions to the latest accepted one per language.

mod coordinator;
mod merge;

pub use coordinator::{ExportOutcome, Exporter, ProblemDetails, ProblemMetadata, RunStats};
pub use merge::{latest_accepted_per_language, ACCEPTED};
