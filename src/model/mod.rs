//! Data model for an export run
//!
//! This module contains the immutable credentials value and the types that
//! make up the exported document.

mod credentials;
mod export;

pub use credentials::Credentials;
pub use export::{
    difficulty_from_level, known_difficulty, title_from_slug, ExportDocument, ProblemDetail,
    ProfileStats, SolvedQuestion, SubmissionRecord, CODE_UNAVAILABLE, UNKNOWN_DIFFICULTY,
};
