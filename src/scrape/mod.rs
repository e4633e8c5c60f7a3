//! Scraping module for rendered pages and problem markup
//!
//! This module handles:
//! - Normalizing problem markup into plain text
//! - Extracting problem metadata and submission code from rendered pages
//! - The scrape fallback used when the structured API cannot supply a record

mod extractor;
mod fallback;
mod normalize;

pub use extractor::{HtmlExtractor, PageExtractor, ScrapedProblem};
pub use fallback::PageScraper;
pub use normalize::{collapse_whitespace, normalize};
