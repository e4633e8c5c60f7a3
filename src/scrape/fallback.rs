//! Scrape fallback for records the structured API could not supply
//!
//! Both operations swallow their failures: a page that cannot be fetched or
//! parsed degrades to an empty [`ScrapedProblem`] or to `None`. The caller
//! decides which defaults a missing value turns into.

use crate::client::Transport;
use crate::model::Credentials;
use crate::scrape::extractor::{PageExtractor, ScrapedProblem};

/// Fetches rendered pages and runs them through a [`PageExtractor`]
#[derive(Debug, Clone, Default)]
pub struct PageScraper<E> {
    extractor: E,
}

impl<E: PageExtractor> PageScraper<E> {
    pub fn new(extractor: E) -> Self {
        Self { extractor }
    }

    /// Scrapes a problem's public page
    ///
    /// Returns whatever the page yielded; an unreachable page or a
    /// non-success status yields an empty [`ScrapedProblem`].
    pub async fn scrape_problem(
        &self,
        transport: &Transport,
        slug: &str,
        credentials: &Credentials,
    ) -> ScrapedProblem {
        let url = match transport.endpoints().problem_page(slug) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!("Cannot build problem page URL for {}: {}", slug, e);
                return ScrapedProblem::default();
            }
        };

        match transport.fetch_page(&url, credentials).await {
            Ok(html) => {
                let scraped = self.extractor.extract_problem(&html);
                if scraped.is_empty() {
                    tracing::warn!("Problem page for {} yielded no fields", slug);
                }
                scraped
            }
            Err(e) => {
                tracing::warn!("Error scraping problem {}: {}", slug, e);
                ScrapedProblem::default()
            }
        }
    }

    /// Scrapes source code from a submission detail page
    ///
    /// Returns `None` when the page cannot be fetched or holds no code.
    pub async fn scrape_submission_code(
        &self,
        transport: &Transport,
        submission_id: &str,
        credentials: &Credentials,
    ) -> Option<String> {
        let url = transport.endpoints().submission_page(submission_id).ok()?;

        let html = match transport.fetch_page(&url, credentials).await {
            Ok(html) => html,
            Err(e) => {
                tracing::warn!("Failed to fetch submission {}: {}", submission_id, e);
                return None;
            }
        };

        let code = self.extractor.extract_submission_code(&html);
        if code.is_none() {
            tracing::warn!("No code found for submission {}", submission_id);
        }
        code
    }
}
