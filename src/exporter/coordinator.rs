//! Export coordinator - main pipeline orchestration logic
//!
//! This module drives an export run from start to finish:
//! - Authenticating the session
//! - Fetching profile statistics
//! - Enumerating solved problems
//! - Fetching submissions and metadata for each problem
//! - Assembling the export document
//!
//! Authentication and profile failures abort the run. Everything after that
//! only ever degrades the record being processed.

use crate::client::api::{
    self, GraphQlResponse, ProblemList, ProfileData, Question, QuestionData, RawSubmission,
    SubmissionPage, UserStatusData,
};
use crate::client::{with_backoff, Transport};
use crate::config::Config;
use crate::exporter::merge::latest_accepted_per_language;
use crate::model::{
    difficulty_from_level, known_difficulty, title_from_slug, Credentials, ExportDocument,
    ProblemDetail, ProfileStats, SolvedQuestion, SubmissionRecord, CODE_UNAVAILABLE,
    UNKNOWN_DIFFICULTY,
};
use crate::scrape::{normalize, HtmlExtractor, PageExtractor, PageScraper, ScrapedProblem};
use crate::{ExportError, Result};
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

const NOT_AVAILABLE: &str = "N/A";

/// Counters describing how a run went
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Problems written to the document
    pub problems: usize,

    /// Submissions kept across all problems
    pub submissions: usize,

    /// Submissions exported with the code placeholder
    pub code_unavailable: usize,

    /// Problems whose submissions could not be fetched
    pub submission_failures: usize,

    /// Problems described by the structured query API
    pub structured_details: usize,

    /// Problems described by the scraped page
    pub scraped_details: usize,

    /// Problems for which no metadata source answered
    pub defaulted_details: usize,
}

/// Result of a successful run
#[derive(Debug, Clone)]
pub struct ExportOutcome {
    pub document: ExportDocument,
    pub stats: RunStats,
}

/// Descriptive metadata for one problem, from whichever source answered
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProblemMetadata {
    pub title: Option<String>,
    pub description: String,
    pub difficulty: Option<String>,
    pub tags: Vec<String>,
}

impl ProblemMetadata {
    fn from_question(question: Question) -> Self {
        let mut tags: Vec<String> = Vec::with_capacity(question.topic_tags.len());
        for tag in question.topic_tags {
            if !tags.contains(&tag.name) {
                tags.push(tag.name);
            }
        }

        if question.is_paid_only && question.content.is_none() {
            tracing::debug!("Question content withheld (paid only)");
        }

        Self {
            title: question.title,
            description: normalize(question.content.as_deref().unwrap_or_default()),
            difficulty: question.difficulty,
            tags,
        }
    }

    fn from_scraped(scraped: ScrapedProblem) -> Self {
        Self {
            title: scraped.title,
            description: scraped.description.unwrap_or_default(),
            difficulty: scraped.difficulty,
            tags: scraped.tags,
        }
    }
}

/// Where a problem's metadata came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProblemDetails {
    Structured(ProblemMetadata),
    Scraped(ProblemMetadata),
    /// Neither the query API nor the page yielded anything
    Unavailable,
}

/// Main export coordinator
///
/// Owns the run's credentials and hands them by reference to every request.
pub struct Exporter<E = HtmlExtractor> {
    config: Config,
    credentials: Credentials,
    transport: Transport,
    scraper: PageScraper<E>,
}

impl Exporter<HtmlExtractor> {
    /// Creates an exporter that scrapes pages with [`HtmlExtractor`]
    pub fn new(config: Config, credentials: Credentials) -> Result<Self> {
        Self::with_extractor(config, credentials, HtmlExtractor)
    }
}

impl<E: PageExtractor> Exporter<E> {
    /// Creates an exporter with a custom page extractor
    pub fn with_extractor(config: Config, credentials: Credentials, extractor: E) -> Result<Self> {
        let transport = Transport::new(&config)?;

        Ok(Self {
            config,
            credentials,
            transport,
            scraper: PageScraper::new(extractor),
        })
    }

    /// Runs the whole export
    ///
    /// # Returns
    ///
    /// * `Ok(ExportOutcome)` - The document plus run counters
    /// * `Err(ExportError)` - Authentication or profile lookup failed
    pub async fn run(&self) -> Result<ExportOutcome> {
        tracing::info!("Fetching data for user: {}", self.credentials.username());

        self.authenticate().await?;
        let profile_stats = self.fetch_profile_stats().await?;
        let solved = self.enumerate_solved().await;

        let mut stats = RunStats::default();
        let mut problems = Vec::with_capacity(solved.len());
        let total = solved.len();

        for (index, question) in solved.iter().enumerate() {
            tracing::info!("Processing problem {}/{}: {}", index + 1, total, question.slug);

            let problem = self.process_problem(question, &mut stats).await;
            problems.push(problem);

            if index + 1 < total {
                self.throttle(index).await;
            }
        }

        stats.problems = problems.len();

        let document = ExportDocument {
            username: self.credentials.username().to_string(),
            exported_at: Utc::now(),
            profile_stats,
            problems,
        };

        Ok(ExportOutcome { document, stats })
    }

    /// Confirms that the session is signed in
    pub async fn authenticate(&self) -> Result<()> {
        let response: GraphQlResponse<UserStatusData> =
            self.query(&api::user_status_payload()).await?;

        match response
            .into_data("userStatus")
            .and_then(|data| data.user_status)
        {
            Some(status) if status.is_signed_in => {
                tracing::info!(
                    "API connection successful, signed in as {}",
                    status
                        .username
                        .as_deref()
                        .unwrap_or(self.credentials.username())
                );
                Ok(())
            }
            _ => Err(ExportError::AuthenticationFailure(
                "the session is not signed in".to_string(),
            )),
        }
    }

    /// Fetches accepted-problem counts and recomputes the total
    pub async fn fetch_profile_stats(&self) -> Result<ProfileStats> {
        let username = self.credentials.username();
        let response: GraphQlResponse<ProfileData> =
            self.query(&api::profile_payload(username)).await?;

        let user = response
            .into_data("matchedUser")
            .and_then(|data| data.matched_user)
            .ok_or_else(|| {
                ExportError::AuthenticationFailure(format!(
                    "no profile found for user '{}'; check that the credentials belong to it",
                    username
                ))
            })?;

        let stats = ProfileStats::from_counts(
            user.submit_stats
                .ac_submission_num
                .iter()
                .map(|entry| (entry.difficulty.as_str(), entry.count)),
        );

        tracing::info!(
            "Profile stats: {} solved ({} easy, {} medium, {} hard)",
            stats.total_solved,
            stats.easy,
            stats.medium,
            stats.hard
        );
        Ok(stats)
    }

    /// Lists every problem with an accepted status
    ///
    /// A failed listing is logged and yields an empty list.
    pub async fn enumerate_solved(&self) -> Vec<SolvedQuestion> {
        match self.fetch_problem_list().await {
            Ok(list) => {
                let solved = solved_questions(list);
                tracing::info!("Fetched {} solved questions", solved.len());
                solved
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to fetch solved questions ({:?}): {}",
                    e.kind(),
                    e
                );
                Vec::new()
            }
        }
    }

    /// Fetches the latest accepted submission per language for a problem
    ///
    /// Submissions without embedded code go through the scrape fallback;
    /// when that fails too the code placeholder is stored.
    pub async fn fetch_submissions(&self, slug: &str) -> Result<Vec<SubmissionRecord>> {
        let dump = self.fetch_submission_dump(slug).await?;
        let latest = latest_accepted_per_language(dump);

        let mut records = Vec::with_capacity(latest.len());
        for submission in latest {
            let source_code = match submission.code.filter(|code| !code.trim().is_empty()) {
                Some(code) => code,
                None => self
                    .scraper
                    .scrape_submission_code(&self.transport, &submission.id, &self.credentials)
                    .await
                    .unwrap_or_else(|| CODE_UNAVAILABLE.to_string()),
            };

            records.push(SubmissionRecord {
                language: submission.lang,
                timestamp: submission.timestamp,
                runtime: submission
                    .runtime
                    .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
                memory: submission
                    .memory
                    .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
                submission_id: submission.id,
                source_code,
                status: submission.status_display,
            });
        }

        Ok(records)
    }

    /// Fetches a problem's metadata, falling back to its rendered page
    pub async fn fetch_details(&self, slug: &str) -> ProblemDetails {
        match self.query_question(slug).await {
            Ok(Some(question)) => {
                return ProblemDetails::Structured(ProblemMetadata::from_question(question))
            }
            Ok(None) => tracing::info!(
                "Couldn't fetch problem details for {} via the query API, trying scraper",
                slug
            ),
            Err(e) => tracing::warn!(
                "Query for problem {} failed ({}), trying scraper",
                slug,
                e
            ),
        }

        let scraped = self
            .scraper
            .scrape_problem(&self.transport, slug, &self.credentials)
            .await;

        if scraped.is_empty() {
            ProblemDetails::Unavailable
        } else {
            ProblemDetails::Scraped(ProblemMetadata::from_scraped(scraped))
        }
    }

    /// Builds one problem record; never fails
    async fn process_problem(
        &self,
        question: &SolvedQuestion,
        stats: &mut RunStats,
    ) -> ProblemDetail {
        let slug = question.slug.as_str();

        let submissions = match self.fetch_submissions(slug).await {
            Ok(submissions) => submissions,
            Err(e) => {
                tracing::warn!(
                    "Error fetching submissions for {} ({:?}): {}",
                    slug,
                    e.kind(),
                    e
                );
                stats.submission_failures += 1;
                Vec::new()
            }
        };

        stats.submissions += submissions.len();
        stats.code_unavailable += submissions
            .iter()
            .filter(|s| s.source_code == CODE_UNAVAILABLE)
            .count();

        match self.fetch_details(slug).await {
            ProblemDetails::Structured(metadata) => {
                stats.structured_details += 1;
                assemble_problem(question, metadata, submissions)
            }
            ProblemDetails::Scraped(metadata) => {
                stats.scraped_details += 1;
                assemble_problem(question, metadata, submissions)
            }
            ProblemDetails::Unavailable => {
                tracing::warn!("No details available for {}, using defaults", slug);
                stats.defaulted_details += 1;
                defaulted_problem(question, submissions)
            }
        }
    }

    async fn fetch_problem_list(&self) -> Result<ProblemList> {
        let url = self.transport.endpoints().problem_list()?;
        self.call(&url, None).await
    }

    /// Collects every page of the submissions dump, up to the page cap
    async fn fetch_submission_dump(&self, slug: &str) -> Result<Vec<RawSubmission>> {
        let service = &self.config.service;
        let mut submissions = Vec::new();
        let mut last_key: Option<String> = None;

        for page_number in 1..=service.max_submission_pages {
            let url = self.transport.endpoints().submissions(
                slug,
                submissions.len(),
                service.submission_page_size,
                last_key.as_deref(),
            )?;

            let page: SubmissionPage = self.call(&url, None).await?;
            let fetched = page.submissions_dump.len();
            submissions.extend(page.submissions_dump);

            if !page.has_next || fetched == 0 {
                break;
            }
            if page_number == service.max_submission_pages {
                tracing::warn!(
                    "Stopped after {} submission pages for {}",
                    page_number,
                    slug
                );
            }
            last_key = page.last_key;
        }

        tracing::debug!("Fetched {} submissions for {}", submissions.len(), slug);
        Ok(submissions)
    }

    async fn query_question(&self, slug: &str) -> Result<Option<Question>> {
        let response: GraphQlResponse<QuestionData> =
            self.query(&api::question_payload(slug)).await?;
        Ok(response.into_data(slug).and_then(|data| data.question))
    }

    /// Sends a structured query; an envelope with neither data nor errors
    /// is an upstream failure
    async fn query<T: DeserializeOwned>(&self, payload: &Value) -> Result<GraphQlResponse<T>> {
        let url = self.transport.endpoints().graphql()?;
        let response: GraphQlResponse<T> = self.call(&url, Some(payload)).await?;

        if response.data.is_none() && response.errors.is_empty() {
            return Err(ExportError::Upstream {
                url: url.to_string(),
                message: "response carried neither data nor errors".to_string(),
            });
        }
        Ok(response)
    }

    /// Sends one API request under the rate-limit backoff
    async fn call<T: DeserializeOwned>(&self, url: &Url, payload: Option<&Value>) -> Result<T> {
        let transport = &self.transport;
        let credentials = &self.credentials;

        with_backoff(transport.retry_policy(), move || {
            transport.send(url, payload, credentials)
        })
        .await
    }

    async fn throttle(&self, index: usize) {
        let delay = self.config.throttle.delay_after(index);
        if !delay.is_zero() {
            tracing::debug!("Waiting {:?} before the next problem", delay);
            tokio::time::sleep(delay).await;
        }
    }
}

/// Keeps the accepted entries of the legacy problem list
fn solved_questions(list: ProblemList) -> Vec<SolvedQuestion> {
    list.stat_status_pairs
        .into_iter()
        .filter(|pair| pair.is_accepted())
        .map(|pair| SolvedQuestion {
            slug: pair.stat.slug,
            title: pair.stat.title,
            difficulty: difficulty_from_level(pair.difficulty.level).to_string(),
            frontend_id: pair.stat.frontend_question_id,
        })
        .collect()
}

/// Merges enumeration data, metadata and submissions into one record
///
/// Title and difficulty prefer the metadata source, then the enumeration
/// record, then the slug-derived title and `Unknown`.
fn assemble_problem(
    question: &SolvedQuestion,
    metadata: ProblemMetadata,
    submissions: Vec<SubmissionRecord>,
) -> ProblemDetail {
    let title = non_blank(metadata.title)
        .or_else(|| non_blank(question.title.clone()))
        .unwrap_or_else(|| title_from_slug(&question.slug));

    let difficulty = known_difficulty(metadata.difficulty.as_deref())
        .or_else(|| known_difficulty(Some(question.difficulty.as_str())))
        .unwrap_or(UNKNOWN_DIFFICULTY)
        .to_string();

    ProblemDetail {
        slug: question.slug.clone(),
        frontend_id: question.frontend_id,
        title,
        difficulty,
        description: metadata.description,
        tags: metadata.tags,
        submissions,
    }
}

/// Record for a problem no detail source answered for
fn defaulted_problem(
    question: &SolvedQuestion,
    submissions: Vec<SubmissionRecord>,
) -> ProblemDetail {
    ProblemDetail {
        slug: question.slug.clone(),
        frontend_id: question.frontend_id,
        title: title_from_slug(&question.slug),
        difficulty: UNKNOWN_DIFFICULTY.to_string(),
        description: String::new(),
        tags: Vec::new(),
        submissions,
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
