//! HTTP transport implementation
//!
//! This module issues every request the exporter makes, including:
//! - Building the HTTP client with the configured user agent and timeouts
//! - Attaching session credentials to each request
//! - Retrying network-level failures with exponential delays
//! - Classifying response statuses into the error taxonomy
//!
//! # Status Handling
//!
//! | Condition | Action |
//! |-----------|--------|
//! | HTTP 200 | Return body immediately |
//! | HTTP 403 | Immediate → AuthenticationFailure, never retried |
//! | HTTP 429 | Immediate → RateLimited, left to the backoff coordinator |
//! | Other status | Immediate → RequestFailure with truncated body |
//! | Timeout / connection error | Retry up to the bound, `base * 2^attempt` delay |
//! | Retries exhausted | NetworkExhausted |

use crate::client::Endpoints;
use crate::config::{Config, RetryConfig, ServiceConfig};
use crate::model::Credentials;
use crate::{ExportError, Result};
use reqwest::header::{ACCEPT, COOKIE, REFERER};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use url::Url;

/// Characters of an error body kept for diagnostics
const ERROR_BODY_LIMIT: usize = 200;

const JSON_ACCEPT: &str = "application/json, text/javascript, */*; q=0.01";
const HTML_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml";

/// Builds an HTTP client with proper configuration
///
/// Credentials are attached per request, not to the client.
pub fn build_http_client(config: &ServiceConfig) -> std::result::Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Request sender shared by every stage of the export
#[derive(Debug, Clone)]
pub struct Transport {
    client: Client,
    endpoints: Endpoints,
    retry: RetryConfig,
}

impl Transport {
    /// Creates a transport from the service and retry configuration
    pub fn new(config: &Config) -> Result<Self> {
        let client = build_http_client(&config.service)?;
        let endpoints = Endpoints::new(&config.service.base_url)?;

        Ok(Self {
            client,
            endpoints,
            retry: config.retry.clone(),
        })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub fn retry_policy(&self) -> &RetryConfig {
        &self.retry
    }

    /// Sends a JSON API request and decodes the response body
    ///
    /// A payload turns the request into a POST with a JSON body; without one
    /// a GET is issued.
    ///
    /// # Returns
    ///
    /// * `Ok(T)` - The decoded body of a 200 response
    /// * `Err(ExportError)` - Classified failure, see the module table
    pub async fn send<T: DeserializeOwned>(
        &self,
        url: &Url,
        payload: Option<&Value>,
        credentials: &Credentials,
    ) -> Result<T> {
        let body = self.execute(url, payload, JSON_ACCEPT, credentials).await?;
        serde_json::from_str(&body).map_err(|source| ExportError::Parse {
            url: url.to_string(),
            source,
        })
    }

    /// Fetches a rendered HTML page
    pub async fn fetch_page(&self, url: &Url, credentials: &Credentials) -> Result<String> {
        self.execute(url, None, HTML_ACCEPT, credentials).await
    }

    async fn execute(
        &self,
        url: &Url,
        payload: Option<&Value>,
        accept: &str,
        credentials: &Credentials,
    ) -> Result<String> {
        let max_attempts = self.retry.max_network_attempts.max(1);
        let mut attempt = 0;

        loop {
            attempt += 1;
            tracing::debug!("Request attempt {}/{}: {}", attempt, max_attempts, url);

            match self.attempt(url, payload, accept, credentials).await {
                Ok((status, body)) => return classify_response(url, status, body),
                Err(e) if e.is_builder() => return Err(ExportError::Reqwest(e)),
                Err(e) => {
                    if attempt >= max_attempts {
                        return Err(ExportError::NetworkExhausted {
                            url: url.to_string(),
                            attempts: attempt,
                            source: e,
                        });
                    }

                    let delay = self.retry.delay_for(attempt);
                    tracing::warn!(
                        "Request to {} failed ({}), retrying in {:?}",
                        url,
                        e,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }

    /// One network round trip; reading the body counts as part of it
    async fn attempt(
        &self,
        url: &Url,
        payload: Option<&Value>,
        accept: &str,
        credentials: &Credentials,
    ) -> std::result::Result<(StatusCode, String), reqwest::Error> {
        let request = match payload {
            Some(body) => self.client.post(url.clone()).json(body),
            None => self.client.get(url.clone()),
        };

        let response = request
            .header(ACCEPT, accept)
            .header(REFERER, self.endpoints.base().as_str())
            .header(COOKIE, credentials.cookie_header())
            .header("X-CSRFToken", credentials.csrf_token())
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        Ok((status, body))
    }
}

/// Maps a completed response onto a body or a classified error
fn classify_response(url: &Url, status: StatusCode, body: String) -> Result<String> {
    match status {
        StatusCode::OK => Ok(body),
        StatusCode::FORBIDDEN => Err(ExportError::AuthenticationFailure(format!(
            "{} answered 403; the session cookie or CSRF token is invalid or expired",
            url
        ))),
        StatusCode::TOO_MANY_REQUESTS => Err(ExportError::RateLimited {
            url: url.to_string(),
        }),
        other => {
            let snippet = truncate(&body, ERROR_BODY_LIMIT);
            tracing::debug!("Error response from {}: {}", url, snippet);
            Err(ExportError::RequestFailure {
                url: url.to_string(),
                status: other.as_u16(),
                body: snippet,
            })
        }
    }
}

fn truncate(body: &str, limit: usize) -> String {
    match body.char_indices().nth(limit) {
        Some((index, _)) => format!("{}...", &body[..index]),
        None => body.to_string(),
    }
}
