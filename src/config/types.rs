use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for the exporter
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub credentials: CredentialsConfig,
    pub service: ServiceConfig,
    pub retry: RetryConfig,
    pub throttle: ThrottleConfig,
    pub output: OutputConfig,
}

/// Session credentials copied from a signed-in browser
///
/// Every field is optional in the file; command-line flags fill the gaps.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CredentialsConfig {
    pub username: Option<String>,

    /// Value of the `LEETCODE_SESSION` cookie
    pub session: Option<String>,

    /// Value of the `csrftoken` cookie
    #[serde(rename = "csrf-token")]
    pub csrf_token: Option<String>,
}

/// Remote service configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Root URL every endpoint is resolved against
    #[serde(rename = "base-url")]
    pub base_url: String,

    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Total request timeout (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,

    /// Submissions requested per page of the legacy submissions dump
    #[serde(rename = "submission-page-size")]
    pub submission_page_size: u32,

    /// Upper bound on submission pages followed per problem
    #[serde(rename = "max-submission-pages")]
    pub max_submission_pages: u32,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://leetcode.com".to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
                .to_string(),
            timeout_secs: 30,
            connect_timeout_secs: 10,
            submission_page_size: 20,
            max_submission_pages: 10,
        }
    }
}

/// Retry bounds for the transport and the rate-limit backoff
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Attempts per request when the network itself fails
    #[serde(rename = "max-network-attempts")]
    pub max_network_attempts: u32,

    /// Attempts per call while the service keeps answering 429
    #[serde(rename = "max-rate-limit-attempts")]
    pub max_rate_limit_attempts: u32,

    /// Base of the `base * 2^attempt` delay (milliseconds)
    #[serde(rename = "backoff-base-ms")]
    pub backoff_base_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_network_attempts: 3,
            max_rate_limit_attempts: 5,
            backoff_base_ms: 1000,
        }
    }
}

impl RetryConfig {
    /// Delay before the retry that follows failed attempt number `attempt` (1-based)
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 1u64 << attempt.min(20);
        Duration::from_millis(self.backoff_base_ms.saturating_mul(factor))
    }
}

/// Proactive pacing between problems
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ThrottleConfig {
    /// Sleep between two consecutive problems (milliseconds)
    #[serde(rename = "problem-delay-ms")]
    pub problem_delay_ms: u64,

    /// Every this many problems an extra pause is added (0 disables it)
    #[serde(rename = "pause-every")]
    pub pause_every: u32,

    #[serde(rename = "pause-ms")]
    pub pause_ms: u64,
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            problem_delay_ms: 1000,
            pause_every: 5,
            pause_ms: 1000,
        }
    }
}

impl ThrottleConfig {
    /// Delay to apply after the problem at zero-based `index`
    pub fn delay_after(&self, index: usize) -> Duration {
        let mut millis = self.problem_delay_ms;
        if self.pause_every > 0 && (index + 1) % self.pause_every as usize == 0 {
            millis = millis.saturating_add(self.pause_ms);
        }
        Duration::from_millis(millis)
    }

    /// A throttle that never sleeps
    pub fn disabled() -> Self {
        Self {
            problem_delay_ms: 0,
            pause_every: 0,
            pause_ms: 0,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Destination file; standard output when unset
    pub path: Option<String>,

    /// Pretty-print the JSON document
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: None,
            pretty: true,
        }
    }
}
