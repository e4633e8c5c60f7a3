use crate::config::types::{Config, RetryConfig, ServiceConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_service_config(&config.service)?;
    validate_retry_config(&config.retry)?;
    Ok(())
}

/// Validates remote service configuration
fn validate_service_config(config: &ServiceConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url).map_err(|e| {
        ConfigError::InvalidUrl(format!("Invalid base-url '{}': {}", config.base_url, e))
    })?;

    if url.scheme() != "https" && url.scheme() != "http" {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url '{}' must use http or https",
            config.base_url
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation("user-agent cannot be empty".to_string()));
    }

    if config.timeout_secs == 0 || config.connect_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "timeouts must be at least one second".to_string(),
        ));
    }

    if config.submission_page_size < 1 || config.submission_page_size > 100 {
        return Err(ConfigError::Validation(format!(
            "submission-page-size must be between 1 and 100, got {}",
            config.submission_page_size
        )));
    }

    if config.max_submission_pages < 1 {
        return Err(ConfigError::Validation(
            "max-submission-pages must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Validates retry bounds
fn validate_retry_config(config: &RetryConfig) -> Result<(), ConfigError> {
    if config.max_network_attempts < 1 {
        return Err(ConfigError::Validation(format!(
            "max-network-attempts must be >= 1, got {}",
            config.max_network_attempts
        )));
    }

    if config.max_rate_limit_attempts < 1 {
        return Err(ConfigError::Validation(format!(
            "max-rate-limit-attempts must be >= 1, got {}",
            config.max_rate_limit_attempts
        )));
    }

    Ok(())
}
