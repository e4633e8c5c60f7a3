use crate::config::types::Config;
use crate::config::validation::validate;
use crate::model::Credentials;
use crate::ConfigError;
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use leetcode_export::config::load_config;
///
/// let config = load_config(Path::new("export.toml")).unwrap();
/// println!("Base URL: {}", config.service.base_url);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parses and validates configuration from TOML text
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

/// Command-line values that take precedence over the file
#[derive(Debug, Clone, Default)]
pub struct CredentialOverrides {
    pub username: Option<String>,
    pub session: Option<String>,
    pub csrf_token: Option<String>,
}

/// Builds the run's credentials from the file section and CLI overrides
///
/// Override values win over the file. Each of the three values must be
/// present and non-blank once both sources are merged.
pub fn resolve_credentials(
    config: &Config,
    overrides: CredentialOverrides,
) -> Result<Credentials, ConfigError> {
    let file = &config.credentials;

    let username = pick(overrides.username, &file.username)
        .ok_or(ConfigError::MissingCredential("username"))?;
    let session = pick(overrides.session, &file.session)
        .ok_or(ConfigError::MissingCredential("session"))?;
    let csrf_token = pick(overrides.csrf_token, &file.csrf_token)
        .ok_or(ConfigError::MissingCredential("csrf token"))?;

    let credentials = Credentials::new(username, session, csrf_token);
    credentials.validate().map_err(ConfigError::Validation)?;
    Ok(credentials)
}

fn pick(preferred: Option<String>, fallback: &Option<String>) -> Option<String> {
    preferred
        .or_else(|| fallback.clone())
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
