//! Configuration module for the exporter
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file and merging command-line credentials into it.
//!
//! # Example
//!
//! ```no_run
//! use leetcode_export::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("export.toml")).unwrap();
//! println!("Network attempts per request: {}", config.retry.max_network_attempts);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CredentialsConfig, OutputConfig, RetryConfig, ServiceConfig, ThrottleConfig,
};

// Re-export parser functions
pub use parser::{load_config, parse_config, resolve_credentials, CredentialOverrides};
pub use validation::validate;
