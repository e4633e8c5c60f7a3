//! Client module for talking to the remote service
//!
//! This module contains the request plumbing, including:
//! - Endpoint URL construction
//! - Wire types for the structured query and legacy REST APIs
//! - HTTP transport with network retry and status classification
//! - Rate-limit backoff layered on top of the transport

pub mod api;
mod backoff;
mod endpoints;
mod transport;

pub use backoff::with_backoff;
pub use endpoints::Endpoints;
pub use transport::{build_http_client, Transport};
