//! Integration tests for the exporter
//!
//! These tests use wiremock to stand in for the remote service and drive
//! the transport and the full export pipeline end-to-end.

mod common;
mod export_tests;
