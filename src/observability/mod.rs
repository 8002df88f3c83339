// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and tracing.
//!
//! This module provides centralized message types for all diagnostic and operational
//! logging throughout the engine. Message types follow a struct-based pattern
//! with a `Display` implementation so that log text lives in one place and every
//! event carries the same structured fields wherever it is emitted.
//!
//! # Usage
//!
//! ```rust
//! use dynamic_tests::observability::messages::{engine::FactoryInvocationStarted, StructuredLog};
//!
//! FactoryInvocationStarted {
//!     factory: "palindromes",
//!     unique_id: "[engine:dynamic-tests]/[test-factory:palindromes]",
//! }
//! .log();
//! ```

pub mod messages;

use crate::config::consts::DEFAULT_LOG_FILTER;
use tracing_subscriber::EnvFilter;

/// Install the global fmt subscriber.
///
/// `RUST_LOG` takes precedence over `default_filter`, which in turn falls back to
/// [`DEFAULT_LOG_FILTER`]. Returns `false` if a global subscriber was already installed.
pub fn init_tracing(default_filter: Option<&str>) -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::try_new(default_filter.unwrap_or(DEFAULT_LOG_FILTER))
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok()
}
