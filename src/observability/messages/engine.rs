// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for test factory lifecycle events.
//!
//! This module contains message types for logging events related to:
//! * Factory invocation
//! * Expansion of the dynamic tree (completion, failure)

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Factory invocation started.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use dynamic_tests::observability::messages::engine::FactoryInvocationStarted;
///
/// let msg = FactoryInvocationStarted {
///     factory: "palindromes",
///     unique_id: "[engine:dynamic-tests]/[test-factory:palindromes]",
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct FactoryInvocationStarted<'a> {
    pub factory: &'a str,
    pub unique_id: &'a str,
}

impl Display for FactoryInvocationStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Invoking test factory '{}' ({})", self.factory, self.unique_id)
    }
}

impl StructuredLog for FactoryInvocationStarted<'_> {
    fn log(&self) {
        tracing::info!(
            factory = self.factory,
            unique_id = self.unique_id,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "test_factory",
            span_name = name,
            factory = self.factory,
            unique_id = self.unique_id,
        )
    }
}

/// Dynamic tree of a factory fully expanded and executed.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use dynamic_tests::observability::messages::engine::FactoryExpansionCompleted;
/// use std::time::Duration;
///
/// let msg = FactoryExpansionCompleted {
///     factory: "palindromes",
///     descriptor_count: 12,
///     duration: Duration::from_millis(40),
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct FactoryExpansionCompleted<'a> {
    pub factory: &'a str,
    pub descriptor_count: usize,
    pub duration: std::time::Duration,
}

impl Display for FactoryExpansionCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Test factory '{}' expanded {} dynamic descriptors in {:?}",
            self.factory, self.descriptor_count, self.duration
        )
    }
}

impl StructuredLog for FactoryExpansionCompleted<'_> {
    fn log(&self) {
        tracing::info!(
            factory = self.factory,
            descriptor_count = self.descriptor_count,
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "factory_expansion_completed",
            span_name = name,
            factory = self.factory,
            descriptor_count = self.descriptor_count,
            duration = ?self.duration,
        )
    }
}

/// Factory node ended with a terminal failure.
///
/// # Log Level
/// `error!` - Failure requiring attention
///
/// # Example
/// ```
/// use dynamic_tests::observability::messages::engine::FactoryExpansionFailed;
///
/// let error = std::io::Error::new(std::io::ErrorKind::Other, "test error");
/// let msg = FactoryExpansionFailed {
///     factory: "palindromes",
///     kind: "factory_invocation",
///     descriptor_count: 0,
///     error: &error,
/// };
///
/// tracing::error!("{}", msg);
/// ```
pub struct FactoryExpansionFailed<'a> {
    pub factory: &'a str,
    pub kind: &'a str,
    pub descriptor_count: usize,
    pub error: &'a dyn std::error::Error,
}

impl Display for FactoryExpansionFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Test factory '{}' failed after {} dynamic descriptors: {}",
            self.factory, self.descriptor_count, self.error
        )
    }
}

impl StructuredLog for FactoryExpansionFailed<'_> {
    fn log(&self) {
        tracing::error!(
            factory = self.factory,
            kind = self.kind,
            descriptor_count = self.descriptor_count,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "factory_expansion_failed",
            span_name = name,
            factory = self.factory,
            kind = self.kind,
            error = %self.error,
        )
    }
}
