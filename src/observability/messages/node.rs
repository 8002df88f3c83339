// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for dynamic node events.
//!
//! This module contains message types for logging events related to:
//! * Registration of a descriptor in the dynamic tree
//! * Execution of dynamic tests
//! * Release of node stream resources

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Descriptor attached to its parent and about to be executed.
///
/// # Log Level
/// `debug!` - Detailed diagnostic information
pub struct NodeRegistered<'a> {
    pub unique_id: &'a str,
    pub segment_type: &'a str,
    pub child_count: usize,
}

impl Display for NodeRegistered<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Registered {} {} with {} children",
            self.segment_type, self.unique_id, self.child_count
        )
    }
}

impl StructuredLog for NodeRegistered<'_> {
    fn log(&self) {
        tracing::debug!(
            unique_id = self.unique_id,
            segment_type = self.segment_type,
            child_count = self.child_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "node_registered",
            span_name = name,
            unique_id = self.unique_id,
            segment_type = self.segment_type,
        )
    }
}

/// Dynamic test passed.
///
/// # Log Level
/// `debug!` - Detailed diagnostic information
///
/// # Example
/// ```
/// use dynamic_tests::observability::messages::node::DynamicTestPassed;
/// use std::time::Duration;
///
/// let msg = DynamicTestPassed {
///     display_name: "racecar",
///     duration: Duration::from_micros(12),
/// };
///
/// tracing::debug!("{}", msg);
/// ```
pub struct DynamicTestPassed<'a> {
    pub display_name: &'a str,
    pub duration: std::time::Duration,
}

impl Display for DynamicTestPassed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Dynamic test '{}' passed in {:?}", self.display_name, self.duration)
    }
}

impl StructuredLog for DynamicTestPassed<'_> {
    fn log(&self) {
        tracing::debug!(
            display_name = self.display_name,
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "dynamic_test_passed",
            span_name = name,
            display_name = self.display_name,
            duration = ?self.duration,
        )
    }
}

/// Dynamic test failed.
///
/// # Log Level
/// `warn!` - The test failed; the run continues
pub struct DynamicTestFailed<'a> {
    pub display_name: &'a str,
    pub unique_id: &'a str,
    pub reason: &'a str,
}

impl Display for DynamicTestFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Dynamic test '{}' failed: {}",
            self.display_name, self.reason
        )
    }
}

impl StructuredLog for DynamicTestFailed<'_> {
    fn log(&self) {
        tracing::warn!(
            display_name = self.display_name,
            unique_id = self.unique_id,
            reason = self.reason,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "dynamic_test_failed",
            span_name = name,
            display_name = self.display_name,
            unique_id = self.unique_id,
        )
    }
}

/// Releasing a node stream failed while another failure was already propagating, or the
/// stream was dropped without being closed.
///
/// # Log Level
/// `warn!` - Resource may not have been released
pub struct StreamCloseFailed<'a> {
    pub pulled: usize,
    pub error: &'a dyn std::error::Error,
}

impl Display for StreamCloseFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Failed to close node stream after {} elements: {}",
            self.pulled, self.error
        )
    }
}

impl StructuredLog for StreamCloseFailed<'_> {
    fn log(&self) {
        tracing::warn!(
            pulled = self.pulled,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "stream_close_failed",
            span_name = name,
            pulled = self.pulled,
            error = %self.error,
        )
    }
}
