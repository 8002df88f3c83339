// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! Each message type implements `Display` for human-readable output and
//! [`StructuredLog`] to emit itself with structured fields at its designated level.
//!
//! # Organization
//!
//! * `engine` - factory invocation and expansion lifecycle
//! * `node` - dynamic node registration, execution, and stream release

use tracing::Span;

pub mod engine;
pub mod node;

/// A log message that knows its own level and structured fields.
pub trait StructuredLog {
    /// Emit the message as an event.
    fn log(&self);

    /// Create a span carrying the message's fields.
    fn span(&self, name: &str) -> Span;
}
