// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Ready-made implementations of the engine's collaborator traits.
//!
//! # Available Backends
//!
//! ## Recording Executor
//! [`RecordingExecutor`] runs each dynamic test's action inline and keeps an
//! [`ExecutionRecord`] per descriptor, in execution order:
//! - **Tests**: action awaited, failures and (optionally) panics recorded as failed outcomes
//! - **Containers**: recorded only; their work already happened in their children
//! - **Reporting**: [`ExecutionReport`] with counts, serializable to JSON
//!
//! ## Function Factory
//! [`FnTestFactory`] wraps an async closure as a [`TestFactory`](crate::traits::TestFactory).
//!
//! ## Stub Backend (Test-Only)
//! Failure injection for engine tests:
//! - **FailingFactory**: fails before yielding any node
//! - **BreakingExecutor**: returns an execution error for one chosen descriptor
//!
//! # Examples
//!
//! ```rust
//! use dynamic_tests::backends::{FnTestFactory, RecordingExecutor};
//! use dynamic_tests::node::{factory_result, DynamicNode};
//! use dynamic_tests::traits::TestFactory;
//!
//! let factory = FnTestFactory::new("empty", || async {
//!     Ok(factory_result(Vec::<DynamicNode>::new()))
//! });
//! assert_eq!(factory.name(), "empty");
//!
//! let executor = RecordingExecutor::new(true);
//! # let _ = executor;
//! ```

pub mod function;
pub mod recording;
#[cfg(test)]
pub mod stub;

pub use function::FnTestFactory;
pub use recording::{ExecutionRecord, ExecutionReport, RecordingExecutor, TestOutcome};
