// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use crate::descriptor::TestDescriptor;

/// Capability to execute one dynamic descriptor that has already been built and attached.
///
/// The engine hands over each descriptor exactly once, in post-order within a branch: every
/// child of a container is executed before the container itself. Implementations decide what
/// execution means (running a test's action, reporting a container) and where results go; the
/// engine never inspects them. An implementation may do nested work, or hand the descriptor to a
/// scheduler, before returning.
#[async_trait]
pub trait DynamicTestExecutor: Send + Sync {
    /// Execute `descriptor`.
    ///
    /// A failing test is a result to record, not an error. Returning `Err` means execution
    /// itself broke down; the engine treats it as a terminal failure of the enclosing factory
    /// and stops pulling further nodes.
    async fn execute(&self, descriptor: &TestDescriptor) -> anyhow::Result<()>;
}
