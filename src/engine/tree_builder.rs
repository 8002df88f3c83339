// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Interleaved discovery and execution of a dynamic tree.
//!
//! Nodes are pulled one at a time from a [`NodeStream`] and turned into descriptors. A test is
//! attached and executed immediately. A container is expanded first: each of its children is
//! attached and executed, strictly in production order, before the container itself is attached
//! to its parent and executed.
//!
//! ```text
//! factory ─┬─ container ─┬─ L1      execution order: L1, L2, container, L3
//!          │             └─ L2
//!          └─ L3
//! ```
//!
//! # Expansion states
//!
//! A descriptor moves through `Pending` (built, subtree still expanding) to `Finished` (subtree
//! complete) before it can be attached. Attachment only accepts `Finished`, and a container
//! only becomes `Finished` once its child stream is exhausted and closed, so no descriptor can
//! be attached or executed ahead of its own subtree.

use futures::future::BoxFuture;

use crate::descriptor::{DescriptorParent, TestDescriptor, TestSource, UniqueId};
use crate::engine::IdentityAllocator;
use crate::errors::{DynamicTestError, TraversalError};
use crate::node::{DynamicNode, NodeStream};
use crate::observability::messages::{node::*, StructuredLog};
use crate::traits::DynamicTestExecutor;

/// Descriptor built but whose subtree is still being expanded.
struct Pending(TestDescriptor);

/// Descriptor whose subtree is complete; the only state that can be attached.
struct Finished(TestDescriptor);

impl Pending {
    fn descriptor_mut(&mut self) -> &mut TestDescriptor {
        &mut self.0
    }

    fn finish(self) -> Finished {
        Finished(self.0)
    }
}

impl Finished {
    fn attach_to(self, parent: &mut dyn DescriptorParent) -> &TestDescriptor {
        parent.add_child(self.0)
    }
}

/// Expands the dynamic tree of one factory node.
pub struct TreeBuilder<'a> {
    factory: &'a str,
    source: &'a TestSource,
    allocator: &'a IdentityAllocator,
    executor: &'a dyn DynamicTestExecutor,
}

impl<'a> TreeBuilder<'a> {
    pub fn new(
        factory: &'a str,
        source: &'a TestSource,
        allocator: &'a IdentityAllocator,
        executor: &'a dyn DynamicTestExecutor,
    ) -> Self {
        Self {
            factory,
            source,
            allocator,
            executor,
        }
    }

    /// Expand every node of `nodes` under `parent`, then close the stream.
    ///
    /// The stream is closed on every path. If expansion failed and closing fails too, the
    /// expansion failure is returned and the close failure is logged.
    pub fn expand_all<'b>(
        &'b self,
        parent: &'b mut dyn DescriptorParent,
        mut nodes: NodeStream,
    ) -> BoxFuture<'b, Result<(), DynamicTestError>> {
        Box::pin(async move {
            let expanded = self.expand_each(&mut *parent, &mut nodes).await;
            let pulled = nodes.pulled();

            match (expanded, nodes.close()) {
                (Ok(()), Ok(())) => Ok(()),
                (Ok(()), Err(cause)) => Err(DynamicTestError::StreamClose {
                    unique_id: parent.unique_id().to_string(),
                    cause,
                }),
                (Err(error), Ok(())) => Err(error),
                (Err(error), Err(cause)) => {
                    StreamCloseFailed {
                        pulled,
                        error: &*cause,
                    }
                    .log();
                    Err(error)
                }
            }
        })
    }

    async fn expand_each(
        &self,
        parent: &mut dyn DescriptorParent,
        nodes: &mut NodeStream,
    ) -> Result<(), DynamicTestError> {
        while let Some(item) = nodes.next() {
            let node = item.map_err(|error| self.traversal_failure(parent.unique_id(), error))?;
            self.expand(&mut *parent, node).await?;
        }
        Ok(())
    }

    /// Build, attach, and execute `node` and, for a container, its whole subtree.
    pub fn expand<'b>(
        &'b self,
        parent: &'b mut dyn DescriptorParent,
        node: DynamicNode,
    ) -> BoxFuture<'b, Result<(), DynamicTestError>> {
        Box::pin(async move {
            let kind = node.kind();
            let token = self.allocator.allocate(node.display_name());
            let unique_id = parent.unique_id().append(kind.segment_type(), &token);

            let finished = match node {
                DynamicNode::Test(test) => {
                    let (display_name, executable) = test.into_parts();
                    Pending(TestDescriptor::test(
                        unique_id,
                        display_name,
                        executable,
                        self.source.clone(),
                    ))
                    .finish()
                }
                DynamicNode::Container(container) => {
                    let (display_name, children) = container.into_parts();
                    let mut pending = Pending(TestDescriptor::container(
                        unique_id,
                        display_name,
                        self.source.clone(),
                    ));
                    self.expand_all(pending.descriptor_mut(), children).await?;
                    pending.finish()
                }
            };

            let descriptor = finished.attach_to(parent);
            NodeRegistered {
                unique_id: &descriptor.unique_id().to_string(),
                segment_type: kind.segment_type(),
                child_count: descriptor.children().len(),
            }
            .log();

            self.executor
                .execute(descriptor)
                .await
                .map_err(|cause| DynamicTestError::DescendantExecution {
                    unique_id: descriptor.unique_id().to_string(),
                    cause,
                })
        })
    }

    fn traversal_failure(&self, parent: &UniqueId, error: TraversalError) -> DynamicTestError {
        match error {
            TraversalError::Shape(cause) => DynamicTestError::InvalidFactoryResult {
                factory: self.factory.to_string(),
                cause,
            },
            TraversalError::Producer(cause) => DynamicTestError::DescendantExecution {
                unique_id: parent.to_string(),
                cause,
            },
        }
    }
}
