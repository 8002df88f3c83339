// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Transient nodes produced by test factories.
//!
//! A [`DynamicNode`] only lives while its factory's result is being traversed; the engine turns
//! each one into a [`TestDescriptor`](crate::descriptor::TestDescriptor) as soon as it is pulled.

mod normalizer;
mod stream;

pub use normalizer::{factory_result, normalize, FactoryResult};
pub use stream::NodeStream;

use futures::FutureExt;
use std::future::Future;

use crate::config::consts::{DYNAMIC_CONTAINER_SEGMENT_TYPE, DYNAMIC_TEST_SEGMENT_TYPE};
use crate::descriptor::Executable;

/// A discovered element: either a single test or a container of further nodes.
pub enum DynamicNode {
    Test(DynamicTest),
    Container(DynamicContainer),
}

/// Classification of a [`DynamicNode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Test,
    Container,
}

impl NodeKind {
    /// Segment type used for the unique id of a node of this kind.
    pub fn segment_type(self) -> &'static str {
        match self {
            NodeKind::Test => DYNAMIC_TEST_SEGMENT_TYPE,
            NodeKind::Container => DYNAMIC_CONTAINER_SEGMENT_TYPE,
        }
    }
}

pub struct DynamicTest {
    display_name: String,
    executable: Executable,
}

impl DynamicTest {
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn into_parts(self) -> (String, Executable) {
        (self.display_name, self.executable)
    }
}

pub struct DynamicContainer {
    display_name: String,
    children: NodeStream,
}

impl DynamicContainer {
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn into_parts(self) -> (String, NodeStream) {
        (self.display_name, self.children)
    }
}

impl DynamicNode {
    /// A test whose action is async.
    ///
    /// # Example
    /// ```
    /// use dynamic_tests::node::DynamicNode;
    ///
    /// let node = DynamicNode::test("racecar is a palindrome", || async {
    ///     anyhow::ensure!("racecar".chars().eq("racecar".chars().rev()));
    ///     Ok(())
    /// });
    /// assert_eq!(node.display_name(), "racecar is a palindrome");
    /// ```
    pub fn test<F, Fut>(display_name: impl Into<String>, action: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        DynamicNode::Test(DynamicTest {
            display_name: display_name.into(),
            executable: Executable::new(move || action().boxed()),
        })
    }

    /// A test whose action is a plain closure.
    pub fn test_sync<F>(display_name: impl Into<String>, action: F) -> Self
    where
        F: Fn() -> anyhow::Result<()> + Send + Sync + 'static,
    {
        DynamicNode::Test(DynamicTest {
            display_name: display_name.into(),
            executable: Executable::new(move || futures::future::ready(action()).boxed()),
        })
    }

    /// A container over an infallible, lazily consumed sequence of children.
    pub fn container<I>(display_name: impl Into<String>, children: I) -> Self
    where
        I: IntoIterator<Item = DynamicNode>,
        I::IntoIter: Send + 'static,
    {
        Self::container_stream(display_name, NodeStream::new(children))
    }

    /// A container over an arbitrary stream, which may be fallible or own a resource.
    pub fn container_stream(display_name: impl Into<String>, children: NodeStream) -> Self {
        DynamicNode::Container(DynamicContainer {
            display_name: display_name.into(),
            children,
        })
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            DynamicNode::Test(_) => NodeKind::Test,
            DynamicNode::Container(_) => NodeKind::Container,
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            DynamicNode::Test(test) => test.display_name(),
            DynamicNode::Container(container) => container.display_name(),
        }
    }
}

impl std::fmt::Debug for DynamicNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DynamicNode")
            .field("kind", &self.kind())
            .field("display_name", &self.display_name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_maps_to_segment_type() {
        let test = DynamicNode::test_sync("t", || Ok(()));
        let container = DynamicNode::container("c", vec![]);

        assert_eq!(test.kind(), NodeKind::Test);
        assert_eq!(container.kind(), NodeKind::Container);
        assert_eq!(test.kind().segment_type(), "dynamic-test");
        assert_eq!(container.kind().segment_type(), "dynamic-container");
    }

    #[tokio::test]
    async fn test_sync_action_result_is_preserved() {
        let node = DynamicNode::test_sync("fails", || anyhow::bail!("nope"));
        let DynamicNode::Test(test) = node else {
            panic!("expected a test node");
        };
        let (_, executable) = test.into_parts();

        let err = executable.call().await.unwrap_err();
        assert_eq!(err.to_string(), "nope");
    }
}
