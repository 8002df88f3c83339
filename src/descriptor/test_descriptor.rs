// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use futures::future::BoxFuture;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

use super::UniqueId;

/// Async action carried by a dynamic test. May be invoked by the executor once it has been
/// attached to the tree.
#[derive(Clone)]
pub struct Executable(Arc<dyn Fn() -> BoxFuture<'static, anyhow::Result<()>> + Send + Sync>);

impl Executable {
    pub fn new<F>(action: F) -> Self
    where
        F: Fn() -> BoxFuture<'static, anyhow::Result<()>> + Send + Sync + 'static,
    {
        Self(Arc::new(action))
    }

    pub fn call(&self) -> BoxFuture<'static, anyhow::Result<()>> {
        (self.0)()
    }
}

impl fmt::Debug for Executable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Executable(..)")
    }
}

/// Location of the factory that produced a descriptor. Every dynamic descriptor inherits the
/// source of its enclosing factory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestSource {
    pub module_path: String,
    pub function: String,
}

impl TestSource {
    pub fn new(module_path: impl Into<String>, function: impl Into<String>) -> Self {
        Self {
            module_path: module_path.into(),
            function: function.into(),
        }
    }
}

impl fmt::Display for TestSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.module_path, self.function)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DescriptorType {
    Test,
    Container,
}

#[derive(Debug, Clone)]
pub enum DescriptorKind {
    Test(Executable),
    Container,
}

/// Durable tree element built for a discovered dynamic node.
#[derive(Debug)]
pub struct TestDescriptor {
    unique_id: UniqueId,
    display_name: String,
    kind: DescriptorKind,
    source: TestSource,
    children: Vec<TestDescriptor>,
}

impl TestDescriptor {
    pub fn test(
        unique_id: UniqueId,
        display_name: String,
        executable: Executable,
        source: TestSource,
    ) -> Self {
        Self {
            unique_id,
            display_name,
            kind: DescriptorKind::Test(executable),
            source,
            children: Vec::new(),
        }
    }

    pub fn container(unique_id: UniqueId, display_name: String, source: TestSource) -> Self {
        Self {
            unique_id,
            display_name,
            kind: DescriptorKind::Container,
            source,
            children: Vec::new(),
        }
    }

    pub fn unique_id(&self) -> &UniqueId {
        &self.unique_id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn kind(&self) -> &DescriptorKind {
        &self.kind
    }

    pub fn descriptor_type(&self) -> DescriptorType {
        match self.kind {
            DescriptorKind::Test(_) => DescriptorType::Test,
            DescriptorKind::Container => DescriptorType::Container,
        }
    }

    pub fn executable(&self) -> Option<&Executable> {
        match &self.kind {
            DescriptorKind::Test(executable) => Some(executable),
            DescriptorKind::Container => None,
        }
    }

    pub fn source(&self) -> &TestSource {
        &self.source
    }

    pub fn children(&self) -> &[TestDescriptor] {
        &self.children
    }

    /// Height of the subtree rooted here; a leaf has depth 1.
    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(TestDescriptor::depth).max().unwrap_or(0)
    }

    /// All descendants in pre-order, excluding `self`.
    pub fn descendants(&self) -> Vec<&TestDescriptor> {
        let mut out = Vec::new();
        collect_descendants(&self.children, &mut out);
        out
    }
}

pub(crate) fn collect_descendants<'a>(
    children: &'a [TestDescriptor],
    out: &mut Vec<&'a TestDescriptor>,
) {
    for child in children {
        out.push(child);
        collect_descendants(&child.children, out);
    }
}

/// Anything a dynamic descriptor can be attached to: a container or the factory node itself.
///
/// Children are only ever appended, never removed or replaced.
pub trait DescriptorParent: Send {
    fn unique_id(&self) -> &UniqueId;

    /// Append `child` and return a reference to it in its final position.
    fn add_child(&mut self, child: TestDescriptor) -> &TestDescriptor;
}

impl DescriptorParent for TestDescriptor {
    fn unique_id(&self) -> &UniqueId {
        &self.unique_id
    }

    fn add_child(&mut self, child: TestDescriptor) -> &TestDescriptor {
        push_child(&mut self.children, child)
    }
}

pub(crate) fn push_child(
    children: &mut Vec<TestDescriptor>,
    child: TestDescriptor,
) -> &TestDescriptor {
    children.push(child);
    let last = children.len() - 1;
    &children[last]
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::FutureExt;

    fn source() -> TestSource {
        TestSource::new("tests", "factory")
    }

    fn noop() -> Executable {
        Executable::new(|| async { Ok(()) }.boxed())
    }

    #[test]
    fn test_add_child_returns_attached_descriptor() {
        let root = UniqueId::for_engine("e");
        let mut container =
            TestDescriptor::container(root.append("dynamic-container", "c"), "c".into(), source());
        let child_id = container.unique_id.append("dynamic-test", "t");

        let child = TestDescriptor::test(child_id.clone(), "t".into(), noop(), source());
        let attached = container.add_child(child);

        assert_eq!(attached.unique_id(), &child_id);
        assert_eq!(container.children().len(), 1);
    }

    #[test]
    fn test_depth_and_descendants_are_pre_order() {
        let root = UniqueId::for_engine("e");
        let outer_id = root.append("dynamic-container", "outer");
        let inner_id = outer_id.append("dynamic-container", "inner");

        let mut inner = TestDescriptor::container(inner_id.clone(), "inner".into(), source());
        let a_id = inner_id.append("dynamic-test", "a");
        inner.add_child(TestDescriptor::test(a_id, "a".into(), noop(), source()));
        let mut outer = TestDescriptor::container(outer_id.clone(), "outer".into(), source());
        outer.add_child(inner);
        let b_id = outer_id.append("dynamic-test", "b");
        outer.add_child(TestDescriptor::test(b_id, "b".into(), noop(), source()));

        let names: Vec<&str> = outer.descendants().iter().map(|d| d.display_name()).collect();
        assert_eq!(names, vec!["inner", "a", "b"]);
        assert_eq!(outer.depth(), 3);
    }

    #[test]
    fn test_descriptor_type_follows_kind() {
        let id = UniqueId::for_engine("e");
        let test = TestDescriptor::test(id.clone(), "t".into(), noop(), source());
        assert_eq!(test.descriptor_type(), DescriptorType::Test);
        let container = TestDescriptor::container(id, "c".into(), source());
        assert_eq!(container.descriptor_type(), DescriptorType::Container);
        assert!(container.executable().is_none());
    }
}
