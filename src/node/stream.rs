// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::any::Any;

use super::DynamicNode;
use crate::errors::{ShapeError, TraversalError};
use crate::observability::messages::{node::StreamCloseFailed, StructuredLog};

type Source = Box<dyn Iterator<Item = Result<DynamicNode, TraversalError>> + Send>;
type CloseHook = Box<dyn FnOnce() -> anyhow::Result<()> + Send>;

/// Canonical lazy, single-pass sequence of dynamic nodes.
///
/// Elements are pulled one at a time and never buffered. A stream may own an external resource
/// through a close hook; the hook runs exactly once, either through [`NodeStream::close`] or,
/// if the stream is dropped before being closed (early return, panic unwinding, a cancelled
/// future), from `Drop`. A close failure seen from `Drop` can only be logged.
///
/// # Example
/// ```
/// use dynamic_tests::node::{DynamicNode, NodeStream};
/// use std::sync::atomic::{AtomicBool, Ordering};
/// use std::sync::Arc;
///
/// let released = Arc::new(AtomicBool::new(false));
/// let flag = released.clone();
/// let stream = NodeStream::new(vec![DynamicNode::test_sync("a", || Ok(()))])
///     .on_close(move || {
///         flag.store(true, Ordering::SeqCst);
///         Ok(())
///     });
///
/// drop(stream);
/// assert!(released.load(Ordering::SeqCst));
/// ```
pub struct NodeStream {
    source: Source,
    on_close: Option<CloseHook>,
    pulled: usize,
}

impl NodeStream {
    pub fn new<I>(nodes: I) -> Self
    where
        I: IntoIterator<Item = DynamicNode>,
        I::IntoIter: Send + 'static,
    {
        Self::from_source(Box::new(nodes.into_iter().map(Ok::<_, TraversalError>)))
    }

    /// A stream whose producer may fail part-way through.
    pub fn fallible<I>(nodes: I) -> Self
    where
        I: IntoIterator<Item = anyhow::Result<DynamicNode>>,
        I::IntoIter: Send + 'static,
    {
        Self::from_source(Box::new(
            nodes.into_iter().map(|item| item.map_err(TraversalError::Producer)),
        ))
    }

    /// A stream over untyped values, each classified as a [`DynamicNode`] when it is pulled.
    pub fn untyped<I>(values: I) -> Self
    where
        I: IntoIterator<Item = Box<dyn Any + Send>>,
        I::IntoIter: Send + 'static,
    {
        Self::from_source(Box::new(values.into_iter().enumerate().map(|(index, value)| {
            value
                .downcast::<DynamicNode>()
                .map(|node| *node)
                .map_err(|_| TraversalError::Shape(ShapeError::UnclassifiableElement { index }))
        })))
    }

    pub fn empty() -> Self {
        Self::new(std::iter::empty::<DynamicNode>())
    }

    fn from_source(source: Source) -> Self {
        Self {
            source,
            on_close: None,
            pulled: 0,
        }
    }

    /// Register the release step of the resource backing this stream. Replaces any earlier hook.
    pub fn on_close<F>(mut self, hook: F) -> Self
    where
        F: FnOnce() -> anyhow::Result<()> + Send + 'static,
    {
        self.on_close = Some(Box::new(hook));
        self
    }

    /// Number of elements pulled so far, failed pulls included.
    pub fn pulled(&self) -> usize {
        self.pulled
    }

    /// Release the backing resource. Calling this on a stream without a hook is a no-op.
    pub fn close(mut self) -> anyhow::Result<()> {
        self.run_close_hook()
    }

    fn run_close_hook(&mut self) -> anyhow::Result<()> {
        match self.on_close.take() {
            Some(hook) => hook(),
            None => Ok(()),
        }
    }
}

impl Iterator for NodeStream {
    type Item = Result<DynamicNode, TraversalError>;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.source.next();
        if item.is_some() {
            self.pulled += 1;
        }
        item
    }
}

impl Drop for NodeStream {
    fn drop(&mut self) {
        if let Err(error) = self.run_close_hook() {
            StreamCloseFailed {
                pulled: self.pulled,
                error: &*error,
            }
            .log();
        }
    }
}

impl std::fmt::Debug for NodeStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeStream")
            .field("pulled", &self.pulled)
            .field("has_close_hook", &self.on_close.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn counting_hook(
        counter: &Arc<AtomicUsize>,
    ) -> impl FnOnce() -> anyhow::Result<()> + Send + 'static {
        let counter = counter.clone();
        move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn leaves(names: &[&str]) -> Vec<DynamicNode> {
        names
            .iter()
            .map(|name| DynamicNode::test_sync(*name, || Ok(())))
            .collect()
    }

    #[test]
    fn test_close_runs_hook_once() {
        let closes = Arc::new(AtomicUsize::new(0));
        let stream = NodeStream::new(leaves(&["a"])).on_close(counting_hook(&closes));

        stream.close().unwrap();

        assert_eq!(closes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_early_termination_still_releases() {
        let closes = Arc::new(AtomicUsize::new(0));
        let mut stream = NodeStream::new(leaves(&["a", "b", "c"])).on_close(counting_hook(&closes));

        assert!(stream.next().is_some());
        drop(stream);

        assert_eq!(closes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_close_failure_is_returned() {
        let stream = NodeStream::empty().on_close(|| anyhow::bail!("socket already gone"));
        assert_eq!(stream.close().unwrap_err().to_string(), "socket already gone");
    }

    #[test]
    fn test_untyped_elements_fail_lazily_at_their_index() {
        let values: Vec<Box<dyn Any + Send>> = vec![
            Box::new(DynamicNode::test_sync("a", || Ok(()))),
            Box::new(42u32),
        ];
        let mut stream = NodeStream::untyped(values);

        assert!(matches!(stream.next(), Some(Ok(_))));
        assert!(matches!(
            stream.next(),
            Some(Err(TraversalError::Shape(ShapeError::UnclassifiableElement { index: 1 })))
        ));
        assert!(stream.next().is_none());
        assert_eq!(stream.pulled(), 2);
    }

    #[test]
    fn test_fallible_producer_error_surfaces() {
        let mut stream = NodeStream::fallible(vec![
            Ok(DynamicNode::test_sync("a", || Ok(()))),
            Err(anyhow::anyhow!("generator broke")),
        ]);

        assert!(matches!(stream.next(), Some(Ok(_))));
        match stream.next() {
            Some(Err(TraversalError::Producer(cause))) => {
                assert_eq!(cause.to_string(), "generator broke")
            }
            other => panic!("expected producer failure, got {:?}", other.map(|r| r.is_ok())),
        }
    }
}
