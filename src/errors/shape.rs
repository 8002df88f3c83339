// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors raised while normalizing a factory result and pulling elements from it.

use thiserror::Error;

/// Human-readable list of the factory result shapes the normalizer accepts.
pub const ACCEPTED_SHAPES: &str =
    "a Vec, VecDeque, boxed Iterator, or NodeStream of DynamicNode";

/// A factory result, or one of its elements, is not something the normalizer can classify.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    /// The result is a single node rather than a sequence of nodes.
    #[error("found a single DynamicNode where a sequence was expected")]
    SingleNode,

    /// The result is none of the accepted sequence shapes.
    #[error("found a value of an unsupported type")]
    UnsupportedShape,

    /// The element at `index` (zero-based, in production order) is not a DynamicNode.
    #[error("element {index} is not a DynamicNode")]
    UnclassifiableElement { index: usize },
}

/// Failure while pulling the next element out of a [`NodeStream`](crate::node::NodeStream).
#[derive(Debug, Error)]
pub enum TraversalError {
    #[error(transparent)]
    Shape(#[from] ShapeError),

    /// The producer itself failed while generating the element.
    #[error("node producer failed: {0}")]
    Producer(#[source] anyhow::Error),
}
