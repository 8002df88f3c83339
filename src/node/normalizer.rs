// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Normalization of raw factory results into a [`NodeStream`].
//!
//! A factory hands back an arbitrary value; the accepted shapes are:
//!
//! * `Vec<DynamicNode>` - ordered sequence
//! * `VecDeque<DynamicNode>` - collection
//! * `Box<dyn Iterator<Item = DynamicNode> + Send>` - iterator
//! * `NodeStream` - passed through unchanged, close hook included
//! * `Vec<Box<dyn Any + Send>>` and `Box<dyn Iterator<Item = Box<dyn Any + Send>> + Send>` -
//!   untyped sequences whose elements are classified one by one as they are pulled
//!
//! Anything else, a lone `DynamicNode` included, is rejected before a single element is pulled.

use std::any::Any;
use std::collections::VecDeque;

use super::{DynamicNode, NodeStream};
use crate::errors::ShapeError;

/// Raw value returned by a test factory.
pub type FactoryResult = Box<dyn Any + Send>;

type NodeIter = Box<dyn Iterator<Item = DynamicNode> + Send>;
type UntypedIter = Box<dyn Iterator<Item = Box<dyn Any + Send>> + Send>;

/// Box a factory's return value.
pub fn factory_result<T: Any + Send>(value: T) -> FactoryResult {
    Box::new(value)
}

/// Classify a raw factory result and wrap it as a single-pass [`NodeStream`].
///
/// # Example
/// ```
/// use dynamic_tests::node::{factory_result, normalize, DynamicNode};
///
/// let raw = factory_result(vec![DynamicNode::test_sync("a", || Ok(()))]);
/// assert_eq!(normalize(raw).unwrap().count(), 1);
///
/// let lone = factory_result(DynamicNode::test_sync("b", || Ok(())));
/// assert!(normalize(lone).is_err());
/// ```
pub fn normalize(raw: FactoryResult) -> Result<NodeStream, ShapeError> {
    let raw = match raw.downcast::<NodeStream>() {
        Ok(stream) => return Ok(*stream),
        Err(raw) => raw,
    };
    let raw = match raw.downcast::<Vec<DynamicNode>>() {
        Ok(nodes) => return Ok(NodeStream::new(*nodes)),
        Err(raw) => raw,
    };
    let raw = match raw.downcast::<VecDeque<DynamicNode>>() {
        Ok(nodes) => return Ok(NodeStream::new(*nodes)),
        Err(raw) => raw,
    };
    let raw = match raw.downcast::<NodeIter>() {
        Ok(iter) => return Ok(NodeStream::new(*iter)),
        Err(raw) => raw,
    };
    let raw = match raw.downcast::<Vec<Box<dyn Any + Send>>>() {
        Ok(values) => return Ok(NodeStream::untyped(*values)),
        Err(raw) => raw,
    };
    let raw = match raw.downcast::<UntypedIter>() {
        Ok(iter) => return Ok(NodeStream::untyped(*iter)),
        Err(raw) => raw,
    };

    if raw.is::<DynamicNode>() {
        Err(ShapeError::SingleNode)
    } else {
        Err(ShapeError::UnsupportedShape)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::TraversalError;

    fn leaf(name: &str) -> DynamicNode {
        DynamicNode::test_sync(name, || Ok(()))
    }

    fn names(stream: NodeStream) -> Vec<String> {
        stream
            .map(|item| item.map(|node| node.display_name().to_string()))
            .collect::<Result<_, _>>()
            .unwrap()
    }

    #[test]
    fn test_every_accepted_shape_yields_nodes_in_order() {
        let shapes: Vec<FactoryResult> = vec![
            factory_result(vec![leaf("a"), leaf("b"), leaf("c")]),
            factory_result(VecDeque::from(vec![leaf("a"), leaf("b"), leaf("c")])),
            factory_result(Box::new(vec![leaf("a"), leaf("b"), leaf("c")].into_iter()) as NodeIter),
            factory_result(NodeStream::new(vec![leaf("a"), leaf("b"), leaf("c")])),
            factory_result(vec![
                Box::new(leaf("a")) as Box<dyn Any + Send>,
                Box::new(leaf("b")),
                Box::new(leaf("c")),
            ]),
        ];

        for raw in shapes {
            assert_eq!(names(normalize(raw).unwrap()), vec!["a", "b", "c"]);
        }
    }

    #[test]
    fn test_untyped_iterator_is_accepted() {
        let values: Vec<Box<dyn Any + Send>> = vec![Box::new(leaf("x"))];
        let raw = factory_result(Box::new(values.into_iter()) as UntypedIter);

        assert_eq!(names(normalize(raw).unwrap()), vec!["x"]);
    }

    #[test]
    fn test_single_node_is_rejected() {
        assert_eq!(normalize(factory_result(leaf("a"))).unwrap_err(), ShapeError::SingleNode);
    }

    #[test]
    fn test_scalars_and_foreign_sequences_are_rejected() {
        assert_eq!(normalize(factory_result(7u8)).unwrap_err(), ShapeError::UnsupportedShape);
        assert_eq!(
            normalize(factory_result(vec!["not", "nodes"])).unwrap_err(),
            ShapeError::UnsupportedShape
        );
    }

    #[test]
    fn test_untyped_sequence_with_foreign_element() {
        let raw = factory_result(vec![Box::new("nope") as Box<dyn Any + Send>]);
        let mut stream = normalize(raw).unwrap();

        assert!(matches!(
            stream.next(),
            Some(Err(TraversalError::Shape(ShapeError::UnclassifiableElement { index: 0 })))
        ));
    }
}
