// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Terminal failures of a test factory node.

use thiserror::Error;

use super::shape::{ShapeError, ACCEPTED_SHAPES};

/// A failure that escaped a factory's invocation or the expansion of its dynamic tree.
///
/// Each value is recorded exactly once, as the result of the enclosing factory node. Results
/// already recorded for descendants that completed before the failure are left untouched.
#[derive(Debug, Error)]
pub enum DynamicTestError {
    /// The factory result, or one of its elements, has an unsupported shape.
    #[error("test factory [{factory}] must return {accepted}", accepted = ACCEPTED_SHAPES)]
    InvalidFactoryResult {
        factory: String,
        #[source]
        cause: ShapeError,
    },

    /// The factory body itself failed.
    #[error("test factory [{factory}] failed: {cause}")]
    FactoryInvocation {
        factory: String,
        #[source]
        cause: anyhow::Error,
    },

    /// Expanding or executing one descendant failed. `unique_id` names the descendant, or the
    /// container whose producer failed.
    #[error("dynamic node {unique_id} failed during expansion: {cause}")]
    DescendantExecution {
        unique_id: String,
        #[source]
        cause: anyhow::Error,
    },

    /// Releasing the resource behind a node stream failed after traversal otherwise succeeded.
    #[error("closing node stream of {unique_id} failed: {cause}")]
    StreamClose {
        unique_id: String,
        #[source]
        cause: anyhow::Error,
    },

    /// Code running inside the failure scope panicked.
    #[error("test factory [{factory}] panicked: {message}")]
    Panicked { factory: String, message: String },
}

impl DynamicTestError {
    /// Short stable name of the variant, used in logs and reports.
    pub fn kind(&self) -> &'static str {
        match self {
            DynamicTestError::InvalidFactoryResult { .. } => "invalid_factory_result",
            DynamicTestError::FactoryInvocation { .. } => "factory_invocation",
            DynamicTestError::DescendantExecution { .. } => "descendant_execution",
            DynamicTestError::StreamClose { .. } => "stream_close",
            DynamicTestError::Panicked { .. } => "panicked",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_invalid_result_names_factory_and_shapes() {
        let err = DynamicTestError::InvalidFactoryResult {
            factory: "palindromes".to_string(),
            cause: ShapeError::SingleNode,
        };

        let message = err.to_string();
        assert!(message.contains("[palindromes]"));
        assert!(message.contains(ACCEPTED_SHAPES));
        assert_eq!(err.source().map(|s| s.to_string()), Some(ShapeError::SingleNode.to_string()));
    }

    #[test]
    fn test_kind_is_stable() {
        let err = DynamicTestError::FactoryInvocation {
            factory: "f".to_string(),
            cause: anyhow::anyhow!("boom"),
        };
        assert_eq!(err.kind(), "factory_invocation");
        assert!(err.to_string().contains("boom"));
    }
}
