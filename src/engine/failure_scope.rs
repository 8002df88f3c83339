// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use futures::FutureExt;
use std::future::Future;
use std::panic::AssertUnwindSafe;

use crate::errors::DynamicTestError;
use crate::utils::panic_message;

/// Final result of a test factory node.
///
/// Only failures that escaped the factory node's own boundary end up here; the outcomes of
/// dynamic tests are whatever the executor recorded for them.
#[derive(Debug)]
pub enum NodeOutcome {
    Successful,
    Failed {
        error: DynamicTestError,
        /// Failures caught after `error` was already recorded.
        suppressed: Vec<DynamicTestError>,
    },
}

impl NodeOutcome {
    pub fn is_successful(&self) -> bool {
        matches!(self, NodeOutcome::Successful)
    }

    pub fn error(&self) -> Option<&DynamicTestError> {
        match self {
            NodeOutcome::Successful => None,
            NodeOutcome::Failed { error, .. } => Some(error),
        }
    }
}

/// Failure boundary of one test factory node.
///
/// Every piece of work run through the scope has its escaping failure caught and recorded;
/// nothing is retried. The first recorded failure becomes the node's result and later ones are
/// kept as suppressed.
///
/// # Example
/// ```
/// use dynamic_tests::engine::FailureScope;
/// use dynamic_tests::errors::DynamicTestError;
///
/// # #[tokio::main]
/// # async fn main() {
/// let mut scope = FailureScope::new("palindromes", true);
/// scope
///     .run(async {
///         Err(DynamicTestError::FactoryInvocation {
///             factory: "palindromes".to_string(),
///             cause: anyhow::anyhow!("no words"),
///         })
///     })
///     .await;
///
/// assert!(!scope.into_outcome().is_successful());
/// # }
/// ```
#[derive(Debug)]
pub struct FailureScope {
    factory: String,
    catch_panics: bool,
    failure: Option<DynamicTestError>,
    suppressed: Vec<DynamicTestError>,
}

impl FailureScope {
    pub fn new(factory: impl Into<String>, catch_panics: bool) -> Self {
        Self {
            factory: factory.into(),
            catch_panics,
            failure: None,
            suppressed: Vec::new(),
        }
    }

    /// Run `work` to completion and record its failure, if any.
    ///
    /// With `catch_panics` set, a panic inside `work` is recorded as
    /// [`DynamicTestError::Panicked`] instead of unwinding further.
    pub async fn run<Fut>(&mut self, work: Fut)
    where
        Fut: Future<Output = Result<(), DynamicTestError>>,
    {
        let result = if self.catch_panics {
            match AssertUnwindSafe(work).catch_unwind().await {
                Ok(result) => result,
                Err(payload) => Err(DynamicTestError::Panicked {
                    factory: self.factory.clone(),
                    message: panic_message(payload.as_ref()),
                }),
            }
        } else {
            work.await
        };

        if let Err(error) = result {
            self.record(error);
        }
    }

    pub fn record(&mut self, error: DynamicTestError) {
        if self.failure.is_none() {
            self.failure = Some(error);
        } else {
            self.suppressed.push(error);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.failure.is_none()
    }

    pub fn failure(&self) -> Option<&DynamicTestError> {
        self.failure.as_ref()
    }

    pub fn into_outcome(self) -> NodeOutcome {
        match self.failure {
            None => NodeOutcome::Successful,
            Some(error) => NodeOutcome::Failed {
                error,
                suppressed: self.suppressed,
            },
        }
    }
}
