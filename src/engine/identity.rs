// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

use crate::config::IdStrategy;

/// Generates the token part of a dynamic node's unique id segment.
///
/// Tokens are `"{display_name}#{suffix}"`, with a suffix that no other call on the same allocator
/// returns, so siblings sharing a display name never collide.
///
/// # Example
/// ```
/// use dynamic_tests::config::IdStrategy;
/// use dynamic_tests::engine::IdentityAllocator;
///
/// let allocator = IdentityAllocator::new(IdStrategy::Sequential);
/// assert_eq!(allocator.allocate("same"), "same#0");
/// assert_eq!(allocator.allocate("same"), "same#1");
/// ```
#[derive(Debug)]
pub struct IdentityAllocator {
    strategy: IdStrategy,
    next: AtomicU64,
}

impl IdentityAllocator {
    pub fn new(strategy: IdStrategy) -> Self {
        Self {
            strategy,
            next: AtomicU64::new(0),
        }
    }

    pub fn strategy(&self) -> IdStrategy {
        self.strategy
    }

    pub fn allocate(&self, display_name: &str) -> String {
        match self.strategy {
            IdStrategy::Random => format!("{}#{}", display_name, Uuid::new_v4()),
            IdStrategy::Sequential => {
                let n = self.next.fetch_add(1, Ordering::Relaxed);
                format!("{}#{}", display_name, n)
            }
        }
    }
}

impl Default for IdentityAllocator {
    fn default() -> Self {
        Self::new(IdStrategy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_random_tokens_never_repeat() {
        let allocator = IdentityAllocator::new(IdStrategy::Random);
        let tokens: HashSet<String> = (0..1000).map(|_| allocator.allocate("dup")).collect();

        assert_eq!(tokens.len(), 1000);
        assert!(tokens.iter().all(|t| t.starts_with("dup#")));
    }

    #[test]
    fn test_sequential_tokens_are_monotonic_across_names() {
        let allocator = IdentityAllocator::new(IdStrategy::Sequential);

        assert_eq!(allocator.allocate("a"), "a#0");
        assert_eq!(allocator.allocate("b"), "b#1");
        assert_eq!(allocator.allocate("a"), "a#2");
    }
}
