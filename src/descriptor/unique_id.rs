// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Serialize;
use std::fmt;

use crate::config::consts::ENGINE_SEGMENT_TYPE;

/// One `(type, value)` pair of a [`UniqueId`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Segment {
    kind: String,
    value: String,
}

impl Segment {
    pub fn new(kind: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            value: value.into(),
        }
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Characters that delimit segments in the string form, plus the escape character itself.
const RESERVED: [char; 5] = ['%', '[', ']', '/', ':'];

fn write_escaped(f: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
    for c in text.chars() {
        if RESERVED.contains(&c) {
            write!(f, "%{:02X}", c as u32)?;
        } else {
            write!(f, "{}", c)?;
        }
    }
    Ok(())
}

/// Renders as `[kind:value]`. Delimiter characters inside the type or value are
/// percent-encoded, so distinct ids never share a string form.
impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        write_escaped(f, &self.kind)?;
        write!(f, ":")?;
        write_escaped(f, &self.value)?;
        write!(f, "]")
    }
}

/// Immutable identifier of a descriptor: the chain of segments from the engine root down to it.
///
/// Appending never mutates the receiver; it returns a new id whose prefix is the receiver,
/// so a child id always reflects its full ancestor chain.
///
/// # Example
/// ```
/// use dynamic_tests::descriptor::UniqueId;
///
/// let root = UniqueId::for_engine("dynamic-tests");
/// let child = root.append("test-factory", "palindromes");
///
/// assert!(child.has_prefix(&root));
/// assert_eq!(child.to_string(), "[engine:dynamic-tests]/[test-factory:palindromes]");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct UniqueId {
    segments: Vec<Segment>,
}

impl UniqueId {
    /// Root id for an engine.
    pub fn for_engine(engine_id: &str) -> Self {
        Self {
            segments: vec![Segment::new(ENGINE_SEGMENT_TYPE, engine_id)],
        }
    }

    pub fn append(&self, kind: &str, value: &str) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend(self.segments.iter().cloned());
        segments.push(Segment::new(kind, value));
        Self { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn last_segment(&self) -> &Segment {
        // Every id is created through `for_engine`, so there is always at least one segment.
        &self.segments[self.segments.len() - 1]
    }

    /// True when `prefix` is this id or one of its ancestors.
    pub fn has_prefix(&self, prefix: &UniqueId) -> bool {
        self.segments.starts_with(&prefix.segments)
    }

    /// Number of segments, the engine root included.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for UniqueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, "/")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}
