// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod test_descriptor;
mod unique_id;

pub use test_descriptor::{
    DescriptorKind, DescriptorParent, DescriptorType, Executable, TestDescriptor, TestSource,
};
pub(crate) use test_descriptor::{collect_descendants, push_child};
pub use unique_id::{Segment, UniqueId};
