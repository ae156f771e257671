//! Registry identifiers.

use serde::{Deserialize, Serialize};

/// Key of one registered trigger binding.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct BindingId(pub u32);

/// Key of one registered sequence group.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct GroupId(pub u32);

/// Hands out fresh ids for the sequencer's registry tables. Ids are never
/// reused within a sequencer's lifetime.
#[derive(Default, Debug)]
pub struct IdAllocator {
    bindings: u32,
    groups: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc_binding(&mut self) -> BindingId {
        let id = BindingId(self.bindings);
        self.bindings += 1;
        id
    }

    pub fn alloc_group(&mut self) -> GroupId {
        let id = GroupId(self.groups);
        self.groups += 1;
        id
    }
}
