//! Result id system.
//!
//! Every type, constant, variable, function, label and instruction result in
//! a SPIR-V module is named by a single `<id>`. Ids are allocated from one
//! counter per module, start at 1 and are never reused.

use core::fmt;

/// Base trait for index-like references (like CLIF's EntityRef).
///
/// Provides O(1) conversion to/from a dense index so that ids can key
/// vector-backed maps.
pub trait EntityRef: Copy + Clone + PartialEq + Eq + core::hash::Hash + fmt::Debug {
    /// Get the index of this entity
    fn index(self) -> usize;

    /// Create an entity from an index
    fn from_index(index: usize) -> Self;

    /// Get the next available index
    fn next_index(self) -> Self {
        Self::from_index(self.index() + 1)
    }
}

/// A SPIR-V result id.
///
/// Id 0 is reserved by the SPIR-V format and is never handed out by a
/// module, so a freshly allocated id is always `>= 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id(u32);

impl Id {
    /// Create an id from its raw word.
    pub fn new(word: u32) -> Self {
        Id(word)
    }

    /// Raw word value of this id.
    pub fn word(self) -> u32 {
        self.0
    }
}

impl EntityRef for Id {
    fn index(self) -> usize {
        self.0 as usize
    }

    fn from_index(index: usize) -> Self {
        Id(index as u32)
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "%{}", self.0)
    }
}
