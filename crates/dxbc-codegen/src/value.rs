//! SSA value and pointer carriers.

use spirv_module::Id;

use crate::types::{PointerType, ValueType};

/// A single SSA result together with its logical type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Value {
    pub ty: ValueType,
    pub id: Id,
}

impl Value {
    pub fn new(ty: ValueType, id: Id) -> Self {
        Self { ty, id }
    }

    /// Number of lanes of this value.
    pub fn component_count(&self) -> u32 {
        self.ty.component_count
    }
}

/// An addressable storage location.
///
/// The id stays valid for the whole lifetime of the module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pointer {
    pub ty: PointerType,
    pub id: Id,
}

impl Pointer {
    pub fn new(ty: PointerType, id: Id) -> Self {
        Self { ty, id }
    }

    /// Type of the value stored behind this pointer.
    pub fn value_type(&self) -> ValueType {
        self.ty.value_type
    }
}
