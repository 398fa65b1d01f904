//! Type and constant definitions.

use crate::id::Id;

/// Structural description of a type declared in a module.
///
/// Everything except `Struct` is used as a deduplication key: declaring the
/// same structure twice yields the same id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeDef {
    Void,
    Int { width: u32, signed: bool },
    Float { width: u32 },
    Vector { component: Id, count: u32 },
    /// `length` is the id of an integer constant
    Array { element: Id, length: Id },
    Pointer { pointee: Id, storage: spirv::StorageClass },
    Function { ret: Id, params: Vec<Id> },
    Struct { members: Vec<Id> },
}

impl TypeDef {
    /// Whether declarations of this type may be shared between call sites.
    pub fn is_deduplicated(&self) -> bool {
        !matches!(self, TypeDef::Struct { .. })
    }

    /// Number of lanes for a vector type, 1 for scalars.
    pub fn component_count(&self) -> Option<u32> {
        match self {
            TypeDef::Int { .. } | TypeDef::Float { .. } => Some(1),
            TypeDef::Vector { count, .. } => Some(*count),
            _ => None,
        }
    }
}

/// Structural description of a constant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ConstDef {
    /// Scalar constant; `bits` holds the value's bit pattern
    Scalar { ty: Id, bits: u64 },
    Composite { ty: Id, parts: Vec<Id> },
}

impl ConstDef {
    /// Type id of the constant.
    pub fn ty(&self) -> Id {
        match self {
            ConstDef::Scalar { ty, .. } | ConstDef::Composite { ty, .. } => *ty,
        }
    }
}

/// A module-scope `OpVariable`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Variable {
    /// Pointer type id of the variable
    pub pointer_type: Id,
    pub storage: spirv::StorageClass,
}

/// An `OpEntryPoint` declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryPoint {
    pub id: Id,
    pub model: spirv::ExecutionModel,
    pub name: String,
    /// Global variables forming the entry point's interface
    pub interfaces: Vec<Id>,
}
