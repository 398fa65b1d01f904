//! Error types for the reference interpreter.

use crate::id::Id;

/// Result type for interpreter operations.
pub type InterpResult<T> = Result<T, InterpError>;

/// Errors that can occur while interpreting a module.
#[derive(Debug, Clone, PartialEq)]
pub enum InterpError {
    /// No `OpFunction` with this result id.
    UnknownFunction(Id),
    /// The function body is not terminated by `OpFunctionEnd`.
    MissingFunctionEnd(Id),
    /// An operand refers to an id that has no value yet.
    UndefinedId(Id),
    /// A load/store/access-chain operand is not a pointer.
    NotAPointer(Id),
    /// Indexing into a scalar.
    NotAComposite,
    /// Component or member index past the end of a composite.
    IndexOutOfBounds { index: u32, len: usize },
    /// An instruction lacks a required operand.
    MissingOperand { opcode: spirv::Op, index: usize },
    /// Opcode outside the interpreted subset.
    UnsupportedInstruction(spirv::Op),
    /// A variable of a type that cannot be zero-initialised.
    UnsupportedType(Id),
}

impl core::fmt::Display for InterpError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            InterpError::UnknownFunction(id) => write!(f, "No function with id {}", id),
            InterpError::MissingFunctionEnd(id) => {
                write!(f, "Function {} is not terminated by OpFunctionEnd", id)
            }
            InterpError::UndefinedId(id) => write!(f, "Use of undefined id {}", id),
            InterpError::NotAPointer(id) => write!(f, "Id {} is not a pointer", id),
            InterpError::NotAComposite => write!(f, "Cannot index into a scalar value"),
            InterpError::IndexOutOfBounds { index, len } => write!(
                f,
                "Index {} out of bounds for composite of {} elements",
                index, len
            ),
            InterpError::MissingOperand { opcode, index } => {
                write!(f, "Op{:?} is missing operand {}", opcode, index)
            }
            InterpError::UnsupportedInstruction(opcode) => {
                write!(f, "Unsupported instruction Op{:?}", opcode)
            }
            InterpError::UnsupportedType(id) => {
                write!(f, "Cannot materialise a value of type {}", id)
            }
        }
    }
}

impl std::error::Error for InterpError {}
