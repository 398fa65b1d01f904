//! Instruction data.

use core::fmt;

use spirv::Op;

use crate::id::Id;

/// A single instruction operand.
///
/// Enumerant operands keep their `spirv` type so the disassembly can print
/// them by name.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// Reference to another id
    Id(Id),
    /// 32-bit literal integer (member index, component index, width, ...)
    Literal(u32),
    /// 32-bit float literal, stored as bits for Eq compatibility
    FloatBits(u32),
    /// Literal string
    String(String),
    StorageClass(spirv::StorageClass),
    BuiltIn(spirv::BuiltIn),
    Decoration(spirv::Decoration),
    /// Empty function-control mask
    FunctionControlNone,
}

impl Operand {
    /// The referenced id, if this operand is an id.
    pub fn as_id(&self) -> Option<Id> {
        match self {
            Operand::Id(id) => Some(*id),
            _ => None,
        }
    }

    /// The literal word, if this operand is an integer literal.
    pub fn as_literal(&self) -> Option<u32> {
        match self {
            Operand::Literal(word) | Operand::FloatBits(word) => Some(*word),
            _ => None,
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Id(id) => write!(f, "{}", id),
            Operand::Literal(word) => write!(f, "{}", word),
            Operand::FloatBits(bits) => write!(f, "{:?}", f32::from_bits(*bits)),
            Operand::String(s) => write!(f, "\"{}\"", s),
            Operand::StorageClass(v) => write!(f, "{:?}", v),
            Operand::BuiltIn(v) => write!(f, "{:?}", v),
            Operand::Decoration(v) => write!(f, "{:?}", v),
            Operand::FunctionControlNone => write!(f, "None"),
        }
    }
}

/// Instruction data (opcode + result + operands).
///
/// All instructions in a module, from type declarations to function body
/// code, share this uniform structure.
#[derive(Debug, Clone, PartialEq)]
pub struct Inst {
    /// The operation this instruction performs
    pub opcode: Op,
    /// Result type id, for instructions that produce a typed value
    pub result_type: Option<Id>,
    /// Result id, for instructions that define one
    pub result: Option<Id>,
    /// Remaining operands in encoding order
    pub operands: Vec<Operand>,
}

impl Inst {
    /// Create an instruction without result.
    pub fn new(opcode: Op, operands: Vec<Operand>) -> Self {
        Self {
            opcode,
            result_type: None,
            result: None,
            operands,
        }
    }

    /// Create an instruction defining `result`.
    pub fn with_result(
        opcode: Op,
        result_type: Option<Id>,
        result: Id,
        operands: Vec<Operand>,
    ) -> Self {
        Self {
            opcode,
            result_type,
            result: Some(result),
            operands,
        }
    }

    /// Id operand at position `index`.
    pub fn id_operand(&self, index: usize) -> Option<Id> {
        self.operands.get(index).and_then(Operand::as_id)
    }

    /// Literal operand at position `index`.
    pub fn literal_operand(&self, index: usize) -> Option<u32> {
        self.operands.get(index).and_then(Operand::as_literal)
    }
}

impl fmt::Display for Inst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(result) = self.result {
            write!(f, "{} = ", result)?;
        }
        write!(f, "Op{:?}", self.opcode)?;
        if let Some(result_type) = self.result_type {
            write!(f, " {}", result_type)?;
        }
        for operand in &self.operands {
            write!(f, " {}", operand)?;
        }
        Ok(())
    }
}
