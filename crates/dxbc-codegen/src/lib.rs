//! Shared code generation core for translating DXBC shader programs into
//! SPIR-V modules.
//!
//! A [`CodeGen`] is created from the version token of a program and writes
//! into a caller-owned [`SpirvModule`]. Stage generators share a
//! [`CodeGenCore`], which owns the temporary register file and maps logical
//! [`ValueType`]s onto module type ids.
//!
//! Register writes are masked: only the components selected by a
//! [`ComponentMask`] change, the rest keep their previous value.

pub mod codegen;
pub mod common;
mod debug;
pub mod error;
pub mod mask;
pub mod per_vertex;
pub mod program;
pub mod regfile;
pub mod types;
pub mod value;
pub mod vertex;

pub use codegen::{CodeGen, StageCodeGen};
pub use common::{shuffle_components, CodeGenCore};
pub use error::{CodeGenError, CodeGenResult};
pub use mask::ComponentMask;
pub use per_vertex::PerVertexMember;
pub use program::{parse_program_header, ProgramHeader, ProgramType, ProgramVersion};
pub use regfile::RegisterFile;
pub use spirv_module::SpirvModule;
pub use types::{PointerType, ScalarType, ValueType};
pub use value::{Pointer, Value};
pub use vertex::VertexCodeGen;
