//! Stage-specific generator selection.

use spirv_module::{Id, SpirvModule};

use crate::{
    common::CodeGenCore,
    error::{CodeGenError, CodeGenResult},
    program::{ProgramType, ProgramVersion},
    vertex::VertexCodeGen,
};

/// Behavior shared by every stage generator.
///
/// Stage generators own a [`CodeGenCore`] for the shared register and type
/// machinery and add whatever built-in interface their stage needs.
pub trait StageCodeGen<'m> {
    fn program_type(&self) -> ProgramType;

    fn core(&self) -> &CodeGenCore<'m>;

    fn core_mut(&mut self) -> &mut CodeGenCore<'m>;

    /// Close the entry function and declare the entry point.
    ///
    /// Returns the id of the entry function.
    fn finalize(self) -> Id
    where
        Self: Sized;
}

/// A generator for one of the supported shader stages.
pub enum CodeGen<'m> {
    Vertex(VertexCodeGen<'m>),
}

impl<'m> CodeGen<'m> {
    /// Create the generator matching the program type of `version`.
    ///
    /// Unsupported stages fail before anything is written to `module`.
    pub fn create(version: &ProgramVersion, module: &'m mut SpirvModule) -> CodeGenResult<Self> {
        crate::debug_codegen!("creating generator for {}", version);
        match version.program_type() {
            ProgramType::Vertex => Ok(CodeGen::Vertex(VertexCodeGen::new(module))),
            ty @ (ProgramType::Pixel
            | ProgramType::Geometry
            | ProgramType::Hull
            | ProgramType::Domain
            | ProgramType::Compute) => {
                crate::debug_codegen!("no generator for {}", ty);
                Err(CodeGenError::UnsupportedProgramType(ty))
            }
        }
    }

    pub fn program_type(&self) -> ProgramType {
        match self {
            CodeGen::Vertex(gen) => gen.program_type(),
        }
    }

    pub fn core(&self) -> &CodeGenCore<'m> {
        match self {
            CodeGen::Vertex(gen) => gen.core(),
        }
    }

    pub fn core_mut(&mut self) -> &mut CodeGenCore<'m> {
        match self {
            CodeGen::Vertex(gen) => gen.core_mut(),
        }
    }

    pub fn as_vertex_mut(&mut self) -> Option<&mut VertexCodeGen<'m>> {
        match self {
            CodeGen::Vertex(gen) => Some(gen),
        }
    }

    pub fn finalize(self) -> Id {
        match self {
            CodeGen::Vertex(gen) => gen.finalize(),
        }
    }
}
