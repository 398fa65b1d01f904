//! Vertex shader generator.

use spirv_module::{
    spirv::{ExecutionModel, StorageClass},
    Id, SpirvModule,
};

use crate::{
    codegen::StageCodeGen,
    common::CodeGenCore,
    per_vertex::PerVertexMember,
    program::ProgramType,
    types::PointerType,
    value::Pointer,
};

/// Generator for vertex shaders.
///
/// Construction opens the `main` function; instructions emitted through
/// the core land in its body until [`StageCodeGen::finalize`].
pub struct VertexCodeGen<'m> {
    core: CodeGenCore<'m>,
    per_vertex_out: Id,
}

impl<'m> VertexCodeGen<'m> {
    pub fn new(module: &'m mut SpirvModule) -> Self {
        let mut core = CodeGenCore::new(module);

        let per_vertex_type = core.def_per_vertex_block();
        let module = core.module_mut();
        let per_vertex_ptr = module.def_pointer_type(per_vertex_type, StorageClass::Output);
        let per_vertex_out = module.new_var(per_vertex_ptr, StorageClass::Output);
        module.set_debug_name(per_vertex_out, "vs_per_vertex");

        let void_type = module.def_void_type();
        let function_type = module.def_function_type(void_type, &[]);
        let entry_point_id = core.entry_point_id();
        let module = core.module_mut();
        module.function_begin(void_type, entry_point_id, function_type);
        let label = module.allocate_id();
        module.op_label(label);

        crate::debug_codegen!("vertex: main = {}, per-vertex output = {}", entry_point_id, per_vertex_out);

        Self {
            core,
            per_vertex_out,
        }
    }

    /// The `Output` variable holding the per-vertex block.
    pub fn per_vertex_output(&self) -> Id {
        self.per_vertex_out
    }

    /// Pointer to the position member of the per-vertex output.
    pub fn ptr_position(&mut self) -> Pointer {
        let ty = PointerType::new(
            PerVertexMember::Position.value_type(),
            StorageClass::Output,
        );
        let type_id = self.core.pointer_type_id(ty);
        let module = self.core.module_mut();
        let member = module.constant_u32(PerVertexMember::Position.index());
        let id = module.op_access_chain(type_id, self.per_vertex_out, &[member]);
        Pointer::new(ty, id)
    }
}

impl<'m> StageCodeGen<'m> for VertexCodeGen<'m> {
    fn program_type(&self) -> ProgramType {
        ProgramType::Vertex
    }

    fn core(&self) -> &CodeGenCore<'m> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut CodeGenCore<'m> {
        &mut self.core
    }

    fn finalize(mut self) -> Id {
        let entry_point_id = self.core.entry_point_id();
        let per_vertex_out = self.per_vertex_out;
        let module = self.core.module_mut();

        module.op_return();
        module.function_end();
        module.add_entry_point(entry_point_id, ExecutionModel::Vertex, "main", &[per_vertex_out]);
        module.set_debug_name(entry_point_id, "main");

        crate::debug_codegen!("vertex: finalized {}", entry_point_id);
        entry_point_id
    }
}

#[cfg(test)]
mod tests {
    use spirv_module::{spirv::Op, TypeDef};

    use super::*;
    use crate::types::{ScalarType, ValueType};

    #[test]
    fn test_vertex_opens_main() {
        let mut module = SpirvModule::new();
        let gen = VertexCodeGen::new(&mut module);
        let entry = gen.core().entry_point_id();
        let out = gen.per_vertex_output();

        let module = gen.core().module();
        let ops: Vec<Op> = module.code().iter().map(|i| i.opcode).collect();
        assert_eq!(ops, vec![Op::Function, Op::Label]);
        assert_eq!(module.code()[0].result, Some(entry));
        assert_eq!(module.variable(out).map(|v| v.storage), Some(StorageClass::Output));
        assert_eq!(module.debug_name(out), Some("vs_per_vertex"));
    }

    #[test]
    fn test_ptr_position_type() {
        let mut module = SpirvModule::new();
        let mut gen = VertexCodeGen::new(&mut module);
        let position = gen.ptr_position();

        assert_eq!(position.value_type(), ValueType::new(ScalarType::Float32, 4));
        assert_eq!(position.ty.storage_class, StorageClass::Output);

        let vec4 = gen.core_mut().value_type_id(position.value_type());
        let module = gen.core().module();
        let result_type = module.result_type(position.id).unwrap();
        assert_eq!(
            module.type_def(result_type),
            Some(&TypeDef::Pointer { pointee: vec4, storage: StorageClass::Output })
        );
    }

    #[test]
    fn test_finalize_declares_entry_point() {
        let mut module = SpirvModule::new();
        let gen = VertexCodeGen::new(&mut module);
        let out = gen.per_vertex_output();
        let entry = gen.finalize();

        let entry_points = module.entry_points();
        assert_eq!(entry_points.len(), 1);
        assert_eq!(entry_points[0].id, entry);
        assert_eq!(entry_points[0].model, ExecutionModel::Vertex);
        assert_eq!(entry_points[0].name, "main");
        assert_eq!(entry_points[0].interfaces, vec![out]);
        assert_eq!(module.debug_name(entry), Some("main"));
        assert_eq!(module.code().last().map(|i| i.opcode), Some(Op::FunctionEnd));
    }
}
