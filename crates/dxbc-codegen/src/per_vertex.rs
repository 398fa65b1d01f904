//! Built-in per-vertex interface block.

use spirv_module::{spirv::BuiltIn, Id};

use crate::{
    common::CodeGenCore,
    types::{ScalarType, ValueType},
};

/// Members of the per-vertex block, by member index.
///
/// Order and built-in tags are fixed by the consuming runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PerVertexMember {
    Position = 0,
    PointSize = 1,
    CullDist = 2,
    ClipDist = 3,
}

impl PerVertexMember {
    pub const ALL: [PerVertexMember; 4] = [
        PerVertexMember::Position,
        PerVertexMember::PointSize,
        PerVertexMember::CullDist,
        PerVertexMember::ClipDist,
    ];

    pub fn index(self) -> u32 {
        self as u32
    }

    pub fn value_type(self) -> ValueType {
        match self {
            PerVertexMember::Position => ValueType::new(ScalarType::Float32, 4),
            PerVertexMember::PointSize => ValueType::new(ScalarType::Float32, 1),
            PerVertexMember::CullDist | PerVertexMember::ClipDist => {
                ValueType::array(ScalarType::Float32, 1, 2)
            }
        }
    }

    pub fn builtin(self) -> BuiltIn {
        match self {
            PerVertexMember::Position => BuiltIn::Position,
            PerVertexMember::PointSize => BuiltIn::PointSize,
            PerVertexMember::CullDist => BuiltIn::CullDistance,
            PerVertexMember::ClipDist => BuiltIn::ClipDistance,
        }
    }

    pub fn debug_name(self) -> &'static str {
        match self {
            PerVertexMember::Position => "position",
            PerVertexMember::PointSize => "point_size",
            PerVertexMember::CullDist => "cull_dist",
            PerVertexMember::ClipDist => "clip_dist",
        }
    }
}

impl<'m> CodeGenCore<'m> {
    /// Declare the `per_vertex` block struct and return its type id.
    ///
    /// Every call declares a new struct with its own decorations.
    pub fn def_per_vertex_block(&mut self) -> Id {
        let members: Vec<Id> = PerVertexMember::ALL
            .iter()
            .map(|member| self.value_type_id(member.value_type()))
            .collect();

        let module = self.module_mut();
        let type_id = module.def_struct_type(&members);

        for member in PerVertexMember::ALL {
            module.member_decorate_builtin(type_id, member.index(), member.builtin());
        }
        module.decorate_block(type_id);

        module.set_debug_name(type_id, "per_vertex");
        for member in PerVertexMember::ALL {
            module.set_debug_member_name(type_id, member.index(), member.debug_name());
        }

        type_id
    }
}

#[cfg(test)]
mod tests {
    use spirv_module::{spirv::Decoration, SpirvModule, TypeDef};

    use super::*;

    #[test]
    fn test_member_table() {
        assert_eq!(PerVertexMember::Position.index(), 0);
        assert_eq!(PerVertexMember::ClipDist.index(), 3);
        assert_eq!(PerVertexMember::CullDist.builtin(), BuiltIn::CullDistance);
        assert_eq!(
            PerVertexMember::PointSize.value_type(),
            ValueType::new(ScalarType::Float32, 1)
        );
    }

    #[test]
    fn test_per_vertex_block_layout() {
        let mut module = SpirvModule::new();
        let mut core = CodeGenCore::new(&mut module);
        let block = core.def_per_vertex_block();

        let vec4 = core.value_type_id(ValueType::new(ScalarType::Float32, 4));
        let f32_t = core.scalar_type_id(ScalarType::Float32);
        let arr2 = core.value_type_id(ValueType::array(ScalarType::Float32, 1, 2));

        let module = core.module();
        assert_eq!(
            module.type_def(block),
            Some(&TypeDef::Struct {
                members: vec![vec4, f32_t, arr2, arr2]
            })
        );
        assert!(module.has_decoration(block, Decoration::Block));
        assert_eq!(module.debug_name(block), Some("per_vertex"));
        for member in PerVertexMember::ALL {
            assert_eq!(module.member_builtin(block, member.index()), Some(member.builtin()));
            assert_eq!(
                module.debug_member_name(block, member.index()),
                Some(member.debug_name())
            );
        }
    }

    #[test]
    fn test_per_vertex_block_is_fresh_each_call() {
        let mut module = SpirvModule::new();
        let mut core = CodeGenCore::new(&mut module);
        let a = core.def_per_vertex_block();
        let b = core.def_per_vertex_block();
        assert_ne!(a, b);
        assert_eq!(core.module().member_builtin(b, 0), Some(BuiltIn::Position));
    }
}
