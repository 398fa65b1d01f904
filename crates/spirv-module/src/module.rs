//! The module builder.

use core::fmt;
use std::collections::HashMap;

use spirv::Op;

use crate::{
    id::Id,
    id_map::IdMap,
    inst::{Inst, Operand},
    types::{ConstDef, EntryPoint, TypeDef, Variable},
};

/// An in-memory SPIR-V module under construction.
///
/// Instructions are kept in separate sections following the SPIR-V logical
/// layout (capabilities, memory model, entry points, debug names,
/// annotations, global declarations, function code), so callers can emit
/// types and code in any interleaving.
///
/// Non-aggregate types and constants are deduplicated structurally. Struct
/// types always receive a fresh id since decorations are attached to it.
#[derive(Debug, Clone)]
pub struct SpirvModule {
    next_id: u32,
    capabilities: Vec<spirv::Capability>,
    memory_model: Option<(spirv::AddressingModel, spirv::MemoryModel)>,
    entry_points: Vec<EntryPoint>,
    debug_names: Vec<Inst>,
    annotations: Vec<Inst>,
    globals: Vec<Inst>,
    code: Vec<Inst>,
    type_cache: HashMap<TypeDef, Id>,
    const_cache: HashMap<ConstDef, Id>,
    types: IdMap<Id, TypeDef>,
    constants: IdMap<Id, ConstDef>,
    variables: IdMap<Id, Variable>,
    result_types: IdMap<Id, Id>,
}

impl SpirvModule {
    /// Create a new empty module.
    pub fn new() -> Self {
        Self {
            next_id: 1,
            capabilities: Vec::new(),
            memory_model: None,
            entry_points: Vec::new(),
            debug_names: Vec::new(),
            annotations: Vec::new(),
            globals: Vec::new(),
            code: Vec::new(),
            type_cache: HashMap::new(),
            const_cache: HashMap::new(),
            types: IdMap::new(),
            constants: IdMap::new(),
            variables: IdMap::new(),
            result_types: IdMap::new(),
        }
    }

    /// Allocate a fresh id.
    pub fn allocate_id(&mut self) -> Id {
        let id = Id::new(self.next_id);
        self.next_id += 1;
        id
    }

    /// Id bound: every id used in the module is strictly less than this.
    pub fn bound(&self) -> u32 {
        self.next_id
    }

    /// True if nothing at all has been emitted, not even an id allocation.
    pub fn is_empty(&self) -> bool {
        self.next_id == 1
            && self.capabilities.is_empty()
            && self.memory_model.is_none()
            && self.entry_points.is_empty()
            && self.debug_names.is_empty()
            && self.annotations.is_empty()
            && self.globals.is_empty()
            && self.code.is_empty()
    }

    // ---- module preamble -------------------------------------------------

    /// Declare a capability. Declaring it again is a no-op.
    pub fn enable_capability(&mut self, capability: spirv::Capability) {
        if !self.capabilities.contains(&capability) {
            self.capabilities.push(capability);
        }
    }

    pub fn set_memory_model(
        &mut self,
        addressing: spirv::AddressingModel,
        memory: spirv::MemoryModel,
    ) {
        self.memory_model = Some((addressing, memory));
    }

    pub fn add_entry_point(
        &mut self,
        id: Id,
        model: spirv::ExecutionModel,
        name: &str,
        interfaces: &[Id],
    ) {
        self.entry_points.push(EntryPoint {
            id,
            model,
            name: String::from(name),
            interfaces: interfaces.to_vec(),
        });
    }

    // ---- types -----------------------------------------------------------

    fn def_type(&mut self, def: TypeDef, operands: Vec<Operand>) -> Id {
        if let Some(id) = self.type_cache.get(&def) {
            return *id;
        }

        let opcode = match &def {
            TypeDef::Void => Op::TypeVoid,
            TypeDef::Int { .. } => Op::TypeInt,
            TypeDef::Float { .. } => Op::TypeFloat,
            TypeDef::Vector { .. } => Op::TypeVector,
            TypeDef::Array { .. } => Op::TypeArray,
            TypeDef::Pointer { .. } => Op::TypePointer,
            TypeDef::Function { .. } => Op::TypeFunction,
            TypeDef::Struct { .. } => Op::TypeStruct,
        };

        let id = self.allocate_id();
        self.globals
            .push(Inst::with_result(opcode, None, id, operands));
        if def.is_deduplicated() {
            self.type_cache.insert(def.clone(), id);
        }
        self.types.insert(id, def);
        id
    }

    pub fn def_void_type(&mut self) -> Id {
        self.def_type(TypeDef::Void, Vec::new())
    }

    pub fn def_int_type(&mut self, width: u32, signed: bool) -> Id {
        self.def_type(
            TypeDef::Int { width, signed },
            vec![Operand::Literal(width), Operand::Literal(signed as u32)],
        )
    }

    pub fn def_float_type(&mut self, width: u32) -> Id {
        self.def_type(TypeDef::Float { width }, vec![Operand::Literal(width)])
    }

    pub fn def_vector_type(&mut self, component: Id, count: u32) -> Id {
        self.def_type(
            TypeDef::Vector { component, count },
            vec![Operand::Id(component), Operand::Literal(count)],
        )
    }

    /// Declare an array type. `length` must be the id of an integer constant.
    pub fn def_array_type(&mut self, element: Id, length: Id) -> Id {
        self.def_type(
            TypeDef::Array { element, length },
            vec![Operand::Id(element), Operand::Id(length)],
        )
    }

    pub fn def_pointer_type(&mut self, pointee: Id, storage: spirv::StorageClass) -> Id {
        self.def_type(
            TypeDef::Pointer { pointee, storage },
            vec![Operand::StorageClass(storage), Operand::Id(pointee)],
        )
    }

    pub fn def_function_type(&mut self, ret: Id, params: &[Id]) -> Id {
        let mut operands = vec![Operand::Id(ret)];
        operands.extend(params.iter().map(|p| Operand::Id(*p)));
        self.def_type(
            TypeDef::Function {
                ret,
                params: params.to_vec(),
            },
            operands,
        )
    }

    /// Declare a struct type. Always returns a new id.
    pub fn def_struct_type(&mut self, members: &[Id]) -> Id {
        let operands = members.iter().map(|m| Operand::Id(*m)).collect();
        self.def_type(
            TypeDef::Struct {
                members: members.to_vec(),
            },
            operands,
        )
    }

    // ---- constants -------------------------------------------------------

    fn def_constant(&mut self, def: ConstDef, opcode: Op, operands: Vec<Operand>) -> Id {
        if let Some(id) = self.const_cache.get(&def) {
            return *id;
        }
        let id = self.allocate_id();
        self.globals
            .push(Inst::with_result(opcode, Some(def.ty()), id, operands));
        self.const_cache.insert(def.clone(), id);
        self.constants.insert(id, def);
        id
    }

    pub fn constant_u32(&mut self, value: u32) -> Id {
        let ty = self.def_int_type(32, false);
        self.def_constant(
            ConstDef::Scalar {
                ty,
                bits: value as u64,
            },
            Op::Constant,
            vec![Operand::Literal(value)],
        )
    }

    pub fn constant_f32(&mut self, value: f32) -> Id {
        let ty = self.def_float_type(32);
        let bits = value.to_bits();
        self.def_constant(
            ConstDef::Scalar {
                ty,
                bits: bits as u64,
            },
            Op::Constant,
            vec![Operand::FloatBits(bits)],
        )
    }

    pub fn constant_composite(&mut self, ty: Id, parts: &[Id]) -> Id {
        let operands = parts.iter().map(|p| Operand::Id(*p)).collect();
        self.def_constant(
            ConstDef::Composite {
                ty,
                parts: parts.to_vec(),
            },
            Op::ConstantComposite,
            operands,
        )
    }

    // ---- variables -------------------------------------------------------

    /// Declare a module-scope variable of the given pointer type.
    pub fn new_var(&mut self, pointer_type: Id, storage: spirv::StorageClass) -> Id {
        let id = self.allocate_id();
        self.globals.push(Inst::with_result(
            Op::Variable,
            Some(pointer_type),
            id,
            vec![Operand::StorageClass(storage)],
        ));
        self.variables.insert(
            id,
            Variable {
                pointer_type,
                storage,
            },
        );
        id
    }

    // ---- function code ---------------------------------------------------

    pub fn function_begin(&mut self, return_type: Id, id: Id, function_type: Id) {
        self.code.push(Inst::with_result(
            Op::Function,
            Some(return_type),
            id,
            vec![Operand::FunctionControlNone, Operand::Id(function_type)],
        ));
    }

    pub fn function_end(&mut self) {
        self.code.push(Inst::new(Op::FunctionEnd, Vec::new()));
    }

    pub fn op_label(&mut self, id: Id) {
        self.code
            .push(Inst::with_result(Op::Label, None, id, Vec::new()));
    }

    pub fn op_return(&mut self) {
        self.code.push(Inst::new(Op::Return, Vec::new()));
    }

    fn emit_value(&mut self, opcode: Op, result_type: Id, operands: Vec<Operand>) -> Id {
        let id = self.allocate_id();
        self.code
            .push(Inst::with_result(opcode, Some(result_type), id, operands));
        self.result_types.insert(id, result_type);
        id
    }

    pub fn op_load(&mut self, result_type: Id, pointer: Id) -> Id {
        self.emit_value(Op::Load, result_type, vec![Operand::Id(pointer)])
    }

    pub fn op_store(&mut self, pointer: Id, object: Id) {
        self.code.push(Inst::new(
            Op::Store,
            vec![Operand::Id(pointer), Operand::Id(object)],
        ));
    }

    /// Copy of `composite` with `object` inserted at the position addressed
    /// by `indices`.
    pub fn op_composite_insert(
        &mut self,
        result_type: Id,
        object: Id,
        composite: Id,
        indices: &[u32],
    ) -> Id {
        let mut operands = vec![Operand::Id(object), Operand::Id(composite)];
        operands.extend(indices.iter().map(|i| Operand::Literal(*i)));
        self.emit_value(Op::CompositeInsert, result_type, operands)
    }

    /// Two-source shuffle. Component `i` of the result selects lane
    /// `components[i]`, where lanes of `vector2` are numbered after all lanes
    /// of `vector1`.
    pub fn op_vector_shuffle(
        &mut self,
        result_type: Id,
        vector1: Id,
        vector2: Id,
        components: &[u32],
    ) -> Id {
        let mut operands = vec![Operand::Id(vector1), Operand::Id(vector2)];
        operands.extend(components.iter().map(|c| Operand::Literal(*c)));
        self.emit_value(Op::VectorShuffle, result_type, operands)
    }

    /// `indices` are ids of integer constants.
    pub fn op_access_chain(&mut self, result_type: Id, base: Id, indices: &[Id]) -> Id {
        let mut operands = vec![Operand::Id(base)];
        operands.extend(indices.iter().map(|i| Operand::Id(*i)));
        self.emit_value(Op::AccessChain, result_type, operands)
    }

    // ---- annotations -----------------------------------------------------

    pub fn decorate(&mut self, target: Id, decoration: spirv::Decoration, operands: Vec<Operand>) {
        let mut all = vec![Operand::Id(target), Operand::Decoration(decoration)];
        all.extend(operands);
        self.annotations.push(Inst::new(Op::Decorate, all));
    }

    pub fn decorate_block(&mut self, target: Id) {
        self.decorate(target, spirv::Decoration::Block, Vec::new());
    }

    pub fn member_decorate_builtin(&mut self, target: Id, member: u32, builtin: spirv::BuiltIn) {
        self.annotations.push(Inst::new(
            Op::MemberDecorate,
            vec![
                Operand::Id(target),
                Operand::Literal(member),
                Operand::Decoration(spirv::Decoration::BuiltIn),
                Operand::BuiltIn(builtin),
            ],
        ));
    }

    pub fn set_debug_name(&mut self, target: Id, name: &str) {
        self.debug_names.push(Inst::new(
            Op::Name,
            vec![Operand::Id(target), Operand::String(String::from(name))],
        ));
    }

    pub fn set_debug_member_name(&mut self, target: Id, member: u32, name: &str) {
        self.debug_names.push(Inst::new(
            Op::MemberName,
            vec![
                Operand::Id(target),
                Operand::Literal(member),
                Operand::String(String::from(name)),
            ],
        ));
    }

    // ---- introspection ---------------------------------------------------

    pub fn capabilities(&self) -> &[spirv::Capability] {
        &self.capabilities
    }

    pub fn memory_model(&self) -> Option<(spirv::AddressingModel, spirv::MemoryModel)> {
        self.memory_model
    }

    pub fn entry_points(&self) -> &[EntryPoint] {
        &self.entry_points
    }

    pub fn debug_names(&self) -> &[Inst] {
        &self.debug_names
    }

    pub fn annotations(&self) -> &[Inst] {
        &self.annotations
    }

    /// Types, constants and module-scope variables in declaration order.
    pub fn globals(&self) -> &[Inst] {
        &self.globals
    }

    /// Function code in emission order.
    pub fn code(&self) -> &[Inst] {
        &self.code
    }

    pub fn type_def(&self, id: Id) -> Option<&TypeDef> {
        self.types.get(id)
    }

    pub fn constant(&self, id: Id) -> Option<&ConstDef> {
        self.constants.get(id)
    }

    pub fn variable(&self, id: Id) -> Option<&Variable> {
        self.variables.get(id)
    }

    /// All module-scope variables in id order.
    pub fn variables(&self) -> impl Iterator<Item = (Id, &Variable)> {
        self.variables.iter()
    }

    /// Result type of a value produced in function code.
    pub fn result_type(&self, id: Id) -> Option<Id> {
        self.result_types.get(id).copied()
    }

    /// Number of function-code instructions with the given opcode.
    pub fn count_ops(&self, opcode: Op) -> usize {
        self.code.iter().filter(|inst| inst.opcode == opcode).count()
    }

    /// Debug name attached to `target` with `OpName`.
    pub fn debug_name(&self, target: Id) -> Option<&str> {
        self.debug_names.iter().find_map(|inst| match inst.operands.as_slice() {
            [Operand::Id(id), Operand::String(name)]
                if inst.opcode == Op::Name && *id == target =>
            {
                Some(name.as_str())
            }
            _ => None,
        })
    }

    /// Debug name attached to member `member` of `target`.
    pub fn debug_member_name(&self, target: Id, member: u32) -> Option<&str> {
        self.debug_names.iter().find_map(|inst| match inst.operands.as_slice() {
            [Operand::Id(id), Operand::Literal(m), Operand::String(name)]
                if inst.opcode == Op::MemberName && *id == target && *m == member =>
            {
                Some(name.as_str())
            }
            _ => None,
        })
    }

    /// Whether `target` carries `decoration` (without member index).
    pub fn has_decoration(&self, target: Id, decoration: spirv::Decoration) -> bool {
        self.annotations.iter().any(|inst| {
            inst.opcode == Op::Decorate
                && inst.id_operand(0) == Some(target)
                && inst.operands.get(1) == Some(&Operand::Decoration(decoration))
        })
    }

    /// Built-in tag attached to member `member` of `target`.
    pub fn member_builtin(&self, target: Id, member: u32) -> Option<spirv::BuiltIn> {
        self.annotations.iter().find_map(|inst| match inst.operands.as_slice() {
            [Operand::Id(id), Operand::Literal(m), Operand::Decoration(spirv::Decoration::BuiltIn), Operand::BuiltIn(builtin)]
                if inst.opcode == Op::MemberDecorate && *id == target && *m == member =>
            {
                Some(*builtin)
            }
            _ => None,
        })
    }
}

impl Default for SpirvModule {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SpirvModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "; Bound: {}", self.next_id)?;
        for capability in &self.capabilities {
            writeln!(f, "OpCapability {:?}", capability)?;
        }
        if let Some((addressing, memory)) = self.memory_model {
            writeln!(f, "OpMemoryModel {:?} {:?}", addressing, memory)?;
        }
        for entry in &self.entry_points {
            write!(f, "OpEntryPoint {:?} {} \"{}\"", entry.model, entry.id, entry.name)?;
            for interface in &entry.interfaces {
                write!(f, " {}", interface)?;
            }
            writeln!(f)?;
        }
        for inst in self
            .debug_names
            .iter()
            .chain(&self.annotations)
            .chain(&self.globals)
            .chain(&self.code)
        {
            writeln!(f, "{}", inst)?;
        }
        Ok(())
    }
}
