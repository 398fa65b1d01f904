//! Reference interpreter for module function bodies.
//!
//! Executes the straight-line memory and composite subset of SPIR-V that the
//! code generators emit, so tests can check what a module computes rather
//! than only what it looks like. Every module-scope variable starts out
//! zero-initialised.

use spirv::Op;

use crate::{
    error::{InterpError, InterpResult},
    id::Id,
    id_map::IdMap,
    inst::Inst,
    module::SpirvModule,
    types::{ConstDef, TypeDef},
};

/// A runtime value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Datum {
    /// Scalar bit pattern (floats are stored as their IEEE bits)
    Scalar(u64),
    /// Vector, array or struct
    Composite(Vec<Datum>),
    /// Pointer into a variable: the variable id plus a member/lane path
    Pointer { var: Id, path: Vec<u32> },
}

impl Datum {
    /// Scalar bit patterns of a vector (or a lone scalar as one lane).
    pub fn lanes(&self) -> Option<Vec<u64>> {
        match self {
            Datum::Scalar(bits) => Some(vec![*bits]),
            Datum::Composite(parts) => parts
                .iter()
                .map(|p| match p {
                    Datum::Scalar(bits) => Some(*bits),
                    _ => None,
                })
                .collect(),
            Datum::Pointer { .. } => None,
        }
    }

    /// Lanes reinterpreted as 32-bit floats.
    pub fn f32_lanes(&self) -> Option<Vec<f32>> {
        self.lanes()
            .map(|lanes| lanes.into_iter().map(|b| f32::from_bits(b as u32)).collect())
    }

    fn element(&self, index: u32) -> InterpResult<&Datum> {
        match self {
            Datum::Composite(parts) => parts.get(index as usize).ok_or(InterpError::IndexOutOfBounds {
                index,
                len: parts.len(),
            }),
            _ => Err(InterpError::NotAComposite),
        }
    }

    fn element_mut(&mut self, index: u32) -> InterpResult<&mut Datum> {
        match self {
            Datum::Composite(parts) => {
                let len = parts.len();
                parts
                    .get_mut(index as usize)
                    .ok_or(InterpError::IndexOutOfBounds { index, len })
            }
            _ => Err(InterpError::NotAComposite),
        }
    }

    fn at_path(&self, path: &[u32]) -> InterpResult<&Datum> {
        path.iter().try_fold(self, |datum, index| datum.element(*index))
    }

    fn at_path_mut(&mut self, path: &[u32]) -> InterpResult<&mut Datum> {
        let mut datum = self;
        for index in path {
            datum = datum.element_mut(*index)?;
        }
        Ok(datum)
    }
}

/// Interpreter state over one module.
pub struct Interpreter<'a> {
    module: &'a SpirvModule,
    /// Contents of module-scope variables
    memory: IdMap<Id, Datum>,
    /// Constants and instruction results
    values: IdMap<Id, Datum>,
    executed: u64,
}

impl<'a> Interpreter<'a> {
    /// Set up constants and zero-initialised variables for `module`.
    pub fn new(module: &'a SpirvModule) -> InterpResult<Self> {
        let mut interp = Self {
            module,
            memory: IdMap::new(),
            values: IdMap::new(),
            executed: 0,
        };

        for inst in module.globals() {
            let Some(id) = inst.result else { continue };
            match inst.opcode {
                Op::Constant | Op::ConstantComposite => {
                    let datum = interp.constant_value(id)?;
                    interp.values.insert(id, datum);
                }
                Op::Variable => {
                    let pointee = match module
                        .variable(id)
                        .and_then(|var| module.type_def(var.pointer_type))
                    {
                        Some(TypeDef::Pointer { pointee, .. }) => *pointee,
                        _ => return Err(InterpError::NotAPointer(id)),
                    };
                    let zero = interp.zero_value(pointee)?;
                    interp.memory.insert(id, zero);
                }
                _ => {}
            }
        }

        Ok(interp)
    }

    /// Build a fresh interpreter and run `entry` to completion.
    pub fn run(module: &'a SpirvModule, entry: Id) -> InterpResult<Self> {
        let mut interp = Self::new(module)?;
        interp.call(entry)?;
        Ok(interp)
    }

    /// Execute the body of function `entry`.
    pub fn call(&mut self, entry: Id) -> InterpResult<()> {
        let module = self.module;
        let code = module.code();
        let start = code
            .iter()
            .position(|inst| inst.opcode == Op::Function && inst.result == Some(entry))
            .ok_or(InterpError::UnknownFunction(entry))?;

        for inst in &code[start + 1..] {
            match inst.opcode {
                Op::FunctionEnd | Op::Return => return Ok(()),
                _ => self.step(inst)?,
            }
        }
        Err(InterpError::MissingFunctionEnd(entry))
    }

    /// Current contents of a module-scope variable.
    pub fn memory(&self, var: Id) -> Option<&Datum> {
        self.memory.get(var)
    }

    /// Value of a constant or executed instruction result.
    pub fn value(&self, id: Id) -> Option<&Datum> {
        self.values.get(id)
    }

    /// Number of instructions executed so far.
    pub fn executed(&self) -> u64 {
        self.executed
    }

    fn step(&mut self, inst: &Inst) -> InterpResult<()> {
        self.executed += 1;
        match inst.opcode {
            Op::Label => Ok(()),
            Op::Load => {
                let (var, path) = self.pointer(operand_id(inst, 0)?)?;
                let datum = self.read(var, &path)?;
                self.define(inst, datum)
            }
            Op::Store => {
                let (var, path) = self.pointer(operand_id(inst, 0)?)?;
                let object = self.operand(operand_id(inst, 1)?)?.clone();
                let slot = self
                    .memory
                    .get_mut(var)
                    .ok_or(InterpError::UndefinedId(var))?
                    .at_path_mut(&path)?;
                *slot = object;
                Ok(())
            }
            Op::AccessChain => {
                let (var, mut path) = self.pointer(operand_id(inst, 0)?)?;
                for index in 1..inst.operands.len() {
                    match self.operand(operand_id(inst, index)?)? {
                        Datum::Scalar(bits) => path.push(*bits as u32),
                        _ => return Err(InterpError::NotAComposite),
                    }
                }
                self.define(inst, Datum::Pointer { var, path })
            }
            Op::CompositeInsert => {
                let object = self.operand(operand_id(inst, 0)?)?.clone();
                let mut composite = self.operand(operand_id(inst, 1)?)?.clone();
                let path: Vec<u32> = inst.operands[2..]
                    .iter()
                    .filter_map(|op| op.as_literal())
                    .collect();
                *composite.at_path_mut(&path)? = object;
                self.define(inst, composite)
            }
            Op::VectorShuffle => {
                let mut lanes = self.vector_lanes(operand_id(inst, 0)?)?;
                lanes.extend(self.vector_lanes(operand_id(inst, 1)?)?);
                let mut result = Vec::with_capacity(inst.operands.len() - 2);
                for operand in &inst.operands[2..] {
                    let index = operand.as_literal().ok_or(InterpError::MissingOperand {
                        opcode: inst.opcode,
                        index: 2,
                    })?;
                    let lane = lanes.get(index as usize).ok_or(InterpError::IndexOutOfBounds {
                        index,
                        len: lanes.len(),
                    })?;
                    result.push(lane.clone());
                }
                self.define(inst, Datum::Composite(result))
            }
            other => Err(InterpError::UnsupportedInstruction(other)),
        }
    }

    fn define(&mut self, inst: &Inst, datum: Datum) -> InterpResult<()> {
        let result = inst.result.ok_or(InterpError::MissingOperand {
            opcode: inst.opcode,
            index: 0,
        })?;
        self.values.insert(result, datum);
        Ok(())
    }

    fn operand(&self, id: Id) -> InterpResult<&Datum> {
        self.values.get(id).ok_or(InterpError::UndefinedId(id))
    }

    fn vector_lanes(&self, id: Id) -> InterpResult<Vec<Datum>> {
        match self.operand(id)? {
            Datum::Composite(parts) => Ok(parts.clone()),
            _ => Err(InterpError::NotAComposite),
        }
    }

    /// Resolve a pointer operand: either a variable or an access chain.
    fn pointer(&self, id: Id) -> InterpResult<(Id, Vec<u32>)> {
        if self.memory.contains_key(id) {
            return Ok((id, Vec::new()));
        }
        match self.values.get(id) {
            Some(Datum::Pointer { var, path }) => Ok((*var, path.clone())),
            _ => Err(InterpError::NotAPointer(id)),
        }
    }

    fn read(&self, var: Id, path: &[u32]) -> InterpResult<Datum> {
        let root = self.memory.get(var).ok_or(InterpError::UndefinedId(var))?;
        Ok(root.at_path(path)?.clone())
    }

    fn constant_value(&self, id: Id) -> InterpResult<Datum> {
        match self.module.constant(id) {
            Some(ConstDef::Scalar { bits, .. }) => Ok(Datum::Scalar(*bits)),
            Some(ConstDef::Composite { parts, .. }) => parts
                .iter()
                .map(|part| self.operand(*part).cloned())
                .collect::<InterpResult<Vec<_>>>()
                .map(Datum::Composite),
            None => Err(InterpError::UndefinedId(id)),
        }
    }

    fn zero_value(&self, ty: Id) -> InterpResult<Datum> {
        match self.module.type_def(ty) {
            Some(TypeDef::Int { .. }) | Some(TypeDef::Float { .. }) => Ok(Datum::Scalar(0)),
            Some(TypeDef::Vector { component, count }) => {
                let lane = self.zero_value(*component)?;
                Ok(Datum::Composite(vec![lane; *count as usize]))
            }
            Some(TypeDef::Array { element, length }) => {
                let length = match self.module.constant(*length) {
                    Some(ConstDef::Scalar { bits, .. }) => *bits as usize,
                    _ => return Err(InterpError::UnsupportedType(ty)),
                };
                let element = self.zero_value(*element)?;
                Ok(Datum::Composite(vec![element; length]))
            }
            Some(TypeDef::Struct { members }) => members
                .iter()
                .map(|m| self.zero_value(*m))
                .collect::<InterpResult<Vec<_>>>()
                .map(Datum::Composite),
            _ => Err(InterpError::UnsupportedType(ty)),
        }
    }
}

fn operand_id(inst: &Inst, index: usize) -> InterpResult<Id> {
    inst.id_operand(index).ok_or(InterpError::MissingOperand {
        opcode: inst.opcode,
        index,
    })
}
