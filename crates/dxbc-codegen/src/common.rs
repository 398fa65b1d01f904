//! Code generation state shared by every shader stage.
//!
//! `CodeGenCore` owns the module handle for one compilation and provides the
//! primitives stage generators are built on: the type registry, the
//! temporary register file, and masked register loads and stores.

use spirv_module::{
    spirv::{AddressingModel, Capability, MemoryModel, StorageClass},
    Id, SpirvModule,
};

use crate::{
    mask::ComponentMask,
    regfile::RegisterFile,
    types::{PointerType, ScalarType, ValueType},
    value::{Pointer, Value},
};

/// Shared generator state for one program compilation.
pub struct CodeGenCore<'m> {
    module: &'m mut SpirvModule,
    entry_point_id: Id,
    temps: RegisterFile,
}

impl<'m> CodeGenCore<'m> {
    /// Emit the module preamble and reserve the entry point id.
    pub fn new(module: &'m mut SpirvModule) -> Self {
        module.enable_capability(Capability::Shader);
        module.set_memory_model(AddressingModel::Logical, MemoryModel::GLSL450);
        let entry_point_id = module.allocate_id();

        Self {
            module,
            entry_point_id,
            temps: RegisterFile::new(),
        }
    }

    pub fn module(&self) -> &SpirvModule {
        &*self.module
    }

    pub fn module_mut(&mut self) -> &mut SpirvModule {
        &mut *self.module
    }

    /// Id reserved for the stage's entry point function.
    pub fn entry_point_id(&self) -> Id {
        self.entry_point_id
    }

    // ---- type registry ---------------------------------------------------

    pub fn scalar_type_id(&mut self, ty: ScalarType) -> Id {
        if ty.is_float() {
            self.module.def_float_type(ty.bit_width())
        } else {
            self.module.def_int_type(ty.bit_width(), ty.is_signed())
        }
    }

    /// Scalar, then vector, then array, in that order.
    pub fn value_type_id(&mut self, ty: ValueType) -> Id {
        let mut type_id = self.scalar_type_id(ty.component_type);

        if ty.component_count > 1 {
            type_id = self.module.def_vector_type(type_id, ty.component_count);
        }

        if ty.element_count > 0 {
            let length = self.module.constant_u32(ty.element_count);
            type_id = self.module.def_array_type(type_id, length);
        }

        type_id
    }

    pub fn pointer_type_id(&mut self, ty: PointerType) -> Id {
        let value_type_id = self.value_type_id(ty.value_type);
        self.module.def_pointer_type(value_type_id, ty.storage_class)
    }

    // ---- constants -------------------------------------------------------

    pub fn const_f32(&mut self, value: f32) -> Value {
        let id = self.module.constant_f32(value);
        Value::new(ValueType::new(ScalarType::Float32, 1), id)
    }

    /// Float vector constant with one lane per element of `values`.
    ///
    /// # Panics
    ///
    /// Panics if `values` does not have 1 to 4 elements.
    pub fn const_f32_vector(&mut self, values: &[f32]) -> Value {
        if let [value] = values {
            return self.const_f32(*value);
        }
        let ty = ValueType::new(ScalarType::Float32, values.len() as u32);
        let type_id = self.value_type_id(ty);
        let lanes: Vec<Id> = values
            .iter()
            .map(|v| self.module.constant_f32(*v))
            .collect();
        let id = self.module.constant_composite(type_id, &lanes);
        Value::new(ty, id)
    }

    // ---- register file ---------------------------------------------------

    /// Make sure at least `n` temporary registers exist.
    ///
    /// New registers are `vec4<f32>` variables in the Private storage class,
    /// named `r<index>`. Already declared registers are left untouched.
    pub fn declare_temps(&mut self, n: u32) {
        if n <= self.temps.len() {
            return;
        }

        let reg_type = PointerType::new(
            ValueType::new(ScalarType::Float32, 4),
            StorageClass::Private,
        );
        let type_id = self.pointer_type_id(reg_type);

        let module = &mut *self.module;
        let added = self.temps.ensure_len(n, |index| {
            let id = module.new_var(type_id, StorageClass::Private);
            module.set_debug_name(id, &format!("r{}", index));
            Pointer::new(reg_type, id)
        });

        crate::debug_codegen!("declare_temps: added {} registers, now {}", added, n);
    }

    /// Pointer backing temporary register `index`.
    ///
    /// # Panics
    ///
    /// Panics if fewer than `index + 1` registers have been declared.
    pub fn temp_register(&self, index: u32) -> Pointer {
        match self.temps.get(index) {
            Some(ptr) => ptr,
            None => panic!(
                "temporary register r{} used but only {} declared",
                index,
                self.temps.len()
            ),
        }
    }

    pub fn temp_count(&self) -> u32 {
        self.temps.len()
    }

    // ---- masked writes ---------------------------------------------------

    /// Merge `src` into `dst` under `mask`. The result has `dst`'s type.
    ///
    /// - Scalar destination: picks `src` or `dst` by lane 0 of the mask,
    ///   without emitting anything.
    /// - Scalar source: inserts `src` into the first masked lane of `dst`.
    ///   Further mask bits are ignored.
    /// - Two vectors: one shuffle over both, see [`shuffle_components`].
    pub fn merge(&mut self, dst: Value, src: Value, mask: ComponentMask) -> Value {
        if dst.component_count() == 1 {
            return if mask.test(0) {
                Value::new(dst.ty, src.id)
            } else {
                dst
            };
        }

        if src.component_count() == 1 {
            // OpVectorShuffle needs two vector operands
            let Some(component) = mask.first_component() else {
                return dst;
            };
            if mask.count() > 1 {
                crate::debug_codegen!(
                    "merge: scalar source with mask {}, writing lane {} only",
                    mask,
                    component
                );
            }
            let type_id = self.value_type_id(dst.ty);
            let id = self
                .module
                .op_composite_insert(type_id, src.id, dst.id, &[component]);
            return Value::new(dst.ty, id);
        }

        let components =
            shuffle_components(dst.component_count(), src.component_count(), mask);
        let type_id = self.value_type_id(dst.ty);
        let id = self
            .module
            .op_vector_shuffle(type_id, dst.id, src.id, &components);
        Value::new(dst.ty, id)
    }

    /// Load the full value behind `ptr`.
    pub fn reg_load(&mut self, ptr: Pointer) -> Value {
        let ty = ptr.value_type();
        let type_id = self.value_type_id(ty);
        let id = self.module.op_load(type_id, ptr.id);
        Value::new(ty, id)
    }

    /// Store `val` into the lanes of `ptr` selected by `mask`.
    ///
    /// A value as wide as the register, written under a mask covering every
    /// lane, is stored directly. Anything else costs an extra load so the
    /// unmasked lanes keep their contents.
    pub fn reg_store(&mut self, ptr: Pointer, val: Value, mask: ComponentMask) {
        let count = ptr.value_type().component_count;
        let covers_all = val.component_count() == count && mask == ComponentMask::first_n(count);
        if !covers_all {
            let current = self.reg_load(ptr);
            let merged = self.merge(current, val, mask);
            self.module.op_store(ptr.id, merged.id);
        } else {
            self.module.op_store(ptr.id, val.id);
        }
    }
}

/// Shuffle selectors for merging `src` into `dst` under `mask`.
///
/// Lanes of `src` are numbered after the `dst_count` lanes of `dst`. With
/// equal widths, a masked lane `i` selects `dst_count + i`. A narrower
/// `src` is packed: the k-th masked lane selects `dst_count + k`.
///
/// # Panics
///
/// Panics if `mask` selects more lanes than a packed `src` has.
pub fn shuffle_components(dst_count: u32, src_count: u32, mask: ComponentMask) -> Vec<u32> {
    let packed = src_count < dst_count;
    let mut next_src = dst_count;

    (0..dst_count)
        .map(|i| {
            if !mask.test(i) {
                i
            } else if packed {
                let selector = next_src;
                next_src += 1;
                assert!(
                    selector < dst_count + src_count,
                    "mask {} selects more lanes than the source has",
                    mask
                );
                selector
            } else {
                dst_count + i
            }
        })
        .collect()
}
