//! Build small modules by hand, then disassemble and execute them.

use spirv_module::{
    spirv::{AddressingModel, Capability, ExecutionModel, MemoryModel, Op, StorageClass},
    Datum, Id, InterpError, Interpreter, SpirvModule,
};

/// `main` writing a constant vector into a private variable.
fn store_module() -> (SpirvModule, Id, Id) {
    let mut module = SpirvModule::new();
    module.enable_capability(Capability::Shader);
    module.set_memory_model(AddressingModel::Logical, MemoryModel::GLSL450);
    let entry = module.allocate_id();

    let f32_t = module.def_float_type(32);
    let v2 = module.def_vector_type(f32_t, 2);
    let ptr = module.def_pointer_type(v2, StorageClass::Private);
    let var = module.new_var(ptr, StorageClass::Private);
    module.set_debug_name(var, "r0");

    let one = module.constant_f32(1.0);
    let two = module.constant_f32(2.0);
    let value = module.constant_composite(v2, &[one, two]);

    let void = module.def_void_type();
    let fn_type = module.def_function_type(void, &[]);
    module.function_begin(void, entry, fn_type);
    let label = module.allocate_id();
    module.op_label(label);
    module.op_store(var, value);
    module.op_return();
    module.function_end();
    module.add_entry_point(entry, ExecutionModel::Vertex, "main", &[]);

    (module, entry, var)
}

#[test]
fn test_disassembly_sections_in_order() {
    let (module, entry, var) = store_module();
    let text = module.to_string();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[0], format!("; Bound: {}", module.bound()));
    assert_eq!(lines[1], "OpCapability Shader");
    assert_eq!(lines[2], "OpMemoryModel Logical GLSL450");
    assert_eq!(lines[3], format!("OpEntryPoint Vertex {} \"main\"", entry));
    assert_eq!(lines[4], format!("OpName {} \"r0\"", var));
    assert!(text.contains("OpTypeFloat 32"));
    assert!(text.contains("OpVariable"));
    assert_eq!(lines.last().copied(), Some("OpFunctionEnd"));
}

#[test]
fn test_run_store() {
    let (module, entry, var) = store_module();
    let interp = Interpreter::run(&module, entry).unwrap();

    assert_eq!(interp.memory(var).and_then(Datum::f32_lanes), Some(vec![1.0, 2.0]));
    assert_eq!(interp.executed(), 2);
}

#[test]
fn test_unknown_entry() {
    let (module, _, var) = store_module();
    let err = Interpreter::run(&module, var).err();
    assert_eq!(err, Some(InterpError::UnknownFunction(var)));
}

#[test]
fn test_counts_ops() {
    let (module, _, _) = store_module();
    assert_eq!(module.count_ops(Op::Store), 1);
    assert_eq!(module.count_ops(Op::Load), 0);
    assert_eq!(module.count_ops(Op::Label), 1);
}
