//! In-memory SPIR-V module builder.
//!
//! This crate provides the output module that code generators emit into:
//! - Ids (result ids shared by every kind of definition)
//! - Types and constants (structurally deduplicated)
//! - Global variables, decorations and debug names
//! - Function code (loads, stores, composite inserts, shuffles, ...)
//! - A text disassembly via `Display`
//! - A reference interpreter for function bodies
//!
//! Binary encoding is left to a separate serializer.

mod error;
mod id;
mod id_map;
mod inst;
mod interp;
mod module;
mod types;

pub use error::{InterpError, InterpResult};
pub use id::{EntityRef, Id};
pub use id_map::IdMap;
pub use inst::{Inst, Operand};
pub use interp::{Datum, Interpreter};
pub use module::SpirvModule;
pub use types::{ConstDef, EntryPoint, TypeDef, Variable};

pub use spirv;
