//! Shared helpers for integration tests.

#![allow(dead_code)]

use dxbc_codegen::{ProgramType, ProgramVersion, SpirvModule, VertexCodeGen};
use filecheck::{Checker, CheckerBuilder, NO_VARIABLES};

/// Build a filechecker from text containing `check:`-style directives.
pub fn build_filechecker(expected_text: &str) -> Result<Checker, String> {
    let mut builder = CheckerBuilder::new();
    for line in expected_text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        builder
            .directive(trimmed)
            .map_err(|e| format!("Failed to parse filecheck directive '{}': {}", trimmed, e))?;
    }
    Ok(builder.finish())
}

/// Match a module disassembly against filecheck directives.
pub fn match_filecheck(actual: &str, expected_text: &str) -> Result<(), String> {
    let checker = build_filechecker(expected_text)?;

    if checker
        .check(actual, NO_VARIABLES)
        .map_err(|e| format!("Filecheck error: {}", e))?
    {
        Ok(())
    } else {
        let (_, explain) = checker
            .explain(actual, NO_VARIABLES)
            .map_err(|e| format!("Failed to get filecheck explanation: {}", e))?;
        Err(format!("Filecheck failed:\n{}\n--- output ---\n{}", explain, actual))
    }
}

pub fn assert_filecheck(module: &SpirvModule, expected_text: &str) {
    if let Err(msg) = match_filecheck(&module.to_string(), expected_text) {
        panic!("{}", msg);
    }
}

pub fn vs_5_0() -> ProgramVersion {
    ProgramVersion::new(ProgramType::Vertex, 5, 0)
}

/// Vertex generator over `module`.
pub fn vertex(module: &mut SpirvModule) -> VertexCodeGen<'_> {
    VertexCodeGen::new(module)
}
