//! Error types for code generation.

use crate::program::ProgramType;

/// Result type for code generation operations.
pub type CodeGenResult<T> = Result<T, CodeGenError>;

/// Error that can occur while setting up or running a code generator.
///
/// Register indices past the declared range are not represented here: they
/// are caller bugs and panic instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeGenError {
    /// Raw scalar type token outside the supported set
    UnsupportedScalarType(u32),
    /// No generator exists for this program type
    UnsupportedProgramType(ProgramType),
    /// Program header bytes could not be decoded
    MalformedProgram(String),
}

impl CodeGenError {
    /// Create a new malformed-program error.
    pub fn malformed(msg: impl Into<String>) -> Self {
        CodeGenError::MalformedProgram(msg.into())
    }
}

impl core::fmt::Display for CodeGenError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CodeGenError::UnsupportedScalarType(raw) => {
                write!(f, "Invalid scalar type: {}", raw)
            }
            CodeGenError::UnsupportedProgramType(ty) => {
                write!(f, "Unsupported program type: {}", ty)
            }
            CodeGenError::MalformedProgram(msg) => write!(f, "Malformed program: {}", msg),
        }
    }
}

impl std::error::Error for CodeGenError {}
