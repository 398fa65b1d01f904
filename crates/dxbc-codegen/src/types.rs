//! Logical type system.
//!
//! Shader registers hold up to four lanes of one scalar kind. These types
//! describe values the way the bytecode sees them; the type registry in
//! `CodeGenCore` turns them into module type ids.

use core::fmt;

use spirv_module::spirv::StorageClass;

use crate::error::CodeGenError;

/// Scalar component kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    Uint32,
    Uint64,
    Sint32,
    Sint64,
    Float32,
    Float64,
}

impl ScalarType {
    /// Width of one component in bits.
    pub fn bit_width(self) -> u32 {
        match self {
            ScalarType::Uint32 | ScalarType::Sint32 | ScalarType::Float32 => 32,
            ScalarType::Uint64 | ScalarType::Sint64 | ScalarType::Float64 => 64,
        }
    }

    /// Check if this is a signed integer type.
    pub fn is_signed(self) -> bool {
        matches!(self, ScalarType::Sint32 | ScalarType::Sint64)
    }

    /// Check if this is a floating point type.
    pub fn is_float(self) -> bool {
        matches!(self, ScalarType::Float32 | ScalarType::Float64)
    }

    pub fn name(self) -> &'static str {
        match self {
            ScalarType::Uint32 => "u32",
            ScalarType::Uint64 => "u64",
            ScalarType::Sint32 => "i32",
            ScalarType::Sint64 => "i64",
            ScalarType::Float32 => "f32",
            ScalarType::Float64 => "f64",
        }
    }
}

impl TryFrom<u32> for ScalarType {
    type Error = CodeGenError;

    /// Decode a raw scalar type token (declaration order, starting at 0).
    fn try_from(raw: u32) -> Result<Self, Self::Error> {
        match raw {
            0 => Ok(ScalarType::Uint32),
            1 => Ok(ScalarType::Uint64),
            2 => Ok(ScalarType::Sint32),
            3 => Ok(ScalarType::Sint64),
            4 => Ok(ScalarType::Float32),
            5 => Ok(ScalarType::Float64),
            _ => Err(CodeGenError::UnsupportedScalarType(raw)),
        }
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Scalar, vector, or array-of-vector type.
///
/// `element_count == 0` means a plain scalar or vector. Arrays always wrap
/// the vector, never the other way around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ValueType {
    pub component_type: ScalarType,
    pub component_count: u32,
    pub element_count: u32,
}

impl ValueType {
    /// Scalar or vector type.
    ///
    /// # Panics
    ///
    /// Panics if `component_count` is not in `1..=4`.
    pub fn new(component_type: ScalarType, component_count: u32) -> Self {
        Self::array(component_type, component_count, 0)
    }

    /// Array of `element_count` scalars or vectors.
    ///
    /// # Panics
    ///
    /// Panics if `component_count` is not in `1..=4`.
    pub fn array(component_type: ScalarType, component_count: u32, element_count: u32) -> Self {
        assert!(
            (1..=4).contains(&component_count),
            "component count {} out of range 1..=4",
            component_count
        );
        Self {
            component_type,
            component_count,
            element_count,
        }
    }

    pub fn is_scalar(&self) -> bool {
        self.component_count == 1 && self.element_count == 0
    }

    pub fn is_array(&self) -> bool {
        self.element_count > 0
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let vector = if self.component_count > 1 {
            format!("vec{}<{}>", self.component_count, self.component_type)
        } else {
            String::from(self.component_type.name())
        };
        if self.element_count > 0 {
            write!(f, "[{}; {}]", vector, self.element_count)
        } else {
            write!(f, "{}", vector)
        }
    }
}

/// Value type plus the storage class it lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerType {
    pub value_type: ValueType,
    pub storage_class: StorageClass,
}

impl PointerType {
    pub fn new(value_type: ValueType, storage_class: StorageClass) -> Self {
        Self {
            value_type,
            storage_class,
        }
    }
}

impl fmt::Display for PointerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ptr<{:?}, {}>", self.storage_class, self.value_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_properties() {
        assert_eq!(ScalarType::Uint32.bit_width(), 32);
        assert_eq!(ScalarType::Sint64.bit_width(), 64);
        assert_eq!(ScalarType::Float64.bit_width(), 64);
        assert!(ScalarType::Sint32.is_signed());
        assert!(!ScalarType::Uint64.is_signed());
        assert!(!ScalarType::Float32.is_signed());
        assert!(ScalarType::Float32.is_float());
        assert!(!ScalarType::Uint32.is_float());
    }

    #[test]
    fn test_scalar_from_raw() {
        assert_eq!(ScalarType::try_from(0), Ok(ScalarType::Uint32));
        assert_eq!(ScalarType::try_from(4), Ok(ScalarType::Float32));
        assert_eq!(ScalarType::try_from(5), Ok(ScalarType::Float64));
        assert_eq!(
            ScalarType::try_from(6),
            Err(CodeGenError::UnsupportedScalarType(6))
        );
    }

    #[test]
    fn test_value_type_shapes() {
        let scalar = ValueType::new(ScalarType::Float32, 1);
        let vector = ValueType::new(ScalarType::Float32, 4);
        let array = ValueType::array(ScalarType::Float32, 1, 2);

        assert!(scalar.is_scalar());
        assert!(!vector.is_scalar());
        assert!(!array.is_scalar());
        assert!(array.is_array());
        assert!(!vector.is_array());
    }

    #[test]
    #[should_panic(expected = "component count 5 out of range")]
    fn test_value_type_rejects_wide_vectors() {
        ValueType::new(ScalarType::Float32, 5);
    }

    #[test]
    #[should_panic(expected = "component count 0 out of range")]
    fn test_value_type_rejects_zero_components() {
        ValueType::array(ScalarType::Uint32, 0, 3);
    }

    #[test]
    fn test_type_display() {
        assert_eq!(format!("{}", ValueType::new(ScalarType::Sint32, 1)), "i32");
        assert_eq!(
            format!("{}", ValueType::new(ScalarType::Float32, 4)),
            "vec4<f32>"
        );
        assert_eq!(
            format!("{}", ValueType::array(ScalarType::Float32, 1, 2)),
            "[f32; 2]"
        );
        assert_eq!(
            format!(
                "{}",
                PointerType::new(ValueType::new(ScalarType::Float32, 4), StorageClass::Private)
            ),
            "ptr<Private, vec4<f32>>"
        );
    }
}
