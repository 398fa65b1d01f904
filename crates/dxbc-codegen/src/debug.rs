//! Diagnostic logging for code generation.
//!
//! Compiles to nothing unless the `debug-codegen` feature is enabled.

/// Log a code generation decision to stderr.
///
/// # Examples
///
/// ```ignore
/// debug_codegen!("declare_temps: {} -> {}", old, n);
/// ```
#[cfg(feature = "debug-codegen")]
#[macro_export]
macro_rules! debug_codegen {
    ($($arg:tt)*) => {
        eprintln!("[codegen] {}", core::format_args!($($arg)*))
    };
}

/// Log a code generation decision (disabled).
#[cfg(not(feature = "debug-codegen"))]
#[macro_export]
macro_rules! debug_codegen {
    ($($arg:tt)*) => {
        if false {
            let _ = core::format_args!($($arg)*);
        }
    };
}
