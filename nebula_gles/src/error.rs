//! Error types for the Nebula GLES runtime
//!
//! Two error domains live here: `GlError` is the recorded, sticky per-context
//! error kind of the public GL API (read back with get-and-clear semantics),
//! and `Error` is the conventional Rust error for fallible runtime
//! operations (initialization, context management).

use std::fmt;

use crate::types::{GLenum, GL_INVALID_ENUM, GL_INVALID_OPERATION, GL_INVALID_VALUE, GL_OUT_OF_MEMORY};

/// Result type for Nebula runtime operations
pub type Result<T> = std::result::Result<T, Error>;

/// Recorded GL error kinds.
///
/// Public operations never return these; they record exactly one kind
/// against the current context and perform no partial mutation. The
/// accumulator is read (and cleared) through `Context::get_error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlError {
    /// An unacceptable value for an enumerated argument
    InvalidEnum,

    /// A malformed handle or negative size/count
    InvalidValue,

    /// A live handle of the wrong kind, or an unmet capability precondition
    InvalidOperation,

    /// An allocation could not be satisfied
    OutOfMemory,
}

impl GlError {
    /// The GL error code reported for this kind
    pub fn code(&self) -> GLenum {
        match self {
            GlError::InvalidEnum => GL_INVALID_ENUM,
            GlError::InvalidValue => GL_INVALID_VALUE,
            GlError::InvalidOperation => GL_INVALID_OPERATION,
            GlError::OutOfMemory => GL_OUT_OF_MEMORY,
        }
    }
}

impl fmt::Display for GlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GlError::InvalidEnum => write!(f, "invalid enum"),
            GlError::InvalidValue => write!(f, "invalid value"),
            GlError::InvalidOperation => write!(f, "invalid operation"),
            GlError::OutOfMemory => write!(f, "out of memory"),
        }
    }
}

impl std::error::Error for GlError {}

/// Nebula runtime errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Initialization failed (runtime, context, subsystems)
    InitializationFailed(String),

    /// No context is current on the runtime
    NoCurrentContext,

    /// Backend-specific error (compiler service, GPU pipeline)
    BackendError(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            Error::NoCurrentContext => write!(f, "No current context"),
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
