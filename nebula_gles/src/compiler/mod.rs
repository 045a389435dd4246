/// Compiler service module - the seam to the external shader compiler

// Module declarations
pub mod shader_compiler;

// Re-export everything from shader_compiler.rs
pub use shader_compiler::*;

// Mock compiler for tests (no real compiler backend required)
#[cfg(test)]
pub mod mock_compiler;
