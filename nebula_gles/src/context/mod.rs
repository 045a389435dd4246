/// Context module - the orchestrator behind the public handle API

// Module declarations
pub mod context;
mod context_program;
mod context_shader;

// Re-export everything from context.rs
pub use context::*;
