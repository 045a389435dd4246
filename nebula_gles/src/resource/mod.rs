/// Resource module - handle namespace, object stores, and shading entities

use slotmap::new_key_type;

new_key_type! {
    /// Stable store key for shader entities
    pub struct ShaderKey;
    /// Stable store key for program entities
    pub struct ProgramKey;
}

// Module declarations
pub mod namespace;
pub mod program;
pub mod resource_manager;
pub mod shader;

// Re-export everything from the resource modules
pub use namespace::*;
pub use program::*;
pub use resource_manager::*;
pub use shader::*;
