/*!
# Nebula GLES

Object-lifecycle and resource-namespace core of the Nebula OpenGL ES
translation runtime.

This crate owns the identity, state, and destruction semantics of the shading
objects exposed through the public handle API: the handle namespace, the
per-kind object stores, the shader/program entity state machines, the
deferred-deletion protocol, and the lazily-constructed shader compiler
service shared by all entities. Source-to-IR translation and GPU command
submission live behind trait seams and are provided by backend crates
(e.g. `nebula_gles_compiler_naga`).

## Architecture

- **Runtime**: process-wide singleton managing context creation and the
  current context
- **Context**: orchestrator translating public API calls into operations on
  the resource layer, recording GL errors against itself
- **ResourceManager**: handle namespace + object stores + purge list
- **ShaderCompiler**: trait seam to the external compiler service
- **GpuBackend**: trait seam to the GPU pipeline (draw state, flush)

Backend implementations provide concrete types that implement these traits.
*/

// Internal modules
mod error;
mod runtime;
pub mod backend;
pub mod compiler;
pub mod context;
pub mod log;
pub mod resource;
pub mod types;

// Main nebula namespace module
pub mod nebula {
    // Error types
    pub use crate::error::{Error, GlError, Result};

    // Runtime singleton
    pub use crate::runtime::Runtime;

    // Context orchestrator
    pub use crate::context::{Capabilities, CompilerFactory, Context, ContextConfig};

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{DefaultLogger, LogEntry, LogSeverity, Logger};
    }

    // Compiler service seam
    pub mod compiler {
        pub use crate::compiler::{CompileOutput, ShaderCompiler, ShaderStage};
    }

    // GPU backend seam
    pub mod backend {
        pub use crate::backend::GpuBackend;
    }

    // Resource layer
    pub mod resource {
        pub use crate::resource::*;
    }

    // GL scalar types and enum constants
    pub mod types {
        pub use crate::types::*;
    }
}
