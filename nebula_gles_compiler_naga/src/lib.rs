/*!
# Nebula GLES naga compiler

naga-backed implementation of the Nebula GLES `ShaderCompiler` service:
GLSL source goes through naga's GLSL front-end, module validation, and the
SPIR-V back-end; diagnostics are collected into the shader info log.

The core crate constructs this service lazily through a `CompilerFactory`,
so a process that never compiles a shader never pays for it.

## Example

```no_run
use std::sync::Arc;
use nebula_gles::nebula::compiler::ShaderCompiler;
use nebula_gles::nebula::CompilerFactory;
use nebula_gles_compiler_naga::NagaCompiler;

let factory: CompilerFactory =
    Box::new(|| Arc::new(NagaCompiler::new()) as Arc<dyn ShaderCompiler>);
```
*/

use naga::valid::{Capabilities, ValidationFlags, Validator};

use nebula_gles::compiler::{CompileOutput, ShaderCompiler, ShaderStage};

/// Shader compiler service over naga
///
/// Stateless: a fresh front-end and validator are built per invocation, so
/// one shared instance can serve every shader and program entity of a
/// context.
pub struct NagaCompiler {
    validation_flags: ValidationFlags,
}

impl NagaCompiler {
    pub fn new() -> Self {
        Self {
            validation_flags: ValidationFlags::all(),
        }
    }

    fn naga_stage(stage: ShaderStage) -> naga::ShaderStage {
        match stage {
            ShaderStage::Vertex => naga::ShaderStage::Vertex,
            ShaderStage::Fragment => naga::ShaderStage::Fragment,
        }
    }
}

impl Default for NagaCompiler {
    fn default() -> Self {
        Self::new()
    }
}

impl ShaderCompiler for NagaCompiler {
    fn compile(&self, stage: ShaderStage, source: &str) -> CompileOutput {
        let mut frontend = naga::front::glsl::Frontend::default();
        let options = naga::front::glsl::Options::from(Self::naga_stage(stage));

        let module = match frontend.parse(&options, source) {
            Ok(module) => module,
            Err(errors) => {
                let log = errors
                    .iter()
                    .map(|error| error.to_string())
                    .collect::<Vec<_>>()
                    .join("\n");
                return CompileOutput::failed(log);
            }
        };

        let mut validator = Validator::new(self.validation_flags, Capabilities::all());
        let info = match validator.validate(&module) {
            Ok(info) => info,
            Err(error) => return CompileOutput::failed(error.emit_to_string(source)),
        };

        let spv_options = naga::back::spv::Options::default();
        match naga::back::spv::write_vec(&module, &info, &spv_options, None) {
            Ok(words) => CompileOutput::compiled(words),
            Err(error) => CompileOutput::failed(error.to_string()),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "naga_compiler_tests.rs"]
mod tests;
