//! Unit tests for the naga-backed compiler service
//!
//! Compiles real GLSL through the full front-end → validation → SPIR-V
//! pipeline, and drives the core context API end to end with this service.

use std::sync::{Arc, Mutex};

use nebula_gles::backend::GpuBackend;
use nebula_gles::compiler::{ShaderCompiler, ShaderStage};
use nebula_gles::context::{Context, ContextConfig};
use nebula_gles::types::{
    GLint, GL_COMPILE_STATUS, GL_FALSE, GL_FRAGMENT_SHADER, GL_TRUE, GL_VERTEX_SHADER,
};

use crate::NagaCompiler;

/// First word of every SPIR-V module
const SPIRV_MAGIC: u32 = 0x0723_0203;

const VERTEX_SOURCE: &str = "#version 450\n\
    void main() {\n\
        gl_Position = vec4(0.0, 0.0, 0.0, 1.0);\n\
    }\n";

const FRAGMENT_SOURCE: &str = "#version 450\n\
    layout(location = 0) out vec4 color;\n\
    void main() {\n\
        color = vec4(1.0);\n\
    }\n";

// ============================================================================
// DIRECT SERVICE INVOCATION
// ============================================================================

#[test]
fn test_vertex_shader_compiles_to_spirv() {
    let compiler = NagaCompiler::new();
    let output = compiler.compile(ShaderStage::Vertex, VERTEX_SOURCE);

    assert!(output.success, "info log: {}", output.info_log);
    assert!(!output.words.is_empty());
    assert_eq!(output.words[0], SPIRV_MAGIC);
}

#[test]
fn test_fragment_shader_compiles_to_spirv() {
    let compiler = NagaCompiler::new();
    let output = compiler.compile(ShaderStage::Fragment, FRAGMENT_SOURCE);

    assert!(output.success, "info log: {}", output.info_log);
    assert_eq!(output.words[0], SPIRV_MAGIC);
}

#[test]
fn test_malformed_source_fails_with_diagnostics() {
    let compiler = NagaCompiler::new();
    let output = compiler.compile(ShaderStage::Vertex, "#version 450\nvoid main() { nonsense }");

    assert!(!output.success);
    assert!(output.words.is_empty());
    assert!(!output.info_log.is_empty());
}

#[test]
fn test_unsupported_version_directive_fails() {
    let compiler = NagaCompiler::new();
    let output = compiler.compile(ShaderStage::Fragment, "#version 999\nvoid main() {}");

    assert!(!output.success);
    assert!(!output.info_log.is_empty());
}

// ============================================================================
// FULL-STACK CONTEXT INTEGRATION
// ============================================================================

struct NullBackend;

impl GpuBackend for NullBackend {
    fn in_draw_state(&self) -> bool {
        false
    }

    fn flush(&mut self) {}
}

fn naga_context() -> Context {
    Context::new(
        ContextConfig::default(),
        Arc::new(Mutex::new(NullBackend)),
        Box::new(|| Arc::new(NagaCompiler::new()) as Arc<dyn ShaderCompiler>),
    )
}

#[test]
fn test_context_compiles_real_glsl_through_the_service() {
    let mut context = naga_context();

    let vs = context.create_shader(GL_VERTEX_SHADER);
    let fs = context.create_shader(GL_FRAGMENT_SHADER);
    context.shader_source(vs, 1, &[VERTEX_SOURCE], None);
    context.shader_source(fs, 1, &[FRAGMENT_SOURCE], None);
    context.compile_shader(vs);
    context.compile_shader(fs);

    let mut status: GLint = -1;
    context.get_shaderiv(vs, GL_COMPILE_STATUS, &mut status);
    assert_eq!(status, GL_TRUE as GLint);
    context.get_shaderiv(fs, GL_COMPILE_STATUS, &mut status);
    assert_eq!(status, GL_TRUE as GLint);
}

#[test]
fn test_context_surfaces_compile_errors_in_the_info_log() {
    let mut context = naga_context();

    let shader = context.create_shader(GL_VERTEX_SHADER);
    context.shader_source(shader, 1, &["#version 450\nvoid main() { nonsense }"], None);
    context.compile_shader(shader);

    let mut status: GLint = -1;
    context.get_shaderiv(shader, GL_COMPILE_STATUS, &mut status);
    assert_eq!(status, GL_FALSE as GLint);

    let mut length: GLint = 0;
    let mut buffer = [0u8; 256];
    context.get_shader_info_log(shader, 256, Some(&mut length), &mut buffer);
    assert!(length > 0);
}
