//! Unit tests for the shader entity state machine

use std::sync::Arc;

use crate::compiler::mock_compiler::MockCompiler;
use crate::compiler::{ShaderCompiler, ShaderStage};
use crate::resource::shader::Shader;

fn compiler() -> Arc<dyn ShaderCompiler> {
    Arc::new(MockCompiler::new())
}

// ============================================================================
// CREATION DEFAULTS
// ============================================================================

#[test]
fn test_new_shader_defaults() {
    let shader = Shader::new(ShaderStage::Vertex);
    assert_eq!(shader.stage(), ShaderStage::Vertex);
    assert!(!shader.has_source());
    assert!(shader.source().is_none());
    assert!(!shader.is_compiled());
    assert!(!shader.is_marked_for_deletion());
    assert!(!shader.is_referenced());
    assert!(shader.info_log().is_none());
    assert_eq!(shader.source_length(), 0);
    assert_eq!(shader.info_log_length(), 0);
}

// ============================================================================
// SOURCE ASSIGNMENT
// ============================================================================

#[test]
fn test_set_source_concatenates_fragments() {
    let mut shader = Shader::new(ShaderStage::Vertex);
    shader.set_source(&["void ", "main()", " {}"], None);
    assert_eq!(shader.source(), Some("void main() {}"));
}

#[test]
fn test_set_source_honors_explicit_lengths() {
    let mut shader = Shader::new(ShaderStage::Fragment);
    // Length 1 takes a prefix, negative length means the whole fragment
    shader.set_source(&["abc", "def"], Some(&[1, -1]));
    assert_eq!(shader.source(), Some("adef"));
}

#[test]
fn test_set_source_clamps_overlong_length() {
    let mut shader = Shader::new(ShaderStage::Vertex);
    shader.set_source(&["ab"], Some(&[100]));
    assert_eq!(shader.source(), Some("ab"));
}

#[test]
fn test_set_source_replaces_previous_source() {
    let mut shader = Shader::new(ShaderStage::Vertex);
    shader.set_source(&["first"], None);
    shader.set_source(&["second"], None);
    assert_eq!(shader.source(), Some("second"));
}

#[test]
fn test_source_length_counts_terminator() {
    let mut shader = Shader::new(ShaderStage::Vertex);
    shader.set_source(&["abc"], None);
    assert_eq!(shader.source_length(), 4);

    // Zero fragments concatenate to an empty source, reported as 0
    shader.set_source(&[], None);
    assert!(shader.has_source());
    assert_eq!(shader.source_length(), 0);
}

// ============================================================================
// COMPILATION
// ============================================================================

#[test]
fn test_compile_without_source_is_noop() {
    let service = compiler();
    let mut shader = Shader::new(ShaderStage::Vertex);
    shader.set_compiler(Some(&service));
    shader.compile();
    assert!(!shader.is_compiled());
    assert!(shader.ir_words().is_none());
}

#[test]
fn test_compile_without_compiler_is_noop() {
    let mut shader = Shader::new(ShaderStage::Vertex);
    shader.set_source(&["void main() {}"], None);
    shader.compile();
    assert!(!shader.is_compiled());
}

#[test]
fn test_compile_success_stores_status_and_words() {
    let service = compiler();
    let mut shader = Shader::new(ShaderStage::Vertex);
    shader.set_compiler(Some(&service));
    shader.set_source(&["void main() {}"], None);
    shader.compile();
    assert!(shader.is_compiled());
    assert!(shader.ir_words().is_some_and(|w| !w.is_empty()));
}

#[test]
fn test_compile_failure_stores_log() {
    let service: Arc<dyn ShaderCompiler> = Arc::new(MockCompiler::failing("syntax error"));
    let mut shader = Shader::new(ShaderStage::Fragment);
    shader.set_compiler(Some(&service));
    shader.set_source(&["broken"], None);
    shader.compile();
    assert!(!shader.is_compiled());
    assert_eq!(shader.info_log(), Some("syntax error"));
    assert_eq!(shader.info_log_length(), "syntax error".len() as i32 + 1);
    assert!(shader.ir_words().is_none());
}

#[test]
fn test_reassigning_source_keeps_compiled_flag() {
    // Historical GL object model: new source does not clear the compiled
    // status; callers must recompile to refresh it
    let service = compiler();
    let mut shader = Shader::new(ShaderStage::Vertex);
    shader.set_compiler(Some(&service));
    shader.set_source(&["void main() {}"], None);
    shader.compile();
    assert!(shader.is_compiled());

    shader.set_source(&["something else"], None);
    assert!(shader.is_compiled());
}

#[test]
fn test_compile_after_service_release_is_noop() {
    let mut shader = Shader::new(ShaderStage::Vertex);
    {
        let service = compiler();
        shader.set_compiler(Some(&service));
        shader.set_source(&["void main() {}"], None);
        shader.compile();
        assert!(shader.is_compiled());
        shader.set_source(&["changed"], None);
    }
    // The shared service is gone; the stale weak reference fails to upgrade
    // and state stays untouched
    shader.compile();
    assert!(shader.is_compiled());
    assert_eq!(shader.source(), Some("changed"));
}

// ============================================================================
// DELETION PROTOCOL
// ============================================================================

#[test]
fn test_mark_for_deletion_is_idempotent() {
    let mut shader = Shader::new(ShaderStage::Vertex);
    shader.mark_for_deletion();
    assert!(shader.is_marked_for_deletion());
    shader.mark_for_deletion();
    assert!(shader.is_marked_for_deletion());
}

#[test]
fn test_free_for_deletion_requires_mark_and_no_references() {
    let mut shader = Shader::new(ShaderStage::Vertex);
    assert!(!shader.is_free_for_deletion());

    shader.ref_by_program();
    shader.mark_for_deletion();
    assert!(!shader.is_free_for_deletion());

    shader.unref_by_program();
    assert!(shader.is_free_for_deletion());
}

#[test]
fn test_reference_counting() {
    let mut shader = Shader::new(ShaderStage::Fragment);
    shader.ref_by_program();
    shader.ref_by_program();
    assert!(shader.is_referenced());
    shader.unref_by_program();
    assert!(shader.is_referenced());
    shader.unref_by_program();
    assert!(!shader.is_referenced());
}
