//! Unit tests for the context orchestrator
//!
//! Covers the error accumulator, capability gating, and the compiler
//! service lifecycle (lazy construction, retroactive propagation, release).

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::backend::mock_backend::MockBackend;
use crate::compiler::mock_compiler::MockCompiler;
use crate::compiler::ShaderCompiler;
use crate::context::{Capabilities, CompilerFactory, Context, ContextConfig};
use crate::types::{
    GL_INVALID_ENUM, GL_INVALID_OPERATION, GL_NO_ERROR, GL_VERTEX_SHADER,
};

// ============================================================================
// TEST HELPERS
// ============================================================================

fn test_context() -> (Context, Arc<Mutex<MockBackend>>) {
    let backend = Arc::new(Mutex::new(MockBackend::new()));
    let context = Context::new(
        ContextConfig::default(),
        backend.clone(),
        Box::new(|| Arc::new(MockCompiler::new()) as Arc<dyn ShaderCompiler>),
    );
    (context, backend)
}

/// A context whose factory counts how often the service was constructed
fn counting_context() -> (Context, Arc<AtomicUsize>) {
    let constructions = Arc::new(AtomicUsize::new(0));
    let counter = constructions.clone();
    let factory: CompilerFactory = Box::new(move || {
        counter.fetch_add(1, Ordering::SeqCst);
        Arc::new(MockCompiler::new()) as Arc<dyn ShaderCompiler>
    });
    let backend = Arc::new(Mutex::new(MockBackend::new()));
    (
        Context::new(ContextConfig::default(), backend, factory),
        constructions,
    )
}

// ============================================================================
// ERROR ACCUMULATOR
// ============================================================================

#[test]
fn test_get_error_is_no_error_initially() {
    let (mut context, _) = test_context();
    assert_eq!(context.get_error(), GL_NO_ERROR);
}

#[test]
fn test_first_recorded_error_is_sticky_until_read() {
    let (mut context, _) = test_context();

    // InvalidEnum first, then an InvalidValue that must be dropped
    context.create_shader(0xDEAD);
    context.delete_shader(4242);

    assert_eq!(context.get_error(), GL_INVALID_ENUM);
    assert_eq!(context.get_error(), GL_NO_ERROR);
}

#[test]
fn test_get_error_clears_the_slot() {
    let (mut context, _) = test_context();
    context.create_shader(0xDEAD);
    assert_eq!(context.get_error(), GL_INVALID_ENUM);
    assert_eq!(context.get_error(), GL_NO_ERROR);

    // A new error can be recorded after the read
    context.delete_shader(4242);
    assert_ne!(context.get_error(), GL_NO_ERROR);
}

// ============================================================================
// CAPABILITIES
// ============================================================================

#[test]
fn test_default_config_advertises_shader_compiler() {
    let (context, _) = test_context();
    assert!(context.shader_compiler_supported());
    assert!(context.capabilities().contains(Capabilities::SHADER_COMPILER));
}

#[test]
fn test_get_booleanv_reports_compiler_capability() {
    let (mut context, _) = test_context();
    let mut value = 0xAAu8;
    context.get_booleanv(crate::types::GL_SHADER_COMPILER, &mut value);
    assert_eq!(value, crate::types::GL_TRUE);
    assert_eq!(context.get_error(), GL_NO_ERROR);
}

#[test]
fn test_get_booleanv_unknown_pname_records_invalid_enum() {
    let (mut context, _) = test_context();
    let mut value = 0xAAu8;
    context.get_booleanv(0xBEEF, &mut value);
    assert_eq!(value, 0xAA);
    assert_eq!(context.get_error(), GL_INVALID_ENUM);
}

#[test]
fn test_compiler_requiring_ops_fail_without_capability() {
    let backend = Arc::new(Mutex::new(MockBackend::new()));
    let mut context = Context::new(
        ContextConfig {
            capabilities: Capabilities::empty(),
            ..Default::default()
        },
        backend,
        Box::new(|| Arc::new(MockCompiler::new()) as Arc<dyn ShaderCompiler>),
    );

    let shader = context.create_shader(GL_VERTEX_SHADER);
    assert_ne!(shader, 0);

    context.compile_shader(shader);
    assert_eq!(context.get_error(), GL_INVALID_OPERATION);
    // The gate mutates no state: no service was constructed
    assert!(context.shader_compiler().is_none());
}

// ============================================================================
// COMPILER SERVICE LIFECYCLE
// ============================================================================

#[test]
fn test_service_constructed_lazily_and_at_most_once() {
    let (mut context, constructions) = counting_context();

    let a = context.create_shader(GL_VERTEX_SHADER);
    let b = context.create_shader(GL_VERTEX_SHADER);
    assert_eq!(constructions.load(Ordering::SeqCst), 0);

    context.shader_source(a, 1, &["void main() {}"], None);
    context.shader_source(b, 1, &["void main() {}"], None);
    context.compile_shader(a);
    context.compile_shader(b);

    assert_eq!(constructions.load(Ordering::SeqCst), 1);
}

#[test]
fn test_service_propagates_to_entities_created_before_it() {
    let (mut context, _) = test_context();

    // Program and shader both predate the service
    let program = context.create_program();
    let trigger = context.create_shader(GL_VERTEX_SHADER);
    context.shader_source(trigger, 1, &["void main() {}"], None);
    context.compile_shader(trigger);

    let rm = context.resources();
    let key = rm.resolve_program(program).unwrap();
    assert!(rm.program(key).unwrap().has_live_compiler());
}

#[test]
fn test_one_shared_service_serves_every_entity() {
    let mock = Arc::new(MockCompiler::new());
    let service = mock.clone();
    let backend = Arc::new(Mutex::new(MockBackend::new()));
    let mut context = Context::new(
        ContextConfig::default(),
        backend,
        Box::new(move || service.clone() as Arc<dyn ShaderCompiler>),
    );

    let a = context.create_shader(GL_VERTEX_SHADER);
    let b = context.create_shader(GL_VERTEX_SHADER);
    context.shader_source(a, 1, &["void main() {}"], None);
    context.shader_source(b, 1, &["void main() {}"], None);
    context.compile_shader(a);
    context.compile_shader(b);

    assert_eq!(mock.compile_count(), 2);
}

#[test]
fn test_release_ends_the_epoch_and_next_compile_starts_a_new_one() {
    let (mut context, constructions) = counting_context();

    let shader = context.create_shader(GL_VERTEX_SHADER);
    context.shader_source(shader, 1, &["void main() {}"], None);
    context.compile_shader(shader);
    assert_eq!(constructions.load(Ordering::SeqCst), 1);

    context.release_shader_compiler();
    assert!(context.shader_compiler().is_none());

    context.compile_shader(shader);
    assert_eq!(constructions.load(Ordering::SeqCst), 2);
}

// ============================================================================
// FLUSH AND TEARDOWN
// ============================================================================

#[test]
fn test_flush_reaches_the_backend() {
    let (mut context, backend) = test_context();
    context.flush();
    assert_eq!(backend.lock().unwrap().flush_count, 1);
}

#[test]
fn test_teardown_drops_entities_and_service() {
    let (mut context, _) = test_context();
    let shader = context.create_shader(GL_VERTEX_SHADER);
    context.shader_source(shader, 1, &["void main() {}"], None);
    context.compile_shader(shader);
    context.create_program();

    context.teardown();

    assert_eq!(context.resources().shader_count(), 0);
    assert_eq!(context.resources().program_count(), 0);
    assert_eq!(context.resources().live_handle_count(), 0);
    assert!(context.shader_compiler().is_none());
}
