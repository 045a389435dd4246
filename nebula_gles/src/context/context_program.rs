/// Public API calls related to programs
///
/// Only the slice of the program object model that the shading namespace
/// and deletion protocol depend on lives here: creation, deletion, and the
/// attachment graph that keeps shaders reachable. Linking is backend
/// territory.

use crate::context::context::{Context, LOG_SOURCE};
use crate::error::GlError;
use crate::types::GLuint;

impl Context {
    /// Create a program object
    pub fn create_program(&mut self) -> GLuint {
        crate::gles_trace!(LOG_SOURCE, "CreateProgram()");

        let compiler = self.shader_compiler().cloned();
        let (handle, key) = self.resources_mut().allocate_program();
        if let Some(program) = self.resources_mut().program_mut(key) {
            program.set_compiler(compiler.as_ref());
        }
        handle
    }

    /// Request deletion of a program object. Detaches its shaders, which may
    /// free entities waiting on the purge list for the next flush.
    pub fn delete_program(&mut self, program: GLuint) {
        crate::gles_trace!(LOG_SOURCE, "DeleteProgram({})", program);

        if program == 0 {
            return;
        }
        let Some(key) = self.resolve_program_or_record(program) else {
            return;
        };

        let attached: Vec<_> = {
            let Some(entity) = self.resources_mut().program_mut(key) else {
                return;
            };
            entity.mark_for_deletion();
            entity.attachments().collect()
        };
        for shader_key in attached {
            if let Some(shader) = self.resources_mut().shader_mut(shader_key) {
                shader.unref_by_program();
            }
        }

        self.resources_mut().erase_handle(program);
        self.resources_mut().destroy_program(key);
    }

    /// Attach a shader to a program's stage slot. An occupied slot records
    /// `InvalidOperation`.
    pub fn attach_shader(&mut self, program: GLuint, shader: GLuint) {
        crate::gles_trace!(LOG_SOURCE, "AttachShader({}, {})", program, shader);

        let Some(program_key) = self.resolve_program_or_record(program) else {
            return;
        };
        let Some(shader_key) = self.resolve_shader_or_record(shader) else {
            return;
        };
        let Some(stage) = self.resources().shader(shader_key).map(|s| s.stage()) else {
            return;
        };

        let attached = self
            .resources_mut()
            .program_mut(program_key)
            .is_some_and(|p| p.attach(stage, shader_key));
        if !attached {
            self.record_error(GlError::InvalidOperation);
            return;
        }
        if let Some(entity) = self.resources_mut().shader_mut(shader_key) {
            entity.ref_by_program();
        }
    }

    /// Detach a shader from a program. A shader that is not attached records
    /// `InvalidOperation`. A detached entity already marked for deletion
    /// stays on the purge list until the next flush or teardown.
    pub fn detach_shader(&mut self, program: GLuint, shader: GLuint) {
        crate::gles_trace!(LOG_SOURCE, "DetachShader({}, {})", program, shader);

        let Some(program_key) = self.resolve_program_or_record(program) else {
            return;
        };
        let Some(shader_key) = self.resolve_shader_or_record(shader) else {
            return;
        };

        let detached = self
            .resources_mut()
            .program_mut(program_key)
            .is_some_and(|p| p.detach(shader_key));
        if !detached {
            self.record_error(GlError::InvalidOperation);
            return;
        }
        if let Some(entity) = self.resources_mut().shader_mut(shader_key) {
            entity.unref_by_program();
        }
    }

    /// Whether a handle names a live program object. Never records an error.
    pub fn is_program(&self, program: GLuint) -> bool {
        self.resources().is_program_handle(program)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "context_program_tests.rs"]
mod tests;
