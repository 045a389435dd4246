/// Public API calls related to shaders
///
/// Every operation validates its arguments and handles before mutating any
/// state; on failure it records exactly one error kind against the context
/// and performs no partial mutation.

use crate::compiler::ShaderStage;
use crate::context::context::{Context, LOG_SOURCE};
use crate::error::GlError;
use crate::resource::{ProgramKey, ShaderKey};
use crate::types::{
    GLenum, GLint, GLsizei, GLuint, GL_COMPILE_STATUS, GL_DELETE_STATUS, GL_FALSE,
    GL_HIGH_FLOAT, GL_HIGH_INT, GL_INFO_LOG_LENGTH, GL_LOW_FLOAT, GL_LOW_INT, GL_MEDIUM_FLOAT,
    GL_MEDIUM_INT, GL_SHADER_SOURCE_LENGTH, GL_SHADER_TYPE, GL_TRUE,
};

/// Copy a queryable string into a caller buffer under the terminator
/// truncation contract: at most `max(min(bufsize, full) - 1, 0)` payload
/// bytes plus a terminator, where `full` counts the terminator. An absent or
/// empty payload writes an empty terminated string and reports 0.
fn copy_bounded(
    payload: Option<&str>,
    bufsize: GLsizei,
    length: Option<&mut GLsizei>,
    out: &mut [u8],
) {
    let bytes = payload.map_or(&[][..], str::as_bytes);
    let full = if bytes.is_empty() {
        0
    } else {
        (bytes.len() + 1) as GLsizei
    };
    let avail = bufsize.min(out.len() as GLsizei);
    let returned = (avail.min(full) - 1).max(0) as usize;

    if let Some(length) = length {
        *length = returned as GLsizei;
    }
    if avail > 0 {
        out[..returned].copy_from_slice(&bytes[..returned]);
        out[returned] = 0;
    }
}

impl Context {
    /// Resolve a shader handle, recording the failure kind on a bad handle
    pub(crate) fn resolve_shader_or_record(&mut self, handle: GLuint) -> Option<ShaderKey> {
        match self.resources().resolve_shader(handle) {
            Ok(key) => Some(key),
            Err(error) => {
                self.record_error(error);
                None
            }
        }
    }

    pub(crate) fn resolve_program_or_record(&mut self, handle: GLuint) -> Option<ProgramKey> {
        match self.resources().resolve_program(handle) {
            Ok(key) => Some(key),
            Err(error) => {
                self.record_error(error);
                None
            }
        }
    }

    /// Create a shader object of the given type. Records `InvalidEnum` and
    /// returns 0 for anything but vertex/fragment.
    pub fn create_shader(&mut self, shader_type: GLenum) -> GLuint {
        crate::gles_trace!(LOG_SOURCE, "CreateShader(0x{:04X})", shader_type);

        let Some(stage) = ShaderStage::from_gl(shader_type) else {
            self.record_error(GlError::InvalidEnum);
            return 0;
        };

        let compiler = self.shader_compiler().cloned();
        let (handle, key) = self.resources_mut().allocate_shader(stage);
        if let Some(shader) = self.resources_mut().shader_mut(key) {
            shader.set_compiler(compiler.as_ref());
        }
        handle
    }

    /// Request deletion of a shader object.
    ///
    /// The entity is marked, its handle invalidated, and it is destroyed
    /// eagerly when provably unreferenced (after a forced flush if draw
    /// state is active), otherwise queued on the purge list. Once this
    /// returns the handle never resolves again, on either path.
    pub fn delete_shader(&mut self, shader: GLuint) {
        crate::gles_trace!(LOG_SOURCE, "DeleteShader({})", shader);

        if shader == 0 {
            return;
        }

        let Some(key) = self.resolve_shader_or_record(shader) else {
            return;
        };
        let free = {
            let Some(entity) = self.resources_mut().shader_mut(key) else {
                return;
            };
            entity.mark_for_deletion();
            entity.is_free_for_deletion()
        };

        self.resources_mut().erase_handle(shader);

        if free {
            // Flush in case the shader is part of the in-flight pipeline
            if self.is_in_draw_state() {
                self.flush();
            }
            self.resources_mut().destroy_shader(key);
        } else {
            self.resources_mut().add_to_purge_list(key);
            crate::gles_debug!(LOG_SOURCE, "shader {} queued for deferred deletion", shader);
        }
    }

    /// Replace a shader's source with the concatenation of `count` fragments.
    ///
    /// `lengths[i]`, when present and non-negative, bounds fragment `i`;
    /// otherwise the whole fragment is taken. Requires compiler support.
    pub fn shader_source(
        &mut self,
        shader: GLuint,
        count: GLsizei,
        strings: &[&str],
        lengths: Option<&[GLint]>,
    ) {
        crate::gles_trace!(LOG_SOURCE, "ShaderSource({}, {})", shader, count);

        if !self.has_shader_compiler() {
            return;
        }
        let Some(key) = self.resolve_shader_or_record(shader) else {
            return;
        };
        if count < 0 {
            self.record_error(GlError::InvalidValue);
            return;
        }

        let taken = (count as usize).min(strings.len());
        if let Some(entity) = self.resources_mut().shader_mut(key) {
            entity.set_source(&strings[..taken], lengths);
        }
    }

    /// Compile a shader's source through the shared compiler service,
    /// constructing the service first if this epoch has none yet.
    ///
    /// Returns without effect when compiler support is absent, the handle is
    /// bad, or no source is assigned.
    pub fn compile_shader(&mut self, shader: GLuint) {
        crate::gles_trace!(LOG_SOURCE, "CompileShader({})", shader);

        if !self.has_shader_compiler() {
            return;
        }
        let Some(key) = self.resolve_shader_or_record(shader) else {
            return;
        };
        if !self.resources().shader(key).is_some_and(|s| s.has_source()) {
            return;
        }

        self.ensure_shader_compiler();

        if let Some(entity) = self.resources_mut().shader_mut(key) {
            entity.compile();
        }
    }

    /// Query a shader object parameter. Writes nothing on a bad handle or
    /// unknown parameter name.
    pub fn get_shaderiv(&mut self, shader: GLuint, pname: GLenum, params: &mut GLint) {
        let Some(key) = self.resolve_shader_or_record(shader) else {
            return;
        };
        let Some(entity) = self.resources().shader(key) else {
            return;
        };

        match pname {
            GL_COMPILE_STATUS => {
                *params = if entity.is_compiled() {
                    GL_TRUE as GLint
                } else {
                    GL_FALSE as GLint
                }
            }
            GL_DELETE_STATUS => {
                *params = if entity.is_marked_for_deletion() {
                    GL_TRUE as GLint
                } else {
                    GL_FALSE as GLint
                }
            }
            GL_INFO_LOG_LENGTH => *params = entity.info_log_length(),
            GL_SHADER_SOURCE_LENGTH => *params = entity.source_length(),
            GL_SHADER_TYPE => *params = entity.stage().to_gl() as GLint,
            _ => self.record_error(GlError::InvalidEnum),
        }
    }

    /// Copy the shader's diagnostic log into a caller buffer under the
    /// truncation contract. A negative `bufsize` records `InvalidValue`.
    pub fn get_shader_info_log(
        &mut self,
        shader: GLuint,
        bufsize: GLsizei,
        length: Option<&mut GLsizei>,
        infolog: &mut [u8],
    ) {
        if bufsize < 0 {
            self.record_error(GlError::InvalidValue);
            return;
        }
        let Some(key) = self.resolve_shader_or_record(shader) else {
            return;
        };
        let Some(entity) = self.resources().shader(key) else {
            return;
        };
        copy_bounded(entity.info_log(), bufsize, length, infolog);
    }

    /// Copy the shader's concatenated source into a caller buffer under the
    /// truncation contract. A negative `bufsize` records `InvalidValue`.
    pub fn get_shader_source(
        &mut self,
        shader: GLuint,
        bufsize: GLsizei,
        length: Option<&mut GLsizei>,
        source: &mut [u8],
    ) {
        if bufsize < 0 {
            self.record_error(GlError::InvalidValue);
            return;
        }
        let Some(key) = self.resolve_shader_or_record(shader) else {
            return;
        };
        let Some(entity) = self.resources().shader(key) else {
            return;
        };
        copy_bounded(entity.source(), bufsize, length, source);
    }

    /// Numeric range and precision of a shader numeric format, derived from
    /// the representation's exponent and mantissa widths. Out-params stay
    /// untouched on failure. Requires compiler support.
    pub fn get_shader_precision_format(
        &mut self,
        shader_type: GLenum,
        precision_type: GLenum,
        range: &mut [GLint; 2],
        precision: &mut GLint,
    ) {
        if !self.has_shader_compiler() {
            return;
        }
        if ShaderStage::from_gl(shader_type).is_none() {
            self.record_error(GlError::InvalidEnum);
            return;
        }

        // floor(log2(f32::MAX)) and floor(-log2(f32::EPSILON))
        const FLOAT_RANGE: GLint = (f32::MAX_EXP - 1) as GLint;
        const FLOAT_PRECISION: GLint = (f32::MANTISSA_DIGITS - 1) as GLint;

        match precision_type {
            GL_LOW_FLOAT | GL_MEDIUM_FLOAT | GL_HIGH_FLOAT => {
                range[0] = FLOAT_RANGE;
                range[1] = FLOAT_RANGE;
                *precision = FLOAT_PRECISION;
            }
            GL_LOW_INT | GL_MEDIUM_INT => {
                let bits = i16::MAX.ilog2() as GLint;
                range[0] = bits;
                range[1] = bits;
                *precision = 0;
            }
            GL_HIGH_INT => {
                let bits = i32::MAX.ilog2() as GLint;
                range[0] = bits;
                range[1] = bits;
                *precision = 0;
            }
            _ => self.record_error(GlError::InvalidEnum),
        }
    }

    /// Whether a handle names a live shader object. Never records an error.
    pub fn is_shader(&self, shader: GLuint) -> bool {
        self.resources().is_shader_handle(shader)
    }

    /// Destroy the shared compiler service of the current epoch, if any.
    /// Requires compiler support.
    pub fn release_shader_compiler(&mut self) {
        crate::gles_trace!(LOG_SOURCE, "ReleaseShaderCompiler()");

        if !self.has_shader_compiler() {
            return;
        }
        if self.drop_shader_compiler() {
            crate::gles_info!(LOG_SOURCE, "shader compiler released");
        }
    }

    /// Load precompiled shader binaries. No binary format is supported by
    /// this design; calling this is fatal, not a recoverable API error.
    pub fn shader_binary(&mut self, shaders: &[GLuint], binary_format: GLenum, binary: &[u8]) {
        let _ = (shaders, binary_format, binary);
        unimplemented!("shader binary formats are not supported");
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "context_shader_tests.rs"]
mod tests;
