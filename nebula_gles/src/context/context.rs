/// Context - the orchestrator translating public API calls into operations
/// on the resource layer
///
/// A context validates handles, enum arguments, and global preconditions
/// before delegating to the entities, records GL errors against itself, and
/// owns the per-epoch shader compiler service.

use std::sync::{Arc, Mutex};

use bitflags::bitflags;

use crate::backend::GpuBackend;
use crate::compiler::ShaderCompiler;
use crate::error::GlError;
use crate::resource::ResourceManager;
use crate::types::{GLboolean, GLenum, GL_FALSE, GL_NO_ERROR, GL_SHADER_COMPILER, GL_TRUE};

pub(crate) const LOG_SOURCE: &str = "nebula::Context";

bitflags! {
    /// Capabilities of one context configuration
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Capabilities: u32 {
        /// A shader compiler is present in this configuration
        const SHADER_COMPILER = 1 << 0;
    }
}

/// Factory constructing the shared compiler service on first need
pub type CompilerFactory = Box<dyn Fn() -> Arc<dyn ShaderCompiler> + Send + Sync>;

/// Context configuration
pub struct ContextConfig {
    /// Capability flags advertised by this context
    pub capabilities: Capabilities,
    /// Context name used in log output
    pub name: String,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            capabilities: Capabilities::SHADER_COMPILER,
            name: "nebula context".to_string(),
        }
    }
}

pub struct Context {
    config: ContextConfig,
    resources: ResourceManager,
    backend: Arc<Mutex<dyn GpuBackend>>,
    compiler_factory: CompilerFactory,
    /// The shared compiler service of the current epoch, if constructed
    compiler: Option<Arc<dyn ShaderCompiler>>,
    /// Sticky error slot: the first recorded error is kept until read
    error: Option<GlError>,
}

impl Context {
    /// Create a context over a GPU backend and a compiler factory.
    ///
    /// The factory is not invoked here; the compiler service is expensive
    /// and built on first need.
    pub fn new(
        config: ContextConfig,
        backend: Arc<Mutex<dyn GpuBackend>>,
        compiler_factory: CompilerFactory,
    ) -> Self {
        Self {
            config,
            resources: ResourceManager::new(),
            backend,
            compiler_factory,
            compiler: None,
            error: None,
        }
    }

    /// Context name from the configuration
    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// Resource layer of this context
    pub fn resources(&self) -> &ResourceManager {
        &self.resources
    }

    pub(crate) fn resources_mut(&mut self) -> &mut ResourceManager {
        &mut self.resources
    }

    // ===== ERROR ACCUMULATOR =====

    /// Read and clear the recorded error. Returns `GL_NO_ERROR` when none is
    /// pending.
    pub fn get_error(&mut self) -> GLenum {
        match self.error.take() {
            Some(error) => error.code(),
            None => GL_NO_ERROR,
        }
    }

    /// Record an error kind. Only the first error recorded since the last
    /// read is kept.
    pub(crate) fn record_error(&mut self, error: GlError) {
        if self.error.is_none() {
            self.error = Some(error);
        }
    }

    // ===== CAPABILITIES =====

    pub fn capabilities(&self) -> Capabilities {
        self.config.capabilities
    }

    /// Whether this configuration advertises a shader compiler at all
    pub fn shader_compiler_supported(&self) -> bool {
        self.config.capabilities.contains(Capabilities::SHADER_COMPILER)
    }

    /// Boolean state query. Only the capability booleans owned by this
    /// subsystem are served here.
    pub fn get_booleanv(&mut self, pname: GLenum, data: &mut GLboolean) {
        match pname {
            GL_SHADER_COMPILER => {
                *data = if self.shader_compiler_supported() {
                    GL_TRUE
                } else {
                    GL_FALSE
                }
            }
            _ => self.record_error(GlError::InvalidEnum),
        }
    }

    /// Capability gate shared by every compiler-requiring operation: records
    /// `InvalidOperation` and answers false when no compiler is present in
    /// this configuration.
    pub(crate) fn has_shader_compiler(&mut self) -> bool {
        let mut support = GL_FALSE;
        self.get_booleanv(GL_SHADER_COMPILER, &mut support);
        if support == GL_FALSE {
            self.record_error(GlError::InvalidOperation);
            return false;
        }
        true
    }

    // ===== COMPILER SERVICE LIFECYCLE =====

    /// The shared compiler service of the current epoch, if constructed
    pub fn shader_compiler(&self) -> Option<&Arc<dyn ShaderCompiler>> {
        self.compiler.as_ref()
    }

    /// Construct the compiler service if this epoch has none yet, and attach
    /// it to every live shader and program entity, whenever they were
    /// created.
    pub(crate) fn ensure_shader_compiler(&mut self) {
        if self.compiler.is_some() {
            return;
        }

        let compiler = (self.compiler_factory)();
        let mut shaders = 0usize;
        let mut programs = 0usize;
        for shader in self.resources.shaders_mut() {
            shader.set_compiler(Some(&compiler));
            shaders += 1;
        }
        for program in self.resources.programs_mut() {
            program.set_compiler(Some(&compiler));
            programs += 1;
        }
        self.compiler = Some(compiler);

        crate::gles_info!(
            LOG_SOURCE,
            "shader compiler constructed, attached to {} shaders and {} programs",
            shaders,
            programs
        );
    }

    /// Drop the shared service, ending the current epoch. Entity references
    /// go stale and fail to upgrade until a new epoch begins.
    pub(crate) fn drop_shader_compiler(&mut self) -> bool {
        self.compiler.take().is_some()
    }

    // ===== PIPELINE =====

    pub(crate) fn is_in_draw_state(&self) -> bool {
        self.backend
            .lock()
            .map(|backend| backend.in_draw_state())
            .unwrap_or(false)
    }

    /// Synchronously retire pending GPU work, then reconsider the purge
    /// list: entities that became free for deletion are destroyed.
    pub fn flush(&mut self) {
        if let Ok(mut backend) = self.backend.lock() {
            backend.flush();
        }
        let purged = self.resources.clean_purge_list();
        if purged > 0 {
            crate::gles_debug!(LOG_SOURCE, "purged {} shaders after flush", purged);
        }
    }

    /// Tear the context down: retire pending work, then drop every entity,
    /// handle, and the compiler service.
    pub fn teardown(&mut self) {
        if let Ok(mut backend) = self.backend.lock() {
            backend.flush();
        }
        let pending = self.resources.purge_list_len();
        if pending > 0 {
            crate::gles_debug!(LOG_SOURCE, "teardown reclaims {} purged entities", pending);
        }
        self.resources.clear();
        self.compiler = None;
        crate::gles_info!(LOG_SOURCE, "context '{}' torn down", self.config.name);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
