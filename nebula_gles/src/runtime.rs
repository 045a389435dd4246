/// Nebula Runtime - singleton manager for API contexts
///
/// This module provides global singleton management for contexts: deletion
/// requests and purge-list ownership are defined against the *currently
/// current* context, so the runtime tracks which context that is. It uses
/// thread-safe static storage with RwLock for safe concurrent access.

use std::sync::{Arc, Mutex, OnceLock, RwLock};

use crate::backend::GpuBackend;
use crate::context::{CompilerFactory, Context, ContextConfig};
use crate::error::{Error, Result};

// ===== INTERNAL STATE =====

/// Global runtime state storage
static RUNTIME_STATE: OnceLock<RuntimeState> = OnceLock::new();

/// Internal state structure holding the current context
struct RuntimeState {
    /// Currently current context (wrapped in Mutex for thread-safe mutable
    /// access)
    current: RwLock<Option<Arc<Mutex<Context>>>>,
}

impl RuntimeState {
    fn new() -> Self {
        Self {
            current: RwLock::new(None),
        }
    }
}

// ===== PUBLIC API =====

/// Main runtime singleton manager
///
/// Manages context creation and the current-context binding.
///
/// # Example
///
/// ```no_run
/// use std::sync::{Arc, Mutex};
/// use nebula_gles::nebula::{Runtime, ContextConfig};
/// use nebula_gles::nebula::backend::GpuBackend;
/// use nebula_gles::nebula::compiler::ShaderCompiler;
///
/// # fn backend() -> Arc<Mutex<dyn GpuBackend>> { unimplemented!() }
/// # fn factory() -> Box<dyn Fn() -> Arc<dyn ShaderCompiler> + Send + Sync> { unimplemented!() }
/// // Initialize the runtime
/// Runtime::initialize()?;
///
/// // Create a context; it becomes current
/// let context = Runtime::create_context(ContextConfig::default(), backend(), factory())?;
///
/// // Access the current context globally
/// let current = Runtime::current()?;
///
/// // Cleanup
/// Runtime::shutdown();
/// # Ok::<(), nebula_gles::nebula::Error>(())
/// ```
pub struct Runtime;

impl Runtime {
    /// Helper to log errors before returning them (internal use)
    fn log_and_return_error(error: Error) -> Error {
        crate::gles_error!("nebula::Runtime", "{}", error);
        error
    }

    /// Initialize the runtime
    ///
    /// This must be called once at application startup before creating any
    /// contexts.
    pub fn initialize() -> Result<()> {
        RUNTIME_STATE.get_or_init(RuntimeState::new);
        Ok(())
    }

    /// Shutdown the runtime, tearing down the current context
    ///
    /// After calling this, a new context must be created (and made current)
    /// before further API calls.
    pub fn shutdown() {
        if let Some(state) = RUNTIME_STATE.get() {
            let context = match state.current.write() {
                Ok(mut lock) => lock.take(),
                Err(_) => None,
            };
            if let Some(context) = context {
                if let Ok(mut context) = context.lock() {
                    context.teardown();
                }
            }
        }
        crate::gles_info!("nebula::Runtime", "runtime shut down");
    }

    /// Create a context over a backend and compiler factory, and make it
    /// current
    ///
    /// # Errors
    ///
    /// Returns an error if the runtime is not initialized or the state lock
    /// is poisoned.
    pub fn create_context(
        config: ContextConfig,
        backend: Arc<Mutex<dyn GpuBackend>>,
        compiler_factory: CompilerFactory,
    ) -> Result<Arc<Mutex<Context>>> {
        let name = config.name.clone();
        let context = Arc::new(Mutex::new(Context::new(config, backend, compiler_factory)));
        Self::make_current(context.clone())?;
        crate::gles_info!("nebula::Runtime", "context '{}' created and made current", name);
        Ok(context)
    }

    /// Make a context current
    ///
    /// # Errors
    ///
    /// Returns an error if the runtime is not initialized or the state lock
    /// is poisoned.
    pub fn make_current(context: Arc<Mutex<Context>>) -> Result<()> {
        let state = RUNTIME_STATE.get().ok_or_else(|| {
            Self::log_and_return_error(Error::InitializationFailed(
                "Runtime not initialized. Call Runtime::initialize() first.".to_string(),
            ))
        })?;

        let mut lock = state.current.write().map_err(|_| {
            Self::log_and_return_error(Error::BackendError("Runtime lock poisoned".to_string()))
        })?;

        *lock = Some(context);
        Ok(())
    }

    /// Get the current context
    ///
    /// # Errors
    ///
    /// Returns an error if the runtime is not initialized or no context is
    /// current.
    pub fn current() -> Result<Arc<Mutex<Context>>> {
        let state = RUNTIME_STATE.get().ok_or_else(|| {
            Self::log_and_return_error(Error::InitializationFailed(
                "Runtime not initialized. Call Runtime::initialize() first.".to_string(),
            ))
        })?;

        let lock = state.current.read().map_err(|_| {
            Self::log_and_return_error(Error::BackendError("Runtime lock poisoned".to_string()))
        })?;

        lock.clone()
            .ok_or_else(|| Self::log_and_return_error(Error::NoCurrentContext))
    }

    /// Release the current context, tearing it down
    ///
    /// The purge list of the released context is drained as part of
    /// teardown, so entities waiting on deferred deletion are reclaimed.
    ///
    /// # Errors
    ///
    /// Returns an error if the runtime is not initialized.
    pub fn release_current() -> Result<()> {
        let state = RUNTIME_STATE.get().ok_or_else(|| {
            Self::log_and_return_error(Error::InitializationFailed(
                "Runtime not initialized".to_string(),
            ))
        })?;

        let context = {
            let mut lock = state.current.write().map_err(|_| {
                Self::log_and_return_error(Error::BackendError(
                    "Runtime lock poisoned".to_string(),
                ))
            })?;
            lock.take()
        };

        if let Some(context) = context {
            if let Ok(mut context) = context.lock() {
                context.teardown();
            }
        }
        Ok(())
    }

    /// Reset the singleton for testing (only available in test builds)
    #[cfg(test)]
    pub fn reset_for_testing() {
        if let Some(state) = RUNTIME_STATE.get() {
            if let Ok(mut lock) = state.current.write() {
                *lock = None;
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "runtime_tests.rs"]
mod tests;
