/// Central resource manager for one context
///
/// Couples the handle namespace with one slot-keyed store per object kind
/// and the purge list for deferred deletion. The stores exclusively own
/// every entity; nothing outside this type destroys an entity directly.

use slotmap::{Key, SlotMap};

use super::namespace::{ShadingNamespace, ShadingObject};
use super::program::Program;
use super::shader::Shader;
use super::{ProgramKey, ShaderKey};
use crate::compiler::ShaderStage;
use crate::error::GlError;
use crate::types::GLuint;

pub struct ResourceManager {
    namespace: ShadingNamespace,
    /// Shader entities stored in a slot map for O(1) insert/remove with
    /// stable keys
    shaders: SlotMap<ShaderKey, Shader>,
    programs: SlotMap<ProgramKey, Program>,
    /// Entities marked for deletion whose handles are gone but which are
    /// still reachable from live programs; reconsidered on flush and on
    /// context teardown
    purge_list: Vec<ShaderKey>,
}

impl ResourceManager {
    /// Create an empty resource manager
    pub fn new() -> Self {
        Self {
            namespace: ShadingNamespace::new(),
            shaders: SlotMap::with_key(),
            programs: SlotMap::with_key(),
            purge_list: Vec::new(),
        }
    }

    // ===== ALLOCATION =====

    /// Allocate a shader entity and wire a fresh handle to it
    pub fn allocate_shader(&mut self, stage: ShaderStage) -> (GLuint, ShaderKey) {
        let key = self.shaders.insert(Shader::new(stage));
        let handle = self.namespace.allocate(ShadingObject::Shader(key));
        (handle, key)
    }

    /// Allocate a program entity and wire a fresh handle to it
    pub fn allocate_program(&mut self) -> (GLuint, ProgramKey) {
        let key = self.programs.insert(Program::new());
        let handle = self.namespace.allocate(ShadingObject::Program(key));
        (handle, key)
    }

    // ===== RESOLUTION =====

    /// Resolve a public handle to a shader store key.
    ///
    /// Distinguishes the two failure kinds: a malformed or unknown handle is
    /// `InvalidValue`, a live handle of the wrong kind (or with a null store
    /// key) is `InvalidOperation`.
    pub fn resolve_shader(&self, handle: GLuint) -> Result<ShaderKey, GlError> {
        match self.lookup(handle)? {
            ShadingObject::Shader(key) if !key.is_null() => Ok(*key),
            _ => Err(GlError::InvalidOperation),
        }
    }

    /// Resolve a public handle to a program store key (failure kinds as in
    /// `resolve_shader`)
    pub fn resolve_program(&self, handle: GLuint) -> Result<ProgramKey, GlError> {
        match self.lookup(handle)? {
            ShadingObject::Program(key) if !key.is_null() => Ok(*key),
            _ => Err(GlError::InvalidOperation),
        }
    }

    fn lookup(&self, handle: GLuint) -> Result<&ShadingObject, GlError> {
        if handle == 0 || handle >= self.namespace.bound() {
            return Err(GlError::InvalidValue);
        }
        self.namespace.resolve(handle).ok_or(GlError::InvalidValue)
    }

    /// Whether a handle names a live shader object. Never an error.
    pub fn is_shader_handle(&self, handle: GLuint) -> bool {
        matches!(self.namespace.resolve(handle), Some(ShadingObject::Shader(_)))
    }

    /// Whether a handle names a live program object. Never an error.
    pub fn is_program_handle(&self, handle: GLuint) -> bool {
        matches!(self.namespace.resolve(handle), Some(ShadingObject::Program(_)))
    }

    // ===== ENTITY ACCESS =====

    pub fn shader(&self, key: ShaderKey) -> Option<&Shader> {
        self.shaders.get(key)
    }

    pub fn shader_mut(&mut self, key: ShaderKey) -> Option<&mut Shader> {
        self.shaders.get_mut(key)
    }

    pub fn program(&self, key: ProgramKey) -> Option<&Program> {
        self.programs.get(key)
    }

    pub fn program_mut(&mut self, key: ProgramKey) -> Option<&mut Program> {
        self.programs.get_mut(key)
    }

    /// Iterate all live shader entities (compiler propagation)
    pub fn shaders_mut(&mut self) -> impl Iterator<Item = &mut Shader> {
        self.shaders.values_mut()
    }

    /// Iterate all live program entities (compiler propagation)
    pub fn programs_mut(&mut self) -> impl Iterator<Item = &mut Program> {
        self.programs.values_mut()
    }

    // ===== DESTRUCTION =====

    /// Remove a handle's namespace entry. The underlying entity stays in its
    /// store until destroyed explicitly.
    pub fn erase_handle(&mut self, handle: GLuint) {
        self.namespace.erase(handle);
    }

    /// Physically destroy a shader entity
    pub fn destroy_shader(&mut self, key: ShaderKey) {
        self.shaders.remove(key);
    }

    /// Physically destroy a program entity
    pub fn destroy_program(&mut self, key: ProgramKey) {
        self.programs.remove(key);
    }

    /// Queue a shader for deferred destruction. The entity stays allocated
    /// but is no longer reachable through its old handle.
    pub fn add_to_purge_list(&mut self, key: ShaderKey) {
        if !self.purge_list.contains(&key) {
            self.purge_list.push(key);
        }
    }

    /// Destroy every queued entity that has become free for deletion.
    /// Returns how many entities were destroyed.
    pub fn clean_purge_list(&mut self) -> usize {
        let mut destroyed = 0;
        let mut remaining = Vec::new();
        for key in self.purge_list.drain(..) {
            let free = self
                .shaders
                .get(key)
                .map_or(true, Shader::is_free_for_deletion);
            if free {
                self.shaders.remove(key);
                destroyed += 1;
            } else {
                remaining.push(key);
            }
        }
        self.purge_list = remaining;
        destroyed
    }

    /// Number of entities currently queued for deferred destruction
    pub fn purge_list_len(&self) -> usize {
        self.purge_list.len()
    }

    /// Drop every entity and handle. Used at context teardown, where pending
    /// GPU work has already been flushed.
    pub fn clear(&mut self) {
        self.purge_list.clear();
        self.shaders.clear();
        self.programs.clear();
        self.namespace.clear();
    }

    // ===== COUNTS =====

    pub fn shader_count(&self) -> usize {
        self.shaders.len()
    }

    pub fn program_count(&self) -> usize {
        self.programs.len()
    }

    pub fn live_handle_count(&self) -> usize {
        self.namespace.len()
    }
}

impl Default for ResourceManager {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "resource_manager_tests.rs"]
mod tests;
