/// Program entity
///
/// The shading namespace spans shaders and programs, and the compiler
/// service propagates to both, so the program side of the object model lives
/// here. Only the attachment graph and deletion mark are modeled; linking is
/// backend territory.

use std::sync::{Arc, Weak};

use super::ShaderKey;
use crate::compiler::{ShaderCompiler, ShaderStage};

pub struct Program {
    vertex: Option<ShaderKey>,
    fragment: Option<ShaderKey>,
    marked_for_deletion: bool,
    /// Weak reference to the shared compiler service, used at link time
    compiler: Option<Weak<dyn ShaderCompiler>>,
}

impl Program {
    pub fn new() -> Self {
        Self {
            vertex: None,
            fragment: None,
            marked_for_deletion: false,
            compiler: None,
        }
    }

    /// Attach (or clear) the shared compiler service reference
    pub fn set_compiler(&mut self, compiler: Option<&Arc<dyn ShaderCompiler>>) {
        self.compiler = compiler.map(Arc::downgrade);
    }

    /// Whether the service reference currently resolves to a live instance
    pub fn has_live_compiler(&self) -> bool {
        self.compiler
            .as_ref()
            .and_then(Weak::upgrade)
            .is_some()
    }

    /// Attach a shader to its stage slot. Returns false when the slot is
    /// already occupied.
    pub fn attach(&mut self, stage: ShaderStage, shader: ShaderKey) -> bool {
        let slot = match stage {
            ShaderStage::Vertex => &mut self.vertex,
            ShaderStage::Fragment => &mut self.fragment,
        };
        if slot.is_some() {
            return false;
        }
        *slot = Some(shader);
        true
    }

    /// Detach a shader from whichever slot holds it. Returns false when the
    /// shader is not attached.
    pub fn detach(&mut self, shader: ShaderKey) -> bool {
        if self.vertex == Some(shader) {
            self.vertex = None;
            true
        } else if self.fragment == Some(shader) {
            self.fragment = None;
            true
        } else {
            false
        }
    }

    /// The shader attached at a stage slot
    pub fn attachment(&self, stage: ShaderStage) -> Option<ShaderKey> {
        match stage {
            ShaderStage::Vertex => self.vertex,
            ShaderStage::Fragment => self.fragment,
        }
    }

    /// Whether a shader is attached to either slot
    pub fn is_attached(&self, shader: ShaderKey) -> bool {
        self.vertex == Some(shader) || self.fragment == Some(shader)
    }

    /// Currently attached shaders, vertex slot first
    pub fn attachments(&self) -> impl Iterator<Item = ShaderKey> {
        [self.vertex, self.fragment].into_iter().flatten()
    }

    /// Set the deletion mark. Idempotent, never reset.
    pub fn mark_for_deletion(&mut self) {
        self.marked_for_deletion = true;
    }

    pub fn is_marked_for_deletion(&self) -> bool {
        self.marked_for_deletion
    }
}

impl Default for Program {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "program_tests.rs"]
mod tests;
