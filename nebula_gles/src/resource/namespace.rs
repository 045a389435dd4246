/// Shading-object handle namespace
///
/// The only place that knows how to turn a public handle into an internal
/// object reference. Handles are opaque positive integers: 0 is never
/// allocated, values grow monotonically and are never reused, so a stale
/// handle can always be told apart from a future one.

use rustc_hash::FxHashMap;

use super::{ProgramKey, ShaderKey};
use crate::types::GLuint;

/// Tagged namespace entry: which kind of object a handle names, and the
/// store key where that object lives. Kind mismatch is a recoverable error
/// at resolution time, never undefined behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShadingObject {
    /// A shader object in the shader store
    Shader(ShaderKey),
    /// A program object in the program store
    Program(ProgramKey),
}

/// Handle namespace spanning all shading-object kinds.
///
/// Erasing a handle removes the mapping only; the underlying entity is owned
/// by its store and may outlive the handle (deferred deletion).
pub struct ShadingNamespace {
    entries: FxHashMap<GLuint, ShadingObject>,
    next_handle: GLuint,
}

impl ShadingNamespace {
    /// Create an empty namespace; the first allocated handle is 1
    pub fn new() -> Self {
        Self {
            entries: FxHashMap::default(),
            next_handle: 1,
        }
    }

    /// Wire a fresh handle to `object`. Never returns 0 and never returns a
    /// previously-issued handle.
    pub fn allocate(&mut self, object: ShadingObject) -> GLuint {
        let handle = self.next_handle;
        self.next_handle += 1;
        self.entries.insert(handle, object);
        handle
    }

    /// Look up the entry for a handle
    pub fn resolve(&self, handle: GLuint) -> Option<&ShadingObject> {
        self.entries.get(&handle)
    }

    /// Remove the mapping for a handle, returning the entry if it was live
    pub fn erase(&mut self, handle: GLuint) -> Option<ShadingObject> {
        self.entries.remove(&handle)
    }

    /// Whether a handle currently maps to an entry
    pub fn is_live(&self, handle: GLuint) -> bool {
        self.entries.contains_key(&handle)
    }

    /// One past the highest handle ever allocated. Any handle at or above
    /// this bound was never issued.
    pub fn bound(&self) -> GLuint {
        self.next_handle
    }

    /// Drop every mapping while keeping the allocation bound, so handles
    /// are never reissued across a teardown
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of live handles
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no handles are live
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ShadingNamespace {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "namespace_tests.rs"]
mod tests;
