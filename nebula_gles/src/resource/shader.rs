/// Shader entity state machine
///
/// A shader progresses Created → SourceAssigned → Compiled; `compiled` is a
/// sticky status flag, not a state exclusive with having new source:
/// reassigning source does not clear it, callers must recompile to refresh
/// the status. The deletion mark is orthogonal and terminal once set.

use std::sync::{Arc, Weak};

use crate::compiler::{ShaderCompiler, ShaderStage};
use crate::types::{GLint, GLsizei};

pub struct Shader {
    stage: ShaderStage,
    /// Concatenation of all source fragments, replaced wholesale by each
    /// source upload
    source: Option<String>,
    /// IR words produced by the last successful compile
    words: Option<Vec<u32>>,
    compiled: bool,
    marked_for_deletion: bool,
    info_log: Option<String>,
    /// Weak reference to the shared compiler service, re-resolved on each
    /// use so service release and reconstruction stay transparent
    compiler: Option<Weak<dyn ShaderCompiler>>,
    /// Number of programs currently holding this shader attached
    ref_count: u32,
}

impl Shader {
    pub fn new(stage: ShaderStage) -> Self {
        Self {
            stage,
            source: None,
            words: None,
            compiled: false,
            marked_for_deletion: false,
            info_log: None,
            compiler: None,
            ref_count: 0,
        }
    }

    /// Declared stage (vertex/fragment)
    pub fn stage(&self) -> ShaderStage {
        self.stage
    }

    /// Attach (or clear) the shared compiler service reference
    pub fn set_compiler(&mut self, compiler: Option<&Arc<dyn ShaderCompiler>>) {
        self.compiler = compiler.map(Arc::downgrade);
    }

    /// Replace the source with the concatenation of `strings`.
    ///
    /// `lengths[i]`, when present and non-negative, is the byte length of
    /// fragment `i`; a negative or missing length means the whole string.
    /// No source validation happens here; that is the compiler's job.
    pub fn set_source(&mut self, strings: &[&str], lengths: Option<&[GLint]>) {
        let mut source = String::new();
        for (i, fragment) in strings.iter().enumerate() {
            let length = lengths.and_then(|l| l.get(i)).copied();
            match length {
                Some(len) if len >= 0 => {
                    let len = (len as usize).min(fragment.len());
                    source.push_str(&String::from_utf8_lossy(&fragment.as_bytes()[..len]));
                }
                _ => source.push_str(fragment),
            }
        }
        self.source = Some(source);
    }

    pub fn has_source(&self) -> bool {
        self.source.is_some()
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Reported source length: payload plus terminator, 0 when absent or
    /// empty
    pub fn source_length(&self) -> GLsizei {
        match self.source.as_deref() {
            Some(s) if !s.is_empty() => (s.len() + 1) as GLsizei,
            _ => 0,
        }
    }

    /// Invoke the compiler service on the held source.
    ///
    /// No-op when no source is assigned or when the service reference cannot
    /// be upgraded (never constructed, or released since); the upstream
    /// capability gate lives in the context.
    pub fn compile(&mut self) {
        let Some(source) = self.source.as_deref() else {
            return;
        };
        let Some(compiler) = self.compiler.as_ref().and_then(Weak::upgrade) else {
            return;
        };

        let output = compiler.compile(self.stage, source);
        self.compiled = output.success;
        self.info_log = if output.info_log.is_empty() {
            None
        } else {
            Some(output.info_log)
        };
        self.words = if output.success {
            Some(output.words)
        } else {
            None
        };
    }

    pub fn is_compiled(&self) -> bool {
        self.compiled
    }

    /// IR words from the last successful compile
    pub fn ir_words(&self) -> Option<&[u32]> {
        self.words.as_deref()
    }

    pub fn info_log(&self) -> Option<&str> {
        self.info_log.as_deref()
    }

    /// Reported info log length: payload plus terminator, 0 when absent or
    /// empty
    pub fn info_log_length(&self) -> GLsizei {
        match self.info_log.as_deref() {
            Some(log) if !log.is_empty() => (log.len() + 1) as GLsizei,
            _ => 0,
        }
    }

    /// Set the deletion mark. Idempotent, never reset.
    pub fn mark_for_deletion(&mut self) {
        self.marked_for_deletion = true;
    }

    pub fn is_marked_for_deletion(&self) -> bool {
        self.marked_for_deletion
    }

    /// A program attached this shader
    pub fn ref_by_program(&mut self) {
        self.ref_count += 1;
    }

    /// A program detached this shader
    pub fn unref_by_program(&mut self) {
        debug_assert!(self.ref_count > 0, "unref of an unreferenced shader");
        self.ref_count = self.ref_count.saturating_sub(1);
    }

    /// Whether any program still holds this shader attached
    pub fn is_referenced(&self) -> bool {
        self.ref_count > 0
    }

    /// The single gate for physical destruction: marked for deletion and not
    /// reachable from any component still needing it
    pub fn is_free_for_deletion(&self) -> bool {
        self.marked_for_deletion && self.ref_count == 0
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "shader_tests.rs"]
mod tests;
