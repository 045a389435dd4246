/// Mock shader compiler for unit tests (no real compiler backend required)
///
/// Lets tests script success or failure and observe how often the service
/// was invoked.

#[cfg(test)]
use std::sync::atomic::{AtomicUsize, Ordering};

#[cfg(test)]
use crate::compiler::{CompileOutput, ShaderCompiler, ShaderStage};

/// SPIR-V magic number, used as the fake IR word stream
#[cfg(test)]
const MOCK_IR_MAGIC: u32 = 0x0723_0203;

#[cfg(test)]
pub struct MockCompiler {
    fail: bool,
    log: String,
    calls: AtomicUsize,
}

#[cfg(test)]
impl MockCompiler {
    /// A mock that succeeds on every invocation
    pub fn new() -> Self {
        Self {
            fail: false,
            log: String::new(),
            calls: AtomicUsize::new(0),
        }
    }

    /// A mock that fails every invocation with the given diagnostic log
    pub fn failing(log: &str) -> Self {
        Self {
            fail: true,
            log: log.to_string(),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of compile invocations observed so far
    pub fn compile_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
impl ShaderCompiler for MockCompiler {
    fn compile(&self, stage: ShaderStage, source: &str) -> CompileOutput {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            CompileOutput::failed(self.log.clone())
        } else {
            // Fake word stream: magic + stage tag + source length
            CompileOutput::compiled(vec![
                MOCK_IR_MAGIC,
                match stage {
                    ShaderStage::Vertex => 0,
                    ShaderStage::Fragment => 4,
                },
                source.len() as u32,
            ])
        }
    }
}
