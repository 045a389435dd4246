/// GpuBackend trait - the context's window onto in-flight GPU work

/// GPU pipeline backend trait
///
/// The object-lifecycle layer never talks to the GPU directly; the only
/// things it needs from the pipeline are whether submitted work may still
/// reference shading objects, and a way to force that work to retire before
/// an eager destruction. Implemented by backend-specific pipelines.
pub trait GpuBackend: Send + Sync {
    /// Whether draw state is active, i.e. pending submissions may still
    /// reference shading objects
    fn in_draw_state(&self) -> bool;

    /// Synchronously retire all pending work
    fn flush(&mut self);
}
