/// GPU backend module - the seam to the underlying pipeline

// Module declarations
pub mod gpu_backend;

// Re-export everything from gpu_backend.rs
pub use gpu_backend::*;

// Mock backend for tests (no GPU required)
#[cfg(test)]
pub mod mock_backend;
