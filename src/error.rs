//! Error types.

use thiserror::Error;

/// Failure of a layout pass.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("layout engine error: {0}")]
    Engine(#[from] taffy::TaffyError),

    #[error("bounding size must be finite and non-negative, got {width}x{height}")]
    InvalidBounds { width: f32, height: f32 },
}
