use std::collections::TryReserveError;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("framebuffer dimensions must be non-zero, got {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    #[error("failed to allocate framebuffer of {cells} cells")]
    AllocationFailed {
        cells: usize,
        #[source]
        source: TryReserveError,
    },
}
