// --- File: error.rs ---
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SwarmError {
    #[error("arena must have positive size, got {width}x{height}")]
    InvalidArena { width: f32, height: f32 },
    #[error("base radius must be positive, got {0}")]
    InvalidRadius(f32),
    #[error("organism {index} has {segments} segments; expected 1 or 4..=9")]
    InvalidSegmentCount { index: usize, segments: u8 },
    #[error("population of {0} organisms exceeds the 255 an owner index can address")]
    TooManyOrganisms(usize),
    #[error("no suitable graphics adapter found")]
    NoAdapter,
    #[error("failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),
    #[error("failed to request device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),
}
// --- End of File: error.rs ---
