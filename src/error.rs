//! Error types for Shadowbox
//!
//! Only start-up can fail: creating the event loop, the surface and the GPU
//! device. Scene configuration itself is total and never returns an error.

use thiserror::Error;

/// Errors raised while bringing up the window, surface and GPU device
#[derive(Debug, Error)]
pub enum ShadowboxError {
    #[error("failed to create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("failed to create rendering surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("no suitable GPU adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to request GPU device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("surface reports no supported texture formats")]
    NoSurfaceFormat,

    #[error("failed to create pipeline '{name}': {reason}")]
    Pipeline { name: String, reason: String },
}

/// Convenience alias used across the crate
pub type Result<T> = std::result::Result<T, ShadowboxError>;
