// src/lib.rs
//! Shadowbox
//!
//! An interactive shadow-casting demo built on wgpu, winit and Dear ImGui.
//! A floor, one of three demo shapes and an orbiting spotlight are driven
//! live from a parameter panel; every panel change is mapped to a scene
//! mutation by the [`SceneConfigurator`] and followed by a redraw.

pub mod app;
pub mod cli;
pub mod config;
pub mod configurator;
pub mod error;
pub mod gfx;
pub mod params;
pub mod ui;
pub mod wgpu_utils;

// Re-export main types for convenience
pub use app::ShadowboxApp;
pub use config::{AppConfig, RenderConfig};
pub use configurator::{ParamChange, RedrawTarget, SceneConfigurator};
pub use error::{Result, ShadowboxError};
pub use params::{ParameterSet, ShapeKind};
