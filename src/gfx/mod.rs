//! # Graphics Module
//!
//! Everything between the scene description and the pixels on screen.
//!
//! ## Architecture Overview
//!
//! - **Camera** ([`camera`]) - Perspective camera aimed at a target from an orbit position
//! - **Geometry** ([`geometry`]) - Procedural box, cylinder, capsule, sphere and plane meshes
//! - **Rendering** ([`rendering`]) - Lambert shading with a cached spotlight shadow map
//! - **Scene** ([`scene`]) - Nodes, spotlight and axes helper
//! - **Resources** ([`resources`]) - Materials, textures and bind groups
//!
//! ## Usage
//!
//! ```no_run
//! use shadowbox::gfx::{RenderEngine, scene::Scene};
//! use shadowbox::params::ParameterSet;
//!
//! // The render engine is created by ShadowboxApp once a window exists
//! // let engine = pollster::block_on(RenderEngine::new(window, w, h, &render_config))?;
//! let (scene, nodes) = Scene::demo(&ParameterSet::default());
//! ```

pub mod camera;
pub mod geometry;
pub mod rendering;
pub mod resources;
pub mod scene;

// Re-export commonly used types
pub use camera::orbit_camera::OrbitCamera;
pub use rendering::render_engine::RenderEngine;
