//! # Procedural Geometry Generation
//!
//! Generates the primitive shapes the demo scene is built from, so no model
//! files are needed.
//!
//! ## Supported Primitives
//!
//! - **Box**: axis-aligned box with independent width, height and depth
//! - **Cylinder**: Y-axis cylinder with separate top and bottom radii
//! - **Capsule**: Y-axis cylinder capped by two hemispheres
//! - **Sphere**: UV sphere
//! - **Plane**: flat plane in the XY plane
//! - **Axes**: three coloured line segments along X, Y and Z
//!
//! All triangle primitives are Y-up with counter-clockwise front faces.
//!
//! ## Usage
//!
//! ```rust
//! use shadowbox::gfx::geometry::{generate_box, ShapeForm};
//!
//! let cube = generate_box(1.0, 1.0, 1.0);
//! assert_eq!(cube.triangle_count(), 12);
//!
//! let capsule = ShapeForm::Capsule { radius: 1.0, length: 1.0 }.build();
//! assert!(capsule.vertex_count() > 0);
//! ```

pub mod primitives;

pub use primitives::*;

use crate::gfx::scene::vertex::Vertex3D;

/// Represents generated geometry data ready for GPU upload
#[derive(Debug, Clone, Default)]
pub struct GeometryData {
    /// Vertex positions (x, y, z)
    pub vertices: Vec<[f32; 3]>,
    /// Texture coordinates (u, v)
    pub tex_coords: Vec<[f32; 2]>,
    /// Normal vectors (x, y, z)
    pub normals: Vec<[f32; 3]>,
    /// Triangle indices (counter-clockwise winding)
    pub indices: Vec<u32>,
}

impl GeometryData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Interleaves positions and normals into the renderer's vertex format
    pub fn to_vertices(&self) -> Vec<Vertex3D> {
        self.vertices
            .iter()
            .enumerate()
            .map(|(i, position)| Vertex3D {
                position: *position,
                normal: self.normals.get(i).copied().unwrap_or([0.0, 1.0, 0.0]),
            })
            .collect()
    }
}

/// Geometric description of a node's drawable form, in scene units
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeForm {
    Box {
        width: f32,
        height: f32,
        depth: f32,
    },
    Cylinder {
        radius_top: f32,
        radius_bottom: f32,
        height: f32,
    },
    Capsule {
        radius: f32,
        length: f32,
    },
    Sphere {
        radius: f32,
    },
    Plane {
        width: f32,
        height: f32,
    },
}

impl ShapeForm {
    pub const CYLINDER_SEGMENTS: u32 = 32;
    pub const CAPSULE_CAP_SEGMENTS: u32 = 4;
    pub const CAPSULE_RADIAL_SEGMENTS: u32 = 8;
    pub const SPHERE_WIDTH_SEGMENTS: u32 = 32;
    pub const SPHERE_HEIGHT_SEGMENTS: u32 = 16;

    /// Generates the triangle data described by this form
    pub fn build(&self) -> GeometryData {
        match *self {
            ShapeForm::Box {
                width,
                height,
                depth,
            } => generate_box(width, height, depth),
            ShapeForm::Cylinder {
                radius_top,
                radius_bottom,
                height,
            } => generate_cylinder(radius_top, radius_bottom, height, Self::CYLINDER_SEGMENTS),
            ShapeForm::Capsule { radius, length } => generate_capsule(
                radius,
                length,
                Self::CAPSULE_CAP_SEGMENTS,
                Self::CAPSULE_RADIAL_SEGMENTS,
            ),
            ShapeForm::Sphere { radius } => generate_sphere(
                radius,
                Self::SPHERE_WIDTH_SEGMENTS,
                Self::SPHERE_HEIGHT_SEGMENTS,
            ),
            ShapeForm::Plane { width, height } => generate_plane(width, height, 1, 1),
        }
    }
}
