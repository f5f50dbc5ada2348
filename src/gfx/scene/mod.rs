//! # Scene Management Module
//!
//! Scene graph for the shadow demo: nodes with procedural meshes, the
//! spotlight, the axes helper and the vertex formats they are drawn with.
//!
//! ## Key Components
//!
//! - [`Scene`] - Owns nodes, materials, camera, spotlight and axes helper
//! - [`Node`] - A drawable with form, material, transform and shadow flags
//! - [`SpotLight`] - Cone light with a perspective shadow camera
//! - [`Vertex3D`] / [`LineVertex`] - GPU vertex formats
//!
//! ## Usage
//!
//! ```no_run
//! use shadowbox::gfx::scene::Scene;
//! use shadowbox::params::{ParameterSet, ShapeKind};
//!
//! let (mut scene, nodes) = Scene::demo(&ParameterSet::default());
//! scene.set_node_visible(nodes.shape(ShapeKind::Cylinder), true);
//! ```

pub mod light;
pub mod object;
pub mod scene;
pub mod vertex;

// Re-export main types
pub use light::SpotLight;
pub use object::{DrawNode, Mesh, Node};
pub use scene::{AxesHelper, DemoNodes, NodeId, Scene, SceneStatistics};
pub use vertex::{LineVertex, Vertex3D};
