use cgmath::{Vector3, Zero};
use std::f32::consts::FRAC_PI_2;
use wgpu::util::DeviceExt;
use wgpu::Device;

use crate::{
    gfx::{
        camera::orbit_camera::OrbitCamera,
        geometry::{generate_axes, ShapeForm},
        resources::{
            material::{color_from_hex, Material, MaterialBindings, MaterialManager},
            node_bindings::NodeBindings,
        },
        scene::{light::SpotLight, object::Node, vertex::LineVertex},
    },
    params::{ParameterSet, ShapeKind},
};

/// Handle to a node owned by a [`Scene`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// Coloured X/Y/Z line segments drawn from the origin
pub struct AxesHelper {
    pub size: f32,
    pub visible: bool,
    vertices: Vec<LineVertex>,
    vertex_buffer: Option<wgpu::Buffer>,
}

impl AxesHelper {
    pub fn new(size: f32) -> Self {
        Self {
            size,
            visible: true,
            vertices: generate_axes(size),
            vertex_buffer: None,
        }
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertices.len() as u32
    }

    pub fn upload(&mut self, device: &Device) {
        if self.vertex_buffer.is_none() {
            self.vertex_buffer = Some(device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Axes Vertex Buffer"),
                contents: bytemuck::cast_slice(&self.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            }));
        }
    }

    pub fn vertex_buffer(&self) -> Option<&wgpu::Buffer> {
        self.vertex_buffer.as_ref()
    }
}

/// Handles of the nodes the scene configurator drives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoNodes {
    pub floor: NodeId,
    pub box_shape: NodeId,
    pub cylinder: NodeId,
    pub capsule: NodeId,
    pub light_marker: NodeId,
}

impl DemoNodes {
    pub fn shape(&self, kind: ShapeKind) -> NodeId {
        match kind {
            ShapeKind::Box => self.box_shape,
            ShapeKind::Cylinder => self.cylinder,
            ShapeKind::Capsule => self.capsule,
        }
    }
}

/// Main scene containing nodes, materials, camera and lights
///
/// Every mutation that can change what the spotlight sees goes through a
/// method that bumps the shadow epoch.
pub struct Scene {
    pub camera: OrbitCamera,
    pub light: SpotLight,
    /// Linear RGB ambient light
    pub ambient_color: [f32; 3],
    pub axes: AxesHelper,
    pub material_manager: MaterialManager,
    nodes: Vec<Node>,
    shadow_epoch: u64,
}

impl Scene {
    pub fn new(camera: OrbitCamera, light: SpotLight) -> Self {
        Self {
            camera,
            light,
            ambient_color: [0.0; 3],
            axes: AxesHelper::new(1.0),
            material_manager: MaterialManager::new(),
            nodes: Vec::new(),
            shadow_epoch: 0,
        }
    }

    /// Builds the fixed demo content.
    ///
    /// Start-up poses follow the demo's fixed initial values; only the
    /// active shape and the axes flag are taken from `params`.
    pub fn demo(params: &ParameterSet) -> (Self, DemoNodes) {
        let camera = OrbitCamera::new(Vector3::new(0.0, 30.0, 0.0), Vector3::zero(), 1.0);
        let light = SpotLight::new(Vector3::new(0.0, 10.0, 0.0), 100.0);

        let mut scene = Self::new(camera, light);
        scene.ambient_color = color_from_hex(0x888888);
        scene.axes = AxesHelper::new(100.0);
        scene.axes.visible = params.global.axes_visible;

        let white = scene
            .material_manager
            .add_material(Material::from_hex("white", 0xffffff));
        let red = scene
            .material_manager
            .add_material(Material::from_hex("red", 0xff0000));

        let floor = scene.add_node(
            Node::new(
                "floor",
                ShapeForm::Plane {
                    width: 100.0,
                    height: 100.0,
                },
            )
            .with_material(&white)
            .with_position(0.0, -1.0, 0.0)
            .with_rotation(-FRAC_PI_2, 0.0, 0.0)
            .with_shadows(false, true),
        );

        let active = params.global.shape;
        let box_shape = scene.add_node(
            Node::new(
                "box",
                ShapeForm::Box {
                    width: 1.0,
                    height: 1.0,
                    depth: 1.0,
                },
            )
            .with_material(&white)
            .with_shadows(true, false)
            .with_visible(active == ShapeKind::Box),
        );
        let cylinder = scene.add_node(
            Node::new(
                "cylinder",
                ShapeForm::Cylinder {
                    radius_top: 1.0,
                    radius_bottom: 1.0,
                    height: 1.0,
                },
            )
            .with_material(&white)
            .with_shadows(true, false)
            .with_visible(active == ShapeKind::Cylinder),
        );
        let capsule = scene.add_node(
            Node::new(
                "capsule",
                ShapeForm::Capsule {
                    radius: 1.0,
                    length: 1.0,
                },
            )
            .with_material(&white)
            .with_shadows(true, false)
            .with_visible(active == ShapeKind::Capsule),
        );

        let marker_position = scene.light.position;
        let light_marker = scene.add_node(
            Node::new("light marker", ShapeForm::Sphere { radius: 0.5 })
                .with_material(&red)
                .with_position(marker_position.x, marker_position.y, marker_position.z),
        );

        let nodes = DemoNodes {
            floor,
            box_shape,
            cylinder,
            capsule,
            light_marker,
        };
        (scene, nodes)
    }

    pub fn add_node(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        self.shadow_epoch += 1;
        NodeId(self.nodes.len() - 1)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Counter bumped by every mutation that can change the shadow map
    pub fn shadow_epoch(&self) -> u64 {
        self.shadow_epoch
    }

    fn edit_node(&mut self, id: NodeId, edit: impl FnOnce(&mut Node)) {
        if let Some(node) = self.nodes.get_mut(id.0) {
            edit(node);
            self.shadow_epoch += 1;
        }
    }

    pub fn set_node_visible(&mut self, id: NodeId, visible: bool) {
        self.edit_node(id, |node| node.visible = visible);
    }

    pub fn set_node_position(&mut self, id: NodeId, position: Vector3<f32>) {
        self.edit_node(id, |node| node.position = position);
    }

    pub fn set_node_rotation(&mut self, id: NodeId, rotation: Vector3<f32>) {
        self.edit_node(id, |node| node.rotation = rotation);
    }

    pub fn replace_node_form(&mut self, id: NodeId, form: ShapeForm) {
        self.edit_node(id, |node| node.replace_form(form));
    }

    pub fn set_light_pose(&mut self, position: Vector3<f32>, intensity: f32) {
        self.light.position = position;
        self.light.intensity = intensity;
        self.shadow_epoch += 1;
    }

    /// Moves the camera; the shadow map is unaffected
    pub fn set_camera_eye(&mut self, eye: Vector3<f32>) {
        self.camera.set_eye(eye);
    }

    pub fn set_axes_visible(&mut self, visible: bool) {
        self.axes.visible = visible;
    }

    /// Updates the scene (camera matrices, etc.)
    pub fn update(&mut self) {
        self.camera.update_view_proj();
    }

    /// Creates missing GPU resources and writes changed uniforms
    pub fn sync_gpu_resources(
        &mut self,
        device: &Device,
        queue: &wgpu::Queue,
        node_bindings: &NodeBindings,
        material_bindings: &MaterialBindings,
    ) {
        for node in &mut self.nodes {
            node.sync_gpu_resources(device, queue, node_bindings);
        }
        self.material_manager
            .update_all_gpu_resources(device, queue, material_bindings);
        self.axes.upload(device);
    }

    pub fn release_gpu_resources(&mut self) {
        for node in &mut self.nodes {
            node.release_gpu_resources();
        }
    }

    /// Node, material and triangle counts, logged at start-up
    pub fn get_statistics(&self) -> SceneStatistics {
        let visible: Vec<&Node> = self.nodes.iter().filter(|n| n.visible).collect();
        SceneStatistics {
            node_count: self.nodes.len(),
            visible_nodes: visible.len(),
            material_count: self.material_manager.list_materials().len(),
            visible_triangles: visible.iter().map(|n| n.mesh().index_count() / 3).sum(),
        }
    }
}

/// Scene statistics for debugging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneStatistics {
    pub node_count: usize,
    pub visible_nodes: usize,
    pub material_count: usize,
    pub visible_triangles: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn visible_shapes(scene: &Scene, nodes: &DemoNodes) -> Vec<ShapeKind> {
        ShapeKind::ALL
            .into_iter()
            .filter(|kind| scene.node(nodes.shape(*kind)).map_or(false, |n| n.visible))
            .collect()
    }

    #[test]
    fn test_demo_scene_content() {
        let (scene, nodes) = Scene::demo(&ParameterSet::default());

        assert_eq!(scene.nodes().count(), 5);
        assert_eq!(scene.camera.eye, Vector3::new(0.0, 30.0, 0.0));
        assert_eq!(scene.light.position, Vector3::new(0.0, 10.0, 0.0));
        assert_eq!(scene.light.intensity, 100.0);
        assert!(scene.axes.visible);
        assert_eq!(scene.axes.size, 100.0);

        let floor = scene.node(nodes.floor).unwrap();
        assert_eq!(floor.position.y, -1.0);
        assert!(floor.receive_shadow && !floor.cast_shadow);

        let marker = scene.node(nodes.light_marker).unwrap();
        assert_eq!(marker.position, scene.light.position);
        assert!(!marker.cast_shadow && !marker.receive_shadow);
        assert_eq!(marker.material_id().map(String::as_str), Some("red"));

        assert_eq!(visible_shapes(&scene, &nodes), vec![ShapeKind::Box]);
        for kind in ShapeKind::ALL {
            let shape = scene.node(nodes.shape(kind)).unwrap();
            assert!(shape.cast_shadow && !shape.receive_shadow);
        }
    }

    #[test]
    fn test_demo_honours_initial_shape_and_axes() {
        let params = ParameterSet::default()
            .with_shape(ShapeKind::Capsule)
            .with_axes(false);
        let (scene, nodes) = Scene::demo(&params);
        assert_eq!(visible_shapes(&scene, &nodes), vec![ShapeKind::Capsule]);
        assert!(!scene.axes.visible);
    }

    #[test]
    fn test_node_edits_bump_shadow_epoch() {
        let (mut scene, nodes) = Scene::demo(&ParameterSet::default());
        let epoch = scene.shadow_epoch();

        scene.set_node_visible(nodes.cylinder, true);
        assert_eq!(scene.shadow_epoch(), epoch + 1);
        scene.set_light_pose(Vector3::new(0.0, 5.0, 0.0), 50.0);
        assert_eq!(scene.shadow_epoch(), epoch + 2);

        scene.set_camera_eye(Vector3::new(0.0, 20.0, 0.0));
        scene.set_axes_visible(false);
        assert_eq!(scene.shadow_epoch(), epoch + 2);
    }

    #[test]
    fn test_statistics_count_visible_nodes() {
        let (scene, _) = Scene::demo(&ParameterSet::default());
        let stats = scene.get_statistics();
        assert_eq!(stats.node_count, 5);
        assert_eq!(stats.visible_nodes, 3);
        assert_eq!(stats.material_count, 2);
        // floor plane + box + sphere
        assert_eq!(stats.visible_triangles, 2 + 12 + 32 * 16 * 2);
    }
}
