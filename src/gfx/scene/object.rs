use cgmath::{Matrix4, Rad, Vector3, Zero};
use wgpu::util::DeviceExt;
use wgpu::Device;

use super::vertex::Vertex3D;
use crate::gfx::{
    camera::camera_utils::convert_matrix4_to_array,
    geometry::{GeometryData, ShapeForm},
    resources::{
        material::MaterialId,
        node_bindings::{NodeBindings, NodeUBO, NodeUniform},
    },
};

/// Triangle mesh with CPU data and lazily created GPU buffers
pub struct Mesh {
    vertices: Vec<Vertex3D>,
    indices: Vec<u32>,
    vertex_buffer: Option<wgpu::Buffer>,
    index_buffer: Option<wgpu::Buffer>,
    index_count: u32,
}

impl Mesh {
    pub fn from_geometry(geometry: &GeometryData) -> Self {
        Self {
            vertices: geometry.to_vertices(),
            indices: geometry.indices.clone(),
            vertex_buffer: None,
            index_buffer: None,
            index_count: geometry.indices.len() as u32,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    pub fn is_uploaded(&self) -> bool {
        self.vertex_buffer.is_some() && self.index_buffer.is_some()
    }

    /// Creates the vertex and index buffers if they do not exist yet
    pub fn upload(&mut self, device: &Device) {
        if self.is_uploaded() {
            return;
        }

        self.vertex_buffer = Some(device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Vertex Buffer"),
            contents: bytemuck::cast_slice(&self.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        }));
        self.index_buffer = Some(device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Index Buffer"),
            contents: bytemuck::cast_slice(&self.indices),
            usage: wgpu::BufferUsages::INDEX,
        }));
    }

    /// Destroys the GPU buffers, returning whether any existed
    pub fn release(&mut self) -> bool {
        let mut released = false;
        if let Some(buffer) = self.vertex_buffer.take() {
            buffer.destroy();
            released = true;
        }
        if let Some(buffer) = self.index_buffer.take() {
            buffer.destroy();
            released = true;
        }
        released
    }
}

// Uniform buffer and bind group holding the node transform
struct NodeGpuResources {
    ubo: NodeUBO,
    bind_group: wgpu::BindGroup,
}

/// A positioned, oriented, optionally visible drawable
pub struct Node {
    pub name: String,
    form: ShapeForm,
    mesh: Mesh,
    material_id: Option<MaterialId>,
    pub position: Vector3<f32>,
    /// Euler angles in radians, applied in XYZ order
    pub rotation: Vector3<f32>,
    pub visible: bool,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
    /// Number of times the form has been replaced
    form_generation: u32,
    gpu_resources: Option<NodeGpuResources>,
}

impl Node {
    pub fn new(name: &str, form: ShapeForm) -> Self {
        Self {
            name: name.to_string(),
            mesh: Mesh::from_geometry(&form.build()),
            form,
            material_id: None,
            position: Vector3::zero(),
            rotation: Vector3::zero(),
            visible: true,
            cast_shadow: false,
            receive_shadow: false,
            form_generation: 0,
            gpu_resources: None,
        }
    }

    pub fn with_material(mut self, material_id: &str) -> Self {
        self.material_id = Some(material_id.to_string());
        self
    }

    pub fn with_position(mut self, x: f32, y: f32, z: f32) -> Self {
        self.position = Vector3::new(x, y, z);
        self
    }

    pub fn with_rotation(mut self, x: f32, y: f32, z: f32) -> Self {
        self.rotation = Vector3::new(x, y, z);
        self
    }

    pub fn with_shadows(mut self, cast: bool, receive: bool) -> Self {
        self.cast_shadow = cast;
        self.receive_shadow = receive;
        self
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn form(&self) -> ShapeForm {
        self.form
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn material_id(&self) -> Option<&MaterialId> {
        self.material_id.as_ref()
    }

    pub fn form_generation(&self) -> u32 {
        self.form_generation
    }

    /// Swaps in new geometry, releasing the old GPU buffers first.
    ///
    /// Identity, material and transform are untouched.
    pub fn replace_form(&mut self, form: ShapeForm) {
        self.mesh.release();
        self.mesh = Mesh::from_geometry(&form.build());
        self.form = form;
        self.form_generation += 1;
    }

    /// Translation followed by an XYZ Euler rotation
    pub fn model_matrix(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.position)
            * Matrix4::from_angle_x(Rad(self.rotation.x))
            * Matrix4::from_angle_y(Rad(self.rotation.y))
            * Matrix4::from_angle_z(Rad(self.rotation.z))
    }

    pub fn uniform(&self) -> NodeUniform {
        NodeUniform {
            model: convert_matrix4_to_array(self.model_matrix()),
            flags: [if self.receive_shadow { 1.0 } else { 0.0 }, 0.0, 0.0, 0.0],
        }
    }

    /// Uploads the mesh if needed and writes the current transform
    pub fn sync_gpu_resources(
        &mut self,
        device: &Device,
        queue: &wgpu::Queue,
        bindings: &NodeBindings,
    ) {
        self.mesh.upload(device);

        let uniform = self.uniform();
        match &mut self.gpu_resources {
            Some(resources) => {
                resources.ubo.update_content(queue, uniform);
            }
            None => {
                let ubo = NodeUBO::new_with_data(device, &uniform);
                let bind_group = bindings.create_bind_group(device, &ubo);
                self.gpu_resources = Some(NodeGpuResources { ubo, bind_group });
            }
        }
    }

    pub fn get_bind_group(&self) -> Option<&wgpu::BindGroup> {
        self.gpu_resources.as_ref().map(|r| &r.bind_group)
    }

    /// Releases every GPU resource held by this node
    pub fn release_gpu_resources(&mut self) {
        self.mesh.release();
        if let Some(resources) = self.gpu_resources.take() {
            resources.ubo.destroy();
        }
    }
}

pub trait DrawNode {
    fn draw_mesh(&mut self, mesh: &Mesh);
    fn draw_node(&mut self, node: &Node);
}

impl DrawNode for wgpu::RenderPass<'_> {
    fn draw_mesh(&mut self, mesh: &Mesh) {
        let (Some(vertex_buffer), Some(index_buffer)) = (&mesh.vertex_buffer, &mesh.index_buffer)
        else {
            return; // Skip drawing if not uploaded
        };

        self.set_vertex_buffer(0, vertex_buffer.slice(..));
        self.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        self.draw_indexed(0..mesh.index_count, 0, 0..1);
    }

    fn draw_node(&mut self, node: &Node) {
        self.draw_mesh(&node.mesh);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Vector4;

    fn unit_box() -> ShapeForm {
        ShapeForm::Box {
            width: 1.0,
            height: 1.0,
            depth: 1.0,
        }
    }

    #[test]
    fn test_replace_form_keeps_identity_and_transform() {
        let mut node = Node::new("box", unit_box())
            .with_material("white")
            .with_rotation(0.5, 0.0, 0.0)
            .with_shadows(true, false);

        node.replace_form(ShapeForm::Box {
            width: 2.0,
            height: 3.0,
            depth: 4.0,
        });

        assert_eq!(node.name, "box");
        assert_eq!(node.material_id().map(String::as_str), Some("white"));
        assert_eq!(node.rotation.x, 0.5);
        assert!(node.cast_shadow);
        assert_eq!(node.form_generation(), 1);
        assert_eq!(
            node.form(),
            ShapeForm::Box {
                width: 2.0,
                height: 3.0,
                depth: 4.0
            }
        );
    }

    #[test]
    fn test_replace_form_rebuilds_mesh() {
        let mut node = Node::new("shape", unit_box());
        assert_eq!(node.mesh().vertex_count(), 24);

        node.replace_form(ShapeForm::Capsule {
            radius: 1.0,
            length: 1.0,
        });
        assert_eq!(node.mesh().vertex_count(), 90);
        assert!(!node.mesh().is_uploaded());
    }

    #[test]
    fn test_release_without_gpu_buffers_is_noop() {
        let mut mesh = Mesh::from_geometry(&unit_box().build());
        assert!(!mesh.release());
        assert_eq!(mesh.index_count(), 36);
    }

    #[test]
    fn test_model_matrix_applies_rotation_then_translation() {
        let node = Node::new("n", unit_box())
            .with_position(0.0, -1.0, 0.0)
            .with_rotation(-std::f32::consts::FRAC_PI_2, 0.0, 0.0);

        // +Y rotated by -pi/2 about X points along -Z, then shifted down
        let p = node.model_matrix() * Vector4::new(0.0, 1.0, 0.0, 1.0);
        assert!(p.x.abs() < 1e-6);
        assert!((p.y + 1.0).abs() < 1e-6);
        assert!((p.z + 1.0).abs() < 1e-6);

        // A +Z facing plane ends up facing +Y
        let n = node.model_matrix() * Vector4::new(0.0, 0.0, 1.0, 0.0);
        assert!((n.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_uniform_flags_receive_shadow() {
        let floor = Node::new(
            "floor",
            ShapeForm::Plane {
                width: 100.0,
                height: 100.0,
            },
        )
        .with_shadows(false, true);
        assert_eq!(floor.uniform().flags[0], 1.0);
    }
}
