//! Material system for Lambert shading
//!
//! Provides material definitions and centralized management with GPU resource handling.
//! Materials are stored in MaterialManager and nodes reference them by ID.

use std::collections::HashMap;
use wgpu::Device;

use crate::wgpu_utils::{
    binding_builder::{BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc},
    binding_types,
    uniform_buffer::UniformBuffer,
};

/// Material ID for referencing materials
pub type MaterialId = String;

/// Converts a `0xRRGGBB` sRGB colour into linear RGB
pub fn color_from_hex(hex: u32) -> [f32; 3] {
    let channel = |shift: u32| srgb_to_linear(((hex >> shift) & 0xff) as f32 / 255.0);
    [channel(16), channel(8), channel(0)]
}

fn srgb_to_linear(c: f32) -> f32 {
    if c < 0.04045 {
        c * 0.0773993808
    } else {
        (c * 0.9478672986 + 0.0521327014).powf(2.4)
    }
}

/// GPU uniform data for materials
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MaterialUniform {
    pub base_color: [f32; 4],
}

type MaterialUBO = UniformBuffer<MaterialUniform>;

/// Bind group layout shared by every material
pub struct MaterialBindings {
    bind_group_layout: BindGroupLayoutWithDesc,
}

impl MaterialBindings {
    pub fn new(device: &Device) -> Self {
        let bind_group_layout = BindGroupLayoutBuilder::new()
            .next_binding_fragment(binding_types::uniform())
            .create(device, "Material Bind Group Layout");

        MaterialBindings { bind_group_layout }
    }

    fn create_bind_group(&self, device: &Device, ubo: &MaterialUBO) -> wgpu::BindGroup {
        BindGroupBuilder::new(&self.bind_group_layout)
            .resource(ubo.binding_resource())
            .create(device, "Material Bind Group")
    }

    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout.layout
    }
}

struct MaterialGpuResources {
    ubo: MaterialUBO,
    bind_group: wgpu::BindGroup,
}

/// Diffuse-only material
pub struct Material {
    pub name: String,
    /// Linear RGBA base colour
    pub base_color: [f32; 4],

    // GPU resources - shared by all nodes using this material
    gpu_resources: Option<MaterialGpuResources>,
}

impl Default for Material {
    fn default() -> Self {
        Self::new("default", [1.0, 1.0, 1.0, 1.0])
    }
}

impl Material {
    pub fn new(name: &str, base_color: [f32; 4]) -> Self {
        Self {
            name: name.to_string(),
            base_color,
            gpu_resources: None,
        }
    }

    /// Creates an opaque material from a `0xRRGGBB` sRGB colour
    pub fn from_hex(name: &str, hex: u32) -> Self {
        let [r, g, b] = color_from_hex(hex);
        Self::new(name, [r, g, b, 1.0])
    }

    /// Creates or refreshes the GPU copy of this material
    pub fn update_gpu_resources(
        &mut self,
        device: &Device,
        queue: &wgpu::Queue,
        bindings: &MaterialBindings,
    ) {
        let uniform_data = MaterialUniform {
            base_color: self.base_color,
        };

        match &mut self.gpu_resources {
            Some(resources) => {
                resources.ubo.update_content(queue, uniform_data);
            }
            None => {
                let ubo = MaterialUBO::new_with_data(device, &uniform_data);
                let bind_group = bindings.create_bind_group(device, &ubo);
                self.gpu_resources = Some(MaterialGpuResources { ubo, bind_group });
            }
        }
    }

    /// Gets the bind group for rendering
    pub fn get_bind_group(&self) -> Option<&wgpu::BindGroup> {
        self.gpu_resources.as_ref().map(|r| &r.bind_group)
    }
}

/// Manages all materials in the scene
///
/// Nodes reference materials by ID rather than storing material data
/// directly, so nodes sharing a colour share one GPU buffer.
pub struct MaterialManager {
    materials: HashMap<MaterialId, Material>,
    default_material: Material,
}

impl Default for MaterialManager {
    fn default() -> Self {
        Self::new()
    }
}

impl MaterialManager {
    pub fn new() -> Self {
        Self {
            materials: HashMap::new(),
            default_material: Material::default(),
        }
    }

    /// Adds a material, replacing any material with the same name
    pub fn add_material(&mut self, material: Material) -> MaterialId {
        let id = material.name.clone();
        self.materials.insert(id.clone(), material);
        id
    }

    pub fn get_material(&self, id: &str) -> Option<&Material> {
        self.materials.get(id)
    }

    /// Gets the material for a node with fallback to the default material
    pub fn get_material_for_node(&self, material_id: Option<&MaterialId>) -> &Material {
        material_id
            .and_then(|id| self.get_material(id))
            .unwrap_or(&self.default_material)
    }

    pub fn list_materials(&self) -> Vec<&MaterialId> {
        self.materials.keys().collect()
    }

    /// Updates GPU resources for all materials
    pub fn update_all_gpu_resources(
        &mut self,
        device: &Device,
        queue: &wgpu::Queue,
        bindings: &MaterialBindings,
    ) {
        self.default_material
            .update_gpu_resources(device, queue, bindings);
        for material in self.materials.values_mut() {
            material.update_gpu_resources(device, queue, bindings);
        }
    }
}
