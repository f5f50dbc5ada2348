//! Global uniform bindings for camera and scene data
//!
//! Manages the per-frame uniform buffer shared by every pipeline (camera,
//! spotlight, ambient light) and the bind groups exposing it. The main pass
//! additionally samples the shadow map through the same group, while the
//! shadow and line passes bind the uniform alone.

use cgmath::Vector3;

use crate::{
    gfx::{
        camera::camera_utils::{convert_matrix4_to_array, CameraUniform},
        resources::texture_resource::TextureResource,
        scene::light::SpotLight,
    },
    wgpu_utils::{
        binding_builder::{BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc},
        binding_types,
        uniform_buffer::UniformBuffer,
    },
};

/// Global uniform buffer content structure
///
/// MUST match the `Globals` struct in the shaders exactly. Every vec3 is
/// padded to a vec4 for 16 byte alignment.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GlobalUBOContent {
    view_position: [f32; 4],
    view_proj: [[f32; 4]; 4],
    light_view_proj: [[f32; 4]; 4],
    /// xyz position, w = 1 if the light casts shadows
    light_position: [f32; 4],
    /// xyz unit direction
    light_direction: [f32; 4],
    /// rgb colour, w intensity
    light_color: [f32; 4],
    /// cos(outer), cos(inner), decay, distance
    light_cone: [f32; 4],
    /// rgb ambient colour
    ambient: [f32; 4],
}

impl GlobalUBOContent {
    pub fn new(camera: &CameraUniform, light: &SpotLight, ambient: [f32; 3]) -> Self {
        let position = light.position;
        let direction: Vector3<f32> = light.direction();
        let (outer, inner) = light.cone_cosines();

        Self {
            view_position: camera.view_position,
            view_proj: camera.view_proj,
            light_view_proj: convert_matrix4_to_array(light.shadow_view_proj()),
            light_position: [
                position.x,
                position.y,
                position.z,
                if light.cast_shadow { 1.0 } else { 0.0 },
            ],
            light_direction: [direction.x, direction.y, direction.z, 0.0],
            light_color: [light.color[0], light.color[1], light.color[2], light.intensity],
            light_cone: [outer, inner, light.decay, light.distance],
            ambient: [ambient[0], ambient[1], ambient[2], 1.0],
        }
    }
}

/// Type alias for the global uniform buffer
pub type GlobalUBO = UniformBuffer<GlobalUBOContent>;

/// Updates the global uniform buffer with the current camera and lights
pub fn update_global_ubo(
    ubo: &mut GlobalUBO,
    queue: &wgpu::Queue,
    camera: &CameraUniform,
    light: &SpotLight,
    ambient: [f32; 3],
) {
    ubo.update_content(queue, GlobalUBOContent::new(camera, light, ambient));
}

/// Bind group layouts and bind groups for global uniforms
///
/// Bound to slot 0 in all render pipelines.
pub struct GlobalBindings {
    shaded_layout: BindGroupLayoutWithDesc,
    uniform_layout: BindGroupLayoutWithDesc,
    shaded_bind_group: wgpu::BindGroup,
    uniform_bind_group: wgpu::BindGroup,
}

impl GlobalBindings {
    pub fn new(device: &wgpu::Device, ubo: &GlobalUBO, shadow_map: &TextureResource) -> Self {
        let shaded_layout = BindGroupLayoutBuilder::new()
            .next_binding_rendering(binding_types::uniform())
            .next_binding_fragment(binding_types::texture_depth_2d())
            .next_binding_fragment(binding_types::sampler(
                wgpu::SamplerBindingType::Comparison,
            ))
            .create(device, "Globals Bind Group Layout");

        let uniform_layout = BindGroupLayoutBuilder::new()
            .next_binding_rendering(binding_types::uniform())
            .create(device, "Globals Uniform Bind Group Layout");

        let shaded_bind_group =
            Self::create_shaded_bind_group(device, &shaded_layout, ubo, shadow_map);
        let uniform_bind_group = BindGroupBuilder::new(&uniform_layout)
            .resource(ubo.binding_resource())
            .create(device, "Globals Uniform Bind Group");

        Self {
            shaded_layout,
            uniform_layout,
            shaded_bind_group,
            uniform_bind_group,
        }
    }

    fn create_shaded_bind_group(
        device: &wgpu::Device,
        layout: &BindGroupLayoutWithDesc,
        ubo: &GlobalUBO,
        shadow_map: &TextureResource,
    ) -> wgpu::BindGroup {
        BindGroupBuilder::new(layout)
            .resource(ubo.binding_resource())
            .texture(&shadow_map.view)
            .sampler(&shadow_map.sampler)
            .create(device, "Globals Bind Group")
    }

    /// Layout for pipelines that shade with shadows (uniform, shadow map, sampler)
    pub fn shaded_layout(&self) -> &wgpu::BindGroupLayout {
        &self.shaded_layout.layout
    }

    /// Layout for pipelines that only read the uniform
    pub fn uniform_layout(&self) -> &wgpu::BindGroupLayout {
        &self.uniform_layout.layout
    }

    pub fn shaded_bind_group(&self) -> &wgpu::BindGroup {
        &self.shaded_bind_group
    }

    /// Safe to bind while the shadow map is a render target
    pub fn uniform_bind_group(&self) -> &wgpu::BindGroup {
        &self.uniform_bind_group
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_size_is_16_byte_aligned() {
        assert_eq!(std::mem::size_of::<GlobalUBOContent>() % 16, 0);
        assert_eq!(std::mem::size_of::<GlobalUBOContent>(), 16 + 64 + 64 + 5 * 16);
    }

    #[test]
    fn test_content_packs_light_parameters() {
        let light = SpotLight::new(Vector3::new(0.0, 10.0, 0.0), 100.0);
        let content = GlobalUBOContent::new(&CameraUniform::default(), &light, [0.25; 3]);

        assert_eq!(content.light_position, [0.0, 10.0, 0.0, 1.0]);
        assert_eq!(content.light_color[3], 100.0);
        assert_eq!(content.light_cone[2], 2.0);
        assert!((content.light_direction[1] + 1.0).abs() < 1e-6);
        assert_eq!(content.ambient, [0.25, 0.25, 0.25, 1.0]);
    }
}
