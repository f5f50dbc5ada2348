//! Per-node uniform bindings
//!
//! Every node owns a small uniform holding its model matrix and shadow
//! flags. All nodes share one layout, created once by the render engine.

use crate::wgpu_utils::{
    binding_builder::{BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc},
    binding_types,
    uniform_buffer::UniformBuffer,
};

/// MUST match the `NodeUniform` struct in the shaders
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct NodeUniform {
    pub model: [[f32; 4]; 4],
    /// x = receives shadows
    pub flags: [f32; 4],
}

pub type NodeUBO = UniformBuffer<NodeUniform>;

pub struct NodeBindings {
    bind_group_layout: BindGroupLayoutWithDesc,
}

impl NodeBindings {
    pub fn new(device: &wgpu::Device) -> Self {
        let bind_group_layout = BindGroupLayoutBuilder::new()
            .next_binding_rendering(binding_types::uniform())
            .create(device, "Node Bind Group Layout");

        Self { bind_group_layout }
    }

    pub fn create_bind_group(&self, device: &wgpu::Device, ubo: &NodeUBO) -> wgpu::BindGroup {
        BindGroupBuilder::new(&self.bind_group_layout)
            .resource(ubo.binding_resource())
            .create(device, "Node Bind Group")
    }

    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout.layout
    }
}
