//! Texture resource management for wgpu
//!
//! Depth buffers for the main pass and the spotlight shadow map.

/// GPU texture resource containing texture, view, and sampler
pub struct TextureResource {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
}

impl TextureResource {
    /// Standard depth buffer format used throughout the engine
    pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

    fn depth_texture(device: &wgpu::Device, width: u32, height: u32, label: &str) -> wgpu::Texture {
        device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        })
    }

    /// Comparison sampler for depth lookups
    fn comparison_sampler(device: &wgpu::Device, label: &str) -> wgpu::Sampler {
        device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some(label),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            compare: Some(wgpu::CompareFunction::LessEqual),
            lod_min_clamp: 0.0,
            lod_max_clamp: 100.0,
            ..Default::default()
        })
    }

    /// Creates a depth texture matching the surface configuration
    ///
    /// # Arguments
    /// * `device` - WGPU device for creating the texture
    /// * `config` - Surface configuration whose size the texture matches
    /// * `label` - Debug label for the texture and its sampler
    pub fn create_depth_texture(
        device: &wgpu::Device,
        config: &wgpu::SurfaceConfiguration,
        label: &str,
    ) -> Self {
        let texture = Self::depth_texture(device, config.width, config.height, label);
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = Self::comparison_sampler(device, label);

        Self {
            texture,
            view,
            sampler,
        }
    }

    /// Creates the square spotlight shadow map
    ///
    /// # Arguments
    /// * `device` - WGPU device for creating the texture
    /// * `size` - Edge length in texels, fixed for the engine's lifetime
    pub fn create_shadow_map(device: &wgpu::Device, size: u32) -> Self {
        let texture = Self::depth_texture(device, size, size, "Shadow Map");
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = Self::comparison_sampler(device, "Shadow Sampler");

        Self {
            texture,
            view,
            sampler,
        }
    }
}
