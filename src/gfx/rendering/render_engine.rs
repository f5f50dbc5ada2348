//! WGPU-based rendering engine for Shadowbox
//!
//! Owns the surface, device and every render pipeline. A frame is drawn in
//! up to three passes: the spotlight shadow map (skipped while the scene's
//! shadow epoch is unchanged), the shaded main pass and the axes lines. The
//! UI overlay is recorded last through a caller supplied callback.

use std::sync::Arc;
use wgpu::TextureFormat;

use crate::{
    config::RenderConfig,
    error::{Result, ShadowboxError},
    gfx::{
        resources::{
            global_bindings::{update_global_ubo, GlobalBindings, GlobalUBO},
            material::MaterialBindings,
            node_bindings::NodeBindings,
            texture_resource::TextureResource,
        },
        scene::{object::DrawNode, scene::Scene},
    },
};

use super::pipeline_manager::{PipelineConfig, PipelineManager, VertexLayoutKind};
use super::shadow_cache::{ShadowCache, ShadowCacheStats};

/// What became of a frame passed to [`RenderEngine::render_frame`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Drawn and presented, the UI callback ran
    Presented,
    /// The surface was lost or outdated and has been reconfigured
    Reconfigured,
    /// No surface texture could be acquired this time
    Skipped,
}

impl FrameOutcome {
    pub fn presented(self) -> bool {
        self == FrameOutcome::Presented
    }

    /// Maps a surface acquisition failure onto the frame it cost
    pub fn from_surface_error(error: &wgpu::SurfaceError) -> Self {
        match error {
            wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => FrameOutcome::Reconfigured,
            _ => FrameOutcome::Skipped,
        }
    }
}

/// Core rendering engine managing GPU resources and draw calls
pub struct RenderEngine {
    surface: wgpu::Surface<'static>,
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    config: wgpu::SurfaceConfiguration,
    format: TextureFormat,
    clear_color: wgpu::Color,
    depth_texture: TextureResource,
    shadow_map: TextureResource,
    pub pipeline_manager: PipelineManager,
    global_ubo: GlobalUBO,
    global_bindings: GlobalBindings,
    node_bindings: NodeBindings,
    material_bindings: MaterialBindings,
    shadow_cache: ShadowCache,
}

impl RenderEngine {
    /// Creates a new render engine for the given window
    ///
    /// Fails if no adapter or device is available, or if the surface exposes
    /// no texture format.
    ///
    /// # Arguments
    /// * `window` - Surface target, usually an `Arc<Window>`
    /// * `width` - Initial surface width in physical pixels
    /// * `height` - Initial surface height in physical pixels
    /// * `render_config` - Shadow map size, present mode and clear colour
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
        render_config: &RenderConfig,
    ) -> Result<RenderEngine> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;
        log::info!("Using adapter: {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("WGPU Device"),
                required_features: wgpu::Features::default(),
                required_limits: wgpu::Limits {
                    max_texture_dimension_2d: 4096,
                    ..wgpu::Limits::downlevel_defaults()
                },
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::Off,
            })
            .await?;
        let device = Arc::new(device);
        let queue = Arc::new(queue);

        // Shading happens in linear space; an sRGB target encodes on write
        let surface_capabilities = surface.get_capabilities(&adapter);
        let format = surface_capabilities
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_capabilities.formats.first().copied())
            .ok_or(ShadowboxError::NoSurfaceFormat)?;
        let alpha_mode = surface_capabilities
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: render_config.present_mode(),
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let depth_texture =
            TextureResource::create_depth_texture(&device, &config, "depth_texture");
        let shadow_map = TextureResource::create_shadow_map(&device, render_config.shadow_map_size);

        let global_ubo = GlobalUBO::new(&device);
        let global_bindings = GlobalBindings::new(&device, &global_ubo, &shadow_map);
        let node_bindings = NodeBindings::new(&device);
        let material_bindings = MaterialBindings::new(&device);

        let mut pipeline_manager = PipelineManager::new(device.clone());
        pipeline_manager.load_shader("lambert", include_str!("lambert.wgsl"));
        pipeline_manager.load_shader("shadow", include_str!("shadow_pass.wgsl"));
        pipeline_manager.load_shader("lines", include_str!("lines.wgsl"));

        // Casters are drawn without culling so open or thin geometry still
        // writes depth; the bias keeps lit faces from self-shadowing.
        pipeline_manager.register_pipeline(
            "Shadow",
            PipelineConfig::default_with_shader("shadow")
                .with_label("Shadow Pipeline")
                .with_vertex_only()
                .with_cull_mode(None)
                .with_depth_format(TextureResource::DEPTH_FORMAT)
                .with_depth_bias(2, 2.0)
                .with_bind_group_layouts(vec![
                    global_bindings.uniform_layout().clone(),
                    node_bindings.bind_group_layout().clone(),
                ]),
        );

        pipeline_manager.register_pipeline(
            "Lambert",
            PipelineConfig::default_with_shader("lambert")
                .with_label("Lambert Pipeline")
                .with_color_format(format)
                .with_depth_format(TextureResource::DEPTH_FORMAT)
                .with_bind_group_layouts(vec![
                    global_bindings.shaded_layout().clone(),
                    material_bindings.bind_group_layout().clone(),
                    node_bindings.bind_group_layout().clone(),
                ]),
        );

        pipeline_manager.register_pipeline(
            "Lines",
            PipelineConfig::default_with_shader("lines")
                .with_label("Lines Pipeline")
                .with_primitive_topology(wgpu::PrimitiveTopology::LineList)
                .with_vertex_layout(VertexLayoutKind::Lines)
                .with_cull_mode(None)
                .with_color_format(format)
                .with_depth_format(TextureResource::DEPTH_FORMAT)
                .with_bind_group_layouts(vec![global_bindings.uniform_layout().clone()]),
        );

        pipeline_manager.create_all_pipelines()?;
        log::debug!("Pipelines ready: {:?}", pipeline_manager.get_stats());

        Ok(Self {
            surface,
            device,
            queue,
            config,
            format,
            clear_color: render_config.clear_color,
            depth_texture,
            shadow_map,
            pipeline_manager,
            global_ubo,
            global_bindings,
            node_bindings,
            material_bindings,
            shadow_cache: ShadowCache::new(),
        })
    }

    /// Renders one frame of `scene`, then lets `ui_callback` record the overlay
    ///
    /// A lost or outdated surface is reconfigured and the frame is skipped.
    ///
    /// # Arguments
    /// * `scene` - Scene to draw; its GPU resources are synced first
    /// * `ui_callback` - Records the UI pass into the frame's encoder
    ///
    /// # Returns
    /// How the frame ended. `ui_callback` only runs for
    /// [`FrameOutcome::Presented`], so any UI frame already begun must be
    /// ended by the caller otherwise.
    pub fn render_frame<F>(&mut self, scene: &mut Scene, ui_callback: F) -> FrameOutcome
    where
        F: FnOnce(&wgpu::Device, &wgpu::Queue, &mut wgpu::CommandEncoder, &wgpu::TextureView),
    {
        scene.update();
        scene.sync_gpu_resources(
            &self.device,
            &self.queue,
            &self.node_bindings,
            &self.material_bindings,
        );
        update_global_ubo(
            &mut self.global_ubo,
            &self.queue,
            &scene.camera.uniform,
            &scene.light,
            scene.ambient_color,
        );

        let surface_texture = match self.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(e) => {
                let outcome = FrameOutcome::from_surface_error(&e);
                if outcome == FrameOutcome::Reconfigured {
                    log::debug!("Surface lost or outdated, reconfiguring");
                    self.surface.configure(&self.device, &self.config);
                } else {
                    log::warn!("Failed to acquire surface texture: {}", e);
                }
                return outcome;
            }
        };

        let surface_texture_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        let epoch = scene.shadow_epoch();
        if self.shadow_cache.needs_update(epoch) {
            log::trace!("Rendering shadow map for epoch {}", epoch);
            self.render_shadow_pass(&mut encoder, scene);
            self.shadow_cache.mark_valid(epoch);
        } else {
            self.shadow_cache.mark_reused();
        }

        self.render_main_pass(&mut encoder, &surface_texture_view, scene);

        if scene.axes.visible {
            self.render_lines_pass(&mut encoder, &surface_texture_view, scene);
        }

        ui_callback(
            &self.device,
            &self.queue,
            &mut encoder,
            &surface_texture_view,
        );

        self.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();
        FrameOutcome::Presented
    }

    fn render_shadow_pass(&self, encoder: &mut wgpu::CommandEncoder, scene: &Scene) {
        let mut shadow_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Shadow Depth Pass"),
            color_attachments: &[],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.shadow_map.view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            occlusion_query_set: None,
            timestamp_writes: None,
        });

        if !scene.light.cast_shadow {
            return;
        }

        let Some(pipeline) = self.pipeline_manager.get_pipeline("Shadow") else {
            log::error!("Shadow pipeline not found");
            return;
        };
        shadow_pass.set_pipeline(pipeline);
        shadow_pass.set_bind_group(0, self.global_bindings.uniform_bind_group(), &[]);

        for node in scene.nodes().filter(|n| n.visible && n.cast_shadow) {
            if let Some(node_bind_group) = node.get_bind_group() {
                shadow_pass.set_bind_group(1, node_bind_group, &[]);
                shadow_pass.draw_node(node);
            }
        }
    }

    fn render_main_pass(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        target: &wgpu::TextureView,
        scene: &Scene,
    ) {
        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Main Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(self.clear_color),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.depth_texture.view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            occlusion_query_set: None,
            timestamp_writes: None,
        });

        let Some(pipeline) = self.pipeline_manager.get_pipeline("Lambert") else {
            log::error!("Lambert pipeline not found");
            return;
        };
        render_pass.set_pipeline(pipeline);
        render_pass.set_bind_group(0, self.global_bindings.shaded_bind_group(), &[]);

        for node in scene.nodes().filter(|n| n.visible) {
            let material = scene
                .material_manager
                .get_material_for_node(node.material_id());

            match (material.get_bind_group(), node.get_bind_group()) {
                (Some(material_bind_group), Some(node_bind_group)) => {
                    render_pass.set_bind_group(1, material_bind_group, &[]);
                    render_pass.set_bind_group(2, node_bind_group, &[]);
                    render_pass.draw_node(node);
                }
                _ => {
                    log::debug!(
                        "Skipping '{}' - material '{}' or node has no GPU resources",
                        node.name,
                        material.name
                    );
                }
            }
        }
    }

    fn render_lines_pass(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        target: &wgpu::TextureView,
        scene: &Scene,
    ) {
        let Some(vertex_buffer) = scene.axes.vertex_buffer() else {
            return;
        };

        let mut lines_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Axes Lines Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.depth_texture.view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            occlusion_query_set: None,
            timestamp_writes: None,
        });

        let Some(pipeline) = self.pipeline_manager.get_pipeline("Lines") else {
            log::error!("Lines pipeline not found");
            return;
        };
        lines_pass.set_pipeline(pipeline);
        lines_pass.set_bind_group(0, self.global_bindings.uniform_bind_group(), &[]);
        lines_pass.set_vertex_buffer(0, vertex_buffer.slice(..));
        lines_pass.draw(0..scene.axes.vertex_count(), 0..1);
    }

    /// Resizes the surface and depth buffer; zero sizes are ignored
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }

        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);

        self.depth_texture =
            TextureResource::create_depth_texture(&self.device, &self.config, "depth_texture");
        // The shadow map has a fixed resolution and stays valid
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.format
    }

    /// Shadow passes rendered versus reused so far
    pub fn get_shadow_cache_stats(&self) -> ShadowCacheStats {
        self.shadow_cache.get_stats()
    }
}
