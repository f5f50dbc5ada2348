//! Start-up configuration
//!
//! Plain structs with defaults and builder-style setters. Nothing here is
//! persisted; the command line only seeds the initial state of a run.

use crate::params::ParameterSet;

/// Renderer settings fixed for the lifetime of the render engine
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
    /// Edge length of the square spotlight shadow map in texels
    pub shadow_map_size: u32,
    pub vsync: bool,
    pub clear_color: wgpu::Color,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            shadow_map_size: 2048,
            vsync: false,
            clear_color: wgpu::Color::BLACK,
        }
    }
}

impl RenderConfig {
    pub fn with_shadow_map_size(mut self, size: u32) -> Self {
        // The device is requested with a 4096 texture limit
        self.shadow_map_size = size.clamp(256, 4096);
        self
    }

    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.vsync = vsync;
        self
    }

    pub fn present_mode(&self) -> wgpu::PresentMode {
        if self.vsync {
            wgpu::PresentMode::Fifo
        } else {
            wgpu::PresentMode::AutoNoVsync
        }
    }
}

/// Everything the application needs to start
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub render: RenderConfig,
    pub params: ParameterSet,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Shadowbox".to_string(),
            width: 1200,
            height: 800,
            render: RenderConfig::default(),
            params: ParameterSet::default(),
        }
    }
}

impl AppConfig {
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width.max(1);
        self.height = height.max(1);
        self
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    pub fn with_render(mut self, render: RenderConfig) -> Self {
        self.render = render;
        self
    }

    pub fn with_params(mut self, params: ParameterSet) -> Self {
        self.params = params;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ShapeKind;

    #[test]
    fn test_shadow_map_size_is_clamped() {
        assert_eq!(RenderConfig::default().with_shadow_map_size(64).shadow_map_size, 256);
        assert_eq!(RenderConfig::default().with_shadow_map_size(8192).shadow_map_size, 4096);
        assert_eq!(RenderConfig::default().with_shadow_map_size(1024).shadow_map_size, 1024);
    }

    #[test]
    fn test_present_mode_follows_vsync() {
        assert_eq!(
            RenderConfig::default().with_vsync(true).present_mode(),
            wgpu::PresentMode::Fifo
        );
        assert_eq!(
            RenderConfig::default().present_mode(),
            wgpu::PresentMode::AutoNoVsync
        );
    }

    #[test]
    fn test_app_config_builders() {
        let config = AppConfig::default()
            .with_size(0, 600)
            .with_title("Demo")
            .with_params(ParameterSet::default().with_shape(ShapeKind::Capsule));
        assert_eq!((config.width, config.height), (1, 600));
        assert_eq!(config.title, "Demo");
        assert_eq!(config.params.global.shape, ShapeKind::Capsule);
    }
}
