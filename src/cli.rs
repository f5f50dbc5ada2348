// cli.rs - Command-line interface configuration
use clap::Parser;

use crate::config::{AppConfig, RenderConfig};
use crate::params::{ParameterSet, ShapeKind};

/// Accepts any dropdown label, case-insensitively
fn parse_shape(value: &str) -> Result<ShapeKind, String> {
    ShapeKind::from_label(value).ok_or_else(|| {
        let labels: Vec<&str> = ShapeKind::ALL.iter().map(|kind| kind.label()).collect();
        format!("unknown shape '{}', expected one of: {}", value, labels.join(", "))
    })
}

#[derive(Parser, Debug, Clone)]
#[command(name = "shadowbox")]
#[command(about = "Interactive shadow-casting demo", long_about = None)]
pub struct Cli {
    /// Initial window width in pixels
    #[arg(long, default_value_t = 1200)]
    pub width: u32,

    /// Initial window height in pixels
    #[arg(long, default_value_t = 800)]
    pub height: u32,

    /// Spotlight shadow map resolution
    #[arg(long = "shadow-map-size", default_value_t = 2048)]
    pub shadow_map_size: u32,

    /// Synchronise presentation with the display refresh rate
    #[arg(long)]
    pub vsync: bool,

    /// Shape shown at start-up
    #[arg(long, value_parser = parse_shape, default_value = "box")]
    pub shape: ShapeKind,

    /// Start with the axes helper hidden
    #[arg(long = "hide-axes")]
    pub hide_axes: bool,
}

impl Cli {
    pub fn into_config(self) -> AppConfig {
        let render = RenderConfig::default()
            .with_shadow_map_size(self.shadow_map_size)
            .with_vsync(self.vsync);
        let params = ParameterSet::default()
            .with_shape(self.shape)
            .with_axes(!self.hide_axes);

        AppConfig::default()
            .with_size(self.width, self.height)
            .with_render(render)
            .with_params(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Cli::parse_from(["shadowbox"]).into_config();
        assert_eq!((config.width, config.height), (1200, 800));
        assert_eq!(config.render.shadow_map_size, 2048);
        assert!(!config.render.vsync);
        assert_eq!(config.params, ParameterSet::default());
    }

    #[test]
    fn test_flags_seed_initial_state() {
        let config = Cli::parse_from([
            "shadowbox",
            "--shape",
            "capsule",
            "--hide-axes",
            "--vsync",
            "--shadow-map-size",
            "1024",
        ])
        .into_config();
        assert_eq!(config.params.global.shape, ShapeKind::Capsule);
        assert!(!config.params.global.axes_visible);
        assert!(config.render.vsync);
        assert_eq!(config.render.shadow_map_size, 1024);
    }

    #[test]
    fn test_rejects_unknown_shape() {
        assert!(Cli::try_parse_from(["shadowbox", "--shape", "cone"]).is_err());
    }

    #[test]
    fn test_shape_accepts_dropdown_labels() {
        let cli = Cli::parse_from(["shadowbox", "--shape", "Cylinder"]);
        assert_eq!(cli.shape, ShapeKind::Cylinder);
        assert_eq!(parse_shape("CAPSULE"), Ok(ShapeKind::Capsule));
        assert!(parse_shape("cone").unwrap_err().contains("Box, Cylinder, Capsule"));
    }
}
