//! Parameter set driving the demo scene
//!
//! A flat collection of independent scalars grouped the same way the
//! parameter panel groups them: camera, light, floor, one group per shape,
//! and the global axes/shape selector. Values are stored in panel units;
//! lengths are divided by [`SCALE_DIVISOR`] when they reach the scene.

use std::f32::consts::{FRAC_PI_2, PI};
use std::fmt;

/// Divisor converting panel units into scene units
pub const SCALE_DIVISOR: f32 = 100.0;

/// Slider range and step for one numeric parameter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamRange {
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

impl ParamRange {
    pub const fn new(min: f32, max: f32, step: f32) -> Self {
        Self { min, max, step }
    }

    /// Clamps `value` into range and rounds it to the nearest step
    pub fn snap(&self, value: f32) -> f32 {
        let clamped = value.clamp(self.min, self.max);
        let stepped = (clamped / self.step).round() * self.step;
        stepped.clamp(self.min, self.max)
    }

    /// Display format for imgui sliders, one decimal for fractional steps
    pub fn display_format(&self) -> &'static str {
        if self.step < 1.0 {
            "%.1f"
        } else {
            "%.0f"
        }
    }
}

pub const ORBIT_RADIUS_RANGE: ParamRange = ParamRange::new(0.0, 4000.0, 1.0);
pub const ORBIT_ROTATION_X_RANGE: ParamRange = ParamRange::new(0.0, FRAC_PI_2, 0.1);
pub const ORBIT_ROTATION_Y_RANGE: ParamRange = ParamRange::new(-PI, PI, 0.1);
pub const LIGHT_INTENSITY_RANGE: ParamRange = ParamRange::new(0.0, 1000.0, 1.0);
pub const FLOOR_POSITION_RANGE: ParamRange = ParamRange::new(-2000.0, 0.0, 1.0);
pub const SHAPE_SIZE_RANGE: ParamRange = ParamRange::new(1.0, 1000.0, 1.0);
pub const SHAPE_ROTATION_RANGE: ParamRange = ParamRange::new(-FRAC_PI_2, FRAC_PI_2, 0.1);

/// The three demo shapes, exactly one of which is visible
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ShapeKind {
    #[default]
    Box,
    Cylinder,
    Capsule,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 3] = [ShapeKind::Box, ShapeKind::Cylinder, ShapeKind::Capsule];

    /// Label shown in the shape dropdown
    pub fn label(self) -> &'static str {
        match self {
            ShapeKind::Box => "Box",
            ShapeKind::Cylinder => "Cylinder",
            ShapeKind::Capsule => "Capsule",
        }
    }

    /// Position in [`ShapeKind::ALL`], used as the combo index
    pub fn index(self) -> usize {
        match self {
            ShapeKind::Box => 0,
            ShapeKind::Cylinder => 1,
            ShapeKind::Capsule => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Looks a shape up by its dropdown label, ignoring case
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.label().eq_ignore_ascii_case(label))
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Orbit placement shared by camera and light
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraParams {
    pub radius: f32,
    pub rotation_x: f32,
    pub rotation_y: f32,
}

impl Default for CameraParams {
    fn default() -> Self {
        Self {
            radius: 2000.0,
            rotation_x: 0.0,
            rotation_y: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightParams {
    pub radius: f32,
    pub rotation_x: f32,
    pub rotation_y: f32,
    pub intensity: f32,
}

impl Default for LightParams {
    fn default() -> Self {
        Self {
            radius: 1000.0,
            rotation_x: 0.0,
            rotation_y: 0.0,
            intensity: 100.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloorParams {
    pub visible: bool,
    pub position: f32,
}

impl Default for FloorParams {
    fn default() -> Self {
        Self {
            visible: true,
            position: -100.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxParams {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    pub rotation: f32,
}

impl Default for BoxParams {
    fn default() -> Self {
        Self {
            width: 100.0,
            height: 100.0,
            depth: 100.0,
            rotation: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CylinderParams {
    pub radius: f32,
    pub height: f32,
    pub rotation: f32,
}

impl Default for CylinderParams {
    fn default() -> Self {
        Self {
            radius: 100.0,
            height: 100.0,
            rotation: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CapsuleParams {
    pub radius: f32,
    pub length: f32,
    pub rotation: f32,
}

impl Default for CapsuleParams {
    fn default() -> Self {
        Self {
            radius: 100.0,
            length: 100.0,
            rotation: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlobalParams {
    pub axes_visible: bool,
    pub shape: ShapeKind,
}

impl Default for GlobalParams {
    fn default() -> Self {
        Self {
            axes_visible: true,
            shape: ShapeKind::Box,
        }
    }
}

/// Every value the parameter panel edits
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ParameterSet {
    pub global: GlobalParams,
    pub camera: CameraParams,
    pub light: LightParams,
    pub floor: FloorParams,
    pub box_shape: BoxParams,
    pub cylinder: CylinderParams,
    pub capsule: CapsuleParams,
}

impl ParameterSet {
    pub fn with_shape(mut self, shape: ShapeKind) -> Self {
        self.global.shape = shape;
        self
    }

    pub fn with_axes(mut self, visible: bool) -> Self {
        self.global.axes_visible = visible;
        self
    }

    /// Current tilt of the given shape's group
    pub fn shape_rotation(&self, kind: ShapeKind) -> f32 {
        match kind {
            ShapeKind::Box => self.box_shape.rotation,
            ShapeKind::Cylinder => self.cylinder.rotation,
            ShapeKind::Capsule => self.capsule.rotation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snap_rounds_to_step() {
        assert_eq!(ORBIT_RADIUS_RANGE.snap(1234.4), 1234.0);
        assert_eq!(ORBIT_RADIUS_RANGE.snap(1234.6), 1235.0);
        assert!((ORBIT_ROTATION_Y_RANGE.snap(0.26) - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_snap_clamps_out_of_range() {
        assert_eq!(SHAPE_SIZE_RANGE.snap(0.0), 1.0);
        assert_eq!(SHAPE_SIZE_RANGE.snap(5000.0), 1000.0);
        assert_eq!(FLOOR_POSITION_RANGE.snap(10.0), 0.0);
        // Rounding pi/2 to 1.6 would leave the range, so it is clamped back
        assert_eq!(ORBIT_ROTATION_X_RANGE.snap(FRAC_PI_2), FRAC_PI_2);
        assert!((ORBIT_ROTATION_Y_RANGE.snap(-PI) + 3.1).abs() < 1e-6);
    }

    #[test]
    fn test_defaults_match_panel() {
        let params = ParameterSet::default();
        assert!(params.global.axes_visible);
        assert_eq!(params.global.shape, ShapeKind::Box);
        assert_eq!(params.camera.radius, 2000.0);
        assert_eq!(params.light.radius, 1000.0);
        assert_eq!(params.light.intensity, 100.0);
        assert_eq!(params.floor.position, -100.0);
        assert_eq!(params.box_shape.width, 100.0);
        assert_eq!(params.cylinder.height, 100.0);
        assert_eq!(params.capsule.length, 100.0);
    }

    #[test]
    fn test_shape_kind_lookup() {
        assert_eq!(ShapeKind::from_label("cylinder"), Some(ShapeKind::Cylinder));
        assert_eq!(ShapeKind::from_label("Capsule"), Some(ShapeKind::Capsule));
        assert_eq!(ShapeKind::from_label("cone"), None);
        for kind in ShapeKind::ALL {
            assert_eq!(ShapeKind::from_index(kind.index()), Some(kind));
        }
        assert_eq!(ShapeKind::from_index(3), None);
    }

    #[test]
    fn test_shape_rotation_reads_matching_group() {
        let mut params = ParameterSet::default();
        params.cylinder.rotation = 0.5;
        assert_eq!(params.shape_rotation(ShapeKind::Cylinder), 0.5);
        assert_eq!(params.shape_rotation(ShapeKind::Box), 0.0);
    }
}
