//! Spotlight with a perspective shadow camera

use cgmath::{InnerSpace, Matrix4, Rad, Vector3, Zero};
use std::f32::consts::FRAC_PI_3;

use crate::gfx::camera::camera_utils::{look_at_safe, OPENGL_TO_WGPU_MATRIX};

/// Perspective projection used to render the shadow map
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpotLightShadow {
    pub near: f32,
    pub far: f32,
}

impl Default for SpotLightShadow {
    fn default() -> Self {
        Self {
            near: 0.5,
            far: 500.0,
        }
    }
}

/// Cone light aimed at `target`
///
/// Attenuation follows the inverse-power law `1 / d^decay`; a `distance` of
/// zero means the light has no cut-off range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpotLight {
    pub position: Vector3<f32>,
    pub target: Vector3<f32>,
    /// Linear RGB
    pub color: [f32; 3],
    pub intensity: f32,
    /// Cone half-angle in radians
    pub angle: f32,
    /// Fraction of the cone that fades out, 0 gives a hard edge
    pub penumbra: f32,
    pub decay: f32,
    pub distance: f32,
    pub cast_shadow: bool,
    pub shadow: SpotLightShadow,
}

impl Default for SpotLight {
    fn default() -> Self {
        Self {
            position: Vector3::new(0.0, 1.0, 0.0),
            target: Vector3::zero(),
            color: [1.0, 1.0, 1.0],
            intensity: 1.0,
            angle: FRAC_PI_3,
            penumbra: 0.0,
            decay: 2.0,
            distance: 0.0,
            cast_shadow: true,
            shadow: SpotLightShadow::default(),
        }
    }
}

impl SpotLight {
    pub fn new(position: Vector3<f32>, intensity: f32) -> Self {
        Self {
            position,
            intensity,
            ..Default::default()
        }
    }

    /// Unit vector from the light towards its target, -Y when they coincide
    pub fn direction(&self) -> Vector3<f32> {
        let offset = self.target - self.position;
        if offset.magnitude2() > 0.0 {
            offset.normalize()
        } else {
            -Vector3::unit_y()
        }
    }

    /// Cosines of the outer cone and of the start of the penumbra fade
    pub fn cone_cosines(&self) -> (f32, f32) {
        let outer = self.angle.cos();
        let inner = (self.angle * (1.0 - self.penumbra.clamp(0.0, 1.0))).cos();
        (outer, inner)
    }

    /// View-projection of the shadow camera: fov twice the cone angle, square aspect
    pub fn shadow_view_proj(&self) -> Matrix4<f32> {
        let fovy = Rad((2.0 * self.angle).clamp(0.01, std::f32::consts::PI - 0.01));
        let proj = OPENGL_TO_WGPU_MATRIX
            * cgmath::perspective(fovy, 1.0, self.shadow.near, self.shadow.far);
        let target = self.position + self.direction();
        proj * look_at_safe(self.position, target, Vector3::unit_y())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Vector4;

    #[test]
    fn test_direction_points_at_target() {
        let light = SpotLight::new(Vector3::new(0.0, 10.0, 0.0), 100.0);
        assert!((light.direction() - Vector3::new(0.0, -1.0, 0.0)).magnitude() < 1e-6);
    }

    #[test]
    fn test_direction_falls_back_when_at_target() {
        let light = SpotLight::new(Vector3::zero(), 100.0);
        assert_eq!(light.direction(), -Vector3::unit_y());
        let m = light.shadow_view_proj();
        let cols: &[[f32; 4]; 4] = m.as_ref();
        assert!(cols.iter().flatten().all(|v| v.is_finite()));
    }

    #[test]
    fn test_hard_cone_by_default() {
        let light = SpotLight::default();
        let (outer, inner) = light.cone_cosines();
        assert!((outer - 0.5).abs() < 1e-6);
        assert_eq!(outer, inner);
    }

    #[test]
    fn test_target_projects_to_shadow_map_center() {
        let light = SpotLight::new(Vector3::new(0.0, 10.0, 0.0), 100.0);
        let clip = light.shadow_view_proj() * Vector4::new(0.0, -1.0, 0.0, 1.0);
        let ndc = clip / clip.w;
        assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }
}
