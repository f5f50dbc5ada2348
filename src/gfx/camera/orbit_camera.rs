use super::camera_utils::{
    convert_matrix4_to_array, look_at_safe, Camera, CameraUniform, OPENGL_TO_WGPU_MATRIX,
};
use cgmath::*;

/// Perspective camera placed on an orbit around its target.
///
/// The orbit itself is computed by the scene configurator; the camera only
/// stores the resulting eye and always aims at `target`.
#[derive(Debug, Clone, Copy)]
pub struct OrbitCamera {
    pub eye: Vector3<f32>,
    pub target: Vector3<f32>,
    pub up: Vector3<f32>,
    pub aspect: f32,
    pub fovy: Rad<f32>,
    pub znear: f32,
    pub zfar: f32,
    pub uniform: CameraUniform,
}

impl Camera for OrbitCamera {
    fn build_view_projection_matrix(&self) -> Matrix4<f32> {
        let proj =
            OPENGL_TO_WGPU_MATRIX * perspective(self.fovy, self.aspect, self.znear, self.zfar);
        proj * self.build_view_matrix()
    }
}

impl OrbitCamera {
    pub fn new(eye: Vector3<f32>, target: Vector3<f32>, aspect: f32) -> Self {
        let mut camera = Self {
            eye,
            target,
            up: Vector3::unit_y(),
            aspect,
            fovy: Rad(std::f32::consts::PI / 4.0),
            znear: 0.1,
            zfar: 1000.0,
            uniform: CameraUniform::default(),
        };
        camera.update_view_proj();
        camera
    }

    /// Moves the eye and re-aims at the current target
    pub fn set_eye(&mut self, eye: Vector3<f32>) {
        self.eye = eye;
        self.update_view_proj();
    }

    pub fn look_at(&mut self, target: Vector3<f32>) {
        self.target = target;
        self.update_view_proj();
    }

    pub fn build_view_matrix(&self) -> Matrix4<f32> {
        look_at_safe(self.eye, self.target, self.up)
    }

    pub fn resize_projection(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.aspect = width as f32 / height as f32;
        self.update_view_proj();
    }

    pub fn update_view_proj(&mut self) {
        self.uniform.view_position = [self.eye.x, self.eye.y, self.eye.z, 1.0];
        self.uniform.view_proj = convert_matrix4_to_array(self.build_view_projection_matrix());
    }
}
