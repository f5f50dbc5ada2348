use cgmath::{EuclideanSpace, InnerSpace, Matrix4, Point3, SquareMatrix, Vector3};

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.5,
    0.0, 0.0, 0.0, 1.0,
);

pub trait Camera: Sized {
    fn build_view_projection_matrix(&self) -> Matrix4<f32>;
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable, Debug)]
pub struct CameraUniform {
    /// The eye position of the camera in homogenous coordinates.
    ///
    /// Homogenous coordinates are used to fullfill the 16 byte alignment requirement.
    pub view_position: [f32; 4],

    /// Contains the view projection matrix.
    pub view_proj: [[f32; 4]; 4],
}

impl Default for CameraUniform {
    /// Creates a default [CameraUniform].
    fn default() -> Self {
        Self {
            view_position: [0.0; 4],
            view_proj: convert_matrix4_to_array(Matrix4::identity()),
        }
    }
}

pub fn convert_matrix4_to_array(matrix4: Matrix4<f32>) -> [[f32; 4]; 4] {
    let mut result = [[0.0; 4]; 4];

    for i in 0..4 {
        for j in 0..4 {
            result[i][j] = matrix4[i][j];
        }
    }

    result
}

/// Right-handed view matrix that stays finite for degenerate poses.
///
/// `up` is assumed to be +Y.
/// - eye == target: the view looks down -Z from the target.
/// - eye straight above the target: screen up becomes -Z.
/// - eye straight below the target: screen up becomes +Z.
pub fn look_at_safe(eye: Vector3<f32>, target: Vector3<f32>, up: Vector3<f32>) -> Matrix4<f32> {
    let offset = eye - target;
    let back = if offset.magnitude2() > 0.0 {
        offset.normalize()
    } else {
        Vector3::unit_z()
    };

    let up = if up.cross(back).magnitude2() < 1e-12 {
        if back.dot(up) > 0.0 {
            -Vector3::unit_z()
        } else {
            Vector3::unit_z()
        }
    } else {
        up
    };

    let eye = Point3::from_vec(target + back);
    Matrix4::look_at_rh(eye, Point3::from_vec(target), up)
        * Matrix4::from_translation(-(offset - back))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Vector4;

    fn is_finite(m: &Matrix4<f32>) -> bool {
        let cols: &[[f32; 4]; 4] = m.as_ref();
        cols.iter().flatten().all(|v| v.is_finite())
    }

    fn transform(m: &Matrix4<f32>, p: Vector3<f32>) -> Vector3<f32> {
        let v = *m * Vector4::new(p.x, p.y, p.z, 1.0);
        Vector3::new(v.x, v.y, v.z)
    }

    #[test]
    fn test_regular_look_at_matches_cgmath() {
        let eye = Vector3::new(3.0, 4.0, 5.0);
        let expected = Matrix4::look_at_rh(
            Point3::from_vec(eye),
            Point3::new(0.0, 0.0, 0.0),
            Vector3::unit_y(),
        );
        let actual = look_at_safe(eye, Vector3::new(0.0, 0.0, 0.0), Vector3::unit_y());
        for (a, b) in [actual.x, actual.y, actual.z, actual.w]
            .iter()
            .zip([expected.x, expected.y, expected.z, expected.w].iter())
        {
            assert!((*a - *b).magnitude() < 1e-5);
        }
    }

    #[test]
    fn test_eye_above_target_uses_negative_z_up() {
        let view = look_at_safe(
            Vector3::new(0.0, 30.0, 0.0),
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::unit_y(),
        );
        assert!(is_finite(&view));
        // Origin lies straight ahead
        let origin = transform(&view, Vector3::new(0.0, 0.0, 0.0));
        assert!((origin - Vector3::new(0.0, 0.0, -30.0)).magnitude() < 1e-4);
        // World -Z appears at the top of the screen
        let ahead = transform(&view, Vector3::new(0.0, 0.0, -1.0));
        assert!(ahead.y > 0.9);
    }

    #[test]
    fn test_eye_below_target_uses_positive_z_up() {
        let view = look_at_safe(
            Vector3::new(0.0, -5.0, 0.0),
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::unit_y(),
        );
        assert!(is_finite(&view));
        let ahead = transform(&view, Vector3::new(0.0, 0.0, 1.0));
        assert!(ahead.y > 0.9);
    }

    #[test]
    fn test_eye_at_target_looks_down_negative_z() {
        let view = look_at_safe(
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::unit_y(),
        );
        assert!(is_finite(&view));
        let ahead = transform(&view, Vector3::new(0.0, 0.0, -1.0));
        assert!((ahead - Vector3::new(0.0, 0.0, -1.0)).magnitude() < 1e-5);
    }
}
