//! # Primitive Shape Generation
//!
//! This module contains functions to generate the demo's primitive shapes.
//! All shapes are generated with outward normals and texture coordinates.

use super::GeometryData;
use crate::gfx::scene::vertex::LineVertex;
use std::f32::consts::{FRAC_PI_2, PI, TAU};

/// Generate an axis-aligned box centered at the origin
///
/// Each face gets its own four vertices so normals stay flat.
pub fn generate_box(width: f32, height: f32, depth: f32) -> GeometryData {
    let mut data = GeometryData::new();
    let dims = [width, height, depth];

    // (normal, u axis, v axis) with u x v == normal
    let faces: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
        ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
        ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
        ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
        ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
    ];
    let corners = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)];

    for (normal, u, v) in faces {
        let base = data.vertices.len() as u32;

        for (su, sv) in corners {
            let position = [
                0.5 * (normal[0] + su * u[0] + sv * v[0]) * dims[0],
                0.5 * (normal[1] + su * u[1] + sv * v[1]) * dims[1],
                0.5 * (normal[2] + su * u[2] + sv * v[2]) * dims[2],
            ];
            data.vertices.push(position);
            data.normals.push(normal);
            data.tex_coords.push([(su + 1.0) * 0.5, (sv + 1.0) * 0.5]);
        }

        data.indices
            .extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }

    data
}

/// Generate a cylinder along the Y axis
///
/// # Arguments
/// * `radius_top` - Radius of the cap at `+height / 2`
/// * `radius_bottom` - Radius of the cap at `-height / 2`
/// * `height` - Distance between the caps
/// * `segments` - Number of circular segments
pub fn generate_cylinder(
    radius_top: f32,
    radius_bottom: f32,
    height: f32,
    segments: u32,
) -> GeometryData {
    let mut data = GeometryData::new();

    let segs = segments.max(3);
    let half_height = height * 0.5;
    // Side normals tilt when the radii differ
    let slope = if height > 0.0 {
        (radius_bottom - radius_top) / height
    } else {
        0.0
    };

    for i in 0..=segs {
        let angle = i as f32 * TAU / segs as f32;
        let (sin_a, cos_a) = angle.sin_cos();
        let normal = normalize([cos_a, slope, sin_a]);
        let u = i as f32 / segs as f32;

        data.vertices
            .push([radius_bottom * cos_a, -half_height, radius_bottom * sin_a]);
        data.normals.push(normal);
        data.tex_coords.push([u, 0.0]);

        data.vertices
            .push([radius_top * cos_a, half_height, radius_top * sin_a]);
        data.normals.push(normal);
        data.tex_coords.push([u, 1.0]);
    }

    for i in 0..segs {
        let bottom_current = i * 2;
        let top_current = bottom_current + 1;
        let bottom_next = bottom_current + 2;
        let top_next = bottom_current + 3;

        data.indices
            .extend_from_slice(&[bottom_current, top_current, bottom_next]);
        data.indices
            .extend_from_slice(&[bottom_next, top_current, top_next]);
    }

    push_cap(&mut data, radius_top, half_height, segs, true);
    push_cap(&mut data, radius_bottom, -half_height, segs, false);

    data
}

fn push_cap(data: &mut GeometryData, radius: f32, y: f32, segs: u32, top: bool) {
    let normal = if top { [0.0, 1.0, 0.0] } else { [0.0, -1.0, 0.0] };

    let center = data.vertices.len() as u32;
    data.vertices.push([0.0, y, 0.0]);
    data.normals.push(normal);
    data.tex_coords.push([0.5, 0.5]);

    for i in 0..=segs {
        let angle = i as f32 * TAU / segs as f32;
        let (sin_a, cos_a) = angle.sin_cos();
        data.vertices.push([radius * cos_a, y, radius * sin_a]);
        data.normals.push(normal);
        data.tex_coords.push([0.5 + 0.5 * cos_a, 0.5 + 0.5 * sin_a]);
    }

    for i in 0..segs {
        let current = center + 1 + i;
        let next = current + 1;
        if top {
            data.indices.extend_from_slice(&[center, next, current]);
        } else {
            data.indices.extend_from_slice(&[center, current, next]);
        }
    }
}

/// Generate a capsule along the Y axis
///
/// The straight section spans `length`; the hemispherical caps add `radius`
/// at each end, so the total height is `length + 2 * radius`.
///
/// # Arguments
/// * `cap_segments` - Latitude steps per hemisphere
/// * `radial_segments` - Number of segments around the Y axis
pub fn generate_capsule(
    radius: f32,
    length: f32,
    cap_segments: u32,
    radial_segments: u32,
) -> GeometryData {
    let mut data = GeometryData::new();

    let cap_segs = cap_segments.max(1);
    let radial_segs = radial_segments.max(3);
    let half_length = length * 0.5;

    // Latitude rings from the bottom pole to the top pole; the two equator
    // rings are joined by the straight section.
    let mut rings = Vec::with_capacity(2 * (cap_segs as usize + 1));
    for k in 0..=cap_segs {
        let theta = -FRAC_PI_2 + FRAC_PI_2 * k as f32 / cap_segs as f32;
        rings.push((theta, -half_length));
    }
    for k in 0..=cap_segs {
        let theta = FRAC_PI_2 * k as f32 / cap_segs as f32;
        rings.push((theta, half_length));
    }

    let total_height = length + 2.0 * radius;
    for (theta, center_y) in &rings {
        let (sin_t, cos_t) = theta.sin_cos();
        let y = center_y + radius * sin_t;
        let v = if total_height > 0.0 {
            (y + half_length + radius) / total_height
        } else {
            0.5
        };

        for j in 0..=radial_segs {
            let phi = j as f32 * TAU / radial_segs as f32;
            let (sin_p, cos_p) = phi.sin_cos();
            data.vertices
                .push([radius * cos_t * cos_p, y, radius * cos_t * sin_p]);
            data.normals.push([cos_t * cos_p, sin_t, cos_t * sin_p]);
            data.tex_coords.push([j as f32 / radial_segs as f32, v]);
        }
    }

    let stride = radial_segs + 1;
    for ring in 0..(rings.len() as u32 - 1) {
        for j in 0..radial_segs {
            let lower = ring * stride + j;
            let upper = lower + stride;

            data.indices.extend_from_slice(&[lower, upper, lower + 1]);
            data.indices.extend_from_slice(&[lower + 1, upper, upper + 1]);
        }
    }

    data
}

/// Generate a UV sphere with specified resolution
///
/// # Arguments
/// * `width_segments` - Number of longitude segments
/// * `height_segments` - Number of latitude segments
pub fn generate_sphere(radius: f32, width_segments: u32, height_segments: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let long_segs = width_segments.max(3);
    let lat_segs = height_segments.max(2);

    for lat in 0..=lat_segs {
        let theta = lat as f32 * PI / lat_segs as f32;
        let (sin_theta, cos_theta) = theta.sin_cos();

        for long in 0..=long_segs {
            let phi = long as f32 * TAU / long_segs as f32;
            let (sin_phi, cos_phi) = phi.sin_cos();

            let normal = [sin_theta * cos_phi, cos_theta, sin_theta * sin_phi];
            data.vertices
                .push([normal[0] * radius, normal[1] * radius, normal[2] * radius]);
            data.normals.push(normal);
            data.tex_coords.push([
                long as f32 / long_segs as f32,
                lat as f32 / lat_segs as f32,
            ]);
        }
    }

    for lat in 0..lat_segs {
        for long in 0..long_segs {
            let first = lat * (long_segs + 1) + long;
            let second = first + long_segs + 1;

            data.indices.extend_from_slice(&[first, first + 1, second]);
            data.indices
                .extend_from_slice(&[second, first + 1, second + 1]);
        }
    }

    data
}

/// Generate a plane in the XY plane with its normal along +Z
///
/// Rotate the owning node by -pi/2 about X to lay it flat as a floor.
pub fn generate_plane(
    width: f32,
    height: f32,
    width_segments: u32,
    height_segments: u32,
) -> GeometryData {
    let mut data = GeometryData::new();

    let w_segs = width_segments.max(1);
    let h_segs = height_segments.max(1);

    for y in 0..=h_segs {
        let v = y as f32 / h_segs as f32;
        let pos_y = (v - 0.5) * height;

        for x in 0..=w_segs {
            let u = x as f32 / w_segs as f32;
            let pos_x = (u - 0.5) * width;

            data.vertices.push([pos_x, pos_y, 0.0]);
            data.normals.push([0.0, 0.0, 1.0]);
            data.tex_coords.push([u, v]);
        }
    }

    for y in 0..h_segs {
        for x in 0..w_segs {
            let i = y * (w_segs + 1) + x;
            let next_row = i + w_segs + 1;

            data.indices.extend_from_slice(&[i, i + 1, next_row]);
            data.indices
                .extend_from_slice(&[i + 1, next_row + 1, next_row]);
        }
    }

    data
}

pub const AXIS_X_COLOR: [f32; 3] = [1.0, 0.0, 0.0];
pub const AXIS_Y_COLOR: [f32; 3] = [0.0, 1.0, 0.0];
pub const AXIS_Z_COLOR: [f32; 3] = [0.0, 0.0, 1.0];

/// Generate a line list with one segment per axis, starting at the origin
pub fn generate_axes(size: f32) -> Vec<LineVertex> {
    let axes = [
        ([size, 0.0, 0.0], AXIS_X_COLOR),
        ([0.0, size, 0.0], AXIS_Y_COLOR),
        ([0.0, 0.0, size], AXIS_Z_COLOR),
    ];

    axes.iter()
        .flat_map(|&(end, color)| {
            [
                LineVertex {
                    position: [0.0, 0.0, 0.0],
                    color,
                },
                LineVertex {
                    position: end,
                    color,
                },
            ]
        })
        .collect()
}

fn normalize(v: [f32; 3]) -> [f32; 3] {
    let length = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
    if length > 0.0 {
        [v[0] / length, v[1] / length, v[2] / length]
    } else {
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sub(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
        [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
    }

    fn cross(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
        [
            a[1] * b[2] - a[2] * b[1],
            a[2] * b[0] - a[0] * b[2],
            a[0] * b[1] - a[1] * b[0],
        ]
    }

    fn dot(a: [f32; 3], b: [f32; 3]) -> f32 {
        a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
    }

    /// Every non-degenerate triangle must wind counter-clockwise when seen
    /// from the side its vertex normals point to.
    fn assert_front_faces_outward(data: &GeometryData) {
        for tri in data.indices.chunks(3) {
            let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
            let face = cross(
                sub(data.vertices[b], data.vertices[a]),
                sub(data.vertices[c], data.vertices[a]),
            );
            if dot(face, face).sqrt() < 1e-6 {
                continue;
            }
            let normal = [
                data.normals[a][0] + data.normals[b][0] + data.normals[c][0],
                data.normals[a][1] + data.normals[b][1] + data.normals[c][1],
                data.normals[a][2] + data.normals[b][2] + data.normals[c][2],
            ];
            assert!(dot(face, normal) > 0.0, "triangle {:?} winds inward", tri);
        }
    }

    fn extent(data: &GeometryData, axis: usize) -> (f32, f32) {
        data.vertices.iter().fold((f32::MAX, f32::MIN), |(lo, hi), v| {
            (lo.min(v[axis]), hi.max(v[axis]))
        })
    }

    #[test]
    fn test_box_generation() {
        let cube = generate_box(2.0, 4.0, 6.0);
        assert_eq!(cube.vertex_count(), 24);
        assert_eq!(cube.indices.len(), 36);
        assert_eq!(cube.triangle_count(), 12);
        assert_eq!(extent(&cube, 0), (-1.0, 1.0));
        assert_eq!(extent(&cube, 1), (-2.0, 2.0));
        assert_eq!(extent(&cube, 2), (-3.0, 3.0));
        assert_front_faces_outward(&cube);
    }

    #[test]
    fn test_cylinder_generation() {
        let cylinder = generate_cylinder(1.0, 1.0, 2.0, 32);
        // side: 2 * 33, caps: 2 * (1 + 33)
        assert_eq!(cylinder.vertex_count(), 66 + 68);
        assert_eq!(cylinder.triangle_count(), 32 * 2 + 32 * 2);
        assert_eq!(extent(&cylinder, 1), (-1.0, 1.0));
        assert_eq!(cylinder.vertices.len(), cylinder.normals.len());
        assert_front_faces_outward(&cylinder);
    }

    #[test]
    fn test_cone_side_normals_tilt_up() {
        let cone = generate_cylinder(0.0, 1.0, 1.0, 8);
        assert!(cone.normals[0][1] > 0.0);
        assert_front_faces_outward(&cone);
    }

    #[test]
    fn test_capsule_generation() {
        let capsule = generate_capsule(1.0, 1.0, 4, 8);
        assert_eq!(capsule.vertex_count(), 2 * 5 * 9);
        assert_eq!(capsule.triangle_count(), 9 * 8 * 2);
        let (lo, hi) = extent(&capsule, 1);
        assert!((lo + 1.5).abs() < 1e-5);
        assert!((hi - 1.5).abs() < 1e-5);
        assert_front_faces_outward(&capsule);
    }

    #[test]
    fn test_sphere_generation() {
        let sphere = generate_sphere(0.5, 32, 16);
        assert_eq!(sphere.vertex_count(), 33 * 17);
        assert_eq!(sphere.indices.len(), 32 * 16 * 6);
        assert_eq!(sphere.vertices.len(), sphere.tex_coords.len());
        for v in &sphere.vertices {
            assert!((dot(*v, *v).sqrt() - 0.5).abs() < 1e-5);
        }
        assert_front_faces_outward(&sphere);
    }

    #[test]
    fn test_plane_generation() {
        let plane = generate_plane(2.0, 2.0, 2, 2);
        assert_eq!(plane.vertices.len(), 9); // 3x3 grid
        assert_eq!(plane.indices.len(), 24); // 4 quads * 2 triangles * 3 indices
        assert_front_faces_outward(&plane);
    }

    #[test]
    fn test_axes_generation() {
        let axes = generate_axes(100.0);
        assert_eq!(axes.len(), 6);
        assert_eq!(axes[1].position, [100.0, 0.0, 0.0]);
        assert_eq!(axes[3].color, AXIS_Y_COLOR);
        assert_eq!(axes[5].position, [0.0, 0.0, 100.0]);
    }
}
