//! Scene configurator
//!
//! Maps parameter panel changes onto scene mutations. The mapping itself is
//! a set of pure functions from parameter values to transforms and states;
//! [`SceneConfigurator::apply`] dispatches a [`ParamChange`] to the matching
//! function, writes the result into the scene and requests one redraw.

use cgmath::{Vector3, Zero};
use winit::window::Window;

use crate::{
    gfx::{
        geometry::ShapeForm,
        scene::{DemoNodes, Scene},
    },
    params::{CameraParams, FloorParams, LightParams, ParameterSet, ShapeKind, SCALE_DIVISOR},
};

/// The parameter group that changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamChange {
    Axes,
    Shape,
    Camera,
    Light,
    Floor,
    ShapeSize(ShapeKind),
    ShapeRotation(ShapeKind),
}

/// Anything that can schedule a redraw of the scene
pub trait RedrawTarget {
    fn request_redraw(&self);
}

impl RedrawTarget for Window {
    fn request_redraw(&self) {
        Window::request_redraw(self);
    }
}

/// Spotlight placement and brightness
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightPose {
    pub position: Vector3<f32>,
    pub intensity: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloorState {
    pub visible: bool,
    pub y: f32,
}

/// Visibility of each demo shape; exactly one flag is set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeVisibility {
    pub box_shape: bool,
    pub cylinder: bool,
    pub capsule: bool,
}

impl ShapeVisibility {
    pub fn is_visible(&self, kind: ShapeKind) -> bool {
        match kind {
            ShapeKind::Box => self.box_shape,
            ShapeKind::Cylinder => self.cylinder,
            ShapeKind::Capsule => self.capsule,
        }
    }
}

/// Spherical to Cartesian placement around the origin, in scene units
///
/// `rotation_x` is the polar angle from +Y and `rotation_y` the azimuth from
/// +X towards +Z.
pub fn orbit_position(radius: f32, rotation_x: f32, rotation_y: f32) -> Vector3<f32> {
    let (sin_x, cos_x) = rotation_x.sin_cos();
    let (sin_y, cos_y) = rotation_y.sin_cos();
    Vector3::new(
        radius * sin_x * cos_y / SCALE_DIVISOR,
        radius * cos_x / SCALE_DIVISOR,
        radius * sin_x * sin_y / SCALE_DIVISOR,
    )
}

pub fn camera_eye(camera: &CameraParams) -> Vector3<f32> {
    orbit_position(camera.radius, camera.rotation_x, camera.rotation_y)
}

pub fn light_pose(light: &LightParams) -> LightPose {
    LightPose {
        position: orbit_position(light.radius, light.rotation_x, light.rotation_y),
        intensity: light.intensity,
    }
}

pub fn floor_state(floor: &FloorParams) -> FloorState {
    FloorState {
        visible: floor.visible,
        y: floor.position / SCALE_DIVISOR,
    }
}

pub fn shape_visibility(active: ShapeKind) -> ShapeVisibility {
    ShapeVisibility {
        box_shape: active == ShapeKind::Box,
        cylinder: active == ShapeKind::Cylinder,
        capsule: active == ShapeKind::Capsule,
    }
}

/// Geometric form of `kind` built from its size parameters
pub fn shape_form(kind: ShapeKind, params: &ParameterSet) -> ShapeForm {
    match kind {
        ShapeKind::Box => ShapeForm::Box {
            width: params.box_shape.width / SCALE_DIVISOR,
            height: params.box_shape.height / SCALE_DIVISOR,
            depth: params.box_shape.depth / SCALE_DIVISOR,
        },
        ShapeKind::Cylinder => {
            let radius = params.cylinder.radius / SCALE_DIVISOR;
            ShapeForm::Cylinder {
                radius_top: radius,
                radius_bottom: radius,
                height: params.cylinder.height / SCALE_DIVISOR,
            }
        }
        ShapeKind::Capsule => ShapeForm::Capsule {
            radius: params.capsule.radius / SCALE_DIVISOR,
            length: params.capsule.length / SCALE_DIVISOR,
        },
    }
}

/// Euler rotation tilting a shape about the X axis
pub fn shape_tilt(rotation: f32) -> Vector3<f32> {
    Vector3::new(rotation, 0.0, 0.0)
}

/// Applies parameter changes to the demo scene
pub struct SceneConfigurator {
    nodes: DemoNodes,
}

impl SceneConfigurator {
    pub fn new(nodes: DemoNodes) -> Self {
        Self { nodes }
    }

    pub fn nodes(&self) -> &DemoNodes {
        &self.nodes
    }

    /// Writes the state derived from `change` into `scene` and requests a
    /// single redraw
    pub fn apply<R>(&self, change: ParamChange, params: &ParameterSet, scene: &mut Scene, redraw: &R)
    where
        R: RedrawTarget + ?Sized,
    {
        log::debug!("Applying {:?}", change);

        match change {
            ParamChange::Axes => scene.set_axes_visible(params.global.axes_visible),
            ParamChange::Shape => {
                let visibility = shape_visibility(params.global.shape);
                for kind in ShapeKind::ALL {
                    scene.set_node_visible(self.nodes.shape(kind), visibility.is_visible(kind));
                }
            }
            ParamChange::Camera => {
                scene.set_camera_eye(camera_eye(&params.camera));
                scene.camera.look_at(Vector3::zero());
            }
            ParamChange::Light => {
                let pose = light_pose(&params.light);
                scene.set_light_pose(pose.position, pose.intensity);
                scene.set_node_position(self.nodes.light_marker, pose.position);
            }
            ParamChange::Floor => {
                let floor = floor_state(&params.floor);
                scene.set_node_visible(self.nodes.floor, floor.visible);
                scene.set_node_position(self.nodes.floor, Vector3::new(0.0, floor.y, 0.0));
            }
            ParamChange::ShapeSize(kind) => {
                let id = self.nodes.shape(kind);
                scene.replace_node_form(id, shape_form(kind, params));
                scene.set_node_rotation(id, shape_tilt(params.shape_rotation(kind)));
            }
            ParamChange::ShapeRotation(kind) => {
                scene.set_node_rotation(
                    self.nodes.shape(kind),
                    shape_tilt(params.shape_rotation(kind)),
                );
            }
        }

        redraw.request_redraw();
    }

    /// Follows a viewport size change; zero sizes keep the old aspect ratio
    pub fn resize<R>(&self, width: u32, height: u32, scene: &mut Scene, redraw: &R)
    where
        R: RedrawTarget + ?Sized,
    {
        scene.camera.resize_projection(width, height);
        redraw.request_redraw();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{ORBIT_ROTATION_X_RANGE, ORBIT_ROTATION_Y_RANGE, SHAPE_ROTATION_RANGE};
    use rand::Rng;
    use std::cell::Cell;
    use std::f32::consts::FRAC_PI_2;

    #[derive(Default)]
    struct CountingRedraw {
        count: Cell<u32>,
    }

    impl RedrawTarget for CountingRedraw {
        fn request_redraw(&self) {
            self.count.set(self.count.get() + 1);
        }
    }

    fn demo() -> (Scene, SceneConfigurator, ParameterSet) {
        let params = ParameterSet::default();
        let (scene, nodes) = Scene::demo(&params);
        (scene, SceneConfigurator::new(nodes), params)
    }

    fn visible_shapes(scene: &Scene, configurator: &SceneConfigurator) -> Vec<ShapeKind> {
        ShapeKind::ALL
            .into_iter()
            .filter(|kind| {
                scene
                    .node(configurator.nodes().shape(*kind))
                    .map_or(false, |n| n.visible)
            })
            .collect()
    }

    #[test]
    fn test_orbit_mapping_property() {
        let mut rng = rand::rng();
        for _ in 0..1000 {
            let radius = rng.random_range(0.0..4000.0f32);
            let rotation_x =
                rng.random_range(ORBIT_ROTATION_X_RANGE.min..=ORBIT_ROTATION_X_RANGE.max);
            let rotation_y =
                rng.random_range(ORBIT_ROTATION_Y_RANGE.min..=ORBIT_ROTATION_Y_RANGE.max);

            let p = orbit_position(radius, rotation_x, rotation_y);
            let horizontal = radius * rotation_x.sin() / 100.0;
            let tolerance = 1e-3 * (1.0 + radius / 100.0);

            assert!(((p.x * p.x + p.z * p.z).sqrt() - horizontal.abs()).abs() < tolerance);
            assert!((p.y - radius * rotation_x.cos() / 100.0).abs() < tolerance);
        }
    }

    #[test]
    fn test_orbit_examples() {
        assert_eq!(orbit_position(1000.0, 0.0, 0.0), Vector3::new(0.0, 10.0, 0.0));

        let side = orbit_position(1000.0, FRAC_PI_2, 0.0);
        assert!((side.x - 10.0).abs() < 1e-5);
        assert!(side.y.abs() < 1e-5);
        assert!(side.z.abs() < 1e-6);

        assert_eq!(orbit_position(0.0, 1.0, 2.0), Vector3::zero());
    }

    #[test]
    fn test_pure_mappings() {
        let params = ParameterSet::default();
        assert_eq!(camera_eye(&params.camera), Vector3::new(0.0, 20.0, 0.0));
        assert_eq!(
            light_pose(&params.light),
            LightPose {
                position: Vector3::new(0.0, 10.0, 0.0),
                intensity: 100.0
            }
        );
        assert_eq!(
            floor_state(&params.floor),
            FloorState {
                visible: true,
                y: -1.0
            }
        );
        assert_eq!(shape_tilt(0.3), Vector3::new(0.3, 0.0, 0.0));
    }

    #[test]
    fn test_shape_forms_are_scaled() {
        let mut params = ParameterSet::default();
        params.box_shape.width = 200.0;
        params.box_shape.depth = 50.0;
        params.cylinder.radius = 300.0;
        params.capsule.length = 250.0;

        assert_eq!(
            shape_form(ShapeKind::Box, &params),
            ShapeForm::Box {
                width: 2.0,
                height: 1.0,
                depth: 0.5
            }
        );
        assert_eq!(
            shape_form(ShapeKind::Cylinder, &params),
            ShapeForm::Cylinder {
                radius_top: 3.0,
                radius_bottom: 3.0,
                height: 1.0
            }
        );
        assert_eq!(
            shape_form(ShapeKind::Capsule, &params),
            ShapeForm::Capsule {
                radius: 1.0,
                length: 2.5
            }
        );
    }

    #[test]
    fn test_shape_visibility_has_one_active() {
        for kind in ShapeKind::ALL {
            let visibility = shape_visibility(kind);
            let visible: Vec<ShapeKind> = ShapeKind::ALL
                .into_iter()
                .filter(|k| visibility.is_visible(*k))
                .collect();
            assert_eq!(visible, vec![kind]);
        }
    }

    #[test]
    fn test_selecting_cylinder_then_box() {
        let (mut scene, configurator, mut params) = demo();
        let redraw = CountingRedraw::default();

        params.global.shape = ShapeKind::Cylinder;
        configurator.apply(ParamChange::Shape, &params, &mut scene, &redraw);
        assert_eq!(visible_shapes(&scene, &configurator), vec![ShapeKind::Cylinder]);

        params.global.shape = ShapeKind::Box;
        configurator.apply(ParamChange::Shape, &params, &mut scene, &redraw);
        assert_eq!(visible_shapes(&scene, &configurator), vec![ShapeKind::Box]);
    }

    #[test]
    fn test_random_selections_keep_one_shape_visible() {
        let (mut scene, configurator, mut params) = demo();
        let redraw = CountingRedraw::default();
        let mut rng = rand::rng();

        for _ in 0..100 {
            let kind = ShapeKind::ALL[rng.random_range(0..ShapeKind::ALL.len())];
            params.global.shape = kind;
            configurator.apply(ParamChange::Shape, &params, &mut scene, &redraw);
            assert_eq!(visible_shapes(&scene, &configurator), vec![kind]);
        }
    }

    #[test]
    fn test_every_apply_requests_one_redraw() {
        let (mut scene, configurator, params) = demo();
        let changes = [
            ParamChange::Axes,
            ParamChange::Shape,
            ParamChange::Camera,
            ParamChange::Light,
            ParamChange::Floor,
            ParamChange::ShapeSize(ShapeKind::Capsule),
            ParamChange::ShapeRotation(ShapeKind::Box),
        ];

        for change in changes {
            let redraw = CountingRedraw::default();
            configurator.apply(change, &params, &mut scene, &redraw);
            assert_eq!(redraw.count.get(), 1, "{:?}", change);
        }

        let redraw = CountingRedraw::default();
        configurator.resize(800, 400, &mut scene, &redraw);
        assert_eq!(redraw.count.get(), 1);
        assert_eq!(scene.camera.aspect, 2.0);
    }

    #[test]
    fn test_resize_keeps_rotation_identity_and_material() {
        let (mut scene, configurator, mut params) = demo();
        let redraw = CountingRedraw::default();
        let mut rng = rand::rng();
        let id = configurator.nodes().shape(ShapeKind::Cylinder);

        for generation in 1..=20 {
            params.cylinder.rotation = SHAPE_ROTATION_RANGE
                .snap(rng.random_range(SHAPE_ROTATION_RANGE.min..=SHAPE_ROTATION_RANGE.max));
            configurator.apply(
                ParamChange::ShapeRotation(ShapeKind::Cylinder),
                &params,
                &mut scene,
                &redraw,
            );

            params.cylinder.radius = rng.random_range(1.0..=1000.0f32).round();
            configurator.apply(
                ParamChange::ShapeSize(ShapeKind::Cylinder),
                &params,
                &mut scene,
                &redraw,
            );

            let node = scene.node(id).unwrap();
            assert_eq!(node.rotation, shape_tilt(params.cylinder.rotation));
            assert_eq!(node.name, "cylinder");
            assert_eq!(node.material_id().map(String::as_str), Some("white"));
            assert_eq!(node.form_generation(), generation);
            assert_eq!(node.form(), shape_form(ShapeKind::Cylinder, &params));
            assert!(!node.mesh().is_uploaded());
        }
    }

    #[test]
    fn test_floor_position() {
        let (mut scene, configurator, mut params) = demo();
        let redraw = CountingRedraw::default();

        params.floor.position = -100.0;
        configurator.apply(ParamChange::Floor, &params, &mut scene, &redraw);
        let floor = scene.node(configurator.nodes().floor).unwrap();
        assert_eq!(floor.position, Vector3::new(0.0, -1.0, 0.0));

        params.floor.visible = false;
        params.floor.position = -550.0;
        configurator.apply(ParamChange::Floor, &params, &mut scene, &redraw);
        let floor = scene.node(configurator.nodes().floor).unwrap();
        assert!(!floor.visible);
        assert_eq!(floor.position.y, -5.5);
    }

    #[test]
    fn test_light_moves_marker_and_sets_intensity() {
        let (mut scene, configurator, mut params) = demo();
        let redraw = CountingRedraw::default();

        params.light.radius = 500.0;
        params.light.rotation_x = FRAC_PI_2;
        params.light.intensity = 250.0;
        configurator.apply(ParamChange::Light, &params, &mut scene, &redraw);

        let expected = orbit_position(500.0, FRAC_PI_2, 0.0);
        assert_eq!(scene.light.position, expected);
        assert_eq!(scene.light.intensity, 250.0);
        assert_eq!(scene.light.target, Vector3::zero());
        let marker = scene.node(configurator.nodes().light_marker).unwrap();
        assert_eq!(marker.position, expected);
    }

    #[test]
    fn test_camera_reaims_at_origin() {
        let (mut scene, configurator, mut params) = demo();
        let redraw = CountingRedraw::default();
        let epoch = scene.shadow_epoch();

        params.camera.radius = 1500.0;
        params.camera.rotation_x = 0.7;
        params.camera.rotation_y = -2.0;
        configurator.apply(ParamChange::Camera, &params, &mut scene, &redraw);

        assert_eq!(scene.camera.eye, camera_eye(&params.camera));
        assert_eq!(scene.camera.target, Vector3::zero());
        // Moving the camera never invalidates the shadow map
        assert_eq!(scene.shadow_epoch(), epoch);
    }

    #[test]
    fn test_straight_down_camera_is_finite() {
        let (mut scene, configurator, params) = demo();
        let redraw = CountingRedraw::default();
        configurator.apply(ParamChange::Camera, &params, &mut scene, &redraw);

        assert!(scene
            .camera
            .uniform
            .view_proj
            .iter()
            .flatten()
            .all(|v| v.is_finite()));
    }

    #[test]
    fn test_axes_toggle() {
        let (mut scene, configurator, params) = demo();
        let redraw = CountingRedraw::default();
        configurator.apply(
            ParamChange::Axes,
            &params.with_axes(false),
            &mut scene,
            &redraw,
        );
        assert!(!scene.axes.visible);
    }
}
