// src/ui/panel.rs
//! Parameter panel
//!
//! One window holding every demo parameter: the axes checkbox, the shape
//! dropdown and a collapsing header per parameter group. Edited values are
//! snapped to their slider step before they are reported.

use crate::{
    configurator::ParamChange,
    params::{
        ParamRange, ParameterSet, ShapeKind, FLOOR_POSITION_RANGE, LIGHT_INTENSITY_RANGE,
        ORBIT_RADIUS_RANGE, ORBIT_ROTATION_X_RANGE, ORBIT_ROTATION_Y_RANGE, SHAPE_ROTATION_RANGE,
        SHAPE_SIZE_RANGE,
    },
};

/// Draws the parameter panel and returns the groups edited this frame
///
/// Each group appears at most once, in the order its controls were edited.
///
/// # Arguments
/// * `ui` - ImGui frame being built
/// * `params` - Panel values, edited in place
pub fn parameter_panel(ui: &imgui::Ui, params: &mut ParameterSet) -> Vec<ParamChange> {
    let mut changes = Vec::new();

    let display_size = ui.io().display_size;
    if display_size[0] <= 0.0 || display_size[1] <= 0.0 {
        return changes;
    }
    let panel_width = (display_size[0] * 0.3).clamp(300.0, 420.0);

    ui.window("Parameters")
        .size([panel_width, display_size[1] * 0.8], imgui::Condition::FirstUseEver)
        .position([20.0, 20.0], imgui::Condition::FirstUseEver)
        .resizable(true)
        .collapsible(true)
        .build(|| {
            if ui.checkbox("Axes", &mut params.global.axes_visible) {
                push_change(&mut changes, ParamChange::Axes);
            }

            let labels = shape_labels();
            let mut shape_index = params.global.shape.index();
            if ui.combo_simple_string("Shape", &mut shape_index, &labels[..]) {
                if let Some(kind) = ShapeKind::from_index(shape_index) {
                    params.global.shape = kind;
                    push_change(&mut changes, ParamChange::Shape);
                }
            }

            ui.separator();

            if ui.collapsing_header("Camera", imgui::TreeNodeFlags::empty()) {
                let camera = &mut params.camera;
                let edited = slider(ui, "Radius##camera", ORBIT_RADIUS_RANGE, &mut camera.radius)
                    | slider(ui, "Rotation X##camera", ORBIT_ROTATION_X_RANGE, &mut camera.rotation_x)
                    | slider(ui, "Rotation Y##camera", ORBIT_ROTATION_Y_RANGE, &mut camera.rotation_y);
                if edited {
                    push_change(&mut changes, ParamChange::Camera);
                }
            }

            if ui.collapsing_header("Light", imgui::TreeNodeFlags::empty()) {
                let light = &mut params.light;
                let edited = slider(ui, "Radius##light", ORBIT_RADIUS_RANGE, &mut light.radius)
                    | slider(ui, "Rotation X##light", ORBIT_ROTATION_X_RANGE, &mut light.rotation_x)
                    | slider(ui, "Rotation Y##light", ORBIT_ROTATION_Y_RANGE, &mut light.rotation_y)
                    | slider(ui, "Intensity##light", LIGHT_INTENSITY_RANGE, &mut light.intensity);
                if edited {
                    push_change(&mut changes, ParamChange::Light);
                }
            }

            if ui.collapsing_header("Floor", imgui::TreeNodeFlags::empty()) {
                let floor = &mut params.floor;
                let edited = ui.checkbox("Visible##floor", &mut floor.visible)
                    | slider(ui, "Position##floor", FLOOR_POSITION_RANGE, &mut floor.position);
                if edited {
                    push_change(&mut changes, ParamChange::Floor);
                }
            }

            if ui.collapsing_header("Box", imgui::TreeNodeFlags::empty()) {
                let shape = &mut params.box_shape;
                let resized = slider(ui, "Width##box", SHAPE_SIZE_RANGE, &mut shape.width)
                    | slider(ui, "Height##box", SHAPE_SIZE_RANGE, &mut shape.height)
                    | slider(ui, "Depth##box", SHAPE_SIZE_RANGE, &mut shape.depth);
                shape_changes(
                    &mut changes,
                    ShapeKind::Box,
                    resized,
                    slider(ui, "Rotation##box", SHAPE_ROTATION_RANGE, &mut shape.rotation),
                );
            }

            if ui.collapsing_header("Cylinder", imgui::TreeNodeFlags::empty()) {
                let shape = &mut params.cylinder;
                let resized = slider(ui, "Radius##cylinder", SHAPE_SIZE_RANGE, &mut shape.radius)
                    | slider(ui, "Height##cylinder", SHAPE_SIZE_RANGE, &mut shape.height);
                shape_changes(
                    &mut changes,
                    ShapeKind::Cylinder,
                    resized,
                    slider(ui, "Rotation##cylinder", SHAPE_ROTATION_RANGE, &mut shape.rotation),
                );
            }

            if ui.collapsing_header("Capsule", imgui::TreeNodeFlags::empty()) {
                let shape = &mut params.capsule;
                let resized = slider(ui, "Radius##capsule", SHAPE_SIZE_RANGE, &mut shape.radius)
                    | slider(ui, "Length##capsule", SHAPE_SIZE_RANGE, &mut shape.length);
                shape_changes(
                    &mut changes,
                    ShapeKind::Capsule,
                    resized,
                    slider(ui, "Rotation##capsule", SHAPE_ROTATION_RANGE, &mut shape.rotation),
                );
            }
        });

    changes
}

/// Slider bound to `range`; the edited value is snapped to the step
fn slider(ui: &imgui::Ui, label: &str, range: ParamRange, value: &mut f32) -> bool {
    let edited = ui
        .slider_config(label, range.min, range.max)
        .display_format(range.display_format())
        .build(value);
    if edited {
        *value = range.snap(*value);
    }
    edited
}

fn shape_changes(changes: &mut Vec<ParamChange>, kind: ShapeKind, resized: bool, rotated: bool) {
    if resized {
        push_change(changes, ParamChange::ShapeSize(kind));
    }
    if rotated {
        push_change(changes, ParamChange::ShapeRotation(kind));
    }
}

fn push_change(changes: &mut Vec<ParamChange>, change: ParamChange) {
    if !changes.contains(&change) {
        changes.push(change);
    }
}

fn shape_labels() -> [&'static str; 3] {
    ShapeKind::ALL.map(ShapeKind::label)
}
