use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalSize},
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowAttributes, WindowId},
};

use crate::{
    config::AppConfig,
    configurator::{RedrawTarget, SceneConfigurator},
    error::{Result, ShadowboxError},
    gfx::{
        rendering::{FrameOutcome, RenderEngine},
        scene::Scene,
    },
    params::ParameterSet,
    ui::{parameter_panel, UiManager},
};

/// The demo application: one window, the demo scene and its parameter panel
pub struct ShadowboxApp {
    event_loop: Option<EventLoop<()>>,
    app_state: AppState,
}

struct AppState {
    config: AppConfig,
    window: Option<Arc<Window>>,
    render_engine: Option<RenderEngine>,
    ui_manager: Option<UiManager>,
    scene: Scene,
    configurator: SceneConfigurator,
    params: ParameterSet,
    startup_error: Option<ShadowboxError>,
}

impl ShadowboxApp {
    /// Creates the event loop and the demo scene; the window and GPU come
    /// up once the event loop starts
    pub fn new(config: AppConfig) -> Result<Self> {
        let event_loop = EventLoop::new()?;

        let params = config.params;
        let (scene, nodes) = Scene::demo(&params);

        Ok(Self {
            event_loop: Some(event_loop),
            app_state: AppState {
                config,
                window: None,
                render_engine: None,
                ui_manager: None,
                scene,
                configurator: SceneConfigurator::new(nodes),
                params,
                startup_error: None,
            },
        })
    }

    /// Runs until the window is closed
    ///
    /// Frames are only drawn on request. A window that cannot be created
    /// ends the run without error; a GPU set-up failure is returned.
    pub fn run(mut self) -> Result<()> {
        let Some(event_loop) = self.event_loop.take() else {
            return Ok(());
        };
        event_loop.set_control_flow(ControlFlow::Wait);
        event_loop.run_app(&mut self.app_state)?;

        match self.app_state.startup_error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl AppState {
    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attributes = WindowAttributes::default()
            .with_title(self.config.title.clone())
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height));

        let window = match event_loop.create_window(attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                // Nothing to render into; leave quietly
                log::error!("Failed to create window: {}", e);
                event_loop.exit();
                return Ok(());
            }
        };

        let (width, height) = window.inner_size().into();
        let renderer = pollster::block_on(RenderEngine::new(
            window.clone(),
            width,
            height,
            &self.config.render,
        ))?;

        let mut ui_manager = UiManager::new(
            renderer.device(),
            renderer.queue(),
            renderer.surface_format(),
            &window,
        );
        ui_manager.update_display_size(width, height);

        let stats = self.scene.get_statistics();
        log::info!(
            "Started {}x{}: {} nodes ({} visible), {} materials, {} triangles",
            width,
            height,
            stats.node_count,
            stats.visible_nodes,
            stats.material_count,
            stats.visible_triangles
        );

        // Sets the camera aspect and requests the first frame
        self.configurator
            .resize(width, height, &mut self.scene, window.as_ref());

        self.ui_manager = Some(ui_manager);
        self.render_engine = Some(renderer);
        self.window = Some(window);
        Ok(())
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(e) = self.start(event_loop) {
            log::error!("Failed to start renderer: {}", e);
            self.startup_error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        let (Some(window), Some(render_engine), Some(ui_manager)) = (
            self.window.as_ref(),
            self.render_engine.as_mut(),
            self.ui_manager.as_mut(),
        ) else {
            return;
        };
        let window: &Window = window;

        if ui_manager.handle_input(window, window_id, &event) {
            window.request_redraw();
            if ui_manager.wants_input() {
                return;
            }
        }

        match event {
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            }
            | WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                render_engine.resize(width, height);
                ui_manager.update_display_size(width, height);
                self.configurator
                    .resize(width, height, &mut self.scene, window);
            }
            WindowEvent::RedrawRequested => {
                let params = &mut self.params;
                let changes = ui_manager.update_logic(window, |ui| parameter_panel(ui, params));

                for change in changes {
                    self.configurator
                        .apply(change, &self.params, &mut self.scene, window);
                }

                let outcome =
                    render_engine.render_frame(&mut self.scene, |device, queue, encoder, view| {
                        ui_manager.render_display_only(device, queue, encoder, view);
                    });

                if !outcome.presented() {
                    ui_manager.discard_frame();
                    retry_unpresented(outcome, window.inner_size(), window);
                }
            }
            _ => (),
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(render_engine) = &self.render_engine {
            log::debug!("Shadow cache: {:?}", render_engine.get_shadow_cache_stats());
        }
        self.scene.release_gpu_resources();
    }
}

/// Asks for another frame after one the surface could not present, so the
/// latest scene change still reaches the screen
///
/// A window with no area (e.g. minimised) is left alone until it is resized.
fn retry_unpresented<R>(outcome: FrameOutcome, size: PhysicalSize<u32>, redraw: &R) -> bool
where
    R: RedrawTarget + ?Sized,
{
    if outcome.presented() || size.width == 0 || size.height == 0 {
        return false;
    }
    log::debug!("Frame not presented ({:?}), retrying", outcome);
    redraw.request_redraw();
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[derive(Default)]
    struct CountingRedraw {
        count: Cell<u32>,
    }

    impl RedrawTarget for CountingRedraw {
        fn request_redraw(&self) {
            self.count.set(self.count.get() + 1);
        }
    }

    #[test]
    fn test_unpresented_frames_are_retried_once() {
        let redraw = CountingRedraw::default();
        let size = PhysicalSize::new(800, 600);

        assert!(retry_unpresented(FrameOutcome::Reconfigured, size, &redraw));
        assert!(retry_unpresented(FrameOutcome::Skipped, size, &redraw));
        assert_eq!(redraw.count.get(), 2);
    }

    #[test]
    fn test_presented_frames_are_not_retried() {
        let redraw = CountingRedraw::default();
        assert!(!retry_unpresented(
            FrameOutcome::Presented,
            PhysicalSize::new(800, 600),
            &redraw
        ));
        assert_eq!(redraw.count.get(), 0);
    }

    #[test]
    fn test_minimised_window_waits_for_resize() {
        let redraw = CountingRedraw::default();
        assert!(!retry_unpresented(
            FrameOutcome::Reconfigured,
            PhysicalSize::new(0, 600),
            &redraw
        ));
        assert_eq!(redraw.count.get(), 0);
    }
}
