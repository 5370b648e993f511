//! Knight - Horde3D sample
//!
//! An animated knight blending two animations, a particle system in its hand
//! and a free-fly camera.

use std::time::Instant;

use anyhow::Context;
use winit::{
    application::ApplicationHandler,
    event::{DeviceEvent, DeviceId, ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::WindowId,
};

use horde3d_demos::config::AppConfig;
use horde3d_demos::input::{InputAction, InputMapper};
use horde3d_demos::logging::init_logging;
use horde3d_demos::scene::{KnightResources, KnightScene};
use horde3d_demos::systems::{resize_viewport, EngineSystem, FpsCounter, WindowSystem};
use horde3d_input::{BlendControl, FreeFlyCamera, FreeFlyController, KeyStates};

/// State bound to the GL context
struct Running {
    // Dropped in order: the engine goes before the context it renders with
    engine: EngineSystem,
    scene: KnightScene,
    window: WindowSystem,
}

/// Main application state
struct App {
    config: AppConfig,
    running: Option<Running>,
    camera: FreeFlyCamera,
    controller: FreeFlyController,
    keys: KeyStates<KeyCode>,
    blend: BlendControl,
    fps: FpsCounter,
    /// First fatal error, reported once the event loop returns
    error: Option<anyhow::Error>,
}

impl App {
    fn new(config: AppConfig) -> Self {
        let camera = FreeFlyCamera::new(
            config.camera.start_position,
            config.camera.start_pitch,
            config.camera.start_yaw,
        );
        let controller = FreeFlyController::new()
            .with_velocity(config.input.velocity)
            .with_sprint_multiplier(config.input.sprint_multiplier)
            .with_mouse_sensitivity(config.input.mouse_sensitivity)
            .with_invert_y(config.input.invert_y);
        let blend = BlendControl::new().with_rate(config.input.blend_rate);

        Self {
            config,
            running: None,
            camera,
            controller,
            keys: KeyStates::new(),
            blend,
            fps: FpsCounter::new(Instant::now()),
            error: None,
        }
    }

    fn start(&self, event_loop: &ActiveEventLoop) -> anyhow::Result<Running> {
        let window = WindowSystem::create(event_loop, &self.config.window)
            .context("Failed to create window")?;
        let engine = EngineSystem::start(&self.config.engine).context("Error starting Horde3D")?;

        let resources = KnightResources::add(engine.engine())?;
        if !engine.load_content()? {
            log::warn!("Some content is missing from {:?}", self.config.engine.content_dir);
        }
        let scene = KnightScene::build(engine.engine(), resources, &self.config.knight)
            .context("Failed to build knight scene")?
            .with_stats_mode(self.config.debug.stats_mode);

        let size = window.size();
        resize_viewport(
            engine.engine(),
            scene.camera(),
            &scene.pipelines(),
            size.width,
            size.height,
            &self.config.camera,
        )?;

        Ok(Running {
            engine,
            scene,
            window,
        })
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        log::error!("{:#}", error);
        self.error.get_or_insert(error);
        event_loop.exit();
    }

    fn handle_action(&mut self, event_loop: &ActiveEventLoop, action: InputAction) {
        let Some(running) = self.running.as_mut() else {
            return;
        };
        let engine = running.engine.engine();

        match action {
            InputAction::ToggleCursor => {
                if running.window.is_cursor_captured() {
                    running.window.release_cursor();
                } else {
                    running.window.capture_cursor();
                }
            }
            InputAction::Exit => event_loop.exit(),
            InputAction::ToggleFullscreen => running.window.toggle_fullscreen(),
            InputAction::TogglePipeline => {
                let pipeline = running.scene.toggle_pipeline(engine);
                log::info!("Pipeline: {}", engine.resource_name(pipeline));
            }
            InputAction::CycleStats => {
                log::info!("Frame stats mode {}", running.scene.cycle_stats());
            }
            InputAction::ToggleDebugView => match running.scene.toggle_debug_view(engine) {
                Ok(on) => log::info!("Debug view: {}", if on { "ON" } else { "OFF" }),
                Err(e) => log::warn!("Debug view unavailable: {}", e),
            },
            InputAction::ToggleWireframe => match running.scene.toggle_wireframe(engine) {
                Ok(on) => log::info!("Wireframe: {}", if on { "ON" } else { "OFF" }),
                Err(e) => log::warn!("Wireframe unavailable: {}", e),
            },
            InputAction::ToggleFreeze => {
                let frozen = running.scene.toggle_freeze();
                log::info!("Animation {}", if frozen { "frozen" } else { "running" });
            }
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(captured) = self.running.as_ref().map(|r| r.window.is_cursor_captured()) else {
            return;
        };

        let pressed: Vec<KeyCode> = self.keys.just_pressed().collect();
        for key in pressed {
            if let Some(action) = InputMapper::map_keyboard(key, ElementState::Pressed, captured) {
                self.handle_action(event_loop, action);
            }
        }

        let fps = self.fps.tick(Instant::now());
        let dt = self.fps.frame_time();
        self.blend.update(
            self.keys.is_down(KeyCode::Digit1),
            self.keys.is_down(KeyCode::Digit2),
            dt,
        );
        self.keys.end_frame();

        let Some(running) = self.running.as_mut() else {
            return;
        };
        let captured = running.window.is_cursor_captured();
        let position = self.controller.update(&mut self.camera, dt, captured);

        let engine = running.engine.engine();
        let frame = running
            .scene
            .update(engine, dt, self.blend.stage_weights())
            .and_then(|()| running.scene.render(engine, &self.camera.transform()));
        if let Err(e) = frame {
            self.fail(event_loop, anyhow::Error::new(e).context("Rendering failed"));
            return;
        }
        running.engine.end_frame();

        if let Err(e) = running.window.swap_buffers() {
            self.fail(event_loop, e.into());
            return;
        }
        running.window.update_title(fps, position);
        running.window.request_redraw();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.running.is_some() || self.error.is_some() {
            return;
        }
        match self.start(event_loop) {
            Ok(running) => {
                running.window.request_redraw();
                self.fps.reset(Instant::now());
                self.running = Some(running);
            }
            Err(e) => {
                eprintln!("Error starting the knight sample: {:#}", e);
                self.fail(event_loop, e);
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if let Some(running) = &self.running {
                    running.window.resize(size);
                    let result = resize_viewport(
                        running.engine.engine(),
                        running.scene.camera(),
                        &running.scene.pipelines(),
                        size.width,
                        size.height,
                        &self.config.camera,
                    );
                    if let Err(e) = result {
                        log::warn!("Resize to {}x{} failed: {}", size.width, size.height, e);
                    }
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    self.keys.set(key, event.state == ElementState::Pressed);
                    self.controller.process_keyboard(key, event.state);
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let captured = self
                    .running
                    .as_ref()
                    .is_some_and(|r| r.window.is_cursor_captured());
                if let Some(action) = InputMapper::map_mouse_button(button, state, captured) {
                    self.handle_action(event_loop, action);
                }
            }

            WindowEvent::Focused(false) => {
                self.controller.reset();
                self.keys.clear();
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.controller.process_mouse_motion(delta.0, delta.1);
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(mut running) = self.running.take() {
            running
                .engine
                .shutdown(self.config.debug.dump_messages_on_exit);
        }
    }
}

fn main() -> anyhow::Result<()> {
    let (config, config_error) = AppConfig::load_or_default();
    init_logging(&config.debug.log_level);
    if let Some(e) = config_error {
        log::warn!("Failed to load config: {}. Using defaults.", e);
    }
    log::info!("Starting {}", config.window.title);

    let event_loop = EventLoop::new().context("Failed to create event loop")?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
