//! Platform scene demo
//!
//! Renders the platform model through the forward pipeline. Content is
//! searched in the configured directory and its standard subdirectories.
//! Closing the window or pressing Escape exits.
//!
//! Run with: `cargo run --example platform_scene`

use anyhow::Context;
use winit::{
    application::ApplicationHandler,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::WindowId,
};

use horde3d_demos::config::{AppConfig, WindowConfig};
use horde3d_demos::logging::init_logging;
use horde3d_demos::scene::{content_search_path, PlatformResources, PlatformScene};
use horde3d_demos::systems::{resize_viewport, EngineSystem, WindowSystem};

struct Running {
    engine: EngineSystem,
    scene: PlatformScene,
    window: WindowSystem,
}

struct PlatformDemo {
    config: AppConfig,
    running: Option<Running>,
    error: Option<anyhow::Error>,
}

impl PlatformDemo {
    fn start(&self, event_loop: &ActiveEventLoop) -> anyhow::Result<Running> {
        let window_config = WindowConfig {
            title: "Horde3D Platform Scene".to_string(),
            width: 800,
            height: 600,
            ..self.config.window.clone()
        };
        let window = WindowSystem::create(event_loop, &window_config).context("Failed to create window")?;
        let engine = EngineSystem::start(&self.config.engine)
            .context("Error starting Horde3D")?
            .with_content_dir(content_search_path(&self.config.engine.content_dir));
        log::info!("Version: {}", engine.engine().version_string());

        let resources = PlatformResources::add(engine.engine())?;
        if !engine.load_content()? {
            log::warn!("Platform content is incomplete");
        }
        let scene = PlatformScene::build(engine.engine(), resources)?;

        let size = window.size();
        resize_viewport(
            engine.engine(),
            scene.camera,
            &[scene.pipeline],
            size.width,
            size.height,
            &self.config.camera,
        )?;
        window.request_redraw();

        Ok(Running { engine, scene, window })
    }

    fn exit_with(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        log::error!("{:#}", error);
        self.error.get_or_insert(error);
        event_loop.exit();
    }
}

impl ApplicationHandler for PlatformDemo {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.running.is_some() || self.error.is_some() {
            return;
        }
        match self.start(event_loop) {
            Ok(running) => self.running = Some(running),
            Err(e) => {
                eprintln!("Error starting the platform scene: {:#}", e);
                self.exit_with(event_loop, e);
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::KeyboardInput { event, .. }
                if event.state == ElementState::Pressed
                    && event.physical_key == PhysicalKey::Code(KeyCode::Escape) =>
            {
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                let Some(running) = &self.running else {
                    return;
                };
                running.window.resize(size);
                let result = resize_viewport(
                    running.engine.engine(),
                    running.scene.camera,
                    &[running.scene.pipeline],
                    size.width,
                    size.height,
                    &self.config.camera,
                );
                if let Err(e) = result {
                    log::warn!("Resize failed: {}", e);
                }
            }

            WindowEvent::RedrawRequested => {
                let Some(running) = &self.running else {
                    return;
                };
                running.engine.engine().render(running.scene.camera);
                running.engine.end_frame();
                if let Err(e) = running.window.swap_buffers() {
                    self.exit_with(event_loop, e.into());
                    return;
                }
                running.window.request_redraw();
            }

            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(mut running) = self.running.take() {
            running.engine.shutdown(self.config.debug.dump_messages_on_exit);
        }
    }
}

fn main() -> anyhow::Result<()> {
    let (config, config_error) = AppConfig::load_or_default();
    init_logging(&config.debug.log_level);
    if let Some(e) = config_error {
        log::warn!("Failed to load config: {}. Using defaults.", e);
    }

    let event_loop = EventLoop::new().context("Failed to create event loop")?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut demo = PlatformDemo {
        config,
        running: None,
        error: None,
    };
    event_loop.run_app(&mut demo)?;

    match demo.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
