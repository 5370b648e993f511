//! Engine system
//!
//! Loads and initializes Horde3D against the current GL context, applies
//! configured options, keeps camera viewports in sync with the window, and
//! closes each frame.

use horde3d::{CameraParams, Engine, EngineOption, HordeError, Node, Resource};

use crate::config::{CameraConfig, EngineConfig};

/// Owns the engine for the lifetime of the GL context
pub struct EngineSystem {
    engine: Engine,
    content_dir: String,
}

impl EngineSystem {
    /// Load the native libraries and initialize the engine
    ///
    /// A GL context must be current on this thread. On failure the engine
    /// log is dumped (when the utility library is available) before the
    /// error is returned.
    pub fn start(config: &EngineConfig) -> Result<Self, HordeError> {
        let engine = Engine::load(&config.library_paths())?;
        Self::start_with(engine, config)
    }

    /// Initialize an already loaded engine
    pub fn start_with(mut engine: Engine, config: &EngineConfig) -> Result<Self, HordeError> {
        if let Err(e) = engine.init() {
            if engine.has_utils() {
                if let Err(dump) = engine.dump_messages() {
                    log::warn!("Failed to dump engine log: {}", dump);
                }
            }
            return Err(e);
        }
        apply_options(&engine, config)?;
        Ok(Self {
            engine,
            content_dir: config.content_dir.clone(),
        })
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Builder: load content from `content_dir` instead of the configured one
    pub fn with_content_dir(mut self, content_dir: impl Into<String>) -> Self {
        self.content_dir = content_dir.into();
        self
    }

    /// Load every queued resource from the content directory
    ///
    /// Missing files are replaced by default content, so a partial load is
    /// reported as `Ok(false)` rather than an error. Without the utility
    /// library every queued resource gets default content.
    pub fn load_content(&self) -> Result<bool, HordeError> {
        let complete = if self.engine.has_utils() {
            self.engine.load_resources_from_disk(&self.content_dir)?
        } else {
            log::warn!("Utility library not loaded, using default content");
            for res in self.engine.unloaded_resources() {
                self.engine.load_resource_placeholder(res)?;
            }
            false
        };
        self.engine.forward_messages();
        Ok(complete)
    }

    /// Close the frame: finalize, drop overlays and forward engine messages
    pub fn end_frame(&self) {
        self.engine.finalize_frame();
        self.engine.clear_overlays();
        self.engine.forward_messages();
    }

    /// Release the engine; must run before the GL context goes away
    pub fn shutdown(&mut self, dump_log: bool) {
        if dump_log && self.engine.has_utils() {
            if let Err(e) = self.engine.dump_messages() {
                log::warn!("Failed to dump engine log: {}", e);
            }
        }
        self.engine.release();
    }
}

/// Apply the configured engine options
pub fn apply_options(engine: &Engine, config: &EngineConfig) -> Result<(), HordeError> {
    let flag = |on: bool| if on { 1.0 } else { 0.0 };
    let options = [
        (EngineOption::MaxLogLevel, config.max_log_level as f32),
        (EngineOption::LoadTextures, flag(config.load_textures)),
        (EngineOption::TexCompression, flag(config.tex_compression)),
        (EngineOption::FastAnimation, flag(config.fast_animation)),
        (EngineOption::MaxAnisotropy, config.max_anisotropy as f32),
        (EngineOption::ShadowMapSize, config.shadow_map_size as f32),
    ];
    for (option, value) in options {
        engine.set_option(option, value)?;
    }
    Ok(())
}

/// Fit a camera and its pipelines to a window of `width` x `height` pixels
///
/// A zero height is treated as 1 so the aspect ratio stays finite.
pub fn resize_viewport(
    engine: &Engine,
    camera: Node,
    pipelines: &[Resource],
    width: u32,
    height: u32,
    view: &CameraConfig,
) -> Result<(), HordeError> {
    let width = width.max(1);
    let height = height.max(1);
    let (w, h) = (viewport_dim(width)?, viewport_dim(height)?);

    engine.set_node_param_i(camera, CameraParams::ViewportXI, 0);
    engine.set_node_param_i(camera, CameraParams::ViewportYI, 0);
    engine.set_node_param_i(camera, CameraParams::ViewportWidthI, w);
    engine.set_node_param_i(camera, CameraParams::ViewportHeightI, h);

    engine.setup_camera_view(camera, view.fov, width as f32 / height as f32, view.near, view.far);
    for &pipeline in pipelines {
        engine.resize_pipeline_buffers(pipeline, width, height)?;
    }
    Ok(())
}

fn viewport_dim(value: u32) -> Result<i32, HordeError> {
    i32::try_from(value).map_err(|_| HordeError::BufferTooLarge { len: value as usize })
}
