//! Window management system
//!
//! Handles window and OpenGL context creation, buffer swaps, cursor
//! capture/release, fullscreen toggle, and title updates.

use std::num::NonZeroU32;

use glutin::config::{ConfigTemplateBuilder, GlConfig};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, GlProfile, NotCurrentGlContext, PossiblyCurrentContext,
    Version,
};
use glutin::display::{GetGlDisplay, GlDisplay};
use glutin::surface::{GlSurface, Surface, SwapInterval, WindowSurface};
use glutin_winit::{DisplayBuilder, GlWindow};
use raw_window_handle::HasWindowHandle;
use winit::{
    dpi::{LogicalSize, PhysicalSize},
    event_loop::ActiveEventLoop,
    window::{CursorGrabMode, Fullscreen, Window},
};

use crate::config::WindowConfig;

/// Manages the application window, its GL context and cursor state
pub struct WindowSystem {
    // Surface and context are dropped before the window they render to
    gl_surface: Surface<WindowSurface>,
    gl_context: PossiblyCurrentContext,
    window: Window,
    cursor_captured: bool,
    base_title: String,
}

impl WindowSystem {
    /// Create the window and make an OpenGL compatibility context current on it
    pub fn create(
        event_loop: &ActiveEventLoop,
        config: &WindowConfig,
    ) -> Result<Self, WindowError> {
        let mut attrs = Window::default_attributes()
            .with_title(&config.title)
            .with_inner_size(LogicalSize::new(config.width, config.height));

        if config.fullscreen {
            attrs = attrs.with_fullscreen(Some(Fullscreen::Borderless(None)));
        }

        let template = ConfigTemplateBuilder::new()
            .with_alpha_size(8)
            .with_depth_size(24)
            .with_stencil_size(8);

        // The engine renders multisampled targets itself; prefer plain configs
        let (window, gl_config) = DisplayBuilder::new()
            .with_window_attributes(Some(attrs))
            .build(event_loop, template, |configs| {
                configs
                    .min_by_key(|c| c.num_samples())
                    .expect("glutin-winit only calls the picker with at least one config")
            })
            .map_err(|e| WindowError::CreationFailed(e.to_string()))?;
        let window = window.ok_or_else(|| WindowError::CreationFailed("no window".into()))?;

        let raw_handle = window
            .window_handle()
            .map_err(|e| WindowError::CreationFailed(e.to_string()))?
            .as_raw();
        let gl_display = gl_config.display();

        // Horde3D 1.0 targets OpenGL 2.x
        let context_attrs = ContextAttributesBuilder::new()
            .with_profile(GlProfile::Compatibility)
            .with_context_api(ContextApi::OpenGl(Some(Version::new(2, 1))))
            .build(Some(raw_handle));
        let not_current = unsafe { gl_display.create_context(&gl_config, &context_attrs) }
            .map_err(|e| WindowError::GlSetup(e.to_string()))?;

        let surface_attrs = window
            .build_surface_attributes(Default::default())
            .map_err(|e| WindowError::GlSetup(e.to_string()))?;
        let gl_surface = unsafe { gl_display.create_window_surface(&gl_config, &surface_attrs) }
            .map_err(|e| WindowError::GlSetup(e.to_string()))?;
        let gl_context = not_current
            .make_current(&gl_surface)
            .map_err(|e| WindowError::GlSetup(e.to_string()))?;

        let system = Self {
            gl_surface,
            gl_context,
            window,
            cursor_captured: false,
            base_title: config.title.clone(),
        };
        system.set_vsync(config.vsync);
        log::info!(
            "Created {}x{} window with OpenGL config ({} samples)",
            config.width,
            config.height,
            gl_config.num_samples()
        );
        Ok(system)
    }

    /// Get window reference
    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Current drawable size in physical pixels
    pub fn size(&self) -> PhysicalSize<u32> {
        self.window.inner_size()
    }

    /// Resize the GL surface; zero sizes are ignored
    pub fn resize(&self, size: PhysicalSize<u32>) {
        if let (Some(w), Some(h)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height)) {
            self.gl_surface.resize(&self.gl_context, w, h);
        }
    }

    pub fn set_vsync(&self, enabled: bool) {
        let interval = if enabled {
            SwapInterval::Wait(NonZeroU32::MIN)
        } else {
            SwapInterval::DontWait
        };
        if let Err(e) = self.gl_surface.set_swap_interval(&self.gl_context, interval) {
            log::warn!("Failed to set swap interval: {}", e);
        }
    }

    /// Present the back buffer
    pub fn swap_buffers(&self) -> Result<(), WindowError> {
        self.gl_surface
            .swap_buffers(&self.gl_context)
            .map_err(|e| WindowError::Swap(e.to_string()))
    }

    /// Check if cursor is captured
    pub fn is_cursor_captured(&self) -> bool {
        self.cursor_captured
    }

    /// Capture cursor for FPS-style controls
    pub fn capture_cursor(&mut self) -> bool {
        let grab_result = self.window
            .set_cursor_grab(CursorGrabMode::Locked)
            .or_else(|_| self.window.set_cursor_grab(CursorGrabMode::Confined));

        if grab_result.is_ok() {
            self.window.set_cursor_visible(false);
            self.cursor_captured = true;
            log::info!("Cursor captured - Escape to release");
            true
        } else {
            log::warn!("Failed to capture cursor");
            false
        }
    }

    /// Release cursor
    pub fn release_cursor(&mut self) {
        let _ = self.window.set_cursor_grab(CursorGrabMode::None);
        self.window.set_cursor_visible(true);
        self.cursor_captured = false;
        log::info!("Cursor released - click to capture");
    }

    /// Toggle fullscreen mode
    ///
    /// Uses an exclusive video mode at the resolution picked by
    /// [`fullscreen_resolution`] when the monitor offers one, borderless
    /// fullscreen otherwise.
    pub fn toggle_fullscreen(&self) {
        if self.window.fullscreen().is_some() {
            self.window.set_fullscreen(None);
            log::info!("Leaving fullscreen");
            return;
        }

        let Some(monitor) = self.window.current_monitor() else {
            self.window.set_fullscreen(Some(Fullscreen::Borderless(None)));
            return;
        };
        let target = fullscreen_resolution(monitor.size());
        let mode = monitor
            .video_modes()
            .filter(|mode| mode.size() == target)
            .max_by_key(|mode| mode.refresh_rate_millihertz());

        match mode {
            Some(mode) => {
                log::info!("Fullscreen at {}x{}", target.width, target.height);
                self.window.set_fullscreen(Some(Fullscreen::Exclusive(mode)));
            }
            None => {
                log::info!("No {}x{} video mode, using borderless fullscreen", target.width, target.height);
                self.window.set_fullscreen(Some(Fullscreen::Borderless(Some(monitor))));
            }
        }
    }

    /// Update window title with frame rate and camera position
    pub fn update_title(&self, fps: f32, pos: [f32; 3]) {
        self.window.set_title(&format_title(&self.base_title, fps, pos, self.cursor_captured));
    }

    /// Request a redraw
    pub fn request_redraw(&self) {
        self.window.request_redraw();
    }
}

/// Fullscreen resolution for a desktop size, chosen by aspect ratio
///
/// 4:3 and 5:4 desktops get 1280x1024, 16:9 gets 1280x720 and 16:10 gets
/// 1280x800. Other ratios keep the desktop resolution.
pub fn fullscreen_resolution(desktop: PhysicalSize<u32>) -> PhysicalSize<u32> {
    if desktop.height == 0 {
        return desktop;
    }
    let aspect = u64::from(desktop.width) * 100 / u64::from(desktop.height);
    match aspect {
        133 | 125 => PhysicalSize::new(1280, 1024),
        177 => PhysicalSize::new(1280, 720),
        160 => PhysicalSize::new(1280, 800),
        _ => desktop,
    }
}

fn format_title(base: &str, fps: f32, pos: [f32; 3], captured: bool) -> String {
    let hint = if captured { "Esc to release" } else { "Click to capture" };
    format!(
        "{} - {:.0} fps ({:.1}, {:.1}, {:.1}) [{}]",
        base, fps, pos[0], pos[1], pos[2], hint
    )
}

#[derive(Debug, thiserror::Error)]
pub enum WindowError {
    #[error("Window creation failed: {0}")]
    CreationFailed(String),
    #[error("OpenGL setup failed: {0}")]
    GlSetup(String),
    #[error("Buffer swap failed: {0}")]
    Swap(String),
}
