//! Engine lifetime and basic functions
//!
//! [`Engine`] owns the resolved function tables. Initialization needs a
//! current OpenGL context, and every later call must happen on the thread
//! that owns it, so the type is neither `Send` nor `Sync`.

use std::marker::PhantomData;
use std::os::raw::{c_float, c_int};
use std::path::{Path, PathBuf};

use horde3d_sys::{self as sys, Horde3DApi, Horde3DUtilsApi};
use log::{debug, error, info, trace, warn};

use crate::error::{HordeError, Result};
use crate::ffi::{c_len, c_string, copy_engine_string};
use crate::handle::{Node, Resource};
use crate::types::{EngineOption, EngineStat};

/// Upper bound on messages read in one drain
const MESSAGE_DRAIN_LIMIT: usize = 4096;

/// Floats per overlay vertex (x, y, u, v)
const OVERLAY_VERTEX_FLOATS: usize = 4;

/// Locations of the native libraries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryPaths {
    pub core: PathBuf,
    /// `None` skips the utility library
    pub utils: Option<PathBuf>,
}

impl Default for LibraryPaths {
    /// Platform file names, resolved through the system search path
    fn default() -> Self {
        Self {
            core: PathBuf::from(sys::library_file_name(sys::CORE_LIBRARY_NAME)),
            utils: Some(PathBuf::from(sys::library_file_name(
                sys::UTILS_LIBRARY_NAME,
            ))),
        }
    }
}

impl LibraryPaths {
    /// Platform file names inside `dir`
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            core: dir.join(sys::library_file_name(sys::CORE_LIBRARY_NAME)),
            utils: Some(dir.join(sys::library_file_name(sys::UTILS_LIBRARY_NAME))),
        }
    }

    /// Skip the utility library
    pub fn without_utils(mut self) -> Self {
        self.utils = None;
        self
    }
}

/// One entry of the engine message queue
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    /// 1 error, 2 warning, 3 info, 4 debug
    pub level: i32,
    /// Seconds since engine initialization
    pub time: f32,
    pub text: String,
}

impl Message {
    /// Log level for forwarding through the `log` facade
    pub fn log_level(&self) -> log::Level {
        match self.level {
            i32::MIN..=1 => log::Level::Error,
            2 => log::Level::Warn,
            3 => log::Level::Info,
            4 => log::Level::Debug,
            _ => log::Level::Trace,
        }
    }
}

/// Safe handle to a loaded Horde3D engine
pub struct Engine {
    pub(crate) api: Horde3DApi,
    pub(crate) utils: Option<Horde3DUtilsApi>,
    initialized: bool,
    _not_send: PhantomData<*const ()>,
}

impl Engine {
    /// Opens the native libraries and resolves every entry point
    pub fn load(paths: &LibraryPaths) -> Result<Self> {
        let api = unsafe { Horde3DApi::load(sys::open_library(&paths.core)?)? };
        let utils = match &paths.utils {
            Some(path) => Some(unsafe { Horde3DUtilsApi::load(sys::open_library(path)?)? }),
            None => None,
        };
        info!(
            "Loaded {} (utils: {})",
            paths.core.display(),
            paths
                .utils
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "none".to_string())
        );
        Ok(Self::from_tables(api, utils))
    }

    /// Wraps already resolved tables, e.g. stubbed ones
    pub fn from_tables(api: Horde3DApi, utils: Option<Horde3DUtilsApi>) -> Self {
        Self {
            api,
            utils,
            initialized: false,
            _not_send: PhantomData,
        }
    }

    pub fn has_utils(&self) -> bool {
        self.utils.is_some()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Initializes the engine against the current OpenGL context
    ///
    /// Calling it again on an initialized engine is a no-op. On failure the
    /// queued engine messages are forwarded to the log before returning.
    pub fn init(&mut self) -> Result<()> {
        if self.initialized {
            return Ok(());
        }
        if !unsafe { (self.api.init)() } {
            self.forward_messages();
            error!("Horde3D initialization failed");
            return Err(HordeError::InitFailed);
        }
        self.initialized = true;
        info!("Initialized {}", self.version_string());
        Ok(())
    }

    /// Releases the engine and every resource and node it holds
    pub fn release(&mut self) {
        if self.initialized {
            self.forward_messages();
            unsafe { (self.api.release)() };
            self.initialized = false;
            debug!("Horde3D released");
        }
    }

    pub(crate) fn utils(&self) -> Result<&Horde3DUtilsApi> {
        self.utils.as_ref().ok_or(HordeError::UtilsUnavailable)
    }

    pub fn version_string(&self) -> String {
        unsafe { copy_engine_string((self.api.get_version_string)()) }
    }

    pub fn check_extension(&self, name: &str) -> Result<bool> {
        let name = c_string(name)?;
        Ok(unsafe { (self.api.check_extension)(name.as_ptr()) })
    }

    /// True if an error occurred since the last call; resets the flag
    pub fn take_error(&self) -> bool {
        unsafe { (self.api.get_error)() }
    }

    /// Renders the scene seen by `camera` into the camera's output buffer
    pub fn render(&self, camera: Node) {
        unsafe { (self.api.render)(camera.raw()) }
    }

    /// Marks the end of a frame; overlays are cleared here
    pub fn finalize_frame(&self) {
        unsafe { (self.api.finalize_frame)() }
    }

    /// Removes all resources and scene nodes, keeping the engine initialized
    pub fn clear(&self) {
        unsafe { (self.api.clear)() }
    }

    /// Pops the oldest message, `None` once the queue is empty
    pub fn next_message(&self) -> Option<Message> {
        let mut level: c_int = 0;
        let mut time: c_float = 0.0;
        let text = unsafe { copy_engine_string((self.api.get_message)(&mut level, &mut time)) };
        if text.is_empty() {
            return None;
        }
        Some(Message { level, time, text })
    }

    /// Pops every queued message
    pub fn drain_messages(&self) -> Vec<Message> {
        std::iter::from_fn(|| self.next_message())
            .take(MESSAGE_DRAIN_LIMIT)
            .collect()
    }

    /// Drains the queue into the `log` facade, returning the number of messages
    pub fn forward_messages(&self) -> usize {
        let messages = self.drain_messages();
        for message in &messages {
            let text = message.text.as_str();
            match message.log_level() {
                log::Level::Error => error!(target: "horde3d", "[{:.3}] {}", message.time, text),
                log::Level::Warn => warn!(target: "horde3d", "[{:.3}] {}", message.time, text),
                log::Level::Info => info!(target: "horde3d", "[{:.3}] {}", message.time, text),
                log::Level::Debug => debug!(target: "horde3d", "[{:.3}] {}", message.time, text),
                log::Level::Trace => trace!(target: "horde3d", "[{:.3}] {}", message.time, text),
            }
        }
        messages.len()
    }

    pub fn option(&self, option: EngineOption) -> f32 {
        unsafe { (self.api.get_option)(option.raw()) }
    }

    /// Sets an engine option; the engine rejects unsupported values
    pub fn set_option(&self, option: EngineOption, value: f32) -> Result<()> {
        if unsafe { (self.api.set_option)(option.raw(), value) } {
            Ok(())
        } else {
            warn!("Option {:?} rejected value {}", option, value);
            Err(HordeError::Rejected { call: "h3dSetOption" })
        }
    }

    pub fn stat(&self, stat: EngineStat, reset: bool) -> f32 {
        unsafe { (self.api.get_stat)(stat.raw(), reset) }
    }

    /// Queues screen space quads for the current frame
    ///
    /// `verts` holds (x, y, u, v) per vertex, four vertices per quad, with
    /// x in [0, aspect] and y in [0, 1] from the top left corner.
    pub fn show_overlays(
        &self,
        verts: &[f32],
        color: [f32; 4],
        material: Resource,
        flags: i32,
    ) -> Result<()> {
        if verts.is_empty() || verts.len() % (OVERLAY_VERTEX_FLOATS * 4) != 0 {
            return Err(HordeError::InvalidOverlay { len: verts.len() });
        }
        let vert_count = c_len(verts.len() / OVERLAY_VERTEX_FLOATS)?;
        unsafe {
            (self.api.show_overlays)(
                verts.as_ptr(),
                vert_count,
                color[0],
                color[1],
                color[2],
                color[3],
                material.raw(),
                flags,
            )
        };
        Ok(())
    }

    pub fn clear_overlays(&self) {
        unsafe { (self.api.clear_overlays)() }
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("initialized", &self.initialized)
            .field("utils", &self.utils.is_some())
            .finish()
    }
}
