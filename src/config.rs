//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`H3D_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use horde3d::LibraryPaths;
use serde::{Serialize, Deserialize};
use std::path::{Path, PathBuf};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Window configuration
    #[serde(default)]
    pub window: WindowConfig,
    /// Engine libraries, content and options
    #[serde(default)]
    pub engine: EngineConfig,
    /// Camera configuration
    #[serde(default)]
    pub camera: CameraConfig,
    /// Input configuration
    #[serde(default)]
    pub input: InputConfig,
    /// Knight scene configuration
    #[serde(default)]
    pub knight: KnightConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`H3D_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        // Load user config (optional)
        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // Environment variables override everything
        // H3D_ENGINE__CONTENT_DIR=/data -> engine.content_dir = "/data"
        figment = figment.merge(Env::prefixed("H3D_").split("__"));

        Ok(figment.extract()?)
    }

    /// Like [`AppConfig::load`], falling back to defaults on error
    ///
    /// The error is handed back so the caller can report it once logging
    /// is up.
    pub fn load_or_default() -> (Self, Option<ConfigError>) {
        Self::load_or_default_from("config")
    }

    pub fn load_or_default_from<P: AsRef<Path>>(config_dir: P) -> (Self, Option<ConfigError>) {
        match Self::load_from(config_dir) {
            Ok(config) => (config, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    /// Window width in pixels
    pub width: u32,
    /// Window height in pixels
    pub height: u32,
    /// Start in fullscreen mode
    pub fullscreen: bool,
    /// Enable VSync
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Knight - Horde3D Sample".to_string(),
            width: 1024,
            height: 576,
            fullscreen: false,
            vsync: false,
        }
    }
}

/// Engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Path or file name of the core library (platform name when unset)
    pub library: Option<PathBuf>,
    /// Path or file name of the utility library (platform name when unset)
    pub utils_library: Option<PathBuf>,
    /// Load the utility library (content loading, frame stats, log dump)
    pub use_utils: bool,
    /// Content directories, `|` separated
    pub content_dir: String,
    pub load_textures: bool,
    pub tex_compression: bool,
    pub fast_animation: bool,
    /// 1, 2, 4 or 8
    pub max_anisotropy: u32,
    /// 128 to 2048
    pub shadow_map_size: u32,
    /// Maximum engine log level forwarded (1 errors .. 4 debug)
    pub max_log_level: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            library: None,
            utils_library: None,
            use_utils: true,
            content_dir: "content".to_string(),
            load_textures: true,
            tex_compression: false,
            fast_animation: false,
            max_anisotropy: 4,
            shadow_map_size: 2048,
            max_log_level: 4,
        }
    }
}

impl EngineConfig {
    /// Library locations, falling back to platform file names
    pub fn library_paths(&self) -> LibraryPaths {
        let defaults = LibraryPaths::default();
        let paths = LibraryPaths {
            core: self.library.clone().unwrap_or(defaults.core),
            utils: self.utils_library.clone().or(defaults.utils),
        };
        if self.use_utils {
            paths
        } else {
            paths.without_utils()
        }
    }
}

/// Camera configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Starting position [x, y, z]
    pub start_position: [f32; 3],
    /// Starting pitch in degrees
    pub start_pitch: f32,
    /// Starting yaw in degrees
    pub start_yaw: f32,
    /// Vertical field of view in degrees
    pub fov: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            start_position: [5.0, 3.0, 19.0],
            start_pitch: 7.0,
            start_yaw: 15.0,
            fov: 45.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

/// Input configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Movement speed (units per second)
    pub velocity: f32,
    /// Speed multiplier while Left Shift is held
    pub sprint_multiplier: f32,
    /// Degrees per pixel of mouse motion
    pub mouse_sensitivity: f32,
    pub invert_y: bool,
    /// Blend weight change per second while 1 or 2 is held
    pub blend_rate: f32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            velocity: 10.0,
            sprint_multiplier: 5.0,
            mouse_sensitivity: 0.3,
            invert_y: false,
            blend_rate: 2.0,
        }
    }
}

/// Knight scene configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KnightConfig {
    /// Animation frames per second of time
    pub anim_fps: f32,
    /// Joint the particle system is attached to
    pub particle_joint: String,
    pub hdr_exposure: f32,
    pub hdr_bright_threshold: f32,
    pub hdr_bright_offset: f32,
    pub light_color: [f32; 3],
}

impl Default for KnightConfig {
    fn default() -> Self {
        Self {
            anim_fps: 24.0,
            particle_joint: "Bip01_R_Hand".to_string(),
            hdr_exposure: 2.5,
            hdr_bright_threshold: 0.5,
            hdr_bright_offset: 0.08,
            light_color: [1.0, 0.8, 0.7],
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Initial frame stats mode (0 hidden, 1 and 2 increasingly detailed)
    pub stats_mode: u32,
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
    /// Write the engine HTML log on exit
    pub dump_messages_on_exit: bool,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            stats_mode: 0,
            log_level: "info".to_string(),
            dump_messages_on_exit: false,
        }
    }
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
#[error("Configuration error: {0}")]
pub struct ConfigError(#[source] Box<figment::Error>);

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError(Box::new(e))
    }
}
