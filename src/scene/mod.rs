//! Scene setups for the sample applications
//!
//! Each scene queues its resources first, then builds its nodes once the
//! content has been loaded from disk.

mod knight;
mod overlays;
mod platform;
mod static_scene;

pub use knight::{KnightResources, KnightScene, MAX_STATS_MODE};
pub use overlays::{logo_quad, viewport_aspect};
pub use platform::{content_search_path, PlatformResources, PlatformScene};
pub use static_scene::{StaticResources, StaticScene};
