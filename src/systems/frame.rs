//! Frame rate estimation

use std::time::Instant;

/// Frames between two estimates
const SAMPLE_FRAMES: u32 = 3;
/// Estimates below this are treated as a stall (debugger, window drag)
const MIN_FPS: f32 = 5.0;
const FALLBACK_FPS: f32 = 30.0;

/// Frame rate estimated every few frames; per-frame time steps derive from it
#[derive(Debug, Clone)]
pub struct FpsCounter {
    frames: u32,
    last: Instant,
    fps: f32,
}

impl FpsCounter {
    pub fn new(now: Instant) -> Self {
        Self {
            frames: 0,
            last: now,
            fps: FALLBACK_FPS,
        }
    }

    /// Count a frame and return the current estimate
    pub fn tick(&mut self, now: Instant) -> f32 {
        self.frames += 1;
        if self.frames >= SAMPLE_FRAMES {
            let elapsed = now.saturating_duration_since(self.last).as_secs_f32();
            let fps = if elapsed > 0.0 {
                self.frames as f32 / elapsed
            } else {
                FALLBACK_FPS
            };
            self.fps = if fps < MIN_FPS { FALLBACK_FPS } else { fps };
            self.frames = 0;
            self.last = now;
        }
        self.fps
    }

    /// Restart the sampling window, e.g. after a fullscreen switch
    pub fn reset(&mut self, now: Instant) {
        self.frames = 0;
        self.last = now;
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Seconds per frame at the current estimate
    pub fn frame_time(&self) -> f32 {
        1.0 / self.fps
    }
}
