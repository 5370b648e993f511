//! Input mapping from raw events to semantic actions
//!
//! Maps keyboard and mouse input to high-level actions like ToggleCursor, Exit, etc.
//! Movement keys (WASD, Left Shift) are NOT mapped here - they go directly to
//! FreeFlyController. Blend keys (1, 2) are held keys and are read from KeyStates.

use winit::event::{ElementState, MouseButton};
use winit::keyboard::KeyCode;

/// Actions triggered by special input (not movement)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Toggle cursor capture (Escape when captured, click when released)
    ToggleCursor,
    /// Exit application (Escape when not captured)
    Exit,
    /// Toggle fullscreen mode (F1)
    ToggleFullscreen,
    /// Swap HDR and forward pipelines (F3)
    TogglePipeline,
    /// Cycle frame stats display (F6)
    CycleStats,
    /// Toggle debug view mode (F7)
    ToggleDebugView,
    /// Toggle wireframe rendering (F8)
    ToggleWireframe,
    /// Freeze or resume animation (Space)
    ToggleFreeze,
}

/// Maps raw input events to semantic actions
pub struct InputMapper;

impl InputMapper {
    /// Map keyboard input to an action
    ///
    /// Returns `Some(action)` for special keys, `None` for movement keys
    pub fn map_keyboard(
        key: KeyCode,
        state: ElementState,
        cursor_captured: bool,
    ) -> Option<InputAction> {
        // Only handle key presses, not releases
        if state != ElementState::Pressed {
            return None;
        }

        match key {
            KeyCode::Escape => {
                if cursor_captured {
                    Some(InputAction::ToggleCursor)
                } else {
                    Some(InputAction::Exit)
                }
            }
            KeyCode::F1 => Some(InputAction::ToggleFullscreen),
            KeyCode::F3 => Some(InputAction::TogglePipeline),
            KeyCode::F6 => Some(InputAction::CycleStats),
            KeyCode::F7 => Some(InputAction::ToggleDebugView),
            KeyCode::F8 => Some(InputAction::ToggleWireframe),
            KeyCode::Space => Some(InputAction::ToggleFreeze),
            _ => None,
        }
    }

    /// Map mouse button to an action
    ///
    /// Returns `Some(ToggleCursor)` for left click when cursor not captured
    pub fn map_mouse_button(
        button: MouseButton,
        state: ElementState,
        cursor_captured: bool,
    ) -> Option<InputAction> {
        if button == MouseButton::Left && state == ElementState::Pressed && !cursor_captured {
            Some(InputAction::ToggleCursor)
        } else {
            None
        }
    }
}
