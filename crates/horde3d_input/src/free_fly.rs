//! Free-fly camera controller
//!
//! Controls:
//! - W/S: Forward/backward along the view direction (follows pitch)
//! - A/D: Strafe left/right (horizontal)
//! - Left Shift: Sprint
//! - Mouse: Look around while the cursor is captured

use horde3d::Transform;
use winit::event::ElementState;
use winit::keyboard::KeyCode;

/// Camera pose: position and rotation in degrees (rx pitch, ry yaw)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FreeFlyCamera {
    pub position: [f32; 3],
    pub rx: f32,
    pub ry: f32,
}

impl Default for FreeFlyCamera {
    fn default() -> Self {
        Self {
            position: [0.0; 3],
            rx: 0.0,
            ry: 0.0,
        }
    }
}

impl FreeFlyCamera {
    pub fn new(position: [f32; 3], rx: f32, ry: f32) -> Self {
        Self { position, rx, ry }
    }

    /// Node transform for the engine camera
    pub fn transform(&self) -> Transform {
        let [x, y, z] = self.position;
        Transform::from_translation(x, y, z).with_rotation(self.rx, self.ry, 0.0)
    }
}

impl CameraControl for FreeFlyCamera {
    fn move_forward(&mut self, distance: f32) {
        let (ry, rx) = (self.ry.to_radians(), self.rx.to_radians());
        // Engine cameras look down -Z
        self.position[0] -= ry.sin() * rx.cos() * distance;
        self.position[1] += rx.sin() * distance;
        self.position[2] -= ry.cos() * rx.cos() * distance;
    }

    fn strafe(&mut self, distance: f32) {
        let right = (self.ry + 90.0).to_radians();
        self.position[0] += right.sin() * distance;
        self.position[2] += right.cos() * distance;
    }

    fn rotate(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.ry += delta_yaw;
        self.rx = (self.rx + delta_pitch).clamp(-90.0, 90.0);
    }

    fn position(&self) -> [f32; 3] {
        self.position
    }
}

/// Keyboard/mouse controller driving a [`CameraControl`]
pub struct FreeFlyController {
    // Movement state
    forward: bool,
    backward: bool,
    left: bool,
    right: bool,
    sprint: bool,

    // Mouse deltas since the last update, in pixels
    pending_dx: f32,
    pending_dy: f32,

    // Configuration
    /// Units per second
    pub velocity: f32,
    pub sprint_multiplier: f32,
    /// Degrees per pixel
    pub mouse_sensitivity: f32,
    pub invert_y: bool,
}

impl Default for FreeFlyController {
    fn default() -> Self {
        Self::new()
    }
}

impl FreeFlyController {
    pub fn new() -> Self {
        Self {
            forward: false,
            backward: false,
            left: false,
            right: false,
            sprint: false,

            pending_dx: 0.0,
            pending_dy: 0.0,

            velocity: 10.0,
            sprint_multiplier: 5.0,
            mouse_sensitivity: 0.3,
            invert_y: false,
        }
    }

    /// Process keyboard input; returns true if the key is a movement key
    pub fn process_keyboard(&mut self, key: KeyCode, state: ElementState) -> bool {
        let pressed = state == ElementState::Pressed;

        match key {
            KeyCode::KeyW => { self.forward = pressed; true }
            KeyCode::KeyS => { self.backward = pressed; true }
            KeyCode::KeyA => { self.left = pressed; true }
            KeyCode::KeyD => { self.right = pressed; true }
            KeyCode::ShiftLeft => { self.sprint = pressed; true }
            _ => false,
        }
    }

    /// Accumulate raw mouse motion
    pub fn process_mouse_motion(&mut self, delta_x: f64, delta_y: f64) {
        self.pending_dx += delta_x as f32;
        self.pending_dy += delta_y as f32;
    }

    /// Apply accumulated input to `camera` for a frame of `dt` seconds
    ///
    /// Mouse motion only turns the camera while `cursor_captured` is set; it
    /// is discarded otherwise. Returns the camera position.
    pub fn update<C: CameraControl>(&mut self, camera: &mut C, dt: f32, cursor_captured: bool) -> [f32; 3] {
        let mut speed = self.velocity * dt;
        if self.sprint {
            speed *= self.sprint_multiplier;
        }

        let fwd = (self.forward as i32 - self.backward as i32) as f32;
        let rgt = (self.right as i32 - self.left as i32) as f32;
        if fwd != 0.0 {
            camera.move_forward(fwd * speed);
        }
        if rgt != 0.0 {
            camera.strafe(rgt * speed);
        }

        if cursor_captured {
            // Mouse right turns right (yaw decreases), mouse up pitches down
            let pitch_sign = if self.invert_y { -1.0 } else { 1.0 };
            camera.rotate(
                -self.pending_dx * self.mouse_sensitivity,
                pitch_sign * self.pending_dy * self.mouse_sensitivity,
            );
        }

        self.pending_dx = 0.0;
        self.pending_dy = 0.0;

        camera.position()
    }

    /// Check if any movement keys are pressed
    pub fn is_moving(&self) -> bool {
        self.forward || self.backward || self.left || self.right
    }

    /// Release every key, e.g. after focus loss
    pub fn reset(&mut self) {
        self.forward = false;
        self.backward = false;
        self.left = false;
        self.right = false;
        self.sprint = false;
        self.pending_dx = 0.0;
        self.pending_dy = 0.0;
    }

    /// Builder: set velocity in units per second
    pub fn with_velocity(mut self, velocity: f32) -> Self {
        self.velocity = velocity;
        self
    }

    /// Builder: set sprint speed multiplier
    pub fn with_sprint_multiplier(mut self, multiplier: f32) -> Self {
        self.sprint_multiplier = multiplier;
        self
    }

    /// Builder: set mouse sensitivity in degrees per pixel
    pub fn with_mouse_sensitivity(mut self, sensitivity: f32) -> Self {
        self.mouse_sensitivity = sensitivity;
        self
    }

    /// Builder: invert vertical mouse look
    pub fn with_invert_y(mut self, invert: bool) -> Self {
        self.invert_y = invert;
        self
    }
}

/// Camera operations used by [`FreeFlyController`]
pub trait CameraControl {
    /// Move along the view direction
    fn move_forward(&mut self, distance: f32);
    /// Move sideways in the horizontal plane; positive is right
    fn strafe(&mut self, distance: f32);
    /// Turn by degrees; pitch stays within [-90, 90]
    fn rotate(&mut self, delta_yaw: f32, delta_pitch: f32);
    fn position(&self) -> [f32; 3];
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    fn approx(a: [f32; 3], b: [f32; 3]) -> bool {
        a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < EPS)
    }

    #[test]
    fn test_forward_moves_down_negative_z() {
        let mut camera = FreeFlyCamera::default();
        let mut controller = FreeFlyController::new();
        controller.process_keyboard(KeyCode::KeyW, ElementState::Pressed);
        let pos = controller.update(&mut camera, 1.0, false);
        assert!(approx(pos, [0.0, 0.0, -10.0]), "{:?}", pos);
    }

    #[test]
    fn test_forward_follows_pitch() {
        let mut camera = FreeFlyCamera::new([0.0; 3], 90.0, 0.0);
        camera.move_forward(2.0);
        assert!(approx(camera.position, [0.0, 2.0, 0.0]), "{:?}", camera.position);
    }

    #[test]
    fn test_strafe_is_horizontal() {
        let mut camera = FreeFlyCamera::new([0.0; 3], 45.0, 0.0);
        camera.strafe(3.0);
        assert!(approx(camera.position, [3.0, 0.0, 0.0]), "{:?}", camera.position);
    }

    #[test]
    fn test_left_strafe_after_yaw() {
        let mut camera = FreeFlyCamera::new([0.0; 3], 0.0, 90.0);
        let mut controller = FreeFlyController::new();
        controller.process_keyboard(KeyCode::KeyA, ElementState::Pressed);
        controller.update(&mut camera, 0.5, false);
        // Facing -X, left is +Z
        assert!(approx(camera.position, [0.0, 0.0, 5.0]), "{:?}", camera.position);
    }

    #[test]
    fn test_sprint_multiplies_speed() {
        let mut camera = FreeFlyCamera::default();
        let mut controller = FreeFlyController::new();
        controller.process_keyboard(KeyCode::KeyS, ElementState::Pressed);
        controller.process_keyboard(KeyCode::ShiftLeft, ElementState::Pressed);
        controller.update(&mut camera, 0.1, false);
        assert!(approx(camera.position, [0.0, 0.0, 5.0]), "{:?}", camera.position);
    }

    #[test]
    fn test_mouse_look_needs_capture() {
        let mut camera = FreeFlyCamera::default();
        let mut controller = FreeFlyController::new();
        controller.process_mouse_motion(100.0, 0.0);
        controller.update(&mut camera, 0.016, false);
        assert_eq!(camera.ry, 0.0);

        controller.process_mouse_motion(100.0, 50.0);
        controller.update(&mut camera, 0.016, true);
        assert!((camera.ry + 30.0).abs() < EPS);
        assert!((camera.rx - 15.0).abs() < EPS);
    }

    #[test]
    fn test_mouse_up_pitches_down() {
        let mut camera = FreeFlyCamera::default();
        let mut controller = FreeFlyController::new();
        controller.process_mouse_motion(0.0, -10.0);
        controller.update(&mut camera, 0.016, true);
        assert!((camera.rx + 3.0).abs() < EPS, "{}", camera.rx);
    }

    #[test]
    fn test_invert_y() {
        let mut camera = FreeFlyCamera::default();
        let mut controller = FreeFlyController::new().with_invert_y(true);
        controller.process_mouse_motion(0.0, 10.0);
        controller.update(&mut camera, 0.016, true);
        assert!((camera.rx + 3.0).abs() < EPS);
    }

    #[test]
    fn test_pitch_is_clamped() {
        let mut camera = FreeFlyCamera::default();
        camera.rotate(0.0, 500.0);
        assert_eq!(camera.rx, 90.0);
        camera.rotate(0.0, -1000.0);
        assert_eq!(camera.rx, -90.0);
    }

    #[test]
    fn test_release_stops_movement() {
        let mut controller = FreeFlyController::new();
        controller.process_keyboard(KeyCode::KeyD, ElementState::Pressed);
        assert!(controller.is_moving());
        controller.process_keyboard(KeyCode::KeyD, ElementState::Released);
        assert!(!controller.is_moving());
    }

    #[test]
    fn test_reset_clears_keys() {
        let mut controller = FreeFlyController::new();
        controller.process_keyboard(KeyCode::KeyW, ElementState::Pressed);
        controller.reset();
        assert!(!controller.is_moving());
    }

    #[test]
    fn test_other_keys_ignored() {
        let mut controller = FreeFlyController::new();
        assert!(!controller.process_keyboard(KeyCode::F1, ElementState::Pressed));
        assert!(!controller.process_keyboard(KeyCode::ShiftRight, ElementState::Pressed));
    }

    #[test]
    fn test_builders() {
        let controller = FreeFlyController::new()
            .with_velocity(4.0)
            .with_sprint_multiplier(2.0)
            .with_mouse_sensitivity(0.1);
        assert_eq!(controller.velocity, 4.0);
        assert_eq!(controller.sprint_multiplier, 2.0);
        assert_eq!(controller.mouse_sensitivity, 0.1);
    }

    #[test]
    fn test_camera_transform() {
        let camera = FreeFlyCamera::new([5.0, 3.0, 19.0], 7.0, 15.0);
        let t = camera.transform();
        assert_eq!(t.translation, [5.0, 3.0, 19.0]);
        assert_eq!(t.rotation, [7.0, 15.0, 0.0]);
        assert_eq!(t.scale, [1.0, 1.0, 1.0]);
    }
}
