//! Screen space overlay geometry

/// Logo quad in the top right corner for a viewport of the given aspect
///
/// Overlay x runs from 0 to `aspect` and y from 0 (top) to 1; each vertex is
/// (x, y, u, v).
pub fn logo_quad(aspect: f32) -> [f32; 16] {
    let right = aspect;
    let left = aspect - 0.4;
    [
        left, 0.8, 0.0, 1.0, //
        left, 1.0, 0.0, 0.0, //
        right, 1.0, 1.0, 0.0, //
        right, 0.8, 1.0, 1.0,
    ]
}

/// Viewport aspect ratio, treating a zero height as 1
pub fn viewport_aspect(width: i32, height: i32) -> f32 {
    width as f32 / height.max(1) as f32
}
