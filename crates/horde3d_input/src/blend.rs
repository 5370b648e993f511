//! Blend weight between two animation stages

/// Weight of the first stage in [0, 1]; the second gets the remainder
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlendControl {
    weight: f32,
    /// Change per second while a key is held
    pub rate: f32,
}

impl Default for BlendControl {
    fn default() -> Self {
        Self::new()
    }
}

impl BlendControl {
    pub fn new() -> Self {
        Self {
            weight: 1.0,
            rate: 2.0,
        }
    }

    pub fn with_rate(mut self, rate: f32) -> Self {
        self.rate = rate;
        self
    }

    pub fn with_weight(mut self, weight: f32) -> Self {
        self.weight = weight.clamp(0.0, 1.0);
        self
    }

    pub fn weight(&self) -> f32 {
        self.weight
    }

    /// Raise and/or lower the weight for a frame of `dt` seconds
    pub fn update(&mut self, raise: bool, lower: bool, dt: f32) {
        let direction = (raise as i32 - lower as i32) as f32;
        self.weight = (self.weight + direction * self.rate * dt).clamp(0.0, 1.0);
    }

    /// Weights for stage 0 and stage 1
    pub fn stage_weights(&self) -> (f32, f32) {
        (self.weight, 1.0 - self.weight)
    }
}
