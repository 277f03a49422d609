use crate::Easing;

/// Tuning for [`crate::ScrollCoordinator`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollOptions {
    /// Samples closer than this to the window's current offset are dropped as duplicates.
    ///
    /// Measured in the same units as scroll offsets (pixels for most hosts), not as a normalized
    /// position.
    pub epsilon: f32,
    pub smooth_duration_ms: u64,
    pub easing: Easing,
}

impl ScrollOptions {
    pub fn new() -> Self {
        Self {
            epsilon: 0.5,
            smooth_duration_ms: 300,
            easing: Easing::EaseOutQuad,
        }
    }

    pub fn with_epsilon(mut self, epsilon: f32) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_smooth_duration_ms(mut self, duration_ms: u64) -> Self {
        self.smooth_duration_ms = duration_ms;
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }
}

impl Default for ScrollOptions {
    fn default() -> Self {
        Self::new()
    }
}
