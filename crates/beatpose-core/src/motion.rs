/// A tracked landmark's normalized vertical position at time `t_ms`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionSample {
    pub y: f32,
    pub t_ms: f64,
}

/// Vertical velocity from the two most recent landmark samples.
#[derive(Clone, Debug, Default)]
pub struct MotionSignalDetector {
    prev: Option<MotionSample>,
}

impl MotionSignalDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a sample and return the velocity (units per second) relative to
    /// the previous one. The first sample only sets the baseline.
    ///
    /// A sample that does not advance time replaces the baseline without
    /// emitting, since the velocity would be unbounded.
    pub fn observe(&mut self, y: f32, t_ms: f64) -> Option<f32> {
        let current = MotionSample { y, t_ms };
        let velocity = self.prev.and_then(|prev| {
            let dt_sec = (t_ms - prev.t_ms) / 1000.0;
            (dt_sec > 0.0).then(|| ((y - prev.y) as f64 / dt_sec) as f32)
        });
        self.prev = Some(current);
        velocity
    }

    pub fn previous(&self) -> Option<MotionSample> {
        self.prev
    }

    /// Forget the baseline so the next sample starts a fresh pair.
    pub fn reset(&mut self) {
        self.prev = None;
    }
}

/// Caller-side gate deciding whether a velocity counts as motion.
#[inline]
pub fn exceeds_threshold(velocity: f32, threshold: f32) -> bool {
    velocity.abs() > threshold
}
