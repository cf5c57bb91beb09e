//! Simulated collaborators for a headless run: an audio track that loops at
//! the spectrum length and a tracked head that bobs in bursts.

use beatpose_core::{AudioClock, Clock, ManualClock};
use std::f64::consts::TAU;

/// Playback position derived from the session clock, wrapping at `duration_sec`.
pub struct LoopingAudio {
    clock: ManualClock,
    duration_sec: f64,
}

impl LoopingAudio {
    pub fn new(clock: ManualClock, duration_sec: f64) -> Self {
        Self {
            clock,
            duration_sec,
        }
    }
}

impl AudioClock for LoopingAudio {
    fn current_time(&self) -> f64 {
        if self.duration_sec <= 0.0 {
            return 0.0;
        }
        (self.clock.now_ms() / 1000.0).rem_euclid(self.duration_sec)
    }
}

// Dance for 4 s, stand still for 3 s.
const ACTIVE_SEC: f64 = 4.0;
const IDLE_SEC: f64 = 3.0;
const BOB_HZ: f64 = 1.5;
const BOB_AMPLITUDE: f64 = 0.08;
// Every Nth result drops the landmark, like a tracker losing the face briefly.
const LOST_EVERY: u64 = 37;

#[derive(Default)]
pub struct SyntheticPose {
    emitted: u64,
}

impl SyntheticPose {
    /// Normalized landmark height at `t_ms`, `None` on a dropped result.
    pub fn sample(&mut self, t_ms: f64) -> Option<f32> {
        self.emitted += 1;
        if self.emitted % LOST_EVERY == 0 {
            return None;
        }
        let t = t_ms / 1000.0;
        let phase = t.rem_euclid(ACTIVE_SEC + IDLE_SEC);
        let y = if phase < ACTIVE_SEC {
            0.5 + BOB_AMPLITUDE * (TAU * BOB_HZ * t).sin()
        } else {
            0.5
        };
        Some(y as f32)
    }
}
