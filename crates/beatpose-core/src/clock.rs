//! Time sources and the fixed-cadence task used for idle decay.

use instant::Instant;
use std::cell::Cell;
use std::rc::Rc;

/// Monotonic wall-clock time in milliseconds.
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// Playback position of the audio track in seconds; 0 when nothing is playing.
pub trait AudioClock {
    fn current_time(&self) -> f64;
}

/// Milliseconds since construction, backed by `instant` so it also runs on wasm.
#[derive(Clone, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Hand-driven clock. Clones share the same time, so a test can keep one
/// handle and advance the clock owned by the core.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    pub fn new(start_ms: f64) -> Self {
        Self {
            now: Rc::new(Cell::new(start_ms)),
        }
    }

    pub fn set(&self, now_ms: f64) {
        self.now.set(now_ms);
    }

    pub fn advance(&self, delta_ms: f64) {
        self.now.set(self.now.get() + delta_ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}

/// No audio loaded.
#[derive(Clone, Copy, Debug, Default)]
pub struct SilentAudio;

impl AudioClock for SilentAudio {
    fn current_time(&self) -> f64 {
        0.0
    }
}

/// A recurring task on a fixed period, polled against an external clock.
#[derive(Clone, Debug)]
pub struct RecurringTask {
    period_ms: f64,
    next_due_ms: f64,
}

impl RecurringTask {
    /// First run is one period after `start_ms`.
    pub fn new(period_ms: f64, start_ms: f64) -> Self {
        Self {
            period_ms,
            next_due_ms: start_ms + period_ms,
        }
    }

    pub fn period_ms(&self) -> f64 {
        self.period_ms
    }

    pub fn next_due_ms(&self) -> f64 {
        self.next_due_ms
    }

    /// How many runs have come due by `now_ms`. Each period is reported once.
    pub fn due(&mut self, now_ms: f64) -> u32 {
        self.due_times(now_ms).count() as u32
    }

    /// The scheduled time of every run that has come due by `now_ms`, oldest
    /// first. A late poll yields the whole backlog at its original times.
    pub fn due_times(&mut self, now_ms: f64) -> impl Iterator<Item = f64> {
        let first = self.next_due_ms;
        let period = self.period_ms;
        let runs = if period.is_nan() || period <= 0.0 || now_ms < first {
            0
        } else {
            (((now_ms - first) / period).floor() as u32).saturating_add(1)
        };
        if runs > 0 {
            self.next_due_ms += runs as f64 * period;
        }
        (0..runs).map(move |k| first + k as f64 * period)
    }
}
