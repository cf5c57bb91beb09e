//! Single-threaded event loop fusing the three input sources.
//!
//! Render frames, pose results and decay ticks arrive as [`InputEvent`]s and
//! are stamped with the clock on arrival (decay ticks with their due time). [`ReactiveCore::process`] applies
//! them strictly in arrival order, so there is no shared mutable state
//! between callbacks, only this queue.

use crate::clock::{AudioClock, Clock, RecurringTask, SystemClock};
use crate::color::{ColorModeController, Palette};
use crate::error::Result;
use crate::motion::{exceeds_threshold, MotionSignalDetector};
use crate::params::ReactiveParams;
use crate::scheduler::{FrameScheduler, FrameSnapshot, RenderSink};
use crate::spectrum::{Spectrum, SpectrumSampler};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::VecDeque;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    /// Display refresh at the given audio playback position (seconds).
    Frame { audio_time: f64 },
    /// Pose result; `None` when no landmark was tracked in this callback.
    Pose { y: Option<f32> },
    /// Fixed-cadence idle decay.
    DecayTick,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StampedEvent {
    pub at_ms: f64,
    pub event: InputEvent,
}

/// FIFO of stamped input events.
#[derive(Clone, Debug, Default)]
pub struct EventQueue {
    events: VecDeque<StampedEvent>,
}

impl EventQueue {
    pub fn push(&mut self, at_ms: f64, event: InputEvent) {
        self.events.push_back(StampedEvent { at_ms, event });
    }

    pub fn pop(&mut self) -> Option<StampedEvent> {
        self.events.pop_front()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Counters for diagnostics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CoreStats {
    pub frames: u64,
    pub pose_samples: u64,
    pub tracking_lost: u64,
    pub motion_events: u64,
    pub decay_ticks: u64,
}

pub struct ReactiveCore<C: Clock = SystemClock, S: SpectrumSampler = Spectrum> {
    clock: C,
    detector: MotionSignalDetector,
    controller: ColorModeController,
    scheduler: FrameScheduler<S>,
    decay: RecurringTask,
    queue: EventQueue,
    stats: CoreStats,
}

impl<C: Clock, S: SpectrumSampler> ReactiveCore<C, S> {
    /// `seed` fixes the alternate palette so runs are reproducible.
    pub fn new(sampler: S, params: &ReactiveParams, seed: u64, clock: C) -> Result<Self> {
        params.validate()?;
        let mut rng = StdRng::seed_from_u64(seed);
        let sphere_count = params.bounce.num_bands - 1;
        let palette = Palette::generate(sphere_count, &params.palette, &mut rng)?;
        let now = clock.now_ms();
        log::info!(
            "[core] elements={} decay_period={}ms idle_window={}ms seed={}",
            params.bounce.num_bands,
            params.palette.decay_period_ms,
            params.palette.idle_window_ms,
            seed
        );
        Ok(Self {
            detector: MotionSignalDetector::new(),
            controller: ColorModeController::new(&params.motion, &params.palette, now),
            scheduler: FrameScheduler::new(sampler, params, palette),
            decay: RecurringTask::new(params.palette.decay_period_ms, now),
            queue: EventQueue::default(),
            stats: CoreStats::default(),
            clock,
        })
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn controller(&self) -> &ColorModeController {
        &self.controller
    }

    pub fn scheduler(&self) -> &FrameScheduler<S> {
        &self.scheduler
    }

    pub fn snapshot(&self) -> &FrameSnapshot {
        self.scheduler.snapshot()
    }

    pub fn color_mode(&self) -> f32 {
        self.controller.color_mode()
    }

    pub fn stats(&self) -> CoreStats {
        self.stats
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Stamp `event` with the current time and queue it.
    pub fn push(&mut self, event: InputEvent) {
        let now = self.clock.now_ms();
        self.queue.push(now, event);
    }

    pub fn push_frame(&mut self, audio: &impl AudioClock) {
        self.push(InputEvent::Frame {
            audio_time: audio.current_time(),
        });
    }

    pub fn push_pose(&mut self, y: Option<f32>) {
        self.push(InputEvent::Pose { y });
    }

    /// Queue one decay tick per period that has elapsed; returns how many.
    /// Each tick carries the time it fell due, not the time of the poll.
    pub fn poll_timers(&mut self) -> u32 {
        let now = self.clock.now_ms();
        let mut due = 0;
        for at_ms in self.decay.due_times(now) {
            self.queue.push(at_ms, InputEvent::DecayTick);
            due += 1;
        }
        due
    }

    /// Apply every queued event in arrival order. Returns the number handled.
    pub fn process<R: RenderSink + ?Sized>(&mut self, sink: &mut R) -> usize {
        let mut handled = 0;
        while let Some(StampedEvent { at_ms, event }) = self.queue.pop() {
            self.handle(at_ms, event, sink);
            handled += 1;
        }
        handled
    }

    fn handle<R: RenderSink + ?Sized>(&mut self, at_ms: f64, event: InputEvent, sink: &mut R) {
        match event {
            InputEvent::Frame { audio_time } => {
                self.stats.frames += 1;
                self.scheduler.frame(audio_time, &self.controller, sink);
            }
            InputEvent::Pose { y: Some(y) } if y.is_finite() => {
                self.stats.pose_samples += 1;
                let Some(velocity) = self.detector.observe(y, at_ms) else {
                    return;
                };
                if exceeds_threshold(velocity, self.controller.threshold()) {
                    let applied = self.controller.on_motion_event(velocity, at_ms);
                    self.stats.motion_events += 1;
                    log::debug!(
                        "[motion] vy={:.3} +{:.3} color_mode={:.2}",
                        velocity,
                        applied,
                        self.controller.color_mode()
                    );
                }
            }
            InputEvent::Pose { .. } => {
                // Tracking lost: hold state, keep the baseline for the next hit.
                self.stats.tracking_lost += 1;
            }
            InputEvent::DecayTick => {
                self.stats.decay_ticks += 1;
                let before = self.controller.color_mode();
                if self.controller.tick(at_ms) && before > 0.0 {
                    log::trace!(
                        "[decay] color_mode {:.2} -> {:.2}",
                        before,
                        self.controller.color_mode()
                    );
                }
            }
        }
    }
}
