//! Per-frame driver: spectrum sample → bounce targets → palette → emissive →
//! snapshot → render, in that order, so a renderer never sees a partial frame.

use crate::animator::{BandAnimator, VisualElement};
use crate::color::{ColorModeController, Palette};
use crate::layout::SceneLayout;
use crate::params::ReactiveParams;
use crate::spectrum::{Spectrum, SpectrumSampler};
use std::cell::Cell;

/// Render-facing view of one element, laid out for direct upload.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ElementInstance {
    pub position: [f32; 3],
    pub scale: f32,
    pub color: [f32; 3],
    /// Emissive intensity of the lead materials; 0 for spheres.
    pub emissive: f32,
}

impl ElementInstance {
    pub const FLOATS: usize = std::mem::size_of::<Self>() / std::mem::size_of::<f32>();

    fn from_element(e: &VisualElement) -> Self {
        Self {
            position: e.position.to_array(),
            scale: e.scale,
            color: e.color.to_array(),
            emissive: e.emissive.unwrap_or(0.0),
        }
    }
}

/// Everything the render collaborator reads after a frame step.
#[derive(Clone, Debug, Default)]
pub struct FrameSnapshot {
    pub frame_index: u64,
    pub audio_time: f64,
    pub color_mode: f32,
    pub switch_index: usize,
    /// Lead first, then spheres in band order.
    pub elements: Vec<ElementInstance>,
}

impl FrameSnapshot {
    pub fn lead(&self) -> Option<&ElementInstance> {
        self.elements.first()
    }

    pub fn spheres(&self) -> &[ElementInstance] {
        self.elements.get(1..).unwrap_or_default()
    }

    /// Flat `[x, y, z, scale, r, g, b, emissive]` records.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.elements)
    }
}

/// The render collaborator. Called once per frame with the finished snapshot.
pub trait RenderSink {
    fn render(&mut self, frame: &FrameSnapshot);
}

impl<F> RenderSink for F
where
    F: FnMut(&FrameSnapshot),
{
    fn render(&mut self, frame: &FrameSnapshot) {
        self(frame)
    }
}

/// Records each frame's color mode in `latest`, then hands the frame on.
/// Lets callers read the current mode while the core itself is borrowed.
pub struct ColorModeTap<'a, R: RenderSink + ?Sized> {
    pub latest: &'a Cell<f32>,
    pub inner: &'a mut R,
}

impl<R: RenderSink + ?Sized> RenderSink for ColorModeTap<'_, R> {
    fn render(&mut self, frame: &FrameSnapshot) {
        self.latest.set(frame.color_mode);
        self.inner.render(frame);
    }
}

/// Discards frames; for headless runs.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl RenderSink for NullSink {
    fn render(&mut self, _frame: &FrameSnapshot) {}
}

pub struct FrameScheduler<S: SpectrumSampler = Spectrum> {
    sampler: S,
    animator: BandAnimator,
    palette: Palette,
    elements: Vec<VisualElement>,
    emissive_easing: f32,
    frame_index: u64,
    last_switch_index: usize,
    snapshot: FrameSnapshot,
}

impl<S: SpectrumSampler> FrameScheduler<S> {
    pub fn new(sampler: S, params: &ReactiveParams, palette: Palette) -> Self {
        let elements = SceneLayout::build(&params.bounce, &params.palette, &palette);
        let snapshot = FrameSnapshot {
            elements: elements.iter().map(ElementInstance::from_element).collect(),
            ..Default::default()
        };
        Self {
            sampler,
            animator: BandAnimator::new(&params.bounce),
            palette,
            elements,
            emissive_easing: params.palette.emissive_easing,
            frame_index: 0,
            last_switch_index: 0,
            snapshot,
        }
    }

    pub fn elements(&self) -> &[VisualElement] {
        &self.elements
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn sampler(&self) -> &S {
        &self.sampler
    }

    /// Latest snapshot (the initial layout before the first frame).
    pub fn snapshot(&self) -> &FrameSnapshot {
        &self.snapshot
    }

    /// Run one display frame at playback position `audio_time` (seconds).
    ///
    /// Without spectrum data every element eases to rest at zero energy. An
    /// element whose band is missing or not finite skips this frame's step.
    pub fn frame<R: RenderSink + ?Sized>(
        &mut self,
        audio_time: f64,
        controller: &ColorModeController,
        sink: &mut R,
    ) -> &FrameSnapshot {
        let audio_time = if audio_time.is_finite() { audio_time } else { 0.0 };

        let sample = self.sampler.sample(audio_time);
        for element in self.elements.iter_mut() {
            let value = match sample {
                Some(frame) => frame.band(element.band),
                None => Some(0.0),
            };
            self.animator.apply(element, value);
        }

        self.apply_palette(controller);

        let target_emissive = controller.target_emissive();
        for element in self.elements.iter_mut().filter(|e| e.is_lead()) {
            BandAnimator::ease_emissive(element, target_emissive, self.emissive_easing);
        }

        self.frame_index += 1;
        self.snapshot.frame_index = self.frame_index;
        self.snapshot.audio_time = audio_time;
        self.snapshot.color_mode = controller.color_mode();
        self.snapshot.switch_index = self.last_switch_index;
        self.snapshot.elements.clear();
        self.snapshot
            .elements
            .extend(self.elements.iter().map(ElementInstance::from_element));

        sink.render(&self.snapshot);
        &self.snapshot
    }

    /// Assign each sphere its original or alternate color. Instantaneous, not eased.
    pub fn apply_palette(&mut self, controller: &ColorModeController) {
        let count = self.palette.len();
        let switch_index = controller.switch_index(count);
        if switch_index != self.last_switch_index {
            log::debug!(
                "[palette] switch index {} -> {} (color_mode={:.2})",
                self.last_switch_index,
                switch_index,
                controller.color_mode()
            );
            self.last_switch_index = switch_index;
        }
        for element in self.elements.iter_mut() {
            let Some(index) = element.palette_index else {
                continue;
            };
            let choice = controller.palette_choice(index, count);
            if let Some(color) = self.palette.color(index, choice) {
                element.color = color;
            }
        }
    }
}
