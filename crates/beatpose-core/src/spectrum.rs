//! Precomputed spectrum data and the hold-last-value sampler.
//!
//! The spectrum is loaded once from a JSON document of the form
//! `[{ "t": 0.0, "bands": [0.1, 0.3, ...] }, ...]` and never mutated after.

use crate::error::{CoreError, Result};
use serde::{Deserialize, Deserializer};

/// One row of the precomputed analysis: per-band energies at time `t` (seconds).
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SpectrumFrame {
    pub t: f64,
    #[serde(deserialize_with = "bands_with_gaps")]
    pub bands: Vec<f32>,
}

impl SpectrumFrame {
    pub fn new(t: f64, bands: Vec<f32>) -> Self {
        Self { t, bands }
    }

    /// Energy of `band`, or `None` when the frame has no such band.
    #[inline]
    pub fn band(&self, band: usize) -> Option<f32> {
        self.bands.get(band).copied()
    }
}

// `null` entries mark missing analysis values; keep them as NaN so the
// animator can skip them per element.
fn bands_with_gaps<'de, D>(de: D) -> std::result::Result<Vec<f32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Vec<Option<f32>> = Vec::deserialize(de)?;
    Ok(raw.into_iter().map(|v| v.unwrap_or(f32::NAN)).collect())
}

/// Lookup of the frame that applies at a playback position.
pub trait SpectrumSampler {
    fn sample(&self, t: f64) -> Option<&SpectrumFrame>;
}

/// Ascending-by-time sequence of spectrum frames.
#[derive(Clone, Debug, Default)]
pub struct Spectrum {
    frames: Vec<SpectrumFrame>,
}

impl Spectrum {
    /// The spectrum used when no data could be loaded; every sample is `None`.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_json(src: &str) -> Result<Self> {
        let frames: Vec<SpectrumFrame> = serde_json::from_str(src)?;
        Self::from_frames(frames)
    }

    pub fn from_frames(mut frames: Vec<SpectrumFrame>) -> Result<Self> {
        if let Some(index) = frames.iter().position(|f| !f.t.is_finite()) {
            return Err(CoreError::NonFiniteTimestamp { index });
        }
        if frames.windows(2).any(|w| w[1].t < w[0].t) {
            log::warn!(
                "[spectrum] frames out of order, sorting {} frames by time",
                frames.len()
            );
            frames.sort_by(|a, b| a.t.total_cmp(&b.t));
        }
        log::info!(
            "[spectrum] loaded frames={} duration={:.2}s",
            frames.len(),
            frames.last().map_or(0.0, |f| f.t)
        );
        Ok(Self { frames })
    }

    pub fn frames(&self) -> &[SpectrumFrame] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Timestamp of the last frame, 0 for an empty spectrum.
    pub fn duration(&self) -> f64 {
        self.frames.last().map_or(0.0, |f| f.t)
    }

    /// Last frame with `frame.t <= t`, or the first frame when `t` precedes
    /// all of them. `None` only when the spectrum is empty.
    pub fn sample(&self, t: f64) -> Option<&SpectrumFrame> {
        let after = self.frames.partition_point(|f| f.t <= t);
        self.frames.get(after.saturating_sub(1))
    }
}

impl SpectrumSampler for Spectrum {
    fn sample(&self, t: f64) -> Option<&SpectrumFrame> {
        Spectrum::sample(self, t)
    }
}
