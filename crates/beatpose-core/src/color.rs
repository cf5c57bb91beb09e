//! Motion-driven color mode and the two-tone sphere palette.
//!
//! `color_mode` is a scalar in \[0, 1\] summarizing recent motion. Motion
//! events raise it in small capped steps; a fixed-cadence tick lowers it once
//! the scene has been idle long enough. The palette is a sweep rather than a
//! cross-fade: the first `floor(color_mode * count)` spheres show their
//! original hue and the rest show their alternate shade.

use crate::error::{CoreError, Result};
use crate::params::{MotionParams, PaletteParams};
use rand::Rng;

/// sRGB color with channels in \[0, 1\].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Hue, saturation and lightness all in \[0, 1\].
    pub fn from_hsl(h: f32, s: f32, l: f32) -> Self {
        if s <= 0.0 {
            return Self::new(l, l, l);
        }
        let h = h.rem_euclid(1.0);
        let q = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        Self::new(
            hue_to_channel(p, q, h + 1.0 / 3.0),
            hue_to_channel(p, q, h),
            hue_to_channel(p, q, h - 1.0 / 3.0),
        )
    }

    /// Parse `#rrggbb` (the leading `#` is optional).
    pub fn from_hex(src: &str) -> Result<Self> {
        let digits = src.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(CoreError::InvalidColor(src.to_string()));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map(|v| v as f32 / 255.0)
                .map_err(|_| CoreError::InvalidColor(src.to_string()))
        };
        Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    #[inline]
    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

fn hue_to_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * 6.0 * (2.0 / 3.0 - t)
    } else {
        p
    }
}

/// Which of an element's two colors is displayed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaletteChoice {
    Original,
    Alternate,
}

/// Per-sphere color pairs.
#[derive(Clone, Debug, Default)]
pub struct Palette {
    original: Vec<Rgb>,
    alternate: Vec<Rgb>,
}

impl Palette {
    /// Build colors for `count` spheres. Sphere `i` carries band `i + 1`, so its
    /// original hue is `(i + 1) / (count + 1)`. Alternate shades are drawn at
    /// random with no two neighbours sharing a shade.
    pub fn generate<R: Rng>(count: usize, params: &PaletteParams, rng: &mut R) -> Result<Self> {
        let shades = params
            .alternate_shades
            .iter()
            .map(|s| Rgb::from_hex(s))
            .collect::<Result<Vec<_>>>()?;
        if shades.is_empty() {
            return Err(CoreError::InvalidParam {
                name: "palette.alternate_shades",
                reason: "at least one shade is required".to_string(),
            });
        }
        let bands = (count + 1) as f32;
        let original = (0..count)
            .map(|i| Rgb::from_hsl((i + 1) as f32 / bands, params.saturation, params.lightness))
            .collect();

        let mut alternate = Vec::with_capacity(count);
        let mut last_pick = None;
        for _ in 0..count {
            let mut pick = rng.gen_range(0..shades.len());
            if shades.len() > 1 {
                while Some(pick) == last_pick {
                    pick = rng.gen_range(0..shades.len());
                }
            }
            last_pick = Some(pick);
            alternate.push(shades[pick]);
        }
        Ok(Self { original, alternate })
    }

    pub fn len(&self) -> usize {
        self.original.len()
    }

    pub fn is_empty(&self) -> bool {
        self.original.is_empty()
    }

    pub fn original(&self, index: usize) -> Option<Rgb> {
        self.original.get(index).copied()
    }

    pub fn alternate(&self, index: usize) -> Option<Rgb> {
        self.alternate.get(index).copied()
    }

    pub fn color(&self, index: usize, choice: PaletteChoice) -> Option<Rgb> {
        match choice {
            PaletteChoice::Original => self.original(index),
            PaletteChoice::Alternate => self.alternate(index),
        }
    }
}

/// Owned color-mode state. All mutation goes through [`on_motion_event`] and
/// [`tick`]; time is passed in explicitly so tests can drive it.
///
/// [`on_motion_event`]: ColorModeController::on_motion_event
/// [`tick`]: ColorModeController::tick
#[derive(Clone, Debug)]
pub struct ColorModeController {
    color_mode: f32,
    last_motion_ms: f64,
    motion: MotionParams,
    idle_window_ms: f64,
    decay_step: f32,
    emissive_base: f32,
    emissive_span: f32,
}

impl ColorModeController {
    /// Starts at rest with the idle timer running from `now_ms`.
    pub fn new(motion: &MotionParams, palette: &PaletteParams, now_ms: f64) -> Self {
        Self {
            color_mode: 0.0,
            last_motion_ms: now_ms,
            motion: motion.clone(),
            idle_window_ms: palette.idle_window_ms,
            decay_step: palette.decay_step,
            emissive_base: palette.emissive_base,
            emissive_span: palette.emissive_span,
        }
    }

    pub fn color_mode(&self) -> f32 {
        self.color_mode
    }

    pub fn last_motion_ms(&self) -> f64 {
        self.last_motion_ms
    }

    pub fn threshold(&self) -> f32 {
        self.motion.threshold
    }

    /// Apply a qualifying motion event and return the applied increment.
    ///
    /// The increment is `min(|v| * gain, step_max)`, so any velocity at or
    /// above `step_max / gain` moves the state by the full cap. Non-finite
    /// velocities are ignored.
    pub fn on_motion_event(&mut self, velocity: f32, now_ms: f64) -> f32 {
        if !velocity.is_finite() {
            return 0.0;
        }
        let increment = (velocity.abs() * self.motion.gain).min(self.motion.step_max);
        let before = self.color_mode;
        self.color_mode = (self.color_mode + increment).clamp(0.0, 1.0);
        self.last_motion_ms = now_ms;
        self.color_mode - before
    }

    /// Fixed-cadence decay. Returns `true` when the idle window has passed and
    /// a decay step was taken (even if the state was already at 0).
    pub fn tick(&mut self, now_ms: f64) -> bool {
        if now_ms - self.last_motion_ms > self.idle_window_ms {
            self.color_mode = (self.color_mode - self.decay_step).max(0.0);
            true
        } else {
            false
        }
    }

    /// Number of leading elements that show their original color.
    pub fn switch_index(&self, count: usize) -> usize {
        ((self.color_mode * count as f32).floor() as usize).min(count)
    }

    pub fn palette_choice(&self, index: usize, count: usize) -> PaletteChoice {
        if index < self.switch_index(count) {
            PaletteChoice::Original
        } else {
            PaletteChoice::Alternate
        }
    }

    /// Full assignment for `count` elements.
    pub fn current_palette(&self, count: usize) -> Vec<PaletteChoice> {
        (0..count).map(|i| self.palette_choice(i, count)).collect()
    }

    /// Glow the lead materials ease toward.
    pub fn target_emissive(&self) -> f32 {
        self.emissive_base + self.emissive_span * self.color_mode
    }
}
