//! Tunable parameters for the reactive core.
//!
//! Every field falls back to the matching value in [`crate::constants`], so a
//! config file only needs to name what it changes:
//!
//! ```toml
//! [motion]
//! threshold = 0.2
//!
//! [palette]
//! decay_step = 0.05
//! ```

use crate::constants::*;
use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};

/// Spectrum-to-bounce mapping and easing factors.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BounceParams {
    pub num_bands: usize,
    pub base_y: f32,
    pub jump_gain: f32,
    pub jump_max: f32,
    pub scale_per_jump: f32,
    pub easing: f32,
    pub depth_easing: f32,
    pub depth_per_jump: f32,
    pub lead_base_z: f32,
    pub lead_base_scale: f32,
}

impl Default for BounceParams {
    fn default() -> Self {
        Self {
            num_bands: NUM_BANDS,
            base_y: BASE_Y,
            jump_gain: JUMP_GAIN,
            jump_max: JUMP_MAX,
            scale_per_jump: SCALE_PER_JUMP,
            easing: BOUNCE_EASING,
            depth_easing: DEPTH_EASING,
            depth_per_jump: DEPTH_PER_JUMP,
            lead_base_z: LEAD_BASE_Z,
            lead_base_scale: LEAD_BASE_SCALE,
        }
    }
}

/// Motion gate and the color-mode increment policy.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionParams {
    pub threshold: f32,
    pub gain: f32,
    pub step_max: f32,
}

impl Default for MotionParams {
    fn default() -> Self {
        Self {
            threshold: MOTION_THRESHOLD,
            gain: MOTION_GAIN,
            step_max: MOTION_STEP_MAX,
        }
    }
}

/// Idle decay, emissive glow and palette sources.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteParams {
    pub idle_window_ms: f64,
    pub decay_period_ms: f64,
    pub decay_step: f32,
    pub emissive_base: f32,
    pub emissive_span: f32,
    pub emissive_easing: f32,
    pub saturation: f32,
    pub lightness: f32,
    pub alternate_shades: Vec<String>,
}

impl Default for PaletteParams {
    fn default() -> Self {
        Self {
            idle_window_ms: IDLE_WINDOW_MS,
            decay_period_ms: DECAY_PERIOD_MS,
            decay_step: DECAY_STEP,
            emissive_base: EMISSIVE_BASE,
            emissive_span: EMISSIVE_SPAN,
            emissive_easing: EMISSIVE_EASING,
            saturation: ORIGINAL_SATURATION,
            lightness: ORIGINAL_LIGHTNESS,
            alternate_shades: ALTERNATE_SHADES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// All tunables of the reactive core.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReactiveParams {
    pub bounce: BounceParams,
    pub motion: MotionParams,
    pub palette: PaletteParams,
}

impl ReactiveParams {
    /// Parse a (possibly partial) TOML document and validate the result.
    pub fn from_toml_str(src: &str) -> Result<Self> {
        let params: Self = toml::from_str(src)?;
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<()> {
        let b = &self.bounce;
        if b.num_bands < 2 {
            return Err(invalid(
                "bounce.num_bands",
                "need a lead band and at least one sphere",
            ));
        }
        check_easing("bounce.easing", b.easing)?;
        check_easing("bounce.depth_easing", b.depth_easing)?;
        check_non_negative("bounce.jump_gain", b.jump_gain)?;
        check_non_negative("bounce.jump_max", b.jump_max)?;
        check_non_negative("bounce.scale_per_jump", b.scale_per_jump)?;
        check_non_negative("bounce.depth_per_jump", b.depth_per_jump)?;
        check_non_negative("bounce.lead_base_scale", b.lead_base_scale)?;
        check_finite("bounce.base_y", b.base_y)?;
        check_finite("bounce.lead_base_z", b.lead_base_z)?;

        let m = &self.motion;
        check_non_negative("motion.threshold", m.threshold)?;
        check_non_negative("motion.gain", m.gain)?;
        check_non_negative("motion.step_max", m.step_max)?;

        let p = &self.palette;
        if !(p.decay_period_ms.is_finite() && p.decay_period_ms > 0.0) {
            return Err(invalid(
                "palette.decay_period_ms",
                "must be a positive number of milliseconds",
            ));
        }
        if !(p.idle_window_ms.is_finite() && p.idle_window_ms >= 0.0) {
            return Err(invalid(
                "palette.idle_window_ms",
                "must be a non-negative number of milliseconds",
            ));
        }
        check_non_negative("palette.decay_step", p.decay_step)?;
        check_easing("palette.emissive_easing", p.emissive_easing)?;
        check_non_negative("palette.emissive_base", p.emissive_base)?;
        check_non_negative("palette.emissive_span", p.emissive_span)?;
        check_unit("palette.saturation", p.saturation)?;
        check_unit("palette.lightness", p.lightness)?;
        if p.alternate_shades.is_empty() {
            return Err(invalid("palette.alternate_shades", "at least one shade is required"));
        }
        Ok(())
    }
}

fn invalid(name: &'static str, reason: &str) -> CoreError {
    CoreError::InvalidParam {
        name,
        reason: reason.to_string(),
    }
}

fn check_easing(name: &'static str, v: f32) -> Result<()> {
    if v.is_finite() && v > 0.0 && v <= 1.0 {
        Ok(())
    } else {
        Err(invalid(name, "easing factor must be in (0, 1]"))
    }
}

fn check_finite(name: &'static str, v: f32) -> Result<()> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(invalid(name, "must be a finite number"))
    }
}

fn check_unit(name: &'static str, v: f32) -> Result<()> {
    if (0.0..=1.0).contains(&v) {
        Ok(())
    } else {
        Err(invalid(name, "must be in [0, 1]"))
    }
}

fn check_non_negative(name: &'static str, v: f32) -> Result<()> {
    if v.is_finite() && v >= 0.0 {
        Ok(())
    } else {
        Err(invalid(name, "must be a finite, non-negative number"))
    }
}
