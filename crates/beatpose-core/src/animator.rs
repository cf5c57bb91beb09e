//! Per-element bounce animation.
//!
//! Each element eases toward targets derived from its band energy with a
//! first-order exponential filter: `current += (target - current) * easing`.
//! With easing `α` the remaining distance shrinks by `(1 - α)` per frame.

use crate::color::Rgb;
use crate::params::BounceParams;
use glam::Vec3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ElementKind {
    /// The head model bound to band 0. Also eases depth and carries emissive glow.
    Lead,
    Sphere,
}

/// Targets derived from one band value. Recomputed every frame, never stored.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BandTargets {
    pub jump: f32,
    pub y: f32,
    pub scale: f32,
    /// Depth target, lead only.
    pub z: Option<f32>,
}

/// Displayed state of one element. Owned by the core; renderers only read it.
#[derive(Clone, Debug)]
pub struct VisualElement {
    pub kind: ElementKind,
    pub band: usize,
    /// Position in the sphere palette, `None` for the lead.
    pub palette_index: Option<usize>,
    pub position: Vec3,
    pub scale: f32,
    pub base_scale: f32,
    pub color: Rgb,
    pub emissive: Option<f32>,
}

impl VisualElement {
    pub fn is_lead(&self) -> bool {
        self.kind == ElementKind::Lead
    }
}

pub struct BandAnimator {
    params: BounceParams,
}

impl BandAnimator {
    pub fn new(params: &BounceParams) -> Self {
        Self {
            params: params.clone(),
        }
    }

    pub fn params(&self) -> &BounceParams {
        &self.params
    }

    /// One easing step of height and scale.
    #[inline]
    pub fn step(element: &mut VisualElement, target_y: f32, target_scale: f32, easing: f32) {
        element.position.y += (target_y - element.position.y) * easing;
        element.scale += (target_scale - element.scale) * easing;
    }

    #[inline]
    pub fn step_depth(element: &mut VisualElement, target_z: f32, easing: f32) {
        element.position.z += (target_z - element.position.z) * easing;
    }

    #[inline]
    pub fn ease_emissive(element: &mut VisualElement, target: f32, easing: f32) {
        if let Some(e) = element.emissive.as_mut() {
            *e += (target - *e) * easing;
        }
    }

    /// Targets for a band energy, `None` when the value is not finite.
    pub fn targets_for(
        &self,
        kind: ElementKind,
        base_scale: f32,
        value: f32,
    ) -> Option<BandTargets> {
        if !value.is_finite() {
            return None;
        }
        let p = &self.params;
        let jump = (value * p.jump_gain).clamp(0.0, p.jump_max);
        Some(BandTargets {
            jump,
            y: p.base_y + jump,
            scale: base_scale + jump * p.scale_per_jump,
            z: match kind {
                ElementKind::Lead => Some(p.lead_base_z - jump * p.depth_per_jump),
                ElementKind::Sphere => None,
            },
        })
    }

    /// Derive this frame's targets from `value` and take one easing step.
    ///
    /// A missing or non-finite value leaves the element untouched for this
    /// frame; the returned targets are `None` then.
    pub fn apply(&self, element: &mut VisualElement, value: Option<f32>) -> Option<BandTargets> {
        let targets = self.targets_for(element.kind, element.base_scale, value?)?;
        Self::step(element, targets.y, targets.scale, self.params.easing);
        if let Some(z) = targets.z {
            Self::step_depth(element, z, self.params.depth_easing);
        }
        Some(targets)
    }
}
