use crate::animator::{ElementKind, VisualElement};
use crate::color::{Palette, Rgb};
use crate::constants::*;
use crate::params::{BounceParams, PaletteParams};
use glam::Vec3;

// The lead keeps its model's own colors; renderers multiply by this tint.
const LEAD_TINT: Rgb = Rgb::new(1.0, 1.0, 1.0);

/// Initial placement of the lead and the sphere row.
///
/// Spheres sit on a diagonal that recedes from the camera, the lead stands at
/// the front-left end of the row. Only `y`, `z` (lead) and scale animate; `x`
/// stays where the layout puts it.
pub struct SceneLayout;

impl SceneLayout {
    pub fn lead_position(params: &BounceParams) -> Vec3 {
        let center = (params.num_bands as f32 - 1.0) / 2.0;
        Vec3::new(-center * SPHERE_SPACING + LEAD_X_OFFSET, params.base_y, LEAD_START_Z)
    }

    pub fn sphere_position(params: &BounceParams, band: usize) -> Vec3 {
        let center = (params.num_bands as f32 - 1.0) / 2.0;
        let i = band as f32;
        Vec3::new(
            (i - center) * SPHERE_SPACING + SPHERE_X_OFFSET,
            params.base_y,
            SPHERE_Z_STEP * i + SPHERE_Z_OFFSET,
        )
    }

    /// Lead first (band 0), then one sphere per remaining band. Spheres start
    /// on their alternate color, matching a color mode of 0.
    pub fn build(
        bounce: &BounceParams,
        palette_params: &PaletteParams,
        palette: &Palette,
    ) -> Vec<VisualElement> {
        let mut elements = Vec::with_capacity(bounce.num_bands);

        elements.push(VisualElement {
            kind: ElementKind::Lead,
            band: 0,
            palette_index: None,
            position: Self::lead_position(bounce),
            scale: LEAD_START_SCALE,
            base_scale: bounce.lead_base_scale,
            color: LEAD_TINT,
            emissive: Some(palette_params.emissive_base),
        });

        for band in 1..bounce.num_bands {
            let index = band - 1;
            elements.push(VisualElement {
                kind: ElementKind::Sphere,
                band,
                palette_index: Some(index),
                position: Self::sphere_position(bounce, band),
                scale: 1.0,
                base_scale: 1.0,
                color: palette.alternate(index).unwrap_or_default(),
                emissive: None,
            });
        }
        elements
    }
}
