// Host-side tests for tunable parameters and their defaults.

use beatpose_core::{
    CoreError, ReactiveParams, ALTERNATE_SHADES, BASE_Y, DECAY_PERIOD_MS, IDLE_WINDOW_MS,
    JUMP_MAX, LEAD_BASE_SCALE, LEAD_START_SCALE, MOTION_STEP_MAX, MOTION_THRESHOLD, NUM_BANDS,
};

#[test]
fn defaults_are_valid() {
    let params = ReactiveParams::default();
    params.validate().unwrap();
    assert_eq!(params.bounce.num_bands, NUM_BANDS);
    assert_eq!(params.motion.threshold, MOTION_THRESHOLD);
    assert_eq!(params.palette.alternate_shades.len(), ALTERNATE_SHADES.len());
}

#[test]
fn empty_document_gives_defaults() {
    assert_eq!(ReactiveParams::from_toml_str("").unwrap(), ReactiveParams::default());
}

#[test]
fn partial_document_overrides_named_fields_only() {
    let params = ReactiveParams::from_toml_str(
        r##"
        [motion]
        threshold = 0.2

        [palette]
        decay_step = 0.05
        alternate_shades = ["#112233", "#445566"]
        "##,
    )
    .unwrap();
    assert_eq!(params.motion.threshold, 0.2);
    assert_eq!(params.motion.step_max, MOTION_STEP_MAX);
    assert_eq!(params.palette.decay_step, 0.05);
    assert_eq!(params.palette.decay_period_ms, DECAY_PERIOD_MS);
    assert_eq!(params.palette.alternate_shades.len(), 2);
    assert_eq!(params.bounce.base_y, BASE_Y);
}

#[test]
fn out_of_range_values_name_the_field() {
    let cases = [
        ("[bounce]\neasing = 0.0", "bounce.easing"),
        ("[bounce]\ndepth_easing = 1.5", "bounce.depth_easing"),
        ("[bounce]\nnum_bands = 1", "bounce.num_bands"),
        ("[motion]\ngain = -1.0", "motion.gain"),
        ("[palette]\ndecay_period_ms = 0.0", "palette.decay_period_ms"),
        ("[palette]\nidle_window_ms = -1.0", "palette.idle_window_ms"),
        ("[palette]\nalternate_shades = []", "palette.alternate_shades"),
    ];
    for (src, field) in cases {
        match ReactiveParams::from_toml_str(src) {
            Err(CoreError::InvalidParam { name, .. }) => assert_eq!(name, field),
            other => panic!("{field}: expected InvalidParam, got {other:?}"),
        }
    }
}

#[test]
fn non_finite_placement_and_glow_are_rejected() {
    let cases = [
        ("[bounce]\nbase_y = nan", "bounce.base_y"),
        ("[bounce]\nlead_base_z = inf", "bounce.lead_base_z"),
        ("[bounce]\nlead_base_scale = nan", "bounce.lead_base_scale"),
        ("[bounce]\ndepth_per_jump = -inf", "bounce.depth_per_jump"),
        ("[palette]\nemissive_base = nan", "palette.emissive_base"),
        ("[palette]\nemissive_span = inf", "palette.emissive_span"),
        ("[palette]\nsaturation = nan", "palette.saturation"),
        ("[palette]\nlightness = 1.5", "palette.lightness"),
    ];
    for (src, field) in cases {
        match ReactiveParams::from_toml_str(src) {
            Err(CoreError::InvalidParam { name, .. }) => assert_eq!(name, field),
            other => panic!("{field}: expected InvalidParam, got {other:?}"),
        }
    }
    // negative heights and depths are fine as long as they are finite
    let params = ReactiveParams::from_toml_str("[bounce]\nbase_y = -1.0\nlead_base_z = -3.0");
    assert!(params.is_ok());
}

#[test]
fn malformed_toml_is_a_config_error() {
    let err = ReactiveParams::from_toml_str("[motion\nthreshold = ").unwrap_err();
    assert!(matches!(err, CoreError::ConfigParse(_)));
    let err = ReactiveParams::from_toml_str("[motion]\nthreshold = \"high\"").unwrap_err();
    assert!(matches!(err, CoreError::ConfigParse(_)));
}

#[test]
fn constants_hang_together() {
    // the idle window spans several decay periods
    assert!(IDLE_WINDOW_MS > DECAY_PERIOD_MS);
    // one motion step is never larger than the full range
    assert!(MOTION_STEP_MAX > 0.0 && MOTION_STEP_MAX < 1.0);
    // the lead shrinks toward its resting size after load
    assert!(LEAD_START_SCALE > LEAD_BASE_SCALE);
    assert!(JUMP_MAX > 0.0);
    for shade in ALTERNATE_SHADES {
        assert!(shade.starts_with('#') && shade.len() == 7, "{shade}");
    }
}
