// Host-side tests for the per-frame driver.

use beatpose_core::{
    ColorModeController, ColorModeTap, ElementInstance, FrameScheduler, FrameSnapshot, NullSink,
    Palette, ReactiveParams, Spectrum, SpectrumFrame, BASE_Y,
};
use std::cell::Cell;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn scenario_spectrum() -> Spectrum {
    let mut quiet = vec![0.0; 20];
    let mut loud = vec![0.0; 20];
    loud[0] = 0.5;
    loud[3] = 0.2;
    quiet[3] = 0.0;
    Spectrum::from_frames(vec![
        SpectrumFrame::new(0.0, quiet),
        SpectrumFrame::new(1.0, loud),
    ])
    .unwrap()
}

fn scheduler(spectrum: Spectrum) -> (FrameScheduler, ColorModeController) {
    let params = ReactiveParams::default();
    let palette = Palette::generate(19, &params.palette, &mut StdRng::seed_from_u64(9)).unwrap();
    let controller = ColorModeController::new(&params.motion, &params.palette, 0.0);
    (FrameScheduler::new(spectrum, &params, palette), controller)
}

#[test]
fn half_second_samples_frame_zero_and_rests() {
    let (mut s, c) = scheduler(scenario_spectrum());
    let frame = s.frame(0.5, &c, &mut NullSink);
    assert_eq!(frame.frame_index, 1);
    assert_eq!(frame.audio_time, 0.5);
    for e in s.elements() {
        assert_eq!(e.position.y, BASE_Y);
    }
}

#[test]
fn loud_frame_raises_lead() {
    let (mut s, c) = scheduler(scenario_spectrum());
    s.frame(1.5, &c, &mut NullSink);
    let lead = &s.elements()[0];
    // target y = 2 + 5, one step at 0.2
    assert!((lead.position.y - 3.0).abs() < 1e-5);
    let band3 = &s.elements()[3];
    assert!((band3.position.y - (BASE_Y + 2.0 * 0.2)).abs() < 1e-5);
}

#[test]
fn render_sink_sees_each_complete_frame_once() {
    let (mut s, c) = scheduler(scenario_spectrum());
    let mut seen: Vec<FrameSnapshot> = Vec::new();
    let mut sink = |frame: &FrameSnapshot| seen.push(frame.clone());
    for i in 0..5 {
        s.frame(1.0 + i as f64 * 0.016, &c, &mut sink);
    }
    assert_eq!(seen.len(), 5);
    for (i, frame) in seen.iter().enumerate() {
        assert_eq!(frame.frame_index, i as u64 + 1);
        assert_eq!(frame.elements.len(), 20);
    }
    // the rendered frame already carries this frame's easing step
    let lead_y: Vec<f32> = seen.iter().map(|f| f.lead().unwrap().position[1]).collect();
    assert!(lead_y[0] > BASE_Y);
    assert!(lead_y.windows(2).all(|w| w[1] > w[0]));
}

#[test]
fn missing_spectrum_rests_every_element() {
    let (mut s, c) = scheduler(Spectrum::empty());
    for i in 0..30 {
        s.frame(i as f64 * 0.016, &c, &mut NullSink);
    }
    for e in s.elements().iter().skip(1) {
        assert!((e.position.y - BASE_Y).abs() < 1e-6);
        assert!((e.scale - 1.0).abs() < 1e-6);
    }
    // lead eases from its loaded scale toward rest
    let lead = &s.elements()[0];
    assert!(lead.scale < 4.0 && lead.scale > 1.1);
}

#[test]
fn non_finite_band_freezes_its_element() {
    let mut bands = vec![0.5; 20];
    bands[3] = f32::NAN;
    let spectrum = Spectrum::from_frames(vec![
        SpectrumFrame::new(0.0, vec![0.5; 20]),
        SpectrumFrame::new(1.0, bands),
    ])
    .unwrap();
    let (mut s, c) = scheduler(spectrum);
    s.frame(0.0, &c, &mut NullSink);
    let frozen = s.elements()[3].clone();
    let moving_y = s.elements()[4].position.y;
    assert!((frozen.position.y - 3.0).abs() < 1e-5);

    let frame = s.frame(1.0, &c, &mut NullSink);
    assert!(frame.as_floats().iter().all(|v| v.is_finite()));
    assert_eq!(s.elements()[3].position, frozen.position);
    assert_eq!(s.elements()[3].scale, frozen.scale);
    assert!(s.elements()[4].position.y > moving_y);
}

#[test]
fn short_frames_freeze_trailing_elements() {
    let spectrum = Spectrum::from_frames(vec![
        SpectrumFrame::new(0.0, vec![0.4; 20]),
        SpectrumFrame::new(1.0, vec![0.0; 3]),
    ])
    .unwrap();
    let (mut s, c) = scheduler(spectrum);
    s.frame(0.0, &c, &mut NullSink);
    let band10 = s.elements()[10].position;
    s.frame(1.0, &c, &mut NullSink);
    // band 1 eases from 2.8 back toward rest
    assert!((s.elements()[1].position.y - 2.64).abs() < 1e-5);
    assert_eq!(s.elements()[10].position, band10);
}

#[test]
fn non_finite_audio_time_reads_as_zero() {
    let (mut s, c) = scheduler(scenario_spectrum());
    let frame = s.frame(f64::NAN, &c, &mut NullSink);
    assert_eq!(frame.audio_time, 0.0);
    assert_eq!(s.elements()[0].position.y, BASE_Y);
}

#[test]
fn palette_assignment_follows_color_mode() {
    let (mut s, mut c) = scheduler(scenario_spectrum());
    s.frame(0.0, &c, &mut NullSink);
    for e in s.elements().iter().skip(1) {
        let idx = e.palette_index.unwrap();
        assert_eq!(Some(e.color), s.palette().alternate(idx));
    }

    for _ in 0..10 {
        c.on_motion_event(3.0, 10.0);
    }
    let frame = s.frame(0.016, &c, &mut NullSink);
    assert_eq!(frame.switch_index, 9);
    let spheres = frame.spheres().to_vec();
    for (idx, inst) in spheres.iter().enumerate() {
        let expected = if idx < 9 {
            s.palette().original(idx)
        } else {
            s.palette().alternate(idx)
        };
        assert_eq!(Some(inst.color), expected.map(|c| c.to_array()), "sphere {idx}");
    }
}

#[test]
fn lead_glow_eases_toward_color_mode_target() {
    let (mut s, mut c) = scheduler(scenario_spectrum());
    for _ in 0..20 {
        c.on_motion_event(3.0, 0.0);
    }
    assert_eq!(c.color_mode(), 1.0);
    let frame = s.frame(0.0, &c, &mut NullSink);
    let glow = frame.lead().unwrap().emissive;
    assert!((glow - 0.65).abs() < 1e-5, "glow={glow}");
    assert!(frame.spheres().iter().all(|e| e.emissive == 0.0));
}

#[test]
fn float_buffer_matches_instance_layout() {
    let (mut s, c) = scheduler(scenario_spectrum());
    let frame = s.frame(1.0, &c, &mut NullSink);
    assert_eq!(ElementInstance::FLOATS, 8);
    let floats = frame.as_floats();
    assert_eq!(floats.len(), 20 * ElementInstance::FLOATS);
    let lead = frame.lead().unwrap();
    assert_eq!(floats[1], lead.position[1]);
    assert_eq!(floats[3], lead.scale);
    assert_eq!(floats[7], lead.emissive);
}

#[test]
fn color_mode_tap_publishes_before_forwarding() {
    let (mut s, mut c) = scheduler(scenario_spectrum());
    for _ in 0..4 {
        c.on_motion_event(3.0, 0.0);
    }
    let latest = Cell::new(-1.0);
    let mut seen_inside = Vec::new();
    let mut inner = |frame: &FrameSnapshot| seen_inside.push((frame.color_mode, latest.get()));
    s.frame(
        0.0,
        &c,
        &mut ColorModeTap {
            latest: &latest,
            inner: &mut inner,
        },
    );
    assert!((latest.get() - 0.2).abs() < 1e-5);
    // the inner sink already reads the new value
    assert_eq!(seen_inside.len(), 1);
    assert_eq!(seen_inside[0].0, seen_inside[0].1);
}
