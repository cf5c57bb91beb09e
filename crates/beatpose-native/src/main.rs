use anyhow::Context;
use beatpose_core::{Clock, FrameSnapshot, ManualClock, ReactiveCore, ReactiveParams, Spectrum};
use clap::Parser;
use std::fs;
use std::path::Path;

mod cli;
mod replay;

use cli::Args;
use replay::{LoopingAudio, SyntheticPose};

fn load_spectrum(path: Option<&Path>) -> Spectrum {
    let Some(path) = path else {
        log::warn!("no spectrum given, elements stay at rest");
        return Spectrum::empty();
    };
    let parsed = fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))
        .and_then(|src| Spectrum::from_json(&src).map_err(anyhow::Error::from));
    match parsed {
        Ok(s) => s,
        Err(e) => {
            log::error!("spectrum unavailable ({e:#}), elements stay at rest");
            Spectrum::empty()
        }
    }
}

fn load_params(path: Option<&Path>) -> anyhow::Result<ReactiveParams> {
    let Some(path) = path else {
        return Ok(ReactiveParams::default());
    };
    let src = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    ReactiveParams::from_toml_str(&src).with_context(|| format!("loading {}", path.display()))
}

fn report(frame: &FrameSnapshot) {
    let heights: Vec<String> = frame
        .spheres()
        .iter()
        .map(|e| format!("{:.1}", e.position[1]))
        .collect();
    if let Some(lead) = frame.lead() {
        log::info!(
            "[frame {}] t={:.2}s color_mode={:.2} switch={} lead(y={:.2} z={:.2} s={:.2} glow={:.2}) spheres_y=[{}]",
            frame.frame_index,
            frame.audio_time,
            frame.color_mode,
            frame.switch_index,
            lead.position[1],
            lead.position[2],
            lead.scale,
            lead.emissive,
            heights.join(" ")
        );
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Args::parse();
    args.validate()?;
    let params = load_params(args.config.as_deref())?;
    let spectrum = load_spectrum(args.spectrum.as_deref());

    let clock = ManualClock::new(0.0);
    let audio = LoopingAudio::new(clock.clone(), spectrum.duration());
    let mut core = ReactiveCore::new(spectrum, &params, args.seed, clock.clone())?;
    let mut pose = SyntheticPose::default();

    let frame_ms = 1000.0 / args.fps;
    let pose_ms = 1000.0 / args.pose_hz;
    let end_ms = args.seconds * 1000.0;
    let report_every = args.report_every.max(1);
    let mut next_frame = frame_ms;
    let mut next_pose = pose_ms;

    let mut sink = |frame: &FrameSnapshot| {
        if frame.frame_index % report_every == 0 {
            report(frame);
        }
    };

    // Interleave the three sources by due time, as a browser event loop would.
    while next_frame.min(next_pose) <= end_ms {
        clock.set(next_frame.min(next_pose));
        core.poll_timers();
        if next_pose < next_frame {
            core.push_pose(pose.sample(clock.now_ms()));
            next_pose += pose_ms;
        } else {
            core.push_frame(&audio);
            next_frame += frame_ms;
        }
        core.process(&mut sink);
    }

    let stats = core.stats();
    log::info!(
        "done: frames={} pose_samples={} tracking_lost={} motion_events={} decay_ticks={} color_mode={:.2}",
        stats.frames,
        stats.pose_samples,
        stats.tracking_lost,
        stats.motion_events,
        stats.decay_ticks,
        core.color_mode()
    );
    Ok(())
}
