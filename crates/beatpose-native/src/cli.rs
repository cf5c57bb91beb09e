use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Args {
    /// Spectrum JSON (`[{ "t": .., "bands": [..] }, ..]`); runs at rest when missing
    #[arg(long, value_name = "PATH")]
    pub spectrum: Option<PathBuf>,

    /// Path to a params TOML overriding the built-in tuning
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Simulated session length in seconds
    #[arg(long, default_value_t = 20.0)]
    pub seconds: f64,

    /// Display refresh rate of the simulated frame driver
    #[arg(long, default_value_t = 60.0)]
    pub fps: f64,

    /// Rate of the simulated pose tracker
    #[arg(long, default_value_t = 24.0)]
    pub pose_hz: f64,

    /// Seed for the alternate palette
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Log a frame summary every N frames
    #[arg(long, default_value_t = 30)]
    pub report_every: u64,
}

impl Args {
    /// Reject rates and lengths that would stall or skip the replay loop.
    pub fn validate(&self) -> anyhow::Result<()> {
        for (flag, rate) in [("--fps", self.fps), ("--pose-hz", self.pose_hz)] {
            if !(rate.is_finite() && rate > 0.0) {
                anyhow::bail!("{flag} must be a positive, finite rate (got {rate})");
            }
        }
        if !(self.seconds.is_finite() && self.seconds >= 0.0) {
            anyhow::bail!("--seconds must be a finite, non-negative length");
        }
        Ok(())
    }
}
