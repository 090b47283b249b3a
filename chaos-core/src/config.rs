//! Load-time configuration.
//!
//! Every field has a default, so an empty JSON object is a valid config.

use crate::{
    attractor::{AttractorSet, reference_positions},
    error::{Error, Result},
};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// How the reveal cursor advances between frames.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RevealClock {
    /// `reveal_rate` points per rendered frame.
    #[default]
    Frames,
    /// Points per second of wall-clock time since the first frame.
    WallClock { points_per_second: f64 },
}

impl RevealClock {
    /// Rejects clocks that would never reveal a point.
    ///
    /// `rate` is only checked for [`RevealClock::Frames`].
    pub fn check_rate(&self, rate: u32) -> Result<()> {
        match *self {
            RevealClock::Frames if rate == 0 => Err(Error::ZeroRevealRate),
            RevealClock::WallClock { points_per_second }
                if !(points_per_second.is_finite() && points_per_second > 0.0) =>
            {
                Err(Error::InvalidRevealSpeed(points_per_second))
            }
            _ => Ok(()),
        }
    }
}

/// Upper bound on `point_count`: four marker vertices per point, plus the
/// seed, must stay addressable by 32-bit mesh indices.
pub const MAX_POINT_COUNT: usize = (u32::MAX / 4) as usize - 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub window_width: u32,
    pub window_height: u32,
    /// Points generated after the seed.
    pub point_count: usize,
    /// Points unlocked per frame under [`RevealClock::Frames`].
    pub reveal_rate: u32,
    pub reveal_clock: RevealClock,
    /// Last entry is the seed.
    pub attractors: Vec<Vec3>,
    /// When `false`, the seed attractor is never a jump target.
    pub seed_is_target: bool,
    /// Fixed RNG seed for reproducible runs; entropy-seeded when absent.
    pub rng_seed: Option<u64>,
    pub marker_half_size: f32,
    pub clear_color: [f32; 4],
    pub marker_color: [f32; 4],
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window_width: 800,
            window_height: 800,
            point_count: 100_000,
            reveal_rate: 30,
            reveal_clock: RevealClock::Frames,
            attractors: reference_positions(),
            seed_is_target: true,
            rng_seed: None,
            marker_half_size: 0.002,
            clear_color: [0.19, 0.24, 0.27, 1.0],
            marker_color: [1.0, 1.0, 1.0, 1.0],
        }
    }
}

impl Config {
    /// Parses config from JSON. Missing fields take their defaults.
    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Reads and parses a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading config");
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Checks every field, failing on the first invalid one.
    ///
    /// Returns the attractor set so callers need not build it again.
    pub fn validate(&self) -> Result<AttractorSet> {
        if self.window_width == 0 || self.window_height == 0 {
            return Err(Error::InvalidWindowSize {
                width: self.window_width,
                height: self.window_height,
            });
        }

        if self.point_count > MAX_POINT_COUNT {
            return Err(Error::TooManyPoints {
                count: self.point_count,
                max: MAX_POINT_COUNT,
            });
        }

        self.reveal_clock.check_rate(self.reveal_rate)?;

        if !(self.marker_half_size.is_finite() && self.marker_half_size > 0.0) {
            return Err(Error::InvalidMarkerSize(self.marker_half_size));
        }

        check_color("clear_color", &self.clear_color)?;
        check_color("marker_color", &self.marker_color)?;

        self.attractor_set()
    }

    /// Builds the attractor set according to `seed_is_target`.
    pub fn attractor_set(&self) -> Result<AttractorSet> {
        if self.seed_is_target {
            AttractorSet::from_positions(self.attractors.clone())
        } else {
            AttractorSet::with_seed_excluded(self.attractors.clone())
        }
    }

    /// Width over height, as used by the projection.
    pub fn aspect_ratio(&self) -> f32 {
        self.window_width as f32 / self.window_height as f32
    }
}

fn check_color(name: &'static str, rgba: &[f32; 4]) -> Result<()> {
    match rgba.iter().find(|c| !(0.0..=1.0).contains(*c)) {
        Some(&value) => Err(Error::ColorOutOfRange { name, value }),
        None => Ok(()),
    }
}
