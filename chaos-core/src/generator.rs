//! Chaos-game point generation.
//!
//! Starting from the seed attractor, each step:
//! 1. picks a target attractor uniformly at random,
//! 2. moves exactly half of the remaining distance toward it,
//! 3. appends the new position to the sequence.
//!
//! The full sequence is built before any rendering starts and is never
//! mutated afterwards.

use crate::{attractor::AttractorSet, config::Config, error::Result};
use glam::Vec3;
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::ops::Deref;
use tracing::{debug, info};

/// Completed chaos-game output: the seed followed by every generated point.
///
/// Dereferences to a slice so renderers can borrow prefixes directly.
#[derive(Debug, Clone, PartialEq)]
pub struct PointSequence {
    points: Vec<Vec3>,
}

impl PointSequence {
    pub fn as_slice(&self) -> &[Vec3] {
        &self.points
    }
}

impl Deref for PointSequence {
    type Target = [Vec3];

    fn deref(&self) -> &[Vec3] {
        &self.points
    }
}

/// One chaos-game move: halfway from `current` to `target`.
#[inline]
pub fn midpoint_step(current: Vec3, target: Vec3) -> Vec3 {
    current + (target - current) * 0.5
}

/// Generates `count` points after the seed.
///
/// The buffer is sized up front to `count + 1`, so no reallocation happens
/// while stepping.
///
/// ### Parameters
/// - `attractors` - Targets and seed; see [`AttractorSet::seed`].
/// - `count` - Number of points to generate after the seed. `0` yields the
///   seed alone.
/// - `rng` - Uniform source used to pick each target.
pub fn generate(
    attractors: &AttractorSet,
    count: usize,
    rng: &mut impl Rng,
) -> PointSequence {
    debug!(
        count,
        attractors = attractors.len(),
        targets = attractors.target_count(),
        "generating chaos game points"
    );

    let mut points = Vec::with_capacity(count + 1);
    let mut current = attractors.seed();
    points.push(current);

    for _ in 0..count {
        current = midpoint_step(current, attractors.random_target(rng));
        points.push(current);
    }

    info!(points = points.len(), "point sequence ready");
    PointSequence { points }
}

/// Validates `cfg` and generates its point sequence.
///
/// Uses a seeded [`StdRng`] when `cfg.rng_seed` is set, otherwise the
/// entropy-seeded thread RNG, so unseeded runs differ from each other.
pub fn generate_from_config(cfg: &Config) -> Result<PointSequence> {
    let attractors = cfg.validate()?;

    let points = match cfg.rng_seed {
        Some(seed) => generate(&attractors, cfg.point_count, &mut StdRng::seed_from_u64(seed)),
        None => generate(&attractors, cfg.point_count, &mut rand::rng()),
    };
    Ok(points)
}
