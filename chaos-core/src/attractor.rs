use crate::error::{Error, Result};
use glam::Vec3;
use rand::Rng;

/// Fixed target points of the chaos game.
///
/// The last point doubles as the seed of every generated sequence.
/// `targets` is how many leading points are eligible as jump targets;
/// it equals `points.len()` unless the seed was excluded.
#[derive(Debug, Clone, PartialEq)]
pub struct AttractorSet {
    points: Vec<Vec3>,
    targets: usize,
}

impl AttractorSet {
    /// Builds a set where every attractor, the seed included, is a target.
    ///
    /// ### Errors
    /// [`Error::EmptyAttractorSet`] if `positions` is empty.
    pub fn from_positions(positions: Vec<Vec3>) -> Result<Self> {
        if positions.is_empty() {
            return Err(Error::EmptyAttractorSet);
        }
        let targets = positions.len();
        Ok(Self {
            points: positions,
            targets,
        })
    }

    /// Builds a set whose last point is only the seed, never a target.
    ///
    /// ### Errors
    /// - [`Error::EmptyAttractorSet`] if `positions` is empty.
    /// - [`Error::TooFewTargets`] if only the seed would remain.
    pub fn with_seed_excluded(positions: Vec<Vec3>) -> Result<Self> {
        match positions.len() {
            0 => Err(Error::EmptyAttractorSet),
            1 => Err(Error::TooFewTargets { count: 1 }),
            n => Ok(Self {
                points: positions,
                targets: n - 1,
            }),
        }
    }

    /// The four-point layout the viewer starts with.
    pub fn reference() -> Self {
        Self {
            points: reference_positions(),
            targets: 4,
        }
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false`; construction rejects empty sets.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of attractors a jump can target.
    pub fn target_count(&self) -> usize {
        self.targets
    }

    /// Start point of every sequence.
    pub fn seed(&self) -> Vec3 {
        self.points[self.points.len() - 1]
    }

    /// Picks a target uniformly from `[0, target_count)`.
    #[inline]
    pub fn random_target(&self, rng: &mut impl Rng) -> Vec3 {
        self.points[rng.random_range(0..self.targets)]
    }

    /// Largest distance between any two attractors.
    pub fn spread(&self) -> f32 {
        let mut best = 0.0f32;
        for (i, a) in self.points.iter().enumerate() {
            for b in &self.points[i + 1..] {
                best = best.max(a.distance(*b));
            }
        }
        best
    }

    /// Distance from `pos` to the closest attractor.
    pub fn nearest_distance(&self, pos: Vec3) -> f32 {
        self.points
            .iter()
            .map(|a| a.distance(pos))
            .fold(f32::MAX, f32::min)
    }
}

/// Triangle corners plus its interior seed at the origin.
pub fn reference_positions() -> Vec<Vec3> {
    vec![
        Vec3::new(0.0, 0.5, 0.0),
        Vec3::new(-0.5, -0.5, 0.0),
        Vec3::new(0.5, -0.5, 0.0),
        Vec3::new(0.0, 0.0, 0.0),
    ]
}
