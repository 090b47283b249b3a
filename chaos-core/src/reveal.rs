//! Reveal policy: how many generated points are visible at a given frame.

use crate::config::RevealClock;
use tracing::info;

/// Progress of the incremental reveal.
///
/// Transitions only move forward:
/// `Priming -> Revealing -> Complete`, or `Priming -> Complete` when the
/// first frame already shows every point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RevealState {
    /// No frame has been drawn yet.
    Priming,
    /// Some, but not all, points are visible.
    Revealing,
    /// Every point is visible; later frames redraw the full sequence.
    Complete,
}

/// Visible count at `frame` (1-based) when revealing `rate` points per frame.
///
/// `min(total, frame * rate)` without overflow.
#[inline]
pub fn reveal_count(frame: u64, rate: u32, total: usize) -> usize {
    let unlocked = frame.saturating_mul(u64::from(rate));
    usize::try_from(unlocked).map_or(total, |n| n.min(total))
}

/// Monotone, saturating cursor over a point sequence of fixed length.
#[derive(Debug, Clone)]
pub struct RevealCursor {
    total: usize,
    rate: u32,
    clock: RevealClock,
    frame: u64,
    count: usize,
    state: RevealState,
}

impl RevealCursor {
    /// Cursor over `total` points, before the first frame.
    ///
    /// `rate` only matters for [`RevealClock::Frames`].
    pub fn new(total: usize, rate: u32, clock: RevealClock) -> Self {
        Self {
            total,
            rate,
            clock,
            frame: 0,
            count: 0,
            state: RevealState::Priming,
        }
    }

    /// Moves to the next frame and returns how many points it shows.
    ///
    /// `elapsed_secs` is wall-clock time since the first frame; it is
    /// ignored by the frame clock. The result never decreases between
    /// calls and never exceeds `total`.
    pub fn advance(&mut self, elapsed_secs: f64) -> usize {
        self.frame += 1;

        let target = match self.clock {
            RevealClock::Frames => reveal_count(self.frame, self.rate, self.total),
            RevealClock::WallClock { points_per_second } => {
                let unlocked = (elapsed_secs.max(0.0) * points_per_second).floor();
                // `as` saturates for out-of-range floats.
                (unlocked as usize).max(1).min(self.total)
            }
        };
        self.count = self.count.max(target);

        let next = if self.count >= self.total {
            RevealState::Complete
        } else {
            RevealState::Revealing
        };
        if next != self.state {
            info!(frame = self.frame, visible = self.count, total = self.total, state = ?next, "reveal state changed");
            self.state = next;
        }

        self.count
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Points visible after the latest [`RevealCursor::advance`].
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn state(&self) -> RevealState {
        self.state
    }
}
