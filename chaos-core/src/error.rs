//! Error types for configuration and renderer setup.

use std::io;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised before the frame loop starts.
///
/// Nothing in generation or per-frame drawing can fail once these checks
/// have passed, so every variant is fatal to the caller.
#[derive(Error, Debug)]
pub enum Error {
    /// No attractors were configured.
    #[error("attractor set is empty")]
    EmptyAttractorSet,

    /// The seed attractor is excluded from targets and nothing is left to jump to.
    #[error("need at least 2 attractors when the seed is not a target, got {count}")]
    TooFewTargets {
        /// Number of configured attractors.
        count: usize,
    },

    /// More points than a 32-bit indexed mesh can address.
    #[error("point count {count} exceeds the maximum of {max}")]
    TooManyPoints {
        /// Requested point count.
        count: usize,
        /// Largest accepted point count.
        max: usize,
    },

    /// Frame-based reveal rate of zero would never show anything.
    #[error("reveal rate must be at least 1 point per frame")]
    ZeroRevealRate,

    /// Wall-clock reveal speed that is not a positive finite number.
    #[error("invalid reveal speed: {0} points per second")]
    InvalidRevealSpeed(f64),

    /// Window dimensions must both be positive.
    #[error("invalid window size: {width}x{height}")]
    InvalidWindowSize {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// Marker half-size must be positive and finite.
    #[error("invalid marker half-size: {0}")]
    InvalidMarkerSize(f32),

    /// A colour component outside `[0, 1]`.
    #[error("{name} component out of range: {value}")]
    ColorOutOfRange {
        /// Which colour setting was rejected.
        name: &'static str,
        /// The offending component.
        value: f32,
    },

    /// Config file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Config file is not valid JSON for [`crate::config::Config`].
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The render backend has no uniform slot with this name.
    #[error("backend does not expose uniform `{0}`")]
    MissingUniform(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_size_message_contains_dimensions() {
        let err = Error::InvalidWindowSize {
            width: 0,
            height: 600,
        };
        let msg = err.to_string();
        assert!(msg.contains("0x600"));
    }

    #[test]
    fn missing_uniform_names_the_slot() {
        let err = Error::MissingUniform("proj");
        assert!(err.to_string().contains("`proj`"));
    }

    #[test]
    fn parse_errors_convert_with_question_mark() {
        fn parse() -> Result<serde_json::Value> {
            Ok(serde_json::from_str("{ not json")?)
        }
        assert!(matches!(parse(), Err(Error::Parse(_))));
    }
}
