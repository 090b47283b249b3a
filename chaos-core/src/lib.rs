//! Chaos-game point generation and incremental reveal.
//!
//! Main components:
//! - [`attractor`] — fixed target points and the sequence seed.
//! - [`config`] — load-time configuration and validation.
//! - [`error`] — configuration and setup errors.
//! - [`generator`] — the chaos-game sampler producing a [`generator::PointSequence`].
//! - [`reveal`] — frame-to-visible-count policy and its state machine.
//! - [`render`] — the incremental renderer over a [`render::MarkerBackend`].

pub mod attractor;
pub mod config;
pub mod error;
pub mod generator;
pub mod render;
pub mod reveal;

pub use error::{Error, Result};
