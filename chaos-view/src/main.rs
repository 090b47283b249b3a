//! Application entry point for the chaos game viewer.
//!
//! Loads the configuration, generates the full point sequence, then hands
//! it to [`Viewer`] and lets eframe run the frame loop until the window
//! is closed.
//!
//! Set `CHAOS_GAME_CONFIG` to a JSON file to override the defaults and
//! `RUST_LOG` to change the log level.

mod mesh_backend;
mod viewer;

use anyhow::{Context, anyhow};
use chaos_core::{config::Config, generator::generate_from_config};
use std::path::Path;
use tracing::info;
use viewer::Viewer;

const CONFIG_ENV: &str = "CHAOS_GAME_CONFIG";

fn load_config() -> anyhow::Result<Config> {
    match std::env::var_os(CONFIG_ENV) {
        Some(path) => Config::load(&path)
            .with_context(|| format!("loading config from {}", Path::new(&path).display())),
        None => Ok(Config::default()),
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cfg = load_config()?;
    let points = generate_from_config(&cfg).context("invalid configuration")?;
    info!(
        width = cfg.window_width,
        height = cfg.window_height,
        points = points.len(),
        "opening window"
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Chaos Game")
            .with_inner_size([cfg.window_width as f32, cfg.window_height as f32])
            .with_resizable(false),
        ..Default::default()
    };

    eframe::run_native(
        "Chaos Game",
        options,
        Box::new(|_cc| Ok(Box::new(Viewer::new(&cfg, &points)?))),
    )
    .map_err(|e| anyhow!("window error: {e}"))
}
