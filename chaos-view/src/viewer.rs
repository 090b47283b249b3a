//! eframe application that reveals a generated point sequence frame by frame.
//!
//! eframe owns the loop: it polls window events, calls [`App::update`] once
//! per frame and presents the result. Closing the window is the only way
//! the loop ends.

use crate::mesh_backend::{MeshBackend, Slot};
use chaos_core::{
    config::Config,
    generator::PointSequence,
    render::{IncrementalRenderer, MarkerGeometry, SceneTransforms},
};
use eframe::App;

/// Main application state for the viewer.
///
/// ### Fields
/// - `renderer` - Reveal cursor and per-point draw dispatch over the
///   borrowed point sequence.
/// - `backend` - Marker mesh builder; keeps the view/proj uniforms between frames.
/// - `clear_color` - Background, handed to eframe before every frame.
/// - `start_time` - egui time of the first frame, for the wall-clock reveal.
pub struct Viewer<'a> {
    renderer: IncrementalRenderer<'a, Slot>,
    backend: MeshBackend,
    clear_color: [f32; 4],
    start_time: Option<f64>,
}

impl<'a> Viewer<'a> {
    /// Creates the viewer over an already generated point sequence.
    ///
    /// Marker geometry and scene transforms are built here, once, from `cfg`.
    ///
    /// ### Errors
    /// Propagates renderer setup errors: [`chaos_core::Error::MissingUniform`],
    /// or a reveal rate or speed that would never show a point.
    pub fn new(cfg: &Config, points: &'a PointSequence) -> chaos_core::Result<Self> {
        let color = to_color32(cfg.marker_color);
        let mut backend = MeshBackend::new(MarkerGeometry::quad(cfg.marker_half_size), color);

        let scene = SceneTransforms::from_config(cfg);
        let renderer = IncrementalRenderer::new(
            &mut backend,
            points,
            &scene,
            cfg.reveal_rate,
            cfg.reveal_clock,
        )?;

        Ok(Self {
            renderer,
            backend,
            clear_color: cfg.clear_color,
            start_time: None,
        })
    }

    /// Draws the current prefix into `rect` and returns the finished mesh.
    fn draw_points(&mut self, rect: egui::Rect, now: f64) -> egui::Mesh {
        let start = *self.start_time.get_or_insert(now);
        self.backend.begin_frame(rect);
        self.renderer.draw_frame(&mut self.backend, now - start);
        self.backend.take_mesh()
    }

    /// Small overlay with reveal progress. Drawn as an area so the point
    /// panel keeps the full window and the projection's aspect ratio.
    fn ui_status(&self, ctx: &egui::Context) {
        let cursor = self.renderer.cursor();
        egui::Area::new("status".into())
            .anchor(egui::Align2::LEFT_BOTTOM, egui::vec2(8.0, -8.0))
            .movable(false)
            .interactable(false)
            .show(ctx, |ui| {
                egui::Frame::new()
                    .fill(egui::Color32::from_rgba_unmultiplied(0, 0, 0, 96))
                    .inner_margin(4.0)
                    .show(ui, |ui| {
                        ui.label(format!(
                            "points = {} / {}   frame = {}   {:?}",
                            cursor.count(),
                            cursor.total(),
                            cursor.frame(),
                            cursor.state()
                        ));
                    });
            });
    }
}

/// Converts a config colour to egui's sRGB bytes, the same space eframe
/// reads [`App::clear_color`] in.
fn to_color32([r, g, b, a]: [f32; 4]) -> egui::Color32 {
    let byte = |c: f32| (c * 255.0).round() as u8;
    egui::Color32::from_rgba_unmultiplied(byte(r), byte(g), byte(b), byte(a))
}

impl App for Viewer<'_> {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default()
            .frame(egui::Frame::new())
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                let now = ctx.input(|i| i.time);
                let mesh = self.draw_points(rect, now);
                ui.painter_at(rect).add(egui::Shape::mesh(mesh));
            });

        self.ui_status(ctx);

        // Keep revealing without waiting for input.
        ctx.request_repaint();
    }

    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        self.clear_color
    }
}
