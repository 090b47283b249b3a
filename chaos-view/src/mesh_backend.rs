//! [`MarkerBackend`] that rasterizes markers into an [`egui::Mesh`].
//!
//! Each draw runs the four marker corners through `proj * view * model`,
//! maps normalized device coordinates onto the target rectangle and
//! appends the marker's two triangles by index.

use chaos_core::render::{MarkerBackend, MarkerGeometry};
use glam::Mat4;
use tracing::warn;

/// Uniform slots understood by [`MeshBackend`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Model,
    View,
    Proj,
}

pub struct MeshBackend {
    marker: MarkerGeometry,
    color: egui::Color32,
    rect: egui::Rect,
    model: Mat4,
    view: Mat4,
    proj: Mat4,
    mesh: egui::Mesh,
}

impl MeshBackend {
    pub fn new(marker: MarkerGeometry, color: egui::Color32) -> Self {
        Self {
            marker,
            color,
            rect: egui::Rect::NOTHING,
            model: Mat4::IDENTITY,
            view: Mat4::IDENTITY,
            proj: Mat4::IDENTITY,
            mesh: egui::Mesh::default(),
        }
    }

    /// Starts a new frame drawing into `rect`. Uniforms are kept.
    pub fn begin_frame(&mut self, rect: egui::Rect) {
        self.rect = rect;
        self.mesh.clear();
    }

    /// Hands the frame's mesh to the caller, leaving an empty one behind.
    pub fn take_mesh(&mut self) -> egui::Mesh {
        std::mem::take(&mut self.mesh)
    }

    /// Maps a clip-space position to screen space, y pointing down.
    fn clip_to_screen(&self, clip: glam::Vec4) -> egui::Pos2 {
        let ndc = clip.truncate() / clip.w;
        egui::pos2(
            self.rect.left() + (ndc.x + 1.0) * 0.5 * self.rect.width(),
            self.rect.top() + (1.0 - ndc.y) * 0.5 * self.rect.height(),
        )
    }
}

/// First index of a marker appended after `len` vertices, if all four of
/// its corners stay addressable by `u32` indices.
fn marker_base(len: usize) -> Option<u32> {
    let base = u32::try_from(len).ok()?;
    base.checked_add(3)?;
    Some(base)
}

impl MarkerBackend for MeshBackend {
    type Uniform = Slot;

    fn uniform_location(&self, name: &str) -> Option<Slot> {
        match name {
            "model" => Some(Slot::Model),
            "view" => Some(Slot::View),
            "proj" => Some(Slot::Proj),
            _ => None,
        }
    }

    fn set_uniform_mat4(&mut self, slot: Slot, value: &Mat4) {
        match slot {
            Slot::Model => self.model = *value,
            Slot::View => self.view = *value,
            Slot::Proj => self.proj = *value,
        }
    }

    fn draw_marker(&mut self) {
        let mvp = self.proj * self.view * self.model;
        let clip = self.marker.vertices.map(|v| mvp * v.extend(1.0));

        // Behind the camera.
        if clip.iter().any(|c| c.w <= 0.0) {
            return;
        }

        // Config caps the point count, so this only trips on misuse.
        let Some(base) = marker_base(self.mesh.vertices.len()) else {
            warn!(vertices = self.mesh.vertices.len(), "marker mesh full, dropping marker");
            return;
        };
        for c in clip {
            let pos = self.clip_to_screen(c);
            self.mesh.colored_vertex(pos, self.color);
        }
        for tri in self.marker.indices.chunks_exact(3) {
            self.mesh.add_triangle(base + tri[0], base + tri[1], base + tri[2]);
        }
    }
}
