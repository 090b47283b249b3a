//! Incremental renderer and the backend trait it draws through.
//!
//! The crate does not depend on a graphics API. A backend exposes named
//! 4x4 matrix uniforms and a way to draw the shared marker once; the
//! renderer decides which points to draw each frame.

use crate::{
    config::{Config, RevealClock},
    error::{Error, Result},
    generator::PointSequence,
    reveal::{RevealCursor, RevealState},
};
use glam::{Mat4, Vec3};
use tracing::debug;

/// Marker quad: four corners and two indexed triangles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerGeometry {
    pub vertices: [Vec3; 4],
    pub indices: [u32; 6],
}

impl MarkerGeometry {
    /// Axis-aligned square in the xy-plane centred on the origin.
    pub fn quad(half_size: f32) -> Self {
        let h = half_size;
        Self {
            vertices: [
                Vec3::new(-h, -h, 0.0),
                Vec3::new(h, -h, 0.0),
                Vec3::new(-h, h, 0.0),
                Vec3::new(h, h, 0.0),
            ],
            indices: [0, 1, 2, 1, 2, 3],
        }
    }
}

/// View and projection matrices, fixed for the whole run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneTransforms {
    pub view: Mat4,
    pub proj: Mat4,
}

impl SceneTransforms {
    pub const FOV_Y_DEGREES: f32 = 45.0;
    pub const Z_NEAR: f32 = 0.1;
    pub const Z_FAR: f32 = 100.0;
    pub const CAMERA_DISTANCE: f32 = 2.0;

    /// Camera pulled back along +z, looking at the origin.
    pub fn new(aspect_ratio: f32) -> Self {
        Self {
            view: Mat4::from_translation(Vec3::new(0.0, 0.0, -Self::CAMERA_DISTANCE)),
            proj: Mat4::perspective_rh_gl(
                Self::FOV_Y_DEGREES.to_radians(),
                aspect_ratio,
                Self::Z_NEAR,
                Self::Z_FAR,
            ),
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(cfg.aspect_ratio())
    }
}

/// Drawing surface for the incremental renderer.
pub trait MarkerBackend {
    /// Resolved uniform slot.
    type Uniform: Copy;

    /// Looks up a 4x4 matrix uniform by name.
    fn uniform_location(&self, name: &str) -> Option<Self::Uniform>;

    /// Stores a column-major matrix in a uniform slot.
    fn set_uniform_mat4(&mut self, slot: Self::Uniform, value: &Mat4);

    /// Draws the marker once with the current uniforms.
    fn draw_marker(&mut self);
}

/// Uniform slots resolved once at setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniformSlots<U> {
    pub model: U,
    pub view: U,
    pub proj: U,
}

impl<U: Copy> UniformSlots<U> {
    /// Resolves `model`, `view` and `proj`.
    ///
    /// ### Errors
    /// [`Error::MissingUniform`] naming the first slot the backend lacks.
    pub fn resolve<B>(backend: &B) -> Result<Self>
    where
        B: MarkerBackend<Uniform = U>,
    {
        let find = |name: &'static str| {
            backend
                .uniform_location(name)
                .ok_or(Error::MissingUniform(name))
        };
        Ok(Self {
            model: find("model")?,
            view: find("view")?,
            proj: find("proj")?,
        })
    }
}

/// Draws a growing prefix of a finished point sequence, one marker per point.
///
/// The sequence is borrowed for the renderer's lifetime and never mutated.
#[derive(Debug)]
pub struct IncrementalRenderer<'a, U> {
    points: &'a PointSequence,
    slots: UniformSlots<U>,
    cursor: RevealCursor,
}

impl<'a, U: Copy> IncrementalRenderer<'a, U> {
    /// Resolves uniforms on `backend` and uploads the fixed scene transforms.
    ///
    /// Generation has already finished at this point, so the renderer
    /// starts in [`RevealState::Priming`] and leaves it on the first frame.
    ///
    /// ### Errors
    /// - [`Error::ZeroRevealRate`] or [`Error::InvalidRevealSpeed`] if the
    ///   clock could never reveal a point.
    /// - [`Error::MissingUniform`] if the backend lacks a slot.
    pub fn new<B>(
        backend: &mut B,
        points: &'a PointSequence,
        scene: &SceneTransforms,
        rate: u32,
        clock: RevealClock,
    ) -> Result<Self>
    where
        B: MarkerBackend<Uniform = U>,
    {
        clock.check_rate(rate)?;
        let slots = UniformSlots::resolve(backend)?;
        backend.set_uniform_mat4(slots.view, &scene.view);
        backend.set_uniform_mat4(slots.proj, &scene.proj);
        debug!(points = points.len(), rate, ?clock, "renderer prepared");

        Ok(Self {
            points,
            slots,
            cursor: RevealCursor::new(points.len(), rate, clock),
        })
    }

    /// Draws one frame and returns how many points it showed.
    ///
    /// Points are drawn in generation order; the shown prefix only grows.
    pub fn draw_frame<B>(&mut self, backend: &mut B, elapsed_secs: f64) -> usize
    where
        B: MarkerBackend<Uniform = U>,
    {
        let visible = self.cursor.advance(elapsed_secs);
        for &pos in &self.points[..visible] {
            backend.set_uniform_mat4(self.slots.model, &Mat4::from_translation(pos));
            backend.draw_marker();
        }
        visible
    }

    pub fn cursor(&self) -> &RevealCursor {
        &self.cursor
    }

    pub fn state(&self) -> RevealState {
        self.cursor.state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{attractor::AttractorSet, generator::generate};
    use glam::Vec4;
    use rand::{SeedableRng, rngs::StdRng};
    use std::cell::Cell;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Slot {
        Model,
        View,
        Proj,
    }

    /// Records every uniform write and draw call.
    #[derive(Default)]
    struct RecordingBackend {
        model: Mat4,
        view_writes: usize,
        proj_writes: usize,
        lookups: Cell<usize>,
        drawn: Vec<Vec3>,
        without_proj: bool,
    }

    impl MarkerBackend for RecordingBackend {
        type Uniform = Slot;

        fn uniform_location(&self, name: &str) -> Option<Slot> {
            self.lookups.set(self.lookups.get() + 1);
            match name {
                "model" => Some(Slot::Model),
                "view" => Some(Slot::View),
                "proj" if !self.without_proj => Some(Slot::Proj),
                _ => None,
            }
        }

        fn set_uniform_mat4(&mut self, slot: Slot, value: &Mat4) {
            match slot {
                Slot::Model => self.model = *value,
                Slot::View => self.view_writes += 1,
                Slot::Proj => self.proj_writes += 1,
            }
        }

        fn draw_marker(&mut self) {
            self.drawn.push(self.model.w_axis.truncate());
        }
    }

    impl RecordingBackend {
        fn take_frame(&mut self) -> Vec<Vec3> {
            std::mem::take(&mut self.drawn)
        }
    }

    fn sequence(count: usize) -> PointSequence {
        generate(&AttractorSet::reference(), count, &mut StdRng::seed_from_u64(17))
    }

    #[test]
    fn marker_quad_has_two_triangles() {
        let marker = MarkerGeometry::quad(0.002);
        assert_eq!(marker.vertices[0], Vec3::new(-0.002, -0.002, 0.0));
        assert_eq!(marker.vertices[3], Vec3::new(0.002, 0.002, 0.0));
        assert_eq!(marker.indices, [0, 1, 2, 1, 2, 3]);
    }

    #[test]
    fn scene_maps_origin_to_screen_centre() {
        let scene = SceneTransforms::new(1.0);
        let clip = scene.proj * scene.view * Vec4::new(0.0, 0.0, 0.0, 1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-6 && ndc.y.abs() < 1e-6);
        assert!(ndc.z > -1.0 && ndc.z < 1.0);
    }

    #[test]
    fn missing_uniform_is_reported_at_setup() {
        let mut backend = RecordingBackend {
            without_proj: true,
            ..Default::default()
        };
        let points = sequence(3);
        let err = IncrementalRenderer::new(
            &mut backend,
            &points,
            &SceneTransforms::new(1.0),
            1,
            RevealClock::Frames,
        )
        .unwrap_err();
        assert!(matches!(err, Error::MissingUniform("proj")));
    }

    #[test]
    fn reveal_clock_that_never_advances_is_rejected_at_setup() {
        let mut backend = RecordingBackend::default();
        let points = sequence(9);
        let scene = SceneTransforms::new(1.0);

        let err = IncrementalRenderer::new(&mut backend, &points, &scene, 0, RevealClock::Frames)
            .unwrap_err();
        assert!(matches!(err, Error::ZeroRevealRate));

        for points_per_second in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let clock = RevealClock::WallClock { points_per_second };
            let err = IncrementalRenderer::new(&mut backend, &points, &scene, 30, clock)
                .unwrap_err();
            assert!(matches!(err, Error::InvalidRevealSpeed(_)));
        }

        // Nothing was uploaded for the rejected setups.
        assert_eq!(backend.view_writes, 0);
        assert_eq!(backend.lookups.get(), 0);
    }

    #[test]
    fn view_and_proj_are_set_once() {
        let mut backend = RecordingBackend::default();
        let points = sequence(20);
        let mut renderer = IncrementalRenderer::new(
            &mut backend,
            &points,
            &SceneTransforms::new(1.0),
            4,
            RevealClock::Frames,
        )
        .unwrap();

        for _ in 0..10 {
            renderer.draw_frame(&mut backend, 0.0);
        }
        assert_eq!(backend.view_writes, 1);
        assert_eq!(backend.proj_writes, 1);
        assert_eq!(backend.lookups.get(), 3);
    }

    #[test]
    fn each_frame_draws_exact_prefix_in_order() {
        let mut backend = RecordingBackend::default();
        let points = sequence(9);
        let mut renderer = IncrementalRenderer::new(
            &mut backend,
            &points,
            &SceneTransforms::new(1.0),
            3,
            RevealClock::Frames,
        )
        .unwrap();
        assert_eq!(renderer.state(), RevealState::Priming);

        for (frame, expected) in [3usize, 6, 9, 10, 10, 10].into_iter().enumerate() {
            let visible = renderer.draw_frame(&mut backend, 0.0);
            assert_eq!(visible, expected, "frame {}", frame + 1);
            assert_eq!(backend.take_frame(), points[..expected].to_vec());
        }
        assert_eq!(renderer.state(), RevealState::Complete);
    }

    #[test]
    fn seed_only_sequence_is_complete_after_first_frame() {
        let mut backend = RecordingBackend::default();
        let points = sequence(0);
        let mut renderer = IncrementalRenderer::new(
            &mut backend,
            &points,
            &SceneTransforms::new(1.0),
            1,
            RevealClock::Frames,
        )
        .unwrap();

        assert_eq!(renderer.draw_frame(&mut backend, 0.0), 1);
        assert_eq!(renderer.state(), RevealState::Complete);
        assert_eq!(backend.take_frame(), vec![points[0]]);
    }
}
