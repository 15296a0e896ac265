//! Plot surface capability, view transform and an egui_plot-backed surface.
//!
//! The cursor tracker only needs three things from a plot: somewhere to put
//! overlay items, a way to move/show/hide them, and the current mapping from
//! scene (pixel) coordinates to data coordinates.

use egui_plot::{PlotBounds, PlotTransform};

use crate::config::GuideLook;
use crate::events::{PlotPos, ScreenPos};

// ─────────────────────────────────────────────────────────────────────────────
// Overlays
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Spans the full height at a fixed x.
    Vertical,
    /// Spans the full width at a fixed y.
    Horizontal,
}

/// An infinite, non-movable line at a data coordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct GuideLine {
    pub orientation: Orientation,
    /// x for vertical lines, y for horizontal ones.
    pub pos: f64,
    pub visible: bool,
    pub look: GuideLook,
}

impl GuideLine {
    pub fn new(orientation: Orientation, look: GuideLook) -> Self {
        Self {
            orientation,
            pos: 0.0,
            visible: true,
            look,
        }
    }
}

/// Handle returned by [`PlotSurface::add_overlay`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OverlayId(pub usize);

/// The view a [`CursorTracker`](crate::cursor::CursorTracker) draws on.
///
/// Pointer moves are not delivered by the surface; the host forwards them to
/// the tracker from its frame loop.
pub trait PlotSurface {
    /// Add an overlay item. Overlays never contribute to autoscaled bounds.
    fn add_overlay(&mut self, line: &GuideLine) -> OverlayId;

    /// Replace the state of a previously added overlay.
    fn update_overlay(&mut self, id: OverlayId, line: &GuideLine);

    /// Map a scene position through the current view transform.
    fn scene_to_data(&self, scene: ScreenPos) -> PlotPos;
}

// ─────────────────────────────────────────────────────────────────────────────
// ViewTransform
// ─────────────────────────────────────────────────────────────────────────────

/// Per-axis affine mapping `data = offset + scale * scene`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    pub scale: [f64; 2],
    pub offset: [f64; 2],
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl ViewTransform {
    pub const fn identity() -> Self {
        Self {
            scale: [1.0, 1.0],
            offset: [0.0, 0.0],
        }
    }

    /// Transform showing `bounds` inside the on-screen `frame`. Screen y grows
    /// downwards while data y grows upwards.
    pub fn from_frame_and_bounds(frame: egui::Rect, bounds: &PlotBounds) -> Self {
        let (min, max) = (bounds.min(), bounds.max());
        let sx = bounds.width() / frame.width() as f64;
        let sy = bounds.height() / frame.height() as f64;
        Self {
            scale: [sx, -sy],
            offset: [
                min[0] - frame.left() as f64 * sx,
                max[1] + frame.top() as f64 * sy,
            ],
        }
    }

    /// Same mapping as an egui_plot transform taken from a `PlotResponse`.
    pub fn from_plot_transform(transform: &PlotTransform) -> Self {
        Self::from_frame_and_bounds(*transform.frame(), transform.bounds())
    }

    pub fn apply(&self, scene: ScreenPos) -> PlotPos {
        PlotPos {
            x: self.offset[0] + self.scale[0] * scene.x as f64,
            y: self.offset[1] + self.scale[1] * scene.y as f64,
        }
    }

    /// Pan: shift the data shown under every scene position by `(dx, dy)`.
    pub fn translated(self, dx: f64, dy: f64) -> Self {
        Self {
            offset: [self.offset[0] + dx, self.offset[1] + dy],
            ..self
        }
    }

    /// Zoom by `factor` per axis, keeping the data point under `center` fixed.
    pub fn scaled_about(self, center: ScreenPos, factor: [f64; 2]) -> Self {
        let fixed = self.apply(center);
        let scale = [self.scale[0] * factor[0], self.scale[1] * factor[1]];
        Self {
            scale,
            offset: [
                fixed.x - scale[0] * center.x as f64,
                fixed.y - scale[1] * center.y as f64,
            ],
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// PlotView
// ─────────────────────────────────────────────────────────────────────────────

/// Surface state kept between frames: the view transform last seen by the
/// renderer and the overlay items to draw on top of the curves.
#[derive(Debug, Clone, Default)]
pub struct PlotView {
    transform: ViewTransform,
    overlays: Vec<GuideLine>,
}

impl PlotView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_transform(transform: ViewTransform) -> Self {
        Self {
            transform,
            overlays: Vec::new(),
        }
    }

    pub fn transform(&self) -> ViewTransform {
        self.transform
    }

    pub fn set_transform(&mut self, transform: ViewTransform) {
        self.transform = transform;
    }

    /// Adopt the transform egui_plot used for the frame just drawn.
    pub fn sync_from(&mut self, transform: &PlotTransform) {
        self.transform = ViewTransform::from_plot_transform(transform);
    }

    pub fn overlays(&self) -> &[GuideLine] {
        &self.overlays
    }

    pub fn overlay(&self, id: OverlayId) -> Option<&GuideLine> {
        self.overlays.get(id.0)
    }
}

impl PlotSurface for PlotView {
    fn add_overlay(&mut self, line: &GuideLine) -> OverlayId {
        self.overlays.push(line.clone());
        OverlayId(self.overlays.len() - 1)
    }

    fn update_overlay(&mut self, id: OverlayId, line: &GuideLine) {
        if let Some(slot) = self.overlays.get_mut(id.0) {
            *slot = line.clone();
        }
    }

    fn scene_to_data(&self, scene: ScreenPos) -> PlotPos {
        self.transform.apply(scene)
    }
}
