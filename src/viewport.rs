//! View <-> content coordinate mapping: pan offset plus uniform zoom.

use crate::geometry::{Point, Rect};

/// Zoom scale limits, matching the wheel-zoom guard of the editor.
pub const MIN_SCALE: f32 = 0.05;
pub const MAX_SCALE: f32 = 100.0;

/// Affine mapping `view = content * scale + offset`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    offset_x: f32,
    offset_y: f32,
    scale: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            offset_x: 0.0,
            offset_y: 0.0,
            scale: 1.0,
        }
    }
}

impl Viewport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn offset(&self) -> (f32, f32) {
        (self.offset_x, self.offset_y)
    }

    pub fn to_content(&self, view: Point) -> Point {
        Point::new(
            (view.x - self.offset_x) / self.scale,
            (view.y - self.offset_y) / self.scale,
        )
    }

    pub fn to_view(&self, content: Point) -> Point {
        Point::new(
            content.x * self.scale + self.offset_x,
            content.y * self.scale + self.offset_y,
        )
    }

    /// Shifts the view by a view-space delta. Unconstrained; panning past
    /// the content edges is allowed.
    pub fn pan(&mut self, dx: f32, dy: f32) {
        self.offset_x += dx;
        self.offset_y += dy;
    }

    /// Multiplies the scale by `factor`, anchored so the content point
    /// under `anchor` stays visually stationary. Returns `false` without
    /// any state change when the resulting scale would leave
    /// `[MIN_SCALE, MAX_SCALE]`.
    pub fn zoom(&mut self, factor: f32, anchor: Point) -> bool {
        let new_scale = self.scale * factor;
        if !(MIN_SCALE..=MAX_SCALE).contains(&new_scale) {
            return false;
        }
        let pivot = self.to_content(anchor);
        self.scale = new_scale;
        self.offset_x = anchor.x - pivot.x * self.scale;
        self.offset_y = anchor.y - pivot.y * self.scale;
        true
    }

    /// Resets scale and offset so the whole content rect is visible,
    /// aspect ratio preserved and centered (letterboxed, not stretched).
    pub fn fit_to_content(&mut self, bounds: Rect, view_width: f32, view_height: f32) {
        if bounds.is_empty() || view_width <= 0.0 || view_height <= 0.0 {
            *self = Self::default();
            return;
        }
        let scale = (view_width / bounds.width).min(view_height / bounds.height);
        self.scale = scale.clamp(MIN_SCALE, MAX_SCALE);
        self.offset_x = (view_width - bounds.width * self.scale) / 2.0 - bounds.x * self.scale;
        self.offset_y = (view_height - bounds.height * self.scale) / 2.0 - bounds.y * self.scale;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: Point, b: Point) {
        assert!(
            (a.x - b.x).abs() < 1e-3 && (a.y - b.y).abs() < 1e-3,
            "{a:?} != {b:?}"
        );
    }

    #[test]
    fn round_trip_across_pan_and_zoom() {
        let mut vp = Viewport::new();
        vp.pan(123.0, -45.0);
        assert!(vp.zoom(1.15, Point::new(200.0, 150.0)));
        assert!(vp.zoom(1.15, Point::new(40.0, 90.0)));
        vp.pan(-300.0, 72.5);

        for p in [
            Point::new(0.0, 0.0),
            Point::new(512.3, 77.7),
            Point::new(-40.0, 1000.0),
        ] {
            assert_close(vp.to_view(vp.to_content(p)), p);
        }
    }

    #[test]
    fn zoom_is_anchored() {
        let mut vp = Viewport::new();
        let anchor = Point::new(300.0, 200.0);
        let before = vp.to_content(anchor);
        assert!(vp.zoom(2.0, anchor));
        assert_close(vp.to_view(before), anchor);
    }

    #[test]
    fn zoom_outside_limits_is_rejected() {
        let mut vp = Viewport::new();
        let before = vp;
        assert!(!vp.zoom(200.0, Point::new(0.0, 0.0)));
        assert_eq!(vp, before);
        assert!(!vp.zoom(0.01, Point::new(0.0, 0.0)));
        assert_eq!(vp, before);
    }

    #[test]
    fn fit_letterboxes_wide_content() {
        let mut vp = Viewport::new();
        vp.fit_to_content(Rect::from_size(800.0, 600.0), 400.0, 400.0);
        assert!((vp.scale() - 0.5).abs() < 1e-6);
        // Horizontal fill, vertical letterbox band of 50px top and bottom.
        assert_close(vp.to_view(Point::new(0.0, 0.0)), Point::new(0.0, 50.0));
        assert_close(vp.to_view(Point::new(800.0, 600.0)), Point::new(400.0, 350.0));
    }
}
