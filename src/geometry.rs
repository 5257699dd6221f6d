//! Pure rectangle math in content (image) coordinate space.
//!
//! Everything here is a total function: callers get back a valid (possibly
//! zero-extent) rectangle for any input. Viewport/content conversions are
//! the caller's job; no function in this module knows about view space.

/// A point or delta in content coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl std::ops::Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::ops::Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

/// Axis-aligned rectangle, `width`/`height` >= 0 after [`normalize`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle `{0, 0, width, height}`, the shape of content bounds.
    pub fn from_size(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    pub fn corner(&self, handle: Handle) -> Point {
        match handle {
            Handle::TopLeft => Point::new(self.x, self.y),
            Handle::TopRight => Point::new(self.right(), self.y),
            Handle::BottomLeft => Point::new(self.x, self.bottom()),
            Handle::BottomRight => Point::new(self.right(), self.bottom()),
        }
    }
}

/// One of the four corner resize affordances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handle {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Handle {
    pub const ALL: [Handle; 4] = [
        Handle::TopLeft,
        Handle::TopRight,
        Handle::BottomLeft,
        Handle::BottomRight,
    ];

    /// The corner diagonally opposite, i.e. the fixed point during a resize.
    pub fn opposite(self) -> Handle {
        match self {
            Handle::TopLeft => Handle::BottomRight,
            Handle::TopRight => Handle::BottomLeft,
            Handle::BottomLeft => Handle::TopRight,
            Handle::BottomRight => Handle::TopLeft,
        }
    }

    pub fn is_left(self) -> bool {
        matches!(self, Handle::TopLeft | Handle::BottomLeft)
    }

    pub fn is_top(self) -> bool {
        matches!(self, Handle::TopLeft | Handle::TopRight)
    }

    fn from_sides(left: bool, top: bool) -> Handle {
        match (left, top) {
            (true, true) => Handle::TopLeft,
            (false, true) => Handle::TopRight,
            (true, false) => Handle::BottomLeft,
            (false, false) => Handle::BottomRight,
        }
    }
}

/// Builds the axis-aligned rectangle spanned by two arbitrary corner points.
pub fn normalize(a: Point, b: Point) -> Rect {
    let x = a.x.min(b.x);
    let y = a.y.min(b.y);
    Rect::new(x, y, (a.x - b.x).abs(), (a.y - b.y).abs())
}

/// Geometric intersection of `rect` and `bounds`. An empty intersection
/// collapses to zero extent; callers that persist geometry must re-check
/// the size afterwards.
pub fn clamp_to_bounds(rect: Rect, bounds: Rect) -> Rect {
    let x0 = rect.x.max(bounds.x);
    let y0 = rect.y.max(bounds.y);
    let x1 = rect.right().min(bounds.right());
    let y1 = rect.bottom().min(bounds.bottom());
    Rect::new(x0, y0, (x1 - x0).max(0.0), (y1 - y0).max(0.0))
}

/// Grows `rect` to at least `min_size` in each dimension, expanding toward
/// the side of `anchor` (the dragged handle) so the diagonally opposite
/// corner stays put.
pub fn enforce_min_size(rect: Rect, anchor: Handle, min_size: f32) -> Rect {
    let mut r = rect;
    if r.width < min_size {
        if anchor.is_left() {
            r.x = rect.right() - min_size;
        }
        r.width = min_size;
    }
    if r.height < min_size {
        if anchor.is_top() {
            r.y = rect.bottom() - min_size;
        }
        r.height = min_size;
    }
    r
}

/// Second-pass fixup after clamping: a rect pushed below `min_size` by the
/// bounds intersection gets its size restored and its position shifted so
/// it still fits entirely inside `bounds`. Needed because growing after a
/// clamp can push the far edge back outside.
fn refit_in_bounds(rect: Rect, bounds: Rect, min_size: f32) -> Rect {
    let mut r = rect;
    if r.width < min_size {
        r.width = min_size.min(bounds.width);
        r.x = r.x.min(bounds.right() - r.width).max(bounds.x);
    }
    if r.height < min_size {
        r.height = min_size.min(bounds.height);
        r.y = r.y.min(bounds.bottom() - r.height).max(bounds.y);
    }
    r
}

/// Computes the rectangle resulting from dragging `handle` of `original`
/// from `drag_start` to `drag_current`, keeping the opposite corner fixed,
/// with minimum size `min_size` and full containment in `bounds`.
///
/// `original` must be the geometry snapshot taken when the drag started;
/// feeding back the live rectangle makes the reference drift as the
/// pointer moves.
pub fn resize_by_handle(
    original: Rect,
    handle: Handle,
    drag_start: Point,
    drag_current: Point,
    bounds: Rect,
    min_size: f32,
) -> Rect {
    let delta = drag_current - drag_start;
    let fixed = original.corner(handle.opposite());
    let dragged = original.corner(handle) + delta;

    // The dragged corner may have crossed the fixed one; the min-size
    // anchor is wherever it ended up. Ties keep the original side so a
    // degenerate drag still grows away from the fixed edge.
    let left = dragged.x < fixed.x || (dragged.x == fixed.x && handle.is_left());
    let top = dragged.y < fixed.y || (dragged.y == fixed.y && handle.is_top());
    let anchor = Handle::from_sides(left, top);

    let r = normalize(fixed, dragged);
    let r = enforce_min_size(r, anchor, min_size);
    let r = clamp_to_bounds(r, bounds);
    refit_in_bounds(r, bounds, min_size)
}

/// Translates `rect` by `(dx, dy)`, clamping its top-left so the whole
/// rectangle stays inside `bounds`.
pub fn translate_within(rect: Rect, dx: f32, dy: f32, bounds: Rect) -> Rect {
    let x = (rect.x + dx).min(bounds.right() - rect.width).max(bounds.x);
    let y = (rect.y + dy).min(bounds.bottom() - rect.height).max(bounds.y);
    Rect::new(x, y, rect.width, rect.height)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: Rect = Rect {
        x: 0.0,
        y: 0.0,
        width: 800.0,
        height: 600.0,
    };

    #[test]
    fn normalize_swaps_corners() {
        let r = normalize(Point::new(300.0, 50.0), Point::new(50.0, 300.0));
        assert_eq!(r, Rect::new(50.0, 50.0, 250.0, 250.0));
    }

    #[test]
    fn normalize_of_coincident_points_is_zero_extent() {
        let r = normalize(Point::new(10.0, 10.0), Point::new(10.0, 10.0));
        assert_eq!(r, Rect::new(10.0, 10.0, 0.0, 0.0));
        assert!(r.is_empty());
    }

    #[test]
    fn clamp_intersects() {
        let r = clamp_to_bounds(Rect::new(-50.0, 550.0, 200.0, 200.0), BOUNDS);
        assert_eq!(r, Rect::new(0.0, 550.0, 150.0, 50.0));
    }

    #[test]
    fn clamp_of_disjoint_rect_is_zero_extent() {
        let r = clamp_to_bounds(Rect::new(900.0, 700.0, 50.0, 50.0), BOUNDS);
        assert!(r.is_empty());
    }

    #[test]
    fn enforce_min_size_pins_opposite_corner() {
        // Dragging the top-left handle: bottom-right must not move.
        let r = enforce_min_size(Rect::new(98.0, 99.0, 2.0, 1.0), Handle::TopLeft, 10.0);
        assert_eq!(r, Rect::new(90.0, 90.0, 10.0, 10.0));
        // Dragging the bottom-right handle: top-left must not move.
        let r = enforce_min_size(Rect::new(98.0, 99.0, 2.0, 1.0), Handle::BottomRight, 10.0);
        assert_eq!(r, Rect::new(98.0, 99.0, 10.0, 10.0));
    }

    #[test]
    fn resize_bottom_right_clamps_to_bounds() {
        // Bottom-right handle dragged from (300,300) to (790,590)
        // on a {50,50,250,250} region stays inside 800x600.
        let original = Rect::new(50.0, 50.0, 250.0, 250.0);
        let r = resize_by_handle(
            original,
            Handle::BottomRight,
            Point::new(300.0, 300.0),
            Point::new(790.0, 590.0),
            BOUNDS,
            1.0,
        );
        assert_eq!(r, Rect::new(50.0, 50.0, 740.0, 540.0));
    }

    #[test]
    fn resize_past_opposite_corner_flips_and_clamps() {
        // Top-left handle dragged far past the bottom-right corner and the
        // image edge: fixed point (300,300) becomes the top-left corner.
        let original = Rect::new(50.0, 50.0, 250.0, 250.0);
        let r = resize_by_handle(
            original,
            Handle::TopLeft,
            Point::new(50.0, 50.0),
            Point::new(900.0, 900.0),
            BOUNDS,
            1.0,
        );
        assert_eq!(r, Rect::new(300.0, 300.0, 500.0, 300.0));
        assert!(r.width >= 1.0 && r.height >= 1.0);
    }

    #[test]
    fn resize_collapse_keeps_min_size() {
        let original = Rect::new(100.0, 100.0, 50.0, 50.0);
        // Drag bottom-right exactly onto the fixed top-left corner.
        let r = resize_by_handle(
            original,
            Handle::BottomRight,
            Point::new(150.0, 150.0),
            Point::new(100.0, 100.0),
            BOUNDS,
            1.0,
        );
        assert_eq!((r.width, r.height), (1.0, 1.0));
        assert_eq!((r.x, r.y), (100.0, 100.0));
    }

    #[test]
    fn resize_near_edge_never_drops_below_min() {
        // Region hugging the right edge, top-left handle dragged far past
        // the right bound: a single clamp pass would leave zero width at
        // x = 800. The refit pass restores min width inside bounds.
        let original = Rect::new(795.0, 100.0, 5.0, 50.0);
        let r = resize_by_handle(
            original,
            Handle::TopLeft,
            Point::new(795.0, 100.0),
            Point::new(2000.0, 120.0),
            BOUNDS,
            5.0,
        );
        assert!(r.width >= 5.0 && r.height >= 5.0);
        assert_eq!(clamp_to_bounds(r, BOUNDS), r);
        assert_eq!(r.x, 795.0);
    }

    #[test]
    fn refit_repositions_inside_bounds() {
        // A rect clamped to zero width at the right edge grows back inward.
        let r = super::refit_in_bounds(Rect::new(800.0, 100.0, 0.0, 50.0), BOUNDS, 5.0);
        assert_eq!(r, Rect::new(795.0, 100.0, 5.0, 50.0));
    }

    #[test]
    fn translate_clamps_to_full_containment() {
        let r = Rect::new(700.0, 500.0, 80.0, 80.0);
        let moved = translate_within(r, 500.0, 500.0, BOUNDS);
        assert_eq!(moved, Rect::new(720.0, 520.0, 80.0, 80.0));
        let moved = translate_within(r, -1000.0, -1000.0, BOUNDS);
        assert_eq!(moved, Rect::new(0.0, 0.0, 80.0, 80.0));
    }
}
