//! Selection tracking, corner handle affordances and hit testing.

use crate::geometry::{Handle, Point, Rect};
use crate::region::{Region, RegionId, RegionStore};
use crate::viewport::Viewport;

/// On-screen edge length of a corner handle, in view pixels. Handles keep
/// this size regardless of zoom level.
pub const HANDLE_SIZE: f32 = 8.0;

/// A corner resize affordance of the selected region. Exists only while
/// its region is selected; its position is recomputed from the region's
/// geometry, never cached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandleAnchor {
    pub handle: Handle,
    pub region: RegionId,
    /// Center of the affordance, in content coordinates.
    pub position: Point,
}

/// The four corner anchors for a region's current geometry.
pub fn handle_anchors(region: &Region) -> [HandleAnchor; 4] {
    Handle::ALL.map(|handle| HandleAnchor {
        handle,
        region: region.id,
        position: region.rect.corner(handle),
    })
}

/// At most one region is selected at any time.
#[derive(Debug, Default)]
pub struct Selection {
    current: Option<RegionId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<RegionId> {
        self.current
    }

    /// Updates the selection. Returns `false` when `id` is already the
    /// selection, so callers can keep `select` idempotent.
    pub fn set(&mut self, id: Option<RegionId>) -> bool {
        if self.current == id {
            return false;
        }
        self.current = id;
        true
    }
}

/// What sits under the pointer, in fixed priority order: a handle of the
/// selected region beats any region body, which beats the content area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HitTarget {
    Handle { handle: Handle, region: RegionId },
    RegionBody(RegionId),
    Content,
    Outside,
}

/// Resolves the topmost target under a view-space point. Handle hits use
/// view-space distance because the affordance size is defined in view
/// pixels; body and content hits happen in content space.
pub fn hit_test(
    view_pos: Point,
    viewport: &Viewport,
    store: &RegionStore,
    selection: &Selection,
    bounds: Rect,
    handle_size: f32,
) -> HitTarget {
    let half = handle_size / 2.0;
    if let Some(region) = selection.selected().and_then(|id| store.get(id)) {
        for anchor in handle_anchors(region) {
            let center = viewport.to_view(anchor.position);
            if (view_pos.x - center.x).abs() <= half && (view_pos.y - center.y).abs() <= half {
                return HitTarget::Handle {
                    handle: anchor.handle,
                    region: anchor.region,
                };
            }
        }
    }

    let content = viewport.to_content(view_pos);

    // The selected region sits visually on top; among the rest the most
    // recently created wins.
    if let Some(region) = selection.selected().and_then(|id| store.get(id)) {
        if region.rect.contains(content) {
            return HitTarget::RegionBody(region.id);
        }
    }
    let mut body_hit = None;
    for region in store.iter() {
        if region.rect.contains(content) {
            body_hit = Some(region.id);
        }
    }
    if let Some(id) = body_hit {
        return HitTarget::RegionBody(id);
    }

    if bounds.contains(content) {
        HitTarget::Content
    } else {
        HitTarget::Outside
    }
}

/// Pointer affordance shown for a hover target or an active gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorIcon {
    Default,
    Crosshair,
    Move,
    /// Diagonal resize along the top-left/bottom-right axis.
    ResizeNwSe,
    /// Diagonal resize along the top-right/bottom-left axis.
    ResizeNeSw,
    Grab,
    Grabbing,
}

pub fn resize_cursor(handle: Handle) -> CursorIcon {
    match handle {
        Handle::TopLeft | Handle::BottomRight => CursorIcon::ResizeNwSe,
        Handle::TopRight | Handle::BottomLeft => CursorIcon::ResizeNeSw,
    }
}

/// Cursor for an idle hover. The pan modifier turns the draw affordance
/// into an open hand over the content area.
pub fn hover_cursor(hit: HitTarget, pan_modifier: bool) -> CursorIcon {
    match hit {
        HitTarget::Handle { handle, .. } => resize_cursor(handle),
        HitTarget::RegionBody(_) => CursorIcon::Move,
        HitTarget::Content => {
            if pan_modifier {
                CursorIcon::Grab
            } else {
                CursorIcon::Crosshair
            }
        }
        HitTarget::Outside => CursorIcon::Default,
    }
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

    fn store_with_two_overlapping() -> RegionStore {
        let mut store = RegionStore::new();
        store.create(Rect::new(100.0, 100.0, 200.0, 200.0));
        store.create(Rect::new(150.0, 150.0, 200.0, 200.0));
        store
    }

    #[test]
    fn anchors_track_geometry() {
        let region = Region {
            id: 1,
            rect: Rect::new(10.0, 20.0, 30.0, 40.0),
        };
        let anchors = handle_anchors(&region);
        assert_eq!(anchors[0].position, Point::new(10.0, 20.0));
        assert_eq!(anchors[3].position, Point::new(40.0, 60.0));
        assert!(anchors.iter().all(|a| a.region == 1));
    }

    #[test]
    fn set_is_idempotent() {
        let mut sel = Selection::new();
        assert!(sel.set(Some(3)));
        assert!(!sel.set(Some(3)));
        assert!(sel.set(None));
        assert!(!sel.set(None));
    }

    #[test]
    fn handle_beats_body() {
        let store = store_with_two_overlapping();
        let mut sel = Selection::new();
        sel.set(Some(1));
        let vp = Viewport::new();
        // (300,300) is region 1's bottom-right corner and inside region 2.
        let hit = hit_test(Point::new(300.0, 300.0), &vp, &store, &sel, BOUNDS, HANDLE_SIZE);
        assert_eq!(
            hit,
            HitTarget::Handle {
                handle: Handle::BottomRight,
                region: 1
            }
        );
    }

    #[test]
    fn selected_body_beats_later_region() {
        let store = store_with_two_overlapping();
        let mut sel = Selection::new();
        sel.set(Some(1));
        let vp = Viewport::new();
        // Overlap zone away from any handle of region 1.
        let hit = hit_test(Point::new(200.0, 250.0), &vp, &store, &sel, BOUNDS, HANDLE_SIZE);
        assert_eq!(hit, HitTarget::RegionBody(1));
    }

    #[test]
    fn unselected_overlap_prefers_topmost() {
        let store = store_with_two_overlapping();
        let sel = Selection::new();
        let vp = Viewport::new();
        let hit = hit_test(Point::new(200.0, 250.0), &vp, &store, &sel, BOUNDS, HANDLE_SIZE);
        assert_eq!(hit, HitTarget::RegionBody(2));
    }

    #[test]
    fn handle_hit_area_is_zoom_invariant() {
        let mut store = RegionStore::new();
        store.create(Rect::new(100.0, 100.0, 100.0, 100.0));
        let mut sel = Selection::new();
        sel.set(Some(1));
        let mut vp = Viewport::new();
        assert!(vp.zoom(10.0, Point::new(0.0, 0.0)));

        // 3 view pixels off the corner stays a handle hit at any zoom.
        let corner_view = vp.to_view(Point::new(200.0, 200.0));
        let probe = Point::new(corner_view.x + 3.0, corner_view.y - 3.0);
        let hit = hit_test(probe, &vp, &store, &sel, BOUNDS, HANDLE_SIZE);
        assert!(matches!(hit, HitTarget::Handle { .. }));
    }

    #[test]
    fn content_and_outside_fall_through() {
        let store = RegionStore::new();
        let sel = Selection::new();
        let vp = Viewport::new();
        let inside = hit_test(Point::new(5.0, 5.0), &vp, &store, &sel, BOUNDS, HANDLE_SIZE);
        assert_eq!(inside, HitTarget::Content);
        let outside = hit_test(Point::new(900.0, 5.0), &vp, &store, &sel, BOUNDS, HANDLE_SIZE);
        assert_eq!(outside, HitTarget::Outside);

        assert_eq!(hover_cursor(inside, false), CursorIcon::Crosshair);
        assert_eq!(hover_cursor(inside, true), CursorIcon::Grab);
        assert_eq!(hover_cursor(outside, false), CursorIcon::Default);
    }
}
