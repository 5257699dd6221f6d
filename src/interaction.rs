//! The pointer/keyboard interaction state machine.
//!
//! [`Editor`] owns the region store, the viewport, the selection and the
//! current [`Mode`], and is the only mutator of any of them. Raw input
//! enters through `pointer_down` / `pointer_move` / `pointer_up` /
//! `wheel_zoom` plus the external entry points `select`, `delete_selected`
//! and `set_image`; each call funnels through one dispatcher keyed on the
//! current mode and buffers [`EditorEvent`]s that the caller drains
//! synchronously before dispatching the next input.

use crate::geometry::{
    Handle, Point, Rect, clamp_to_bounds, normalize, resize_by_handle, translate_within,
};
use crate::region::{RegionId, RegionStore};
use crate::selection::{
    self, CursorIcon, HANDLE_SIZE, HandleAnchor, HitTarget, Selection, handle_anchors, hit_test,
};
use crate::viewport::Viewport;

/// A draw gesture below this size (content units, both axes, strict) is
/// discarded on release instead of committing a region.
pub const MIN_DRAW_SIZE: f32 = 5.0;

/// Resizing clamps each dimension to at least this many content units.
pub const MIN_REGION_SIZE: f32 = 1.0;

/// Default wheel-zoom step per scroll notch.
pub const DEFAULT_ZOOM_STEP: f32 = 1.15;

/// The current interaction gesture. Exactly one variant is active at a
/// time; drag variants carry the geometry snapshot taken at drag start so
/// later moves never read back the live, already-mutated rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Mode {
    Idle,
    Panning {
        last_view: Point,
    },
    Drawing {
        start: Point,
        rect: Rect,
    },
    Moving {
        region: RegionId,
        start: Point,
        origin: Rect,
    },
    Resizing {
        region: RegionId,
        handle: Handle,
        start: Point,
        origin: Rect,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Left,
    Middle,
    Other,
}

/// Change notification emitted by the editor. All events fire within the
/// same event-processing step that caused them; a geometry change that
/// leaves the selection alone emits no `SelectionChanged`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EditorEvent {
    RegionsChanged,
    SelectionChanged(Option<RegionId>),
    /// The transient draw rectangle appeared, changed or went away.
    PreviewChanged,
    ViewportChanged,
    PointerContentPosition { x: f32, y: f32 },
}

/// The interaction controller. Sole owner of all mutable editing state;
/// collaborators (list view, export) only read snapshots.
#[derive(Debug)]
pub struct Editor {
    store: RegionStore,
    viewport: Viewport,
    selection: Selection,
    bounds: Option<Rect>,
    mode: Mode,
    handle_size: f32,
    zoom_step: f32,
    events: Vec<EditorEvent>,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor {
    pub fn new() -> Self {
        Self {
            store: RegionStore::new(),
            viewport: Viewport::new(),
            selection: Selection::new(),
            bounds: None,
            mode: Mode::Idle,
            handle_size: HANDLE_SIZE,
            zoom_step: DEFAULT_ZOOM_STEP,
            events: Vec::new(),
        }
    }

    pub fn set_zoom_step(&mut self, step: f32) {
        if step > 1.0 {
            self.zoom_step = step;
        } else {
            log::warn!("ignoring zoom step {step}: must be greater than 1");
        }
    }

    pub fn set_handle_size(&mut self, size: f32) {
        if size > 0.0 {
            self.handle_size = size;
        } else {
            log::warn!("ignoring handle size {size}: must be positive");
        }
    }

    pub fn store(&self) -> &RegionStore {
        &self.store
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn content_bounds(&self) -> Option<Rect> {
        self.bounds
    }

    pub fn selected(&self) -> Option<RegionId> {
        self.selection.selected()
    }

    pub fn handle_size(&self) -> f32 {
        self.handle_size
    }

    /// The transient rectangle of an in-progress draw gesture.
    pub fn draw_preview(&self) -> Option<Rect> {
        match self.mode {
            Mode::Drawing { rect, .. } => Some(rect),
            _ => None,
        }
    }

    /// Corner anchors for the selected region, recomputed from its current
    /// geometry. `None` when nothing is selected.
    pub fn selection_handles(&self) -> Option<[HandleAnchor; 4]> {
        let region = self.selection.selected().and_then(|id| self.store.get(id))?;
        Some(handle_anchors(region))
    }

    /// Takes all events buffered since the last drain, in emission order.
    pub fn drain_events(&mut self) -> Vec<EditorEvent> {
        std::mem::take(&mut self.events)
    }

    /// Loads a new image: clears all regions and the id counter, drops the
    /// selection and fits the viewport to the new content bounds.
    pub fn set_image(&mut self, width: f32, height: f32, view_width: f32, view_height: f32) {
        let bounds = Rect::from_size(width, height);
        self.store.reset_all();
        self.set_selection(None);
        self.bounds = Some(bounds);
        self.mode = Mode::Idle;
        self.viewport.fit_to_content(bounds, view_width, view_height);
        self.events.push(EditorEvent::RegionsChanged);
        self.events.push(EditorEvent::ViewportChanged);
    }

    /// Refits the viewport, e.g. after the canvas was resized.
    pub fn fit_view(&mut self, view_width: f32, view_height: f32) {
        let Some(bounds) = self.bounds else { return };
        self.viewport.fit_to_content(bounds, view_width, view_height);
        self.events.push(EditorEvent::ViewportChanged);
    }

    /// External selection entry point (sidebar list). Selecting an id that
    /// does not exist leaves all state unchanged.
    pub fn select(&mut self, id: Option<RegionId>) {
        if let Some(id) = id {
            if self.store.get(id).is_none() {
                return;
            }
        }
        self.set_selection(id);
    }

    /// Removes the selected region, clears the selection and notifies.
    /// No-op when nothing is selected.
    pub fn delete_selected(&mut self) {
        let Some(id) = self.selection.selected() else {
            return;
        };
        self.store.remove(id);
        self.set_selection(None);
        self.events.push(EditorEvent::RegionsChanged);
    }

    pub fn pointer_down(&mut self, view: Point, button: PointerButton, pan_modifier: bool) {
        let Some(bounds) = self.bounds else { return };
        if !matches!(self.mode, Mode::Idle) {
            return;
        }

        if button == PointerButton::Middle || (button == PointerButton::Left && pan_modifier) {
            self.mode = Mode::Panning { last_view: view };
            return;
        }
        if button != PointerButton::Left {
            return;
        }

        let content = self.viewport.to_content(view);
        match hit_test(
            view,
            &self.viewport,
            &self.store,
            &self.selection,
            bounds,
            self.handle_size,
        ) {
            HitTarget::Handle { handle, region } => {
                // Handles only exist on the selected region, so no
                // selection change here.
                if let Some(origin) = self.store.get(region).map(|r| r.rect) {
                    self.mode = Mode::Resizing {
                        region,
                        handle,
                        start: content,
                        origin,
                    };
                }
            }
            HitTarget::RegionBody(region) => {
                if let Some(origin) = self.store.get(region).map(|r| r.rect) {
                    self.set_selection(Some(region));
                    self.mode = Mode::Moving {
                        region,
                        start: content,
                        origin,
                    };
                }
            }
            HitTarget::Content => {
                self.set_selection(None);
                self.mode = Mode::Drawing {
                    start: content,
                    rect: Rect::new(content.x, content.y, 0.0, 0.0),
                };
                self.events.push(EditorEvent::PreviewChanged);
            }
            HitTarget::Outside => {}
        }
    }

    pub fn pointer_move(&mut self, view: Point) {
        let Some(bounds) = self.bounds else { return };
        let content = self.viewport.to_content(view);
        self.events.push(EditorEvent::PointerContentPosition {
            x: content.x,
            y: content.y,
        });

        match self.mode {
            Mode::Idle => {
                // Hover only; the cursor is recomputed on demand via
                // `cursor_at`, never by mutating state here.
            }
            Mode::Panning { last_view } => {
                self.viewport.pan(view.x - last_view.x, view.y - last_view.y);
                self.mode = Mode::Panning { last_view: view };
                self.events.push(EditorEvent::ViewportChanged);
            }
            Mode::Drawing { start, .. } => {
                let rect = clamp_to_bounds(normalize(start, content), bounds);
                self.mode = Mode::Drawing { start, rect };
                self.events.push(EditorEvent::PreviewChanged);
            }
            Mode::Moving {
                region,
                start,
                origin,
            } => {
                let delta = content - start;
                let rect = translate_within(origin, delta.x, delta.y, bounds);
                self.store.update_geometry(region, rect);
                self.events.push(EditorEvent::RegionsChanged);
            }
            Mode::Resizing {
                region,
                handle,
                start,
                origin,
            } => {
                let rect = resize_by_handle(origin, handle, start, content, bounds, MIN_REGION_SIZE);
                self.store.update_geometry(region, rect);
                self.events.push(EditorEvent::RegionsChanged);
            }
        }
    }

    pub fn pointer_up(&mut self, _view: Point, button: PointerButton) {
        match self.mode {
            Mode::Idle => {}
            Mode::Panning { .. } => {
                // Either button ends the pan (middle drag or Alt+left).
                self.mode = Mode::Idle;
            }
            Mode::Drawing { rect, .. } => {
                if button != PointerButton::Left {
                    return;
                }
                self.mode = Mode::Idle;
                self.events.push(EditorEvent::PreviewChanged);
                if rect.width > MIN_DRAW_SIZE && rect.height > MIN_DRAW_SIZE {
                    let id = self.store.create(rect);
                    self.events.push(EditorEvent::RegionsChanged);
                    self.set_selection(Some(id));
                } else {
                    // Too small: discard silently, leave nothing selected.
                    self.set_selection(None);
                }
            }
            Mode::Moving { .. } | Mode::Resizing { .. } => {
                if button != PointerButton::Left {
                    return;
                }
                self.mode = Mode::Idle;
                // Geometry was applied live; derived views still refresh.
                self.events.push(EditorEvent::RegionsChanged);
            }
        }
    }

    /// Wheel zoom, anchored under the pointer. `delta_y > 0` zooms in.
    /// Requests that would leave the scale limits are ignored without any
    /// state change or notification.
    pub fn wheel_zoom(&mut self, anchor_view: Point, delta_y: f32) {
        if self.bounds.is_none() || delta_y == 0.0 {
            return;
        }
        let factor = if delta_y > 0.0 {
            self.zoom_step
        } else {
            1.0 / self.zoom_step
        };
        if self.viewport.zoom(factor, anchor_view) {
            self.events.push(EditorEvent::ViewportChanged);
        }
    }

    /// Cursor affordance for the pointer at `view`: gesture-specific while
    /// a drag is active, hover resolution otherwise.
    pub fn cursor_at(&self, view: Point, pan_modifier: bool) -> CursorIcon {
        match self.mode {
            Mode::Panning { .. } => CursorIcon::Grabbing,
            Mode::Drawing { .. } => CursorIcon::Crosshair,
            Mode::Moving { .. } => CursorIcon::Move,
            Mode::Resizing { handle, .. } => selection::resize_cursor(handle),
            Mode::Idle => {
                let Some(bounds) = self.bounds else {
                    return CursorIcon::Default;
                };
                let hit = hit_test(
                    view,
                    &self.viewport,
                    &self.store,
                    &self.selection,
                    bounds,
                    self.handle_size,
                );
                selection::hover_cursor(hit, pan_modifier)
            }
        }
    }

    fn set_selection(&mut self, id: Option<RegionId>) {
        if self.selection.set(id) {
            self.events.push(EditorEvent::SelectionChanged(id));
        }
    }
}
