//! Core engine of the multicrop editor.
//!
//! The library is UI-free: it models the region collection, the
//! view/content coordinate transform, the pointer interaction state
//! machine and the selection/handle affordances, and exposes crop export.
//! The Slint front end in `main.rs` is a thin event-forwarding shell on
//! top of [`interaction::Editor`].

pub mod config;
pub mod export;
pub mod geometry;
pub mod interaction;
pub mod region;
pub mod selection;
pub mod viewport;

pub use geometry::{Handle, Point, Rect};
pub use interaction::{Editor, EditorEvent, Mode, PointerButton};
pub use region::{Region, RegionId, RegionStore};
pub use selection::{CursorIcon, HandleAnchor, HitTarget};
pub use viewport::Viewport;
