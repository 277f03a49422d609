//! A windowed list-virtualization engine for heterogeneous lists.
//!
//! For scroll-sample suppression and smooth scroll-to-index, see the `listwindow-adapter` crate.
//!
//! The engine materializes only the slice of a long list that is on screen (plus a small buffer),
//! for lists that mix plain rows with taller section headers:
//! - [`ListModel`]: an immutable snapshot of the items plus an [`OffsetIndex`] of prefix sums.
//! - [`compute_visible_range`]: `O(log n)` offset → index range lookup with buffering.
//! - [`RecyclingController`]: turns window changes into destroy/create calls on the host's
//!   [`ViewFactory`], isolating per-index construction failures.
//! - [`ListWindow`]: runs the whole pipeline synchronously for each scroll sample.
//!
//! It is UI-agnostic. A host layer is expected to provide:
//! - the ordered items, with heights precomputed per item kind ([`ItemHeights`])
//! - viewport extent and scroll offset samples
//! - a [`ViewFactory`] that builds and tears down the concrete row views
//!
//! Handles are never reused across indices: every window entry gets a freshly constructed handle
//! and every exit destroys it.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod factory;
mod item;
mod list_window;
mod model;
mod offsets;
mod options;
mod recycle;
mod state;
mod types;
mod window;

#[cfg(test)]
mod tests;

pub use factory::ViewFactory;
pub use item::{HeaderInfo, Item, ItemHeights, ItemId, ItemKind};
pub use list_window::ListWindow;
pub use model::ListModel;
pub use offsets::OffsetIndex;
pub use options::{ItemActivatedCallback, ListWindowOptions, VisibleRangeChangedCallback};
pub use recycle::{
    ConstructFailure, Instruction, ReconcileReport, RecyclingController, collect_instructions,
    reconcile,
};
pub use state::FrameState;
pub use types::{HandleSlot, WindowRange};
pub use window::{compute_visible_range, visible_range};
