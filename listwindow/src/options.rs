use alloc::sync::Arc;

use crate::{ItemId, WindowRange};

/// Fired with the new buffered window whenever it differs from the previously applied one.
pub type VisibleRangeChangedCallback = Arc<dyn Fn(WindowRange) + Send + Sync>;

/// Fired when the host reports an item activation (e.g. a header being toggled).
///
/// The engine only routes the identifier; it attaches no behavior to it.
pub type ItemActivatedCallback = Arc<dyn Fn(&ItemId) + Send + Sync>;

/// Configuration for [`crate::ListWindow`].
///
/// Cheap to clone: callbacks are stored in `Arc`s.
#[derive(Clone)]
pub struct ListWindowOptions {
    /// Extra items materialized beyond each edge of the strictly visible range.
    pub buffer_count: usize,

    pub initial_viewport_extent: f32,
    pub initial_scroll_offset: f32,

    /// Starts the window paused (no reconciliation until resumed).
    pub paused: bool,

    pub on_visible_range_changed: Option<VisibleRangeChangedCallback>,
    pub on_item_activated: Option<ItemActivatedCallback>,
}

impl ListWindowOptions {
    pub fn new() -> Self {
        Self {
            buffer_count: 3,
            initial_viewport_extent: 0.0,
            initial_scroll_offset: 0.0,
            paused: false,
            on_visible_range_changed: None,
            on_item_activated: None,
        }
    }

    pub fn with_buffer_count(mut self, buffer_count: usize) -> Self {
        self.buffer_count = buffer_count;
        self
    }

    pub fn with_viewport_extent(mut self, viewport_extent: f32) -> Self {
        self.initial_viewport_extent = viewport_extent;
        self
    }

    pub fn with_scroll_offset(mut self, scroll_offset: f32) -> Self {
        self.initial_scroll_offset = scroll_offset;
        self
    }

    pub fn with_paused(mut self, paused: bool) -> Self {
        self.paused = paused;
        self
    }

    pub fn with_on_visible_range_changed(
        mut self,
        f: Option<impl Fn(WindowRange) + Send + Sync + 'static>,
    ) -> Self {
        self.on_visible_range_changed = f.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_on_item_activated(
        mut self,
        f: Option<impl Fn(&ItemId) + Send + Sync + 'static>,
    ) -> Self {
        self.on_item_activated = f.map(|f| Arc::new(f) as _);
        self
    }
}

impl Default for ListWindowOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for ListWindowOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ListWindowOptions")
            .field("buffer_count", &self.buffer_count)
            .field("initial_viewport_extent", &self.initial_viewport_extent)
            .field("initial_scroll_offset", &self.initial_scroll_offset)
            .field("paused", &self.paused)
            .finish_non_exhaustive()
    }
}
