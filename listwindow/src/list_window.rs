use alloc::vec::Vec;

use crate::recycle::{ReconcileReport, RecyclingController};
use crate::window::compute_visible_range;
use crate::{FrameState, Item, ItemId, ListModel, ListWindowOptions, ViewFactory, WindowRange};

/// The windowing pipeline: a model snapshot, the host's view factory, and the handles currently
/// materialized for the buffered visible window.
///
/// Every mutating call runs the whole pipeline synchronously
/// (window computation, then reconciliation, then host factory calls) before returning:
/// - It does not own any scroll container. Your adapter feeds it scroll offsets and viewport
///   extents.
/// - It owns the factory, so factory callbacks cannot re-enter the pipeline.
///
/// Dropping a `ListWindow` destroys every live handle.
///
/// For duplicate-sample suppression and smooth scroll-to-index, see the `listwindow-adapter` crate.
pub struct ListWindow<P, F: ViewFactory<P>> {
    options: ListWindowOptions,
    model: ListModel<P>,
    recycler: RecyclingController<F::Handle>,
    factory: F,
    scroll_offset: f32,
    viewport_extent: f32,
    paused: bool,
    last_range: WindowRange,
}

impl<P, F: ViewFactory<P>> ListWindow<P, F> {
    /// Creates an empty window. Nothing is materialized until items are set.
    pub fn new(factory: F, options: ListWindowOptions) -> Self {
        vdebug!(
            buffer_count = options.buffer_count,
            viewport_extent = options.initial_viewport_extent,
            "ListWindow::new"
        );
        Self {
            scroll_offset: options.initial_scroll_offset,
            viewport_extent: options.initial_viewport_extent,
            paused: options.paused,
            options,
            model: ListModel::default(),
            recycler: RecyclingController::new(),
            factory,
            last_range: WindowRange::EMPTY,
        }
    }

    pub fn options(&self) -> &ListWindowOptions {
        &self.options
    }

    pub fn model(&self) -> &ListModel<P> {
        &self.model
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    /// Mutable access to the host factory (e.g. to swap injected resources).
    pub fn factory_mut(&mut self) -> &mut F {
        &mut self.factory
    }

    pub fn count(&self) -> usize {
        self.model.count()
    }

    pub fn total_extent(&self) -> f32 {
        self.model.total_extent()
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    pub fn viewport_extent(&self) -> f32 {
        self.viewport_extent
    }

    pub fn buffer_count(&self) -> usize {
        self.options.buffer_count
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// The buffered window the live handles were last reconciled against.
    pub fn visible_range(&self) -> WindowRange {
        self.recycler.range()
    }

    /// The buffered window for the current offset and viewport, without applying it.
    pub fn compute_range(&self) -> WindowRange {
        compute_visible_range(
            self.model.offsets(),
            self.scroll_offset,
            self.viewport_extent,
            self.options.buffer_count,
        )
    }

    pub fn handle(&self, index: usize) -> Option<&F::Handle> {
        self.recycler.handle(index)
    }

    pub fn handle_mut(&mut self, index: usize) -> Option<&mut F::Handle> {
        self.recycler.handle_mut(index)
    }

    pub fn active_len(&self) -> usize {
        self.recycler.active_len()
    }

    pub fn active_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.recycler.active_indices()
    }

    /// Collects the active indices into `out` (clears `out` first).
    pub fn collect_active_indices(&self, out: &mut Vec<usize>) {
        out.clear();
        out.extend(self.recycler.active_indices());
    }

    pub fn unrenderable_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.recycler.unrenderable_indices()
    }

    /// Replaces the item sequence.
    ///
    /// Every live handle of the old snapshot is destroyed before the new snapshot is adopted, so all
    /// `destroy` calls precede any `construct` for the new items. The scroll offset is kept.
    pub fn set_items(&mut self, items: Vec<Item<P>>) -> ReconcileReport<F::Error> {
        let mut report = ReconcileReport::empty();
        report.destroyed = self.recycler.clear(&mut self.factory);

        let version = self.model.version().wrapping_add(1);
        self.model = ListModel::with_version(items, version);
        vdebug!(
            count = self.model.count(),
            total_extent = self.model.total_extent(),
            version,
            "ListWindow::set_items"
        );

        report.merge(self.refresh());
        report
    }

    /// Applies a scroll offset sample and runs the pipeline.
    pub fn set_scroll_offset(&mut self, offset: f32) -> ReconcileReport<F::Error> {
        self.scroll_offset = if offset.is_finite() { offset } else { 0.0 };
        self.refresh()
    }

    pub fn set_viewport_extent(&mut self, extent: f32) -> ReconcileReport<F::Error> {
        self.viewport_extent = if extent.is_finite() { extent.max(0.0) } else { 0.0 };
        self.refresh()
    }

    /// Applies viewport extent and scroll offset in a single pass.
    pub fn set_viewport_and_scroll(
        &mut self,
        viewport_extent: f32,
        scroll_offset: f32,
    ) -> ReconcileReport<F::Error> {
        self.viewport_extent = if viewport_extent.is_finite() {
            viewport_extent.max(0.0)
        } else {
            0.0
        };
        self.scroll_offset = if scroll_offset.is_finite() {
            scroll_offset
        } else {
            0.0
        };
        self.refresh()
    }

    pub fn set_buffer_count(&mut self, buffer_count: usize) -> ReconcileReport<F::Error> {
        self.options.buffer_count = buffer_count;
        self.refresh()
    }

    /// Pauses or resumes reconciliation.
    ///
    /// While paused, scroll and viewport updates are recorded but nothing is created or destroyed.
    /// Resuming runs the pipeline once.
    pub fn set_paused(&mut self, paused: bool) -> ReconcileReport<F::Error> {
        if self.paused == paused {
            return ReconcileReport::empty();
        }
        self.paused = paused;
        vdebug!(paused, "ListWindow::set_paused");
        if paused {
            ReconcileReport::empty()
        } else {
            self.refresh()
        }
    }

    pub fn set_on_visible_range_changed(
        &mut self,
        f: Option<impl Fn(WindowRange) + Send + Sync + 'static>,
    ) {
        self.options.on_visible_range_changed = f.map(|f| alloc::sync::Arc::new(f) as _);
    }

    pub fn set_on_item_activated(&mut self, f: Option<impl Fn(&ItemId) + Send + Sync + 'static>) {
        self.options.on_item_activated = f.map(|f| alloc::sync::Arc::new(f) as _);
    }

    /// Recomputes the window for the current offset and reconciles the live handles against it.
    ///
    /// Does nothing while paused. Fires `on_visible_range_changed` when the window differs from the
    /// last one applied.
    pub fn refresh(&mut self) -> ReconcileReport<F::Error> {
        if self.paused {
            return ReconcileReport::empty();
        }
        let range = self.compute_range();
        let report = self.recycler.apply(&self.model, range, &mut self.factory);

        if range != self.last_range {
            vtrace!(
                start = range.start_index,
                end = range.end_index,
                "ListWindow: visible range changed"
            );
            self.last_range = range;
            if let Some(cb) = &self.options.on_visible_range_changed {
                cb(range);
            }
        }
        report
    }

    /// Destroys every live handle but keeps the snapshot. The next [`Self::refresh`] rebuilds them.
    pub fn clear(&mut self) -> usize {
        self.recycler.clear(&mut self.factory)
    }

    /// Destroys the handle at `index` on the host's behalf. Unknown indices are ignored.
    pub fn release(&mut self, index: usize) -> bool {
        self.recycler.release(index, &mut self.factory)
    }

    /// Refreshes the content of a still-visible item through the host's `update`.
    pub fn refresh_item(&mut self, index: usize) -> bool {
        self.recycler.update(&self.model, index, &mut self.factory)
    }

    /// Refreshes every still-visible item matching `pred`. Returns how many were refreshed.
    pub fn refresh_where(&mut self, pred: impl FnMut(usize, &Item<P>) -> bool) -> usize {
        self.recycler
            .update_where(&self.model, pred, &mut self.factory)
    }

    /// Routes an activation of the item at `index`. Only items with an id (headers) are routed.
    pub fn activate(&self, index: usize) -> bool {
        let Some(id) = self.model.item_at(index).and_then(Item::id) else {
            return false;
        };
        self.notify_activated(id);
        true
    }

    /// Routes an activation reported by the host for `id`.
    pub fn notify_activated(&self, id: &ItemId) {
        vtrace!(id = id.as_str(), "ListWindow::notify_activated");
        if let Some(cb) = &self.options.on_item_activated {
            cb(id);
        }
    }

    /// Largest offset that still keeps the viewport inside the content.
    pub fn max_scroll_offset(&self) -> f32 {
        (self.model.total_extent() - self.viewport_extent).max(0.0)
    }

    /// The current offset as a position in `[0, 1]` (`0` when the content fits the viewport).
    pub fn normalized_position(&self) -> f32 {
        normalize(self.scroll_offset, self.max_scroll_offset())
    }

    pub fn offset_for_normalized(&self, position: f32) -> f32 {
        clamp01(position) * self.max_scroll_offset()
    }

    /// The normalized position that brings `index` to the top of the viewport, clamped so the last
    /// items end flush with the viewport instead of overscrolling. `index` is clamped to the model.
    pub fn normalized_for_index(&self, index: usize) -> f32 {
        let Some(target) = self
            .model
            .clamp_index(index)
            .and_then(|i| self.model.offset_at(i))
        else {
            return 0.0;
        };
        normalize(target, self.max_scroll_offset())
    }

    pub fn frame_state(&self) -> FrameState {
        FrameState {
            scroll_offset: self.scroll_offset,
            viewport_extent: self.viewport_extent,
        }
    }

    pub fn restore_frame_state(&mut self, frame: FrameState) -> ReconcileReport<F::Error> {
        self.set_viewport_and_scroll(frame.viewport_extent, frame.scroll_offset)
    }
}

impl<P, F: ViewFactory<P>> Drop for ListWindow<P, F> {
    fn drop(&mut self) {
        self.recycler.clear(&mut self.factory);
    }
}

impl<P, F: ViewFactory<P>> core::fmt::Debug for ListWindow<P, F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ListWindow")
            .field("options", &self.options)
            .field("count", &self.model.count())
            .field("version", &self.model.version())
            .field("scroll_offset", &self.scroll_offset)
            .field("viewport_extent", &self.viewport_extent)
            .field("paused", &self.paused)
            .field("range", &self.recycler.range())
            .finish_non_exhaustive()
    }
}

fn normalize(offset: f32, max: f32) -> f32 {
    if max > 0.0 {
        clamp01(offset / max)
    } else {
        0.0
    }
}

fn clamp01(v: f32) -> f32 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}
