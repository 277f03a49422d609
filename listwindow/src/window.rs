use core::cmp;

use crate::WindowRange;
use crate::offsets::OffsetIndex;

/// Computes the strictly visible range (no buffer) for a scroll offset and viewport extent.
///
/// - `start` is the last item starting at or before `scroll_offset` (0 for offsets `<= 0`).
/// - `end` is one past the last item starting strictly before the viewport's bottom edge, so the
///   item straddling the bottom edge is included.
///
/// A non-positive (or non-finite) viewport yields just the item at `start`. Runs in `O(log n)`.
pub fn visible_range(offsets: &OffsetIndex, scroll_offset: f32, viewport_extent: f32) -> WindowRange {
    let count = offsets.len();
    let Some(start) = offsets.index_at_offset(sanitize(scroll_offset)) else {
        return WindowRange::EMPTY;
    };

    if !(viewport_extent.is_finite() && viewport_extent > 0.0) {
        return WindowRange::new(start, cmp::min(count, start + 1));
    }

    let bottom = sanitize(scroll_offset) + viewport_extent;
    let end = cmp::max(offsets.count_starting_before(bottom), start + 1);
    WindowRange::new(start, cmp::min(count, end))
}

/// Computes the buffered visible range: [`visible_range`] expanded by `buffer_count` items on each
/// side and clamped to `[0, n]`.
pub fn compute_visible_range(
    offsets: &OffsetIndex,
    scroll_offset: f32,
    viewport_extent: f32,
    buffer_count: usize,
) -> WindowRange {
    visible_range(offsets, scroll_offset, viewport_extent).buffered(buffer_count, offsets.len())
}

fn sanitize(scroll_offset: f32) -> f32 {
    if scroll_offset.is_finite() {
        scroll_offset
    } else {
        0.0
    }
}
