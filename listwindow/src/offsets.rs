use alloc::vec::Vec;

/// Prefix sums over item heights: `start_of(i)` is the sum of all heights before `i`.
///
/// Built once per snapshot in a single pass and never mutated afterwards.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OffsetIndex {
    starts: Vec<f32>,
    total: f32,
}

impl OffsetIndex {
    pub fn from_heights(heights: impl IntoIterator<Item = f32>) -> Self {
        let heights = heights.into_iter();
        let mut starts = Vec::with_capacity(heights.size_hint().0);
        let mut total = 0.0f32;
        for h in heights {
            starts.push(total);
            total += h;
        }
        Self { starts, total }
    }

    pub fn len(&self) -> usize {
        self.starts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }

    /// Offset where the list ends (`0` for an empty list).
    pub fn total(&self) -> f32 {
        self.total
    }

    pub fn start_of(&self, index: usize) -> Option<f32> {
        self.starts.get(index).copied()
    }

    pub fn end_of(&self, index: usize) -> Option<f32> {
        if index >= self.starts.len() {
            return None;
        }
        Some(self.starts.get(index + 1).copied().unwrap_or(self.total))
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.starts
    }

    /// Returns the largest index whose start offset is `<= offset`.
    ///
    /// Offsets at or before the list start (and NaN) map to index 0. Returns `None` for an empty
    /// index.
    pub fn index_at_offset(&self, offset: f32) -> Option<usize> {
        if self.starts.is_empty() {
            return None;
        }
        if offset.is_nan() || offset <= 0.0 {
            return Some(0);
        }
        // starts[0] == 0 <= offset, so the partition point is at least 1.
        let consumed = self.starts.partition_point(|&s| s <= offset);
        Some(consumed.saturating_sub(1))
    }

    /// Returns the number of items whose start offset lies strictly before `offset`.
    pub fn count_starting_before(&self, offset: f32) -> usize {
        if offset.is_nan() || offset <= 0.0 {
            return 0;
        }
        self.starts.partition_point(|&s| s < offset)
    }
}
