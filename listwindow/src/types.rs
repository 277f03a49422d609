/// A half-open index range `[start_index, end_index)` over the current model snapshot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowRange {
    pub start_index: usize,
    pub end_index: usize, // exclusive
}

impl WindowRange {
    pub const EMPTY: Self = Self {
        start_index: 0,
        end_index: 0,
    };

    /// Creates a range, collapsing inverted bounds to an empty range at `start_index`.
    pub fn new(start_index: usize, end_index: usize) -> Self {
        Self {
            start_index,
            end_index: end_index.max(start_index),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start_index >= self.end_index
    }

    pub fn len(&self) -> usize {
        self.end_index.saturating_sub(self.start_index)
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.start_index && index < self.end_index
    }

    pub fn indices(&self) -> core::ops::Range<usize> {
        self.start_index..self.end_index.max(self.start_index)
    }

    /// Clamps both bounds to `[0, count]`.
    pub fn clamp_to(self, count: usize) -> Self {
        Self::new(self.start_index.min(count), self.end_index.min(count))
    }

    /// Expands the range by `buffer_count` items on each side, clamped to `[0, count]`.
    pub fn buffered(self, buffer_count: usize, count: usize) -> Self {
        if self.is_empty() {
            return self.clamp_to(count);
        }
        Self::new(
            self.start_index.saturating_sub(buffer_count),
            self.end_index.saturating_add(buffer_count).min(count),
        )
    }
}

/// The place a materialized handle occupies: the snapshot it belongs to, its index, and its
/// position along the scroll axis.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HandleSlot {
    /// Version of the model snapshot the handle was created against.
    pub version: u64,
    pub index: usize,
    /// Start offset in the scroll axis.
    pub start: f32,
    pub height: f32,
}

impl HandleSlot {
    pub fn end(&self) -> f32 {
        self.start + self.height
    }
}
