use alloc::vec::Vec;
use core::sync::atomic::{AtomicUsize, Ordering};

use crate::offsets::OffsetIndex;
use crate::{Item, ItemId};

static NEXT_SNAPSHOT_ID: AtomicUsize = AtomicUsize::new(1);

/// An immutable snapshot of the ordered item sequence plus its offset index.
///
/// Every constructed snapshot gets a process-unique id, independent of its `version`. Clones share
/// the id of the snapshot they were cloned from.
#[derive(Clone, Debug)]
pub struct ListModel<P> {
    items: Vec<Item<P>>,
    offsets: OffsetIndex,
    version: u64,
    snapshot_id: u64,
}

impl<P> ListModel<P> {
    pub fn new(items: Vec<Item<P>>) -> Self {
        Self::with_version(items, 0)
    }

    /// Builds a snapshot tagged with `version`.
    ///
    /// Handles created against this snapshot carry the same version in their
    /// [`crate::HandleSlot`].
    pub fn with_version(items: Vec<Item<P>>, version: u64) -> Self {
        let offsets = OffsetIndex::from_heights(items.iter().map(Item::height));
        Self {
            items,
            offsets,
            version,
            snapshot_id: NEXT_SNAPSHOT_ID.fetch_add(1, Ordering::Relaxed) as u64,
        }
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Identity of this snapshot. Two separately built models never share it, even with equal
    /// versions.
    pub fn snapshot_id(&self) -> u64 {
        self.snapshot_id
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[Item<P>] {
        &self.items
    }

    pub fn offsets(&self) -> &OffsetIndex {
        &self.offsets
    }

    pub fn item_at(&self, index: usize) -> Option<&Item<P>> {
        self.items.get(index)
    }

    pub fn height_at(&self, index: usize) -> Option<f32> {
        self.items.get(index).map(Item::height)
    }

    pub fn offset_at(&self, index: usize) -> Option<f32> {
        self.offsets.start_of(index)
    }

    pub fn end_at(&self, index: usize) -> Option<f32> {
        self.offsets.end_of(index)
    }

    pub fn total_extent(&self) -> f32 {
        self.offsets.total()
    }

    /// Clamps `index` into `[0, count - 1]`, or `None` when the model is empty.
    pub fn clamp_index(&self, index: usize) -> Option<usize> {
        (!self.items.is_empty()).then(|| index.min(self.items.len() - 1))
    }

    pub fn index_at_offset(&self, offset: f32) -> Option<usize> {
        self.offsets.index_at_offset(offset)
    }

    /// Finds the index of the section header with the given id.
    pub fn header_index(&self, id: &ItemId) -> Option<usize> {
        self.items.iter().position(|it| it.id() == Some(id))
    }
}

impl<P> Default for ListModel<P> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
