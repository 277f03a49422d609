use alloc::collections::{BTreeMap, BTreeSet};
use alloc::vec::Vec;

use crate::{HandleSlot, Item, ListModel, ViewFactory, WindowRange};

/// One step of a reconciliation batch.
#[derive(Debug, PartialEq)]
pub enum Instruction<'a, P> {
    Destroy(usize),
    Create(usize, &'a Item<P>),
}

impl<P> Clone for Instruction<'_, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P> Copy for Instruction<'_, P> {}

impl<P> Instruction<'_, P> {
    pub fn index(&self) -> usize {
        match *self {
            Self::Destroy(index) | Self::Create(index, _) => index,
        }
    }
}

/// Diffs two windows into create/destroy instructions without allocating.
///
/// Every `Destroy` (ascending, for indices only in `old`) is emitted before any `Create`
/// (ascending, for indices only in `new`). Indices present in both ranges produce nothing.
/// `Create` indices outside `model` are skipped.
pub fn reconcile<'a, P>(
    model: &'a ListModel<P>,
    old: WindowRange,
    new: WindowRange,
    mut f: impl FnMut(Instruction<'a, P>),
) {
    for index in old.indices().filter(|&i| !new.contains(i)) {
        f(Instruction::Destroy(index));
    }
    for index in new.indices().filter(|&i| !old.contains(i)) {
        let Some(item) = model.item_at(index) else {
            continue;
        };
        f(Instruction::Create(index, item));
    }
}

/// Collects [`reconcile`] output into `out` (clears `out` first).
pub fn collect_instructions<'a, P>(
    model: &'a ListModel<P>,
    old: WindowRange,
    new: WindowRange,
    out: &mut Vec<Instruction<'a, P>>,
) {
    out.clear();
    reconcile(model, old, new, |ins| out.push(ins));
}

/// A handle the host factory failed to construct.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConstructFailure<E> {
    pub index: usize,
    pub error: E,
}

/// What one reconciliation pass did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReconcileReport<E> {
    pub destroyed: usize,
    pub created: usize,
    pub failures: Vec<ConstructFailure<E>>,
}

impl<E> ReconcileReport<E> {
    pub fn empty() -> Self {
        Self {
            destroyed: 0,
            created: 0,
            failures: Vec::new(),
        }
    }

    /// Number of create/destroy operations performed (failed constructs excluded).
    pub fn churn(&self) -> usize {
        self.destroyed + self.created
    }

    pub fn is_noop(&self) -> bool {
        self.churn() == 0 && self.failures.is_empty()
    }

    pub(crate) fn merge(&mut self, other: Self) {
        self.destroyed += other.destroyed;
        self.created += other.created;
        self.failures.extend(other.failures);
    }
}

impl<E> Default for ReconcileReport<E> {
    fn default() -> Self {
        Self::empty()
    }
}

/// Owns the materialized handles of the current window and keeps them in sync with it.
///
/// Invariants:
/// - every active handle's index lies inside [`Self::range`]
/// - all active handles belong to one snapshot (tracked by [`ListModel::snapshot_id`])
#[derive(Clone, Debug)]
pub struct RecyclingController<H> {
    active: BTreeMap<usize, H>,
    unrenderable: BTreeSet<usize>,
    range: WindowRange,
    snapshot_id: Option<u64>,
    version: u64,
}

impl<H> RecyclingController<H> {
    pub fn new() -> Self {
        Self {
            active: BTreeMap::new(),
            unrenderable: BTreeSet::new(),
            range: WindowRange::EMPTY,
            snapshot_id: None,
            version: 0,
        }
    }

    /// The window the active handles were last reconciled against.
    pub fn range(&self) -> WindowRange {
        self.range
    }

    /// Version of the snapshot the active handles were built against.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn active_len(&self) -> usize {
        self.active.len()
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.active.contains_key(&index)
    }

    pub fn handle(&self, index: usize) -> Option<&H> {
        self.active.get(&index)
    }

    pub fn handle_mut(&mut self, index: usize) -> Option<&mut H> {
        self.active.get_mut(&index)
    }

    /// Active indices in ascending order.
    pub fn active_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.active.keys().copied()
    }

    /// Indices whose construction failed during the last pass.
    pub fn unrenderable_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.unrenderable.iter().copied()
    }

    /// Reconciles the active handles against `next`.
    ///
    /// The window diff runs through [`reconcile`]: handles leaving the window are destroyed, then
    /// entering indices are constructed, each in ascending order. Afterwards, indices of `next`
    /// still missing a handle (failed or released earlier) are retried in ascending order. Each
    /// index is attempted at most once per pass.
    ///
    /// If `model` is a different snapshot than the one the handles were built against, all of them
    /// are torn down before anything is created.
    pub fn apply<P, F>(
        &mut self,
        model: &ListModel<P>,
        next: WindowRange,
        factory: &mut F,
    ) -> ReconcileReport<F::Error>
    where
        F: ViewFactory<P, Handle = H>,
    {
        let mut report = ReconcileReport::empty();
        if self.snapshot_id != Some(model.snapshot_id()) {
            if !self.active.is_empty() {
                vdebug!(
                    active = self.active.len(),
                    from = self.version,
                    to = model.version(),
                    "RecyclingController::apply: snapshot changed, tearing down"
                );
            }
            report.destroyed += self.clear(factory);
            self.snapshot_id = Some(model.snapshot_id());
            self.version = model.version();
        }

        let prev = self.range;
        let next = next.clamp_to(model.count());
        self.unrenderable.clear();

        reconcile(model, prev, next, |ins| match ins {
            Instruction::Destroy(index) => self.destroy_at::<P, F>(index, factory, &mut report),
            Instruction::Create(index, item) => {
                self.construct_at(model, index, item, factory, &mut report)
            }
        });

        for index in next.indices() {
            if self.active.contains_key(&index) || self.unrenderable.contains(&index) {
                continue;
            }
            if let Some(item) = model.item_at(index) {
                self.construct_at(model, index, item, factory, &mut report);
            }
        }

        self.range = next;
        vtrace!(
            start = next.start_index,
            end = next.end_index,
            destroyed = report.destroyed,
            created = report.created,
            failed = report.failures.len(),
            "RecyclingController::apply"
        );
        report
    }

    fn destroy_at<P, F>(
        &mut self,
        index: usize,
        factory: &mut F,
        report: &mut ReconcileReport<F::Error>,
    ) where
        F: ViewFactory<P, Handle = H>,
    {
        match self.active.remove(&index) {
            Some(handle) => {
                factory.destroy(handle);
                report.destroyed += 1;
            }
            None => {
                vtrace!(index, "RecyclingController::apply: no live handle to destroy");
            }
        }
    }

    fn construct_at<P, F>(
        &mut self,
        model: &ListModel<P>,
        index: usize,
        item: &Item<P>,
        factory: &mut F,
        report: &mut ReconcileReport<F::Error>,
    ) where
        F: ViewFactory<P, Handle = H>,
    {
        let Some(start) = model.offset_at(index) else {
            return;
        };
        let slot = HandleSlot {
            version: self.version,
            index,
            start,
            height: item.height(),
        };
        match factory.construct(slot, item) {
            Ok(handle) => {
                self.active.insert(index, handle);
                report.created += 1;
            }
            Err(error) => {
                vwarn!(index, error = ?error, "handle construction failed; retrying next pass");
                self.unrenderable.insert(index);
                report.failures.push(ConstructFailure { index, error });
            }
        }
    }

    /// Destroys every active handle (ascending) and resets the window to empty.
    ///
    /// Returns the number of handles destroyed.
    pub fn clear<P, F>(&mut self, factory: &mut F) -> usize
    where
        F: ViewFactory<P, Handle = H>,
    {
        let active = core::mem::take(&mut self.active);
        let n = active.len();
        for (_, handle) in active {
            factory.destroy(handle);
        }
        self.unrenderable.clear();
        self.range = WindowRange::EMPTY;
        if n > 0 {
            vdebug!(destroyed = n, version = self.version, "RecyclingController::clear");
        }
        n
    }

    /// Destroys the handle at `index` on the host's request.
    ///
    /// Requests for indices without a live handle are ignored and return `false`. A released index
    /// that is still inside the window is rebuilt on the next pass.
    pub fn release<P, F>(&mut self, index: usize, factory: &mut F) -> bool
    where
        F: ViewFactory<P, Handle = H>,
    {
        match self.active.remove(&index) {
            Some(handle) => {
                factory.destroy(handle);
                true
            }
            None => {
                vtrace!(index, "RecyclingController::release: stale teardown ignored");
                false
            }
        }
    }

    /// Calls the host's `update` for a still-visible handle. Returns `false` if `index` has none.
    pub fn update<P, F>(&mut self, model: &ListModel<P>, index: usize, factory: &mut F) -> bool
    where
        F: ViewFactory<P, Handle = H>,
    {
        let (Some(handle), Some(item)) = (self.active.get_mut(&index), model.item_at(index)) else {
            return false;
        };
        factory.update(handle, item);
        true
    }

    /// Updates every active handle whose item matches `pred`. Returns how many were updated.
    pub fn update_where<P, F>(
        &mut self,
        model: &ListModel<P>,
        mut pred: impl FnMut(usize, &Item<P>) -> bool,
        factory: &mut F,
    ) -> usize
    where
        F: ViewFactory<P, Handle = H>,
    {
        let mut n = 0usize;
        for (&index, handle) in self.active.iter_mut() {
            let Some(item) = model.item_at(index) else {
                continue;
            };
            if pred(index, item) {
                factory.update(handle, item);
                n += 1;
            }
        }
        n
    }
}

impl<H> Default for RecyclingController<H> {
    fn default() -> Self {
        Self::new()
    }
}
