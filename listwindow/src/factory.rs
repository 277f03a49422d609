use crate::{HandleSlot, Item};

/// The host's view layer: creates, destroys and refreshes the concrete objects backing visible
/// items.
///
/// Handles are never reused. `construct` always produces a fresh handle and `destroy` receives the
/// handle by value, so a torn-down handle can never be bound to another index. Hosts that attach
/// event subscriptions to a handle can rely on them never leaking into a different item.
///
/// Callbacks run synchronously inside the engine's pipeline and cannot reach back into it.
/// Structural changes requested from inside a callback have to be deferred to the next tick.
pub trait ViewFactory<P> {
    type Handle;
    type Error: core::fmt::Debug;

    /// Materializes `item` at `slot`.
    ///
    /// A failure only affects this index: it stays empty for the current pass and is retried on the
    /// next pass that still includes it.
    fn construct(&mut self, slot: HandleSlot, item: &Item<P>) -> Result<Self::Handle, Self::Error>;

    /// Irreversibly tears a handle down.
    fn destroy(&mut self, handle: Self::Handle);

    /// Refreshes the content of a handle that stays visible.
    fn update(&mut self, handle: &mut Self::Handle, item: &Item<P>) {
        let _ = (handle, item);
    }
}

impl<P, F: ViewFactory<P> + ?Sized> ViewFactory<P> for &mut F {
    type Handle = F::Handle;
    type Error = F::Error;

    fn construct(&mut self, slot: HandleSlot, item: &Item<P>) -> Result<Self::Handle, Self::Error> {
        (**self).construct(slot, item)
    }

    fn destroy(&mut self, handle: Self::Handle) {
        (**self).destroy(handle)
    }

    fn update(&mut self, handle: &mut Self::Handle, item: &Item<P>) {
        (**self).update(handle, item)
    }
}
