//! Marshalling between SDK event interfaces and callback tables.
//!
//! Every SDK event interface is re-expressed as a plain table of function
//! pointers bound to a context value at registration time. An [`Adapter`]
//! pairs both and implements the SDK interface by looking the callback up in
//! the table. Adapters are owned by an [`EventSlot`] of the handle they are
//! registered with.

pub mod buffer;
pub mod retention;
pub mod slot;

use std::{any::type_name, fmt};

#[doc(inline)]
pub use self::{
    buffer::FlatBuffer, retention::RawDataRetention, slot::EventSlot,
};

/// Implementation of an SDK event interface dispatching every event into the
/// matching callback of its table `T`, together with its context `C`.
pub struct Adapter<C, T> {
    /// Context passed to every callback unchanged.
    context: C,

    /// Callbacks of the adapted event interface.
    table: T,
}

impl<C, T> Adapter<C, T> {
    /// Binds the provided `table` to the provided `context`.
    #[inline]
    #[must_use]
    pub fn new(context: C, table: T) -> Self {
        Self { context, table }
    }

    /// Returns context of this [`Adapter`].
    #[inline]
    #[must_use]
    pub fn context(&self) -> &C {
        &self.context
    }

    /// Returns callback table of this [`Adapter`].
    #[inline]
    #[must_use]
    pub fn table(&self) -> &T {
        &self.table
    }
}

impl<C, T> fmt::Debug for Adapter<C, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Adapter")
            .field("context", &type_name::<C>())
            .field("table", &type_name::<T>())
            .finish()
    }
}
