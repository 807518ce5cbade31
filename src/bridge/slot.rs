//! Owned single-registration slot of an event sink.

use std::{fmt, sync::Arc};

use parking_lot::Mutex;

use crate::sdk::SdkError;

/// Slot owning at most one event sink registered with an SDK handle.
///
/// Registering a new sink drops the previous one once the SDK accepted the
/// replacement, so adapters never outlive their registration.
pub struct EventSlot<S: ?Sized>(Mutex<Option<Arc<S>>>);

impl<S: ?Sized> EventSlot<S> {
    /// Creates an empty [`EventSlot`].
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Mutex::new(None))
    }

    /// Registers the provided `sink` via `register` and keeps it if the SDK
    /// returned [`SdkError::Success`], dropping the previous one.
    ///
    /// On failure the previously registered sink stays in place.
    pub fn replace<F>(&self, sink: Arc<S>, register: F) -> SdkError
    where
        F: FnOnce(Arc<S>) -> SdkError,
    {
        match self.swap(sink, register) {
            Ok(replaced) => {
                if replaced.is_some() {
                    log::debug!("Previous event sink is dropped");
                }
                SdkError::Success
            }
            Err(code) => code,
        }
    }

    /// Registers the provided `sink` via `register` and keeps it if the SDK
    /// returned [`SdkError::Success`], handing over the sink it displaced.
    ///
    /// The slot is not locked while `register` runs, so the SDK may deliver
    /// events into this slot's owner from inside the registration.
    ///
    /// # Errors
    ///
    /// With the SDK code if the SDK refused the `sink`. The previously
    /// registered sink stays in place then.
    pub fn swap<F>(
        &self,
        sink: Arc<S>,
        register: F,
    ) -> Result<Option<Arc<S>>, SdkError>
    where
        F: FnOnce(Arc<S>) -> SdkError,
    {
        let code = register(Arc::clone(&sink));
        if !code.is_success() {
            log::warn!("SDK refused event sink: {}", code);
            return Err(code);
        }
        let replaced = self.0.lock().replace(sink);
        Ok(replaced)
    }

    /// Unregisters the current sink via `unregister`, dropping it if the SDK
    /// returned [`SdkError::Success`].
    pub fn clear<F>(&self, unregister: F) -> SdkError
    where
        F: FnOnce() -> SdkError,
    {
        match self.take(unregister) {
            Ok(cleared) => {
                drop(cleared);
                SdkError::Success
            }
            Err(code) => code,
        }
    }

    /// Unregisters the current sink via `unregister`, handing it over if the
    /// SDK returned [`SdkError::Success`].
    ///
    /// The slot is not locked while `unregister` runs.
    ///
    /// # Errors
    ///
    /// With the SDK code if the SDK refused to unregister. The sink stays in
    /// place then.
    pub fn take<F>(&self, unregister: F) -> Result<Option<Arc<S>>, SdkError>
    where
        F: FnOnce() -> SdkError,
    {
        let code = unregister();
        if !code.is_success() {
            return Err(code);
        }
        let cleared = self.0.lock().take();
        Ok(cleared)
    }

    /// Drops the current sink without telling the SDK.
    ///
    /// Used once the SDK reported the owning handle as destroyed.
    pub fn forget(&self) {
        let forgotten = self.0.lock().take();
        drop(forgotten);
    }

    /// Returns the currently registered sink, if any.
    #[must_use]
    pub fn get(&self) -> Option<Arc<S>> {
        self.0.lock().clone()
    }

    /// Indicates whether a sink is registered.
    #[inline]
    #[must_use]
    pub fn is_set(&self) -> bool {
        self.0.lock().is_some()
    }
}

impl<S: ?Sized> Default for EventSlot<S> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<S: ?Sized> fmt::Debug for EventSlot<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventSlot")
            .field("is_set", &self.is_set())
            .finish()
    }
}
