//! Meeting audio.

use std::sync::Arc;

use crate::{errors::Result, sdk};

/// Handle to the SDK audio controller.
#[derive(Debug)]
pub struct AudioControllerHandle(Arc<dyn sdk::AudioController>);

impl AudioControllerHandle {
    /// Wraps the provided SDK `controller`.
    #[inline]
    #[must_use]
    pub fn new(controller: Arc<dyn sdk::AudioController>) -> Self {
        Self(controller)
    }

    /// Mutes microphone of the provided user, letting them unmute
    /// themselves.
    ///
    /// # Errors
    ///
    /// With [`BridgeError::Sdk`] if the SDK refuses to mute.
    ///
    /// [`BridgeError::Sdk`]: crate::errors::BridgeError::Sdk
    pub fn mute_microphone(&self, user_id: u32) -> Result<()> {
        sdk_try!(self.0.mute_audio(user_id, true))
    }

    /// Unmutes microphone of the provided user.
    ///
    /// # Errors
    ///
    /// With [`BridgeError::Sdk`] if the SDK refuses to unmute.
    ///
    /// [`BridgeError::Sdk`]: crate::errors::BridgeError::Sdk
    pub fn unmute_microphone(&self, user_id: u32) -> Result<()> {
        sdk_try!(self.0.unmute_audio(user_id))
    }
}
