//! Meeting chat.

use std::sync::Arc;

use crate::{
    errors::{BridgeError, Result},
    sdk::{self, ChatMessage, ChatMessageType},
};

/// Handle to the SDK chat controller.
#[derive(Debug)]
pub struct ChatControllerHandle(Arc<dyn sdk::ChatController>);

impl ChatControllerHandle {
    /// Wraps the provided SDK `controller`.
    #[inline]
    #[must_use]
    pub fn new(controller: Arc<dyn sdk::ChatController>) -> Self {
        Self(controller)
    }

    /// Builds a chat message with the provided `content` addressed to
    /// `message_type` audience.
    ///
    /// # Errors
    ///
    /// With [`BridgeError::NullPtr`] if any step of the SDK builder yields
    /// nothing.
    pub fn build_message(
        &self,
        content: &str,
        message_type: ChatMessageType,
    ) -> Result<Arc<dyn ChatMessage>> {
        let null = || tracerr::new!(BridgeError::NullPtr);
        self.0
            .message_builder()
            .ok_or_else(null)?
            .set_content(content)
            .ok_or_else(null)?
            .set_receiver(0)
            .ok_or_else(null)?
            .set_message_type(message_type)
            .ok_or_else(null)?
            .build()
            .ok_or_else(null)
    }

    /// Sends the provided chat `message`.
    ///
    /// # Errors
    ///
    /// With [`BridgeError::Sdk`] if the SDK refuses to send.
    pub fn send(&self, message: Arc<dyn ChatMessage>) -> Result<()> {
        sdk_try!(self.0.send_chat_message_to(message))
    }

    /// Builds and sends a message with the provided `content` to everyone.
    ///
    /// # Errors
    ///
    /// See [`ChatControllerHandle::build_message()`] and
    /// [`ChatControllerHandle::send()`].
    pub fn send_to_all(&self, content: &str) -> Result<()> {
        let message = self
            .build_message(content, ChatMessageType::ToAll)
            .map_err(tracerr::wrap!())?;
        self.send(message).map_err(tracerr::wrap!())
    }
}
