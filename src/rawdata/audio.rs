//! Raw audio subscription and virtual microphone.

use std::{fmt, sync::Arc};

use crate::{
    bridge::{Adapter, EventSlot, RawDataRetention},
    errors::Result,
    sdk::{
        self, AudioRawData, AudioRawDataSender, AudioRawDataSink, SdkError,
        VirtualAudioMicSink,
    },
};

use super::ExportedAudioRawData;

/// Callbacks of the raw audio subscription.
pub struct AudioRawDataEvents<C> {
    /// Mixed audio of the whole meeting.
    pub on_mixed: fn(&C, &ExportedAudioRawData<'_>),

    /// Audio of the provided single participant.
    pub on_one_way: fn(&C, &ExportedAudioRawData<'_>, u32),

    /// Audio of the screen share. The returned decision is applied onto the
    /// SDK frame once the callback returns.
    pub on_share: fn(&C, &ExportedAudioRawData<'_>) -> RawDataRetention,

    /// Subscription is over and no more audio will be delivered.
    pub flush: fn(&C),
}

impl<C> Default for AudioRawDataEvents<C> {
    fn default() -> Self {
        Self {
            on_mixed: |_, _| {},
            on_one_way: |_, _, _| {},
            on_share: |_, _| RawDataRetention::Release,
            flush: |_| {},
        }
    }
}

/// Raw audio subscription registered with the SDK.
trait Subscription: Send + Sync {
    /// Returns this subscription as the SDK event interface.
    fn into_sink(self: Arc<Self>) -> Arc<dyn AudioRawDataSink>;

    /// Signals the end of this subscription.
    fn flush(&self);
}

struct AudioSubscription<C> {
    adapter: Adapter<C, AudioRawDataEvents<C>>,

    /// Whether audio of every participant is delivered apart.
    use_separate_channels: bool,
}

impl<C: Send + Sync + 'static> Subscription for AudioSubscription<C> {
    fn into_sink(self: Arc<Self>) -> Arc<dyn AudioRawDataSink> {
        self
    }

    fn flush(&self) {
        (self.adapter.table().flush)(self.adapter.context());
    }
}

impl<C: Send + Sync> AudioRawDataSink for AudioSubscription<C> {
    fn on_mixed_audio_raw_data_received(&self, data: &dyn AudioRawData) {
        let exported = ExportedAudioRawData::new(data);
        (self.adapter.table().on_mixed)(self.adapter.context(), &exported);
    }

    fn on_one_way_audio_raw_data_received(
        &self,
        data: &dyn AudioRawData,
        node_id: u32,
    ) {
        if !self.use_separate_channels {
            return;
        }
        let exported = ExportedAudioRawData::new(data);
        (self.adapter.table().on_one_way)(
            self.adapter.context(),
            &exported,
            node_id,
        );
    }

    fn on_share_audio_raw_data_received(&self, data: &dyn AudioRawData) {
        let retention = {
            let exported = ExportedAudioRawData::new(data);
            (self.adapter.table().on_share)(self.adapter.context(), &exported)
        };
        log::trace!("Share audio retention: {:?}", retention);
        retention.apply(data);
    }

    fn on_one_way_interpreter_audio_raw_data_received(
        &self,
        _: &dyn AudioRawData,
        _: &str,
    ) {
    }
}

/// Callbacks of the virtual microphone.
pub struct VirtualMicEvents<C> {
    /// Microphone is initialized and will send audio through the provided
    /// sender.
    pub on_mic_initialize: fn(&C, &AudioSenderHandle),
    pub on_mic_start_send: fn(&C),
    pub on_mic_stop_send: fn(&C),
    pub on_mic_uninitialized: fn(&C),
}

impl<C> Default for VirtualMicEvents<C> {
    fn default() -> Self {
        Self {
            on_mic_initialize: |_, _| {},
            on_mic_start_send: |_| {},
            on_mic_stop_send: |_| {},
            on_mic_uninitialized: |_| {},
        }
    }
}

impl<C: Send + Sync> VirtualAudioMicSink for Adapter<C, VirtualMicEvents<C>> {
    fn on_mic_initialize(&self, sender: Arc<dyn AudioRawDataSender>) {
        log::debug!("Virtual microphone initialized");
        (self.table().on_mic_initialize)(
            self.context(),
            &AudioSenderHandle::new(sender),
        );
    }

    fn on_mic_start_send(&self) {
        (self.table().on_mic_start_send)(self.context());
    }

    fn on_mic_stop_send(&self) {
        (self.table().on_mic_stop_send)(self.context());
    }

    fn on_mic_uninitialized(&self) {
        log::debug!("Virtual microphone uninitialized");
        (self.table().on_mic_uninitialized)(self.context());
    }
}

/// Sender of virtual microphone audio.
#[derive(Clone, Debug)]
pub struct AudioSenderHandle(Arc<dyn AudioRawDataSender>);

impl AudioSenderHandle {
    /// Wraps the provided SDK `sender`.
    #[inline]
    #[must_use]
    pub fn new(sender: Arc<dyn AudioRawDataSender>) -> Self {
        Self(sender)
    }

    /// Sends the provided PCM `data` sampled with `sample_rate`.
    ///
    /// # Errors
    ///
    /// With [`BridgeError::Sdk`] if the SDK refuses the audio.
    ///
    /// [`BridgeError::Sdk`]: crate::errors::BridgeError::Sdk
    pub fn send(&self, data: &[u8], sample_rate: u32) -> Result<()> {
        sdk_try!(self.0.send(data, sample_rate))
    }
}

/// Handle to the SDK raw audio helper.
pub struct AudioRawDataHelperHandle {
    /// Wrapped SDK helper.
    helper: Arc<dyn sdk::AudioRawDataHelper>,

    /// Current raw audio subscription.
    subscription: EventSlot<dyn Subscription>,

    /// Current virtual microphone.
    mic: EventSlot<dyn VirtualAudioMicSink>,
}

impl AudioRawDataHelperHandle {
    /// Wraps the provided SDK `helper`.
    #[must_use]
    pub fn new(helper: Arc<dyn sdk::AudioRawDataHelper>) -> Self {
        Self {
            helper,
            subscription: EventSlot::new(),
            mic: EventSlot::new(),
        }
    }

    /// Subscribes the provided `events` bound to the provided `context` to
    /// the meeting audio, replacing the previous subscription.
    ///
    /// Audio of single participants is delivered only if
    /// `use_separate_channels` is set.
    pub fn subscribe<C>(
        &self,
        context: C,
        events: AudioRawDataEvents<C>,
        use_separate_channels: bool,
    ) -> SdkError
    where
        C: Send + Sync + 'static,
    {
        let subscription: Arc<dyn Subscription> = Arc::new(AudioSubscription {
            adapter: Adapter::new(context, events),
            use_separate_channels,
        });
        let replaced = self.subscription.swap(subscription, |s| {
            self.helper.subscribe(s.into_sink(), false)
        });
        match replaced {
            Ok(replaced) => {
                if let Some(replaced) = replaced {
                    replaced.flush();
                }
                SdkError::Success
            }
            Err(code) => code,
        }
    }

    /// Removes the current subscription and flushes it.
    pub fn unsubscribe(&self) -> SdkError {
        match self.subscription.take(|| self.helper.unsubscribe()) {
            Ok(current) => {
                if let Some(current) = current {
                    current.flush();
                }
                SdkError::Success
            }
            Err(code) => {
                log::warn!("Failed to unsubscribe from raw audio: {}", code);
                code
            }
        }
    }

    /// Replaces the microphone with a virtual one driven by the provided
    /// `events`.
    pub fn set_external_audio_source<C>(
        &self,
        context: C,
        events: VirtualMicEvents<C>,
    ) -> SdkError
    where
        C: Send + Sync + 'static,
    {
        let mic: Arc<dyn VirtualAudioMicSink> =
            Arc::new(Adapter::new(context, events));
        self.mic.replace(mic, |mic| {
            self.helper.set_external_audio_source(Some(mic))
        })
    }

    /// Restores the real microphone.
    pub fn clear_external_audio_source(&self) -> SdkError {
        self.mic
            .clear(|| self.helper.set_external_audio_source(None))
    }
}

impl Drop for AudioRawDataHelperHandle {
    fn drop(&mut self) {
        if self.subscription.is_set() {
            let _ = self.unsubscribe();
        }
    }
}

impl fmt::Debug for AudioRawDataHelperHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AudioRawDataHelperHandle")
            .field("helper", &self.helper)
            .field("subscribed", &self.subscription.is_set())
            .field("mic", &self.mic)
            .finish()
    }
}
