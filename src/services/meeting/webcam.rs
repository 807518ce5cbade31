//! Virtual webcam fed with external video frames.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::{
    bridge::{Adapter, EventSlot},
    conf,
    errors::{BridgeError, Result},
    sdk::{self, SdkError, VideoSender, VideoSourceSink},
};

/// Sender of frames into the virtual webcam.
#[derive(Clone, Debug)]
pub struct VideoSenderHandle {
    /// Wrapped SDK sender.
    sender: Arc<dyn VideoSender>,

    /// Size of the sent frames.
    conf: conf::Webcam,
}

impl VideoSenderHandle {
    /// Wraps the provided SDK `sender` sending frames of the provided size.
    #[inline]
    #[must_use]
    pub fn new(sender: Arc<dyn VideoSender>, conf: conf::Webcam) -> Self {
        Self { sender, conf }
    }

    /// Sends one I420 `frame` of the configured size.
    ///
    /// # Errors
    ///
    /// With [`BridgeError::Sdk`] if the configured frame length overflows,
    /// the `frame` is shorter than it, or the SDK refuses the `frame`.
    pub fn play_frame(&self, frame: &[u8]) -> Result<()> {
        let frame_length = match self.conf.frame_length() {
            Some(len) => len,
            None => {
                log::warn!(
                    "Video frame of {}x{} is too large",
                    self.conf.width,
                    self.conf.height,
                );
                return Err(tracerr::new!(BridgeError::Sdk(
                    SdkError::InvalidParameter
                )));
            }
        };
        if frame.len() < frame_length as usize {
            log::warn!(
                "Video frame of {} bytes is shorter than {}",
                frame.len(),
                frame_length,
            );
            return Err(tracerr::new!(BridgeError::Sdk(
                SdkError::InvalidParameter
            )));
        }
        sdk_try!(self.sender.send_video_frame(
            &frame[..frame_length as usize],
            self.conf.width,
            self.conf.height,
            frame_length,
            self.conf.rotation,
        ))
    }
}

/// Callbacks of the virtual webcam.
pub struct VideoSourceEvents<C> {
    /// Webcam is ready to receive frames through the provided sender.
    pub on_video_source_started: fn(&C, &VideoSenderHandle),

    /// Webcam doesn't accept frames anymore.
    pub on_video_source_stopped: fn(&C),
}

impl<C> Default for VideoSourceEvents<C> {
    fn default() -> Self {
        Self {
            on_video_source_started: |_, _| {},
            on_video_source_stopped: |_| {},
        }
    }
}

/// External video source handed to the SDK.
struct VideoSource<C> {
    /// Callbacks with their context.
    adapter: Adapter<C, VideoSourceEvents<C>>,

    /// Sender provided by the SDK on initialization.
    sender: Mutex<Option<VideoSenderHandle>>,

    /// Size of the sent frames.
    conf: conf::Webcam,
}

impl<C: Send + Sync> VideoSourceSink for VideoSource<C> {
    fn on_initialize(&self, sender: Arc<dyn VideoSender>) {
        log::debug!("Virtual webcam initialized");
        *self.sender.lock() = Some(VideoSenderHandle::new(sender, self.conf));
    }

    fn on_property_change(&self) {}

    fn on_start_send(&self) {
        let sender = self.sender.lock().clone();
        match sender {
            Some(sender) => (self.adapter.table().on_video_source_started)(
                self.adapter.context(),
                &sender,
            ),
            None => log::warn!("Virtual webcam started before initialization"),
        }
    }

    fn on_stop_send(&self) {
        (self.adapter.table().on_video_source_stopped)(self.adapter.context());
    }

    fn on_uninitialized(&self) {
        log::debug!("Virtual webcam uninitialized");
        drop(self.sender.lock().take());
    }
}

/// Virtual webcam registered as the external video source of the SDK.
#[derive(Debug)]
pub struct VirtualWebcam {
    /// Wrapped SDK helper.
    helper: Arc<dyn sdk::VideoSourceHelper>,

    /// Registered video source.
    source: EventSlot<dyn VideoSourceSink>,
}

impl VirtualWebcam {
    /// Registers the virtual webcam with the SDK and turns the video of the
    /// meeting on.
    ///
    /// # Errors
    ///
    /// - With [`BridgeError::NullPtr`] if the helper or the video controller
    ///   is missing.
    /// - With [`BridgeError::Sdk`] if the SDK refuses the source or the
    ///   unmuting.
    pub fn init<C>(
        helper: Option<Arc<dyn sdk::VideoSourceHelper>>,
        video: Option<Arc<dyn sdk::VideoController>>,
        context: C,
        events: VideoSourceEvents<C>,
        conf: conf::Webcam,
    ) -> Result<Self>
    where
        C: Send + Sync + 'static,
    {
        let helper =
            helper.ok_or_else(|| tracerr::new!(BridgeError::NullPtr))?;
        let this = Self {
            helper,
            source: EventSlot::new(),
        };
        let source: Arc<dyn VideoSourceSink> = Arc::new(VideoSource {
            adapter: Adapter::new(context, events),
            sender: Mutex::new(None),
            conf,
        });
        sdk_try!(this.source.replace(source, |source| {
            this.helper.set_external_video_source(Some(source))
        }))?;

        let video = video.ok_or_else(|| tracerr::new!(BridgeError::NullPtr))?;
        sdk_try!(video.unmute_video())?;
        Ok(this)
    }
}

impl Drop for VirtualWebcam {
    fn drop(&mut self) {
        let helper = Arc::clone(&self.helper);
        let code = self
            .source
            .clear(|| helper.set_external_video_source(None));
        if !code.is_success() {
            log::warn!("Failed to restore the camera: {}", code);
        }
    }
}
