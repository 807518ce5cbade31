//! Meeting service and its controllers.

pub mod audio;
pub mod chat;
pub mod participants;
pub mod recording;
pub mod sharing;
pub mod webcam;

use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::{
    bridge::{Adapter, EventSlot},
    conf,
    errors::{BridgeError, Result},
    meeting_url,
    sdk::{
        self, JoinParam, LeaveMeetingCmd, MeetingEventSink, MeetingParameter,
        MeetingStatus, SdkError, StatisticsWarningType,
    },
};

#[doc(inline)]
pub use self::{
    audio::AudioControllerHandle,
    chat::ChatControllerHandle,
    participants::{
        Participant, ParticipantsControllerHandle, ParticipantsEvents,
        UserInfoHandle,
    },
    recording::{RecordingControllerHandle, RecordingEvents},
    sharing::{ShareEvents, SharingControllerHandle},
    webcam::{VideoSenderHandle, VideoSourceEvents, VirtualWebcam},
};

/// Callbacks of the meeting events.
pub struct MeetingEvents<C> {
    pub on_meeting_status_changed: fn(&C, MeetingStatus, i32),
    pub on_meeting_statistics_warning: fn(&C, StatisticsWarningType),
    pub on_meeting_parameter_notification: fn(&C, &MeetingParameter),
    pub on_suspend_participants_activities: fn(&C),
    pub on_ai_companion_active_change: fn(&C, bool),
    pub on_meeting_topic_changed: fn(&C, &str),
    pub on_meeting_full_to_watch_live_stream: fn(&C, &str),
}

impl<C> Default for MeetingEvents<C> {
    fn default() -> Self {
        Self {
            on_meeting_status_changed: |_, _, _| {},
            on_meeting_statistics_warning: |_, _| {},
            on_meeting_parameter_notification: |_, _| {},
            on_suspend_participants_activities: |_| {},
            on_ai_companion_active_change: |_, _| {},
            on_meeting_topic_changed: |_, _| {},
            on_meeting_full_to_watch_live_stream: |_, _| {},
        }
    }
}

impl<C: Send + Sync> MeetingEventSink for Adapter<C, MeetingEvents<C>> {
    fn on_meeting_status_changed(&self, status: MeetingStatus, result: i32) {
        log::debug!("Meeting status changed: {:?} ({})", status, result);
        (self.table().on_meeting_status_changed)(
            self.context(),
            status,
            result,
        );
    }

    fn on_meeting_statistics_warning(&self, warning: StatisticsWarningType) {
        (self.table().on_meeting_statistics_warning)(self.context(), warning);
    }

    fn on_meeting_parameter_notification(&self, param: &MeetingParameter) {
        (self.table().on_meeting_parameter_notification)(
            self.context(),
            param,
        );
    }

    fn on_suspend_participants_activities(&self) {
        (self.table().on_suspend_participants_activities)(self.context());
    }

    fn on_ai_companion_active_change(&self, active: bool) {
        (self.table().on_ai_companion_active_change)(self.context(), active);
    }

    fn on_meeting_topic_changed(&self, topic: &str) {
        (self.table().on_meeting_topic_changed)(self.context(), topic);
    }

    fn on_meeting_full_to_watch_live_stream(&self, live_stream_url: &str) {
        (self.table().on_meeting_full_to_watch_live_stream)(
            self.context(),
            live_stream_url,
        );
    }
}

/// Handle to the SDK meeting service.
///
/// Controllers are obtained from the SDK once and kept for the lifetime of
/// this handle, so each of them owns a single events registration.
#[derive(Debug)]
pub struct MeetingServiceHandle {
    /// Wrapped SDK service.
    service: Arc<dyn sdk::MeetingService>,

    /// Registered event sink.
    events: EventSlot<dyn MeetingEventSink>,

    chat: OnceCell<ChatControllerHandle>,
    participants: OnceCell<ParticipantsControllerHandle>,
    recording: OnceCell<RecordingControllerHandle>,
    sharing: OnceCell<SharingControllerHandle>,
    audio: OnceCell<AudioControllerHandle>,
}

impl MeetingServiceHandle {
    /// Wraps the provided SDK `service`.
    #[must_use]
    pub fn new(service: Arc<dyn sdk::MeetingService>) -> Self {
        Self {
            service,
            events: EventSlot::new(),
            chat: OnceCell::new(),
            participants: OnceCell::new(),
            recording: OnceCell::new(),
            sharing: OnceCell::new(),
            audio: OnceCell::new(),
        }
    }

    /// Returns the wrapped SDK service.
    #[inline]
    #[must_use]
    pub fn sdk(&self) -> &Arc<dyn sdk::MeetingService> {
        &self.service
    }

    /// Registers the provided `events` bound to the provided `context`,
    /// replacing the previous registration.
    pub fn set_event<C>(&self, context: C, events: MeetingEvents<C>) -> SdkError
    where
        C: Send + Sync + 'static,
    {
        let sink: Arc<dyn MeetingEventSink> =
            Arc::new(Adapter::new(context, events));
        self.events
            .replace(sink, |sink| self.service.set_event(Some(sink)))
    }

    /// Removes the current events registration.
    pub fn clear_event(&self) -> SdkError {
        self.events.clear(|| self.service.set_event(None))
    }

    /// Joins the meeting with the provided `meeting_number` as a user without
    /// login.
    ///
    /// # Errors
    ///
    /// With [`BridgeError::Sdk`] if the SDK refuses to join.
    ///
    /// [`BridgeError::Sdk`]: crate::errors::BridgeError::Sdk
    pub fn join(
        &self,
        meeting_number: u64,
        user_name: &str,
        password: Option<&str>,
    ) -> Result<()> {
        let param = JoinParam::without_login(
            meeting_number,
            user_name.to_owned(),
            password.map(ToOwned::to_owned),
        );
        log::info!("Joining meeting {}", meeting_number);
        sdk_try!(self.service.join(&param))
    }

    /// Joins the meeting the provided invitation `url` points to as a user
    /// without login.
    ///
    /// A personal meeting room URL is joined by its vanity name.
    ///
    /// # Errors
    ///
    /// With [`BridgeError::Sdk`] if the `url` points to no meeting, or the
    /// SDK refuses to join.
    pub fn join_url(&self, url: &str, user_name: &str) -> Result<()> {
        let (meeting, password) = meeting_url::parse(url).ok_or_else(|| {
            tracerr::new!(BridgeError::Sdk(SdkError::InvalidParameter))
        })?;
        log::info!("Joining meeting {} by URL", meeting);
        let mut param =
            JoinParam::without_login(0, user_name.to_owned(), password);
        match meeting.parse() {
            Ok(number) => param.meeting_number = number,
            Err(_) => param.vanity_id = Some(meeting),
        }
        sdk_try!(self.service.join(&param))
    }

    /// Leaves the current meeting.
    ///
    /// # Errors
    ///
    /// With [`BridgeError::Sdk`] if the SDK refuses to leave.
    ///
    /// [`BridgeError::Sdk`]: crate::errors::BridgeError::Sdk
    pub fn leave(&self, cmd: LeaveMeetingCmd) -> Result<()> {
        sdk_try!(self.service.leave(cmd))
    }

    /// Returns status of the current meeting.
    #[must_use]
    pub fn status(&self) -> MeetingStatus {
        self.service.status()
    }

    /// Returns the chat controller, if the SDK provides it.
    pub fn chat(&self) -> Option<&ChatControllerHandle> {
        self.chat
            .get_or_try_init(|| {
                self.service
                    .chat_controller()
                    .map(ChatControllerHandle::new)
                    .ok_or(())
            })
            .ok()
    }

    /// Returns the participants controller, if the SDK provides it.
    pub fn participants(&self) -> Option<&ParticipantsControllerHandle> {
        self.participants
            .get_or_try_init(|| {
                self.service
                    .participants_controller()
                    .map(ParticipantsControllerHandle::new)
                    .ok_or(())
            })
            .ok()
    }

    /// Returns the recording controller, if the SDK provides it.
    pub fn recording(&self) -> Option<&RecordingControllerHandle> {
        self.recording
            .get_or_try_init(|| {
                self.service
                    .recording_controller()
                    .map(RecordingControllerHandle::new)
                    .ok_or(())
            })
            .ok()
    }

    /// Returns the share controller, if the SDK provides it.
    pub fn sharing(&self) -> Option<&SharingControllerHandle> {
        self.sharing
            .get_or_try_init(|| {
                self.service
                    .sharing_controller()
                    .map(SharingControllerHandle::new)
                    .ok_or(())
            })
            .ok()
    }

    /// Registers a [`VirtualWebcam`] fed through the provided `helper` and
    /// turns the video of this meeting on.
    ///
    /// # Errors
    ///
    /// See [`VirtualWebcam::init()`].
    pub fn init_virtual_webcam<C>(
        &self,
        helper: Option<Arc<dyn sdk::VideoSourceHelper>>,
        context: C,
        events: VideoSourceEvents<C>,
        conf: conf::Webcam,
    ) -> Result<VirtualWebcam>
    where
        C: Send + Sync + 'static,
    {
        VirtualWebcam::init(
            helper,
            self.service.video_controller(),
            context,
            events,
            conf,
        )
    }

    /// Returns the audio controller, if the SDK provides it.
    pub fn audio(&self) -> Option<&AudioControllerHandle> {
        self.audio
            .get_or_try_init(|| {
                self.service
                    .audio_controller()
                    .map(AudioControllerHandle::new)
                    .ok_or(())
            })
            .ok()
    }
}
