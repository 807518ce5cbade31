//! Interfaces of the vendor SDK this library bridges.
//!
//! The SDK itself is an external collaborator: a binding to the vendor
//! library implements these traits, and the bridge only ever talks to the SDK
//! through them. Every `*EventSink` trait is the SDK's abstract event
//! interface, implemented on the bridge side by [`bridge::Adapter`].
//!
//! [`bridge::Adapter`]: crate::bridge::Adapter

mod error;
pub mod types;

use std::{fmt, sync::Arc};

use crate::conf;

#[doc(inline)]
pub use self::{
    error::SdkError,
    types::{
        AuthResult, ChatMessageType, JoinParam, Language, LeaveMeetingCmd,
        LoginFailReason, LoginStatus, LoginType, MeetingParameter,
        MeetingStatus, NoiseSuppressionLevel, RawDataMemoryMode, RawDataType,
        RecordingStatus, RequestLocalRecordingStatus, ShareInfo,
        SharePlayError, ShareSettingType, ShareType, SharingStatus,
        StatisticsWarningType, VideoResolution,
    },
};

/// Variable-length list owned by the SDK.
///
/// Only valid during the call which provided it.
pub trait SdkList<T>: Send + Sync {
    /// Returns number of items in this list.
    fn count(&self) -> usize;

    /// Returns item at the provided `index`, if any.
    fn item(&self, index: usize) -> Option<T>;
}

impl<T: Clone + Send + Sync> SdkList<T> for Vec<T> {
    #[inline]
    fn count(&self) -> usize {
        self.len()
    }

    #[inline]
    fn item(&self, index: usize) -> Option<T> {
        self.get(index).cloned()
    }
}

/// Entry point of the SDK.
#[cfg_attr(test, mockall::automock)]
pub trait Sdk: fmt::Debug + Send + Sync {
    /// Initializes the SDK.
    fn init(&self, param: &conf::Sdk) -> SdkError;

    /// Releases everything initialized by [`Sdk::init()`].
    fn cleanup(&self) -> SdkError;

    /// Returns version of the SDK.
    fn version(&self) -> Option<String>;

    /// Switches the SDK to another web domain.
    fn switch_domain(&self, domain: &str, force: bool) -> SdkError;

    /// Creates the meeting service.
    fn create_meeting_service(&self) -> Option<Arc<dyn MeetingService>>;

    /// Creates the authentication service.
    fn create_auth_service(&self) -> Option<Arc<dyn AuthService>>;

    /// Creates the settings service.
    fn create_setting_service(&self) -> Option<Arc<dyn SettingService>>;

    /// Creates the network connection helper.
    fn create_network_connection_helper(&self) -> SdkError;

    /// Destroys the network connection helper.
    fn destroy_network_connection_helper(&self) -> SdkError;

    /// Returns the raw audio data helper.
    fn audio_raw_data_helper(&self) -> Option<Arc<dyn AudioRawDataHelper>>;

    /// Returns the external video source helper.
    fn video_source_helper(&self) -> Option<Arc<dyn VideoSourceHelper>>;

    /// Creates a raw video renderer delivering frames into the provided
    /// `sink`.
    ///
    /// # Errors
    ///
    /// With [`SdkError`] if the SDK refuses to create a renderer.
    fn create_renderer(
        &self,
        sink: Arc<dyn RendererEventSink>,
    ) -> Result<Arc<dyn Renderer>, SdkError>;
}

/// Account of the logged in user.
#[cfg_attr(test, mockall::automock)]
pub trait AccountInfo: fmt::Debug + Send + Sync {
    /// Returns display name of the account.
    fn display_name(&self) -> Option<String>;

    /// Returns login type of the account.
    fn login_type(&self) -> LoginType;
}

/// Authentication service of the SDK.
#[cfg_attr(test, mockall::automock)]
pub trait AuthService: fmt::Debug + Send + Sync {
    /// Sets the event sink of this service. `None` removes it.
    ///
    /// The SDK keeps the sink until it's replaced or removed.
    fn set_event(&self, sink: Option<Arc<dyn AuthEventSink>>) -> SdkError;

    /// Authenticates the SDK with the provided JWT.
    fn sdk_auth(&self, jwt_token: &str) -> SdkError;

    /// Returns result of the last authentication.
    fn auth_result(&self) -> AuthResult;

    /// Returns identity of the authenticated SDK.
    fn sdk_identity(&self) -> Option<String>;

    /// Generates URL to log in via SSO in a web browser.
    fn generate_sso_login_web_url(&self, prefix: &str) -> Option<String>;

    /// Logs in with the URI a web browser received after SSO.
    fn sso_login_with_web_uri_protocol(&self, uri: &str) -> SdkError;

    /// Logs out the current user.
    fn log_out(&self) -> SdkError;

    /// Returns account of the logged in user.
    fn account_info(&self) -> Option<Arc<dyn AccountInfo>>;

    /// Returns status of the login.
    fn login_status(&self) -> LoginStatus;
}

/// Event interface of [`AuthService`].
pub trait AuthEventSink: Send + Sync {
    /// Authentication finished.
    fn on_authentication_return(&self, result: AuthResult);

    /// Login finished.
    fn on_login_return_with_reason(
        &self,
        status: LoginStatus,
        account: Option<&dyn AccountInfo>,
        reason: LoginFailReason,
    );

    /// User logged out.
    fn on_logout(&self);

    /// Zoom identity expired.
    fn on_zoom_identity_expired(&self);

    /// Zoom authentication identity expires soon.
    fn on_zoom_auth_identity_expired(&self);
}

/// Meeting service of the SDK.
#[cfg_attr(test, mockall::automock)]
pub trait MeetingService: fmt::Debug + Send + Sync {
    /// Sets the event sink of this service. `None` removes it.
    fn set_event(&self, sink: Option<Arc<dyn MeetingEventSink>>) -> SdkError;

    /// Joins a meeting.
    fn join(&self, param: &JoinParam) -> SdkError;

    /// Leaves the current meeting.
    fn leave(&self, cmd: LeaveMeetingCmd) -> SdkError;

    /// Returns status of the current meeting.
    fn status(&self) -> MeetingStatus;

    /// Returns the chat controller.
    fn chat_controller(&self) -> Option<Arc<dyn ChatController>>;

    /// Returns the participants controller.
    fn participants_controller(
        &self,
    ) -> Option<Arc<dyn ParticipantsController>>;

    /// Returns the recording controller.
    fn recording_controller(&self) -> Option<Arc<dyn RecordingController>>;

    /// Returns the share controller.
    fn sharing_controller(&self) -> Option<Arc<dyn SharingController>>;

    /// Returns the audio controller.
    fn audio_controller(&self) -> Option<Arc<dyn AudioController>>;

    /// Returns the video controller.
    fn video_controller(&self) -> Option<Arc<dyn VideoController>>;
}

/// Event interface of [`MeetingService`].
pub trait MeetingEventSink: Send + Sync {
    fn on_meeting_status_changed(&self, status: MeetingStatus, result: i32);

    fn on_meeting_statistics_warning(&self, warning: StatisticsWarningType);

    fn on_meeting_parameter_notification(&self, param: &MeetingParameter);

    fn on_suspend_participants_activities(&self);

    fn on_ai_companion_active_change(&self, active: bool);

    fn on_meeting_topic_changed(&self, topic: &str);

    fn on_meeting_full_to_watch_live_stream(&self, live_stream_url: &str);
}

/// Chat message built by a [`ChatMessageBuilder`].
pub trait ChatMessage: fmt::Debug + Send + Sync {
    /// Returns content of this message.
    fn content(&self) -> Option<String>;

    /// Returns audience of this message.
    fn message_type(&self) -> ChatMessageType;
}

/// Builder of [`ChatMessage`]s.
///
/// Every setter returns the builder to continue with, or `None` on failure.
#[cfg_attr(test, mockall::automock)]
pub trait ChatMessageBuilder: fmt::Debug + Send + Sync {
    fn set_content(&self, content: &str)
        -> Option<Arc<dyn ChatMessageBuilder>>;

    fn set_receiver(&self, user_id: u32)
        -> Option<Arc<dyn ChatMessageBuilder>>;

    fn set_message_type(
        &self,
        message_type: ChatMessageType,
    ) -> Option<Arc<dyn ChatMessageBuilder>>;

    fn build(&self) -> Option<Arc<dyn ChatMessage>>;
}

/// Chat controller of a meeting.
#[cfg_attr(test, mockall::automock)]
pub trait ChatController: fmt::Debug + Send + Sync {
    /// Returns a fresh message builder.
    fn message_builder(&self) -> Option<Arc<dyn ChatMessageBuilder>>;

    /// Sends the provided message.
    fn send_chat_message_to(&self, message: Arc<dyn ChatMessage>) -> SdkError;
}

/// Information about a meeting participant.
#[cfg_attr(test, mockall::automock)]
pub trait UserInfo: fmt::Debug + Send + Sync {
    fn user_name(&self) -> Option<String>;

    fn is_host(&self) -> bool;

    fn user_id(&self) -> u32;

    fn is_talking(&self) -> bool;

    fn audio_voice_level(&self) -> i32;
}

/// Participants controller of a meeting.
#[cfg_attr(test, mockall::automock)]
pub trait ParticipantsController: fmt::Debug + Send + Sync {
    /// Sets the event sink of this controller. `None` removes it.
    fn set_event(
        &self,
        sink: Option<Arc<dyn ParticipantsEventSink>>,
    ) -> SdkError;

    /// Returns IDs of all the participants.
    fn participants_list(&self) -> Option<Arc<dyn SdkList<u32>>>;

    /// Returns information about the participant with the provided ID.
    fn user_by_user_id(&self, user_id: u32) -> Option<Arc<dyn UserInfo>>;

    /// Returns information about the current user.
    fn my_self_user(&self) -> Option<Arc<dyn UserInfo>>;

    /// Indicates whether participants may request a local recording
    /// privilege.
    fn is_participant_request_local_recording_allowed(&self) -> bool;
}

/// Event interface of [`ParticipantsController`].
pub trait ParticipantsEventSink: Send + Sync {
    fn on_user_join(&self, users: &dyn SdkList<u32>, user_list: Option<&str>);

    fn on_user_left(&self, users: &dyn SdkList<u32>, user_list: Option<&str>);

    fn on_host_change_notification(&self, user_id: u32);

    fn on_user_names_changed(&self, users: &dyn SdkList<u32>);
}

/// Recording controller of a meeting.
#[cfg_attr(test, mockall::automock)]
pub trait RecordingController: fmt::Debug + Send + Sync {
    /// Sets the event sink of this controller. `None` removes it.
    fn set_event(&self, sink: Option<Arc<dyn RecordingEventSink>>)
        -> SdkError;

    fn request_local_recording_privilege(&self) -> SdkError;

    fn request_start_cloud_recording(&self) -> SdkError;

    /// Starts a local recording, writing its start time into `start_time`.
    fn start_recording(&self, start_time: &mut i64) -> SdkError;

    /// Stops the local recording, writing its stop time into `stop_time`.
    fn stop_recording(&self, stop_time: &mut i64) -> SdkError;

    fn pause_recording(&self) -> SdkError;

    fn resume_recording(&self) -> SdkError;

    fn can_start_raw_recording(&self) -> SdkError;

    fn start_raw_recording(&self) -> SdkError;

    fn stop_raw_recording(&self) -> SdkError;
}

/// Event interface of [`RecordingController`].
pub trait RecordingEventSink: Send + Sync {
    fn on_recording_status(&self, status: RecordingStatus);

    fn on_cloud_recording_status(&self, status: RecordingStatus);

    fn on_recording_privilege_changed(&self, can_record: bool);

    fn on_local_recording_privilege_request_status(
        &self,
        status: RequestLocalRecordingStatus,
    );

    fn on_cloud_recording_storage_full(&self, grace_period_date: i64);
}

/// Share controller of a meeting.
#[cfg_attr(test, mockall::automock)]
pub trait SharingController: fmt::Debug + Send + Sync {
    /// Sets the event sink of this controller. `None` removes it.
    fn set_event(&self, sink: Option<Arc<dyn ShareEventSink>>) -> SdkError;
}

/// Event interface of [`SharingController`].
pub trait ShareEventSink: Send + Sync {
    fn on_sharing_status(&self, status: SharingStatus, user_id: u32);

    fn on_lock_share_status(&self, locked: bool);

    fn on_share_content_notification(&self, info: &ShareInfo);

    fn on_multi_share_switch_to_single_share_need_confirm(&self);

    fn on_share_setting_type_changed(&self, setting: ShareSettingType);

    fn on_shared_video_ended(&self);

    fn on_video_file_share_play_error(&self, error: SharePlayError);
}

/// Audio controller of a meeting.
#[cfg_attr(test, mockall::automock)]
pub trait AudioController: fmt::Debug + Send + Sync {
    fn mute_audio(&self, user_id: u32, allow_unmute_by_self: bool)
        -> SdkError;

    fn unmute_audio(&self, user_id: u32) -> SdkError;
}

/// Video controller of a meeting.
#[cfg_attr(test, mockall::automock)]
pub trait VideoController: fmt::Debug + Send + Sync {
    fn mute_video(&self) -> SdkError;

    fn unmute_video(&self) -> SdkError;
}

/// Settings service of the SDK.
#[cfg_attr(test, mockall::automock)]
pub trait SettingService: fmt::Debug + Send + Sync {
    /// Returns the audio settings.
    fn audio_settings(&self) -> Option<Arc<dyn AudioSettingContext>>;
}

/// Microphone device known to the SDK.
pub trait MicInfo: fmt::Debug + Send + Sync {
    fn device_id(&self) -> Option<String>;

    fn device_name(&self) -> Option<String>;

    fn is_selected_device(&self) -> bool;
}

/// Audio settings of the SDK.
#[cfg_attr(test, mockall::automock)]
pub trait AudioSettingContext: fmt::Debug + Send + Sync {
    fn enable_auto_join_audio(&self, enable: bool) -> SdkError;

    fn is_auto_join_audio_enabled(&self) -> bool;

    /// Returns all the known microphones.
    fn mic_list(&self) -> Option<Arc<dyn SdkList<Arc<dyn MicInfo>>>>;

    fn select_mic(&self, device_id: &str, device_name: &str) -> SdkError;

    fn set_suppress_background_noise_level(
        &self,
        level: NoiseSuppressionLevel,
    ) -> SdkError;
}

/// Audio frame delivered by the SDK.
///
/// Share audio frames are reference counted by the SDK: they outlive the
/// delivery call only while retained with [`AudioRawData::add_ref()`].
pub trait AudioRawData: Send + Sync {
    /// Returns the PCM payload.
    fn buffer(&self) -> &[u8];

    fn sample_rate(&self) -> u32;

    fn channel_num(&self) -> u32;

    /// Indicates whether [`AudioRawData::add_ref()`] is allowed.
    fn can_add_ref(&self) -> bool;

    /// Increments the reference count of this frame.
    fn add_ref(&self) -> bool;

    /// Decrements the reference count of this frame, returning the remaining
    /// count.
    fn release(&self) -> i32;
}

/// Event interface of [`AudioRawDataHelper`] subscriptions.
pub trait AudioRawDataSink: Send + Sync {
    fn on_mixed_audio_raw_data_received(&self, data: &dyn AudioRawData);

    fn on_one_way_audio_raw_data_received(
        &self,
        data: &dyn AudioRawData,
        node_id: u32,
    );

    fn on_share_audio_raw_data_received(&self, data: &dyn AudioRawData);

    fn on_one_way_interpreter_audio_raw_data_received(
        &self,
        data: &dyn AudioRawData,
        language_name: &str,
    );
}

/// Sender of virtual microphone audio.
#[cfg_attr(test, mockall::automock)]
pub trait AudioRawDataSender: fmt::Debug + Send + Sync {
    /// Sends a PCM buffer sampled with `sample_rate`.
    fn send(&self, data: &[u8], sample_rate: u32) -> SdkError;
}

/// Event interface of a virtual microphone.
pub trait VirtualAudioMicSink: Send + Sync {
    fn on_mic_initialize(&self, sender: Arc<dyn AudioRawDataSender>);

    fn on_mic_start_send(&self);

    fn on_mic_stop_send(&self);

    fn on_mic_uninitialized(&self);
}

/// Raw audio data helper of the SDK.
#[cfg_attr(test, mockall::automock)]
pub trait AudioRawDataHelper: fmt::Debug + Send + Sync {
    /// Subscribes the provided `sink` to raw audio.
    fn subscribe(
        &self,
        sink: Arc<dyn AudioRawDataSink>,
        with_interpreters: bool,
    ) -> SdkError;

    /// Removes the current raw audio subscription.
    fn unsubscribe(&self) -> SdkError;

    /// Replaces the microphone with a virtual one. `None` restores it.
    fn set_external_audio_source(
        &self,
        source: Option<Arc<dyn VirtualAudioMicSink>>,
    ) -> SdkError;
}

/// I420 video frame delivered by the SDK.
pub trait VideoRawData: Send + Sync {
    /// Returns the whole I420 payload.
    fn buffer(&self) -> &[u8];

    /// Returns ID of the user this frame belongs to.
    fn source_id(&self) -> u32;

    fn stream_width(&self) -> u32;

    fn stream_height(&self) -> u32;
}

/// Event interface of a [`Renderer`].
pub trait RendererEventSink: Send + Sync {
    fn on_raw_data_frame_received(&self, frame: &dyn VideoRawData);

    fn on_raw_data_status_changed(&self, on: bool);

    fn on_renderer_be_destroyed(&self);
}

/// Raw video renderer of the SDK.
#[cfg_attr(test, mockall::automock)]
pub trait Renderer: fmt::Debug + Send + Sync {
    fn subscribe(&self, user_id: u32, data_type: RawDataType) -> SdkError;

    fn unsubscribe(&self) -> SdkError;

    fn set_raw_data_resolution(&self, resolution: VideoResolution)
        -> SdkError;
}

/// Sender of external video frames.
#[cfg_attr(test, mockall::automock)]
pub trait VideoSender: fmt::Debug + Send + Sync {
    /// Sends one I420 frame.
    fn send_video_frame(
        &self,
        frame: &[u8],
        width: u32,
        height: u32,
        frame_length: u32,
        rotation: u32,
    ) -> SdkError;
}

/// Event interface of an external video source.
pub trait VideoSourceSink: Send + Sync {
    fn on_initialize(&self, sender: Arc<dyn VideoSender>);

    fn on_property_change(&self);

    fn on_start_send(&self);

    fn on_stop_send(&self);

    fn on_uninitialized(&self);
}

/// External video source helper of the SDK.
#[cfg_attr(test, mockall::automock)]
pub trait VideoSourceHelper: fmt::Debug + Send + Sync {
    /// Replaces the camera with the provided `source`. `None` restores it.
    fn set_external_video_source(
        &self,
        source: Option<Arc<dyn VideoSourceSink>>,
    ) -> SdkError;
}

#[cfg(test)]
impl_debug_by_struct_name!(MockSdk);
#[cfg(test)]
impl_debug_by_struct_name!(MockAccountInfo);
#[cfg(test)]
impl_debug_by_struct_name!(MockAuthService);
#[cfg(test)]
impl_debug_by_struct_name!(MockMeetingService);
#[cfg(test)]
impl_debug_by_struct_name!(MockChatMessageBuilder);
#[cfg(test)]
impl_debug_by_struct_name!(MockChatController);
#[cfg(test)]
impl_debug_by_struct_name!(MockUserInfo);
#[cfg(test)]
impl_debug_by_struct_name!(MockParticipantsController);
#[cfg(test)]
impl_debug_by_struct_name!(MockRecordingController);
#[cfg(test)]
impl_debug_by_struct_name!(MockSharingController);
#[cfg(test)]
impl_debug_by_struct_name!(MockAudioController);
#[cfg(test)]
impl_debug_by_struct_name!(MockVideoController);
#[cfg(test)]
impl_debug_by_struct_name!(MockSettingService);
#[cfg(test)]
impl_debug_by_struct_name!(MockAudioSettingContext);
#[cfg(test)]
impl_debug_by_struct_name!(MockAudioRawDataSender);
#[cfg(test)]
impl_debug_by_struct_name!(MockAudioRawDataHelper);
#[cfg(test)]
impl_debug_by_struct_name!(MockRenderer);
#[cfg(test)]
impl_debug_by_struct_name!(MockVideoSender);
#[cfg(test)]
impl_debug_by_struct_name!(MockVideoSourceHelper);
