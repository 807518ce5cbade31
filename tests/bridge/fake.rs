//! Hand-written SDK recording what the bridge registers with it.

use std::sync::{
    atomic::{AtomicBool, AtomicI32, Ordering},
    Arc,
};

use parking_lot::Mutex;
use zoom_sdk_bridge::{
    conf, impl_debug_by_struct_name,
    sdk::{
        AudioController, AudioRawData, AudioRawDataHelper, AudioRawDataSink,
        AudioSettingContext, AuthService, ChatController, JoinParam,
        LeaveMeetingCmd, MeetingEventSink, MeetingService, MeetingStatus,
        MicInfo, NoiseSuppressionLevel, ParticipantsController,
        ParticipantsEventSink, RecordingController, Renderer,
        RendererEventSink, Sdk, SdkError, SdkList, SettingService,
        SharingController, UserInfo, VideoController, VideoSourceHelper,
        VirtualAudioMicSink,
    },
};

/// Slot holding whatever sink the bridge registered last.
pub type Registered<T> = Arc<Mutex<Option<Arc<T>>>>;

#[derive(Debug, Default)]
pub struct FakeSdk {
    pub meeting: Arc<FakeMeeting>,
    pub setting: Arc<FakeSetting>,
    pub audio: Arc<FakeAudioHelper>,
}

impl Sdk for FakeSdk {
    fn init(&self, _: &conf::Sdk) -> SdkError {
        SdkError::Success
    }

    fn cleanup(&self) -> SdkError {
        SdkError::Success
    }

    fn version(&self) -> Option<String> {
        Some("5.17.5".to_owned())
    }

    fn switch_domain(&self, _: &str, _: bool) -> SdkError {
        SdkError::Success
    }

    fn create_meeting_service(&self) -> Option<Arc<dyn MeetingService>> {
        Some(Arc::clone(&self.meeting) as _)
    }

    fn create_auth_service(&self) -> Option<Arc<dyn AuthService>> {
        None
    }

    fn create_setting_service(&self) -> Option<Arc<dyn SettingService>> {
        Some(Arc::clone(&self.setting) as _)
    }

    fn create_network_connection_helper(&self) -> SdkError {
        SdkError::Success
    }

    fn destroy_network_connection_helper(&self) -> SdkError {
        SdkError::Success
    }

    fn audio_raw_data_helper(&self) -> Option<Arc<dyn AudioRawDataHelper>> {
        Some(Arc::clone(&self.audio) as _)
    }

    fn video_source_helper(&self) -> Option<Arc<dyn VideoSourceHelper>> {
        None
    }

    fn create_renderer(
        &self,
        _: Arc<dyn RendererEventSink>,
    ) -> Result<Arc<dyn Renderer>, SdkError> {
        Err(SdkError::NoImpl)
    }
}

#[derive(Default)]
pub struct FakeMeeting {
    pub sink: Registered<dyn MeetingEventSink>,
    pub participants: Arc<FakeParticipants>,
}

impl_debug_by_struct_name!(FakeMeeting);

impl MeetingService for FakeMeeting {
    fn set_event(&self, sink: Option<Arc<dyn MeetingEventSink>>) -> SdkError {
        *self.sink.lock() = sink;
        SdkError::Success
    }

    fn join(&self, _: &JoinParam) -> SdkError {
        SdkError::Success
    }

    fn leave(&self, _: LeaveMeetingCmd) -> SdkError {
        SdkError::Success
    }

    fn status(&self) -> MeetingStatus {
        MeetingStatus::InMeeting
    }

    fn chat_controller(&self) -> Option<Arc<dyn ChatController>> {
        None
    }

    fn participants_controller(
        &self,
    ) -> Option<Arc<dyn ParticipantsController>> {
        Some(Arc::clone(&self.participants) as _)
    }

    fn recording_controller(&self) -> Option<Arc<dyn RecordingController>> {
        None
    }

    fn sharing_controller(&self) -> Option<Arc<dyn SharingController>> {
        None
    }

    fn audio_controller(&self) -> Option<Arc<dyn AudioController>> {
        None
    }

    fn video_controller(&self) -> Option<Arc<dyn VideoController>> {
        None
    }
}

#[derive(Debug)]
pub struct FakeUser {
    pub id: u32,
    pub name: String,
}

impl UserInfo for FakeUser {
    fn user_name(&self) -> Option<String> {
        Some(self.name.clone())
    }

    fn is_host(&self) -> bool {
        self.id == 1
    }

    fn user_id(&self) -> u32 {
        self.id
    }

    fn is_talking(&self) -> bool {
        false
    }

    fn audio_voice_level(&self) -> i32 {
        0
    }
}

#[derive(Default)]
pub struct FakeParticipants {
    /// IDs listed by the SDK, `None` if it has no list.
    pub users: Mutex<Option<Vec<u32>>>,
    pub sink: Registered<dyn ParticipantsEventSink>,
}

impl_debug_by_struct_name!(FakeParticipants);

impl ParticipantsController for FakeParticipants {
    fn set_event(
        &self,
        sink: Option<Arc<dyn ParticipantsEventSink>>,
    ) -> SdkError {
        *self.sink.lock() = sink;
        SdkError::Success
    }

    fn participants_list(&self) -> Option<Arc<dyn SdkList<u32>>> {
        self.users
            .lock()
            .clone()
            .map(|users| Arc::new(users) as Arc<dyn SdkList<u32>>)
    }

    fn user_by_user_id(&self, user_id: u32) -> Option<Arc<dyn UserInfo>> {
        Some(Arc::new(FakeUser {
            id: user_id,
            name: format!("user-{}", user_id),
        }))
    }

    fn my_self_user(&self) -> Option<Arc<dyn UserInfo>> {
        self.user_by_user_id(1)
    }

    fn is_participant_request_local_recording_allowed(&self) -> bool {
        true
    }
}

#[derive(Debug, Default)]
pub struct FakeSetting {
    pub audio: Arc<FakeAudioSettings>,
}

impl SettingService for FakeSetting {
    fn audio_settings(&self) -> Option<Arc<dyn AudioSettingContext>> {
        Some(Arc::clone(&self.audio) as _)
    }
}

#[derive(Debug)]
pub struct FakeMic {
    pub id: String,
    pub selected: bool,
}

impl MicInfo for FakeMic {
    fn device_id(&self) -> Option<String> {
        Some(self.id.clone())
    }

    fn device_name(&self) -> Option<String> {
        Some(format!("Mic {}", self.id))
    }

    fn is_selected_device(&self) -> bool {
        self.selected
    }
}

#[derive(Debug, Default)]
pub struct FakeAudioSettings {
    pub auto_join: AtomicBool,
    pub mics: Mutex<Option<Vec<Arc<dyn MicInfo>>>>,
}

impl AudioSettingContext for FakeAudioSettings {
    fn enable_auto_join_audio(&self, enable: bool) -> SdkError {
        self.auto_join.store(enable, Ordering::SeqCst);
        SdkError::Success
    }

    fn is_auto_join_audio_enabled(&self) -> bool {
        self.auto_join.load(Ordering::SeqCst)
    }

    fn mic_list(&self) -> Option<Arc<dyn SdkList<Arc<dyn MicInfo>>>> {
        self.mics
            .lock()
            .clone()
            .map(|mics| Arc::new(mics) as Arc<dyn SdkList<Arc<dyn MicInfo>>>)
    }

    fn select_mic(&self, _: &str, _: &str) -> SdkError {
        SdkError::Success
    }

    fn set_suppress_background_noise_level(
        &self,
        _: NoiseSuppressionLevel,
    ) -> SdkError {
        SdkError::Success
    }
}

#[derive(Default)]
pub struct FakeAudioHelper {
    pub sink: Registered<dyn AudioRawDataSink>,
}

impl_debug_by_struct_name!(FakeAudioHelper);

impl AudioRawDataHelper for FakeAudioHelper {
    fn subscribe(&self, sink: Arc<dyn AudioRawDataSink>, _: bool) -> SdkError {
        *self.sink.lock() = Some(sink);
        SdkError::Success
    }

    fn unsubscribe(&self) -> SdkError {
        *self.sink.lock() = None;
        SdkError::Success
    }

    fn set_external_audio_source(
        &self,
        _: Option<Arc<dyn VirtualAudioMicSink>>,
    ) -> SdkError {
        SdkError::NoImpl
    }
}

/// Share audio frame counting its references.
#[derive(Debug)]
pub struct SharedFrame {
    pub pcm: Vec<u8>,
    pub refs: AtomicI32,
}

impl SharedFrame {
    pub fn new(pcm: Vec<u8>) -> Self {
        Self {
            pcm,
            refs: AtomicI32::new(1),
        }
    }

    pub fn refs(&self) -> i32 {
        self.refs.load(Ordering::SeqCst)
    }
}

impl AudioRawData for SharedFrame {
    fn buffer(&self) -> &[u8] {
        &self.pcm
    }

    fn sample_rate(&self) -> u32 {
        32_000
    }

    fn channel_num(&self) -> u32 {
        1
    }

    fn can_add_ref(&self) -> bool {
        true
    }

    fn add_ref(&self) -> bool {
        self.refs.fetch_add(1, Ordering::SeqCst);
        true
    }

    fn release(&self) -> i32 {
        self.refs.fetch_sub(1, Ordering::SeqCst) - 1
    }
}
