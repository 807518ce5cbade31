use std::{
    ffi::{c_void, CString},
    os::raw::c_char,
    ptr,
    sync::Arc,
};

use crate::{
    instance::Instance,
    sdk::{self, ChatMessageType, LeaveMeetingCmd, MeetingParameter, SdkError},
    services::{
        meeting::{
            AudioControllerHandle, ChatControllerHandle,
            ParticipantsControllerHandle, RecordingControllerHandle,
            SharingControllerHandle, VideoSenderHandle, VideoSourceEvents,
            VirtualWebcam,
        },
        MeetingEvents, MeetingServiceHandle,
    },
};

use super::{c_str, c_string, status, ForeignClass, ForeignContext};

/// Parameters of the current meeting, valid during the callback only.
#[repr(C)]
#[derive(Debug)]
pub struct MeetingParameterInfo {
    pub meeting_type: u32,
    pub is_view_only: bool,
    pub is_auto_recording_local: bool,
    pub is_auto_recording_cloud: bool,
    pub meeting_number: u64,

    /// `NULL` if the meeting has no topic.
    pub meeting_topic: *const c_char,

    /// `NULL` if the host is unknown.
    pub meeting_host: *const c_char,
}

/// Callbacks of the meeting events.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default)]
pub struct MeetingCallbacks {
    /// Receives `MeetingStatus` and its result code.
    pub on_meeting_status_changed:
        Option<unsafe extern "C" fn(*mut c_void, u32, i32)>,
    pub on_meeting_statistics_warning:
        Option<unsafe extern "C" fn(*mut c_void, u32)>,
    pub on_meeting_parameter_notification:
        Option<unsafe extern "C" fn(*mut c_void, *const MeetingParameterInfo)>,
    pub on_suspend_participants_activities:
        Option<unsafe extern "C" fn(*mut c_void)>,
    pub on_ai_companion_active_change:
        Option<unsafe extern "C" fn(*mut c_void, bool)>,
    pub on_meeting_topic_changed:
        Option<unsafe extern "C" fn(*mut c_void, *const c_char)>,
    pub on_meeting_full_to_watch_live_stream:
        Option<unsafe extern "C" fn(*mut c_void, *const c_char)>,
}

impl MeetingCallbacks {
    fn events() -> MeetingEvents<ForeignContext<Self>> {
        MeetingEvents {
            on_meeting_status_changed: |ctx, meeting, result| {
                forward!(ctx.on_meeting_status_changed(
                    u32::from(meeting),
                    result,
                ))
            },
            on_meeting_statistics_warning: |ctx, warning| {
                forward!(ctx.on_meeting_statistics_warning(u32::from(warning)))
            },
            on_meeting_parameter_notification: |ctx, param| {
                notify_parameter(ctx, param)
            },
            on_suspend_participants_activities: |ctx| {
                forward!(ctx.on_suspend_participants_activities())
            },
            on_ai_companion_active_change: |ctx, active| {
                forward!(ctx.on_ai_companion_active_change(active))
            },
            on_meeting_topic_changed: |ctx, topic| {
                let topic = c_string(topic);
                forward!(ctx.on_meeting_topic_changed(topic.as_ptr()))
            },
            on_meeting_full_to_watch_live_stream: |ctx, url| {
                let url = c_string(url);
                forward!(ctx.on_meeting_full_to_watch_live_stream(url.as_ptr()))
            },
        }
    }
}

fn notify_parameter(
    ctx: &ForeignContext<MeetingCallbacks>,
    param: &MeetingParameter,
) {
    let topic = param.meeting_topic.as_deref().map(c_string);
    let host = param.meeting_host.as_deref().map(c_string);
    let as_ptr =
        |s: &Option<CString>| s.as_ref().map_or(ptr::null(), |s| s.as_ptr());
    let info = MeetingParameterInfo {
        meeting_type: param.meeting_type,
        is_view_only: param.is_view_only,
        is_auto_recording_local: param.is_auto_recording_local,
        is_auto_recording_cloud: param.is_auto_recording_cloud,
        meeting_number: param.meeting_number,
        meeting_topic: as_ptr(&topic),
        meeting_host: as_ptr(&host),
    };
    forward!(ctx.on_meeting_parameter_notification(&info));
}

/// Registers the provided `callbacks` with the provided `ctx`, replacing the
/// previous registration.
#[no_mangle]
pub unsafe extern "C" fn meeting_set_event(
    this: *const MeetingServiceHandle,
    ctx: *mut c_void,
    callbacks: MeetingCallbacks,
) -> SdkError {
    let this = &*this;
    this.set_event(
        ForeignContext::new(ctx, callbacks),
        MeetingCallbacks::events(),
    )
}

#[no_mangle]
pub unsafe extern "C" fn meeting_clear_event(
    this: *const MeetingServiceHandle,
) -> SdkError {
    let this = &*this;
    this.clear_event()
}

/// Joins the meeting as a user without login. `password` may be `NULL`.
#[no_mangle]
pub unsafe extern "C" fn meeting_join(
    this: *const MeetingServiceHandle,
    meeting_id: u64,
    user_name: *const c_char,
    password: *const c_char,
) -> SdkError {
    let this = &*this;
    match c_str(user_name) {
        Some(name) => status(this.join(meeting_id, name, c_str(password))),
        None => SdkError::InvalidParameter,
    }
}

/// Joins the meeting an invitation URL points to as a user without login.
#[no_mangle]
pub unsafe extern "C" fn meeting_join_url(
    this: *const MeetingServiceHandle,
    url: *const c_char,
    user_name: *const c_char,
) -> SdkError {
    let this = &*this;
    match (c_str(url), c_str(user_name)) {
        (Some(url), Some(name)) => status(this.join_url(url, name)),
        _ => SdkError::InvalidParameter,
    }
}

/// Leaves the meeting with the provided `LeaveMeetingCmd`.
#[no_mangle]
pub unsafe extern "C" fn meeting_leave(
    this: *const MeetingServiceHandle,
    cmd: u32,
) -> SdkError {
    let this = &*this;
    status(this.leave(LeaveMeetingCmd::from(cmd)))
}

/// Returns `MeetingStatus` of the current meeting.
#[no_mangle]
pub unsafe extern "C" fn meeting_status(
    this: *const MeetingServiceHandle,
) -> u32 {
    let this = &*this;
    this.status().into()
}

/// Borrows a controller of a meeting. `NULL` if the SDK provides none.
fn borrowed<T>(controller: Option<&T>) -> *const T {
    controller.map_or(ptr::null(), |c| c as *const T)
}

#[no_mangle]
pub unsafe extern "C" fn meeting_chat(
    this: *const MeetingServiceHandle,
) -> *const ChatControllerHandle {
    let this = &*this;
    borrowed(this.chat())
}

#[no_mangle]
pub unsafe extern "C" fn meeting_participants(
    this: *const MeetingServiceHandle,
) -> *const ParticipantsControllerHandle {
    let this = &*this;
    borrowed(this.participants())
}

#[no_mangle]
pub unsafe extern "C" fn meeting_recording(
    this: *const MeetingServiceHandle,
) -> *const RecordingControllerHandle {
    let this = &*this;
    borrowed(this.recording())
}

#[no_mangle]
pub unsafe extern "C" fn meeting_sharing(
    this: *const MeetingServiceHandle,
) -> *const SharingControllerHandle {
    let this = &*this;
    borrowed(this.sharing())
}

#[no_mangle]
pub unsafe extern "C" fn meeting_audio(
    this: *const MeetingServiceHandle,
) -> *const AudioControllerHandle {
    let this = &*this;
    borrowed(this.audio())
}

/// Chat message built by `chat_build()`.
#[derive(Debug)]
pub struct ChatMessage(Arc<dyn sdk::ChatMessage>);

impl ForeignClass for ChatMessage {}

/// Builds a chat message with the provided `content` addressed to the
/// provided `ChatMessageType` audience.
///
/// `NULL` if any step of the SDK builder fails.
#[no_mangle]
pub unsafe extern "C" fn chat_build(
    this: *const ChatControllerHandle,
    content: *const c_char,
    message_type: u32,
) -> *mut ChatMessage {
    let this = &*this;
    let content = match c_str(content) {
        Some(content) => content,
        None => return ptr::null_mut(),
    };
    match this.build_message(content, ChatMessageType::from(message_type)) {
        Ok(message) => ChatMessage(message).into_ptr().as_ptr(),
        Err(e) => {
            log::warn!("Failed to build chat message: {}", e);
            ptr::null_mut()
        }
    }
}

#[no_mangle]
pub unsafe extern "C" fn chat_send(
    this: *const ChatControllerHandle,
    message: *const ChatMessage,
) -> SdkError {
    let this = &*this;
    match message.as_ref() {
        Some(message) => status(this.send(Arc::clone(&message.0))),
        None => SdkError::InvalidParameter,
    }
}

#[no_mangle]
pub unsafe extern "C" fn chat_send_to_all(
    this: *const ChatControllerHandle,
    content: *const c_char,
) -> SdkError {
    let this = &*this;
    match c_str(content) {
        Some(content) => status(this.send_to_all(content)),
        None => SdkError::InvalidParameter,
    }
}

/// Frees the data behind the provided pointer.
///
/// # Safety
///
/// Should be called when object is no longer needed. Calling this more than
/// once for the same pointer is equivalent to double free.
#[no_mangle]
pub unsafe extern "C" fn chat_message_free(this: *mut ChatMessage) {
    ChatMessage::free(this);
}

#[no_mangle]
pub unsafe extern "C" fn audio_mute_microphone(
    this: *const AudioControllerHandle,
    user_id: u32,
) -> SdkError {
    let this = &*this;
    status(this.mute_microphone(user_id))
}

#[no_mangle]
pub unsafe extern "C" fn audio_unmute_microphone(
    this: *const AudioControllerHandle,
    user_id: u32,
) -> SdkError {
    let this = &*this;
    status(this.unmute_microphone(user_id))
}

/// Callbacks of the virtual webcam.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default)]
pub struct VideoSourceCallbacks {
    /// Receives a sender owned by the callee, released with
    /// `video_sender_free()`.
    pub on_video_source_started:
        Option<unsafe extern "C" fn(*mut c_void, *mut VideoSenderHandle)>,
    pub on_video_source_stopped: Option<unsafe extern "C" fn(*mut c_void)>,
}

impl VideoSourceCallbacks {
    fn events() -> VideoSourceEvents<ForeignContext<Self>> {
        VideoSourceEvents {
            on_video_source_started: |ctx, sender| {
                if ctx.callbacks.on_video_source_started.is_some() {
                    let sender = sender.clone().into_ptr().as_ptr();
                    forward!(ctx.on_video_source_started(sender))
                }
            },
            on_video_source_stopped: |ctx| {
                forward!(ctx.on_video_source_stopped())
            },
        }
    }
}

impl ForeignClass for VideoSenderHandle {}
impl ForeignClass for VirtualWebcam {}

/// Registers a virtual webcam as the video source of the current meeting and
/// turns the video on.
///
/// `NULL` on failure. The webcam stays registered until
/// `virtual_webcam_free()`.
#[no_mangle]
pub unsafe extern "C" fn instance_init_virtual_webcam(
    this: *const Instance,
    ctx: *mut c_void,
    callbacks: VideoSourceCallbacks,
) -> *mut VirtualWebcam {
    let this = &*this;
    let webcam = this.meeting_service().and_then(|meeting| {
        meeting.init_virtual_webcam(
            this.video_source_helper(),
            ForeignContext::new(ctx, callbacks),
            VideoSourceCallbacks::events(),
            this.conf().webcam,
        )
    });
    match webcam {
        Ok(webcam) => webcam.into_ptr().as_ptr(),
        Err(e) => {
            log::warn!("Failed to init virtual webcam: {}", e);
            ptr::null_mut()
        }
    }
}

/// Unregisters the virtual webcam and frees it.
///
/// # Safety
///
/// Should be called when object is no longer needed. Calling this more than
/// once for the same pointer is equivalent to double free.
#[no_mangle]
pub unsafe extern "C" fn virtual_webcam_free(this: *mut VirtualWebcam) {
    VirtualWebcam::free(this);
}

/// Sends one I420 frame of `len` bytes into the virtual webcam.
#[no_mangle]
pub unsafe extern "C" fn video_sender_play_frame(
    this: *const VideoSenderHandle,
    frame: *const u8,
    len: u32,
) -> SdkError {
    let this = &*this;
    if frame.is_null() {
        return SdkError::InvalidParameter;
    }
    let frame = std::slice::from_raw_parts(frame, len as usize);
    status(this.play_frame(frame))
}

/// Frees the data behind the provided pointer.
///
/// # Safety
///
/// Should be called when object is no longer needed. Calling this more than
/// once for the same pointer is equivalent to double free.
#[no_mangle]
pub unsafe extern "C" fn video_sender_free(this: *mut VideoSenderHandle) {
    VideoSenderHandle::free(this);
}
