use std::{ffi::c_void, ptr};

use crate::{
    bridge::RawDataRetention,
    instance::Instance,
    rawdata::{
        AudioRawDataEvents, AudioRawDataHelperHandle, AudioSenderHandle,
        ExportedAudioRawData, ExportedVideoRawData, RendererEvents,
        RendererHandle, VirtualMicEvents,
    },
    sdk::{RawDataType, SdkError, VideoResolution},
};

use super::{status, ForeignClass, ForeignContext};

/// Callbacks of the raw audio subscription.
///
/// Frames are valid during the callback only.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default)]
pub struct AudioRawDataCallbacks {
    pub on_mixed:
        Option<unsafe extern "C" fn(*mut c_void, &ExportedAudioRawData<'_>)>,

    /// Receives ID of the participant the audio belongs to.
    pub on_one_way: Option<
        unsafe extern "C" fn(*mut c_void, &ExportedAudioRawData<'_>, u32),
    >,

    /// Returns what to do with the SDK frame: `1` retains it once, `-N`
    /// releases `N` retentions made before, anything else does nothing.
    pub on_share: Option<
        unsafe extern "C" fn(*mut c_void, &ExportedAudioRawData<'_>) -> i32,
    >,

    pub flush: Option<unsafe extern "C" fn(*mut c_void)>,
}

impl AudioRawDataCallbacks {
    fn events() -> AudioRawDataEvents<ForeignContext<Self>> {
        AudioRawDataEvents {
            on_mixed: |ctx, data| forward!(ctx.on_mixed(data)),
            on_one_way: |ctx, data, node_id| {
                forward!(ctx.on_one_way(data, node_id))
            },
            on_share: |ctx, data| match ctx.callbacks.on_share {
                Some(on_share) => {
                    RawDataRetention::from(unsafe { on_share(ctx.ptr, data) })
                }
                None => RawDataRetention::Release,
            },
            flush: |ctx| forward!(ctx.flush()),
        }
    }
}

/// Subscribes the provided `callbacks` with the provided `ctx` to the meeting
/// audio, replacing the previous subscription.
#[no_mangle]
pub unsafe extern "C" fn audio_raw_data_subscribe(
    this: *const AudioRawDataHelperHandle,
    ctx: *mut c_void,
    callbacks: AudioRawDataCallbacks,
    use_separate_channels: bool,
) -> SdkError {
    let this = &*this;
    this.subscribe(
        ForeignContext::new(ctx, callbacks),
        AudioRawDataCallbacks::events(),
        use_separate_channels,
    )
}

/// Removes the current subscription, calling its `flush` callback.
#[no_mangle]
pub unsafe extern "C" fn audio_raw_data_unsubscribe(
    this: *const AudioRawDataHelperHandle,
) -> SdkError {
    let this = &*this;
    this.unsubscribe()
}

/// Callbacks of the virtual microphone.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default)]
pub struct VirtualMicCallbacks {
    /// Receives a sender owned by the callee, released with
    /// `audio_sender_free()`.
    pub on_mic_initialize:
        Option<unsafe extern "C" fn(*mut c_void, *mut AudioSenderHandle)>,
    pub on_mic_start_send: Option<unsafe extern "C" fn(*mut c_void)>,
    pub on_mic_stop_send: Option<unsafe extern "C" fn(*mut c_void)>,
    pub on_mic_uninitialized: Option<unsafe extern "C" fn(*mut c_void)>,
}

impl VirtualMicCallbacks {
    fn events() -> VirtualMicEvents<ForeignContext<Self>> {
        VirtualMicEvents {
            on_mic_initialize: |ctx, sender| {
                if ctx.callbacks.on_mic_initialize.is_some() {
                    let sender = sender.clone().into_ptr().as_ptr();
                    forward!(ctx.on_mic_initialize(sender))
                }
            },
            on_mic_start_send: |ctx| forward!(ctx.on_mic_start_send()),
            on_mic_stop_send: |ctx| forward!(ctx.on_mic_stop_send()),
            on_mic_uninitialized: |ctx| forward!(ctx.on_mic_uninitialized()),
        }
    }
}

impl ForeignClass for AudioSenderHandle {}

/// Replaces the microphone with a virtual one driven by the provided
/// `callbacks`.
#[no_mangle]
pub unsafe extern "C" fn audio_raw_data_set_external_audio_source(
    this: *const AudioRawDataHelperHandle,
    ctx: *mut c_void,
    callbacks: VirtualMicCallbacks,
) -> SdkError {
    let this = &*this;
    this.set_external_audio_source(
        ForeignContext::new(ctx, callbacks),
        VirtualMicCallbacks::events(),
    )
}

/// Restores the real microphone.
#[no_mangle]
pub unsafe extern "C" fn audio_raw_data_clear_external_audio_source(
    this: *const AudioRawDataHelperHandle,
) -> SdkError {
    let this = &*this;
    this.clear_external_audio_source()
}

/// Sends `len` bytes of PCM audio sampled with `sample_rate`.
#[no_mangle]
pub unsafe extern "C" fn audio_sender_send(
    this: *const AudioSenderHandle,
    data: *const u8,
    len: u32,
    sample_rate: u32,
) -> SdkError {
    let this = &*this;
    if data.is_null() {
        return SdkError::InvalidParameter;
    }
    let data = std::slice::from_raw_parts(data, len as usize);
    status(this.send(data, sample_rate))
}

/// Frees the data behind the provided pointer.
///
/// # Safety
///
/// Should be called when object is no longer needed. Calling this more than
/// once for the same pointer is equivalent to double free.
#[no_mangle]
pub unsafe extern "C" fn audio_sender_free(this: *mut AudioSenderHandle) {
    AudioSenderHandle::free(this);
}

/// Callbacks of a raw video renderer.
///
/// Frames are valid during the callback only.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default)]
pub struct RendererCallbacks {
    pub on_frame:
        Option<unsafe extern "C" fn(*mut c_void, &ExportedVideoRawData<'_>)>,

    /// Receives whether raw video is on, and the time it changed in
    /// microseconds since the Unix epoch.
    pub on_status_changed:
        Option<unsafe extern "C" fn(*mut c_void, bool, i64)>,

    /// Renderer must only be freed afterwards.
    pub on_destroyed: Option<unsafe extern "C" fn(*mut c_void, i64)>,
    pub flush: Option<unsafe extern "C" fn(*mut c_void)>,
}

impl RendererCallbacks {
    fn events() -> RendererEvents<ForeignContext<Self>> {
        RendererEvents {
            on_frame: |ctx, frame| forward!(ctx.on_frame(frame)),
            on_status_changed: |ctx, on, time| {
                forward!(ctx.on_status_changed(on, time))
            },
            on_destroyed: |ctx, time| forward!(ctx.on_destroyed(time)),
            flush: |ctx| forward!(ctx.flush()),
        }
    }
}

impl ForeignClass for RendererHandle {}

/// Creates a raw video renderer delivering frames of at most the provided
/// `VideoResolution` into the provided `callbacks`.
///
/// `NULL` if the SDK refuses to create it. Released with `renderer_free()`.
#[no_mangle]
pub unsafe extern "C" fn instance_create_renderer(
    this: *const Instance,
    ctx: *mut c_void,
    callbacks: RendererCallbacks,
    resolution: u32,
) -> *mut RendererHandle {
    let this = &*this;
    let renderer = this.create_renderer(
        ForeignContext::new(ctx, callbacks),
        RendererCallbacks::events(),
        VideoResolution::from(resolution),
    );
    match renderer {
        Ok(renderer) => renderer.into_ptr().as_ptr(),
        Err(e) => {
            log::warn!("Failed to create renderer: {}", e);
            ptr::null_mut()
        }
    }
}

/// Subscribes the renderer to the `RawDataType` video of the provided user.
#[no_mangle]
pub unsafe extern "C" fn renderer_subscribe(
    this: *const RendererHandle,
    user_id: u32,
    data_type: u32,
) -> SdkError {
    let this = &*this;
    status(this.subscribe(user_id, RawDataType::from(data_type)))
}

#[no_mangle]
pub unsafe extern "C" fn renderer_unsubscribe(
    this: *const RendererHandle,
) -> SdkError {
    let this = &*this;
    status(this.unsubscribe())
}

#[no_mangle]
pub unsafe extern "C" fn renderer_set_resolution(
    this: *const RendererHandle,
    resolution: u32,
) -> SdkError {
    let this = &*this;
    status(this.set_resolution(VideoResolution::from(resolution)))
}

/// Indicates whether the SDK destroyed the renderer already.
#[no_mangle]
pub unsafe extern "C" fn renderer_is_destroyed(
    this: *const RendererHandle,
) -> bool {
    let this = &*this;
    this.is_destroyed()
}

/// Unsubscribes the renderer and frees it.
///
/// # Safety
///
/// Should be called when object is no longer needed. Calling this more than
/// once for the same pointer is equivalent to double free.
#[no_mangle]
pub unsafe extern "C" fn renderer_free(this: *mut RendererHandle) {
    RendererHandle::free(this);
}
