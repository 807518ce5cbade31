use std::ffi::c_void;

use crate::{
    sdk::SdkError,
    services::meeting::{RecordingControllerHandle, RecordingEvents},
};

use super::{status, ForeignContext};

/// Callbacks of the recording events.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default)]
pub struct RecordingCallbacks {
    /// Receives `RecordingStatus` and the time of the change in milliseconds
    /// since the Unix epoch.
    pub on_recording_status:
        Option<unsafe extern "C" fn(*mut c_void, u32, i64)>,
    pub on_cloud_recording_status:
        Option<unsafe extern "C" fn(*mut c_void, u32)>,
    pub on_recording_privilege_changed:
        Option<unsafe extern "C" fn(*mut c_void, bool)>,
    pub on_recording_privilege_request_status:
        Option<unsafe extern "C" fn(*mut c_void, u32)>,
    pub on_cloud_recording_storage_full:
        Option<unsafe extern "C" fn(*mut c_void, i64)>,
}

impl RecordingCallbacks {
    fn events() -> RecordingEvents<ForeignContext<Self>> {
        RecordingEvents {
            on_recording_status: |ctx, recording, time| {
                forward!(ctx.on_recording_status(u32::from(recording), time))
            },
            on_cloud_recording_status: |ctx, recording| {
                forward!(ctx.on_cloud_recording_status(u32::from(recording)))
            },
            on_recording_privilege_changed: |ctx, can_record| {
                forward!(ctx.on_recording_privilege_changed(can_record))
            },
            on_recording_privilege_request_status: |ctx, answer| {
                forward!(ctx.on_recording_privilege_request_status(
                    u32::from(answer),
                ))
            },
            on_cloud_recording_storage_full: |ctx, grace_period_date| {
                forward!(ctx.on_cloud_recording_storage_full(grace_period_date))
            },
        }
    }
}

/// Registers the provided `callbacks` with the provided `ctx`, replacing the
/// previous registration.
#[no_mangle]
pub unsafe extern "C" fn recording_set_event(
    this: *const RecordingControllerHandle,
    ctx: *mut c_void,
    callbacks: RecordingCallbacks,
) -> SdkError {
    let this = &*this;
    this.set_event(
        ForeignContext::new(ctx, callbacks),
        RecordingCallbacks::events(),
    )
}

#[no_mangle]
pub unsafe extern "C" fn recording_clear_event(
    this: *const RecordingControllerHandle,
) -> SdkError {
    let this = &*this;
    this.clear_event()
}

#[no_mangle]
pub unsafe extern "C" fn recording_request_local_recording_privilege(
    this: *const RecordingControllerHandle,
) -> SdkError {
    let this = &*this;
    status(this.request_local_recording_privilege())
}

#[no_mangle]
pub unsafe extern "C" fn recording_request_start_cloud_recording(
    this: *const RecordingControllerHandle,
) -> SdkError {
    let this = &*this;
    status(this.request_start_cloud_recording())
}

/// Writes the time recording started at into `start_time` on success.
#[no_mangle]
pub unsafe extern "C" fn recording_start(
    this: *const RecordingControllerHandle,
    start_time: *mut i64,
) -> SdkError {
    let this = &*this;
    status(this.start_recording().map(|time| {
        if let Some(out) = start_time.as_mut() {
            *out = time;
        }
    }))
}

/// Writes the time recording stopped at into `stop_time` on success.
#[no_mangle]
pub unsafe extern "C" fn recording_stop(
    this: *const RecordingControllerHandle,
    stop_time: *mut i64,
) -> SdkError {
    let this = &*this;
    status(this.stop_recording().map(|time| {
        if let Some(out) = stop_time.as_mut() {
            *out = time;
        }
    }))
}

#[no_mangle]
pub unsafe extern "C" fn recording_pause(
    this: *const RecordingControllerHandle,
) -> SdkError {
    let this = &*this;
    status(this.pause_recording())
}

#[no_mangle]
pub unsafe extern "C" fn recording_resume(
    this: *const RecordingControllerHandle,
) -> SdkError {
    let this = &*this;
    status(this.resume_recording())
}

#[no_mangle]
pub unsafe extern "C" fn recording_can_start_raw_recording(
    this: *const RecordingControllerHandle,
) -> SdkError {
    let this = &*this;
    status(this.can_start_raw_recording())
}

#[no_mangle]
pub unsafe extern "C" fn recording_start_raw_recording(
    this: *const RecordingControllerHandle,
) -> SdkError {
    let this = &*this;
    status(this.start_raw_recording())
}

#[no_mangle]
pub unsafe extern "C" fn recording_stop_raw_recording(
    this: *const RecordingControllerHandle,
) -> SdkError {
    let this = &*this;
    status(this.stop_raw_recording())
}
