use std::{ffi::c_void, os::raw::c_char, ptr};

use crate::{
    sdk::SdkError,
    services::meeting::{ShareEvents, SharingControllerHandle},
};

use super::{c_string, ForeignContext};

/// Callbacks of the share events.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default)]
pub struct ShareCallbacks {
    /// Receives `SharingStatus` and ID of the sharing user.
    pub on_sharing_status: Option<unsafe extern "C" fn(*mut c_void, u32, u32)>,
    pub on_lock_share_status: Option<unsafe extern "C" fn(*mut c_void, bool)>,

    /// Receives `ShareType` and the shared monitor, or `NULL` if no monitor
    /// is shared.
    pub on_share_content_notification:
        Option<unsafe extern "C" fn(*mut c_void, u32, *const c_char)>,
    pub on_multi_share_switch_to_single_share_need_confirm:
        Option<unsafe extern "C" fn(*mut c_void)>,
    pub on_share_setting_type_changed:
        Option<unsafe extern "C" fn(*mut c_void, u32)>,
    pub on_shared_video_ended: Option<unsafe extern "C" fn(*mut c_void)>,
    pub on_video_file_share_play_error:
        Option<unsafe extern "C" fn(*mut c_void, u32)>,
}

impl ShareCallbacks {
    fn events() -> ShareEvents<ForeignContext<Self>> {
        ShareEvents {
            on_sharing_status: |ctx, sharing, user_id| {
                forward!(ctx.on_sharing_status(u32::from(sharing), user_id))
            },
            on_lock_share_status: |ctx, locked| {
                forward!(ctx.on_lock_share_status(locked))
            },
            on_share_content_notification: |ctx, info| {
                let monitor = info.monitor_id.as_deref().map(c_string);
                forward!(ctx.on_share_content_notification(
                    u32::from(info.share_type),
                    monitor.as_ref().map_or(ptr::null(), |m| m.as_ptr()),
                ))
            },
            on_multi_share_switch_to_single_share_need_confirm: |ctx| {
                forward!(
                    ctx.on_multi_share_switch_to_single_share_need_confirm()
                )
            },
            on_share_setting_type_changed: |ctx, setting| {
                forward!(ctx.on_share_setting_type_changed(u32::from(setting)))
            },
            on_shared_video_ended: |ctx| forward!(ctx.on_shared_video_ended()),
            on_video_file_share_play_error: |ctx, error| {
                forward!(ctx.on_video_file_share_play_error(u32::from(error)))
            },
        }
    }
}

/// Registers the provided `callbacks` with the provided `ctx`, replacing the
/// previous registration.
#[no_mangle]
pub unsafe extern "C" fn sharing_set_event(
    this: *const SharingControllerHandle,
    ctx: *mut c_void,
    callbacks: ShareCallbacks,
) -> SdkError {
    let this = &*this;
    this.set_event(
        ForeignContext::new(ctx, callbacks),
        ShareCallbacks::events(),
    )
}

#[no_mangle]
pub unsafe extern "C" fn sharing_clear_event(
    this: *const SharingControllerHandle,
) -> SdkError {
    let this = &*this;
    this.clear_event()
}
