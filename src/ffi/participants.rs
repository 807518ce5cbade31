use std::{ffi::c_void, os::raw::c_char, ptr};

use crate::{
    bridge::{buffer, FlatBuffer},
    sdk::SdkError,
    services::meeting::{
        self, ParticipantsControllerHandle, ParticipantsEvents, UserInfoHandle,
    },
};

use super::{string_into_c_str, ForeignClass, ForeignContext};

/// Participant of a meeting as listed by `participants_list()`.
#[repr(C)]
#[derive(Debug)]
pub struct Participant {
    /// Information about the participant, owned by the list. `NULL` if the
    /// SDK has none.
    pub user_info: *const UserInfoHandle,

    pub user_id: i32,
}

impl From<&meeting::Participant> for Participant {
    fn from(participant: &meeting::Participant) -> Self {
        let user_info = participant
            .user_info
            .clone()
            .map_or(ptr::null(), |info| info.into_ptr().as_ptr() as *const _);
        Self {
            user_info,
            user_id: participant.user_id as i32,
        }
    }
}

impl ForeignClass for UserInfoHandle {}

/// Callbacks of the participants events.
///
/// User lists are valid during the callback only.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default)]
pub struct ParticipantsCallbacks {
    pub on_user_join: Option<unsafe extern "C" fn(*mut c_void, *mut u32, u32)>,
    pub on_user_left: Option<unsafe extern "C" fn(*mut c_void, *mut u32, u32)>,
    pub on_host_change_notification:
        Option<unsafe extern "C" fn(*mut c_void, u32)>,
    pub on_user_names_changed:
        Option<unsafe extern "C" fn(*mut c_void, *mut u32, u32)>,
}

impl ParticipantsCallbacks {
    fn events() -> ParticipantsEvents<ForeignContext<Self>> {
        ParticipantsEvents {
            on_user_join: |ctx, users| {
                forward!(ctx.on_user_join(
                    users.as_mut_ptr(),
                    users.len() as u32,
                ))
            },
            on_user_left: |ctx, users| {
                forward!(ctx.on_user_left(
                    users.as_mut_ptr(),
                    users.len() as u32,
                ))
            },
            on_host_change_notification: |ctx, user_id| {
                forward!(ctx.on_host_change_notification(user_id))
            },
            on_user_names_changed: |ctx, users| {
                forward!(ctx.on_user_names_changed(
                    users.as_mut_ptr(),
                    users.len() as u32,
                ))
            },
        }
    }
}

/// Registers the provided `callbacks` with the provided `ctx`, replacing the
/// previous registration.
#[no_mangle]
pub unsafe extern "C" fn participants_set_event(
    this: *const ParticipantsControllerHandle,
    ctx: *mut c_void,
    callbacks: ParticipantsCallbacks,
) -> SdkError {
    let this = &*this;
    this.set_event(
        ForeignContext::new(ctx, callbacks),
        ParticipantsCallbacks::events(),
    )
}

#[no_mangle]
pub unsafe extern "C" fn participants_clear_event(
    this: *const ParticipantsControllerHandle,
) -> SdkError {
    let this = &*this;
    this.clear_event()
}

/// Lists all the participants of the meeting, writing their number into
/// `count`.
///
/// `NULL` with zero `count` if the SDK has no list. Released with
/// `participants_list_free()`.
#[no_mangle]
pub unsafe extern "C" fn participants_list(
    this: *const ParticipantsControllerHandle,
    count: *mut u32,
) -> *mut Participant {
    let this = &*this;
    let users = this
        .users()
        .map(|users| users.iter().map(Participant::from).collect());
    buffer::hand_over(users, count)
}

/// Frees a list returned by `participants_list()` together with every user
/// information in it.
///
/// # Safety
///
/// `list` and `count` must be the ones returned by the same
/// `participants_list()` call. Calling this more than once for the same
/// pointer is equivalent to double free.
#[no_mangle]
pub unsafe extern "C" fn participants_list_free(
    list: *mut Participant,
    count: u32,
) {
    if let Some(list) = FlatBuffer::from_raw(list, count) {
        for participant in list.iter() {
            UserInfoHandle::free(participant.user_info as *mut _);
        }
    }
}

/// Returns information about the participant with the provided ID, released
/// with `user_info_free()`. `NULL` if the SDK has none.
#[no_mangle]
pub unsafe extern "C" fn participants_user_by_id(
    this: *const ParticipantsControllerHandle,
    user_id: u32,
) -> *mut UserInfoHandle {
    let this = &*this;
    this.user_by_id(user_id)
        .map_or(ptr::null_mut(), |info| info.into_ptr().as_ptr())
}

/// Returns information about the current user, released with
/// `user_info_free()`. `NULL` if the SDK has none.
#[no_mangle]
pub unsafe extern "C" fn participants_my_self_user(
    this: *const ParticipantsControllerHandle,
) -> *mut UserInfoHandle {
    let this = &*this;
    this.my_self_user()
        .map_or(ptr::null_mut(), |info| info.into_ptr().as_ptr())
}

#[no_mangle]
pub unsafe extern "C" fn participants_is_local_recording_request_allowed(
    this: *const ParticipantsControllerHandle,
) -> bool {
    let this = &*this;
    this.is_participant_request_local_recording_allowed()
}

#[no_mangle]
pub unsafe extern "C" fn user_info_is_talking(
    this: *const UserInfoHandle,
) -> bool {
    let this = &*this;
    this.is_talking()
}

/// Returns name of the user, released with `string_free()`.
#[no_mangle]
pub unsafe extern "C" fn user_info_user_name(
    this: *const UserInfoHandle,
) -> *mut c_char {
    let this = &*this;
    string_into_c_str(this.user_name())
}

#[no_mangle]
pub unsafe extern "C" fn user_info_audio_voice_level(
    this: *const UserInfoHandle,
) -> i32 {
    let this = &*this;
    this.audio_voice_level()
}

#[no_mangle]
pub unsafe extern "C" fn user_info_user_id(
    this: *const UserInfoHandle,
) -> u32 {
    let this = &*this;
    this.user_id()
}

#[no_mangle]
pub unsafe extern "C" fn user_info_is_host(
    this: *const UserInfoHandle,
) -> bool {
    let this = &*this;
    this.is_host()
}

/// Frees the data behind the provided pointer.
///
/// # Safety
///
/// Should be called when object is no longer needed. Calling this more than
/// once for the same pointer is equivalent to double free.
#[no_mangle]
pub unsafe extern "C" fn user_info_free(this: *mut UserInfoHandle) {
    UserInfoHandle::free(this);
}
