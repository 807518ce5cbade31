use std::{os::raw::c_char, ptr, sync::Arc};

use crate::{
    errors::Result,
    instance::Instance,
    jwt,
    rawdata::AudioRawDataHelperHandle,
    sdk::SdkError,
    services::{AuthServiceHandle, MeetingServiceHandle, SettingServiceHandle},
};

use super::{c_str, status, string_into_c_str, ForeignClass};

impl ForeignClass for Instance {}

/// Borrows the service cached by an [`Instance`]. `NULL` if it's missing.
fn borrowed<T>(service: Result<Arc<T>>) -> *const T {
    match service {
        Ok(service) => Arc::as_ptr(&service),
        Err(e) => {
            log::warn!("{}", e);
            ptr::null()
        }
    }
}

/// Returns the meeting service, valid until the [`Instance`] is cleaned up.
#[no_mangle]
pub unsafe extern "C" fn instance_meeting_service(
    this: *const Instance,
) -> *const MeetingServiceHandle {
    let this = &*this;
    borrowed(this.meeting_service())
}

/// Returns the authentication service, valid until the [`Instance`] is
/// cleaned up.
#[no_mangle]
pub unsafe extern "C" fn instance_auth_service(
    this: *const Instance,
) -> *const AuthServiceHandle {
    let this = &*this;
    borrowed(this.auth_service())
}

/// Returns the settings service, valid until the [`Instance`] is cleaned up.
#[no_mangle]
pub unsafe extern "C" fn instance_setting_service(
    this: *const Instance,
) -> *const SettingServiceHandle {
    let this = &*this;
    borrowed(this.setting_service())
}

/// Returns the raw audio helper, valid until the [`Instance`] is cleaned up.
#[no_mangle]
pub unsafe extern "C" fn instance_audio_raw_data_helper(
    this: *const Instance,
) -> *const AudioRawDataHelperHandle {
    let this = &*this;
    borrowed(this.audio_raw_data_helper())
}

/// Returns version of the SDK, released with `string_free()`.
#[no_mangle]
pub unsafe extern "C" fn instance_sdk_version(
    this: *const Instance,
) -> *mut c_char {
    let this = &*this;
    string_into_c_str(this.sdk_version())
}

/// Authenticates the SDK with a JWT generated from the provided credentials.
#[no_mangle]
pub unsafe extern "C" fn instance_authenticate(
    this: *const Instance,
    sdk_key: *const c_char,
    sdk_secret: *const c_char,
) -> SdkError {
    let this = &*this;
    let (key, secret) = match (c_str(sdk_key), c_str(sdk_secret)) {
        (Some(key), Some(secret)) => (key, secret),
        _ => return SdkError::InvalidParameter,
    };
    let token = match jwt::generate(key, secret, &this.conf().jwt) {
        Ok(token) => token,
        Err(e) => {
            log::error!("Failed to generate JWT: {}", e);
            return SdkError::InternalError;
        }
    };
    status(this.auth_service().and_then(|auth| auth.sdk_auth(&token)))
}

#[no_mangle]
pub unsafe extern "C" fn instance_switch_domain(
    this: *const Instance,
    domain: *const c_char,
    force: bool,
) -> SdkError {
    let this = &*this;
    match c_str(domain) {
        Some(domain) => status(this.switch_domain(domain, force)),
        None => SdkError::InvalidParameter,
    }
}

#[no_mangle]
pub unsafe extern "C" fn instance_create_network_connection_helper(
    this: *const Instance,
) -> SdkError {
    let this = &*this;
    status(this.create_network_connection_helper())
}

#[no_mangle]
pub unsafe extern "C" fn instance_destroy_network_connection_helper(
    this: *const Instance,
) -> SdkError {
    let this = &*this;
    status(this.destroy_network_connection_helper())
}

/// Releases every service of the [`Instance`] and cleans the SDK up.
///
/// Every handle borrowed from the [`Instance`] is invalid afterwards.
#[no_mangle]
pub unsafe extern "C" fn instance_cleanup(this: *const Instance) -> SdkError {
    let this = &*this;
    status(this.cleanup())
}

/// Frees the data behind the provided pointer, cleaning the SDK up if
/// `instance_cleanup()` wasn't called.
///
/// # Safety
///
/// Should be called when object is no longer needed. Calling this more than
/// once for the same pointer is equivalent to double free.
#[no_mangle]
pub unsafe extern "C" fn instance_free(this: *mut Instance) {
    Instance::free(this);
}
