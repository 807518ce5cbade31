use std::{ffi::c_void, os::raw::c_char, ptr};

use crate::{
    sdk::SdkError,
    services::{AuthEvents, AuthServiceHandle},
};

use super::{c_str, c_string, status, string_into_c_str, ForeignContext};

/// Callbacks of the authentication events.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default)]
pub struct AuthCallbacks {
    pub on_authentication_return:
        Option<unsafe extern "C" fn(*mut c_void, u32)>,

    /// Receives the display name of the logged in account, or `NULL` if
    /// there is no account.
    pub on_login_return_with_reason:
        Option<unsafe extern "C" fn(*mut c_void, u32, *const c_char, u32)>,
    pub on_logout: Option<unsafe extern "C" fn(*mut c_void)>,
    pub on_zoom_identity_expired: Option<unsafe extern "C" fn(*mut c_void)>,
    pub on_zoom_auth_identity_expired:
        Option<unsafe extern "C" fn(*mut c_void)>,
}

impl AuthCallbacks {
    fn events() -> AuthEvents<ForeignContext<Self>> {
        AuthEvents {
            on_authentication_return: |ctx, result| {
                forward!(ctx.on_authentication_return(u32::from(result)))
            },
            on_login_return_with_reason: |ctx, login, account, reason| {
                let name = account
                    .and_then(|a| a.display_name.as_deref())
                    .map(c_string);
                forward!(ctx.on_login_return_with_reason(
                    u32::from(login),
                    name.as_ref().map_or(ptr::null(), |n| n.as_ptr()),
                    u32::from(reason),
                ))
            },
            on_logout: |ctx| forward!(ctx.on_logout()),
            on_zoom_identity_expired: |ctx| {
                forward!(ctx.on_zoom_identity_expired())
            },
            on_zoom_auth_identity_expired: |ctx| {
                forward!(ctx.on_zoom_auth_identity_expired())
            },
        }
    }
}

/// Registers the provided `callbacks` with the provided `ctx`, replacing the
/// previous registration.
#[no_mangle]
pub unsafe extern "C" fn auth_set_event(
    this: *const AuthServiceHandle,
    ctx: *mut c_void,
    callbacks: AuthCallbacks,
) -> SdkError {
    let this = &*this;
    this.set_event(ForeignContext::new(ctx, callbacks), AuthCallbacks::events())
}

#[no_mangle]
pub unsafe extern "C" fn auth_clear_event(
    this: *const AuthServiceHandle,
) -> SdkError {
    let this = &*this;
    this.clear_event()
}

#[no_mangle]
pub unsafe extern "C" fn auth_sdk_auth(
    this: *const AuthServiceHandle,
    jwt: *const c_char,
) -> SdkError {
    let this = &*this;
    match c_str(jwt) {
        Some(jwt) => status(this.sdk_auth(jwt)),
        None => SdkError::InvalidParameter,
    }
}

/// Returns `AuthResult` of the last authentication.
#[no_mangle]
pub unsafe extern "C" fn auth_result(this: *const AuthServiceHandle) -> u32 {
    let this = &*this;
    this.auth_result().into()
}

#[no_mangle]
pub unsafe extern "C" fn auth_sdk_identity(
    this: *const AuthServiceHandle,
) -> *mut c_char {
    let this = &*this;
    string_into_c_str(this.sdk_identity())
}

/// Returns `NULL` if the SDK generates no URL.
#[no_mangle]
pub unsafe extern "C" fn auth_generate_sso_login_web_url(
    this: *const AuthServiceHandle,
    prefix: *const c_char,
) -> *mut c_char {
    let this = &*this;
    let url = c_str(prefix)
        .and_then(|prefix| this.generate_sso_login_web_url(prefix).ok());
    string_into_c_str(url)
}

#[no_mangle]
pub unsafe extern "C" fn auth_sso_login_with_web_uri_protocol(
    this: *const AuthServiceHandle,
    uri: *const c_char,
) -> SdkError {
    let this = &*this;
    match c_str(uri) {
        Some(uri) => status(this.sso_login_with_web_uri_protocol(uri)),
        None => SdkError::InvalidParameter,
    }
}

#[no_mangle]
pub unsafe extern "C" fn auth_log_out(
    this: *const AuthServiceHandle,
) -> SdkError {
    let this = &*this;
    status(this.log_out())
}

/// Returns display name of the logged in account, or `NULL` if nobody is
/// logged in.
#[no_mangle]
pub unsafe extern "C" fn auth_account_display_name(
    this: *const AuthServiceHandle,
) -> *mut c_char {
    let this = &*this;
    string_into_c_str(this.account_info().and_then(|a| a.display_name))
}

/// Returns `LoginStatus` of the current user.
#[no_mangle]
pub unsafe extern "C" fn auth_login_status(
    this: *const AuthServiceHandle,
) -> u32 {
    let this = &*this;
    this.login_status().into()
}

#[cfg(test)]
mod spec {
    use std::{
        ffi::{c_void, CStr},
        os::raw::c_char,
        sync::Arc,
    };

    use parking_lot::Mutex;

    use super::{auth_clear_event, auth_set_event, AuthCallbacks};
    use crate::{
        sdk::{
            AccountInfo, AuthEventSink, AuthResult, LoginFailReason,
            LoginStatus, LoginType, MockAccountInfo, MockAuthService,
            SdkError,
        },
        services::AuthServiceHandle,
    };

    #[derive(Default)]
    struct Seen(Mutex<Vec<String>>);

    unsafe extern "C" fn on_auth(ctx: *mut c_void, result: u32) {
        let seen = &*(ctx as *const Seen);
        seen.0.lock().push(format!("auth {}", result));
    }

    unsafe extern "C" fn on_login(
        ctx: *mut c_void,
        status: u32,
        name: *const c_char,
        reason: u32,
    ) {
        let seen = &*(ctx as *const Seen);
        let name = if name.is_null() {
            "-".to_owned()
        } else {
            CStr::from_ptr(name).to_string_lossy().into_owned()
        };
        seen.0
            .lock()
            .push(format!("login {} {} {}", status, name, reason));
    }

    type Stored = Arc<Mutex<Option<Arc<dyn AuthEventSink>>>>;

    fn service(stored: &Stored) -> AuthServiceHandle {
        let stored = Arc::clone(stored);
        let mut service = MockAuthService::new();
        service.expect_set_event().returning(move |sink| {
            *stored.lock() = sink;
            SdkError::Success
        });
        AuthServiceHandle::new(Arc::new(service))
    }

    #[test]
    fn forwards_events_with_context() {
        let stored = Stored::default();
        let handle = service(&stored);
        let seen = Seen::default();
        let callbacks = AuthCallbacks {
            on_authentication_return: Some(on_auth),
            on_login_return_with_reason: Some(on_login),
            ..AuthCallbacks::default()
        };

        let code = unsafe {
            auth_set_event(
                &handle,
                &seen as *const Seen as *mut c_void,
                callbacks,
            )
        };
        assert_eq!(code, SdkError::Success);

        let sink = stored.lock().clone().unwrap();
        sink.on_authentication_return(AuthResult::JwtTokenWrong);
        let mut account = MockAccountInfo::new();
        account
            .expect_display_name()
            .returning(|| Some("Ada".to_owned()));
        account.expect_login_type().return_const(LoginType::Sso);
        sink.on_login_return_with_reason(
            LoginStatus::Success,
            Some(&account as &dyn AccountInfo),
            LoginFailReason::None,
        );
        sink.on_login_return_with_reason(
            LoginStatus::Failed,
            None,
            LoginFailReason::WrongPassword,
        );
        sink.on_logout();

        assert_eq!(
            *seen.0.lock(),
            vec![
                "auth 11".to_owned(),
                "login 2 Ada 0".to_owned(),
                "login 3 - 3".to_owned(),
            ],
        );

        assert_eq!(unsafe { auth_clear_event(&handle) }, SdkError::Success);
        assert!(stored.lock().is_none());
    }
}
