//! External API of this library exposed as `extern "C"` functions.
//!
//! Every function takes the handle it operates on first. Handles of services
//! and controllers are borrowed: they stay valid while the [`Instance`] they
//! were obtained from keeps the service cached. Everything returned as an
//! owned pointer is released with the paired `*_free` function.
//!
//! Events are registered as a context pointer plus a `#[repr(C)]` table of
//! nullable callbacks. A `NULL` callback ignores its event.
//!
//! [`Instance`]: crate::instance::Instance

#![allow(clippy::missing_safety_doc, missing_docs)]

/// Calls the callback of the provided [`ForeignContext`], if it's set.
macro_rules! forward {
    ($ctx:ident . $callback:ident ( $($arg:expr),* $(,)? )) => {
        if let Some(callback) = $ctx.callbacks.$callback {
            unsafe { callback($ctx.ptr, $($arg),*) }
        }
    };
}

pub mod auth;
pub mod instance;
pub mod meeting;
pub mod participants;
pub mod rawdata;
pub mod recording;
pub mod setting;
pub mod sharing;

use std::{
    ffi::{c_void, CStr, CString},
    os::raw::c_char,
    ptr::{self, NonNull},
};

use tracerr::Traced;

use crate::{errors::BridgeError, sdk::SdkError};

/// Rust structure handed over to the foreign side as an owned thin pointer.
pub trait ForeignClass: Sized {
    /// Consumes itself returning a wrapped raw pointer obtained via
    /// [`Box::into_raw()`].
    #[inline]
    #[must_use]
    fn into_ptr(self) -> NonNull<Self> {
        NonNull::from(Box::leak(Box::new(self)))
    }

    /// Constructs a [`ForeignClass`] from the given raw pointer via
    /// [`Box::from_raw()`].
    ///
    /// # Safety
    ///
    /// Same as for [`Box::from_raw()`].
    #[inline]
    #[must_use]
    unsafe fn from_ptr(this: NonNull<Self>) -> Self {
        *Box::from_raw(this.as_ptr())
    }

    /// Drops the [`ForeignClass`] behind the given raw pointer, if any.
    ///
    /// # Safety
    ///
    /// Same as for [`Box::from_raw()`].
    #[inline]
    unsafe fn free(this: *mut Self) {
        if let Some(this) = NonNull::new(this) {
            drop(Self::from_ptr(this));
        }
    }
}

/// Context of events registered through the C ABI.
///
/// Pairs the foreign context pointer with the callback table it was
/// registered together with, so each table only ever reaches its own events.
#[derive(Debug)]
pub struct ForeignContext<T> {
    /// Context pointer passed to every callback unchanged.
    pub ptr: *mut c_void,

    /// Callbacks registered together with the context.
    pub callbacks: T,
}

impl<T> ForeignContext<T> {
    /// Pairs the provided context `ptr` with its `callbacks`.
    #[inline]
    #[must_use]
    pub fn new(ptr: *mut c_void, callbacks: T) -> Self {
        Self { ptr, callbacks }
    }
}

// SAFETY: The foreign side guarantees its context may be used from any SDK
//         thread for as long as it stays registered.
unsafe impl<T: Send> Send for ForeignContext<T> {}
unsafe impl<T: Sync> Sync for ForeignContext<T> {}

/// Converts the provided result of the Rust API into a status code.
fn status(result: Result<(), Traced<BridgeError>>) -> SdkError {
    match result {
        Ok(()) => SdkError::Success,
        Err(e) => {
            let (err, trace) = e.into_parts();
            log::warn!("{}\n{}", err, trace);
            SdkError::from(&err)
        }
    }
}

/// Borrows the provided C string as UTF-8.
///
/// `None` for `NULL` or invalid UTF-8.
///
/// # Safety
///
/// Same as for [`CStr::from_ptr()`].
unsafe fn c_str<'a>(string: *const c_char) -> Option<&'a str> {
    if string.is_null() {
        return None;
    }
    match CStr::from_ptr(string).to_str() {
        Ok(s) => Some(s),
        Err(e) => {
            log::warn!("String passed is not UTF-8: {}", e);
            None
        }
    }
}

/// Copies the provided `string` into a C string valid while the returned
/// [`CString`] lives.
///
/// Interior `0x0` bytes give an empty string.
fn c_string(string: &str) -> CString {
    CString::new(string).unwrap_or_else(|e| {
        log::warn!("String contains an interior nul: {}", e);
        CString::default()
    })
}

/// Leaks the provided `string` into a raw C string released with
/// [`string_free()`]. `NULL` for `None`.
fn string_into_c_str(string: Option<String>) -> *mut c_char {
    string.map_or_else(ptr::null_mut, |s| c_string(&s).into_raw())
}

/// Retakes ownership over a C string returned by this library.
#[no_mangle]
pub unsafe extern "C" fn string_free(s: *mut c_char) {
    if !s.is_null() {
        drop(CString::from_raw(s));
    }
}
