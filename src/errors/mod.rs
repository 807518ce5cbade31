//! Errors of the Rust-level API of this library.

use derive_more::{Display, From};
use tracerr::Traced;

use crate::sdk::SdkError;

/// Any error that may occur in this library.
#[derive(Clone, Debug, Display, From, PartialEq)]
pub enum BridgeError {
    /// SDK call finished with a non-success code.
    #[display(fmt = "SDK call failed: {}", _0)]
    Sdk(SdkError),

    /// SDK returned no object where one was expected.
    #[display(fmt = "SDK returned a null object")]
    #[from(ignore)]
    NullPtr,

    /// Object which may exist only once is created already.
    #[display(fmt = "{} is created already", _0)]
    #[from(ignore)]
    AlreadyCreated(&'static str),

    /// Object expected to exist was never created.
    #[display(fmt = "{} is not created", _0)]
    #[from(ignore)]
    NotCreated(&'static str),

    /// Configuration could not be loaded.
    #[display(fmt = "Failed to load configuration: {}", _0)]
    Conf(String),
}

impl From<config::ConfigError> for BridgeError {
    #[inline]
    fn from(err: config::ConfigError) -> Self {
        Self::Conf(err.to_string())
    }
}

impl From<&BridgeError> for SdkError {
    /// Converts the provided [`BridgeError`] into the status code reported
    /// through the C ABI.
    fn from(err: &BridgeError) -> Self {
        match err {
            BridgeError::Sdk(code) => *code,
            BridgeError::NullPtr => Self::InternalError,
            BridgeError::AlreadyCreated(_) | BridgeError::NotCreated(_) => {
                Self::WrongUsage
            }
            BridgeError::Conf(_) => Self::InvalidParameter,
        }
    }
}

/// [`Result`] of the Rust-level API of this library.
pub type Result<T> = std::result::Result<T, Traced<BridgeError>>;

/// Converts the provided [`SdkError`] into a [`Result`], tracing the caller
/// on failure.
#[macro_export]
macro_rules! sdk_try {
    ($code:expr) => {
        $crate::sdk::SdkError::into_result($code)
            .map_err(|e| ::tracerr::new!($crate::errors::BridgeError::Sdk(e)))
    };
}
