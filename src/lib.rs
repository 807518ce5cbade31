//! C ABI callback bridge over Zoom Meeting SDK services.
//!
//! SDK event interfaces are implemented by adapters forwarding every event
//! into a table of plain functions together with an opaque context, so any
//! foreign runtime is able to consume them via the [`ffi`] module.

// TODO: Remove `clippy::must_use_candidate` once the issue below is resolved:
//       https://github.com/rust-lang/rust-clippy/issues/4779
#![allow(clippy::module_name_repetitions, clippy::must_use_candidate)]

#[macro_use]
pub mod utils;
#[macro_use]
pub mod errors;

pub mod bridge;
pub mod conf;
pub mod ffi;
pub mod instance;
pub mod jwt;
pub mod log;
pub mod meeting_url;
pub mod rawdata;
pub mod sdk;
pub mod services;

#[doc(inline)]
pub use self::{conf::Conf, instance::Instance};
