//! Handles to the SDK services.

pub mod auth;
pub mod meeting;
pub mod setting;

#[doc(inline)]
pub use self::{
    auth::{Account, AuthEvents, AuthServiceHandle},
    meeting::{MeetingEvents, MeetingServiceHandle},
    setting::{AudioSettingsHandle, Mic, SettingServiceHandle},
};
