//! Parameters of the SDK initialization.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;

use crate::sdk::{Language, RawDataMemoryMode};

/// Parameters the SDK is initialized with.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize, SmartDefault)]
#[serde(default)]
pub struct Sdk {
    /// Web domain the SDK talks to.
    ///
    /// Defaults to `https://zoom.us`.
    #[default("https://zoom.us")]
    pub web_domain: Cow<'static, str>,

    /// Branding name shown by the SDK.
    ///
    /// Defaults to empty string.
    pub branding_name: Cow<'static, str>,

    /// Support URL shown by the SDK.
    ///
    /// Defaults to empty string.
    pub support_url: Cow<'static, str>,

    /// UI language of the SDK.
    ///
    /// Defaults to `English`.
    #[default(Language::English)]
    pub language: Language,

    /// Whether the SDK writes crash dumps.
    ///
    /// Defaults to `false`.
    pub enable_generate_dump: bool,

    /// Whether the SDK writes its own log files.
    ///
    /// Defaults to `true`.
    #[default = true]
    pub enable_log_by_default: bool,

    /// Maximum size of an SDK log file in megabytes.
    ///
    /// Defaults to `5`.
    #[default = 5]
    pub log_file_size: u32,

    /// Raw data delivery options.
    pub raw_data: RawDataOptions,

    /// Kind of the SDK wrapper reported to the vendor.
    ///
    /// Defaults to `0`.
    pub wrapper_type: i32,
}

/// Raw data delivery options of the SDK.
#[derive(
    Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize, SmartDefault,
)]
#[serde(default)]
pub struct RawDataOptions {
    /// Whether video frames are delivered in their intermediate format.
    ///
    /// Defaults to `false`.
    pub intermediate_mode: bool,

    /// Memory used for video frames.
    ///
    /// Defaults to `Heap`.
    #[default(RawDataMemoryMode::Heap)]
    pub video_memory_mode: RawDataMemoryMode,

    /// Memory used for share frames.
    ///
    /// Defaults to `Heap`.
    #[default(RawDataMemoryMode::Heap)]
    pub share_memory_mode: RawDataMemoryMode,

    /// Memory used for audio frames.
    ///
    /// Defaults to `Heap`.
    #[default(RawDataMemoryMode::Heap)]
    pub audio_memory_mode: RawDataMemoryMode,
}
