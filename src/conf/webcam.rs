//! Virtual webcam settings.

use std::convert::TryFrom;

use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;

/// Settings of frames sent to the virtual webcam.
#[derive(
    Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize, SmartDefault,
)]
#[serde(default)]
pub struct Webcam {
    /// Width of a sent frame.
    ///
    /// Defaults to `640`.
    #[default = 640]
    pub width: u32,

    /// Height of a sent frame.
    ///
    /// Defaults to `480`.
    #[default = 480]
    pub height: u32,

    /// Clockwise rotation of a sent frame in degrees.
    ///
    /// Defaults to `0`.
    #[default = 0]
    pub rotation: u32,
}

impl Webcam {
    /// Returns length of one I420 frame of the configured size.
    ///
    /// `None` if it doesn't fit into `u32`.
    #[must_use]
    pub fn frame_length(&self) -> Option<u32> {
        let pixels = u64::from(self.width).checked_mul(self.height.into())?;
        u32::try_from(pixels.checked_mul(3)? / 2).ok()
    }
}
