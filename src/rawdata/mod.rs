//! Raw audio and video data of a meeting.
//!
//! Every delivered frame is exported as a flat `#[repr(C)]` view borrowing
//! the SDK buffer for the duration of the callback, stamped with the time it
//! was exported at.

pub mod audio;
pub mod video;

use std::{marker::PhantomData, os::raw::c_char, slice};

use crate::{
    sdk::{AudioRawData, VideoRawData},
    utils::epoch_micros,
};

#[doc(inline)]
pub use self::{
    audio::{
        AudioRawDataEvents, AudioRawDataHelperHandle, AudioSenderHandle,
        VirtualMicEvents,
    },
    video::{RendererEvents, RendererHandle},
};

/// Audio frame exported to a callback.
#[repr(C)]
#[derive(Debug)]
pub struct ExportedAudioRawData<'a> {
    /// PCM payload.
    pub data: *mut c_char,

    /// Export time in microseconds since the Unix epoch.
    pub time: i64,

    /// Length of the payload in bytes.
    pub len: u32,

    _frame: PhantomData<&'a [u8]>,
}

impl<'a> ExportedAudioRawData<'a> {
    /// Exports the provided SDK `frame`.
    #[must_use]
    pub fn new(frame: &'a dyn AudioRawData) -> Self {
        let buffer = frame.buffer();
        Self {
            data: buffer.as_ptr() as *mut c_char,
            time: epoch_micros(),
            len: buffer.len() as u32,
            _frame: PhantomData,
        }
    }

    /// Returns the PCM payload.
    #[must_use]
    pub fn data(&self) -> &'a [u8] {
        if self.data.is_null() {
            return &[];
        }
        // Safety: points into the SDK frame borrowed for `'a`.
        unsafe {
            slice::from_raw_parts(self.data as *const u8, self.len as usize)
        }
    }
}

/// I420 video frame exported to a callback.
#[repr(C)]
#[derive(Debug)]
pub struct ExportedVideoRawData<'a> {
    /// Whole I420 payload.
    pub data: *mut c_char,

    /// Export time in microseconds since the Unix epoch.
    pub time: i64,

    /// Length of the payload in bytes.
    pub len: u32,

    /// ID of the user this frame belongs to.
    pub user_id: u32,

    pub width: u32,

    pub height: u32,

    _frame: PhantomData<&'a [u8]>,
}

impl<'a> ExportedVideoRawData<'a> {
    /// Exports the provided SDK `frame`.
    #[must_use]
    pub fn new(frame: &'a dyn VideoRawData) -> Self {
        let buffer = frame.buffer();
        Self {
            data: buffer.as_ptr() as *mut c_char,
            time: epoch_micros(),
            len: buffer.len() as u32,
            user_id: frame.source_id(),
            width: frame.stream_width(),
            height: frame.stream_height(),
            _frame: PhantomData,
        }
    }

    /// Returns the whole I420 payload.
    #[must_use]
    pub fn data(&self) -> &'a [u8] {
        if self.data.is_null() {
            return &[];
        }
        // Safety: points into the SDK frame borrowed for `'a`.
        unsafe {
            slice::from_raw_parts(self.data as *const u8, self.len as usize)
        }
    }
}
