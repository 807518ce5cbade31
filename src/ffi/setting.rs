use std::{ffi::CString, os::raw::c_char, ptr};

use crate::{
    bridge::{buffer, FlatBuffer},
    sdk::SdkError,
    services::{AudioSettingsHandle, Mic, SettingServiceHandle},
};

use super::{c_str, status, string_into_c_str};

/// Microphone as listed by `audio_settings_mic_list()`.
#[repr(C)]
#[derive(Debug)]
pub struct MicInfo {
    /// `NULL` if the SDK reports no ID.
    pub device_id: *mut c_char,

    /// `NULL` if the SDK reports no name.
    pub device_name: *mut c_char,

    pub selected: bool,
}

impl From<&Mic> for MicInfo {
    fn from(mic: &Mic) -> Self {
        Self {
            device_id: string_into_c_str(mic.device_id.clone()),
            device_name: string_into_c_str(mic.device_name.clone()),
            selected: mic.selected,
        }
    }
}

impl Drop for MicInfo {
    fn drop(&mut self) {
        for s in &[self.device_id, self.device_name] {
            if !s.is_null() {
                // SAFETY: Non-null strings are allocated by `From<&Mic>`.
                drop(unsafe { CString::from_raw(*s) });
            }
        }
    }
}

/// Returns the audio settings, valid while the settings service is. `NULL`
/// if the SDK provides none.
#[no_mangle]
pub unsafe extern "C" fn setting_audio_settings(
    this: *const SettingServiceHandle,
) -> *const AudioSettingsHandle {
    let this = &*this;
    this.audio_settings()
        .map_or(ptr::null(), |s| s as *const AudioSettingsHandle)
}

#[no_mangle]
pub unsafe extern "C" fn audio_settings_enable_auto_join_audio(
    this: *const AudioSettingsHandle,
    enable: bool,
) -> SdkError {
    let this = &*this;
    status(this.enable_auto_join_audio(enable))
}

#[no_mangle]
pub unsafe extern "C" fn audio_settings_is_auto_join_audio_enabled(
    this: *const AudioSettingsHandle,
) -> bool {
    let this = &*this;
    this.is_auto_join_audio_enabled()
}

/// Lists the known microphones, writing their number into `count`.
///
/// `NULL` with zero `count` if the SDK has no list. Released with
/// `mic_list_free()`.
#[no_mangle]
pub unsafe extern "C" fn audio_settings_mic_list(
    this: *const AudioSettingsHandle,
    count: *mut u32,
) -> *mut MicInfo {
    let this = &*this;
    let mics = this
        .mic_list()
        .map(|mics| mics.iter().map(MicInfo::from).collect());
    buffer::hand_over(mics, count)
}

/// Frees a list returned by `audio_settings_mic_list()`.
///
/// # Safety
///
/// `list` and `count` must be the ones returned by the same
/// `audio_settings_mic_list()` call. Calling this more than once for the same
/// pointer is equivalent to double free.
#[no_mangle]
pub unsafe extern "C" fn mic_list_free(list: *mut MicInfo, count: u32) {
    drop(FlatBuffer::from_raw(list, count));
}

/// Selects the microphone and turns its background noise suppression off.
#[no_mangle]
pub unsafe extern "C" fn audio_settings_select_mic(
    this: *const AudioSettingsHandle,
    device_id: *const c_char,
    device_name: *const c_char,
) -> SdkError {
    let this = &*this;
    match (c_str(device_id), c_str(device_name)) {
        (Some(id), Some(name)) => status(this.select_mic(id, name)),
        _ => SdkError::InvalidParameter,
    }
}

#[cfg(test)]
mod spec {
    use std::{ffi::CStr, sync::Arc};

    use super::{audio_settings_mic_list, mic_list_free};
    use crate::{
        sdk::{MicInfo, MockAudioSettingContext},
        services::AudioSettingsHandle,
    };

    #[derive(Debug)]
    struct Mic(Option<&'static str>, bool);

    impl MicInfo for Mic {
        fn device_id(&self) -> Option<String> {
            self.0.map(ToOwned::to_owned)
        }

        fn device_name(&self) -> Option<String> {
            Some("Built-in".to_owned())
        }

        fn is_selected_device(&self) -> bool {
            self.1
        }
    }

    #[test]
    fn lists_microphones() {
        let mut context = MockAudioSettingContext::new();
        context.expect_mic_list().returning(|| {
            let mics: Vec<Arc<dyn MicInfo>> = vec![
                Arc::new(Mic(Some("hw:0"), false)),
                Arc::new(Mic(None, true)),
            ];
            Some(Arc::new(mics) as _)
        });
        let handle = AudioSettingsHandle::new(Arc::new(context));
        let mut count = 0;

        unsafe {
            let list = audio_settings_mic_list(&handle, &mut count);
            assert_eq!(count, 2);
            let mics = std::slice::from_raw_parts(list, count as usize);
            assert_eq!(
                CStr::from_ptr(mics[0].device_id).to_str().unwrap(),
                "hw:0",
            );
            assert!(!mics[0].selected);
            assert!(mics[1].device_id.is_null());
            assert!(mics[1].selected);
            assert_eq!(
                CStr::from_ptr(mics[1].device_name).to_str().unwrap(),
                "Built-in",
            );

            mic_list_free(list, count);
        }
    }

    #[test]
    fn empty_list_is_not_null() {
        let mut context = MockAudioSettingContext::new();
        context.expect_mic_list().returning(|| {
            Some(Arc::new(Vec::<Arc<dyn MicInfo>>::new()) as _)
        });
        let handle = AudioSettingsHandle::new(Arc::new(context));
        let mut count = 42;

        unsafe {
            let list = audio_settings_mic_list(&handle, &mut count);
            assert!(!list.is_null());
            assert_eq!(count, 0);
            mic_list_free(list, count);
        }
    }
}
