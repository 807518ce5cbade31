//! Settings service.

use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::{
    bridge::FlatBuffer,
    errors::Result,
    sdk::{self, MicInfo, NoiseSuppressionLevel},
};

/// Microphone device known to the SDK.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Mic {
    /// ID of this device.
    pub device_id: Option<String>,

    /// Human readable name of this device.
    pub device_name: Option<String>,

    /// Indicator whether this device is the selected one.
    pub selected: bool,
}

impl From<&dyn MicInfo> for Mic {
    fn from(info: &dyn MicInfo) -> Self {
        Self {
            device_id: info.device_id(),
            device_name: info.device_name(),
            selected: info.is_selected_device(),
        }
    }
}

/// Handle to the SDK audio settings.
#[derive(Debug)]
pub struct AudioSettingsHandle(Arc<dyn sdk::AudioSettingContext>);

impl AudioSettingsHandle {
    /// Wraps the provided SDK `context`.
    #[inline]
    #[must_use]
    pub fn new(context: Arc<dyn sdk::AudioSettingContext>) -> Self {
        Self(context)
    }

    /// Enables or disables joining audio automatically.
    ///
    /// # Errors
    ///
    /// With [`BridgeError::Sdk`] if the SDK refuses the setting.
    ///
    /// [`BridgeError::Sdk`]: crate::errors::BridgeError::Sdk
    pub fn enable_auto_join_audio(&self, enable: bool) -> Result<()> {
        sdk_try!(self.0.enable_auto_join_audio(enable))
    }

    #[inline]
    #[must_use]
    pub fn is_auto_join_audio_enabled(&self) -> bool {
        self.0.is_auto_join_audio_enabled()
    }

    /// Returns all the microphones known to the SDK in its order.
    ///
    /// `None` if the SDK has no microphones list at all.
    #[must_use]
    pub fn mic_list(&self) -> Option<FlatBuffer<Mic>> {
        let list = self.0.mic_list();
        if list.is_none() {
            log::debug!("SDK provided no microphones list");
        }
        list.map(|list| {
            FlatBuffer::copy_from_list(list.as_ref(), |mic| {
                Mic::from(mic.as_ref())
            })
        })
    }

    /// Selects the provided microphone and turns off its background noise
    /// suppression, or lowers it if turning off is refused.
    ///
    /// Only the result of the selection is reported.
    ///
    /// # Errors
    ///
    /// With [`BridgeError::Sdk`] if the SDK refuses the selection.
    ///
    /// [`BridgeError::Sdk`]: crate::errors::BridgeError::Sdk
    pub fn select_mic(&self, device_id: &str, device_name: &str) -> Result<()> {
        let selected = self.0.select_mic(device_id, device_name);
        let code = self
            .0
            .set_suppress_background_noise_level(NoiseSuppressionLevel::None);
        if !code.is_success() {
            log::debug!("Noise suppression cannot be turned off: {}", code);
            let low = NoiseSuppressionLevel::Low;
            let code = self.0.set_suppress_background_noise_level(low);
            if !code.is_success() {
                log::warn!("Noise suppression cannot be lowered: {}", code);
            }
        }
        sdk_try!(selected)
    }
}

/// Handle to the SDK settings service.
#[derive(Debug)]
pub struct SettingServiceHandle {
    /// Wrapped SDK service.
    service: Arc<dyn sdk::SettingService>,

    /// Lazily obtained audio settings.
    audio: OnceCell<AudioSettingsHandle>,
}

impl SettingServiceHandle {
    /// Wraps the provided SDK `service`.
    #[must_use]
    pub fn new(service: Arc<dyn sdk::SettingService>) -> Self {
        Self {
            service,
            audio: OnceCell::new(),
        }
    }

    /// Returns the audio settings, if the SDK provides them.
    pub fn audio_settings(&self) -> Option<&AudioSettingsHandle> {
        self.audio
            .get_or_try_init(|| {
                self.service
                    .audio_settings()
                    .map(AudioSettingsHandle::new)
                    .ok_or(())
            })
            .ok()
    }
}
