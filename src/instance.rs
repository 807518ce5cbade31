//! Initialized SDK and the services created from it.

use std::{
    fmt,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

use parking_lot::Mutex;
use slog_scope::GlobalLoggerGuard;

use crate::{
    conf::Conf,
    errors::{BridgeError, Result},
    rawdata::{AudioRawDataHelperHandle, RendererEvents, RendererHandle},
    sdk::{self, Sdk, VideoResolution},
    services::{AuthServiceHandle, MeetingServiceHandle, SettingServiceHandle},
};

/// Lazily created service cached until cleared.
type Cached<T> = Mutex<Option<Arc<T>>>;

/// Initialized SDK.
///
/// The SDK is cleaned up once this [`Instance`] is dropped.
pub struct Instance {
    /// Initialized SDK.
    sdk: Arc<dyn Sdk>,

    /// Library configuration.
    conf: Conf,

    meeting: Cached<MeetingServiceHandle>,
    auth: Cached<AuthServiceHandle>,
    setting: Cached<SettingServiceHandle>,
    audio_raw_data: Cached<AudioRawDataHelperHandle>,

    /// Whether the network connection helper is created.
    network_helper: AtomicBool,

    /// Whether [`Sdk::cleanup()`] was called already.
    cleaned_up: AtomicBool,

    /// Global logger installed for this [`Instance`].
    _logger: Option<GlobalLoggerGuard>,
}

impl Instance {
    /// Initializes the provided `sdk` with the provided [`Conf`], installing
    /// the global logger first.
    ///
    /// # Errors
    ///
    /// With [`BridgeError::Sdk`] if the SDK refuses to initialize.
    pub fn init(sdk: Arc<dyn Sdk>, conf: Conf) -> Result<Self> {
        let logger = crate::log::init(&conf.log);
        let mut this = Self::init_without_logger(sdk, conf)?;
        this._logger = logger;
        Ok(this)
    }

    /// Initializes the provided `sdk` with the provided [`Conf`], leaving
    /// logging to the caller.
    ///
    /// # Errors
    ///
    /// With [`BridgeError::Sdk`] if the SDK refuses to initialize.
    pub fn init_without_logger(sdk: Arc<dyn Sdk>, conf: Conf) -> Result<Self> {
        log::info!(
            "Initializing SDK {} for {}",
            sdk.version().unwrap_or_default(),
            conf.sdk.web_domain,
        );
        sdk_try!(sdk.init(&conf.sdk))?;
        Ok(Self {
            sdk,
            conf,
            meeting: Mutex::new(None),
            auth: Mutex::new(None),
            setting: Mutex::new(None),
            audio_raw_data: Mutex::new(None),
            network_helper: AtomicBool::new(false),
            cleaned_up: AtomicBool::new(false),
            _logger: None,
        })
    }

    /// Returns the configuration of this [`Instance`].
    #[inline]
    #[must_use]
    pub fn conf(&self) -> &Conf {
        &self.conf
    }

    /// Returns the wrapped SDK.
    #[inline]
    #[must_use]
    pub fn sdk(&self) -> &Arc<dyn Sdk> {
        &self.sdk
    }

    /// Returns the meeting service, creating it on the first call.
    ///
    /// # Errors
    ///
    /// - With [`BridgeError::NotCreated`] if the SDK is cleaned up.
    /// - With [`BridgeError::NullPtr`] if the SDK creates no service.
    pub fn meeting_service(&self) -> Result<Arc<MeetingServiceHandle>> {
        get_or_create(&self.meeting, &self.cleaned_up, || {
            self.sdk
                .create_meeting_service()
                .map(MeetingServiceHandle::new)
        })
    }

    /// Drops the cached meeting service.
    pub fn clear_meeting_service(&self) {
        drop(self.meeting.lock().take());
    }

    /// Returns the authentication service, creating it on the first call.
    ///
    /// # Errors
    ///
    /// - With [`BridgeError::NotCreated`] if the SDK is cleaned up.
    /// - With [`BridgeError::NullPtr`] if the SDK creates no service.
    pub fn auth_service(&self) -> Result<Arc<AuthServiceHandle>> {
        get_or_create(&self.auth, &self.cleaned_up, || {
            self.sdk.create_auth_service().map(AuthServiceHandle::new)
        })
    }

    /// Drops the cached authentication service.
    pub fn clear_auth_service(&self) {
        drop(self.auth.lock().take());
    }

    /// Returns the settings service, creating it on the first call.
    ///
    /// # Errors
    ///
    /// - With [`BridgeError::NotCreated`] if the SDK is cleaned up.
    /// - With [`BridgeError::NullPtr`] if the SDK creates no service.
    pub fn setting_service(&self) -> Result<Arc<SettingServiceHandle>> {
        get_or_create(&self.setting, &self.cleaned_up, || {
            self.sdk
                .create_setting_service()
                .map(SettingServiceHandle::new)
        })
    }

    /// Drops the cached settings service.
    pub fn clear_setting_service(&self) {
        drop(self.setting.lock().take());
    }

    /// Returns the raw audio helper, obtaining it on the first call.
    ///
    /// # Errors
    ///
    /// - With [`BridgeError::NotCreated`] if the SDK is cleaned up.
    /// - With [`BridgeError::NullPtr`] if the SDK provides no helper.
    pub fn audio_raw_data_helper(
        &self,
    ) -> Result<Arc<AudioRawDataHelperHandle>> {
        get_or_create(&self.audio_raw_data, &self.cleaned_up, || {
            self.sdk
                .audio_raw_data_helper()
                .map(AudioRawDataHelperHandle::new)
        })
    }

    /// Returns the external video source helper, if the SDK provides it.
    #[must_use]
    pub fn video_source_helper(
        &self,
    ) -> Option<Arc<dyn sdk::VideoSourceHelper>> {
        self.sdk.video_source_helper()
    }

    /// Creates a raw video renderer.
    ///
    /// # Errors
    ///
    /// See [`RendererHandle::new()`].
    pub fn create_renderer<C>(
        &self,
        context: C,
        events: RendererEvents<C>,
        resolution: VideoResolution,
    ) -> Result<RendererHandle>
    where
        C: Send + Sync + 'static,
    {
        RendererHandle::new(self.sdk.as_ref(), context, events, resolution)
    }

    /// Creates the network connection helper.
    ///
    /// # Errors
    ///
    /// - With [`BridgeError::AlreadyCreated`] if it's created already.
    /// - With [`BridgeError::Sdk`] if the SDK refuses to create it.
    pub fn create_network_connection_helper(&self) -> Result<()> {
        if self.network_helper.swap(true, Ordering::AcqRel) {
            return Err(tracerr::new!(BridgeError::AlreadyCreated(
                "Network connection helper"
            )));
        }
        sdk_try!(self.sdk.create_network_connection_helper()).map_err(|e| {
            self.network_helper.store(false, Ordering::Release);
            e
        })
    }

    /// Destroys the network connection helper.
    ///
    /// # Errors
    ///
    /// - With [`BridgeError::NotCreated`] if it was never created.
    /// - With [`BridgeError::Sdk`] if the SDK refuses to destroy it.
    pub fn destroy_network_connection_helper(&self) -> Result<()> {
        if !self.network_helper.swap(false, Ordering::AcqRel) {
            return Err(tracerr::new!(BridgeError::NotCreated(
                "Network connection helper"
            )));
        }
        sdk_try!(self.sdk.destroy_network_connection_helper()).map_err(|e| {
            self.network_helper.store(true, Ordering::Release);
            e
        })
    }

    /// Switches the SDK to another web `domain`.
    ///
    /// # Errors
    ///
    /// With [`BridgeError::Sdk`] if the SDK refuses to switch.
    pub fn switch_domain(&self, domain: &str, force: bool) -> Result<()> {
        log::info!("Switching SDK domain to {}", domain);
        sdk_try!(self.sdk.switch_domain(domain, force))
    }

    /// Returns version of the SDK.
    #[must_use]
    pub fn sdk_version(&self) -> Option<String> {
        self.sdk.version()
    }

    /// Releases every service and cleans the SDK up.
    ///
    /// Subsequent calls do nothing.
    ///
    /// # Errors
    ///
    /// With [`BridgeError::Sdk`] if the SDK refuses to clean up.
    pub fn cleanup(&self) -> Result<()> {
        if self.cleaned_up.swap(true, Ordering::AcqRel) {
            return Ok(());
        }
        self.clear_meeting_service();
        self.clear_auth_service();
        self.clear_setting_service();
        drop(self.audio_raw_data.lock().take());
        if self.network_helper.load(Ordering::Acquire) {
            if let Err(e) = self.destroy_network_connection_helper() {
                log::warn!("Failed to destroy network helper: {}", e);
            }
        }
        log::info!("Cleaning SDK up");
        sdk_try!(self.sdk.cleanup())
    }
}

impl Drop for Instance {
    fn drop(&mut self) {
        if let Err(e) = self.cleanup() {
            log::error!("SDK cleanup failed: {}", e);
        }
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("sdk", &self.sdk)
            .field("conf", &self.conf)
            .field("network_helper", &self.network_helper)
            .field("cleaned_up", &self.cleaned_up)
            .finish()
    }
}

/// Returns the service cached in the provided `slot`, creating it with
/// `create` if there is none.
///
/// Nothing is created once the SDK is `cleaned_up`.
fn get_or_create<T, F>(
    slot: &Cached<T>,
    cleaned_up: &AtomicBool,
    create: F,
) -> Result<Arc<T>>
where
    F: FnOnce() -> Option<T>,
{
    let mut slot = slot.lock();
    if cleaned_up.load(Ordering::Acquire) {
        return Err(tracerr::new!(BridgeError::NotCreated("SDK instance")));
    }
    if let Some(service) = slot.as_ref() {
        return Ok(Arc::clone(service));
    }
    let service = Arc::new(
        create().ok_or_else(|| tracerr::new!(BridgeError::NullPtr))?,
    );
    *slot = Some(Arc::clone(&service));
    Ok(service)
}
