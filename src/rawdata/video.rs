//! Raw video renderer.

use std::{
    fmt,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

use crate::{
    bridge::Adapter,
    errors::{BridgeError, Result},
    sdk::{
        self, RawDataType, RendererEventSink, Sdk, VideoRawData,
        VideoResolution,
    },
    utils::epoch_micros,
};

use super::ExportedVideoRawData;

/// Callbacks of a raw video renderer.
pub struct RendererEvents<C> {
    pub on_frame: fn(&C, &ExportedVideoRawData<'_>),

    /// Raw data turned on or off at the provided time in microseconds since
    /// the Unix epoch.
    pub on_status_changed: fn(&C, bool, i64),

    /// SDK destroyed the renderer. Nothing is delivered afterwards.
    pub on_destroyed: fn(&C, i64),

    /// Renderer is unsubscribed and no more frames will be delivered.
    pub flush: fn(&C),
}

impl<C> Default for RendererEvents<C> {
    fn default() -> Self {
        Self {
            on_frame: |_, _| {},
            on_status_changed: |_, _, _| {},
            on_destroyed: |_, _| {},
            flush: |_| {},
        }
    }
}

/// Delegate of a renderer as seen by its [`RendererHandle`].
trait Delegate: Send + Sync {
    fn flush(&self);

    /// Indicates whether the SDK destroyed the renderer.
    fn is_destroyed(&self) -> bool;
}

struct RendererDelegate<C> {
    adapter: Adapter<C, RendererEvents<C>>,
    destroyed: AtomicBool,
}

impl<C: Send + Sync> Delegate for RendererDelegate<C> {
    fn flush(&self) {
        (self.adapter.table().flush)(self.adapter.context());
    }

    fn is_destroyed(&self) -> bool {
        self.destroyed.load(Ordering::Acquire)
    }
}

impl<C: Send + Sync> RendererEventSink for RendererDelegate<C> {
    fn on_raw_data_frame_received(&self, frame: &dyn VideoRawData) {
        let exported = ExportedVideoRawData::new(frame);
        (self.adapter.table().on_frame)(self.adapter.context(), &exported);
    }

    fn on_raw_data_status_changed(&self, on: bool) {
        log::debug!("Raw video turned {}", if on { "on" } else { "off" });
        (self.adapter.table().on_status_changed)(
            self.adapter.context(),
            on,
            epoch_micros(),
        );
    }

    fn on_renderer_be_destroyed(&self) {
        log::warn!("SDK destroyed the renderer");
        self.destroyed.store(true, Ordering::Release);
        (self.adapter.table().on_destroyed)(
            self.adapter.context(),
            epoch_micros(),
        );
    }
}

/// Handle to an SDK raw video renderer.
///
/// Dropping it unsubscribes the renderer and flushes its events, unless the
/// SDK destroyed the renderer already.
pub struct RendererHandle {
    /// Wrapped SDK renderer.
    renderer: Arc<dyn sdk::Renderer>,

    /// Delegate the renderer delivers into.
    delegate: Arc<dyn Delegate>,
}

impl RendererHandle {
    /// Creates a renderer delivering frames of at most the provided
    /// `resolution` into the provided `events`.
    ///
    /// # Errors
    ///
    /// With [`BridgeError::Sdk`] if the SDK refuses to create the renderer.
    pub fn new<C>(
        sdk: &dyn Sdk,
        context: C,
        events: RendererEvents<C>,
        resolution: VideoResolution,
    ) -> Result<Self>
    where
        C: Send + Sync + 'static,
    {
        let delegate = Arc::new(RendererDelegate {
            adapter: Adapter::new(context, events),
            destroyed: AtomicBool::new(false),
        });
        let sink: Arc<dyn RendererEventSink> = Arc::clone(&delegate) as _;
        let renderer = sdk
            .create_renderer(sink)
            .map_err(|e| tracerr::new!(BridgeError::Sdk(e)))?;
        let code = renderer.set_raw_data_resolution(resolution);
        log::info!("Renderer resolution {:?}: {}", resolution, code);
        Ok(Self { renderer, delegate })
    }

    /// Subscribes this renderer to the video of the provided user.
    ///
    /// # Errors
    ///
    /// - With [`BridgeError::NullPtr`] if the SDK destroyed the renderer.
    /// - With [`BridgeError::Sdk`] if the SDK refuses the subscription.
    pub fn subscribe(
        &self,
        user_id: u32,
        data_type: RawDataType,
    ) -> Result<()> {
        self.ensure_alive()?;
        sdk_try!(self.renderer.subscribe(user_id, data_type))
    }

    /// Unsubscribes this renderer.
    ///
    /// # Errors
    ///
    /// - With [`BridgeError::NullPtr`] if the SDK destroyed the renderer.
    /// - With [`BridgeError::Sdk`] if the SDK refuses to unsubscribe.
    pub fn unsubscribe(&self) -> Result<()> {
        self.ensure_alive()?;
        sdk_try!(self.renderer.unsubscribe())
    }

    /// Changes the maximum resolution of the delivered frames.
    ///
    /// # Errors
    ///
    /// - With [`BridgeError::NullPtr`] if the SDK destroyed the renderer.
    /// - With [`BridgeError::Sdk`] if the SDK refuses the resolution.
    pub fn set_resolution(&self, resolution: VideoResolution) -> Result<()> {
        self.ensure_alive()?;
        sdk_try!(self.renderer.set_raw_data_resolution(resolution))
    }

    /// Indicates whether the SDK destroyed the wrapped renderer.
    #[inline]
    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.delegate.is_destroyed()
    }

    fn ensure_alive(&self) -> Result<()> {
        if self.is_destroyed() {
            log::warn!("Renderer is used after the SDK destroyed it");
            return Err(tracerr::new!(BridgeError::NullPtr));
        }
        Ok(())
    }
}

impl Drop for RendererHandle {
    fn drop(&mut self) {
        if self.is_destroyed() {
            log::debug!("Renderer destroyed by the SDK, nothing to release");
            return;
        }
        if let Err(e) = self.unsubscribe() {
            log::warn!("Failed to unsubscribe renderer: {}", e);
        }
        self.delegate.flush();
    }
}

impl fmt::Debug for RendererHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RendererHandle")
            .field("renderer", &self.renderer)
            .field("destroyed", &self.is_destroyed())
            .finish()
    }
}

#[cfg(test)]
mod spec {
    use std::sync::{
        atomic::{AtomicU32, Ordering},
        Arc,
    };

    use mockall::predicate::eq;
    use parking_lot::Mutex;

    use super::{RendererEvents, RendererHandle};
    use crate::{
        errors::BridgeError,
        sdk::{
            MockRenderer, MockSdk, RawDataType, RendererEventSink, SdkError,
            VideoRawData, VideoResolution,
        },
    };

    struct I420;

    impl VideoRawData for I420 {
        fn buffer(&self) -> &[u8] {
            &[16; 24]
        }

        fn source_id(&self) -> u32 {
            7
        }

        fn stream_width(&self) -> u32 {
            4
        }

        fn stream_height(&self) -> u32 {
            4
        }
    }

    #[derive(Default)]
    struct Seen {
        frames: Mutex<Vec<(u32, usize)>>,
        flushes: AtomicU32,
    }

    fn events() -> RendererEvents<Arc<Seen>> {
        RendererEvents {
            on_frame: |ctx, frame| {
                ctx.frames.lock().push((frame.user_id, frame.data().len()));
            },
            flush: |ctx| {
                ctx.flushes.fetch_add(1, Ordering::SeqCst);
            },
            ..RendererEvents::default()
        }
    }

    type Stored = Arc<Mutex<Option<Arc<dyn RendererEventSink>>>>;

    fn sdk(stored: &Stored, renderer: MockRenderer) -> MockSdk {
        let stored = Arc::clone(stored);
        let mut sdk = MockSdk::new();
        sdk.expect_create_renderer().return_once(move |sink| {
            *stored.lock() = Some(sink);
            Ok(Arc::new(renderer) as _)
        });
        sdk
    }

    #[test]
    fn drop_unsubscribes_and_flushes() {
        let mut renderer = MockRenderer::new();
        renderer
            .expect_set_raw_data_resolution()
            .with(eq(VideoResolution::R720p))
            .return_const(SdkError::Success);
        renderer
            .expect_subscribe()
            .with(eq(7), eq(RawDataType::Video))
            .times(1)
            .return_const(SdkError::Success);
        renderer
            .expect_unsubscribe()
            .times(1)
            .return_const(SdkError::Success);
        let stored = Stored::default();
        let sdk = sdk(&stored, renderer);
        let seen = Arc::new(Seen::default());

        let handle = RendererHandle::new(
            &sdk,
            Arc::clone(&seen),
            events(),
            VideoResolution::R720p,
        )
        .unwrap();
        handle.subscribe(7, RawDataType::Video).unwrap();
        stored
            .lock()
            .as_ref()
            .unwrap()
            .on_raw_data_frame_received(&I420);
        drop(handle);

        assert_eq!(*seen.frames.lock(), vec![(7, 24)]);
        assert_eq!(seen.flushes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn destroyed_renderer_is_left_alone() {
        let mut renderer = MockRenderer::new();
        renderer
            .expect_set_raw_data_resolution()
            .return_const(SdkError::Success);
        renderer.expect_unsubscribe().times(0);
        renderer.expect_subscribe().times(0);
        let stored = Stored::default();
        let sdk = sdk(&stored, renderer);
        let seen = Arc::new(Seen::default());
        let handle = RendererHandle::new(
            &sdk,
            Arc::clone(&seen),
            events(),
            VideoResolution::R360p,
        )
        .unwrap();

        stored.lock().as_ref().unwrap().on_renderer_be_destroyed();

        assert!(handle.is_destroyed());
        assert_eq!(
            handle
                .subscribe(7, RawDataType::Share)
                .unwrap_err()
                .into_inner(),
            BridgeError::NullPtr,
        );
        drop(handle);
        assert_eq!(seen.flushes.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn refused_renderer_is_error() {
        let mut sdk = MockSdk::new();
        sdk.expect_create_renderer()
            .returning(|_| Err(SdkError::Uninitialize));

        let err = RendererHandle::new(
            &sdk,
            (),
            RendererEvents::default(),
            VideoResolution::R90p,
        )
        .unwrap_err();

        assert_eq!(err.into_inner(), BridgeError::Sdk(SdkError::Uninitialize));
    }
}
