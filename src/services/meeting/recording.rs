//! Meeting recording.

use std::sync::Arc;

use crate::{
    bridge::{Adapter, EventSlot},
    errors::Result,
    sdk::{
        self, RecordingEventSink, RecordingStatus,
        RequestLocalRecordingStatus, SdkError,
    },
    utils::epoch_millis,
};

/// Callbacks of the recording events.
pub struct RecordingEvents<C> {
    /// Local recording status changed at the provided time in milliseconds
    /// since the Unix epoch.
    pub on_recording_status: fn(&C, RecordingStatus, i64),
    pub on_cloud_recording_status: fn(&C, RecordingStatus),
    pub on_recording_privilege_changed: fn(&C, bool),
    pub on_recording_privilege_request_status:
        fn(&C, RequestLocalRecordingStatus),
    pub on_cloud_recording_storage_full: fn(&C, i64),
}

impl<C> Default for RecordingEvents<C> {
    fn default() -> Self {
        Self {
            on_recording_status: |_, _, _| {},
            on_cloud_recording_status: |_, _| {},
            on_recording_privilege_changed: |_, _| {},
            on_recording_privilege_request_status: |_, _| {},
            on_cloud_recording_storage_full: |_, _| {},
        }
    }
}

impl<C: Send + Sync> RecordingEventSink for Adapter<C, RecordingEvents<C>> {
    fn on_recording_status(&self, status: RecordingStatus) {
        let timestamp = epoch_millis();
        log::debug!("Recording status {:?} at {}", status, timestamp);
        (self.table().on_recording_status)(self.context(), status, timestamp);
    }

    fn on_cloud_recording_status(&self, status: RecordingStatus) {
        (self.table().on_cloud_recording_status)(self.context(), status);
    }

    fn on_recording_privilege_changed(&self, can_record: bool) {
        (self.table().on_recording_privilege_changed)(
            self.context(),
            can_record,
        );
    }

    fn on_local_recording_privilege_request_status(
        &self,
        status: RequestLocalRecordingStatus,
    ) {
        (self.table().on_recording_privilege_request_status)(
            self.context(),
            status,
        );
    }

    fn on_cloud_recording_storage_full(&self, grace_period_date: i64) {
        (self.table().on_cloud_recording_storage_full)(
            self.context(),
            grace_period_date,
        );
    }
}

/// Handle to the SDK recording controller.
#[derive(Debug)]
pub struct RecordingControllerHandle {
    /// Wrapped SDK controller.
    controller: Arc<dyn sdk::RecordingController>,

    /// Registered event sink.
    events: EventSlot<dyn RecordingEventSink>,
}

impl RecordingControllerHandle {
    /// Wraps the provided SDK `controller`.
    #[must_use]
    pub fn new(controller: Arc<dyn sdk::RecordingController>) -> Self {
        Self {
            controller,
            events: EventSlot::new(),
        }
    }

    /// Registers the provided `events` bound to the provided `context`,
    /// replacing the previous registration.
    pub fn set_event<C>(
        &self,
        context: C,
        events: RecordingEvents<C>,
    ) -> SdkError
    where
        C: Send + Sync + 'static,
    {
        let sink: Arc<dyn RecordingEventSink> =
            Arc::new(Adapter::new(context, events));
        self.events
            .replace(sink, |sink| self.controller.set_event(Some(sink)))
    }

    /// Removes the current events registration.
    pub fn clear_event(&self) -> SdkError {
        self.events.clear(|| self.controller.set_event(None))
    }

    /// Asks the host for a local recording privilege.
    ///
    /// # Errors
    ///
    /// With [`BridgeError::Sdk`] if the SDK refuses the request.
    ///
    /// [`BridgeError::Sdk`]: crate::errors::BridgeError::Sdk
    pub fn request_local_recording_privilege(&self) -> Result<()> {
        sdk_try!(self.controller.request_local_recording_privilege())
    }

    /// Asks the host to start a cloud recording.
    ///
    /// # Errors
    ///
    /// With [`BridgeError::Sdk`] if the SDK refuses the request.
    ///
    /// [`BridgeError::Sdk`]: crate::errors::BridgeError::Sdk
    pub fn request_start_cloud_recording(&self) -> Result<()> {
        sdk_try!(self.controller.request_start_cloud_recording())
    }

    /// Starts a local recording, returning its start time.
    ///
    /// # Errors
    ///
    /// With [`BridgeError::Sdk`] if the SDK refuses to start.
    ///
    /// [`BridgeError::Sdk`]: crate::errors::BridgeError::Sdk
    pub fn start_recording(&self) -> Result<i64> {
        let mut start_time = 0;
        sdk_try!(self.controller.start_recording(&mut start_time))?;
        Ok(start_time)
    }

    /// Stops the local recording, returning its stop time.
    ///
    /// # Errors
    ///
    /// With [`BridgeError::Sdk`] if the SDK refuses to stop.
    ///
    /// [`BridgeError::Sdk`]: crate::errors::BridgeError::Sdk
    pub fn stop_recording(&self) -> Result<i64> {
        let mut stop_time = 0;
        sdk_try!(self.controller.stop_recording(&mut stop_time))?;
        Ok(stop_time)
    }

    /// # Errors
    ///
    /// With [`BridgeError::Sdk`] if the SDK refuses to pause.
    ///
    /// [`BridgeError::Sdk`]: crate::errors::BridgeError::Sdk
    pub fn pause_recording(&self) -> Result<()> {
        sdk_try!(self.controller.pause_recording())
    }

    /// # Errors
    ///
    /// With [`BridgeError::Sdk`] if the SDK refuses to resume.
    ///
    /// [`BridgeError::Sdk`]: crate::errors::BridgeError::Sdk
    pub fn resume_recording(&self) -> Result<()> {
        sdk_try!(self.controller.resume_recording())
    }

    /// Checks whether raw recording may be started.
    ///
    /// # Errors
    ///
    /// With [`BridgeError::Sdk`] describing why it may not.
    ///
    /// [`BridgeError::Sdk`]: crate::errors::BridgeError::Sdk
    pub fn can_start_raw_recording(&self) -> Result<()> {
        sdk_try!(self.controller.can_start_raw_recording())
    }

    /// Starts raw recording, which is required to receive raw data.
    ///
    /// # Errors
    ///
    /// With [`BridgeError::Sdk`] if the SDK refuses to start.
    ///
    /// [`BridgeError::Sdk`]: crate::errors::BridgeError::Sdk
    pub fn start_raw_recording(&self) -> Result<()> {
        sdk_try!(self.controller.start_raw_recording())
    }

    /// # Errors
    ///
    /// With [`BridgeError::Sdk`] if the SDK refuses to stop.
    ///
    /// [`BridgeError::Sdk`]: crate::errors::BridgeError::Sdk
    pub fn stop_raw_recording(&self) -> Result<()> {
        sdk_try!(self.controller.stop_raw_recording())
    }
}
