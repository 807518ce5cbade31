//! Meeting screen sharing.

use std::sync::Arc;

use crate::{
    bridge::{Adapter, EventSlot},
    sdk::{
        self, SdkError, ShareEventSink, ShareInfo, SharePlayError,
        ShareSettingType, SharingStatus,
    },
};

/// Callbacks of the sharing events.
pub struct ShareEvents<C> {
    /// Sharing status of the provided user changed.
    pub on_sharing_status: fn(&C, SharingStatus, u32),
    pub on_lock_share_status: fn(&C, bool),
    pub on_share_content_notification: fn(&C, &ShareInfo),
    pub on_multi_share_switch_to_single_share_need_confirm: fn(&C),
    pub on_share_setting_type_changed: fn(&C, ShareSettingType),
    pub on_shared_video_ended: fn(&C),
    pub on_video_file_share_play_error: fn(&C, SharePlayError),
}

impl<C> Default for ShareEvents<C> {
    fn default() -> Self {
        Self {
            on_sharing_status: |_, _, _| {},
            on_lock_share_status: |_, _| {},
            on_share_content_notification: |_, _| {},
            on_multi_share_switch_to_single_share_need_confirm: |_| {},
            on_share_setting_type_changed: |_, _| {},
            on_shared_video_ended: |_| {},
            on_video_file_share_play_error: |_, _| {},
        }
    }
}

impl<C: Send + Sync> ShareEventSink for Adapter<C, ShareEvents<C>> {
    fn on_sharing_status(&self, status: SharingStatus, user_id: u32) {
        log::debug!("User {} sharing status: {:?}", user_id, status);
        (self.table().on_sharing_status)(self.context(), status, user_id);
    }

    fn on_lock_share_status(&self, locked: bool) {
        (self.table().on_lock_share_status)(self.context(), locked);
    }

    fn on_share_content_notification(&self, info: &ShareInfo) {
        (self.table().on_share_content_notification)(self.context(), info);
    }

    fn on_multi_share_switch_to_single_share_need_confirm(&self) {
        (self.table().on_multi_share_switch_to_single_share_need_confirm)(
            self.context(),
        );
    }

    fn on_share_setting_type_changed(&self, setting: ShareSettingType) {
        (self.table().on_share_setting_type_changed)(self.context(), setting);
    }

    fn on_shared_video_ended(&self) {
        (self.table().on_shared_video_ended)(self.context());
    }

    fn on_video_file_share_play_error(&self, error: SharePlayError) {
        log::warn!("Shared video file playback failed: {:?}", error);
        (self.table().on_video_file_share_play_error)(self.context(), error);
    }
}

/// Handle to the SDK share controller.
#[derive(Debug)]
pub struct SharingControllerHandle {
    /// Wrapped SDK controller.
    controller: Arc<dyn sdk::SharingController>,

    /// Registered event sink.
    events: EventSlot<dyn ShareEventSink>,
}

impl SharingControllerHandle {
    /// Wraps the provided SDK `controller`.
    #[must_use]
    pub fn new(controller: Arc<dyn sdk::SharingController>) -> Self {
        Self {
            controller,
            events: EventSlot::new(),
        }
    }

    /// Registers the provided `events` bound to the provided `context`,
    /// replacing the previous registration.
    pub fn set_event<C>(&self, context: C, events: ShareEvents<C>) -> SdkError
    where
        C: Send + Sync + 'static,
    {
        let sink: Arc<dyn ShareEventSink> =
            Arc::new(Adapter::new(context, events));
        self.events
            .replace(sink, |sink| self.controller.set_event(Some(sink)))
    }

    /// Removes the current events registration.
    pub fn clear_event(&self) -> SdkError {
        self.events.clear(|| self.controller.set_event(None))
    }
}
