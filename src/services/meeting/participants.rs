//! Meeting participants.

use std::sync::Arc;

use crate::{
    bridge::{Adapter, EventSlot, FlatBuffer},
    sdk::{self, ParticipantsEventSink, SdkError, SdkList, UserInfo},
};

/// Callbacks of the participants events.
///
/// User lists are snapshots copied out of the SDK before each call, so the
/// callee is free to modify them.
pub struct ParticipantsEvents<C> {
    pub on_user_join: fn(&C, &mut [u32]),
    pub on_user_left: fn(&C, &mut [u32]),
    pub on_host_change_notification: fn(&C, u32),
    pub on_user_names_changed: fn(&C, &mut [u32]),
}

impl<C> Default for ParticipantsEvents<C> {
    fn default() -> Self {
        Self {
            on_user_join: |_, _| {},
            on_user_left: |_, _| {},
            on_host_change_notification: |_, _| {},
            on_user_names_changed: |_, _| {},
        }
    }
}

impl<C: Send + Sync> ParticipantsEventSink
    for Adapter<C, ParticipantsEvents<C>>
{
    fn on_user_join(&self, users: &dyn SdkList<u32>, _: Option<&str>) {
        let mut users = FlatBuffer::copy_from_list(users, |id| id);
        log::debug!("Users joined: {:?}", &*users);
        (self.table().on_user_join)(self.context(), &mut users);
    }

    fn on_user_left(&self, users: &dyn SdkList<u32>, _: Option<&str>) {
        let mut users = FlatBuffer::copy_from_list(users, |id| id);
        log::debug!("Users left: {:?}", &*users);
        (self.table().on_user_left)(self.context(), &mut users);
    }

    fn on_host_change_notification(&self, user_id: u32) {
        (self.table().on_host_change_notification)(self.context(), user_id);
    }

    fn on_user_names_changed(&self, users: &dyn SdkList<u32>) {
        let mut users = FlatBuffer::copy_from_list(users, |id| id);
        (self.table().on_user_names_changed)(self.context(), &mut users);
    }
}

/// Handle to information about a single participant.
#[derive(Clone, Debug)]
pub struct UserInfoHandle(Arc<dyn UserInfo>);

impl UserInfoHandle {
    /// Wraps the provided SDK `info`.
    #[inline]
    #[must_use]
    pub fn new(info: Arc<dyn UserInfo>) -> Self {
        Self(info)
    }

    #[inline]
    #[must_use]
    pub fn is_talking(&self) -> bool {
        self.0.is_talking()
    }

    #[inline]
    #[must_use]
    pub fn user_name(&self) -> Option<String> {
        self.0.user_name()
    }

    #[inline]
    #[must_use]
    pub fn audio_voice_level(&self) -> i32 {
        self.0.audio_voice_level()
    }

    #[inline]
    #[must_use]
    pub fn user_id(&self) -> u32 {
        self.0.user_id()
    }

    #[inline]
    #[must_use]
    pub fn is_host(&self) -> bool {
        self.0.is_host()
    }
}

/// Participant of a meeting.
#[derive(Clone, Debug)]
pub struct Participant {
    /// ID of this participant.
    pub user_id: u32,

    /// Information about this participant, unless the SDK has none.
    pub user_info: Option<UserInfoHandle>,
}

/// Handle to the SDK participants controller.
#[derive(Debug)]
pub struct ParticipantsControllerHandle {
    /// Wrapped SDK controller.
    controller: Arc<dyn sdk::ParticipantsController>,

    /// Registered event sink.
    events: EventSlot<dyn ParticipantsEventSink>,
}

impl ParticipantsControllerHandle {
    /// Wraps the provided SDK `controller`.
    #[must_use]
    pub fn new(controller: Arc<dyn sdk::ParticipantsController>) -> Self {
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
        events: ParticipantsEvents<C>,
    ) -> SdkError
    where
        C: Send + Sync + 'static,
    {
        let sink: Arc<dyn ParticipantsEventSink> =
            Arc::new(Adapter::new(context, events));
        self.events
            .replace(sink, |sink| self.controller.set_event(Some(sink)))
    }

    /// Removes the current events registration.
    pub fn clear_event(&self) -> SdkError {
        self.events.clear(|| self.controller.set_event(None))
    }

    /// Returns all the participants of the meeting in the SDK order.
    ///
    /// `None` if the SDK has no participants list at all.
    #[must_use]
    pub fn users(&self) -> Option<FlatBuffer<Participant>> {
        let list = self.controller.participants_list();
        let list = match list {
            Some(list) => list,
            None => {
                log::debug!("SDK provided no participants list");
                return None;
            }
        };
        Some(FlatBuffer::copy_from_list(list.as_ref(), |user_id| {
            let user_info = self.user_by_id(user_id);
            if user_info.is_none() {
                log::debug!("No user info for participant {}", user_id);
            }
            Participant { user_id, user_info }
        }))
    }

    /// Returns information about the participant with the provided ID.
    #[must_use]
    pub fn user_by_id(&self, user_id: u32) -> Option<UserInfoHandle> {
        self.controller
            .user_by_user_id(user_id)
            .map(UserInfoHandle::new)
    }

    /// Returns information about the current user.
    #[must_use]
    pub fn my_self_user(&self) -> Option<UserInfoHandle> {
        self.controller.my_self_user().map(UserInfoHandle::new)
    }

    /// Indicates whether participants may request a local recording
    /// privilege.
    #[must_use]
    pub fn is_participant_request_local_recording_allowed(&self) -> bool {
        self.controller
            .is_participant_request_local_recording_allowed()
    }
}

#[cfg(test)]
mod spec {
    use std::sync::{Arc, Weak};

    use once_cell::sync::OnceCell;
    use parking_lot::Mutex;

    use super::{ParticipantsControllerHandle, ParticipantsEvents};
    use crate::sdk::{
        MockParticipantsController, MockUserInfo, ParticipantsEventSink,
        SdkError, SdkList, UserInfo,
    };

    fn user(id: u32, name: &'static str) -> Arc<dyn UserInfo> {
        let mut info = MockUserInfo::new();
        info.expect_user_id().return_const(id);
        info.expect_user_name().returning(move || Some(name.to_owned()));
        info.expect_is_host().return_const(id == 11);
        Arc::new(info)
    }

    #[test]
    fn lists_users_in_order() {
        let mut controller = MockParticipantsController::new();
        controller.expect_participants_list().returning(|| {
            Some(Arc::new(vec![11_u32, 22, 33]) as Arc<dyn SdkList<u32>>)
        });
        controller.expect_user_by_user_id().returning(|id| match id {
            11 => Some(user(11, "alice")),
            33 => Some(user(33, "carol")),
            _ => None,
        });
        let handle = ParticipantsControllerHandle::new(Arc::new(controller));

        let users = handle.users().unwrap();

        assert_eq!(users.len(), 3);
        let ids: Vec<_> = users.iter().map(|p| p.user_id).collect();
        assert_eq!(ids, vec![11, 22, 33]);
        let first = users[0].user_info.as_ref().unwrap();
        assert_eq!(first.user_name().as_deref(), Some("alice"));
        assert!(first.is_host());
        assert!(users[1].user_info.is_none());
        assert_eq!(users[2].user_info.as_ref().unwrap().user_id(), 33);
    }

    #[test]
    fn missing_list_is_none() {
        let mut controller = MockParticipantsController::new();
        controller.expect_participants_list().returning(|| None);
        let handle = ParticipantsControllerHandle::new(Arc::new(controller));

        assert!(handle.users().is_none());
    }

    #[test]
    fn user_join_sees_snapshot() {
        let sink: Arc<Mutex<Option<Arc<dyn ParticipantsEventSink>>>> =
            Arc::default();
        let stored = Arc::clone(&sink);
        let mut controller = MockParticipantsController::new();
        controller.expect_set_event().returning(move |s| {
            *stored.lock() = s;
            SdkError::Success
        });
        let handle = ParticipantsControllerHandle::new(Arc::new(controller));
        let seen: Arc<Mutex<Vec<Vec<u32>>>> = Arc::default();

        handle.set_event(
            Arc::clone(&seen),
            ParticipantsEvents {
                on_user_join: |ctx, users| {
                    ctx.lock().push(users.to_vec());
                    users.iter_mut().for_each(|id| *id = 0);
                },
                ..ParticipantsEvents::default()
            },
        );
        let joined = vec![11_u32, 22, 33];
        let registered = sink.lock().clone().unwrap();
        registered.on_user_join(&joined, None);
        registered.on_user_join(&joined, None);
        registered.on_user_left(&joined, None);

        assert_eq!(joined, vec![11, 22, 33]);
        assert_eq!(
            *seen.lock(),
            vec![vec![11, 22, 33], vec![11, 22, 33]],
        );
    }

    #[derive(Default)]
    struct Reentry {
        handle: OnceCell<Weak<ParticipantsControllerHandle>>,
        seen: Mutex<Vec<String>>,
    }

    #[test]
    fn event_during_registration_reaches_handle() {
        let mut controller = MockParticipantsController::new();
        controller.expect_set_event().returning(|sink| {
            if let Some(sink) = sink {
                sink.on_host_change_notification(7);
            }
            SdkError::Success
        });
        let handle =
            Arc::new(ParticipantsControllerHandle::new(Arc::new(controller)));
        let ctx = Arc::new(Reentry::default());
        ctx.handle.set(Arc::downgrade(&handle)).unwrap();

        let code = handle.set_event(
            Arc::clone(&ctx),
            ParticipantsEvents {
                on_host_change_notification: |ctx, user_id| {
                    let handle = ctx.handle.get().unwrap().upgrade().unwrap();
                    let line = format!("{} {:?}", user_id, handle);
                    ctx.seen.lock().push(line);
                },
                ..ParticipantsEvents::default()
            },
        );

        assert_eq!(code, SdkError::Success);
        let seen = ctx.seen.lock().clone();
        assert_eq!(seen.len(), 1);
        assert!(seen[0].starts_with("7 ParticipantsControllerHandle"));
        assert_eq!(handle.clear_event(), SdkError::Success);
    }
}
