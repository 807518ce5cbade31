//! Marshalling contracts of the C boundary checked against a fake SDK.

mod fake;

use std::{
    ffi::{c_void, CStr},
    os::raw::c_char,
    ptr,
    slice,
    sync::Arc,
};

use parking_lot::Mutex;
use zoom_sdk_bridge::{
    ffi::{
        instance::{
            instance_audio_raw_data_helper, instance_free,
            instance_meeting_service, instance_setting_service,
        },
        meeting::{meeting_participants, meeting_set_event, MeetingCallbacks},
        participants::{
            participants_list, participants_list_free, participants_set_event,
            user_info_user_name, ParticipantsCallbacks,
        },
        rawdata::{
            audio_raw_data_subscribe, audio_raw_data_unsubscribe,
            AudioRawDataCallbacks,
        },
        setting::{
            audio_settings_is_auto_join_audio_enabled, audio_settings_mic_list,
            mic_list_free, setting_audio_settings,
        },
        string_free, ForeignClass,
    },
    rawdata::ExportedAudioRawData,
    sdk::{MeetingStatus, MicInfo, SdkList, StatisticsWarningType},
    Conf, Instance,
};

use self::fake::{FakeMic, FakeSdk, SharedFrame};

/// Initializes an [`Instance`] over the provided fake and hands it over the
/// C boundary.
fn instance(sdk: &Arc<FakeSdk>) -> *mut Instance {
    Instance::init_without_logger(Arc::clone(sdk) as _, Conf::default())
        .unwrap()
        .into_ptr()
        .as_ptr()
}

/// Everything the C callbacks observed.
#[derive(Default)]
struct Seen(Mutex<Vec<String>>);

impl Seen {
    fn as_ctx(&self) -> *mut c_void {
        self as *const Self as *mut c_void
    }

    fn push(ctx: *mut c_void, event: String) {
        let seen = unsafe { &*(ctx as *const Self) };
        seen.0.lock().push(event);
    }

    fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.0.lock())
    }
}

#[test]
fn participants_list_keeps_source_order() {
    let sdk = Arc::new(FakeSdk::default());
    *sdk.meeting.participants.users.lock() = Some(vec![33, 11, 22]);
    let this = instance(&sdk);

    unsafe {
        let participants =
            meeting_participants(instance_meeting_service(this));
        let mut count = 0;
        let list = participants_list(participants, &mut count);
        assert_eq!(count, 3);
        let users = slice::from_raw_parts(list, count as usize);
        let ids: Vec<_> = users.iter().map(|u| u.user_id).collect();
        assert_eq!(ids, vec![33, 11, 22]);

        let name = user_info_user_name(users[1].user_info);
        assert_eq!(CStr::from_ptr(name).to_str().unwrap(), "user-11");
        string_free(name);

        participants_list_free(list, count);
        instance_free(this);
    }
}

#[test]
fn missing_list_gives_null_and_zero_count() {
    let sdk = Arc::new(FakeSdk::default());
    let this = instance(&sdk);

    unsafe {
        let participants =
            meeting_participants(instance_meeting_service(this));
        let mut count = 7;
        assert!(participants_list(participants, &mut count).is_null());
        assert_eq!(count, 0);

        let settings = setting_audio_settings(instance_setting_service(this));
        let mut count = 7;
        assert!(audio_settings_mic_list(settings, &mut count).is_null());
        assert_eq!(count, 0);

        instance_free(this);
    }
}

#[test]
fn released_buffer_does_not_affect_another() {
    let sdk = Arc::new(FakeSdk::default());
    let mics: Vec<Arc<dyn MicInfo>> = vec![
        Arc::new(FakeMic {
            id: "hw:0".to_owned(),
            selected: true,
        }),
        Arc::new(FakeMic {
            id: "hw:1".to_owned(),
            selected: false,
        }),
    ];
    *sdk.setting.audio.mics.lock() = Some(mics);
    let this = instance(&sdk);

    unsafe {
        let settings = setting_audio_settings(instance_setting_service(this));
        let (mut first_count, mut second_count) = (0, 0);
        let first = audio_settings_mic_list(settings, &mut first_count);
        let second = audio_settings_mic_list(settings, &mut second_count);
        assert_ne!(first, second);

        mic_list_free(first, first_count);

        let mics = slice::from_raw_parts(second, second_count as usize);
        let ids: Vec<_> = mics
            .iter()
            .map(|m| CStr::from_ptr(m.device_id).to_str().unwrap().to_owned())
            .collect();
        assert_eq!(ids, vec!["hw:0", "hw:1"]);
        assert!(mics[0].selected);
        assert!(!mics[1].selected);

        mic_list_free(second, second_count);
        instance_free(this);
    }
}

unsafe extern "C" fn on_status_changed(
    ctx: *mut c_void,
    status: u32,
    result: i32,
) {
    Seen::push(ctx, format!("status {} {}", status, result));
}

unsafe extern "C" fn on_warning(ctx: *mut c_void, warning: u32) {
    Seen::push(ctx, format!("warning {}", warning));
}

unsafe extern "C" fn on_topic(ctx: *mut c_void, topic: *const c_char) {
    let topic = CStr::from_ptr(topic).to_string_lossy();
    Seen::push(ctx, format!("topic {}", topic));
}

unsafe extern "C" fn on_suspend(ctx: *mut c_void) {
    Seen::push(ctx, "suspend".to_owned());
}

#[test]
fn each_meeting_event_reaches_its_callback_once() {
    let sdk = Arc::new(FakeSdk::default());
    let this = instance(&sdk);
    let seen = Seen::default();
    let callbacks = MeetingCallbacks {
        on_meeting_status_changed: Some(on_status_changed),
        on_meeting_statistics_warning: Some(on_warning),
        on_meeting_topic_changed: Some(on_topic),
        on_suspend_participants_activities: Some(on_suspend),
        ..MeetingCallbacks::default()
    };

    unsafe {
        let service = instance_meeting_service(this);
        let code = meeting_set_event(service, seen.as_ctx(), callbacks);
        assert!(code.is_success());
    }
    let sink = sdk.meeting.sink.lock().clone().unwrap();
    sink.on_meeting_status_changed(MeetingStatus::InMeeting, 0);
    sink.on_meeting_statistics_warning(StatisticsWarningType::BusySystem);
    sink.on_meeting_topic_changed("Weekly sync");
    sink.on_suspend_participants_activities();
    sink.on_ai_companion_active_change(true);

    assert_eq!(
        seen.take(),
        vec![
            "status 3 0".to_owned(),
            "warning 2".to_owned(),
            "topic Weekly sync".to_owned(),
            "suspend".to_owned(),
        ],
    );

    drop(sink);
    unsafe { instance_free(this) };
}

unsafe extern "C" fn on_user_join(ctx: *mut c_void, users: *mut u32, len: u32) {
    let users = slice::from_raw_parts_mut(users, len as usize);
    Seen::push(ctx, format!("join {:?}", users));
    for id in users.iter_mut() {
        *id = 0;
    }
}

#[test]
fn user_join_list_is_a_copy() {
    let sdk = Arc::new(FakeSdk::default());
    let this = instance(&sdk);
    let seen = Seen::default();
    let callbacks = ParticipantsCallbacks {
        on_user_join: Some(on_user_join),
        ..ParticipantsCallbacks::default()
    };

    unsafe {
        let participants =
            meeting_participants(instance_meeting_service(this));
        let code =
            participants_set_event(participants, seen.as_ctx(), callbacks);
        assert!(code.is_success());
    }
    let sink = sdk.meeting.participants.sink.lock().clone().unwrap();
    let joined = vec![11_u32, 22, 33];
    sink.on_user_join(&joined, None);
    sink.on_user_join(&joined, None);

    assert_eq!(joined.count(), 3);
    assert_eq!(joined, vec![11, 22, 33]);
    assert_eq!(
        seen.take(),
        vec!["join [11, 22, 33]".to_owned(), "join [11, 22, 33]".to_owned()],
    );

    drop(sink);
    unsafe { instance_free(this) };
}

/// Answer of the share audio callback, read from the context.
struct Answer(Mutex<i32>);

unsafe extern "C" fn on_share(
    ctx: *mut c_void,
    data: &ExportedAudioRawData<'_>,
) -> i32 {
    let answer = &*(ctx as *const Answer);
    assert_eq!(data.data(), &[1, 2, 3, 4][..]);
    *answer.0.lock()
}

#[test]
fn share_audio_refcount_follows_callback_answer() {
    let sdk = Arc::new(FakeSdk::default());
    let this = instance(&sdk);
    let answer = Answer(Mutex::new(0));
    let callbacks = AudioRawDataCallbacks {
        on_share: Some(on_share),
        ..AudioRawDataCallbacks::default()
    };

    let helper = unsafe { instance_audio_raw_data_helper(this) };
    assert!(!helper.is_null());
    unsafe {
        let code = audio_raw_data_subscribe(
            helper,
            &answer as *const Answer as *mut c_void,
            callbacks,
            false,
        );
        assert!(code.is_success());
    }
    let sink = sdk.audio.sink.lock().clone().unwrap();
    let frame = SharedFrame::new(vec![1, 2, 3, 4]);

    *answer.0.lock() = 1;
    sink.on_share_audio_raw_data_received(&frame);
    assert_eq!(frame.refs(), 2);

    *answer.0.lock() = 1;
    sink.on_share_audio_raw_data_received(&frame);
    assert_eq!(frame.refs(), 3);

    *answer.0.lock() = -2;
    sink.on_share_audio_raw_data_received(&frame);
    assert_eq!(frame.refs(), 1);

    *answer.0.lock() = 0;
    sink.on_share_audio_raw_data_received(&frame);
    assert_eq!(frame.refs(), 1);

    drop(sink);
    unsafe {
        assert!(audio_raw_data_unsubscribe(helper).is_success());
        instance_free(this);
    }
}

#[test]
fn stateless_getter_is_stable() {
    let sdk = Arc::new(FakeSdk::default());
    let this = instance(&sdk);

    unsafe {
        let settings = setting_audio_settings(instance_setting_service(this));
        assert_ne!(settings, ptr::null());
        let first = audio_settings_is_auto_join_audio_enabled(settings);
        let second = audio_settings_is_auto_join_audio_enabled(settings);
        assert_eq!(first, second);

        instance_free(this);
    }
}
