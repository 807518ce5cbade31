//! Plain SDK enumerations and value types.

use serde::{Deserialize, Serialize};

sdk_enum! {
    /// Status of the current meeting.
    pub enum MeetingStatus {
        Idle = 0,
        Connecting = 1,
        WaitingForHost = 2,
        InMeeting = 3,
        Disconnecting = 4,
        Reconnecting = 5,
        Failed = 6,
        Ended = 7,
        Unknown = 8,
        Locked = 9,
        Unlocked = 10,
        InWaitingRoom = 11,
        WebinarPromote = 12,
        WebinarDepromote = 13,
        JoinBreakoutRoom = 14,
        LeaveBreakoutRoom = 15,
        _ => Unexpected = 16,
    }
}

sdk_enum! {
    /// Meeting statistics warning.
    pub enum StatisticsWarningType {
        None = 0,
        NetworkQualityBad = 1,
        BusySystem = 2,
        _ => Unexpected = 3,
    }
}

sdk_enum! {
    /// Way of leaving a meeting.
    pub enum LeaveMeetingCmd {
        /// Leave the meeting, keeping it running for the others.
        Leave = 0,

        /// End the meeting for everyone. Host only.
        End = 1,
        _ => Unexpected = 2,
    }
}

sdk_enum! {
    /// Outcome of an SDK authentication.
    pub enum AuthResult {
        Success = 0,
        KeyOrSecretEmpty = 1,
        KeyOrSecretWrong = 2,
        AccountNotSupport = 3,
        AccountNotEnableSdk = 4,
        Unknown = 5,
        ServiceBusy = 6,
        None = 7,
        Overtime = 8,
        NetworkIssue = 9,
        ClientIncompatible = 10,
        JwtTokenWrong = 11,
        LimitExceededException = 12,
        _ => Unexpected = 13,
    }
}

sdk_enum! {
    /// Reason of a login failure.
    pub enum LoginFailReason {
        None = 0,
        EmailLoginDisable = 1,
        UserNotExist = 2,
        WrongPassword = 3,
        AccountLocked = 4,
        SdkNeedUpdate = 5,
        TooManyFailedAttempts = 6,
        SmsCodeError = 7,
        SmsCodeExpired = 8,
        PhoneNumberFormatInvalid = 9,
        LoginTokenInvalid = 10,
        UserDisagreeLoginDisclaimer = 11,
        MfaRequired = 12,
        NeedBirthdayAsk = 13,
        OtherIssue = 100,
        _ => Unexpected = 101,
    }
}

sdk_enum! {
    /// State of the login process.
    pub enum LoginStatus {
        Idle = 0,
        Processing = 1,
        Success = 2,
        Failed = 3,
        _ => Unexpected = 4,
    }
}

sdk_enum! {
    /// Kind of the logged in account.
    pub enum LoginType {
        Unknown = 0,
        Sso = 1,
        _ => Unexpected = 2,
    }
}

sdk_enum! {
    /// Status of a local or cloud recording.
    pub enum RecordingStatus {
        Start = 0,
        Stop = 1,
        DiskFull = 2,
        Pause = 3,
        Connecting = 4,
        Fail = 5,
        _ => Unexpected = 6,
    }
}

sdk_enum! {
    /// Answer of the host to a local recording privilege request.
    pub enum RequestLocalRecordingStatus {
        Granted = 0,
        Denied = 1,
        Timeout = 2,
        _ => Unexpected = 3,
    }
}

sdk_enum! {
    /// Sharing status of a meeting participant.
    pub enum SharingStatus {
        SelfSendBegin = 0,
        SelfSendEnd = 1,
        SelfSendPureAudioBegin = 2,
        SelfSendPureAudioEnd = 3,
        OtherShareBegin = 4,
        OtherShareEnd = 5,
        OtherSharePureAudioBegin = 6,
        OtherSharePureAudioEnd = 7,
        ViewOtherSharing = 8,
        Pause = 9,
        Resume = 10,
        _ => Unexpected = 11,
    }
}

sdk_enum! {
    /// Who is allowed to share in a meeting.
    pub enum ShareSettingType {
        LockShare = 0,
        HostGrab = 1,
        AnyoneGrab = 2,
        MultiShare = 3,
        _ => Unexpected = 4,
    }
}

sdk_enum! {
    /// Error of a shared video file playback.
    pub enum SharePlayError {
        None = 0,
        NotSupported = 1,
        ResolutionTooHigh = 2,
        OpenFail = 3,
        PlayFail = 4,
        SeekFail = 5,
        _ => Unexpected = 6,
    }
}

sdk_enum! {
    /// Kind of shared content.
    pub enum ShareType {
        Unknown = 0,
        Application = 1,
        Desktop = 2,
        Whiteboard = 3,
        AirHost = 4,
        Camera = 5,
        Data = 6,
        VideoFile = 7,
        _ => Unexpected = 8,
    }
}

sdk_enum! {
    /// Audience of a chat message.
    pub enum ChatMessageType {
        ToNone = 0,
        ToAll = 1,
        ToPanelist = 2,
        ToIndividualPanelist = 3,
        ToIndividual = 4,
        ToWaitingRoomUsers = 5,
        _ => Unexpected = 6,
    }
}

sdk_enum! {
    /// Level of the microphone background noise suppression.
    pub enum NoiseSuppressionLevel {
        None = 0,
        Auto = 1,
        Low = 2,
        Medium = 3,
        High = 4,
        _ => Unexpected = 5,
    }
}

sdk_enum! {
    /// Kind of subscribed raw video.
    pub enum RawDataType {
        /// Camera video.
        Video = 0,

        /// Screen share.
        Share = 1,
        _ => Unexpected = 2,
    }
}

sdk_enum! {
    /// Maximum resolution of received raw video frames.
    pub enum VideoResolution {
        R90p = 0,
        R180p = 1,
        R360p = 2,
        R720p = 3,
        R1080p = 4,
        _ => Unexpected = 5,
    }
}

sdk_enum! {
    /// Memory used by the SDK for raw data buffers.
    #[derive(Deserialize, Serialize)]
    pub enum RawDataMemoryMode {
        Stack = 0,
        Heap = 1,
        _ => Unexpected = 2,
    }
}

sdk_enum! {
    /// UI language of the SDK.
    #[derive(Deserialize, Serialize)]
    pub enum Language {
        Unknown = 0,
        English = 1,
        ChineseSimplified = 2,
        ChineseTraditional = 3,
        Japanese = 4,
        Spanish = 5,
        German = 6,
        French = 7,
        Portuguese = 8,
        Russian = 9,
        Korean = 10,
        Vietnamese = 11,
        Italian = 12,
        Polish = 13,
        Turkish = 14,
        Indonesian = 15,
        Dutch = 16,
        Swedish = 17,
        _ => Unexpected = 18,
    }
}

/// Parameters of the current meeting, notified once after joining.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct MeetingParameter {
    /// SDK meeting type code.
    pub meeting_type: u32,

    /// Whether the meeting is view only.
    pub is_view_only: bool,

    /// Whether the meeting is recorded locally on start.
    pub is_auto_recording_local: bool,

    /// Whether the meeting is recorded in cloud on start.
    pub is_auto_recording_cloud: bool,

    /// Number of the meeting.
    pub meeting_number: u64,

    /// Topic of the meeting, if any.
    pub meeting_topic: Option<String>,

    /// Name of the meeting host, if any.
    pub meeting_host: Option<String>,
}

/// Parameters of joining a meeting.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct JoinParam {
    /// Number of the meeting to join.
    pub meeting_number: u64,

    /// Personal link name used instead of [`JoinParam::meeting_number`].
    pub vanity_id: Option<String>,

    /// Display name of the joining user.
    pub user_name: String,

    /// Password of the meeting.
    pub password: Option<String>,

    /// Customer key of a webinar.
    pub customer_key: Option<String>,

    /// Webinar token granting panelist rights.
    pub webinar_token: Option<String>,

    /// Whether to join with the camera turned off.
    pub is_video_off: bool,

    /// Whether to join with the audio turned off.
    pub is_audio_off: bool,
}

impl JoinParam {
    /// Creates [`JoinParam`] of a user joining without a login.
    ///
    /// Optional identities are left empty, video and audio stay on.
    #[must_use]
    pub fn without_login(
        meeting_number: u64,
        user_name: String,
        password: Option<String>,
    ) -> Self {
        Self {
            meeting_number,
            user_name,
            password,
            ..Self::default()
        }
    }
}

/// Information about shared content.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ShareInfo {
    /// Kind of the shared content.
    pub share_type: ShareType,

    /// Shared monitor, for desktop sharing.
    pub monitor_id: Option<String>,
}
