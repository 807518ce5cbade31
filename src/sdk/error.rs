//! Status codes returned by SDK calls.

use derive_more::Display;

sdk_enum! {
    /// Result code of every SDK operation.
    ///
    /// Passed through the C ABI unchanged.
    #[derive(Display)]
    pub enum SdkError {
        Success = 0,
        NoImpl = 1,
        WrongUsage = 2,
        InvalidParameter = 3,
        ModuleLoadFailed = 4,
        MemoryFailed = 5,
        ServiceFailed = 6,
        Uninitialize = 7,
        Unauthentication = 8,
        NoRecordingInProcess = 9,
        TranscoderNotFound = 10,
        VideoNotReady = 11,
        NoPermission = 12,
        Unknown = 13,
        OtherSdkInstanceRunning = 14,
        InternalError = 15,
        NoAudioDeviceFound = 16,
        NoVideoDeviceFound = 17,
        TooFrequentCall = 18,
        FailAssignUserPrivilege = 19,
        MeetingDontSupportFeature = 20,
        MeetingNotShareSender = 21,
        MeetingNoShare = 22,
        MeetingViewTypeParameterIsWrong = 23,
        MeetingAnnotationIsOff = 24,
        SettingOsDontSupport = 25,
        EmailLoginIsDisabled = 26,
        HardwareNotMeetForVb = 27,
        NeedUserConfirmRecordDisclaimer = 28,
        NoShareData = 29,
        ShareCannotSubscribeMyself = 30,
        NotInMeeting = 31,
        NotJoinAudio = 32,
        HardwareDontSupport = 33,
        DomainDontSupport = 34,
        MeetingRemoteControlIsOff = 35,
        FileTransferError = 36,
        _ => UnexpectedError = 37,
    }
}

impl SdkError {
    /// Indicates whether this code reports a successful call.
    #[inline]
    #[must_use]
    pub fn is_success(self) -> bool {
        self == Self::Success
    }

    /// Converts this code into a [`Result`], treating everything except
    /// [`SdkError::Success`] as an error.
    ///
    /// # Errors
    ///
    /// With this [`SdkError`] itself if it's not [`SdkError::Success`].
    #[inline]
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_success() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl Default for SdkError {
    #[inline]
    fn default() -> Self {
        Self::Success
    }
}

#[cfg(test)]
mod sdk_error_spec {
    use super::SdkError;

    #[test]
    fn round_trips_known_codes() {
        assert_eq!(SdkError::from(0), SdkError::Success);
        assert_eq!(SdkError::from(15), SdkError::InternalError);
        assert_eq!(SdkError::from(36), SdkError::FileTransferError);
        assert_eq!(u32::from(SdkError::NotInMeeting), 31);
    }

    #[test]
    fn unknown_codes_become_unexpected() {
        assert_eq!(SdkError::from(37), SdkError::UnexpectedError);
        assert_eq!(SdkError::from(1000), SdkError::UnexpectedError);
    }

    #[test]
    fn only_success_is_ok() {
        assert_eq!(SdkError::Success.into_result(), Ok(()));
        assert_eq!(
            SdkError::NoPermission.into_result(),
            Err(SdkError::NoPermission),
        );
    }
}
