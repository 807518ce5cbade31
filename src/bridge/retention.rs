//! Lifetime decisions over SDK reference counted raw data.

use std::num::NonZeroU32;

use crate::sdk::AudioRawData;

/// Decision of a raw data consumer about the lifetime of a delivered
/// reference counted frame.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RawDataRetention {
    /// Frame is only borrowed for the delivery call.
    Release,

    /// Frame is retained once and must be released later.
    Retain,

    /// Frame is retained the provided number of times.
    RetainAndHold(NonZeroU32),

    /// Frame references retained earlier are released the provided number
    /// of times.
    ReleaseHeld(NonZeroU32),
}

impl RawDataRetention {
    /// Applies this decision to the provided `frame`.
    pub fn apply(self, frame: &dyn AudioRawData) {
        match self {
            Self::Release => {}
            Self::Retain => Self::retain(frame, 1),
            Self::RetainAndHold(n) => Self::retain(frame, n.get()),
            Self::ReleaseHeld(n) => {
                for _ in 0..n.get() {
                    let remaining = frame.release();
                    log::trace!("Raw data released, {} left", remaining);
                }
            }
        }
    }

    /// Increments reference count of the provided `frame` `times` times.
    fn retain(frame: &dyn AudioRawData, times: u32) {
        if !frame.can_add_ref() {
            log::warn!("Raw data cannot be retained");
            return;
        }
        for _ in 0..times {
            if !frame.add_ref() {
                log::warn!("Raw data retain failed");
                return;
            }
        }
    }
}

impl Default for RawDataRetention {
    #[inline]
    fn default() -> Self {
        Self::Release
    }
}

impl From<i32> for RawDataRetention {
    /// Interprets the integer protocol of the C ABI: `1` retains once, `-N`
    /// releases `N` times, anything else only borrows.
    fn from(code: i32) -> Self {
        match code {
            1 => Self::Retain,
            n if n < 0 => NonZeroU32::new(n.unsigned_abs())
                .map_or(Self::Release, Self::ReleaseHeld),
            _ => Self::Release,
        }
    }
}

#[cfg(test)]
mod spec {
    use std::{
        num::NonZeroU32,
        sync::atomic::{AtomicU32, Ordering},
    };

    use super::RawDataRetention;
    use crate::sdk::AudioRawData;

    #[derive(Default)]
    struct Frame {
        add_refs: AtomicU32,
        releases: AtomicU32,
    }

    impl AudioRawData for Frame {
        fn buffer(&self) -> &[u8] {
            &[]
        }

        fn sample_rate(&self) -> u32 {
            32_000
        }

        fn channel_num(&self) -> u32 {
            1
        }

        fn can_add_ref(&self) -> bool {
            true
        }

        fn add_ref(&self) -> bool {
            self.add_refs.fetch_add(1, Ordering::SeqCst);
            true
        }

        fn release(&self) -> i32 {
            self.releases.fetch_add(1, Ordering::SeqCst);
            0
        }
    }

    fn counts(retention: RawDataRetention) -> (u32, u32) {
        let frame = Frame::default();
        retention.apply(&frame);
        (
            frame.add_refs.load(Ordering::SeqCst),
            frame.releases.load(Ordering::SeqCst),
        )
    }

    #[test]
    fn integer_protocol_maps_to_retention() {
        assert_eq!(RawDataRetention::from(1), RawDataRetention::Retain);
        assert_eq!(RawDataRetention::from(0), RawDataRetention::Release);
        assert_eq!(RawDataRetention::from(7), RawDataRetention::Release);
        assert_eq!(
            RawDataRetention::from(-2),
            RawDataRetention::ReleaseHeld(NonZeroU32::new(2).unwrap()),
        );
    }

    #[test]
    fn applies_reference_count_changes() {
        assert_eq!(counts(RawDataRetention::from(1)), (1, 0));
        assert_eq!(counts(RawDataRetention::from(-2)), (0, 2));
        assert_eq!(counts(RawDataRetention::from(0)), (0, 0));
        let hold = NonZeroU32::new(3).unwrap();
        assert_eq!(counts(RawDataRetention::RetainAndHold(hold)), (3, 0));
    }
}
