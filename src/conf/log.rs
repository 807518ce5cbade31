//! Logging settings.

use std::{borrow::Cow, str::FromStr as _};

use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;

/// Settings of the logger installed by [`Instance::init()`].
///
/// [`Instance::init()`]: crate::instance::Instance::init
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize, SmartDefault)]
#[serde(default)]
pub struct Log {
    /// Maximum level of logged records, `OFF` disables logging at all.
    ///
    /// Defaults to `INFO`.
    #[default("INFO")]
    pub level: Cow<'static, str>,

    /// Number of records buffered before SDK threads start blocking on the
    /// logger.
    ///
    /// Defaults to `2048`.
    #[default(2048)]
    pub buffer_size: usize,
}

impl Log {
    /// Parses the configured [`Log::level`]. `None` if logging is off or the
    /// level is unknown.
    #[must_use]
    pub fn level(&self) -> Option<slog::Level> {
        slog::Level::from_str(&self.level).ok()
    }
}

#[cfg(test)]
mod log_conf_specs {
    use serial_test::serial;

    use crate::conf::Conf;

    use super::Log;

    #[test]
    fn unknown_level_disables_logging() {
        let log = Log {
            level: "CHATTY".into(),
            ..Log::default()
        };

        assert_eq!(log.level(), None);
        assert_eq!(Log::default().level(), Some(slog::Level::Info));
    }

    #[test]
    #[serial]
    fn level_and_buffer_from_env() {
        let warn =
            crate::overrided_by_env_conf!("ZOOM_BRIDGE_LOG__LEVEL" => "WARN");
        let off =
            crate::overrided_by_env_conf!("ZOOM_BRIDGE_LOG__LEVEL" => "OFF");
        let buffered = crate::overrided_by_env_conf!(
            "ZOOM_BRIDGE_LOG__BUFFER_SIZE" => "16"
        );

        assert_eq!(warn.log.level(), Some(slog::Level::Warning));
        assert_eq!(off.log.level(), None);
        assert_eq!(buffered.log.buffer_size, 16);
        assert_eq!(buffered.log, Log {
            buffer_size: 16,
            ..Conf::default().log
        });
    }
}
