//! Provides library configuration options.
//!
//! Configuration options can be parsed from config files in TOML format.

pub mod jwt;
pub mod log;
pub mod sdk;
pub mod webcam;

use std::env;

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;

#[doc(inline)]
pub use self::{
    jwt::Jwt,
    log::Log,
    sdk::{RawDataOptions, Sdk},
    webcam::Webcam,
};

/// CLI argument that is responsible for holding application configuration
/// file path.
static APP_CONF_PATH_CMD_ARG_NAME: &str = "--conf";

/// Environment variable that is responsible for holding application
/// configuration file path.
static APP_CONF_PATH_ENV_VAR_NAME: &str = "ZOOM_BRIDGE_CONF";

/// Prefix of environment variables overriding configuration values.
static APP_CONF_ENV_PREFIX: &str = "ZOOM_BRIDGE";

/// Holds library config.
#[derive(Clone, Debug, Deserialize, Serialize, SmartDefault)]
#[serde(default)]
pub struct Conf {
    /// Logging settings.
    pub log: Log,

    /// Parameters of the SDK initialization.
    pub sdk: Sdk,

    /// Virtual webcam settings.
    pub webcam: Webcam,

    /// JWT generation settings.
    pub jwt: Jwt,
}

impl Conf {
    /// Creates new [`Conf`] and applies values from such sources
    /// and in that order:
    /// - default values;
    /// - configuration file, the name of which is given as a command line
    ///   parameter or environment variable;
    /// - environment variables.
    ///
    /// # Errors
    ///
    /// Errors if parsing fails.
    pub fn parse() -> Result<Self, ConfigError> {
        let mut cfg = Config::new();

        let path = env::var(APP_CONF_PATH_ENV_VAR_NAME);
        if let Some(path) = get_conf_file_name(path, env::args()) {
            cfg.merge(File::with_name(&path))?;
        }

        cfg.merge(
            Environment::with_prefix(APP_CONF_ENV_PREFIX).separator("__"),
        )?;

        cfg.try_into()
    }
}

/// Returns the path to a configuration file, if it's set via CLI `--conf`
/// argument or `ZOOM_BRIDGE_CONF` environment variable. The environment
/// variable wins.
fn get_conf_file_name<T>(
    env_var: Result<String, env::VarError>,
    cmd_args: T,
) -> Option<String>
where
    T: Iterator<Item = String>,
{
    if let Ok(path) = env_var {
        return Some(path).filter(|p| !p.is_empty());
    }
    let mut args = cmd_args.skip_while(|x| x != APP_CONF_PATH_CMD_ARG_NAME);
    args.next()?;
    args.next()
}

#[cfg(test)]
pub mod spec {
    use std::{env, fs, time::Duration};

    use serial_test::serial;

    use super::*;

    /// Macro which overrides the provided `$default` with the value of the
    /// `$env` variable, parses a fresh [`Conf`] and removes the variable.
    #[macro_export]
    macro_rules! overrided_by_env_conf {
        ($env:expr => $value:expr) => {{
            ::std::env::set_var($env, $value);
            let conf = $crate::conf::Conf::parse().unwrap();
            ::std::env::remove_var($env);
            conf
        }};
    }

    #[test]
    fn get_conf_file_name_none() {
        let file = get_conf_file_name(
            Err(env::VarError::NotPresent),
            Vec::new().into_iter(),
        );
        assert_eq!(file, None);
    }

    #[test]
    fn get_conf_file_name_env() {
        let file = get_conf_file_name(
            Ok("env_path".to_owned()),
            Vec::new().into_iter(),
        );
        assert_eq!(file, Some("env_path".to_owned()));
    }

    #[test]
    fn get_conf_file_name_arg() {
        let file = get_conf_file_name(
            Err(env::VarError::NotPresent),
            vec![APP_CONF_PATH_CMD_ARG_NAME.to_owned(), "arg_path".to_owned()]
                .into_iter(),
        );
        assert_eq!(file, Some("arg_path".to_owned()));
    }

    #[test]
    fn get_conf_file_name_arg_without_value() {
        let file = get_conf_file_name(
            Err(env::VarError::NotPresent),
            vec![APP_CONF_PATH_CMD_ARG_NAME.to_owned()].into_iter(),
        );
        assert_eq!(file, None);
    }

    #[test]
    fn get_conf_file_name_both_env_overrides() {
        let file = get_conf_file_name(
            Ok("env_path".to_owned()),
            vec![APP_CONF_PATH_CMD_ARG_NAME.to_owned(), "arg_path".to_owned()]
                .into_iter(),
        );
        assert_eq!(file, Some("env_path".to_owned()));
    }

    #[test]
    #[serial]
    fn file_overrides_defaults() {
        let defaults = Conf::default();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bridge.toml");

        fs::write(&path, "[jwt]\ntoken_ttl = \"45m\"").unwrap();
        env::set_var(APP_CONF_PATH_ENV_VAR_NAME, &path);
        let new_config = Conf::parse().unwrap();
        env::remove_var(APP_CONF_PATH_ENV_VAR_NAME);

        assert_eq!(new_config.jwt.token_ttl, Duration::from_secs(45 * 60));
        assert_ne!(new_config.jwt.token_ttl, defaults.jwt.token_ttl);
    }

    #[test]
    #[serial]
    fn env_overrides_defaults() {
        let defaults = Conf::default();

        let new_config =
            overrided_by_env_conf!("ZOOM_BRIDGE_JWT__TOKEN_TTL" => "46m");

        assert_eq!(new_config.jwt.token_ttl, Duration::from_secs(46 * 60));
        assert_ne!(new_config.jwt.token_ttl, defaults.jwt.token_ttl);
    }

    #[test]
    #[serial]
    fn env_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bridge.toml");

        fs::write(&path, "[jwt]\ntoken_ttl = \"47m\"").unwrap();
        env::set_var(APP_CONF_PATH_ENV_VAR_NAME, &path);
        let file_config = Conf::parse().unwrap();
        let file_env_config =
            overrided_by_env_conf!("ZOOM_BRIDGE_JWT__TOKEN_TTL" => "48m");
        env::remove_var(APP_CONF_PATH_ENV_VAR_NAME);

        assert_eq!(file_config.jwt.token_ttl, Duration::from_secs(47 * 60));
        assert_eq!(
            file_env_config.jwt.token_ttl,
            Duration::from_secs(48 * 60),
        );
    }
}
