//! JWT generation settings.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;

/// Settings of generated SDK JWTs.
#[derive(
    Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize, SmartDefault,
)]
#[serde(default)]
pub struct Jwt {
    /// Lifetime of a generated JWT itself.
    ///
    /// Defaults to `6h`.
    #[default(Duration::from_secs(6 * 60 * 60))]
    #[serde(with = "humantime_serde")]
    pub token_ttl: Duration,

    /// Lifetime of the SDK session authorized by a generated JWT.
    ///
    /// Defaults to `24h`.
    #[default(Duration::from_secs(24 * 60 * 60))]
    #[serde(with = "humantime_serde")]
    pub session_ttl: Duration,
}
