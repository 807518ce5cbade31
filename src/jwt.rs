//! Generation of JWTs the SDK is authenticated with.

use chrono::Utc;
use hmac::{Hmac, Mac as _};
use jwt::{header::HeaderType, AlgorithmType, Header, SignWithKey, Token};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::conf;

/// Claims of an SDK JWT.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    /// SDK key of the application.
    pub app_key: String,

    /// Issue time in seconds since the Unix epoch.
    pub iat: i64,

    /// Expiration time of the JWT itself.
    pub exp: i64,

    /// Expiration time of the SDK session authorized by the JWT.
    pub token_exp: i64,
}

impl Claims {
    /// Creates [`Claims`] issued at `now` with lifetimes of the provided
    /// [`conf::Jwt`].
    #[must_use]
    pub fn new(sdk_key: &str, now: i64, conf: &conf::Jwt) -> Self {
        Self {
            app_key: sdk_key.to_owned(),
            iat: now,
            exp: now + conf.token_ttl.as_secs() as i64,
            token_exp: now + conf.session_ttl.as_secs() as i64,
        }
    }
}

/// Generates an HS256 JWT for the provided SDK credentials issued now.
///
/// # Errors
///
/// If the claims cannot be serialized or signed.
pub fn generate(
    sdk_key: &str,
    sdk_secret: &str,
    conf: &conf::Jwt,
) -> Result<String, jwt::Error> {
    let claims = Claims::new(sdk_key, Utc::now().timestamp(), conf);
    log::debug!("Generating JWT expiring at {}", claims.exp);
    sign(claims, sdk_secret)
}

/// Signs the provided [`Claims`] with the provided `secret`.
///
/// # Errors
///
/// If the claims cannot be serialized or signed.
pub fn sign(claims: Claims, secret: &str) -> Result<String, jwt::Error> {
    let header = Header {
        algorithm: AlgorithmType::Hs256,
        type_: Some(HeaderType::JsonWebToken),
        ..Header::default()
    };
    let key: Hmac<Sha256> = Hmac::new_from_slice(secret.as_bytes())?;
    let token = Token::new(header, claims).sign_with_key(&key)?;
    Ok(token.into())
}

#[cfg(test)]
mod spec {
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};

    use super::{generate, sign, Claims};
    use crate::conf;

    #[test]
    fn claims_follow_configured_ttls() {
        let claims = Claims::new("key", 1_000, &conf::Jwt::default());

        assert_eq!(claims.exp, 1_000 + 6 * 3600);
        assert_eq!(claims.token_exp, 1_000 + 24 * 3600);
    }

    #[test]
    fn encodes_header_and_claims() {
        let token = generate("sdk-key", "sdk-secret", &conf::Jwt::default())
            .unwrap();
        let parts: Vec<_> = token.split('.').collect();

        assert_eq!(parts.len(), 3);
        let header = URL_SAFE_NO_PAD.decode(parts[0]).unwrap();
        assert_eq!(header, br#"{"alg":"HS256","typ":"JWT"}"#.to_vec());
        let payload = URL_SAFE_NO_PAD.decode(parts[1]).unwrap();
        let claims: Claims = serde_json::from_slice(&payload).unwrap();
        assert_eq!(claims.app_key, "sdk-key");
        assert_eq!(claims.exp - claims.iat, 6 * 3600);
        let raw: serde_json::Value = serde_json::from_slice(&payload).unwrap();
        assert!(raw.get("appKey").is_some());
        assert!(raw.get("tokenExp").is_some());
    }

    #[test]
    fn signature_depends_on_secret() {
        let claims = Claims {
            app_key: "abc".to_owned(),
            iat: 0,
            exp: 1,
            token_exp: 2,
        };
        let signature = |token: &str| {
            URL_SAFE_NO_PAD
                .decode(token.rsplit('.').next().unwrap())
                .unwrap()
        };

        let first = sign(claims.clone(), "secret").unwrap();
        let second = sign(claims.clone(), "secret").unwrap();
        let other = sign(claims, "other").unwrap();

        assert_eq!(first, second);
        assert_eq!(signature(&first).len(), 32);
        assert_ne!(signature(&first), signature(&other));
    }
}
