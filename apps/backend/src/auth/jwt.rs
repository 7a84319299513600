use std::time::{Duration, SystemTime, UNIX_EPOCH};

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::AppError;
use crate::state::security_config::SecurityConfig;

/// Identity claim embedded in our access tokens.
///
/// `sub` and `email` are mandatory; a token whose payload is missing either
/// fails deserialization and is rejected as malformed.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Claims {
    /// User identifier (users.id)
    pub sub: i64,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Issued-at (seconds since epoch)
    pub iat: i64,
    /// Expiry (seconds since epoch)
    pub exp: i64,
}

/// Why a token was rejected. The HTTP surface collapses all three into one
/// generic 403, but the distinction is kept for logs and tests.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("not a well-formed signed token")]
    Malformed,
    #[error("signature does not verify")]
    SignatureInvalid,
    #[error("token expired")]
    Expired,
}

impl From<TokenError> for AppError {
    fn from(e: TokenError) -> Self {
        match e {
            TokenError::Malformed => AppError::TokenMalformed,
            TokenError::SignatureInvalid => AppError::TokenSignatureInvalid,
            TokenError::Expired => AppError::TokenExpired,
        }
    }
}

/// Mint an HS256 JWT carrying the given identity, expiring at `now + ttl`.
pub fn mint_token(
    sub: i64,
    email: &str,
    name: Option<&str>,
    ttl: Duration,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<String, AppError> {
    let iat = now
        .duration_since(UNIX_EPOCH)
        .map_err(|_| AppError::internal("Failed to get current time"))?
        .as_secs() as i64;

    let exp = iat + ttl.as_secs() as i64;

    let claims = Claims {
        sub,
        email: email.to_string(),
        name: name.map(str::to_string),
        iat,
        exp,
    };

    encode(
        &Header::new(security.algorithm),
        &claims,
        &EncodingKey::from_secret(&security.jwt_secret),
    )
    .map_err(|e| AppError::internal(format!("Failed to encode JWT: {e}")))
}

/// Verify signature and expiry, returning the decoded claims.
///
/// Pure given the secret: no I/O, no side effects.
pub fn verify_token(token: &str, security: &SecurityConfig) -> Result<Claims, TokenError> {
    let mut validation = Validation::new(security.algorithm);
    validation.validate_exp = true;
    // Expiry is the only invalidation mechanism, so no grace window.
    validation.leeway = 0;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(&security.jwt_secret),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidSignature => TokenError::SignatureInvalid,
        _ => TokenError::Malformed,
    })
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    use jsonwebtoken::{encode, EncodingKey, Header};

    use super::{mint_token, verify_token, TokenError};
    use crate::state::security_config::SecurityConfig;

    const HOUR: Duration = Duration::from_secs(60 * 60);

    #[test]
    fn test_mint_and_verify_roundtrip() {
        let security = SecurityConfig::new("test_secret_key_for_testing_purposes_only".as_bytes());
        let now = SystemTime::now();

        let token = mint_token(42, "a@b.com", Some("Ana"), HOUR, now, &security).unwrap();
        let claims = verify_token(&token, &security).unwrap();

        assert_eq!(claims.sub, 42);
        assert_eq!(claims.email, "a@b.com");
        assert_eq!(claims.name.as_deref(), Some("Ana"));
        assert_eq!(
            claims.iat,
            now.duration_since(UNIX_EPOCH).unwrap().as_secs() as i64
        );
        assert_eq!(claims.exp, claims.iat + HOUR.as_secs() as i64);
    }

    #[test]
    fn test_two_mints_at_different_instants_differ() {
        let security = SecurityConfig::default();
        let now = SystemTime::now();

        let first = mint_token(1, "a@b.com", None, HOUR, now, &security).unwrap();
        let second =
            mint_token(1, "a@b.com", None, HOUR, now + Duration::from_secs(5), &security).unwrap();

        assert_ne!(first, second);
    }

    #[test]
    fn test_expired_token() {
        let security = SecurityConfig::default();

        // Issued two hours ago with a one-hour TTL
        let issued_at = SystemTime::now() - 2 * HOUR;
        let token = mint_token(42, "a@b.com", None, HOUR, issued_at, &security).unwrap();

        assert_eq!(verify_token(&token, &security), Err(TokenError::Expired));
    }

    #[test]
    fn test_bad_signature() {
        let security_a = SecurityConfig::new("secret-A".as_bytes());
        let security_b = SecurityConfig::new("secret-B".as_bytes());

        let token =
            mint_token(7, "a@b.com", None, HOUR, SystemTime::now(), &security_a).unwrap();

        assert_eq!(
            verify_token(&token, &security_b),
            Err(TokenError::SignatureInvalid)
        );
    }

    #[test]
    fn test_garbage_is_malformed() {
        let security = SecurityConfig::default();

        for garbage in ["", "garbage", "a.b", "a.b.c", "Bearer abc"] {
            assert_eq!(
                verify_token(garbage, &security),
                Err(TokenError::Malformed),
                "expected malformed for {garbage:?}"
            );
        }
    }

    #[test]
    fn test_payload_missing_user_id_is_malformed() {
        let security = SecurityConfig::default();
        let exp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs() as i64
            + 3600;

        // Well-signed token whose payload lacks the mandatory `sub` field
        let payload = serde_json::json!({ "email": "a@b.com", "iat": exp - 3600, "exp": exp });
        let token = encode(
            &Header::new(security.algorithm),
            &payload,
            &EncodingKey::from_secret(&security.jwt_secret),
        )
        .unwrap();

        assert_eq!(verify_token(&token, &security), Err(TokenError::Malformed));
    }
}
