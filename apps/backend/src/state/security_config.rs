use std::time::Duration;

use jsonwebtoken::Algorithm;

/// Token TTL at registration (observed policy: 1 hour).
pub const DEFAULT_REGISTER_TOKEN_TTL: Duration = Duration::from_secs(60 * 60);
/// Token TTL at login (observed policy: 24 hours).
pub const DEFAULT_LOGIN_TOKEN_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Configuration for JWT security settings
#[derive(Debug, Clone)]
pub struct SecurityConfig {
    /// JWT secret key for signing and verifying tokens
    pub jwt_secret: Vec<u8>,
    /// JWT algorithm to use (defaults to HS256)
    pub algorithm: Algorithm,
    /// TTL for tokens issued at registration
    pub register_token_ttl: Duration,
    /// TTL for tokens issued at login
    pub login_token_ttl: Duration,
}

impl SecurityConfig {
    /// Create a new SecurityConfig with the given JWT secret and default TTLs
    pub fn new(jwt_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            algorithm: Algorithm::HS256,
            register_token_ttl: DEFAULT_REGISTER_TOKEN_TTL,
            login_token_ttl: DEFAULT_LOGIN_TOKEN_TTL,
        }
    }

    /// Override the issuance TTL policy.
    pub fn with_ttls(mut self, register: Duration, login: Duration) -> Self {
        self.register_token_ttl = register;
        self.login_token_ttl = login;
        self
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self::new(b"default_secret_for_tests_only".to_vec())
    }
}
