//! Process configuration, read once at startup.
//!
//! Environment variables must be set by the runtime environment (container
//! env file, or sourced manually for local development).

use std::env;
use std::time::Duration;

use crate::error::AppError;
use crate::state::security_config::SecurityConfig;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub security: SecurityConfig,
}

impl AppConfig {
    /// Load configuration from the environment.
    ///
    /// `BACKEND_JWT_SECRET` and `DATABASE_URL` are mandatory; the secret is
    /// injected into `SecurityConfig` here and never read again.
    pub fn from_env() -> Result<Self, AppError> {
        let host = env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port = env::var("BACKEND_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| AppError::config("BACKEND_PORT must be a valid port number"))?;

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| AppError::config("DATABASE_URL must be set"))?;

        let jwt_secret = env::var("BACKEND_JWT_SECRET")
            .map_err(|_| AppError::config("BACKEND_JWT_SECRET must be set"))?;

        let mut security = SecurityConfig::new(jwt_secret.as_bytes());
        security.register_token_ttl = ttl_from_env(
            "REGISTER_TOKEN_TTL_SECS",
            security.register_token_ttl,
        )?;
        security.login_token_ttl =
            ttl_from_env("LOGIN_TOKEN_TTL_SECS", security.login_token_ttl)?;

        Ok(Self {
            host,
            port,
            database_url,
            security,
        })
    }
}

fn ttl_from_env(var: &str, default: Duration) -> Result<Duration, AppError> {
    match env::var(var) {
        Ok(raw) => {
            let secs = raw
                .parse::<u64>()
                .map_err(|_| AppError::config(format!("{var} must be a number of seconds")))?;
            if secs == 0 {
                return Err(AppError::config(format!("{var} must be greater than zero")));
            }
            Ok(Duration::from_secs(secs))
        }
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::ttl_from_env;

    #[test]
    fn test_ttl_falls_back_to_default() {
        let default = Duration::from_secs(3600);
        let ttl = ttl_from_env("TTL_VAR_THAT_IS_NOT_SET", default).unwrap();
        assert_eq!(ttl, default);
    }
}
