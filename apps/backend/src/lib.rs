#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod auth;
pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod routes;
pub mod state;

#[cfg(test)]
pub mod test_bootstrap;

// Re-exports for public API
pub use auth::jwt::{mint_token, verify_token, Claims, TokenError};
pub use config::AppConfig;
pub use db::{connect_db, require_db};
pub use error::AppError;
pub use extractors::current_user::CurrentUser;
pub use middleware::auth_guard::AuthGuard;
pub use middleware::cors::cors_middleware;
pub use state::app_state::AppState;
pub use state::security_config::SecurityConfig;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
