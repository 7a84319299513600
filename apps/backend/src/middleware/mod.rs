pub mod auth_guard;
pub mod cors;
