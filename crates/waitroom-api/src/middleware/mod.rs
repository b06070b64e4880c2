//! Axum middleware stack.

pub mod admin_auth;
pub mod logging;
