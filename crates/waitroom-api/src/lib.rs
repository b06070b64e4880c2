//! # waitroom-api
//!
//! HTTP gateway for the waiting room built on Axum.
//!
//! Every request that is not an admin route goes through the gate: the
//! visitor's cookie is checked, a position is allocated if needed, and the
//! request is either forwarded to the protected origin or answered with the
//! waiting-room page.

pub mod app;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod origin;
pub mod router;
pub mod session;
pub mod state;
pub mod view;

pub use app::{build_app, run_server};
pub use state::AppState;
