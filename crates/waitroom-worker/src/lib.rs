//! # waitroom-worker
//!
//! Background task that lets a fixed number of visitors in on a timer.
//! It is just another caller of [`CursorAdvancer`](waitroom_service::CursorAdvancer);
//! deployments that drive the cursor from their own backend disable it.

pub mod advancer;

pub use advancer::AutoAdvancer;
