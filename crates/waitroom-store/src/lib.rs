//! # waitroom-store
//!
//! Counter store implementations for the waiting room. Supports two modes:
//!
//! - **redis**: Redis-backed counters using the [redis](https://crates.io/crates/redis) crate
//! - **memory**: In-process atomic counters, for development and tests only
//!
//! The provider is selected at runtime based on configuration and every call
//! is bounded by the configured operation timeout.

pub mod keys;
#[cfg(feature = "memory")]
pub mod memory;
pub mod provider;
#[cfg(feature = "redis-backend")]
pub mod redis;

pub use provider::StoreManager;
