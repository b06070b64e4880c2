//! # waitroom-core
//!
//! Core crate for the waiting room. Contains configuration schemas, the
//! counter store trait, queue state types, and the unified error system.
//!
//! This crate has **no** internal dependencies on other waitroom crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
