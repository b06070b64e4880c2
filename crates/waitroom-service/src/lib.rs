//! # waitroom-service
//!
//! Queue logic on top of the counter store and position tokens.
//!
//! - `admission`: identify a visitor (or enqueue a new one) and decide admit/deny
//! - `advance`: the only writer of the cursor, used by the admin API and the
//!   automatic advancer

pub mod admission;
pub mod advance;

pub use admission::{Admission, AdmissionService, Outcome};
pub use advance::CursorAdvancer;
