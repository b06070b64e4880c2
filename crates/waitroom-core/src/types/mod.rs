//! Core type definitions used across the waitroom workspace.

pub mod queue;

pub use queue::{Counter, Position, QueueSnapshot};
