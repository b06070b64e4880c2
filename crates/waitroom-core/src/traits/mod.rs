//! Core traits defined in `waitroom-core` and implemented by other crates.

pub mod counter;

pub use counter::CounterStore;
