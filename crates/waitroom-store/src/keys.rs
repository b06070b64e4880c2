//! Store key builders for the queue counters.
//!
//! The wire contract is two plain keys, `queue:length` and `queue:cursor`,
//! optionally behind a deployment prefix.

use waitroom_core::types::Counter;

/// Namespace shared by both counters.
const NAMESPACE: &str = "queue";

/// Full store key for a counter.
pub fn counter_key(prefix: &str, counter: Counter) -> String {
    format!("{prefix}{NAMESPACE}:{}", counter.name())
}

/// Keys for `[length, cursor]`, in that order.
pub fn snapshot_keys(prefix: &str) -> [String; 2] {
    [
        counter_key(prefix, Counter::Length),
        counter_key(prefix, Counter::Cursor),
    ]
}
