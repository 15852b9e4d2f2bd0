//! Process-wide sequence counter for diagnostic ordering.

use std::sync::atomic::{AtomicU64, Ordering};

/// Counter shared by every thread's table. Incremented once per entry event.
static SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Return the next sequence number
///
/// The counter exists purely so diagnostic lines can be ordered by a human;
/// no correctness decision depends on it, so relaxed ordering suffices.
pub fn next_sequence() -> u64 {
    SEQUENCE.fetch_add(1, Ordering::Relaxed)
}
