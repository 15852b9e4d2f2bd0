//! Frame snapshots captured at call entry.

/// A register-width address value (frame pointer, return address,
/// instruction pointer).
pub type Address = u64;

/// Frame state recorded when a call enters an instrumented routine
///
/// Captured once at entry and never mutated; the matching exit consumes it.
/// `sequence` orders diagnostic lines across all routines and carries no
/// correctness weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameSnapshot {
    /// Frame-pointer register value at entry.
    pub frame_pointer: Address,
    /// The address the call instruction pushed as its return target.
    pub return_address: Address,
    /// Globally monotonic index assigned at creation.
    pub sequence: u64,
}
