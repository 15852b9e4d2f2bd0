//! The shadow stack table: per-routine LIFO stacks of frame snapshots.
//!
//! # Design
//!
//! The table maps each routine identity to the stack of snapshots for its
//! in-flight calls. Per-identity LIFO order is the whole correctness story:
//! under properly nested calls and returns, the most recent unmatched entry
//! for an identity is always the right match for that identity's next exit,
//! recursion included.
//!
//! Two invariants hold between operations:
//!
//! - a stack is non-empty if and only if its routine has at least one
//!   entered-but-not-exited call;
//! - an identity whose stack empties is removed outright, so the table
//!   never accumulates dead entries over a long execution.

use std::collections::HashMap;

use crate::{
    error::UnderflowError,
    identity::RoutineId,
    sequence::next_sequence,
    snapshot::{Address, FrameSnapshot},
};

/// The snapshot surrendered for an exit event, with the depth it was
/// popped from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoppedFrame {
    /// The snapshot recorded at the matching entry.
    pub snapshot: FrameSnapshot,
    /// In-flight frames for the routine at the moment the exit was
    /// observed, counting the frame being popped. Depth 1 means this
    /// exit retires the routine's last active call.
    pub depth: usize,
}

/// Mapping from routine identity to its stack of in-flight frame snapshots
///
/// The single source of truth for "calls currently in flight" per routine.
/// Deliberately not shared across threads; see the crate docs.
#[derive(Debug, Default)]
pub struct ShadowStackTable {
    stacks: HashMap<RoutineId, Vec<FrameSnapshot>>,
}

impl ShadowStackTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a call entry
    ///
    /// Allocates a snapshot stamped with a fresh sequence number and pushes
    /// it onto the routine's stack, creating the stack if the routine has
    /// no other call in flight. Returns the assigned sequence number for
    /// diagnostic correlation. This operation cannot fail: any routine may
    /// always be pushed.
    pub fn record_entry(
        &mut self,
        routine: &RoutineId,
        frame_pointer: Address,
        return_address: Address,
    ) -> u64 {
        let sequence = next_sequence();
        self.stacks
            .entry(routine.clone())
            .or_default()
            .push(FrameSnapshot {
                frame_pointer,
                return_address,
                sequence,
            });
        sequence
    }

    /// Record a call exit, surrendering the matching snapshot
    ///
    /// Pops the most recently pushed snapshot for the routine. If the
    /// routine has no call in flight the table is left untouched and an
    /// [`UnderflowError`] is returned: an exit arrived that no entry ever
    /// announced.
    pub fn record_exit(&mut self, routine: &RoutineId) -> Result<PoppedFrame, UnderflowError> {
        let stack = self
            .stacks
            .get_mut(routine)
            .ok_or_else(|| UnderflowError {
                routine: routine.clone(),
            })?;

        // Non-empty by invariant, but an empty stack here is the same
        // underflow condition as a missing one.
        let depth = stack.len();
        let snapshot = stack.pop().ok_or_else(|| UnderflowError {
            routine: routine.clone(),
        })?;

        if stack.is_empty() {
            self.stacks.remove(routine);
        }

        Ok(PoppedFrame { snapshot, depth })
    }

    /// Number of in-flight calls for a routine
    pub fn depth(&self, routine: &RoutineId) -> usize {
        self.stacks.get(routine).map_or(0, Vec::len)
    }

    /// Number of routines with at least one call in flight
    pub fn routines(&self) -> usize {
        self.stacks.len()
    }

    /// True if no call is in flight for any routine
    pub fn is_empty(&self) -> bool {
        self.stacks.is_empty()
    }
}
