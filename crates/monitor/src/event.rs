// Copyright (c) Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! The event boundary with the external observer.
//!
//! Routines belonging to the dynamic loader, the C runtime, and the vDSO
//! are filtered out on the observer side (see [`crate::filter`]); the
//! monitor consumes an already-filtered stream.

use shadow_stack::{Address, RoutineId};

/// A call entered an instrumented routine
///
/// Fired once per call, before the callee executes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryEvent {
    /// The routine being called.
    pub routine: RoutineId,
    /// Frame-pointer register value at entry.
    pub frame_pointer: Address,
    /// The address the call instruction pushed as its return target.
    pub return_address: Address,
}

/// A call is returning from an instrumented routine
///
/// Fired once per return, at the point control transfers back to the
/// caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExitEvent {
    /// The routine returning.
    pub routine: RoutineId,
    /// Frame-pointer register value at the return.
    pub frame_pointer: Address,
    /// Instruction-pointer value: where control is transferring to.
    pub instruction_pointer: Address,
}

/// Either boundary event, for recorded streams
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallEvent {
    Entry(EntryEvent),
    Exit(ExitEvent),
}
