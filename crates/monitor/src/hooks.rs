// Copyright (c) Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Per-thread entry/exit hooks for in-process observers.
//!
//! # Design
//!
//! Each OS thread owns a private [`CallMonitor`] behind `thread_local!`.
//! A call stack is inherently per-thread, so sharding the shadow state the
//! same way makes interleaved delivery from concurrent threads safe with
//! no locking: a thread can only ever push and pop its own frames, and
//! LIFO order within a thread is exactly LIFO order within its call
//! stack. Entry and exit events for one call must therefore be delivered
//! on the thread that executed the call, which is where the observer
//! captures the register state in the first place.
//!
//! The exit hook enforces the fail-fast contract directly: any fault
//! terminates the process with the fault's status code.

use std::cell::RefCell;
use std::io;

use crate::{engine::CallMonitor, event::{EntryEvent, ExitEvent}};

thread_local! {
    static MONITOR: RefCell<CallMonitor<io::Stdout>> = RefCell::new(CallMonitor::to_stdout());
}

/// Record a call entry on the current thread's monitor
///
/// Returns the assigned diagnostic sequence number.
pub fn on_entry(event: &EntryEvent) -> u64 {
    MONITOR.with(|monitor| monitor.borrow_mut().on_entry(event))
}

/// Verify a call exit on the current thread's monitor
///
/// Does not return on a fault: the process is terminated with the
/// fault's exit status.
pub fn on_exit(event: &ExitEvent) {
    let outcome = MONITOR.with(|monitor| monitor.borrow_mut().on_exit(event));
    if let Err(fault) = outcome {
        fault.terminate();
    }
}

/// Emit the completion summary for the current thread's monitor
pub fn finish() {
    MONITOR.with(|monitor| monitor.borrow_mut().finish());
}
