// Copyright (c) Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Stack-smashing monitor: event handling, reporting, and fail-fast policy
//!
//! This crate ties the shadow stack bookkeeping and the frame verifier
//! together into the runtime monitor. An external observer (the layer
//! that discovers routines in a loaded image and hooks their entries and
//! returns) delivers one [`EntryEvent`] per call and one [`ExitEvent`]
//! per return, with the register state captured at that instant. The
//! monitor records expected frame state at entry, verifies it at exit,
//! narrates every step to a diagnostic stream, and terminates the process
//! on the first inconsistency.
//!
//! # Architecture
//!
//! ```text
//! Observer (external instrumentation layer)
//!      │ entry / exit events
//!      ▼
//! CallMonitor
//!      ├─ ShadowStackTable   record on entry, surrender on exit
//!      ├─ verifier::check    popped snapshot vs. observed registers
//!      └─ Reporter           per-event diagnostic lines
//!                │
//!                ▼
//!          Fault ──▶ distinct process exit status per violation class
//! ```
//!
//! # Failure Policy
//!
//! Detection is escalation: underflow, frame-pointer mismatch, and
//! return-address mismatch are never retried, downgraded, or deferred.
//! Each maps to its own exit status (see [`Fault::exit_code`]) so a
//! supervising process can tell the classes apart from the status alone.
//!
//! # Thread Safety
//!
//! A call stack is per-thread, so the monitor is sharded per thread: the
//! [`hooks`] module gives every OS thread its own [`CallMonitor`] behind
//! `thread_local!`. Events from interleaved threads therefore cannot
//! corrupt each other's LIFO ordering, and no lock is taken on the hot
//! path. The only cross-thread state is the diagnostic sequence counter.

mod engine;
mod error;
mod event;
mod fault;
pub mod filter;
pub mod hooks;
mod report;
pub mod trace;

pub use engine::CallMonitor;
pub use error::TraceError;
pub use event::{CallEvent, EntryEvent, ExitEvent};
pub use fault::{Fault, EXIT_FRAME_POINTER, EXIT_RETURN_ADDRESS, EXIT_UNDERFLOW};
pub use report::Reporter;
