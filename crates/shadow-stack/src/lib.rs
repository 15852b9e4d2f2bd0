// Copyright (c) Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Shadow stack bookkeeping for call-frame integrity monitoring
//!
//! This crate maintains, independently of the monitored program's own stack,
//! the frame state every in-flight call is expected to restore on return:
//! the caller's frame pointer and the return address pushed by the call
//! instruction. An external observer reports each call entry and each
//! return; this crate records a snapshot on entry and surrenders the
//! matching snapshot on exit, in LIFO order per routine.
//!
//! # Overview
//!
//! - [`RoutineId`]: the correlation key for a call, routine name plus the
//!   name of the image that owns it.
//! - [`FrameSnapshot`]: the frame pointer and return address recorded at
//!   entry, stamped with a diagnostic sequence number.
//! - [`ShadowStackTable`]: a map from routine identity to a LIFO stack of
//!   snapshots. Pushed on entry, popped on exit. An identity is present in
//!   the table if and only if it has at least one call in flight.
//!
//! Verifying a popped snapshot against observed register state is the job
//! of the `verifier` crate; this crate only keeps the books.
//!
//! # Thread Safety
//!
//! A call stack is inherently per-thread, so [`ShadowStackTable`] is a
//! plain single-threaded structure: callers that observe multi-threaded
//! programs keep one table per thread (the `monitor` crate's hooks do
//! exactly that). The only process-wide state is the sequence counter,
//! a relaxed atomic that exists purely to order diagnostic lines.
//!
//! # Known Limitation
//!
//! Entries and exits are correlated by routine identity alone, under the
//! assumption that calls and returns to a single identity are properly
//! nested. Non-local control transfer (`longjmp`, unwinding, tail-call
//! elimination that elides a return) breaks that assumption: an exit may
//! be matched against the wrong invocation, or an entry may never be
//! matched at all and its snapshot leaks. A hardened design would key by
//! a unique per-call token threaded from entry to exit by the observer.

mod error;
mod identity;
mod sequence;
mod snapshot;
mod table;

pub use error::UnderflowError;
pub use identity::RoutineId;
pub use sequence::next_sequence;
pub use snapshot::{Address, FrameSnapshot};
pub use table::{PoppedFrame, ShadowStackTable};
