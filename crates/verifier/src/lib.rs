// Copyright (c) Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Integrity verification of call frames at return time
//!
//! Decides, for each observed return, whether the machine state is
//! consistent with the frame snapshot recorded when the call entered.
//! Any inconsistency is the canonical signature of stack smashing: a
//! buffer overflow that overwrote the saved frame pointer and/or return
//! address adjacent to it.
//!
//! # Verification Checklist
//!
//! | Check | Description |
//! |-------|-------------|
//! | **Frame pointer restored** | The frame-pointer register at return equals the value recorded at entry |
//! | **Return address intact** | The address control is returning to equals the one the call pushed |
//!
//! Both checks always run and both outcomes are carried in the
//! [`Verdict`], so diagnostics can show the full picture even when both
//! fields were corrupted. The frame-pointer check ranks first: when both
//! mismatch, the frame-pointer violation is the one reported and acted on.
//!
//! This crate is read-only against its inputs. It classifies; it never
//! recovers, repairs, or terminates. The failure policy lives in the
//! `monitor` crate.

mod check;
mod error;

pub use check::{check, FieldCheck, ObservedFrame, Verdict};
pub use error::Violation;
