// Copyright (c) Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Field-by-field comparison of recorded and observed frame state.

use shadow_stack::{Address, FrameSnapshot};

use crate::error::Violation;

/// Register state captured by the observer at the point of return
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObservedFrame {
    /// Frame-pointer register value at the return instruction.
    pub frame_pointer: Address,
    /// Instruction-pointer value, i.e. the address control is
    /// transferring back to.
    pub instruction_pointer: Address,
}

/// Outcome of comparing one recorded field against its observed value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldCheck {
    Match { observed: Address },
    Mismatch { expected: Address, observed: Address },
}

impl FieldCheck {
    fn compare(expected: Address, observed: Address) -> Self {
        if expected == observed {
            Self::Match { observed }
        } else {
            Self::Mismatch { expected, observed }
        }
    }

    /// True if the observed value equals the recorded one
    pub fn is_match(&self) -> bool {
        matches!(self, Self::Match { .. })
    }
}

/// The result of verifying one return against its recorded snapshot
///
/// Always carries both field outcomes; neither check short-circuits the
/// other, so callers see the full diagnostic even when both fields differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    /// Frame-pointer comparison, checked first.
    pub frame_pointer: FieldCheck,
    /// Return-address comparison, checked second.
    pub return_address: FieldCheck,
}

impl Verdict {
    /// True only if both fields match
    pub fn is_match(&self) -> bool {
        self.frame_pointer.is_match() && self.return_address.is_match()
    }

    /// The violation to act on, if any
    ///
    /// Frame-pointer corruption ranks above return-address corruption, so
    /// when both fields mismatch this returns the frame-pointer violation.
    pub fn violation(&self) -> Option<Violation> {
        if let FieldCheck::Mismatch { expected, observed } = self.frame_pointer {
            return Some(Violation::FramePointerMismatch { expected, observed });
        }
        if let FieldCheck::Mismatch { expected, observed } = self.return_address {
            return Some(Violation::ReturnAddressMismatch { expected, observed });
        }
        None
    }
}

/// Verify an observed return against the snapshot recorded at entry
///
/// Compares the frame pointer and the return address independently; both
/// comparisons are always performed. Read-only against both arguments.
pub fn check(snapshot: &FrameSnapshot, observed: &ObservedFrame) -> Verdict {
    Verdict {
        frame_pointer: FieldCheck::compare(snapshot.frame_pointer, observed.frame_pointer),
        return_address: FieldCheck::compare(snapshot.return_address, observed.instruction_pointer),
    }
}
