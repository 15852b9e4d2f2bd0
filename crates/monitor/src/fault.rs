// Copyright (c) Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Fatal fault taxonomy and the termination contract.
//!
//! There is no caller above this subsystem inside the monitored process,
//! so no structured error propagates anywhere: a fault's only lifecycle
//! transition is immediate process termination, and the exit status is
//! the report. Faults still travel as `Result` values up to the driver
//! (replay binary or per-thread hook) so the engine itself stays
//! testable; the driver is the one place [`Fault::terminate`] is called.

use shadow_stack::{Address, RoutineId, UnderflowError};
use thiserror::Error;
use verifier::Violation;

/// Exit status for a return with no recorded entry (status code A).
pub const EXIT_UNDERFLOW: i32 = -1;
/// Exit status for a frame-pointer mismatch (status code B).
pub const EXIT_FRAME_POINTER: i32 = -2;
/// Exit status for a return-address mismatch (status code C).
pub const EXIT_RETURN_ADDRESS: i32 = -3;

/// A condition that terminates the monitored process
#[derive(Debug, Clone, Error)]
pub enum Fault {
    /// An exit event arrived for a routine with no call in flight.
    #[error("{0}")]
    Underflow(#[from] UnderflowError),

    /// Verification of a popped snapshot failed.
    #[error("{violation} returning from {routine}")]
    Violation {
        routine: RoutineId,
        violation: Violation,
    },
}

impl Fault {
    /// The process exit status for this fault
    ///
    /// Distinct per class, so a supervisor can classify the violation
    /// from the status alone.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Underflow(_) => EXIT_UNDERFLOW,
            Self::Violation { violation, .. } => match violation {
                Violation::FramePointerMismatch { .. } => EXIT_FRAME_POINTER,
                Violation::ReturnAddressMismatch { .. } => EXIT_RETURN_ADDRESS,
            },
        }
    }

    /// Terminate the process with this fault's exit status
    ///
    /// Unconditional: no cleanup handlers run and nothing is unwound. The
    /// monitored program must not execute another instruction under a
    /// potentially attacker-controlled frame.
    pub fn terminate(&self) -> ! {
        std::process::exit(self.exit_code())
    }

    /// Convenience constructor for a verification violation
    pub fn violation(routine: &RoutineId, violation: Violation) -> Self {
        Self::Violation {
            routine: routine.clone(),
            violation,
        }
    }

    /// The routine the fault was observed in
    pub fn routine(&self) -> &RoutineId {
        match self {
            Self::Underflow(err) => &err.routine,
            Self::Violation { routine, .. } => routine,
        }
    }

    /// Expected/observed address pair, when the fault carries one
    pub fn addresses(&self) -> Option<(Address, Address)> {
        match self {
            Self::Underflow(_) => None,
            Self::Violation { violation, .. } => match *violation {
                Violation::FramePointerMismatch { expected, observed }
                | Violation::ReturnAddressMismatch { expected, observed } => {
                    Some((expected, observed))
                }
            },
        }
    }
}
