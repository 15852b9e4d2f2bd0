// Copyright (c) Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Violation classifications produced by frame verification

use shadow_stack::Address;
use thiserror::Error;

/// A detected inconsistency between recorded and observed frame state
///
/// Either variant is treated as evidence of active memory corruption;
/// there is no recovery path. Variant order matches severity order:
/// frame-pointer corruption is reported before return-address corruption
/// when both are present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("frame pointer mismatch: expected {expected:#x}, observed {observed:#x}")]
    FramePointerMismatch { expected: Address, observed: Address },

    #[error("return address mismatch: expected {expected:#x}, observed {observed:#x}")]
    ReturnAddressMismatch { expected: Address, observed: Address },
}
