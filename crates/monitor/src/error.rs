// Copyright (c) Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Error types for trace parsing.

use thiserror::Error;

/// Error while parsing a recorded event trace
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TraceError {
    /// The record kind is neither `enter` nor `exit`.
    #[error("line {line}: unknown record kind '{kind}'")]
    UnknownKind {
        /// 1-indexed source line.
        line: usize,
        /// The offending first token.
        kind: String,
    },

    /// The record does not have the expected shape.
    #[error("line {line}: {reason}")]
    Malformed {
        /// 1-indexed source line.
        line: usize,
        /// What was wrong with the record.
        reason: String,
    },

    /// An address field does not hold a `0x`-prefixed hexadecimal value.
    #[error("line {line}: invalid address '{value}' in field '{field}'")]
    InvalidAddress {
        /// 1-indexed source line.
        line: usize,
        /// The field name (`fp`, `ret`, or `ip`).
        field: String,
        /// The value that failed to parse.
        value: String,
    },
}
