// Copyright (c) Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! The diagnostic stream.
//!
//! One line per event plus per-field confirmations, colored the way the
//! terminal output of the monitor has always looked: green `[*]` for
//! informational lines, green `[+]` for a field that verified, red `[x]`
//! for a violation. The stream is the post-mortem record: when the
//! process is killed by a fault, the last lines name the exact call and
//! the exact values involved.

use std::io::{self, Write};

use colored::Colorize;
use shadow_stack::{Address, FrameSnapshot, RoutineId};

use crate::fault::Fault;

/// Renders diagnostic lines into any writer
///
/// Production drivers hand this stdout; tests hand it a `Vec<u8>` and
/// assert on the content. Output is best-effort: a failed write never
/// disturbs monitoring.
pub struct Reporter<W: Write> {
    out: W,
}

impl Reporter<io::Stdout> {
    /// A reporter writing to standard output
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Reporter<W> {
    /// Create a reporter over an arbitrary sink
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Informational line for a call entry
    pub fn entry(
        &mut self,
        sequence: u64,
        routine: &RoutineId,
        frame_pointer: Address,
        return_address: Address,
    ) {
        let _ = writeln!(
            self.out,
            "[{}] #{} enter {} | fp {:#x} | ret {:#x}",
            "*".green(),
            sequence,
            routine,
            frame_pointer,
            return_address,
        );
    }

    /// Informational line for a call exit, before verification
    pub fn exit(&mut self, sequence: u64, routine: &RoutineId, depth: usize) {
        let _ = writeln!(
            self.out,
            "[{}] #{} exit {} | depth {}",
            "*".green(),
            sequence,
            routine,
            depth,
        );
    }

    /// The frame state the matching entry recorded
    pub fn recorded(&mut self, snapshot: &FrameSnapshot) {
        let _ = writeln!(
            self.out,
            "    [{}] recorded fp {:#x} | ret {:#x}",
            "+".green(),
            snapshot.frame_pointer,
            snapshot.return_address,
        );
    }

    /// A field whose observed value matches the recorded one
    pub fn field_ok(&mut self, label: &str, observed: Address) {
        let _ = writeln!(self.out, "    [{}] {} {:#x}", "+".green(), label, observed);
    }

    /// A field whose observed value differs from the recorded one
    pub fn field_bad(&mut self, label: &str, expected: Address, observed: Address) {
        let _ = writeln!(
            self.out,
            "    [{}] {} {:#x} (recorded {:#x})",
            "x".red(),
            label,
            observed,
            expected,
        );
    }

    /// The failure banner emitted immediately before termination
    pub fn fault(&mut self, fault: &Fault) {
        let _ = writeln!(self.out, "[{}] {}: {}", "x".red(), "fatal".red(), fault);
    }

    /// Summary line for a normally completed execution
    pub fn finish(&mut self, entries: u64, exits: u64) {
        let _ = writeln!(
            self.out,
            "[{}] finish | {} calls, {} returns verified",
            "*".green(),
            entries,
            exits,
        );
    }
}
