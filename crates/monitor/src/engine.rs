// Copyright (c) Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! The monitor engine: one table, one reporter, one event at a time.
//!
//! Every operation is an in-line comparison and table update on the
//! thread that delivered the event; the engine never blocks, spawns, or
//! defers. It is deliberately single-threaded; multi-threaded observers
//! get one engine per thread via [`crate::hooks`].

use std::io::{self, Write};

use shadow_stack::{RoutineId, ShadowStackTable};
use verifier::{check, FieldCheck, ObservedFrame};

use crate::{
    event::{CallEvent, EntryEvent, ExitEvent},
    fault::Fault,
    report::Reporter,
};

/// Drives shadow stack bookkeeping and verification over a call stream
pub struct CallMonitor<W: Write> {
    table: ShadowStackTable,
    reporter: Reporter<W>,
    entries: u64,
    exits: u64,
}

impl CallMonitor<io::Stdout> {
    /// An engine reporting to standard output
    pub fn to_stdout() -> Self {
        Self::new(Reporter::stdout())
    }
}

impl<W: Write> CallMonitor<W> {
    /// Create an engine over the given reporter
    pub fn new(reporter: Reporter<W>) -> Self {
        Self {
            table: ShadowStackTable::new(),
            reporter,
            entries: 0,
            exits: 0,
        }
    }

    /// Handle a call entry
    ///
    /// Records the frame snapshot and emits the entry line. Cannot fail;
    /// returns the assigned sequence number.
    pub fn on_entry(&mut self, event: &EntryEvent) -> u64 {
        let sequence =
            self.table
                .record_entry(&event.routine, event.frame_pointer, event.return_address);
        self.reporter.entry(
            sequence,
            &event.routine,
            event.frame_pointer,
            event.return_address,
        );
        self.entries += 1;
        sequence
    }

    /// Handle a call exit
    ///
    /// Pops the matching snapshot and verifies it against the observed
    /// registers. Both fields are compared and reported unconditionally;
    /// the returned fault, if any, is the frame-pointer violation when
    /// both fields differ. The caller owns termination.
    pub fn on_exit(&mut self, event: &ExitEvent) -> Result<(), Fault> {
        let popped = match self.table.record_exit(&event.routine) {
            Ok(popped) => popped,
            Err(underflow) => {
                let fault = Fault::from(underflow);
                self.reporter.fault(&fault);
                return Err(fault);
            }
        };

        self.reporter
            .exit(popped.snapshot.sequence, &event.routine, popped.depth);
        self.reporter.recorded(&popped.snapshot);

        let verdict = check(
            &popped.snapshot,
            &ObservedFrame {
                frame_pointer: event.frame_pointer,
                instruction_pointer: event.instruction_pointer,
            },
        );
        self.report_field("fp", &verdict.frame_pointer);
        self.report_field("ret", &verdict.return_address);

        match verdict.violation() {
            None => {
                self.exits += 1;
                Ok(())
            }
            Some(violation) => {
                let fault = Fault::violation(&event.routine, violation);
                self.reporter.fault(&fault);
                Err(fault)
            }
        }
    }

    /// Handle either event kind
    pub fn process(&mut self, event: &CallEvent) -> Result<(), Fault> {
        match event {
            CallEvent::Entry(entry) => {
                self.on_entry(entry);
                Ok(())
            }
            CallEvent::Exit(exit) => self.on_exit(exit),
        }
    }

    /// Emit the completion summary
    pub fn finish(&mut self) {
        self.reporter.finish(self.entries, self.exits);
    }

    /// In-flight call depth for a routine
    pub fn depth(&self, routine: &RoutineId) -> usize {
        self.table.depth(routine)
    }

    /// Number of routines with calls in flight
    pub fn in_flight(&self) -> usize {
        self.table.routines()
    }

    fn report_field(&mut self, label: &str, outcome: &FieldCheck) {
        match *outcome {
            FieldCheck::Match { observed } => self.reporter.field_ok(label, observed),
            FieldCheck::Mismatch { expected, observed } => {
                self.reporter.field_bad(label, expected, observed)
            }
        }
    }
}
