// Copyright (c) Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Trace replay CLI
//!
//! Reads a recorded event trace from stdin, replays it through the
//! monitor, and writes the diagnostic stream to stdout. Exits 0 after a
//! clean replay, with the fault's status code on the first violation, or
//! 1 on unparseable input.
//!
//! Usage:
//!     monitor < events.trace

use std::io::{self, Read};

use monitor::{trace, CallMonitor};

fn main() {
    let args: Vec<String> = std::env::args().collect();

    // Check for --help
    if args.iter().any(|a| a == "--help" || a == "-h") {
        eprintln!("monitor - shadow stack trace replay");
        eprintln!();
        eprintln!("Usage: monitor < events.trace");
        eprintln!();
        eprintln!("Exit status: 0 clean, -1 underflow, -2 frame pointer");
        eprintln!("mismatch, -3 return address mismatch, 1 bad trace.");
        eprintln!();
        eprintln!("Options:");
        eprintln!("  --help, -h  Show this help message");
        std::process::exit(0);
    }

    // Read the trace from stdin
    let mut input = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut input) {
        eprintln!("Error reading stdin: {e}");
        std::process::exit(1);
    }

    // Parse before replaying anything
    let events = match trace::parse_trace(&input) {
        Ok(events) => events,
        Err(e) => {
            eprintln!("Error parsing trace: {e}");
            std::process::exit(1);
        }
    };

    // Replay; the first fault terminates with its status code
    let mut monitor = CallMonitor::to_stdout();
    for event in &events {
        if let Err(fault) = monitor.process(event) {
            fault.terminate();
        }
    }

    monitor.finish();
}
