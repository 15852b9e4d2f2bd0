// Copyright (c) Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Text format for recorded event traces.
//!
//! A trace is the observer's call stream written down, one record per
//! line, for offline replay through the monitor:
//!
//! ```text
//! # comments run to end of line, blank lines are skipped
//! enter main @ a.out fp=0x7ffe1000 ret=0x401200
//! enter fib @ a.out fp=0x7ffe0fd0 ret=0x40125c
//! exit fib @ a.out fp=0x7ffe0fd0 ip=0x40125c
//! exit main @ a.out fp=0x7ffe1000 ip=0x401200
//! ```
//!
//! `enter` records carry the frame pointer and the expected return
//! address captured at call entry; `exit` records carry the frame
//! pointer and the instruction pointer captured at the return. Addresses
//! are `0x`-prefixed hexadecimal. Errors carry 1-indexed line numbers.

use shadow_stack::{Address, RoutineId};

use crate::{
    error::TraceError,
    event::{CallEvent, EntryEvent, ExitEvent},
};

/// Parse a whole trace into its event stream
pub fn parse_trace(input: &str) -> Result<Vec<CallEvent>, TraceError> {
    let mut events = Vec::new();
    for (index, text) in input.lines().enumerate() {
        if let Some(event) = parse_line(text, index + 1)? {
            events.push(event);
        }
    }
    Ok(events)
}

/// Parse one line; `None` for blank and comment lines
fn parse_line(text: &str, line: usize) -> Result<Option<CallEvent>, TraceError> {
    let text = strip_comment(text).trim();
    if text.is_empty() {
        return Ok(None);
    }

    let tokens: Vec<&str> = text.split_whitespace().collect();
    let kind = tokens[0];
    match kind {
        "enter" => {
            let (routine, first, second) = parse_record(&tokens, line, "ret")?;
            Ok(Some(CallEvent::Entry(EntryEvent {
                routine,
                frame_pointer: first,
                return_address: second,
            })))
        }
        "exit" => {
            let (routine, first, second) = parse_record(&tokens, line, "ip")?;
            Ok(Some(CallEvent::Exit(ExitEvent {
                routine,
                frame_pointer: first,
                instruction_pointer: second,
            })))
        }
        other => Err(TraceError::UnknownKind {
            line,
            kind: other.to_string(),
        }),
    }
}

/// Parse the common record shape: `KIND NAME @ IMAGE fp=ADDR <key>=ADDR`
fn parse_record(
    tokens: &[&str],
    line: usize,
    second_key: &str,
) -> Result<(RoutineId, Address, Address), TraceError> {
    if tokens.len() != 6 {
        return Err(TraceError::Malformed {
            line,
            reason: format!("expected 6 fields, found {}", tokens.len()),
        });
    }
    if tokens[2] != "@" {
        return Err(TraceError::Malformed {
            line,
            reason: format!("expected '@' between routine and image, found '{}'", tokens[2]),
        });
    }

    let routine = RoutineId::new(tokens[1], tokens[3]);
    let frame_pointer = parse_field(tokens[4], "fp", line)?;
    let second = parse_field(tokens[5], second_key, line)?;
    Ok((routine, frame_pointer, second))
}

/// Parse a `key=0xHEX` field
fn parse_field(token: &str, key: &str, line: usize) -> Result<Address, TraceError> {
    let value = match token.strip_prefix(key).and_then(|rest| rest.strip_prefix('=')) {
        Some(value) => value,
        None => {
            return Err(TraceError::Malformed {
                line,
                reason: format!("expected '{}=<address>', found '{}'", key, token),
            });
        }
    };

    let digits = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"));
    let parsed = digits.and_then(|digits| Address::from_str_radix(digits, 16).ok());
    parsed.ok_or_else(|| TraceError::InvalidAddress {
        line,
        field: key.to_string(),
        value: value.to_string(),
    })
}

/// Remove a `#` comment from a line
fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(position) => &line[..position],
        None => line,
    }
}
