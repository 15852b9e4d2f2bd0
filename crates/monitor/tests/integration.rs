//! Integration tests for the monitor crate
//!
//! Replays whole traces through the engine and checks the diagnostic
//! stream, the fault classification, and the exit status mapping.

use indoc::indoc;

use monitor::{
    hooks, trace, CallMonitor, EntryEvent, ExitEvent, Fault, Reporter, EXIT_FRAME_POINTER,
    EXIT_RETURN_ADDRESS, EXIT_UNDERFLOW,
};
use shadow_stack::RoutineId;

/// Replay a trace into a buffer-backed monitor, returning the first fault
/// (if any) and the captured diagnostics.
fn replay(input: &str) -> (Option<Fault>, String) {
    let events = trace::parse_trace(input).expect("trace must parse");

    let mut buf = Vec::new();
    let mut fault = None;
    {
        let mut monitor = CallMonitor::new(Reporter::new(&mut buf));
        for event in &events {
            if let Err(found) = monitor.process(event) {
                fault = Some(found);
                break;
            }
        }
        if fault.is_none() {
            monitor.finish();
        }
    }

    (fault, String::from_utf8(buf).expect("diagnostics are utf-8"))
}

#[test]
fn test_recursive_scenario_matches_and_cleans_up() {
    // The nested-call scenario: two recursive entries to foo, unwound in
    // LIFO order, both returns verifying cleanly.
    let input = indoc! {"
        enter foo @ a.out fp=0x1000 ret=0x4000
        enter foo @ a.out fp=0x1010 ret=0x4010
        exit foo @ a.out fp=0x1010 ip=0x4010
        exit foo @ a.out fp=0x1000 ip=0x4000
    "};
    let (fault, output) = replay(input);

    assert!(fault.is_none(), "clean trace must not fault: {:?}", fault);
    assert!(output.contains("enter foo (a.out) | fp 0x1000"), "got:\n{}", output);
    assert!(output.contains("enter foo (a.out) | fp 0x1010"), "got:\n{}", output);
    // The inner return pops from depth 2, the outer from depth 1.
    assert!(output.contains("exit foo (a.out) | depth 2"), "got:\n{}", output);
    assert!(output.contains("exit foo (a.out) | depth 1"), "got:\n{}", output);
    assert!(output.contains("finish | 2 calls, 2 returns verified"), "got:\n{}", output);
}

#[test]
fn test_attack_scenario_stops_before_hijacked_return() {
    // The attack scenario: bar's return address was overwritten with
    // 0x6000; the monitor must fault with the return-address status.
    let input = indoc! {"
        enter bar @ a.out fp=0x2000 ret=0x5000
        exit bar @ a.out fp=0x2000 ip=0x6000
    "};
    let (fault, output) = replay(input);

    let fault = fault.expect("hijacked return must fault");
    assert_eq!(fault.exit_code(), EXIT_RETURN_ADDRESS);
    assert_eq!(fault.addresses(), Some((0x5000, 0x6000)));

    assert!(output.contains("recorded fp 0x2000 | ret 0x5000"), "got:\n{}", output);
    assert!(output.contains("ret 0x6000 (recorded 0x5000)"), "got:\n{}", output);
    assert!(output.contains("fatal"), "got:\n{}", output);
    assert!(!output.contains("finish"), "got:\n{}", output);
}

#[test]
fn test_frame_pointer_smash_has_its_own_status() {
    let input = indoc! {"
        enter baz @ a.out fp=0x3000 ret=0x7000
        exit baz @ a.out fp=0x3330 ip=0x7000
    "};
    let (fault, output) = replay(input);

    let fault = fault.expect("corrupted frame pointer must fault");
    assert_eq!(fault.exit_code(), EXIT_FRAME_POINTER);
    assert!(output.contains("fp 0x3330 (recorded 0x3000)"), "got:\n{}", output);
}

#[test]
fn test_orphan_exit_has_the_underflow_status() {
    let (fault, output) = replay("exit ghost @ a.out fp=0x1000 ip=0x4000\n");

    let fault = fault.expect("orphan exit must fault");
    assert_eq!(fault.exit_code(), EXIT_UNDERFLOW);
    assert_eq!(fault.routine(), &RoutineId::new("ghost", "a.out"));
    assert!(output.contains("no recorded entry"), "got:\n{}", output);
}

#[test]
fn test_underflow_reported_even_after_clean_history() {
    // A routine that entered and exited cleanly, then exits once more.
    let input = indoc! {"
        enter foo @ a.out fp=0x1000 ret=0x4000
        exit foo @ a.out fp=0x1000 ip=0x4000
        exit foo @ a.out fp=0x1000 ip=0x4000
    "};
    let (fault, _) = replay(input);
    assert_eq!(fault.expect("third event must fault").exit_code(), EXIT_UNDERFLOW);
}

#[test]
fn test_interleaved_routines_verify_independently() {
    let input = indoc! {"
        enter main @ a.out fp=0x7ffe1000 ret=0x401200
        enter parse @ a.out fp=0x7ffe0f00 ret=0x401280
        enter parse @ a.out fp=0x7ffe0e00 ret=0x401290
        exit parse @ a.out fp=0x7ffe0e00 ip=0x401290
        exit parse @ a.out fp=0x7ffe0f00 ip=0x401280
        exit main @ a.out fp=0x7ffe1000 ip=0x401200
    "};
    let (fault, output) = replay(input);

    assert!(fault.is_none(), "got: {:?}", fault);
    assert!(output.contains("finish | 3 calls, 3 returns verified"), "got:\n{}", output);
}

#[test]
fn test_per_thread_hooks_keep_threads_isolated() {
    // Four threads run the same routine names with thread-distinct frame
    // state, interleaving freely. With per-thread sharding every return
    // verifies; a shared table would cross-match snapshots and
    // terminate the test process.
    let handles: Vec<_> = (0..4u64)
        .map(|thread_index| {
            std::thread::spawn(move || {
                let base = 0x10_0000 * (thread_index + 1);
                for round in 0..50u64 {
                    let outer = EntryEvent {
                        routine: RoutineId::new("worker", "a.out"),
                        frame_pointer: base + round,
                        return_address: base + 0x4000 + round,
                    };
                    let inner = EntryEvent {
                        routine: RoutineId::new("worker", "a.out"),
                        frame_pointer: base + 0x100 + round,
                        return_address: base + 0x4100 + round,
                    };

                    hooks::on_entry(&outer);
                    hooks::on_entry(&inner);
                    hooks::on_exit(&ExitEvent {
                        routine: inner.routine.clone(),
                        frame_pointer: inner.frame_pointer,
                        instruction_pointer: inner.return_address,
                    });
                    hooks::on_exit(&ExitEvent {
                        routine: outer.routine.clone(),
                        frame_pointer: outer.frame_pointer,
                        instruction_pointer: outer.return_address,
                    });
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("worker thread panicked");
    }
}

#[test]
fn test_trace_errors_surface_with_line_numbers() {
    let input = indoc! {"
        enter main @ a.out fp=0x7ffe1000 ret=0x401200
        leave main @ a.out fp=0x7ffe1000 ip=0x401200
    "};
    let err = trace::parse_trace(input).unwrap_err();
    assert!(err.to_string().contains("line 2"), "got: {}", err);
}
