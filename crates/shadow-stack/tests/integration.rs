//! Integration tests for shadow stack bookkeeping
//!
//! Exercises the table through longer call/return interleavings than the
//! unit tests: deep recursion, interleaved routines, and the bookkeeping
//! invariants across a whole synthetic execution.

use shadow_stack::{RoutineId, ShadowStackTable};

fn routine(name: &str) -> RoutineId {
    RoutineId::new(name, "a.out")
}

#[test]
fn test_deep_recursion_unwinds_in_reverse_entry_order() {
    let mut table = ShadowStackTable::new();
    let fib = routine("fib");

    // Each recursive level gets its own frame pointer and return address.
    let frames: Vec<(u64, u64)> = (0..64)
        .map(|level| (0x7fff_0000 + level * 0x30, 0x40_0000 + level * 0x10))
        .collect();

    for &(fp, ret) in &frames {
        table.record_entry(&fib, fp, ret);
    }
    assert_eq!(table.depth(&fib), frames.len());

    for (level, &(fp, ret)) in frames.iter().enumerate().rev() {
        let popped = table.record_exit(&fib).expect("level was entered");
        assert_eq!(popped.snapshot.frame_pointer, fp);
        assert_eq!(popped.snapshot.return_address, ret);
        assert_eq!(popped.depth, level + 1);
    }

    assert!(table.is_empty());
}

#[test]
fn test_interleaved_routines_do_not_cross_match() {
    let mut table = ShadowStackTable::new();
    let outer = routine("outer");
    let inner = routine("inner");

    // outer -> inner -> outer (recursive) -> inner, unwound in LIFO order.
    table.record_entry(&outer, 0x1000, 0x4000);
    table.record_entry(&inner, 0x2000, 0x5000);
    table.record_entry(&outer, 0x1100, 0x4100);
    table.record_entry(&inner, 0x2100, 0x5100);

    assert_eq!(table.record_exit(&inner).unwrap().snapshot.frame_pointer, 0x2100);
    assert_eq!(table.record_exit(&outer).unwrap().snapshot.frame_pointer, 0x1100);
    assert_eq!(table.record_exit(&inner).unwrap().snapshot.frame_pointer, 0x2000);
    assert_eq!(table.record_exit(&outer).unwrap().snapshot.frame_pointer, 0x1000);

    assert!(table.is_empty());
}

#[test]
fn test_long_execution_leaves_no_residue() {
    let mut table = ShadowStackTable::new();

    // Many rounds of balanced calls across a handful of routines; the
    // table must come back empty every round.
    let names = ["parse", "eval", "emit"];
    for round in 0..1000u64 {
        for name in names {
            table.record_entry(&routine(name), 0x1000 + round, 0x4000 + round);
        }
        for name in names.iter().rev() {
            let popped = table.record_exit(&routine(name)).unwrap();
            assert_eq!(popped.snapshot.frame_pointer, 0x1000 + round);
        }
        assert!(table.is_empty(), "residue after round {}", round);
    }
}

#[test]
fn test_underflow_error_names_the_routine() {
    let mut table = ShadowStackTable::new();
    let err = table.record_exit(&routine("orphan")).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("orphan"), "got: {}", message);
    assert!(message.contains("a.out"), "got: {}", message);
}
