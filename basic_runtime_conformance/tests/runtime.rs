// Copyright 2026 the Basic Runtime Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The `Runtime` facade: whole-program scenarios and fatal escalation.

use std::convert::Infallible;
use std::panic::{self, AssertUnwindSafe};

use basic_runtime::data::{DataEntry, DataTable};
use basic_runtime::events::EventQueue;
use basic_runtime::string_funcs;
use basic_runtime::{BasicString, FatalHook, Limits, PanicOnFatal, Runtime, RuntimeError};

fn runtime(entries: Vec<DataEntry>) -> Runtime<PanicOnFatal> {
    Runtime::new(DataTable::new(entries), Limits::default(), PanicOnFatal)
}

#[test]
fn inventory_program() {
    // DATA "apple", 3, "pear", 5 : READ into an array and report the total.
    let mut rt = runtime(vec![
        DataEntry::from("apple"),
        DataEntry::Int(3),
        DataEntry::from("pear"),
        DataEntry::Int(5),
    ]);
    let report = rt.run(|rt| {
        let mut counts = rt.alloc_array::<i32>(2);
        let mut names = rt.alloc_array::<BasicString>(2);
        for i in 0..2 {
            let name = rt.read_string();
            let count = rt.read_int();
            rt.array_set(&mut names, i, name);
            rt.array_set(&mut counts, i, count);
        }
        let total = *rt.array_get(&counts, 0) + *rt.array_get(&counts, 1);
        let label = string_funcs::ucase(Some(rt.array_get(&names, 1)));
        Ok(format!("{label} {total}"))
    });
    assert_eq!(report, "PEAR 8");
}

#[test]
fn caught_error_is_visible_after_handler() {
    let mut rt = runtime(vec![]);
    let value = rt.run(|rt| {
        rt.try_catch(
            |rt| {
                let divisor = 0;
                if divisor == 0 {
                    return Err(rt.throw(Some(&BasicString::from("Division by zero"))));
                }
                Ok(1)
            },
            |_, _| Ok(-1),
        )
    });
    assert_eq!(value, -1);
    assert_eq!(rt.error_message().as_bytes(), b"Division by zero");
}

#[test]
fn fatal_errors_inside_try_are_not_caught() {
    let result = panic::catch_unwind(|| {
        let mut rt = runtime(vec![]);
        rt.run(|rt| rt.try_catch(|rt| Ok(rt.read_int()), |_, _| Ok(0)))
    });
    let payload = result.unwrap_err();
    let text = payload.downcast_ref::<String>().unwrap();
    assert_eq!(text, "RUNTIME ERROR: Out of DATA");
}

#[test]
fn hook_handler_observes_the_error() {
    let seen = std::sync::Mutex::new(None);
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        let hook = FatalHook(|e: &RuntimeError| -> Infallible {
            *seen.lock().unwrap() = Some(e.clone());
            panic!("device reset");
        });
        let mut rt = Runtime::new(DataTable::default(), Limits::default(), hook);
        let _ = rt.alloc_array::<u8>(-5);
    }));
    assert!(result.is_err());
    assert_eq!(
        seen.into_inner().unwrap(),
        Some(RuntimeError::InvalidElementCount(-5))
    );
}

#[test]
fn queued_events_drive_machines() {
    let mut rt = runtime(vec![]);
    let door = rt.machine_create("DOOR");
    rt.machine_add_state(door, "CLOSED");
    rt.machine_add_state(door, "OPEN");
    rt.machine_add_transition(door, "CLOSED", "OPEN_CMD", "OPEN");
    rt.machine_add_transition(door, "OPEN", "CLOSE_CMD", "CLOSED");

    let queue = EventQueue::new();
    let tx = queue.sender();
    assert!(tx.send(door, BasicString::from("OPEN_CMD")));
    assert!(tx.send(door, BasicString::from("BOGUS")));
    assert_eq!(rt.pump_events(&queue), 2);
    assert_eq!(rt.machine_state(door).as_bytes(), b"OPEN");
}
