// Copyright 2026 the Basic Runtime Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `READ`/`RESTORE` over typed DATA tables.

use basic_runtime::RuntimeError;
use basic_runtime::data::{DataCursor, DataEntry, DataTable};
use proptest::prelude::*;

fn arb_entry() -> impl Strategy<Value = DataEntry> {
    prop_oneof![
        any::<i32>().prop_map(DataEntry::Int),
        (-1.0e6_f32..1.0e6).prop_map(DataEntry::Float),
        "[a-z ]{0,12}".prop_map(|s| DataEntry::from(s.as_str())),
    ]
}

proptest! {
    #[test]
    fn restore_replays_the_same_strings(entries in prop::collection::vec(arb_entry(), 0..24)) {
        let mut cursor = DataCursor::new(DataTable::new(entries.clone()));
        let first: Vec<_> = (0..entries.len()).map(|_| cursor.read_string().unwrap()).collect();
        prop_assert_eq!(cursor.read_string(), Err(RuntimeError::OutOfData));
        cursor.restore();
        prop_assert_eq!(cursor.position(), 0);
        for expected in &first {
            let replayed = cursor.read_string().unwrap();
            prop_assert_eq!(&replayed, expected);
        }
    }

    #[test]
    fn cursor_never_passes_the_end(
        entries in prop::collection::vec(arb_entry(), 0..16),
        reads in 0_usize..32
    ) {
        let len = entries.len();
        let mut cursor = DataCursor::new(DataTable::new(entries));
        for _ in 0..reads {
            let _ = cursor.read_string();
        }
        prop_assert!(cursor.position() <= len);
        prop_assert_eq!(cursor.position(), reads.min(len));
    }
}

#[test]
fn mixed_program_reads() {
    let table = DataTable::new(vec![
        DataEntry::Int(10),
        DataEntry::Float(3.75),
        DataEntry::from("NAME"),
        DataEntry::Float(-2.9),
        DataEntry::Int(7),
    ]);
    let mut c = DataCursor::new(table);
    assert_eq!(c.read_int(), Ok(10));
    assert_eq!(c.read_float(), Ok(3.75));
    assert_eq!(c.read_string().unwrap().as_bytes(), b"NAME");
    assert_eq!(c.read_int(), Ok(-2));
    assert_eq!(c.read_string().unwrap().as_bytes(), b"7");
    assert_eq!(c.read_int(), Err(RuntimeError::OutOfData));
}

#[test]
fn numeric_read_of_string_fails_in_place() {
    let mut c = DataCursor::new(DataTable::new(vec![DataEntry::from("x"), DataEntry::Int(1)]));
    assert_eq!(c.read_int(), Err(RuntimeError::DataTypeMismatch));
    assert_eq!(c.read_float(), Err(RuntimeError::DataTypeMismatch));
    assert_eq!(c.position(), 0);
    assert_eq!(c.read_string().unwrap().as_bytes(), b"x");
    assert_eq!(c.read_float(), Ok(1.0));
}

#[test]
fn large_integers_read_as_strings_use_exponent_form() {
    let mut c = DataCursor::new(DataTable::new(vec![DataEntry::Int(1_234_567)]));
    assert_eq!(c.read_string().unwrap().as_bytes(), b"1.23457e+06");
}

#[test]
fn empty_table_is_out_of_data() {
    let mut c = DataCursor::new(DataTable::default());
    assert_eq!(c.read_float(), Err(RuntimeError::OutOfData));
    c.restore();
    assert_eq!(c.position(), 0);
}
