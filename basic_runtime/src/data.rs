// Copyright 2026 the Basic Runtime Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The `DATA` constant pool and its `READ` cursor.
//!
//! The compiler bakes every `DATA` literal into one ordered [`DataTable`]; the program reads it
//! front to back through a [`DataCursor`] and may rewind with `RESTORE`.
//!
//! Coercion is deliberately one-way: a string read of a numeric literal yields its `%g` text, but
//! a numeric read of a string literal is a type mismatch.

use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::error::RuntimeError;
use crate::string::BasicString;
use crate::string_funcs;

/// One typed `DATA` literal.
#[derive(Clone, Debug, PartialEq)]
pub enum DataEntry {
    /// Integer literal.
    Int(i32),
    /// Single-precision float literal.
    Float(f32),
    /// String literal.
    Str(Box<[u8]>),
}

/// The immutable, compiler-supplied literal sequence.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DataTable {
    entries: Box<[DataEntry]>,
}

impl DataTable {
    /// Wraps the literal sequence.
    #[must_use]
    pub fn new(entries: Vec<DataEntry>) -> Self {
        Self {
            entries: entries.into_boxed_slice(),
        }
    }

    /// Number of literals.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the program has no `DATA` statements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the literals in declaration order.
    #[must_use]
    pub fn entries(&self) -> &[DataEntry] {
        &self.entries
    }
}

impl From<Vec<DataEntry>> for DataTable {
    fn from(entries: Vec<DataEntry>) -> Self {
        Self::new(entries)
    }
}

/// Forward-only read position over a [`DataTable`].
///
/// Invariant: `0 <= position <= table.len()`. A failed read leaves the position unchanged.
#[derive(Clone, Debug, Default)]
pub struct DataCursor {
    table: DataTable,
    position: usize,
}

impl DataCursor {
    /// Creates a cursor at the start of `table`.
    #[must_use]
    pub fn new(table: DataTable) -> Self {
        Self { table, position: 0 }
    }

    /// Index of the next literal to read.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// The underlying table.
    #[must_use]
    pub fn table(&self) -> &DataTable {
        &self.table
    }

    /// `READ n%`: floats truncate toward zero.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "READ into an integer variable truncates like a C cast"
    )]
    pub fn read_int(&mut self) -> Result<i32, RuntimeError> {
        match self.peek()? {
            DataEntry::Int(v) => {
                let v = *v;
                self.advance(v)
            }
            DataEntry::Float(v) => {
                let v = *v as i32;
                self.advance(v)
            }
            DataEntry::Str(_) => Err(RuntimeError::DataTypeMismatch),
        }
    }

    /// `READ x!`.
    pub fn read_float(&mut self) -> Result<f32, RuntimeError> {
        match self.peek()? {
            DataEntry::Int(v) => {
                let v = *v as f32;
                self.advance(v)
            }
            DataEntry::Float(v) => {
                let v = *v;
                self.advance(v)
            }
            DataEntry::Str(_) => Err(RuntimeError::DataTypeMismatch),
        }
    }

    /// `READ s$`: numeric literals are converted to their `%g` text.
    ///
    /// Integers pass through single precision first, so large values print in exponent form.
    pub fn read_string(&mut self) -> Result<BasicString, RuntimeError> {
        let s = match self.peek()? {
            DataEntry::Int(v) => string_funcs::str_of(*v as f32),
            DataEntry::Float(v) => string_funcs::str_of(*v),
            DataEntry::Str(bytes) => BasicString::alloc(bytes),
        };
        self.advance(s)
    }

    /// `RESTORE`: rewinds to the first literal.
    pub fn restore(&mut self) {
        tracing::trace!(from = self.position, "DATA restore");
        self.position = 0;
    }

    fn peek(&self) -> Result<&DataEntry, RuntimeError> {
        self.table
            .entries
            .get(self.position)
            .ok_or(RuntimeError::OutOfData)
    }

    fn advance<T>(&mut self, value: T) -> Result<T, RuntimeError> {
        self.position += 1;
        Ok(value)
    }
}

impl From<&str> for DataEntry {
    fn from(s: &str) -> Self {
        Self::Str(s.as_bytes().into())
    }
}
