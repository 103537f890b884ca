// Copyright 2026 the Basic Runtime Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-program runtime state with fatal-error escalation.
//!
//! Generated code talks to a single [`Runtime`]. Its methods mirror the component APIs but never
//! return a [`RuntimeError`]: errors are logged and handed to the runtime's [`FatalHandler`],
//! which does not return.

use alloc::string::String;

use crate::array::{self, ArrayShape, BasicArray};
use crate::data::{DataCursor, DataTable};
use crate::error::RuntimeError;
use crate::fatal::FatalHandler;
use crate::limits::Limits;
use crate::machine::{MachineHandle, MachineRegistry};
use crate::string::BasicString;
use crate::try_stack::{ExceptionStack, Raise, TryFrame, TryOutcome};

/// DATA cursor, `TRY` stack and machine registry of one running program.
#[derive(Debug)]
pub struct Runtime<F> {
    limits: Limits,
    data: DataCursor,
    try_stack: ExceptionStack,
    machines: MachineRegistry,
    handler: F,
}

impl<F: FatalHandler> Runtime<F> {
    /// Creates a runtime over the program's DATA `table`.
    pub fn new(table: DataTable, limits: Limits, handler: F) -> Self {
        tracing::debug!(data_entries = table.len(), "runtime initialized");
        Self {
            data: DataCursor::new(table),
            try_stack: ExceptionStack::new(&limits),
            machines: MachineRegistry::new(&limits),
            limits,
            handler,
        }
    }

    /// The active limits.
    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// The DATA cursor.
    pub fn data(&self) -> &DataCursor {
        &self.data
    }

    /// The `TRY` stack.
    pub fn try_stack(&self) -> &ExceptionStack {
        &self.try_stack
    }

    /// Mutable `TRY` stack, e.g. to install a sink.
    pub fn try_stack_mut(&mut self) -> &mut ExceptionStack {
        &mut self.try_stack
    }

    /// The state machine registry.
    pub fn machines(&self) -> &MachineRegistry {
        &self.machines
    }

    /// Logs `error` and ends the program through the fatal handler.
    pub fn fatal(&mut self, error: &RuntimeError) -> ! {
        tracing::error!(%error, "fatal runtime error");
        self.handler.fatal(error)
    }

    /// Unwraps `result`, escalating an error.
    pub fn check<T>(&mut self, result: Result<T, RuntimeError>) -> T {
        match result {
            Ok(value) => value,
            Err(err) => self.fatal(&err),
        }
    }

    // DATA

    /// `READ n%`.
    pub fn read_int(&mut self) -> i32 {
        let r = self.data.read_int();
        self.check(r)
    }

    /// `READ x!`.
    pub fn read_float(&mut self) -> f32 {
        let r = self.data.read_float();
        self.check(r)
    }

    /// `READ s$`.
    pub fn read_string(&mut self) -> BasicString {
        let r = self.data.read_string();
        self.check(r)
    }

    /// `RESTORE`.
    pub fn restore(&mut self) {
        self.data.restore();
    }

    // Arrays

    /// Validates a declared upper bound (`dim_index` is 1-based).
    pub fn check_dimension(&mut self, dim_value: i64, dim_index: u32) {
        let r = array::check_dimension(dim_value, dim_index);
        self.check(r);
    }

    /// Validates an element index, returning it as `usize`.
    pub fn bounds_check(&mut self, index: i64, size: i64) -> usize {
        let r = array::bounds_check(index, size);
        self.check(r)
    }

    /// `DIM` with a precomputed element count.
    pub fn alloc_array<T: Clone + Default>(&mut self, total_elements: i64) -> BasicArray<T> {
        let r = BasicArray::new(total_elements, &self.limits);
        self.check(r)
    }

    /// `DIM a(b0, b1, ...)`: validates every bound and allocates the array.
    pub fn dim_array<T: Clone + Default>(
        &mut self,
        bounds: &[i64],
    ) -> (ArrayShape, BasicArray<T>) {
        let shape = ArrayShape::from_bounds(bounds);
        let shape = self.check(shape);
        let array = BasicArray::with_shape(&shape, &self.limits);
        let array = self.check(array);
        (shape, array)
    }

    /// Checked element read.
    pub fn array_get<'a, T>(&mut self, array: &'a BasicArray<T>, index: i64) -> &'a T {
        let r = array.get(index);
        self.check(r)
    }

    /// Checked element write; returns the previous value.
    pub fn array_set<T>(&mut self, array: &mut BasicArray<T>, index: i64, value: T) -> T {
        let r = array.set(index, value);
        self.check(r)
    }

    // TRY / CATCH

    /// Enters a `TRY` region; nesting past the limit is fatal.
    pub fn try_begin(&mut self) -> TryFrame {
        let r = self.try_stack.try_begin();
        self.check(r)
    }

    /// Leaves the innermost region normally.
    pub fn try_end(&mut self) {
        self.try_stack.try_end();
    }

    /// `THROW msg$`. Without an active region this is fatal and does not return.
    pub fn throw(&mut self, message: Option<&BasicString>) -> Raise {
        match self.try_stack.throw(message) {
            Raise::Fatal(err) => self.fatal(&err),
            thrown => thrown,
        }
    }

    /// Settles `frame` (see [`ExceptionStack::settle`]). Fatal errors are escalated here.
    pub fn settle<T>(
        &mut self,
        frame: TryFrame,
        result: Result<T, Raise>,
    ) -> Result<TryOutcome<T>, Raise> {
        match self.try_stack.settle(frame, result) {
            Err(Raise::Fatal(err)) => self.fatal(&err),
            other => other,
        }
    }

    /// `TRY body CATCH handler END TRY`.
    pub fn try_catch<T, B, H>(&mut self, body: B, handler: H) -> Result<T, Raise>
    where
        B: FnOnce(&mut Self) -> Result<T, Raise>,
        H: FnOnce(&mut Self, BasicString) -> Result<T, Raise>,
    {
        let frame = self.try_begin();
        let result = body(self);
        match self.settle(frame, result)? {
            TryOutcome::Completed(value) => Ok(value),
            TryOutcome::ResumedFromThrow => {
                let message = self.error_message();
                handler(self, message)
            }
        }
    }

    /// Runs a whole program body. Anything that escapes it is fatal.
    pub fn run<T>(&mut self, program: impl FnOnce(&mut Self) -> Result<T, Raise>) -> T {
        match program(self) {
            Ok(value) => value,
            Err(Raise::Fatal(err)) => self.fatal(&err),
            Err(Raise::Thrown(_)) => {
                let message = self.try_stack.error_message();
                let message = String::from_utf8_lossy(message.as_bytes()).into_owned();
                self.fatal(&RuntimeError::UnhandledThrow(message))
            }
        }
    }

    /// `ERR$`: the most recently caught error message.
    pub fn error_message(&self) -> BasicString {
        self.try_stack.error_message()
    }

    /// A failed `ASSERT`. An empty message reports the program offset instead.
    pub fn assert_fail(&mut self, message: Option<&BasicString>, offset: i32) -> ! {
        let err = match message {
            Some(m) if !m.is_empty() => {
                RuntimeError::AssertionFailed(String::from_utf8_lossy(m.as_bytes()).into_owned())
            }
            _ => RuntimeError::AssertionFailedAt(offset),
        };
        self.fatal(&err)
    }

    // State machines

    /// See [`MachineRegistry::create`]; the sentinel is returned, not escalated.
    pub fn machine_create(&mut self, name: impl AsRef<[u8]>) -> MachineHandle {
        self.machines.create(name)
    }

    /// See [`MachineRegistry::add_state`].
    pub fn machine_add_state(&mut self, handle: MachineHandle, state: impl AsRef<[u8]>) {
        self.machines.add_state(handle, state);
    }

    /// See [`MachineRegistry::add_transition`].
    pub fn machine_add_transition(
        &mut self,
        handle: MachineHandle,
        from: impl AsRef<[u8]>,
        event: impl AsRef<[u8]>,
        to: impl AsRef<[u8]>,
    ) {
        self.machines.add_transition(handle, from, event, to);
    }

    /// See [`MachineRegistry::event`].
    pub fn machine_event(&mut self, handle: MachineHandle, event: Option<&BasicString>) {
        self.machines.event(handle, event);
    }

    /// See [`MachineRegistry::state`].
    pub fn machine_state(&self, handle: MachineHandle) -> BasicString {
        self.machines.state(handle)
    }

    /// Delivers every queued event in arrival order and returns how many there were.
    #[cfg(feature = "std")]
    pub fn pump_events(&mut self, queue: &crate::events::EventQueue) -> usize {
        let mut delivered = 0;
        for event in queue.drain() {
            self.machines.event(event.handle, Some(&event.event));
            delivered += 1;
        }
        delivered
    }
}
