// Copyright 2026 the Basic Runtime Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Queue for state machine events raised outside the program's call stack.
//!
//! Interrupt-style callbacks (timers, GPIO edges, network handlers) must not touch the
//! [`MachineRegistry`](crate::machine::MachineRegistry) directly. They post through an
//! [`EventSender`] instead, and the program delivers the backlog at a safe point with
//! [`Runtime::pump_events`](crate::Runtime::pump_events).

use std::sync::mpsc::{self, Receiver, Sender};

use crate::machine::MachineHandle;
use crate::string::BasicString;

/// One queued event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MachineEvent {
    /// Target machine.
    pub handle: MachineHandle,
    /// Event name.
    pub event: BasicString,
}

/// Receiving end, owned by the program thread.
#[derive(Debug)]
pub struct EventQueue {
    tx: Sender<MachineEvent>,
    rx: Receiver<MachineEvent>,
}

impl EventQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { tx, rx }
    }

    /// A handle that callbacks on any thread can post through.
    pub fn sender(&self) -> EventSender {
        EventSender(self.tx.clone())
    }

    /// Takes every event queued so far, oldest first, without blocking.
    pub fn drain(&self) -> impl Iterator<Item = MachineEvent> + '_ {
        self.rx.try_iter()
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// Posting end of an [`EventQueue`].
#[derive(Clone, Debug)]
pub struct EventSender(Sender<MachineEvent>);

impl EventSender {
    /// Queues `event` for `handle`. Returns `false` once the queue is gone.
    pub fn send(&self, handle: MachineHandle, event: BasicString) -> bool {
        self.0.send(MachineEvent { handle, event }).is_ok()
    }
}
