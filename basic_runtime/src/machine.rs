// Copyright 2026 the Basic Runtime Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Named finite-state machines defined at run time.
//!
//! A [`MachineRegistry`] holds up to [`Limits::max_machines`] machines, addressed by integer
//! [`MachineHandle`]s. Each machine declares states and labelled transitions, then reacts to
//! string-named events.
//!
//! ## Semantics
//!
//! - The first declared state is the initial state.
//! - Transitions are not validated when added; they may name states that are declared later, or
//!   never.
//! - An event fires the *first* transition, in declaration order, whose source is the current
//!   state and whose label is the event. Its target is looked up by name at that moment; an
//!   undeclared target leaves the machine where it is.
//! - Misuse is silent. Invalid handles, full tables and unmatched events do nothing. The one
//!   exception is [`MachineRegistry::create`], which returns [`MachineHandle::INVALID`] when the
//!   registry is full, and callers are expected to check it.
//! - Names are stored truncated to [`Limits::max_name_len`] bytes.

use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::limits::Limits;
use crate::string::{BasicString, bytes_of};

/// State name reported for an invalid handle.
pub const UNKNOWN_STATE: &str = "UNKNOWN";

/// Integer handle of a registered machine.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MachineHandle(pub i32);

impl MachineHandle {
    /// Returned by [`MachineRegistry::create`] when the registry is full.
    pub const INVALID: Self = Self(-1);

    /// Returns `false` for the sentinel handle.
    #[must_use]
    pub fn is_valid(self) -> bool {
        self.0 >= 0
    }
}

#[derive(Clone, Debug)]
struct Transition {
    from: Box<[u8]>,
    event: Box<[u8]>,
    to: Box<[u8]>,
}

#[derive(Clone, Debug)]
struct Machine {
    name: Box<[u8]>,
    states: Vec<Box<[u8]>>,
    transitions: Vec<Transition>,
    current: usize,
}

impl Machine {
    fn current_name(&self) -> &[u8] {
        self.states.get(self.current).map_or(&[][..], |s| &s[..])
    }

    fn state_index(&self, name: &[u8]) -> Option<usize> {
        self.states.iter().position(|s| **s == *name)
    }
}

/// Fixed-capacity table of state machines.
#[derive(Clone, Debug)]
pub struct MachineRegistry {
    machines: Vec<Machine>,
    limits: Limits,
}

impl MachineRegistry {
    /// Creates an empty registry with the capacities from `limits`.
    #[must_use]
    pub fn new(limits: &Limits) -> Self {
        Self {
            machines: Vec::with_capacity(limits.max_machines),
            limits: *limits,
        }
    }

    /// Number of machines created so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.machines.len()
    }

    /// Returns `true` if no machine has been created.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.machines.is_empty()
    }

    /// Registers a machine and returns its handle, or [`MachineHandle::INVALID`] when full.
    pub fn create(&mut self, name: impl AsRef<[u8]>) -> MachineHandle {
        let name = name.as_ref();
        let Some(handle) = i32::try_from(self.machines.len())
            .ok()
            .filter(|_| self.machines.len() < self.limits.max_machines)
        else {
            tracing::warn!(
                limit = self.limits.max_machines,
                "too many state machines"
            );
            return MachineHandle::INVALID;
        };
        let name = self.truncate(name);
        self.machines.push(Machine {
            name,
            states: Vec::new(),
            transitions: Vec::new(),
            current: 0,
        });
        tracing::debug!(handle, "state machine created");
        MachineHandle(handle)
    }

    /// Declares a state. The first one becomes the current state.
    pub fn add_state(&mut self, handle: MachineHandle, state: impl AsRef<[u8]>) {
        let max_states = self.limits.max_states;
        let name = self.truncate(state.as_ref());
        let Some(m) = self.machine_mut(handle) else {
            return;
        };
        if m.states.len() >= max_states {
            tracing::trace!(handle = handle.0, "state table full; state ignored");
            return;
        }
        m.states.push(name);
    }

    /// Declares `from --event--> to`.
    pub fn add_transition(
        &mut self,
        handle: MachineHandle,
        from: impl AsRef<[u8]>,
        event: impl AsRef<[u8]>,
        to: impl AsRef<[u8]>,
    ) {
        let max_transitions = self.limits.max_transitions;
        let transition = Transition {
            from: self.truncate(from.as_ref()),
            event: self.truncate(event.as_ref()),
            to: self.truncate(to.as_ref()),
        };
        let Some(m) = self.machine_mut(handle) else {
            return;
        };
        if m.transitions.len() >= max_transitions {
            tracing::trace!(
                handle = handle.0,
                "transition table full; transition ignored"
            );
            return;
        }
        m.transitions.push(transition);
    }

    /// Delivers `event` to the machine. Never fails observably.
    pub fn event(&mut self, handle: MachineHandle, event: Option<&BasicString>) {
        let event = bytes_of(event);
        if event.is_empty() {
            return;
        }
        let Some(m) = self.machine_mut(handle) else {
            return;
        };
        let current = m.current_name();
        let Some(t) = m
            .transitions
            .iter()
            .find(|t| *t.from == *current && *t.event == *event)
        else {
            return;
        };
        match m.state_index(&t.to) {
            Some(next) => {
                tracing::trace!(handle = handle.0, from = m.current, to = next, "transition");
                m.current = next;
            }
            None => {
                tracing::trace!(handle = handle.0, "transition target not declared");
            }
        }
    }

    /// Name of the current state, or [`UNKNOWN_STATE`] for an invalid handle.
    ///
    /// A machine without states reports the empty string.
    #[must_use]
    pub fn state(&self, handle: MachineHandle) -> BasicString {
        match self.machine(handle) {
            Some(m) => BasicString::alloc(m.current_name()),
            None => BasicString::from(UNKNOWN_STATE),
        }
    }

    /// The (truncated) name the machine was created with.
    #[must_use]
    pub fn name(&self, handle: MachineHandle) -> Option<BasicString> {
        self.machine(handle).map(|m| BasicString::alloc(&m.name))
    }

    fn machine(&self, handle: MachineHandle) -> Option<&Machine> {
        usize::try_from(handle.0)
            .ok()
            .and_then(|i| self.machines.get(i))
    }

    fn machine_mut(&mut self, handle: MachineHandle) -> Option<&mut Machine> {
        usize::try_from(handle.0)
            .ok()
            .and_then(|i| self.machines.get_mut(i))
    }

    fn truncate(&self, name: &[u8]) -> Box<[u8]> {
        name[..name.len().min(self.limits.max_name_len)].into()
    }
}
