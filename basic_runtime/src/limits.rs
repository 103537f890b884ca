// Copyright 2026 the Basic Runtime Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Capacity limits for a [`Runtime`](crate::Runtime).
///
/// The defaults reproduce the fixed tables of the device runtime. Raising them is fine on hosts;
/// lowering them is mostly useful in tests.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Limits {
    /// Maximum number of simultaneously active `TRY` regions.
    pub max_try_depth: usize,
    /// Maximum stored length (in bytes) of a thrown error message.
    pub max_error_message: usize,
    /// Maximum number of state machines.
    pub max_machines: usize,
    /// Maximum number of states per machine.
    pub max_states: usize,
    /// Maximum number of transitions per machine.
    pub max_transitions: usize,
    /// Names (machines, states, events) are truncated to this many bytes.
    pub max_name_len: usize,
    /// Upper bound on the byte size of a single array.
    pub max_array_bytes: usize,
}

impl Limits {
    /// Default `TRY` nesting depth.
    pub const DEFAULT_MAX_TRY_DEPTH: usize = 16;
    /// Default error message capacity.
    pub const DEFAULT_MAX_ERROR_MESSAGE: usize = 255;
    /// Default number of machines.
    pub const DEFAULT_MAX_MACHINES: usize = 8;
    /// Default number of states per machine.
    pub const DEFAULT_MAX_STATES: usize = 16;
    /// Default number of transitions per machine.
    pub const DEFAULT_MAX_TRANSITIONS: usize = 64;
    /// Default name length.
    pub const DEFAULT_MAX_NAME_LEN: usize = 31;
    /// Default array byte budget: signed 32-bit address arithmetic.
    pub const DEFAULT_MAX_ARRAY_BYTES: usize = i32::MAX as usize;
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_try_depth: Self::DEFAULT_MAX_TRY_DEPTH,
            max_error_message: Self::DEFAULT_MAX_ERROR_MESSAGE,
            max_machines: Self::DEFAULT_MAX_MACHINES,
            max_states: Self::DEFAULT_MAX_STATES,
            max_transitions: Self::DEFAULT_MAX_TRANSITIONS,
            max_name_len: Self::DEFAULT_MAX_NAME_LEN,
            max_array_bytes: Self::DEFAULT_MAX_ARRAY_BYTES,
        }
    }
}
