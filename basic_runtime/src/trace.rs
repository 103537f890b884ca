// Copyright 2026 the Basic Runtime Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Optional observation hooks for `TRY` regions.
//!
//! Profilers and debuggers implement [`TrySink`] and install it with
//! [`ExceptionStack::set_sink`](crate::try_stack::ExceptionStack::set_sink). The stack reports every
//! frame push and pop; nothing is reported when no sink is installed.

/// How a `TRY` frame left the stack.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FrameExit {
    /// The body ran to completion.
    Completed,
    /// A `THROW` resumed execution at this frame's `CATCH`.
    Thrown,
    /// The frame was dropped because an enclosing frame settled first.
    Abandoned,
}

/// Receiver for `TRY` frame notifications.
///
/// `depth` is the 0-based position of the frame on the stack (the outermost frame is `0`).
/// Notifications for nested frames are strictly LIFO.
pub trait TrySink {
    /// A frame was pushed.
    fn frame_enter(&mut self, depth: usize);

    /// A frame was popped.
    fn frame_exit(&mut self, depth: usize, exit: FrameExit);
}
