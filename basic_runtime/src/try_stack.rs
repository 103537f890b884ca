// Copyright 2026 the Basic Runtime Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `TRY`/`CATCH` as an explicit handler stack.
//!
//! Entering a `TRY` region pushes a [`TryFrame`] marker. Code inside the region returns
//! `Result<_, Raise>` and propagates failures with `?`. [`ExceptionStack::throw`] pops the
//! innermost frame, records the message, and produces a [`Raise::Thrown`] aimed at that frame;
//! when the region's result reaches [`ExceptionStack::settle`], the matching frame turns it into
//! [`TryOutcome::ResumedFromThrow`]. Every region in between simply returns early, so the inner
//! regions are abandoned rather than unwound one handler at a time. Resources acquired inside an
//! abandoned region are dropped by ordinary Rust scoping, not by the stack.
//!
//! A throw with no active frame is fatal ([`RuntimeError::UnhandledThrow`]), as is nesting more
//! than [`Limits::max_try_depth`] regions. Fatal errors travel as [`Raise::Fatal`] and are never
//! caught by a frame.
//!
//! The stack is neither `Send` nor `Sync`: a throw must resume on the call stack that pushed the
//! frame, so each thread or task owns its own stack.

use alloc::borrow::ToOwned;
use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::marker::PhantomData;

use crate::error::RuntimeError;
use crate::limits::Limits;
use crate::string::{BasicString, bytes_of};
use crate::trace::{FrameExit, TrySink};

/// Message stored for a throw without text.
pub const DEFAULT_ERROR_MESSAGE: &str = "Unknown error";

/// Marker for one active `TRY` region, returned by [`ExceptionStack::try_begin`].
///
/// Hand it back to [`ExceptionStack::settle`] together with the region's result.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a TRY frame must be settled"]
pub struct TryFrame {
    depth: usize,
    serial: u64,
}

impl TryFrame {
    /// 0-based stack position of this frame.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }
}

/// A thrown error travelling towards the frame it was aimed at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Thrown {
    depth: usize,
    serial: u64,
}

/// Failure value propagated out of code running inside `TRY` regions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Raise {
    /// A catchable `THROW`.
    Thrown(Thrown),
    /// A fatal runtime error; no frame catches it.
    Fatal(RuntimeError),
}

impl From<RuntimeError> for Raise {
    fn from(err: RuntimeError) -> Self {
        Self::Fatal(err)
    }
}

impl fmt::Display for Raise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Thrown(t) => write!(f, "thrown to TRY frame {}", t.depth),
            Self::Fatal(err) => write!(f, "{err}"),
        }
    }
}

impl core::error::Error for Raise {}

/// Which way control came out of a settled `TRY` region.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TryOutcome<T> {
    /// The body completed normally and produced a value.
    Completed(T),
    /// A throw inside the body resumed at this region's `CATCH`.
    ResumedFromThrow,
}

/// Per-thread stack of active `TRY` frames plus the last caught error message.
pub struct ExceptionStack {
    frames: Vec<u64>,
    next_serial: u64,
    max_depth: usize,
    max_message: usize,
    message: BasicString,
    sink: Option<Box<dyn TrySink>>,
    _not_send: PhantomData<*const ()>,
}

impl ExceptionStack {
    /// Creates an empty stack using the `TRY` limits from `limits`.
    #[must_use]
    pub fn new(limits: &Limits) -> Self {
        Self {
            frames: Vec::with_capacity(limits.max_try_depth),
            next_serial: 0,
            max_depth: limits.max_try_depth,
            max_message: limits.max_error_message,
            message: BasicString::empty(),
            sink: None,
            _not_send: PhantomData,
        }
    }

    /// Installs a sink that observes frame pushes and pops.
    pub fn set_sink(&mut self, sink: Box<dyn TrySink>) {
        self.sink = Some(sink);
    }

    /// Removes and returns the installed sink.
    pub fn take_sink(&mut self) -> Option<Box<dyn TrySink>> {
        self.sink.take()
    }

    /// Number of active frames.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Enters a `TRY` region.
    pub fn try_begin(&mut self) -> Result<TryFrame, RuntimeError> {
        if self.frames.len() >= self.max_depth {
            return Err(RuntimeError::TryTooDeep {
                limit: self.max_depth,
            });
        }
        let serial = self.next_serial;
        self.next_serial += 1;
        let depth = self.frames.len();
        self.frames.push(serial);
        tracing::trace!(depth, "TRY frame entered");
        if let Some(sink) = self.sink.as_mut() {
            sink.frame_enter(depth);
        }
        Ok(TryFrame { depth, serial })
    }

    /// Leaves the innermost region normally. Does nothing on an empty stack.
    pub fn try_end(&mut self) {
        if self.frames.pop().is_some() {
            self.notify_exit(self.frames.len(), FrameExit::Completed);
        }
    }

    /// Throws `message` to the innermost active region.
    ///
    /// The message is truncated to [`Limits::max_error_message`] bytes; an absent or empty one is
    /// replaced by [`DEFAULT_ERROR_MESSAGE`]. With no active region the result is
    /// [`Raise::Fatal`].
    pub fn throw(&mut self, message: Option<&BasicString>) -> Raise {
        let text = bytes_of(message);
        let Some(serial) = self.frames.pop() else {
            let shown = if text.is_empty() {
                DEFAULT_ERROR_MESSAGE.to_owned()
            } else {
                String::from_utf8_lossy(text).into_owned()
            };
            return Raise::Fatal(RuntimeError::UnhandledThrow(shown));
        };
        let depth = self.frames.len();
        self.message = if text.is_empty() {
            BasicString::from(DEFAULT_ERROR_MESSAGE)
        } else {
            BasicString::alloc(&text[..text.len().min(self.max_message)])
        };
        tracing::debug!(depth, message = %self.message, "THROW caught by TRY frame");
        self.notify_exit(depth, FrameExit::Thrown);
        Raise::Thrown(Thrown { depth, serial })
    }

    /// Settles `frame` with the result of its body.
    ///
    /// - `Ok(value)`: pops back below `frame` and yields [`TryOutcome::Completed`].
    /// - A throw aimed at `frame`: yields [`TryOutcome::ResumedFromThrow`]; the frame was already
    ///   popped by [`throw`](Self::throw).
    /// - Anything else keeps propagating to the enclosing region.
    pub fn settle<T>(
        &mut self,
        frame: TryFrame,
        result: Result<T, Raise>,
    ) -> Result<TryOutcome<T>, Raise> {
        match result {
            Ok(value) => {
                self.unwind_to(frame.depth);
                Ok(TryOutcome::Completed(value))
            }
            Err(Raise::Thrown(thrown))
                if thrown.depth == frame.depth && thrown.serial == frame.serial =>
            {
                Ok(TryOutcome::ResumedFromThrow)
            }
            Err(raise) => Err(raise),
        }
    }

    /// Runs `body` in a new region, running `handler` with the error message if it throws.
    pub fn try_catch<T, B, H>(&mut self, body: B, handler: H) -> Result<T, Raise>
    where
        B: FnOnce(&mut Self) -> Result<T, Raise>,
        H: FnOnce(&mut Self, BasicString) -> Result<T, Raise>,
    {
        let frame = self.try_begin()?;
        let result = body(self);
        match self.settle(frame, result)? {
            TryOutcome::Completed(value) => Ok(value),
            TryOutcome::ResumedFromThrow => {
                let message = self.error_message();
                handler(self, message)
            }
        }
    }

    /// The most recently caught error message; empty before the first throw.
    #[must_use]
    pub fn error_message(&self) -> BasicString {
        self.message.clone()
    }

    fn unwind_to(&mut self, depth: usize) {
        while self.frames.len() > depth {
            self.frames.pop();
            let popped = self.frames.len();
            let exit = if popped == depth {
                FrameExit::Completed
            } else {
                FrameExit::Abandoned
            };
            self.notify_exit(popped, exit);
        }
    }

    fn notify_exit(&mut self, depth: usize, exit: FrameExit) {
        if let Some(sink) = self.sink.as_mut() {
            sink.frame_exit(depth, exit);
        }
    }
}

impl fmt::Debug for ExceptionStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExceptionStack")
            .field("depth", &self.frames.len())
            .field("max_depth", &self.max_depth)
            .field("message", &self.message)
            .field("has_sink", &self.sink.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::rc::Rc;
    use alloc::vec;
    use core::cell::RefCell;

    use super::*;

    fn stack() -> ExceptionStack {
        ExceptionStack::new(&Limits::default())
    }

    #[test]
    fn completed_body_restores_depth() {
        let mut s = stack();
        let out = s.try_catch(|s| Ok(s.depth()), |_, _| Ok(usize::MAX));
        assert_eq!(out, Ok(1));
        assert_eq!(s.depth(), 0);
    }

    #[test]
    fn throw_resumes_at_catch_with_message() {
        let mut s = stack();
        let frame = s.try_begin().unwrap();
        assert_eq!(s.depth(), 1);
        let raise = s.throw(Some(&BasicString::from("boom")));
        assert_eq!(s.depth(), 0);
        assert_eq!(s.settle::<()>(frame, Err(raise)), Ok(TryOutcome::ResumedFromThrow));
        assert_eq!(s.error_message().as_bytes(), b"boom");
    }

    #[test]
    fn empty_message_uses_default() {
        let mut s = stack();
        let caught = s.try_catch(
            |s| Err::<(), _>(s.throw(None)),
            |_, msg| {
                assert_eq!(msg.as_bytes(), DEFAULT_ERROR_MESSAGE.as_bytes());
                Ok(())
            },
        );
        assert_eq!(caught, Ok(()));
    }

    #[test]
    fn long_messages_are_truncated() {
        let mut s = stack();
        let long = BasicString::from_vec(vec![b'x'; 400]);
        let frame = s.try_begin().unwrap();
        let raise = s.throw(Some(&long));
        let _ = s.settle::<()>(frame, Err(raise));
        assert_eq!(s.error_message().len(), Limits::DEFAULT_MAX_ERROR_MESSAGE);
    }

    #[test]
    fn throw_without_frame_is_fatal() {
        let mut s = stack();
        assert_eq!(
            s.throw(Some(&BasicString::from("lost"))),
            Raise::Fatal(RuntimeError::UnhandledThrow("lost".into()))
        );
    }

    #[test]
    fn seventeenth_frame_is_too_deep() {
        let mut s = stack();
        let frames: Vec<_> = (0..16).map(|_| s.try_begin().unwrap()).collect();
        assert_eq!(frames.len(), 16);
        assert_eq!(
            s.try_begin(),
            Err(RuntimeError::TryTooDeep { limit: 16 })
        );
    }

    #[test]
    fn inner_throw_is_caught_by_inner_region_only() {
        let mut s = stack();
        let out = s.try_catch(
            |s| {
                let inner = s.try_catch(
                    |s| Err::<i32, _>(s.throw(Some(&BasicString::from("inner")))),
                    |_, _| Ok(1),
                )?;
                Ok(inner + 10)
            },
            |_, _| Ok(-1),
        );
        assert_eq!(out, Ok(11));
        assert_eq!(s.depth(), 0);
    }

    #[test]
    fn throw_from_handler_reaches_outer_region() {
        let mut s = stack();
        let out = s.try_catch(
            |s| {
                s.try_catch(
                    |s| Err::<i32, _>(s.throw(Some(&BasicString::from("first")))),
                    |s, _| Err(s.throw(Some(&BasicString::from("second")))),
                )
            },
            |_, msg| {
                assert_eq!(msg.as_bytes(), b"second");
                Ok(2)
            },
        );
        assert_eq!(out, Ok(2));
        assert_eq!(s.depth(), 0);
    }

    #[test]
    fn fatal_errors_pass_through_frames() {
        let mut s = stack();
        let out: Result<(), Raise> = s.try_catch(
            |_| Err(RuntimeError::OutOfData.into()),
            |_, _| Ok(()),
        );
        assert_eq!(out, Err(Raise::Fatal(RuntimeError::OutOfData)));
    }

    #[test]
    fn try_end_on_empty_stack_is_noop() {
        let mut s = stack();
        s.try_end();
        assert_eq!(s.depth(), 0);
    }

    #[derive(Default)]
    struct Recorder(Rc<RefCell<Vec<(usize, Option<FrameExit>)>>>);

    impl TrySink for Recorder {
        fn frame_enter(&mut self, depth: usize) {
            self.0.borrow_mut().push((depth, None));
        }

        fn frame_exit(&mut self, depth: usize, exit: FrameExit) {
            self.0.borrow_mut().push((depth, Some(exit)));
        }
    }

    #[test]
    fn sink_sees_abandoned_inner_frames() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut s = stack();
        s.set_sink(Box::new(Recorder(Rc::clone(&log))));

        let outer = s.try_begin().unwrap();
        // An inner region left open by its body is dropped when the outer one completes.
        let _inner = s.try_begin().unwrap();
        assert_eq!(s.settle(outer, Ok(())), Ok(TryOutcome::Completed(())));

        assert_eq!(
            *log.borrow(),
            vec![
                (0, None),
                (1, None),
                (1, Some(FrameExit::Abandoned)),
                (0, Some(FrameExit::Completed)),
            ]
        );
    }
}
