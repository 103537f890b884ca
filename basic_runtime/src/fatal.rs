// Copyright 2026 the Basic Runtime Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! What happens when the runtime hits a fatal error.
//!
//! The core never recovers from a [`RuntimeError`]. [`Runtime`](crate::Runtime) logs it and
//! passes it to a [`FatalHandler`], which must not return: a host build prints a diagnostic and
//! exits ([`HostExit`]), a device build logs and restarts (usually a [`FatalHook`] around the
//! platform's reset call), and tests panic ([`PanicOnFatal`]).

use core::convert::Infallible;
use core::fmt;

use crate::error::RuntimeError;

/// Diverging sink for fatal runtime errors.
pub trait FatalHandler {
    /// Ends the program. Called at most once per runtime.
    fn fatal(&mut self, error: &RuntimeError) -> !;
}

/// Panics with `RUNTIME ERROR: <message>`.
#[derive(Copy, Clone, Debug, Default)]
pub struct PanicOnFatal;

impl FatalHandler for PanicOnFatal {
    fn fatal(&mut self, error: &RuntimeError) -> ! {
        panic!("RUNTIME ERROR: {error}")
    }
}

/// Delegates to a closure that never returns, e.g. one that logs and resets the device.
///
/// The closure returns [`Infallible`], so it cannot return normally.
pub struct FatalHook<F>(pub F);

impl<F> FatalHandler for FatalHook<F>
where
    F: FnMut(&RuntimeError) -> Infallible,
{
    fn fatal(&mut self, error: &RuntimeError) -> ! {
        match (self.0)(error) {}
    }
}

impl<F> fmt::Debug for FatalHook<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FatalHook").finish_non_exhaustive()
    }
}

/// Host behavior: prints `RUNTIME ERROR: <message>` to stderr and exits with status 1.
#[cfg(feature = "std")]
#[derive(Copy, Clone, Debug, Default)]
pub struct HostExit;

#[cfg(feature = "std")]
impl FatalHandler for HostExit {
    fn fatal(&mut self, error: &RuntimeError) -> ! {
        std::eprintln!("RUNTIME ERROR: {error}");
        std::process::exit(1)
    }
}
