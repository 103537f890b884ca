// Copyright 2026 the Basic Runtime Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Runtime core for compiled BASIC programs.
//!
//! Generated programs call into this crate for the primitives that cannot be expressed as plain
//! hardware calls:
//!
//! - [`string`]: immutable, shared byte strings and the derived string functions
//!   ([`string_funcs`], [`number_text`]).
//! - [`array`]: validated, bounds-checked dynamic arrays.
//! - [`data`]: the `DATA`/`READ`/`RESTORE` constant pool and its cursor.
//! - [`try_stack`]: `TRY`/`CATCH` as an explicit handler stack plus a propagated [`Raise`] value.
//! - [`machine`]: a small fixed-capacity registry of named finite-state machines.
//!
//! [`Runtime`] bundles the per-program state (cursor, try stack, machines, [`Limits`]) and escalates
//! fatal [`RuntimeError`]s through a [`FatalHandler`].
//!
//! The crate is `no_std + alloc`. The `std` feature adds the host exit handler and the callback
//! [`events`] queue.
//!
//! ## Example
//! ```
//! use basic_runtime::data::{DataEntry, DataTable};
//! use basic_runtime::{Limits, PanicOnFatal, Runtime};
//!
//! let table = DataTable::new(vec![DataEntry::Int(3), DataEntry::from("three")]);
//! let mut rt = Runtime::new(table, Limits::default(), PanicOnFatal);
//! assert_eq!(rt.read_int(), 3);
//! assert_eq!(rt.read_string().as_bytes(), b"three");
//! ```

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod array;
pub mod data;
mod error;
#[cfg(feature = "std")]
pub mod events;
pub mod fatal;
mod limits;
pub mod machine;
pub mod number_text;
pub mod runtime;
pub mod string;
pub mod string_funcs;
pub mod trace;
pub mod try_stack;

pub use error::RuntimeError;
#[cfg(feature = "std")]
pub use fatal::HostExit;
pub use fatal::{FatalHandler, FatalHook, PanicOnFatal};
pub use limits::Limits;
pub use runtime::Runtime;
pub use string::BasicString;
pub use try_stack::{Raise, TryOutcome};
