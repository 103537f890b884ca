// Copyright 2026 the Basic Runtime Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Profiling adapters for `basic_runtime` (currently Tracy).
//!
//! This crate is `std`-only and keeps `basic_runtime` itself free of profiling dependencies.
//! It observes `TRY` frame pushes and pops and opens one profiling zone per active frame.
//!
//! ## Example
//! ```no_run
//! use basic_runtime::data::DataTable;
//! use basic_runtime::{Limits, PanicOnFatal, Runtime};
//! use basic_runtime_profiling::ProfilingTrySink;
//!
//! let _client = tracy_client::Client::start();
//! let mut rt = Runtime::new(DataTable::default(), Limits::default(), PanicOnFatal);
//! rt.try_stack_mut().set_sink(Box::new(ProfilingTrySink::new()));
//! ```

mod resolver;
mod sink;

pub use resolver::{DefaultLabelResolver, LabelResolver};
pub use sink::ProfilingTrySink;
