// Copyright 2026 the Basic Runtime Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fatal runtime errors.

use alloc::string::String;

/// A fatal runtime error.
///
/// Every variant is unrecoverable from inside the core: [`Runtime`](crate::Runtime) hands it to its
/// [`FatalHandler`](crate::FatalHandler), which ends the process or restarts the device.
/// Components return it as a plain `Result` error so that embedders and tests can observe it.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RuntimeError {
    /// A declared array axis was negative.
    #[error("negative array dimension {value} for dimension {dim_index}")]
    NegativeDimension {
        /// Declared upper bound.
        value: i64,
        /// 1-based axis number.
        dim_index: u32,
    },
    /// Array element size was zero or negative.
    #[error("invalid array element size {0}")]
    InvalidElementSize(i64),
    /// Array element count was zero or negative.
    #[error("invalid array element count {0}")]
    InvalidElementCount(i64),
    /// `element_size * total_elements` overflowed the address budget.
    #[error("array total size overflow")]
    ArraySizeOverflow,
    /// An element access was outside `0..size`.
    #[error("array index out of bounds: index {index}, size {size}")]
    IndexOutOfBounds {
        /// Requested index.
        index: i64,
        /// Array length.
        size: i64,
    },
    /// `READ` past the end of the DATA pool.
    #[error("Out of DATA")]
    OutOfData,
    /// A numeric `READ` hit a string literal.
    #[error("Type mismatch in READ: expected number, got string")]
    DataTypeMismatch,
    /// Too many nested `TRY` regions.
    #[error("TRY/CATCH nested too deep (limit {limit})")]
    TryTooDeep {
        /// Configured maximum depth.
        limit: usize,
    },
    /// `THROW` with no active `TRY` region.
    #[error("Unhandled error: {0}")]
    UnhandledThrow(String),
    /// An `ASSERT` statement failed.
    #[error("ASSERT FAILED: {0}")]
    AssertionFailed(String),
    /// An `ASSERT` statement without a message failed at a program offset.
    #[error("ASSERT FAILED at offset {0}")]
    AssertionFailedAt(i32),
}
