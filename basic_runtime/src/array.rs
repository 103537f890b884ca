// Copyright 2026 the Basic Runtime Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Validated dynamic arrays.
//!
//! Arrays are exclusively owned by the scope that declared them: no sharing, no counting. The
//! three validation points are separate functions so they can be exercised on their own:
//!
//! 1. [`check_dimension`] for each declared axis bound,
//! 2. [`ArrayLayout::new`] for the element size / element count product,
//! 3. [`bounds_check`] for every element access.
//!
//! [`BasicArray`] runs 2 on creation and 3 on every `get`/`set`; there is no unchecked path.
//! Dimensions are fixed at creation, and [`BasicArray::free`] consumes the array so that a freed
//! array cannot be touched again.

use alloc::vec;
use alloc::vec::Vec;
use core::mem;

use crate::error::RuntimeError;
use crate::limits::Limits;

/// Rejects a negative declared bound for the 1-based axis `dim_index`.
pub fn check_dimension(dim_value: i64, dim_index: u32) -> Result<(), RuntimeError> {
    if dim_value < 0 {
        return Err(RuntimeError::NegativeDimension {
            value: dim_value,
            dim_index,
        });
    }
    Ok(())
}

/// Checks `0 <= index < size` and returns the index as a `usize`.
pub fn bounds_check(index: i64, size: i64) -> Result<usize, RuntimeError> {
    if index < 0 || index >= size {
        return Err(RuntimeError::IndexOutOfBounds { index, size });
    }
    usize::try_from(index).map_err(|_| RuntimeError::IndexOutOfBounds { index, size })
}

/// A validated `element_size × len` allocation request.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ArrayLayout {
    element_size: usize,
    len: usize,
    byte_len: usize,
}

impl ArrayLayout {
    /// Validates an allocation of `total_elements` elements of `element_size` bytes.
    ///
    /// Both operands must be positive, and the byte size must neither overflow nor exceed
    /// [`Limits::max_array_bytes`]. A wrapped product would otherwise look like a small, valid
    /// allocation and defeat later bounds checks.
    pub fn new(
        element_size: i64,
        total_elements: i64,
        limits: &Limits,
    ) -> Result<Self, RuntimeError> {
        if total_elements <= 0 {
            return Err(RuntimeError::InvalidElementCount(total_elements));
        }
        if element_size <= 0 {
            return Err(RuntimeError::InvalidElementSize(element_size));
        }
        let element_size_u =
            usize::try_from(element_size).map_err(|_| RuntimeError::ArraySizeOverflow)?;
        let len = usize::try_from(total_elements).map_err(|_| RuntimeError::ArraySizeOverflow)?;
        let byte_len = element_size_u
            .checked_mul(len)
            .filter(|&bytes| bytes <= limits.max_array_bytes)
            .ok_or(RuntimeError::ArraySizeOverflow)?;
        Ok(Self {
            element_size: element_size_u,
            len,
            byte_len,
        })
    }

    /// Bytes per element.
    #[must_use]
    pub fn element_size(&self) -> usize {
        self.element_size
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always `false`: a valid layout holds at least one element.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Total size in bytes.
    #[must_use]
    pub fn byte_len(&self) -> usize {
        self.byte_len
    }
}

/// Axis sizes of a `DIM a(n0, n1, …)` declaration.
///
/// BASIC bounds are inclusive, so an axis declared as `n` has `n + 1` slots. Elements are laid
/// out row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArrayShape {
    sizes: Vec<i64>,
    total: i64,
}

impl ArrayShape {
    /// Builds a shape from declared upper bounds, checking each axis and the total product.
    pub fn from_bounds(bounds: &[i64]) -> Result<Self, RuntimeError> {
        let mut sizes = Vec::with_capacity(bounds.len());
        let mut total: i64 = 1;
        for (axis, &bound) in bounds.iter().enumerate() {
            check_dimension(bound, u32::try_from(axis + 1).unwrap_or(u32::MAX))?;
            let size = bound.checked_add(1).ok_or(RuntimeError::ArraySizeOverflow)?;
            total = total
                .checked_mul(size)
                .ok_or(RuntimeError::ArraySizeOverflow)?;
            sizes.push(size);
        }
        if bounds.is_empty() {
            return Err(RuntimeError::InvalidElementCount(0));
        }
        Ok(Self { sizes, total })
    }

    /// Number of axes.
    #[must_use]
    pub fn rank(&self) -> usize {
        self.sizes.len()
    }

    /// Total number of elements.
    #[must_use]
    pub fn total(&self) -> i64 {
        self.total
    }

    /// Row-major linear index of `indices`, bounds-checked against [`total`](Self::total).
    ///
    /// Only the linear index is checked, so an out-of-range inner subscript that still lands
    /// inside the array is accepted, exactly like a hand-linearized access.
    pub fn linear_index(&self, indices: &[i64]) -> Result<usize, RuntimeError> {
        let out_of_bounds = |index| RuntimeError::IndexOutOfBounds {
            index,
            size: self.total,
        };
        let Some((&first, rest)) = indices.split_first() else {
            return Err(out_of_bounds(-1));
        };
        if indices.len() != self.sizes.len() {
            return Err(out_of_bounds(first));
        }
        let mut linear = first;
        for (&idx, &size) in rest.iter().zip(&self.sizes[1..]) {
            linear = linear
                .checked_mul(size)
                .and_then(|l| l.checked_add(idx))
                .ok_or_else(|| out_of_bounds(i64::MAX))?;
        }
        bounds_check(linear, self.total)
    }
}

/// A fixed-size, default-initialized array of `T`.
#[derive(Clone, Debug, PartialEq)]
pub struct BasicArray<T> {
    data: Vec<T>,
}

impl<T: Clone + Default> BasicArray<T> {
    /// Allocates `total_elements` default (zero) values.
    pub fn new(total_elements: i64, limits: &Limits) -> Result<Self, RuntimeError> {
        let element_size = i64::try_from(size_of::<T>()).unwrap_or(i64::MAX);
        let layout = ArrayLayout::new(element_size, total_elements, limits)?;
        tracing::trace!(
            elements = layout.len(),
            bytes = layout.byte_len(),
            "array allocated"
        );
        Ok(Self {
            data: vec![T::default(); layout.len()],
        })
    }

    /// Allocates storage for every element of `shape`.
    pub fn with_shape(shape: &ArrayShape, limits: &Limits) -> Result<Self, RuntimeError> {
        Self::new(shape.total(), limits)
    }
}

impl<T> BasicArray<T> {
    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always `false` for an allocated array.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Reads element `index`.
    pub fn get(&self, index: i64) -> Result<&T, RuntimeError> {
        let i = bounds_check(index, self.size())?;
        Ok(&self.data[i])
    }

    /// Overwrites element `index`, returning the previous value.
    pub fn set(&mut self, index: i64, value: T) -> Result<T, RuntimeError> {
        let i = bounds_check(index, self.size())?;
        Ok(mem::replace(&mut self.data[i], value))
    }

    /// Releases the storage.
    pub fn free(self) {
        drop(self);
    }

    fn size(&self) -> i64 {
        i64::try_from(self.data.len()).unwrap_or(i64::MAX)
    }
}
