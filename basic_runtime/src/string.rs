// Copyright 2026 the Basic Runtime Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Immutable shared byte strings.
//!
//! A [`BasicString`] is an `Arc<[u8]>`: every holder owns one count, retaining clones a holder
//! and releasing drops one. Storage is freed exactly when the last holder goes away, and a
//! released holder is moved out, so it can never be read again.
//!
//! Strings carry an explicit length and may contain NUL bytes. Operations that take "absent"
//! operands (`Option<&BasicString>`) treat `None` as the empty string.

use alloc::sync::{Arc, Weak};
use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt;

/// An immutable, reference-counted byte string.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BasicString(Arc<[u8]>);

impl BasicString {
    /// Copies `bytes` into a new string with a single holder.
    #[must_use]
    pub fn alloc(bytes: &[u8]) -> Self {
        Self(Arc::from(bytes))
    }

    /// Returns the empty string.
    #[must_use]
    pub fn empty() -> Self {
        Self::alloc(&[])
    }

    /// Takes ownership of an already built buffer.
    #[must_use]
    pub fn from_vec(bytes: Vec<u8>) -> Self {
        Self(Arc::from(bytes))
    }

    /// Returns the string contents.
    #[must_use]
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the length in bytes.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the string has no bytes.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of live holders of this value.
    #[must_use]
    pub fn holders(&self) -> usize {
        Arc::strong_count(&self.0)
    }

    /// Returns an observer that reports whether this value's storage is still alive.
    #[must_use]
    pub fn watch(&self) -> StringWatch {
        StringWatch(Arc::downgrade(&self.0))
    }

    /// Returns `true` if `self` and `other` share the same storage.
    #[must_use]
    pub fn shares_storage(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// A non-owning observer of a [`BasicString`]'s storage.
#[derive(Clone, Debug)]
pub struct StringWatch(Weak<[u8]>);

impl StringWatch {
    /// Returns `true` while at least one holder of the observed value exists.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.0.strong_count() > 0
    }
}

/// Adds a holder to `s`. Returns `None` for an absent value.
#[must_use]
pub fn retain(s: Option<&BasicString>) -> Option<BasicString> {
    s.cloned()
}

/// Gives up one holder. Storage is destroyed when this was the last one.
pub fn release(s: Option<BasicString>) {
    drop(s);
}

/// Concatenates two strings into a new value; absent operands are empty.
#[must_use]
pub fn concat(a: Option<&BasicString>, b: Option<&BasicString>) -> BasicString {
    let a = bytes_of(a);
    let b = bytes_of(b);
    let mut out = Vec::with_capacity(a.len() + b.len());
    out.extend_from_slice(a);
    out.extend_from_slice(b);
    BasicString::from_vec(out)
}

/// Byte-wise lexicographic comparison returning `-1`, `0` or `1`; absent operands are empty.
#[must_use]
pub fn compare(a: Option<&BasicString>, b: Option<&BasicString>) -> i32 {
    match bytes_of(a).cmp(bytes_of(b)) {
        Ordering::Less => -1,
        Ordering::Equal => 0,
        Ordering::Greater => 1,
    }
}

#[inline]
pub(crate) fn bytes_of(s: Option<&BasicString>) -> &[u8] {
    match s {
        Some(s) => s.as_bytes(),
        None => &[],
    }
}

impl From<&str> for BasicString {
    fn from(s: &str) -> Self {
        Self::alloc(s.as_bytes())
    }
}

impl From<&[u8]> for BasicString {
    fn from(bytes: &[u8]) -> Self {
        Self::alloc(bytes)
    }
}

impl Default for BasicString {
    fn default() -> Self {
        Self::empty()
    }
}

impl AsRef<[u8]> for BasicString {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl fmt::Debug for BasicString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", self.0.escape_ascii())
    }
}

impl fmt::Display for BasicString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.escape_ascii())
    }
}
