// Copyright 2026 the Basic Runtime Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Derived string functions (`LEN`, `MID$`, `UCASE$`, `STR$`, …).
//!
//! Every function returns a freshly allocated [`BasicString`] and leaves its inputs untouched.
//! Positions at this boundary are 1-based; out-of-range lengths clamp to the source, and a fully
//! out-of-range request yields the empty string rather than an error.

use alloc::vec;

use crate::number_text::{format_g, is_c_space, parse_leading_float};
use crate::string::{BasicString, bytes_of};

/// `LEN(s$)`.
#[must_use]
pub fn len(s: Option<&BasicString>) -> i32 {
    i32::try_from(bytes_of(s).len()).unwrap_or(i32::MAX)
}

/// `ASC(s$)`: the first byte, or `0` for an empty string.
#[must_use]
pub fn asc(s: Option<&BasicString>) -> i32 {
    bytes_of(s).first().copied().map_or(0, i32::from)
}

/// `CHR$(n)`: a one-byte string holding the low 8 bits of `code`.
#[must_use]
pub fn chr(code: i32) -> BasicString {
    BasicString::alloc(&[code.to_le_bytes()[0]])
}

/// `LEFT$(s$, n)`.
#[must_use]
pub fn left(s: Option<&BasicString>, n: i32) -> BasicString {
    let bytes = bytes_of(s);
    let n = clamp_count(n, bytes.len());
    BasicString::alloc(&bytes[..n])
}

/// `RIGHT$(s$, n)`.
#[must_use]
pub fn right(s: Option<&BasicString>, n: i32) -> BasicString {
    let bytes = bytes_of(s);
    let n = clamp_count(n, bytes.len());
    BasicString::alloc(&bytes[bytes.len() - n..])
}

/// `MID$(s$, start, len)` with a 1-based `start`.
#[must_use]
pub fn mid(s: Option<&BasicString>, start: i32, len: i32) -> BasicString {
    let bytes = bytes_of(s);
    if start < 1 || len <= 0 {
        return BasicString::empty();
    }
    let Ok(idx) = usize::try_from(start - 1) else {
        return BasicString::empty();
    };
    if idx >= bytes.len() {
        return BasicString::empty();
    }
    let n = clamp_count(len, bytes.len() - idx);
    BasicString::alloc(&bytes[idx..idx + n])
}

/// `INSTR(s$, find$)`: 1-based position of the first occurrence, `0` if not found.
///
/// An empty needle is found at position 1, even in an empty haystack.
#[must_use]
pub fn instr(s: Option<&BasicString>, find: Option<&BasicString>) -> i32 {
    let (Some(s), Some(find)) = (s, find) else {
        return 0;
    };
    let (hay, needle) = (s.as_bytes(), find.as_bytes());
    if needle.is_empty() {
        return 1;
    }
    hay.windows(needle.len())
        .position(|w| w == needle)
        .and_then(|p| i32::try_from(p + 1).ok())
        .unwrap_or(0)
}

/// `UCASE$(s$)`: ASCII upper-casing.
#[must_use]
pub fn ucase(s: Option<&BasicString>) -> BasicString {
    BasicString::from_vec(bytes_of(s).to_ascii_uppercase())
}

/// `LCASE$(s$)`: ASCII lower-casing.
#[must_use]
pub fn lcase(s: Option<&BasicString>) -> BasicString {
    BasicString::from_vec(bytes_of(s).to_ascii_lowercase())
}

/// `TRIM$(s$)`: strips leading and trailing whitespace.
#[must_use]
pub fn trim(s: Option<&BasicString>) -> BasicString {
    let bytes = bytes_of(s);
    let Some(first) = bytes.iter().position(|&b| !is_c_space(b)) else {
        return BasicString::empty();
    };
    let last = bytes.iter().rposition(|&b| !is_c_space(b)).unwrap_or(first);
    BasicString::alloc(&bytes[first..=last])
}

/// `STRING$(n, code)`: `n` copies of one byte.
#[must_use]
pub fn repeat_byte(n: i32, code: i32) -> BasicString {
    let n = usize::try_from(n).unwrap_or(0);
    BasicString::from_vec(vec![code.to_le_bytes()[0]; n])
}

/// `SPACE$(n)`.
#[must_use]
pub fn space(n: i32) -> BasicString {
    repeat_byte(n, i32::from(b' '))
}

/// `STR$(x)`: `%g` text of a single-precision number.
#[must_use]
pub fn str_of(value: f32) -> BasicString {
    BasicString::from(format_g(f64::from(value)).as_str())
}

/// `VAL(s$)`: leading numeric prefix of `s`, `0` when there is none.
#[must_use]
#[expect(
    clippy::cast_possible_truncation,
    reason = "BASIC floats are single precision"
)]
pub fn val(s: Option<&BasicString>) -> f32 {
    parse_leading_float(bytes_of(s)) as f32
}

fn clamp_count(n: i32, available: usize) -> usize {
    usize::try_from(n).map_or(0, |n| n.min(available))
}
