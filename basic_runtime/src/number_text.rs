// Copyright 2026 the Basic Runtime Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Numeric ↔ text conversions used by `STR$`, `VAL` and string `READ`s.
//!
//! Formatting follows C's `%g` with the default precision of six significant digits, which is
//! what compiled programs print. Parsing follows `atof`: the longest decimal prefix wins and
//! anything unparsable reads as zero.

use alloc::format;
use alloc::string::String;

/// Significant digits used by `%g`.
const PRECISION: i32 = 6;

/// Formats `value` like C's `printf("%g", value)`.
#[must_use]
pub fn format_g(value: f64) -> String {
    if value.is_nan() {
        return "nan".into();
    }
    if value.is_infinite() {
        return if value < 0.0 { "-inf".into() } else { "inf".into() };
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0".into() } else { "0".into() };
    }

    // The exponent after rounding to PRECISION significant digits picks the notation.
    let sci = format!("{value:.5e}");
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return sci;
    };
    let exp: i32 = exp.parse().unwrap_or(0);

    if exp < -4 || exp >= PRECISION {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{sign}{:02}", strip_fraction_zeros(mantissa), exp.unsigned_abs())
    } else {
        let decimals = usize::try_from(PRECISION - 1 - exp).unwrap_or(0);
        let fixed = format!("{value:.decimals$}");
        strip_fraction_zeros(&fixed).into()
    }
}

fn strip_fraction_zeros(s: &str) -> &str {
    if !s.contains('.') {
        return s;
    }
    s.trim_end_matches('0').trim_end_matches('.')
}

/// Parses the longest leading decimal number in `bytes`, like C's `atof`.
///
/// Leading C whitespace is skipped. Returns `0.0` when there is no numeric prefix.
#[must_use]
pub fn parse_leading_float(bytes: &[u8]) -> f64 {
    let start = bytes
        .iter()
        .position(|&b| !is_c_space(b))
        .unwrap_or(bytes.len());
    let rest = &bytes[start..];

    let mut end = 0;
    if matches!(rest.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_digits = count_digits(&rest[end..]);
    end += int_digits;
    let mut frac_digits = 0;
    if rest.get(end) == Some(&b'.') {
        frac_digits = count_digits(&rest[end + 1..]);
        end += 1 + frac_digits;
    }
    if int_digits + frac_digits == 0 {
        return 0.0;
    }
    if matches!(rest.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(rest.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&rest[exp_end..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    core::str::from_utf8(&rest[..end])
        .ok()
        .and_then(|s| s.parse::<f64>().ok())
        .unwrap_or(0.0)
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Whitespace as classified by C's `isspace` in the "C" locale.
#[inline]
pub(crate) fn is_c_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}
