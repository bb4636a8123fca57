// Copyright 2025 Monotype Imaging Inc.
//
//  Licensed under the Apache License, Version 2.0 (the "License");
//  you may not use this file except in compliance with the License.
//  You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.

//! UCD line parsing helpers shared by the codecs.

use crate::error::UcdError;

/// Strips the trailing `#` comment, trims, and splits on `;`. Returns
/// `None` for blank and comment-only lines. Fields are not trimmed here;
/// callers trim the ones they use.
pub(crate) fn split_line(s: &str) -> Option<Vec<&str>> {
    let s = s.split('#').next().unwrap_or_default().trim();
    if s.is_empty() {
        None
    } else {
        Some(s.split(';').collect())
    }
}

/// Parses a code-point range: `HEX` or `HEX..HEX` (any run of dots
/// separates).
pub(crate) fn split_range(s: &str) -> Option<(u32, u32)> {
    let mut parts = s.split('.').filter(|part| !part.is_empty());
    let start = u32::from_str_radix(parts.next()?.trim(), 16).ok()?;
    match parts.next() {
        Some(end) => {
            Some((start, u32::from_str_radix(end.trim(), 16).ok()?))
        }
        None => Some((start, start)),
    }
}

/// Formats a code-point range: `XXXX` or `XXXX..XXXX`.
pub(crate) fn join_range(first: u32, last: u32) -> String {
    if first == last {
        format!("{:04X}", first)
    } else {
        format!("{:04X}..{:04X}", first, last)
    }
}

/// Parses a hex field into a u32. `Ok(None)` when the field is not hex at
/// all (the caller skips the line); an error when it is hex but does not
/// fit an unsigned 32-bit value.
pub(crate) fn parse_hex32(s: &str) -> Result<Option<u32>, UcdError> {
    let t = s.trim();
    let (negative, digits) = match t.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, t.strip_prefix('+').unwrap_or(t)),
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Ok(None);
    }
    match u64::from_str_radix(digits, 16) {
        Ok(v) if !negative && v <= u32::MAX as u64 => Ok(Some(v as u32)),
        _ => Err(UcdError::ValueOutOfRange(t.to_string())),
    }
}

/// Parses a decimal field into an i32. `Ok(None)` when the field is not a
/// number; an error when it does not fit a signed 32-bit value.
pub(crate) fn parse_dec32(s: &str) -> Result<Option<i32>, UcdError> {
    let t = s.trim();
    let digits = t
        .strip_prefix('-')
        .or_else(|| t.strip_prefix('+'))
        .unwrap_or(t);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Ok(None);
    }
    match t.parse::<i64>() {
        Ok(v) if i32::try_from(v).is_ok() => Ok(Some(v as i32)),
        _ => Err(UcdError::ValueOutOfRange(t.to_string())),
    }
}

/// A fragment of a natural (numeric-aware) sort key.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum NaturalToken {
    /// A run of ASCII digits, compared numerically.
    Number(u64),
    /// Everything else, compared case-insensitively.
    Text(String),
}

/// Splits a string into alternating text/number tokens, so `2.0` sorts
/// after `1.1` but before `10.0`.
pub(crate) fn natural_sort_key(s: &str) -> Vec<NaturalToken> {
    let mut tokens = Vec::new();
    let mut text = String::new();
    let mut chars = s.chars().peekable();
    while let Some(&c) = chars.peek() {
        if c.is_ascii_digit() {
            tokens.push(NaturalToken::Text(text.to_lowercase()));
            text.clear();
            let mut number = String::new();
            while let Some(&d) = chars.peek() {
                if d.is_ascii_digit() {
                    number.push(d);
                    chars.next();
                } else {
                    break;
                }
            }
            tokens.push(NaturalToken::Number(
                number.parse().unwrap_or(u64::MAX),
            ));
        } else {
            text.push(c);
            chars.next();
        }
    }
    tokens.push(NaturalToken::Text(text.to_lowercase()));
    tokens
}

#[cfg(test)]
#[path = "line_test.rs"]
mod tests;
