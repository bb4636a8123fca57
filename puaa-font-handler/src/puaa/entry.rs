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

//! PUAA entries: one code-point range plus a typed value.

/// The typed value carried by a [`PuaaEntry`]. Each variant has a
/// canonical string form, which is what lookups return and what the UCD
/// text codecs emit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PuaaValue {
    /// The same string for every code point in the range.
    Single(String),
    /// Per-code-point strings; one per code point in the range.
    Multiple(Vec<String>),
    /// A flag, emitted as `Y` or `N`.
    Boolean(bool),
    /// A signed decimal number.
    Decimal(i32),
    /// An unsigned number, emitted as zero-padded hex at minimum width 4.
    Hexadecimal(u32),
    /// Per-code-point hex numbers; one per code point in the range.
    HexMultiple(Vec<u32>),
    /// A space-separated hex list, shared by every code point in the range.
    HexSequence(Vec<u32>),
    /// A case mapping: a hex list with an optional `; condition` suffix.
    CaseMapping {
        /// The mapped code points.
        mapping: Vec<u32>,
        /// The casing condition, e.g. `tr`, if any.
        condition: Option<String>,
    },
    /// A name alias, emitted as `alias;alias_type`.
    NameAlias {
        /// The alias itself.
        alias: String,
        /// The kind of alias, e.g. `control` or `correction`.
        alias_type: String,
    },
}

/// One range + value pair inside a subtable.
///
/// The closed range `[first, last]` always lies within a single 64K plane
/// (`first >> 16 == last >> 16`); run-merging never extends an entry across
/// a plane boundary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PuaaEntry {
    pub(crate) first_code_point: u32,
    pub(crate) last_code_point: u32,
    pub(crate) value: PuaaValue,
}

impl PuaaEntry {
    /// Creates an entry over the closed range `[first, last]`.
    pub fn new(first: u32, last: u32, value: PuaaValue) -> Self {
        Self {
            first_code_point: first,
            last_code_point: last,
            value,
        }
    }

    /// The first code point of the range.
    pub fn first_code_point(&self) -> u32 {
        self.first_code_point
    }

    /// The last code point of the range.
    pub fn last_code_point(&self) -> u32 {
        self.last_code_point
    }

    /// The typed value.
    pub fn value(&self) -> &PuaaValue {
        &self.value
    }

    /// Whether the range contains `cp`.
    pub fn contains(&self, cp: u32) -> bool {
        self.first_code_point <= cp && cp <= self.last_code_point
    }

    /// The canonical string form of this entry's value at `cp`, or `None`
    /// for per-code-point kinds whose backing array does not cover `cp`.
    pub fn property_value(&self, cp: u32) -> Option<String> {
        match &self.value {
            PuaaValue::Single(value) => Some(value.clone()),
            PuaaValue::Multiple(values) => values
                .get((cp - self.first_code_point) as usize)
                .cloned(),
            PuaaValue::Boolean(value) => {
                Some(if *value { "Y" } else { "N" }.to_string())
            }
            PuaaValue::Decimal(value) => Some(format!("{}", value)),
            PuaaValue::Hexadecimal(value) => Some(format!("{:04X}", value)),
            PuaaValue::HexMultiple(values) => values
                .get((cp - self.first_code_point) as usize)
                .map(|v| format!("{:04X}", v)),
            PuaaValue::HexSequence(values) => Some(hex_join(values)),
            PuaaValue::CaseMapping { mapping, condition } => {
                let v = hex_join(mapping);
                Some(match condition {
                    Some(condition) => format!("{}; {}", v, condition),
                    None => v,
                })
            }
            PuaaValue::NameAlias { alias, alias_type } => {
                Some(format!("{};{}", alias, alias_type))
            }
        }
    }

    /// Run-merging: tries to extend this entry to cover `cp` with `value`
    /// instead of allocating a new entry. Fails when `cp` is not exactly
    /// the next code point, when the extension would cross a 64K plane
    /// boundary, or when the value is incompatible with this entry's kind.
    pub(crate) fn try_append(&mut self, cp: u32, value: &PuaaValue) -> bool {
        if (self.last_code_point & 0xFFFF) == 0xFFFF {
            return false;
        }
        if self.last_code_point + 1 != cp {
            return false;
        }
        match (&mut self.value, value) {
            (PuaaValue::Single(a), PuaaValue::Single(b)) if *a == *b => {}
            (PuaaValue::Multiple(values), PuaaValue::Single(b)) => {
                values.push(b.clone());
            }
            (PuaaValue::Boolean(a), PuaaValue::Boolean(b)) if *a == *b => {}
            (PuaaValue::Decimal(a), PuaaValue::Decimal(b)) if *a == *b => {}
            (PuaaValue::Hexadecimal(a), PuaaValue::Hexadecimal(b))
                if *a == *b => {}
            (PuaaValue::HexMultiple(values), PuaaValue::Hexadecimal(b)) => {
                values.push(*b);
            }
            (PuaaValue::HexSequence(a), PuaaValue::HexSequence(b))
                if *a == *b => {}
            _ => return false,
        }
        self.last_code_point += 1;
        true
    }
}

/// Formats code points as space-separated zero-padded hex.
pub(crate) fn hex_join(values: &[u32]) -> String {
    values
        .iter()
        .map(|v| format!("{:04X}", v))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
#[path = "entry_test.rs"]
mod tests;
