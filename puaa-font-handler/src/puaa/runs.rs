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

//! Run-merging: turning per-code-point maps into compact entry lists and
//! back.
//!
//! These are the shared subroutines behind the UCD text codecs. They group
//! adjacent code points with equal values into `Single`-style runs,
//! coalesce isolated singletons into `Multiple`-style entries, and - for
//! human-readable names - factor shared leading/trailing words out into
//! overlapping entries before storing the residuals.

use std::{collections::BTreeMap, sync::LazyLock};

use regex::Regex;

use super::entry::{PuaaEntry, PuaaValue};

/// Builds runs over a sorted map, extending the trailing run wherever the
/// value and contiguity allow.
fn runs_from_values<I>(iter: I) -> Vec<PuaaEntry>
where
    I: IntoIterator<Item = (u32, PuaaValue)>,
{
    let mut runs: Vec<PuaaEntry> = Vec::new();
    for (cp, value) in iter {
        let appended = match runs.last_mut() {
            Some(run) => run.try_append(cp, &value),
            None => false,
        };
        if !appended {
            runs.push(PuaaEntry::new(cp, cp, value));
        }
    }
    runs
}

/// Coalesces singleton runs into `Multiple`/`HexMultiple` entries; runs
/// spanning more than one code point pass through untouched. A coalesced
/// entry left with a single value is promoted back to its scalar kind.
fn entries_from_runs(runs: Vec<PuaaEntry>) -> Vec<PuaaEntry> {
    let mut entries: Vec<PuaaEntry> = Vec::new();
    let mut current: Option<usize> = None;
    for run in runs {
        if run.first_code_point != run.last_code_point {
            current = None;
            entries.push(run);
            continue;
        }
        let appended = match current {
            Some(i) => {
                entries[i].try_append(run.first_code_point, &run.value)
            }
            None => false,
        };
        if !appended {
            let value = match &run.value {
                PuaaValue::Single(v) => {
                    PuaaValue::Multiple(vec![v.clone()])
                }
                PuaaValue::Hexadecimal(v) => PuaaValue::HexMultiple(vec![*v]),
                _ => {
                    current = None;
                    entries.push(run);
                    continue;
                }
            };
            entries.push(PuaaEntry::new(
                run.first_code_point,
                run.last_code_point,
                value,
            ));
            current = Some(entries.len() - 1);
        }
    }
    for entry in &mut entries {
        if entry.first_code_point == entry.last_code_point {
            let promoted = match &entry.value {
                PuaaValue::Multiple(values) => {
                    values.first().cloned().map(PuaaValue::Single)
                }
                PuaaValue::HexMultiple(values) => {
                    values.first().copied().map(PuaaValue::Hexadecimal)
                }
                _ => None,
            };
            if let Some(value) = promoted {
                entry.value = value;
            }
        }
    }
    entries
}

/// Groups adjacent code points with equal strings into `Single` runs, then
/// coalesces isolated singletons into `Multiple` entries. Empty values are
/// dropped.
pub fn entries_from_string_map(m: &BTreeMap<u32, String>) -> Vec<PuaaEntry> {
    entries_from_runs(runs_from_values(
        m.iter()
            .filter(|(_, v)| !v.is_empty())
            .map(|(&cp, v)| (cp, PuaaValue::Single(v.clone()))),
    ))
}

/// Groups adjacent code points with equal flags into `Boolean` runs.
pub fn entries_from_boolean_map(m: &BTreeMap<u32, bool>) -> Vec<PuaaEntry> {
    runs_from_values(m.iter().map(|(&cp, &v)| (cp, PuaaValue::Boolean(v))))
}

/// Groups adjacent code points with equal numbers into `Decimal` runs.
pub fn entries_from_decimal_map(m: &BTreeMap<u32, i32>) -> Vec<PuaaEntry> {
    runs_from_values(m.iter().map(|(&cp, &v)| (cp, PuaaValue::Decimal(v))))
}

/// Groups adjacent code points with equal numbers into `Hexadecimal` runs,
/// coalescing isolated singletons into `HexMultiple` entries.
pub fn entries_from_hexadecimal_map(
    m: &BTreeMap<u32, u32>,
) -> Vec<PuaaEntry> {
    entries_from_runs(runs_from_values(
        m.iter().map(|(&cp, &v)| (cp, PuaaValue::Hexadecimal(v))),
    ))
}

/// Groups adjacent code points with equal sequences into `HexSequence`
/// runs.
pub fn entries_from_hex_sequence_map(
    m: &BTreeMap<u32, Vec<u32>>,
) -> Vec<PuaaEntry> {
    runs_from_values(
        m.iter()
            .map(|(&cp, v)| (cp, PuaaValue::HexSequence(v.clone()))),
    )
}

/// Builds `Decimal` runs from decimal text, but only when every value
/// round-trips to its canonical form; returns `None` otherwise so the
/// caller can fall back to a wider kind.
pub fn entries_from_decimal_string_map(
    m: &BTreeMap<u32, String>,
) -> Option<Vec<PuaaEntry>> {
    let mut entries: Vec<PuaaEntry> = Vec::new();
    for (&cp, sv) in m {
        if sv.is_empty() {
            continue;
        }
        let value: i32 = sv.parse().ok()?;
        if format!("{}", value) != *sv {
            return None;
        }
        let v = PuaaValue::Decimal(value);
        let appended = match entries.last_mut() {
            Some(entry) => entry.try_append(cp, &v),
            None => false,
        };
        if !appended {
            entries.push(PuaaEntry::new(cp, cp, v));
        }
    }
    Some(entries)
}

/// Builds `Hexadecimal`/`HexMultiple` entries from hex text, but only when
/// every value round-trips to its canonical zero-padded form; returns
/// `None` otherwise.
pub fn entries_from_hexadecimal_string_map(
    m: &BTreeMap<u32, String>,
) -> Option<Vec<PuaaEntry>> {
    let mut runs: Vec<PuaaEntry> = Vec::new();
    for (&cp, sv) in m {
        if sv.is_empty() {
            continue;
        }
        let value = u32::from_str_radix(sv, 16).ok()?;
        if format!("{:04X}", value) != *sv {
            return None;
        }
        let v = PuaaValue::Hexadecimal(value);
        let appended = match runs.last_mut() {
            Some(run) => run.try_append(cp, &v),
            None => false,
        };
        if !appended {
            runs.push(PuaaEntry::new(cp, cp, v));
        }
    }
    Some(entries_from_runs(runs))
}

/// Tokenizer for human-readable names: runs of word-ish characters, then
/// attached punctuation, then trailing whitespace stay together as one
/// token, so concatenating the tokens reproduces the input exactly.
static NAME_SPLIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r##"[\w"#$%&'()*<>@\[\]_{}]*[^\s\w"#$%&'()*<>@\[\]_{}]*\s*"##,
    )
    .expect("name splitter pattern is valid")
});

fn split_name(s: &str) -> Vec<String> {
    NAME_SPLIT
        .find_iter(s)
        .map(|m| m.as_str().to_string())
        .filter(|p| !p.is_empty())
        .collect()
}

/// Splits a value too long for the string pool in half at the UTF-16
/// code-unit midpoint, nudging the split point off a surrogate pair.
fn split_utf16_midpoint(value: &str) -> (String, String) {
    let units: Vec<u16> = value.encode_utf16().collect();
    let mut h = units.len() / 2;
    if (units[h] & 0xFC00) == 0xDC00 {
        h += 1;
    }
    let mut split = value.len();
    let mut u = 0;
    for (bi, ch) in value.char_indices() {
        if u >= h {
            split = bi;
            break;
        }
        u += ch.len_utf16();
    }
    let (head, tail) = value.split_at(split);
    (head.to_string(), tail.to_string())
}

/// Builds entries for a map of human-readable names.
///
/// Runs of a shared leading word across contiguous code points are
/// iteratively extracted as `Single` entries (consuming the word from each
/// item), then shared trailing words symmetrically; the residuals go
/// through [`entries_from_string_map`]. Lookup concatenates prefix +
/// residual + suffix back together because the extracted entries overlap
/// the residual ones.
pub fn entries_from_name_map(m: &BTreeMap<u32, String>) -> Vec<PuaaEntry> {
    let mut items: Vec<(u32, Vec<String>)> = m
        .iter()
        .filter(|(_, v)| !v.is_empty())
        .map(|(&cp, v)| (cp, split_name(v)))
        .collect();

    // Create entries for runs of common prefixes.
    let mut prefixes: Vec<PuaaEntry> = Vec::new();
    loop {
        let mut new_prefixes: Vec<PuaaEntry> = Vec::new();
        let n = items.len();
        let (mut o, mut i) = (0usize, 0usize);
        while o < n {
            let first_cp = items[i].0;
            let first_token = items[i].1.first().cloned();
            i += 1;
            if let Some(token) = first_token {
                // Create an entry for the first item's prefix, then extend
                // it over subsequent items with the same prefix.
                let mut entry = PuaaEntry::new(
                    first_cp,
                    first_cp,
                    PuaaValue::Single(token),
                );
                while i < n && !items[i].1.is_empty() {
                    let v = PuaaValue::Single(items[i].1[0].clone());
                    if !entry.try_append(items[i].0, &v) {
                        break;
                    }
                    i += 1;
                }
                // If there were subsequent items, keep the entry and
                // consume the prefix from each covered item.
                if entry.first_code_point != entry.last_code_point {
                    new_prefixes.push(entry);
                    while o < i {
                        items[o].1.remove(0);
                        o += 1;
                    }
                }
            }
            o = i;
        }
        if new_prefixes.is_empty() {
            break;
        }
        prefixes.append(&mut new_prefixes);
    }

    // Create entries for runs of common suffixes.
    let mut suffixes: Vec<PuaaEntry> = Vec::new();
    loop {
        let mut new_suffixes: Vec<PuaaEntry> = Vec::new();
        let n = items.len();
        let (mut o, mut i) = (0usize, 0usize);
        while o < n {
            let first_cp = items[i].0;
            let last_token = items[i].1.last().cloned();
            i += 1;
            if let Some(token) = last_token {
                let mut entry = PuaaEntry::new(
                    first_cp,
                    first_cp,
                    PuaaValue::Single(token),
                );
                while i < n && !items[i].1.is_empty() {
                    let v = PuaaValue::Single(
                        items[i].1[items[i].1.len() - 1].clone(),
                    );
                    if !entry.try_append(items[i].0, &v) {
                        break;
                    }
                    i += 1;
                }
                if entry.first_code_point != entry.last_code_point {
                    new_suffixes.push(entry);
                    while o < i {
                        items[o].1.pop();
                        o += 1;
                    }
                }
            }
            o = i;
        }
        if new_suffixes.is_empty() {
            break;
        }
        new_suffixes.append(&mut suffixes);
        suffixes = new_suffixes;
    }

    // Store the remaining name fragments. There are two residual maps
    // because some values of the kDefinition property in the Unihan
    // database are longer than 255 bytes; the split is done in UTF-16
    // code units.
    let mut remainder1: BTreeMap<u32, String> = BTreeMap::new();
    let mut remainder2: BTreeMap<u32, String> = BTreeMap::new();
    for (cp, tokens) in &items {
        if tokens.is_empty() {
            continue;
        }
        let value = tokens.concat();
        if value.len() > 255 {
            let (head, tail) = split_utf16_midpoint(&value);
            remainder1.insert(*cp, head);
            remainder2.insert(*cp, tail);
        } else {
            remainder1.insert(*cp, value);
        }
    }

    let mut entries = prefixes;
    entries.extend(entries_from_string_map(&remainder1));
    entries.extend(entries_from_string_map(&remainder2));
    entries.extend(suffixes);
    entries
}

/// The property-map view of an entry list: `cp -> concatenated value`.
pub fn map_from_entries(entries: &[PuaaEntry]) -> BTreeMap<u32, String> {
    let mut m: BTreeMap<u32, String> = BTreeMap::new();
    for entry in entries {
        for cp in entry.first_code_point..=entry.last_code_point {
            if let Some(value) = entry.property_value(cp) {
                m.entry(cp)
                    .and_modify(|existing| existing.push_str(&value))
                    .or_insert(value);
            }
        }
    }
    m
}

/// Collapses an arbitrary entry list into maximal `Single` runs suitable
/// for pretty-printing. Runs never cross a 64K plane boundary.
pub fn runs_from_entries(entries: &[PuaaEntry]) -> Vec<PuaaEntry> {
    runs_from_values(
        map_from_entries(entries)
            .into_iter()
            .filter(|(_, v)| !v.is_empty())
            .map(|(cp, v)| (cp, PuaaValue::Single(v))),
    )
}

#[cfg(test)]
#[path = "runs_test.rs"]
mod tests;
