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

//! Shaping- and bidi-related codecs: ArabicShaping, BidiBrackets,
//! BidiMirroring, and EquivalentUnifiedIdeograph.

use std::{collections::BTreeMap, io::Write};

use super::{
    line::{join_range, parse_hex32, split_line, split_range},
    UcdCodec,
};
use crate::{
    error::UcdError,
    puaa::{
        runs::{
            entries_from_hexadecimal_map, entries_from_name_map,
            entries_from_string_map, map_from_entries, runs_from_entries,
        },
        PuaaTable,
    },
};

/// `ArabicShaping.txt`: fields 2 and 3 carry Joining_Type and
/// Joining_Group. Decompiled lines include the character name from the
/// `Name` subtable when one is available.
pub struct ArabicShapingCodec;

impl UcdCodec for ArabicShapingCodec {
    fn file_name(&self) -> &'static str {
        "ArabicShaping.txt"
    }

    fn property_names(&self) -> &[&'static str] {
        &["Joining_Type", "Joining_Group"]
    }

    fn compile(
        &self,
        table: &mut PuaaTable,
        text: &str,
    ) -> Result<(), UcdError> {
        let mut types: BTreeMap<u32, String> = BTreeMap::new();
        let mut groups: BTreeMap<u32, String> = BTreeMap::new();
        for line in text.lines() {
            let Some(fields) = split_line(line) else {
                continue;
            };
            if fields.len() < 4 {
                continue;
            }
            let Some((first, last)) = split_range(fields[0]) else {
                continue;
            };
            let joining_type = fields[2].trim();
            let joining_group = fields[3].trim();
            for cp in first..=last {
                types.insert(cp, joining_type.to_string());
                groups.insert(cp, joining_group.to_string());
            }
        }
        table
            .subtable_mut("Joining_Type")
            .entries
            .extend(entries_from_string_map(&types));
        table
            .subtable_mut("Joining_Group")
            .entries
            .extend(entries_from_name_map(&groups));
        Ok(())
    }

    fn decompile(
        &self,
        table: &PuaaTable,
        out: &mut dyn Write,
    ) -> Result<(), UcdError> {
        // cp -> (joining type, joining group), concatenating values from
        // overlapping entries in entry order.
        let mut lines: BTreeMap<u32, (Option<String>, Option<String>)> =
            BTreeMap::new();
        let names = table.subtable("Name");
        let get_name = |cp: u32| -> String {
            names
                .and_then(|subtable| subtable.property_value(cp))
                .unwrap_or_default()
        };
        if let Some(types) = table.subtable("Joining_Type") {
            for entry in &types.entries {
                for cp in
                    entry.first_code_point()..=entry.last_code_point()
                {
                    let Some(value) = entry.property_value(cp) else {
                        continue;
                    };
                    if value.is_empty() {
                        continue;
                    }
                    let line = lines.entry(cp).or_default();
                    match &mut line.0 {
                        Some(existing) => existing.push_str(&value),
                        None => line.0 = Some(value),
                    }
                }
            }
        }
        if let Some(groups) = table.subtable("Joining_Group") {
            for entry in &groups.entries {
                for cp in
                    entry.first_code_point()..=entry.last_code_point()
                {
                    let Some(value) = entry.property_value(cp) else {
                        continue;
                    };
                    if value.is_empty() {
                        continue;
                    }
                    let line = lines.entry(cp).or_default();
                    match &mut line.1 {
                        Some(existing) => existing.push_str(&value),
                        None => line.1 = Some(value),
                    }
                }
            }
        }
        for (cp, (joining_type, joining_group)) in lines {
            writeln!(
                out,
                "{:04X}; {}; {}; {}",
                cp,
                get_name(cp),
                joining_type.unwrap_or_default(),
                joining_group.unwrap_or_default()
            )?;
        }
        Ok(())
    }
}

/// `BidiBrackets.txt`: paired bracket (hex) plus bracket type.
pub struct BidiBracketsCodec;

impl UcdCodec for BidiBracketsCodec {
    fn file_name(&self) -> &'static str {
        "BidiBrackets.txt"
    }

    fn property_names(&self) -> &[&'static str] {
        &["Bidi_Paired_Bracket", "Bidi_Paired_Bracket_Type"]
    }

    fn compile(
        &self,
        table: &mut PuaaTable,
        text: &str,
    ) -> Result<(), UcdError> {
        let mut values: BTreeMap<u32, u32> = BTreeMap::new();
        let mut types: BTreeMap<u32, String> = BTreeMap::new();
        for line in text.lines() {
            let Some(fields) = split_line(line) else {
                continue;
            };
            if fields.len() < 3 {
                continue;
            }
            let Some((first, last)) = split_range(fields[0]) else {
                continue;
            };
            let Some(bracket) = parse_hex32(fields[1])? else {
                continue;
            };
            let bracket_type = fields[2].trim();
            for cp in first..=last {
                values.insert(cp, bracket);
                types.insert(cp, bracket_type.to_string());
            }
        }
        table
            .subtable_mut("Bidi_Paired_Bracket")
            .entries
            .extend(entries_from_hexadecimal_map(&values));
        table
            .subtable_mut("Bidi_Paired_Bracket_Type")
            .entries
            .extend(entries_from_string_map(&types));
        Ok(())
    }

    fn decompile(
        &self,
        table: &PuaaTable,
        out: &mut dyn Write,
    ) -> Result<(), UcdError> {
        let mut lines: BTreeMap<u32, (Option<String>, Option<String>)> =
            BTreeMap::new();
        if let Some(values) = table.subtable("Bidi_Paired_Bracket") {
            for entry in &values.entries {
                for cp in
                    entry.first_code_point()..=entry.last_code_point()
                {
                    let Some(value) = entry.property_value(cp) else {
                        continue;
                    };
                    if value.is_empty() {
                        continue;
                    }
                    lines.entry(cp).or_default().0 = Some(value);
                }
            }
        }
        if let Some(types) = table.subtable("Bidi_Paired_Bracket_Type") {
            for entry in &types.entries {
                for cp in
                    entry.first_code_point()..=entry.last_code_point()
                {
                    let Some(value) = entry.property_value(cp) else {
                        continue;
                    };
                    if value.is_empty() {
                        continue;
                    }
                    lines.entry(cp).or_default().1 = Some(value);
                }
            }
        }
        for (cp, (bracket, bracket_type)) in lines {
            writeln!(
                out,
                "{:04X}; {}; {}",
                cp,
                bracket.unwrap_or_default(),
                bracket_type.unwrap_or_default()
            )?;
        }
        Ok(())
    }
}

/// `BidiMirroring.txt`: mirrored-glyph code point per code point.
pub struct BidiMirroringCodec;

impl UcdCodec for BidiMirroringCodec {
    fn file_name(&self) -> &'static str {
        "BidiMirroring.txt"
    }

    fn property_names(&self) -> &[&'static str] {
        &["Bidi_Mirroring_Glyph"]
    }

    fn compile(
        &self,
        table: &mut PuaaTable,
        text: &str,
    ) -> Result<(), UcdError> {
        let mut values: BTreeMap<u32, u32> = BTreeMap::new();
        for line in text.lines() {
            let Some(fields) = split_line(line) else {
                continue;
            };
            if fields.len() < 2 {
                continue;
            }
            let Some((first, last)) = split_range(fields[0]) else {
                continue;
            };
            let Some(glyph) = parse_hex32(fields[1])? else {
                continue;
            };
            for cp in first..=last {
                values.insert(cp, glyph);
            }
        }
        table
            .subtable_mut("Bidi_Mirroring_Glyph")
            .entries
            .extend(entries_from_hexadecimal_map(&values));
        Ok(())
    }

    fn decompile(
        &self,
        table: &PuaaTable,
        out: &mut dyn Write,
    ) -> Result<(), UcdError> {
        let Some(subtable) = table.subtable("Bidi_Mirroring_Glyph") else {
            return Ok(());
        };
        if subtable.entries.is_empty() {
            return Ok(());
        }
        for (cp, value) in map_from_entries(&subtable.entries) {
            writeln!(out, "{:04X}; {}", cp, value)?;
        }
        Ok(())
    }
}

/// `EquivalentUnifiedIdeograph.txt`
pub struct EquivalentUnifiedIdeographCodec;

impl UcdCodec for EquivalentUnifiedIdeographCodec {
    fn file_name(&self) -> &'static str {
        "EquivalentUnifiedIdeograph.txt"
    }

    fn property_names(&self) -> &[&'static str] {
        &["Equivalent_Unified_Ideograph"]
    }

    fn compile(
        &self,
        table: &mut PuaaTable,
        text: &str,
    ) -> Result<(), UcdError> {
        let mut values: BTreeMap<u32, u32> = BTreeMap::new();
        for line in text.lines() {
            let Some(fields) = split_line(line) else {
                continue;
            };
            if fields.len() < 2 {
                continue;
            }
            let Some((first, last)) = split_range(fields[0]) else {
                continue;
            };
            let Some(ideograph) = parse_hex32(fields[1])? else {
                continue;
            };
            for cp in first..=last {
                values.insert(cp, ideograph);
            }
        }
        table
            .subtable_mut("Equivalent_Unified_Ideograph")
            .entries
            .extend(entries_from_hexadecimal_map(&values));
        Ok(())
    }

    fn decompile(
        &self,
        table: &PuaaTable,
        out: &mut dyn Write,
    ) -> Result<(), UcdError> {
        let Some(subtable) =
            table.subtable("Equivalent_Unified_Ideograph")
        else {
            return Ok(());
        };
        if subtable.entries.is_empty() {
            return Ok(());
        }
        for run in runs_from_entries(&subtable.entries) {
            writeln!(
                out,
                "{:<11}; {}",
                join_range(run.first_code_point(), run.last_code_point()),
                run.property_value(run.first_code_point())
                    .unwrap_or_default()
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "bidi_test.rs"]
mod tests;
