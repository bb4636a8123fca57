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

//! One-off codecs: Blocks, CompositionExclusions, DerivedAge,
//! HangulSyllableType, Jamo, and NameAliases.

use std::{collections::BTreeMap, io::Write};

use super::{
    line::{join_range, natural_sort_key, split_line, split_range},
    UcdCodec,
};
use crate::{
    error::UcdError,
    puaa::{
        runs::{
            entries_from_boolean_map, entries_from_string_map,
            map_from_entries, runs_from_entries,
        },
        PuaaEntry, PuaaTable, PuaaValue,
    },
};

/// `Blocks.txt`: one `Single` entry per block, in file order.
pub struct BlocksCodec;

impl UcdCodec for BlocksCodec {
    fn file_name(&self) -> &'static str {
        "Blocks.txt"
    }

    fn property_names(&self) -> &[&'static str] {
        &["Block"]
    }

    fn compile(
        &self,
        table: &mut PuaaTable,
        text: &str,
    ) -> Result<(), UcdError> {
        let blocks = table.subtable_mut("Block");
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
            blocks.entries.push(PuaaEntry::new(
                first,
                last,
                PuaaValue::Single(fields[1].trim().to_string()),
            ));
        }
        Ok(())
    }

    fn decompile(
        &self,
        table: &PuaaTable,
        out: &mut dyn Write,
    ) -> Result<(), UcdError> {
        let Some(blocks) = table.subtable("Block") else {
            return Ok(());
        };
        for entry in &blocks.entries {
            writeln!(
                out,
                "{}; {}",
                join_range(
                    entry.first_code_point(),
                    entry.last_code_point()
                ),
                entry
                    .property_value(entry.first_code_point())
                    .unwrap_or_default()
            )?;
        }
        Ok(())
    }
}

/// `CompositionExclusions.txt`: bare code points, one binary property.
pub struct CompositionExclusionsCodec;

impl UcdCodec for CompositionExclusionsCodec {
    fn file_name(&self) -> &'static str {
        "CompositionExclusions.txt"
    }

    fn property_names(&self) -> &[&'static str] {
        &["Composition_Exclusion"]
    }

    fn compile(
        &self,
        table: &mut PuaaTable,
        text: &str,
    ) -> Result<(), UcdError> {
        let mut values: BTreeMap<u32, bool> = BTreeMap::new();
        for line in text.lines() {
            let Some(fields) = split_line(line) else {
                continue;
            };
            let Some((first, last)) = split_range(fields[0]) else {
                continue;
            };
            for cp in first..=last {
                values.insert(cp, true);
            }
        }
        table
            .subtable_mut("Composition_Exclusion")
            .entries
            .extend(entries_from_boolean_map(&values));
        Ok(())
    }

    fn decompile(
        &self,
        table: &PuaaTable,
        out: &mut dyn Write,
    ) -> Result<(), UcdError> {
        let Some(subtable) = table.subtable("Composition_Exclusion") else {
            return Ok(());
        };
        for (cp, value) in map_from_entries(&subtable.entries) {
            if value == "Y" {
                writeln!(out, "{:04X}", cp)?;
            }
        }
        Ok(())
    }
}

/// `DerivedAge.txt`: version values, decompiled in natural version order.
pub struct DerivedAgeCodec;

impl UcdCodec for DerivedAgeCodec {
    fn file_name(&self) -> &'static str {
        "DerivedAge.txt"
    }

    fn property_names(&self) -> &[&'static str] {
        &["Age"]
    }

    fn compile(
        &self,
        table: &mut PuaaTable,
        text: &str,
    ) -> Result<(), UcdError> {
        let mut values: BTreeMap<u32, String> = BTreeMap::new();
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
            let value = fields[1].trim();
            for cp in first..=last {
                values.insert(cp, value.to_string());
            }
        }
        table
            .subtable_mut("Age")
            .entries
            .extend(entries_from_string_map(&values));
        Ok(())
    }

    fn decompile(
        &self,
        table: &PuaaTable,
        out: &mut dyn Write,
    ) -> Result<(), UcdError> {
        let Some(subtable) = table.subtable("Age") else {
            return Ok(());
        };
        if subtable.entries.is_empty() {
            return Ok(());
        }
        let mut runs = runs_from_entries(&subtable.entries);
        runs.sort_by_key(|run| {
            let value = run
                .property_value(run.first_code_point())
                .unwrap_or_default();
            (
                natural_sort_key(&value),
                run.first_code_point(),
                run.last_code_point(),
            )
        });
        for run in runs {
            writeln!(
                out,
                "{:<14}; {}",
                join_range(run.first_code_point(), run.last_code_point()),
                run.property_value(run.first_code_point())
                    .unwrap_or_default()
            )?;
        }
        Ok(())
    }
}

/// `HangulSyllableType.txt`: decompiled grouped by each type's first
/// occurrence.
pub struct HangulSyllableTypeCodec;

impl UcdCodec for HangulSyllableTypeCodec {
    fn file_name(&self) -> &'static str {
        "HangulSyllableType.txt"
    }

    fn property_names(&self) -> &[&'static str] {
        &["Hangul_Syllable_Type"]
    }

    fn compile(
        &self,
        table: &mut PuaaTable,
        text: &str,
    ) -> Result<(), UcdError> {
        let mut values: BTreeMap<u32, String> = BTreeMap::new();
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
            let value = fields[1].trim();
            for cp in first..=last {
                values.insert(cp, value.to_string());
            }
        }
        table
            .subtable_mut("Hangul_Syllable_Type")
            .entries
            .extend(entries_from_string_map(&values));
        Ok(())
    }

    fn decompile(
        &self,
        table: &PuaaTable,
        out: &mut dyn Write,
    ) -> Result<(), UcdError> {
        let Some(subtable) = table.subtable("Hangul_Syllable_Type") else {
            return Ok(());
        };
        if subtable.entries.is_empty() {
            return Ok(());
        }
        let mut runs = runs_from_entries(&subtable.entries);
        let mut first_of_type: BTreeMap<String, u32> = BTreeMap::new();
        for run in &runs {
            let value = run
                .property_value(run.first_code_point())
                .unwrap_or_default();
            let first = first_of_type
                .entry(value)
                .or_insert(run.first_code_point());
            if *first > run.first_code_point() {
                *first = run.first_code_point();
            }
        }
        runs.sort_by_key(|run| {
            let value = run
                .property_value(run.first_code_point())
                .unwrap_or_default();
            let rank = first_of_type.get(&value).copied().unwrap_or(0);
            (rank, value, run.first_code_point(), run.last_code_point())
        });
        for run in runs {
            writeln!(
                out,
                "{:<14}; {}",
                join_range(run.first_code_point(), run.last_code_point()),
                run.property_value(run.first_code_point())
                    .unwrap_or_default()
            )?;
        }
        Ok(())
    }
}

/// `Jamo.txt`: short names per jamo, where the value at U+110B really is
/// empty.
pub struct JamoCodec;

impl UcdCodec for JamoCodec {
    fn file_name(&self) -> &'static str {
        "Jamo.txt"
    }

    fn property_names(&self) -> &[&'static str] {
        &["Jamo_Short_Name"]
    }

    fn compile(
        &self,
        table: &mut PuaaTable,
        text: &str,
    ) -> Result<(), UcdError> {
        let jamo = table.subtable_mut("Jamo_Short_Name");
        for line in text.lines() {
            let Some(fields) = split_line(line) else {
                continue;
            };
            let Some((first, last)) = split_range(fields[0]) else {
                continue;
            };
            let value = fields.get(1).map(|f| f.trim()).unwrap_or_default();
            jamo.entries.push(PuaaEntry::new(
                first,
                last,
                PuaaValue::Single(value.to_string()),
            ));
        }
        Ok(())
    }

    fn decompile(
        &self,
        table: &PuaaTable,
        out: &mut dyn Write,
    ) -> Result<(), UcdError> {
        let Some(jamo) = table.subtable("Jamo_Short_Name") else {
            return Ok(());
        };
        for entry in &jamo.entries {
            for cp in entry.first_code_point()..=entry.last_code_point() {
                writeln!(
                    out,
                    "{:04X}; {}",
                    cp,
                    entry.property_value(cp).unwrap_or_default()
                )?;
            }
        }
        Ok(())
    }
}

/// `NameAliases.txt`: `cp;alias;type` triples, kept in file order.
pub struct NameAliasesCodec;

impl UcdCodec for NameAliasesCodec {
    fn file_name(&self) -> &'static str {
        "NameAliases.txt"
    }

    fn property_names(&self) -> &[&'static str] {
        &["Name_Alias"]
    }

    fn compile(
        &self,
        table: &mut PuaaTable,
        text: &str,
    ) -> Result<(), UcdError> {
        let names = table.subtable_mut("Name_Alias");
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
            names.entries.push(PuaaEntry::new(
                first,
                last,
                PuaaValue::NameAlias {
                    alias: fields[1].trim().to_string(),
                    alias_type: fields[2].trim().to_string(),
                },
            ));
        }
        Ok(())
    }

    fn decompile(
        &self,
        table: &PuaaTable,
        out: &mut dyn Write,
    ) -> Result<(), UcdError> {
        let Some(names) = table.subtable("Name_Alias") else {
            return Ok(());
        };
        for entry in &names.entries {
            for cp in entry.first_code_point()..=entry.last_code_point() {
                writeln!(
                    out,
                    "{:04X};{}",
                    cp,
                    entry.property_value(cp).unwrap_or_default()
                )?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "misc_test.rs"]
mod tests;
