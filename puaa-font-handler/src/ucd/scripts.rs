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

//! Scripts and ScriptExtensions codecs.

use std::{collections::BTreeMap, io::Write};

use super::{
    line::{join_range, split_line, split_range},
    UcdCodec,
};
use crate::{
    error::UcdError,
    puaa::{
        runs::{entries_from_string_map, runs_from_entries},
        PuaaEntry, PuaaTable, PuaaValue,
    },
};

/// `Scripts.txt`: decompiled grouped by each script's first occurrence.
pub struct ScriptsCodec;

impl UcdCodec for ScriptsCodec {
    fn file_name(&self) -> &'static str {
        "Scripts.txt"
    }

    fn property_names(&self) -> &[&'static str] {
        &["Script"]
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
            .subtable_mut("Script")
            .entries
            .extend(entries_from_string_map(&values));
        Ok(())
    }

    fn decompile(
        &self,
        table: &PuaaTable,
        out: &mut dyn Write,
    ) -> Result<(), UcdError> {
        let Some(subtable) = table.subtable("Script") else {
            return Ok(());
        };
        if subtable.entries.is_empty() {
            return Ok(());
        }
        let mut runs = runs_from_entries(&subtable.entries);
        let mut first_of_script: BTreeMap<String, u32> = BTreeMap::new();
        for run in &runs {
            let value = run
                .property_value(run.first_code_point())
                .unwrap_or_default();
            let first = first_of_script
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
            let rank = first_of_script.get(&value).copied().unwrap_or(0);
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

/// `ScriptExtensions.txt`: whitespace-separated script lists. Each script
/// gets its own run set on compile; decompilation reassembles the sorted
/// list per code point.
pub struct ScriptExtensionsCodec;

impl UcdCodec for ScriptExtensionsCodec {
    fn file_name(&self) -> &'static str {
        "ScriptExtensions.txt"
    }

    fn property_names(&self) -> &[&'static str] {
        &["Script_Extensions"]
    }

    fn compile(
        &self,
        table: &mut PuaaTable,
        text: &str,
    ) -> Result<(), UcdError> {
        let mut values: BTreeMap<String, BTreeMap<u32, String>> =
            BTreeMap::new();
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
            for script in fields[1].split_whitespace() {
                let map = values.entry(script.to_string()).or_default();
                for cp in first..=last {
                    map.insert(cp, script.to_string());
                }
            }
        }
        let subtable = table.subtable_mut("Script_Extensions");
        for map in values.values() {
            subtable.entries.extend(entries_from_string_map(map));
        }
        Ok(())
    }

    fn decompile(
        &self,
        table: &PuaaTable,
        out: &mut dyn Write,
    ) -> Result<(), UcdError> {
        let Some(subtable) = table.subtable("Script_Extensions") else {
            return Ok(());
        };
        if subtable.entries.is_empty() {
            return Ok(());
        }
        let mut scripts: BTreeMap<u32, Vec<String>> = BTreeMap::new();
        for entry in &subtable.entries {
            for cp in entry.first_code_point()..=entry.last_code_point() {
                if let Some(value) = entry.property_value(cp) {
                    scripts.entry(cp).or_default().extend(
                        value
                            .split_whitespace()
                            .map(|script| script.to_string()),
                    );
                }
            }
        }
        let singles: Vec<PuaaEntry> = scripts
            .into_iter()
            .map(|(cp, mut list)| {
                list.sort();
                PuaaEntry::new(cp, cp, PuaaValue::Single(list.join(" ")))
            })
            .collect();
        let mut runs = runs_from_entries(&singles);
        runs.sort_by_key(|run| {
            let value = run
                .property_value(run.first_code_point())
                .unwrap_or_default();
            (
                value.len(),
                value.to_lowercase(),
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

#[cfg(test)]
#[path = "scripts_test.rs"]
mod tests;
