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

//! SpecialCasing codec: the three case mappings with optional conditions.

use std::{collections::HashMap, io::Write};

use super::{
    line::{parse_hex32, split_line, split_range},
    UcdCodec,
};
use crate::{
    error::UcdError,
    puaa::{PuaaEntry, PuaaTable, PuaaValue},
};

/// `SpecialCasing.txt`: `cp; lower; title; upper[; condition];` rows.
pub struct SpecialCasingCodec;

/// Parses a whitespace-separated hex list; `Ok(None)` unless every word
/// parses and the list is non-empty.
fn parse_mapping(field: &str) -> Result<Option<Vec<u32>>, UcdError> {
    let mut mapping = Vec::new();
    for word in field.split_whitespace() {
        match parse_hex32(word)? {
            Some(value) => mapping.push(value),
            None => return Ok(None),
        }
    }
    if mapping.is_empty() {
        Ok(None)
    } else {
        Ok(Some(mapping))
    }
}

impl UcdCodec for SpecialCasingCodec {
    fn file_name(&self) -> &'static str {
        "SpecialCasing.txt"
    }

    fn property_names(&self) -> &[&'static str] {
        &[
            "Lowercase_Mapping",
            "Titlecase_Mapping",
            "Uppercase_Mapping",
        ]
    }

    fn compile(
        &self,
        table: &mut PuaaTable,
        text: &str,
    ) -> Result<(), UcdError> {
        let mut lower: Vec<PuaaEntry> = Vec::new();
        let mut title: Vec<PuaaEntry> = Vec::new();
        let mut upper: Vec<PuaaEntry> = Vec::new();
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
            let condition = fields
                .get(4)
                .map(|f| f.trim())
                .filter(|f| !f.is_empty())
                .map(|f| f.to_string());
            for (field, target) in [
                (fields[1], &mut lower),
                (fields[2], &mut title),
                (fields[3], &mut upper),
            ] {
                if let Some(mapping) = parse_mapping(field)? {
                    target.push(PuaaEntry::new(
                        first,
                        last,
                        PuaaValue::CaseMapping {
                            mapping,
                            condition: condition.clone(),
                        },
                    ));
                }
            }
        }
        table
            .subtable_mut("Lowercase_Mapping")
            .entries
            .extend(lower);
        table
            .subtable_mut("Titlecase_Mapping")
            .entries
            .extend(title);
        table
            .subtable_mut("Uppercase_Mapping")
            .entries
            .extend(upper);
        Ok(())
    }

    fn decompile(
        &self,
        table: &PuaaTable,
        out: &mut dyn Write,
    ) -> Result<(), UcdError> {
        struct Line {
            cp_hex: String,
            mappings: [Option<String>; 3],
            condition: Option<String>,
        }
        // Keys keep first-seen order so conditioned rows come out grouped
        // the way they went in.
        let mut keys: Vec<String> = Vec::new();
        let mut lines: HashMap<String, Line> = HashMap::new();
        let mut add_lines = |property: &str, index: usize| {
            let Some(subtable) = table.subtable(property) else {
                return;
            };
            for entry in &subtable.entries {
                for cp in
                    entry.first_code_point()..=entry.last_code_point()
                {
                    let Some(raw) = entry.property_value(cp) else {
                        continue;
                    };
                    let (value, condition) = match raw.split_once(';') {
                        Some((value, condition)) => (
                            value.trim().to_string(),
                            Some(condition.trim().to_string()),
                        ),
                        None => (raw.clone(), None),
                    };
                    let mut key = format!("{:08X}", 0xC0000000u32 + cp);
                    if let Some(condition) = &condition {
                        key.push_str(condition);
                    }
                    let line =
                        lines.entry(key.clone()).or_insert_with(|| {
                            keys.push(key);
                            Line {
                                cp_hex: format!("{:04X}", cp),
                                mappings: [None, None, None],
                                condition: condition.clone(),
                            }
                        });
                    line.mappings[index] = Some(value);
                }
            }
        };
        add_lines("Lowercase_Mapping", 0);
        add_lines("Titlecase_Mapping", 1);
        add_lines("Uppercase_Mapping", 2);
        for key in &keys {
            let Some(line) = lines.get(key) else {
                continue;
            };
            let fields: Vec<&str> = line
                .mappings
                .iter()
                .map(|m| m.as_deref().unwrap_or_default())
                .collect();
            match &line.condition {
                None => writeln!(
                    out,
                    "{}; {}; {}; {};",
                    line.cp_hex, fields[0], fields[1], fields[2]
                )?,
                Some(condition) => writeln!(
                    out,
                    "{}; {}; {}; {}; {};",
                    line.cp_hex, fields[0], fields[1], fields[2], condition
                )?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "casing_test.rs"]
mod tests;
