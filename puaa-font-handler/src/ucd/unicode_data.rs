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

//! UnicodeData codec: the 14-column master file.

use std::{collections::BTreeMap, io::Write};

use super::{
    line::{parse_dec32, parse_hex32, split_line},
    UcdCodec,
};
use crate::{
    error::UcdError,
    puaa::{
        runs::{
            entries_from_boolean_map, entries_from_decimal_map,
            entries_from_hex_sequence_map, entries_from_hexadecimal_map,
            entries_from_name_map, entries_from_string_map,
        },
        PuaaTable,
    },
};

/// `UnicodeData.txt`: `cp;Name;gc;ccc;bc;decomp;num6;num7;num8;bm;u1name;
/// iso;uc;lc;tc`.
pub struct UnicodeDataCodec;

impl UcdCodec for UnicodeDataCodec {
    fn file_name(&self) -> &'static str {
        "UnicodeData.txt"
    }

    fn property_names(&self) -> &[&'static str] {
        &[
            "Name",
            "General_Category",
            "Canonical_Combining_Class",
            "Bidi_Class",
            "Decomposition_Type",
            "Decomposition_Mapping",
            "Numeric_Type",
            "Numeric_Value",
            "Bidi_Mirrored",
            "Unicode_1_Name",
            "ISO_Comment",
            "Simple_Uppercase_Mapping",
            "Simple_Lowercase_Mapping",
            "Simple_Titlecase_Mapping",
        ]
    }

    fn compile(
        &self,
        table: &mut PuaaTable,
        text: &str,
    ) -> Result<(), UcdError> {
        let mut names: BTreeMap<u32, String> = BTreeMap::new();
        let mut categories: BTreeMap<u32, String> = BTreeMap::new();
        let mut comb_classes: BTreeMap<u32, i32> = BTreeMap::new();
        let mut bidi_classes: BTreeMap<u32, String> = BTreeMap::new();
        let mut decomp_types: BTreeMap<u32, String> = BTreeMap::new();
        let mut decomp_mappings: BTreeMap<u32, Vec<u32>> = BTreeMap::new();
        let mut numeric_types: BTreeMap<u32, String> = BTreeMap::new();
        let mut numeric_values: BTreeMap<u32, String> = BTreeMap::new();
        let mut bidi_mirrored: BTreeMap<u32, bool> = BTreeMap::new();
        let mut uni1_names: BTreeMap<u32, String> = BTreeMap::new();
        let mut comments: BTreeMap<u32, String> = BTreeMap::new();
        let mut uppercase: BTreeMap<u32, u32> = BTreeMap::new();
        let mut lowercase: BTreeMap<u32, u32> = BTreeMap::new();
        let mut titlecase: BTreeMap<u32, u32> = BTreeMap::new();

        for line in text.lines() {
            let Some(fields) = split_line(line) else {
                continue;
            };
            if fields.len() < 12 {
                continue;
            }
            let Ok(cp) = u32::from_str_radix(fields[0].trim(), 16) else {
                continue;
            };
            let name = fields[1].trim();
            if !name.is_empty() {
                names.insert(cp, name.to_string());
            }
            let category = fields[2].trim();
            if !category.is_empty() {
                categories.insert(cp, category.to_string());
            }
            if let Some(comb_class) = parse_dec32(fields[3])? {
                comb_classes.insert(cp, comb_class);
            }
            let bidi_class = fields[4].trim();
            if !bidi_class.is_empty() {
                bidi_classes.insert(cp, bidi_class.to_string());
            }
            let decomposition = fields[5].trim();
            if !decomposition.is_empty() {
                // Hex words are the mapping; anything else (the <tag>) is
                // the decomposition type.
                let mut types: Vec<&str> = Vec::new();
                let mut mappings: Vec<u32> = Vec::new();
                for word in decomposition.split_whitespace() {
                    match u32::from_str_radix(word, 16) {
                        Ok(mapped) => mappings.push(mapped),
                        Err(_) => types.push(word),
                    }
                }
                if !types.is_empty() {
                    decomp_types.insert(cp, types.join(" "));
                }
                if !mappings.is_empty() {
                    decomp_mappings.insert(cp, mappings);
                }
            }
            let (decimal, digit, numeric) =
                (fields[6].trim(), fields[7].trim(), fields[8].trim());
            if !decimal.is_empty() {
                numeric_types.insert(cp, "Decimal".to_string());
                numeric_values.insert(cp, decimal.to_string());
            } else if !digit.is_empty() {
                numeric_types.insert(cp, "Digit".to_string());
                numeric_values.insert(cp, digit.to_string());
            } else if !numeric.is_empty() {
                numeric_types.insert(cp, "Numeric".to_string());
                numeric_values.insert(cp, numeric.to_string());
            }
            let mirrored = fields[9].trim();
            if !mirrored.is_empty() {
                bidi_mirrored.insert(cp, mirrored == "Y");
            }
            let uni1_name = fields[10].trim();
            if !uni1_name.is_empty() {
                uni1_names.insert(cp, uni1_name.to_string());
            }
            let comment = fields[11].trim();
            if !comment.is_empty() {
                comments.insert(cp, comment.to_string());
            }
            if let Some(Some(mapped)) =
                fields.get(12).map(|f| parse_hex32(f)).transpose()?
            {
                uppercase.insert(cp, mapped);
            }
            if let Some(Some(mapped)) =
                fields.get(13).map(|f| parse_hex32(f)).transpose()?
            {
                lowercase.insert(cp, mapped);
            }
            if let Some(Some(mapped)) =
                fields.get(14).map(|f| parse_hex32(f)).transpose()?
            {
                titlecase.insert(cp, mapped);
            }
        }

        table
            .subtable_mut("Name")
            .entries
            .extend(entries_from_name_map(&names));
        table
            .subtable_mut("General_Category")
            .entries
            .extend(entries_from_string_map(&categories));
        table
            .subtable_mut("Canonical_Combining_Class")
            .entries
            .extend(entries_from_decimal_map(&comb_classes));
        table
            .subtable_mut("Bidi_Class")
            .entries
            .extend(entries_from_string_map(&bidi_classes));
        table
            .subtable_mut("Decomposition_Type")
            .entries
            .extend(entries_from_string_map(&decomp_types));
        table
            .subtable_mut("Decomposition_Mapping")
            .entries
            .extend(entries_from_hex_sequence_map(&decomp_mappings));
        table
            .subtable_mut("Numeric_Type")
            .entries
            .extend(entries_from_string_map(&numeric_types));
        table
            .subtable_mut("Numeric_Value")
            .entries
            .extend(entries_from_string_map(&numeric_values));
        table
            .subtable_mut("Bidi_Mirrored")
            .entries
            .extend(entries_from_boolean_map(&bidi_mirrored));
        table
            .subtable_mut("Unicode_1_Name")
            .entries
            .extend(entries_from_name_map(&uni1_names));
        table
            .subtable_mut("ISO_Comment")
            .entries
            .extend(entries_from_string_map(&comments));
        table
            .subtable_mut("Simple_Uppercase_Mapping")
            .entries
            .extend(entries_from_hexadecimal_map(&uppercase));
        table
            .subtable_mut("Simple_Lowercase_Mapping")
            .entries
            .extend(entries_from_hexadecimal_map(&lowercase));
        table
            .subtable_mut("Simple_Titlecase_Mapping")
            .entries
            .extend(entries_from_hexadecimal_map(&titlecase));
        Ok(())
    }

    fn decompile(
        &self,
        table: &PuaaTable,
        out: &mut dyn Write,
    ) -> Result<(), UcdError> {
        // Column 0 is the code point; columns 1..=14 are rebuilt from the
        // subtables. Decomposition type and mapping share column 5, and
        // the numeric type expands its value over columns 6..=8.
        let mut lines: BTreeMap<u32, [Option<String>; 15]> = BTreeMap::new();
        let mut add_lines = |property: &str, index: usize| {
            let Some(subtable) = table.subtable(property) else {
                return;
            };
            for entry in &subtable.entries {
                for cp in
                    entry.first_code_point()..=entry.last_code_point()
                {
                    let Some(value) = entry.property_value(cp) else {
                        continue;
                    };
                    if value.is_empty() {
                        continue;
                    }
                    let line = lines.entry(cp).or_insert_with(|| {
                        let mut line: [Option<String>; 15] =
                            Default::default();
                        line[0] = Some(format!("{:04X}", cp));
                        line
                    });
                    if line[index].is_none() {
                        line[index] = Some(value);
                    } else if index == 8 {
                        let numeric_type =
                            line[8].clone().unwrap_or_default();
                        match numeric_type.as_str() {
                            "Decimal" => {
                                line[6] = Some(value.clone());
                                line[7] = Some(value.clone());
                                line[8] = Some(value);
                            }
                            "Digit" => {
                                line[7] = Some(value.clone());
                                line[8] = Some(value);
                            }
                            "Numeric" => {
                                line[8] = Some(value);
                            }
                            _ => {}
                        }
                    } else if let Some(existing) = &mut line[index] {
                        if index == 5 {
                            existing.push(' ');
                        }
                        existing.push_str(&value);
                    }
                }
            }
        };
        add_lines("Name", 1);
        add_lines("General_Category", 2);
        add_lines("Canonical_Combining_Class", 3);
        add_lines("Bidi_Class", 4);
        add_lines("Decomposition_Type", 5);
        add_lines("Decomposition_Mapping", 5);
        add_lines("Numeric_Type", 8);
        add_lines("Numeric_Value", 8);
        add_lines("Bidi_Mirrored", 9);
        add_lines("Unicode_1_Name", 10);
        add_lines("ISO_Comment", 11);
        add_lines("Simple_Uppercase_Mapping", 12);
        add_lines("Simple_Lowercase_Mapping", 13);
        add_lines("Simple_Titlecase_Mapping", 14);
        for line in lines.values() {
            let fields: Vec<&str> = line
                .iter()
                .map(|field| field.as_deref().unwrap_or_default())
                .collect();
            writeln!(out, "{}", fields.join(";"))?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "unicode_data_test.rs"]
mod tests;
