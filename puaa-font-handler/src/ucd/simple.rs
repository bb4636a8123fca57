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

//! The three parameterized codec families: enumerated-category files,
//! binary-property lists, and plain single-value files.

use std::{collections::BTreeMap, io::Write, slice};

use super::{
    line::{join_range, split_line, split_range},
    UcdCodec,
};
use crate::{
    error::UcdError,
    puaa::{
        runs::{
            entries_from_boolean_map, entries_from_string_map,
            runs_from_entries,
        },
        PuaaTable,
    },
};

/// Codec for a file enumerating one property over a closed set of values
/// (e.g. `LineBreak.txt` without the compact format,
/// `GraphemeBreakProperty.txt`). Decompilation groups runs by the
/// property's declared value order.
pub struct CategoryCodec {
    file_name: &'static str,
    property_name: &'static str,
    property_values: &'static [&'static str],
}

impl CategoryCodec {
    /// `GraphemeBreakProperty.txt`
    pub fn grapheme_break() -> Self {
        Self {
            file_name: "GraphemeBreakProperty.txt",
            property_name: "Grapheme_Cluster_Break",
            property_values: &[
                "Prepend",
                "CR",
                "LF",
                "Control",
                "Extend",
                "Regional_Indicator",
                "SpacingMark",
                "L",
                "V",
                "T",
                "LV",
                "LVT",
                "ZWJ",
            ],
        }
    }

    /// `IndicPositionalCategory.txt`
    pub fn indic_positional() -> Self {
        Self {
            file_name: "IndicPositionalCategory.txt",
            property_name: "Indic_Positional_Category",
            property_values: &[
                "Right",
                "Left",
                "Visual_Order_Left",
                "Left_And_Right",
                "Top",
                "Bottom",
                "Top_And_Bottom",
                "Top_And_Right",
                "Top_And_Left",
                "Top_And_Left_And_Right",
                "Bottom_And_Right",
                "Bottom_And_Left",
                "Top_And_Bottom_And_Right",
                "Top_And_Bottom_And_Left",
                "Overstruck",
            ],
        }
    }

    /// `IndicSyllabicCategory.txt`
    pub fn indic_syllabic() -> Self {
        Self {
            file_name: "IndicSyllabicCategory.txt",
            property_name: "Indic_Syllabic_Category",
            property_values: &[
                "Bindu",
                "Visarga",
                "Avagraha",
                "Nukta",
                "Virama",
                "Pure_Killer",
                "Invisible_Stacker",
                "Vowel_Independent",
                "Vowel_Dependent",
                "Vowel",
                "Consonant_Placeholder",
                "Consonant",
                "Consonant_Dead",
                "Consonant_With_Stacker",
                "Consonant_Prefixed",
                "Consonant_Preceding_Repha",
                "Consonant_Initial_Postfixed",
                "Consonant_Succeeding_Repha",
                "Consonant_Subjoined",
                "Consonant_Medial",
                "Consonant_Final",
                "Consonant_Head_Letter",
                "Modifying_Letter",
                "Tone_Letter",
                "Tone_Mark",
                "Gemination_Mark",
                "Cantillation_Mark",
                "Register_Shifter",
                "Syllable_Modifier",
                "Consonant_Killer",
                "Non_Joiner",
                "Joiner",
                "Number_Joiner",
                "Number",
                "Brahmi_Joining_Number",
            ],
        }
    }

    /// `SentenceBreakProperty.txt`
    pub fn sentence_break() -> Self {
        Self {
            file_name: "SentenceBreakProperty.txt",
            property_name: "Sentence_Break",
            property_values: &[
                "CR", "LF", "Extend", "Sep", "Format", "Sp", "Lower",
                "Upper", "OLetter", "Numeric", "ATerm", "STerm", "Close",
                "SContinue",
            ],
        }
    }

    /// `WordBreakProperty.txt`
    pub fn word_break() -> Self {
        Self {
            file_name: "WordBreakProperty.txt",
            property_name: "Word_Break",
            property_values: &[
                "Double_Quote",
                "Single_Quote",
                "Hebrew_Letter",
                "CR",
                "LF",
                "Newline",
                "Extend",
                "Regional_Indicator",
                "Format",
                "Katakana",
                "ALetter",
                "MidLetter",
                "MidNum",
                "MidNumLet",
                "Numeric",
                "ExtendNumLet",
                "ZWJ",
                "WSegSpace",
            ],
        }
    }
}

impl UcdCodec for CategoryCodec {
    fn file_name(&self) -> &'static str {
        self.file_name
    }

    fn property_names(&self) -> &[&'static str] {
        slice::from_ref(&self.property_name)
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
            .subtable_mut(self.property_name)
            .entries
            .extend(entries_from_string_map(&values));
        Ok(())
    }

    fn decompile(
        &self,
        table: &PuaaTable,
        out: &mut dyn Write,
    ) -> Result<(), UcdError> {
        let Some(subtable) = table.subtable(self.property_name) else {
            return Ok(());
        };
        if subtable.entries.is_empty() {
            return Ok(());
        }
        let mut runs = runs_from_entries(&subtable.entries);
        runs.sort_by_key(|run| {
            let value = run.property_value(run.first_code_point());
            let value = value.unwrap_or_default();
            let rank = self
                .property_values
                .iter()
                .position(|v| *v == value)
                .unwrap_or(usize::MAX);
            (rank, value, run.first_code_point(), run.last_code_point())
        });
        for run in runs {
            let value = run
                .property_value(run.first_code_point())
                .unwrap_or_default();
            writeln!(
                out,
                "{:<14}; {}",
                join_range(run.first_code_point(), run.last_code_point()),
                value
            )?;
        }
        Ok(())
    }
}

/// Codec for a file listing binary properties, one subtable per property
/// token (e.g. `PropList.txt`, `emoji-data.txt`).
pub struct PropListCodec {
    file_name: &'static str,
    property_names: &'static [&'static str],
}

impl PropListCodec {
    /// `PropList.txt`
    pub fn prop_list() -> Self {
        Self {
            file_name: "PropList.txt",
            property_names: &[
                "White_Space",
                "Bidi_Control",
                "Join_Control",
                "Dash",
                "Hyphen",
                "Quotation_Mark",
                "Terminal_Punctuation",
                "Other_Math",
                "Hex_Digit",
                "ASCII_Hex_Digit",
                "Other_Alphabetic",
                "Ideographic",
                "Diacritic",
                "Extender",
                "Other_Lowercase",
                "Other_Uppercase",
                "Noncharacter_Code_Point",
                "Other_Grapheme_Extend",
                "IDS_Binary_Operator",
                "IDS_Trinary_Operator",
                "IDS_Unary_Operator",
                "Radical",
                "Unified_Ideograph",
                "Other_Default_Ignorable_Code_Point",
                "Deprecated",
                "Soft_Dotted",
                "Logical_Order_Exception",
                "Other_ID_Start",
                "Other_ID_Continue",
                "ID_Compat_Math_Continue",
                "ID_Compat_Math_Start",
                "Sentence_Terminal",
                "Variation_Selector",
                "Pattern_White_Space",
                "Pattern_Syntax",
                "Prepended_Concatenation_Mark",
                "Regional_Indicator",
            ],
        }
    }

    /// `emoji-data.txt`
    pub fn emoji_data() -> Self {
        Self {
            file_name: "emoji-data.txt",
            property_names: &[
                "Emoji",
                "Emoji_Presentation",
                "Emoji_Modifier",
                "Emoji_Modifier_Base",
                "Emoji_Component",
                "Extended_Pictographic",
            ],
        }
    }
}

impl UcdCodec for PropListCodec {
    fn file_name(&self) -> &'static str {
        self.file_name
    }

    fn property_names(&self) -> &[&'static str] {
        self.property_names
    }

    fn compile(
        &self,
        table: &mut PuaaTable,
        text: &str,
    ) -> Result<(), UcdError> {
        let mut props: BTreeMap<String, BTreeMap<u32, bool>> =
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
            let prop = fields[1].trim();
            let map = props.entry(prop.to_string()).or_default();
            for cp in first..=last {
                map.insert(cp, true);
            }
        }
        for (prop, map) in &props {
            table
                .subtable_mut(prop)
                .entries
                .extend(entries_from_boolean_map(map));
        }
        Ok(())
    }

    fn decompile(
        &self,
        table: &PuaaTable,
        out: &mut dyn Write,
    ) -> Result<(), UcdError> {
        for prop in self.property_names {
            let Some(subtable) = table.subtable(prop) else {
                continue;
            };
            if subtable.entries.is_empty() {
                continue;
            }
            for run in runs_from_entries(&subtable.entries) {
                if run.property_value(run.first_code_point()).as_deref()
                    == Some("Y")
                {
                    writeln!(
                        out,
                        "{:<14}; {}",
                        join_range(
                            run.first_code_point(),
                            run.last_code_point()
                        ),
                        prop
                    )?;
                }
            }
        }
        Ok(())
    }
}

/// Codec for a file carrying one free-form value per range, emitted in
/// code-point order (e.g. `EastAsianWidth.txt`).
pub struct StringCodec {
    file_name: &'static str,
    property_name: &'static str,
    padded: bool,
}

impl StringCodec {
    /// `EastAsianWidth.txt`
    pub fn east_asian_width() -> Self {
        Self {
            file_name: "EastAsianWidth.txt",
            property_name: "East_Asian_Width",
            padded: false,
        }
    }

    /// `LineBreak.txt`
    pub fn line_break() -> Self {
        Self {
            file_name: "LineBreak.txt",
            property_name: "Line_Break",
            padded: false,
        }
    }

    /// `VerticalOrientation.txt`
    pub fn vertical_orientation() -> Self {
        Self {
            file_name: "VerticalOrientation.txt",
            property_name: "Vertical_Orientation",
            padded: true,
        }
    }
}

impl UcdCodec for StringCodec {
    fn file_name(&self) -> &'static str {
        self.file_name
    }

    fn property_names(&self) -> &[&'static str] {
        slice::from_ref(&self.property_name)
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
            .subtable_mut(self.property_name)
            .entries
            .extend(entries_from_string_map(&values));
        Ok(())
    }

    fn decompile(
        &self,
        table: &PuaaTable,
        out: &mut dyn Write,
    ) -> Result<(), UcdError> {
        let Some(subtable) = table.subtable(self.property_name) else {
            return Ok(());
        };
        if subtable.entries.is_empty() {
            return Ok(());
        }
        for run in runs_from_entries(&subtable.entries) {
            let range =
                join_range(run.first_code_point(), run.last_code_point());
            let value = run
                .property_value(run.first_code_point())
                .unwrap_or_default();
            if self.padded {
                writeln!(out, "{:<14}; {}", range, value)?;
            } else {
                writeln!(out, "{};{}", range, value)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "simple_test.rs"]
mod tests;
