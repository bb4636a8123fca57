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

//! Unihan-family codecs: `U+HHHH<TAB>property<TAB>value` rows.

use std::{collections::BTreeMap, io::Write, sync::LazyLock};

use regex::Regex;

use super::UcdCodec;
use crate::{
    error::UcdError,
    puaa::{
        runs::{
            entries_from_decimal_string_map,
            entries_from_hexadecimal_string_map, entries_from_name_map,
            map_from_entries,
        },
        PuaaTable,
    },
};

static FIELD_SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("field splitter is valid"));

/// Codec for one Unihan-style database file. Each property picks the
/// narrowest entry kind that round-trips its values: decimal, else
/// hexadecimal, else the name-map string scheme.
pub struct UnihanCodec {
    file_name: &'static str,
    property_names: &'static [&'static str],
}

impl UnihanCodec {
    /// `NushuSources.txt`
    pub fn nushu_sources() -> Self {
        Self {
            file_name: "NushuSources.txt",
            property_names: &["kSrc_NushuDuben", "kReading"],
        }
    }

    /// `TangutSources.txt`
    pub fn tangut_sources() -> Self {
        Self {
            file_name: "TangutSources.txt",
            property_names: &["kTGT_MergedSrc", "kRSTUnicode"],
        }
    }

    /// `Unihan_DictionaryIndices.txt`
    pub fn dictionary_indices() -> Self {
        Self {
            file_name: "Unihan_DictionaryIndices.txt",
            property_names: &[
                "kCheungBauerIndex",
                "kCihaiT",
                "kCowles",
                "kDaeJaweon",
                "kFennIndex",
                "kGSR",
                "kHanYu",
                "kIRGDaeJaweon",
                "kIRGDaiKanwaZiten",
                "kIRGHanyuDaZidian",
                "kIRGKangXi",
                "kKangXi",
                "kKarlgren",
                "kLau",
                "kMatthews",
                "kMeyerWempe",
                "kMorohashi",
                "kNelson",
                "kSBGY",
                "kSMSZD2003Index",
            ],
        }
    }

    /// `Unihan_DictionaryLikeData.txt`
    pub fn dictionary_like_data() -> Self {
        Self {
            file_name: "Unihan_DictionaryLikeData.txt",
            property_names: &[
                "kAlternateTotalStrokes",
                "kCangjie",
                "kCheungBauer",
                "kFenn",
                "kFourCornerCode",
                "kFrequency",
                "kGradeLevel",
                "kHDZRadBreak",
                "kHKGlyph",
                "kMojiJoho",
                "kPhonetic",
                "kStrange",
                "kUnihanCore2020",
            ],
        }
    }

    /// `Unihan_IRGSources.txt`
    pub fn irg_sources() -> Self {
        Self {
            file_name: "Unihan_IRGSources.txt",
            property_names: &[
                "kCompatibilityVariant",
                "kIICore",
                "kIRG_GSource",
                "kIRG_HSource",
                "kIRG_JSource",
                "kIRG_KPSource",
                "kIRG_KSource",
                "kIRG_MSource",
                "kIRG_SSource",
                "kIRG_TSource",
                "kIRG_UKSource",
                "kIRG_USource",
                "kIRG_VSource",
                "kRSUnicode",
                "kTotalStrokes",
            ],
        }
    }

    /// `Unihan_NumericValues.txt`
    pub fn numeric_values() -> Self {
        Self {
            file_name: "Unihan_NumericValues.txt",
            property_names: &[
                "kAccountingNumeric",
                "kOtherNumeric",
                "kPrimaryNumeric",
                "kVietnameseNumeric",
                "kZhuangNumeric",
            ],
        }
    }

    /// `Unihan_OtherMappings.txt`
    pub fn other_mappings() -> Self {
        Self {
            file_name: "Unihan_OtherMappings.txt",
            property_names: &[
                "kBigFive",
                "kCCCII",
                "kCNS1986",
                "kCNS1992",
                "kEACC",
                "kGB0",
                "kGB1",
                "kGB3",
                "kGB5",
                "kGB7",
                "kGB8",
                "kHKSCS",
                "kIBMJapan",
                "kJa",
                "kJinmeiyoKanji",
                "kJis0",
                "kJis1",
                "kJIS0213",
                "kJoyoKanji",
                "kKPS0",
                "kKPS1",
                "kKSC0",
                "kKSC1",
                "kKoreanEducationHanja",
                "kKoreanName",
                "kMainlandTelegraph",
                "kPseudoGB1",
                "kTaiwanTelegraph",
                "kTGH",
                "kXerox",
            ],
        }
    }

    /// `Unihan_RadicalStrokeCounts.txt`
    pub fn radical_stroke_counts() -> Self {
        Self {
            file_name: "Unihan_RadicalStrokeCounts.txt",
            property_names: &[
                "kRSAdobe_Japan1_6",
                "kRSJapanese",
                "kRSKangXi",
                "kRSKanWa",
                "kRSKorean",
            ],
        }
    }

    /// `Unihan_Readings.txt`
    pub fn readings() -> Self {
        Self {
            file_name: "Unihan_Readings.txt",
            property_names: &[
                "kCantonese",
                "kDefinition",
                "kHangul",
                "kHanyuPinlu",
                "kHanyuPinyin",
                "kJapanese",
                "kJapaneseKun",
                "kJapaneseOn",
                "kKorean",
                "kMandarin",
                "kSMSZD2003Readings",
                "kTang",
                "kTGHZ2013",
                "kVietnamese",
                "kXHC1983",
            ],
        }
    }

    /// `Unihan_Variants.txt`
    pub fn variants() -> Self {
        Self {
            file_name: "Unihan_Variants.txt",
            property_names: &[
                "kSemanticVariant",
                "kSimplifiedVariant",
                "kSpecializedSemanticVariant",
                "kSpoofingVariant",
                "kTraditionalVariant",
                "kZVariant",
            ],
        }
    }
}

/// Strips a `U+` or `0x` prefix and parses the rest as hex.
fn parse_unihan_code_point(field: &str) -> Option<u32> {
    let digits = field
        .strip_prefix("U+")
        .or_else(|| field.strip_prefix("u+"))
        .or_else(|| field.strip_prefix("0x"))
        .or_else(|| field.strip_prefix("0X"))
        .unwrap_or(field);
    u32::from_str_radix(digits, 16).ok()
}

impl UcdCodec for UnihanCodec {
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
        let mut props: BTreeMap<String, BTreeMap<u32, String>> =
            BTreeMap::new();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let fields: Vec<&str> = FIELD_SPLIT.splitn(line, 3).collect();
            if fields.len() < 3 {
                continue;
            }
            let Some(cp) = parse_unihan_code_point(fields[0]) else {
                continue;
            };
            props
                .entry(fields[1].to_string())
                .or_default()
                .insert(cp, fields[2].to_string());
        }
        for (prop, map) in &props {
            let entries = entries_from_decimal_string_map(map)
                .or_else(|| entries_from_hexadecimal_string_map(map))
                .unwrap_or_else(|| entries_from_name_map(map));
            table.subtable_mut(prop).entries.extend(entries);
        }
        Ok(())
    }

    fn decompile(
        &self,
        table: &PuaaTable,
        out: &mut dyn Write,
    ) -> Result<(), UcdError> {
        let mut props: BTreeMap<u32, BTreeMap<&str, String>> =
            BTreeMap::new();
        for &prop in self.property_names {
            let Some(subtable) = table.subtable(prop) else {
                continue;
            };
            if subtable.entries.is_empty() {
                continue;
            }
            for (cp, value) in map_from_entries(&subtable.entries) {
                props.entry(cp).or_default().insert(prop, value);
            }
        }
        for (cp, values) in &props {
            for &prop in self.property_names {
                if let Some(value) = values.get(prop) {
                    if !value.is_empty() {
                        writeln!(out, "U+{:04X}\t{}\t{}", cp, prop, value)?;
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "unihan_test.rs"]
mod tests;
