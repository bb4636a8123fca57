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

//! Tests for the binary PUAA compiler

use super::*;
use crate::puaa::{PuaaEntry, PuaaValue};

fn count_occurrences(haystack: &[u8], needle: &[u8]) -> usize {
    haystack
        .windows(needle.len())
        .filter(|window| *window == needle)
        .count()
}

#[test]
fn test_minify_packs_short_ascii() {
    assert_eq!(minify(b""), Some(0x80000000));
    assert_eq!(minify(b"Y"), Some(0x80000000 | 0x59000000));
    assert_eq!(
        minify(b"Lo"),
        Some(0x80000000 | (0x4C << 24) | (0x6F << 16))
    );
    assert_eq!(minify(b"ABCD"), Some(0xC1424344));
}

#[test]
fn test_minify_rejects_long_or_non_ascii_strings() {
    assert_eq!(minify(b"ABCDE"), None);
    assert_eq!(minify(&[0x80]), None);
    assert_eq!(minify(&[0x41, 0x00]), None);
    assert_eq!(minify("é".as_bytes()), None);
}

#[test]
fn test_compile_blocks_single_line_blob() {
    // One Block subtable, one Single entry: the blob is a header, one
    // directory record, one subtable record, and two pool strings.
    let mut table = crate::puaa::PuaaTable::new();
    table.subtable_mut("Block").entries.push(PuaaEntry::new(
        0xF1900,
        0xF19FF,
        PuaaValue::Single("Sitelen Pona".to_string()),
    ));
    let blob = table.compile().unwrap();
    assert_eq!(blob.len(), 43);
    assert!(blob.len() <= 96);
    // version 1, one property
    assert_eq!(&blob[0..4], &[0x00, 0x01, 0x00, 0x01]);
    // property name ref points at the pool copy of "Block"
    assert_eq!(&blob[4..8], &24u32.to_be_bytes());
    // subtable offset
    assert_eq!(&blob[8..12], &12u32.to_be_bytes());
    // entry record: Single, plane 0x0F, F1900..F19FF
    assert_eq!(
        &blob[12..24],
        &[
            0x00, 0x01, // entryCount
            0x01, // Single
            0x0F, // plane
            0x19, 0x00, // firstLow
            0x19, 0xFF, // lastLow
            0x00, 0x00, 0x00, 0x1E, // value ref
        ]
    );
    // pool: length-prefixed "Block" then "Sitelen Pona"
    assert_eq!(&blob[24..30], b"\x05Block");
    assert_eq!(&blob[30..43], b"\x0CSitelen Pona");
}

#[test]
fn test_inline_string_idempotence() {
    let mut table = crate::puaa::PuaaTable::new();
    table
        .subtable_mut("General_Category")
        .entries
        .push(PuaaEntry::new(
            0xF1900,
            0xF19FF,
            PuaaValue::Single("Lo".to_string()),
        ));
    let blob = table.compile().unwrap();
    // "Lo" fits the inline scheme, so the pool only holds the property
    // name.
    assert_eq!(blob.len(), 4 + 8 + 2 + 10 + 1 + "General_Category".len());
    let decoded = crate::puaa::PuaaTable::decompile(&blob).unwrap();
    assert_eq!(
        decoded.property_value("General_Category", 0xF1900),
        Some("Lo".to_string())
    );
}

#[test]
fn test_empty_string_round_trips_as_present() {
    let mut table = crate::puaa::PuaaTable::new();
    table
        .subtable_mut("Jamo_Short_Name")
        .entries
        .push(PuaaEntry::new(
            0x110B,
            0x110B,
            PuaaValue::Single(String::new()),
        ));
    let blob = table.compile().unwrap();
    let decoded = crate::puaa::PuaaTable::decompile(&blob).unwrap();
    assert_eq!(
        decoded.property_value("Jamo_Short_Name", 0x110B),
        Some(String::new())
    );
}

#[test]
fn test_pool_deduplicates_repeated_strings() {
    let mut table = crate::puaa::PuaaTable::new();
    for property in ["PropA", "PropB", "PropC"] {
        table.subtable_mut(property).entries.push(PuaaEntry::new(
            0,
            0,
            PuaaValue::Single("LongerThanFourBytes".to_string()),
        ));
    }
    let blob = table.compile().unwrap();
    assert_eq!(count_occurrences(&blob, b"LongerThanFourBytes"), 1);
}

#[test]
fn test_property_names_are_always_pool_form() {
    // "Age" would fit inline, but property names must live in the pool.
    let mut table = crate::puaa::PuaaTable::new();
    table.subtable_mut("Age").entries.push(PuaaEntry::new(
        0,
        0,
        PuaaValue::Single("1.1".to_string()),
    ));
    let blob = table.compile().unwrap();
    assert_eq!(count_occurrences(&blob, b"\x03Age"), 1);
    let name_ref = u32::from_be_bytes([blob[4], blob[5], blob[6], blob[7]]);
    assert_eq!(name_ref & 0x8000_0000, 0);
}

#[test]
fn test_compile_of_decompiled_blob_is_byte_identical() {
    let mut table = crate::puaa::PuaaTable::new();
    table.subtable_mut("Bool").entries.push(PuaaEntry::new(
        0x20,
        0x2F,
        PuaaValue::Boolean(true),
    ));
    table.subtable_mut("Case").entries.push(PuaaEntry::new(
        0x130,
        0x130,
        PuaaValue::CaseMapping {
            mapping: vec![0x69, 0x307],
            condition: Some("tr".to_string()),
        },
    ));
    table.subtable_mut("Dec").entries.push(PuaaEntry::new(
        0x300,
        0x300,
        PuaaValue::Decimal(-230),
    ));
    table.subtable_mut("Hex").entries.push(PuaaEntry::new(
        0x28,
        0x28,
        PuaaValue::Hexadecimal(0x29),
    ));
    table.subtable_mut("HexM").entries.push(PuaaEntry::new(
        0x41,
        0x43,
        PuaaValue::HexMultiple(vec![0x61, 0x62, 0x63]),
    ));
    table.subtable_mut("HexS").entries.push(PuaaEntry::new(
        0xFB00,
        0xFB00,
        PuaaValue::HexSequence(vec![0x66, 0x66]),
    ));
    table.subtable_mut("Multi").entries.push(PuaaEntry::new(
        0x41,
        0x42,
        PuaaValue::Multiple(vec![
            "LATIN CAPITAL LETTER A".to_string(),
            "LATIN CAPITAL LETTER B".to_string(),
        ]),
    ));
    table.subtable_mut("Alias").entries.push(PuaaEntry::new(
        0,
        0,
        PuaaValue::NameAlias {
            alias: "NULL".to_string(),
            alias_type: "control".to_string(),
        },
    ));

    let first = table.compile().unwrap();
    let mut decoded = crate::puaa::PuaaTable::decompile(&first).unwrap();
    let second = decoded.compile().unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_compile_preserves_insertion_order_of_overlapping_entries() {
    let mut table = crate::puaa::PuaaTable::new();
    let name = table.subtable_mut("Name");
    name.entries.push(PuaaEntry::new(
        0xF1900,
        0xF1901,
        PuaaValue::Single("SITELEN PONA ".to_string()),
    ));
    name.entries.push(PuaaEntry::new(
        0xF1900,
        0xF1900,
        PuaaValue::Single("A".to_string()),
    ));
    name.entries.push(PuaaEntry::new(
        0xF1901,
        0xF1901,
        PuaaValue::Single("E".to_string()),
    ));
    let blob = table.compile().unwrap();
    let decoded = crate::puaa::PuaaTable::decompile(&blob).unwrap();
    let entries = &decoded.subtable("Name").unwrap().entries;
    // The wide prefix entry must still come first or concatenation
    // falls apart.
    assert_eq!(entries[0].last_code_point(), 0xF1901);
    assert_eq!(
        decoded.property_value("Name", 0xF1900),
        Some("SITELEN PONA A".to_string())
    );
    assert_eq!(
        decoded.property_value("Name", 0xF1901),
        Some("SITELEN PONA E".to_string())
    );
}

#[test]
fn test_compile_sorts_sortable_subtables_by_range() {
    let mut table = crate::puaa::PuaaTable::new();
    let blocks = table.subtable_mut("Block");
    blocks.entries.push(PuaaEntry::new(
        0x100,
        0x1FF,
        PuaaValue::Single("Later".to_string()),
    ));
    blocks.entries.push(PuaaEntry::new(
        0x00,
        0xFF,
        PuaaValue::Single("Earlier".to_string()),
    ));
    let blob = table.compile().unwrap();
    let decoded = crate::puaa::PuaaTable::decompile(&blob).unwrap();
    let entries = &decoded.subtable("Block").unwrap().entries;
    assert_eq!(entries[0].first_code_point(), 0x00);
    assert_eq!(entries[1].first_code_point(), 0x100);
}

#[test]
fn test_compile_rejects_pool_strings_over_255_bytes() {
    let mut table = crate::puaa::PuaaTable::new();
    table.subtable_mut("Name").entries.push(PuaaEntry::new(
        0,
        0,
        PuaaValue::Single("X".repeat(300)),
    ));
    let result = table.compile();
    assert!(result.is_err());
    assert!(matches!(
        result.err().unwrap(),
        crate::error::FontIoError::StringTooLong(300)
    ));
}
