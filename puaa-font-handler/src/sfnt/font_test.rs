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

//! Tests for SFNT font module

use std::io::Cursor;

use super::*;
use crate::{
    puaa::{PuaaEntry, PuaaValue},
    utils,
};

/// A minimal TrueType file: a 'TEST' table and a 'head' whose checksum
/// adjustment slot holds 0xDEADBEEF.
fn minimal_font_bytes() -> Vec<u8> {
    let mut font = vec![
        0x00, 0x01, 0x00, 0x00, // sfntVersion
        0x00, 0x02, // numTables
        0x00, 0x20, // searchRange
        0x00, 0x01, // entrySelector
        0x00, 0x00, // rangeShift
    ];
    // Directory, sorted by tag: 'TEST' then 'head'.
    font.extend_from_slice(b"TEST");
    font.extend_from_slice(&0u32.to_be_bytes());
    font.extend_from_slice(&44u32.to_be_bytes());
    font.extend_from_slice(&4u32.to_be_bytes());
    font.extend_from_slice(b"head");
    font.extend_from_slice(&0u32.to_be_bytes());
    font.extend_from_slice(&48u32.to_be_bytes());
    font.extend_from_slice(&12u32.to_be_bytes());
    // 'TEST' payload.
    font.extend_from_slice(&[0xAA, 0xBB, 0xCC, 0xDD]);
    // 'head' payload with a bogus checksum adjustment.
    font.extend_from_slice(&[
        0x00, 0x01, 0x00, 0x00, // version
        0x00, 0x00, 0x00, 0x01, // fontRevision
        0xDE, 0xAD, 0xBE, 0xEF, // checksumAdjustment
    ]);
    font
}

fn read_minimal_font() -> SfntFont {
    let mut reader = Cursor::new(minimal_font_bytes());
    SfntFont::from_reader(&mut reader).unwrap()
}

#[test]
fn test_sfnt_font_from_reader() {
    let font = read_minimal_font();
    assert_eq!(font.header().num_tables(), 2);
    assert!(font.contains_table(&FontTag::HEAD));
    assert!(font.contains_table(&FontTag::new(*b"TEST")));
    assert!(!font.contains_table(&FontTag::PUAA));
}

#[test]
fn test_sfnt_font_write_fixes_whole_file_checksum() {
    let mut font = read_minimal_font();
    let mut buffer = Vec::new();
    font.write(&mut buffer).unwrap();
    // Summing the emitted file as big-endian words must yield the
    // OpenType-mandated constant.
    assert_eq!(utils::checksum(&buffer).0, SFNT_EXPECTED_CHECKSUM);
}

#[test]
fn test_sfnt_font_write_preserves_other_table_bytes() {
    let mut font = read_minimal_font();
    let mut buffer = Vec::new();
    font.write(&mut buffer).unwrap();
    // 'TEST' payload still present, verbatim.
    assert!(buffer
        .windows(4)
        .any(|window| window == [0xAA, 0xBB, 0xCC, 0xDD]));
}

#[test]
fn test_sfnt_font_round_trip_is_stable() {
    let mut font = read_minimal_font();
    let mut first = Vec::new();
    font.write(&mut first).unwrap();
    let mut font2 = SfntFont::from_reader(&mut Cursor::new(first.clone()))
        .unwrap();
    let mut second = Vec::new();
    font2.write(&mut second).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_sfnt_font_set_and_read_puaa_table() {
    let mut font = read_minimal_font();
    let mut table = crate::puaa::PuaaTable::new();
    table.subtable_mut("Block").entries.push(PuaaEntry::new(
        0xF1900,
        0xF19FF,
        PuaaValue::Single("Sitelen Pona".to_string()),
    ));
    font.set_puaa_table(&mut table).unwrap();
    let mut buffer = Vec::new();
    font.write(&mut buffer).unwrap();

    let reread =
        SfntFont::from_reader(&mut Cursor::new(buffer.clone())).unwrap();
    let decoded = reread.puaa_table().unwrap().unwrap();
    assert_eq!(
        decoded.property_value("Block", 0xF1900),
        Some("Sitelen Pona".to_string())
    );
    // And the checksum law still holds with the new table installed.
    assert_eq!(utils::checksum(&buffer).0, SFNT_EXPECTED_CHECKSUM);
}

#[test]
fn test_sfnt_font_puaa_blob_preserved_byte_exact() {
    let mut font = read_minimal_font();
    let mut table = crate::puaa::PuaaTable::new();
    table.subtable_mut("Block").entries.push(PuaaEntry::new(
        0xF1900,
        0xF19FF,
        PuaaValue::Single("Sitelen Pona".to_string()),
    ));
    font.set_puaa_table(&mut table).unwrap();
    let blob = match font.table(&FontTag::PUAA) {
        Some(NamedTable::Puaa(puaa)) => puaa.data().to_vec(),
        _ => panic!("PUAA table missing"),
    };

    let mut buffer = Vec::new();
    font.write(&mut buffer).unwrap();
    let reread =
        SfntFont::from_reader(&mut Cursor::new(buffer)).unwrap();
    match reread.table(&FontTag::PUAA) {
        Some(NamedTable::Puaa(puaa)) => assert_eq!(puaa.data(), &blob[..]),
        _ => panic!("PUAA table missing after rewrite"),
    }
}

#[test]
fn test_sfnt_font_strip_puaa() {
    let mut font = read_minimal_font();
    let mut table = crate::puaa::PuaaTable::new();
    table.subtable_mut("Block").entries.push(PuaaEntry::new(
        0,
        0,
        PuaaValue::Single("X".to_string()),
    ));
    font.set_puaa_table(&mut table).unwrap();
    assert!(font.remove_puaa_table());
    assert!(!font.remove_puaa_table());
    let mut buffer = Vec::new();
    font.write(&mut buffer).unwrap();
    let reread =
        SfntFont::from_reader(&mut Cursor::new(buffer)).unwrap();
    assert!(!reread.contains_table(&FontTag::PUAA));
}

#[test]
fn test_sfnt_font_missing_puaa_reads_as_none() {
    let font = read_minimal_font();
    assert!(font.puaa_table().unwrap().is_none());
}

#[test]
fn test_sfnt_font_data_only_preserves_puaa_scaler() {
    let mut font = SfntFont::data_only();
    let mut table = crate::puaa::PuaaTable::new();
    table.subtable_mut("Block").entries.push(PuaaEntry::new(
        0xF1900,
        0xF19FF,
        PuaaValue::Single("Sitelen Pona".to_string()),
    ));
    font.set_puaa_table(&mut table).unwrap();
    let mut buffer = Vec::new();
    font.write(&mut buffer).unwrap();
    assert_eq!(&buffer[0..4], b"PUAA");

    let reread =
        SfntFont::from_reader(&mut Cursor::new(buffer)).unwrap();
    assert_eq!(reread.header().sfntVersion, Magic::Puaa);
    assert_eq!(reread.header().num_tables(), 1);
}

#[test]
fn test_sfnt_font_write_with_no_tables_is_an_error() {
    let mut font = SfntFont::data_only();
    let mut buffer = Vec::new();
    let result = font.write(&mut buffer);
    assert!(result.is_err());
    assert!(matches!(
        result.err().unwrap(),
        FontIoError::SaveError(FontSaveError::NoTablesFound)
    ));
}

#[test]
fn test_sfnt_font_added_table_lands_after_existing_ones() {
    let mut font = read_minimal_font();
    let mut table = crate::puaa::PuaaTable::new();
    table.subtable_mut("Block").entries.push(PuaaEntry::new(
        0,
        0,
        PuaaValue::Single("X".to_string()),
    ));
    font.set_puaa_table(&mut table).unwrap();
    let mut buffer = Vec::new();
    font.write(&mut buffer).unwrap();

    let reread =
        SfntFont::from_reader(&mut Cursor::new(buffer)).unwrap();
    let physical = reread.directory().physical_order();
    assert_eq!(physical.last().map(|entry| entry.tag), Some(FontTag::PUAA));
}
