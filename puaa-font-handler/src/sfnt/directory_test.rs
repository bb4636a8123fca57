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

//! Tests for SFNT directory module

use std::io::Cursor;

use super::*;

fn entry_bytes(tag: &[u8; 4], checksum: u32, offset: u32, length: u32) -> Vec<u8> {
    let mut bytes = tag.to_vec();
    bytes.extend_from_slice(&checksum.to_be_bytes());
    bytes.extend_from_slice(&offset.to_be_bytes());
    bytes.extend_from_slice(&length.to_be_bytes());
    bytes
}

#[test]
fn test_directory_entry_read_write_round_trip() {
    let bytes = entry_bytes(b"PUAA", 0x1234, 0x50, 0x20);
    let mut reader = Cursor::new(bytes.clone());
    let entry = SfntDirectoryEntry::from_reader(&mut reader).unwrap();
    assert_eq!(entry.tag, FontTag::PUAA);
    assert_eq!(entry.checksum, 0x1234);
    assert_eq!(entry.offset, 0x50);
    assert_eq!(entry.length, 0x20);
    let mut buffer = Vec::new();
    entry.write(&mut buffer).unwrap();
    assert_eq!(buffer, bytes);
}

#[test]
fn test_directory_entry_read_exact_with_bad_size() {
    let mut reader = Cursor::new(vec![0; 16]);
    let result = SfntDirectoryEntry::from_reader_exact(&mut reader, 0, 15);
    assert!(result.is_err());
    assert!(matches!(
        result.err().unwrap(),
        FontIoError::InvalidSizeForDirectoryEntry {
            expected: 16,
            got: 15
        }
    ));
}

#[test]
fn test_directory_entry_checksum() {
    let entry = SfntDirectoryEntry {
        tag: FontTag::HEAD,
        checksum: 1,
        offset: 2,
        length: 3,
    };
    assert_eq!(
        entry.checksum(),
        Wrapping(u32::from_be_bytes(*b"head")) + Wrapping(6)
    );
}

#[test]
fn test_directory_from_reader_with_count() {
    let mut bytes = entry_bytes(b"head", 0, 0x40, 0x36);
    bytes.extend(entry_bytes(b"PUAA", 0, 0x80, 0x10));
    let mut reader = Cursor::new(bytes);
    let directory = SfntDirectory::from_reader_with_count(&mut reader, 2).unwrap();
    assert_eq!(directory.entries().len(), 2);
    assert_eq!(directory.entries()[0].tag, FontTag::HEAD);
    assert_eq!(directory.entries()[1].tag, FontTag::PUAA);
}

#[test]
fn test_directory_from_reader_exact_requires_alignment() {
    let mut reader = Cursor::new(vec![0; 20]);
    let result = SfntDirectory::from_reader_exact(&mut reader, 0, 20);
    assert!(result.is_err());
    assert!(matches!(
        result.err().unwrap(),
        FontIoError::InvalidSizeForDirectory(20)
    ));
}

#[test]
fn test_directory_physical_order() {
    let mut directory = SfntDirectory::new();
    directory.add_entry(SfntDirectoryEntry {
        tag: FontTag::HEAD,
        checksum: 0,
        offset: 0x100,
        length: 4,
    });
    directory.add_entry(SfntDirectoryEntry {
        tag: FontTag::PUAA,
        checksum: 0,
        offset: 0x40,
        length: 4,
    });
    let physical = directory.physical_order();
    assert_eq!(physical[0].tag, FontTag::PUAA);
    assert_eq!(physical[1].tag, FontTag::HEAD);
    // physical_order does not disturb the stored order
    assert_eq!(directory.entries()[0].tag, FontTag::HEAD);
}

#[test]
fn test_directory_sort_entries_by_tag() {
    let mut directory = SfntDirectory::new();
    directory.add_entry(SfntDirectoryEntry {
        tag: FontTag::HEAD,
        checksum: 0,
        offset: 0,
        length: 0,
    });
    directory.add_entry(SfntDirectoryEntry {
        tag: FontTag::PUAA,
        checksum: 0,
        offset: 0,
        length: 0,
    });
    directory.sort_entries(|entry| entry.tag);
    assert_eq!(directory.entries()[0].tag, FontTag::PUAA);
    assert_eq!(directory.entries()[1].tag, FontTag::HEAD);
}

#[test]
fn test_directory_checksum_sums_entries() {
    let mut directory = SfntDirectory::new();
    assert_eq!(directory.checksum(), Wrapping(0));
    directory.add_entry(SfntDirectoryEntry {
        tag: FontTag::PUAA,
        checksum: 1,
        offset: 2,
        length: 3,
    });
    assert_eq!(
        directory.checksum(),
        Wrapping(u32::from_be_bytes(*b"PUAA")) + Wrapping(6)
    );
}
