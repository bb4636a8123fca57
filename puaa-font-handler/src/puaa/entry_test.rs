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

//! Tests for PUAA entries

use super::*;

#[test]
fn test_entry_contains() {
    let entry = PuaaEntry::new(0x10, 0x20, PuaaValue::Boolean(true));
    assert!(entry.contains(0x10));
    assert!(entry.contains(0x20));
    assert!(!entry.contains(0x0F));
    assert!(!entry.contains(0x21));
}

#[test]
fn test_entry_canonical_string_forms() {
    let single =
        PuaaEntry::new(0, 0, PuaaValue::Single("Lo".to_string()));
    assert_eq!(single.property_value(0), Some("Lo".to_string()));

    let multiple = PuaaEntry::new(
        0x41,
        0x42,
        PuaaValue::Multiple(vec!["A".to_string(), "B".to_string()]),
    );
    assert_eq!(multiple.property_value(0x41), Some("A".to_string()));
    assert_eq!(multiple.property_value(0x42), Some("B".to_string()));

    let boolean = PuaaEntry::new(0, 0, PuaaValue::Boolean(true));
    assert_eq!(boolean.property_value(0), Some("Y".to_string()));
    let boolean = PuaaEntry::new(0, 0, PuaaValue::Boolean(false));
    assert_eq!(boolean.property_value(0), Some("N".to_string()));

    let decimal = PuaaEntry::new(0, 0, PuaaValue::Decimal(-230));
    assert_eq!(decimal.property_value(0), Some("-230".to_string()));

    let hexadecimal = PuaaEntry::new(0, 0, PuaaValue::Hexadecimal(0x29));
    assert_eq!(hexadecimal.property_value(0), Some("0029".to_string()));

    let hex_multiple = PuaaEntry::new(
        0x41,
        0x42,
        PuaaValue::HexMultiple(vec![0x61, 0x10062]),
    );
    assert_eq!(hex_multiple.property_value(0x41), Some("0061".to_string()));
    assert_eq!(
        hex_multiple.property_value(0x42),
        Some("10062".to_string())
    );

    let hex_sequence =
        PuaaEntry::new(0, 0, PuaaValue::HexSequence(vec![0x66, 0x69]));
    assert_eq!(
        hex_sequence.property_value(0),
        Some("0066 0069".to_string())
    );
}

#[test]
fn test_entry_case_mapping_string_form() {
    let unconditional = PuaaEntry::new(
        0x130,
        0x130,
        PuaaValue::CaseMapping {
            mapping: vec![0x69, 0x307],
            condition: None,
        },
    );
    assert_eq!(
        unconditional.property_value(0x130),
        Some("0069 0307".to_string())
    );

    let conditional = PuaaEntry::new(
        0x130,
        0x130,
        PuaaValue::CaseMapping {
            mapping: vec![0x69, 0x307],
            condition: Some("tr".to_string()),
        },
    );
    assert_eq!(
        conditional.property_value(0x130),
        Some("0069 0307; tr".to_string())
    );
}

#[test]
fn test_entry_name_alias_string_form() {
    let alias = PuaaEntry::new(
        0,
        0,
        PuaaValue::NameAlias {
            alias: "NULL".to_string(),
            alias_type: "control".to_string(),
        },
    );
    assert_eq!(alias.property_value(0), Some("NULL;control".to_string()));
}

#[test]
fn test_try_append_requires_contiguity() {
    let mut entry =
        PuaaEntry::new(0x41, 0x41, PuaaValue::Single("A".to_string()));
    assert!(!entry
        .try_append(0x43, &PuaaValue::Single("A".to_string())));
    assert!(entry.try_append(0x42, &PuaaValue::Single("A".to_string())));
    assert_eq!(entry.last_code_point(), 0x42);
}

#[test]
fn test_try_append_requires_equal_value_for_scalar_kinds() {
    let mut entry =
        PuaaEntry::new(0x41, 0x41, PuaaValue::Single("A".to_string()));
    assert!(!entry
        .try_append(0x42, &PuaaValue::Single("B".to_string())));
    assert_eq!(entry.last_code_point(), 0x41);
}

#[test]
fn test_try_append_never_crosses_a_plane_boundary() {
    let mut entry = PuaaEntry::new(
        0xFFFE,
        0xFFFF,
        PuaaValue::Single("A".to_string()),
    );
    assert!(!entry
        .try_append(0x10000, &PuaaValue::Single("A".to_string())));
    assert_eq!(entry.last_code_point(), 0xFFFF);
}

#[test]
fn test_try_append_extends_multiple_with_any_value() {
    let mut entry = PuaaEntry::new(
        0x41,
        0x41,
        PuaaValue::Multiple(vec!["A".to_string()]),
    );
    assert!(entry.try_append(0x42, &PuaaValue::Single("B".to_string())));
    assert_eq!(
        entry.value(),
        &PuaaValue::Multiple(vec!["A".to_string(), "B".to_string()])
    );
    assert_eq!(entry.last_code_point(), 0x42);
}
