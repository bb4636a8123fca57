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

//! Tests for the head table module

use std::{io::Cursor, num::Wrapping};

use super::*;

fn head_payload() -> Vec<u8> {
    vec![
        0x00, 0x01, 0x00, 0x00, // version
        0x00, 0x00, 0x00, 0x01, // fontRevision
        0xDE, 0xAD, 0xBE, 0xEF, // checksumAdjustment
        0x5F, 0x0F, 0x3C, 0xF5, // magic
    ]
}

#[test]
fn test_head_table_rejects_truncated_payload() {
    let result = TableHead::new(vec![0; 11]);
    assert!(result.is_err());
    assert!(matches!(
        result.err().unwrap(),
        FontIoError::LoadTableTruncated(FontTag::HEAD)
    ));
}

#[test]
fn test_head_table_checksum_adjustment_round_trip() {
    let mut head = TableHead::new(head_payload()).unwrap();
    assert_eq!(head.checksum_adjustment(), 0xDEADBEEF);
    head.set_checksum_adjustment(0x12345678);
    assert_eq!(head.checksum_adjustment(), 0x12345678);
}

#[test]
fn test_head_table_checksum_treats_adjustment_as_zero() {
    let head = TableHead::new(head_payload()).unwrap();
    let expected =
        Wrapping(0x00010000u32) + Wrapping(1) + Wrapping(0x5F0F3CF5);
    assert_eq!(head.checksum(), expected);

    // Rewriting the slot must not change the checksum.
    let mut patched = TableHead::new(head_payload()).unwrap();
    patched.set_checksum_adjustment(0);
    assert_eq!(patched.checksum(), expected);
}

#[test]
fn test_head_table_read_write_preserves_payload() {
    let payload = head_payload();
    let mut reader = Cursor::new(payload.clone());
    let head =
        TableHead::from_reader_exact(&mut reader, 0, payload.len()).unwrap();
    assert_eq!(head.len(), payload.len() as u32);
    let mut buffer = Vec::new();
    head.write(&mut buffer).unwrap();
    assert_eq!(buffer, payload);
}

#[test]
fn test_head_table_write_pads_odd_length() {
    let mut payload = head_payload();
    payload.push(0x99);
    let head = TableHead::new(payload.clone()).unwrap();
    let mut buffer = Vec::new();
    head.write(&mut buffer).unwrap();
    assert_eq!(buffer.len(), 20);
    assert_eq!(&buffer[..17], &payload[..]);
    assert_eq!(&buffer[17..], &[0, 0, 0]);
}
