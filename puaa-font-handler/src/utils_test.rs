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

//! Tests for the utils module

use super::*;

#[test]
fn test_align_to_four() {
    assert_eq!(align_to_four(0), 0);
    assert_eq!(align_to_four(1), 4);
    assert_eq!(align_to_four(2), 4);
    assert_eq!(align_to_four(3), 4);
    assert_eq!(align_to_four(4), 4);
    assert_eq!(align_to_four(5), 8);
}

#[test]
fn test_checksum_whole_words() {
    let bytes = [0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x02];
    assert_eq!(checksum(&bytes), Wrapping(3));
}

#[test]
fn test_checksum_trailing_bytes_shift_into_place() {
    // A lone trailing byte counts as the high byte of a zero-padded word.
    assert_eq!(checksum(&[0x12]), Wrapping(0x12000000));
    assert_eq!(checksum(&[0x12, 0x34]), Wrapping(0x12340000));
    assert_eq!(checksum(&[0x12, 0x34, 0x56]), Wrapping(0x12345600));
    assert_eq!(checksum(&[0x12, 0x34, 0x56, 0x78]), Wrapping(0x12345678));
}

#[test]
fn test_checksum_padding_is_neutral() {
    let unpadded = [0xDE, 0xAD, 0xBE];
    let padded = [0xDE, 0xAD, 0xBE, 0x00];
    assert_eq!(checksum(&unpadded), checksum(&padded));
}

#[test]
fn test_checksum_wraps() {
    let bytes = [0xFF, 0xFF, 0xFF, 0xFF, 0x00, 0x00, 0x00, 0x02];
    assert_eq!(checksum(&bytes), Wrapping(1));
}

#[test]
fn test_u32_from_u16_pair() {
    assert_eq!(u32_from_u16_pair(0x0001, 0x0002), Wrapping(0x00010002));
    assert_eq!(u32_from_u16_pair(0xFFFF, 0xFFFF), Wrapping(0xFFFFFFFF));
}
