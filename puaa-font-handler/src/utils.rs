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

//! Various utilities for working with fonts.

use std::{mem::size_of, num::Wrapping};

use byteorder::{BigEndian, ByteOrder};

/// Round the given value up to the next multiple of four (4).
pub(crate) fn align_to_four(size: u32) -> u32 {
    (size + 3) & (!3)
}

/// Computes a 32-bit big-endian OpenType-style checksum on the given byte
/// array, which is presumed to start on a 4-byte boundary.
///
/// # Remarks
/// Trailing pad bytes do not affect this checksum - it's not a real CRC.
/// Each of the trailing 1-3 bytes (if any) contributes as if the buffer
/// were zero-padded to the next word.
pub(crate) fn checksum(bytes: &[u8]) -> Wrapping<u32> {
    let words = bytes.chunks_exact(size_of::<u32>());
    let frag = words.remainder();
    let frag_cksum = frag
        .iter()
        .enumerate()
        .fold(Wrapping(0_u32), |acc, (i, byte)| {
            acc + Wrapping((*byte as u32) << (((i & 3) ^ 3) * u8::BITS as usize))
        });
    words.fold(frag_cksum, |running_cksum, exact_chunk| {
        running_cksum + Wrapping(BigEndian::read_u32(exact_chunk))
    })
}

/// Assembles two u16 values (with `hi` being the more-significant u16 halfword,
/// and `lo` being the less-significant u16 halfword) into a u32, returning a
/// u32 fullword composed of the given halfwords, with `hi` in the
/// more-significant position.
pub(crate) fn u32_from_u16_pair(hi: u16, lo: u16) -> Wrapping<u32> {
    Wrapping((hi as u32 * 65536) + lo as u32)
}

#[cfg(test)]
#[path = "utils_test.rs"]
mod tests;
