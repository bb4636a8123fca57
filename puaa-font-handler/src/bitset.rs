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

//! Dense bitset over the Unicode code space.

/// One bit past the last Unicode code point.
const CODE_POINT_LIMIT: u32 = 0x110000;

/// A dense bitset over `[0, 0x110000)`, used for range-overlap detection
/// when merging UCD sources and for subtable sortability checks.
pub struct CodePointBitSet {
    words: Vec<u64>,
}

impl CodePointBitSet {
    /// Creates an empty bitset covering the full code space.
    pub fn new() -> Self {
        Self {
            words: vec![0; (CODE_POINT_LIMIT / u64::BITS) as usize],
        }
    }

    /// Returns whether the bit for `cp` is set. Out-of-range code points
    /// read as unset.
    pub fn get(&self, cp: u32) -> bool {
        if cp >= CODE_POINT_LIMIT {
            return false;
        }
        self.words[(cp / u64::BITS) as usize] & (1 << (cp % u64::BITS)) != 0
    }

    /// Sets the bit for `cp`. Out-of-range code points are ignored.
    pub fn set(&mut self, cp: u32) {
        if cp >= CODE_POINT_LIMIT {
            return;
        }
        self.words[(cp / u64::BITS) as usize] |= 1 << (cp % u64::BITS);
    }

    /// Sets all bits in the closed range `[first, last]`.
    pub fn set_all(&mut self, first: u32, last: u32) {
        for cp in first..=last.min(CODE_POINT_LIMIT - 1) {
            self.set(cp);
        }
    }

    /// Returns whether any bit in the closed range `[first, last]` is set.
    pub fn get_any(&self, first: u32, last: u32) -> bool {
        (first..=last.min(CODE_POINT_LIMIT - 1)).any(|cp| self.get(cp))
    }
}

impl Default for CodePointBitSet {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "bitset_test.rs"]
mod tests;
