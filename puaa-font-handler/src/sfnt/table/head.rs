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

//! 'head' SFNT table.

use std::{
    io::{Read, Seek, SeekFrom, Write},
    num::Wrapping,
};

use byteorder::{BigEndian, ByteOrder};

use crate::{
    error::FontIoError, tag::FontTag, utils, FontDataChecksum,
    FontDataExactRead, FontDataWrite, FontTable,
};

/// The 'head' table's checksumAdjustment value should be such that the
/// whole-font checksum comes out to this value.
pub(crate) const SFNT_EXPECTED_CHECKSUM: u32 = 0xb1b0afba;

/// 'head' font table, kept as its raw payload.
///
/// Only the checksumAdjustment slot (payload bytes 8..12) is interpreted;
/// everything else passes through byte-exact, whatever length the payload
/// happens to have.
pub struct TableHead {
    data: Vec<u8>,
}

impl TableHead {
    /// Byte offset of the checksumAdjustment slot within the payload.
    const CHECKSUM_ADJUSTMENT_OFFSET: usize = 8;
    /// The payload must at least reach past the checksumAdjustment slot.
    const MINIMUM_SIZE: usize = 12;

    /// Creates a 'head' table over the given payload.
    pub fn new(data: Vec<u8>) -> Result<Self, FontIoError> {
        if data.len() < Self::MINIMUM_SIZE {
            return Err(FontIoError::LoadTableTruncated(FontTag::HEAD));
        }
        Ok(Self { data })
    }

    /// Returns the whole-file checksum adjustment currently in the payload.
    pub fn checksum_adjustment(&self) -> u32 {
        BigEndian::read_u32(
            &self.data[Self::CHECKSUM_ADJUSTMENT_OFFSET
                ..Self::CHECKSUM_ADJUSTMENT_OFFSET + 4],
        )
    }

    /// Writes a new whole-file checksum adjustment into the payload.
    pub fn set_checksum_adjustment(&mut self, adjustment: u32) {
        BigEndian::write_u32(
            &mut self.data[Self::CHECKSUM_ADJUSTMENT_OFFSET
                ..Self::CHECKSUM_ADJUSTMENT_OFFSET + 4],
            adjustment,
        );
    }
}

impl FontDataExactRead for TableHead {
    type Error = FontIoError;

    fn from_reader_exact<T: Read + Seek + ?Sized>(
        reader: &mut T,
        offset: u64,
        size: usize,
    ) -> Result<Self, Self::Error> {
        reader.seek(SeekFrom::Start(offset))?;
        let mut data = vec![0; size];
        reader.read_exact(&mut data)?;
        Self::new(data)
    }
}

impl FontDataWrite for TableHead {
    type Error = FontIoError;

    fn write<TDest: Write + ?Sized>(
        &self,
        dest: &mut TDest,
    ) -> Result<(), Self::Error> {
        dest.write_all(&self.data[..])
            .map_err(FontIoError::FailedToWriteTableData)?;
        let limit = self.data.len() % 4;
        if limit > 0 {
            let padding = vec![0; 4 - limit];
            dest.write_all(&padding)
                .map_err(FontIoError::FailedToWriteTableData)?;
        }
        Ok(())
    }
}

impl FontDataChecksum for TableHead {
    fn checksum(&self) -> Wrapping<u32> {
        // The checksumAdjustment slot is always treated as zero during
        // check summing; it is word-aligned, so subtracting it out of the
        // raw sum is exact.
        utils::checksum(&self.data) - Wrapping(self.checksum_adjustment())
    }
}

impl FontTable for TableHead {
    fn len(&self) -> u32 {
        self.data.len() as u32
    }
}

#[cfg(test)]
#[path = "head_test.rs"]
mod tests;
