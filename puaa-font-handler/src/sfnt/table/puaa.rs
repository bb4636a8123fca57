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

//! 'PUAA' SFNT table.

use std::io::{Read, Seek, SeekFrom, Write};

use crate::{
    error::FontIoError, puaa::PuaaTable, utils, FontDataChecksum,
    FontDataExactRead, FontDataWrite, FontTable,
};

/// 'PUAA' font table, holding the compiled property-database blob.
///
/// The blob is marshalled to and from the [`PuaaTable`] property model by
/// the binary codec in [`crate::puaa`].
pub struct TablePuaa {
    data: Vec<u8>,
}

impl TablePuaa {
    /// Creates a PUAA table over an already-compiled blob.
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    /// The compiled blob bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Decompiles the blob into the property model.
    pub fn to_table(&self) -> Result<PuaaTable, FontIoError> {
        PuaaTable::decompile(&self.data)
    }

    /// Compiles the property model into a new PUAA table.
    pub fn from_table(table: &mut PuaaTable) -> Result<Self, FontIoError> {
        Ok(Self {
            data: table.compile()?,
        })
    }
}

impl FontDataExactRead for TablePuaa {
    type Error = FontIoError;

    fn from_reader_exact<T: Read + Seek + ?Sized>(
        reader: &mut T,
        offset: u64,
        size: usize,
    ) -> Result<Self, Self::Error> {
        reader.seek(SeekFrom::Start(offset))?;
        let mut data = vec![0; size];
        reader.read_exact(&mut data)?;
        Ok(Self { data })
    }
}

impl FontDataWrite for TablePuaa {
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

impl FontDataChecksum for TablePuaa {
    fn checksum(&self) -> std::num::Wrapping<u32> {
        utils::checksum(&self.data)
    }
}

impl FontTable for TablePuaa {
    fn len(&self) -> u32 {
        self.data.len() as u32
    }
}

#[cfg(test)]
#[path = "puaa_test.rs"]
mod tests;
