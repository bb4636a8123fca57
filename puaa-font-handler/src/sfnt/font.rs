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

//! SFNT font.

use std::{
    collections::BTreeMap,
    io::{Read, Seek},
    num::Wrapping,
};

use super::{
    directory::{SfntDirectory, SfntDirectoryEntry},
    header::SfntHeader,
    table::{
        head::SFNT_EXPECTED_CHECKSUM, named_table::NamedTable,
        puaa::TablePuaa,
    },
};
use crate::{
    error::{FontIoError, FontSaveError},
    magic::Magic,
    puaa::PuaaTable,
    tag::FontTag,
    utils::align_to_four,
    Font, FontDataChecksum, FontDataRead, FontDataWrite, FontDirectory,
    FontHeader, FontTable, MutFontDataWrite, PuaaTableHost,
};

/// Implementation of an SFNT font.
pub struct SfntFont {
    header: SfntHeader,
    directory: SfntDirectory,
    tables: BTreeMap<FontTag, NamedTable>,
}

impl SfntFont {
    /// Creates an empty data-only container, whose scaler type is 'PUAA'
    /// itself. Used when compiling UCD data without a host font.
    pub fn data_only() -> Self {
        Self {
            header: SfntHeader {
                sfntVersion: Magic::Puaa,
                ..SfntHeader::default()
            },
            directory: SfntDirectory::new(),
            tables: BTreeMap::new(),
        }
    }

    /// Inserts or replaces a table by tag.
    pub fn insert_table(&mut self, tag: FontTag, table: NamedTable) {
        self.tables.insert(tag, table);
    }

    /// Removes a table by tag. Returns whether the table was present.
    pub fn remove_table(&mut self, tag: &FontTag) -> bool {
        self.tables.remove(tag).is_some()
    }
}

impl FontDataRead for SfntFont {
    type Error = FontIoError;

    fn from_reader<T: Read + Seek + ?Sized>(
        reader: &mut T,
    ) -> Result<Self, Self::Error> {
        let header = SfntHeader::from_reader(reader)?;
        let directory = SfntDirectory::from_reader_with_count(
            reader,
            header.num_tables() as usize,
        )?;
        let mut tables = BTreeMap::new();
        for entry in directory.entries() {
            let table = NamedTable::from_reader_exact(
                &entry.tag,
                reader,
                entry.offset as u64,
                entry.length as usize,
            )?;
            tables.insert(entry.tag, table);
        }
        Ok(Self {
            header,
            directory,
            tables,
        })
    }
}

impl MutFontDataWrite for SfntFont {
    type Error = FontIoError;

    fn write<TDest: std::io::Write + ?Sized>(
        &mut self,
        dest: &mut TDest,
    ) -> Result<(), Self::Error> {
        if self.tables.is_empty() {
            return Err(FontSaveError::NoTablesFound.into());
        }

        // Re-synthesize the file header based on the actual table count,
        // keeping the scaler type seen on input.
        let mut neo_header = SfntHeader::default();
        neo_header.sfntVersion = self.header.sfntVersion;
        neo_header.numTables = self.tables.len() as u16;
        neo_header.entrySelector = neo_header.numTables.ilog2() as u16;
        neo_header.searchRange =
            2_u16.pow(neo_header.entrySelector as u32) * 16;
        neo_header.rangeShift =
            neo_header.numTables * 16 - neo_header.searchRange;

        // Lay the tables out in the physical order of the old directory;
        // tables added since the font was read (or never present in the
        // old directory) land at the end, in tag order.
        let mut layout: Vec<FontTag> = self
            .directory
            .physical_order()
            .iter()
            .map(|entry| entry.tag)
            .filter(|tag| self.tables.contains_key(tag))
            .collect();
        for tag in self.tables.keys() {
            if !layout.contains(tag) {
                layout.push(*tag);
            }
        }

        // Keep a running offset as we encounter our tables in physical
        // order, padding each to a 4-byte boundary.
        let mut running_offset = SfntHeader::SIZE as u32
            + SfntDirectoryEntry::SIZE as u32 * neo_header.numTables as u32;
        let mut neo_directory = SfntDirectory::new();
        for tag in &layout {
            let table = &self.tables[tag];
            neo_directory.add_entry(SfntDirectoryEntry {
                tag: *tag,
                offset: running_offset,
                checksum: table.checksum().0,
                length: table.len(),
            });
            running_offset += align_to_four(table.len());
        }

        // Sort our directory entries by tag.
        neo_directory.sort_entries(|entry| entry.tag);

        // Figure the checksum for the whole font - the header, the
        // directory, and then all the tables; the per-table checksums were
        // just refreshed, and the 'head' one already treats its adjustment
        // slot as zero.
        let font_cksum = neo_header.checksum()
            + neo_directory.checksum()
            + neo_directory
                .entries()
                .iter()
                .fold(Wrapping(0_u32), |tables_cksum, entry| {
                    tables_cksum + Wrapping(entry.checksum)
                });

        // Rewrite the head table's checksumAdjustment. (This act does *not*
        // invalidate the checksum in the directory entry for 'head', which
        // is always treated as zero during check summing.)
        if let Some(NamedTable::Head(head)) =
            self.tables.get_mut(&FontTag::HEAD)
        {
            head.set_checksum_adjustment(
                (Wrapping(SFNT_EXPECTED_CHECKSUM) - font_cksum).0,
            );
        }

        // Replace our header & directory with updated editions.
        self.header = neo_header;
        self.directory = neo_directory;
        // Write everything out.
        self.header.write(dest)?;
        self.directory.write(dest)?;
        for entry in self.directory.physical_order().iter() {
            self.tables[&entry.tag].write(dest)?;
        }
        Ok(())
    }
}

impl PuaaTableHost for SfntFont {
    type Error = FontIoError;

    fn puaa_table(&self) -> Result<Option<PuaaTable>, Self::Error> {
        match self.tables.get(&FontTag::PUAA) {
            Some(NamedTable::Puaa(table)) => Ok(Some(table.to_table()?)),
            _ => {
                tracing::warn!("No PUAA table found.");
                Ok(None)
            }
        }
    }

    fn set_puaa_table(
        &mut self,
        table: &mut PuaaTable,
    ) -> Result<(), Self::Error> {
        let puaa = TablePuaa::from_table(table)?;
        self.tables
            .insert(FontTag::PUAA, NamedTable::Puaa(puaa));
        Ok(())
    }

    fn remove_puaa_table(&mut self) -> bool {
        self.tables.remove(&FontTag::PUAA).is_some()
    }
}

impl Font for SfntFont {
    type Directory = SfntDirectory;
    type Header = SfntHeader;
    type Table = NamedTable;

    fn contains_table(&self, tag: &FontTag) -> bool {
        self.tables.contains_key(tag)
    }

    fn table(&self, tag: &FontTag) -> Option<&Self::Table> {
        self.tables.get(tag)
    }

    fn header(&self) -> &Self::Header {
        &self.header
    }

    fn directory(&self) -> &Self::Directory {
        &self.directory
    }
}

#[cfg(test)]
#[path = "font_test.rs"]
mod tests;
