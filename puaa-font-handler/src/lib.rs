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

//! Handler for the PUAA ("Private Use Area Augmentation") SFNT table.
//!
//! The PUAA table carries Unicode Character Database (UCD) properties for
//! code points the Unicode Consortium does not standardize - chiefly
//! Private Use Area assignments. This crate reads and writes the SFNT
//! container around the table, compiles a property database to the compact
//! binary form and back, and marshals the well-known UCD text files
//! into/out of that database.
//!
//! # Example
//! ```no_run
//! use std::io::Cursor;
//! use puaa_font_handler::error::FontIoError;
//! use puaa_font_handler::sfnt::font::SfntFont;
//! use puaa_font_handler::*;
//!
//! fn main() -> Result<(), FontIoError> {
//!    let font_data = std::fs::read("font.ttf")?;
//!    let mut reader = Cursor::new(font_data);
//!    let mut font = SfntFont::from_reader(&mut reader)?;
//!    if let Some(puaa) = font.puaa_table()? {
//!        println!("{:?}", puaa.property_value("Block", 0xF1900));
//!    }
//!    // Drop the table and save out the file...
//!    font.remove_puaa_table();
//!    Ok(())
//! }
//! ```

use std::{
    io::{Read, Seek, Write},
    num::Wrapping,
};

use puaa::PuaaTable;
use tag::FontTag;

pub mod bitset;
pub mod error;
pub mod magic;
pub mod merge;
pub mod puaa;
pub mod sfnt;
pub mod tag;
pub mod ucd;
pub(crate) mod utils;

/// Trait for computing a checksum on SFNT data.
pub trait FontDataChecksum {
    /// Computes the checksum for the SFNT data.
    fn checksum(&self) -> Wrapping<u32>;
}

/// Trait for reading SFNT data from a reader.
pub trait FontDataRead
where
    Self: Sized,
{
    /// The error type for reading the data.
    type Error;
    /// Reads the font data from a reader.
    fn from_reader<T: Read + Seek + ?Sized>(
        reader: &mut T,
    ) -> Result<Self, Self::Error>;
}

/// Trait for reading SFNT data from a reader, with exact size information.
pub trait FontDataExactRead
where
    Self: Sized,
{
    /// The error type for reading the data.
    type Error;

    /// Reads the font data from a reader, starting at a specific offset and
    /// reading a specific length.
    fn from_reader_exact<T: Read + Seek + ?Sized>(
        reader: &mut T,
        offset: u64,
        size: usize,
    ) -> Result<Self, Self::Error>;
}

/// Trait for writing SFNT data to a writer.
pub trait FontDataWrite {
    /// The error type for writing the data.
    type Error;
    /// Writes the SFNT data to a writer.
    fn write<TDest: Write + ?Sized>(
        &self,
        dest: &mut TDest,
    ) -> Result<(), Self::Error>;
}

/// Trait for writing SFNT data to a writer, with the ability to modify the
/// object.
pub trait MutFontDataWrite {
    /// The error type for writing the data.
    type Error;
    /// Writes the SFNT data to a writer.
    fn write<TDest: Write + ?Sized>(
        &mut self,
        dest: &mut TDest,
    ) -> Result<(), Self::Error>;
}

/// A font header.
pub trait FontHeader: FontDataRead + FontDataChecksum + FontDataWrite {
    /// Returns the number of tables in the font.
    fn num_tables(&self) -> u16;
}

/// A directory in a font.
pub trait FontDirectory:
    FontDataExactRead + FontDataChecksum + FontDataWrite
{
    /// The type of entry in the directory.
    type Entry: FontDirectoryEntry;
    /// Reads the font directory from a reader, with a specified number of
    /// entries.
    fn from_reader_with_count<T: Read + Seek + ?Sized>(
        reader: &mut T,
        entry_count: usize,
    ) -> Result<Self, <Self as FontDataExactRead>::Error>;
    /// Returns a reference to the entries in this directory.
    fn entries(&self) -> &[Self::Entry];
    /// Returns an array which contains the indices of this directory's entries,
    /// arranged in increasing order of `offset` field.
    fn physical_order(&self) -> Vec<&Self::Entry>;
}

/// A directory entry in a font directory.
pub trait FontDirectoryEntry:
    FontDataRead + FontDataChecksum + FontDataWrite
{
}

/// A table in a font.
#[allow(clippy::len_without_is_empty)] // Doesn't make sense for this trait to have is_empty.
pub trait FontTable: FontDataChecksum + FontDataWrite {
    /// Returns the length of the table.
    fn len(&self) -> u32;
    /// Returns whether the table is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Represents a font.
pub trait Font: FontDataRead + MutFontDataWrite {
    /// The header type for the font.
    type Header: FontHeader;
    /// The directory type for the font.
    type Directory: FontDirectory;
    /// The table type for the font.
    type Table: FontTable;
    /// Checks if the font contains a specific table.
    fn contains_table(&self, tag: &FontTag) -> bool;
    /// Returns a specific table from the font.
    fn table(&self, tag: &FontTag) -> Option<&Self::Table>;
    /// Returns the font header.
    fn header(&self) -> &Self::Header;
    /// Returns the font directory.
    fn directory(&self) -> &Self::Directory;
}

/// A trait for fonts which can host a PUAA table.
pub trait PuaaTableHost {
    /// The error type for PUAA table access.
    type Error;
    /// Decompiles the PUAA table, if any, into a property database.
    fn puaa_table(&self) -> Result<Option<PuaaTable>, Self::Error>;
    /// Compiles the given property database and installs it as the PUAA
    /// table, replacing any existing one.
    fn set_puaa_table(
        &mut self,
        table: &mut PuaaTable,
    ) -> Result<(), Self::Error>;
    /// Removes the PUAA table. Returns whether a table was present.
    fn remove_puaa_table(&mut self) -> bool;
}
