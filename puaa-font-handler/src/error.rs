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

//! Errors related to font and UCD I/O.

use super::tag::FontTag;

/// Errors related to font I/O.
#[derive(Debug, thiserror::Error)]
pub enum FontIoError {
    /// Failed to write the font table data.
    #[error("Failed to write font table data")]
    FailedToWriteTableData(std::io::Error),
    /// An error occurred while reading or writing the font data.
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    /// The property name reference of a PUAA subtable is absent or inline.
    #[error("Invalid property name reference in PUAA subtable directory")]
    InvalidPuaaPropertyName,
    /// The specified size for reading a table directory entry record is
    /// invalid.
    #[error("Invalid size for a table directory entry record, expected {expected} bytes, got {got}")]
    InvalidSizeForDirectoryEntry {
        /// Expected size
        expected: usize,
        /// The actual size specified
        got: usize,
    },
    /// The specified size for reading a directory is not 4-byte aligned.
    #[error("Invalid size for a table directory entry record, expected a 4-byte aligned request, got {0}")]
    InvalidSizeForDirectory(usize),
    /// The specified size for reading a header is invalid.
    #[error("Invalid size for a header, expected 12 bytes, got {0}")]
    InvalidSizeForHeader(usize),
    /// The font table is truncated.
    #[error("The font table is truncated: {0}")]
    LoadTableTruncated(FontTag),
    /// A PUAA table read ran past the end of the blob.
    #[error("The PUAA table is truncated at offset {offset}")]
    PuaaTableTruncated {
        /// Offset at which the read failed
        offset: usize,
    },
    /// Save errors.
    #[error("Error saving the font: {0}")]
    SaveError(#[from] FontSaveError),
    /// A compiled count or offset exceeded its wire-format field.
    #[error("Value too large for PUAA wire format: {0}")]
    SizeOverflow(usize),
    /// An error occurred while generating a string from UTF-8 bytes.
    #[error("Error occurred while generating a string from UTF-8 bytes: {0}")]
    StringFromUtf8(#[from] std::string::FromUtf8Error),
    /// A pooled string exceeded the 255-byte length prefix.
    #[error("String too long for the PUAA string pool: {0} bytes")]
    StringTooLong(usize),
    /// When determining the type of font, the magic number was not recognized.
    #[error("An unknown magic number was encountered: {0}")]
    UnknownMagic(u32),
    /// A PUAA entry record carried an unknown type code.
    #[error("Unknown PUAA entry type: {0}")]
    UnknownPuaaEntryType(u8),
    /// The PUAA table header carried an unsupported version.
    #[error("Unknown PUAA version: {0}")]
    UnknownPuaaVersion(u16),
}

/// Errors related to saving a font
#[derive(Debug, thiserror::Error)]
pub enum FontSaveError {
    /// The font has no tables.
    #[error("No tables were found in the font.")]
    NoTablesFound,
    /// An unexpected table was encountered.
    #[error("An unexpected table was encountered: {0}")]
    UnexpectedTable(String),
}

/// Errors related to UCD text parsing and merging.
#[derive(Debug, thiserror::Error)]
pub enum UcdError {
    /// An error surfaced by the binary codec or the font container.
    #[error(transparent)]
    FontIo(#[from] FontIoError),
    /// An error occurred while reading or writing UCD text.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// A merge-parser control or data line could not be parsed.
    #[error("Malformed UCD source line: {0}")]
    MalformedLine(String),
    /// Two UCD source fragments claim the same block range.
    #[error("Overlapping block data: {0}")]
    OverlappingBlocks(String),
    /// Two UCD source fragments claim the same code point.
    #[error("Overlapping character data: {0}")]
    OverlappingCharacter(String),
    /// An explicitly named UCD file has no registered codec.
    #[error("Not a recognized UCD file name: {0}")]
    UnknownCodec(String),
    /// A numeric field exceeded the 32-bit range of its entry kind.
    #[error("Value out of 32-bit range: {0}")]
    ValueOutOfRange(String),
}
