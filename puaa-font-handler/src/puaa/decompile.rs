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

//! Binary PUAA decompiler: the inverse of the compiler, with every
//! dereference bounds-checked against the blob.

use super::{
    entry::{PuaaEntry, PuaaValue},
    PuaaSubtable, PuaaTable,
};
use crate::error::FontIoError;

fn truncated(offset: usize) -> FontIoError {
    FontIoError::PuaaTableTruncated { offset }
}

fn read_u8(data: &[u8], offset: usize) -> Result<u8, FontIoError> {
    data.get(offset).copied().ok_or_else(|| truncated(offset))
}

fn read_u16(data: &[u8], offset: usize) -> Result<u16, FontIoError> {
    let bytes = data
        .get(offset..offset + 2)
        .ok_or_else(|| truncated(offset))?;
    Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
}

fn read_u32(data: &[u8], offset: usize) -> Result<u32, FontIoError> {
    let bytes = data
        .get(offset..offset + 4)
        .ok_or_else(|| truncated(offset))?;
    Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

/// Resolves a tagged string reference: inline when the top bit is set,
/// absent when zero, otherwise a pool offset.
fn get_str(data: &[u8], offset: u32) -> Result<Option<String>, FontIoError> {
    if offset & 0x8000_0000 != 0 {
        let bytes = [
            (offset >> 24) as u8 & 0x7F,
            (offset >> 16) as u8 & 0x7F,
            (offset >> 8) as u8 & 0x7F,
            offset as u8 & 0x7F,
        ];
        return Ok(Some(
            bytes
                .iter()
                .filter(|&&b| b != 0)
                .map(|&b| b as char)
                .collect(),
        ));
    }
    if offset == 0 {
        return Ok(None);
    }
    let offset = offset as usize;
    let len = read_u8(data, offset)? as usize;
    let bytes = data
        .get(offset + 1..offset + 1 + len)
        .ok_or_else(|| truncated(offset))?;
    Ok(Some(String::from_utf8(bytes.to_vec())?))
}

/// Reads a length-prefixed u32 array at the given offset.
fn get_ints(data: &[u8], offset: u32) -> Result<Vec<u32>, FontIoError> {
    let offset = offset as usize;
    let n = read_u16(data, offset)? as usize;
    let mut values = Vec::with_capacity(n);
    for i in 0..n {
        values.push(read_u32(data, offset + 2 + i * 4)?);
    }
    Ok(values)
}

pub(crate) fn decompile_table(
    data: &[u8],
) -> Result<PuaaTable, FontIoError> {
    let version = read_u16(data, 0)?;
    if version != 1 {
        return Err(FontIoError::UnknownPuaaVersion(version));
    }
    let property_count = read_u16(data, 2)? as usize;

    let mut table = PuaaTable::new();
    for i in 0..property_count {
        let name_ref = read_u32(data, 4 + i * 8)?;
        let subtable_offset = read_u32(data, 8 + i * 8)? as usize;
        let property_name = get_str(data, name_ref)?
            .ok_or(FontIoError::InvalidPuaaPropertyName)?;
        let entry_count = read_u16(data, subtable_offset)? as usize;

        let mut subtable = PuaaSubtable::new(property_name);
        for j in 0..entry_count {
            let record = subtable_offset + 2 + j * 10;
            let entry_type = read_u8(data, record)?;
            let plane = read_u8(data, record + 1)? as u32;
            let first_low = read_u16(data, record + 2)? as u32;
            let last_low = read_u16(data, record + 4)? as u32;
            let entry_data = read_u32(data, record + 6)?;
            let first = (plane << 16) | first_low;
            let last = (plane << 16) | last_low;
            let value = match entry_type {
                1 => PuaaValue::Single(
                    get_str(data, entry_data)?.unwrap_or_default(),
                ),
                2 => {
                    let mut values = Vec::new();
                    for v in get_ints(data, entry_data)? {
                        values.push(get_str(data, v)?.unwrap_or_default());
                    }
                    PuaaValue::Multiple(values)
                }
                3 => PuaaValue::Boolean(entry_data != 0),
                4 => PuaaValue::Decimal(entry_data as i32),
                5 => PuaaValue::Hexadecimal(entry_data),
                6 => PuaaValue::HexMultiple(get_ints(data, entry_data)?),
                7 => PuaaValue::HexSequence(get_ints(data, entry_data)?),
                8 => {
                    let mut values = get_ints(data, entry_data)?;
                    let condition_ref = values
                        .pop()
                        .ok_or_else(|| truncated(entry_data as usize))?;
                    PuaaValue::CaseMapping {
                        mapping: values,
                        condition: get_str(data, condition_ref)?,
                    }
                }
                9 => {
                    let values = get_ints(data, entry_data)?;
                    if values.len() < 2 {
                        return Err(truncated(entry_data as usize));
                    }
                    PuaaValue::NameAlias {
                        alias: get_str(data, values[0])?.unwrap_or_default(),
                        alias_type: get_str(data, values[1])?
                            .unwrap_or_default(),
                    }
                }
                other => {
                    return Err(FontIoError::UnknownPuaaEntryType(other))
                }
            };
            subtable.entries.push(PuaaEntry::new(first, last, value));
        }
        table.push_subtable(subtable);
    }
    Ok(table)
}

#[cfg(test)]
#[path = "decompile_test.rs"]
mod tests;
