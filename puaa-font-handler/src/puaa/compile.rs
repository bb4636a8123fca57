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

//! Binary PUAA compiler.
//!
//! Layout, all fields big-endian: a 4-byte header (version, subtable
//! count), a directory of (property name ref, subtable offset) pairs, the
//! subtable headers with their fixed-size entry records, the auxiliary
//! u32 arrays for variable-valued entries, and finally the string pool of
//! length-prefixed UTF-8 strings. All offsets are byte offsets from the
//! start of the blob.

use std::collections::HashMap;

use byteorder::{BigEndian, WriteBytesExt};

use super::{entry::PuaaValue, PuaaTable};
use crate::error::FontIoError;

/// Top bit of a string reference: the low 31 bits carry an inline string.
const INLINE_FLAG: u32 = 0x8000_0000;

/// Packs a string of up to 4 ASCII bytes directly into a tagged u32, or
/// returns `None` when the string needs the pool (too long, or any byte
/// outside `[0x01, 0x7F]`).
pub(crate) fn minify(d: &[u8]) -> Option<u32> {
    if d.len() > 4 {
        return None;
    }
    let mut v = INLINE_FLAG;
    for (i, &b) in d.iter().enumerate() {
        if b == 0 || b & 0x80 != 0 {
            return None;
        }
        v |= (b as u32 & 0x7F) << ((3 - i) * 8);
    }
    Some(v)
}

fn offset32(p: usize) -> Result<u32, FontIoError> {
    u32::try_from(p).map_err(|_| FontIoError::SizeOverflow(p))
}

fn count16(n: usize) -> Result<u16, FontIoError> {
    u16::try_from(n).map_err(|_| FontIoError::SizeOverflow(n))
}

/// String pool with dedup by exact string identity. Inline-eligible
/// strings never enter the pool; property names are forced into it.
struct StringPool {
    cursor: usize,
    table: HashMap<String, u32>,
    data: Vec<Vec<u8>>,
}

impl StringPool {
    fn new(cursor: usize) -> Self {
        Self {
            cursor,
            table: HashMap::new(),
            data: Vec::new(),
        }
    }

    fn addr(
        &mut self,
        s: Option<&str>,
        force_full: bool,
    ) -> Result<u32, FontIoError> {
        let Some(s) = s else {
            return Ok(0);
        };
        if let Some(&offset) = self.table.get(s) {
            return Ok(offset);
        }
        let d = s.as_bytes();
        if !force_full {
            if let Some(v) = minify(d) {
                return Ok(v);
            }
        }
        if d.len() > 255 {
            return Err(FontIoError::StringTooLong(d.len()));
        }
        let offset = offset32(self.cursor)?;
        self.table.insert(s.to_string(), offset);
        self.data.push(d.to_vec());
        self.cursor += d.len() + 1;
        Ok(offset)
    }
}

/// Per-entry wire plan: the type code, the fixed u32 payload (or aux
/// offset), and the aux array contents where applicable.
struct EntryPlan {
    entry_type: u8,
    entry_data: u32,
    aux: Option<AuxPlan>,
}

struct AuxPlan {
    count: u16,
    values: Vec<u32>,
}

fn reserve_aux(p: &mut usize, count: usize) -> Result<(u32, u16), FontIoError> {
    let offset = offset32(*p)?;
    let count = count16(count)?;
    *p += 2 + count as usize * 4;
    Ok((offset, count))
}

pub(crate) fn compile_table(
    table: &mut PuaaTable,
) -> Result<Vec<u8>, FontIoError> {
    table.remove_empty();
    table.sort();

    let subtables = table.subtables();
    let property_count = count16(subtables.len())?;

    // Walk a byte-offset cursor: header + directory first, then one
    // subtable header per property.
    let mut p = 4 + subtables.len() * 8;
    let mut subtable_offsets = Vec::with_capacity(subtables.len());
    for st in subtables {
        subtable_offsets.push(offset32(p)?);
        count16(st.entries.len())?;
        p += 2 + st.entries.len() * 10;
    }

    // First pass: entry types, fixed payloads, and aux reservations.
    let mut plans: Vec<Vec<EntryPlan>> = Vec::with_capacity(subtables.len());
    for st in subtables {
        let mut sub = Vec::with_capacity(st.entries.len());
        for entry in &st.entries {
            let plan = match entry.value() {
                PuaaValue::Single(_) => EntryPlan {
                    entry_type: 1,
                    entry_data: 0, // string ref, resolved below
                    aux: None,
                },
                PuaaValue::Multiple(values) => {
                    let (offset, count) = reserve_aux(&mut p, values.len())?;
                    EntryPlan {
                        entry_type: 2,
                        entry_data: offset,
                        aux: Some(AuxPlan {
                            count,
                            values: Vec::new(),
                        }),
                    }
                }
                PuaaValue::Boolean(value) => EntryPlan {
                    entry_type: 3,
                    entry_data: if *value { 0xFFFFFFFF } else { 0 },
                    aux: None,
                },
                PuaaValue::Decimal(value) => EntryPlan {
                    entry_type: 4,
                    entry_data: *value as u32,
                    aux: None,
                },
                PuaaValue::Hexadecimal(value) => EntryPlan {
                    entry_type: 5,
                    entry_data: *value,
                    aux: None,
                },
                PuaaValue::HexMultiple(values) => {
                    let (offset, count) = reserve_aux(&mut p, values.len())?;
                    EntryPlan {
                        entry_type: 6,
                        entry_data: offset,
                        aux: Some(AuxPlan {
                            count,
                            values: values.clone(),
                        }),
                    }
                }
                PuaaValue::HexSequence(values) => {
                    let (offset, count) = reserve_aux(&mut p, values.len())?;
                    EntryPlan {
                        entry_type: 7,
                        entry_data: offset,
                        aux: Some(AuxPlan {
                            count,
                            values: values.clone(),
                        }),
                    }
                }
                PuaaValue::CaseMapping { mapping, .. } => {
                    let (offset, count) =
                        reserve_aux(&mut p, mapping.len() + 1)?;
                    EntryPlan {
                        entry_type: 8,
                        entry_data: offset,
                        aux: Some(AuxPlan {
                            count,
                            values: Vec::new(),
                        }),
                    }
                }
                PuaaValue::NameAlias { .. } => {
                    let (offset, count) = reserve_aux(&mut p, 2)?;
                    EntryPlan {
                        entry_type: 9,
                        entry_data: offset,
                        aux: Some(AuxPlan {
                            count,
                            values: Vec::new(),
                        }),
                    }
                }
            };
            sub.push(plan);
        }
        plans.push(sub);
    }

    // Second pass: build the string pool. Property names go first, in
    // pool form even when short; entry strings follow in entry order.
    let mut pool = StringPool::new(p);
    let mut name_offsets = Vec::with_capacity(subtables.len());
    for st in subtables {
        name_offsets.push(pool.addr(Some(st.property_name()), true)?);
    }
    for (st, sub) in subtables.iter().zip(plans.iter_mut()) {
        for (entry, plan) in st.entries.iter().zip(sub.iter_mut()) {
            match entry.value() {
                PuaaValue::Single(value) => {
                    plan.entry_data = pool.addr(Some(value), false)?;
                }
                PuaaValue::Multiple(values) => {
                    if let Some(aux) = plan.aux.as_mut() {
                        for value in values {
                            aux.values.push(pool.addr(Some(value), false)?);
                        }
                    }
                }
                PuaaValue::CaseMapping { mapping, condition } => {
                    if let Some(aux) = plan.aux.as_mut() {
                        aux.values.extend_from_slice(mapping);
                        aux.values
                            .push(pool.addr(condition.as_deref(), false)?);
                    }
                }
                PuaaValue::NameAlias { alias, alias_type } => {
                    if let Some(aux) = plan.aux.as_mut() {
                        let s1 = pool.addr(Some(alias), false)?;
                        let s2 = pool.addr(Some(alias_type), false)?;
                        aux.values.push(s1);
                        aux.values.push(s2);
                    }
                }
                _ => {}
            }
        }
    }

    // Emit header, directory, subtable headers, aux blocks, string pool.
    let mut out: Vec<u8> = Vec::with_capacity(pool.cursor);
    out.write_u16::<BigEndian>(1)?;
    out.write_u16::<BigEndian>(property_count)?;
    for (name_offset, subtable_offset) in
        name_offsets.iter().zip(subtable_offsets.iter())
    {
        out.write_u32::<BigEndian>(*name_offset)?;
        out.write_u32::<BigEndian>(*subtable_offset)?;
    }
    for (st, sub) in subtables.iter().zip(plans.iter()) {
        out.write_u16::<BigEndian>(count16(st.entries.len())?)?;
        for (entry, plan) in st.entries.iter().zip(sub.iter()) {
            out.write_u8(plan.entry_type)?;
            out.write_u8((entry.first_code_point() >> 16) as u8)?;
            out.write_u16::<BigEndian>(
                (entry.first_code_point() & 0xFFFF) as u16,
            )?;
            out.write_u16::<BigEndian>(
                (entry.last_code_point() & 0xFFFF) as u16,
            )?;
            out.write_u32::<BigEndian>(plan.entry_data)?;
        }
    }
    for sub in &plans {
        for plan in sub {
            if let Some(aux) = &plan.aux {
                out.write_u16::<BigEndian>(aux.count)?;
                for value in &aux.values {
                    out.write_u32::<BigEndian>(*value)?;
                }
            }
        }
    }
    for d in &pool.data {
        out.write_u8(d.len() as u8)?;
        out.extend_from_slice(d);
    }
    Ok(out)
}

#[cfg(test)]
#[path = "compile_test.rs"]
mod tests;
