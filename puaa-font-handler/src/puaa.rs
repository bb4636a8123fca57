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

//! The PUAA property database model and its binary codec.
//!
//! A [`PuaaTable`] is an ordered list of named [`PuaaSubtable`]s; each
//! subtable holds ordered [`PuaaEntry`]s (code-point range + typed value).
//! Entries may overlap, in which case looking up a code point concatenates
//! the string forms of every matching value in entry order - the UCD text
//! codecs lean on this for their prefix/suffix compression of name data.

mod compile;
mod decompile;
pub mod entry;
pub mod runs;

pub use entry::{PuaaEntry, PuaaValue};

use crate::{bitset::CodePointBitSet, error::FontIoError};

/// All entries for a single named property.
pub struct PuaaSubtable {
    property_name: String,
    /// The entries, in insertion order.
    pub entries: Vec<PuaaEntry>,
}

impl PuaaSubtable {
    /// Creates an empty subtable for the given property.
    pub fn new(property_name: impl Into<String>) -> Self {
        Self {
            property_name: property_name.into(),
            entries: Vec::new(),
        }
    }

    /// The property this subtable carries, e.g. `Name` or `kMandarin`.
    pub fn property_name(&self) -> &str {
        &self.property_name
    }

    /// Looks up the property value for a code point, concatenating the
    /// values of all entries containing it, in entry order.
    pub fn property_value(&self, cp: u32) -> Option<String> {
        let mut return_value: Option<String> = None;
        for entry in &self.entries {
            if entry.contains(cp) {
                if let Some(value) = entry.property_value(cp) {
                    return_value =
                        Some(return_value.unwrap_or_default() + &value);
                }
            }
        }
        return_value
    }

    /// A subtable is sortable iff its entries' ranges are pairwise
    /// disjoint. Overlapping subtables must keep insertion order so the
    /// concatenation semantics survive a compile/decompile cycle.
    pub fn is_sortable(&self) -> bool {
        let mut code_points = CodePointBitSet::new();
        for entry in &self.entries {
            if code_points
                .get_any(entry.first_code_point(), entry.last_code_point())
            {
                return false;
            }
            code_points
                .set_all(entry.first_code_point(), entry.last_code_point());
        }
        true
    }

    pub(crate) fn sort(&mut self) {
        if self.is_sortable() {
            self.entries.sort_by_key(|e| {
                (e.first_code_point(), e.last_code_point())
            });
        }
    }
}

/// A PUAA property database: an ordered sequence of subtables, uniquely
/// keyed by property name.
#[derive(Default)]
pub struct PuaaTable {
    subtables: Vec<PuaaSubtable>,
}

impl PuaaTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The subtables, in their current order.
    pub fn subtables(&self) -> &[PuaaSubtable] {
        &self.subtables
    }

    /// Returns the subtable for a property, if present.
    pub fn subtable(&self, property_name: &str) -> Option<&PuaaSubtable> {
        self.subtables
            .iter()
            .find(|st| st.property_name == property_name)
    }

    /// Returns the subtable for a property, creating it if absent.
    pub fn subtable_mut(
        &mut self,
        property_name: &str,
    ) -> &mut PuaaSubtable {
        let i = match self
            .subtables
            .iter()
            .position(|st| st.property_name == property_name)
        {
            Some(i) => i,
            None => {
                self.subtables.push(PuaaSubtable::new(property_name));
                self.subtables.len() - 1
            }
        };
        &mut self.subtables[i]
    }

    /// Looks up `(property, code point)`, dispatching on case-sensitive
    /// property name equality.
    pub fn property_value(
        &self,
        property_name: &str,
        cp: u32,
    ) -> Option<String> {
        self.subtable(property_name)
            .and_then(|st| st.property_value(cp))
    }

    pub(crate) fn push_subtable(&mut self, subtable: PuaaSubtable) {
        self.subtables.push(subtable);
    }

    pub(crate) fn remove_empty(&mut self) {
        self.subtables.retain(|st| !st.entries.is_empty());
    }

    pub(crate) fn sort(&mut self) {
        self.subtables
            .sort_by(|a, b| a.property_name.cmp(&b.property_name));
        for st in &mut self.subtables {
            st.sort();
        }
    }

    /// Compiles the table into its compact binary form. Empty subtables
    /// are dropped and subtables are put into their canonical order first.
    pub fn compile(&mut self) -> Result<Vec<u8>, FontIoError> {
        compile::compile_table(self)
    }

    /// Decompiles a binary blob into a property database.
    pub fn decompile(data: &[u8]) -> Result<Self, FontIoError> {
        decompile::decompile_table(data)
    }
}

#[cfg(test)]
#[path = "puaa_test.rs"]
mod tests;
