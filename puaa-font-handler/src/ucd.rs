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

//! Unicode Character Database text codecs.
//!
//! One codec per well-known UCD file, each declaring its file name
//! (matched case-insensitively) and the property names it reads and
//! writes. A codec's `compile` parses text lines into property-database
//! entries; `decompile` serializes the entries back out, byte-identical
//! for any file the codec itself compiled (modulo the codec's own sort).

use std::{
    fs,
    io::{BufWriter, Write},
    path::Path,
    sync::LazyLock,
};

use crate::{error::UcdError, puaa::PuaaTable};

pub mod bidi;
pub mod casing;
pub(crate) mod line;
pub mod misc;
pub mod scripts;
pub mod simple;
pub mod unicode_data;
pub mod unihan;

use bidi::{
    ArabicShapingCodec, BidiBracketsCodec, BidiMirroringCodec,
    EquivalentUnifiedIdeographCodec,
};
use casing::SpecialCasingCodec;
use misc::{
    BlocksCodec, CompositionExclusionsCodec, DerivedAgeCodec,
    HangulSyllableTypeCodec, JamoCodec, NameAliasesCodec,
};
use scripts::{ScriptExtensionsCodec, ScriptsCodec};
use simple::{CategoryCodec, PropListCodec, StringCodec};
use unicode_data::UnicodeDataCodec;
use unihan::UnihanCodec;

/// A marshaller between one UCD text file format and the property model.
pub trait UcdCodec: Send + Sync {
    /// The file name this codec handles, e.g. `Blocks.txt`.
    fn file_name(&self) -> &'static str;
    /// The property names this codec reads and writes.
    fn property_names(&self) -> &[&'static str];
    /// Parses UCD text into entries, appending to the table's subtables.
    fn compile(
        &self,
        table: &mut PuaaTable,
        text: &str,
    ) -> Result<(), UcdError>;
    /// Serializes the table's entries back into UCD text.
    fn decompile(
        &self,
        table: &PuaaTable,
        out: &mut dyn Write,
    ) -> Result<(), UcdError>;
}

static CODECS: LazyLock<Vec<Box<dyn UcdCodec>>> = LazyLock::new(|| {
    vec![
        Box::new(ArabicShapingCodec),
        Box::new(BidiBracketsCodec),
        Box::new(BidiMirroringCodec),
        Box::new(BlocksCodec),
        Box::new(CompositionExclusionsCodec),
        Box::new(DerivedAgeCodec),
        Box::new(StringCodec::east_asian_width()),
        Box::new(PropListCodec::emoji_data()),
        Box::new(EquivalentUnifiedIdeographCodec),
        Box::new(CategoryCodec::grapheme_break()),
        Box::new(HangulSyllableTypeCodec),
        Box::new(CategoryCodec::indic_positional()),
        Box::new(CategoryCodec::indic_syllabic()),
        Box::new(JamoCodec),
        Box::new(StringCodec::line_break()),
        Box::new(NameAliasesCodec),
        Box::new(UnihanCodec::nushu_sources()),
        Box::new(PropListCodec::prop_list()),
        Box::new(ScriptExtensionsCodec),
        Box::new(ScriptsCodec),
        Box::new(CategoryCodec::sentence_break()),
        Box::new(SpecialCasingCodec),
        Box::new(UnihanCodec::tangut_sources()),
        Box::new(UnicodeDataCodec),
        Box::new(UnihanCodec::dictionary_indices()),
        Box::new(UnihanCodec::dictionary_like_data()),
        Box::new(UnihanCodec::irg_sources()),
        Box::new(UnihanCodec::numeric_values()),
        Box::new(UnihanCodec::other_mappings()),
        Box::new(UnihanCodec::radical_stroke_counts()),
        Box::new(UnihanCodec::readings()),
        Box::new(UnihanCodec::variants()),
        Box::new(StringCodec::vertical_orientation()),
        Box::new(CategoryCodec::word_break()),
    ]
});

/// All registered codecs, in their canonical order.
pub fn codecs() -> &'static [Box<dyn UcdCodec>] {
    &CODECS
}

/// Finds the codec for a UCD file name, matched case-insensitively.
pub fn codec_for(file_name: &str) -> Option<&'static dyn UcdCodec> {
    let lower = file_name.to_lowercase();
    CODECS
        .iter()
        .find(|codec| codec.file_name().to_lowercase() == lower)
        .map(|codec| codec.as_ref())
}

/// Compiles UCD text files and/or directories of them into the table.
///
/// Explicitly named files must have a codec; unrecognized file names
/// inside a scanned directory are skipped, as are dot-files.
pub fn compile_paths(
    table: &mut PuaaTable,
    paths: &[impl AsRef<Path>],
) -> Result<(), UcdError> {
    for path in paths {
        compile_path(table, path.as_ref(), true)?;
    }
    Ok(())
}

fn compile_path(
    table: &mut PuaaTable,
    path: &Path,
    explicit: bool,
) -> Result<(), UcdError> {
    if path.is_dir() {
        let mut entries = fs::read_dir(path)?
            .collect::<Result<Vec<_>, std::io::Error>>()?;
        entries.sort_by_key(|entry| entry.file_name());
        for entry in entries {
            if entry.file_name().to_string_lossy().starts_with('.') {
                continue;
            }
            compile_path(table, &entry.path(), false)?;
        }
        return Ok(());
    }
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    match codec_for(&file_name) {
        Some(codec) => {
            tracing::info!("Compiling from {}...", codec.file_name());
            let text = fs::read_to_string(path)?;
            codec.compile(table, &text)
        }
        None if explicit => Err(UcdError::UnknownCodec(file_name)),
        None => Ok(()),
    }
}

/// Decompiles the table into UCD text files in the given directory. Only
/// files whose properties are present are generated.
pub fn decompile_to_dir(
    table: &PuaaTable,
    dst: &Path,
) -> Result<(), UcdError> {
    fs::create_dir_all(dst)?;
    for codec in codecs() {
        if codec
            .property_names()
            .iter()
            .any(|property| table.subtable(property).is_some())
        {
            tracing::info!("Decompiling to {}...", codec.file_name());
            let file = fs::File::create(dst.join(codec.file_name()))?;
            let mut writer = BufWriter::new(file);
            codec.decompile(table, &mut writer)?;
            writer.flush()?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "ucd_test.rs"]
mod tests;
