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

//! UCD merge parser.
//!
//! Fuses a directory of flagged UCD source fragments into one set of
//! files. Fragments carry control lines:
//!
//! - `@file <name>` - the UCD file the following lines belong to
//! - `@flag <token>` - include this fragment when the flag is active
//! - `@substring <token>` - include when the token occurs in the caller's
//!   superstring
//!
//! A fragment's body is included iff the caller explicitly enumerated the
//! fragment, or one of its flags/substrings matches and no `no-` variant
//! of its flags is active. `Blocks.txt` and `UnicodeData.txt` bodies are
//! overlap-checked against a dense code-point bitset; overlap is a hard
//! error.

use std::{
    collections::BTreeMap,
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use crate::{bitset::CodePointBitSet, error::UcdError};

/// A fragment that matched the caller's selection.
pub struct MatchedFile {
    /// Path of the fragment file.
    pub path: PathBuf,
    /// The fragment's `@flag` tokens.
    pub flags: Vec<String>,
    /// The fragment's `@substring` tokens.
    pub substrings: Vec<String>,
}

/// Inserts `no-` after any leading dashes: `--ascii` -> `--no-ascii`.
fn no_flag(flag: &str) -> String {
    let dashes = flag.len() - flag.trim_start_matches('-').len();
    format!("{}no-{}", &flag[..dashes], &flag[dashes..])
}

/// The merge parser: accumulates fragment bodies by file name, detecting
/// overlapping Blocks/UnicodeData claims as it goes.
pub struct UcdMerger {
    flags: Vec<String>,
    superstring: String,
    explicit_files: Vec<PathBuf>,
    matched: Vec<MatchedFile>,
    block_bits: CodePointBitSet,
    char_bits: CodePointBitSet,
    block_lines: Vec<(u32, String)>,
    char_lines: Vec<(u32, String)>,
    file_lines: BTreeMap<String, Vec<String>>,
}

impl UcdMerger {
    /// Creates a merger with the given active flags and superstring.
    pub fn new(flags: Vec<String>, superstring: String) -> Self {
        Self {
            flags,
            superstring,
            explicit_files: Vec::new(),
            matched: Vec::new(),
            block_bits: CodePointBitSet::new(),
            char_bits: CodePointBitSet::new(),
            block_lines: Vec::new(),
            char_lines: Vec::new(),
            file_lines: BTreeMap::new(),
        }
    }

    /// Explicitly includes a fragment file regardless of its flags.
    pub fn add_file(&mut self, path: impl Into<PathBuf>) {
        self.explicit_files.push(path.into());
    }

    /// Processes all explicitly included fragments, then scans the data
    /// directory for flag/substring matches.
    pub fn process(&mut self, data_dir: &Path) -> Result<(), UcdError> {
        let explicit: Vec<PathBuf> = self.explicit_files.clone();
        for path in explicit {
            self.process_file(&path, true)?;
        }
        let mut entries = fs::read_dir(data_dir)?
            .collect::<Result<Vec<_>, std::io::Error>>()?;
        entries.sort_by_key(|entry| entry.file_name());
        for entry in entries {
            let path = entry.path();
            if path.is_file() {
                self.process_file(&path, false)?;
            }
        }
        Ok(())
    }

    /// Processes one fragment file.
    pub fn process_file(
        &mut self,
        path: &Path,
        matches_file: bool,
    ) -> Result<(), UcdError> {
        let text = fs::read_to_string(path)?;
        self.process_source(path, &text, matches_file)
    }

    fn process_source(
        &mut self,
        path: &Path,
        text: &str,
        matches_file: bool,
    ) -> Result<(), UcdError> {
        let mut matches_flag = false;
        let mut matches_no_flag = false;
        let mut matches_substring = false;
        let mut file_flags: Vec<String> = Vec::new();
        let mut file_substrings: Vec<String> = Vec::new();
        let mut file_name: Option<String> = None;
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if let Some(control) = line.strip_prefix('@') {
                let mut fields = control.split_whitespace();
                let keyword = fields.next().unwrap_or_default();
                let token = fields.next().unwrap_or_default();
                match keyword {
                    "flag" => {
                        file_flags.push(token.to_string());
                        if self.flags.iter().any(|f| f == token) {
                            matches_flag = true;
                        }
                        let negated = no_flag(token);
                        if self.flags.iter().any(|f| *f == negated) {
                            matches_no_flag = true;
                        }
                    }
                    "substring" => {
                        file_substrings.push(token.to_string());
                        if self.superstring.contains(token) {
                            matches_substring = true;
                        }
                    }
                    "file" => {
                        file_name = Some(token.to_string());
                    }
                    _ => {}
                }
            } else if matches_file
                || ((matches_flag || matches_substring) && !matches_no_flag)
            {
                match file_name.as_deref() {
                    Some("Blocks.txt") => self.merge_block_line(line)?,
                    Some("UnicodeData.txt") => self.merge_char_line(line)?,
                    Some(name) => self
                        .file_lines
                        .entry(name.to_string())
                        .or_default()
                        .push(line.to_string()),
                    None => {}
                }
            }
        }
        if matches_file
            || ((matches_flag || matches_substring) && !matches_no_flag)
        {
            self.matched.push(MatchedFile {
                path: path.to_path_buf(),
                flags: file_flags,
                substrings: file_substrings,
            });
        }
        Ok(())
    }

    fn merge_block_line(&mut self, line: &str) -> Result<(), UcdError> {
        let range = line.split(';').next().unwrap_or_default();
        let mut parts = range.split('.').filter(|part| !part.is_empty());
        let first = parts
            .next()
            .and_then(|p| u32::from_str_radix(p.trim(), 16).ok());
        let last = parts
            .next()
            .and_then(|p| u32::from_str_radix(p.trim(), 16).ok());
        let (Some(first), Some(last)) = (first, last) else {
            return Err(UcdError::MalformedLine(line.to_string()));
        };
        if self.block_bits.get_any(first, last) {
            return Err(UcdError::OverlappingBlocks(line.to_string()));
        }
        self.block_bits.set_all(first, last);
        self.block_lines.push((first, line.to_string()));
        Ok(())
    }

    fn merge_char_line(&mut self, line: &str) -> Result<(), UcdError> {
        let field = line.split(';').next().unwrap_or_default();
        let Ok(cp) = u32::from_str_radix(field.trim(), 16) else {
            return Err(UcdError::MalformedLine(line.to_string()));
        };
        if self.char_bits.get(cp) {
            return Err(UcdError::OverlappingCharacter(line.to_string()));
        }
        self.char_bits.set(cp);
        self.char_lines.push((cp, line.to_string()));
        Ok(())
    }

    /// The merged `Blocks.txt` lines, sorted by starting code point.
    pub fn block_lines(&self) -> Vec<String> {
        let mut lines = self.block_lines.clone();
        lines.sort_by_key(|(first, _)| *first);
        lines.into_iter().map(|(_, line)| line).collect()
    }

    /// The merged `UnicodeData.txt` lines, sorted by code point.
    pub fn unicode_data_lines(&self) -> Vec<String> {
        let mut lines = self.char_lines.clone();
        lines.sort_by_key(|(cp, _)| *cp);
        lines.into_iter().map(|(_, line)| line).collect()
    }

    /// The merged lines for a given file name, or `None` when nothing was
    /// collected under it.
    pub fn lines_for(&self, file_name: &str) -> Option<Vec<String>> {
        match file_name {
            "Blocks.txt" => {
                (!self.block_lines.is_empty()).then(|| self.block_lines())
            }
            "UnicodeData.txt" => (!self.char_lines.is_empty())
                .then(|| self.unicode_data_lines()),
            other => self.file_lines.get(other).cloned(),
        }
    }

    /// All file names with merged content, Blocks and UnicodeData first.
    pub fn file_names(&self) -> Vec<String> {
        let mut names = Vec::new();
        if !self.block_lines.is_empty() {
            names.push("Blocks.txt".to_string());
        }
        if !self.char_lines.is_empty() {
            names.push("UnicodeData.txt".to_string());
        }
        names.extend(self.file_lines.keys().cloned());
        names
    }

    /// The fragments that matched, sorted by path.
    pub fn matched_files(&mut self) -> &[MatchedFile] {
        self.matched.sort_by(|a, b| a.path.cmp(&b.path));
        &self.matched
    }

    /// Writes one merged file to the given path.
    pub fn write_file(
        &self,
        file_name: &str,
        path: &Path,
    ) -> Result<(), UcdError> {
        let mut file = fs::File::create(path)?;
        for line in self.lines_for(file_name).unwrap_or_default() {
            writeln!(file, "{}", line)?;
        }
        Ok(())
    }

    /// Writes every merged file into the given directory.
    pub fn write_dir(&self, dir: &Path) -> Result<(), UcdError> {
        fs::create_dir_all(dir)?;
        for name in self.file_names() {
            self.write_file(&name, &dir.join(&name))?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "merge_test.rs"]
mod tests;
