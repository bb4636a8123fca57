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

//! Tests for the codec registry and directory drivers

use std::fs;

use super::*;
use crate::error::UcdError;

#[test]
fn test_registry_has_all_codecs() {
    assert_eq!(codecs().len(), 34);
}

#[test]
fn test_codec_lookup_is_case_insensitive() {
    assert!(codec_for("Blocks.txt").is_some());
    assert!(codec_for("blocks.txt").is_some());
    assert!(codec_for("BLOCKS.TXT").is_some());
    assert!(codec_for("UNIHAN_READINGS.txt").is_some());
    assert!(codec_for("NotARealFile.txt").is_none());
}

#[test]
fn test_every_codec_file_name_is_unique() {
    let mut names: Vec<String> = codecs()
        .iter()
        .map(|codec| codec.file_name().to_lowercase())
        .collect();
    names.sort();
    names.dedup();
    assert_eq!(names.len(), 34);
}

fn scratch_dir(label: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "puaa-ucd-test-{}-{}",
        label,
        std::process::id()
    ));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn test_compile_paths_scans_directories_and_skips_unknown_files() {
    let dir = scratch_dir("scan");
    fs::write(dir.join("Blocks.txt"), "F1900..F19FF; Sitelen Pona\n")
        .unwrap();
    fs::write(dir.join("README.md"), "not a UCD file\n").unwrap();
    fs::write(dir.join(".hidden"), "ignored\n").unwrap();

    let mut table = crate::puaa::PuaaTable::new();
    compile_paths(&mut table, &[dir.clone()]).unwrap();
    assert_eq!(
        table.property_value("Block", 0xF1900),
        Some("Sitelen Pona".to_string())
    );
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_compile_paths_rejects_explicitly_named_unknown_files() {
    let dir = scratch_dir("explicit");
    let path = dir.join("NotARealFile.txt");
    fs::write(&path, "whatever\n").unwrap();

    let mut table = crate::puaa::PuaaTable::new();
    let result = compile_paths(&mut table, &[path]);
    assert!(result.is_err());
    assert!(matches!(
        result.err().unwrap(),
        UcdError::UnknownCodec(_)
    ));
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_decompile_to_dir_only_writes_present_properties() {
    let dir = scratch_dir("decompile");
    let mut table = crate::puaa::PuaaTable::new();
    codec_for("Blocks.txt")
        .unwrap()
        .compile(&mut table, "F1900..F19FF; Sitelen Pona\n")
        .unwrap();
    decompile_to_dir(&table, &dir).unwrap();
    assert!(dir.join("Blocks.txt").is_file());
    assert!(!dir.join("UnicodeData.txt").exists());
    assert_eq!(
        fs::read_to_string(dir.join("Blocks.txt")).unwrap(),
        "F1900..F19FF; Sitelen Pona\n"
    );
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_text_round_trip_through_the_binary_codec() {
    // Compile a handful of files into one table, push it through the
    // binary codec, and check the text comes back out unchanged.
    let sources = [
        ("Blocks.txt", "F1900..F19FF; Sitelen Pona\n"),
        ("Scripts.txt", "F1900..F19FF    ; Common\n"),
        ("NameAliases.txt", "0000;NULL;control\n"),
        (
            "UnicodeData.txt",
            "F1900;SITELEN PONA A;Lo;0;L;;;;;N;;;;;\n",
        ),
    ];
    let mut table = crate::puaa::PuaaTable::new();
    for (file_name, text) in sources {
        codec_for(file_name)
            .unwrap()
            .compile(&mut table, text)
            .unwrap();
    }
    let blob = table.compile().unwrap();
    let decoded = crate::puaa::PuaaTable::decompile(&blob).unwrap();
    for (file_name, text) in sources {
        let mut out = Vec::new();
        codec_for(file_name)
            .unwrap()
            .decompile(&decoded, &mut out)
            .unwrap();
        let round_tripped = String::from_utf8(out).unwrap();
        let expected = match file_name {
            // Scripts pads its ranges to the run-grouped format.
            "Scripts.txt" => "F1900..F19FF  ; Common\n".to_string(),
            _ => text.to_string(),
        };
        assert_eq!(round_tripped, expected, "{}", file_name);
    }
}
