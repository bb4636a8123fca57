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

//! Tests for the UCD merge parser

use std::path::Path;

use super::*;

fn fragment_a() -> &'static str {
    "@file Blocks.txt\n\
     @flag --sitelen\n\
     F1900..F19FF; Sitelen Pona\n"
}

#[test]
fn test_merge_includes_fragment_with_active_flag() {
    let mut merger =
        UcdMerger::new(vec!["--sitelen".to_string()], String::new());
    merger
        .process_source(Path::new("a.txt"), fragment_a(), false)
        .unwrap();
    assert_eq!(
        merger.block_lines(),
        vec!["F1900..F19FF; Sitelen Pona".to_string()]
    );
    assert_eq!(merger.matched_files().len(), 1);
}

#[test]
fn test_merge_skips_fragment_without_matching_flag() {
    let mut merger =
        UcdMerger::new(vec!["--other".to_string()], String::new());
    merger
        .process_source(Path::new("a.txt"), fragment_a(), false)
        .unwrap();
    assert!(merger.block_lines().is_empty());
    assert!(merger.matched_files().is_empty());
}

#[test]
fn test_merge_no_flag_excludes_even_with_substring_match() {
    let source = "@file Blocks.txt\n\
                  @flag --sitelen\n\
                  @substring pona\n\
                  F1900..F19FF; Sitelen Pona\n";
    let mut merger = UcdMerger::new(
        vec!["--no-sitelen".to_string()],
        "sitelenpona".to_string(),
    );
    merger
        .process_source(Path::new("a.txt"), source, false)
        .unwrap();
    assert!(merger.block_lines().is_empty());
}

#[test]
fn test_merge_substring_match_includes_fragment() {
    let source = "@file CaseFolding.txt\n\
                  @substring pona\n\
                  F1900; C; F1900;\n";
    let mut merger =
        UcdMerger::new(Vec::new(), "sitelenpona".to_string());
    merger
        .process_source(Path::new("a.txt"), source, false)
        .unwrap();
    assert_eq!(
        merger.lines_for("CaseFolding.txt"),
        Some(vec!["F1900; C; F1900;".to_string()])
    );
}

#[test]
fn test_merge_explicit_file_wins_over_flags() {
    let mut merger = UcdMerger::new(Vec::new(), String::new());
    merger
        .process_source(Path::new("a.txt"), fragment_a(), true)
        .unwrap();
    assert_eq!(merger.block_lines().len(), 1);
}

#[test]
fn test_merge_detects_overlapping_blocks() {
    let overlapping = "@file Blocks.txt\n\
                       @flag --other\n\
                       F1980..F19C0; Other Block\n";
    let mut merger = UcdMerger::new(
        vec!["--sitelen".to_string(), "--other".to_string()],
        String::new(),
    );
    merger
        .process_source(Path::new("a.txt"), fragment_a(), false)
        .unwrap();
    let result =
        merger.process_source(Path::new("b.txt"), overlapping, false);
    assert!(result.is_err());
    assert!(matches!(
        result.err().unwrap(),
        UcdError::OverlappingBlocks(_)
    ));
}

#[test]
fn test_merge_detects_overlapping_unicode_data() {
    let first = "@file UnicodeData.txt\n\
                 @flag --a\n\
                 F1900;SITELEN PONA A;Lo;0;L;;;;;N;;;;;\n";
    let second = "@file UnicodeData.txt\n\
                  @flag --b\n\
                  F1900;SOMETHING ELSE;Lo;0;L;;;;;N;;;;;\n";
    let mut merger = UcdMerger::new(
        vec!["--a".to_string(), "--b".to_string()],
        String::new(),
    );
    merger
        .process_source(Path::new("a.txt"), first, false)
        .unwrap();
    let result = merger.process_source(Path::new("b.txt"), second, false);
    assert!(result.is_err());
    assert!(matches!(
        result.err().unwrap(),
        UcdError::OverlappingCharacter(_)
    ));
}

#[test]
fn test_merge_sorts_output_by_code_point() {
    let high = "@file Blocks.txt\n\
                @flag --x\n\
                F1900..F19FF; High Block\n";
    let low = "@file UnicodeData.txt\n\
               @flag --x\n\
               F1901;NAME TWO;Lo;0;L;;;;;N;;;;;\n\
               F1900;NAME ONE;Lo;0;L;;;;;N;;;;;\n";
    let mut merger =
        UcdMerger::new(vec!["--x".to_string()], String::new());
    merger
        .process_source(Path::new("blocks.txt"), high, false)
        .unwrap();
    merger
        .process_source(Path::new("chars.txt"), low, false)
        .unwrap();
    assert_eq!(
        merger.unicode_data_lines(),
        vec![
            "F1900;NAME ONE;Lo;0;L;;;;;N;;;;;".to_string(),
            "F1901;NAME TWO;Lo;0;L;;;;;N;;;;;".to_string(),
        ]
    );
}

#[test]
fn test_merge_file_names_lists_blocks_first() {
    let source = "@file Blocks.txt\n\
                  @flag --x\n\
                  0000..007F; Basic Latin\n\
                  @file ArabicShaping.txt\n\
                  0600; NAME; U; No_Joining_Group\n";
    let mut merger =
        UcdMerger::new(vec!["--x".to_string()], String::new());
    merger
        .process_source(Path::new("a.txt"), source, false)
        .unwrap();
    assert_eq!(
        merger.file_names(),
        vec!["Blocks.txt".to_string(), "ArabicShaping.txt".to_string()]
    );
}

#[test]
fn test_no_flag_transformation_respects_leading_dashes() {
    assert_eq!(no_flag("--sitelen"), "--no-sitelen");
    assert_eq!(no_flag("-x"), "-no-x");
    assert_eq!(no_flag("plain"), "no-plain");
}
