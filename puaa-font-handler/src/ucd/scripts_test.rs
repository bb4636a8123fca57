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

//! Tests for the Scripts and ScriptExtensions codecs

use super::*;
use crate::puaa::PuaaTable;

fn decompile_to_string(
    codec: &dyn UcdCodec,
    table: &PuaaTable,
) -> String {
    let mut out = Vec::new();
    codec.decompile(table, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_scripts_codec_groups_by_first_occurrence() {
    let mut table = PuaaTable::new();
    ScriptsCodec
        .compile(
            &mut table,
            "0000..0040    ; Common\n0041..005A    ; Latin\n005B..0060    ; Common\n",
        )
        .unwrap();
    assert_eq!(
        table.property_value("Script", 0x41),
        Some("Latin".to_string())
    );
    assert_eq!(
        decompile_to_string(&ScriptsCodec, &table),
        "0000..0040    ; Common\n005B..0060    ; Common\n0041..005A    ; Latin\n"
    );
}

#[test]
fn test_script_extensions_compile_splits_on_whitespace() {
    let mut table = PuaaTable::new();
    ScriptExtensionsCodec
        .compile(&mut table, "102E0         ; Arab Copt\n")
        .unwrap();
    // Each script contributes its own run; lookup concatenates them.
    let value = table
        .property_value("Script_Extensions", 0x102E0)
        .unwrap();
    assert!(value.contains("Arab"));
    assert!(value.contains("Copt"));
}

#[test]
fn test_script_extensions_round_trip_rebuilds_sorted_lists() {
    let mut table = PuaaTable::new();
    ScriptExtensionsCodec
        .compile(
            &mut table,
            "102E0         ; Copt Arab\n0640          ; Arab\n",
        )
        .unwrap();
    // Shorter value lists come first; script lists are re-sorted.
    assert_eq!(
        decompile_to_string(&ScriptExtensionsCodec, &table),
        "0640          ; Arab\n102E0         ; Arab Copt\n"
    );
}
