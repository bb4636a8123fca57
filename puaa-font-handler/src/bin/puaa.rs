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

//! Command-line driver for the PUAA font handler: compile, decompile,
//! copy, strip, look up, and merge Unicode Character Database properties
//! in TrueType files.

use std::{
    fs::File,
    io::{BufWriter, Cursor},
    path::{Path, PathBuf},
};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use puaa_font_handler::{
    merge::UcdMerger,
    puaa::{runs::runs_from_entries, PuaaTable},
    sfnt::font::SfntFont,
    ucd, FontDataRead, MutFontDataWrite, PuaaTableHost,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "puaa",
    about = "Manipulate Unicode Character Database properties in TrueType files."
)]
struct Cli {
    /// Only log warnings and errors.
    #[arg(short = 'q', long = "quiet", global = true)]
    quiet: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Add UCD properties to TrueType files.
    Compile {
        /// UCD data files or directories.
        #[arg(short = 'd', value_name = "PATH", required = true)]
        data: Vec<PathBuf>,
        /// Source TrueType file; omit to emit a data-only container.
        #[arg(short = 'i', value_name = "PATH")]
        input: Option<PathBuf>,
        /// Destination TrueType file.
        #[arg(short = 'o', value_name = "PATH")]
        output: PathBuf,
    },
    /// Create UCD files from character properties in TrueType files.
    Decompile {
        /// Source TrueType file.
        #[arg(short = 'i', value_name = "PATH")]
        input: PathBuf,
        /// Destination directory.
        #[arg(short = 'o', value_name = "PATH", default_value = "puaa.d")]
        output: PathBuf,
    },
    /// Copy UCD properties across TrueType files.
    Copy {
        /// Source file for character properties.
        #[arg(short = 'd', value_name = "PATH")]
        data: PathBuf,
        /// Source file for font tables; omit to emit a data-only
        /// container.
        #[arg(short = 'i', value_name = "PATH")]
        input: Option<PathBuf>,
        /// Destination TrueType file.
        #[arg(short = 'o', value_name = "PATH")]
        output: PathBuf,
    },
    /// Remove UCD properties from TrueType files.
    Strip {
        /// Source TrueType file.
        #[arg(short = 'i', value_name = "PATH")]
        input: PathBuf,
        /// Destination TrueType file; defaults to the source file.
        #[arg(short = 'o', value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Look up UCD properties in TrueType files.
    Lookup {
        /// Source TrueType file.
        #[arg(short = 'i', value_name = "PATH")]
        input: PathBuf,
        /// Properties to look up (all when omitted).
        #[arg(short = 'p', value_name = "PROP")]
        properties: Vec<String>,
        /// Code points to look up: U+XXXX, 0xXXXX, bare hex, or a
        /// literal character.
        #[arg(value_name = "CP")]
        code_points: Vec<String>,
    },
    /// Merge flagged UCD source fragments into data files.
    Merge {
        /// Directory of UCD source fragments.
        #[arg(short = 'd', long = "data-dir", value_name = "PATH")]
        data_dir: PathBuf,
        /// Fragment files to include regardless of flags.
        #[arg(short = 'f', value_name = "PATH")]
        files: Vec<PathBuf>,
        /// Flags selecting fragments (`--flag x` matches `@flag x`;
        /// `--flag no-x` excludes).
        #[arg(long = "flag", value_name = "TOKEN", allow_hyphen_values = true)]
        flags: Vec<String>,
        /// Superstring matched against fragments' @substring tokens.
        #[arg(short = 's', value_name = "STRING", default_value = "")]
        superstring: String,
        /// Print a merged data file (e.g. Blocks.txt) to stdout.
        #[arg(short = 'p', value_name = "FILENAME")]
        print: Option<String>,
        /// Write a single data file or a directory of all data files.
        #[arg(short = 'o', value_name = "PATH")]
        output: Option<PathBuf>,
        /// Print paths and flags of all matched source files.
        #[arg(short = 'm')]
        matches: bool,
    },
}

fn read_font(path: &Path) -> anyhow::Result<SfntFont> {
    let data = std::fs::read(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let mut reader = Cursor::new(data);
    SfntFont::from_reader(&mut reader)
        .with_context(|| format!("parsing {}", path.display()))
}

fn write_font(font: &mut SfntFont, path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    font.write(&mut writer)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

/// Parses a code point given as a literal character, `U+XXXX`, `0xXXXX`,
/// or bare hex.
fn parse_code_point(s: &str) -> Option<u32> {
    let mut chars = s.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Some(c as u32);
    }
    let mut cleaned = String::new();
    let mut rest = s;
    while let Some(c) = rest.chars().next() {
        let lower = rest.to_lowercase();
        if lower.starts_with("u+") || lower.starts_with("0x") {
            rest = &rest[2..];
        } else if c.is_whitespace() {
            rest = &rest[c.len_utf8()..];
        } else {
            cleaned.push(c);
            rest = &rest[c.len_utf8()..];
        }
    }
    u32::from_str_radix(&cleaned, 16).ok()
}

fn compile(
    data: &[PathBuf],
    input: Option<&Path>,
    output: &Path,
) -> anyhow::Result<()> {
    let mut table = PuaaTable::new();
    ucd::compile_paths(&mut table, data)?;
    let mut font = match input {
        Some(path) => read_font(path)?,
        None => SfntFont::data_only(),
    };
    tracing::info!("Compiling PUAA table...");
    font.set_puaa_table(&mut table)?;
    write_font(&mut font, output)
}

fn decompile(input: &Path, output: &Path) -> anyhow::Result<()> {
    tracing::info!("Decompiling from {}...", input.display());
    let font = read_font(input)?;
    if let Some(table) = font.puaa_table()? {
        ucd::decompile_to_dir(&table, output)?;
    }
    Ok(())
}

fn copy(
    data: &Path,
    input: Option<&Path>,
    output: &Path,
) -> anyhow::Result<()> {
    tracing::info!("Decompiling from {}...", data.display());
    let source = read_font(data)?;
    let table = source.puaa_table()?;
    let mut font = match input {
        Some(path) => read_font(path)?,
        None => SfntFont::data_only(),
    };
    font.remove_puaa_table();
    if let Some(mut table) = table {
        font.set_puaa_table(&mut table)?;
    }
    write_font(&mut font, output)
}

fn strip(input: &Path, output: Option<&Path>) -> anyhow::Result<()> {
    let mut font = read_font(input)?;
    font.remove_puaa_table();
    write_font(&mut font, output.unwrap_or(input))
}

fn lookup(
    input: &Path,
    properties: &[String],
    code_points: &[String],
) -> anyhow::Result<()> {
    let font = read_font(input)?;
    let Some(table) = font.puaa_table()? else {
        println!("No tables found.");
        return Ok(());
    };
    let properties: Vec<String> =
        properties.iter().map(|p| p.trim().to_lowercase()).collect();
    let code_points: Vec<u32> = code_points
        .iter()
        .filter_map(|s| match parse_code_point(s) {
            Some(cp) => Some(cp),
            None => {
                println!("Invalid code point: {}", s);
                None
            }
        })
        .collect();

    if code_points.is_empty() {
        if properties.is_empty() {
            println!("Properties:");
            for subtable in table.subtables() {
                println!("  {}", subtable.property_name());
            }
            return Ok(());
        }
        for subtable in table.subtables() {
            if properties
                .contains(&subtable.property_name().to_lowercase())
            {
                println!("{}:", subtable.property_name());
                for run in runs_from_entries(&subtable.entries) {
                    let range = if run.first_code_point()
                        == run.last_code_point()
                    {
                        format!("{:04X}:", run.first_code_point())
                    } else {
                        format!(
                            "{:04X}..{:04X}:",
                            run.first_code_point(),
                            run.last_code_point()
                        )
                    };
                    println!(
                        "  {:<16}{}",
                        range,
                        run.property_value(run.first_code_point())
                            .unwrap_or_default()
                    );
                }
            }
        }
        return Ok(());
    }

    let width = table
        .subtables()
        .iter()
        .map(|st| st.property_name().len())
        .max()
        .unwrap_or(0)
        + 2;
    for cp in code_points {
        println!("U+{:04X}:", cp);
        for subtable in table.subtables() {
            if !properties.is_empty()
                && !properties
                    .contains(&subtable.property_name().to_lowercase())
            {
                continue;
            }
            if let Some(value) = subtable.property_value(cp) {
                let label = format!("{}:", subtable.property_name());
                println!("  {:<width$}{}", label, value, width = width);
            }
        }
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn merge(
    data_dir: &Path,
    files: &[PathBuf],
    flags: &[String],
    superstring: &str,
    print: Option<&str>,
    output: Option<&Path>,
    matches: bool,
) -> anyhow::Result<()> {
    let mut merger =
        UcdMerger::new(flags.to_vec(), superstring.to_string());
    for file in files {
        merger.add_file(file);
    }
    merger.process(data_dir)?;
    if let Some(file_name) = print {
        for line in merger.lines_for(file_name).unwrap_or_default() {
            println!("{}", line);
        }
    }
    if let Some(path) = output {
        let is_single_file = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("txt"))
            .unwrap_or(false)
            && !path.is_dir();
        if is_single_file {
            let file_name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            merger.write_file(&file_name, path)?;
        } else {
            merger.write_dir(path)?;
        }
    }
    if matches || (print.is_none() && output.is_none()) {
        println!("Matched files:");
        let matched: Vec<(String, Vec<String>)> = merger
            .matched_files()
            .iter()
            .map(|m| (m.path.display().to_string(), m.flags.clone()))
            .collect();
        for (path, _) in &matched {
            println!("  {}", path);
        }
        println!("Matched flags:");
        for (_, flags) in &matched {
            if let Some(flag) = flags.first() {
                println!("  {}", flag);
            }
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let default_filter = if cli.quiet { "warn" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_target(false)
        .without_time()
        .init();

    match &cli.command {
        Command::Compile {
            data,
            input,
            output,
        } => {
            if data.is_empty() {
                bail!("No data files specified.");
            }
            compile(data, input.as_deref(), output)
        }
        Command::Decompile { input, output } => decompile(input, output),
        Command::Copy {
            data,
            input,
            output,
        } => copy(data, input.as_deref(), output),
        Command::Strip { input, output } => {
            strip(input, output.as_deref())
        }
        Command::Lookup {
            input,
            properties,
            code_points,
        } => lookup(input, properties, code_points),
        Command::Merge {
            data_dir,
            files,
            flags,
            superstring,
            print,
            output,
            matches,
        } => merge(
            data_dir,
            files,
            flags,
            superstring,
            print.as_deref(),
            output.as_deref(),
            *matches,
        ),
    }
}
