// Copyright (C) 2022 Yehowshua Immanuel
// This program is distributed under both the GPLV3 license
// and the YEHOWSHUA license, both of which can be found at
// the root of the folder containing the sources for this program.
use std::path::Path;

use log::debug;

use super::consolidate::consolidate;
use super::error::ParseError;
use super::reader::WordReader;
use super::types::VCD;

mod combinator_atoms;
mod types;

mod metadata;
use metadata::*;

mod scopes;
use scopes::*;

mod events;
use events::*;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Reject redeclared identifiers and display names bound to more than
    /// one identifier instead of silently keeping one of them.
    pub strict: bool,
}

/// Reads the whole file up front, then parses it with default options.
pub fn parse_vcd<P: AsRef<Path>>(path: P) -> Result<VCD, ParseError> {
    parse_vcd_with_options(path, ParseOptions::default())
}

pub fn parse_vcd_with_options<P: AsRef<Path>>(
    path: P,
    options: ParseOptions,
) -> Result<VCD, ParseError> {
    let path = path.as_ref();
    // the file handle is closed before parsing starts
    let contents = std::fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_vcd_str(&path.to_string_lossy(), &contents, options)
}

/// Parses dump text already in memory. `filename` only ends up in the
/// returned header.
pub fn parse_vcd_str(
    filename: &str,
    contents: &str,
    options: ParseOptions,
) -> Result<VCD, ParseError> {
    let mut word_reader = WordReader::new(contents);

    let mut header = parse_metadata(&mut word_reader, filename)?;
    let declarations = parse_scopes(&mut word_reader, options.strict)?;
    let changes = parse_events(&mut word_reader, declarations)?;
    header.signal_len = changes.signal_len;

    let signals = consolidate(changes.signals, options.strict)?;
    header.signal_num = signals.len();
    debug!(
        "parsed {filename}: {} signals over {} time steps",
        header.signal_num, header.signal_len
    );

    Ok(VCD { header, signals })
}
