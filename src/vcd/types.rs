// Copyright (C) 2022 Yehowshua Immanuel
// This program is distributed under both the GPLV3 license
// and the YEHOWSHUA license, both of which can be found at
// the root of the folder containing the sources for this program.
use indexmap::IndexMap;

use super::signal::ConsolidatedSignal;

/// The five whitespace separated words of a `$date` block, kept verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Date {
    pub week: String,
    pub month: String,
    pub day: String,
    pub time: String,
    pub year: String,
    /// every word of the block joined by single spaces
    pub raw: String,
}

/// The three leading words of a `$version` block, kept verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Version {
    pub kind: String,
    pub fix_version: String,
    pub version_number: String,
    pub raw: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderInfo {
    pub filename: String,
    pub date: Date,
    pub version: Version,
    /// numeric part of `$timescale`, e.g. `10` for `10ns`
    pub timescale: u32,
    /// unit part of `$timescale`, e.g. `ns`
    pub timeunit: String,
    /// number of dense time steps; only known once every value change
    /// has been read
    pub signal_len: usize,
    /// number of distinct signal names after consolidation
    pub signal_num: usize,
}

/// One `$var` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub identifier: String,
    pub var_type: String,
    pub bit_width: u32,
    pub name: String,
    /// names of the enclosing `$scope`s, outermost first
    pub scope: Vec<String>,
}

/// A fully parsed dump: header metadata plus one dense trace per signal
/// name, in declaration order.
#[derive(Debug, Clone)]
pub struct VCD {
    pub header: HeaderInfo,
    pub signals: IndexMap<String, ConsolidatedSignal>,
}

impl VCD {
    pub fn content(&self) -> (&HeaderInfo, &IndexMap<String, ConsolidatedSignal>) {
        (&self.header, &self.signals)
    }

    pub fn into_parts(self) -> (HeaderInfo, IndexMap<String, ConsolidatedSignal>) {
        (self.header, self.signals)
    }

    pub fn signal(&self, name: &str) -> Option<&ConsolidatedSignal> {
        self.signals.get(name)
    }

    /// Absolute simulation time of a time step, in `header.timeunit`s.
    pub fn time_of_step(&self, step: usize) -> u64 {
        step as u64 * u64::from(self.header.timescale)
    }
}
