// Copyright (C) 2022 Yehowshua Immanuel
// This program is distributed under both the GPLV3 license
// and the YEHOWSHUA license, both of which can be found at
// the root of the folder containing the sources for this program.

mod vcd;
pub use vcd::consolidate::consolidate;
pub use vcd::error::ParseError;
pub use vcd::parse::{parse_vcd, parse_vcd_str, parse_vcd_with_options, ParseOptions};
pub use vcd::reader::{tokenize, Cursor, Token};
pub use vcd::signal::{ConsolidatedSignal, Level, RawSignal, SignalValue};
pub use vcd::types::{Date, Declaration, HeaderInfo, Version, VCD};
pub use vcd::utilities::forward_fill;

pub use indexmap::IndexMap;
