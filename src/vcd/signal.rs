// Copyright (C) 2022 Yehowshua Immanuel
// This program is distributed under both the GPLV3 license
// and the YEHOWSHUA license, both of which can be found at
// the root of the folder containing the sources for this program.
use std::fmt;

use num::{BigUint, ToPrimitive};

use super::types::Declaration;

/// The value a signal holds during one time step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignalValue {
    /// Literal bit string, most significant bit first. Usually only `0`
    /// and `1`, but a vector that mixes in `x` or `z` bits is kept
    /// verbatim here as well.
    Bits(String),
    /// `x`, unknown or uninitialized
    Unknown,
    /// `z`, high impedance
    HighImpedance,
}

/// How a renderer should draw a sample.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Level {
    /// value / (2^bit_width - 1), in `0.0..=1.0`
    Fraction(f64),
    Unknown,
    HighImpedance,
}

fn is_unknown_bit(chr: char) -> bool {
    matches!(chr, 'x' | 'X' | 'u' | 'U')
}

fn is_high_impedance_bit(chr: char) -> bool {
    matches!(chr, 'z' | 'Z')
}

pub(crate) fn is_state_symbol(chr: char) -> bool {
    matches!(chr, '0' | '1') || is_unknown_bit(chr) || is_high_impedance_bit(chr)
}

impl SignalValue {
    /// Value of a scalar change such as the `1` in `1!`.
    pub(crate) fn from_scalar(state: char) -> Option<SignalValue> {
        match state {
            '0' | '1' => Some(SignalValue::Bits(state.to_string())),
            chr if is_unknown_bit(chr) => Some(SignalValue::Unknown),
            chr if is_high_impedance_bit(chr) => Some(SignalValue::HighImpedance),
            _ => None,
        }
    }

    /// Value of a vector change such as the `1010` in `b1010 !`. A vector
    /// made only of `x` (or only of `z`) bits collapses to the sentinel.
    pub(crate) fn from_vector(bits: &str) -> Option<SignalValue> {
        if bits.is_empty() || !bits.chars().all(is_state_symbol) {
            return None;
        }
        if bits.chars().all(is_unknown_bit) {
            return Some(SignalValue::Unknown);
        }
        if bits.chars().all(is_high_impedance_bit) {
            return Some(SignalValue::HighImpedance);
        }
        Some(SignalValue::Bits(bits.to_string()))
    }

    pub fn as_str(&self) -> &str {
        match self {
            SignalValue::Bits(bits) => bits,
            SignalValue::Unknown => "x",
            SignalValue::HighImpedance => "z",
        }
    }

    pub fn is_sentinel(&self) -> bool {
        !matches!(self, SignalValue::Bits(_))
    }

    /// Converts the sample into the level a plot would draw for a signal
    /// `bit_width` bits wide. Bit strings containing `x` bits read as
    /// unknown, otherwise any `z` bit reads as high impedance.
    pub fn level(&self, bit_width: u32) -> Level {
        let bits = match self {
            SignalValue::Bits(bits) => bits,
            SignalValue::Unknown => return Level::Unknown,
            SignalValue::HighImpedance => return Level::HighImpedance,
        };

        if bits.chars().any(is_unknown_bit) {
            return Level::Unknown;
        }
        if bits.chars().any(is_high_impedance_bit) {
            return Level::HighImpedance;
        }

        let value = match BigUint::parse_bytes(bits.as_bytes(), 2) {
            Some(value) => value,
            None => return Level::Unknown,
        };

        // an over-long literal is measured against its own length
        let width = (bit_width as usize).max(bits.len()).max(1);

        // keep both operands inside f64 mantissa range; the full scale
        // (2^width - 1) >> shift is 2^(width - shift) - 1
        let shift = width.saturating_sub(53);
        let value = (value >> shift).to_f64().unwrap_or(0.0);
        let max = ((1u64 << (width - shift)) - 1) as f64;

        Level::Fraction(value / max)
    }
}

impl fmt::Display for SignalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A declared identifier and its trace, as built by the value change
/// parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSignal {
    pub declaration: Declaration,
    pub samples: Vec<SignalValue>,
}

impl RawSignal {
    pub(crate) fn new(declaration: Declaration) -> RawSignal {
        RawSignal {
            declaration,
            samples: vec![],
        }
    }
}

/// The dense trace published under one display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsolidatedSignal {
    /// the identifier whose trace was kept
    pub identifier: String,
    pub var_type: String,
    pub bit_width: u32,
    pub samples: Vec<SignalValue>,
}

impl ConsolidatedSignal {
    pub fn levels(&self) -> impl Iterator<Item = Level> + '_ {
        self.samples
            .iter()
            .map(move |sample| sample.level(self.bit_width))
    }
}
