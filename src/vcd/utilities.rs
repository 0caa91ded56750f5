// Copyright (C) 2022 Yehowshua Immanuel
// This program is distributed under both the GPLV3 license
// and the YEHOWSHUA license, both of which can be found at
// the root of the folder containing the sources for this program.
use std::borrow::Cow;

use super::signal::SignalValue;

/// Densifies a trace so that time step `through` exists, by repeating the
/// last recorded sample over every step that has no sample yet. A trace
/// that has never been assigned is filled with [`SignalValue::Unknown`].
///
/// A trace that already reaches `through` is left alone.
pub fn forward_fill(samples: &mut Vec<SignalValue>, through: usize) {
    let target_len = through.saturating_add(1);
    if samples.len() >= target_len {
        return;
    }
    let fill = samples.last().cloned().unwrap_or(SignalValue::Unknown);
    samples.resize(target_len, fill);
}

/// Left extends a vector value to `width` bits the way a VCD reader must:
/// a leading `0` or `1` extends with `0`, a leading `x` or `z` extends
/// with itself.
pub(crate) fn extend_to_width(bits: &str, width: usize) -> Cow<'_, str> {
    if bits.len() >= width {
        return Cow::Borrowed(bits);
    }
    let pad = match bits.chars().next() {
        Some(chr @ ('x' | 'X' | 'z' | 'Z' | 'u' | 'U')) => chr,
        _ => '0',
    };
    let mut extended = String::with_capacity(width);
    extended.extend(std::iter::repeat(pad).take(width - bits.len()));
    extended.push_str(bits);
    Cow::Owned(extended)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits(s: &str) -> SignalValue {
        SignalValue::Bits(s.to_string())
    }

    #[test]
    fn fill_repeats_last_sample() {
        let mut samples = vec![bits("0"), bits("1")];
        forward_fill(&mut samples, 4);
        assert_eq!(samples, [bits("0"), bits("1"), bits("1"), bits("1"), bits("1")]);
    }

    #[test]
    fn fill_of_unassigned_trace_is_unknown() {
        let mut samples = vec![];
        forward_fill(&mut samples, 2);
        assert_eq!(samples, vec![SignalValue::Unknown; 3]);
    }

    #[test]
    fn fill_never_shrinks() {
        let mut samples = vec![bits("0"), bits("1"), bits("0")];
        forward_fill(&mut samples, 1);
        assert_eq!(samples.len(), 3);
    }

    #[test]
    fn extension_follows_leading_bit() {
        assert_eq!(extend_to_width("1", 4), "0001");
        assert_eq!(extend_to_width("01", 4), "0001");
        assert_eq!(extend_to_width("x1", 4), "xxx1");
        assert_eq!(extend_to_width("z", 3), "zzz");
        assert_eq!(extend_to_width("1010", 4), "1010");
        assert_eq!(extend_to_width("11111", 4), "11111");
    }
}
