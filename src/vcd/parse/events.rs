// Copyright (C) 2022 Yehowshua Immanuel
// This program is distributed under both the GPLV3 license
// and the YEHOWSHUA license, both of which can be found at
// the root of the folder containing the sources for this program.

//! part of the vcd parser that turns the value change section into one
//! dense trace per declared identifier
use indexmap::IndexMap;
use log::{debug, trace, warn};

use super::super::error::ParseError;
use super::super::reader::WordReader;
use super::super::signal::{is_state_symbol, RawSignal, SignalValue};
use super::super::types::Declaration;
use super::super::utilities::{extend_to_width, forward_fill};
use super::combinator_atoms::{digit, tag, take_while};

/// Widest declaration whose vector values are still left extended.
const MAX_EXTENDED_WIDTH: usize = 1 << 20;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(super) enum DumpState {
    /// nothing but the declarations seen so far
    SeekingDump,
    /// inside the first `$dumpvars` block, values are initial values
    InitialDump,
    /// every value overwrites the sample at the current time step
    Incremental,
}

/// Traces for every declared identifier plus the number of time steps
/// they were densified to.
#[derive(Debug)]
pub(super) struct ValueChanges {
    pub(super) signals: IndexMap<String, RawSignal>,
    pub(super) signal_len: usize,
}

/// `#<digits>`
fn time_marker(word: &str) -> Option<Option<usize>> {
    let res = tag(word, "#");
    res.matched()?;
    let digits = take_while(res.residual, digit).whole()?;
    // a marker too large to index with is still a marker, just a bad one.
    // the step after it must be addressable as well
    Some(
        digits
            .parse::<usize>()
            .ok()
            .filter(|time| time.checked_add(1).is_some()),
    )
}

/// `<state><identifier>` packed into one word, e.g. `1!` or `x#a`.
fn scalar_change(word: &str) -> Option<(SignalValue, &str)> {
    let state = word.chars().next()?;
    if !is_state_symbol(state) || word.len() == state.len_utf8() {
        return None;
    }
    let value = SignalValue::from_scalar(state)?;
    Some((value, &word[state.len_utf8()..]))
}

/// The bits of `b<bits>`, without validating the identifier word.
fn vector_bits(word: &str) -> Option<&str> {
    let bits = word.strip_prefix('b').or_else(|| word.strip_prefix('B'))?;
    if bits.is_empty() || !bits.chars().all(is_state_symbol) {
        return None;
    }
    Some(bits)
}

struct EventParser {
    state: DumpState,
    current_time: usize,
    max_time: Option<usize>,
    signals: IndexMap<String, RawSignal>,
}

impl EventParser {
    fn new(declarations: IndexMap<String, Declaration>) -> EventParser {
        EventParser {
            state: DumpState::SeekingDump,
            current_time: 0,
            max_time: None,
            signals: declarations
                .into_iter()
                .map(|(identifier, declaration)| (identifier, RawSignal::new(declaration)))
                .collect(),
        }
    }

    fn transition(&mut self, state: DumpState) {
        trace!("{:?} -> {:?} at time {}", self.state, state, self.current_time);
        self.state = state;
    }

    fn dump_start(&mut self) {
        if self.state == DumpState::SeekingDump {
            self.transition(DumpState::InitialDump);
        }
    }

    /// The first `$end` of the value change section closes the initial
    /// dump for good.
    fn end_of_block(&mut self) {
        if self.state != DumpState::Incremental {
            self.transition(DumpState::Incremental);
        }
    }

    /// Moves to time step `time`. Once past the initial dump every trace
    /// is densified so that it covers `time`.
    fn advance_time(&mut self, time: usize) {
        if self.state == DumpState::Incremental {
            for signal in self.signals.values_mut() {
                forward_fill(&mut signal.samples, time);
            }
        }
        self.current_time = time;
        self.max_time = Some(self.max_time.map_or(time, |max| max.max(time)));
    }

    fn record(
        &mut self,
        identifier: &str,
        value: SignalValue,
        position: usize,
    ) -> Result<(), ParseError> {
        let signal =
            self.signals
                .get_mut(identifier)
                .ok_or_else(|| ParseError::UndeclaredIdentifier {
                    identifier: identifier.to_string(),
                    position,
                })?;

        match self.state {
            DumpState::SeekingDump | DumpState::InitialDump => {
                // appended at the current step; a dump that never closes its
                // initial block still gets one sample per time marker
                let time = self.current_time;
                if time > 0 {
                    forward_fill(&mut signal.samples, time - 1);
                }
                match signal.samples.get_mut(time) {
                    Some(sample) => *sample = value,
                    None => signal.samples.push(value),
                }
            }
            DumpState::Incremental => {
                let time = self.current_time;
                forward_fill(&mut signal.samples, time);
                signal.samples[time] = value;
            }
        }
        Ok(())
    }

    fn vector_value(&self, identifier: &str, bits: &str) -> Option<SignalValue> {
        let width = self
            .signals
            .get(identifier)
            .map_or(bits.len(), |signal| signal.declaration.bit_width as usize);
        if bits.len() > width {
            warn!("value b{bits} is wider than the {width} bits declared for `{identifier}`");
        }
        if width > MAX_EXTENDED_WIDTH {
            warn!("`{identifier}` declares {width} bits, value b{bits} is stored unextended");
            return SignalValue::from_vector(bits);
        }
        SignalValue::from_vector(&extend_to_width(bits, width))
    }

    fn finish(mut self) -> ValueChanges {
        let signal_len = match self.max_time {
            Some(max_time) => max_time + 1,
            // an initial dump without any time marker describes step 0
            None if self.signals.values().any(|s| !s.samples.is_empty()) => 1,
            None => 0,
        };
        if signal_len > 0 {
            for signal in self.signals.values_mut() {
                forward_fill(&mut signal.samples, signal_len - 1);
            }
        }
        ValueChanges {
            signals: self.signals,
            signal_len,
        }
    }
}

/// Consumes every remaining word. Each word is, in this order of
/// preference, `$dumpvars`, `$end`, a time marker, a scalar change or the
/// value half of a vector change; anything else is fatal.
pub(super) fn parse_events(
    word_reader: &mut WordReader,
    declarations: IndexMap<String, Declaration>,
) -> Result<ValueChanges, ParseError> {
    let mut parser = EventParser::new(declarations);

    while let Some((word, position)) = word_reader.next_word() {
        let cursor = word_reader.cursor_at(position).unwrap_or_default();
        let unrecognized = || ParseError::UnrecognizedToken {
            token: word.to_string(),
            position,
            cursor,
        };

        if word == "$dumpvars" {
            parser.dump_start();
        } else if word == "$end" {
            parser.end_of_block();
        } else if let Some(time) = time_marker(word) {
            let time = time.ok_or_else(unrecognized)?;
            parser.advance_time(time);
        } else if let Some((value, identifier)) = scalar_change(word) {
            parser.record(identifier, value, position)?;
        } else if let (Some(bits), Some(identifier)) =
            (vector_bits(word), word_reader.word_at(position + 1))
        {
            let value = parser
                .vector_value(identifier, bits)
                .ok_or_else(unrecognized)?;
            parser.record(identifier, value, position + 1)?;
            // the identifier word has been used up as well
            word_reader.next_word();
        } else {
            return Err(unrecognized());
        }
    }

    let changes = parser.finish();
    debug!(
        "value changes parsed: {} traces of {} time steps",
        changes.signals.len(),
        changes.signal_len
    );
    Ok(changes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn declarations(vars: &[(&str, u32, &str)]) -> IndexMap<String, Declaration> {
        vars.iter()
            .map(|(identifier, bit_width, name)| {
                let declaration = Declaration {
                    identifier: identifier.to_string(),
                    var_type: "wire".to_string(),
                    bit_width: *bit_width,
                    name: name.to_string(),
                    scope: vec!["top".to_string()],
                };
                (identifier.to_string(), declaration)
            })
            .collect()
    }

    fn trace(changes: &ValueChanges, identifier: &str) -> Vec<String> {
        changes.signals[identifier]
            .samples
            .iter()
            .map(|sample| sample.to_string())
            .collect()
    }

    #[test]
    fn classifies_words() {
        assert_eq!(time_marker("#15"), Some(Some(15)));
        assert_eq!(time_marker("#"), None);
        assert_eq!(time_marker("#1a"), None);
        assert_eq!(time_marker("1!"), None);

        assert_eq!(
            scalar_change("1!"),
            Some((SignalValue::Bits("1".into()), "!"))
        );
        assert_eq!(scalar_change("z#a"), Some((SignalValue::HighImpedance, "#a")));
        assert_eq!(scalar_change("1"), None);
        assert_eq!(scalar_change("q!"), None);

        assert_eq!(vector_bits("b1010"), Some("1010"));
        assert_eq!(vector_bits("bx1"), Some("x1"));
        assert_eq!(vector_bits("b"), None);
        assert_eq!(vector_bits("b102"), None);
    }

    #[test]
    fn time_advance_fills_forward() {
        let mut reader = WordReader::new("$dumpvars 0! $end #5 1! #10");
        let changes = parse_events(&mut reader, declarations(&[("!", 1, "a")])).unwrap();

        assert_eq!(changes.signal_len, 11);
        let samples = trace(&changes, "!");
        assert_eq!(samples.len(), 11);
        assert!(samples[0..5].iter().all(|s| s == "0"));
        assert!(samples[5..11].iter().all(|s| s == "1"));
    }

    #[test]
    fn vectors_store_literal_bits() {
        let mut reader = WordReader::new("#0 $dumpvars b0000 # $end #3 b1010 # #4");
        let changes = parse_events(&mut reader, declarations(&[("#", 4, "bus")])).unwrap();
        assert_eq!(trace(&changes, "#"), ["0000", "0000", "0000", "1010", "1010"]);
    }

    #[test]
    fn short_vectors_are_extended() {
        let mut reader = WordReader::new("$dumpvars bx % $end #1 b1 % #2 bz %");
        let changes = parse_events(&mut reader, declarations(&[("%", 4, "bus")])).unwrap();
        assert_eq!(trace(&changes, "%"), ["x", "0001", "z"]);
    }

    #[test]
    fn change_overwrites_only_its_own_step() {
        let text = "$dumpvars 0! 0\" $end #2 1! #3 1\" #4 0! #6";
        let mut reader = WordReader::new(text);
        let changes =
            parse_events(&mut reader, declarations(&[("!", 1, "a"), ("\"", 1, "b")])).unwrap();
        assert_eq!(trace(&changes, "!"), ["0", "0", "1", "1", "0", "0", "0"]);
        assert_eq!(trace(&changes, "\""), ["0", "0", "0", "1", "1", "1", "1"]);
    }

    #[test]
    fn signal_without_initial_value_starts_unknown() {
        let text = "$dumpvars 1! $end #2 0\" #3";
        let mut reader = WordReader::new(text);
        let changes =
            parse_events(&mut reader, declarations(&[("!", 1, "a"), ("\"", 1, "b")])).unwrap();
        assert_eq!(trace(&changes, "\""), ["x", "x", "0", "0"]);
        assert_eq!(trace(&changes, "!"), ["1", "1", "1", "1"]);
    }

    #[test]
    fn signal_len_tracks_the_largest_time() {
        let text = "$dumpvars 0! $end #8 1! #3 0!";
        let mut reader = WordReader::new(text);
        let changes = parse_events(&mut reader, declarations(&[("!", 1, "a")])).unwrap();
        assert_eq!(changes.signal_len, 9);
        let samples = trace(&changes, "!");
        assert_eq!(samples.len(), 9);
        assert_eq!(samples[3], "0");
        assert_eq!(samples[8], "1");
    }

    #[test]
    fn dump_without_time_marker_is_one_step() {
        let mut reader = WordReader::new("$dumpvars 1! $end");
        let changes = parse_events(&mut reader, declarations(&[("!", 1, "a")])).unwrap();
        assert_eq!(changes.signal_len, 1);
        assert_eq!(trace(&changes, "!"), ["1"]);
    }

    #[test]
    fn dump_without_end_keeps_every_change() {
        let text = "#0 1! #1 0! #2 1! #3";
        let mut reader = WordReader::new(text);
        let changes =
            parse_events(&mut reader, declarations(&[("!", 1, "a"), ("\"", 1, "b")])).unwrap();
        assert_eq!(changes.signal_len, 4);
        assert_eq!(trace(&changes, "!"), ["1", "0", "1", "1"]);
        assert_eq!(trace(&changes, "\""), ["x", "x", "x", "x"]);
    }

    #[test]
    fn initial_dump_after_time_marker_lands_on_its_step() {
        let text = "#3 $dumpvars 1! 0! $end #5 1!";
        let mut reader = WordReader::new(text);
        let changes = parse_events(&mut reader, declarations(&[("!", 1, "a")])).unwrap();
        assert_eq!(trace(&changes, "!"), ["x", "x", "x", "0", "0", "1"]);
    }

    #[test]
    fn time_marker_without_a_following_step_is_rejected() {
        let text = "$dumpvars 0! $end #18446744073709551615";
        let mut reader = WordReader::new(text);
        let err = parse_events(&mut reader, declarations(&[("!", 1, "a")])).unwrap_err();
        assert!(matches!(err, ParseError::UnrecognizedToken { token, position: 3, .. }
            if token == "#18446744073709551615"));
    }

    #[test]
    fn huge_declared_width_is_not_extended() {
        let mut reader = WordReader::new("$dumpvars b1 ! $end #1");
        let changes =
            parse_events(&mut reader, declarations(&[("!", 4_000_000_000, "a")])).unwrap();
        assert_eq!(trace(&changes, "!"), ["1", "1"]);
    }

    #[test]
    fn unrecognized_token_reports_position() {
        let mut reader = WordReader::new("$dumpvars 0! $end\n#1 q!");
        let err = parse_events(&mut reader, declarations(&[("!", 1, "a")])).unwrap_err();
        match err {
            ParseError::UnrecognizedToken {
                token,
                position,
                cursor,
            } => {
                assert_eq!(token, "q!");
                assert_eq!(position, 4);
                assert_eq!(cursor.line(), 2);
                assert_eq!(cursor.word(), 2);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn vector_without_identifier_is_unrecognized() {
        let mut reader = WordReader::new("$dumpvars b01");
        let err = parse_events(&mut reader, declarations(&[("!", 2, "a")])).unwrap_err();
        assert!(matches!(err, ParseError::UnrecognizedToken { token, position: 1, .. } if token == "b01"));
    }

    #[test]
    fn undeclared_identifier() {
        let mut reader = WordReader::new("$dumpvars 1? $end");
        let err = parse_events(&mut reader, declarations(&[("!", 1, "a")])).unwrap_err();
        assert!(matches!(err, ParseError::UndeclaredIdentifier { identifier, .. } if identifier == "?"));
    }
}
