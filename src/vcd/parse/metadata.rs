// Copyright (C) 2022 Yehowshua Immanuel
// This program is distributed under both the GPLV3 license
// and the YEHOWSHUA license, both of which can be found at
// the root of the folder containing the sources for this program.
use chrono::prelude::*;
use itertools::Itertools;
use log::{debug, warn};

use super::super::error::ParseError;
use super::super::reader::WordReader;
use super::super::types::{Date, HeaderInfo, Version};
use super::combinator_atoms::{alpha, digit, take_while};

const HEADER_KEYS: [&str; 3] = ["$date", "$version", "$timescale"];

/// Every word from the cursor up to, not including, the next `$end`.
fn block_text(word_reader: &WordReader) -> String {
    let mut idx = word_reader.position();
    let mut words = vec![];
    while let Some(word) = word_reader.word_at(idx) {
        if word == "$end" {
            break;
        }
        words.push(word);
        idx += 1;
    }
    words.join(" ")
}

pub(super) fn parse_date(word_reader: &mut WordReader) -> Date {
    let raw = block_text(word_reader);
    // week, month, day, time, year
    let mut fields = word_reader.positional_fields(5).into_iter();
    let mut field = || fields.next().unwrap_or_default();

    Date {
        week: field(),
        month: field(),
        day: field(),
        time: field(),
        year: field(),
        raw,
    }
}

pub(super) fn parse_version(word_reader: &mut WordReader) -> Version {
    let raw = block_text(word_reader);
    // type, fix version, version number
    let mut fields = word_reader.positional_fields(3).into_iter();
    let mut field = || fields.next().unwrap_or_default();

    Version {
        kind: field(),
        fix_version: field(),
        version_number: field(),
        raw,
    }
}

pub(super) fn parse_timescale(word_reader: &mut WordReader) -> Result<(u32, String), ParseError> {
    // we might see `1ps $end` or `1 ps $end`
    let (word, _) = word_reader
        .next_word()
        .ok_or_else(|| ParseError::MalformedTimescale {
            token: String::new(),
        })?;
    let malformed = || ParseError::MalformedTimescale {
        token: word.to_string(),
    };

    let res = take_while(word, digit);
    let scalar = res.matched().ok_or_else(malformed)?;

    let unit = if res.residual.is_empty() {
        match word_reader.curr_word() {
            Some(next) if take_while(next, alpha).whole().is_some() => {
                word_reader.next_word();
                next
            }
            _ => return Err(malformed()),
        }
    } else {
        take_while(res.residual, alpha)
            .whole()
            .ok_or_else(malformed)?
    };

    let scalar: u32 = scalar.parse().map_err(|_| malformed())?;
    Ok((scalar, unit.to_string()))
}

/// Locates `$date`, `$version` and `$timescale`, in whatever order they
/// appear, and leaves the cursor after the last of them.
pub(super) fn parse_metadata(
    word_reader: &mut WordReader,
    filename: &str,
) -> Result<HeaderInfo, ParseError> {
    let mut header = HeaderInfo {
        filename: filename.to_string(),
        ..HeaderInfo::default()
    };
    let mut header_end = 0;

    for key in HEADER_KEYS {
        word_reader.seek(0);
        word_reader.find_key(key)?;

        match key {
            "$date" => header.date = parse_date(word_reader),
            "$version" => header.version = parse_version(word_reader),
            _ => {
                let (timescale, timeunit) = parse_timescale(word_reader)?;
                header.timescale = timescale;
                header.timeunit = timeunit;
            }
        }
        header_end = header_end.max(word_reader.position());

        if word_reader.scan_for(key, &[]).is_some() {
            warn!("{key} appears more than once, keeping the first block");
        }
    }

    word_reader.seek(header_end);
    debug!(
        "header parsed: timescale {}{}, date `{}`, version `{}`",
        header.timescale, header.timeunit, header.date.raw, header.version.raw
    );
    Ok(header)
}

impl Date {
    /// Interprets the date fields as a calendar date, if possible.
    ///
    /// Simulators do not agree on the order of the five words, so every
    /// ordering is tried against `Mon Jan 15 10:30:00 2024` style input.
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        let fields = [
            &self.week,
            &self.month,
            &self.day,
            &self.time,
            &self.year,
        ];
        if fields.iter().any(|field| field.is_empty()) {
            return None;
        }

        fields
            .iter()
            .map(|field| match field.as_str() {
                "Sept" => "Sep",
                other => other,
            })
            .permutations(fields.len())
            .find_map(|words| {
                let candidate = words.join(" ");
                NaiveDateTime::parse_from_str(&candidate, "%a %b %d %H:%M:%S %Y").ok()
            })
            .map(|naive| Utc.from_utc_datetime(&naive))
    }
}
