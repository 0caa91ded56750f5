// Copyright (C) 2022 Yehowshua Immanuel
// This program is distributed under both the GPLV3 license
// and the YEHOWSHUA license, both of which can be found at
// the root of the folder containing the sources for this program.
use std::fmt;

use super::error::ParseError;

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct Line(pub(crate) usize);
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct Word(pub(crate) usize);

/// 1-based line and word-in-line position of a token in the source text.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct Cursor(pub(crate) Line, pub(crate) Word);

impl Cursor {
    pub fn line(&self) -> usize {
        let Cursor(Line(line), _) = self;
        *line
    }

    pub fn word(&self) -> usize {
        let Cursor(_, Word(word)) = self;
        *word
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, word {}", self.line(), self.word())
    }
}

/// A whitespace delimited word borrowed from the dump text.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub word: &'a str,
    pub cursor: Cursor,
}

/// Splits the dump into whitespace delimited tokens, in source order.
/// An empty or all-whitespace input yields no tokens.
pub fn tokenize(contents: &str) -> Vec<Token<'_>> {
    let mut tokens = vec![];
    for (line_idx, line) in contents.lines().enumerate() {
        for (word_idx, word) in line.split_whitespace().enumerate() {
            let cursor = Cursor(Line(line_idx + 1), Word(word_idx + 1));
            tokens.push(Token { word, cursor });
        }
    }
    tokens
}

/// Outcome of a keyword scan that other keywords may cut short.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Scan<'a> {
    /// The wanted keyword sits at this token index.
    Found(usize),
    /// One of the interrupting keywords came first.
    Interrupted { marker: &'a str, position: usize },
}

/// The parse cursor: an index into an immutable token list. Every parser
/// phase advances the same reader, so phases pick up where the last one
/// stopped.
pub(crate) struct WordReader<'a> {
    tokens: Vec<Token<'a>>,
    idx: usize,
}

impl<'a> WordReader<'a> {
    pub(crate) fn new(contents: &'a str) -> WordReader<'a> {
        WordReader {
            tokens: tokenize(contents),
            idx: 0,
        }
    }

    pub(crate) fn position(&self) -> usize {
        self.idx
    }

    pub(crate) fn seek(&mut self, idx: usize) {
        self.idx = idx.min(self.tokens.len());
    }

    pub(crate) fn word_at(&self, idx: usize) -> Option<&'a str> {
        self.tokens.get(idx).map(|token| token.word)
    }

    pub(crate) fn cursor_at(&self, idx: usize) -> Option<Cursor> {
        self.tokens.get(idx).map(|token| token.cursor)
    }

    pub(crate) fn curr_word(&self) -> Option<&'a str> {
        self.word_at(self.idx)
    }

    /// Returns the word under the cursor together with its index, then
    /// steps past it.
    pub(crate) fn next_word(&mut self) -> Option<(&'a str, usize)> {
        let word = self.curr_word()?;
        let idx = self.idx;
        self.idx += 1;
        Some((word, idx))
    }

    pub(crate) fn skip_end_markers(&mut self) {
        while self.curr_word() == Some("$end") {
            self.idx += 1;
        }
    }

    /// Scans forward from the cursor, inclusive, for `key`. Stops early on
    /// any word in `interrupts`. The cursor is left on whichever keyword
    /// ended the scan. `None` means the tokens ran out first.
    pub(crate) fn scan_for(&mut self, key: &str, interrupts: &[&str]) -> Option<Scan<'a>> {
        while let Some(word) = self.curr_word() {
            if word == key {
                return Some(Scan::Found(self.idx));
            }
            if interrupts.contains(&word) {
                return Some(Scan::Interrupted {
                    marker: word,
                    position: self.idx,
                });
            }
            self.idx += 1;
        }
        None
    }

    /// Moves the cursor just past the next `key` and any `$end` words that
    /// directly follow it.
    pub(crate) fn find_key(&mut self, key: &str) -> Result<(), ParseError> {
        match self.scan_for(key, &[]) {
            Some(Scan::Found(idx)) => {
                self.seek(idx + 1);
                self.skip_end_markers();
                Ok(())
            }
            _ => Err(ParseError::MissingHeaderKey {
                key: key.to_string(),
            }),
        }
    }

    /// Reads up to `count` words following the cursor, stopping at `$end`.
    /// Missing trailing fields come back as empty strings.
    pub(crate) fn positional_fields(&mut self, count: usize) -> Vec<String> {
        let mut fields = Vec::with_capacity(count);
        while fields.len() < count {
            match self.curr_word() {
                Some(word) if word != "$end" => {
                    fields.push(word.to_string());
                    self.idx += 1;
                }
                _ => fields.push(String::new()),
            }
        }
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_keep_order_and_position() {
        let tokens = tokenize("$date\n  Mon Jan\t1 $end\n\n#5");
        let words: Vec<&str> = tokens.iter().map(|t| t.word).collect();
        assert_eq!(words, ["$date", "Mon", "Jan", "1", "$end", "#5"]);
        assert_eq!(tokens[1].cursor, Cursor(Line(2), Word(1)));
        assert_eq!(tokens[5].cursor, Cursor(Line(4), Word(1)));
    }

    #[test]
    fn empty_input_has_no_tokens() {
        assert!(tokenize("").is_empty());
        assert!(tokenize(" \n\t\r\n ").is_empty());
    }

    #[test]
    fn find_key_skips_trailing_ends() {
        let mut reader = WordReader::new("junk $version $end $end Icarus");
        reader.find_key("$version").unwrap();
        assert_eq!(reader.curr_word(), Some("Icarus"));
    }

    #[test]
    fn find_key_reports_missing_key() {
        let mut reader = WordReader::new("$date $end");
        let err = reader.find_key("$timescale").unwrap_err();
        assert!(matches!(err, ParseError::MissingHeaderKey { key } if key == "$timescale"));
    }

    #[test]
    fn scan_can_be_interrupted() {
        let mut reader = WordReader::new("a b $upscope $var");
        let scan = reader.scan_for("$var", &["$upscope"]);
        assert_eq!(
            scan,
            Some(Scan::Interrupted {
                marker: "$upscope",
                position: 2
            })
        );
        assert_eq!(reader.position(), 2);

        reader.seek(3);
        assert_eq!(reader.scan_for("$var", &["$upscope"]), Some(Scan::Found(3)));

        reader.seek(4);
        assert_eq!(reader.scan_for("$var", &["$upscope"]), None);
    }

    #[test]
    fn positional_fields_stop_at_end() {
        let mut reader = WordReader::new("v1 v2 $end tail");
        let fields = reader.positional_fields(3);
        assert_eq!(fields, ["v1", "v2", ""]);
        assert_eq!(reader.curr_word(), Some("$end"));
    }
}
