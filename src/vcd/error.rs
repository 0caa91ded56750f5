// Copyright (C) 2022 Yehowshua Immanuel
// This program is distributed under both the GPLV3 license
// and the YEHOWSHUA license, both of which can be found at
// the root of the folder containing the sources for this program.

//! Errors produced while turning a dump into dense traces.
//!
//! Every variant is fatal: a failed parse yields no partial [`VCD`](crate::VCD).

use std::path::PathBuf;

use super::reader::Cursor;

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The dump file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A required header or structural keyword never showed up.
    #[error("keyword `{key}` not found before the end of the dump")]
    MissingHeaderKey { key: String },

    /// The `$timescale` value is not `<digits><unit>`.
    #[error("`{token}` is not a valid timescale, expected <digits><unit> such as `10ns`")]
    MalformedTimescale { token: String },

    /// A token in the value change section matches none of the known forms.
    #[error("`{token}` at token {position} ({cursor}) is neither a time marker nor a value change")]
    UnrecognizedToken {
        token: String,
        position: usize,
        cursor: Cursor,
    },

    /// A value change refers to an identifier no `$var` declared.
    #[error("value change at token {position} targets undeclared identifier `{identifier}`")]
    UndeclaredIdentifier { identifier: String, position: usize },

    /// The bit width of a `$var` is not an integer of at least 1.
    #[error("signal `{identifier}` has invalid bit width `{token}`")]
    InvalidBitWidth { identifier: String, token: String },

    /// Strict mode only: an identifier was declared twice.
    #[error("identifier `{identifier}` is declared more than once")]
    DuplicateDeclaration { identifier: String },

    /// Strict mode only: two identifiers share a display name.
    #[error("signal name `{name}` is bound to more than one identifier")]
    DuplicateSignalName { name: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vcd::reader::{Line, Word};

    #[test]
    fn missing_key_display() {
        let e = ParseError::MissingHeaderKey {
            key: "$enddefinitions".into(),
        };
        assert_eq!(
            e.to_string(),
            "keyword `$enddefinitions` not found before the end of the dump"
        );
    }

    #[test]
    fn unrecognized_token_display() {
        let e = ParseError::UnrecognizedToken {
            token: "q!".into(),
            position: 42,
            cursor: Cursor(Line(7), Word(2)),
        };
        assert_eq!(
            e.to_string(),
            "`q!` at token 42 (line 7, word 2) is neither a time marker nor a value change"
        );
    }

    #[test]
    fn io_display() {
        let e = ParseError::Io {
            path: PathBuf::from("dump.vcd"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
        };
        assert!(e.to_string().starts_with("failed to read dump.vcd"));
    }
}
