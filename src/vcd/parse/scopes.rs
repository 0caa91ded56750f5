// Copyright (C) 2022 Yehowshua Immanuel
// This program is distributed under both the GPLV3 license
// and the YEHOWSHUA license, both of which can be found at
// the root of the folder containing the sources for this program.

//! part of the vcd parser that handles the `$scope`/`$var` section and
//! builds the identifier table
use indexmap::IndexMap;
use log::{debug, warn};

use super::super::error::ParseError;
use super::super::reader::{Scan, WordReader};
use super::super::types::Declaration;

const SCOPE_MARKERS: [&str; 3] = ["$scope", "$upscope", "$enddefinitions"];

/// Reads the four words following a `$var` keyword.
pub(super) fn parse_var(
    word_reader : &mut WordReader,
    scope       : &[String],
) -> Result<Declaration, ParseError> {
    // $var wire 4 ! counter $end
    //      ^^^^ ^ ^ ^^^^^^^ - type, bit width, identifier, name
    let mut fields = word_reader.positional_fields(4).into_iter();
    let mut field = || fields.next().unwrap_or_default();
    let (var_type, width, identifier, name) = (field(), field(), field(), field());

    let bit_width = match width.parse::<u32>() {
        Ok(bit_width) if bit_width >= 1 => bit_width,
        _ => {
            return Err(ParseError::InvalidBitWidth {
                identifier,
                token: width,
            })
        }
    };

    Ok(Declaration {
        identifier,
        var_type,
        bit_width,
        name,
        scope : scope.to_vec(),
    })
}

/// `$scope module top $end`: returns `top`, or an empty name for the
/// anonymous scopes some simulators emit.
fn parse_scope_name(word_reader: &mut WordReader) -> String {
    let mut fields = word_reader.positional_fields(2);
    fields.pop().unwrap_or_default()
}

/// Builds the identifier table from the first `$scope` up to
/// `$enddefinitions`, leaving the cursor after `$enddefinitions $end`.
///
/// Declaring an identifier twice keeps its first position in the table but
/// takes the later declaration, unless `strict` is set.
pub(super) fn parse_scopes(
    word_reader: &mut WordReader,
    strict: bool,
) -> Result<IndexMap<String, Declaration>, ParseError> {
    let mut declarations: IndexMap<String, Declaration> = IndexMap::new();

    // `$scope $end` is anonymous, parse_scope_name has to see that `$end`
    match word_reader.scan_for("$scope", &[]) {
        Some(Scan::Found(idx)) => word_reader.seek(idx + 1),
        _ => {
            return Err(ParseError::MissingHeaderKey {
                key: "$scope".to_string(),
            })
        }
    }
    let mut path = vec![parse_scope_name(word_reader)];

    loop {
        match word_reader.scan_for("$var", &SCOPE_MARKERS) {
            Some(Scan::Found(idx)) => {
                word_reader.seek(idx + 1);
                let declaration = parse_var(word_reader, &path)?;
                let identifier = declaration.identifier.clone();

                if let Some(previous) = declarations.insert(identifier.clone(), declaration) {
                    if strict {
                        return Err(ParseError::DuplicateDeclaration { identifier });
                    }
                    warn!(
                        "identifier `{identifier}` redeclared, `{}` is replaced",
                        previous.name
                    );
                }
            }
            Some(Scan::Interrupted { marker, position }) => {
                word_reader.seek(position + 1);
                match marker {
                    "$scope" => path.push(parse_scope_name(word_reader)),
                    "$upscope" => {
                        path.pop();
                    }
                    _ => {
                        word_reader.skip_end_markers();
                        break;
                    }
                }
            }
            None => {
                return Err(ParseError::MissingHeaderKey {
                    key: "$enddefinitions".to_string(),
                })
            }
        }
    }

    debug!("{} identifiers declared", declarations.len());
    Ok(declarations)
}
