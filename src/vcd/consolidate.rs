// Copyright (C) 2022 Yehowshua Immanuel
// This program is distributed under both the GPLV3 license
// and the YEHOWSHUA license, both of which can be found at
// the root of the folder containing the sources for this program.
use indexmap::map::Entry;
use indexmap::IndexMap;
use log::{debug, warn};

use super::error::ParseError;
use super::signal::{ConsolidatedSignal, RawSignal};

/// Collapses identifiers that share a display name into one signal per
/// name. The identifier declared first keeps its trace; the traces of later
/// aliases are dropped, unless `strict` is set, in which case an alias is an
/// error.
pub fn consolidate(
    raw_signals: IndexMap<String, RawSignal>,
    strict: bool,
) -> Result<IndexMap<String, ConsolidatedSignal>, ParseError> {
    let mut signals: IndexMap<String, ConsolidatedSignal> = IndexMap::new();

    for (identifier, raw) in raw_signals {
        let RawSignal {
            declaration,
            samples,
        } = raw;

        match signals.entry(declaration.name) {
            Entry::Occupied(kept) => {
                if strict {
                    return Err(ParseError::DuplicateSignalName {
                        name: kept.key().clone(),
                    });
                }
                if kept.get().samples != samples {
                    warn!(
                        "`{}` is bound to `{}` and `{identifier}` with different traces, \
                         keeping `{}`",
                        kept.key(),
                        kept.get().identifier,
                        kept.get().identifier
                    );
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(ConsolidatedSignal {
                    identifier,
                    var_type: declaration.var_type,
                    bit_width: declaration.bit_width,
                    samples,
                });
            }
        }
    }

    debug!("{} signals after consolidation", signals.len());
    Ok(signals)
}
