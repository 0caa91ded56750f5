// Copyright (C) 2022 Yehowshua Immanuel
// This program is distributed under both the GPLV3 license
// and the YEHOWSHUA license, both of which can be found at
// the root of the folder containing the sources for this program.
use super::types::ParseResult;

pub(super) fn digit(chr : u8) -> bool {
    return chr.is_ascii_digit()
}

pub(super) fn alpha(chr : u8) -> bool {
    return chr.is_ascii_alphabetic()
}

pub(super) fn take_while(word : &str, cond : fn(u8) -> bool) -> ParseResult<'_> {
    let new_start = word.bytes().take_while(|chr| cond(*chr)).count();

    return
        ParseResult{
            matched  : &word[0..new_start],
            residual : &word[new_start..]
        };
}

pub(super) fn tag<'a>(word : &'a str, pattern : &str) -> ParseResult<'a> {
    let new_start = if word.starts_with(pattern) {pattern.len()} else {0};

    return
        ParseResult{
            matched  : &word[0..new_start],
            residual : &word[new_start..]
        };
}
