// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use crate::{
    ast::{QuantifierMode, RepeatMax},
    charset::PresetCharSetName,
    location::Location,
};

#[derive(Debug, PartialEq, Clone)]
pub enum Token {
    CharSetStart,         // [
    CharSetStartNegative, // [^
    CharSetEnd,           // ]

    LogicOr,    // |
    GroupStart, // (
    GroupEnd,   // )

    Char(char),
    CharRange(char, char), // only inside a charset, e.g. a-z
    PresetCharSet(PresetCharSetName), // \d, \w, \s, their negations and `.`

    // `?`, `*`, `+`, `{m}`, `{m,}` and `{m,n}`,
    // each followed by an optional `?` (reluctant) or `+` (possessive)
    Repetition(Repetition, QuantifierMode),
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Repetition {
    pub min: u32,
    pub max: RepeatMax,
}

impl Repetition {
    pub fn new(min: u32, max: RepeatMax) -> Self {
        Self { min, max }
    }

    pub fn optional() -> Self {
        Self::new(0, RepeatMax::Finite(1))
    }

    pub fn zero_or_more() -> Self {
        Self::new(0, RepeatMax::Unbounded)
    }

    pub fn one_or_more() -> Self {
        Self::new(1, RepeatMax::Unbounded)
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct TokenWithRange {
    pub token: Token,
    pub range: Location,
}

impl TokenWithRange {
    pub fn new(token: Token, range: Location) -> Self {
        Self { token, range }
    }

    pub fn from_position_and_length(token: Token, position: &Location, length: usize) -> Self {
        Self {
            token,
            range: Location::from_position_and_length(position, length),
        }
    }
}
