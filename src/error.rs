// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use std::fmt::Display;

use thiserror::Error;

use crate::location::Location;

/// The reason a pattern was rejected.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ErrorKind {
    EmptyPattern,

    // `a|`, `|a` and `()`
    EmptyAlternative,
    UnbalancedParenthesis,

    // a quantifier with nothing to repeat, e.g. `*a`, `a**`
    DanglingQuantifier,

    // `{0}` and `{0,0}`
    ZeroEffectiveRepeat,

    // `{3,2}`
    InvalidRepeatBounds,

    // `{`, `{x}`, `{1,x}` or a count that does not fit in `u32`
    MalformedQuantifier,
    MalformedCharacterSet,
    InvalidEscape,
    UnsupportedAnchor,

    // a stray `]` or `}` outside of a charset
    UnexpectedCharacter,

    // more nested groups than the parser accepts
    NestingTooDeep,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name_str = match self {
            ErrorKind::EmptyPattern => "empty pattern",
            ErrorKind::EmptyAlternative => "empty alternative",
            ErrorKind::UnbalancedParenthesis => "unbalanced parenthesis",
            ErrorKind::DanglingQuantifier => "dangling quantifier",
            ErrorKind::ZeroEffectiveRepeat => "zero effective repeat",
            ErrorKind::InvalidRepeatBounds => "invalid repeat bounds",
            ErrorKind::MalformedQuantifier => "malformed quantifier",
            ErrorKind::MalformedCharacterSet => "malformed character set",
            ErrorKind::InvalidEscape => "invalid escape sequence",
            ErrorKind::UnsupportedAnchor => "unsupported anchor",
            ErrorKind::UnexpectedCharacter => "unexpected character",
            ErrorKind::NestingTooDeep => "nesting too deep",
        };
        f.write_str(name_str)
    }
}

/// A pattern compile error, carrying the offending fragment and its
/// location (in characters) inside the pattern.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
#[error("{kind} at {location}: \"{fragment}\"")]
pub struct RegExpError {
    pub kind: ErrorKind,
    pub location: Location,
    pub fragment: String,
}

impl RegExpError {
    /// Build an error whose fragment is cut out of the pattern
    /// characters by the location.
    pub fn new(kind: ErrorKind, location: Location, pattern_chars: &[char]) -> Self {
        let start = location.index.min(pattern_chars.len());
        let end = location.end_index().clamp(start, pattern_chars.len());
        let fragment: String = pattern_chars[start..end].iter().collect();

        Self {
            kind,
            location,
            fragment,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Render the error together with the pattern and a marker line
    /// pointing at the offending fragment, e.g.
    ///
    /// ```text
    /// invalid escape sequence at 1..3: "\q"
    /// a\qb
    ///  ^^
    /// ```
    pub fn with_source(&self, pattern: &str) -> String {
        let marker_width = self.location.length.max(1);
        format!(
            "{}\n{}\n{}{}",
            self,
            pattern,
            " ".repeat(self.location.index),
            "^".repeat(marker_width)
        )
    }
}

/// Errors raised by the input buffer.
#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum BufferError {
    #[error("cannot append to a closed input buffer")]
    Closed,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::location::Location;

    use super::{ErrorKind, RegExpError};

    #[test]
    fn test_error_fragment_and_display() {
        let chars: Vec<char> = "a\\qb".chars().collect();
        let err = RegExpError::new(ErrorKind::InvalidEscape, Location::new_range(1, 2), &chars);

        assert_eq!(err.fragment, "\\q");
        assert_eq!(err.to_string(), "invalid escape sequence at 1..3: \"\\q\"");
        assert_eq!(
            err.with_source("a\\qb"),
            "invalid escape sequence at 1..3: \"\\q\"\na\\qb\n ^^"
        );
    }

    #[test]
    fn test_error_fragment_out_of_range() {
        // locations pointing at the end of the pattern yield an empty fragment
        let chars: Vec<char> = "(a".chars().collect();
        let err = RegExpError::new(
            ErrorKind::UnbalancedParenthesis,
            Location::new_range(2, 1),
            &chars,
        );

        assert_eq!(err.fragment, "");
        assert_eq!(err.kind(), ErrorKind::UnbalancedParenthesis);
    }
}
