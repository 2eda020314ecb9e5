// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use std::{fmt::Display, ops::Range};

use crate::{
    ast::Ast, buffer::InputBuffer, compiler::compile, context::Context, error::RegExpError,
    matcher::Matcher, process::start_process, rulechecker::can_match_empty,
};

/// Matching options.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub struct RegexOptions {
    pub ignore_case: bool,
}

impl RegexOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ignore_case(mut self, ignore_case: bool) -> Self {
        self.ignore_case = ignore_case;
        self
    }
}

/// A compiled regular expression.
///
/// The AST is immutable, a `Regex` can be shared by any number of
/// matchers and threads.
#[derive(Debug, Clone)]
pub struct Regex {
    pattern: String,
    ast: Ast,
    options: RegexOptions,
}

impl Regex {
    pub fn new(pattern: &str) -> Result<Self, RegExpError> {
        Self::with_options(pattern, RegexOptions::default())
    }

    pub fn with_options(pattern: &str, options: RegexOptions) -> Result<Self, RegExpError> {
        let ast = compile(pattern)?;
        Ok(Regex {
            pattern: pattern.to_owned(),
            ast,
            options,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    pub fn ast(&self) -> &Ast {
        &self.ast
    }

    pub fn options(&self) -> &RegexOptions {
        &self.options
    }

    /// Whether the pattern accepts the empty string, e.g. `a*` or `(a|b?)`.
    pub fn matches_empty(&self) -> bool {
        can_match_empty(&self.ast, self.ast.root())
    }

    /// Create a matcher reading the buffer.
    pub fn matcher(&self, buffer: InputBuffer) -> Matcher<'_> {
        Matcher::new(self, buffer)
    }

    /// Match the pattern exactly at `start` (in characters).
    pub fn match_at(&self, text: &str, start: usize) -> Option<Match> {
        let chars: Vec<char> = text.chars().collect();
        let mut context = Context::new();
        let end = start_process(
            &mut context,
            &self.ast,
            &chars,
            self.options.ignore_case,
            start,
        )?;
        Some(Match::new(start, end, sub_string(&chars, start, end)))
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.find(text).is_some()
    }

    /// The leftmost match in the text.
    pub fn find(&self, text: &str) -> Option<Match> {
        self.find_iter(text).next()
    }

    /// Every successive non-overlapping match in the text.
    pub fn find_iter<'a>(&'a self, text: &str) -> Matches<'a> {
        Matches::new(self, text.chars().collect())
    }
}

impl Display for Regex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.pattern)
    }
}

pub struct Matches<'a> {
    regex: &'a Regex,
    chars: Vec<char>,
    context: Context,
    last_position: usize,
    last_match_end: Option<usize>,
}

impl<'a> Matches<'a> {
    fn new(regex: &'a Regex, chars: Vec<char>) -> Self {
        Matches {
            regex,
            chars,
            context: Context::new(),
            last_position: 0,
            last_match_end: None,
        }
    }
}

impl Iterator for Matches<'_> {
    type Item = Match;

    fn next(&mut self) -> Option<Self::Item> {
        while self.last_position <= self.chars.len() {
            let start = self.last_position;
            let end = start_process(
                &mut self.context,
                &self.regex.ast,
                &self.chars,
                self.regex.options.ignore_case,
                start,
            );

            match end {
                // an empty match right after the previous match is skipped
                Some(end) if end == start && self.last_match_end == Some(start) => {
                    self.last_position += 1;
                }
                Some(end) => {
                    // empty matches move forward one character
                    self.last_position = if end == start { end + 1 } else { end };
                    self.last_match_end = Some(end);
                    return Some(Match::new(start, end, sub_string(&self.chars, start, end)));
                }
                None => {
                    self.last_position += 1;
                }
            }
        }

        None
    }
}

/// A successful match, positions are character offsets.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Match {
    pub start: usize, // position included
    pub end: usize,   // position excluded
    pub value: String,
}

impl Match {
    pub fn new(start: usize, end: usize, value: String) -> Self {
        Match { start, end, value }
    }

    // the following methods are intended to
    // be compatible with the 'Match' API of crate 'regex':
    // https://docs.rs/regex/latest/regex/struct.Match.html

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn range(&self) -> Range<usize> {
        Range {
            start: self.start,
            end: self.end,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

fn sub_string(chars: &[char], start: usize, end_excluded: usize) -> String {
    chars[start..end_excluded].iter().collect()
}
