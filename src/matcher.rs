// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use log::trace;

use crate::{buffer::InputBuffer, context::Context, process::start_process, regex::Match, Regex};

/// Binds a compiled `Regex` to an input buffer.
///
/// The matcher owns the backtracking stacks, they are rebuilt at the
/// start of every attempt, so retrying after text has been appended to
/// the buffer gives the same result as a freshly created matcher.
pub struct Matcher<'a> {
    regex: &'a Regex,
    buffer: InputBuffer,
    context: Context,
    last_match: Option<Match>,
}

impl<'a> Matcher<'a> {
    pub fn new(regex: &'a Regex, buffer: InputBuffer) -> Self {
        Matcher {
            regex,
            buffer,
            context: Context::new(),
            last_match: None,
        }
    }

    pub fn regex(&self) -> &'a Regex {
        self.regex
    }

    pub fn buffer(&self) -> &InputBuffer {
        &self.buffer
    }

    /// Forget the last match.
    pub fn reset(&mut self) {
        self.context.reset();
        self.last_match = None;
    }

    /// Bind another buffer and forget the last match.
    pub fn reset_buffer(&mut self, buffer: InputBuffer) {
        self.buffer = buffer;
        self.reset();
    }

    /// Try to match the whole pattern starting at `start`.
    ///
    /// Returns the end position (excluded) on success, the match is then
    /// available through `last_match()`. On failure the previous
    /// match is cleared.
    pub fn matches_from(&mut self, start: usize) -> Option<usize> {
        let end = {
            let chars = self.buffer.chars();
            start_process(
                &mut self.context,
                self.regex.ast(),
                &chars,
                self.regex.options().ignore_case,
                start,
            )
        };

        self.last_match = end.map(|end| Match::new(start, end, self.buffer.slice(start, end)));

        trace!(
            "pattern {:?} at {}: {:?}, read end of input: {}",
            self.regex.as_str(),
            start,
            end,
            self.context.has_read_end_of_input()
        );

        end
    }

    /// Same as `matches_from(0)`.
    pub fn match_from_beginning(&mut self) -> Option<usize> {
        self.matches_from(0)
    }

    pub fn last_match(&self) -> Option<&Match> {
        self.last_match.as_ref()
    }

    /// The start position of the last match.
    pub fn start(&self) -> Option<usize> {
        self.last_match.as_ref().map(|m| m.start())
    }

    /// The end position (excluded) of the last match.
    pub fn end(&self) -> Option<usize> {
        self.last_match.as_ref().map(|m| m.end())
    }

    /// The length of the last match.
    pub fn len(&self) -> Option<usize> {
        self.last_match.as_ref().map(|m| m.len())
    }

    /// Whether the last attempt tried to read a character at or beyond
    /// the end of the buffer, i.e. appending more text might change
    /// its result.
    pub fn has_read_end_of_input(&self) -> bool {
        self.context.has_read_end_of_input()
    }

    /// Whether the last attempt hit the end of a buffer that is still
    /// open for appending.
    pub fn needs_more_input(&self) -> bool {
        self.has_read_end_of_input() && !self.buffer.is_closed()
    }
}
