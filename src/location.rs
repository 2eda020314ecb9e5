// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use std::fmt::Display;

/// A span of characters inside a pattern string.
///
/// Patterns are single-line, so only the character index and the
/// length are tracked.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub struct Location {
    pub index: usize,  // The character index in the pattern
    pub length: usize, // The length of the range; 0 for a single position
}

impl Location {
    /// Create a new `Location` representing a single position.
    pub fn new_position(index: usize) -> Self {
        Self { index, length: 0 }
    }

    /// Create a new `Location` representing a range of characters.
    pub fn new_range(index: usize, length: usize) -> Self {
        Self { index, length }
    }

    /// Create a range `Location` from a starting position and a length.
    pub fn from_position_and_length(position: &Location, length: usize) -> Self {
        Self::new_range(position.index, length)
    }

    /// Create a range `Location` from two positions, the end one included.
    pub fn from_position_pair_with_end_included(
        position_start: &Location,
        position_end_included: &Location,
    ) -> Self {
        Self::new_range(
            position_start.index,
            position_end_included.index - position_start.index + 1,
        )
    }

    /// Combine two ranges into a single range `Location`.
    pub fn from_range_pair(range_start: &Location, range_end: &Location) -> Self {
        Self::new_range(
            range_start.index,
            range_end.index - range_start.index + range_end.length,
        )
    }

    /// The index just past the end of the range.
    pub fn end_index(&self) -> usize {
        self.index + self.length
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.length == 0 {
            write!(f, "{}", self.index)
        } else {
            write!(f, "{}..{}", self.index, self.end_index())
        }
    }
}
