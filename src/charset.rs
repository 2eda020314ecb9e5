// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

pub const MAX_CODEPOINT: u32 = 0x10FFFF;

/// An inclusive range of code points.
#[derive(Debug, PartialEq, Eq, Clone, Copy, PartialOrd, Ord)]
pub struct CharRange {
    pub low: u32,
    pub high: u32, // included
}

impl CharRange {
    pub fn new(low: u32, high: u32) -> Self {
        debug_assert!(low <= high);
        CharRange { low, high }
    }

    pub fn from_char(c: char) -> Self {
        let codepoint = c as u32;
        CharRange {
            low: codepoint,
            high: codepoint,
        }
    }

    pub fn contains(&self, codepoint: u32) -> bool {
        self.low <= codepoint && codepoint <= self.high
    }
}

/// A compiled set of code point ranges.
///
/// The ranges are kept sorted and merged, so membership is a binary
/// search. A negated set matches every character outside of the ranges.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct CharSet {
    ranges: Vec<CharRange>,
    pub negated: bool,
}

/// The built-in character classes.
#[allow(clippy::enum_variant_names)]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum PresetCharSetName {
    CharDigit,    // \d
    CharNotDigit, // \D
    CharSpace,    // \s
    CharNotSpace, // \S
    CharWord,     // \w
    CharNotWord,  // \W
    CharAny,      // .
}

impl PresetCharSetName {
    pub fn from_escape_char(c: char) -> Option<Self> {
        let name = match c {
            'd' => PresetCharSetName::CharDigit,
            'D' => PresetCharSetName::CharNotDigit,
            's' => PresetCharSetName::CharSpace,
            'S' => PresetCharSetName::CharNotSpace,
            'w' => PresetCharSetName::CharWord,
            'W' => PresetCharSetName::CharNotWord,
            _ => return None,
        };
        Some(name)
    }
}

const DIGIT_RANGES: [(u32, u32); 1] = [('0' as u32, '9' as u32)];

// space, \t, \n, \x0B, \f and \r
const SPACE_RANGES: [(u32, u32); 2] = [(0x09, 0x0D), (0x20, 0x20)];

const WORD_RANGES: [(u32, u32); 4] = [
    ('0' as u32, '9' as u32),
    ('A' as u32, 'Z' as u32),
    ('_' as u32, '_' as u32),
    ('a' as u32, 'z' as u32),
];

// line terminators excluded by `.`
const LINE_TERMINATOR_RANGES: [(u32, u32); 4] = [
    (0x0A, 0x0A),
    (0x0D, 0x0D),
    (0x85, 0x85),
    (0x2028, 0x2029),
];

impl CharSet {
    /// Create a set from arbitrary ranges, sorting and merging them.
    pub fn new(ranges: Vec<CharRange>, negated: bool) -> Self {
        CharSet {
            ranges: normalize(ranges),
            negated,
        }
    }

    pub fn from_preset(name: PresetCharSetName) -> Self {
        let (table, negated): (&[(u32, u32)], bool) = match name {
            PresetCharSetName::CharDigit => (&DIGIT_RANGES[..], false),
            PresetCharSetName::CharNotDigit => (&DIGIT_RANGES[..], true),
            PresetCharSetName::CharSpace => (&SPACE_RANGES[..], false),
            PresetCharSetName::CharNotSpace => (&SPACE_RANGES[..], true),
            PresetCharSetName::CharWord => (&WORD_RANGES[..], false),
            PresetCharSetName::CharNotWord => (&WORD_RANGES[..], true),
            PresetCharSetName::CharAny => (&LINE_TERMINATOR_RANGES[..], true),
        };

        let ranges = table
            .iter()
            .map(|(low, high)| CharRange::new(*low, *high))
            .collect();

        CharSet::new(ranges, negated)
    }

    pub fn ranges(&self) -> &[CharRange] {
        &self.ranges
    }

    /// The ranges this set matches, with the negation applied, i.e.
    /// the complement over `0..=0x10FFFF` for a negated set.
    ///
    /// Used when a class escape such as `\D` appears inside a
    /// bracketed set.
    pub fn effective_ranges(&self) -> Vec<CharRange> {
        if !self.negated {
            return self.ranges.clone();
        }

        let mut complement = vec![];
        let mut next_low: u32 = 0;
        for range in &self.ranges {
            if range.low > next_low {
                complement.push(CharRange::new(next_low, range.low - 1));
            }
            next_low = range.high.saturating_add(1);
        }

        if next_low <= MAX_CODEPOINT {
            complement.push(CharRange::new(next_low, MAX_CODEPOINT));
        }

        complement
    }

    fn contains_codepoint(&self, codepoint: u32) -> bool {
        self.ranges
            .binary_search_by(|range| {
                if range.high < codepoint {
                    std::cmp::Ordering::Less
                } else if range.low > codepoint {
                    std::cmp::Ordering::Greater
                } else {
                    std::cmp::Ordering::Equal
                }
            })
            .is_ok()
    }

    pub fn is_match(&self, c: char) -> bool {
        self.contains_codepoint(c as u32) != self.negated
    }

    /// Membership test where a character also matches through its
    /// simple lower or upper case mapping.
    pub fn is_match_ignore_case(&self, c: char) -> bool {
        let found = case_variants(c).any(|v| self.contains_codepoint(v as u32));
        found != self.negated
    }
}

/// The character itself followed by its single-character lower and
/// upper case mappings.
pub fn case_variants(c: char) -> impl Iterator<Item = char> {
    let lower = single_char(c.to_lowercase());
    let upper = single_char(c.to_uppercase());
    std::iter::once(c).chain(lower).chain(upper)
}

fn single_char(mut iter: impl Iterator<Item = char>) -> Option<char> {
    let first = iter.next()?;
    match iter.next() {
        Some(_) => None,
        None => Some(first),
    }
}

fn normalize(mut ranges: Vec<CharRange>) -> Vec<CharRange> {
    ranges.sort();

    let mut merged: Vec<CharRange> = Vec::with_capacity(ranges.len());
    for range in ranges {
        match merged.last_mut() {
            Some(last) if range.low <= last.high.saturating_add(1) => {
                last.high = last.high.max(range.high);
            }
            _ => merged.push(range),
        }
    }

    merged
}
