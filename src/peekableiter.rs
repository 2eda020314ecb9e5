// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use std::collections::VecDeque;

/// An iterator adapter that can look ahead up to `max_peek_count`
/// items without consuming them.
pub struct PeekableIter<'a, T> {
    upstream: &'a mut dyn Iterator<Item = T>,
    buffer: VecDeque<T>,
    max_peek_count: usize,
}

impl<'a, T> PeekableIter<'a, T> {
    pub fn new(upstream: &'a mut dyn Iterator<Item = T>, max_peek_count: usize) -> Self {
        Self {
            upstream,
            buffer: VecDeque::with_capacity(max_peek_count),
            max_peek_count,
        }
    }

    /// Look at the item `offset` positions ahead, `0` being the next one.
    pub fn peek(&mut self, offset: usize) -> Option<&T> {
        assert!(
            offset < self.max_peek_count,
            "peek offset {} exceeds the look ahead limit {}",
            offset,
            self.max_peek_count
        );

        while self.buffer.len() <= offset {
            match self.upstream.next() {
                Some(item) => self.buffer.push_back(item),
                None => return None,
            }
        }

        self.buffer.get(offset)
    }
}

impl<T> Iterator for PeekableIter<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        match self.buffer.pop_front() {
            Some(item) => Some(item),
            None => self.upstream.next(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::PeekableIter;

    #[test]
    fn test_peekable_iter() {
        let mut chars = "0123".chars();
        let mut iter = PeekableIter::new(&mut chars, 3);

        assert_eq!(iter.peek(0), Some(&'0'));
        assert_eq!(iter.peek(2), Some(&'2'));
        assert_eq!(iter.next(), Some('0'));
        assert_eq!(iter.peek(0), Some(&'1'));
        assert_eq!(iter.peek(2), Some(&'3'));
        assert_eq!(iter.next(), Some('1'));
        assert_eq!(iter.next(), Some('2'));
        assert_eq!(iter.peek(1), None);
        assert_eq!(iter.peek(0), Some(&'3'));
        assert_eq!(iter.next(), Some('3'));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.peek(0), None);
    }
}
