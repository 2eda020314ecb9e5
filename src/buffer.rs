// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use std::{
    cell::{Ref, RefCell},
    fmt::Display,
    rc::Rc,
};

use crate::error::BufferError;

/// An append-only character buffer shared between the component that
/// feeds the input (e.g. a tokenizer) and the matchers reading it.
///
/// Cloning an `InputBuffer` yields another handle to the same
/// characters, so text appended through one handle is visible through
/// all of them. The handle is neither `Send` nor `Sync`, appending while
/// a match attempt runs on another thread is therefore impossible.
#[derive(Debug, Clone, Default)]
pub struct InputBuffer {
    data: Rc<RefCell<BufferData>>,
}

#[derive(Debug, Default)]
struct BufferData {
    chars: Vec<char>,
    closed: bool,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append text to the end of the buffer.
    pub fn append(&self, text: &str) -> Result<(), BufferError> {
        let mut data = self.data.borrow_mut();
        if data.closed {
            return Err(BufferError::Closed);
        }

        data.chars.extend(text.chars());
        Ok(())
    }

    /// Mark the end of the input, no more text can be appended.
    pub fn close(&self) {
        self.data.borrow_mut().closed = true;
    }

    pub fn is_closed(&self) -> bool {
        self.data.borrow().closed
    }

    /// The character at the specified position, or `None` if the
    /// position is not below the current length.
    pub fn char_at(&self, index: usize) -> Option<char> {
        self.data.borrow().chars.get(index).copied()
    }

    /// The number of characters appended so far.
    pub fn len(&self) -> usize {
        self.data.borrow().chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The text in `[start, end)`, both offsets are clamped to the
    /// current length.
    pub fn slice(&self, start: usize, end: usize) -> String {
        let data = self.data.borrow();
        let end = end.min(data.chars.len());
        let start = start.min(end);
        data.chars[start..end].iter().collect()
    }

    // read access for a match attempt, no append can happen while the
    // attempt holds it since matching never yields
    pub(crate) fn chars(&self) -> Ref<'_, [char]> {
        Ref::map(self.data.borrow(), |data| data.chars.as_slice())
    }

    /// Whether two handles point to the same buffer.
    pub fn ptr_eq(&self, other: &InputBuffer) -> bool {
        Rc::ptr_eq(&self.data, &other.data)
    }
}

impl From<&str> for InputBuffer {
    fn from(text: &str) -> Self {
        let buffer = InputBuffer::new();
        buffer.data.borrow_mut().chars.extend(text.chars());
        buffer
    }
}

impl Display for InputBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let data = self.data.borrow();
        for c in data.chars.iter() {
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}
