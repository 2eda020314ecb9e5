// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

mod charwithposition;
mod context;
mod peekableiter;
mod printer;
mod process;
mod rulechecker;
mod tradition;

pub mod ast;
pub mod buffer;
pub mod charset;
pub mod compiler;
pub mod error;
pub mod location;
pub mod matcher;
pub mod regex;

pub use buffer::InputBuffer;
pub use compiler::compile;
pub use error::{BufferError, ErrorKind, RegExpError};
pub use location::Location;
pub use matcher::Matcher;
pub use regex::{Match, Matches, Regex, RegexOptions};
