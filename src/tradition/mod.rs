// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

// Traditional regular expression syntax: `a+[0-9]{2,}?(b|c)`.

pub mod lexer;
pub mod parser;
pub mod token;
