// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use log::debug;

use crate::{ast::Ast, error::RegExpError, tradition::parser::parse_from_chars};

/// Compile a pattern into an immutable AST.
///
/// Lexing, parsing and the rule checks all run here, the first
/// problem found is returned with the offending fragment.
pub fn compile(pattern: &str) -> Result<Ast, RegExpError> {
    let pattern_chars: Vec<char> = pattern.chars().collect();

    match parse_from_chars(&pattern_chars) {
        Ok(ast) => {
            debug!(
                "compiled pattern {:?} into {} nodes: {}",
                pattern,
                ast.len(),
                ast
            );
            Ok(ast)
        }
        Err(e) => {
            debug!("failed to compile pattern {:?}: {}", pattern, e);
            Err(e)
        }
    }
}
