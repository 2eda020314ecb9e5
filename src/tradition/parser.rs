// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

pub const PARSER_PEEK_TOKEN_MAX_COUNT: usize = 1;

// each group level costs a few native stack frames while parsing
pub const PARSER_GROUP_NESTING_MAX_DEPTH: usize = 250;

use crate::{
    ast::{Ast, AstBuilder, Node, NodeId, Quantifier},
    charset::{CharRange, CharSet},
    error::{ErrorKind, RegExpError},
    location::Location,
    peekableiter::PeekableIter,
    rulechecker::check_repetition,
};

use super::{
    lexer::lex_from_chars,
    token::{Token, TokenWithRange},
};

pub struct Parser<'a> {
    upstream: &'a mut PeekableIter<'a, TokenWithRange>,
    pattern_chars: &'a [char],
    builder: AstBuilder,
    last_range: Location,
    group_depth: usize,
}

impl<'a> Parser<'a> {
    fn new(
        upstream: &'a mut PeekableIter<'a, TokenWithRange>,
        pattern_chars: &'a [char],
    ) -> Self {
        Self {
            upstream,
            pattern_chars,
            builder: AstBuilder::new(),
            last_range: Location::new_range(0, 0),
            group_depth: 0,
        }
    }

    fn next_token(&mut self) -> Option<Token> {
        match self.upstream.next() {
            Some(TokenWithRange { token, range }) => {
                self.last_range = range;
                Some(token)
            }
            None => None,
        }
    }

    fn peek_token(&mut self, offset: usize) -> Option<&Token> {
        match self.upstream.peek(offset) {
            Some(TokenWithRange { token, .. }) => Some(token),
            None => None,
        }
    }

    // the range of the next token, or the end of the pattern
    fn peek_range(&mut self) -> Location {
        match self.upstream.peek(0) {
            Some(TokenWithRange { range, .. }) => *range,
            None => Location::new_position(self.pattern_chars.len()),
        }
    }

    fn make_error(&self, kind: ErrorKind, location: Location) -> RegExpError {
        RegExpError::new(kind, location, self.pattern_chars)
    }
}

impl Parser<'_> {
    pub fn parse_program(mut self) -> Result<Ast, RegExpError> {
        if self.peek_token(0).is_none() {
            return Err(self.make_error(ErrorKind::EmptyPattern, Location::new_position(0)));
        }

        let root = self.parse_alternation()?;

        // the alternation only stops early at a `)` without a matching `(`
        if self.peek_token(0).is_some() {
            let range = self.peek_range();
            return Err(self.make_error(ErrorKind::UnbalancedParenthesis, range));
        }

        Ok(self.builder.build(root))
    }

    fn parse_alternation(&mut self) -> Result<NodeId, RegExpError> {
        // sequence ... [ "|" sequence ]
        // --------
        // ^
        // | current, None or Some(...)

        let mut branches = vec![self.parse_sequence()?];

        while let Some(Token::LogicOr) = self.peek_token(0) {
            self.next_token(); // consume "|"
            branches.push(self.parse_sequence()?);
        }

        if branches.len() == 1 {
            Ok(branches[0])
        } else {
            Ok(self.builder.push(Node::Alternation(branches)))
        }
    }

    fn parse_sequence(&mut self) -> Result<NodeId, RegExpError> {
        // quantified ...
        // ----------
        // ^
        // | current, None or Some(...)

        let mut items = vec![];
        while let Some(token) = self.peek_token(0) {
            match token {
                // terminator
                Token::GroupEnd | Token::LogicOr => {
                    break;
                }
                _ => {
                    let item = self.parse_quantified()?;
                    items.push(item);
                }
            }
        }

        if items.is_empty() {
            let range = self.peek_range();
            let depth = self.group_depth;
            let kind = match self.peek_token(0) {
                Some(Token::GroupEnd) if depth == 0 => ErrorKind::UnbalancedParenthesis,
                None if depth > 0 => ErrorKind::UnbalancedParenthesis,
                _ => ErrorKind::EmptyAlternative,
            };
            return Err(self.make_error(kind, range));
        }

        if items.len() == 1 {
            Ok(items[0])
        } else {
            Ok(self.builder.push(Node::Sequence(items)))
        }
    }

    fn parse_quantified(&mut self) -> Result<NodeId, RegExpError> {
        // atom quantifier?
        // ----
        // ^
        // | current, Some(...)

        let mut node_id = self.parse_atom()?;

        if let Some(Token::Repetition(repetition, mode)) = self.peek_token(0) {
            let (repetition, mode) = (*repetition, *mode);
            self.next_token(); // consume quantifier

            if let Err(kind) = check_repetition(repetition.min, repetition.max) {
                return Err(self.make_error(kind, self.last_range));
            }

            node_id = self.builder.push(Node::Quantified(Quantifier {
                inner: node_id,
                min: repetition.min,
                max: repetition.max,
                mode,
            }));

            // e.g. `a**`, `a{2}{3}`
            if let Some(Token::Repetition(..)) = self.peek_token(0) {
                let range = self.peek_range();
                return Err(self.make_error(ErrorKind::DanglingQuantifier, range));
            }
        }

        Ok(node_id)
    }

    fn parse_atom(&mut self) -> Result<NodeId, RegExpError> {
        // token ...
        // -----
        // ^
        // | current, Some(...)

        let range = self.peek_range();

        let node = match self.next_token() {
            Some(Token::Char(c)) => Node::Literal(c),
            Some(Token::PresetCharSet(name)) => Node::CharSet(CharSet::from_preset(name)),
            Some(head_token @ (Token::CharSetStart | Token::CharSetStartNegative)) => {
                let negated = head_token == Token::CharSetStartNegative;
                Node::CharSet(self.parse_charset(negated)?)
            }
            Some(Token::GroupStart) => {
                if self.group_depth >= PARSER_GROUP_NESTING_MAX_DEPTH {
                    return Err(self.make_error(ErrorKind::NestingTooDeep, range));
                }

                self.group_depth += 1;
                let inner = self.parse_alternation()?;
                self.group_depth -= 1;

                // consume ")"
                match self.next_token() {
                    Some(Token::GroupEnd) => Node::Group(inner),
                    _ => {
                        return Err(self.make_error(ErrorKind::UnbalancedParenthesis, range));
                    }
                }
            }
            Some(Token::Repetition(..)) => {
                // e.g. `*a`, `a|+`
                return Err(self.make_error(ErrorKind::DanglingQuantifier, range));
            }
            _ => {
                return Err(self.make_error(ErrorKind::UnexpectedCharacter, range));
            }
        };

        Ok(self.builder.push(node))
    }

    fn parse_charset(&mut self, negated: bool) -> Result<CharSet, RegExpError> {
        // "[" {char | char_range | preset_charset} "]" ?
        // ---                                          -
        // ^                                            ^__ to here
        // | validated and consumed

        let mut ranges = vec![];

        loop {
            match self.next_token() {
                Some(Token::CharSetEnd) => break,
                Some(Token::Char(c)) => ranges.push(CharRange::from_char(c)),
                Some(Token::CharRange(from, to)) => {
                    ranges.push(CharRange::new(from as u32, to as u32))
                }
                Some(Token::PresetCharSet(name)) => {
                    // e.g. `[\D_]` contributes the complement of the digits
                    ranges.extend(CharSet::from_preset(name).effective_ranges());
                }
                _ => {
                    return Err(self.make_error(ErrorKind::MalformedCharacterSet, self.last_range));
                }
            }
        }

        Ok(CharSet::new(ranges, negated))
    }
}

pub fn parse_from_chars(pattern_chars: &[char]) -> Result<Ast, RegExpError> {
    let tokens = lex_from_chars(pattern_chars)?;
    let mut token_iter = tokens.into_iter();
    let mut peekable_token_iter = PeekableIter::new(&mut token_iter, PARSER_PEEK_TOKEN_MAX_COUNT);
    let parser = Parser::new(&mut peekable_token_iter, pattern_chars);
    parser.parse_program()
}

#[cfg(test)]
pub fn parse_from_str(s: &str) -> Result<Ast, RegExpError> {
    let pattern_chars: Vec<char> = s.chars().collect();
    parse_from_chars(&pattern_chars)
}
