// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

// Syntax Summary:
//
// Meta characters and their meanings:
//
// - [ ]      Character set
// - [^ ]     Negated character set
// - {m}      Exact repetition (m times)
// - {m,n}    Repetition range (m to n times)
// - {m,}     At least m repetitions
// - (xyz)    Grouping, never captures
// - *        Zero or more repetitions
// - +        One or more repetitions
// - ?        Optional
// - |        Logical OR
// - .        Any character except line terminators (\n, \r, \u0085, \u2028 and \u2029)
// - \        Escape character for special symbols
//
// Every quantifier can be followed by `?` (reluctant) or `+` (possessive),
// e.g. `a*?`, `a{2,3}+`.
//
// The anchors `^` and `$` are rejected, matching always starts at an
// explicit offset. A stray `]` or `}` is rejected as well.
//
// In character sets, `-` is literal when it is the first or last character,
// e.g. `[-a]`, `[a-]`, and the meta characters `( ) . * + ? { } | $` are
// literal.
//
// Escaped characters:
//
// - \t       Horizontal tab
// - \n       Newline
// - \r       Carriage return
// - \f       Form feed
// - \a       Bell (\u0007)
// - \e       Escape (\u001B)
// - \0ooo    Octal, the first digit is 0-3 followed by up to two more octal digits
// - \xhh     Exactly two hexadecimal digits
// - \uhhhh   Exactly four hexadecimal digits
// - \.       Any non-alphanumeric character is taken literally, e.g. `\*`, `\@`
//
// Preset character sets:
//
// - \w       Alphanumeric characters: [a-zA-Z0-9_]
// - \W       Negated \w: [^\w]
// - \d       Digits: [0-9]
// - \D       Negated \d: [^\d]
// - \s       Whitespace characters: [ \t\n\x0B\f\r]
// - \S       Negated \s: [^\s]
//
// Any other letter or digit after `\` is an invalid escape.

use crate::{
    ast::{QuantifierMode, RepeatMax},
    charset::PresetCharSetName,
    charwithposition::{CharWithPosition, CharsWithPositionIter},
    error::{ErrorKind, RegExpError},
    location::Location,
    peekableiter::PeekableIter,
};

use super::token::{Repetition, Token, TokenWithRange};

pub const LEXER_PEEK_CHAR_MAX_COUNT: usize = 3;

#[cfg(test)]
pub fn lex_from_str(s: &str) -> Result<Vec<TokenWithRange>, RegExpError> {
    let pattern_chars: Vec<char> = s.chars().collect();
    lex_from_chars(&pattern_chars)
}

pub fn lex_from_chars(pattern_chars: &[char]) -> Result<Vec<TokenWithRange>, RegExpError> {
    let mut chars = pattern_chars.iter().copied();
    let mut char_position_iter = CharsWithPositionIter::new(&mut chars);
    let mut peekable_char_position_iter =
        PeekableIter::new(&mut char_position_iter, LEXER_PEEK_CHAR_MAX_COUNT);
    let mut lexer = Lexer::new(&mut peekable_char_position_iter, pattern_chars);
    lexer.lex()
}

struct Lexer<'a> {
    upstream: &'a mut PeekableIter<'a, CharWithPosition>,
    pattern_chars: &'a [char],
    last_position: Location, // last position consumed
    saved_positions: Vec<Location>,
}

impl<'a> Lexer<'a> {
    fn new(
        upstream: &'a mut PeekableIter<'a, CharWithPosition>,
        pattern_chars: &'a [char],
    ) -> Self {
        Self {
            upstream,
            pattern_chars,
            last_position: Location::new_position(0),
            saved_positions: vec![],
        }
    }

    fn next_char(&mut self) -> Option<char> {
        match self.upstream.next() {
            Some(CharWithPosition {
                character,
                position,
            }) => {
                self.last_position = position;
                Some(character)
            }
            None => None,
        }
    }

    fn peek_char(&mut self, offset: usize) -> Option<char> {
        self.upstream.peek(offset).map(|item| item.character)
    }

    fn peek_char_and_equals(&mut self, offset: usize, expected_char: char) -> bool {
        self.peek_char(offset) == Some(expected_char)
    }

    fn push_peek_position(&mut self) {
        let position = match self.upstream.peek(0) {
            Some(CharWithPosition { position, .. }) => *position,
            None => Location::new_position(self.pattern_chars.len()),
        };
        self.saved_positions.push(position);
    }

    fn pop_saved_position(&mut self) -> Location {
        self.saved_positions.pop().unwrap_or(self.last_position)
    }

    // the range from the last saved position to the last consumed char
    fn pop_saved_range(&mut self) -> Location {
        Location::from_position_pair_with_end_included(
            &self.pop_saved_position(),
            &self.last_position,
        )
    }

    fn make_error(&self, kind: ErrorKind, location: Location) -> RegExpError {
        RegExpError::new(kind, location, self.pattern_chars)
    }

    fn invalid_escape(&mut self) -> RegExpError {
        let range = self.pop_saved_range();
        self.make_error(ErrorKind::InvalidEscape, range)
    }

    fn malformed_quantifier(&mut self) -> RegExpError {
        self.next_char(); // consume the offending char
        let range = self.pop_saved_range();
        self.make_error(ErrorKind::MalformedQuantifier, range)
    }
}

impl Lexer<'_> {
    fn lex(&mut self) -> Result<Vec<TokenWithRange>, RegExpError> {
        let mut token_with_ranges = vec![];

        while let Some(current_char) = self.peek_char(0) {
            match current_char {
                '[' => {
                    // charset start
                    let mut twrs = self.lex_charset()?;
                    token_with_ranges.append(&mut twrs);
                }
                ']' | '}' => {
                    self.next_char(); // consume ']' or '}'
                    return Err(self.make_error(
                        ErrorKind::UnexpectedCharacter,
                        Location::from_position_and_length(&self.last_position, 1),
                    ));
                }
                '{' => {
                    // repetition
                    let twr = self.lex_repetition()?;
                    token_with_ranges.push(twr);
                }
                '(' => {
                    self.next_char(); // consume '('
                    token_with_ranges.push(TokenWithRange::from_position_and_length(
                        Token::GroupStart,
                        &self.last_position,
                        1,
                    ));
                }
                ')' => {
                    self.next_char(); // consume ')'
                    token_with_ranges.push(TokenWithRange::from_position_and_length(
                        Token::GroupEnd,
                        &self.last_position,
                        1,
                    ));
                }
                '?' | '*' | '+' => {
                    let twr = self.lex_notation()?;
                    token_with_ranges.push(twr);
                }
                '^' | '$' => {
                    self.next_char(); // consume '^' or '$'
                    return Err(self.make_error(
                        ErrorKind::UnsupportedAnchor,
                        Location::from_position_and_length(&self.last_position, 1),
                    ));
                }
                '.' => {
                    self.next_char(); // consume '.'
                    token_with_ranges.push(TokenWithRange::from_position_and_length(
                        Token::PresetCharSet(PresetCharSetName::CharAny),
                        &self.last_position,
                        1,
                    ));
                }
                '|' => {
                    self.next_char(); // consume '|'
                    token_with_ranges.push(TokenWithRange::from_position_and_length(
                        Token::LogicOr,
                        &self.last_position,
                        1,
                    ));
                }
                '\\' => {
                    let twr = self.lex_escaping()?;
                    token_with_ranges.push(twr);
                }
                _ => {
                    self.next_char(); // consume current char
                    token_with_ranges.push(TokenWithRange::from_position_and_length(
                        Token::Char(current_char),
                        &self.last_position,
                        1,
                    ));
                }
            }
        }

        Ok(token_with_ranges)
    }

    fn lex_quantifier_mode(&mut self) -> QuantifierMode {
        match self.peek_char(0) {
            Some('?') => {
                self.next_char(); // consume '?'
                QuantifierMode::Reluctant
            }
            Some('+') => {
                self.next_char(); // consume '+'
                QuantifierMode::Possessive
            }
            _ => QuantifierMode::Greedy,
        }
    }

    fn lex_notation(&mut self) -> Result<TokenWithRange, RegExpError> {
        // ?+  //
        // ^^__// to here
        // |___// current char, validated

        self.push_peek_position();

        let repetition = match self.next_char() {
            Some('?') => Repetition::optional(),
            Some('*') => Repetition::zero_or_more(),
            _ => Repetition::one_or_more(),
        };

        let mode = self.lex_quantifier_mode();
        let range = self.pop_saved_range();

        Ok(TokenWithRange::new(Token::Repetition(repetition, mode), range))
    }

    fn lex_repetition(&mut self) -> Result<TokenWithRange, RegExpError> {
        // {...}?  //
        // ^    ^__// to here
        // |_______// from here, validated

        self.push_peek_position();

        self.next_char(); // consume '{'

        let Some(min) = self.lex_number() else {
            return Err(self.malformed_quantifier());
        };

        let max = if self.peek_char_and_equals(0, ',') {
            self.next_char(); // consume ','
            if self.peek_char_and_equals(0, '}') {
                RepeatMax::Unbounded
            } else {
                let Some(n) = self.lex_number() else {
                    return Err(self.malformed_quantifier());
                };
                RepeatMax::Finite(n)
            }
        } else {
            RepeatMax::Finite(min)
        };

        if !self.peek_char_and_equals(0, '}') {
            return Err(self.malformed_quantifier());
        }

        self.next_char(); // consume '}'

        let mode = self.lex_quantifier_mode();
        let range = self.pop_saved_range();

        Ok(TokenWithRange::new(
            Token::Repetition(Repetition::new(min, max), mode),
            range,
        ))
    }

    // `None` when there is no digit or the number does not fit in `u32`
    fn lex_number(&mut self) -> Option<u32> {
        let mut num_string = String::new();

        while let Some(current_char) = self.peek_char(0) {
            if current_char.is_ascii_digit() {
                num_string.push(current_char);
                self.next_char(); // consume digit
            } else {
                break;
            }
        }

        num_string.parse::<u32>().ok()
    }

    fn lex_charset(&mut self) -> Result<Vec<TokenWithRange>, RegExpError> {
        // [.....]?  //
        // ^      ^__// to here
        // |_________// current char, validated
        //
        // also `[^.....]`

        let mut token_with_ranges = vec![];

        self.push_peek_position();
        self.next_char(); // consume '['

        let charset_start_position = self.pop_saved_position();

        let charset_start = if self.peek_char_and_equals(0, '^') {
            self.next_char(); // consume '^'
            TokenWithRange::from_position_and_length(
                Token::CharSetStartNegative,
                &charset_start_position,
                2,
            )
        } else {
            TokenWithRange::from_position_and_length(
                Token::CharSetStart,
                &charset_start_position,
                1,
            )
        };

        token_with_ranges.push(charset_start);

        let mut element_count = 0;

        loop {
            match self.peek_char(0) {
                Some(']') => {
                    break;
                }
                Some(_) => {
                    let first = self.lex_charset_element()?;

                    // `a-z`, but `-` followed by `]` is a literal hyphen
                    let is_range = self.peek_char_and_equals(0, '-')
                        && matches!(self.peek_char(1), Some(c) if c != ']');

                    if is_range {
                        self.next_char(); // consume '-'
                        let second = self.lex_charset_element()?;
                        let range = Location::from_range_pair(&first.range, &second.range);

                        match (first.token, second.token) {
                            (Token::Char(from), Token::Char(to)) if from <= to => {
                                token_with_ranges
                                    .push(TokenWithRange::new(Token::CharRange(from, to), range));
                            }
                            _ => {
                                return Err(
                                    self.make_error(ErrorKind::MalformedCharacterSet, range)
                                );
                            }
                        }
                    } else {
                        token_with_ranges.push(first);
                    }

                    element_count += 1;
                }
                None => {
                    // unterminated, e.g. `[ab`
                    let length = self.pattern_chars.len() - charset_start_position.index;
                    return Err(self.make_error(
                        ErrorKind::MalformedCharacterSet,
                        Location::from_position_and_length(&charset_start_position, length),
                    ));
                }
            }
        }

        self.next_char(); // consume ']'

        if element_count == 0 {
            // `[]` and `[^]`
            return Err(self.make_error(
                ErrorKind::MalformedCharacterSet,
                Location::from_position_pair_with_end_included(
                    &charset_start_position,
                    &self.last_position,
                ),
            ));
        }

        token_with_ranges.push(TokenWithRange::from_position_and_length(
            Token::CharSetEnd,
            &self.last_position,
            1,
        ));

        Ok(token_with_ranges)
    }

    fn lex_charset_element(&mut self) -> Result<TokenWithRange, RegExpError> {
        if self.peek_char_and_equals(0, '\\') {
            return self.lex_escaping();
        }

        match self.next_char() {
            Some(c) => Ok(TokenWithRange::from_position_and_length(
                Token::Char(c),
                &self.last_position,
                1,
            )),
            None => Err(self.make_error(
                ErrorKind::MalformedCharacterSet,
                Location::new_position(self.pattern_chars.len()),
            )),
        }
    }

    fn lex_escaping(&mut self) -> Result<TokenWithRange, RegExpError> {
        // \xxxx?  //
        // ^    ^__// to here
        // |_______// current char, validated

        self.push_peek_position();

        self.next_char(); // consume '\'

        let Some(escaped_char) = self.next_char() else {
            // `\` | EOF
            return Err(self.invalid_escape());
        };

        let token = if let Some(name) = PresetCharSetName::from_escape_char(escaped_char) {
            Token::PresetCharSet(name)
        } else {
            match escaped_char {
                't' => Token::Char('\t'),     // horizontal tabulation
                'n' => Token::Char('\n'),     // line feed
                'r' => Token::Char('\r'),     // carriage return
                'f' => Token::Char('\u{0c}'), // form feed
                'a' => Token::Char('\u{07}'), // bell
                'e' => Token::Char('\u{1b}'), // escape
                '0' => Token::Char(self.unescape_octal()?),
                'x' => Token::Char(self.unescape_hex(2)?),
                'u' => Token::Char(self.unescape_hex(4)?),
                _ if escaped_char.is_ascii_alphanumeric() => {
                    return Err(self.invalid_escape());
                }
                _ => Token::Char(escaped_char),
            }
        };

        let range = self.pop_saved_range();
        Ok(TokenWithRange::new(token, range))
    }

    fn unescape_octal(&mut self) -> Result<char, RegExpError> {
        // \0ooo?  //
        //   ^  ^__// to here
        //   |_____// current char
        //
        // the first digit is 0-3, so the value never exceeds 0o377.

        let mut value = match self.peek_char(0) {
            Some(c @ '0'..='3') => {
                self.next_char(); // consume digit
                c as u32 - '0' as u32
            }
            _ => {
                self.next_char(); // consume the offending char, if any
                return Err(self.invalid_escape());
            }
        };

        for _ in 0..2 {
            match self.peek_char(0) {
                Some(c @ '0'..='7') => {
                    self.next_char(); // consume digit
                    value = value * 8 + (c as u32 - '0' as u32);
                }
                _ => break,
            }
        }

        Ok(char::from(value as u8))
    }

    fn unescape_hex(&mut self, digit_count: usize) -> Result<char, RegExpError> {
        // \x41?  or  A?  //
        //   ^ ^__________^____// to here
        //   |_________________// current char

        let mut value: u32 = 0;

        for _ in 0..digit_count {
            match self.peek_char(0).and_then(|c| c.to_digit(16)) {
                Some(digit) => {
                    self.next_char(); // consume digit
                    value = value * 16 + digit;
                }
                None => {
                    self.next_char(); // consume the offending char, if any
                    return Err(self.invalid_escape());
                }
            }
        }

        match char::from_u32(value) {
            Some(c) => Ok(c),
            None => {
                // surrogate code points
                Err(self.invalid_escape())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::{
        ast::{QuantifierMode, RepeatMax},
        charset::PresetCharSetName,
        error::{ErrorKind, RegExpError},
        location::Location,
        tradition::token::{Repetition, Token, TokenWithRange},
    };

    use super::lex_from_str;

    fn lex_from_str_without_location(s: &str) -> Result<Vec<Token>, RegExpError> {
        let tokens = lex_from_str(s)?
            .into_iter()
            .map(|e| e.token)
            .collect::<Vec<Token>>();
        Ok(tokens)
    }

    fn lex_error_kind(s: &str) -> ErrorKind {
        lex_from_str(s).unwrap_err().kind
    }

    #[test]
    fn test_lex_char() {
        assert_eq!(lex_from_str_without_location("").unwrap(), vec![]);

        assert_eq!(
            lex_from_str_without_location("a文😊").unwrap(),
            vec![Token::Char('a'), Token::Char('文'), Token::Char('😊')]
        );

        // control escapes
        assert_eq!(
            lex_from_str_without_location(r#"\t\n\r\f\a\e"#).unwrap(),
            vec![
                Token::Char('\t'),
                Token::Char('\n'),
                Token::Char('\r'),
                Token::Char('\u{0c}'),
                Token::Char('\u{07}'),
                Token::Char('\u{1b}'),
            ]
        );

        // symbol escapes
        assert_eq!(
            lex_from_str_without_location(r#"\\\"\'\.\*\+\?\(\)\{\}\[\]\@\<\>\$\%\&"#).unwrap(),
            r#"\"'.*+?(){}[]@<>$%&"#
                .chars()
                .map(Token::Char)
                .collect::<Vec<Token>>()
        );
    }

    #[test]
    fn test_lex_location() {
        assert_eq!(
            lex_from_str(r#"a\x41+?"#).unwrap(),
            vec![
                TokenWithRange::new(Token::Char('a'), Location::new_range(0, 1)),
                TokenWithRange::new(Token::Char('A'), Location::new_range(1, 4)),
                TokenWithRange::new(
                    Token::Repetition(Repetition::one_or_more(), QuantifierMode::Reluctant),
                    Location::new_range(5, 2)
                ),
            ]
        );
    }

    #[test]
    fn test_lex_octal_escape() {
        assert_eq!(
            lex_from_str_without_location(r#"\01"#).unwrap(),
            vec![Token::Char('\u{01}')]
        );

        assert_eq!(
            lex_from_str_without_location(r#"\012"#).unwrap(),
            vec![Token::Char('\n')]
        );

        assert_eq!(
            lex_from_str_without_location(r#"\0101"#).unwrap(),
            vec![Token::Char('A')]
        );

        // longest octal run, then literals
        assert_eq!(
            lex_from_str_without_location(r#"\01174"#).unwrap(),
            vec![Token::Char('O'), Token::Char('4')]
        );

        assert_eq!(
            lex_from_str_without_location(r#"\018"#).unwrap(),
            vec![Token::Char('\u{01}'), Token::Char('8')]
        );

        assert_eq!(
            lex_from_str_without_location(r#"\0377"#).unwrap(),
            vec![Token::Char('\u{ff}')]
        );

        assert_eq!(lex_error_kind(r#"\0"#), ErrorKind::InvalidEscape);
        assert_eq!(lex_error_kind(r#"\08"#), ErrorKind::InvalidEscape);
        assert_eq!(lex_error_kind(r#"\043"#), ErrorKind::InvalidEscape);

        let err = lex_from_str(r#"ab\0432"#).unwrap_err();
        assert_eq!(err.location, Location::new_range(2, 3));
        assert_eq!(err.fragment, r#"\04"#);
    }

    #[test]
    fn test_lex_hex_and_unicode_escape() {
        assert_eq!(
            lex_from_str_without_location(r#"\x4f\xABC"#).unwrap(),
            vec![Token::Char('O'), Token::Char('\u{ab}'), Token::Char('C')]
        );

        assert_eq!(
            lex_from_str_without_location(r#"\u004f\u6587"#).unwrap(),
            vec![Token::Char('O'), Token::Char('文')]
        );

        for pattern in [r#"\x"#, r#"\x1"#, r#"\x1g"#, r#"\u"#, r#"\u11"#, r#"\u111g"#] {
            assert_eq!(lex_error_kind(pattern), ErrorKind::InvalidEscape);
        }

        // surrogate code point
        assert_eq!(lex_error_kind(r#"\ud800"#), ErrorKind::InvalidEscape);
    }

    #[test]
    fn test_lex_invalid_escape() {
        for c in "ABCEFGHIJKLMNOPQRTUVXYZbcghijklmopqvyz123456789".chars() {
            let pattern = format!("\\{}", c);
            let err = lex_from_str(&pattern).unwrap_err();
            assert_eq!(err.kind, ErrorKind::InvalidEscape);
            assert_eq!(err.fragment, pattern);
        }

        // trailing backslash
        assert_eq!(lex_error_kind("a\\"), ErrorKind::InvalidEscape);
    }

    #[test]
    fn test_lex_preset_charset() {
        assert_eq!(
            lex_from_str_without_location(r#"\d\D\s\S\w\W."#).unwrap(),
            vec![
                Token::PresetCharSet(PresetCharSetName::CharDigit),
                Token::PresetCharSet(PresetCharSetName::CharNotDigit),
                Token::PresetCharSet(PresetCharSetName::CharSpace),
                Token::PresetCharSet(PresetCharSetName::CharNotSpace),
                Token::PresetCharSet(PresetCharSetName::CharWord),
                Token::PresetCharSet(PresetCharSetName::CharNotWord),
                Token::PresetCharSet(PresetCharSetName::CharAny),
            ]
        );
    }

    #[test]
    fn test_lex_charset() {
        assert_eq!(
            lex_from_str_without_location("[a-z_\\d]").unwrap(),
            vec![
                Token::CharSetStart,
                Token::CharRange('a', 'z'),
                Token::Char('_'),
                Token::PresetCharSet(PresetCharSetName::CharDigit),
                Token::CharSetEnd,
            ]
        );

        assert_eq!(
            lex_from_str_without_location("[^ab]").unwrap(),
            vec![
                Token::CharSetStartNegative,
                Token::Char('a'),
                Token::Char('b'),
                Token::CharSetEnd,
            ]
        );

        // literal hyphens
        assert_eq!(
            lex_from_str_without_location("[a-][-a]").unwrap(),
            vec![
                Token::CharSetStart,
                Token::Char('a'),
                Token::Char('-'),
                Token::CharSetEnd,
                Token::CharSetStart,
                Token::Char('-'),
                Token::Char('a'),
                Token::CharSetEnd,
            ]
        );

        // meta chars are literal inside a charset
        assert_eq!(
            lex_from_str_without_location("[.)($^]").unwrap(),
            vec![
                Token::CharSetStart,
                Token::Char('.'),
                Token::Char(')'),
                Token::Char('('),
                Token::Char('$'),
                Token::Char('^'),
                Token::CharSetEnd,
            ]
        );

        // escaped range endpoints
        assert_eq!(
            lex_from_str_without_location(r#"[\x41-\x5A]"#).unwrap(),
            vec![
                Token::CharSetStart,
                Token::CharRange('A', 'Z'),
                Token::CharSetEnd,
            ]
        );

        assert_eq!(lex_error_kind("[ab"), ErrorKind::MalformedCharacterSet);
        assert_eq!(lex_error_kind("[]"), ErrorKind::MalformedCharacterSet);
        assert_eq!(lex_error_kind("[^]"), ErrorKind::MalformedCharacterSet);
        assert_eq!(lex_error_kind("[z-a]"), ErrorKind::MalformedCharacterSet);
        assert_eq!(lex_error_kind(r#"[a-\d]"#), ErrorKind::MalformedCharacterSet);
        assert_eq!(lex_error_kind("[a-"), ErrorKind::MalformedCharacterSet);
    }

    #[test]
    fn test_lex_repetition() {
        assert_eq!(
            lex_from_str_without_location("a?b*c+").unwrap(),
            vec![
                Token::Char('a'),
                Token::Repetition(Repetition::optional(), QuantifierMode::Greedy),
                Token::Char('b'),
                Token::Repetition(Repetition::zero_or_more(), QuantifierMode::Greedy),
                Token::Char('c'),
                Token::Repetition(Repetition::one_or_more(), QuantifierMode::Greedy),
            ]
        );

        assert_eq!(
            lex_from_str_without_location("a??a*+").unwrap(),
            vec![
                Token::Char('a'),
                Token::Repetition(Repetition::optional(), QuantifierMode::Reluctant),
                Token::Char('a'),
                Token::Repetition(Repetition::zero_or_more(), QuantifierMode::Possessive),
            ]
        );

        assert_eq!(
            lex_from_str_without_location("a{3}a{3,}?a{2,5}+").unwrap(),
            vec![
                Token::Char('a'),
                Token::Repetition(
                    Repetition::new(3, RepeatMax::Finite(3)),
                    QuantifierMode::Greedy
                ),
                Token::Char('a'),
                Token::Repetition(
                    Repetition::new(3, RepeatMax::Unbounded),
                    QuantifierMode::Reluctant
                ),
                Token::Char('a'),
                Token::Repetition(
                    Repetition::new(2, RepeatMax::Finite(5)),
                    QuantifierMode::Possessive
                ),
            ]
        );

        assert_eq!(lex_error_kind("a{"), ErrorKind::MalformedQuantifier);
        assert_eq!(lex_error_kind("a{x}"), ErrorKind::MalformedQuantifier);
        assert_eq!(lex_error_kind("a{1,x}"), ErrorKind::MalformedQuantifier);
        assert_eq!(lex_error_kind("a{1"), ErrorKind::MalformedQuantifier);
        assert_eq!(lex_error_kind("a{99999999999}"), ErrorKind::MalformedQuantifier);
    }

    #[test]
    fn test_lex_unsupported_chars() {
        assert_eq!(lex_error_kind("^"), ErrorKind::UnsupportedAnchor);
        assert_eq!(lex_error_kind("a$"), ErrorKind::UnsupportedAnchor);
        assert_eq!(lex_error_kind("a]"), ErrorKind::UnexpectedCharacter);
        assert_eq!(lex_error_kind("a}"), ErrorKind::UnexpectedCharacter);

        let err = lex_from_str("ab$").unwrap_err();
        assert_eq!(err.location, Location::new_range(2, 1));
        assert_eq!(err.fragment, "$");
    }
}
