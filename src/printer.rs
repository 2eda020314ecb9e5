// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use std::fmt::{Display, Write};

use crate::{
    ast::{Ast, Node, NodeId, Quantifier, QuantifierMode, RepeatMax},
    charset::{CharRange, CharSet, PresetCharSetName},
};

const PRESETS: [(PresetCharSetName, &str); 7] = [
    (PresetCharSetName::CharAny, "."),
    (PresetCharSetName::CharDigit, "\\d"),
    (PresetCharSetName::CharNotDigit, "\\D"),
    (PresetCharSetName::CharSpace, "\\s"),
    (PresetCharSetName::CharNotSpace, "\\S"),
    (PresetCharSetName::CharWord, "\\w"),
    (PresetCharSetName::CharNotWord, "\\W"),
];

impl Display for PresetCharSetName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let notation = PRESETS
            .iter()
            .find(|(name, _)| name == self)
            .map_or("", |(_, notation)| *notation);
        f.write_str(notation)
    }
}

impl Display for CharRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write_codepoint(f, self.low, true)?;
        if self.high == self.low + 1 {
            write_codepoint(f, self.high, true)
        } else if self.high > self.low {
            f.write_char('-')?;
            write_codepoint(f, self.high, true)
        } else {
            Ok(())
        }
    }
}

impl Display for CharSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // built-in classes print with their short notation
        if let Some((name, _)) = PRESETS
            .iter()
            .find(|(name, _)| CharSet::from_preset(*name) == *self)
        {
            return write!(f, "{}", name);
        }

        f.write_char('[')?;
        if self.negated {
            f.write_char('^')?;
        }
        for range in self.ranges() {
            write!(f, "{}", range)?;
        }
        f.write_char(']')
    }
}

impl Display for Ast {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write_node(f, self, self.root())
    }
}

// Pending output of the printer, popped from the back.
enum PrintTask<'a> {
    Node(NodeId),
    Grouped(NodeId),
    Text(&'static str),
    Quantifier(&'a Quantifier),
}

fn write_node(f: &mut std::fmt::Formatter<'_>, ast: &Ast, root: NodeId) -> std::fmt::Result {
    let mut tasks = vec![PrintTask::Node(root)];

    while let Some(task) = tasks.pop() {
        match task {
            PrintTask::Text(text) => f.write_str(text)?,
            PrintTask::Quantifier(quantifier) => write_quantifier(f, quantifier)?,
            PrintTask::Grouped(id) => {
                f.write_char('(')?;
                tasks.push(PrintTask::Text(")"));
                tasks.push(PrintTask::Node(id));
            }
            PrintTask::Node(id) => match ast.node(id) {
                Node::Literal(c) => write_codepoint(f, *c as u32, false)?,
                Node::CharSet(charset) => write!(f, "{}", charset)?,
                Node::Sequence(items) => {
                    for item in items.iter().rev() {
                        // only a grouped alternation can appear inside a sequence
                        if matches!(ast.node(*item), Node::Alternation(_)) {
                            tasks.push(PrintTask::Grouped(*item));
                        } else {
                            tasks.push(PrintTask::Node(*item));
                        }
                    }
                }
                Node::Alternation(branches) => {
                    for (idx, branch) in branches.iter().enumerate().rev() {
                        tasks.push(PrintTask::Node(*branch));
                        if idx != 0 {
                            tasks.push(PrintTask::Text("|"));
                        }
                    }
                }
                Node::Group(inner) => tasks.push(PrintTask::Grouped(*inner)),
                Node::Quantified(quantifier) => {
                    tasks.push(PrintTask::Quantifier(quantifier));
                    match ast.node(quantifier.inner) {
                        Node::Sequence(_) | Node::Alternation(_) | Node::Quantified(_) => {
                            tasks.push(PrintTask::Grouped(quantifier.inner))
                        }
                        _ => tasks.push(PrintTask::Node(quantifier.inner)),
                    }
                }
            },
        }
    }

    Ok(())
}

fn write_quantifier(f: &mut std::fmt::Formatter<'_>, quantifier: &Quantifier) -> std::fmt::Result {
    match (quantifier.min, quantifier.max) {
        (0, RepeatMax::Finite(1)) => f.write_char('?')?,
        (0, RepeatMax::Unbounded) => f.write_char('*')?,
        (1, RepeatMax::Unbounded) => f.write_char('+')?,
        (min, RepeatMax::Unbounded) => write!(f, "{{{},}}", min)?,
        (min, RepeatMax::Finite(max)) if min == max => write!(f, "{{{}}}", min)?,
        (min, RepeatMax::Finite(max)) => write!(f, "{{{},{}}}", min, max)?,
    }

    match quantifier.mode {
        QuantifierMode::Greedy => Ok(()),
        QuantifierMode::Reluctant => f.write_char('?'),
        QuantifierMode::Possessive => f.write_char('+'),
    }
}

// Write a character so that the lexer reads it back as the same literal.
fn write_codepoint(
    f: &mut std::fmt::Formatter<'_>,
    codepoint: u32,
    inside_charset: bool,
) -> std::fmt::Result {
    let Some(c) = char::from_u32(codepoint) else {
        // surrogates only show up as endpoints of complemented ranges
        return write!(f, "\\u{:04X}", codepoint);
    };

    match c {
        '\t' => f.write_str("\\t"),
        '\n' => f.write_str("\\n"),
        '\r' => f.write_str("\\r"),
        '\x0C' => f.write_str("\\f"),
        '\x07' => f.write_str("\\a"),
        '\x1B' => f.write_str("\\e"),
        '\\' | '[' | ']' | '^' => write!(f, "\\{}", c),
        '-' if inside_charset => f.write_str("\\-"),
        '.' | '*' | '+' | '?' | '(' | ')' | '{' | '}' | '|' | '$' if !inside_charset => {
            write!(f, "\\{}", c)
        }
        _ if c.is_control() && codepoint <= 0xFF => write!(f, "\\x{:02X}", codepoint),
        _ if c.is_control() || codepoint == 0x2028 || codepoint == 0x2029 => {
            write!(f, "\\u{:04X}", codepoint)
        }
        _ => f.write_char(c),
    }
}
