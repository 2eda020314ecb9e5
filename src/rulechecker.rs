// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use crate::{
    ast::{Ast, Node, NodeId, RepeatMax},
    error::ErrorKind,
};

/// Validate the bounds of a quantifier.
///
/// A quantifier must be able to consume at least one occurrence, so
/// `{0}` and `{0,0}` are rejected, as is a range whose lower bound
/// exceeds the upper one.
pub fn check_repetition(min: u32, max: RepeatMax) -> Result<(), ErrorKind> {
    match max {
        RepeatMax::Finite(0) => Err(ErrorKind::ZeroEffectiveRepeat),
        RepeatMax::Finite(n) if min > n => Err(ErrorKind::InvalidRepeatBounds),
        _ => Ok(()),
    }
}

/// Whether the node can succeed without consuming any character,
/// e.g. `a*`, `(a?b?)`, `a|b*`.
///
/// The tree is walked in post-order with an explicit stack, so the
/// nesting depth of the pattern does not grow the native stack.
pub fn can_match_empty(ast: &Ast, node_id: NodeId) -> bool {
    let mut results: Vec<Option<bool>> = vec![None; ast.len()];
    let mut stack = vec![node_id];

    while let Some(&id) = stack.last() {
        if results[id].is_some() {
            stack.pop();
            continue;
        }

        let pending: Vec<NodeId> = children_of(ast.node(id))
            .iter()
            .copied()
            .filter(|child| results[*child].is_none())
            .collect();

        if !pending.is_empty() {
            stack.extend(pending);
            continue;
        }

        let is_empty = |child: &NodeId| results[*child] == Some(true);
        let value = match ast.node(id) {
            Node::Literal(_) | Node::CharSet(_) => false,
            Node::Sequence(children) => children.iter().all(is_empty),
            Node::Alternation(branches) => branches.iter().any(is_empty),
            Node::Group(inner) => is_empty(inner),
            Node::Quantified(quantifier) => quantifier.min == 0 || is_empty(&quantifier.inner),
        };

        results[id] = Some(value);
        stack.pop();
    }

    results[node_id] == Some(true)
}

fn children_of(node: &Node) -> &[NodeId] {
    match node {
        Node::Literal(_) | Node::CharSet(_) => &[],
        Node::Sequence(children) | Node::Alternation(children) => children,
        Node::Group(inner) => std::slice::from_ref(inner),
        Node::Quantified(quantifier) => std::slice::from_ref(&quantifier.inner),
    }
}
