// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use crate::charset::CharSet;

/// Index of a node in the arena of an `Ast`.
pub type NodeId = usize;

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Node {
    Literal(char),
    CharSet(CharSet),
    Sequence(Vec<NodeId>),

    /**
     * The branches are explored in declaration order, e.g.
     * `a|ab` matches "a" from "ab" and only falls back to the
     * second branch when the rest of the pattern fails after
     * the first one.
     */
    Alternation(Vec<NodeId>),

    /**
     * Parentheses only delimit precedence, there is no capture,
     * i.e. `(ab)` is equivalent to `ab`.
     */
    Group(NodeId),
    Quantified(Quantifier),
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Quantifier {
    pub inner: NodeId,
    pub min: u32,
    pub max: RepeatMax,
    pub mode: QuantifierMode,
}

/// The upper bound of a quantifier.
///
/// `Unbounded` is kept apart from any finite value so that a large
/// legitimate bound is never confused with "no bound".
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum RepeatMax {
    Finite(u32),
    Unbounded,
}

impl RepeatMax {
    /// Whether `count` repetitions stay within the bound.
    pub fn allows(&self, count: u32) -> bool {
        match self {
            RepeatMax::Finite(max) => count <= *max,
            RepeatMax::Unbounded => true,
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum QuantifierMode {
    Greedy,     // e.g. `a*`
    Reluctant,  // e.g. `a*?`
    Possessive, // e.g. `a*+`
}

/// The compiled pattern tree.
///
/// Nodes are stored in an arena and refer to their children by index,
/// the root is the last node pushed. An `Ast` is never modified after
/// compilation, so it can be shared by any number of matchers.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Ast {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Ast {
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub fn root_node(&self) -> &Node {
        &self.nodes[self.root]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Collects nodes while the parser walks the pattern.
#[derive(Debug, Default)]
pub struct AstBuilder {
    nodes: Vec<Node>,
}

impl AstBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    pub fn build(self, root: NodeId) -> Ast {
        Ast {
            nodes: self.nodes,
            root,
        }
    }
}
