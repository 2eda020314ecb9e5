// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use log::trace;

use crate::ast::NodeId;

/// Index of a continuation in the arena, `None` means "the whole
/// pattern has matched".
pub type ContinuationIndex = Option<usize>;

/// What remains to be done once the current node succeeds.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Goal {
    // evaluate the node
    Node(NodeId),

    // one iteration of the quantifier has completed,
    // `count` is the number of completed iterations including this one.
    Repeat {
        quantifier: NodeId,
        count: u32,
        iteration_start: usize,
    },

    // leave a possessive quantifier, discarding the choices it created
    Commit {
        barrier: usize,
    },
}

/// A goal linked to the rest of the continuation.
///
/// The arena entries form persistent lists: an entry is never modified
/// once pushed, so a choice point can keep referring to the
/// continuation it was created with.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Continuation {
    pub goal: Goal,
    pub next: ContinuationIndex,
}

/// A saved choice point.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Choice {
    // try the alternation branch `branch_index` and the ones after it
    Branch {
        alternation: NodeId,
        branch_index: usize,
        position: usize,
        next: ContinuationIndex,
    },

    // greedy give-back: stop repeating here and run the continuation
    Resume {
        position: usize,
        next: ContinuationIndex,
    },

    // reluctant extension: run one more iteration
    Extend {
        quantifier: NodeId,
        count: u32,
        position: usize,
        next: ContinuationIndex,
    },
}

#[derive(Debug)]
struct ChoiceFrame {
    choice: Choice,

    // the arena length when the choice was saved, every continuation
    // pushed after it is unreachable once the choice is resumed.
    arena_length: usize,
}

/// The per-attempt state of the backtracking engine.
///
/// Owned by a single matcher and rebuilt at the start of every attempt.
#[derive(Debug, Default)]
pub struct Context {
    continuations: Vec<Continuation>,
    choices: Vec<ChoiceFrame>,
    read_end_of_input: bool,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.continuations.clear();
        self.choices.clear();
        self.read_end_of_input = false;
    }

    pub fn push_goal(&mut self, goal: Goal, next: ContinuationIndex) -> usize {
        let index = self.continuations.len();
        self.continuations.push(Continuation { goal, next });
        index
    }

    pub fn continuation(&self, index: usize) -> Continuation {
        self.continuations[index]
    }

    pub fn push_choice(&mut self, choice: Choice) {
        trace!("  push choice #{}: {:?}", self.choices.len(), choice);

        self.choices.push(ChoiceFrame {
            choice,
            arena_length: self.continuations.len(),
        });
    }

    /// Take the most recent choice point and drop the continuations
    /// created after it.
    pub fn pop_choice(&mut self) -> Option<Choice> {
        let frame = self.choices.pop()?;
        self.continuations.truncate(frame.arena_length);

        trace!("  pop choice #{}: {:?}", self.choices.len(), frame.choice);
        Some(frame.choice)
    }

    /// Discard every choice point above the barrier.
    pub fn cut(&mut self, barrier: usize) {
        if self.choices.len() > barrier {
            trace!("  cut choices {}..{}", barrier, self.choices.len());
            self.choices.truncate(barrier);
        }
    }

    pub fn choice_count(&self) -> usize {
        self.choices.len()
    }

    pub fn mark_end_of_input_read(&mut self) {
        self.read_end_of_input = true;
    }

    pub fn has_read_end_of_input(&self) -> bool {
        self.read_end_of_input
    }
}
