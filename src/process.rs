// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use log::trace;

use crate::{
    ast::{Ast, Node, NodeId, QuantifierMode},
    charset::case_variants,
    context::{Choice, Context, ContinuationIndex, Goal},
};

// The next thing the engine loop does.
#[derive(Debug)]
enum Step {
    // evaluate a node at the position
    Eval(NodeId, usize, ContinuationIndex),

    // the previous node succeeded, run the continuation
    Continue(usize, ContinuationIndex),

    // `count` iterations of the quantifier have completed
    Repeat {
        quantifier: NodeId,
        count: u32,
        position: usize,
        next: ContinuationIndex,
    },

    Backtrack,
}

/// Try to match the whole AST at `start`, returning the end position.
///
/// The native call stack is never used for the pattern structure nor
/// for repetitions: pending work lives in the continuation arena of
/// the context and alternatives in its choice stack, so the memory used
/// grows with the number of live choice points rather than with
/// recursion depth.
pub fn start_process(
    context: &mut Context,
    ast: &Ast,
    input: &[char],
    ignore_case: bool,
    start: usize,
) -> Option<usize> {
    context.reset();

    trace!(">>ATTEMPT START, position: {}, length: {}", start, input.len());

    if start > input.len() {
        context.mark_end_of_input_read();
        trace!("  ATTEMPT FAILED, start beyond the input");
        return None;
    }

    let mut step = Step::Eval(ast.root(), start, None);

    loop {
        step = match step {
            Step::Eval(node_id, position, next) => {
                eval_node(context, ast, input, ignore_case, node_id, position, next)
            }
            Step::Continue(position, None) => {
                trace!("  ATTEMPT FINISH, end: {}", position);
                return Some(position);
            }
            Step::Continue(position, Some(index)) => {
                let continuation = context.continuation(index);
                match continuation.goal {
                    Goal::Node(node_id) => Step::Eval(node_id, position, continuation.next),
                    Goal::Repeat {
                        quantifier,
                        count,
                        iteration_start,
                    } => {
                        if position == iteration_start {
                            // an iteration that consumes nothing would repeat forever,
                            // the remaining iterations are considered matched empty.
                            Step::Continue(position, continuation.next)
                        } else {
                            Step::Repeat {
                                quantifier,
                                count,
                                position,
                                next: continuation.next,
                            }
                        }
                    }
                    Goal::Commit { barrier } => {
                        context.cut(barrier);
                        Step::Continue(position, continuation.next)
                    }
                }
            }
            Step::Repeat {
                quantifier,
                count,
                position,
                next,
            } => step_quantifier(context, ast, quantifier, count, position, next),
            Step::Backtrack => match context.pop_choice() {
                Some(choice) => resume_choice(context, ast, choice),
                None => {
                    trace!("  ATTEMPT FAILED, no choice left");
                    return None;
                }
            },
        };
    }
}

fn eval_node(
    context: &mut Context,
    ast: &Ast,
    input: &[char],
    ignore_case: bool,
    node_id: NodeId,
    position: usize,
    next: ContinuationIndex,
) -> Step {
    match ast.node(node_id) {
        Node::Literal(expected) => {
            let Some(actual) = read_char(context, input, position) else {
                return Step::Backtrack;
            };

            let is_same = if ignore_case {
                case_variants(actual).any(|c| c == *expected)
            } else {
                actual == *expected
            };

            if is_same {
                Step::Continue(position + 1, next)
            } else {
                Step::Backtrack
            }
        }
        Node::CharSet(charset) => {
            let Some(actual) = read_char(context, input, position) else {
                return Step::Backtrack;
            };

            let is_member = if ignore_case {
                charset.is_match_ignore_case(actual)
            } else {
                charset.is_match(actual)
            };

            if is_member {
                Step::Continue(position + 1, next)
            } else {
                Step::Backtrack
            }
        }
        Node::Sequence(items) => {
            // link the items after the first one in front of the continuation
            let mut sequence_next = next;
            for item in items.iter().skip(1).rev() {
                sequence_next = Some(context.push_goal(Goal::Node(*item), sequence_next));
            }

            match items.first() {
                Some(first) => Step::Eval(*first, position, sequence_next),
                None => Step::Continue(position, next),
            }
        }
        Node::Alternation(branches) => {
            if branches.len() > 1 {
                context.push_choice(Choice::Branch {
                    alternation: node_id,
                    branch_index: 1,
                    position,
                    next,
                });
            }

            match branches.first() {
                Some(first) => Step::Eval(*first, position, next),
                None => Step::Backtrack,
            }
        }
        Node::Group(inner) => Step::Eval(*inner, position, next),
        Node::Quantified(quantifier) => {
            let next = if quantifier.mode == QuantifierMode::Possessive {
                let barrier = context.choice_count();
                Some(context.push_goal(Goal::Commit { barrier }, next))
            } else {
                next
            };

            Step::Repeat {
                quantifier: node_id,
                count: 0,
                position,
                next,
            }
        }
    }
}

fn step_quantifier(
    context: &mut Context,
    ast: &Ast,
    quantifier_id: NodeId,
    count: u32,
    position: usize,
    next: ContinuationIndex,
) -> Step {
    let Node::Quantified(quantifier) = ast.node(quantifier_id) else {
        unreachable!("repeat goal of a non-quantifier node {}", quantifier_id);
    };

    let can_more = count
        .checked_add(1)
        .is_some_and(|more| quantifier.max.allows(more));
    let can_stop = count >= quantifier.min;

    if !can_more {
        return if can_stop {
            Step::Continue(position, next)
        } else {
            Step::Backtrack
        };
    }

    if !can_stop {
        return iterate(context, quantifier_id, quantifier.inner, count, position, next);
    }

    match quantifier.mode {
        QuantifierMode::Greedy | QuantifierMode::Possessive => {
            context.push_choice(Choice::Resume { position, next });
            iterate(context, quantifier_id, quantifier.inner, count, position, next)
        }
        QuantifierMode::Reluctant => {
            context.push_choice(Choice::Extend {
                quantifier: quantifier_id,
                count,
                position,
                next,
            });
            Step::Continue(position, next)
        }
    }
}

// start the iteration `count + 1`
fn iterate(
    context: &mut Context,
    quantifier_id: NodeId,
    inner: NodeId,
    count: u32,
    position: usize,
    next: ContinuationIndex,
) -> Step {
    let repeat = context.push_goal(
        Goal::Repeat {
            quantifier: quantifier_id,
            count: count + 1,
            iteration_start: position,
        },
        next,
    );
    Step::Eval(inner, position, Some(repeat))
}

fn resume_choice(context: &mut Context, ast: &Ast, choice: Choice) -> Step {
    match choice {
        Choice::Branch {
            alternation,
            branch_index,
            position,
            next,
        } => {
            let Node::Alternation(branches) = ast.node(alternation) else {
                unreachable!("branch choice of a non-alternation node {}", alternation);
            };

            if branch_index + 1 < branches.len() {
                context.push_choice(Choice::Branch {
                    alternation,
                    branch_index: branch_index + 1,
                    position,
                    next,
                });
            }

            Step::Eval(branches[branch_index], position, next)
        }
        Choice::Resume { position, next } => Step::Continue(position, next),
        Choice::Extend {
            quantifier,
            count,
            position,
            next,
        } => {
            let Node::Quantified(q) = ast.node(quantifier) else {
                unreachable!("extend choice of a non-quantifier node {}", quantifier);
            };
            iterate(context, quantifier, q.inner, count, position, next)
        }
    }
}

fn read_char(context: &mut Context, input: &[char], position: usize) -> Option<char> {
    let c = input.get(position).copied();
    if c.is_none() {
        // a longer input could change the verdict
        context.mark_end_of_input_read();
    }
    c
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::{compiler::compile, context::Context};

    use super::start_process;

    fn match_at(pattern: &str, text: &str, start: usize) -> Option<usize> {
        let ast = compile(pattern).unwrap();
        let chars: Vec<char> = text.chars().collect();
        let mut context = Context::new();
        start_process(&mut context, &ast, &chars, false, start)
    }

    fn match_ignore_case(pattern: &str, text: &str) -> Option<usize> {
        let ast = compile(pattern).unwrap();
        let chars: Vec<char> = text.chars().collect();
        let mut context = Context::new();
        start_process(&mut context, &ast, &chars, true, 0)
    }

    #[test]
    fn test_process_literal_and_charset() {
        assert_eq!(match_at("abc", "abcd", 0), Some(3));
        assert_eq!(match_at("abc", "xabc", 1), Some(4));
        assert_eq!(match_at("abc", "abd", 0), None);
        assert_eq!(match_at("abc", "ab", 0), None);
        assert_eq!(match_at("[a-c]x", "bx", 0), Some(2));
        assert_eq!(match_at("[^ab]", "a", 0), None);
        assert_eq!(match_at("[^ab]", "c", 0), Some(1));
        assert_eq!(match_at(".", "\n", 0), None);
        assert_eq!(match_at(".", "文", 0), Some(1));
    }

    #[test]
    fn test_process_alternation() {
        // the first branch leading to an overall success wins
        assert_eq!(match_at("a|ab|b", "ab", 0), Some(1));
        assert_eq!(match_at("(a|ab)c", "abc", 0), Some(3));
        assert_eq!(match_at("(a|ab|abc)d", "abcd", 0), Some(4));
        assert_eq!(match_at("(a|b)(c|d)", "bd", 0), Some(2));
        assert_eq!(match_at("a|b", "c", 0), None);
    }

    #[test]
    fn test_process_greedy() {
        assert_eq!(match_at("a*", "aaab", 0), Some(3));
        assert_eq!(match_at("a*", "b", 0), Some(0));
        assert_eq!(match_at("a*ab", "aaab", 0), Some(4));
        assert_eq!(match_at("a{2,3}", "aaaa", 0), Some(3));
        assert_eq!(match_at("a{2,3}", "a", 0), None);
        assert_eq!(match_at("a?", "aaaa", 0), Some(1));
        assert_eq!(match_at("a{3,}", "aaaaa", 0), Some(5));
    }

    #[test]
    fn test_process_reluctant() {
        assert_eq!(match_at("a*?", "aaa", 0), Some(0));
        assert_eq!(match_at("a??", "a", 0), Some(0));
        assert_eq!(match_at("a*?b", "aaab", 0), Some(4));
        assert_eq!(match_at("a{3,}?", "aaaaa", 0), Some(3));
        assert_eq!(match_at("a{2,3}?b", "aaab", 0), Some(4));
        assert_eq!(match_at("a{2,3}?b", "aaaab", 0), None);
    }

    #[test]
    fn test_process_possessive() {
        assert_eq!(match_at("a*+", "aaab", 0), Some(3));
        assert_eq!(match_at("a*+a", "aaaa", 0), None);
        assert_eq!(match_at("a?+a", "a", 0), None);
        assert_eq!(match_at("a{2,3}+a", "aaa", 0), None);
        assert_eq!(match_at("a{2,3}+a", "aaaa", 0), Some(4));

        // choices made before the quantifier survive the commit
        assert_eq!(match_at("(a|ab)b*+c", "abc", 0), Some(3));
    }

    #[test]
    fn test_process_empty_iteration() {
        assert_eq!(match_at("(a*)*", "aab", 0), Some(2));
        assert_eq!(match_at("(a*)+b", "b", 0), Some(1));
        assert_eq!(match_at("(a?){3}", "a", 0), Some(1));
        assert_eq!(match_at("(a*?)*?b", "aab", 0), Some(3));
        assert_eq!(match_at("(a*)*+b", "aac", 0), None);
    }

    #[test]
    fn test_process_start_position() {
        assert_eq!(match_at("a*", "aa", 2), Some(2));
        assert_eq!(match_at("a", "aa", 2), None);
        assert_eq!(match_at("a*", "aa", 3), None);
    }

    #[test]
    fn test_process_ignore_case() {
        assert_eq!(match_ignore_case("abc", "AbC"), Some(3));
        assert_eq!(match_ignore_case("ABC", "abc"), Some(3));
        assert_eq!(match_ignore_case("[a-c]+", "CBAd"), Some(3));
        assert_eq!(match_ignore_case("[^a]", "A"), None);
        assert_eq!(match_ignore_case("ß", "SS"), None);
    }

    #[test]
    fn test_process_long_input() {
        let text = "a".repeat(4096);
        assert_eq!(match_at("a*", &text, 0), Some(4096));
        assert_eq!(match_at("a*?b", &text, 0), None);
        assert_eq!(match_at("a*+", &text, 0), Some(4096));
        assert_eq!(match_at("(a|b)*", &text, 0), Some(4096));
        assert_eq!(match_at("(a|b)*a", &text, 0), Some(4096));
    }

    #[test]
    fn test_process_end_of_input_flag() {
        let ast = compile("a*").unwrap();
        let mut context = Context::new();

        let chars: Vec<char> = "aab".chars().collect();
        assert_eq!(start_process(&mut context, &ast, &chars, false, 0), Some(2));
        assert!(!context.has_read_end_of_input());

        let chars: Vec<char> = "aa".chars().collect();
        assert_eq!(start_process(&mut context, &ast, &chars, false, 0), Some(2));
        assert!(context.has_read_end_of_input());
    }
}
