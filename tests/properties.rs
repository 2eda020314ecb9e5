// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use grammar_regex::{InputBuffer, Regex};
use proptest::prelude::*;

// A pattern shape whose quantifier mode is chosen when rendering.
#[derive(Debug, Clone)]
enum Skeleton {
    Atom(&'static str),
    Sequence(Vec<Skeleton>),
    Alternation(Vec<Skeleton>),
    Repeat(Box<Skeleton>, &'static str),
}

impl Skeleton {
    fn render(&self, mode: &str) -> String {
        match self {
            Skeleton::Atom(atom) => atom.to_string(),
            Skeleton::Sequence(items) => items.iter().map(|item| item.render(mode)).collect(),
            Skeleton::Alternation(branches) => {
                let branches: Vec<String> = branches.iter().map(|b| b.render(mode)).collect();
                format!("({})", branches.join("|"))
            }
            Skeleton::Repeat(inner, quantifier) => {
                format!("({}){}{}", inner.render(mode), quantifier, mode)
            }
        }
    }
}

fn skeleton() -> impl Strategy<Value = Skeleton> {
    let leaf = prop_oneof![Just("a"), Just("b"), Just("[ab]"), Just("."), Just("[^a]")]
        .prop_map(Skeleton::Atom);

    leaf.prop_recursive(4, 24, 3, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 1..4).prop_map(Skeleton::Sequence),
            prop::collection::vec(inner.clone(), 2..4).prop_map(Skeleton::Alternation),
            (
                inner,
                prop::sample::select(vec!["?", "*", "+", "{1,2}", "{2,}", "{0,3}"])
            )
                .prop_map(|(inner, quantifier)| Skeleton::Repeat(Box::new(inner), quantifier)),
        ]
    })
}

fn match_end(regex: &Regex, text: &str) -> Option<usize> {
    regex.matcher(InputBuffer::from(text)).match_from_beginning()
}

proptest! {
    #[test]
    fn test_matching_is_deterministic(shape in skeleton(), text in "[abc]{0,8}") {
        let regex = Regex::new(&shape.render("")).unwrap();
        let mut matcher = regex.matcher(InputBuffer::from(text.as_str()));

        let first = matcher.match_from_beginning();
        let second = matcher.match_from_beginning();
        prop_assert_eq!(first, second);
        prop_assert_eq!(first, regex.match_at(&text, 0).map(|m| m.end()));
    }

    #[test]
    fn test_possessive_accepts_subset_of_greedy(shape in skeleton(), text in "[abc]{0,8}") {
        let greedy = Regex::new(&shape.render("")).unwrap();
        let possessive = Regex::new(&shape.render("+")).unwrap();

        if match_end(&possessive, &text).is_some() {
            prop_assert!(match_end(&greedy, &text).is_some());
        }
    }

    #[test]
    fn test_greedy_and_reluctant_accept_the_same(shape in skeleton(), text in "[abc]{0,8}") {
        let greedy = Regex::new(&shape.render("")).unwrap();
        let reluctant = Regex::new(&shape.render("?")).unwrap();

        prop_assert_eq!(
            match_end(&greedy, &text).is_some(),
            match_end(&reluctant, &text).is_some()
        );
    }

    #[test]
    fn test_retry_after_append_equals_fresh(
        shape in skeleton(),
        text in "[abc]{0,8}",
        split in 0usize..=8,
    ) {
        let regex = Regex::new(&shape.render("")).unwrap();
        let split = split.min(text.len());

        let buffer = InputBuffer::from(&text[..split]);
        let mut matcher = regex.matcher(buffer.clone());
        let _ = matcher.match_from_beginning();

        buffer.append(&text[split..]).unwrap();
        let retried = matcher.match_from_beginning();
        let retried_text = matcher.last_match().map(|m| m.as_str().to_owned());

        let mut fresh = regex.matcher(InputBuffer::from(text.as_str()));
        prop_assert_eq!(retried, fresh.match_from_beginning());
        prop_assert_eq!(retried_text, fresh.last_match().map(|m| m.as_str().to_owned()));
    }

    #[test]
    fn test_needs_more_input_only_when_end_was_read(shape in skeleton(), text in "[abc]{0,8}") {
        let regex = Regex::new(&shape.render("")).unwrap();
        let buffer = InputBuffer::from(text.as_str());
        let mut matcher = regex.matcher(buffer.clone());
        let result = matcher.match_from_beginning();

        // without reading the end, a longer input cannot change the result
        if !matcher.has_read_end_of_input() {
            buffer.append("abc").unwrap();
            prop_assert_eq!(matcher.match_from_beginning(), result);
        }
    }

    #[test]
    fn test_printed_ast_compiles_to_the_same_tree(shape in skeleton()) {
        let regex = Regex::new(&shape.render("?")).unwrap();
        let printed = regex.ast().to_string();
        let reparsed = Regex::new(&printed).unwrap();
        prop_assert_eq!(reparsed.ast().to_string(), printed);
    }
}
