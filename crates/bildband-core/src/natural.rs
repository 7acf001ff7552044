// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Natural ordering for file names: embedded digit runs compare as numbers,
// everything else compares case-insensitively.

use std::cmp::Ordering;

/// A run of ASCII digits compared by numeric value.
///
/// Stored without leading zeros so arbitrarily long runs compare correctly
/// without parsing into a fixed-width integer.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Digits(String);

impl Digits {
    fn new(run: &str) -> Self {
        let trimmed = run.trim_start_matches('0');
        Self(trimmed.to_owned())
    }
}

impl Ord for Digits {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .len()
            .cmp(&other.0.len())
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for Digits {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum Token {
    Text(String),
    Number(Digits),
}

/// Sort key splitting a name into alternating text and number tokens.
///
/// The token list always starts with a (possibly empty) text token and
/// alternates from there, so tokens at the same position are always the same
/// kind.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct NaturalKey {
    tokens: Vec<Token>,
}

impl NaturalKey {
    pub fn new(name: &str) -> Self {
        let mut tokens = Vec::new();
        let mut rest = name;

        loop {
            let text_end = rest
                .find(|c: char| c.is_ascii_digit())
                .unwrap_or(rest.len());
            tokens.push(Token::Text(rest[..text_end].to_lowercase()));
            rest = &rest[text_end..];
            if rest.is_empty() {
                break;
            }

            let digits_end = rest
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(rest.len());
            tokens.push(Token::Number(Digits::new(&rest[..digits_end])));
            rest = &rest[digits_end..];
            if rest.is_empty() {
                // A trailing digit run is followed by an empty text token.
                tokens.push(Token::Text(String::new()));
                break;
            }
        }

        Self { tokens }
    }
}

/// Compare two names in natural order.
///
/// Names whose keys are equal (`img01` vs `img1`, `A` vs `a`) fall back to
/// plain string comparison so the ordering is total.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    NaturalKey::new(a)
        .cmp(&NaturalKey::new(b))
        .then_with(|| a.cmp(b))
}

/// Sort names in place in natural order.
pub fn sort_naturally<T: AsRef<str>>(items: &mut [T]) {
    items.sort_by_cached_key(|item| {
        let name = item.as_ref();
        (NaturalKey::new(name), name.to_owned())
    });
}

/// Collect `items` into a vector sorted in natural order.
pub fn natural_sorted<I>(items: I) -> Vec<I::Item>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut sorted: Vec<I::Item> = items.into_iter().collect();
    sort_naturally(&mut sorted);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_compare_numerically() {
        let mut names = vec!["img2.png", "img10.png", "img1.png"];
        sort_naturally(&mut names);
        assert_eq!(names, vec!["img1.png", "img2.png", "img10.png"]);
    }

    #[test]
    fn natural_sorted_collects_owned_names() {
        let names = natural_sorted(vec!["Week 10".to_string(), "Week 9".to_string()]);
        assert_eq!(names, vec!["Week 9", "Week 10"]);
    }

    #[test]
    fn only_ascii_digits_form_numbers() {
        // U+0662 (Arabic-Indic two) stays part of the text token.
        let mut names = vec!["img\u{0662}.png", "img10.png"];
        sort_naturally(&mut names);
        assert_eq!(names, vec!["img10.png", "img\u{0662}.png"]);
    }

    #[test]
    fn text_compares_case_insensitively() {
        let mut names = vec!["b.png", "A.png", "c.png"];
        sort_naturally(&mut names);
        assert_eq!(names, vec!["A.png", "b.png", "c.png"]);
    }

    #[test]
    fn screenshot_timestamps() {
        let mut names = vec![
            "Screenshot (100).png",
            "Screenshot (9).png",
            "Screenshot (10).png",
            "screenshot (11).png",
        ];
        sort_naturally(&mut names);
        assert_eq!(
            names,
            vec![
                "Screenshot (9).png",
                "Screenshot (10).png",
                "screenshot (11).png",
                "Screenshot (100).png",
            ]
        );
    }

    #[test]
    fn leading_digits_and_prefixes() {
        assert_eq!(natural_cmp("2 intro.png", "10 intro.png"), Ordering::Less);
        assert_eq!(natural_cmp("img", "img1"), Ordering::Less);
        assert_eq!(natural_cmp("page9", "page09a"), Ordering::Less);
    }

    #[test]
    fn equal_keys_fall_back_to_original_string() {
        assert_eq!(NaturalKey::new("img01.png"), NaturalKey::new("img1.png"));
        assert_eq!(natural_cmp("img01.png", "img1.png"), Ordering::Less);
        assert_eq!(natural_cmp("IMG.png", "img.png"), Ordering::Less);
        assert_eq!(natural_cmp("same.png", "same.png"), Ordering::Equal);
    }

    #[test]
    fn very_long_digit_runs_do_not_overflow() {
        let big = format!("shot{}.png", "9".repeat(40));
        let bigger = format!("shot1{}.png", "0".repeat(40));
        assert_eq!(natural_cmp(&big, &bigger), Ordering::Less);
    }

    #[test]
    fn sorting_is_stable_across_input_orders() {
        let mut forward = vec!["a10", "a2", "A2", "a02", "a1"];
        let mut backward: Vec<_> = forward.iter().rev().copied().collect();
        sort_naturally(&mut forward);
        sort_naturally(&mut backward);
        assert_eq!(forward, backward);
        assert_eq!(forward, vec!["a1", "A2", "a02", "a2", "a10"]);
    }
}
