//! Ordered substring ("fuzzy") matching.
//!
//! The prefix is split into fragments: a path delimiter (`-`, `.`, `/`,
//! `_`) travels with the character after it, anything else stands alone.
//! A candidate matches when the fragments occur in it in order, with
//! anything in between.

use std::ops::Range;

use regex::Regex;

use super::matcher::Matcher;
use super::response::{Completion, CompletionList};

const DELIMITERS: &[char] = &['-', '.', '/', '_'];

fn fragments(prefix: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut chars = prefix.chars().peekable();
    while let Some(c) = chars.next() {
        let mut fragment = String::from(c);
        if DELIMITERS.contains(&c) {
            if let Some(next) = chars.next() {
                fragment.push(next);
            }
        }
        out.push(fragment);
    }
    out
}

#[derive(Debug, Clone)]
pub struct SubstringMatcher {
    regex: Option<Regex>,
}

impl SubstringMatcher {
    pub fn new(prefix: &str) -> Self {
        if prefix.is_empty() {
            return Self { regex: None };
        }
        let pattern = fragments(prefix)
            .iter()
            .map(|f| format!("({})", regex::escape(f)))
            .collect::<Vec<_>>()
            .join(".*?");
        let regex = match Regex::new(&pattern) {
            Ok(regex) => Some(regex),
            Err(e) => {
                tracing::warn!(prefix, error = %e, "substring pattern rejected");
                None
            }
        };
        Self { regex }
    }
}

impl Matcher for SubstringMatcher {
    fn rate(&self, candidate: &str) -> Option<Completion> {
        let Some(regex) = &self.regex else {
            return Some(Completion::new(candidate, 1.0, Vec::new()));
        };
        let captures = regex.captures(candidate)?;
        let mut marks: Vec<Range<usize>> = Vec::new();
        let mut matched = 0;
        for group in captures.iter().skip(1).flatten() {
            matched += group.as_str().chars().count();
            match marks.last_mut() {
                Some(last) if last.end == group.start() => last.end = group.end(),
                _ => marks.push(group.range()),
            }
        }
        let length = candidate.chars().count().max(1);
        let score = 10.0 * matched as f64 / length as f64;
        Some(Completion::new(candidate, score, marks))
    }
}

/// Like the substring pattern, but the last path segment of the prefix
/// may not cross a `/`.
fn restricted_pattern(prefix: &str) -> Option<Regex> {
    let (dir, last) = match prefix.rfind('/') {
        Some(i) => (&prefix[..=i], &prefix[i + 1..]),
        None => ("", prefix),
    };
    let spread = |text: &str, gap: &str| -> String {
        text.chars()
            .map(|c| format!("{}{}", regex::escape(&c.to_string()), gap))
            .collect()
    };
    let pattern = format!("{}{}", spread(dir, ".*?"), spread(last, "[^/]*?"));
    Regex::new(&pattern).ok()
}

/// Collapse to the shortest candidate when every other candidate merely
/// extends it.
///
/// The other candidates must contain the shortest one as an ordered
/// substring, and must not match the prefix without crossing into a
/// deeper path segment. Ties in length go to the lexically smallest.
pub fn prefer_shortest(prefix: &str, list: &mut CompletionList) {
    if list.len() < 2 {
        return;
    }
    let Some(shortest) = list
        .items
        .iter()
        .min_by(|a, b| a.text.len().cmp(&b.text.len()).then_with(|| a.text.cmp(&b.text)))
        .map(|c| c.text.clone())
    else {
        return;
    };
    let extends = SubstringMatcher::new(&shortest);
    let filter = restricted_pattern(prefix);
    let collapses = list
        .items
        .iter()
        .filter(|c| c.text != shortest)
        .all(|c| {
            extends.rate(&c.text).is_some()
                && !filter.as_ref().is_some_and(|re| re.is_match(&c.text))
        });
    if collapses {
        list.retain(|c| c.text == shortest);
    }
}
