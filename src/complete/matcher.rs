//! Rating candidates against a prefix.

use std::time::{Duration, Instant};

use super::response::{Completion, CompletionList};
use super::substring::SubstringMatcher;

/// Rates a candidate against the prefix being completed.
pub trait Matcher {
    /// `None` when the candidate does not match at all.
    fn rate(&self, candidate: &str) -> Option<Completion>;
}

/// Plain prefix matching.
#[derive(Debug, Clone)]
pub struct PrefixMatcher {
    prefix: String,
}

impl PrefixMatcher {
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
        }
    }
}

impl Matcher for PrefixMatcher {
    fn rate(&self, candidate: &str) -> Option<Completion> {
        candidate
            .starts_with(&self.prefix)
            .then(|| Completion::new(candidate, 1.0, vec![0..self.prefix.len()]))
    }
}

/// Rate `candidates` until exhausted or `deadline` passes.
///
/// `accept` filters rated candidates; substring matching uses it to drop
/// candidates the argument would not validate. When the deadline cuts the
/// enumeration short the list is marked truncated.
pub fn collect<I>(
    matcher: &dyn Matcher,
    prefix: &str,
    candidates: I,
    deadline: Instant,
    accept: impl Fn(&str) -> bool,
) -> CompletionList
where
    I: IntoIterator<Item = String>,
{
    let mut list = CompletionList::new(prefix);
    for candidate in candidates {
        if Instant::now() >= deadline {
            tracing::debug!(prefix, collected = list.len(), "completion deadline reached");
            list.truncated = true;
            break;
        }
        if let Some(completion) = matcher.rate(&candidate) {
            if accept(&completion.text) {
                list.push(completion);
            }
        }
    }
    list
}

/// Budget end for one argument's enumeration, counted from now.
pub(crate) fn deadline_from_now(budget: Duration) -> Instant {
    Instant::now()
        .checked_add(budget)
        .unwrap_or_else(|| Instant::now() + Duration::from_secs(86_400))
}

/// Prefix or substring matching over `candidates`, per `fuzzy`.
pub(crate) fn match_candidates<I>(
    prefix: &str,
    candidates: I,
    fuzzy: bool,
    deadline: Instant,
    accept: impl Fn(&str) -> bool,
) -> CompletionList
where
    I: IntoIterator<Item = String>,
{
    if fuzzy {
        let matcher = SubstringMatcher::new(prefix);
        let mut list = collect(&matcher, prefix, candidates, deadline, accept);
        super::substring::prefer_shortest(prefix, &mut list);
        list
    } else {
        collect(&PrefixMatcher::new(prefix), prefix, candidates, deadline, |_| true)
    }
}
