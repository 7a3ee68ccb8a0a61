//! The completion search.

use std::collections::VecDeque;

use crate::command::Command;
use crate::complete::{Completion, CompletionList};
use crate::config::EngineConfig;
use crate::scan::strip_quote;
use crate::subject::{Context, Subject};

use super::frontier::Frontier;
use super::state::{Expansion, SearchState};

/// Fan-out steps allowed per completing state. Decorator chains are
/// finite, so this only trips on a malformed tree.
const FAN_OUT_LIMIT: usize = 1024;

static EMPTY_FRAGMENT: [String; 1] = [String::new()];

/// Completes the last token of an input.
///
/// Runs the same expansion as [`super::Resolver`], but never stops at a
/// solution: every state that has consumed all but the final fragment is
/// collected, and the search continues until the frontier is empty.
pub struct Completer<'t> {
    root: &'t Command,
    cx: Context<'t>,
    max_expansions: usize,
    frontier: Frontier<'t>,
    completing: Vec<SearchState<'t>>,
}

impl<'t> Completer<'t> {
    pub fn new(root: &'t Command, subject: &'t Subject) -> Self {
        let config = EngineConfig::default();
        Self {
            root,
            cx: Context::new(subject, config.completion.deadline()),
            max_expansions: config.search.max_expansions,
            frontier: Frontier::new(),
            completing: Vec::new(),
        }
    }

    pub fn with_config(mut self, config: &EngineConfig) -> Self {
        self.cx.deadline = config.completion.deadline();
        self.max_expansions = config.search.max_expansions;
        self
    }

    /// Candidates for the last element of `input`, which may be empty.
    pub fn complete(mut self, input: &'t [String]) -> CompletionList {
        let input = if input.is_empty() {
            &EMPTY_FRAGMENT[..]
        } else {
            input
        };
        let prefix = strip_quote(input.last().map(String::as_str).unwrap_or_default());
        tracing::debug!(tokens = input.len(), prefix, "completing");

        self.classify(SearchState::initial(self.root, input));
        let mut expansions = 0usize;
        let mut cut_short = false;
        while let Some(state) = self.frontier.pop() {
            expansions += 1;
            if expansions > self.max_expansions {
                tracing::warn!(limit = self.max_expansions, "completion expansion limit reached");
                cut_short = true;
                break;
            }
            if let Expansion::Branches(next) = super::expand(state, &self.cx) {
                for successor in next {
                    self.classify(successor);
                }
            }
        }

        let mut list = CompletionList::new(prefix);
        list.truncated = cut_short;
        for state in std::mem::take(&mut self.completing) {
            list.merge(self.candidates(state, prefix));
        }
        tracing::debug!(
            candidates = list.len(),
            truncated = list.truncated,
            expansions,
            "completion finished"
        );
        list
    }

    fn classify(&mut self, state: SearchState<'t>) {
        if state.is_invalid() {
            return;
        }
        if state.is_completing() {
            self.completing.push(state.fork());
        }
        self.frontier.push(state);
    }

    /// Candidates contributed by one completing state: its front argument
    /// after fanning out through decorators and composites, or the child
    /// commands of its node once no arguments are outstanding.
    fn candidates(&self, state: SearchState<'t>, prefix: &str) -> CompletionList {
        let mut list = CompletionList::new(prefix);
        let mut work = VecDeque::from([state]);
        let mut steps = 0usize;
        while let Some(state) = work.pop_front() {
            steps += 1;
            if steps > FAN_OUT_LIMIT {
                tracing::warn!(prefix, "completion fan-out abandoned");
                list.truncated = true;
                break;
            }
            match state.front() {
                None => {
                    if let Some(node) = state.node() {
                        for name in node.child_names().filter(|n| n.starts_with(prefix)) {
                            list.push(Completion::new(name, 1.0, vec![0..prefix.len()]));
                        }
                    }
                }
                Some(arg) => match arg.fan_out(state, &self.cx) {
                    Ok(next) => work.extend(next),
                    Err(state) => list.merge(arg.complete(prefix, &state, &self.cx)),
                },
            }
        }
        list
    }
}
