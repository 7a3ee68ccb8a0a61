//! The resolution search.

use crate::args::Bindings;
use crate::command::Command;
use crate::config::EngineConfig;
use crate::subject::{Context, Subject};

use super::error::ResolveError;
use super::frontier::Frontier;
use super::state::{Expansion, RejectReason, Rejection, SearchState};

/// A fully resolved invocation.
#[derive(Debug, Clone)]
pub struct Resolution<'t> {
    pub command: &'t Command,
    pub path: Vec<String>,
    pub bindings: Bindings,
}

/// Resolves one token sequence against a command tree.
///
/// Always expands the most advanced state next, so the first complete
/// parse found along the most advanced path wins; other branches are only
/// explored when that path dead-ends. A resolver is used once.
pub struct Resolver<'t> {
    root: &'t Command,
    cx: Context<'t>,
    max_expansions: usize,
    frontier: Frontier<'t>,
    closed: Vec<SearchState<'t>>,
    complete: Vec<SearchState<'t>>,
    invalid: Vec<SearchState<'t>>,
    rejections: Vec<(usize, Rejection)>,
}

impl<'t> Resolver<'t> {
    pub fn new(root: &'t Command, subject: &'t Subject) -> Self {
        let config = EngineConfig::default();
        Self {
            root,
            cx: Context::new(subject, config.completion.deadline()),
            max_expansions: config.search.max_expansions,
            frontier: Frontier::new(),
            closed: Vec::new(),
            complete: Vec::new(),
            invalid: Vec::new(),
            rejections: Vec::new(),
        }
    }

    pub fn with_config(mut self, config: &EngineConfig) -> Self {
        self.cx.deadline = config.completion.deadline();
        self.max_expansions = config.search.max_expansions;
        self
    }

    pub fn resolve(mut self, input: &'t [String]) -> Result<Resolution<'t>, ResolveError> {
        tracing::debug!(tokens = input.len(), "resolving");
        self.classify(SearchState::initial(self.root, input));

        let mut expansions = 0usize;
        while self.complete.is_empty() {
            let Some(state) = self.frontier.pop() else {
                break;
            };
            expansions += 1;
            if expansions > self.max_expansions {
                tracing::warn!(limit = self.max_expansions, "resolution expansion limit reached");
                return Err(ResolveError::ExpansionLimit {
                    understood: self.understood(input),
                    limit: self.max_expansions,
                });
            }
            tracing::trace!(
                priority = state.priority(),
                frontier = self.frontier.len(),
                "expanding state"
            );

            let priority = state.priority();
            self.closed.push(state.fork());
            match super::expand(state, &self.cx) {
                Expansion::Branches(next) => {
                    for successor in next {
                        self.classify(successor);
                    }
                }
                Expansion::DeadEnd(rejection) => self.rejections.push((priority, rejection)),
            }
        }

        if let Some(solution) = self.complete.first() {
            let command = solution.node().unwrap_or(self.root);
            let path = solution.path().to_vec();
            tracing::debug!(path = ?path, expansions, "resolved");
            return Ok(Resolution {
                command,
                path,
                bindings: solution.bindings().clone(),
            });
        }

        let error = self.failure(input);
        tracing::debug!(error = %error, expansions, "resolution failed");
        Err(error)
    }

    fn classify(&mut self, state: SearchState<'t>) {
        if state.is_invalid() {
            self.invalid.push(state);
        } else if state.is_complete() {
            self.complete.push(state);
        } else {
            self.frontier.push(state);
        }
    }

    fn best_priority(&self) -> usize {
        self.closed.iter().map(SearchState::priority).max().unwrap_or(0)
    }

    fn understood(&self, input: &[String]) -> Vec<String> {
        input[..self.best_priority().min(input.len())].to_vec()
    }

    fn rejections_at(&self, priority: usize) -> impl Iterator<Item = &Rejection> {
        self.rejections
            .iter()
            .filter(move |(at, _)| *at == priority)
            .map(|(_, rejection)| rejection)
    }

    fn offending_tokens(
        &self,
        priority: usize,
        token_of: fn(&RejectReason) -> Option<&String>,
    ) -> Vec<(String, String)> {
        let mut values: Vec<(String, String)> = Vec::new();
        for rejection in self.rejections_at(priority) {
            if let Some(token) = token_of(&rejection.reason) {
                let pair = (rejection.argument.clone(), token.clone());
                if !values.contains(&pair) {
                    values.push(pair);
                }
            }
        }
        values
    }

    /// Diagnose from the most advanced point any branch reached.
    fn failure(&self, input: &[String]) -> ResolveError {
        let best = self.best_priority().min(input.len());
        let understood = input[..best].to_vec();
        let remainder = input[best..].to_vec();
        let mut values = self.offending_tokens(best, invalid_token);
        if values.is_empty() {
            values = self.offending_tokens(best, unexpected_name);
        }
        if !values.is_empty() {
            return ResolveError::InvalidArgumentValue { understood, values };
        }

        if let Some((argument, address)) = self.rejections_at(best).find_map(|r| match &r.reason {
            RejectReason::UnresolvedProxy(address) => Some((r.argument.clone(), address.clone())),
            _ => None,
        }) {
            return ResolveError::ProxyUnresolved {
                understood,
                argument,
                address,
            };
        }

        if self.invalid.iter().any(|s| s.priority() == best + 1) {
            return ResolveError::UnknownSegment {
                understood,
                remainder,
            };
        }

        let mut arguments: Vec<String> = Vec::new();
        for rejection in self.rejections_at(best) {
            let missing = matches!(
                rejection.reason,
                RejectReason::MissingInput
                    | RejectReason::MissingSetting(_)
                    | RejectReason::UnboundParent
            );
            if missing && !arguments.contains(&rejection.argument) {
                arguments.push(rejection.argument.clone());
            }
        }
        if !arguments.is_empty() {
            return ResolveError::MissingRequiredArgument {
                understood,
                arguments,
            };
        }

        ResolveError::UnknownSegment {
            understood,
            remainder,
        }
    }
}

fn invalid_token(reason: &RejectReason) -> Option<&String> {
    match reason {
        RejectReason::InvalidValue(token) => Some(token),
        _ => None,
    }
}

fn unexpected_name(reason: &RejectReason) -> Option<&String> {
    match reason {
        RejectReason::ExpectedName(token) => Some(token),
        _ => None,
    }
}
