//! Candidates an argument offers for the fragment under the cursor.

use crate::complete::{deadline_from_now, match_candidates, Completion, CompletionList};
use crate::resolve::SearchState;
use crate::subject::Context;

use super::argument::{ArgKind, ArgRef, Decoration, Domain};

impl<'t> ArgRef<'t> {
    /// Completions for `prefix`, with `state` positioned at this argument.
    pub(crate) fn complete(
        &self,
        prefix: &str,
        state: &SearchState<'t>,
        cx: &Context<'_>,
    ) -> CompletionList {
        match self.layer() {
            Some(Decoration::Named) => {
                let mut list = CompletionList::new(prefix);
                if self.name().starts_with(prefix) {
                    list.push(Completion::new(self.name(), 1.0, vec![0..prefix.len()]));
                }
                list
            }
            Some(Decoration::Optional) | Some(Decoration::Settable) => CompletionList::new(prefix),
            Some(_) => self.deeper().complete(prefix, state, cx),
            None => self.complete_base(prefix, state, cx),
        }
    }

    fn complete_base(
        &self,
        prefix: &str,
        state: &SearchState<'t>,
        cx: &Context<'_>,
    ) -> CompletionList {
        let subject = cx.subject;
        let fuzzy = self.fuzzy();
        // Computing the candidates counts against the budget too.
        let deadline = deadline_from_now(cx.deadline);
        let accept = |candidate: &str| self.validate(candidate, subject);
        match self.argument().kind() {
            ArgKind::Choices(domain) => {
                match_candidates(prefix, domain.realize(subject), fuzzy, deadline, accept)
            }
            ArgKind::Lookup { source, .. } => {
                match_candidates(prefix, source(prefix, subject), fuzzy, deadline, accept)
            }
            ArgKind::File(basis) => match_candidates(
                prefix,
                basis.candidates(prefix, fuzzy),
                fuzzy,
                deadline,
                accept,
            ),
            ArgKind::Multiword(step) => {
                let terms: Vec<String> = state
                    .accumulator(&self.key())
                    .and_then(|acc| acc.values.get(self.name()))
                    .map(|items| items.iter().map(|v| v.to_string()).collect())
                    .unwrap_or_default();
                let offered = step(&terms, Some(prefix), subject).completions;
                match_candidates(prefix, offered, fuzzy, deadline, |_| true)
            }
            ArgKind::Number(_) | ArgKind::Pattern(_) => {
                let mut list = CompletionList::new(prefix);
                if !prefix.is_empty() && self.validate(prefix, subject) {
                    list.push(Completion::new(prefix, 1.0, vec![0..prefix.len()]));
                }
                list.with_hint(self.hint())
            }
            ArgKind::Text { hint } | ArgKind::RestOfLine { hint } => {
                CompletionList::new(prefix).with_hint(if hint.is_empty() {
                    self.hint()
                } else {
                    hint.clone()
                })
            }
            ArgKind::Proxy { .. }
            | ArgKind::Parent
            | ArgKind::Alternating { .. }
            | ArgKind::Concatenated { .. } => CompletionList::new(prefix),
        }
    }

    /// Placeholder text shown when there is nothing to enumerate.
    fn hint(&self) -> String {
        match self.argument().kind() {
            ArgKind::Number(domain) => match domain {
                Domain::Fixed(range) => {
                    format!("<{}: {}..{}>", self.name(), range.start(), range.end())
                }
                Domain::Deferred(_) => format!("<{}: number>", self.name()),
            },
            ArgKind::Pattern(regex) => format!("<{}: /{}/>", self.name(), regex.as_str()),
            _ => format!("<{}>", self.name()),
        }
    }
}
