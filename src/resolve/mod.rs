//! Priority-ordered backtracking search over a command tree.
//!
//! ```text
//! tokens → SearchState (root) → Frontier ⇄ expand → complete | invalid
//! ```
//!
//! [`Resolver`] stops at the first complete state. [`Completer`] keeps
//! going and collects every state positioned at the final fragment.

mod completer;
mod error;
mod frontier;
mod resolver;
mod state;

pub use completer::Completer;
pub use error::ResolveError;
pub use frontier::Frontier;
pub use resolver::{Resolution, Resolver};
pub use state::{RejectReason, Rejection, SearchState};

pub(crate) use state::{Accumulator, Expansion};

use crate::command::Command;
use crate::complete::CompletionList;
use crate::subject::{Context, Subject};

/// One search step: consume the front argument, or descend into a child
/// command when no arguments are outstanding.
pub(crate) fn expand<'t>(mut state: SearchState<'t>, cx: &Context<'_>) -> Expansion<'t> {
    match state.front() {
        Some(arg) => arg.consume(state, cx),
        None => {
            if state.descend() {
                Expansion::single(state)
            } else {
                Expansion::Branches(Vec::new())
            }
        }
    }
}

impl Command {
    /// Resolve `input` with default limits.
    pub fn resolve<'t>(
        &'t self,
        input: &'t [String],
        subject: &'t Subject,
    ) -> Result<Resolution<'t>, ResolveError> {
        Resolver::new(self, subject).resolve(input)
    }

    /// Complete the last token of `input` with default limits.
    pub fn complete(&self, input: &[String], subject: &Subject) -> CompletionList {
        Completer::new(self, subject).complete(input)
    }
}
