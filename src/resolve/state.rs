//! Search states.
//!
//! A [`SearchState`] is one candidate parse. Every field is an owned value
//! or a shared reference into the immutable command tree, so
//! [`SearchState::fork`] is a deep copy: no two states ever share a
//! mutable collection.

use std::collections::{BTreeMap, VecDeque};
use std::fmt;

use crate::args::{ArgRef, Bindings, Decoration, Value};
use crate::command::Command;

/// Per-argument scratch space for arguments that consume over several
/// expansions (repeating, multiword).
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Accumulator {
    pub(crate) values: BTreeMap<String, Vec<Value>>,
    pub(crate) last_cursor: Option<usize>,
}

/// Why an expansion produced no successors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    /// Input ran out before the argument was satisfied.
    MissingInput,
    /// The token failed the argument's validation.
    InvalidValue(String),
    /// A named argument saw a token other than its name.
    ExpectedName(String),
    /// The settings store has no table for the command path.
    MissingSetting(Vec<String>),
    /// No bound argument for a parent reference.
    UnboundParent,
    /// The proxy's address does not lead to a settable argument.
    UnresolvedProxy(String),
}

/// A dead end, recorded for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub argument: String,
    pub reason: RejectReason,
}

impl Rejection {
    pub(crate) fn new(argument: &str, reason: RejectReason) -> Self {
        Self {
            argument: argument.to_string(),
            reason,
        }
    }
}

/// Result of expanding one state.
#[derive(Debug)]
pub(crate) enum Expansion<'t> {
    Branches(Vec<SearchState<'t>>),
    DeadEnd(Rejection),
}

impl<'t> Expansion<'t> {
    pub(crate) fn single(state: SearchState<'t>) -> Self {
        Expansion::Branches(vec![state])
    }

    pub(crate) fn dead(argument: &str, reason: RejectReason) -> Self {
        Expansion::DeadEnd(Rejection::new(argument, reason))
    }
}

/// One candidate partial-or-complete parse.
#[derive(Clone)]
pub struct SearchState<'t> {
    root: &'t Command,
    node: Option<&'t Command>,
    input: &'t [String],
    cursor: usize,
    path: Vec<String>,
    parsed: Vec<String>,
    unsatisfied: VecDeque<ArgRef<'t>>,
    bindings: Bindings,
    accumulators: BTreeMap<String, Accumulator>,
}

impl<'t> SearchState<'t> {
    /// Initial state at `root` over the whole input. The root's settable
    /// arguments are queued so global settings are bound on every path.
    pub fn initial(root: &'t Command, input: &'t [String]) -> Self {
        let unsatisfied = root
            .arguments()
            .iter()
            .filter(|arg| arg.has_feature(Decoration::Settable))
            .map(|arg| arg.view())
            .collect();
        Self {
            root,
            node: Some(root),
            input,
            cursor: 0,
            path: Vec::new(),
            parsed: Vec::new(),
            unsatisfied,
            bindings: Bindings::new(),
            accumulators: BTreeMap::new(),
        }
    }

    /// Independent copy of this state.
    pub fn fork(&self) -> Self {
        self.clone()
    }

    /// Tokens consumed so far.
    pub fn priority(&self) -> usize {
        self.cursor
    }

    pub fn root(&self) -> &'t Command {
        self.root
    }

    pub fn node(&self) -> Option<&'t Command> {
        self.node
    }

    /// Command path tokens consumed so far.
    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// Every token consumed so far, command names and argument values.
    pub fn parsed(&self) -> &[String] {
        &self.parsed
    }

    pub fn remaining(&self) -> &'t [String] {
        &self.input[self.cursor.min(self.input.len())..]
    }

    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    pub fn into_bindings(self) -> Bindings {
        self.bindings
    }

    pub fn unsatisfied(&self) -> impl Iterator<Item = ArgRef<'t>> + '_ {
        self.unsatisfied.iter().copied()
    }

    pub fn front(&self) -> Option<ArgRef<'t>> {
        self.unsatisfied.front().copied()
    }

    /// Descended to a token that names no command.
    pub fn is_invalid(&self) -> bool {
        self.node.is_none()
    }

    /// No arguments outstanding and no input left.
    pub fn is_complete(&self) -> bool {
        self.node.is_some() && self.unsatisfied.is_empty() && self.cursor == self.input.len()
    }

    /// Everything but the final fragment has been consumed.
    pub fn is_completing(&self) -> bool {
        self.node.is_some() && self.cursor + 1 == self.input.len()
    }

    pub(crate) fn peek_term(&self) -> Option<&'t str> {
        self.input.get(self.cursor).map(String::as_str)
    }

    pub(crate) fn advance_term(&mut self) -> Option<&'t str> {
        let token = self.input.get(self.cursor)?;
        self.cursor += 1;
        self.parsed.push(token.clone());
        Some(token.as_str())
    }

    /// Consume the next token as a command name. On an unknown name the
    /// state becomes invalid. Returns false if there is no token.
    pub(crate) fn descend(&mut self) -> bool {
        let Some(token) = self.advance_term() else {
            return false;
        };
        self.path.push(token.to_string());
        self.node = self.node.and_then(|node| node.select_child(token));
        self.unsatisfied = match self.node {
            Some(node) => node.arguments().iter().map(|arg| arg.view()).collect(),
            None => VecDeque::new(),
        };
        true
    }

    pub(crate) fn pop_argument(&mut self) -> Option<ArgRef<'t>> {
        self.unsatisfied.pop_front()
    }

    pub(crate) fn push_argument(&mut self, arg: ArgRef<'t>) {
        self.unsatisfied.push_front(arg);
    }

    pub(crate) fn replace_front(&mut self, arg: ArgRef<'t>) {
        match self.unsatisfied.front_mut() {
            Some(front) => *front = arg,
            None => self.unsatisfied.push_front(arg),
        }
    }

    pub(crate) fn bindings_mut(&mut self) -> &mut Bindings {
        &mut self.bindings
    }

    pub(crate) fn take_accumulator(&mut self, key: &str) -> Accumulator {
        self.accumulators.remove(key).unwrap_or_default()
    }

    pub(crate) fn accumulator(&self, key: &str) -> Option<&Accumulator> {
        self.accumulators.get(key)
    }

    pub(crate) fn store_accumulator(&mut self, key: String, accumulator: Accumulator) {
        self.accumulators.insert(key, accumulator);
    }

    /// Swap the command path, returning the previous one.
    pub(crate) fn replace_path(&mut self, path: Vec<String>) -> Vec<String> {
        std::mem::replace(&mut self.path, path)
    }
}

impl fmt::Debug for SearchState<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchState")
            .field("path", &self.path)
            .field("cursor", &self.cursor)
            .field("valid", &self.node.is_some())
            .field("unsatisfied", &self.unsatisfied)
            .field("bindings", &self.bindings)
            .finish()
    }
}
