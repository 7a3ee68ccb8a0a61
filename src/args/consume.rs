//! How arguments consume input during the search.
//!
//! `consume` takes ownership of a state whose queue front is the argument
//! being consumed and returns its successors. Decorations are peeled one
//! layer at a time: each decorator either handles the state itself or
//! replaces the queue front with the argument it wraps.

use crate::resolve::{Accumulator, Expansion, RejectReason, SearchState};
use crate::subject::{Context, Subject};

use super::argument::{ArgKind, ArgRef, Argument, Decoration};
use super::value::Value;

impl<'t> ArgRef<'t> {
    /// Expand `state`, whose queue front is `self`.
    pub(crate) fn consume(self, mut state: SearchState<'t>, cx: &Context<'_>) -> Expansion<'t> {
        match self.layer() {
            Some(Decoration::SubstringMatch) => {
                let inner = self.deeper();
                state.replace_front(inner);
                inner.consume(state, cx)
            }
            Some(Decoration::Optional) => {
                let mut with = state.fork();
                with.replace_front(self.deeper());
                state.pop_argument();
                Expansion::Branches(vec![with, state])
            }
            Some(Decoration::Named) => self.consume_name(state),
            Some(Decoration::Repeating) => self.consume_repeat(state),
            Some(Decoration::Settable) => self.consume_setting(state, cx.subject),
            None => self.consume_base(state, cx),
        }
    }

    fn consume_name(self, mut state: SearchState<'t>) -> Expansion<'t> {
        match state.peek_term() {
            None => Expansion::dead(self.name(), RejectReason::MissingInput),
            Some(token) if token == self.name() => {
                state.advance_term();
                state.replace_front(self.deeper());
                Expansion::single(state)
            }
            Some(token) => Expansion::dead(self.name(), RejectReason::ExpectedName(token.into())),
        }
    }

    /// Each visit folds whatever the wrapped argument bound since the last
    /// visit into the accumulator, then offers to go again (only if input
    /// was consumed since last time) and to stop (only once something was
    /// collected, unless the wrapped argument may itself be omitted).
    fn consume_repeat(self, mut state: SearchState<'t>) -> Expansion<'t> {
        let key = self.key();
        let cursor = state.priority();
        let mut acc = state.take_accumulator(&key);
        for name in self.argument().names() {
            if let Some(value) = state.bindings_mut().remove(&name) {
                acc.values.entry(name).or_default().extend(value.into_items());
            }
        }

        let progressed = acc.last_cursor.is_none_or(|last| last < cursor);
        let may_stop = !acc.values.is_empty() || !self.deeper().required();
        let mut branches = Vec::with_capacity(2);

        if progressed {
            let mut again = state.fork();
            again.push_argument(self.deeper());
            again.store_accumulator(
                key,
                Accumulator {
                    values: acc.values.clone(),
                    last_cursor: Some(cursor),
                },
            );
            branches.push(again);
        }
        if may_stop {
            state.pop_argument();
            for (name, values) in acc.values {
                state.bindings_mut().insert(name, Value::List(values));
            }
            branches.push(state);
        }

        if branches.is_empty() {
            Expansion::dead(self.name(), RejectReason::MissingInput)
        } else {
            Expansion::Branches(branches)
        }
    }

    fn consume_setting(self, mut state: SearchState<'t>, subject: &Subject) -> Expansion<'t> {
        match subject.knobs().lookup(state.path(), self.name()) {
            None => Expansion::dead(
                self.name(),
                RejectReason::MissingSetting(state.path().to_vec()),
            ),
            Some(value) => {
                if let Some(value) = value {
                    state.bindings_mut().insert(self.name(), value);
                }
                state.pop_argument();
                Expansion::single(state)
            }
        }
    }

    fn consume_base(self, mut state: SearchState<'t>, cx: &Context<'_>) -> Expansion<'t> {
        let arg = self.argument();
        match arg.kind() {
            ArgKind::RestOfLine { .. } => {
                if state.remaining().is_empty() {
                    return Expansion::dead(arg.name(), RejectReason::MissingInput);
                }
                let mut words = Vec::new();
                while let Some(token) = state.advance_term() {
                    words.push(token);
                }
                state.bindings_mut().merge(arg.name(), Value::Text(words.join(" ")));
                state.pop_argument();
                Expansion::single(state)
            }
            ArgKind::Multiword(_) => self.consume_words(state, cx.subject),
            ArgKind::Proxy { address } => self.consume_proxy(address, state, cx),
            ArgKind::Parent => {
                if state.bindings().contains(arg.name()) {
                    state.pop_argument();
                    Expansion::single(state)
                } else {
                    Expansion::dead(arg.name(), RejectReason::UnboundParent)
                }
            }
            ArgKind::Alternating {
                children,
                binds_name,
            } => {
                if *binds_name {
                    if let Some(token) = state.peek_term() {
                        state.bindings_mut().merge(arg.name(), Value::from(token));
                    }
                }
                state.pop_argument();
                let branches = children
                    .iter()
                    .map(|child| {
                        let mut branch = state.fork();
                        branch.push_argument(child.view());
                        branch
                    })
                    .collect();
                Expansion::Branches(branches)
            }
            ArgKind::Concatenated { children } => {
                state.pop_argument();
                for child in children.iter().rev() {
                    state.push_argument(child.view());
                }
                Expansion::single(state)
            }
            _ => {
                let Some(token) = state.peek_term() else {
                    return Expansion::dead(arg.name(), RejectReason::MissingInput);
                };
                if !self.validate(token, cx.subject) {
                    return Expansion::dead(arg.name(), RejectReason::InvalidValue(token.into()));
                }
                state.advance_term();
                state.bindings_mut().merge(arg.name(), parse_value(arg, token));
                state.pop_argument();
                Expansion::single(state)
            }
        }
    }

    /// Takes one term per expansion. The argument stays at the queue front
    /// while the step function allows more, and is popped as a stop branch
    /// whenever the terms so far are acceptable, including none at all.
    fn consume_words(self, mut state: SearchState<'t>, subject: &Subject) -> Expansion<'t> {
        let ArgKind::Multiword(step) = self.argument().kind() else {
            return Expansion::Branches(Vec::new());
        };
        let name = self.name();
        let key = self.key();

        let mut acc = state.take_accumulator(&key);
        let mut terms: Vec<String> = acc
            .values
            .get(name)
            .map(|items| items.iter().map(|v| v.to_string()).collect())
            .unwrap_or_default();

        let mut branches = Vec::with_capacity(3);
        if terms.is_empty() && step(&terms, None, subject).accept {
            let mut empty = state.fork();
            empty.bindings_mut().insert(name, Value::List(Vec::new()));
            empty.pop_argument();
            branches.push(empty);
        }

        let Some(token) = state.peek_term() else {
            if branches.is_empty() {
                return Expansion::dead(name, RejectReason::MissingInput);
            }
            return Expansion::Branches(branches);
        };
        if !step(&terms, Some(token), subject).more {
            if branches.is_empty() {
                return Expansion::dead(name, RejectReason::InvalidValue(token.into()));
            }
            return Expansion::Branches(branches);
        }
        state.advance_term();
        terms.push(token.to_string());
        let after = step(&terms, None, subject);

        let items: Vec<Value> = terms.iter().map(|t| Value::from(t.as_str())).collect();
        if after.more && !state.remaining().is_empty() {
            let mut again = state.fork();
            acc.values.insert(name.to_string(), items.clone());
            again.store_accumulator(key, acc);
            branches.push(again);
        }
        if after.accept {
            state.bindings_mut().insert(name, Value::List(items));
            state.pop_argument();
            branches.push(state);
        }
        Expansion::Branches(branches)
    }

    fn consume_proxy(
        self,
        address: &str,
        mut state: SearchState<'t>,
        cx: &Context<'_>,
    ) -> Expansion<'t> {
        let Some((path, principal)) = principal(address, &state) else {
            return Expansion::dead(
                self.name(),
                RejectReason::UnresolvedProxy(address.to_string()),
            );
        };
        let alias = self.name();
        let target = principal.base();
        let outer_path = state.replace_path(path);
        let shadowed = state.bindings_mut().remove(target.name());
        state.replace_front(target);

        match target.consume(state, cx) {
            Expansion::Branches(branches) => Expansion::Branches(
                branches
                    .into_iter()
                    .map(|mut branch| {
                        if let Some(value) = branch.bindings_mut().remove(target.name()) {
                            branch.bindings_mut().insert(alias, value);
                        }
                        if let Some(value) = shadowed.clone() {
                            branch.bindings_mut().insert(target.name(), value);
                        }
                        branch.replace_path(outer_path.clone());
                        branch
                    })
                    .collect(),
            ),
            dead => dead,
        }
    }

    /// Completion-time expansion. Returns the states to keep exploring, or
    /// hands the state back when this argument should produce candidates
    /// itself.
    pub(crate) fn fan_out(
        self,
        mut state: SearchState<'t>,
        cx: &Context<'_>,
    ) -> Result<Vec<SearchState<'t>>, SearchState<'t>> {
        match self.layer() {
            Some(Decoration::SubstringMatch) => {
                let inner = self.deeper();
                state.replace_front(inner);
                inner.fan_out(state, cx)
            }
            Some(Decoration::Settable) => {
                state.pop_argument();
                Ok(vec![state])
            }
            Some(Decoration::Optional) | Some(Decoration::Repeating) => {
                Ok(branches_of(self.consume(state, cx)))
            }
            Some(Decoration::Named) => Err(state),
            None => match self.argument().kind() {
                ArgKind::Alternating { .. } | ArgKind::Concatenated { .. } | ArgKind::Parent => {
                    Ok(branches_of(self.consume(state, cx)))
                }
                ArgKind::Proxy { address } => match principal(address, &state) {
                    Some((_, principal)) => {
                        state.replace_front(principal.base());
                        Ok(vec![state])
                    }
                    None => Ok(Vec::new()),
                },
                _ => Err(state),
            },
        }
    }

    /// Is `token` acceptable for this argument's domain.
    pub fn validate(&self, token: &str, subject: &Subject) -> bool {
        if self.layer().is_some() {
            return self.deeper().validate(token, subject);
        }
        match self.argument().kind() {
            ArgKind::Choices(domain) => domain.realize(subject).iter().any(|c| c == token),
            ArgKind::Number(domain) => token
                .parse::<i64>()
                .is_ok_and(|n| domain.realize(subject).contains(&n)),
            ArgKind::Text { .. } | ArgKind::RestOfLine { .. } => true,
            ArgKind::Pattern(regex) => regex.is_match(token),
            ArgKind::Lookup { source, validating } => {
                !*validating || source(token, subject).iter().any(|c| c == token)
            }
            ArgKind::File(basis) => basis.accept.accepts(&basis.resolve(token)),
            ArgKind::Multiword(step) => step(&[], Some(token), subject).more,
            ArgKind::Alternating { children, .. } => {
                children.iter().any(|c| c.view().validate(token, subject))
            }
            ArgKind::Concatenated { children } => children
                .first()
                .is_some_and(|c| c.view().validate(token, subject)),
            ArgKind::Proxy { .. } | ArgKind::Parent => false,
        }
    }
}

fn branches_of(expansion: Expansion<'_>) -> Vec<SearchState<'_>> {
    match expansion {
        Expansion::Branches(branches) => branches,
        Expansion::DeadEnd(_) => Vec::new(),
    }
}

fn parse_value(arg: &Argument, token: &str) -> Value {
    match arg.kind() {
        ArgKind::Number(_) => token
            .parse::<i64>()
            .map(Value::Int)
            .unwrap_or_else(|_| Value::from(token)),
        _ => Value::from(token),
    }
}

/// The settable argument a proxy address points at, with the command
/// path that owns it. The address binding is the command path followed by
/// the argument name.
fn principal<'t>(address: &str, state: &SearchState<'t>) -> Option<(Vec<String>, ArgRef<'t>)> {
    let segments = state.bindings().get(address)?.text_items()?;
    let (name, path) = segments.split_last()?;
    let owner = state.root().find(path)?;
    let arg = owner
        .arguments()
        .iter()
        .find(|arg| arg.name() == name && arg.has_feature(Decoration::Settable))?;
    Some((path.to_vec(), arg.view()))
}
