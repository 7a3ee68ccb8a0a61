//! Argument definitions.
//!
//! An [`Argument`] is a base kind plus an ordered list of decorations,
//! outermost first. Decorations change how the argument consumes input,
//! whether it is required, and how it completes; the base kind supplies
//! the domain that tokens are validated against.

use std::fmt;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use regex::Regex;
use serde::Deserialize;

use crate::command::BuildError;
use crate::subject::Subject;

/// Behaviour-modifying wrappers. Also the capability tags queried with
/// [`Argument::has_feature`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Decoration {
    /// May be omitted; an omitted argument stays unbound.
    Optional,
    /// The argument's name must precede its value on the command line.
    Named,
    /// Consumes one or more values into a list.
    Repeating,
    /// Read from the settings store instead of the command line.
    Settable,
    /// Completes by ordered substring match instead of prefix match.
    SubstringMatch,
}

impl Decoration {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Optional => "optional",
            Self::Named => "named",
            Self::Repeating => "repeating",
            Self::Settable => "settable",
            Self::SubstringMatch => "substring_match",
        }
    }
}

/// A domain that is either fixed at build time or computed from the
/// subject when the argument is used.
#[derive(Clone)]
pub enum Domain<T> {
    Fixed(T),
    Deferred(Arc<dyn Fn(&Subject) -> T + Send + Sync>),
}

impl<T: Clone> Domain<T> {
    pub fn realize(&self, subject: &Subject) -> T {
        match self {
            Domain::Fixed(value) => value.clone(),
            Domain::Deferred(get) => get(subject),
        }
    }
}

impl<T: PartialEq> Domain<T> {
    fn same_basis(&self, other: &Domain<T>) -> bool {
        match (self, other) {
            (Domain::Fixed(a), Domain::Fixed(b)) => a == b,
            (Domain::Deferred(a), Domain::Deferred(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Domain<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Domain::Fixed(value) => write!(f, "{:?}", value),
            Domain::Deferred(_) => write!(f, "<deferred>"),
        }
    }
}

/// Candidate source for lookup arguments: `(prefix, subject) → candidates`.
pub type LookupFn = Arc<dyn Fn(&str, &Subject) -> Vec<String> + Send + Sync>;

/// Step function for multiword arguments:
/// `(accumulated terms, next term, subject) → step`.
pub type StepFn = Arc<dyn Fn(&[String], Option<&str>, &Subject) -> MultiStep + Send + Sync>;

/// Outcome of one multiword step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiStep {
    /// The accumulated terms form an acceptable value as they stand.
    pub accept: bool,
    /// The next term may be appended.
    pub more: bool,
    /// Suggestions for the next term.
    pub completions: Vec<String>,
}

impl MultiStep {
    /// Accepting step that continues whenever there is something to suggest.
    pub fn from_completions(completions: Vec<String>) -> Self {
        Self {
            accept: true,
            more: !completions.is_empty(),
            completions,
        }
    }

    /// Mark the accumulated terms as not acceptable on their own.
    pub fn unacceptable(mut self) -> Self {
        self.accept = false;
        self
    }
}

/// Which paths a file argument accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileAccept {
    #[default]
    IsFile,
    IsDir,
    NotDir,
    Any,
    Exists,
}

impl FileAccept {
    pub fn accepts(&self, path: &Path) -> bool {
        match self {
            FileAccept::IsFile => path.is_file(),
            FileAccept::IsDir => path.is_dir(),
            FileAccept::NotDir => {
                let parent_exists = match path.parent() {
                    Some(parent) if !parent.as_os_str().is_empty() => parent.exists(),
                    _ => true,
                };
                parent_exists && !path.is_dir()
            }
            FileAccept::Any => true,
            FileAccept::Exists => path.exists(),
        }
    }
}

/// Domain of a file argument.
#[derive(Debug, Clone)]
pub struct FileBasis {
    /// Relative paths are resolved against this directory.
    pub dir: PathBuf,
    pub accept: FileAccept,
    /// Entry names matching any of these are never offered.
    pub prune: Vec<Regex>,
}

impl FileBasis {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let prune = Regex::new(r"^\.").map(|re| vec![re]).unwrap_or_default();
        Self {
            dir: dir.into(),
            accept: FileAccept::default(),
            prune,
        }
    }

    pub fn accepting(mut self, accept: FileAccept) -> Self {
        self.accept = accept;
        self
    }

    pub fn pruning(mut self, prune: Vec<Regex>) -> Self {
        self.prune = prune;
        self
    }
}

/// The base behaviour of an argument.
#[derive(Clone)]
pub enum ArgKind {
    /// One of a list of strings.
    Choices(Domain<Vec<String>>),
    /// An integer within a range.
    Number(Domain<RangeInclusive<i64>>),
    /// Any single token.
    Text { hint: String },
    /// A token matching a regular expression.
    Pattern(Regex),
    /// Candidates computed from the prefix; optionally validated against them.
    Lookup { source: LookupFn, validating: bool },
    /// All remaining tokens, joined by spaces.
    RestOfLine { hint: String },
    File(FileBasis),
    /// A variable number of tokens governed by a step function.
    Multiword(StepFn),
    /// Delegates to the settable argument addressed by another binding.
    Proxy { address: String },
    /// Satisfied when an ancestor already bound the same name.
    Parent,
    /// Exactly one child consumes the next token.
    Alternating {
        children: Vec<Argument>,
        binds_name: bool,
    },
    /// All children, in order.
    Concatenated { children: Vec<Argument> },
}

impl ArgKind {
    fn label(&self) -> &'static str {
        match self {
            ArgKind::Choices(_) => "choices",
            ArgKind::Number(_) => "number",
            ArgKind::Text { .. } => "text",
            ArgKind::Pattern(_) => "pattern",
            ArgKind::Lookup { .. } => "lookup",
            ArgKind::RestOfLine { .. } => "rest",
            ArgKind::File(_) => "file",
            ArgKind::Multiword(_) => "multiword",
            ArgKind::Proxy { .. } => "proxy",
            ArgKind::Parent => "parent",
            ArgKind::Alternating { .. } => "alternating",
            ArgKind::Concatenated { .. } => "concatenated",
        }
    }

    fn same_basis(&self, other: &ArgKind) -> bool {
        match (self, other) {
            (ArgKind::Choices(a), ArgKind::Choices(b)) => a.same_basis(b),
            (ArgKind::Number(a), ArgKind::Number(b)) => a.same_basis(b),
            (ArgKind::Text { .. }, ArgKind::Text { .. }) => true,
            (ArgKind::Pattern(a), ArgKind::Pattern(b)) => a.as_str() == b.as_str(),
            (
                ArgKind::Lookup {
                    source: a,
                    validating: va,
                },
                ArgKind::Lookup {
                    source: b,
                    validating: vb,
                },
            ) => Arc::ptr_eq(a, b) && va == vb,
            (ArgKind::RestOfLine { .. }, ArgKind::RestOfLine { .. }) => true,
            (ArgKind::File(a), ArgKind::File(b)) => a.dir == b.dir && a.accept == b.accept,
            (ArgKind::Multiword(a), ArgKind::Multiword(b)) => Arc::ptr_eq(a, b),
            (ArgKind::Proxy { address: a }, ArgKind::Proxy { address: b }) => a == b,
            (ArgKind::Parent, ArgKind::Parent) => true,
            (
                ArgKind::Alternating { children: a, .. },
                ArgKind::Alternating { children: b, .. },
            )
            | (ArgKind::Concatenated { children: a }, ArgKind::Concatenated { children: b }) => {
                a.len() == b.len()
                    && a
                        .iter()
                        .zip(b)
                        .all(|(x, y)| x.name == y.name && x.kind.same_basis(&y.kind))
            }
            _ => false,
        }
    }
}

impl fmt::Debug for ArgKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgKind::Choices(d) => write!(f, "Choices({:?})", d),
            ArgKind::Number(d) => write!(f, "Number({:?})", d),
            ArgKind::Text { hint } => write!(f, "Text({:?})", hint),
            ArgKind::Pattern(re) => write!(f, "Pattern({:?})", re.as_str()),
            ArgKind::Lookup { validating, .. } => write!(f, "Lookup(validating: {})", validating),
            ArgKind::RestOfLine { .. } => write!(f, "RestOfLine"),
            ArgKind::File(basis) => write!(f, "File({:?})", basis.dir),
            ArgKind::Multiword(_) => write!(f, "Multiword"),
            ArgKind::Proxy { address } => write!(f, "Proxy({})", address),
            ArgKind::Parent => write!(f, "Parent"),
            ArgKind::Alternating { children, .. } => {
                f.debug_tuple("Alternating").field(children).finish()
            }
            ArgKind::Concatenated { children } => {
                f.debug_tuple("Concatenated").field(children).finish()
            }
        }
    }
}

/// A named rule for one input slot.
#[derive(Clone, Debug)]
pub struct Argument {
    name: String,
    kind: ArgKind,
    decorations: Vec<Decoration>,
}

impl Argument {
    pub fn new(name: impl Into<String>, kind: ArgKind) -> Self {
        Self {
            name: name.into(),
            kind,
            decorations: Vec::new(),
        }
    }

    pub fn choices<I, S>(name: impl Into<String>, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let list = choices.into_iter().map(Into::into).collect();
        Self::new(name, ArgKind::Choices(Domain::Fixed(list)))
    }

    /// Choices computed from the subject at resolution time.
    pub fn choices_from<F>(name: impl Into<String>, get: F) -> Self
    where
        F: Fn(&Subject) -> Vec<String> + Send + Sync + 'static,
    {
        Self::new(name, ArgKind::Choices(Domain::Deferred(Arc::new(get))))
    }

    pub fn number(name: impl Into<String>, range: RangeInclusive<i64>) -> Self {
        Self::new(name, ArgKind::Number(Domain::Fixed(range)))
    }

    /// Number whose range is computed from the subject.
    pub fn number_from<F>(name: impl Into<String>, get: F) -> Self
    where
        F: Fn(&Subject) -> RangeInclusive<i64> + Send + Sync + 'static,
    {
        Self::new(name, ArgKind::Number(Domain::Deferred(Arc::new(get))))
    }

    pub fn text(name: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::new(name, ArgKind::Text { hint: hint.into() })
    }

    pub fn pattern(name: impl Into<String>, pattern: &str) -> Result<Self, BuildError> {
        let name = name.into();
        let regex = Regex::new(pattern).map_err(|e| BuildError::InvalidPattern {
            name: name.clone(),
            source: e,
        })?;
        Ok(Self::new(name, ArgKind::Pattern(regex)))
    }

    pub fn lookup<F>(name: impl Into<String>, source: F) -> Self
    where
        F: Fn(&str, &Subject) -> Vec<String> + Send + Sync + 'static,
    {
        Self::new(
            name,
            ArgKind::Lookup {
                source: Arc::new(source),
                validating: true,
            },
        )
    }

    /// Lookup that offers candidates but accepts any token.
    pub fn nonvalidating_lookup<F>(name: impl Into<String>, source: F) -> Self
    where
        F: Fn(&str, &Subject) -> Vec<String> + Send + Sync + 'static,
    {
        Self::new(
            name,
            ArgKind::Lookup {
                source: Arc::new(source),
                validating: false,
            },
        )
    }

    pub fn rest_of_line(name: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::new(name, ArgKind::RestOfLine { hint: hint.into() })
    }

    pub fn file(name: impl Into<String>, basis: FileBasis) -> Self {
        Self::new(name, ArgKind::File(basis))
    }

    pub fn multiword<F>(name: impl Into<String>, step: F) -> Self
    where
        F: Fn(&[String], Option<&str>, &Subject) -> MultiStep + Send + Sync + 'static,
    {
        Self::new(name, ArgKind::Multiword(Arc::new(step)))
    }

    /// Proxy for the settable argument whose path is bound under `address`.
    pub fn proxy(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self::new(
            name,
            ArgKind::Proxy {
                address: address.into(),
            },
        )
    }

    pub fn parent(name: impl Into<String>) -> Self {
        Self::new(name, ArgKind::Parent)
    }

    /// Alternation over `children`. Unnamed until [`Argument::with_name`].
    pub fn alternating(children: Vec<Argument>) -> Self {
        let name = format!("({})", join_names(&children, "|"));
        Self::new(
            name,
            ArgKind::Alternating {
                children,
                binds_name: false,
            },
        )
    }

    pub fn concatenated(children: Vec<Argument>) -> Self {
        let name = format!("({})", join_names(&children, " "));
        Self::new(name, ArgKind::Concatenated { children })
    }

    /// Rename. A renamed alternation also binds the winning token under
    /// its own name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        if let ArgKind::Alternating { binds_name, .. } = &mut self.kind {
            *binds_name = true;
        }
        self
    }

    /// Wrap in `decoration`, which becomes the outermost layer.
    pub fn decorate(mut self, decoration: Decoration) -> Self {
        self.decorations.insert(0, decoration);
        self
    }

    pub fn optional(self) -> Self {
        self.decorate(Decoration::Optional)
    }

    pub fn named(self) -> Self {
        self.decorate(Decoration::Named)
    }

    pub fn repeating(self) -> Self {
        self.decorate(Decoration::Repeating)
    }

    pub fn settable(self) -> Self {
        self.decorate(Decoration::Settable)
    }

    pub fn substring_match(self) -> Self {
        self.decorate(Decoration::SubstringMatch)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &ArgKind {
        &self.kind
    }

    /// Decorations, outermost first.
    pub fn decorations(&self) -> &[Decoration] {
        &self.decorations
    }

    /// Every name this argument can bind, its own first.
    pub fn names(&self) -> Vec<String> {
        match &self.kind {
            ArgKind::Alternating {
                children,
                binds_name,
            } => {
                let mut names = if *binds_name {
                    vec![self.name.clone()]
                } else {
                    Vec::new()
                };
                names.extend(children.iter().flat_map(Argument::names));
                names
            }
            ArgKind::Concatenated { children } => {
                children.iter().flat_map(Argument::names).collect()
            }
            _ => vec![self.name.clone()],
        }
    }

    pub fn has_feature(&self, feature: Decoration) -> bool {
        self.view().has_feature(feature)
    }

    pub fn required(&self) -> bool {
        self.view().required()
    }

    /// View of the full decoration chain.
    pub fn view(&self) -> ArgRef<'_> {
        ArgRef {
            arg: self,
            depth: 0,
        }
    }

    /// View with decorations stripped down to and including `feature`.
    pub fn unwrap(&self, feature: Decoration) -> ArgRef<'_> {
        self.view().unwrap(feature)
    }

    /// Same kind over the same domain, regardless of decoration.
    pub fn same_basis(&self, other: &Argument) -> bool {
        self.kind.same_basis(&other.kind)
    }

    /// Merge a second definition of this argument. The first definition
    /// wins when both share a basis.
    pub fn merge(&self, other: &Argument) -> Result<Argument, BuildError> {
        if self.name == other.name && self.same_basis(other) {
            Ok(self.clone())
        } else {
            Err(BuildError::CantMergeArguments {
                name: self.name.clone(),
                first: self.view().to_string(),
                second: other.view().to_string(),
            })
        }
    }

    /// Settable first, then required before optional, then single before
    /// repeating.
    pub(crate) fn sort_key(&self) -> (bool, bool, bool) {
        (
            !self.has_feature(Decoration::Settable),
            self.has_feature(Decoration::Optional),
            self.has_feature(Decoration::Repeating),
        )
    }
}

fn join_names(children: &[Argument], separator: &str) -> String {
    children
        .iter()
        .map(|c| c.name.as_str())
        .collect::<Vec<_>>()
        .join(separator)
}

/// An argument seen from a given decoration depth.
///
/// Depth 0 is the full chain; each decorator that hands control to the
/// argument it wraps does so by producing the view one layer deeper.
/// Views are cheap copies of a reference into the immutable tree.
#[derive(Clone, Copy)]
pub struct ArgRef<'t> {
    arg: &'t Argument,
    depth: usize,
}

impl<'t> ArgRef<'t> {
    pub fn argument(&self) -> &'t Argument {
        self.arg
    }

    pub fn name(&self) -> &'t str {
        &self.arg.name
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// The outermost decoration still in effect, if any.
    pub fn layer(&self) -> Option<Decoration> {
        self.arg.decorations.get(self.depth).copied()
    }

    /// The decorated argument.
    pub fn deeper(&self) -> ArgRef<'t> {
        ArgRef {
            arg: self.arg,
            depth: (self.depth + 1).min(self.arg.decorations.len()),
        }
    }

    /// The undecorated base argument.
    pub fn base(&self) -> ArgRef<'t> {
        ArgRef {
            arg: self.arg,
            depth: self.arg.decorations.len(),
        }
    }

    fn remaining(&self) -> &'t [Decoration] {
        &self.arg.decorations[self.depth.min(self.arg.decorations.len())..]
    }

    pub fn has_feature(&self, feature: Decoration) -> bool {
        self.remaining().contains(&feature)
    }

    pub fn unwrap(&self, feature: Decoration) -> ArgRef<'t> {
        match self.remaining().iter().position(|d| *d == feature) {
            Some(offset) => ArgRef {
                arg: self.arg,
                depth: self.depth + offset + 1,
            },
            None => *self,
        }
    }

    /// Optional and settable arguments may be left unbound.
    pub fn required(&self) -> bool {
        !(self.has_feature(Decoration::Optional) || self.has_feature(Decoration::Settable))
    }

    /// Whether completion uses substring matching. Applies from any layer.
    pub(crate) fn fuzzy(&self) -> bool {
        self.arg.decorations.contains(&Decoration::SubstringMatch)
    }

    /// Key for per-layer search bookkeeping.
    pub(crate) fn key(&self) -> String {
        format!("{}@{}", self.arg.name, self.depth)
    }
}

impl PartialEq for ArgRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.arg, other.arg) && self.depth == other.depth
    }
}

impl fmt::Display for ArgRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let layers = self.remaining();
        for layer in layers {
            write!(f, "{}(", layer.as_str())?;
        }
        write!(f, "{}:{}", self.arg.kind.label(), self.arg.name)?;
        for _ in layers {
            write!(f, ")")?;
        }
        Ok(())
    }
}

impl fmt::Debug for ArgRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}
