//! The command tree and its builder.

use crate::args::{Argument, Decoration};

use super::error::BuildError;

/// A node of the command tree. Immutable once built.
#[derive(Debug, Clone)]
pub struct Command {
    name: String,
    arguments: Vec<Argument>,
    children: Vec<Command>,
    documentation: Option<String>,
}

impl Command {
    pub fn builder(name: impl Into<String>) -> CommandBuilder {
        CommandBuilder::new(name)
    }

    /// Builder for an unnamed tree root.
    pub fn root() -> CommandBuilder {
        CommandBuilder::new("")
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_root(&self) -> bool {
        self.name.is_empty()
    }

    /// Effective argument list, merged and in consumption order.
    pub fn arguments(&self) -> &[Argument] {
        &self.arguments
    }

    pub fn children(&self) -> &[Command] {
        &self.children
    }

    pub fn doc_text(&self) -> Option<&str> {
        self.documentation.as_deref()
    }

    pub fn argument(&self, name: &str) -> Option<&Argument> {
        self.arguments.iter().find(|arg| arg.name() == name)
    }

    /// Exact-name child lookup.
    pub fn select_child(&self, token: &str) -> Option<&Command> {
        self.children.iter().find(|child| child.name == token)
    }

    /// Descendant at `path`; the empty path is `self`.
    pub fn find<S: AsRef<str>>(&self, path: &[S]) -> Option<&Command> {
        path.iter()
            .try_fold(self, |node, segment| node.select_child(segment.as_ref()))
    }

    pub fn child_names(&self) -> impl Iterator<Item = &str> {
        self.children.iter().map(|child| child.name.as_str())
    }

    pub fn required_arguments(&self) -> impl Iterator<Item = &Argument> {
        self.arguments.iter().filter(|arg| arg.required())
    }

    pub fn has_settings(&self) -> bool {
        self.arguments
            .iter()
            .any(|arg| arg.has_feature(Decoration::Settable))
    }
}

/// Assembles a [`Command`] from argument contributions and child builders.
///
/// Each call to [`CommandBuilder::contribute`] adds a rule-set; arguments
/// of the same name across rule-sets are merged at build time. Children
/// with the same name are merged recursively.
#[derive(Debug, Clone)]
pub struct CommandBuilder {
    name: String,
    contributions: Vec<Vec<Argument>>,
    children: Vec<CommandBuilder>,
    documentation: Option<String>,
}

impl CommandBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            contributions: Vec::new(),
            children: Vec::new(),
            documentation: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add an argument to this builder's own rule-set.
    pub fn argument(mut self, argument: Argument) -> Self {
        match self.contributions.first_mut() {
            Some(own) => own.push(argument),
            None => self.contributions.push(vec![argument]),
        }
        self
    }

    /// Add a separate rule-set.
    pub fn contribute(mut self, arguments: impl IntoIterator<Item = Argument>) -> Self {
        self.contributions.push(arguments.into_iter().collect());
        self
    }

    pub fn doc(mut self, text: impl Into<String>) -> Self {
        self.documentation = Some(text.into());
        self
    }

    pub fn child(mut self, child: CommandBuilder) -> Self {
        self.add_child(child);
        self
    }

    pub(crate) fn add_child(&mut self, child: CommandBuilder) {
        match self.children.iter_mut().find(|c| c.name == child.name) {
            Some(existing) => existing.absorb(child),
            None => self.children.push(child),
        }
    }

    pub(crate) fn child_builders(&self) -> &[CommandBuilder] {
        &self.children
    }

    fn absorb(&mut self, other: CommandBuilder) {
        self.contributions.extend(other.contributions);
        if self.documentation.is_none() {
            self.documentation = other.documentation;
        }
        for child in other.children {
            self.add_child(child);
        }
    }

    pub fn build(self) -> Result<Command, BuildError> {
        let mut arguments: Vec<Argument> = Vec::new();
        for argument in self.contributions.into_iter().flatten() {
            match arguments.iter_mut().find(|a| a.name() == argument.name()) {
                Some(existing) => *existing = existing.merge(&argument)?,
                None => arguments.push(argument),
            }
        }
        arguments.sort_by_key(Argument::sort_key);

        let children = self
            .children
            .into_iter()
            .map(CommandBuilder::build)
            .collect::<Result<Vec<_>, _>>()?;

        tracing::trace!(
            command = %self.name,
            arguments = arguments.len(),
            children = children.len(),
            "built command"
        );
        Ok(Command {
            name: self.name,
            arguments,
            children,
            documentation: self.documentation,
        })
    }
}
