//! Named command sets, composed explicitly while a tree is being built.

use std::collections::BTreeMap;

use super::error::BuildError;
use super::tree::{Command, CommandBuilder};

/// Holds command sets by name during the build phase.
///
/// A set is a builder whose children are the commands it offers. Sets are
/// copied into a target with [`CommandRegistry::include`]; the registry is
/// consumed by [`CommandRegistry::finish`] so no set outlives the build.
#[derive(Debug, Default)]
pub struct CommandRegistry {
    sets: BTreeMap<String, CommandBuilder>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `set` under `name`. Registering a name twice merges the
    /// sets.
    pub fn register(&mut self, name: impl Into<String>, set: CommandBuilder) {
        let name = name.into();
        match self.sets.get_mut(&name) {
            Some(existing) => {
                for child in set.child_builders().iter().cloned() {
                    existing.add_child(child);
                }
            }
            None => {
                self.sets.insert(name, set);
            }
        }
    }

    pub fn set_names(&self) -> impl Iterator<Item = &str> {
        self.sets.keys().map(String::as_str)
    }

    /// Copy commands from `set` into `target`: all of them when `filters`
    /// is empty, otherwise only the named ones.
    pub fn include(
        &self,
        mut target: CommandBuilder,
        set: &str,
        filters: &[&str],
    ) -> Result<CommandBuilder, BuildError> {
        let source = self
            .sets
            .get(set)
            .ok_or_else(|| BuildError::UnknownCommandSet(set.to_string()))?;

        if filters.is_empty() {
            for child in source.child_builders() {
                target.add_child(child.clone());
            }
            return Ok(target);
        }

        for wanted in filters {
            let child = source
                .child_builders()
                .iter()
                .find(|c| c.name() == *wanted)
                .ok_or_else(|| BuildError::MissingCommand {
                    set: set.to_string(),
                    command: wanted.to_string(),
                })?;
            target.add_child(child.clone());
        }
        Ok(target)
    }

    /// Build `root`, ending the build phase.
    pub fn finish(self, root: CommandBuilder) -> Result<Command, BuildError> {
        tracing::debug!(sets = self.sets.len(), "command sets composed");
        root.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::Argument;

    fn file_set() -> CommandBuilder {
        Command::root()
            .child(Command::builder("open").argument(Argument::text("path", "")))
            .child(Command::builder("close"))
    }

    #[test]
    fn include_all_or_filtered() {
        let mut registry = CommandRegistry::new();
        registry.register("files", file_set());

        let all = registry.include(Command::root(), "files", &[]).unwrap();
        let some = registry
            .include(Command::builder("sub"), "files", &["close"])
            .unwrap();
        let root = registry.finish(all.child(some)).unwrap();

        assert_eq!(
            root.child_names().collect::<Vec<_>>(),
            vec!["open", "close", "sub"]
        );
        let sub = root.select_child("sub").unwrap();
        assert_eq!(sub.child_names().collect::<Vec<_>>(), vec!["close"]);
    }

    #[test]
    fn unknown_set_and_command_fail() {
        let mut registry = CommandRegistry::new();
        registry.register("files", file_set());
        assert!(matches!(
            registry.include(Command::root(), "nope", &[]),
            Err(BuildError::UnknownCommandSet(_))
        ));
        assert!(matches!(
            registry.include(Command::root(), "files", &["save"]),
            Err(BuildError::MissingCommand { .. })
        ));
    }

    #[test]
    fn registering_twice_merges() {
        let mut registry = CommandRegistry::new();
        registry.register("files", file_set());
        registry.register("files", Command::root().child(Command::builder("save")));
        let root = registry
            .include(Command::root(), "files", &[])
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(root.children().len(), 3);
        assert_eq!(registry.set_names().collect::<Vec<_>>(), vec!["files"]);
    }
}
