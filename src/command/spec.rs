//! Declarative command trees in TOML.
//!
//! ```toml
//! [[arguments]]
//! kind = "settable.number"
//! name = "verbosity"
//! range = [0, 3]
//!
//! [[commands]]
//! name = "copy"
//! doc = "Copy files."
//!
//! [[commands.arguments]]
//! kind = "file"
//! name = "from"
//! dir = "."
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::args::{Argument, ArgumentRegistry, Basis, FileAccept, FileBasis};
use crate::config::ConfigError;

use super::error::BuildError;
use super::tree::{Command, CommandBuilder};

/// A whole tree: root arguments and top-level commands.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TreeSpec {
    #[serde(default)]
    pub arguments: Vec<ArgumentSpec>,
    #[serde(default)]
    pub commands: Vec<CommandSpec>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommandSpec {
    pub name: String,
    #[serde(default)]
    pub doc: Option<String>,
    #[serde(default)]
    pub arguments: Vec<ArgumentSpec>,
    #[serde(default)]
    pub commands: Vec<CommandSpec>,
}

/// One argument. `kind` is a shorthand path; exactly one basis field is
/// expected to be set for kinds that need one.
#[derive(Debug, Clone, Deserialize)]
pub struct ArgumentSpec {
    pub kind: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub choices: Option<Vec<String>>,
    #[serde(default)]
    pub range: Option<[i64; 2]>,
    #[serde(default)]
    pub hint: Option<String>,
    #[serde(default)]
    pub pattern: Option<String>,
    #[serde(default)]
    pub dir: Option<PathBuf>,
    #[serde(default)]
    pub accept: Option<FileAccept>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub arguments: Vec<ArgumentSpec>,
}

impl ArgumentSpec {
    fn basis(&self, registry: &ArgumentRegistry) -> Result<Basis, BuildError> {
        if let Some(choices) = &self.choices {
            return Ok(Basis::Choices(choices.clone()));
        }
        if let Some([low, high]) = self.range {
            if low > high {
                return Err(BuildError::UnsupportedSpec(format!(
                    "argument '{}' has an empty range {}..{}",
                    self.name.as_deref().unwrap_or_default(),
                    low,
                    high
                )));
            }
            return Ok(Basis::Range(low..=high));
        }
        if let Some(pattern) = &self.pattern {
            return Ok(Basis::Pattern(pattern.clone()));
        }
        if let Some(dir) = &self.dir {
            return Ok(Basis::File(
                FileBasis::new(dir).accepting(self.accept.unwrap_or_default()),
            ));
        }
        if let Some(address) = &self.address {
            return Ok(Basis::Address(address.clone()));
        }
        if !self.arguments.is_empty() {
            let children = self
                .arguments
                .iter()
                .map(|child| child.build(registry))
                .collect::<Result<Vec<_>, _>>()?;
            return Ok(Basis::Children(children));
        }
        if let Some(hint) = &self.hint {
            return Ok(Basis::Hint(hint.clone()));
        }
        Ok(Basis::None)
    }

    pub fn build(&self, registry: &ArgumentRegistry) -> Result<Argument, BuildError> {
        let basis = self.basis(registry)?;
        let name = match (&self.name, &basis) {
            (Some(name), _) => name.as_str(),
            (None, Basis::Children(_)) => "",
            (None, _) => {
                return Err(BuildError::UnsupportedSpec(format!(
                    "argument of kind '{}' needs a name",
                    self.kind
                )))
            }
        };
        registry.create(&self.kind, name, basis)
    }
}

impl CommandSpec {
    fn builder(&self, registry: &ArgumentRegistry) -> Result<CommandBuilder, BuildError> {
        let mut builder = Command::builder(&self.name);
        if let Some(doc) = &self.doc {
            builder = builder.doc(doc);
        }
        for arg in &self.arguments {
            builder = builder.argument(arg.build(registry)?);
        }
        for child in &self.commands {
            builder = builder.child(child.builder(registry)?);
        }
        Ok(builder)
    }
}

impl TreeSpec {
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Root builder, so callers can add hand-written commands before
    /// building.
    pub fn builder(&self, registry: &ArgumentRegistry) -> Result<CommandBuilder, BuildError> {
        let mut root = Command::root();
        for arg in &self.arguments {
            root = root.argument(arg.build(registry)?);
        }
        for command in &self.commands {
            root = root.child(command.builder(registry)?);
        }
        Ok(root)
    }

    pub fn build(&self, registry: &ArgumentRegistry) -> Result<Command, BuildError> {
        self.builder(registry)?.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::{ArgKind, Decoration};

    const TREE: &str = r#"
[[arguments]]
kind = "settable.number"
name = "verbosity"
range = [0, 3]

[[commands]]
name = "show"
doc = "Show things."

[[commands.arguments]]
kind = "optional.alternating"
name = "what"

[[commands.arguments.arguments]]
kind = "array"
name = "level"
choices = ["all", "some"]

[[commands.arguments.arguments]]
kind = "number"
name = "percent"
range = [0, 100]

[[commands.commands]]
name = "more"
"#;

    #[test]
    fn builds_nested_tree() {
        let spec = TreeSpec::from_toml_str(TREE).unwrap();
        let root = spec.build(&ArgumentRegistry::builtin()).unwrap();
        assert!(root.has_settings());

        let show = root.select_child("show").unwrap();
        assert_eq!(show.doc_text(), Some("Show things."));
        let what = show.argument("what").unwrap();
        assert_eq!(what.decorations(), &[Decoration::Optional]);
        assert!(matches!(what.kind(), ArgKind::Alternating { children, .. } if children.len() == 2));
        assert!(root.find(&["show", "more"]).is_some());
    }

    #[test]
    fn unnamed_leaf_is_rejected() {
        let spec = TreeSpec::from_toml_str("[[arguments]]\nkind = \"number\"\n").unwrap();
        let err = spec.build(&ArgumentRegistry::builtin()).unwrap_err();
        assert_eq!(err.error_type(), "unsupported_spec");
    }

    #[test]
    fn inverted_range_is_rejected() {
        let spec =
            TreeSpec::from_toml_str("[[arguments]]\nkind = \"number\"\nname = \"n\"\nrange = [5, 1]\n")
                .unwrap();
        assert!(spec.build(&ArgumentRegistry::builtin()).is_err());
    }
}
