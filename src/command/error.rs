//! Errors raised while assembling a command tree.
//!
//! Build errors are fatal: they abort command-set assembly and are
//! reported to whoever is constructing the tree.

use thiserror::Error;

/// Errors that can occur while building arguments and commands.
#[derive(Debug, Error)]
pub enum BuildError {
    /// Two contributions define the same argument over different domains.
    #[error("Can't merge argument '{name}': {first} conflicts with {second}")]
    CantMergeArguments {
        name: String,
        first: String,
        second: String,
    },

    #[error("Unknown argument shorthand '{0}'")]
    UnknownShorthand(String),

    #[error("Unknown argument decorator '{0}'")]
    UnknownDecorator(String),

    /// A shorthand was given a basis of the wrong shape.
    #[error("Argument '{name}' of kind '{kind}' expects {expected}")]
    BasisMismatch {
        name: String,
        kind: String,
        expected: &'static str,
    },

    #[error("Invalid pattern for argument '{name}': {source}")]
    InvalidPattern {
        name: String,
        #[source]
        source: regex::Error,
    },

    #[error("Unknown command set '{0}'")]
    UnknownCommandSet(String),

    #[error("Command set '{set}' has no command '{command}'")]
    MissingCommand { set: String, command: String },

    /// A declarative tree entry could not be turned into an argument.
    #[error("Unsupported tree entry: {0}")]
    UnsupportedSpec(String),
}

impl BuildError {
    /// Short machine-readable classification.
    pub fn error_type(&self) -> &'static str {
        match self {
            BuildError::CantMergeArguments { .. } => "merge_conflict",
            BuildError::UnknownShorthand(_) => "unknown_shorthand",
            BuildError::UnknownDecorator(_) => "unknown_decorator",
            BuildError::BasisMismatch { .. } => "basis_mismatch",
            BuildError::InvalidPattern { .. } => "invalid_pattern",
            BuildError::UnknownCommandSet(_) => "unknown_command_set",
            BuildError::MissingCommand { .. } => "missing_command",
            BuildError::UnsupportedSpec(_) => "unsupported_spec",
        }
    }
}
