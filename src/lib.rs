//! Resolve and complete command lines against a tree of typed commands.
//!
//! ```text
//! tokens → Resolver → (command, path, bindings) | ResolveError
//! tokens + fragment → Completer → ranked CompletionList
//! ```

pub mod args;
pub mod command;
pub mod complete;
pub mod config;
pub mod logging;
pub mod resolve;
pub mod scan;
pub mod subject;

pub use args::{Argument, ArgumentRegistry, Bindings, Decoration, Value};
pub use command::{BuildError, Command, CommandBuilder, CommandRegistry, TreeSpec};
pub use complete::{Completion, CompletionList};
pub use config::{EngineConfig, KnobStore};
pub use resolve::{Completer, Resolution, ResolveError, Resolver};
pub use subject::Subject;
