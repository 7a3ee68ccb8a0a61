//! Command tree.
//!
//! Trees are assembled once through [`CommandBuilder`] (by hand, from a
//! [`CommandRegistry`] of named sets, or from a TOML [`TreeSpec`]) and are
//! immutable afterwards. Resolution only ever borrows them.

mod docs;
mod error;
mod registry;
mod spec;
mod tree;

pub use error::BuildError;
pub use registry::CommandRegistry;
pub use spec::{ArgumentSpec, CommandSpec, TreeSpec};
pub use tree::{Command, CommandBuilder};
