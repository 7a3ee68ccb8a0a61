//! Argument model.
//!
//! An argument is a base kind wrapped in decorations:
//!
//! ```text
//! optional( named( repeating( number:count ) ) )
//! ```
//!
//! The search consumes, validates and completes arguments through
//! [`ArgRef`], a view that peels one decoration at a time.

mod argument;
mod complete;
mod consume;
mod file;
mod registry;
mod value;

pub use argument::{
    ArgKind, ArgRef, Argument, Decoration, Domain, FileAccept, FileBasis, LookupFn, MultiStep,
    StepFn,
};
pub use registry::{ArgumentRegistry, Basis, KindFactory};
pub use value::{Bindings, Value};
