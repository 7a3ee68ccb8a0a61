//! Engine configuration and the settings store.

mod knobs;
mod loader;
mod types;

pub use knobs::KnobStore;
pub use loader::ConfigError;
pub use types::{CompletionConfig, EngineConfig, KnobsConfig, SearchConfig, TreeConfig};
