use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub completion: CompletionConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub knobs: KnobsConfig,
    #[serde(default)]
    pub tree: TreeConfig,
}

/// Completion settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionConfig {
    /// Per-argument candidate matching budget in milliseconds (default: 500).
    #[serde(default = "default_deadline_ms")]
    pub deadline_ms: u64,
}

/// Search limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Upper bound on state expansions per call (default: 100000).
    #[serde(default = "default_max_expansions")]
    pub max_expansions: usize,
}

/// Location of the settings store read by settable arguments.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KnobsConfig {
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Location of a declarative command tree.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TreeConfig {
    #[serde(default)]
    pub path: Option<PathBuf>,
}

fn default_deadline_ms() -> u64 {
    500
}

fn default_max_expansions() -> usize {
    100_000
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            deadline_ms: default_deadline_ms(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_expansions: default_max_expansions(),
        }
    }
}

impl CompletionConfig {
    pub fn deadline(&self) -> Duration {
        Duration::from_millis(self.deadline_ms)
    }
}
