//! The caller-supplied context passed to validation and completion.

use std::collections::HashMap;
use std::time::Duration;

use serde_json::Value as Json;

use crate::config::KnobStore;

/// Opaque key-lookup context.
///
/// The engine never mutates a subject. Settable arguments read its
/// [`KnobStore`]; subject-deferred argument domains read its fields.
#[derive(Debug, Clone, Default)]
pub struct Subject {
    knobs: KnobStore,
    fields: HashMap<String, Json>,
}

impl Subject {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `knobs` as the settings store.
    pub fn with_knobs(mut self, knobs: KnobStore) -> Self {
        self.knobs = knobs;
        self
    }

    /// Attach an application field.
    pub fn with_field(mut self, name: impl Into<String>, value: Json) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    pub fn knobs(&self) -> &KnobStore {
        &self.knobs
    }

    pub fn field(&self, name: &str) -> Option<&Json> {
        self.fields.get(name)
    }
}

/// Per-call environment handed to argument operations.
#[derive(Debug, Clone, Copy)]
pub struct Context<'a> {
    pub subject: &'a Subject,
    /// Budget for enumerating one argument's completion candidates.
    pub deadline: Duration,
}

impl<'a> Context<'a> {
    pub fn new(subject: &'a Subject, deadline: Duration) -> Self {
        Self { subject, deadline }
    }
}
