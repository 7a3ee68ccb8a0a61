use std::ops::Range;

use serde::Serialize;

/// One completion candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Completion {
    pub text: String,
    pub score: f64,
    /// Byte ranges of `text` that matched the prefix.
    pub marks: Vec<Range<usize>>,
}

impl Completion {
    pub fn new(text: impl Into<String>, score: f64, marks: Vec<Range<usize>>) -> Self {
        Self {
            text: text.into(),
            score,
            marks,
        }
    }
}

/// Merged completion candidates for one fragment.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CompletionList {
    pub items: Vec<Completion>,
    /// The fragment being completed, after quote stripping.
    pub prefix: String,
    /// Descriptions for arguments that have no enumerable candidates.
    pub hints: Vec<String>,
    /// Some argument ran out of time before listing every candidate.
    pub truncated: bool,
}

impl CompletionList {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            ..Self::default()
        }
    }

    /// Add a candidate. A duplicate keeps its position and the higher
    /// score.
    pub fn push(&mut self, completion: Completion) {
        match self.items.iter_mut().find(|c| c.text == completion.text) {
            Some(existing) => {
                if completion.score > existing.score {
                    existing.score = completion.score;
                    existing.marks = completion.marks;
                }
            }
            None => self.items.push(completion),
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        let hint = hint.into();
        if !hint.is_empty() && !self.hints.contains(&hint) {
            self.hints.push(hint);
        }
        self
    }

    pub fn merge(&mut self, other: CompletionList) {
        if self.prefix.is_empty() {
            self.prefix = other.prefix;
        }
        for completion in other.items {
            self.push(completion);
        }
        for hint in other.hints {
            if !self.hints.contains(&hint) {
                self.hints.push(hint);
            }
        }
        self.truncated |= other.truncated;
    }

    /// Keep only candidates satisfying `keep`.
    pub fn retain(&mut self, keep: impl FnMut(&Completion) -> bool) {
        self.items.retain(keep);
    }

    /// Candidates by descending score; ties keep insertion order.
    pub fn ranked(&self) -> Vec<&Completion> {
        let mut ranked: Vec<&Completion> = self.items.iter().collect();
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        ranked
    }

    /// Candidate texts in ranked order.
    pub fn texts(&self) -> Vec<&str> {
        self.ranked().into_iter().map(|c| c.text.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
