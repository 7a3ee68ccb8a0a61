//! Plain-text usage lines.

use crate::args::Decoration;

use super::tree::Command;

impl Command {
    /// `prefix… name <required> [optional]`. Settable arguments are read
    /// from settings, not typed, and are left out.
    pub fn short_docs<S: AsRef<str>>(&self, prefix: &[S]) -> String {
        let mut words: Vec<String> = prefix.iter().map(|s| s.as_ref().to_string()).collect();
        if !self.is_root() {
            words.push(self.name().to_string());
        }
        for arg in self.arguments() {
            if arg.has_feature(Decoration::Settable) {
                continue;
            }
            words.push(if arg.required() {
                format!("<{}>", arg.name())
            } else {
                format!("[{}]", arg.name())
            });
        }
        words.join(" ")
    }

    /// Usage line followed by the documentation text, if any.
    pub fn documentation<S: AsRef<str>>(&self, prefix: &[S]) -> String {
        match self.doc_text() {
            Some(text) => format!("{}\n\n{}", self.short_docs(prefix), text),
            None => self.short_docs(prefix),
        }
    }

    /// Usage lines for this command and every descendant, depth first.
    pub fn outline(&self) -> Vec<String> {
        let mut lines = Vec::new();
        self.outline_into(&mut Vec::new(), &mut lines);
        lines
    }

    fn outline_into(&self, prefix: &mut Vec<String>, lines: &mut Vec<String>) {
        if !self.is_root() {
            lines.push(self.short_docs(prefix.as_slice()));
            prefix.push(self.name().to_string());
        }
        for child in self.children() {
            child.outline_into(prefix, lines);
        }
        if !self.is_root() {
            prefix.pop();
        }
    }
}
