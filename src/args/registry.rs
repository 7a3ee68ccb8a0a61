//! Argument registry: the single source of truth for argument shorthands.
//!
//! Shorthand paths name decorators then a kind, outermost first:
//! `optional.named.number` is an optional, named number argument.

use std::collections::BTreeMap;
use std::ops::RangeInclusive;
use std::sync::Arc;

use crate::command::BuildError;

use super::argument::{Argument, Decoration, FileBasis, LookupFn, StepFn};

/// The domain handed to an argument factory.
#[derive(Clone)]
pub enum Basis {
    None,
    Choices(Vec<String>),
    Range(RangeInclusive<i64>),
    Hint(String),
    Pattern(String),
    File(FileBasis),
    Lookup(LookupFn),
    Multiword(StepFn),
    Address(String),
    Children(Vec<Argument>),
}

impl Basis {
    pub fn lookup<F>(source: F) -> Self
    where
        F: Fn(&str, &crate::subject::Subject) -> Vec<String> + Send + Sync + 'static,
    {
        Basis::Lookup(Arc::new(source))
    }

    fn hint(self) -> String {
        match self {
            Basis::Hint(hint) => hint,
            _ => String::new(),
        }
    }
}

impl Argument {
    /// Pick the kind from the shape of `basis`.
    pub fn infer(name: &str, basis: Basis) -> Result<Argument, BuildError> {
        match basis {
            Basis::Choices(choices) => Ok(Argument::choices(name, choices)),
            Basis::Range(range) => Ok(Argument::number(name, range)),
            Basis::Hint(hint) => Ok(Argument::text(name, hint)),
            Basis::None => Ok(Argument::text(name, "")),
            Basis::Pattern(pattern) => Argument::pattern(name, &pattern),
            Basis::Lookup(source) => Ok(Argument::new(
                name,
                super::ArgKind::Lookup {
                    source,
                    validating: true,
                },
            )),
            Basis::File(basis) => Ok(Argument::file(name, basis)),
            Basis::Multiword(step) => Ok(Argument::new(name, super::ArgKind::Multiword(step))),
            Basis::Address(address) => Ok(Argument::proxy(name, address)),
            Basis::Children(children) => Ok(Argument::alternating(children).with_name(name)),
        }
    }
}

/// Builds an argument named `name` from `basis`.
pub type KindFactory = fn(&str, Basis) -> Result<Argument, BuildError>;

fn mismatch(name: &str, kind: &str, expected: &'static str) -> BuildError {
    BuildError::BasisMismatch {
        name: name.to_string(),
        kind: kind.to_string(),
        expected,
    }
}

fn choices_kind(name: &str, basis: Basis) -> Result<Argument, BuildError> {
    match basis {
        Basis::Choices(choices) => Ok(Argument::choices(name, choices)),
        _ => Err(mismatch(name, "array", "a list of choices")),
    }
}

fn number_kind(name: &str, basis: Basis) -> Result<Argument, BuildError> {
    match basis {
        Basis::Range(range) => Ok(Argument::number(name, range)),
        Basis::None => Ok(Argument::number(name, i64::MIN..=i64::MAX)),
        _ => Err(mismatch(name, "number", "a range")),
    }
}

fn text_kind(name: &str, basis: Basis) -> Result<Argument, BuildError> {
    Ok(Argument::text(name, basis.hint()))
}

fn pattern_kind(name: &str, basis: Basis) -> Result<Argument, BuildError> {
    match basis {
        Basis::Pattern(pattern) => Argument::pattern(name, &pattern),
        _ => Err(mismatch(name, "regexp", "a pattern")),
    }
}

fn lookup_kind(name: &str, basis: Basis) -> Result<Argument, BuildError> {
    match basis {
        Basis::Lookup(_) => Argument::infer(name, basis),
        _ => Err(mismatch(name, "proc", "a lookup function")),
    }
}

fn nonvalidating_lookup_kind(name: &str, basis: Basis) -> Result<Argument, BuildError> {
    match basis {
        Basis::Lookup(source) => Ok(Argument::new(
            name,
            super::ArgKind::Lookup {
                source,
                validating: false,
            },
        )),
        _ => Err(mismatch(name, "nonvalidating_proc", "a lookup function")),
    }
}

fn rest_kind(name: &str, basis: Basis) -> Result<Argument, BuildError> {
    Ok(Argument::rest_of_line(name, basis.hint()))
}

fn file_kind(name: &str, basis: Basis) -> Result<Argument, BuildError> {
    match basis {
        Basis::File(basis) => Ok(Argument::file(name, basis)),
        Basis::None => Ok(Argument::file(name, FileBasis::new("."))),
        _ => Err(mismatch(name, "file", "a directory")),
    }
}

fn multiword_kind(name: &str, basis: Basis) -> Result<Argument, BuildError> {
    match basis {
        Basis::Multiword(_) => Argument::infer(name, basis),
        _ => Err(mismatch(name, "multiword", "a step function")),
    }
}

fn proxy_kind(name: &str, basis: Basis) -> Result<Argument, BuildError> {
    match basis {
        Basis::Address(address) => Ok(Argument::proxy(name, address)),
        _ => Err(mismatch(name, "proxy", "an address argument name")),
    }
}

fn parent_kind(name: &str, _basis: Basis) -> Result<Argument, BuildError> {
    Ok(Argument::parent(name))
}

fn alternating_kind(name: &str, basis: Basis) -> Result<Argument, BuildError> {
    match basis {
        Basis::Children(children) => {
            let alternation = Argument::alternating(children);
            Ok(if name.is_empty() {
                alternation
            } else {
                alternation.with_name(name)
            })
        }
        _ => Err(mismatch(name, "alternating", "child arguments")),
    }
}

fn concatenated_kind(name: &str, basis: Basis) -> Result<Argument, BuildError> {
    match basis {
        Basis::Children(children) => {
            let group = Argument::concatenated(children);
            Ok(if name.is_empty() {
                group
            } else {
                group.with_name(name)
            })
        }
        _ => Err(mismatch(name, "concatenated", "child arguments")),
    }
}

/// Static map from shorthand to argument factory and decorator.
#[derive(Clone)]
pub struct ArgumentRegistry {
    kinds: BTreeMap<&'static str, KindFactory>,
    decorators: BTreeMap<&'static str, Decoration>,
}

impl Default for ArgumentRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ArgumentRegistry {
    /// Registry with every built-in kind and decorator.
    pub fn builtin() -> Self {
        let mut registry = Self {
            kinds: BTreeMap::new(),
            decorators: BTreeMap::new(),
        };
        let kinds: [(&'static str, KindFactory); 18] = [
            ("argument", Argument::infer),
            ("array", choices_kind),
            ("choose", choices_kind),
            ("number", number_kind),
            ("range", number_kind),
            ("string", text_kind),
            ("any", text_kind),
            ("regexp", pattern_kind),
            ("regex", pattern_kind),
            ("proc", lookup_kind),
            ("nonvalidating_proc", nonvalidating_lookup_kind),
            ("rest", rest_kind),
            ("file", file_kind),
            ("multiword", multiword_kind),
            ("proxy", proxy_kind),
            ("parent", parent_kind),
            ("alternating", alternating_kind),
            ("concatenated", concatenated_kind),
        ];
        for (shorthand, factory) in kinds {
            registry.register_kind(shorthand, factory);
        }
        let decorators = [
            ("optional", Decoration::Optional),
            ("named", Decoration::Named),
            ("many", Decoration::Repeating),
            ("repeating", Decoration::Repeating),
            ("settable", Decoration::Settable),
            ("substring_complete", Decoration::SubstringMatch),
            ("fuzzy_complete", Decoration::SubstringMatch),
        ];
        for (shorthand, decoration) in decorators {
            registry.register_decorator(shorthand, decoration);
        }
        registry
    }

    pub fn register_kind(&mut self, shorthand: &'static str, factory: KindFactory) {
        self.kinds.insert(shorthand, factory);
    }

    pub fn register_decorator(&mut self, shorthand: &'static str, decoration: Decoration) {
        self.decorators.insert(shorthand, decoration);
    }

    /// Build an argument from a shorthand path such as
    /// `optional.named.number`.
    pub fn create(&self, path: &str, name: &str, basis: Basis) -> Result<Argument, BuildError> {
        let mut segments: Vec<&str> = path.split('.').collect();
        let kind = segments.pop().unwrap_or_default();
        let kind = kind.strip_suffix("_argument").unwrap_or(kind);
        let factory = self
            .kinds
            .get(kind)
            .ok_or_else(|| BuildError::UnknownShorthand(kind.to_string()))?;

        let decorations = segments
            .iter()
            .map(|segment| {
                self.decorators
                    .get(segment)
                    .copied()
                    .ok_or_else(|| BuildError::UnknownDecorator(segment.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut argument = factory(name, basis)?;
        for decoration in decorations.into_iter().rev() {
            argument = argument.decorate(decoration);
        }
        Ok(argument)
    }

    pub fn kind_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.kinds.keys().copied()
    }

    pub fn decorator_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.decorators.keys().copied()
    }

    /// One line per registered shorthand.
    pub fn describe(&self) -> String {
        let mut out = String::from("Argument kinds:\n");
        for name in self.kind_names() {
            out.push_str(&format!("  {}\n", name));
        }
        out.push_str("Decorators:\n");
        for (name, decoration) in &self.decorators {
            out.push_str(&format!("  {} ({})\n", name, decoration.as_str()));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shorthand_path_decorates_outermost_first() {
        let registry = ArgumentRegistry::builtin();
        let arg = registry
            .create("optional.named.number", "count", Basis::Range(1..=5))
            .unwrap();
        assert_eq!(
            arg.decorations(),
            &[Decoration::Optional, Decoration::Named]
        );
        assert_eq!(arg.name(), "count");
    }

    #[test]
    fn aliases_map_to_the_same_decoration() {
        let registry = ArgumentRegistry::builtin();
        let a = registry
            .create("many.array", "x", Basis::Choices(vec!["a".into()]))
            .unwrap();
        let b = registry
            .create("repeating.choose_argument", "x", Basis::Choices(vec!["a".into()]))
            .unwrap();
        assert_eq!(a.decorations(), b.decorations());
        assert!(a.same_basis(&b));
    }

    #[test]
    fn unknown_segments_are_reported() {
        let registry = ArgumentRegistry::builtin();
        let err = registry.create("optional.bogus", "x", Basis::None).unwrap_err();
        assert!(matches!(err, BuildError::UnknownShorthand(ref k) if k == "bogus"));
        let err = registry.create("sometimes.number", "x", Basis::None).unwrap_err();
        assert!(matches!(err, BuildError::UnknownDecorator(ref d) if d == "sometimes"));
    }

    #[test]
    fn wrong_basis_shape_is_rejected() {
        let registry = ArgumentRegistry::builtin();
        let err = registry.create("array", "x", Basis::Range(0..=1)).unwrap_err();
        assert_eq!(err.error_type(), "basis_mismatch");
    }

    #[test]
    fn infer_follows_basis_shape() {
        let arg = Argument::infer("n", Basis::Range(0..=3)).unwrap();
        assert!(matches!(arg.kind(), crate::args::ArgKind::Number(_)));
        let arg = Argument::infer("c", Basis::Choices(vec!["a".into()])).unwrap();
        assert!(matches!(arg.kind(), crate::args::ArgKind::Choices(_)));
    }

    #[test]
    fn describe_lists_shorthands() {
        let text = ArgumentRegistry::builtin().describe();
        assert!(text.contains("  multiword\n"));
        assert!(text.contains("  many (repeating)\n"));
    }
}
