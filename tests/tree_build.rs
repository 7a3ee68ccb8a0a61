//! Integration tests for tree assembly: builders, command sets and
//! declarative trees.

mod common;

use cmdtree::args::Basis;
use cmdtree::{
    Argument, ArgumentRegistry, BuildError, Command, CommandRegistry, Decoration, TreeSpec, Value,
};
use common::{completion_tokens, subject, subject_with_knobs, tokens};

const SHELL_TREE: &str = include_str!("../demos/shell.toml");

fn shell() -> Command {
    TreeSpec::from_toml_str(SHELL_TREE)
        .expect("demo tree should parse")
        .build(&ArgumentRegistry::builtin())
        .expect("demo tree should build")
}

// =============================================================================
// BUILDERS
// =============================================================================

#[test]
fn contributions_merge_by_name() {
    let root = Command::root()
        .child(Command::builder("show").argument(Argument::choices("what", ["a", "b"])))
        .child(
            Command::builder("show")
                .doc("Show a thing.")
                .argument(Argument::choices("what", ["a", "b"]).optional()),
        )
        .build()
        .unwrap();

    assert_eq!(root.children().len(), 1);
    let show = root.select_child("show").unwrap();
    assert_eq!(show.arguments().len(), 1);
    assert!(show.arguments()[0].required());
    assert_eq!(show.doc_text(), Some("Show a thing."));
}

#[test]
fn conflicting_domains_fail_to_merge() {
    let result = Command::root()
        .child(
            Command::builder("show")
                .contribute([Argument::number("n", 0..=3)])
                .contribute([Argument::number("n", 0..=9)]),
        )
        .build();
    match result {
        Err(BuildError::CantMergeArguments { name, .. }) => assert_eq!(name, "n"),
        other => panic!("expected merge conflict, got {:?}", other.map(|c| c.name().to_string())),
    }
}

#[test]
fn command_sets_are_included_selectively() {
    let mut registry = CommandRegistry::new();
    registry.register(
        "files",
        Command::root()
            .child(Command::builder("open"))
            .child(Command::builder("close")),
    );

    let root = registry.include(Command::root(), "files", &["open"]).unwrap();
    let root = registry.finish(root).unwrap();
    let names: Vec<_> = root.child_names().collect();
    assert_eq!(names, vec!["open"]);
}

#[test]
fn missing_command_set_is_an_error() {
    let registry = CommandRegistry::new();
    let err = registry.include(Command::root(), "nope", &[]).unwrap_err();
    assert_eq!(err.error_type(), "unknown_command_set");
}

// =============================================================================
// ARGUMENT REGISTRY
// =============================================================================

#[test]
fn shorthand_paths_apply_decorators_outermost_first() {
    let registry = ArgumentRegistry::builtin();
    let arg = registry
        .create("optional.named.number", "count", Basis::Range(0..=5))
        .unwrap();
    assert_eq!(arg.decorations(), &[Decoration::Optional, Decoration::Named]);
    assert!(!arg.required());
    assert_eq!(arg.view().to_string(), "optional(named(number:count))");
}

#[test]
fn unknown_shorthands_are_rejected() {
    let registry = ArgumentRegistry::builtin();
    let err = registry.create("teleport", "x", Basis::None).unwrap_err();
    assert_eq!(err.error_type(), "unknown_shorthand");

    let err = registry
        .create("sometimes.number", "x", Basis::Range(0..=1))
        .unwrap_err();
    assert_eq!(err.error_type(), "unknown_decorator");
}

#[test]
fn argument_suffix_is_optional() {
    let registry = ArgumentRegistry::builtin();
    let arg = registry
        .create("number_argument", "n", Basis::Range(0..=1))
        .unwrap();
    assert_eq!(arg.name(), "n");
}

// =============================================================================
// DECLARATIVE TREES
// =============================================================================

#[test]
fn demo_tree_resolves() {
    let root = shell();
    let subject = subject_with_knobs("verbosity = 1\n");

    let input = tokens("sum numbers -5 7");
    let resolution = root.resolve(&input, &subject).unwrap();
    assert_eq!(
        resolution.bindings.get("numbers"),
        Some(&Value::List(vec![Value::Int(-5), Value::Int(7)]))
    );
    assert_eq!(resolution.bindings.get("verbosity"), Some(&Value::Int(1)));

    let input = tokens("log loud");
    let resolution = root.resolve(&input, &subject).unwrap();
    assert_eq!(resolution.bindings.get("level"), Some(&Value::from("loud")));
    assert_eq!(resolution.bindings.get("named_level"), Some(&Value::from("loud")));

    let input = tokens("git checkout main");
    let resolution = root.resolve(&input, &subject).unwrap();
    assert_eq!(resolution.path, vec!["git", "checkout"]);
    assert_eq!(resolution.bindings.get("branch"), Some(&Value::from("main")));
}

#[test]
fn demo_tree_root_setting_may_be_unset() {
    let root = shell();
    let input = tokens("git checkout main");
    let subject = subject();
    let resolution = root.resolve(&input, &subject).unwrap();
    assert!(!resolution.bindings.contains("verbosity"));
}

#[test]
fn demo_tree_fuzzy_branches() {
    let root = shell();
    let subject = subject_with_knobs("verbosity = 1\n");
    let input = completion_tokens("git checkout login");
    let list = root.complete(&input, &subject);
    assert_eq!(list.texts(), vec!["fix/login-typo", "feature/login-form"]);
}

#[test]
fn demo_tree_outline() {
    let root = shell();
    let outline = root.outline();
    assert!(outline.contains(&"sum <numbers>".to_string()));
    assert!(outline.contains(&"git checkout <branch>".to_string()));
    assert!(outline.contains(&"git commit [message]".to_string()));
    assert!(outline.iter().all(|line| !line.contains("verbosity")));
}

#[test]
fn malformed_tree_is_a_parse_error() {
    assert!(TreeSpec::from_toml_str("[[commands]]\nname = 3\n").is_err());

    let spec = TreeSpec::from_toml_str(
        "[[commands]]\nname = \"x\"\n[[commands.arguments]]\nkind = \"number\"\n",
    )
    .unwrap();
    let err = spec.build(&ArgumentRegistry::builtin()).unwrap_err();
    assert_eq!(err.error_type(), "unsupported_spec");
}
