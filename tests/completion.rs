//! Integration tests for completion.

mod common;

use std::time::Duration;

use cmdtree::{Argument, Command, Completer, EngineConfig};
use common::{completion_tokens, sample_tree, subject, subject_with_knobs};

fn complete(line: &str) -> Vec<String> {
    let root = sample_tree();
    let subject = subject();
    let input = completion_tokens(line);
    let list = root.complete(&input, &subject);
    list.texts().into_iter().map(String::from).collect()
}

// =============================================================================
// COMMAND NAMES
// =============================================================================

#[test]
fn empty_line_offers_every_top_level_command() {
    let offered = complete("");
    for name in ["cmd", "opt", "alt", "sub", "set", "go", "test", "tweak", "say"] {
        assert!(offered.contains(&name.to_string()), "missing {}", name);
    }
}

#[test]
fn child_names_filtered_by_prefix() {
    assert_eq!(complete("s"), vec!["sub", "set", "say"]);
    assert_eq!(complete("sub "), vec!["one", "two"]);
    assert_eq!(complete("sub t"), vec!["two"]);
    assert!(complete("nothing ").is_empty());
}

// =============================================================================
// ARGUMENTS
// =============================================================================

#[test]
fn choices_complete_by_prefix() {
    assert_eq!(complete("go "), vec!["north", "south", "east"]);
    assert_eq!(complete("go so"), vec!["south"]);
}

#[test]
fn leading_quote_is_ignored() {
    let root = sample_tree();
    let subject = subject();
    let input = completion_tokens("go \"no");
    let list = root.complete(&input, &subject);
    assert_eq!(list.prefix, "no");
    assert_eq!(list.texts(), vec!["north"]);
}

#[test]
fn named_argument_offers_its_name() {
    assert_eq!(complete("cmd "), vec!["numbers"]);
    assert_eq!(complete("cmd nu"), vec!["numbers"]);
}

#[test]
fn numbers_offer_hints_not_candidates() {
    let root = sample_tree();
    let subject = subject();
    let input = completion_tokens("cmd numbers ");
    let list = root.complete(&input, &subject);
    assert!(list.is_empty());
    assert_eq!(list.hints, vec!["<numbers: 1..3>"]);

    let typed = completion_tokens("cmd numbers 2");
    assert_eq!(root.complete(&typed, &subject).texts(), vec!["2"]);
}

#[test]
fn alternating_fans_out_to_children() {
    let root = sample_tree();
    let subject = subject();
    let input = completion_tokens("alt ");
    let list = root.complete(&input, &subject);
    assert_eq!(list.texts(), vec!["all", "some"]);
    assert!(list.hints.contains(&"<percentage: 0..100>".to_string()));
}

#[test]
fn optional_offers_value_and_skip() {
    let root = sample_tree();
    let subject = subject();
    let input = completion_tokens("opt ");
    let list = root.complete(&input, &subject);
    assert!(list.hints.contains(&"<n: 0..9>".to_string()));
}

#[test]
fn settable_contributes_nothing() {
    let root = sample_tree();
    let subject = subject_with_knobs("[set]\nlevel = 1\n");
    let input = completion_tokens("set ");
    let list = root.complete(&input, &subject);
    assert!(list.is_empty());
    assert!(list.hints.is_empty());
}

#[test]
fn repeating_keeps_offering_after_values() {
    let root = sample_tree();
    let subject = subject();
    let input = completion_tokens("cmd numbers 1 ");
    let list = root.complete(&input, &subject);
    assert_eq!(list.hints, vec!["<numbers: 1..3>"]);
}

// =============================================================================
// SUBSTRING MATCHING
// =============================================================================

#[test]
fn substring_match_scores_scattered_letters() {
    let root = sample_tree();
    let subject = subject();
    let input = completion_tokens("test WXYZ");
    let list = root.complete(&input, &subject);
    assert_eq!(list.texts(), vec!["WXYZ", "aaaWXaYaaaZaaa"]);

    let scattered = list
        .items
        .iter()
        .find(|c| c.text == "aaaWXaYaaaZaaa")
        .unwrap();
    assert!(scattered.score > 0.0);
    let marked: usize = scattered.marks.iter().map(|m| m.len()).sum();
    assert_eq!(marked, "WXYZ".len());
    assert_eq!(scattered.marks, vec![3..5, 6..7, 10..11]);
}

// =============================================================================
// MULTIWORD AND PROXY
// =============================================================================

#[test]
fn multiword_completes_each_term() {
    assert_eq!(complete("tweak "), vec!["set", "go"]);
    assert_eq!(complete("tweak set "), vec!["level"]);
    assert_eq!(complete("tweak g"), vec!["go"]);
}

#[test]
fn proxy_completes_through_principal() {
    let root = sample_tree();
    let subject = subject();
    let input = completion_tokens("tweak set level ");
    let list = root.complete(&input, &subject);
    assert_eq!(list.hints, vec!["<level: 0..10>"]);
}

// =============================================================================
// DEADLINE
// =============================================================================

#[test]
fn deadline_marks_list_truncated() {
    let root = Command::root()
        .child(Command::builder("big").argument(Argument::lookup("item", |_, _| {
            (0..1000).map(|i| format!("item{}", i)).collect()
        })))
        .build()
        .unwrap();
    let subject = subject();
    let input = completion_tokens("big it");

    let full = root.complete(&input, &subject);
    assert!(!full.truncated);
    assert_eq!(full.len(), 1000);

    let mut config = EngineConfig::default();
    config.completion.deadline_ms = 0;
    let cut = Completer::new(&root, &subject)
        .with_config(&config)
        .complete(&input);
    assert!(cut.truncated);
    assert!(cut.is_empty());
}

#[test]
fn slow_source_is_cut_while_siblings_finish() {
    let root = Command::root()
        .child(Command::builder("pick").argument(Argument::alternating(vec![
            Argument::lookup("slow", |_, _| {
                std::thread::sleep(Duration::from_millis(100));
                vec!["slowpoke".to_string()]
            }),
            Argument::choices("fast", ["fast1", "fast2"]),
        ])))
        .build()
        .unwrap();
    let subject = subject();
    let input = completion_tokens("pick ");

    let mut config = EngineConfig::default();
    config.completion.deadline_ms = 20;
    let list = Completer::new(&root, &subject)
        .with_config(&config)
        .complete(&input);
    let texts = list.texts();
    assert!(texts.contains(&"fast1"));
    assert!(texts.contains(&"fast2"));
    assert!(!texts.contains(&"slowpoke"));
    assert!(list.truncated);
}

#[test]
fn expansion_limit_marks_list_truncated() {
    let root = Command::root()
        .child(Command::builder("n").argument(Argument::choices("x", ["a", "b"]).repeating()))
        .build()
        .unwrap();
    let subject = subject();
    let input = completion_tokens("n a a a a ");

    let full = root.complete(&input, &subject);
    assert!(!full.truncated);

    let mut config = EngineConfig::default();
    config.search.max_expansions = 2;
    let cut = Completer::new(&root, &subject)
        .with_config(&config)
        .complete(&input);
    assert!(cut.truncated);
}

#[test]
fn fan_out_limit_marks_list_truncated() {
    let wide: Vec<Argument> = (0..1100)
        .map(|i| Argument::choices(format!("c{}", i), [format!("v{}", i)]))
        .collect();
    let root = Command::root()
        .child(Command::builder("wide").argument(Argument::alternating(wide)))
        .build()
        .unwrap();
    let subject = subject();
    let input = completion_tokens("wide v100");
    let list = root.complete(&input, &subject);
    assert!(list.truncated);
}

#[test]
fn completion_is_deterministic() {
    let first = complete("test ");
    for _ in 0..5 {
        assert_eq!(complete("test "), first);
    }
}
