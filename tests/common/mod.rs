//! Shared test utilities and fixture trees.

#![allow(dead_code, unused_imports)]

use cmdtree::args::MultiStep;
use cmdtree::scan::{split_for_completion, split_line};
use cmdtree::{Argument, Command, KnobStore, Subject};

pub fn tokens(line: &str) -> Vec<String> {
    split_line(line)
}

pub fn completion_tokens(line: &str) -> Vec<String> {
    split_for_completion(line)
}

pub fn subject() -> Subject {
    Subject::new()
}

pub fn subject_with_knobs(toml: &str) -> Subject {
    let knobs = KnobStore::from_toml_str(toml).expect("knobs should parse");
    Subject::new().with_knobs(knobs)
}

/// Settings paths the `tweak` command can address.
const SETTING_PATHS: &[&[&str]] = &[&["set", "level"], &["go", "dir"]];

/// Step function walking `SETTING_PATHS` one segment at a time.
pub fn setting_path_step(terms: &[String], next: Option<&str>, _subject: &Subject) -> MultiStep {
    let matching: Vec<&[&str]> = SETTING_PATHS
        .iter()
        .copied()
        .filter(|path| path.len() >= terms.len() && path.iter().zip(terms).all(|(a, b)| a == b))
        .collect();
    let complete = matching.iter().any(|path| path.len() == terms.len());
    let offered: Vec<String> = matching
        .iter()
        .filter_map(|path| path.get(terms.len()).map(|s| s.to_string()))
        .collect();
    let more = match next {
        Some(term) => offered.iter().any(|o| o == term),
        None => !offered.is_empty(),
    };
    MultiStep {
        accept: complete,
        more,
        completions: offered,
    }
}

/// A tree exercising every argument kind and decorator.
pub fn sample_tree() -> Command {
    Command::root()
        .child(
            Command::builder("cmd")
                .argument(Argument::number("numbers", 1..=3).repeating().named()),
        )
        .child(Command::builder("opt").argument(Argument::number("n", 0..=9).optional()))
        .child(
            Command::builder("alt").argument(
                Argument::alternating(vec![
                    Argument::choices("named_level", ["all", "some"]),
                    Argument::number("percentage", 0..=100),
                ])
                .with_name("alternates"),
            ),
        )
        .child(
            Command::builder("sub")
                .child(Command::builder("one"))
                .child(Command::builder("two")),
        )
        .child(Command::builder("set").argument(Argument::number("level", 0..=10).settable()))
        .child(
            Command::builder("go").argument(Argument::choices("dir", ["north", "south", "east"])),
        )
        .child(
            Command::builder("test").argument(
                Argument::choices("pick", ["aaaWXaYaaaZaaa", "WXYZ", "zzz"]).substring_match(),
            ),
        )
        .child(
            Command::builder("tweak")
                .argument(Argument::multiword("address", setting_path_step))
                .argument(Argument::proxy("value", "address")),
        )
        .child(
            Command::builder("outer")
                .argument(Argument::text("scope", "").settable())
                .child(Command::builder("inner").argument(Argument::parent("scope"))),
        )
        .child(
            Command::builder("pair").argument(
                Argument::concatenated(vec![
                    Argument::number("a", 0..=9),
                    Argument::number("b", 0..=9),
                ])
                .optional(),
            ),
        )
        .child(Command::builder("say").argument(Argument::rest_of_line("words", "anything")))
        .build()
        .expect("sample tree should build")
}
