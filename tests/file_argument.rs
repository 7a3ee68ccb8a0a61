//! File arguments against a scratch directory.

mod common;

use std::fs;
use std::path::Path;

use cmdtree::args::{FileAccept, FileBasis};
use cmdtree::{Argument, Command, Value};
use common::{completion_tokens, subject, tokens};

fn fixture() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("help/my")).unwrap();
    fs::create_dir_all(dir.path().join("here/is_a")).unwrap();
    fs::write(dir.path().join("help/my/file.rb"), "").unwrap();
    fs::write(dir.path().join("here/is_a/file.rb"), "").unwrap();
    fs::write(dir.path().join(".secret"), "").unwrap();
    dir
}

fn tree(dir: &Path, fuzzy: bool) -> Command {
    let path = Argument::file("path", FileBasis::new(dir));
    let path = if fuzzy { path.substring_match() } else { path };
    Command::root()
        .child(Command::builder("open").argument(path))
        .child(
            Command::builder("mkdir")
                .argument(Argument::file("dir", FileBasis::new(dir).accepting(FileAccept::NotDir))),
        )
        .build()
        .unwrap()
}

fn offered(root: &Command, line: &str) -> Vec<String> {
    let subject = subject();
    let input = completion_tokens(line);
    let list = root.complete(&input, &subject);
    list.texts().into_iter().map(String::from).collect()
}

// =============================================================================
// RESOLUTION
// =============================================================================

#[test]
fn existing_file_is_accepted() {
    let dir = fixture();
    let root = tree(dir.path(), false);
    let input = tokens("open help/my/file.rb");
    let subject = subject();
    let resolution = root.resolve(&input, &subject).unwrap();
    assert_eq!(
        resolution.bindings.get("path"),
        Some(&Value::from("help/my/file.rb"))
    );
}

#[test]
fn directory_is_not_a_file() {
    let dir = fixture();
    let root = tree(dir.path(), false);
    let input = tokens("open help");
    let err = root.resolve(&input, &subject()).unwrap_err();
    assert_eq!(err.error_type(), "invalid_argument_value");
}

#[test]
fn new_path_needs_an_existing_parent() {
    let dir = fixture();
    let root = tree(dir.path(), false);
    let subject = subject();
    assert!(root.resolve(&tokens("mkdir here/new"), &subject).is_ok());
    assert!(root.resolve(&tokens("mkdir nowhere/new"), &subject).is_err());
}

// =============================================================================
// COMPLETION
// =============================================================================

#[test]
fn lists_the_typed_directory() {
    let dir = fixture();
    let root = tree(dir.path(), false);
    assert_eq!(offered(&root, "open h"), vec!["help/", "here/"]);
    assert_eq!(offered(&root, "open help/"), vec!["help/my/"]);
    assert_eq!(offered(&root, "open help/my/"), vec!["help/my/file.rb"]);
}

#[test]
fn hidden_entries_are_pruned() {
    let dir = fixture();
    let root = tree(dir.path(), false);
    assert!(offered(&root, "open .").is_empty());
}

#[test]
fn fuzzy_walks_the_whole_tree() {
    let dir = fixture();
    let root = tree(dir.path(), true);
    assert_eq!(
        offered(&root, "open hfi"),
        vec!["help/my/file.rb", "here/is_a/file.rb"]
    );
}
