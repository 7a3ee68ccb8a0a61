use std::fs;

use cmdtree::config::ConfigError;
use cmdtree::{EngineConfig, KnobStore, Value};

/// Test that EngineConfig::default() produces the documented values.
#[test]
fn test_config_default_values() {
    let config = EngineConfig::default();

    assert_eq!(config.completion.deadline_ms, 500);
    assert_eq!(config.search.max_expansions, 100_000);
    assert!(config.knobs.path.is_none());
    assert!(config.tree.path.is_none());
}

/// Test that EngineConfig::config_path() returns a path ending with the expected filename.
#[test]
fn test_config_path_ends_with_expected() {
    let path = EngineConfig::config_path();
    assert!(path.ends_with("cmdtree/config.toml"));
}

/// Test validation passes for the default config.
#[test]
fn test_validation_passes_for_default() {
    assert!(EngineConfig::default().validate().is_ok());
}

/// Test validation rejects a zero completion deadline.
#[test]
fn test_validation_fails_zero_deadline() {
    let mut config = EngineConfig::default();
    config.completion.deadline_ms = 0;

    match config.validate().unwrap_err() {
        ConfigError::ValidationError { message } => {
            assert!(message.contains("deadline_ms"));
        }
        other => panic!("Expected ValidationError, got {:?}", other),
    }
}

/// Test validation rejects a zero expansion limit.
#[test]
fn test_validation_fails_zero_expansions() {
    let mut config = EngineConfig::default();
    config.search.max_expansions = 0;

    match config.validate().unwrap_err() {
        ConfigError::ValidationError { message } => {
            assert!(message.contains("max_expansions"));
        }
        other => panic!("Expected ValidationError, got {:?}", other),
    }
}

/// Test partial files fill the rest from defaults.
#[test]
fn test_load_from_partial_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        r#"
[completion]
deadline_ms = 50

[tree]
path = "demos/shell.toml"
"#,
    )
    .unwrap();

    let config = EngineConfig::load_from(&path).unwrap();
    assert_eq!(config.completion.deadline_ms, 50);
    assert_eq!(config.search.max_expansions, 100_000);
    assert_eq!(
        config.tree.path.as_deref(),
        Some(std::path::Path::new("demos/shell.toml"))
    );
}

/// Test a malformed file surfaces a parse error naming the file.
#[test]
fn test_load_from_malformed_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[completion\ndeadline_ms = ").unwrap();

    let err = EngineConfig::load_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
    assert!(err.to_string().contains("config.toml"));
}

/// Test a missing file is a read error.
#[test]
fn test_load_from_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = EngineConfig::load_from(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::ReadError { .. }));
}

/// Test a loaded file that fails validation is rejected.
#[test]
fn test_load_from_invalid_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[search]\nmax_expansions = 0\n").unwrap();

    let err = EngineConfig::load_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ValidationError { .. }));
}

/// Test the knob store reads nested tables from disk.
#[test]
fn test_knob_store_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("knobs.toml");
    fs::write(&path, "x = 3\n\n[test]\ny = \"four\"\n").unwrap();

    let knobs = KnobStore::load(&path).unwrap();
    assert_eq!(knobs.lookup(&[], "x"), Some(Some(Value::Int(3))));
    assert_eq!(
        knobs.lookup(&["test".to_string()], "y"),
        Some(Some(Value::from("four")))
    );
    assert_eq!(knobs.lookup(&["test".to_string()], "z"), Some(None));
    assert_eq!(knobs.lookup(&["nope".to_string()], "y"), None);
}
