use std::fs;

use tempfile::NamedTempFile;
use zwave_state::{ConfigError, DispatcherConfig};

#[test]
fn loads_config_from_file() {
    let input = r#"
auto_create_nodes = false
evict_removed_nodes = false
event_capacity = 16
"#;
    let file = NamedTempFile::new().expect("temp file");
    fs::write(file.path(), input).expect("write");

    let cfg = DispatcherConfig::from_path(file.path()).expect("load");
    assert!(!cfg.auto_create_nodes);
    assert!(!cfg.evict_removed_nodes);
    assert_eq!(cfg.event_capacity, 16);
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = DispatcherConfig::from_path(dir.path().join("absent.toml")).expect_err("missing");
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn wrong_type_is_parse_error() {
    let err = DispatcherConfig::from_toml("event_capacity = \"lots\"").expect_err("bad type");
    assert!(matches!(err, ConfigError::Parse(_)));
}
