use tempfile::TempDir;
use treequery::config::{Config, OutputFormat};

#[test]
fn test_config_defaults() {
    let config = Config::default();

    assert_eq!(config.default_query, "\\>\"");
    assert_eq!(config.output_format, OutputFormat::Paths);
    assert_eq!(config.log_level, "warn");
    assert!(config.show_values);
}

#[test]
fn test_default_query_parses() {
    let config = Config::default();
    let query: treequery::Query = config.default_query.parse().unwrap();
    assert_eq!(query.to_string(), config.default_query);
}

#[test]
fn test_save_and_load_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let config = Config {
        default_query: "users>|>name".to_string(),
        output_format: OutputFormat::Json,
        log_level: "debug".to_string(),
        show_values: false,
    };
    config.save_to(&path).unwrap();

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_load_from_partial_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "show_values = false\n").unwrap();

    let config = Config::load_from(&path).unwrap();
    assert!(!config.show_values);
    assert_eq!(config.output_format, OutputFormat::Paths);
}

#[test]
fn test_load_from_reports_errors() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.toml");
    assert!(Config::load_from(&missing).is_err());

    let invalid = dir.path().join("invalid.toml");
    std::fs::write(&invalid, "output_format = 42\n").unwrap();
    let message = format!("{:#}", Config::load_from(&invalid).unwrap_err());
    assert!(message.contains("Failed to parse config file"));
}
