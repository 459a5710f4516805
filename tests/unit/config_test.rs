//! Tests for `AppConfig`: file loading and flag overrides.

use std::fs;
use std::path::PathBuf;

use navpanel::config::*;
use navpanel::services::api_client::DEFAULT_API_BASE_URL;
use navpanel::services::icon_upload::IconTransport;
use navpanel::types::errors::ConfigError;
use tempfile::TempDir;

#[test]
fn test_missing_file_gives_defaults() {
    let tmp = TempDir::new().unwrap();
    let config = AppConfig::from_file(&tmp.path().join("config.json")).unwrap();
    assert_eq!(config, AppConfig::default());
    assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
    assert!(!config.demo);
}

#[test]
fn test_partial_file_keeps_other_defaults() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("config.json");
    fs::write(
        &path,
        r#"{"api_base_url": "http://nas.local:9000/api", "icon_transport": "data_url"}"#,
    )
    .unwrap();

    let config = AppConfig::from_file(&path).unwrap();
    assert_eq!(config.api_base_url, "http://nas.local:9000/api");
    assert_eq!(config.icon_transport, IconTransport::DataUrl);
    assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
}

#[test]
fn test_malformed_file_is_parse_error() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("config.json");
    fs::write(&path, "{ api_base_url: ").unwrap();
    assert!(matches!(
        AppConfig::from_file(&path),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn test_flags_override_file_values() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("config.json");
    fs::write(&path, r#"{"api_base_url": "http://nas.local:9000/api", "log_filter": "warn"}"#)
        .unwrap();

    let args = ConfigArgs {
        config: Some(path),
        api_url: Some("https://dash.example.com/api/".to_string()),
        export_dir: Some(PathBuf::from("/srv/backups")),
        log: Some("navpanel=debug".to_string()),
        demo: true,
    };
    let config = AppConfig::load(&args).unwrap();

    assert_eq!(config.api_base_url, "https://dash.example.com/api");
    assert_eq!(config.export_dir(), PathBuf::from("/srv/backups"));
    assert_eq!(config.log_filter, "navpanel=debug");
    assert!(config.demo);
}

#[test]
fn test_absent_flags_keep_file_values() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("config.json");
    fs::write(&path, r#"{"log_filter": "warn", "demo": true}"#).unwrap();

    let args = ConfigArgs {
        config: Some(path),
        ..ConfigArgs::default()
    };
    let config = AppConfig::load(&args).unwrap();

    assert_eq!(config.log_filter, "warn");
    assert!(config.demo);
    assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
}

#[test]
fn test_blank_flag_values_are_ignored() {
    let mut config = AppConfig::default();
    config.apply_args(&ConfigArgs {
        api_url: Some("  ".to_string()),
        log: Some(String::new()),
        ..ConfigArgs::default()
    });
    assert_eq!(config, AppConfig::default());
}

#[test]
fn test_load_reports_malformed_file() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("config.json");
    fs::write(&path, "[").unwrap();

    let args = ConfigArgs {
        config: Some(path),
        ..ConfigArgs::default()
    };
    assert!(matches!(AppConfig::load(&args), Err(ConfigError::Parse(_))));
}
