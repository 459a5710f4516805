use navpanel::types::errors::*;

// === ApiError Tests ===

#[test]
fn api_error_status_display_matches_backend_wording() {
    assert_eq!(ApiError::Status(404).to_string(), "HTTP error! status: 404");
}

#[test]
fn api_error_display_variants() {
    assert_eq!(
        ApiError::Network("connection refused".to_string()).to_string(),
        "Network error: connection refused"
    );
    assert_eq!(
        ApiError::Decode("expected array".to_string()).to_string(),
        "Response decode error: expected array"
    );
    assert_eq!(
        ApiError::Io("icon.png: not found".to_string()).to_string(),
        "File read error: icon.png: not found"
    );
}

#[test]
fn api_error_from_serde_json_is_decode() {
    let err = serde_json::from_str::<Vec<u8>>("{").unwrap_err();
    assert!(matches!(ApiError::from(err), ApiError::Decode(_)));
}

// === StoreError Tests ===

#[test]
fn store_error_wraps_api_error_transparently() {
    let err = StoreError::from(ApiError::Status(500));
    assert_eq!(err.to_string(), "HTTP error! status: 500");
}

#[test]
fn store_error_source_is_api_error() {
    use std::error::Error;
    let err = StoreError::Api(ApiError::Status(502));
    assert!(err.source().is_some());
    assert!(StoreError::LastSearchEngine.source().is_none());
}

#[test]
fn store_error_display_variants() {
    assert_eq!(
        StoreError::LastSearchEngine.to_string(),
        "Cannot delete the last search engine"
    );
    assert_eq!(StoreError::InvalidIndex(7).to_string(), "Invalid index: 7");
    assert_eq!(
        StoreError::NotFound("g-1".to_string()).to_string(),
        "Not found: g-1"
    );
    assert_eq!(
        StoreError::Backup("disk full".to_string()).to_string(),
        "Backup error: disk full"
    );
}

// === ConfigError Tests ===

#[test]
fn config_error_display_variants() {
    assert_eq!(
        ConfigError::Parse("line 1".to_string()).to_string(),
        "Config parse error: line 1"
    );
    assert_eq!(
        ConfigError::InvalidValue("NAVPANEL_DEMO".to_string()).to_string(),
        "Invalid config value: NAVPANEL_DEMO"
    );
}

#[test]
fn config_error_implements_error_trait() {
    let err: Box<dyn std::error::Error> = Box::new(ConfigError::IoError("denied".to_string()));
    assert!(err.source().is_none());
}
