//! Tests for icon files, data URLs and generated engine ids.

use navpanel::services::icon_upload::*;
use navpanel::types::errors::ApiError;
use rstest::rstest;
use tempfile::TempDir;

#[test]
fn test_data_url() {
    let icon = IconFile::new("x.png", "image/png", b"hello".to_vec());
    assert_eq!(icon.to_data_url(), "data:image/png;base64,aGVsbG8=");
}

#[rstest]
#[case("logo.PNG", "image/png")]
#[case("photo.jpeg", "image/jpeg")]
#[case("favicon.ico", "image/x-icon")]
#[case("vector.svg", "image/svg+xml")]
#[case("noext", "application/octet-stream")]
fn test_guess_mime_type(#[case] name: &str, #[case] expected: &str) {
    assert_eq!(guess_mime_type(name), expected);
}

#[rstest]
#[case("DuckDuckGo", 1700000000000, "duckduckgo_1700000000000")]
#[case("My Search!", 42, "mysearch_42")]
#[case("百度", 7, "_7")]
fn test_generate_engine_id(#[case] name: &str, #[case] ts: i64, #[case] expected: &str) {
    assert_eq!(generate_engine_id(name, ts), expected);
}

#[test]
fn test_generate_engine_id_now_uses_current_time() {
    let id = generate_engine_id_now("Kagi");
    let (slug, ts) = id.split_once('_').unwrap();
    assert_eq!(slug, "kagi");
    assert!(ts.parse::<i64>().unwrap() > 1_600_000_000_000);
}

#[tokio::test]
async fn test_from_path_reads_file() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("engine.webp");
    std::fs::write(&path, [1u8, 2, 3]).unwrap();

    let icon = IconFile::from_path(&path).await.unwrap();
    assert_eq!(icon.file_name, "engine.webp");
    assert_eq!(icon.mime_type, "image/webp");
    assert_eq!(icon.bytes, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_from_path_missing_file_is_io_error() {
    let tmp = TempDir::new().unwrap();
    let result = IconFile::from_path(&tmp.path().join("missing.png")).await;
    assert!(matches!(result, Err(ApiError::Io(_))));
}
