//! Integration tests for config files and bulk loading from JSON.

use std::fs;

use postindex::error::{ConfigError, IndexError, LoadError};
use postindex::{IndexConfig, RecordIndex};
use tempfile::tempdir;

const POSTS_JSON: &str = r#"[
    {"timestamp": "1/1/2024 08:30", "content": "Good morning", "author": "Mohammed", "views": 98},
    {"timestamp": "4/1/2024 09:00", "content": "Eid Mubarak", "author": "Sara", "views": 20},
    {"timestamp": "17/1/2024 15:00", "content": "Coffee dose", "author": "Ali", "views": 56},
    {"timestamp": "10/1/2024 14:00", "content": "Rainy Day", "author": "Shamma", "views": 105},
    {"timestamp": "13/1/2024 12:00", "content": "Ramadan Kareem", "author": "Noora", "views": 200},
    {"timestamp": "7/1/2024 10:00", "content": "Family", "author": "Saif"}
]"#;

#[test]
fn test_load_posts_file() {
    let temp_dir = tempdir().unwrap();
    let posts_path = temp_dir.path().join("posts.json");
    fs::write(&posts_path, POSTS_JSON).unwrap();

    let mut index = RecordIndex::new();
    let added = index.load_json_file(&posts_path).unwrap();
    assert_eq!(added, 6);
    assert_eq!(index.len(), 6);

    let family = index.get_by_timestamp("7/1/2024 10:00").unwrap().unwrap();
    assert_eq!(family.views, 0);

    let mid_month = index
        .get_in_range("10/1/2024 00:00", "14/1/2024 23:59")
        .unwrap();
    let contents: Vec<_> = mid_month.iter().map(|p| p.content.as_str()).collect();
    assert_eq!(contents, ["Rainy Day", "Ramadan Kareem"]);
}

#[test]
fn test_load_missing_posts_file() {
    let temp_dir = tempdir().unwrap();
    let mut index = RecordIndex::new();
    let result = index.load_json_file(temp_dir.path().join("absent.json"));
    assert!(matches!(
        result,
        Err(IndexError::Load(LoadError::Read { .. }))
    ));
}

#[test]
fn test_load_reports_bad_entry_position() {
    let temp_dir = tempdir().unwrap();
    let posts_path = temp_dir.path().join("posts.json");
    fs::write(
        &posts_path,
        r#"[
            {"timestamp": "1/1/2024 08:30", "content": "a", "author": "x"},
            {"timestamp": "1/1/2024 08:31", "content": "b", "author": "y"},
            {"timestamp": "1/13/2024 08:32", "content": "c", "author": "z"}
        ]"#,
    )
    .unwrap();

    let mut index = RecordIndex::new();
    let err = index.load_json_file(&posts_path).unwrap_err();
    match err {
        IndexError::Load(LoadError::Entry { position, source }) => {
            assert_eq!(position, 2);
            assert_eq!(source.input, "1/13/2024 08:32");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(index.is_empty());
}

#[test]
fn test_config_file_round_trip() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("index.json");

    let config = IndexConfig {
        timestamp_format: "%Y-%m-%d %H:%M".to_string(),
        initial_capacity: 32,
    };
    fs::write(&config_path, serde_json::to_string_pretty(&config).unwrap()).unwrap();

    let loaded = IndexConfig::load(&config_path).unwrap();
    assert_eq!(loaded, config);

    let mut index = RecordIndex::with_config(&loaded).unwrap();
    index.add("2024-01-13 12:00", "Ramadan Kareem", "Noora", 200).unwrap();
    assert_eq!(index.pop_max_views().unwrap().author, "Noora");
}

#[test]
fn test_config_file_rejects_bad_format() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("index.json");
    fs::write(&config_path, r#"{"timestamp_format": "%H:%M"}"#).unwrap();

    assert!(matches!(
        IndexConfig::load(&config_path),
        Err(IndexError::Config(ConfigError::InvalidFormat { .. }))
    ));
}

#[test]
fn test_config_file_malformed_json() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("index.json");
    fs::write(&config_path, "{ not json").unwrap();

    assert!(matches!(
        IndexConfig::load(&config_path),
        Err(IndexError::Config(ConfigError::Parse { .. }))
    ));
}

#[test]
fn test_config_file_missing() {
    let temp_dir = tempdir().unwrap();
    assert!(matches!(
        IndexConfig::load(temp_dir.path().join("nope.json")),
        Err(IndexError::Config(ConfigError::Read { .. }))
    ));
}
