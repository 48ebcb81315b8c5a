use std::time::Duration;

use player_core::{Settings, SettingsError};

#[test]
fn missing_file_means_no_settings() {
    let dir = tempfile::tempdir().unwrap();

    let loaded = Settings::load_from(&dir.path().join("settings.json")).unwrap();

    assert!(loaded.is_none());
}

#[test]
fn partial_file_keeps_defaults_for_the_rest() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, r#"{ "volume": 0.5, "start_dir": "/music" }"#).unwrap();

    let settings = Settings::load_from(&path).unwrap().unwrap();

    assert_eq!(settings.volume(), 0.5);
    assert_eq!(settings.start_dir.as_deref(), Some(std::path::Path::new("/music")));
    assert_eq!(settings.poll_interval(), Duration::from_millis(20));
    assert_eq!(settings.window_width, 400.0);
    assert_eq!(settings.window_height, 200.0);
}

#[test]
fn malformed_file_is_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, "{ volume: loud }").unwrap();

    let result = Settings::load_from(&path);

    assert!(matches!(result, Err(SettingsError::Parse { .. })));
}

#[test]
fn out_of_range_values_are_tamed() {
    let settings = Settings {
        volume: 3.0,
        poll_interval_ms: 0,
        ..Settings::default()
    };

    assert_eq!(settings.volume(), 1.0);
    assert_eq!(settings.poll_interval(), Duration::from_millis(1));
}
