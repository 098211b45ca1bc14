//! Integration tests for ConfigManager and configuration file handling
//!
//! These tests verify:
//! - Configuration loading and saving
//! - Defaults when the file or individual fields are missing
//! - Integration with StateManager initial state

use camino::Utf8PathBuf;
use imgcompare::config::USER_CONFIG_FILE;
use imgcompare::models::{Direction, ImageSource, Placeholder, Variant};
use imgcompare::{ConfigManager, StateManager, UserConfig};
use std::fs;
use tempfile::TempDir;

fn create_test_config_dir() -> (TempDir, Utf8PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let config_path = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
    (temp_dir, config_path)
}

#[test]
fn test_create_config_manager() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let manager = ConfigManager::new(&config_path).unwrap();

    assert_eq!(manager.config_dir(), config_path.as_path());
    assert_eq!(manager.user_config_path(), config_path.join(USER_CONFIG_FILE).as_path());
}

#[test]
fn test_creates_missing_config_dir() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let nested = config_path.join("imgcompare Data");

    ConfigManager::new(&nested).unwrap();
    assert!(nested.is_dir());
}

#[test]
fn test_load_default_user_config() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let manager = ConfigManager::new(&config_path).unwrap();

    let settings = manager.load_user_config().unwrap().compare_settings;

    assert_eq!(settings.default_variant, Variant::Slider);
    assert_eq!(settings.default_direction, Direction::Ltr);
    assert_eq!(settings.raw_marker, "raw");
    assert!(settings.verify_decode);
    assert!(!settings.debug_mode);
    assert_eq!(settings.log_dir, "logs");
}

#[test]
fn test_load_handwritten_yaml() {
    let (_temp_dir, config_path) = create_test_config_dir();
    fs::write(
        config_path.join(USER_CONFIG_FILE),
        r#"Compare_Settings:
  Default Variant: overlay
  Default Direction: rtl
  Raw Marker: original
  Verify Decode: false
  Placeholder Before:
    Url: https://example.com/before.webp
    Filename: before.webp
"#,
    )
    .unwrap();

    let manager = ConfigManager::new(&config_path).unwrap();
    let settings = manager.load_user_config().unwrap().compare_settings;

    assert_eq!(settings.default_variant, Variant::Overlay);
    assert_eq!(settings.default_direction, Direction::Rtl);
    assert_eq!(settings.raw_marker, "original");
    assert!(!settings.verify_decode);
    assert_eq!(settings.placeholder_before.filename, "before.webp");
    // Not in the file
    assert_eq!(settings.placeholder_after.filename, "compressed.jpg");
}

#[test]
fn test_invalid_yaml_is_an_error() {
    let (_temp_dir, config_path) = create_test_config_dir();
    fs::write(
        config_path.join(USER_CONFIG_FILE),
        "Compare_Settings:\n  Default Variant: curtain\n",
    )
    .unwrap();

    let manager = ConfigManager::new(&config_path).unwrap();
    let err = manager.load_user_config().unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to parse user config"));
}

#[test]
fn test_save_and_reload() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let manager = ConfigManager::new(&config_path).unwrap();

    let mut config = UserConfig::default();
    config.compare_settings.default_direction = Direction::Rtl;
    config.compare_settings.placeholder_after = Placeholder {
        url: "https://example.com/after.png".to_string(),
        filename: "after.png".to_string(),
    };
    manager.save_user_config(&config).unwrap();

    let loaded = manager.load_user_config().unwrap().compare_settings;
    assert_eq!(loaded.default_direction, Direction::Rtl);
    assert_eq!(loaded.placeholder_after, config.compare_settings.placeholder_after);
}

#[test]
fn test_integration_with_state_manager() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let manager = ConfigManager::new(&config_path).unwrap();

    let mut config = UserConfig::default();
    config.compare_settings.default_variant = Variant::Split;
    manager.save_user_config(&config).unwrap();

    let settings = manager.load_user_config().unwrap().compare_settings;
    let state = StateManager::from_settings(&settings);
    let snapshot = state.snapshot();

    assert_eq!(snapshot.config.variant, Variant::Split);
    assert_eq!(
        snapshot.before.image(),
        &ImageSource::Url("https://picsum.photos/id/40/800/600".to_string())
    );
    assert_eq!(snapshot.before.size_kb(), 0.0);
}
