//! Integration tests for ConfigManager and the settings file
//!
//! These tests verify:
//! - Settings loading and saving
//! - Defaults when the file is missing or partial
//! - Environment overrides
//! - Integration with StateManager

use camino::Utf8PathBuf;
use passgen::models::GeneratorDefaults;
use passgen::{ConfigManager, GeneratorOptions, PasswordLength, StateManager, UserSettings};
use std::fs;
use tempfile::TempDir;

fn create_test_config_dir() -> (TempDir, Utf8PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let config_path = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
    (temp_dir, config_path)
}

fn no_overrides() -> config::Map<String, String> {
    config::Map::new()
}

#[test]
fn test_create_config_manager() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let manager = ConfigManager::new(&config_path).unwrap();

    assert_eq!(manager.config_dir(), &config_path);
}

#[test]
fn test_creates_missing_directory() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let nested = config_path.join("PassGen Data");

    let manager = ConfigManager::new(&nested).unwrap();

    assert!(nested.exists());
    assert_eq!(manager.settings_path(), nested.join("passgen.yaml"));
}

#[test]
fn test_partial_file_fills_defaults() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let manager = ConfigManager::new(&config_path).unwrap();

    fs::write(
        manager.settings_path(),
        "generator:\n  length: 32\n  include_special: true\n",
    )
    .unwrap();

    let settings = manager.load_settings_with_overrides(no_overrides()).unwrap();

    assert_eq!(settings.generator.length, 32);
    assert!(settings.generator.include_special);
    assert!(!settings.generator.include_digits);
    assert_eq!(settings.copy_feedback_ms, 1000);
}

#[test]
fn test_invalid_yaml_is_an_error() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let manager = ConfigManager::new(&config_path).unwrap();

    fs::write(manager.settings_path(), "generator: [unclosed").unwrap();

    assert!(manager.load_settings_with_overrides(no_overrides()).is_err());
}

#[test]
fn test_out_of_range_length_is_clamped() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let manager = ConfigManager::new(&config_path).unwrap();

    fs::write(manager.settings_path(), "generator:\n  length: 3\n").unwrap();

    let settings = manager.load_settings_with_overrides(no_overrides()).unwrap();
    assert_eq!(settings.generator.to_options().length, PasswordLength::MIN);
}

#[test]
fn test_environment_overrides() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let manager = ConfigManager::new(&config_path).unwrap();

    let mut overrides = no_overrides();
    overrides.insert("PASSGEN_GENERATOR__INCLUDE_DIGITS".to_string(), "true".to_string());
    overrides.insert("PASSGEN_COPY_FEEDBACK_MS".to_string(), "2500".to_string());

    let settings = manager.load_settings_with_overrides(overrides).unwrap();

    assert!(settings.generator.include_digits);
    assert_eq!(settings.copy_feedback_ms, 2500);
}

#[test]
fn test_saved_options_round_trip_into_state() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let manager = ConfigManager::new(&config_path).unwrap();

    // Simulate a session that ends with custom options
    let session = StateManager::new();
    session.set_options(GeneratorOptions::new(
        PasswordLength::new(18).unwrap(),
        true,
        true,
    ));

    let settings = UserSettings {
        generator: GeneratorDefaults::from_options(&session.options()),
        ..UserSettings::default()
    };
    manager.save_settings(&settings).unwrap();

    // The saved file never contains the password
    let written = fs::read_to_string(manager.settings_path()).unwrap();
    assert!(!written.contains(&session.read(|s| s.password.clone())));

    // Next launch starts with the same options
    let loaded = manager.load_settings_with_overrides(no_overrides()).unwrap();
    let next = StateManager::with_options(loaded.generator.to_options());

    assert_eq!(next.options(), session.options());
    assert_eq!(next.read(|s| s.password.len()), 18);
}

#[test]
fn test_environment_overrides_are_not_persisted() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let manager = ConfigManager::new(&config_path).unwrap();
    manager.save_settings(&UserSettings::default()).unwrap();

    let mut overrides = no_overrides();
    overrides.insert("PASSGEN_DEBUG_MODE".to_string(), "true".to_string());
    overrides.insert("PASSGEN_COPY_FEEDBACK_MS".to_string(), "5000".to_string());
    let running = manager.load_settings_with_overrides(overrides).unwrap();
    assert!(running.debug_mode);

    // The session ends with new options, which are saved
    let session = StateManager::with_options(running.generator.to_options());
    session.set_length(PasswordLength::new(21).unwrap());
    manager
        .save_generator_defaults(GeneratorDefaults::from_options(&session.options()))
        .unwrap();

    let reloaded = manager.load_settings_with_overrides(no_overrides()).unwrap();
    assert_eq!(reloaded.generator.length, 21);
    assert!(!reloaded.debug_mode);
    assert_eq!(reloaded.copy_feedback_ms, 1000);
}
