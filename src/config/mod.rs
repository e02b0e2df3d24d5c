use crate::models::{GeneratorDefaults, UserSettings};
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;

/// Name of the settings file inside the configuration directory.
pub const SETTINGS_FILE_NAME: &str = "passgen.yaml";

/// Prefix for environment variable overrides, e.g. `PASSGEN_GENERATOR__LENGTH=20`.
pub const ENV_PREFIX: &str = "PASSGEN";

/// Configuration manager for loading and saving the YAML settings file.
///
/// Loading layers, lowest priority first:
/// - Built-in defaults ([`UserSettings::default`])
/// - `passgen.yaml` in the configuration directory (optional)
/// - `PASSGEN_*` environment variables, with `__` separating nested keys
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_dir: Utf8PathBuf,
    settings_path: Utf8PathBuf,
}

impl ConfigManager {
    /// Create a new ConfigManager for the given directory, creating it if needed.
    pub fn new<P: AsRef<Utf8Path>>(config_dir: P) -> Result<Self> {
        let config_dir = config_dir.as_ref().to_path_buf();

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)
                .with_context(|| format!("Failed to create config directory: {}", config_dir))?;
        }

        Ok(Self {
            settings_path: config_dir.join(SETTINGS_FILE_NAME),
            config_dir,
        })
    }

    /// Load settings from the file and the process environment.
    pub fn load_settings(&self) -> Result<UserSettings> {
        self.load_with_environment(config::Environment::with_prefix(ENV_PREFIX))
    }

    /// Load settings using `overrides` in place of the process environment.
    ///
    /// Keys use the same form as environment variables
    /// (`PASSGEN_GENERATOR__INCLUDE_DIGITS`).
    pub fn load_settings_with_overrides(
        &self,
        overrides: config::Map<String, String>,
    ) -> Result<UserSettings> {
        self.load_with_environment(
            config::Environment::with_prefix(ENV_PREFIX).source(Some(overrides)),
        )
    }

    /// Load settings from the file alone, ignoring environment overrides.
    pub fn load_file_settings(&self) -> Result<UserSettings> {
        self.load_layers(None)
    }

    fn load_with_environment(&self, environment: config::Environment) -> Result<UserSettings> {
        self.load_layers(Some(environment))
    }

    fn load_layers(&self, environment: Option<config::Environment>) -> Result<UserSettings> {
        if self.settings_path.exists() {
            tracing::info!("Loading settings from {}", self.settings_path);
        } else {
            tracing::warn!(
                "Settings file not found at {}, using defaults",
                self.settings_path
            );
        }

        let mut builder = config::Config::builder().add_source(
            config::File::from(self.settings_path.as_std_path())
                .format(config::FileFormat::Yaml)
                .required(false),
        );

        if let Some(environment) = environment {
            builder = builder.add_source(
                environment
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );
        }

        let layered = builder
            .build()
            .with_context(|| format!("Failed to read settings: {}", self.settings_path))?;

        let settings: UserSettings = layered
            .try_deserialize()
            .with_context(|| format!("Failed to parse settings: {}", self.settings_path))?;

        tracing::debug!(
            "Settings loaded: length={}, digits={}, special={}, copy_feedback={}ms",
            settings.generator.length,
            settings.generator.include_digits,
            settings.generator.include_special,
            settings.copy_feedback_ms
        );

        Ok(settings)
    }

    /// Save the settings file.
    pub fn save_settings(&self, settings: &UserSettings) -> Result<()> {
        let yaml_string =
            serde_yaml_ng::to_string(settings).context("Failed to serialize settings to YAML")?;

        fs::write(&self.settings_path, yaml_string)
            .with_context(|| format!("Failed to write settings: {}", self.settings_path))?;

        tracing::info!("Saved settings to {}", self.settings_path);
        Ok(())
    }

    /// Store new generator defaults, keeping the rest of the file as written.
    ///
    /// Environment overrides apply to one run only, so the other settings are
    /// re-read from the file rather than taken from the running configuration.
    pub fn save_generator_defaults(&self, generator: GeneratorDefaults) -> Result<()> {
        let mut settings = self.load_file_settings()?;
        settings.generator = generator;
        self.save_settings(&settings)
    }

    pub fn config_dir(&self) -> &Utf8Path {
        &self.config_dir
    }

    pub fn settings_path(&self) -> &Utf8Path {
        &self.settings_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_config_manager() -> (ConfigManager, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let config_path = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
        let manager = ConfigManager::new(&config_path).unwrap();
        (manager, temp_dir)
    }

    #[test]
    fn test_create_config_manager() {
        let (manager, _temp_dir) = create_test_config_manager();
        assert!(manager.settings_path().ends_with(SETTINGS_FILE_NAME));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let (manager, _temp_dir) = create_test_config_manager();

        let settings = manager
            .load_settings_with_overrides(config::Map::new())
            .unwrap();

        assert_eq!(settings, UserSettings::default());
    }

    #[test]
    fn test_load_save_settings() {
        let (manager, _temp_dir) = create_test_config_manager();

        let mut settings = UserSettings::default();
        settings.generator.length = 16;
        settings.generator.include_special = true;
        settings.copy_feedback_ms = 1500;
        manager.save_settings(&settings).unwrap();

        let loaded = manager
            .load_settings_with_overrides(config::Map::new())
            .unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_overrides_beat_file() {
        let (manager, _temp_dir) = create_test_config_manager();
        manager.save_settings(&UserSettings::default()).unwrap();

        let mut overrides = config::Map::new();
        overrides.insert("PASSGEN_GENERATOR__LENGTH".to_string(), "20".to_string());
        overrides.insert("PASSGEN_DEBUG_MODE".to_string(), "true".to_string());

        let settings = manager.load_settings_with_overrides(overrides).unwrap();

        assert_eq!(settings.generator.length, 20);
        assert!(settings.debug_mode);
        assert!(!settings.generator.include_digits);
    }

    #[test]
    fn test_save_generator_defaults_keeps_other_settings() {
        let (manager, _temp_dir) = create_test_config_manager();

        let mut settings = UserSettings::default();
        settings.copy_feedback_ms = 1500;
        manager.save_settings(&settings).unwrap();

        let mut generator = GeneratorDefaults::default();
        generator.length = 30;
        manager.save_generator_defaults(generator).unwrap();

        let loaded = manager.load_file_settings().unwrap();
        assert_eq!(loaded.generator.length, 30);
        assert_eq!(loaded.copy_feedback_ms, 1500);
    }
}
