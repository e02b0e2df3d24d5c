use super::options::{GeneratorOptions, MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH, PasswordLength};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default time the copy button shows "Copied".
pub const DEFAULT_COPY_FEEDBACK_MS: u64 = 1000;

/// User settings from `passgen.yaml`
///
/// Holds the options the generator starts with and a few application
/// preferences. Generated passwords are never stored here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    pub generator: GeneratorDefaults,

    /// How long CopyState stays true after a copy, in milliseconds
    pub copy_feedback_ms: u64,

    pub debug_mode: bool,

    /// Mirror log output to the console as well as the log file
    pub console_logging: bool,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            generator: GeneratorDefaults::default(),
            copy_feedback_ms: DEFAULT_COPY_FEEDBACK_MS,
            debug_mode: false,
            console_logging: true,
        }
    }
}

impl UserSettings {
    pub fn copy_feedback(&self) -> Duration {
        Duration::from_millis(self.copy_feedback_ms)
    }
}

/// Starting generator options as stored on disk.
///
/// The length is kept as a plain integer so that a hand-edited file with an
/// out-of-range value still loads; [`to_options`](Self::to_options) clamps it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorDefaults {
    pub length: u32,
    pub include_digits: bool,
    pub include_special: bool,
}

impl Default for GeneratorDefaults {
    fn default() -> Self {
        Self::from_options(&GeneratorOptions::default())
    }
}

impl GeneratorDefaults {
    pub fn from_options(options: &GeneratorOptions) -> Self {
        Self {
            length: options.length.as_u32(),
            include_digits: options.include_digits,
            include_special: options.include_special,
        }
    }

    /// Convert to runtime options, clamping the length into range.
    pub fn to_options(&self) -> GeneratorOptions {
        let length = PasswordLength::new(self.length).unwrap_or_else(|_| {
            let clamped = PasswordLength::saturating(self.length as i64);
            tracing::warn!(
                "Configured password length {} is outside {}..={}, using {}",
                self.length,
                MIN_PASSWORD_LENGTH,
                MAX_PASSWORD_LENGTH,
                clamped
            );
            clamped
        });

        GeneratorOptions::new(length, self.include_digits, self.include_special)
    }
}
