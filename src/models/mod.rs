//! Data models for the PassGen application.
//!
//! - [`GeneratorOptions`]: The user-selected constraints (length, digits, special characters)
//! - [`PasswordLength`]: A length that is guaranteed to lie in `[8, 50]`
//! - [`AppState`]: The central state container (options, current password, copy state)
//! - [`UserSettings`]: Preferences and starting options loaded from `passgen.yaml`

pub mod app_state;
pub mod config;
pub mod options;

pub use app_state::{AppState, copy_label_for};
pub use config::{DEFAULT_COPY_FEEDBACK_MS, GeneratorDefaults, UserSettings};
pub use options::{
    GeneratorError, GeneratorOptions, MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH, PasswordLength,
};
