use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Shortest password the generator will produce.
pub const MIN_PASSWORD_LENGTH: u32 = 8;

/// Longest password the generator will produce.
pub const MAX_PASSWORD_LENGTH: u32 = 50;

/// Errors raised when building generator options
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeneratorError {
    #[error("Password length {value} is outside the allowed range {min}..={max}")]
    LengthOutOfRange { value: u32, min: u32, max: u32 },
}

/// A password length that is always within `[8, 50]`.
///
/// The slider in the UI can only produce values in this range, but lengths
/// also arrive from the settings file and environment, so the bound is held
/// by the type rather than re-checked by every consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct PasswordLength(u32);

impl PasswordLength {
    pub const MIN: Self = Self(MIN_PASSWORD_LENGTH);
    pub const MAX: Self = Self(MAX_PASSWORD_LENGTH);

    /// Validate a length, rejecting anything outside `[8, 50]`.
    pub fn new(value: u32) -> Result<Self, GeneratorError> {
        if (MIN_PASSWORD_LENGTH..=MAX_PASSWORD_LENGTH).contains(&value) {
            Ok(Self(value))
        } else {
            Err(GeneratorError::LengthOutOfRange {
                value,
                min: MIN_PASSWORD_LENGTH,
                max: MAX_PASSWORD_LENGTH,
            })
        }
    }

    /// Clamp any integer into `[8, 50]`.
    ///
    /// Used where the input is already constrained by its source (the
    /// slider) or where a bad value should degrade rather than fail
    /// (the settings file).
    pub fn saturating(value: i64) -> Self {
        let clamped = value.clamp(MIN_PASSWORD_LENGTH as i64, MAX_PASSWORD_LENGTH as i64);
        Self(clamped as u32)
    }

    /// Number of characters as a `usize`, for sampling loops.
    pub fn get(self) -> usize {
        self.0 as usize
    }

    pub fn as_u32(self) -> u32 {
        self.0
    }
}

impl Default for PasswordLength {
    fn default() -> Self {
        Self::MIN
    }
}

impl TryFrom<u32> for PasswordLength {
    type Error = GeneratorError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PasswordLength> for u32 {
    fn from(length: PasswordLength) -> Self {
        length.0
    }
}

impl fmt::Display for PasswordLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// User-selected constraints that drive password generation.
///
/// Every change to any field triggers a fresh password (see
/// [`StateManager`](crate::state::StateManager)).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GeneratorOptions {
    pub length: PasswordLength,
    pub include_digits: bool,
    pub include_special: bool,
}

impl GeneratorOptions {
    pub fn new(length: PasswordLength, include_digits: bool, include_special: bool) -> Self {
        Self {
            length,
            include_digits,
            include_special,
        }
    }
}
