//! Services module - Pure business logic for password generation.
//!
//! The services are **framework-agnostic**: nothing here knows about Slint or
//! the state container, so every piece can be tested in isolation.
//!
//! # Components
//!
//! - [`charset`]: Builds the character pool (letters, optional digits, optional
//!   special characters) for a [`GeneratorOptions`](crate::models::GeneratorOptions).
//! - [`sampler`]: [`PasswordSampler`] shuffles the pool and draws the password.
//!   [`generate_password`] ties the two together.
//! - [`clipboard`]: The [`ClipboardWriter`] capability and the [`SystemClipboard`]
//!   implementation used by the copy action.
//!
//! # Usage Example
//!
//! ```ignore
//! use passgen::models::{GeneratorOptions, PasswordLength};
//! use passgen::services::generate_password;
//!
//! let options = GeneratorOptions::new(PasswordLength::new(12)?, true, true);
//! let password = generate_password(&options);
//! assert_eq!(password.len(), 12);
//! ```

pub mod charset;
pub mod clipboard;
pub mod sampler;

pub use charset::{CharacterPool, DIGITS, LETTERS, SPECIAL_CHARS, build_pool, pool_size};
pub use clipboard::{ClipboardError, ClipboardWriter, SystemClipboard};
pub use sampler::{PasswordSampler, generate_password, generate_password_with};
