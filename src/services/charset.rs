//! Character pool construction.
//!
//! The pool is always rebuilt from scratch for the current options; it is
//! never patched incrementally.

use crate::models::GeneratorOptions;

/// Upper then lower case ASCII letters. Always part of the pool.
pub const LETTERS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Appended when digits are enabled.
pub const DIGITS: &str = "0123456789";

/// Appended when special characters are enabled.
pub const SPECIAL_CHARS: &str = "!@#$%^&*~?;";

/// Ordered characters eligible for sampling.
pub type CharacterPool = Vec<char>;

/// Build the character pool for the given options.
///
/// Order is letters, then digits, then special characters. The letters are
/// unconditional, so the pool is never empty.
pub fn build_pool(options: &GeneratorOptions) -> CharacterPool {
    let mut pool: CharacterPool = Vec::with_capacity(pool_size(options));

    pool.extend(LETTERS.chars());

    if options.include_digits {
        pool.extend(DIGITS.chars());
    }

    if options.include_special {
        pool.extend(SPECIAL_CHARS.chars());
    }

    pool
}

/// Number of characters [`build_pool`] will return for these options.
pub fn pool_size(options: &GeneratorOptions) -> usize {
    let mut size = LETTERS.len();
    if options.include_digits {
        size += DIGITS.len();
    }
    if options.include_special {
        size += SPECIAL_CHARS.len();
    }
    size
}
