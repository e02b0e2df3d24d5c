//! Password sampling.
//!
//! Sampling is two steps:
//! 1. Fisher-Yates shuffle of the pool (`SliceRandom::shuffle`, which draws
//!    each swap index from `[0, i]` with an unbiased range draw)
//! 2. `length` independent uniform draws from the shuffled pool
//!
//! The shuffle does not change the output distribution because the draws are
//! independent and uniform. It costs one pass over at most 73 characters.
//!
//! Both steps use the same random source. In production that is the
//! operating system CSPRNG ([`OsRng`]); tests inject a seeded `StdRng`.

use crate::models::{GeneratorOptions, PasswordLength};
use crate::services::charset::{CharacterPool, build_pool};
use rand::rngs::OsRng;
use rand::seq::SliceRandom;
use rand::{CryptoRng, Rng};

/// Draws passwords from a character pool.
#[derive(Debug, Clone)]
pub struct PasswordSampler<R> {
    rng: R,
}

impl PasswordSampler<OsRng> {
    /// Sampler backed by the operating system CSPRNG.
    pub fn new() -> Self {
        Self { rng: OsRng }
    }
}

impl Default for PasswordSampler<OsRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng + CryptoRng> PasswordSampler<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Shuffle `pool` and draw `length` characters from it.
    ///
    /// Characters may repeat. An empty pool yields an empty string; the
    /// charset builder never produces one.
    pub fn sample(&mut self, mut pool: CharacterPool, length: PasswordLength) -> String {
        if pool.is_empty() {
            tracing::warn!("Sampler received an empty character pool");
            return String::new();
        }

        pool.shuffle(&mut self.rng);

        (0..length.get())
            .map(|_| pool[self.rng.gen_range(0..pool.len())])
            .collect()
    }
}

/// Generate a password for the given options using the OS CSPRNG.
pub fn generate_password(options: &GeneratorOptions) -> String {
    PasswordSampler::new().sample(build_pool(options), options.length)
}

/// Generate a password with a caller-supplied random source.
pub fn generate_password_with<R: Rng + CryptoRng>(options: &GeneratorOptions, rng: &mut R) -> String {
    PasswordSampler::with_rng(rng).sample(build_pool(options), options.length)
}
