//! Cryptographically secure random bytes.

use common::CryptoError;
use rand::{rngs::OsRng, RngCore};

/// A source of unpredictable bytes.
///
/// Every encrypting operation draws its IV through this trait. The production
/// implementation is [`OsRandom`]; tests substitute fixed or failing sources.
/// Sources are shared between threads, so implementations must be
/// `Send + Sync`.
#[cfg_attr(test, mockall::automock)]
pub trait RandomSource: Send + Sync {
    /// Fill `dest` entirely with random bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::EntropyError`] if the source cannot supply bytes.
    /// Implementations must never fall back to a weaker generator.
    fn fill(&self, dest: &mut [u8]) -> Result<(), CryptoError>;
}

/// The operating system CSPRNG.
///
/// Stateless, so a single value can be shared freely between threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn fill(&self, dest: &mut [u8]) -> Result<(), CryptoError> {
        OsRng
            .try_fill_bytes(dest)
            .map_err(|e| CryptoError::EntropyError(e.to_string()))
    }
}

/// Return `len` bytes from the OS CSPRNG.
///
/// # Errors
///
/// Returns [`CryptoError::EntropyError`] if the OS cannot supply randomness.
pub fn random_bytes(len: usize) -> Result<Vec<u8>, CryptoError> {
    random_bytes_with(&OsRandom, len)
}

/// Return `len` bytes from `rng`.
pub fn random_bytes_with<R: RandomSource + ?Sized>(
    rng: &R,
    len: usize,
) -> Result<Vec<u8>, CryptoError> {
    let mut bytes = vec![0u8; len];
    rng.fill(&mut bytes)?;
    Ok(bytes)
}
