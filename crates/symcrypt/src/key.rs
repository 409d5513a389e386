//! [`Key`]: owned, length-checked key bytes.

use common::CryptoError;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::crypto::SUPPORTED_KEY_LENS;

/// Caller key material of a supported AES length.
///
/// The cipher functions take plain `&[u8]` keys; this wrapper is for callers
/// that hold a key for a while. When dropped, the bytes are overwritten with
/// zeroes.
#[derive(Clone)]
pub struct Key(Box<[u8]>);

impl Key {
    /// Copy `bytes` into a new [`Key`].
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidKey`] unless `bytes` is 16, 24 or 32 bytes.
    pub fn new(bytes: &[u8]) -> Result<Self, CryptoError> {
        if !SUPPORTED_KEY_LENS.contains(&bytes.len()) {
            return Err(CryptoError::InvalidKey(bytes.len()));
        }
        Ok(Self(bytes.into()))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Key length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false` for a constructed key.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Zeroize for Key {
    fn zeroize(&mut self) {
        self.0[..].zeroize();
    }
}

impl Drop for Key {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl ZeroizeOnDrop for Key {}

impl std::fmt::Debug for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Key bytes never reach debug output.
        f.write_str("Key([REDACTED])")
    }
}
