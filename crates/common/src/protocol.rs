//! Persisted ciphertext layouts.
//!
//! # String envelope
//!
//! ```text
//! [IV: BLOCK_LEN][MAC: MAC_LEN][ciphertext: n * BLOCK_LEN]
//! ```
//!
//! Text form: `v1.<base64url-no-pad(envelope bytes)>`.
//!
//! # Encrypted file
//!
//! ```text
//! [ciphertext: plaintext length][IV: BLOCK_LEN]
//! ```
//!
//! The IV sits at the end of the file. That placement is a format convention
//! only; it must not change or existing files stop decrypting.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};

use crate::error::CryptoError;

/// Cipher block length in bytes (AES).
pub const BLOCK_LEN: usize = 16;

/// IV length in bytes; always exactly one block.
pub const IV_LEN: usize = BLOCK_LEN;

/// HMAC-SHA-256 tag length in bytes.
pub const MAC_LEN: usize = 32;

/// Smallest byte length an envelope can have (IV and MAC, no ciphertext).
pub const ENVELOPE_HEADER_LEN: usize = IV_LEN + MAC_LEN;

/// Length of the IV trailer appended to every encrypted file.
pub const FILE_TRAILER_LEN: usize = IV_LEN;

/// Prefix of the text form of an envelope.
pub const VERSION_PREFIX: &str = "v1";

/// A parsed string-cipher envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    /// Raw IV bytes.
    pub iv: [u8; IV_LEN],
    /// HMAC-SHA-256 over the padded plaintext.
    pub mac: [u8; MAC_LEN],
    /// CBC ciphertext, a whole number of blocks.
    pub ciphertext: Vec<u8>,
}

impl Envelope {
    /// Split raw envelope bytes into IV, MAC and ciphertext.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::EnvelopeTooShort`] if `bytes` cannot hold an IV
    /// and a MAC, and [`CryptoError::MisalignedCiphertext`] if the remaining
    /// ciphertext is not a multiple of [`BLOCK_LEN`].
    pub fn parse(bytes: &[u8]) -> Result<Self, CryptoError> {
        if bytes.len() < ENVELOPE_HEADER_LEN {
            return Err(CryptoError::EnvelopeTooShort(bytes.len()));
        }
        let (iv_bytes, rest) = bytes.split_at(IV_LEN);
        let (mac_bytes, ciphertext) = rest.split_at(MAC_LEN);
        if ciphertext.len() % BLOCK_LEN != 0 {
            return Err(CryptoError::MisalignedCiphertext);
        }

        let mut iv = [0u8; IV_LEN];
        iv.copy_from_slice(iv_bytes);
        let mut mac = [0u8; MAC_LEN];
        mac.copy_from_slice(mac_bytes);

        Ok(Self {
            iv,
            mac,
            ciphertext: ciphertext.to_vec(),
        })
    }

    /// Concatenate `IV || MAC || ciphertext`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(ENVELOPE_HEADER_LEN + self.ciphertext.len());
        out.extend_from_slice(&self.iv);
        out.extend_from_slice(&self.mac);
        out.extend_from_slice(&self.ciphertext);
        out
    }

    /// Encode this envelope to its text representation.
    pub fn to_string_repr(&self) -> String {
        format!("{}.{}", VERSION_PREFIX, URL_SAFE_NO_PAD.encode(self.to_bytes()))
    }

    /// Parse the text representation produced by [`Envelope::to_string_repr`].
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidEncoding`] if the prefix or base64 body is
    /// malformed, otherwise the same errors as [`Envelope::parse`].
    pub fn from_str_repr(s: &str) -> Result<Self, CryptoError> {
        let (prefix, body) = s.trim().split_once('.').ok_or(CryptoError::InvalidEncoding)?;
        if prefix != VERSION_PREFIX {
            return Err(CryptoError::InvalidEncoding);
        }
        let bytes = URL_SAFE_NO_PAD
            .decode(body)
            .map_err(|_| CryptoError::InvalidEncoding)?;
        Self::parse(&bytes)
    }
}
