//! Error type shared by every symcrypt crate.

use thiserror::Error;

/// Every failure the padding, file and string ciphers can report.
///
/// Variants map to process exit codes returned by the CLI:
/// - caller mistakes (bad key, bad block size) → 2
/// - malformed or tampered input → 3
/// - entropy failure → 4
/// - I/O failure → 5
///
/// [`CryptoError::InvalidPadding`] and [`CryptoError::AuthenticationFailure`]
/// deliberately carry no detail about where validation stopped.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// `unpad` was handed a zero-length buffer.
    #[error("cannot unpad an empty buffer")]
    EmptyInput,

    /// The padding trailer is malformed.
    #[error("invalid padding")]
    InvalidPadding,

    /// Padding block sizes must fit in a single pad byte.
    #[error("invalid block size: {0} (must be 1..=255)")]
    InvalidBlockSize(usize),

    /// The OS random source could not supply bytes.
    #[error("entropy source unavailable: {0}")]
    EntropyError(String),

    /// The key length does not select a supported cipher.
    #[error("invalid key length: expected 16, 24 or 32 bytes, got {0}")]
    InvalidKey(usize),

    /// Padded plaintext was not block aligned before encryption.
    #[error("plaintext is not a multiple of the block size")]
    InvalidPlaintextLength,

    /// An encrypted file is too short to hold its IV trailer.
    #[error("encrypted file truncated: {0} bytes is shorter than one block")]
    TruncatedFile(u64),

    /// An envelope is too short to hold IV and MAC.
    #[error("envelope too short: {0} bytes")]
    EnvelopeTooShort(usize),

    /// Envelope ciphertext does not cover a whole number of blocks.
    #[error("ciphertext broken or corrupted")]
    MisalignedCiphertext,

    /// The MAC did not match; the message was corrupted or the key is wrong.
    #[error("authentication failed: message corrupted")]
    AuthenticationFailure,

    /// The text form of an envelope could not be decoded.
    #[error("invalid envelope encoding")]
    InvalidEncoding,

    /// Reading or writing a file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CryptoError {
    /// Returns the process exit code that should be used for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            CryptoError::InvalidBlockSize(_)
            | CryptoError::InvalidKey(_)
            | CryptoError::InvalidPlaintextLength => 2,
            CryptoError::EmptyInput
            | CryptoError::InvalidPadding
            | CryptoError::TruncatedFile(_)
            | CryptoError::EnvelopeTooShort(_)
            | CryptoError::MisalignedCiphertext
            | CryptoError::AuthenticationFailure
            | CryptoError::InvalidEncoding => 3,
            CryptoError::EntropyError(_) => 4,
            CryptoError::Io(_) => 5,
        }
    }
}
