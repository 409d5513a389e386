//! Symmetric encryption for files and short byte strings.
//!
//! Two independent entry points:
//!
//! - [`file_cipher`]: streams files of any size through AES-OFB and appends
//!   the IV as a trailing block. Unauthenticated.
//! - [`string_cipher`]: pads, MACs (HMAC-SHA-256) and encrypts (AES-CBC) short
//!   byte strings into an `IV || MAC || ciphertext` envelope.
//!
//! Both share the [`padding`] codec, the [`random`] source and the AES
//! [`crypto`] modes, but neither calls the other.
//!
//! # Security invariants
//!
//! - Every encryption draws a fresh IV from the OS CSPRNG.
//! - Key material, plaintext and MACs never appear in log fields.
//! - MAC comparison is constant time, and a failed envelope never yields
//!   its decrypted candidate.

pub mod crypto;
pub mod digest;
pub mod file_cipher;
pub mod key;
pub mod padding;
pub mod random;
pub mod string_cipher;

pub use common::protocol::{Envelope, BLOCK_LEN, IV_LEN, MAC_LEN};
pub use common::CryptoError;
pub use digest::sha256_file;
pub use file_cipher::{decrypt_file, encrypt_file, encrypt_file_with};
pub use key::Key;
pub use padding::{pad, unpad};
pub use random::{random_bytes, OsRandom, RandomSource};
pub use string_cipher::{
    decrypt_envelope, decrypt_string, encrypt_envelope, encrypt_envelope_with, encrypt_string,
    encrypt_string_with,
};
