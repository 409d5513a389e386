//! Error type and persisted ciphertext layouts shared across `symcrypt` crates.

pub mod error;
pub mod protocol;

pub use error::CryptoError;
