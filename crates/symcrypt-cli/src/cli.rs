//! Command-line definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Encrypt files and short strings with a shared AES key.
///
/// The key is taken from SYMCRYPT_KEY_HEX or SYMCRYPT_KEY_FILE.
#[derive(Debug, Parser)]
#[command(name = "symcrypt")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Encrypt SRC into DST (AES-OFB, IV appended, no integrity check)
    EncryptFile { src: PathBuf, dst: PathBuf },

    /// Decrypt a file produced by encrypt-file
    DecryptFile { src: PathBuf, dst: PathBuf },

    /// Encrypt TEXT and print the authenticated envelope
    EncryptString { text: String },

    /// Verify and decrypt an envelope printed by encrypt-string
    DecryptString { envelope: String },

    /// Print the SHA-256 digest of a file
    Digest { path: PathBuf },
}
