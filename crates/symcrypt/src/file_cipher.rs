//! Streaming file encryption with AES-OFB.
//!
//! # File layout
//!
//! ```text
//! [ciphertext: plaintext length][IV: 16 bytes]
//! ```
//!
//! Files are processed through a fixed-size copy buffer and never loaded whole.
//! There is no integrity protection: decrypting with the wrong key silently
//! produces garbage. Callers that need integrity use [`crate::string_cipher`]
//! or add their own MAC.
//!
//! A failure mid-stream leaves a partial destination file behind; cleaning it
//! up is the caller's job.

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::Path;

use common::protocol::{FILE_TRAILER_LEN, IV_LEN};
use common::CryptoError;
use tracing::debug;

use crate::crypto::ofb::{Ofb, OfbReader, OfbWriter};
use crate::crypto::BlockCipher;
use crate::random::{OsRandom, RandomSource};

/// Encrypt `src` into `dst` under `key` with a fresh IV from the OS CSPRNG.
///
/// Returns the IV that was appended to `dst`.
///
/// # Errors
///
/// - [`CryptoError::InvalidKey`] if `key` is not 16, 24 or 32 bytes (checked
///   before `dst` is touched).
/// - [`CryptoError::EntropyError`] if no IV could be generated.
/// - [`CryptoError::Io`] on any read or write failure.
pub fn encrypt_file(
    src: impl AsRef<Path>,
    dst: impl AsRef<Path>,
    key: &[u8],
) -> Result<[u8; IV_LEN], CryptoError> {
    encrypt_file_with(&OsRandom, src, dst, key)
}

/// [`encrypt_file`] drawing the IV from `rng`.
pub fn encrypt_file_with<R: RandomSource + ?Sized>(
    rng: &R,
    src: impl AsRef<Path>,
    dst: impl AsRef<Path>,
    key: &[u8],
) -> Result<[u8; IV_LEN], CryptoError> {
    let (src, dst) = (src.as_ref(), dst.as_ref());
    let cipher = BlockCipher::new(key)?;

    let mut iv = [0u8; IV_LEN];
    rng.fill(&mut iv)?;

    let mut input = File::open(src)?;
    let output = File::create(dst)?;

    let mut writer = OfbWriter::new(output, Ofb::new(cipher, &iv));
    let bytes = io::copy(&mut input, &mut writer)?;

    let mut output = writer.into_inner();
    output.write_all(&iv)?;
    output.flush()?;

    debug!(
        src = %src.display(),
        dst = %dst.display(),
        bytes,
        "file encrypted"
    );
    Ok(iv)
}

/// Decrypt a file produced by [`encrypt_file`] from `src` into `dst`.
///
/// # Errors
///
/// - [`CryptoError::InvalidKey`] if `key` is not 16, 24 or 32 bytes.
/// - [`CryptoError::TruncatedFile`] if `src` is shorter than the IV trailer.
/// - [`CryptoError::Io`] on any read, write or truncate failure.
pub fn decrypt_file(
    src: impl AsRef<Path>,
    dst: impl AsRef<Path>,
    key: &[u8],
) -> Result<(), CryptoError> {
    let (src, dst) = (src.as_ref(), dst.as_ref());
    let cipher = BlockCipher::new(key)?;

    let mut input = File::open(src)?;
    let size = input.metadata()?.len();
    let trailer = FILE_TRAILER_LEN as u64;
    if size < trailer {
        return Err(CryptoError::TruncatedFile(size));
    }
    let payload_len = size - trailer;

    let mut iv = [0u8; IV_LEN];
    input.seek(SeekFrom::Start(payload_len))?;
    input.read_exact(&mut iv)?;
    input.rewind()?;

    let mut output = File::create(dst)?;
    let mut reader = OfbReader::new(input.take(payload_len), Ofb::new(cipher, &iv));
    let bytes = io::copy(&mut reader, &mut output)?;
    output.set_len(payload_len)?;
    output.flush()?;

    debug!(
        src = %src.display(),
        dst = %dst.display(),
        bytes,
        "file decrypted"
    );
    Ok(())
}
