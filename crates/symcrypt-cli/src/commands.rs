//! Subcommand implementations. Output goes to the supplied writer.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use symcrypt::{Envelope, Key};
use tracing::info;

pub fn encrypt_file(key: &Key, src: &Path, dst: &Path) -> Result<()> {
    symcrypt::encrypt_file(src, dst, key.as_bytes())
        .with_context(|| format!("failed to encrypt {}", src.display()))?;
    info!(src = %src.display(), dst = %dst.display(), "file encrypted");
    Ok(())
}

pub fn decrypt_file(key: &Key, src: &Path, dst: &Path) -> Result<()> {
    symcrypt::decrypt_file(src, dst, key.as_bytes())
        .with_context(|| format!("failed to decrypt {}", src.display()))?;
    info!(src = %src.display(), dst = %dst.display(), "file decrypted");
    Ok(())
}

/// Print the text form of a fresh envelope for `text`.
pub fn encrypt_string(key: &Key, text: &str, out: &mut impl Write) -> Result<()> {
    let envelope = symcrypt::encrypt_envelope(key.as_bytes(), text.as_bytes())
        .context("failed to encrypt string")?;
    writeln!(out, "{}", envelope.to_string_repr())?;
    Ok(())
}

/// Verify, decrypt and unpad an envelope, printing the plaintext bytes.
pub fn decrypt_string(key: &Key, envelope: &str, out: &mut impl Write) -> Result<()> {
    let envelope = Envelope::from_str_repr(envelope).context("failed to parse envelope")?;
    let padded = symcrypt::decrypt_envelope(key.as_bytes(), envelope)
        .context("failed to decrypt string")?;
    let plaintext = symcrypt::unpad(padded).context("failed to remove padding")?;
    out.write_all(&plaintext)?;
    writeln!(out)?;
    Ok(())
}

pub fn digest(path: &Path, out: &mut impl Write) -> Result<()> {
    let digest = symcrypt::sha256_file(path)
        .with_context(|| format!("failed to hash {}", path.display()))?;
    writeln!(out, "{}  {}", hex::encode(digest), path.display())?;
    Ok(())
}
