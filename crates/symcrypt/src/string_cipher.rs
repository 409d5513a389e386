//! Authenticated encryption of short byte strings: AES-CBC plus HMAC-SHA-256.
//!
//! # Envelope format
//!
//! ```text
//! [IV: 16][HMAC-SHA-256(key, padded plaintext): 32][AES-CBC ciphertext: n * 16]
//! ```
//!
//! The MAC covers the padded plaintext, not the ciphertext (MAC-then-encrypt).
//! Changing that would break every existing envelope.
//!
//! Padding is applied by [`encrypt_string`] but **not** removed by
//! [`decrypt_string`]: callers pass the result through
//! [`crate::padding::unpad`] themselves.

use common::protocol::{Envelope, BLOCK_LEN, IV_LEN, MAC_LEN};
use common::CryptoError;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use tracing::{debug, warn};
use zeroize::Zeroize;

use crate::crypto::{cbc, BlockCipher};
use crate::padding::pad;
use crate::random::{OsRandom, RandomSource};

type HmacSha256 = Hmac<Sha256>;

/// Pad, MAC and encrypt `plaintext` under `key` with a fresh IV from the OS
/// CSPRNG, returning `IV || MAC || ciphertext`.
///
/// # Errors
///
/// - [`CryptoError::InvalidKey`] if `key` is not 16, 24 or 32 bytes.
/// - [`CryptoError::EntropyError`] if no IV could be generated.
/// - [`CryptoError::InvalidPlaintextLength`] if padding did not produce whole
///   blocks (unreachable with a correct padding codec).
pub fn encrypt_string(key: &[u8], plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
    encrypt_string_with(&OsRandom, key, plaintext)
}

/// [`encrypt_string`] drawing the IV from `rng`.
pub fn encrypt_string_with<R: RandomSource + ?Sized>(
    rng: &R,
    key: &[u8],
    plaintext: &[u8],
) -> Result<Vec<u8>, CryptoError> {
    encrypt_envelope_with(rng, key, plaintext).map(|envelope| envelope.to_bytes())
}

/// [`encrypt_string`] returning the parsed [`Envelope`], for callers that
/// want its text form or components.
pub fn encrypt_envelope(key: &[u8], plaintext: &[u8]) -> Result<Envelope, CryptoError> {
    encrypt_envelope_with(&OsRandom, key, plaintext)
}

/// [`encrypt_envelope`] drawing the IV from `rng`.
pub fn encrypt_envelope_with<R: RandomSource + ?Sized>(
    rng: &R,
    key: &[u8],
    plaintext: &[u8],
) -> Result<Envelope, CryptoError> {
    let mut padded = pad(BLOCK_LEN, plaintext)?;
    if padded.len() % BLOCK_LEN != 0 {
        return Err(CryptoError::InvalidPlaintextLength);
    }

    let cipher = BlockCipher::new(key)?;

    let mut iv = [0u8; IV_LEN];
    rng.fill(&mut iv)?;

    let mac = compute_mac(key, &padded)?;
    cbc::encrypt(&cipher, &iv, &mut padded)?;

    debug!(
        plaintext_len = plaintext.len(),
        ciphertext_len = padded.len(),
        "string encrypted"
    );
    Ok(Envelope {
        iv,
        mac,
        ciphertext: padded,
    })
}

/// Verify and decrypt an envelope produced by [`encrypt_string`].
///
/// Returns the **padded** plaintext.
///
/// # Errors
///
/// - [`CryptoError::EnvelopeTooShort`] if `envelope` cannot hold IV and MAC;
///   no decryption is attempted.
/// - [`CryptoError::MisalignedCiphertext`] if the ciphertext is not whole blocks.
/// - [`CryptoError::InvalidKey`] if `key` is not 16, 24 or 32 bytes.
/// - [`CryptoError::AuthenticationFailure`] if the MAC does not match. The
///   decrypted candidate is wiped and never returned.
pub fn decrypt_string(key: &[u8], envelope: &[u8]) -> Result<Vec<u8>, CryptoError> {
    decrypt_envelope(key, Envelope::parse(envelope)?)
}

/// [`decrypt_string`] for an already parsed [`Envelope`].
pub fn decrypt_envelope(key: &[u8], envelope: Envelope) -> Result<Vec<u8>, CryptoError> {
    let Envelope {
        iv,
        mac,
        ciphertext: mut candidate,
    } = envelope;

    let cipher = BlockCipher::new(key)?;
    cbc::decrypt(&cipher, &iv, &mut candidate)?;
    verify_or_wipe(key, &mac, &mut candidate)?;

    debug!(padded_len = candidate.len(), "string decrypted");
    Ok(candidate)
}

/// Check `mac` against `candidate`, wiping `candidate` on mismatch.
fn verify_or_wipe(
    key: &[u8],
    mac: &[u8; MAC_LEN],
    candidate: &mut Vec<u8>,
) -> Result<(), CryptoError> {
    let mut verifier = new_mac(key)?;
    verifier.update(candidate);
    // verify_slice compares in constant time.
    if verifier.verify_slice(mac).is_err() {
        let ciphertext_len = candidate.len();
        candidate.zeroize();
        warn!(ciphertext_len, "envelope failed authentication");
        return Err(CryptoError::AuthenticationFailure);
    }
    Ok(())
}

fn new_mac(key: &[u8]) -> Result<HmacSha256, CryptoError> {
    <HmacSha256 as Mac>::new_from_slice(key).map_err(|_| CryptoError::InvalidKey(key.len()))
}

fn compute_mac(key: &[u8], message: &[u8]) -> Result<[u8; MAC_LEN], CryptoError> {
    let mut mac = new_mac(key)?;
    mac.update(message);
    let mut tag = [0u8; MAC_LEN];
    tag.copy_from_slice(&mac.finalize().into_bytes());
    Ok(tag)
}
