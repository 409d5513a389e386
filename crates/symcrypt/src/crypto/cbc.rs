//! Cipher block chaining over whole blocks, in place.

use common::protocol::BLOCK_LEN;
use common::CryptoError;

use super::{xor_blocks, BlockCipher};

/// Encrypt `data` in place. `data` must already be padded.
///
/// # Errors
///
/// Returns [`CryptoError::InvalidPlaintextLength`] if `data` is not a whole
/// number of blocks.
pub fn encrypt(
    cipher: &BlockCipher,
    iv: &[u8; BLOCK_LEN],
    data: &mut [u8],
) -> Result<(), CryptoError> {
    if data.len() % BLOCK_LEN != 0 {
        return Err(CryptoError::InvalidPlaintextLength);
    }

    let mut prev = *iv;
    for chunk in data.chunks_exact_mut(BLOCK_LEN) {
        let mut plain = [0u8; BLOCK_LEN];
        plain.copy_from_slice(chunk);

        let mut block = [0u8; BLOCK_LEN];
        xor_blocks(&plain, &prev, &mut block);
        cipher.encrypt_block(&mut block);

        chunk.copy_from_slice(&block);
        prev = block;
    }
    Ok(())
}

/// Decrypt `data` in place.
///
/// # Errors
///
/// Returns [`CryptoError::MisalignedCiphertext`] if `data` is not a whole
/// number of blocks.
pub fn decrypt(
    cipher: &BlockCipher,
    iv: &[u8; BLOCK_LEN],
    data: &mut [u8],
) -> Result<(), CryptoError> {
    if data.len() % BLOCK_LEN != 0 {
        return Err(CryptoError::MisalignedCiphertext);
    }

    let mut prev = *iv;
    for chunk in data.chunks_exact_mut(BLOCK_LEN) {
        let mut ciphertext = [0u8; BLOCK_LEN];
        ciphertext.copy_from_slice(chunk);

        let mut block = ciphertext;
        cipher.decrypt_block(&mut block);

        let mut plain = [0u8; BLOCK_LEN];
        xor_blocks(&block, &prev, &mut plain);
        chunk.copy_from_slice(&plain);
        prev = ciphertext;
    }
    Ok(())
}
