//! PKCS#7-style padding to a fixed block size.
//!
//! A full block of padding is appended when the input is already block
//! aligned, so every padded buffer ends in a readable trailer.

use common::CryptoError;

/// Largest block size whose pad count fits in one byte.
pub const MAX_BLOCK_SIZE: usize = u8::MAX as usize;

/// Return `input` followed by `n` bytes of value `n`, where
/// `n = block_size - input.len() % block_size`.
///
/// # Errors
///
/// Returns [`CryptoError::InvalidBlockSize`] unless `1 <= block_size <= 255`.
pub fn pad(block_size: usize, input: &[u8]) -> Result<Vec<u8>, CryptoError> {
    if block_size == 0 || block_size > MAX_BLOCK_SIZE {
        return Err(CryptoError::InvalidBlockSize(block_size));
    }
    let pad_len = block_size - input.len() % block_size;

    let mut padded = Vec::with_capacity(input.len() + pad_len);
    padded.extend_from_slice(input);
    padded.resize(input.len() + pad_len, pad_len as u8);
    Ok(padded)
}

/// Strip the padding added by [`pad`], reusing the buffer's allocation.
///
/// # Errors
///
/// Returns [`CryptoError::EmptyInput`] for an empty buffer and
/// [`CryptoError::InvalidPadding`] if the trailer is zero, longer than the
/// buffer, or contains a byte different from the pad count.
pub fn unpad(mut buffer: Vec<u8>) -> Result<Vec<u8>, CryptoError> {
    let len = buffer.len();
    let Some(&last) = buffer.last() else {
        return Err(CryptoError::EmptyInput);
    };
    let pad_len = usize::from(last);

    // Scan the whole window a pad could occupy, without early exit.
    let window = len.min(MAX_BLOCK_SIZE);
    let mut mismatch = 0u8;
    for (i, &byte) in buffer[len - window..].iter().rev().enumerate() {
        let in_pad = u8::from(i < pad_len).wrapping_neg();
        mismatch |= in_pad & (byte ^ last);
    }

    if pad_len == 0 || pad_len > len || mismatch != 0 {
        return Err(CryptoError::InvalidPadding);
    }
    buffer.truncate(len - pad_len);
    Ok(buffer)
}
