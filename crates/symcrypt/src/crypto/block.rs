//! [`BlockCipher`]: single-block AES transform selected by key length.

use aes::cipher::{BlockDecrypt, BlockEncrypt, KeyInit};
use aes::{Aes128, Aes192, Aes256, Block};
use common::protocol::BLOCK_LEN;
use common::CryptoError;

/// Key lengths accepted by [`BlockCipher::new`]: AES-128, AES-192, AES-256.
pub const SUPPORTED_KEY_LENS: [usize; 3] = [16, 24, 32];

/// An initialised AES block cipher.
#[derive(Clone)]
pub enum BlockCipher {
    Aes128(Aes128),
    Aes192(Aes192),
    Aes256(Aes256),
}

impl BlockCipher {
    /// Initialise the cipher matching `key.len()`.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidKey`] unless the key is 16, 24 or 32 bytes.
    pub fn new(key: &[u8]) -> Result<Self, CryptoError> {
        let invalid = |_| CryptoError::InvalidKey(key.len());
        match key.len() {
            16 => Aes128::new_from_slice(key).map(Self::Aes128).map_err(invalid),
            24 => Aes192::new_from_slice(key).map(Self::Aes192).map_err(invalid),
            32 => Aes256::new_from_slice(key).map(Self::Aes256).map_err(invalid),
            other => Err(CryptoError::InvalidKey(other)),
        }
    }

    /// Block length in bytes.
    pub fn block_len(&self) -> usize {
        BLOCK_LEN
    }

    /// Key size in bits.
    pub fn key_bits(&self) -> usize {
        match self {
            Self::Aes128(_) => 128,
            Self::Aes192(_) => 192,
            Self::Aes256(_) => 256,
        }
    }

    /// Encrypt one block in place.
    pub fn encrypt_block(&self, block: &mut [u8; BLOCK_LEN]) {
        let block = Block::from_mut_slice(&mut block[..]);
        match self {
            Self::Aes128(c) => c.encrypt_block(block),
            Self::Aes192(c) => c.encrypt_block(block),
            Self::Aes256(c) => c.encrypt_block(block),
        }
    }

    /// Decrypt one block in place.
    pub fn decrypt_block(&self, block: &mut [u8; BLOCK_LEN]) {
        let block = Block::from_mut_slice(&mut block[..]);
        match self {
            Self::Aes128(c) => c.decrypt_block(block),
            Self::Aes192(c) => c.decrypt_block(block),
            Self::Aes256(c) => c.decrypt_block(block),
        }
    }
}

impl std::fmt::Debug for BlockCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Round keys stay out of debug output.
        write!(f, "BlockCipher(AES-{})", self.key_bits())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(hex_str: &str) -> [u8; BLOCK_LEN] {
        hex::decode(hex_str).unwrap().try_into().unwrap()
    }

    #[test]
    fn selects_cipher_by_key_length() {
        assert_eq!(BlockCipher::new(&[0u8; 16]).unwrap().key_bits(), 128);
        assert_eq!(BlockCipher::new(&[0u8; 24]).unwrap().key_bits(), 192);
        assert_eq!(BlockCipher::new(&[0u8; 32]).unwrap().key_bits(), 256);
    }

    #[test]
    fn rejects_unsupported_key_lengths() {
        for len in [0usize, 1, 15, 17, 31, 33, 64] {
            let err = BlockCipher::new(&vec![0u8; len]).unwrap_err();
            assert!(matches!(err, CryptoError::InvalidKey(l) if l == len));
        }
    }

    #[test]
    fn aes128_known_answer() {
        // FIPS-197 appendix C.1
        let key = hex::decode("000102030405060708090a0b0c0d0e0f").unwrap();
        let cipher = BlockCipher::new(&key).unwrap();
        let mut b = block("00112233445566778899aabbccddeeff");
        cipher.encrypt_block(&mut b);
        assert_eq!(b, block("69c4e0d86a7b0430d8cdb78070b4c55a"));
        cipher.decrypt_block(&mut b);
        assert_eq!(b, block("00112233445566778899aabbccddeeff"));
    }

    #[test]
    fn debug_hides_key_schedule() {
        let cipher = BlockCipher::new(&[7u8; 32]).unwrap();
        assert_eq!(format!("{cipher:?}"), "BlockCipher(AES-256)");
        assert_eq!(cipher.block_len(), 16);
    }
}
