//! Streaming SHA-256 file digests, for checking that a round trip is lossless.

use std::fs::File;
use std::io;
use std::path::Path;

use common::CryptoError;
use sha2::{Digest, Sha256};

/// SHA-256 digest length in bytes.
pub const DIGEST_LEN: usize = 32;

/// Hash the contents of the file at `path`.
pub fn sha256_file(path: impl AsRef<Path>) -> Result<[u8; DIGEST_LEN], CryptoError> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    io::copy(&mut file, &mut hasher)?;

    let mut digest = [0u8; DIGEST_LEN];
    digest.copy_from_slice(&hasher.finalize());
    Ok(digest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_digest() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert_eq!(
            hex::encode(sha256_file(file.path()).unwrap()),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn abc_digest() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), b"abc").unwrap();
        assert_eq!(
            hex::encode(sha256_file(file.path()).unwrap()),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::TempDir::new().unwrap();
        assert!(matches!(
            sha256_file(dir.path().join("missing")),
            Err(CryptoError::Io(_))
        ));
    }
}
