//! End-to-end behaviour of the public API: file and string round trips,
//! tamper detection, and the persisted layouts.

use std::path::PathBuf;

use symcrypt::{
    decrypt_file, decrypt_string, encrypt_file, encrypt_file_with, encrypt_string,
    encrypt_string_with, pad, random_bytes, sha256_file, unpad, CryptoError, Envelope, Key,
    RandomSource, BLOCK_LEN, IV_LEN, MAC_LEN,
};
use tempfile::TempDir;

const KEY: &[u8] = b"secretkeylength1";

/// Hands out the same IV on every call.
struct FixedIv([u8; IV_LEN]);

impl RandomSource for FixedIv {
    fn fill(&self, dest: &mut [u8]) -> Result<(), CryptoError> {
        for (i, b) in dest.iter_mut().enumerate() {
            *b = self.0[i % IV_LEN];
        }
        Ok(())
    }
}

fn write_file(dir: &TempDir, name: &str, contents: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

// —————————————————————————————————————————————————————————————————————————————
// String envelopes
// —————————————————————————————————————————————————————————————————————————————

#[test]
fn hello_there_scenario() {
    let envelope = encrypt_string(KEY, b"Hello There").unwrap();
    assert_eq!(envelope.len(), 64);

    let parsed = Envelope::parse(&envelope).unwrap();
    assert_eq!(parsed.ciphertext.len(), BLOCK_LEN);

    let padded = decrypt_string(KEY, &envelope).unwrap();
    assert_eq!(unpad(padded).unwrap(), b"Hello There");
}

#[test]
fn envelope_length_invariant_holds() {
    for len in 0..70 {
        let plaintext = vec![b'x'; len];
        let envelope = encrypt_string(KEY, &plaintext).unwrap();
        assert!(envelope.len() >= BLOCK_LEN + MAC_LEN);
        assert_eq!((envelope.len() - BLOCK_LEN - MAC_LEN) % BLOCK_LEN, 0);
        assert_eq!(
            envelope.len() - BLOCK_LEN - MAC_LEN,
            pad(BLOCK_LEN, &plaintext).unwrap().len()
        );
    }
}

#[test]
fn same_iv_gives_same_envelope() {
    let rng = FixedIv([3u8; IV_LEN]);
    let a = encrypt_string_with(&rng, KEY, b"deterministic").unwrap();
    let b = encrypt_string_with(&rng, KEY, b"deterministic").unwrap();
    assert_eq!(a, b);
}

#[test]
fn text_form_round_trip() {
    let envelope = encrypt_string(KEY, b"over a text channel").unwrap();
    let text = Envelope::parse(&envelope).unwrap().to_string_repr();
    let bytes = Envelope::from_str_repr(&text).unwrap().to_bytes();
    assert_eq!(bytes, envelope);
    assert_eq!(
        unpad(decrypt_string(KEY, &bytes).unwrap()).unwrap(),
        b"over a text channel"
    );
}

#[test]
fn truncating_a_block_fails_auth() {
    let envelope = encrypt_string(KEY, &[7u8; 40]).unwrap();
    let truncated = &envelope[..envelope.len() - BLOCK_LEN];
    assert!(matches!(
        decrypt_string(KEY, truncated),
        Err(CryptoError::AuthenticationFailure)
    ));
}

#[test]
fn header_only_envelope_fails_auth() {
    let envelope = encrypt_string(KEY, b"abc").unwrap();
    assert!(matches!(
        decrypt_string(KEY, &envelope[..BLOCK_LEN + MAC_LEN]),
        Err(CryptoError::AuthenticationFailure)
    ));
}

#[test]
fn key_wrapper_feeds_ciphers() {
    let key = Key::new(&random_bytes(32).unwrap()).unwrap();
    let envelope = encrypt_string(key.as_bytes(), b"wrapped").unwrap();
    assert_eq!(
        unpad(decrypt_string(key.as_bytes(), &envelope).unwrap()).unwrap(),
        b"wrapped"
    );
}

// —————————————————————————————————————————————————————————————————————————————
// Files
// —————————————————————————————————————————————————————————————————————————————

#[test]
fn eight_byte_file_scenario() {
    let dir = TempDir::new().unwrap();
    let input = write_file(&dir, "input", b"crypt me");
    let crypted = dir.path().join("crypted");
    let output = dir.path().join("output");

    encrypt_file(&input, &crypted, KEY).unwrap();
    assert_eq!(std::fs::metadata(&crypted).unwrap().len(), 8 + 16);

    decrypt_file(&crypted, &output, KEY).unwrap();
    assert_eq!(std::fs::metadata(&output).unwrap().len(), 8);
    assert_eq!(sha256_file(&input).unwrap(), sha256_file(&output).unwrap());
}

#[test]
fn large_file_round_trip() {
    let dir = TempDir::new().unwrap();
    // Not a multiple of the block size or of the copy buffer.
    let contents: Vec<u8> = (0..3 * 1024 * 1024 + 7).map(|i| (i * 31 % 251) as u8).collect();
    let input = write_file(&dir, "input", &contents);
    let crypted = dir.path().join("crypted");
    let output = dir.path().join("output");

    for key_len in [16usize, 24, 32] {
        let key = random_bytes(key_len).unwrap();
        encrypt_file(&input, &crypted, &key).unwrap();
        assert_eq!(
            std::fs::metadata(&crypted).unwrap().len(),
            contents.len() as u64 + IV_LEN as u64
        );
        decrypt_file(&crypted, &output, &key).unwrap();
        assert_eq!(sha256_file(&input).unwrap(), sha256_file(&output).unwrap());
    }
}

#[test]
fn repeated_encryption_differs_but_both_decrypt() {
    let dir = TempDir::new().unwrap();
    let input = write_file(&dir, "input", b"identical input, identical key");
    let first = dir.path().join("first");
    let second = dir.path().join("second");

    let iv_a = encrypt_file(&input, &first, KEY).unwrap();
    let iv_b = encrypt_file(&input, &second, KEY).unwrap();
    assert_ne!(iv_a, iv_b);
    assert_ne!(std::fs::read(&first).unwrap(), std::fs::read(&second).unwrap());

    for (i, crypted) in [first, second].iter().enumerate() {
        let output = dir.path().join(format!("out{i}"));
        decrypt_file(crypted, &output, KEY).unwrap();
        assert_eq!(
            std::fs::read(&output).unwrap(),
            b"identical input, identical key"
        );
    }
}

#[test]
fn ciphertext_body_is_ofb_of_plaintext() {
    let dir = TempDir::new().unwrap();
    let input = write_file(&dir, "input", &[0u8; 40]);
    let crypted = dir.path().join("crypted");

    let iv = [0x42u8; IV_LEN];
    encrypt_file_with(&FixedIv(iv), &input, &crypted, KEY).unwrap();
    let contents = std::fs::read(&crypted).unwrap();

    // Encrypting zeros exposes the keystream, whose first block is E(key, iv).
    let cipher = symcrypt::crypto::BlockCipher::new(KEY).unwrap();
    let mut k0 = iv;
    cipher.encrypt_block(&mut k0);
    assert_eq!(&contents[..BLOCK_LEN], &k0);
    assert_eq!(&contents[40..], &iv);
}

#[test]
fn short_file_is_truncated_error() {
    let dir = TempDir::new().unwrap();
    let crypted = write_file(&dir, "crypted", b"tiny");
    assert!(matches!(
        decrypt_file(&crypted, dir.path().join("out"), KEY),
        Err(CryptoError::TruncatedFile(4))
    ));
}

#[test]
fn concurrent_calls_on_disjoint_paths() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().to_path_buf();

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let root = root.clone();
            std::thread::spawn(move || {
                let contents = vec![i as u8; 1000 + i * 17];
                let input = root.join(format!("in{i}"));
                let crypted = root.join(format!("crypted{i}"));
                let output = root.join(format!("out{i}"));
                std::fs::write(&input, &contents).unwrap();
                encrypt_file(&input, &crypted, KEY).unwrap();
                decrypt_file(&crypted, &output, KEY).unwrap();
                assert_eq!(std::fs::read(&output).unwrap(), contents);
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}
