//! Output feedback keystream and the [`Read`]/[`Write`] adapters built on it.
//!
//! The keystream is `k0 = E(iv)`, `k(i) = E(k(i-1))`; data is XORed with it
//! byte by byte, so any length is processed without padding and the same
//! operation both encrypts and decrypts.

use std::io::{self, Read, Write};

use common::protocol::BLOCK_LEN;
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::BlockCipher;

/// OFB keystream state.
#[derive(Debug)]
pub struct Ofb {
    cipher: BlockCipher,
    feedback: [u8; BLOCK_LEN],
    // Bytes of `feedback` already consumed; BLOCK_LEN forces a refill.
    pos: usize,
}

impl Ofb {
    /// Start a keystream from `iv`.
    pub fn new(cipher: BlockCipher, iv: &[u8; BLOCK_LEN]) -> Self {
        Self {
            cipher,
            feedback: *iv,
            pos: BLOCK_LEN,
        }
    }

    /// XOR the next `data.len()` keystream bytes into `data`.
    pub fn apply_keystream(&mut self, data: &mut [u8]) {
        for byte in data {
            if self.pos == BLOCK_LEN {
                self.cipher.encrypt_block(&mut self.feedback);
                self.pos = 0;
            }
            *byte ^= self.feedback[self.pos];
            self.pos += 1;
        }
    }
}

impl Zeroize for Ofb {
    /// Wipe the keystream block.
    fn zeroize(&mut self) {
        self.feedback.zeroize();
        self.pos = BLOCK_LEN;
    }
}

impl Drop for Ofb {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl ZeroizeOnDrop for Ofb {}

/// A writer that applies an OFB keystream to everything written through it.
#[derive(Debug)]
pub struct OfbWriter<W: Write> {
    inner: W,
    ofb: Ofb,
    scratch: Vec<u8>,
}

impl<W: Write> OfbWriter<W> {
    pub fn new(inner: W, ofb: Ofb) -> Self {
        Self {
            inner,
            ofb,
            scratch: Vec::new(),
        }
    }

    /// Unwrap the underlying writer. Nothing is buffered here, so no bytes are lost.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for OfbWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        // The keystream has advanced once applied, so the whole chunk must land.
        self.scratch.clear();
        self.scratch.extend_from_slice(buf);
        self.ofb.apply_keystream(&mut self.scratch);
        self.inner.write_all(&self.scratch)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// A reader that applies an OFB keystream to everything read through it.
#[derive(Debug)]
pub struct OfbReader<R: Read> {
    inner: R,
    ofb: Ofb,
}

impl<R: Read> OfbReader<R> {
    pub fn new(inner: R, ofb: Ofb) -> Self {
        Self { inner, ofb }
    }
}

impl<R: Read> Read for OfbReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.ofb.apply_keystream(&mut buf[..n]);
        Ok(n)
    }
}
