//! Block-cipher modes built on the raw AES block transform.
//!
//! This module is free of file and envelope handling. It provides:
//!
//! - [`BlockCipher`]: AES-128/192/256 chosen by key length.
//! - [`cbc`]: block chaining over whole blocks, used by the string cipher.
//! - [`ofb`]: output feedback keystream over arbitrary byte streams, used by
//!   the file cipher.

pub mod block;
pub mod cbc;
pub mod ofb;

pub use block::{BlockCipher, SUPPORTED_KEY_LENS};

use common::protocol::BLOCK_LEN;

/// XOR `a` and `b` into `out`.
#[inline(always)]
pub(crate) fn xor_blocks(a: &[u8; BLOCK_LEN], b: &[u8; BLOCK_LEN], out: &mut [u8; BLOCK_LEN]) {
    for ((o, x), y) in out.iter_mut().zip(a).zip(b) {
        *o = x ^ y;
    }
}
