//! ROT128 byte obfuscation used for donation input files.
//!
//! Every byte is rotated by half the byte range, so the same rotation both
//! obfuscates and recovers the input.

const ROTATION: u8 = 128;

/// Recovers plaintext from ROT128 obfuscated bytes.
pub fn decrypt(bytes: &[u8]) -> Vec<u8> {
    bytes.iter().map(|byte| byte.wrapping_add(ROTATION)).collect()
}
