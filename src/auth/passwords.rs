use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};

pub const SALT_BYTES: usize = 16;

/// Salted SHA-256 digest of a password. Returns (salt, hash); both are
/// stored as BLOBs.
pub fn hash_password(password: &str) -> (Vec<u8>, [u8; 32]) {
    let mut salt = vec![0u8; SALT_BYTES];
    OsRng.fill_bytes(&mut salt);
    let hash = digest(&salt, password);
    (salt, hash)
}

pub fn verify_password(password: &str, salt: &[u8], expected_hash: &[u8]) -> bool {
    let hash = digest(salt, password);
    hashes_equal(&hash, expected_hash)
}

fn digest(salt: &[u8], password: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    let out = hasher.finalize();
    let mut arr = [0u8; 32];
    arr.copy_from_slice(&out);
    arr
}

/// Constant-time-ish compare for hashes (simple and sufficient here).
pub fn hashes_equal(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff: u8 = 0;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}
