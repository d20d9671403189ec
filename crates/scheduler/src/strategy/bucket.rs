//! Deterministic AB-test bucketing.

use sha2::{Digest, Sha256};

/// Map a stable per-user key uniformly into `[0, 100)`.
///
/// The first eight digest bytes feed the modulus, so assignment is a pure
/// function of the key: repeated calls never reshuffle a user's bucket.
pub fn bucket_for_key(key: &str) -> u32 {
    let digest = Sha256::digest(key.as_bytes());
    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest[..8]);
    (u64::from_be_bytes(prefix) % 100) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bucket_is_deterministic() {
        assert_eq!(bucket_for_key("user-1"), bucket_for_key("user-1"));
    }

    #[test]
    fn bucket_is_in_range() {
        for i in 0..500 {
            assert!(bucket_for_key(&format!("user-{i}")) < 100);
        }
    }
}
