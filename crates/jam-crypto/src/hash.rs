use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use jam_types::Hash;

/// Blake2b truncated to a 256-bit digest; every hash the state transition
/// function produces (block hash, state root, work report hash, ...) uses
/// this one function.
pub type Blake2b256 = Blake2b<U32>;

pub fn blake2b_256(data: &[u8]) -> Hash {
    let mut hasher = Blake2b256::new();
    hasher.update(data);
    let digest = hasher.finalize();
    let mut out = [0u8; 32];
    out.copy_from_slice(&digest);
    out
}

/// Hashes the concatenation of two 32-byte values, the shape every merkle
/// and trie internal node uses.
pub fn blake2b_256_pair(left: &Hash, right: &Hash) -> Hash {
    let mut hasher = Blake2b256::new();
    hasher.update(left);
    hasher.update(right);
    let digest = hasher.finalize();
    let mut out = [0u8; 32];
    out.copy_from_slice(&digest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic_and_sensitive_to_input() {
        let a = blake2b_256(b"jam");
        let b = blake2b_256(b"jam");
        let c = blake2b_256(b"JAM");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn pair_hash_is_order_sensitive() {
        let l = blake2b_256(b"left");
        let r = blake2b_256(b"right");
        assert_ne!(blake2b_256_pair(&l, &r), blake2b_256_pair(&r, &l));
    }
}
