//! Entropy-derived index selection and the iterative Fisher-Yates shuffle
//! used by Safrole's fallback key sequence and the reports subsystem's
//! guarantor-core rotation.
//!
//! Both draw their randomness from on-chain entropy, never from an RNG
//! crate: the same `(entropy, counter)` pair always selects the same
//! index, which is what lets every honest node reproduce the same
//! rotation independently. §9's redesign note asks for an iterative
//! (not recursive) Fisher-Yates with one working buffer; that's exactly
//! what [`fisher_yates`] below is.

use jam_crypto::blake2b_256;
use jam_types::Hash;

/// `u32_le(Blake2b256(entropy ‖ u32_le(counter))[0..4]) mod modulus`, the
/// exact derivation spec.md §4.2 uses for Safrole's fallback key sequence;
/// [`fisher_yates`] reuses it with the shrinking range as `modulus`.
pub fn select_index(entropy: &Hash, counter: u32, modulus: u32) -> u32 {
    assert!(modulus > 0, "select_index: modulus must be non-zero");
    let mut buf = Vec::with_capacity(36);
    buf.extend_from_slice(entropy);
    buf.extend_from_slice(&counter.to_le_bytes());
    let digest = blake2b_256(&buf);
    let mut first4 = [0u8; 4];
    first4.copy_from_slice(&digest[0..4]);
    u32::from_le_bytes(first4) % modulus
}

/// Builds a length-`len` sequence of indices into `0..modulus`, one call
/// to [`select_index`] per position — the fallback sealing-key sequence's
/// derivation loop.
pub fn select_sequence(entropy: &Hash, len: u32, modulus: u32) -> Vec<u32> {
    (0..len).map(|i| select_index(entropy, i, modulus)).collect()
}

/// Iterative Fisher-Yates over `items`, keyed by `entropy`: for `i` from
/// `len-1` down to `1`, swaps `items[i]` with `items[select_index(entropy,
/// i, i+1)]`. Never allocates beyond the input buffer.
pub fn fisher_yates<T>(mut items: Vec<T>, entropy: &Hash) -> Vec<T> {
    let len = items.len();
    for i in (1..len).rev() {
        let j = select_index(entropy, i as u32, (i + 1) as u32) as usize;
        items.swap(i, j);
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_index_is_deterministic_and_in_range() {
        let entropy = [7u8; 32];
        for i in 0..20u32 {
            let idx = select_index(&entropy, i, 6);
            assert!(idx < 6);
            assert_eq!(idx, select_index(&entropy, i, 6));
        }
    }

    #[test]
    fn fisher_yates_is_a_permutation() {
        let entropy = [1u8; 32];
        let items: Vec<u32> = (0..10).collect();
        let shuffled = fisher_yates(items.clone(), &entropy);
        let mut sorted = shuffled.clone();
        sorted.sort();
        assert_eq!(sorted, items);
    }

    #[test]
    fn fisher_yates_is_deterministic_across_calls() {
        let entropy = [3u8; 32];
        let items: Vec<u32> = (0..8).collect();
        assert_eq!(
            fisher_yates(items.clone(), &entropy),
            fisher_yates(items, &entropy)
        );
    }

    #[test]
    fn different_entropy_usually_gives_a_different_order() {
        let items: Vec<u32> = (0..8).collect();
        let a = fisher_yates(items.clone(), &[1u8; 32]);
        let b = fisher_yates(items, &[2u8; 32]);
        assert_ne!(a, b);
    }

    #[test]
    fn single_element_input_is_unchanged() {
        let entropy = [9u8; 32];
        assert_eq!(fisher_yates(vec![42u32], &entropy), vec![42u32]);
        assert_eq!(fisher_yates(Vec::<u32>::new(), &entropy), Vec::<u32>::new());
    }
}
