//! State-dictionary Merkleisation: a binary trie over 31-byte composite
//! keys, adapted from `ligerito-merkle`'s complete power-of-two array tree
//! (`CompleteMerkleTree`, `hash_siblings`) to a sparse trie keyed by bit
//! paths rather than leaf position, since the state dictionary's key space
//! is not a dense power-of-two array of opaque leaves.
//!
//! Leaves distinguish embedded values (at most 32 bytes, hashed inline)
//! from long values (hashed separately, with the value's own hash folded
//! into the leaf) so a single large preimage blob does not have to be
//! rehashed every time a sibling changes.

use jam_crypto::{blake2b_256, blake2b_256_pair};
use jam_types::Hash;

/// A state-dictionary key: 31 bytes, as described in spec §6.
pub type StateKey = [u8; 31];

const EMBEDDED_MARKER: u8 = 0x00;
const HASHED_MARKER: u8 = 0x01;
/// Values at or under this length are embedded directly in the leaf hash
/// input instead of being hashed separately first.
pub const EMBEDDED_VALUE_LIMIT: usize = 32;

/// Computes the Merkle root over a state dictionary snapshot.
///
/// `entries` need not be pre-sorted; this function sorts a local copy by
/// key so the result never depends on the caller's (or a `HashMap`'s)
/// iteration order. Duplicate keys are a caller bug — the last one wins,
/// matching the overwrite semantics a real dictionary would have.
pub fn state_root(entries: &[(StateKey, Vec<u8>)]) -> Hash {
    // Reverse first so a stable sort brings each key's last occurrence to
    // the front of its run; dedup_by then keeps that one.
    let mut sorted: Vec<(StateKey, &[u8])> = entries
        .iter()
        .rev()
        .map(|(k, v)| (*k, v.as_slice()))
        .collect();
    sorted.sort_by(|a, b| a.0.cmp(&b.0));
    sorted.dedup_by(|a, b| a.0 == b.0);
    build(&sorted, 0)
}

fn build(entries: &[(StateKey, &[u8])], depth: usize) -> Hash {
    match entries {
        [] => [0u8; 32],
        [(key, value)] => leaf_hash(key, value),
        _ => {
            let split = partition_point(entries, depth);
            let (left, right) = entries.split_at(split);

            #[cfg(feature = "parallel")]
            let (left_root, right_root) = if entries.len() >= 64 {
                rayon::join(|| build(left, depth + 1), || build(right, depth + 1))
            } else {
                (build(left, depth + 1), build(right, depth + 1))
            };
            #[cfg(not(feature = "parallel"))]
            let (left_root, right_root) = (build(left, depth + 1), build(right, depth + 1));

            blake2b_256_pair(&left_root, &right_root)
        }
    }
}

/// Index of the first entry whose bit at `depth` is 1. `entries` is sorted
/// by key, so this is a stable split point: everything before it belongs
/// in the left (bit 0) subtree, everything from it onward in the right.
fn partition_point(entries: &[(StateKey, &[u8])], depth: usize) -> usize {
    entries.partition_point(|(key, _)| bit_at(key, depth) == 0)
}

fn bit_at(key: &StateKey, depth: usize) -> u8 {
    let byte = key[depth / 8];
    (byte >> (7 - depth % 8)) & 1
}

fn leaf_hash(key: &StateKey, value: &[u8]) -> Hash {
    let mut buf = Vec::with_capacity(1 + 31 + 40);
    if value.len() <= EMBEDDED_VALUE_LIMIT {
        buf.push(EMBEDDED_MARKER);
        buf.extend_from_slice(key);
        buf.push(value.len() as u8);
        buf.extend_from_slice(value);
    } else {
        buf.push(HASHED_MARKER);
        buf.extend_from_slice(key);
        buf.extend_from_slice(&(value.len() as u64).to_le_bytes());
        buf.extend_from_slice(&blake2b_256(value));
    }
    blake2b_256(&buf)
}
