use jam_crypto::blake2b_256;
use jam_types::Hash;
use serde::{Deserialize, Serialize};

/// The entropy accumulator (η): an ordered 4-tuple of opaque hashes.
///
/// `eta[0]` is folded into on every block; on an epoch boundary the tuple
/// rotates so the value used to derive the *previous* epoch's keys is
/// still available for one more epoch (needed by Safrole's ticket seal
/// input, which is keyed on `eta[2]`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entropy {
    pub eta: [Hash; 4],
}

impl Entropy {
    pub fn genesis() -> Self {
        Self {
            eta: [[0u8; 32]; 4],
        }
    }

    /// Folds `block_entropy` into `eta[0]`, producing the next block's
    /// accumulator value. Does not rotate — call [`Entropy::rotate_epoch`]
    /// separately on an epoch boundary, per spec.md's ordering (§4.9 step 3
    /// folds before any epoch-boundary rotation in the same step).
    pub fn fold(&self, block_entropy: &Hash) -> Self {
        let mut buf = Vec::with_capacity(64);
        buf.extend_from_slice(&self.eta[0]);
        buf.extend_from_slice(block_entropy);
        let mut next = *self;
        next.eta[0] = blake2b_256(&buf);
        next
    }

    /// Rotates the tuple at an epoch boundary: `eta[3] <- eta[2]`,
    /// `eta[2] <- eta[1]`, `eta[1] <- eta[0]`. `eta[0]` is left as-is; the
    /// caller folds it again for the new block separately.
    pub fn rotate_epoch(&self) -> Self {
        Self {
            eta: [self.eta[0], self.eta[0], self.eta[1], self.eta[2]],
        }
    }
}
