use jam_types::{BandersnatchPublic, BlsPublic, Ed25519Public};
use serde::{Deserialize, Serialize};

/// A single validator's public-key bundle and opaque metadata blob.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorData {
    pub bandersnatch: BandersnatchPublic,
    pub ed25519: Ed25519Public,
    pub bls: BlsPublic,
    pub metadata: [u8; 128],
}

impl ValidatorData {
    pub fn zeroed() -> Self {
        Self {
            bandersnatch: [0u8; 32],
            ed25519: [0u8; 32],
            bls: [0u8; 144],
            metadata: [0u8; 128],
        }
    }
}

/// An ordered sequence of exactly `validators_count` validators.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorSet {
    pub validators: Vec<ValidatorData>,
}

impl ValidatorSet {
    pub fn new(validators: Vec<ValidatorData>) -> Self {
        Self { validators }
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    pub fn ed25519_keys(&self) -> Vec<Ed25519Public> {
        self.validators.iter().map(|v| v.ed25519).collect()
    }

    pub fn bandersnatch_keys(&self) -> Vec<BandersnatchPublic> {
        self.validators.iter().map(|v| v.bandersnatch).collect()
    }

    pub fn index_of_ed25519(&self, key: &Ed25519Public) -> Option<usize> {
        self.validators.iter().position(|v| &v.ed25519 == key)
    }

    /// Zeroes out every validator whose ed25519 key is in `offenders`,
    /// the way an epoch rotation clears a punished validator's slot
    /// rather than removing it (slot indices must stay stable).
    pub fn zeroing_offenders(&self, offenders: &[Ed25519Public]) -> Self {
        let zeroed = self
            .validators
            .iter()
            .map(|v| {
                if offenders.contains(&v.ed25519) {
                    ValidatorData::zeroed()
                } else {
                    v.clone()
                }
            })
            .collect();
        Self { validators: zeroed }
    }
}

/// The three validator-key "rings" (current, previous, next/future draw)
/// that rotate at every epoch boundary: `lambda <- kappa, kappa <- gamma_k,
/// gamma_k <- iota` (with offenders zeroed), then `iota` is replaced by the
/// next epoch's scheduled set by the caller (Safrole owns that part).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorKeyState {
    pub kappa_current: ValidatorSet,
    pub lambda_previous: ValidatorSet,
    pub iota_next: ValidatorSet,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set_of(n: usize) -> ValidatorSet {
        ValidatorSet::new(
            (0..n)
                .map(|i| {
                    let mut v = ValidatorData::zeroed();
                    v.ed25519[0] = i as u8;
                    v
                })
                .collect(),
        )
    }

    #[test]
    fn zeroing_offenders_preserves_slot_count() {
        let set = set_of(4);
        let offender = set.validators[2].ed25519;
        let cleared = set.zeroing_offenders(&[offender]);
        assert_eq!(cleared.len(), 4);
        assert_eq!(cleared.validators[2], ValidatorData::zeroed());
        assert_eq!(cleared.validators[0], set.validators[0]);
    }

    #[test]
    fn index_of_ed25519_finds_the_right_slot() {
        let set = set_of(4);
        let key = set.validators[3].ed25519;
        assert_eq!(set.index_of_ed25519(&key), Some(3));
        assert_eq!(set.index_of_ed25519(&[99u8; 32]), None);
    }
}
