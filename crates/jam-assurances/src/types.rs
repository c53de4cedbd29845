use jam_types::{Ed25519Signature, Hash, ValidatorIndex};
use serde::{Deserialize, Serialize};

/// A single validator's availability vouch: a bitfield over cores
/// (`avail_bitfield_bytes` bytes), signed over the block's parent hash.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assurance {
    pub validator_index: ValidatorIndex,
    pub anchor: Hash,
    pub bitfield: Vec<u8>,
    pub signature: Ed25519Signature,
}
