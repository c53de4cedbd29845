use jam_crypto::blake2b_256;
use jam_state::{PreimageStatus, Services};
use jam_types::{ServiceId, TimeSlot};
use serde::{Deserialize, Serialize};

use crate::error::AccumulateError;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreimageEntry {
    pub requester: ServiceId,
    pub blob: Vec<u8>,
}

/// Sorted by `(requester, blake2b_256(blob))`, per the data-model
/// supplement this type fills in for spec.md §4.9 step 8 / §7.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreimagesExtrinsic {
    pub entries: Vec<PreimageEntry>,
}

/// Applies a preimages extrinsic, promoting each matching `Requested`
/// lookup to `Available { slot }` and returning the per-requester byte
/// counts for the block author's `preimages_introduced` /
/// `octets_across_preimages` statistics. Nothing is mutated on error.
pub fn process_preimages(
    services: &Services,
    current_slot: TimeSlot,
    extrinsic: &PreimagesExtrinsic,
) -> Result<(Services, u32, u64), AccumulateError> {
    let mut services = services.clone();
    let mut preimages_introduced = 0u32;
    let mut octets = 0u64;

    for entry in &extrinsic.entries {
        let account = services
            .get_mut(&entry.requester)
            .ok_or(AccumulateError::ServiceUnknown)?;
        let digest = blake2b_256(&entry.blob);
        match account.preimage_lookups.get(&digest) {
            Some(PreimageStatus::Requested) => {
                account
                    .preimage_lookups
                    .insert(digest, PreimageStatus::Available { slot: current_slot });
                preimages_introduced += 1;
                octets += entry.blob.len() as u64;
            }
            _ => return Err(AccumulateError::PreimageAlreadyProvided),
        }
    }

    Ok((services, preimages_introduced, octets))
}
