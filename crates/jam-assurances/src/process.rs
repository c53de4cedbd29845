use jam_crypto::verify;
use jam_state::{PendingReports, ValidatorKeyState, WorkReport};
use jam_types::{Hash, Params, TimeSlot};

use crate::bitfield::{bit_at, has_bit_beyond};
use crate::error::AssurancesError;
use crate::types::Assurance;

const AVAILABLE_CONTEXT: &[u8] = b"jam_available";

fn assurance_message(parent_hash: &Hash, bitfield: &[u8]) -> Vec<u8> {
    let mut msg = Vec::with_capacity(AVAILABLE_CONTEXT.len() + 32 + bitfield.len());
    msg.extend_from_slice(AVAILABLE_CONTEXT);
    msg.extend_from_slice(parent_hash);
    msg.extend_from_slice(bitfield);
    msg
}

/// Validates a block's assurances, promotes any core that reaches
/// availability super-majority, and clears ρ entries that timed out
/// independently of any assurance. Returns the updated ρ and the
/// promoted reports in ascending core order, ready for Accumulation.
pub fn process_assurances(
    rho: &PendingReports,
    validator_keys: &ValidatorKeyState,
    params: &Params,
    current_slot: TimeSlot,
    parent_hash: &Hash,
    assurances: &[Assurance],
) -> Result<(PendingReports, Vec<WorkReport>), AssurancesError> {
    let mut rho = rho.clone();
    rho.clear_timed_out(current_slot);

    if assurances
        .windows(2)
        .any(|w| w[0].validator_index >= w[1].validator_index)
    {
        return Err(AssurancesError::NotSortedOrUniqueValidatorIndex);
    }

    let core_count = params.core_count as usize;
    let mut vouch_counts = vec![0u32; core_count];

    for assurance in assurances {
        if &assurance.anchor != parent_hash {
            return Err(AssurancesError::InvalidAnchorHash);
        }
        if assurance.validator_index as u32 >= params.validators_count {
            return Err(AssurancesError::InvalidValidatorIndex);
        }
        if assurance.bitfield.len() != params.avail_bitfield_bytes as usize
            || has_bit_beyond(&assurance.bitfield, core_count)
        {
            return Err(AssurancesError::InvalidBitfieldSize);
        }

        let signer = validator_keys
            .kappa_current
            .validators
            .get(assurance.validator_index as usize)
            .ok_or(AssurancesError::InvalidValidatorIndex)?;
        let message = assurance_message(parent_hash, &assurance.bitfield);
        verify(&signer.ed25519, &message, &assurance.signature)
            .map_err(|_| AssurancesError::InvalidSignature)?;

        for core in 0..core_count {
            if bit_at(&assurance.bitfield, core) {
                if rho.cores[core].is_none() {
                    return Err(AssurancesError::CoreNotEngaged);
                }
                vouch_counts[core] += 1;
            }
        }
    }

    let threshold = params.validators_super_majority();
    let mut promoted = Vec::new();
    for core in 0..core_count {
        if vouch_counts[core] >= threshold {
            if let Some(pending) = rho.cores[core].take() {
                promoted.push(pending.report);
            }
        }
    }

    Ok((rho, promoted))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ed25519_dalek::SigningKey;
    use jam_crypto::sign;
    use jam_state::{
        PackageSpec, PendingReport, RefinementContext, ValidatorData, ValidatorSet,
    };
    use rand::rngs::OsRng;

    fn validator_set(n: usize) -> (ValidatorSet, Vec<SigningKey>) {
        let mut keys = Vec::with_capacity(n);
        let mut validators = Vec::with_capacity(n);
        for _ in 0..n {
            let signing_key = SigningKey::generate(&mut OsRng);
            let mut v = ValidatorData::zeroed();
            v.ed25519 = signing_key.verifying_key().to_bytes();
            validators.push(v);
            keys.push(signing_key);
        }
        (ValidatorSet::new(validators), keys)
    }

    fn pending(core: u16, hash: Hash, timeout: TimeSlot) -> PendingReport {
        PendingReport {
            report: WorkReport {
                package_spec: PackageSpec {
                    hash,
                    length: 0,
                    erasure_root: [0u8; 32],
                    exports_root: [0u8; 32],
                    exports_count: 0,
                },
                context: RefinementContext {
                    anchor: [0u8; 32],
                    anchor_state_root: [0u8; 32],
                    timeslot: 0,
                },
                core_index: core,
                authorizer_hash: [0u8; 32],
                results: vec![],
            },
            timeout,
            guarantor_keys: vec![],
        }
    }

    fn assurance(keys: &[SigningKey], validator_index: u16, parent: Hash, bit_core0: bool) -> Assurance {
        let bitfield = vec![if bit_core0 { 0b1000_0000 } else { 0u8 }];
        let message = assurance_message(&parent, &bitfield);
        Assurance {
            validator_index,
            anchor: parent,
            bitfield,
            signature: sign(&keys[validator_index as usize], &message),
        }
    }

    #[test]
    fn supermajority_vouches_promote_the_report() {
        let (set, keys) = validator_set(6);
        let validator_keys = ValidatorKeyState {
            kappa_current: set,
            lambda_previous: ValidatorSet::new(vec![]),
            iota_next: ValidatorSet::new(vec![]),
        };
        let params = Params::tiny();
        let parent = [1u8; 32];
        let mut rho = PendingReports::genesis(2);
        rho.cores[0] = Some(pending(0, [7u8; 32], 1000));

        let assurances: Vec<_> = (0..5).map(|i| assurance(&keys, i, parent, true)).collect();
        let (new_rho, promoted) =
            process_assurances(&rho, &validator_keys, &params, 0, &parent, &assurances).unwrap();
        assert!(new_rho.cores[0].is_none());
        assert_eq!(promoted.len(), 1);
        assert_eq!(promoted[0].package_spec.hash, [7u8; 32]);
    }

    #[test]
    fn below_threshold_leaves_the_report_pending() {
        let (set, keys) = validator_set(6);
        let validator_keys = ValidatorKeyState {
            kappa_current: set,
            lambda_previous: ValidatorSet::new(vec![]),
            iota_next: ValidatorSet::new(vec![]),
        };
        let params = Params::tiny();
        let parent = [1u8; 32];
        let mut rho = PendingReports::genesis(2);
        rho.cores[0] = Some(pending(0, [7u8; 32], 1000));

        let assurances: Vec<_> = (0..2).map(|i| assurance(&keys, i, parent, true)).collect();
        let (new_rho, promoted) =
            process_assurances(&rho, &validator_keys, &params, 0, &parent, &assurances).unwrap();
        assert!(new_rho.cores[0].is_some());
        assert!(promoted.is_empty());
    }

    #[test]
    fn rejects_vouching_for_an_unengaged_core() {
        let (set, keys) = validator_set(6);
        let validator_keys = ValidatorKeyState {
            kappa_current: set,
            lambda_previous: ValidatorSet::new(vec![]),
            iota_next: ValidatorSet::new(vec![]),
        };
        let params = Params::tiny();
        let parent = [1u8; 32];
        let rho = PendingReports::genesis(2);

        let assurances = vec![assurance(&keys, 0, parent, true)];
        let err = process_assurances(&rho, &validator_keys, &params, 0, &parent, &assurances)
            .unwrap_err();
        assert_eq!(err, AssurancesError::CoreNotEngaged);
    }

    #[test]
    fn timed_out_entries_clear_independently_of_assurances() {
        let (set, _keys) = validator_set(6);
        let validator_keys = ValidatorKeyState {
            kappa_current: set,
            lambda_previous: ValidatorSet::new(vec![]),
            iota_next: ValidatorSet::new(vec![]),
        };
        let params = Params::tiny();
        let parent = [1u8; 32];
        let mut rho = PendingReports::genesis(2);
        rho.cores[0] = Some(pending(0, [7u8; 32], 3));

        let (new_rho, promoted) =
            process_assurances(&rho, &validator_keys, &params, 10, &parent, &[]).unwrap();
        assert!(new_rho.cores[0].is_none());
        assert!(promoted.is_empty());
    }
}
