//! Epoch-boundary rotation of the three validator-key rings and Safrole's
//! own `gamma_k`/`gamma_z`/`gamma_s`/`gamma_a` fields.

use jam_crypto::RingVrf;
use jam_state::{DisputesState, SafroleState, SealingKeySequence, ValidatorKeyState};
use jam_types::{Hash, Params};

/// Rotates the validator-key rings and recomputes Safrole's sealing-key
/// sequence for the epoch that `new_slot` opens.
///
/// `prior_slot_in_epoch` and `epochs_consecutive` together decide whether
/// the ticket accumulator graduates into `gamma_s` or falls back to
/// entropy-derived keys: graduation requires both that the submission
/// window closed with a full accumulator (`gamma_a.len() == epoch_length`)
/// and that the rotation is into the very next epoch (no epoch was
/// skipped, which would make the accumulator stale).
pub fn rotate_epoch(
    validator_keys: &ValidatorKeyState,
    safrole: &SafroleState,
    psi: &DisputesState,
    params: &Params,
    ring_vrf: &impl RingVrf,
    eta_prime_2: &Hash,
    prior_slot_in_epoch: u32,
    epochs_consecutive: bool,
) -> (ValidatorKeyState, SafroleState) {
    let lambda_previous = validator_keys.kappa_current.clone();
    let kappa_current = safrole.gamma_k.clone();
    let gamma_k = validator_keys.iota_next.zeroing_offenders(&psi.punish);
    let gamma_z = ring_vrf.ring_commitment(&gamma_k.bandersnatch_keys());

    let accumulator_filled = safrole.gamma_a.len() as u32 == params.epoch_length;
    let window_closed = prior_slot_in_epoch >= params.ticket_submission_end_epoch_slot;

    let gamma_s = if window_closed && accumulator_filled && epochs_consecutive {
        SealingKeySequence::Tickets(crate::ticket::outside_in_order(&safrole.gamma_a))
    } else {
        let indices = jam_shuffle::select_sequence(
            eta_prime_2,
            params.epoch_length,
            kappa_current.len().max(1) as u32,
        );
        let keys = indices
            .into_iter()
            .map(|i| kappa_current.validators[i as usize % kappa_current.len().max(1)].bandersnatch)
            .collect();
        SealingKeySequence::Fallback(keys)
    };

    let new_keys = ValidatorKeyState {
        kappa_current,
        lambda_previous,
        iota_next: validator_keys.iota_next.clone(),
    };
    let new_safrole = SafroleState {
        gamma_k,
        gamma_z,
        gamma_s,
        gamma_a: vec![],
    };
    (new_keys, new_safrole)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jam_crypto::StubRingVrf;
    use jam_state::{DisputesState, TicketBody, ValidatorData, ValidatorSet};

    fn validator_set(n: usize) -> ValidatorSet {
        ValidatorSet::new(
            (0..n)
                .map(|i| {
                    let mut v = ValidatorData::zeroed();
                    v.bandersnatch[0] = i as u8;
                    v.ed25519[0] = i as u8;
                    v
                })
                .collect(),
        )
    }

    #[test]
    fn rotation_shifts_kappa_into_lambda_and_gamma_k_into_kappa() {
        let keys = ValidatorKeyState {
            kappa_current: validator_set(3),
            lambda_previous: validator_set(3),
            iota_next: validator_set(3),
        };
        let safrole = SafroleState {
            gamma_k: {
                let mut s = validator_set(3);
                s.validators[0].bandersnatch[0] = 99;
                s
            },
            gamma_z: [0u8; 144],
            gamma_s: SealingKeySequence::Fallback(vec![]),
            gamma_a: vec![],
        };
        let expected_kappa = safrole.gamma_k.clone();
        let psi = DisputesState::genesis();
        let params = Params::tiny();

        let (new_keys, _) = rotate_epoch(
            &keys,
            &safrole,
            &psi,
            &params,
            &StubRingVrf,
            &[0u8; 32],
            params.ticket_submission_end_epoch_slot,
            true,
        );

        assert_eq!(new_keys.lambda_previous, keys.kappa_current);
        assert_eq!(new_keys.kappa_current, expected_kappa);
    }

    #[test]
    fn full_accumulator_after_window_close_graduates_to_tickets() {
        let keys = ValidatorKeyState {
            kappa_current: validator_set(3),
            lambda_previous: validator_set(3),
            iota_next: validator_set(3),
        };
        let mut params = Params::tiny();
        params.epoch_length = 2;
        let safrole = SafroleState {
            gamma_k: validator_set(3),
            gamma_z: [0u8; 144],
            gamma_s: SealingKeySequence::Fallback(vec![]),
            gamma_a: vec![
                TicketBody { id: [1u8; 32], attempt: 0 },
                TicketBody { id: [2u8; 32], attempt: 0 },
            ],
        };
        let psi = DisputesState::genesis();

        let (_, new_safrole) = rotate_epoch(
            &keys,
            &safrole,
            &psi,
            &params,
            &StubRingVrf,
            &[0u8; 32],
            params.ticket_submission_end_epoch_slot,
            true,
        );

        assert!(matches!(new_safrole.gamma_s, SealingKeySequence::Tickets(_)));
        assert!(new_safrole.gamma_a.is_empty());
    }

    #[test]
    fn incomplete_accumulator_falls_back_to_entropy_derived_keys() {
        let keys = ValidatorKeyState {
            kappa_current: validator_set(3),
            lambda_previous: validator_set(3),
            iota_next: validator_set(3),
        };
        let params = Params::tiny();
        let safrole = SafroleState {
            gamma_k: validator_set(3),
            gamma_z: [0u8; 144],
            gamma_s: SealingKeySequence::Fallback(vec![]),
            gamma_a: vec![TicketBody { id: [1u8; 32], attempt: 0 }],
        };
        let psi = DisputesState::genesis();

        let (_, new_safrole) = rotate_epoch(
            &keys,
            &safrole,
            &psi,
            &params,
            &StubRingVrf,
            &[0u8; 32],
            params.ticket_submission_end_epoch_slot,
            true,
        );

        assert!(matches!(new_safrole.gamma_s, SealingKeySequence::Fallback(_)));
    }

    #[test]
    fn skipped_epoch_never_graduates_even_with_a_full_accumulator() {
        let keys = ValidatorKeyState {
            kappa_current: validator_set(3),
            lambda_previous: validator_set(3),
            iota_next: validator_set(3),
        };
        let mut params = Params::tiny();
        params.epoch_length = 2;
        let safrole = SafroleState {
            gamma_k: validator_set(3),
            gamma_z: [0u8; 144],
            gamma_s: SealingKeySequence::Fallback(vec![]),
            gamma_a: vec![
                TicketBody { id: [1u8; 32], attempt: 0 },
                TicketBody { id: [2u8; 32], attempt: 0 },
            ],
        };
        let psi = DisputesState::genesis();

        let (_, new_safrole) = rotate_epoch(
            &keys,
            &safrole,
            &psi,
            &params,
            &StubRingVrf,
            &[0u8; 32],
            params.ticket_submission_end_epoch_slot,
            false,
        );

        assert!(matches!(new_safrole.gamma_s, SealingKeySequence::Fallback(_)));
    }
}
