use jam_crypto::verify;
use jam_state::{DisputesState, PendingReports, ValidatorKeyState};
use jam_types::{EpochIndex, Hash, Params};

use crate::error::DisputesError;
use crate::types::{Culprit, DisputesExtrinsic, Fault, Judgment, Verdict};

const VERDICT_CONTEXT: &[u8] = b"jam_verdict";
const CULPRIT_CONTEXT: &[u8] = b"jam_culprit";
const FAULT_CONTEXT: &[u8] = b"jam_fault";

enum Outcome {
    Good,
    Bad,
    Wonky,
}

fn verdict_message(target: &Hash, is_good: bool) -> Vec<u8> {
    let mut msg = Vec::with_capacity(VERDICT_CONTEXT.len() + 33);
    msg.extend_from_slice(VERDICT_CONTEXT);
    msg.extend_from_slice(target);
    msg.push(is_good as u8);
    msg
}

fn culprit_message(target: &Hash) -> Vec<u8> {
    let mut msg = Vec::with_capacity(CULPRIT_CONTEXT.len() + 32);
    msg.extend_from_slice(CULPRIT_CONTEXT);
    msg.extend_from_slice(target);
    msg
}

fn fault_message(target: &Hash, vote: bool) -> Vec<u8> {
    let mut msg = Vec::with_capacity(FAULT_CONTEXT.len() + 33);
    msg.extend_from_slice(FAULT_CONTEXT);
    msg.extend_from_slice(target);
    msg.push(vote as u8);
    msg
}

/// Resolves `age` to the validator ring a judgment's signer must be
/// drawn from: the current epoch's `kappa_current`, or the previous
/// epoch's `lambda_previous` when `age` trails by exactly one epoch.
fn ring_for_age<'a>(
    validator_keys: &'a ValidatorKeyState,
    current_epoch: EpochIndex,
    age: EpochIndex,
) -> Result<&'a jam_state::ValidatorSet, DisputesError> {
    if age == current_epoch {
        Ok(&validator_keys.kappa_current)
    } else if current_epoch > 0 && age == current_epoch - 1 {
        Ok(&validator_keys.lambda_previous)
    } else {
        Err(DisputesError::BadAgeOfJudgement)
    }
}

fn verify_judgment(
    ring: &jam_state::ValidatorSet,
    target: &Hash,
    judgment: &Judgment,
) -> Result<(), DisputesError> {
    let signer = ring
        .validators
        .get(judgment.validator_index as usize)
        .ok_or(DisputesError::BadSignature)?;
    let message = verdict_message(target, judgment.is_good);
    verify(&signer.ed25519, &message, &judgment.signature).map_err(|_| DisputesError::BadSignature)
}

fn resolve_outcome(judgments: &[Judgment], params: &Params) -> Result<Outcome, DisputesError> {
    let good_count = judgments.iter().filter(|j| j.is_good).count() as u32;
    let total = judgments.len() as u32;
    let bad_count = total - good_count;

    if good_count >= params.validators_super_majority() {
        Ok(Outcome::Good)
    } else if bad_count >= params.validators_super_majority() {
        Ok(Outcome::Bad)
    } else if good_count <= params.validators_count / 3 {
        Ok(Outcome::Wonky)
    } else {
        Err(DisputesError::QuorumNotMet)
    }
}

fn process_verdict(
    psi: &mut DisputesState,
    rho: &mut PendingReports,
    validator_keys: &ValidatorKeyState,
    params: &Params,
    current_epoch: EpochIndex,
    verdict: &Verdict,
) -> Result<(), DisputesError> {
    let ring = ring_for_age(validator_keys, current_epoch, verdict.age)?;

    if psi.contains_target(&verdict.target) {
        return Err(DisputesError::VerdictAlreadyResolved);
    }

    if verdict.judgments.windows(2).any(|w| w[0].validator_index >= w[1].validator_index) {
        return Err(DisputesError::BadSignature);
    }

    for judgment in &verdict.judgments {
        verify_judgment(ring, &verdict.target, judgment)?;
    }

    match resolve_outcome(&verdict.judgments, params)? {
        Outcome::Good => psi.insert_good(verdict.target),
        Outcome::Bad => {
            psi.insert_bad(verdict.target);
            rho.clear_matching(&verdict.target);
        }
        Outcome::Wonky => {
            psi.insert_wonky(verdict.target);
            rho.clear_matching(&verdict.target);
        }
    }
    Ok(())
}

fn process_culprit(
    psi: &mut DisputesState,
    validator_keys: &ValidatorKeyState,
    culprit: &Culprit,
) -> Result<(), DisputesError> {
    let known = validator_keys.kappa_current.index_of_ed25519(&culprit.key).is_some()
        || validator_keys.lambda_previous.index_of_ed25519(&culprit.key).is_some();
    if !known {
        return Err(DisputesError::OffendersNotInValidators);
    }
    let message = culprit_message(&culprit.target);
    verify(&culprit.key, &message, &culprit.signature).map_err(|_| DisputesError::BadSignature)?;
    psi.insert_punish(culprit.key);
    Ok(())
}

fn process_fault(
    psi: &mut DisputesState,
    validator_keys: &ValidatorKeyState,
    fault: &Fault,
) -> Result<(), DisputesError> {
    let known = validator_keys.kappa_current.index_of_ed25519(&fault.key).is_some()
        || validator_keys.lambda_previous.index_of_ed25519(&fault.key).is_some();
    if !known {
        return Err(DisputesError::OffendersNotInValidators);
    }
    let message = fault_message(&fault.target, fault.vote);
    verify(&fault.key, &message, &fault.signature).map_err(|_| DisputesError::BadSignature)?;
    psi.insert_punish(fault.key);
    Ok(())
}

/// Applies a disputes extrinsic to `(psi, rho)`, returning the updated
/// copies on success. Verdicts are processed before culprits/faults so a
/// culprit naming a target this same extrinsic just resolved bad is
/// valid; nothing is mutated on error.
pub fn process_disputes(
    psi: &DisputesState,
    rho: &PendingReports,
    validator_keys: &ValidatorKeyState,
    params: &Params,
    current_epoch: EpochIndex,
    extrinsic: &DisputesExtrinsic,
) -> Result<(DisputesState, PendingReports), DisputesError> {
    let mut psi = psi.clone();
    let mut rho = rho.clone();

    for verdict in &extrinsic.verdicts {
        process_verdict(&mut psi, &mut rho, validator_keys, params, current_epoch, verdict)?;
    }
    for culprit in &extrinsic.culprits {
        process_culprit(&mut psi, validator_keys, culprit)?;
    }
    for fault in &extrinsic.faults {
        process_fault(&mut psi, validator_keys, fault)?;
    }

    Ok((psi, rho))
}
