use jam_crypto::verify;
use jam_state::{AuthPools, PendingReport, PendingReports, RecentHistory, ValidatorKeyState};
use jam_types::{Hash, Params, TimeSlot};

use crate::assignment::{guarantor_assignment, rotation_entropy};
use crate::error::ReportsError;
use crate::types::Guarantee;

const GUARANTEE_CONTEXT: &[u8] = b"jam_guarantee";

fn report_message(report: &jam_state::WorkReport) -> Vec<u8> {
    let mut msg = GUARANTEE_CONTEXT.to_vec();
    msg.extend(bincode::serialize(report).expect("work reports are always serializable"));
    msg
}

/// Validates and installs a block's guarantees into ρ, per spec.md §4.4.
/// Nothing is mutated on error; the returned ρ replaces the caller's in
/// full only when every guarantee in `guarantees` passes.
pub fn process_guarantees(
    rho: &PendingReports,
    beta: &RecentHistory,
    auth_pools: &AuthPools,
    validator_keys: &ValidatorKeyState,
    params: &Params,
    current_slot: TimeSlot,
    parent_state_root: &Hash,
    eta_2: &Hash,
    guarantees: &[Guarantee],
) -> Result<PendingReports, ReportsError> {
    let mut rho = rho.clone();
    let mut seen_cores: Vec<usize> = Vec::new();
    let mut seen_hashes: Vec<Hash> = rho
        .cores
        .iter()
        .filter_map(|c| c.as_ref().map(|p| p.report.package_spec.hash))
        .collect();

    for guarantee in guarantees {
        let core = guarantee.report.core_index as usize;
        if core >= params.core_count as usize {
            return Err(ReportsError::BadCoreIndex);
        }
        if seen_cores.contains(&core) {
            return Err(ReportsError::DuplicateReportOnCore);
        }
        if seen_hashes.contains(&guarantee.report.package_spec.hash) {
            return Err(ReportsError::DuplicatePackageHash);
        }

        let anchor = &guarantee.report.context.anchor;
        let anchor_entry = beta
            .entries
            .iter()
            .find(|e| &e.header_hash == anchor)
            .ok_or(ReportsError::BadAnchor)?;
        let is_last_unpatched = beta.last().map(|l| &l.header_hash) == Some(anchor);
        let root_matches = anchor_entry.state_root == guarantee.report.context.anchor_state_root
            || (is_last_unpatched && *parent_state_root == guarantee.report.context.anchor_state_root);
        if !root_matches {
            return Err(ReportsError::BadAnchor);
        }

        if !auth_pools.contains(core, &guarantee.report.authorizer_hash) {
            return Err(ReportsError::AuthorizationNotInPool);
        }

        if guarantee.signatures.len() < 2 || guarantee.signatures.len() > 3 {
            return Err(ReportsError::BadGuarantorAssignment);
        }
        if guarantee
            .signatures
            .windows(2)
            .any(|w| w[0].validator_index >= w[1].validator_index)
        {
            return Err(ReportsError::BadGuarantorSignature);
        }

        let age = current_slot.saturating_sub(guarantee.report.context.timeslot);
        if age >= params.validator_rotation_period.saturating_mul(2) {
            return Err(ReportsError::BadGuarantorAssignment);
        }
        let ring = if age < params.validator_rotation_period {
            &validator_keys.kappa_current
        } else {
            &validator_keys.lambda_previous
        };

        let entropy = rotation_entropy(
            eta_2,
            guarantee.report.context.timeslot,
            params.validator_rotation_period,
        );
        let assignment = guarantor_assignment(&entropy, ring.len() as u32, params.core_count);

        let message = report_message(&guarantee.report);
        let mut guarantor_keys = Vec::with_capacity(guarantee.signatures.len());
        for sig in &guarantee.signatures {
            let idx = sig.validator_index as usize;
            if assignment.get(idx).copied() != Some(core as u16) {
                return Err(ReportsError::BadGuarantorAssignment);
            }
            let signer = ring
                .validators
                .get(idx)
                .ok_or(ReportsError::BadGuarantorAssignment)?;
            verify(&signer.ed25519, &message, &sig.signature)
                .map_err(|_| ReportsError::BadGuarantorSignature)?;
            guarantor_keys.push(signer.ed25519);
        }

        seen_cores.push(core);
        seen_hashes.push(guarantee.report.package_spec.hash);
        rho.cores[core] = Some(PendingReport {
            report: guarantee.report.clone(),
            timeout: current_slot + params.report_timeout,
            guarantor_keys,
        });
    }

    Ok(rho)
}
