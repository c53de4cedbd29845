//! The block state-transition function (spec.md §4.9): one fixed
//! twelve-step pipeline composing every subsystem crate's transition over
//! a [`jam_state::StateDelta`], committing only once every step succeeds.
//!
//! Grounded on `zeratul-mvp/src/consensus.rs`'s block-application entry
//! point, which runs a similarly fixed sequence of sub-transitions over a
//! single mutable state handle; here the handle is a delta so a failing
//! step never leaves a partially-mutated `State` visible to the caller.

mod block;
mod error;

pub use block::{Block, Header};
pub use error::StfError;

use jam_accumulate::PvmHost;
use jam_crypto::{blake2b_256, blake2b_256_pair, RingVrf};
use jam_state::{RecentHistoryEntry, SealingKeySequence, State, StateDelta};
use jam_types::{Hash, Params};

/// Applies `block` to `pre_state`, returning the post-state and its root
/// on success. Nothing is mutated on error: the caller's `pre_state`
/// remains valid pre-state for a retry with a different block.
#[tracing::instrument(skip_all, fields(slot = block.header.slot))]
pub fn apply_block(
    pre_state: &State,
    params: &Params,
    ring_vrf: &impl RingVrf,
    host: &impl PvmHost,
    block: &Block,
) -> Result<(State, Hash), StfError> {
    let mut delta = StateDelta::new(pre_state);
    let old_tau = *delta.get_tau();
    let new_slot = block.header.slot;

    // Step 1: time.
    if new_slot <= old_tau {
        return Err(StfError::BadSlot);
    }
    if block.header.author_index as u32 >= params.validators_count {
        return Err(StfError::BadAuthorIndex);
    }
    *delta.ensure_tau() = new_slot;
    tracing::debug!(old_tau, new_slot, "time advanced");

    // Step 2: recent-history parent-root patch.
    let patched_beta =
        jam_history::patch_parent_root(delta.get_beta(), block.header.parent_state_root);
    *delta.ensure_beta() = patched_beta;

    // Step 3: entropy fold, rotating on an epoch boundary.
    let is_boundary = params.is_epoch_boundary(old_tau, new_slot);
    let folded = delta.get_eta().fold(&block.header.entropy_source);
    *delta.ensure_eta() = if is_boundary { folded.rotate_epoch() } else { folded };
    tracing::debug!(is_boundary, "entropy folded");

    // Step 4: Safrole epoch rotation (if boundary) and ticket extrinsic.
    if is_boundary {
        let prior_slot_in_epoch = params.slot_in_epoch(old_tau);
        let epochs_consecutive = params.epoch_of(new_slot) == params.epoch_of(old_tau) + 1;
        let eta_prime_2 = delta.get_eta().eta[2];
        let (new_keys, new_safrole) = jam_safrole::rotate_epoch(
            delta.get_validator_keys(),
            delta.get_safrole(),
            delta.get_psi(),
            params,
            ring_vrf,
            &eta_prime_2,
            prior_slot_in_epoch,
            epochs_consecutive,
        );
        *delta.ensure_validator_keys() = new_keys;
        *delta.ensure_safrole() = new_safrole;
    }

    let slot_in_epoch = params.slot_in_epoch(new_slot);
    let eta_2 = delta.get_eta().eta[2];
    let new_gamma_a = jam_safrole::process_ticket_extrinsic(
        delta.get_safrole(),
        params,
        ring_vrf,
        slot_in_epoch,
        &eta_2,
        &block.tickets,
    )?;
    delta.ensure_safrole().gamma_a = new_gamma_a;

    check_header_marks(&delta, is_boundary, &block.header)?;

    // Step 5: disputes.
    let current_epoch = params.epoch_of(new_slot);
    let (new_psi, new_rho) = jam_disputes::process_disputes(
        delta.get_psi(),
        delta.get_rho(),
        delta.get_validator_keys(),
        params,
        current_epoch,
        &block.disputes,
    )?;
    *delta.ensure_psi() = new_psi;
    *delta.ensure_rho() = new_rho;

    // Step 6: reports/guarantees.
    let new_rho = jam_reports::process_guarantees(
        delta.get_rho(),
        delta.get_beta(),
        delta.get_auth_pools(),
        delta.get_validator_keys(),
        params,
        new_slot,
        &block.header.parent_state_root,
        &eta_2,
        &block.guarantees,
    )?;
    *delta.ensure_rho() = new_rho;

    // Step 7: assurances.
    let (new_rho, promoted) = jam_assurances::process_assurances(
        delta.get_rho(),
        delta.get_validator_keys(),
        params,
        new_slot,
        &block.header.parent_hash,
        &block.assurances,
    )?;
    *delta.ensure_rho() = new_rho;
    tracing::debug!(promoted = promoted.len(), "reports promoted to accumulation");

    // Step 8: preimages.
    let (new_services, preimages_introduced, octets) =
        jam_accumulate::process_preimages(delta.get_services(), new_slot, &block.preimages)?;
    *delta.ensure_services() = new_services;

    // Step 9: accumulation.
    let (new_services, new_stats, accumulate_root) = jam_accumulate::process_accumulation(
        delta.get_services(),
        delta.get_stats(),
        host,
        new_slot,
        &promoted,
    );
    *delta.ensure_services() = new_services;
    *delta.ensure_stats() = new_stats;

    // Step 10: recent-history append.
    let header_hash = block.header.hash();
    let work_reports_root = blake2b_256(&encode_guarantees(&block.guarantees));
    let entry = RecentHistoryEntry {
        header_hash,
        state_root: jam_types::ZERO_HASH,
        beefy_mmr: blake2b_256_pair(&header_hash, &accumulate_root),
        work_reports_root,
        accumulate_root,
    };
    *delta.ensure_beta() = jam_history::append_entry(delta.get_beta(), params, entry);

    // Step 11: validator statistics.
    if is_boundary {
        jam_history::rotate_epoch(delta.ensure_stats());
    }
    jam_history::record_author(
        delta.ensure_stats(),
        block.header.author_index,
        block.tickets.len() as u32,
        preimages_introduced,
        octets,
    );
    for assurance in &block.assurances {
        jam_history::record_assurer(delta.ensure_stats(), assurance.validator_index);
    }
    for guarantee in &block.guarantees {
        for sig in &guarantee.signatures {
            jam_history::record_guarantor(delta.ensure_stats(), sig.validator_index);
        }
    }

    // Step 12: merge and compute the post-root.
    let post_state = delta.merge();
    let post_root = post_state.state_root();
    Ok((post_state, post_root))
}

/// Checks the header's epoch/tickets marks against what the pipeline just
/// computed — scenario S4's "marks must match the outside-in sequence"
/// requirement, and its converse: no marks on a non-boundary block.
fn check_header_marks(
    delta: &StateDelta<'_>,
    is_boundary: bool,
    header: &Header,
) -> Result<(), StfError> {
    if !is_boundary {
        return if header.epoch_mark.is_some() || header.tickets_mark.is_some() {
            Err(StfError::BadEpochMark)
        } else {
            Ok(())
        };
    }

    let mut mark_input = Vec::new();
    for key in delta.get_safrole().gamma_k.bandersnatch_keys() {
        mark_input.extend_from_slice(&key);
    }
    mark_input.extend_from_slice(&delta.get_eta().eta[0]);
    let expected_epoch_mark = blake2b_256(&mark_input);
    if header.epoch_mark != Some(expected_epoch_mark) {
        return Err(StfError::BadEpochMark);
    }

    let expected_tickets_mark = match &delta.get_safrole().gamma_s {
        SealingKeySequence::Tickets(seq) => Some(seq.clone()),
        SealingKeySequence::Fallback(_) => None,
    };
    if header.tickets_mark != expected_tickets_mark {
        return Err(StfError::BadTicketsMark);
    }
    Ok(())
}

fn encode_guarantees(guarantees: &[jam_reports::Guarantee]) -> Vec<u8> {
    use jam_codec::Encode;
    guarantees.encode()
}
