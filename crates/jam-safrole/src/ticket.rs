use jam_crypto::RingVrf;
use jam_state::{SafroleState, TicketBody, TicketEnvelope};
use jam_types::{Hash, Params};

use crate::error::SafroleError;

const TICKET_SEAL_CONTEXT: &[u8] = b"jam_ticket_seal";

fn vrf_input(eta_2: &Hash, attempt: u8) -> Vec<u8> {
    let mut input = Vec::with_capacity(TICKET_SEAL_CONTEXT.len() + 32 + 1);
    input.extend_from_slice(TICKET_SEAL_CONTEXT);
    input.extend_from_slice(eta_2);
    input.push(attempt);
    input
}

/// Validates and admits a ticket extrinsic into `safrole.gamma_a`,
/// returning the accumulator's new contents on success. Does not mutate
/// `safrole` itself — the caller (the STF orchestrator, through its
/// delta) commits the result only once every other subsystem in the
/// block has also succeeded.
pub fn process_ticket_extrinsic(
    safrole: &SafroleState,
    params: &Params,
    ring_vrf: &impl RingVrf,
    slot_in_epoch: u32,
    eta_2: &Hash,
    extrinsic: &[TicketEnvelope],
) -> Result<Vec<TicketBody>, SafroleError> {
    if extrinsic.is_empty() {
        return Ok(safrole.gamma_a.clone());
    }

    if slot_in_epoch >= params.ticket_submission_end_epoch_slot {
        return Err(SafroleError::UnexpectedTicket);
    }
    if extrinsic.len() as u32 > params.epoch_length {
        return Err(SafroleError::TooManyTicketsInExtrinsic);
    }

    let mut accepted = Vec::with_capacity(extrinsic.len());
    let mut prev_id: Option<Hash> = None;

    for envelope in extrinsic {
        if envelope.attempt >= params.max_ticket_entries_per_validator {
            return Err(SafroleError::BadTicketAttempt);
        }

        let input = vrf_input(eta_2, envelope.attempt);
        let id = ring_vrf
            .verify_ticket_proof(&safrole.gamma_z, &input, &envelope.signature)
            .map_err(|_| SafroleError::BadTicketProof)?;

        if let Some(prev) = prev_id {
            match id.cmp(&prev) {
                std::cmp::Ordering::Equal => return Err(SafroleError::DuplicateTicket),
                std::cmp::Ordering::Less => return Err(SafroleError::BadTicketOrder),
                std::cmp::Ordering::Greater => {}
            }
        }
        prev_id = Some(id);

        if safrole.contains_ticket_id(&id) {
            return Err(SafroleError::DuplicateTicket);
        }

        accepted.push(TicketBody {
            id,
            attempt: envelope.attempt,
        });
    }

    let mut combined = safrole.gamma_a.clone();
    combined.extend(accepted);
    combined.sort();
    combined.truncate(params.epoch_length as usize);
    Ok(combined)
}

/// Interleaves a full ticket accumulator front-to-back and back-to-front:
/// `[a0, a1, ..., an-1] -> [a0, a_{n-1}, a1, a_{n-2}, ...]`. This is how a
/// graduated accumulator becomes the epoch's sealing-key sequence.
pub fn outside_in_order<T: Clone>(seq: &[T]) -> Vec<T> {
    let mut out = Vec::with_capacity(seq.len());
    let (mut lo, mut hi) = (0usize, seq.len());
    let mut take_front = true;
    while lo < hi {
        if take_front {
            out.push(seq[lo].clone());
            lo += 1;
        } else {
            hi -= 1;
            out.push(seq[hi].clone());
        }
        take_front = !take_front;
    }
    out
}
