use jam_types::{BandersnatchPublic, Hash, RingCommitment, RingVrfSignature};
use serde::{Deserialize, Serialize};

use crate::validators::ValidatorSet;

/// A ring-VRF-derived ticket identity: the 32-byte VRF output and the
/// attempt number that produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TicketBody {
    pub id: Hash,
    pub attempt: u8,
}

/// The wire form of a ticket submission: the attempt plus the ring-VRF
/// proof. `process_ticket_extrinsic` (in `jam-safrole`) verifies the proof
/// and recovers the [`TicketBody`] from it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketEnvelope {
    pub attempt: u8,
    pub signature: RingVrfSignature,
}

/// The length-`epoch_length` sequence that determines block-author
/// eligibility within an epoch: either a ticket sequence (the common
/// case, once an epoch's ticket accumulator fills) or a sequence of
/// fallback Bandersnatch keys drawn from the validator set by entropy.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SealingKeySequence {
    Tickets(Vec<TicketBody>),
    Fallback(Vec<BandersnatchPublic>),
}

impl SealingKeySequence {
    pub fn len(&self) -> usize {
        match self {
            Self::Tickets(t) => t.len(),
            Self::Fallback(f) => f.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Safrole's mutable state (γ): the validator set eligible to seal the
/// *next* epoch, its ring commitment, the current epoch's sealing-key
/// sequence, and the in-progress ticket accumulator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafroleState {
    pub gamma_k: ValidatorSet,
    pub gamma_z: RingCommitment,
    pub gamma_s: SealingKeySequence,
    /// Ordered-by-id ticket accumulator, at most `epoch_length` entries.
    pub gamma_a: Vec<TicketBody>,
}

impl SafroleState {
    /// Binary-searches `gamma_a` for `id`, mirroring the duplicate check
    /// `jam-safrole`'s ticket admission performs before inserting.
    pub fn contains_ticket_id(&self, id: &Hash) -> bool {
        self.gamma_a.binary_search_by(|t| t.id.cmp(id)).is_ok()
    }
}
