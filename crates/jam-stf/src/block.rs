//! The block and header wire types the orchestrator consumes, and their
//! codec impls — the aggregate of every subsystem's own extrinsic type.

use jam_accumulate::PreimagesExtrinsic;
use jam_assurances::Assurance;
use jam_codec::{CodecError, Decode, Encode};
use jam_crypto::blake2b_256;
use jam_disputes::DisputesExtrinsic;
use jam_reports::Guarantee;
use jam_state::{TicketBody, TicketEnvelope};
use jam_types::{Hash, TimeSlot, ValidatorIndex};

/// A block's header. `epoch_mark` and `tickets_mark` are `Some` iff this
/// block opens a new epoch (spec.md §4.9 step 4 / scenario S4); the
/// orchestrator checks both against the values it computes during
/// rotation, not just their presence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Header {
    pub parent_hash: Hash,
    pub parent_state_root: Hash,
    pub slot: TimeSlot,
    pub author_index: ValidatorIndex,
    /// Opaque per-block VRF output folded into η[0] (spec.md §4.9 step 3).
    /// Real IETF-VRF derivation of this value is out of scope; the
    /// orchestrator treats it as given.
    pub entropy_source: Hash,
    pub epoch_mark: Option<Hash>,
    pub tickets_mark: Option<Vec<TicketBody>>,
}

impl Header {
    /// A canonical commitment to this header, used as the `header_hash`
    /// recorded in β and as the anchor named by later reports' contexts.
    pub fn hash(&self) -> Hash {
        blake2b_256(&self.encode())
    }
}

impl Encode for Header {
    fn encode_to(&self, out: &mut Vec<u8>) {
        self.parent_hash.encode_to(out);
        self.parent_state_root.encode_to(out);
        self.slot.encode_to(out);
        self.author_index.encode_to(out);
        self.entropy_source.encode_to(out);
        self.epoch_mark.encode_to(out);
        self.tickets_mark.encode_to(out);
    }
}

impl Decode for Header {
    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(Self {
            parent_hash: Decode::decode(input)?,
            parent_state_root: Decode::decode(input)?,
            slot: Decode::decode(input)?,
            author_index: Decode::decode(input)?,
            entropy_source: Decode::decode(input)?,
            epoch_mark: Decode::decode(input)?,
            tickets_mark: Decode::decode(input)?,
        })
    }
}

/// One block: a header plus the six extrinsics spec.md §4.9 folds into
/// the state transition, in the order the pipeline applies them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Block {
    pub header: Header,
    pub tickets: Vec<TicketEnvelope>,
    pub disputes: DisputesExtrinsic,
    pub preimages: PreimagesExtrinsic,
    pub guarantees: Vec<Guarantee>,
    pub assurances: Vec<Assurance>,
}

impl Encode for Block {
    fn encode_to(&self, out: &mut Vec<u8>) {
        self.header.encode_to(out);
        self.tickets.encode_to(out);
        self.disputes.encode_to(out);
        self.preimages.encode_to(out);
        self.guarantees.encode_to(out);
        self.assurances.encode_to(out);
    }
}

impl Decode for Block {
    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(Self {
            header: Decode::decode(input)?,
            tickets: Decode::decode(input)?,
            disputes: Decode::decode(input)?,
            preimages: Decode::decode(input)?,
            guarantees: Decode::decode(input)?,
            assurances: Decode::decode(input)?,
        })
    }
}
