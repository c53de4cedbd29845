//! Shared primitive types and runtime parameters for the JAM core.
//!
//! Every other crate in the workspace depends on this one for the id/hash
//! aliases and the [`Params`] record. Parameters are a runtime value, not a
//! compile-time generic: `tiny()` and `full()` are two instances of the same
//! types, never two monomorphizations (see SPEC_FULL.md's redesign note).

use serde::{Deserialize, Serialize};

/// 32-byte opaque hash (Blake2b-256 output throughout the STF).
pub type Hash = [u8; 32];

/// Ed25519 public key.
pub type Ed25519Public = [u8; 32];

/// Ed25519 signature.
pub type Ed25519Signature = [u8; 64];

/// Bandersnatch public key used for ring-VRF ticket proofs.
pub type BandersnatchPublic = [u8; 32];

/// Ring-VRF signature (ticket envelope proof).
pub type RingVrfSignature = [u8; 784];

/// Ring-VRF commitment over a validator set.
pub type RingCommitment = [u8; 144];

/// BLS public key (aggregatable).
pub type BlsPublic = [u8; 144];

/// Monotonically increasing slot number.
pub type TimeSlot = u32;

/// Epoch index (`TimeSlot / epoch_length`).
pub type EpochIndex = u32;

/// Index into the validator set.
pub type ValidatorIndex = u16;

/// Index into the core set.
pub type CoreIndex = u16;

/// Service account identifier.
pub type ServiceId = u32;

/// Gas units.
pub type Gas = u64;

/// All-zero hash, used for genesis parents and unset roots.
pub const ZERO_HASH: Hash = [0u8; 32];

/// Genesis block's parent hash.
pub const GENESIS_PARENT: Hash = ZERO_HASH;

/// Runtime-configurable protocol parameters.
///
/// Two canonical instances are provided ([`Params::tiny`] and
/// [`Params::full`]); both drive identical subsystem logic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Params {
    /// Slots per epoch (`E`).
    pub epoch_length: u32,
    /// Validator set size.
    pub validators_count: u32,
    /// Number of cores.
    pub core_count: u32,
    /// Bytes per availability bitfield (`ceil(core_count / 8)`).
    pub avail_bitfield_bytes: u32,
    /// Slot-in-epoch after which ticket submission is rejected (`Y`).
    pub ticket_submission_end_epoch_slot: u32,
    /// Maximum ticket attempts a single validator may submit per epoch (`N`).
    pub max_ticket_entries_per_validator: u8,
    /// Capacity of the recent-history sequence (β) (`H`).
    pub recent_blocks_depth: u32,
    /// Per-core authorization pool capacity (`O`).
    pub max_authorizations_pool_items: u32,
    /// Per-core authorization queue capacity (`Q`).
    pub max_authorizations_queue_items: u32,
    /// Guarantor rotation period in slots (`R`).
    pub validator_rotation_period: u32,
    /// Slots before a pending report in ρ times out (`U`).
    pub report_timeout: u32,
}

impl Params {
    /// The "tiny" parameter set used by spec.md's concrete scenarios
    /// (S1–S6): `epoch_length=12, validators_count=6, core_count=2`.
    pub const fn tiny() -> Self {
        Self {
            epoch_length: 12,
            validators_count: 6,
            core_count: 2,
            avail_bitfield_bytes: 1,
            ticket_submission_end_epoch_slot: 10,
            max_ticket_entries_per_validator: 3,
            recent_blocks_depth: 8,
            max_authorizations_pool_items: 8,
            max_authorizations_queue_items: 80,
            validator_rotation_period: 4,
            report_timeout: 5,
        }
    }

    /// The production-scale parameter set.
    pub const fn full() -> Self {
        Self {
            epoch_length: 600,
            validators_count: 1023,
            core_count: 341,
            avail_bitfield_bytes: 43, // ceil(341 / 8)
            ticket_submission_end_epoch_slot: 500,
            max_ticket_entries_per_validator: 2,
            recent_blocks_depth: 8,
            max_authorizations_pool_items: 8,
            max_authorizations_queue_items: 80,
            validator_rotation_period: 10,
            report_timeout: 5,
        }
    }

    /// Two-thirds-plus-one super-majority threshold over the validator set.
    pub fn validators_super_majority(&self) -> u32 {
        (self.validators_count * 2) / 3 + 1
    }

    /// Number of epochs elapsed for a given slot.
    pub fn epoch_of(&self, slot: TimeSlot) -> EpochIndex {
        slot / self.epoch_length
    }

    /// Slot-in-epoch (`slot mod epoch_length`).
    pub fn slot_in_epoch(&self, slot: TimeSlot) -> u32 {
        slot % self.epoch_length
    }

    /// True when `new_slot` crosses an epoch boundary relative to `old_slot`.
    pub fn is_epoch_boundary(&self, old_slot: TimeSlot, new_slot: TimeSlot) -> bool {
        self.epoch_of(new_slot) > self.epoch_of(old_slot)
    }
}

impl Default for Params {
    fn default() -> Self {
        Self::tiny()
    }
}
