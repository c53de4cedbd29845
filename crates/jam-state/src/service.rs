use std::collections::BTreeMap;

use jam_types::{Gas, Hash, ServiceId, TimeSlot};
use serde::{Deserialize, Serialize};

/// The state of one requested preimage: not yet provided, or provided at
/// a recorded slot (the slot a `preimages_introduced` statistic was
/// credited at).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PreimageStatus {
    Requested,
    Available { slot: TimeSlot },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceAccount {
    pub balance: u64,
    pub min_gas_accumulate: Gas,
    pub min_gas_on_transfer: Gas,
    pub code_hash: Hash,
    /// `BTreeMap`, not `HashMap`: state that feeds a consensus-relevant
    /// root must never leak hash-table iteration order.
    pub storage: BTreeMap<Hash, Vec<u8>>,
    pub preimage_lookups: BTreeMap<Hash, PreimageStatus>,
    pub last_accumulation_slot: TimeSlot,
    pub creation_slot: TimeSlot,
}

impl ServiceAccount {
    pub fn new(code_hash: Hash, min_gas_accumulate: Gas, min_gas_on_transfer: Gas, creation_slot: TimeSlot) -> Self {
        Self {
            balance: 0,
            min_gas_accumulate,
            min_gas_on_transfer,
            code_hash,
            storage: BTreeMap::new(),
            preimage_lookups: BTreeMap::new(),
            last_accumulation_slot: creation_slot,
            creation_slot,
        }
    }

    /// True iff this service was created in `slot` — such a service is
    /// carved out of the `last_accumulation_slot` update rule even when
    /// invoked during its creation block (§3's gas-accounting supplement).
    pub fn created_this_slot(&self, slot: TimeSlot) -> bool {
        self.creation_slot == slot
    }
}

/// δ: the full service-account dictionary, keyed by service id.
pub type Services = BTreeMap<ServiceId, ServiceAccount>;
