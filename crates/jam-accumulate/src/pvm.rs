//! The PVM boundary as an opaque trait. No bytecode interpreter ships in
//! this workspace (explicitly out of scope); [`NullPvmHost`] is enough to
//! drive every other piece of accumulation bookkeeping end to end.

use jam_types::{Gas, Hash, ServiceId};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PvmEntryPoint {
    Accumulate,
    OnTransfer,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PvmCall {
    pub service: ServiceId,
    pub code_hash: Hash,
    pub entry_point: PvmEntryPoint,
    pub gas_limit: Gas,
    pub payload: Vec<u8>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PvmStatus {
    Halt,
    OutOfGas,
    Panic,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    pub from: ServiceId,
    pub to: ServiceId,
    pub amount: u64,
    pub gas: Gas,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewService {
    pub id: ServiceId,
    pub code_hash: Hash,
    pub min_gas_accumulate: Gas,
    pub min_gas_on_transfer: Gas,
}

/// A PVM invocation's full effect, applied atomically to δ′ by the
/// caller. `storage_writes` entries with `None` delete the key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PvmOutcome {
    pub status: PvmStatus,
    pub gas_used: Gas,
    pub storage_writes: Vec<(Hash, Option<Vec<u8>>)>,
    pub transfers: Vec<Transfer>,
    pub new_services: Vec<NewService>,
    pub preimage_requests: Vec<Hash>,
}

impl PvmOutcome {
    pub fn halted_empty() -> Self {
        Self {
            status: PvmStatus::Halt,
            gas_used: 0,
            storage_writes: vec![],
            transfers: vec![],
            new_services: vec![],
            preimage_requests: vec![],
        }
    }
}

pub trait PvmHost {
    fn invoke(&self, call: PvmCall) -> PvmOutcome;
}

/// Always halts immediately with zero gas used and no effects. Enough to
/// exercise service creation, transfers, preimage solicitation, and
/// statistics bookkeeping without a real bytecode interpreter.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullPvmHost;

impl PvmHost for NullPvmHost {
    fn invoke(&self, _call: PvmCall) -> PvmOutcome {
        PvmOutcome::halted_empty()
    }
}
